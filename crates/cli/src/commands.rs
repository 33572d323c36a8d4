//! Command handlers. Each returns the text to print so it can be tested
//! without capturing stdout.

use crate::args::CliArgs;
use anyhow::{Context, Result};
use skilltoken_config::SkillTokenConfig;
use skilltoken_core::{MintRequest, SkillToken, TokenStore, TransactionManager};
use skilltoken_rpc_client::{LedgerClient, RpcClient};
use skilltoken_wallets::WalletBridge;
use std::fmt::Write as _;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Resolves the configuration: file (or defaults), then environment, then flags
pub fn resolve_config(args: &CliArgs) -> Result<SkillTokenConfig> {
    let mut config = match &args.config {
        Some(path) => SkillTokenConfig::load(path)
            .with_context(|| format!("failed to load configuration from {}", path.display()))?,
        None => SkillTokenConfig::default(),
    };
    config.apply_env()?;

    if let Some(address) = &args.module_address {
        config.module_address = Some(address.clone());
    }
    if let Some(network) = args.network {
        config.network = network;
    }
    if let Some(url) = &args.node_url {
        config.node_url = Some(url.clone());
    }

    config.validate()?;
    debug!(target: "skilltoken", network = %config.network, "configuration resolved");
    Ok(config)
}

fn ledger_for(config: &SkillTokenConfig) -> Result<Arc<dyn LedgerClient>> {
    let url = config.node_url()?;
    info!(target: "skilltoken", node = %url, "using fullnode");
    Ok(Arc::new(RpcClient::new(url)?))
}

/// `tokens <ADDRESS>`
pub async fn tokens(
    config: &SkillTokenConfig,
    address: &str,
    json: bool,
    liveness: &CancellationToken,
) -> Result<String> {
    let ledger = ledger_for(config)?;
    let mut store = TokenStore::new();
    store
        .sync_while_live(ledger.as_ref(), config, address, liveness)
        .await?;

    if json {
        return Ok(serde_json::to_string_pretty(store.tokens())?);
    }
    Ok(render_tokens(store.address().unwrap_or(address), store.tokens()))
}

/// `confirm <HASH>`
pub async fn confirm(
    config: &SkillTokenConfig,
    hash: &str,
    liveness: &CancellationToken,
) -> Result<String> {
    let ledger = ledger_for(config)?;
    let manager = TransactionManager::new(WalletBridge::default(), ledger, Arc::new(config.clone()));
    let transaction = manager.confirm(hash, liveness).await?;
    Ok(format!(
        "Transaction {} confirmed after {} check(s)",
        transaction.hash, transaction.attempts
    ))
}

/// `payload --skill-name NAME --skill-level N`
pub fn payload(config: &SkillTokenConfig, skill_name: &str, skill_level: u64) -> Result<String> {
    let request = MintRequest::new(skill_name, skill_level)?;
    let payload = request.payload(config)?;
    Ok(serde_json::to_string_pretty(&payload)?)
}

/// `config`
pub fn show_config(config: &SkillTokenConfig) -> Result<String> {
    Ok(config.to_toml_string()?)
}

/// Plain text listing of `tokens`
pub fn render_tokens(address: &str, tokens: &[SkillToken]) -> String {
    if tokens.is_empty() {
        return format!("No skill tokens owned by {}", address);
    }

    let mut out = format!("{} skill token(s) owned by {}\n", tokens.len(), address);
    for token in tokens {
        let minted = token
            .created_date()
            .map(|date| date.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "unknown".to_string());
        let _ = writeln!(
            out,
            "  #{:<6} {:<24} level {:<3} {:>4} endorsement(s)  minted {}",
            token.token_id, token.skill_name, token.skill_level, token.endorsements, minted
        );
    }
    out
}
