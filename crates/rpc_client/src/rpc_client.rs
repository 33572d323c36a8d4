// Copyright (C) 2015-2025 The Neo Project.
//
// rpc_client.rs file belongs to the neo project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

use crate::ledger_client::LedgerClient;
use crate::models::{CommittedTransaction, TransactionLookup, ViewRequest};
use crate::rpc_error::RpcError;
use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

/// Interval between `by_hash` lookups while waiting for a transaction
pub const DEFAULT_TRANSACTION_POLL_INTERVAL: Duration = Duration::from_millis(500);

/// REST client for a ledger fullnode
#[derive(Debug, Clone)]
pub struct RpcClient {
    base_address: Url,
    http_client: Client,
    poll_interval: Duration,
}

impl RpcClient {
    /// Creates a new client for the node at `url` (e.g. `https://host/v1`)
    pub fn new(url: Url) -> Result<Self, RpcError> {
        let http_client = Client::builder().build()?;
        Ok(Self::with_client(http_client, url))
    }

    /// Creates a new client with an existing HTTP client
    pub fn with_client(client: Client, url: Url) -> Self {
        Self {
            base_address: url,
            http_client: client,
            poll_interval: DEFAULT_TRANSACTION_POLL_INTERVAL,
        }
    }

    /// Overrides the lookup interval used by `wait_for_transaction`
    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    /// Base REST address
    pub fn base_address(&self) -> &Url {
        &self.base_address
    }

    fn endpoint(&self, path: &str) -> Result<Url, RpcError> {
        let base = self.base_address.as_str().trim_end_matches('/');
        Url::parse(&format!("{}/{}", base, path))
            .map_err(|e| RpcError::Parse(format!("Invalid endpoint {}: {}", path, e)))
    }

    /// Executes a view function.
    ///
    /// The node answers with an array holding one entry per return value. The
    /// first return value is handed back as-is (`null` when there is none); a
    /// body that is not an array is passed through untouched so callers can
    /// classify it.
    pub async fn view(&self, request: &ViewRequest) -> Result<Value, RpcError> {
        let url = self.endpoint("view")?;
        debug!(target: "skilltoken", function = %request.function, "view request");

        let response = self.http_client.post(url).json(request).send().await?;
        let body = Self::read_json(response).await?;

        Ok(match body {
            Value::Array(values) => values.into_iter().next().unwrap_or(Value::Null),
            other => other,
        })
    }

    /// Looks a transaction up by hash
    pub async fn get_transaction_by_hash(&self, hash: &str) -> Result<TransactionLookup, RpcError> {
        let url = self.endpoint(&format!("transactions/by_hash/{}", hash))?;
        let response = self.http_client.get(url).send().await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(RpcError::NotFound(hash.to_string()));
        }

        let body = Self::read_json(response).await?;
        TransactionLookup::from_json(&body).map_err(RpcError::Parse)
    }

    /// Polls until `hash` commits, failing on a VM error or after `timeout`
    pub async fn wait_for_transaction(
        &self,
        hash: &str,
        timeout: Duration,
    ) -> Result<CommittedTransaction, RpcError> {
        let wait = async {
            loop {
                match self.get_transaction_by_hash(hash).await {
                    Ok(TransactionLookup::Committed(tx)) if tx.success => return Ok(tx),
                    Ok(TransactionLookup::Committed(tx)) => {
                        return Err(RpcError::VmFailure {
                            hash: tx.hash,
                            vm_status: tx.vm_status,
                        })
                    }
                    // Freshly submitted transactions may not be indexed yet
                    Ok(TransactionLookup::Pending) | Err(RpcError::NotFound(_)) => {
                        debug!(target: "skilltoken", hash, "transaction not committed yet");
                    }
                    Err(err) => return Err(err),
                }
                tokio::time::sleep(self.poll_interval).await;
            }
        };

        tokio::time::timeout(timeout, wait)
            .await
            .map_err(|_| RpcError::Timeout(hash.to_string()))?
    }

    async fn read_json(response: reqwest::Response) -> Result<Value, RpcError> {
        let status = response.status();
        let content = response
            .text()
            .await
            .map_err(|e| RpcError::Http(format!("Failed to read response: {}", e)))?;

        if !status.is_success() {
            return Err(RpcError::Status {
                code: status.as_u16(),
                message: error_message(&content),
            });
        }

        serde_json::from_str(&content).map_err(|e| RpcError::Parse(e.to_string()))
    }
}

#[async_trait]
impl LedgerClient for RpcClient {
    async fn view(&self, request: &ViewRequest) -> Result<Value, RpcError> {
        RpcClient::view(self, request).await
    }

    async fn wait_for_transaction(
        &self,
        hash: &str,
        timeout: Duration,
    ) -> Result<CommittedTransaction, RpcError> {
        RpcClient::wait_for_transaction(self, hash, timeout).await
    }
}

/// Extracts `message` from a node error body, falling back to the raw text
fn error_message(content: &str) -> String {
    serde_json::from_str::<Value>(content)
        .ok()
        .and_then(|v| v.get("message").and_then(Value::as_str).map(str::to_string))
        .unwrap_or_else(|| content.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_joins_without_double_slash() {
        let client = RpcClient::new(Url::parse("http://localhost:8080/v1/").unwrap()).unwrap();
        assert_eq!(
            client.endpoint("view").unwrap().as_str(),
            "http://localhost:8080/v1/view"
        );
    }

    #[test]
    fn test_error_message_prefers_node_message() {
        assert_eq!(
            error_message(r#"{"message":"function not found","error_code":"invalid_input"}"#),
            "function not found"
        );
        assert_eq!(error_message("bad gateway"), "bad gateway");
    }
}
