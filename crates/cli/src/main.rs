use anyhow::Result;
use clap::Parser;
use skilltoken_cli::args::CliArgs;
use skilltoken_cli::DEFAULT_LOG_FILTER;
use tokio::signal;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    let args = CliArgs::parse();
    init_tracing(&args);

    let liveness = CancellationToken::new();
    tokio::spawn({
        let liveness = liveness.clone();
        async move {
            match signal::ctrl_c().await {
                Ok(()) => {
                    info!(target: "skilltoken", "shutdown signal received (Ctrl+C)");
                    liveness.cancel();
                }
                Err(err) => {
                    error!(target: "skilltoken", error = %err, "failed to wait for shutdown signal")
                }
            }
        }
    });

    match skilltoken_cli::run(&args, &liveness).await {
        Ok(output) => {
            println!("{}", output);
            Ok(())
        }
        Err(err) => {
            error!(target: "skilltoken", error = %err, "command failed");
            Err(err)
        }
    }
}

fn init_tracing(args: &CliArgs) {
    let env_filter = match args.verbose {
        Some(level) => EnvFilter::new(format!("{0},skilltoken={0}", level.as_str())),
        None => EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
    };
    let _ = fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .try_init();
}
