//! Wallet ledger service binary
//!
//! Hosts a [`Ledger`] instance for the lifetime of the process. Transport
//! adapters (HTTP routing, payload validation) mount on top of this shell.

use wallet_ledger::{Config, Ledger};

#[tokio::main]
async fn main() -> wallet_ledger::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    // Load configuration
    let config = Config::from_env()?;
    tracing::info!(
        service = %config.service_name,
        version = %config.service_version,
        listen = %config.listen_addr,
        "Starting wallet ledger server"
    );

    let ledger = Ledger::new(config)?;
    tracing::info!("Ledger ready");

    // TODO: mount the HTTP adapter on listen_addr and the metrics exporter
    // on metrics_listen_addr. Until then, just keep running.
    tokio::signal::ctrl_c().await?;

    tracing::info!(wallets = ledger.wallet_count(), "Shutting down ledger server");
    Ok(())
}
