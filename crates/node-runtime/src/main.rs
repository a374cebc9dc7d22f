//! # Identity-Ledger Node Runtime
//!
//! ## Startup Sequence
//!
//! 1. Load configuration from `IL_*` environment variables
//! 2. Install the tracing subscriber
//! 3. Open the store and the ledger application
//! 4. Serve until Ctrl+C
//!
//! The replication engine connects through the application callbacks; the
//! runtime itself never orders transactions.

use anyhow::{Context, Result};
use node_runtime::logging::init_tracing;
use node_runtime::{LedgerContainer, NodeConfig};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let config = NodeConfig::from_env().context("Invalid configuration")?;
    init_tracing(&config.logging)?;

    info!("===========================================");
    info!("  Identity-Ledger Node Runtime v{}", env!("CARGO_PKG_VERSION"));
    info!("===========================================");

    let container = LedgerContainer::open(config).context("Failed to open ledger")?;
    {
        let app = container.app();
        let app = app.read();
        info!(
            last_height = app.last_height(),
            state_root = %hex::encode(app.state_root()),
            "Node is running. Press Ctrl+C to stop."
        );
    }

    tokio::signal::ctrl_c().await?;
    info!("Shutdown complete");
    Ok(())
}
