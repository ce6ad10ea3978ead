//! Reset command implementation.

use anyhow::{Context, Result};
use tracing::info;

use mailkeys_config::Config;

use crate::cancellation::{CancellationToken, run_cancellable};

/// Remove every stored override.
pub async fn run(config: Config, cancel: &CancellationToken) -> Result<()> {
    info!("Resetting shortcut overrides...");

    let gateway = super::build_gateway(&config)?;
    run_cancellable(cancel, async {
        gateway
            .reset()
            .await
            .context("Failed to reset shortcut overrides")
    })
    .await?;

    println!("All shortcut overrides removed. Defaults are active again.");
    Ok(())
}
