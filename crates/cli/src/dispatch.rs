//! Command dispatch logic.
//!
//! Responsibilities:
//! - Route parsed CLI arguments to appropriate command handlers.
//! - Extract the configuration each command needs.
//!
//! Does NOT handle:
//! - CLI structure definitions (see `args` module).
//! - Configuration loading (see `main()` and `config_context`).
//!
//! Invariants:
//! - All commands receive a valid cancellation token
//! - Offline commands never ask for a real config

use anyhow::Result;

use crate::args::{Cli, Commands};
use crate::cancellation::CancellationToken;
use crate::commands;
use crate::config_context::ConfigCommandContext;

/// Dispatch CLI commands to their respective handlers.
pub(crate) async fn run_command(
    cli: Cli,
    config: ConfigCommandContext,
    cancel_token: &CancellationToken,
) -> Result<()> {
    match cli.command {
        Commands::List {
            scope,
            defaults: true,
        } => {
            commands::list::run_defaults(config.host_signals(), scope, &cli.output)?;
        }
        Commands::List {
            scope,
            defaults: false,
        } => {
            let config = config.into_real_config()?;
            commands::list::run(config, scope, &cli.output, cancel_token).await?;
        }
        Commands::Set {
            action,
            combination,
            prevent_default,
        } => {
            let config = config.into_real_config()?;
            commands::set::run(
                config,
                &action,
                &combination,
                prevent_default,
                &cli.output,
                cancel_token,
            )
            .await?;
        }
        Commands::Reset => {
            let config = config.into_real_config()?;
            commands::reset::run(config, cancel_token).await?;
        }
        Commands::Normalize { tokens, display } => {
            commands::normalize::run(config.host_signals(), tokens, display, &cli.output)?;
        }
        Commands::Watch { scope } => {
            commands::watch::run(config, scope, cancel_token).await?;
        }
    }

    Ok(())
}
