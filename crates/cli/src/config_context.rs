//! Configuration context for command execution.
//!
//! Responsibilities:
//! - Distinguish between real and placeholder configs at compile time.
//! - Provide type-safe extraction of config for commands that need it.
//!
//! Does NOT handle:
//! - Configuration loading (done in `main()`).
//! - CLI argument definitions (see `args` module).
//!
//! Invariants:
//! - Placeholder contexts cannot be used for server connections.
//! - Both variants carry host signals, so notation works without credentials.

use mailkeys_config::{Config, HostSignals};

/// Context for command execution, distinguishing between real and placeholder configs.
pub(crate) enum ConfigCommandContext {
    /// A validated config loaded from `.env`, environment and CLI args.
    Real(Box<Config>),
    /// Host signals only, for commands that never contact the server.
    Placeholder(HostSignals),
}

impl ConfigCommandContext {
    /// Extract the real config, failing if this is a placeholder.
    pub(crate) fn into_real_config(self) -> anyhow::Result<Config> {
        match self {
            ConfigCommandContext::Real(config) => Ok(*config),
            ConfigCommandContext::Placeholder(_) => {
                anyhow::bail!(
                    "Internal error: attempted to use placeholder config for an operation requiring real connection details"
                )
            }
        }
    }

    /// Host signals for key notation, available in both variants.
    pub(crate) fn host_signals(&self) -> &HostSignals {
        match self {
            ConfigCommandContext::Real(config) => &config.host,
            ConfigCommandContext::Placeholder(signals) => signals,
        }
    }
}
