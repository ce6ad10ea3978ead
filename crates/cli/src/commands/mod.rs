//! CLI command implementations.

pub mod list;
pub mod normalize;
pub mod reset;
pub mod set;
pub mod watch;

use anyhow::Result;
use mailkeys_client::{SettingsGateway, ShortcutClient};
use mailkeys_config::{Config, Host, HostSignals, KeyNotation};

pub fn build_client_from_config(config: &Config) -> Result<ShortcutClient> {
    Ok(ShortcutClient::builder().from_config(config).build()?)
}

/// A settings gateway over a freshly built client.
pub fn build_gateway(config: &Config) -> Result<SettingsGateway<ShortcutClient>> {
    let client = build_client_from_config(config)?;
    tracing::info!(
        "Connecting to {} ({} auth)",
        client.base_url(),
        client.auth_kind()
    );
    Ok(SettingsGateway::new(client, config.cache_ttl))
}

pub fn notation_for(signals: &HostSignals) -> KeyNotation {
    let host = Host::from_signals(signals);
    tracing::debug!(platform = %host.platform, layout = %host.layout, "Resolved host");
    KeyNotation::new(host)
}
