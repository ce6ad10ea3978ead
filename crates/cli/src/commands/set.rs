//! Set command implementation.

use std::fmt;

use anyhow::{Context, Result};
use tracing::info;

use mailkeys_config::{
    Config, KeyNotation, KeybindError, Shortcut, ShortcutAction, parse_combination,
};

use crate::cancellation::{CancellationToken, run_cancellable};
use crate::formatters::{BindingRow, OutputFormat, get_formatter};

/// The named action is not in the catalog.
#[derive(Debug, Clone)]
pub struct UnknownAction(pub String);

impl fmt::Display for UnknownAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let known: Vec<&str> = ShortcutAction::all().map(ShortcutAction::name).collect();
        write!(
            f,
            "Unknown action '{}'. Valid actions: {}",
            self.0,
            known.join(", ")
        )
    }
}

impl std::error::Error for UnknownAction {}

/// Bind `action` to `combination` and persist the override.
pub async fn run(
    config: Config,
    action: &str,
    combination: &str,
    prevent_default: bool,
    output_format: &str,
    cancel: &CancellationToken,
) -> Result<()> {
    let format = OutputFormat::from_str(output_format)?;

    let notation = super::notation_for(&config.host);
    let typed = ShortcutAction::find(action).ok_or_else(|| UnknownAction(action.to_string()))?;
    let keys = stored_tokens(combination, &notation)
        .with_context(|| format!("Invalid key combination for '{}'", typed.name()))?;
    let shortcut = Shortcut::new(typed, &keys).with_prevent_default(prevent_default);

    info!(action = typed.name(), keys = ?shortcut.keys, "Saving shortcut override");

    let gateway = super::build_gateway(&config)?;
    let saved = run_cancellable(cancel, async {
        gateway
            .replace(shortcut.clone())
            .await
            .context("Failed to save shortcut override")
    })
    .await?;

    let row = BindingRow::new(&shortcut, saved.get(&shortcut.action).is_some(), &notation);
    print!("{}", get_formatter(format).format_binding(&row)?);

    Ok(())
}

/// Tokens to store for a combination typed on this host's layout.
///
/// The key is recorded by its standard-layout position.
fn stored_tokens(combination: &str, notation: &KeyNotation) -> Result<Vec<String>, KeybindError> {
    let mut tokens = parse_combination(combination)?.into_tokens();
    if let Some(key) = tokens.last_mut() {
        *key = notation.to_standard_token(key);
    }
    Ok(tokens)
}
