//! List command implementation.

use anyhow::{Context, Result};
use tracing::{info, warn};

use mailkeys_config::validate::find_conflicts;
use mailkeys_config::{Config, HostSignals, OverrideSet, Scope};
use mailkeys_keymap::{catalog, filter_by_scope, resolve};

use crate::cancellation::{CancellationToken, run_cancellable};
use crate::formatters::{BindingRow, OutputFormat, get_formatter};

/// List effective bindings: the catalog with the user's overrides applied.
pub async fn run(
    config: Config,
    scope: Option<Scope>,
    output_format: &str,
    cancel: &CancellationToken,
) -> Result<()> {
    let format = OutputFormat::from_str(output_format)?;
    info!("Fetching shortcut overrides...");

    let gateway = super::build_gateway(&config)?;
    let overrides = run_cancellable(cancel, async {
        gateway
            .fetch()
            .await
            .context("Failed to load shortcut overrides")
    })
    .await?;

    let notation = super::notation_for(&config.host);
    print_rows(format, scope, &overrides, &notation)
}

/// List compiled-in defaults without contacting the server.
pub fn run_defaults(
    signals: &HostSignals,
    scope: Option<Scope>,
    output_format: &str,
) -> Result<()> {
    let format = OutputFormat::from_str(output_format)?;
    let notation = super::notation_for(signals);
    print_rows(format, scope, &OverrideSet::default(), &notation)
}

fn print_rows(
    format: OutputFormat,
    scope: Option<Scope>,
    overrides: &OverrideSet,
    notation: &mailkeys_config::KeyNotation,
) -> Result<()> {
    let mut effective = resolve(catalog::defaults(), overrides);
    if let Some(scope) = scope {
        effective = filter_by_scope(&effective, scope);
    }

    for conflict in find_conflicts(&effective, notation) {
        warn!(
            scope = %conflict.scope,
            combination = %conflict.combination,
            actions = ?conflict.actions,
            "Several actions share one combination; only the first fires"
        );
    }

    let rows = BindingRow::from_effective(&effective, overrides, notation);
    let formatter = get_formatter(format);
    print!("{}", formatter.format_bindings(&rows)?);

    Ok(())
}
