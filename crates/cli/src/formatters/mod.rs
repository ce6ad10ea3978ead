//! Output formatters for CLI commands.
//!
//! Responsibilities:
//! - Provide table and JSON output for shortcut listings and notation results.
//! - Build the display rows shared by both formats.
//!
//! Does NOT handle:
//! - Direct printing to stdout (returns formatted strings).
//!
//! Invariants:
//! - JSON output of an empty listing is `[]`; the table prints a human message.

use anyhow::Result;
use serde::Serialize;

use mailkeys_config::{KeyNotation, OverrideSet, Shortcut, ShortcutAction};
use mailkeys_keymap::catalog;

mod json;
mod table;

pub use json::JsonFormatter;
pub use table::TableFormatter;

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Table,
}

impl OutputFormat {
    /// Parse from string.
    pub fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "table" => Ok(OutputFormat::Table),
            _ => anyhow::bail!("Invalid output format: {}. Valid options: json, table", s),
        }
    }
}

/// One effective binding as shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BindingRow {
    pub scope: String,
    pub action: String,
    /// Stored tokens, e.g. `["mod", "k"]`
    pub keys: Vec<String>,
    /// Host-specific label, e.g. `⌘+K`
    pub display: String,
    /// Canonical match string, e.g. `meta+k`
    pub combination: String,
    pub prevent_default: bool,
    pub overridden: bool,
    pub description: String,
}

impl BindingRow {
    pub fn new(shortcut: &Shortcut, overridden: bool, notation: &KeyNotation) -> Self {
        let description = shortcut
            .typed_action()
            .or_else(|| ShortcutAction::find(&shortcut.action))
            .map(catalog::describe)
            .unwrap_or_default();
        Self {
            scope: shortcut.scope.clone(),
            action: shortcut.action.clone(),
            keys: shortcut.keys.clone(),
            display: notation.display_string(&shortcut.keys),
            combination: notation.normalize(&shortcut.keys),
            prevent_default: shortcut.prevent_default,
            overridden,
            description: description.to_string(),
        }
    }

    /// Rows for an effective binding list, flagging actions the user overrode.
    pub fn from_effective(
        effective: &[Shortcut],
        overrides: &OverrideSet,
        notation: &KeyNotation,
    ) -> Vec<Self> {
        effective
            .iter()
            .map(|s| Self::new(s, overrides.get(&s.action).is_some(), notation))
            .collect()
    }
}

/// Result of `mailkeys normalize`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NormalizedOutput {
    pub tokens: Vec<String>,
    pub combination: String,
    pub display: Vec<String>,
}

impl NormalizedOutput {
    pub fn new(tokens: Vec<String>, notation: &KeyNotation) -> Self {
        Self {
            combination: notation.normalize(&tokens),
            display: notation.display_form(&tokens),
            tokens,
        }
    }
}

/// Formatter trait for different output types.
pub trait Formatter {
    fn format_bindings(&self, rows: &[BindingRow]) -> Result<String>;

    fn format_binding(&self, row: &BindingRow) -> Result<String>;

    /// `display` selects the host label over the match string in text output.
    fn format_normalized(&self, output: &NormalizedOutput, display: bool) -> Result<String>;
}

/// Get a formatter for the specified format.
pub fn get_formatter(format: OutputFormat) -> Box<dyn Formatter> {
    match format {
        OutputFormat::Json => Box::new(JsonFormatter),
        OutputFormat::Table => Box::new(TableFormatter),
    }
}
