//! Table formatter implementation.
//!
//! Responsibilities:
//! - Format binding listings as aligned, scope-grouped tables.
//!
//! Does NOT handle:
//! - Other output formats.

use anyhow::Result;

use crate::formatters::{BindingRow, Formatter, NormalizedOutput};

const DESCRIPTION_WIDTH: usize = 36;

/// Table formatter.
pub struct TableFormatter;

impl Formatter for TableFormatter {
    fn format_bindings(&self, rows: &[BindingRow]) -> Result<String> {
        let mut output = String::new();

        if rows.is_empty() {
            output.push_str("No shortcuts found.\n");
            return Ok(output);
        }

        output.push_str(&format!(
            "{:<12} {:<20} {:<16} {:<16} {}\n",
            "SCOPE", "ACTION", "KEYS", "MATCHES", "DESCRIPTION"
        ));
        output.push_str(&format!(
            "{:<12} {:<20} {:<16} {:<16} {}\n",
            "=====", "======", "====", "=======", "==========="
        ));

        for row in rows {
            let keys = if row.overridden {
                format!("{}*", row.display)
            } else {
                row.display.clone()
            };
            output.push_str(&format!(
                "{:<12} {:<20} {:<16} {:<16} {}\n",
                row.scope,
                row.action,
                keys,
                row.combination,
                truncate(&row.description, DESCRIPTION_WIDTH)
            ));
        }

        if rows.iter().any(|r| r.overridden) {
            output.push_str("\n* overridden\n");
        }

        Ok(output)
    }

    fn format_binding(&self, row: &BindingRow) -> Result<String> {
        Ok(format!(
            "{} ({}) -> {} [{}]{}\n",
            row.action,
            row.scope,
            row.display,
            row.combination,
            if row.prevent_default {
                ", prevents default"
            } else {
                ""
            }
        ))
    }

    fn format_normalized(&self, output: &NormalizedOutput, display: bool) -> Result<String> {
        if display {
            Ok(format!("{}\n", output.display.join("+")))
        } else {
            Ok(format!("{}\n", output.combination))
        }
    }
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() > width {
        let kept: String = text.chars().take(width - 3).collect();
        format!("{kept}...")
    } else {
        text.to_string()
    }
}
