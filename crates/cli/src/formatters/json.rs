//! JSON formatter implementation.

use anyhow::Result;

use crate::formatters::{BindingRow, Formatter, NormalizedOutput};

/// JSON formatter.
pub struct JsonFormatter;

impl Formatter for JsonFormatter {
    fn format_bindings(&self, rows: &[BindingRow]) -> Result<String> {
        Ok(format!("{}\n", serde_json::to_string_pretty(rows)?))
    }

    fn format_binding(&self, row: &BindingRow) -> Result<String> {
        Ok(format!("{}\n", serde_json::to_string_pretty(row)?))
    }

    fn format_normalized(&self, output: &NormalizedOutput, _display: bool) -> Result<String> {
        Ok(format!("{}\n", serde_json::to_string_pretty(output)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_bindings_is_empty_array() {
        let output = JsonFormatter.format_bindings(&[]).unwrap();
        assert_eq!(output.trim(), "[]");
    }

    #[test]
    fn test_normalized_fields() {
        let output = NormalizedOutput {
            tokens: vec!["#".to_string()],
            combination: "shift+3".to_string(),
            display: vec!["#".to_string()],
        };
        let json: serde_json::Value =
            serde_json::from_str(&JsonFormatter.format_normalized(&output, true).unwrap()).unwrap();
        assert_eq!(json["combination"], "shift+3");
        assert_eq!(json["tokens"][0], "#");
    }
}
