//! Normalize command implementation.
//!
//! Runs entirely offline: only the host signals are needed.

use anyhow::Result;

use mailkeys_config::HostSignals;

use crate::formatters::{NormalizedOutput, OutputFormat, get_formatter};

pub fn run(
    signals: &HostSignals,
    tokens: Vec<String>,
    display: bool,
    output_format: &str,
) -> Result<()> {
    let format = OutputFormat::from_str(output_format)?;
    let notation = super::notation_for(signals);

    let output = NormalizedOutput::new(tokens, &notation);
    print!("{}", get_formatter(format).format_normalized(&output, display)?);

    Ok(())
}
