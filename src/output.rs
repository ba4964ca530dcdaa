//! Output formatting for command results.
//!
//! Supports multiple output formats: table (human-readable), JSON, and toon.

use clap::ValueEnum;
use serde::Serialize;

use crate::db::Params;

/// Output format for command results
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table format
    #[default]
    Table,
    /// JSON format
    Json,
    /// Token-efficient toon format
    Toon,
}

/// Trait for types that can be formatted for output
pub trait Outputable: Serialize {
    /// Format as a human-readable table
    fn to_table(&self) -> String;

    /// Format according to the specified output format
    fn format(&self, format: OutputFormat) -> String {
        match format {
            OutputFormat::Table => self.to_table(),
            OutputFormat::Json => serde_json::to_string_pretty(self).unwrap_or_default(),
            OutputFormat::Toon => {
                let json_value = serde_json::to_value(self).unwrap_or_default();
                toon::encode(&json_value, None)
            }
        }
    }
}

/// Table lines for a parameter map, one `name = value` per parameter.
pub fn format_params(params: &Params) -> Vec<String> {
    if params.is_empty() {
        return vec!["Parameters: none".to_string()];
    }
    let mut lines = vec![format!("Parameters ({}):", params.len())];
    lines.extend(
        params
            .iter()
            .map(|(name, value)| format!("  {} = {} ({})", name, value, value.type_name())),
    );
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Value;
    use rstest::rstest;

    #[rstest]
    fn test_format_params() {
        let mut params = Params::new();
        params.insert("p_0".to_string(), Value::Int(18));
        params.insert("p_1".to_string(), Value::from("Jo%"));
        assert_eq!(
            format_params(&params),
            vec!["Parameters (2):", "  p_0 = 18 (int)", "  p_1 = Jo% (string)"]
        );
    }

    #[rstest]
    fn test_format_no_params() {
        assert_eq!(format_params(&Params::new()), vec!["Parameters: none"]);
    }
}
