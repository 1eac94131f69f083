//! `[output]` table: how council results are rendered

use council_domain::OutputFormat;
use serde::{Deserialize, Serialize};

/// Rendering preferences for council results
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOutputConfig {
    /// Preferred rendering (full report, verdict only, or JSON); `-o` overrides it
    pub format: Option<OutputFormat>,
    /// Colorize severities and report sections; `--no-color` turns it off
    pub color: bool,
}

impl Default for FileOutputConfig {
    fn default() -> Self {
        Self {
            format: None,
            color: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::file_config::FileConfig;

    #[test]
    fn test_verdict_only_rendering_keeps_color() {
        let config: FileConfig = toml::from_str("[output]\nformat = \"verdict\"\n").unwrap();
        assert_eq!(config.output.format, Some(OutputFormat::Verdict));
        assert!(config.output.color);
    }

    #[test]
    fn test_missing_table_leaves_format_to_cli() {
        let config: FileConfig = toml::from_str("").unwrap();
        assert_eq!(config.output, FileOutputConfig::default());
        assert_eq!(config.output.format, None);
    }
}
