//! Configuration for lookups

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Header of the column searched when none is configured
pub const DEFAULT_KEY_COLUMN: &str = "کد ملی";

/// Lookup configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LookupConfig {
    /// Header of the column holding the national IDs
    #[serde(default = "default_key_column")]
    pub key_column: String,
    /// Sheet to read; the workbook's first sheet when unset
    #[serde(default)]
    pub sheet: Option<String>,
}

impl LookupConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: LookupConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// Reject values a lookup could never use
    pub fn validate(&self) -> Result<()> {
        if self.key_column.trim().is_empty() {
            anyhow::bail!("Configuration error: key_column must not be blank");
        }
        if let Some(sheet) = &self.sheet {
            if sheet.trim().is_empty() {
                anyhow::bail!("Configuration error: sheet must not be blank when set");
            }
        }
        Ok(())
    }
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            key_column: default_key_column(),
            sheet: None,
        }
    }
}

fn default_key_column() -> String {
    DEFAULT_KEY_COLUMN.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = LookupConfig::default();
        assert_eq!(config.key_column, "کد ملی");
        assert!(config.sheet.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_full() {
        let config: LookupConfig = toml::from_str(
            r#"
            key_column = "national_id"
            sheet = "people"
            "#,
        )
        .unwrap();
        assert_eq!(config.key_column, "national_id");
        assert_eq!(config.sheet.as_deref(), Some("people"));
    }

    #[test]
    fn test_missing_fields_fall_back() {
        let config: LookupConfig = toml::from_str("").unwrap();
        assert_eq!(config.key_column, DEFAULT_KEY_COLUMN);
        assert!(config.sheet.is_none());
    }

    #[test]
    fn test_validation_rejects_blank_values() {
        let mut config = LookupConfig::default();
        config.key_column = "   ".to_string();
        assert!(config.validate().is_err());

        let mut config = LookupConfig::default();
        config.sheet = Some("".to_string());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "key_column = \"code\"").unwrap();
        let config = LookupConfig::from_file(file.path()).unwrap();
        assert_eq!(config.key_column, "code");
    }

    #[test]
    fn test_from_file_rejects_bad_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "key_column = [").unwrap();
        assert!(LookupConfig::from_file(file.path()).is_err());
    }
}
