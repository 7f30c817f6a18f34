//! User settings for chairside

use serde::{Deserialize, Serialize};

use super::paths::ChairsidePaths;
use crate::error::ChairsideResult;
use crate::storage::file_io::{read_json, write_json_atomic};

/// Application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Clinic name shown on printed summaries
    #[serde(default)]
    pub clinic_name: String,

    /// Currency symbol
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Date format preference (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "₩".to_string()
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            clinic_name: String::new(),
            currency_symbol: default_currency(),
            date_format: default_date_format(),
        }
    }
}

impl Settings {
    /// Load settings, creating the file with defaults if it doesn't exist
    pub fn load_or_create(paths: &ChairsidePaths) -> ChairsideResult<Self> {
        let path = paths.settings_file();
        let settings: Settings = read_json(&path)?;
        if !path.exists() {
            settings.save(paths)?;
        }
        Ok(settings)
    }

    /// Save settings to disk
    pub fn save(&self, paths: &ChairsidePaths) -> ChairsideResult<()> {
        write_json_atomic(paths.settings_file(), self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.currency_symbol, "₩");
        assert_eq!(settings.schema_version, 1);
    }

    #[test]
    fn test_load_or_create_writes_file() {
        let temp_dir = TempDir::new().unwrap();
        let paths = ChairsidePaths::with_base_dir(temp_dir.path().to_path_buf());

        let settings = Settings::load_or_create(&paths).unwrap();
        assert!(paths.settings_file().exists());
        assert_eq!(settings.currency_symbol, "₩");

        // Second load reads the same file back
        let again = Settings::load_or_create(&paths).unwrap();
        assert_eq!(again.schema_version, settings.schema_version);
    }
}
