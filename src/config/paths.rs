//! Path management for chairside
//!
//! Provides platform-appropriate path resolution for configuration and data.
//!
//! ## Path Resolution Order
//!
//! 1. `CHAIRSIDE_DATA_DIR` environment variable (if set)
//! 2. The platform data directory (e.g. `~/.local/share/chairside` on Linux,
//!    `%APPDATA%\chairside` on Windows)

use std::path::PathBuf;

use directories::ProjectDirs;

use crate::error::ChairsideError;

/// Manages all paths used by chairside
#[derive(Debug, Clone)]
pub struct ChairsidePaths {
    /// Base directory for all chairside data
    base_dir: PathBuf,
}

impl ChairsidePaths {
    /// Create a new ChairsidePaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if no home directory can be determined.
    pub fn new() -> Result<Self, ChairsideError> {
        let base_dir = if let Ok(custom) = std::env::var("CHAIRSIDE_DATA_DIR") {
            PathBuf::from(custom)
        } else {
            ProjectDirs::from("", "", "chairside")
                .ok_or_else(|| {
                    ChairsideError::Config("Could not determine a home directory".into())
                })?
                .data_dir()
                .to_path_buf()
        };

        Ok(Self { base_dir })
    }

    /// Create ChairsidePaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the data directory
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to the audit log
    pub fn audit_log(&self) -> PathBuf {
        self.base_dir.join("audit.log")
    }

    /// Get the path to transactions.json
    pub fn transactions_file(&self) -> PathBuf {
        self.data_dir().join("transactions.json")
    }

    /// Get the path to expenses.json
    pub fn expenses_file(&self) -> PathBuf {
        self.data_dir().join("expenses.json")
    }

    /// Get the path to consultations.json
    pub fn consultations_file(&self) -> PathBuf {
        self.data_dir().join("consultations.json")
    }

    /// Get the path to ledger.json (the cash register)
    pub fn ledger_file(&self) -> PathBuf {
        self.data_dir().join("ledger.json")
    }

    /// Create all required directories
    pub fn ensure_directories(&self) -> Result<(), ChairsideError> {
        std::fs::create_dir_all(self.data_dir()).map_err(|e| {
            ChairsideError::Config(format!(
                "Failed to create data directory {}: {}",
                self.data_dir().display(),
                e
            ))
        })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_with_base_dir() {
        let temp_dir = TempDir::new().unwrap();
        let paths = ChairsidePaths::with_base_dir(temp_dir.path().to_path_buf());

        assert_eq!(paths.base_dir(), temp_dir.path());
        assert_eq!(paths.ledger_file(), temp_dir.path().join("data").join("ledger.json"));
        assert_eq!(paths.audit_log(), temp_dir.path().join("audit.log"));
    }

    #[test]
    fn test_ensure_directories() {
        let temp_dir = TempDir::new().unwrap();
        let paths = ChairsidePaths::with_base_dir(temp_dir.path().join("nested"));

        paths.ensure_directories().unwrap();
        assert!(paths.data_dir().exists());
    }
}
