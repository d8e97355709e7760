//! Config loading, validation, and CLI overrides.

use super::model::Config;
use crate::error::{FieldcopyError, Result};
use std::path::{Path, PathBuf};

impl Config {
    /// Load config from a YAML file.
    ///
    /// # Returns
    ///
    /// * `Ok(Config)` - Successfully loaded and validated config
    /// * `Err(FieldcopyError::UserError)` - Read, parse or validation failure
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|e| {
            FieldcopyError::UserError(format!(
                "failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        Self::from_yaml(&content)
    }

    /// Parse config from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        // An empty document deserializes as null; treat it as all defaults.
        let config: Config = if yaml.trim().is_empty() {
            Config::default()
        } else {
            serde_yaml::from_str(yaml).map_err(|e| {
                FieldcopyError::UserError(format!("failed to parse config YAML: {}", e))
            })?
        };

        config.validate()?;
        Ok(config)
    }

    /// Serialize config to a YAML string.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(|e| {
            FieldcopyError::UserError(format!("failed to serialize config to YAML: {}", e))
        })
    }

    /// Validate config values.
    ///
    /// Both roots must be non-empty; use `.` for the working directory.
    pub fn validate(&self) -> Result<()> {
        for (name, path) in [
            ("source_path", &self.source_path),
            ("destination_path", &self.destination_path),
        ] {
            if path.as_os_str().is_empty() {
                return Err(FieldcopyError::UserError(format!(
                    "config validation failed: {} must not be empty",
                    name
                )));
            }
        }
        Ok(())
    }

    /// Apply command-line overrides on top of the loaded values.
    pub fn with_overrides(
        mut self,
        source_path: Option<PathBuf>,
        destination_path: Option<PathBuf>,
        dry_run: bool,
    ) -> Result<Self> {
        if let Some(path) = source_path {
            self.source_path = path;
        }
        if let Some(path) = destination_path {
            self.destination_path = path;
        }
        self.dry_run |= dry_run;

        self.validate()?;
        Ok(self)
    }
}
