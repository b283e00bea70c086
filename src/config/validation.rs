//! Configuration validation.
//!
//! Provides validation traits and implementations for all configuration types.

use super::types::{AppConfig, DataConfig, FilterDefaults, OutputConfig};
use crate::model::validate_id;
use thiserror::Error;

// ============================================================================
// Configuration Error
// ============================================================================

/// A single invalid configuration value.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{field}: {message}")]
pub struct ConfigError {
    /// The field that failed validation
    pub field: String,
    /// Description of the validation error
    pub message: String,
}

impl ConfigError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

// ============================================================================
// Validation Trait
// ============================================================================

/// Trait for validatable configuration types.
pub trait Validatable {
    /// Validate the configuration, returning any errors found.
    fn validate(&self) -> Vec<ConfigError>;

    /// Check if the configuration is valid.
    fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}

// ============================================================================
// Validation Implementations
// ============================================================================

impl Validatable for AppConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        errors.extend(self.data.validate());
        errors.extend(self.output.validate());
        errors.extend(self.filter.validate());
        errors
    }
}

impl Validatable for DataConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        if let Some(ref dir) = self.dir {
            if dir.as_os_str().is_empty() {
                errors.push(ConfigError::new("data.dir", "Data directory must not be empty"));
            } else if dir.exists() && !dir.is_dir() {
                errors.push(ConfigError::new(
                    "data.dir",
                    format!("{} is not a directory", dir.display()),
                ));
            }
        }
        errors
    }
}

impl Validatable for OutputConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if let Some(ref file_path) = self.file {
            if let Some(parent) = file_path.parent() {
                if !parent.as_os_str().is_empty() && !parent.exists() {
                    errors.push(ConfigError::new(
                        "output.file",
                        format!("Parent directory does not exist: {}", parent.display()),
                    ));
                }
            }
        }

        errors
    }
}

impl Validatable for FilterDefaults {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        for version in &self.versions {
            if !version.is_well_formed() {
                errors.push(ConfigError::new(
                    "filter.versions",
                    format!("Invalid version '{version}', expected v<N>"),
                ));
            }
        }

        for platform in &self.platforms {
            if let Err(reason) = validate_id(platform) {
                errors.push(ConfigError::new(
                    "filter.platforms",
                    format!("Invalid platform id '{platform}': {reason}"),
                ));
            }
        }

        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SpecVersion;
    use std::path::PathBuf;

    #[test]
    fn test_default_config_is_valid() {
        assert!(AppConfig::default().is_valid());
    }

    #[test]
    fn test_invalid_filter_defaults() {
        let filter = FilterDefaults {
            versions: vec![SpecVersion::new("three")],
            platforms: vec!["spark:3".to_string()],
            categories: Vec::new(),
        };
        let errors = filter.validate();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].field, "filter.versions");
        assert_eq!(errors[1].field, "filter.platforms");
    }

    #[test]
    fn test_output_file_parent_must_exist() {
        let output = OutputConfig {
            file: Some(PathBuf::from("/definitely/not/here/report.json")),
            ..OutputConfig::default()
        };
        let errors = output.validate();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].to_string().starts_with("output.file: "));
    }

    #[test]
    fn test_data_dir_must_be_directory() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let data = DataConfig {
            dir: Some(file.path().to_path_buf()),
            ..DataConfig::default()
        };
        assert!(!data.is_valid());
    }
}
