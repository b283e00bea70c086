//! Configuration for iceberg-matrix.
//!
//! This module provides:
//! - Type-safe configuration structures
//! - Validation for all configuration values
//! - YAML config file loading and discovery
//! - CLI argument merging
//!
//! # Configuration File
//!
//! Place a `.iceberg-matrix.yaml` file in your project root or
//! `~/.config/iceberg-matrix/`:
//!
//! ```yaml
//! data:
//!   dir: ./data
//!   merge_policy: strict
//! output:
//!   format: markdown
//! filter:
//!   versions: [v2, v3]
//! ```

pub mod file;
mod types;
mod validation;

pub use types::{AppConfig, DataConfig, FilterDefaults, OutputConfig, DEFAULT_DATA_DIR};
pub use validation::{ConfigError, Validatable};

pub use file::{
    config_search_paths, discover_config_file, generate_example_config, load_config_file,
    load_or_default, user_config_dir, write_example_config, ConfigFileError, CONFIG_FILE_NAMES,
};

/// Generate a JSON Schema for the `AppConfig` configuration format.
///
/// The schema documents every option of `.iceberg-matrix.yaml` and can be
/// used by editors for validation and autocompletion.
pub fn generate_json_schema() -> Result<String, serde_json::Error> {
    let schema = schemars::schema_for!(AppConfig);
    serde_json::to_string_pretty(&schema)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_mentions_sections() {
        let schema = generate_json_schema().unwrap();
        let value: serde_json::Value = serde_json::from_str(&schema).unwrap();
        let properties = &value["properties"];
        assert!(properties.get("data").is_some());
        assert!(properties.get("output").is_some());
        assert!(properties.get("filter").is_some());
    }
}
