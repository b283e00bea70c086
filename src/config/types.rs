//! Configuration type definitions.

use crate::filter::FilterState;
use crate::loader::MergePolicy;
use crate::model::{FeatureCategory, SpecVersion};
use crate::reports::ReportFormat;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Data directory used when neither the CLI nor a config file names one.
pub const DEFAULT_DATA_DIR: &str = "data";

// ============================================================================
// Unified Application Configuration
// ============================================================================

/// Unified application configuration.
///
/// Every section is optional in the YAML file; missing sections and fields
/// fall back to their defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AppConfig {
    /// Where the support data lives and how partitions are merged
    pub data: DataConfig,
    /// Output settings
    pub output: OutputConfig,
    /// Default filter selections for `grid`
    pub filter: FilterDefaults,
}

/// Support data settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct DataConfig {
    /// Data directory holding `features.json` and `platforms/`
    pub dir: Option<PathBuf>,
    /// What to do when two partitions define the same key
    pub merge_policy: MergePolicy,
}

impl DataConfig {
    /// The configured directory, or [`DEFAULT_DATA_DIR`].
    #[must_use]
    pub fn dir_or_default(&self) -> PathBuf {
        self.dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR))
    }
}

/// Output-related configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct OutputConfig {
    /// Output format
    pub format: ReportFormat,
    /// Output file path (None for stdout)
    pub file: Option<PathBuf>,
    /// Disable colored output
    pub no_color: bool,
}

/// Default filter selections, applied before any CLI filter flags.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct FilterDefaults {
    /// Versions to show, e.g. `[v2, v3]`
    pub versions: Vec<SpecVersion>,
    /// Platform ids to keep
    pub platforms: Vec<String>,
    /// Feature categories to keep
    pub categories: Vec<FeatureCategory>,
}

impl FilterDefaults {
    /// Starting filter state for the grid.
    #[must_use]
    pub fn to_filter_state(&self) -> FilterState {
        FilterState::new()
            .with_versions(self.versions.iter().cloned())
            .with_platforms(self.platforms.iter().cloned())
            .with_categories(self.categories.iter().copied())
    }
}
