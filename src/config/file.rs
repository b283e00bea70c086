//! Config file discovery and loading.
//!
//! The first recognized file found in [`config_search_paths`] wins; an
//! explicit `--config` path bypasses the search entirely.

use super::types::AppConfig;
use crate::loader::MergePolicy;
use crate::reports::ReportFormat;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Recognized config file names, in order of preference.
pub const CONFIG_FILE_NAMES: &[&str] = &[
    ".iceberg-matrix.yaml",
    ".iceberg-matrix.yml",
    "iceberg-matrix.yaml",
    "iceberg-matrix.yml",
];

// ============================================================================
// Discovery
// ============================================================================

/// Directories searched for a config file, in order, without duplicates.
///
/// Current directory, enclosing git checkout, `~/.config/iceberg-matrix`
/// (platform equivalent), then the home directory.
#[must_use]
pub fn config_search_paths() -> Vec<PathBuf> {
    let cwd = std::env::current_dir().ok();
    let git_root = cwd.as_deref().and_then(enclosing_git_root);
    let candidates = [
        cwd,
        git_root,
        user_config_dir(),
        dirs::home_dir(),
    ];

    let mut paths: Vec<PathBuf> = Vec::with_capacity(candidates.len());
    for dir in candidates.into_iter().flatten() {
        if !paths.contains(&dir) {
            paths.push(dir);
        }
    }
    paths
}

/// Resolve the config file to use.
///
/// An explicit path is returned only if it exists; callers that require it
/// report the missing file themselves.
#[must_use]
pub fn discover_config_file(explicit_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit_path {
        return path.exists().then(|| path.to_path_buf());
    }
    config_search_paths()
        .iter()
        .find_map(|dir| find_config_in_dir(dir))
}

/// `~/.config/iceberg-matrix` (platform equivalent).
#[must_use]
pub fn user_config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("iceberg-matrix"))
}

fn find_config_in_dir(dir: &Path) -> Option<PathBuf> {
    CONFIG_FILE_NAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.is_file())
}

fn enclosing_git_root(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .find(|dir| dir.join(".git").exists())
        .map(Path::to_path_buf)
}

// ============================================================================
// Loading
// ============================================================================

/// Errors reading or writing a config file.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ConfigFileError {
    #[error("Config file not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("{} already exists", path.display())]
    AlreadyExists { path: PathBuf },

    #[error("Failed to access config file {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

/// Load an `AppConfig` from a YAML file. An empty file yields the defaults.
pub fn load_config_file(path: &Path) -> Result<AppConfig, ConfigFileError> {
    if !path.exists() {
        return Err(ConfigFileError::NotFound {
            path: path.to_path_buf(),
        });
    }
    let content = std::fs::read_to_string(path).map_err(|source| ConfigFileError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    if content.trim().is_empty() {
        return Ok(AppConfig::default());
    }
    serde_yaml::from_str(&content).map_err(|source| ConfigFileError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Load the config file, falling back to defaults when none is found.
///
/// An explicit path must exist and parse. A discovered file that fails to
/// parse is logged and ignored.
pub fn load_or_default(
    explicit_path: Option<&Path>,
) -> Result<(AppConfig, Option<PathBuf>), ConfigFileError> {
    if let Some(path) = explicit_path {
        let config = load_config_file(path)?;
        return Ok((config, Some(path.to_path_buf())));
    }
    let Some(path) = discover_config_file(None) else {
        return Ok((AppConfig::default(), None));
    };
    match load_config_file(&path) {
        Ok(config) => Ok((config, Some(path))),
        Err(err) => {
            tracing::warn!("{err}: {}", err_source(&err));
            Ok((AppConfig::default(), None))
        }
    }
}

fn err_source(err: &ConfigFileError) -> String {
    std::error::Error::source(err).map_or_else(String::new, ToString::to_string)
}

// ============================================================================
// Layering
// ============================================================================

impl AppConfig {
    /// Layer `other` over `self`.
    ///
    /// A field of `other` wins only when it differs from its default, so a
    /// flag that was not given never clobbers the file value. Filter lists
    /// are replaced whole, never concatenated.
    pub fn merge(&mut self, other: &Self) {
        if other.data.dir.is_some() {
            self.data.dir.clone_from(&other.data.dir);
        }
        if other.data.merge_policy != MergePolicy::default() {
            self.data.merge_policy = other.data.merge_policy;
        }

        if other.output.format != ReportFormat::Auto {
            self.output.format = other.output.format;
        }
        if other.output.file.is_some() {
            self.output.file.clone_from(&other.output.file);
        }
        self.output.no_color |= other.output.no_color;

        let filter = &other.filter;
        if !filter.versions.is_empty() {
            self.filter.versions.clone_from(&filter.versions);
        }
        if !filter.platforms.is_empty() {
            self.filter.platforms.clone_from(&filter.platforms);
        }
        if !filter.categories.is_empty() {
            self.filter.categories.clone_from(&filter.categories);
        }
    }

    /// Discover and load the config file, then layer `cli_overrides` on top.
    pub fn from_file_with_overrides(
        config_path: Option<&Path>,
        cli_overrides: &Self,
    ) -> Result<(Self, Option<PathBuf>), ConfigFileError> {
        let (mut config, loaded_from) = load_or_default(config_path)?;
        config.merge(cli_overrides);
        Ok((config, loaded_from))
    }
}

// ============================================================================
// Example config
// ============================================================================

/// Commented example config covering every option.
#[must_use]
pub fn generate_example_config() -> String {
    r"# iceberg-matrix configuration
#
# Looked up as .iceberg-matrix.yaml in the current directory, the git
# checkout root, ~/.config/iceberg-matrix/ and the home directory.
# Command-line flags always win over values set here.

data:
  # Directory holding features.json and platforms/*.json
  # dir: ./data
  # Same key in two partitions: strict (fail) or last-write-wins
  merge_policy: strict

output:
  # auto, table, json, csv or markdown
  format: auto
  # file: matrix.md
  no_color: false

# Grid defaults, used when the matching --version/--platform/--category
# flag is absent. An empty list means no restriction.
filter:
  # v3-only features appear only when v3 is listed
  versions: [v2, v3]
  # platforms: [athena, bigquery, spark]
  # categories: [core, deletes, schema, partitioning, time-travel, performance, catalog, types]
"
    .to_string()
}

/// Write the example config to `path`, creating parent directories.
pub fn write_example_config(path: &Path) -> Result<(), ConfigFileError> {
    if path.exists() {
        return Err(ConfigFileError::AlreadyExists {
            path: path.to_path_buf(),
        });
    }
    let io_err = |source| ConfigFileError::Io {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(io_err)?;
    }
    std::fs::write(path, generate_example_config()).map_err(io_err)
}
