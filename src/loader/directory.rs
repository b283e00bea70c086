//! Loading a data directory from disk.
//!
//! Layout:
//!
//! ```text
//! <dir>/features.json          feature catalog and version enumeration
//! <dir>/platforms/<vendor>.json one vendor partition per file
//! ```

use super::{Aggregator, FeatureCatalog, MergePolicy, MergeStats, VendorPartition};
use crate::error::{ErrorContext, LoadErrorKind, MatrixError, Result};
use crate::model::CompatibilityData;
use std::path::{Path, PathBuf};

/// File name of the feature catalog inside a data directory.
pub const CATALOG_FILE: &str = "features.json";

/// Sub-directory holding the vendor partitions.
pub const PLATFORMS_DIR: &str = "platforms";

/// Read and parse one vendor partition. The partition is named after the
/// file stem.
pub fn load_partition_file(path: &Path) -> Result<VendorPartition> {
    let content = std::fs::read_to_string(path).map_err(|e| MatrixError::io(path, e))?;
    let name = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    VendorPartition::from_json_str(name, &content)
}

/// Read and parse the feature catalog.
pub fn load_catalog_file(path: &Path) -> Result<FeatureCatalog> {
    let content = std::fs::read_to_string(path).map_err(|e| MatrixError::io(path, e))?;
    FeatureCatalog::from_json_str(&content).with_context(|| format!("reading {}", path.display()))
}

/// List partition files under `<dir>/platforms`, sorted by file name.
pub fn partition_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let platforms_dir = dir.join(PLATFORMS_DIR);
    let read_dir =
        std::fs::read_dir(&platforms_dir).map_err(|e| MatrixError::io(&platforms_dir, e))?;

    let mut files = Vec::new();
    for entry in read_dir {
        let path = entry.map_err(|e| MatrixError::io(&platforms_dir, e))?.path();
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if path.is_file() && is_json {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Load and aggregate a whole data directory.
pub fn load_data_dir(dir: &Path, policy: MergePolicy) -> Result<CompatibilityData> {
    load_data_dir_with_stats(dir, policy).map(|(data, _)| data)
}

/// Load and aggregate a whole data directory, also returning merge counters.
pub fn load_data_dir_with_stats(
    dir: &Path,
    policy: MergePolicy,
) -> Result<(CompatibilityData, MergeStats)> {
    tracing::debug!(dir = %dir.display(), "loading data directory");

    let catalog = load_catalog_file(&dir.join(CATALOG_FILE))?;
    let files = partition_files(dir)?;
    if files.is_empty() {
        return Err(MatrixError::load(
            format!("data directory {}", dir.display()),
            LoadErrorKind::Empty(format!("no partition files under {PLATFORMS_DIR}/")),
        ));
    }

    let partitions = files
        .iter()
        .map(|path| {
            load_partition_file(path)
                .with_context(|| format!("reading {PLATFORMS_DIR}/{}", file_label(path)))
        })
        .collect::<Result<Vec<_>>>()?;

    Aggregator::new(policy)
        .aggregate_with_stats(catalog, partitions)
        .with_context(|| format!("aggregating {}", dir.display()))
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}
