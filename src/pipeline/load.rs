//! Snapshot loading stage.

use super::PipelineError;
use crate::loader::{load_data_dir_with_stats, MergePolicy, MergeStats};
use crate::model::CompatibilityData;
use std::path::{Path, PathBuf};

/// A loaded snapshot together with where and how it was loaded.
#[derive(Debug, Clone)]
pub struct LoadedSnapshot {
    pub data: CompatibilityData,
    pub stats: MergeStats,
    pub dir: PathBuf,
    pub policy: MergePolicy,
}

impl LoadedSnapshot {
    #[must_use]
    pub const fn data(&self) -> &CompatibilityData {
        &self.data
    }
}

/// Load and aggregate the data directory, logging a summary.
pub fn load_snapshot(
    dir: &Path,
    policy: MergePolicy,
    quiet: bool,
) -> Result<LoadedSnapshot, PipelineError> {
    if !quiet {
        tracing::info!("Loading support data from {}", dir.display());
    }

    let (data, stats) =
        load_data_dir_with_stats(dir, policy).map_err(|source| PipelineError::LoadFailed {
            dir: dir.display().to_string(),
            source,
        })?;

    if !quiet {
        tracing::info!(
            "Loaded {} platforms, {} features, {} entries",
            data.platforms().len(),
            data.features().len(),
            data.entry_count()
        );
    }

    Ok(LoadedSnapshot {
        data,
        stats,
        dir: dir.to_path_buf(),
        policy,
    })
}
