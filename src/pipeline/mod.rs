//! Pipeline orchestration shared by the CLI command handlers.
//!
//! Load → query → render → write. The query step lives in the command
//! handlers; this module owns the stages around it.

mod load;
mod output;

pub use load::{load_snapshot, LoadedSnapshot};
pub use output::{
    auto_detect_format, select_reporter, should_use_color, write_output, OutputTarget,
};

use crate::error::MatrixError;
use crate::reports::ReportError;

/// Structured pipeline error types for better diagnostics.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// The data directory could not be loaded or failed integrity checks
    #[error("Failed to load support data from {dir}: {source}")]
    LoadFailed {
        dir: String,
        #[source]
        source: MatrixError,
    },

    /// Report generation failed
    #[error("Report failed: {source}")]
    ReportFailed {
        #[from]
        source: ReportError,
    },
}

/// Exit codes for CI/CD integration
pub mod exit_codes {
    /// Success
    pub const SUCCESS: i32 = 0;
    /// Discrepancies, missing cells or an empty result
    pub const FINDINGS: i32 = 1;
    /// An error occurred
    pub const ERROR: i32 = 3;
}
