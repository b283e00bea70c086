//! Output handling for reports.
//!
//! Provides utilities for auto-detecting output format and writing reports.

use crate::reports::{create_reporter_with_options, ReportFormat, ReportGenerator};
use anyhow::{Context, Result};
use std::io::IsTerminal;
use std::path::{Path, PathBuf};

/// Target for output - either stdout or a file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    /// Write to stdout
    Stdout,
    /// Write to a file
    File(PathBuf),
}

impl OutputTarget {
    /// Create output target from optional path
    #[must_use]
    pub fn from_option(path: Option<PathBuf>) -> Self {
        match path {
            Some(p) => Self::File(p),
            None => Self::Stdout,
        }
    }

    /// Check if output is to a terminal
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Stdout) && std::io::stdout().is_terminal()
    }
}

/// Format implied by an output file's extension.
fn format_from_extension(path: &Path) -> Option<ReportFormat> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "json" => Some(ReportFormat::Json),
        "csv" => Some(ReportFormat::Csv),
        "md" | "markdown" => Some(ReportFormat::Markdown),
        "txt" => Some(ReportFormat::Table),
        _ => None,
    }
}

/// Auto-detect the output format based on the output target.
///
/// File targets use their extension (`.json`, `.csv`, `.md`); everything
/// else renders as a table.
#[must_use]
pub fn auto_detect_format(format: ReportFormat, target: &OutputTarget) -> ReportFormat {
    match format {
        ReportFormat::Auto => match target {
            OutputTarget::File(path) => format_from_extension(path).unwrap_or(ReportFormat::Table),
            OutputTarget::Stdout => ReportFormat::Table,
        },
        other => other,
    }
}

/// Determine if color should be used based on flags, environment and target
#[must_use]
pub fn should_use_color(no_color_flag: bool, target: &OutputTarget) -> bool {
    !no_color_flag && std::env::var_os("NO_COLOR").is_none() && target.is_terminal()
}

/// Pick the reporter for a requested format and target.
#[must_use]
pub fn select_reporter(
    format: ReportFormat,
    target: &OutputTarget,
    no_color: bool,
) -> Box<dyn ReportGenerator> {
    let format = auto_detect_format(format, target);
    create_reporter_with_options(format, should_use_color(no_color, target))
}

/// Write output to the target (stdout or file)
pub fn write_output(content: &str, target: &OutputTarget, quiet: bool) -> Result<()> {
    match target {
        OutputTarget::Stdout => {
            print!("{content}");
            Ok(())
        }
        OutputTarget::File(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write output to {}", path.display()))?;
            if !quiet {
                tracing::info!("Report written to {}", path.display());
            }
            Ok(())
        }
    }
}
