//! Report generation.
//!
//! Every command result can be rendered in four formats:
//! - Table: aligned terminal output with support-level symbols
//! - JSON: structured data for programmatic integration
//! - CSV: one row per cell or record, for spreadsheets
//! - Markdown: tables for documentation and CI summaries
//!
//! The `escape` module holds the helpers used to embed free-text notes
//! and caveats safely.

mod csv;
pub mod escape;
mod json;
mod markdown;
mod table;
mod types;

pub use csv::CsvReporter;
pub use json::JsonReporter;
pub use markdown::MarkdownReporter;
pub use table::TableReporter;
pub use types::{GridReport, LookupReport, ReportFormat, ValidationReport};

use crate::compare::PlatformComparison;
use crate::verify::VerificationReport;
use thiserror::Error;

/// Message printed instead of an empty grid.
pub const EMPTY_GRID_MESSAGE: &str = "No data for current filters.";

/// Errors that can occur during report generation
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Format error: {0}")]
    FormatError(#[from] std::fmt::Error),
}

impl From<serde_json::Error> for ReportError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError(err.to_string())
    }
}

/// Trait for report generators
pub trait ReportGenerator {
    /// Render the filtered support grid
    fn generate_grid_report(&self, grid: &GridReport<'_>) -> Result<String, ReportError>;

    /// Render a single looked-up cell
    fn generate_lookup_report(&self, lookup: &LookupReport) -> Result<String, ReportError>;

    /// Render version comparisons, one per platform
    fn generate_comparison_report(
        &self,
        comparisons: &[PlatformComparison],
    ) -> Result<String, ReportError>;

    /// Render merge statistics and completeness
    fn generate_validation_report(&self, report: &ValidationReport)
        -> Result<String, ReportError>;

    /// Render a reconciled test run
    fn generate_verification_report(
        &self,
        report: &VerificationReport,
    ) -> Result<String, ReportError>;

    /// Get the format this generator produces
    fn format(&self) -> ReportFormat;
}

/// Create a report generator for the given format
#[must_use]
pub fn create_reporter(format: ReportFormat) -> Box<dyn ReportGenerator> {
    create_reporter_with_options(format, true)
}

/// Create a report generator with color control.
///
/// `Auto` must be resolved by the caller; it falls back to the table.
#[must_use]
pub fn create_reporter_with_options(
    format: ReportFormat,
    use_color: bool,
) -> Box<dyn ReportGenerator> {
    match format {
        ReportFormat::Auto | ReportFormat::Table => {
            if use_color {
                Box::new(TableReporter::new())
            } else {
                Box::new(TableReporter::new().no_color())
            }
        }
        ReportFormat::Json => Box::new(JsonReporter::new()),
        ReportFormat::Csv => Box::new(CsvReporter::new()),
        ReportFormat::Markdown => Box::new(MarkdownReporter::new()),
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    //! Small snapshot shared by the reporter tests.

    use crate::model::{
        CompatibilityData, Feature, FeatureCategory, Platform, PlatformCategory, PlatformGroup,
        SpecVersion, SupportEntry, SupportKey, SupportLevel,
    };
    use indexmap::IndexMap;

    pub fn snapshot() -> CompatibilityData {
        let mut support = IndexMap::new();
        support.insert(
            SupportKey::new("athena", "time-travel", SpecVersion::v2()),
            SupportEntry::with_level(SupportLevel::Full).notes("FOR TIMESTAMP AS OF"),
        );
        support.insert(
            SupportKey::new("athena", "time-travel", SpecVersion::v3()),
            SupportEntry::with_level(SupportLevel::Partial).caveat("No branch | tag refs"),
        );
        support.insert(
            SupportKey::new("spark", "time-travel", SpecVersion::v2()),
            SupportEntry::with_level(SupportLevel::Full),
        );
        support.insert(
            SupportKey::new("spark", "variant-type", SpecVersion::v3()),
            SupportEntry::with_level(SupportLevel::None),
        );
        CompatibilityData::new(
            vec![
                Platform::new("athena", "Amazon Athena", "AWS", PlatformCategory::Cloud, PlatformGroup::Aws),
                Platform::new(
                    "spark",
                    "Apache Spark",
                    "Apache",
                    PlatformCategory::OpenSource,
                    PlatformGroup::ThirdParty,
                ),
            ],
            vec![
                Feature::new("time-travel", "Time Travel", FeatureCategory::TimeTravel, SpecVersion::v2()),
                Feature::new("variant-type", "Variant Type", FeatureCategory::Types, SpecVersion::v3()),
            ],
            vec![SpecVersion::v2(), SpecVersion::v3()],
            support,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_reporter_formats() {
        for format in [
            ReportFormat::Table,
            ReportFormat::Json,
            ReportFormat::Csv,
            ReportFormat::Markdown,
        ] {
            assert_eq!(create_reporter(format).format(), format);
        }
        assert_eq!(create_reporter(ReportFormat::Auto).format(), ReportFormat::Table);
    }
}
