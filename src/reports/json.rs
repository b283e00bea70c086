//! JSON report generator.

use super::{
    GridReport, LookupReport, ReportError, ReportFormat, ReportGenerator, ValidationReport,
};
use crate::compare::PlatformComparison;
use crate::filter::FilterState;
use crate::model::{Feature, Platform, SpecVersion, SupportEntry};
use crate::verify::VerificationReport;
use chrono::Utc;
use serde::Serialize;

/// JSON report generator
pub struct JsonReporter {
    /// Pretty print output
    pretty: bool,
}

impl JsonReporter {
    /// Create a new JSON reporter
    #[must_use]
    pub const fn new() -> Self {
        Self { pretty: true }
    }

    /// Set pretty printing
    #[must_use]
    pub const fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    fn render<T: Serialize>(&self, kind: &'static str, body: &T) -> Result<String, ReportError> {
        let report = Envelope {
            metadata: ReportMetadata::new(kind),
            body,
        };
        let mut json = if self.pretty {
            serde_json::to_string_pretty(&report)?
        } else {
            serde_json::to_string(&report)?
        };
        json.push('\n');
        Ok(json)
    }
}

impl Default for JsonReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for JsonReporter {
    fn generate_grid_report(&self, grid: &GridReport<'_>) -> Result<String, ReportError> {
        let cells = grid
            .view
            .cells(grid.data)
            .map(|cell| JsonCell {
                platform: &cell.platform.id,
                feature: &cell.feature.id,
                version: cell.version,
                applicable: cell.applicable,
                highlighted: cell.highlighted,
                entry: cell.entry,
            })
            .collect();

        let body = JsonGrid {
            filter: grid.filter,
            empty: grid.view.is_empty(),
            versions: &grid.view.versions,
            platforms: &grid.view.platforms,
            features: &grid.view.features,
            cells,
        };
        self.render("grid", &body)
    }

    fn generate_lookup_report(&self, lookup: &LookupReport) -> Result<String, ReportError> {
        self.render("lookup", lookup)
    }

    fn generate_comparison_report(
        &self,
        comparisons: &[PlatformComparison],
    ) -> Result<String, ReportError> {
        self.render("comparison", &JsonComparisons { comparisons })
    }

    fn generate_validation_report(
        &self,
        report: &ValidationReport,
    ) -> Result<String, ReportError> {
        self.render("validation", report)
    }

    fn generate_verification_report(
        &self,
        report: &VerificationReport,
    ) -> Result<String, ReportError> {
        self.render("verification", report)
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Json
    }
}

// ============================================================================
// JSON structures
// ============================================================================

#[derive(Serialize)]
struct Envelope<'a, T: Serialize> {
    metadata: ReportMetadata,
    #[serde(flatten)]
    body: &'a T,
}

#[derive(Serialize)]
struct ReportMetadata {
    tool: ToolInfo,
    report: &'static str,
    generated_at: String,
}

impl ReportMetadata {
    fn new(report: &'static str) -> Self {
        Self {
            tool: ToolInfo {
                name: env!("CARGO_PKG_NAME"),
                version: env!("CARGO_PKG_VERSION"),
            },
            report,
            generated_at: Utc::now().to_rfc3339(),
        }
    }
}

#[derive(Serialize)]
struct ToolInfo {
    name: &'static str,
    version: &'static str,
}

#[derive(Serialize)]
struct JsonGrid<'a> {
    filter: &'a FilterState,
    empty: bool,
    versions: &'a [&'a SpecVersion],
    platforms: &'a [&'a Platform],
    features: &'a [&'a Feature],
    cells: Vec<JsonCell<'a>>,
}

#[derive(Serialize)]
struct JsonCell<'a> {
    platform: &'a str,
    feature: &'a str,
    version: &'a SpecVersion,
    applicable: bool,
    highlighted: bool,
    #[serde(flatten)]
    entry: &'a SupportEntry,
}

#[derive(Serialize)]
struct JsonComparisons<'a> {
    comparisons: &'a [PlatformComparison],
}
