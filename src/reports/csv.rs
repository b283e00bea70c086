//! CSV report generator.
//!
//! One row per grid cell, comparison change or test record, suitable for
//! spreadsheet import and data analysis pipelines.

use super::escape::escape_csv;
use super::{
    GridReport, LookupReport, ReportError, ReportFormat, ReportGenerator, ValidationReport,
};
use crate::compare::PlatformComparison;
use crate::model::SupportEntry;
use crate::verify::VerificationReport;
use std::fmt::Write as _;

/// CSV report generator.
pub struct CsvReporter;

impl CsvReporter {
    pub const fn new() -> Self {
        Self
    }
}

impl Default for CsvReporter {
    fn default() -> Self {
        Self::new()
    }
}

fn entry_columns(entry: &SupportEntry) -> String {
    format!(
        "{},{},{}",
        entry.level,
        escape_csv(&entry.notes),
        escape_csv(&entry.caveats.join("; "))
    )
}

impl ReportGenerator for CsvReporter {
    fn generate_grid_report(&self, grid: &GridReport<'_>) -> Result<String, ReportError> {
        let mut content = String::new();
        content.push_str("Platform,Feature,Category,Version,Applicable,Highlighted,Level,Notes,Caveats\n");

        for cell in grid.view.cells(grid.data) {
            writeln!(
                content,
                "{},{},{},{},{},{},{}",
                escape_csv(&cell.platform.id),
                escape_csv(&cell.feature.id),
                cell.feature.category,
                cell.version,
                cell.applicable,
                cell.highlighted,
                entry_columns(cell.entry)
            )?;
        }

        Ok(content)
    }

    fn generate_lookup_report(&self, lookup: &LookupReport) -> Result<String, ReportError> {
        let mut content = String::new();
        content.push_str("Platform,Feature,Version,Level,Notes,Caveats\n");
        writeln!(
            content,
            "{},{},{},{}",
            escape_csv(&lookup.platform_id),
            escape_csv(&lookup.feature_id),
            lookup.version,
            entry_columns(&lookup.entry)
        )?;
        Ok(content)
    }

    fn generate_comparison_report(
        &self,
        comparisons: &[PlatformComparison],
    ) -> Result<String, ReportError> {
        let mut content = String::new();

        content.push_str("# Counts\n");
        content.push_str("Platform,From,To,Gained,Lost,Changed\n");
        for comparison in comparisons {
            writeln!(
                content,
                "{},{},{},{},{},{}",
                escape_csv(&comparison.platform_id),
                comparison.version_a,
                comparison.version_b,
                comparison.counts.gained,
                comparison.counts.lost,
                comparison.counts.changed
            )?;
        }

        content.push_str("\n# Changes\n");
        content.push_str("Platform,Feature,Kind,From Level,To Level\n");
        for comparison in comparisons {
            for change in &comparison.changes {
                writeln!(
                    content,
                    "{},{},{},{},{}",
                    escape_csv(&comparison.platform_id),
                    escape_csv(&change.feature_id),
                    change.kind,
                    change.from,
                    change.to
                )?;
            }
        }

        Ok(content)
    }

    fn generate_validation_report(
        &self,
        report: &ValidationReport,
    ) -> Result<String, ReportError> {
        let c = &report.completeness;
        let mut content = String::new();

        content.push_str("Metric,Value\n");
        let rows: [(&str, String); 11] = [
            ("partitions", report.stats.partitions.to_string()),
            ("platforms", c.platforms.to_string()),
            ("features", c.features.to_string()),
            ("entries", report.stats.merged_entries.to_string()),
            ("expected", c.expected.to_string()),
            ("present", c.present.to_string()),
            ("missing", c.missing.len().to_string()),
            ("coverage_percent", format!("{:.2}", c.coverage_percent())),
            ("overwritten", report.stats.overwritten.len().to_string()),
            ("orphans", report.stats.orphans.len().to_string()),
            ("fingerprint", c.fingerprint.clone()),
        ];
        for (metric, value) in rows {
            writeln!(content, "{metric},{value}")?;
        }

        if !c.missing.is_empty() {
            content.push_str("\n# Missing\n");
            content.push_str("Platform,Feature,Version\n");
            for key in &c.missing {
                writeln!(
                    content,
                    "{},{},{}",
                    escape_csv(&key.platform),
                    escape_csv(&key.feature),
                    key.version
                )?;
            }
        }

        Ok(content)
    }

    fn generate_verification_report(
        &self,
        report: &VerificationReport,
    ) -> Result<String, ReportError> {
        let mut content = String::new();
        content.push_str("Feature,Feature Name,Version,Result,Matrix Level,Match,Details\n");

        for test in &report.tests {
            let record = &test.record;
            writeln!(
                content,
                "{},{},{},{},{},{},{}",
                escape_csv(&record.feature_id),
                escape_csv(&record.feature_name),
                record.version,
                record.result,
                test.matrix_level,
                test.matches,
                escape_csv(&record.details)
            )?;
        }

        Ok(content)
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Csv
    }
}
