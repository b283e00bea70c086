//! Markdown report generator.

use super::escape::{escape_markdown_list, escape_markdown_table, truncate};
use super::{
    GridReport, LookupReport, ReportError, ReportFormat, ReportGenerator, ValidationReport,
    EMPTY_GRID_MESSAGE,
};
use crate::compare::PlatformComparison;
use crate::verify::VerificationReport;
use std::fmt::Write as _;

/// Markdown report generator
pub struct MarkdownReporter {
    /// Maximum characters of test details shown in tables
    details_width: usize,
}

impl MarkdownReporter {
    /// Create a new Markdown reporter
    #[must_use]
    pub const fn new() -> Self {
        Self { details_width: 80 }
    }
}

impl Default for MarkdownReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for MarkdownReporter {
    fn generate_grid_report(&self, grid: &GridReport<'_>) -> Result<String, ReportError> {
        let view = grid.view;
        let mut md = String::new();

        writeln!(md, "# Support Matrix")?;
        writeln!(md)?;
        writeln!(md, "_Filters: {}_", escape_markdown_list(&grid.filter.description()))?;
        writeln!(md)?;

        if view.is_empty() {
            writeln!(md, "{EMPTY_GRID_MESSAGE}")?;
            return Ok(md);
        }

        // Header: one column per platform and version.
        md.push_str("| Feature | Category |");
        for platform in &view.platforms {
            for version in &view.versions {
                write!(md, " {} {} |", escape_markdown_table(&platform.name), version)?;
            }
        }
        md.push('\n');
        md.push_str("|---------|----------|");
        for _ in 0..view.platforms.len() * view.versions.len() {
            md.push_str("---|");
        }
        md.push('\n');

        let cells: Vec<_> = view.cells(grid.data).collect();
        let per_platform = view.features.len() * view.versions.len();

        for (fi, feature) in view.features.iter().enumerate() {
            write!(
                md,
                "| {} | {} |",
                escape_markdown_table(&feature.name),
                feature.category
            )?;
            for pi in 0..view.platforms.len() {
                let start = pi * per_platform + fi * view.versions.len();
                for cell in &cells[start..start + view.versions.len()] {
                    let text = if cell.applicable {
                        cell.entry.level.as_str()
                    } else {
                        "n/a"
                    };
                    if cell.highlighted {
                        write!(md, " **{text}** |")?;
                    } else {
                        write!(md, " {text} |")?;
                    }
                }
            }
            md.push('\n');
        }

        Ok(md)
    }

    fn generate_lookup_report(&self, lookup: &LookupReport) -> Result<String, ReportError> {
        let mut md = String::new();
        let platform = lookup.platform_name.as_deref().unwrap_or(&lookup.platform_id);
        let feature = lookup.feature_name.as_deref().unwrap_or(&lookup.feature_id);

        writeln!(
            md,
            "## {} / {} / {}",
            escape_markdown_list(platform),
            escape_markdown_list(feature),
            lookup.version
        )?;
        writeln!(md)?;
        writeln!(md, "- **Level:** {}", lookup.entry.level)?;
        if !lookup.entry.notes.is_empty() {
            writeln!(md, "- **Notes:** {}", escape_markdown_list(&lookup.entry.notes))?;
        }
        for caveat in &lookup.entry.caveats {
            writeln!(md, "- **Caveat:** {}", escape_markdown_list(caveat))?;
        }
        if let Some(links) = &lookup.entry.links {
            for link in links {
                writeln!(md, "- [{}]({})", escape_markdown_list(&link.label), link.url)?;
            }
        }

        Ok(md)
    }

    fn generate_comparison_report(
        &self,
        comparisons: &[PlatformComparison],
    ) -> Result<String, ReportError> {
        let mut md = String::new();

        match comparisons.first() {
            Some(first) => writeln!(
                md,
                "# Version Comparison: {} -> {}",
                first.version_a, first.version_b
            )?,
            None => writeln!(md, "# Version Comparison")?,
        }
        writeln!(md)?;
        writeln!(md, "| Platform | Gained | Lost | Changed |")?;
        writeln!(md, "|----------|--------|------|---------|")?;
        for comparison in comparisons {
            writeln!(
                md,
                "| {} | {} | {} | {} |",
                escape_markdown_table(&comparison.platform_name),
                comparison.counts.gained,
                comparison.counts.lost,
                comparison.counts.changed
            )?;
        }

        for comparison in comparisons.iter().filter(|c| !c.changes.is_empty()) {
            writeln!(md)?;
            writeln!(md, "## {}", escape_markdown_list(&comparison.platform_name))?;
            writeln!(md)?;
            for change in &comparison.changes {
                writeln!(
                    md,
                    "- **{}** ({}): {} -> {}",
                    escape_markdown_list(&change.feature_name),
                    change.kind,
                    change.from,
                    change.to
                )?;
            }
        }

        Ok(md)
    }

    fn generate_validation_report(
        &self,
        report: &ValidationReport,
    ) -> Result<String, ReportError> {
        let c = &report.completeness;
        let mut md = String::new();

        writeln!(md, "# Support Data Validation")?;
        writeln!(md)?;
        writeln!(md, "| Metric | Value |")?;
        writeln!(md, "|--------|-------|")?;
        writeln!(md, "| Partitions | {} |", report.stats.partitions)?;
        writeln!(md, "| Platforms | {} |", c.platforms)?;
        writeln!(md, "| Features | {} |", c.features)?;
        writeln!(md, "| Versions | {} |", c.versions)?;
        writeln!(md, "| Entries | {} |", report.stats.merged_entries)?;
        writeln!(md, "| Merge policy | {} |", report.policy)?;
        writeln!(md, "| Expected cells | {} |", c.expected)?;
        writeln!(md, "| Present | {} |", c.present)?;
        writeln!(md, "| Coverage | {:.1}% |", c.coverage_percent())?;
        writeln!(md, "| Fingerprint | `{}` |", c.fingerprint)?;

        if !c.missing.is_empty() {
            writeln!(md)?;
            writeln!(md, "## Missing Entries")?;
            writeln!(md)?;
            for key in &c.missing {
                writeln!(md, "- `{key}`")?;
            }
        }

        Ok(md)
    }

    fn generate_verification_report(
        &self,
        report: &VerificationReport,
    ) -> Result<String, ReportError> {
        let mut md = String::new();
        let engine = report.engine.as_deref().unwrap_or("Engine");

        writeln!(md, "# {} Feature Test Report", escape_markdown_list(engine))?;
        writeln!(md)?;
        writeln!(md, "- **Platform:** {}", report.platform_id)?;
        if let Some(ts) = &report.run_timestamp {
            writeln!(md, "- **Timestamp:** {}", escape_markdown_list(ts))?;
        }
        writeln!(md, "- **Verified:** {}", report.verified_at.to_rfc3339())?;
        writeln!(md)?;

        let s = &report.summary;
        writeln!(md, "## Summary")?;
        writeln!(md)?;
        writeln!(md, "| Metric | Count |")?;
        writeln!(md, "|--------|-------|")?;
        writeln!(md, "| Total | {} |", s.total)?;
        writeln!(md, "| Passed | {} |", s.passed)?;
        writeln!(md, "| Failed | {} |", s.failed)?;
        writeln!(md, "| Skipped | {} |", s.skipped)?;
        writeln!(md, "| Errors | {} |", s.errors)?;
        writeln!(md, "| Discrepancies | {} |", s.discrepancies)?;
        writeln!(md)?;

        writeln!(md, "## Test Results")?;
        writeln!(md)?;
        writeln!(md, "| Feature | Version | Result | JSON Level | Match | Details |")?;
        writeln!(md, "|---------|---------|--------|------------|-------|---------|")?;
        for test in &report.tests {
            let record = &test.record;
            writeln!(
                md,
                "| {} | {} | {} | {} | {} | {} |",
                escape_markdown_table(&record.feature_name),
                record.version,
                record.result,
                test.matrix_level,
                if test.matches { "yes" } else { "DISCREPANCY" },
                escape_markdown_table(&truncate(&record.details, self.details_width))
            )?;
        }

        let discrepancies: Vec<_> = report.discrepancies().collect();
        if !discrepancies.is_empty() {
            writeln!(md)?;
            writeln!(md, "## Discrepancies")?;
            writeln!(md)?;
            for test in discrepancies {
                let record = &test.record;
                writeln!(
                    md,
                    "- **{}** ({}): test={}, json={}: {}",
                    escape_markdown_list(&record.feature_name),
                    record.version,
                    record.result,
                    test.matrix_level,
                    escape_markdown_list(&truncate(&record.details, 120))
                )?;
            }
        }

        Ok(md)
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Markdown
    }
}
