//! Aligned terminal output.

use super::escape::truncate;
use super::{
    GridReport, LookupReport, ReportError, ReportFormat, ReportGenerator, ValidationReport,
    EMPTY_GRID_MESSAGE,
};
use crate::compare::{ChangeKind, PlatformComparison};
use crate::model::SupportLevel;
use crate::verify::VerificationReport;
use unicode_width::UnicodeWidthStr;

/// Marker for cells whose feature did not exist yet at that version.
const NOT_APPLICABLE: &str = "·";

/// Number of missing keys listed before summarizing the rest.
const MAX_MISSING_LISTED: usize = 20;

fn ansi_color(text: &str, color: &str, colored: bool) -> String {
    if colored {
        match color {
            "red" => format!("\x1b[31m{text}\x1b[0m"),
            "green" => format!("\x1b[32m{text}\x1b[0m"),
            "yellow" => format!("\x1b[33m{text}\x1b[0m"),
            "cyan" => format!("\x1b[36m{text}\x1b[0m"),
            "bold" => format!("\x1b[1m{text}\x1b[0m"),
            "dim" => format!("\x1b[2m{text}\x1b[0m"),
            _ => text.to_string(),
        }
    } else {
        text.to_string()
    }
}

const fn level_color(level: SupportLevel) -> &'static str {
    match level {
        SupportLevel::Full => "green",
        SupportLevel::Partial => "yellow",
        SupportLevel::None => "red",
        SupportLevel::Unknown => "dim",
    }
}

/// Left-align `colored` in a column of `width` terminal cells, where
/// `plain` is the same text without escape codes.
fn pad(plain: &str, colored: &str, width: usize) -> String {
    let visible = UnicodeWidthStr::width(plain);
    format!("{colored}{}", " ".repeat(width.saturating_sub(visible)))
}

/// Table reporter for terminal output
pub struct TableReporter {
    /// Use colored output
    colored: bool,
}

impl TableReporter {
    /// Create a new table reporter
    #[must_use]
    pub const fn new() -> Self {
        Self { colored: true }
    }

    /// Disable colored output
    #[must_use]
    pub const fn no_color(mut self) -> Self {
        self.colored = false;
        self
    }

    fn color(&self, text: &str, color: &str) -> String {
        ansi_color(text, color, self.colored)
    }

    fn level(&self, level: SupportLevel) -> String {
        self.color(&format!("{} {level}", level.symbol()), level_color(level))
    }
}

impl Default for TableReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for TableReporter {
    fn generate_grid_report(&self, grid: &GridReport<'_>) -> Result<String, ReportError> {
        let view = grid.view;
        let mut lines = Vec::new();

        if view.is_empty() {
            lines.push(EMPTY_GRID_MESSAGE.to_string());
            lines.push(format!("Filters: {}", grid.filter.description()));
            return Ok(lines.join("\n") + "\n");
        }

        let versions: Vec<&str> = view.versions.iter().map(|v| v.as_str()).collect();
        // Each version occupies a symbol plus a highlight marker, space separated.
        let slot_width = (versions.len() * 3).saturating_sub(1);

        let name_width = view
            .features
            .iter()
            .map(|f| UnicodeWidthStr::width(f.name.as_str()).min(32))
            .max()
            .unwrap_or(0)
            .max("FEATURE".len());
        let category_width = view
            .features
            .iter()
            .map(|f| f.category.as_str().len())
            .max()
            .unwrap_or(0)
            .max("CATEGORY".len());
        let platform_widths: Vec<usize> = view
            .platforms
            .iter()
            .map(|p| UnicodeWidthStr::width(p.id.as_str()).max(slot_width))
            .collect();

        let mut header = format!(
            "{} {}",
            pad("FEATURE", &self.color("FEATURE", "bold"), name_width),
            pad("CATEGORY", &self.color("CATEGORY", "bold"), category_width),
        );
        for (platform, width) in view.platforms.iter().zip(&platform_widths) {
            header.push(' ');
            header.push_str(&pad(&platform.id, &self.color(&platform.id, "bold"), *width));
        }
        lines.push(header.trim_end().to_string());

        let mut sub_header = format!("{:name_width$} {:category_width$}", "", "");
        for width in &platform_widths {
            let label = versions.join(" ");
            sub_header.push(' ');
            sub_header.push_str(&pad(&label, &self.color(&label, "dim"), *width));
        }
        lines.push(sub_header.trim_end().to_string());

        let total_width = name_width
            + category_width
            + platform_widths.iter().map(|w| w + 1).sum::<usize>()
            + 1;
        lines.push("─".repeat(total_width));

        let cells: Vec<_> = grid.view.cells(grid.data).collect();
        let per_platform = view.features.len() * view.versions.len();

        for (fi, feature) in view.features.iter().enumerate() {
            let name = truncate(&feature.name, 32);
            let mut row = format!(
                "{} {}",
                pad(&name, &name, name_width),
                pad(
                    feature.category.as_str(),
                    &self.color(feature.category.as_str(), "cyan"),
                    category_width
                ),
            );

            for (pi, width) in platform_widths.iter().enumerate() {
                let start = pi * per_platform + fi * view.versions.len();
                let mut plain = Vec::new();
                let mut colored = Vec::new();
                for cell in &cells[start..start + view.versions.len()] {
                    let (symbol, color) = if cell.applicable {
                        (cell.entry.level.symbol(), level_color(cell.entry.level))
                    } else {
                        (NOT_APPLICABLE, "dim")
                    };
                    let marker = if cell.highlighted { "*" } else { " " };
                    plain.push(format!("{symbol}{marker}"));
                    let symbol = if cell.highlighted {
                        self.color(symbol, "bold")
                    } else {
                        self.color(symbol, color)
                    };
                    colored.push(format!("{symbol}{marker}"));
                }
                row.push(' ');
                row.push_str(&pad(&plain.join(" "), &colored.join(" "), *width));
            }
            lines.push(row.trim_end().to_string());
        }

        lines.push(String::new());
        let mut legend = format!(
            "{} full  {} partial  {} none  {} unknown  {NOT_APPLICABLE} not applicable",
            SupportLevel::Full.symbol(),
            SupportLevel::Partial.symbol(),
            SupportLevel::None.symbol(),
            SupportLevel::Unknown.symbol(),
        );
        if !grid.filter.selected_support_levels.is_empty() {
            legend.push_str("  * highlighted");
        }
        lines.push(self.color(&legend, "dim"));
        lines.push(format!(
            "{} platforms, {} features, {} versions ({})",
            view.platforms.len(),
            view.features.len(),
            view.versions.len(),
            grid.filter.description()
        ));

        Ok(lines.join("\n") + "\n")
    }

    fn generate_lookup_report(&self, lookup: &LookupReport) -> Result<String, ReportError> {
        let mut lines = Vec::new();

        let platform = lookup.platform_name.as_ref().map_or_else(
            || format!("{} (not in matrix)", lookup.platform_id),
            |name| format!("{name} ({})", lookup.platform_id),
        );
        let feature = lookup.feature_name.as_ref().map_or_else(
            || format!("{} (not in catalog)", lookup.feature_id),
            |name| format!("{name} ({})", lookup.feature_id),
        );
        lines.push(self.color(
            &format!("{platform} / {feature} / {}", lookup.version),
            "bold",
        ));
        lines.push(format!("  Level:   {}", self.level(lookup.entry.level)));
        if lookup.applicable == Some(false) {
            lines.push(self.color(
                &format!("  Feature does not exist at {}", lookup.version),
                "dim",
            ));
        }
        if !lookup.entry.notes.is_empty() {
            lines.push(format!("  Notes:   {}", lookup.entry.notes));
        }
        if !lookup.entry.caveats.is_empty() {
            lines.push("  Caveats:".to_string());
            for caveat in &lookup.entry.caveats {
                lines.push(format!("    - {caveat}"));
            }
        }
        if let Some(links) = &lookup.entry.links {
            lines.push("  Links:".to_string());
            for link in links {
                lines.push(format!("    - {}: {}", link.label, link.url));
            }
        }

        Ok(lines.join("\n") + "\n")
    }

    fn generate_comparison_report(
        &self,
        comparisons: &[PlatformComparison],
    ) -> Result<String, ReportError> {
        let mut lines = Vec::new();

        if let Some(first) = comparisons.first() {
            lines.push(self.color(
                &format!("Comparing {} -> {}", first.version_a, first.version_b),
                "bold",
            ));
            lines.push(String::new());
        }

        lines.push(format!(
            "{:<24} {:>7} {:>7} {:>8}",
            "PLATFORM", "GAINED", "LOST", "CHANGED"
        ));
        lines.push("─".repeat(49));

        for comparison in comparisons {
            let counts = comparison.counts;
            lines.push(format!(
                "{:<24} {:>7} {:>7} {:>8}",
                truncate(&comparison.platform_id, 24),
                counts.gained,
                counts.lost,
                counts.changed
            ));
            for change in &comparison.changes {
                let (mark, color) = match change.kind {
                    ChangeKind::Gained => ("+", "green"),
                    ChangeKind::Lost => ("-", "red"),
                    ChangeKind::Changed | ChangeKind::Unchanged => ("~", "yellow"),
                };
                lines.push(format!(
                    "  {} {:<32} {} -> {}",
                    self.color(mark, color),
                    truncate(&change.feature_name, 32),
                    change.from,
                    change.to
                ));
            }
        }

        Ok(lines.join("\n") + "\n")
    }

    fn generate_validation_report(
        &self,
        report: &ValidationReport,
    ) -> Result<String, ReportError> {
        let stats = &report.stats;
        let completeness = &report.completeness;
        let mut lines = Vec::new();

        lines.push(self.color("Data set", "bold"));
        lines.push(format!("  Partitions:     {}", stats.partitions));
        lines.push(format!("  Platforms:      {}", completeness.platforms));
        lines.push(format!("  Features:       {}", completeness.features));
        lines.push(format!("  Versions:       {}", completeness.versions));
        lines.push(format!("  Entries:        {}", stats.merged_entries));
        lines.push(format!(
            "  Merge policy:   {} ({} overwritten, {} orphaned)",
            report.policy,
            stats.overwritten.len(),
            stats.orphans.len()
        ));
        lines.push(String::new());

        lines.push(self.color("Completeness", "bold"));
        lines.push(format!("  Expected cells: {}", completeness.expected));
        lines.push(format!("  Present:        {}", completeness.present));
        let coverage = format!("{:.1}%", completeness.coverage_percent());
        let coverage_color = if completeness.is_complete() { "green" } else { "yellow" };
        lines.push(format!("  Coverage:       {}", self.color(&coverage, coverage_color)));
        lines.push(format!(
            "  Levels:         {} full, {} partial, {} none, {} unknown",
            completeness.levels.full,
            completeness.levels.partial,
            completeness.levels.none,
            completeness.levels.unknown
        ));
        if completeness.not_applicable > 0 {
            lines.push(format!(
                "  Not applicable: {} entries predate their feature",
                completeness.not_applicable
            ));
        }

        if !completeness.missing.is_empty() {
            lines.push(format!("  Missing ({}):", completeness.missing.len()));
            for key in completeness.missing.iter().take(MAX_MISSING_LISTED) {
                lines.push(format!("    {key}"));
            }
            if completeness.missing.len() > MAX_MISSING_LISTED {
                lines.push(format!(
                    "    ... and {} more",
                    completeness.missing.len() - MAX_MISSING_LISTED
                ));
            }
        }
        lines.push(String::new());
        lines.push(format!("Fingerprint: {}", completeness.fingerprint));

        Ok(lines.join("\n") + "\n")
    }

    fn generate_verification_report(
        &self,
        report: &VerificationReport,
    ) -> Result<String, ReportError> {
        let mut lines = Vec::new();
        let engine = report.engine.as_deref().unwrap_or("test run");
        lines.push(self.color(
            &format!("Verifying {engine} against {}", report.platform_id),
            "bold",
        ));
        lines.push(String::new());

        lines.push(format!(
            "{:<32} {:<7} {:<7} {:<10} {:<6} DETAILS",
            "FEATURE", "VERSION", "RESULT", "MATRIX", "MATCH"
        ));
        lines.push("─".repeat(90));

        for test in &report.tests {
            let record = &test.record;
            let name = if record.feature_name.is_empty() {
                &record.feature_id
            } else {
                &record.feature_name
            };
            let matched = if test.matches {
                self.color("yes   ", "green")
            } else {
                self.color("NO    ", "red")
            };
            lines.push(format!(
                "{:<32} {:<7} {:<7} {:<10} {} {}",
                truncate(name, 32),
                record.version.as_str(),
                record.result.as_str(),
                test.matrix_level.as_str(),
                matched,
                truncate(&record.details.replace(['\n', '\r'], " "), 60)
            ));
        }

        let s = &report.summary;
        lines.push(String::new());
        lines.push(format!(
            "Total {}, passed {}, failed {}, skipped {}, errors {}, discrepancies {}",
            s.total, s.passed, s.failed, s.skipped, s.errors, s.discrepancies
        ));

        Ok(lines.join("\n") + "\n")
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Table
    }
}
