//! Report type definitions.

use crate::filter::{FilterState, FilteredView};
use crate::integrity::CompletenessReport;
use crate::loader::{MergePolicy, MergeStats};
use crate::model::{CompatibilityData, SpecVersion, SupportEntry};
use clap::ValueEnum;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Output format for reports
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// Table on stdout, or inferred from the output file extension
    #[default]
    Auto,
    /// Aligned terminal table (colored)
    Table,
    /// Structured JSON output
    Json,
    /// CSV for spreadsheet import
    Csv,
    /// Human-readable Markdown
    #[value(alias = "md")]
    Markdown,
}

impl std::fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Auto => write!(f, "auto"),
            Self::Table => write!(f, "table"),
            Self::Json => write!(f, "json"),
            Self::Csv => write!(f, "csv"),
            Self::Markdown => write!(f, "markdown"),
        }
    }
}

/// Input of a grid report: the snapshot, the filtered view and the filter
/// that produced it.
#[derive(Debug, Clone, Copy)]
pub struct GridReport<'a> {
    pub data: &'a CompatibilityData,
    pub view: &'a FilteredView<'a>,
    pub filter: &'a FilterState,
}

/// Result of a single point lookup.
#[derive(Debug, Clone, Serialize)]
pub struct LookupReport {
    pub platform_id: String,
    pub platform_name: Option<String>,
    pub feature_id: String,
    pub feature_name: Option<String>,
    pub version: SpecVersion,
    /// `None` when the feature is not in the catalog
    pub applicable: Option<bool>,
    pub entry: SupportEntry,
}

impl LookupReport {
    /// Look up one cell and describe it.
    #[must_use]
    pub fn build(
        data: &CompatibilityData,
        platform_id: &str,
        feature_id: &str,
        version: &SpecVersion,
    ) -> Self {
        let feature = data.feature(feature_id);
        Self {
            platform_id: platform_id.to_string(),
            platform_name: data.platform(platform_id).map(|p| p.name.clone()),
            feature_id: feature_id.to_string(),
            feature_name: feature.map(|f| f.name.clone()),
            version: version.clone(),
            applicable: feature.map(|f| f.applies_to(version)),
            entry: crate::lookup::get_support_entry(data, platform_id, feature_id, version).clone(),
        }
    }
}

/// Outcome of `validate`: merge counters plus completeness.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationReport {
    pub policy: MergePolicy,
    pub stats: MergeStats,
    pub completeness: CompletenessReport,
}
