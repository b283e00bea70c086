//! User filter selections.

use crate::model::{FeatureCategory, SpecVersion, SupportLevel};
use serde::{Deserialize, Serialize};

/// The current filter selections.
///
/// A plain value: every change produces a new state via the `with_*`
/// builders. Empty selections mean "no restriction", except for
/// `selected_versions`, which also drives version gating.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterState {
    /// Versions shown as grid columns; also gate features introduced later
    pub selected_versions: Vec<SpecVersion>,
    /// Platform ids to keep
    pub selected_platforms: Vec<String>,
    /// Feature categories to keep
    pub selected_categories: Vec<FeatureCategory>,
    /// Levels to highlight in the grid; never narrows the lists
    pub selected_support_levels: Vec<SupportLevel>,
    /// Case-insensitive substring of the feature display name
    pub search_query: String,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_versions(mut self, versions: impl IntoIterator<Item = SpecVersion>) -> Self {
        self.selected_versions = versions.into_iter().collect();
        self
    }

    #[must_use]
    pub fn with_platforms<S: Into<String>>(mut self, ids: impl IntoIterator<Item = S>) -> Self {
        self.selected_platforms = ids.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_categories(
        mut self,
        categories: impl IntoIterator<Item = FeatureCategory>,
    ) -> Self {
        self.selected_categories = categories.into_iter().collect();
        self
    }

    #[must_use]
    pub fn with_support_levels(mut self, levels: impl IntoIterator<Item = SupportLevel>) -> Self {
        self.selected_support_levels = levels.into_iter().collect();
        self
    }

    #[must_use]
    pub fn with_search(mut self, query: impl Into<String>) -> Self {
        self.search_query = query.into();
        self
    }

    /// Normalized search needle, `None` when the query is blank.
    #[must_use]
    pub fn search_needle(&self) -> Option<String> {
        let trimmed = self.search_query.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_lowercase())
        }
    }

    /// True when no selection restricts anything.
    #[must_use]
    pub fn is_unrestricted(&self) -> bool {
        self.selected_platforms.is_empty()
            && self.selected_categories.is_empty()
            && self.search_needle().is_none()
    }

    /// Human-readable summary of the active selections.
    #[must_use]
    pub fn description(&self) -> String {
        let mut parts = Vec::new();

        if !self.selected_versions.is_empty() {
            let versions: Vec<&str> = self.selected_versions.iter().map(SpecVersion::as_str).collect();
            parts.push(format!("versions={}", versions.join(",")));
        }
        if !self.selected_platforms.is_empty() {
            parts.push(format!("platforms={}", self.selected_platforms.join(",")));
        }
        if !self.selected_categories.is_empty() {
            let categories: Vec<&str> = self
                .selected_categories
                .iter()
                .map(FeatureCategory::as_str)
                .collect();
            parts.push(format!("categories={}", categories.join(",")));
        }
        if !self.selected_support_levels.is_empty() {
            let levels: Vec<&str> = self
                .selected_support_levels
                .iter()
                .map(SupportLevel::as_str)
                .collect();
            parts.push(format!("highlight={}", levels.join(",")));
        }
        if let Some(needle) = self.search_needle() {
            parts.push(format!("search=\"{needle}\""));
        }

        if parts.is_empty() {
            "(no filters)".to_string()
        } else {
            parts.join(" ")
        }
    }
}
