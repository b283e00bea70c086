//! Narrowing the snapshot to what the grid should show.

use super::FilterState;
use crate::model::{
    CompatibilityData, Feature, Platform, SpecVersion, SupportEntry, SupportKey, SupportLevel,
};
use serde::Serialize;

/// Platforms and features that survive a [`FilterState`], in snapshot order.
#[derive(Debug, Clone, Serialize)]
pub struct FilteredView<'a> {
    pub platforms: Vec<&'a Platform>,
    pub features: Vec<&'a Feature>,
    /// Grid columns: the selected versions in snapshot order, or every
    /// version when none is selected
    pub versions: Vec<&'a SpecVersion>,
    #[serde(skip)]
    highlight: Vec<SupportLevel>,
}

/// One rendered cell of the filtered grid.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct GridCell<'a> {
    pub platform: &'a Platform,
    pub feature: &'a Feature,
    pub version: &'a SpecVersion,
    pub entry: &'a SupportEntry,
    /// False when the feature did not exist yet at this version
    pub applicable: bool,
    /// The entry's level is one of the selected support levels
    pub highlighted: bool,
}

impl<'a> FilteredView<'a> {
    /// True when the grid has no cells; renderers print an explicit empty
    /// state instead of a blank grid.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.platforms.is_empty() || self.features.is_empty() || self.versions.is_empty()
    }

    /// Number of grid cells.
    #[must_use]
    pub fn cell_count(&self) -> usize {
        self.platforms.len() * self.features.len() * self.versions.len()
    }

    /// The grid cross-product, platform-major, then feature, then version.
    pub fn cells(&self, data: &'a CompatibilityData) -> impl Iterator<Item = GridCell<'a>> + '_ {
        self.platforms.iter().flat_map(move |&platform| {
            self.features.iter().flat_map(move |&feature| {
                self.versions.iter().map(move |&version| {
                    let key = SupportKey::new(&platform.id, &feature.id, version.clone());
                    let entry = data.entry_or_default(&key);
                    GridCell {
                        platform,
                        feature,
                        version,
                        entry,
                        applicable: feature.applies_to(version),
                        highlighted: self.highlight.contains(&entry.level),
                    }
                })
            })
        })
    }
}

/// Apply every filter of `state` to `data`.
///
/// Steps, each preserving input order:
/// 1. platforms narrowed to `selected_platforms` (empty keeps all)
/// 2. features gated by `selected_versions` (see [`passes_version_gate`])
/// 3. features narrowed to `selected_categories` (empty keeps all)
/// 4. features narrowed by the trimmed, lower-cased search query against
///    the display name (blank keeps all)
///
/// `selected_support_levels` only marks cells as highlighted.
pub fn apply_filters<'a>(data: &'a CompatibilityData, state: &FilterState) -> FilteredView<'a> {
    let platforms = data
        .platforms()
        .iter()
        .filter(|p| state.selected_platforms.is_empty() || state.selected_platforms.contains(&p.id))
        .collect();

    let baseline = data.baseline_version();
    let needle = state.search_needle();

    let features = data
        .features()
        .iter()
        .filter(|f| passes_version_gate(f, &state.selected_versions, baseline))
        .filter(|f| {
            state.selected_categories.is_empty() || state.selected_categories.contains(&f.category)
        })
        .filter(|f| {
            needle
                .as_deref()
                .map_or(true, |n| f.name.to_lowercase().contains(n))
        })
        .collect();

    let versions = data
        .versions()
        .iter()
        .filter(|v| state.selected_versions.is_empty() || state.selected_versions.contains(v))
        .collect();

    FilteredView {
        platforms,
        features,
        versions,
        highlight: state.selected_support_levels.clone(),
    }
}

/// Version-introduction gating.
///
/// A feature introduced in the baseline version is always visible. Any
/// other feature is visible only when some selected version is at or after
/// the version that introduced it. With `{v2, v3}` this drops v3 features
/// unless v3 is selected.
///
/// Once a later version exists the rule is cumulative, not literal:
/// selecting only v4 still shows v3 features, because v4 carries them.
#[must_use]
pub fn passes_version_gate(
    feature: &Feature,
    selected_versions: &[SpecVersion],
    baseline: Option<&SpecVersion>,
) -> bool {
    if baseline.is_some_and(|b| feature.introduced_in <= *b) {
        return true;
    }
    selected_versions.iter().any(|v| feature.applies_to(v))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{FeatureCategory, PlatformCategory, PlatformGroup};
    use indexmap::IndexMap;

    fn data() -> CompatibilityData {
        let platform = |id: &str, group| {
            Platform::new(id, id, "Vendor", PlatformCategory::Cloud, group)
        };
        let mut support = IndexMap::new();
        support.insert(
            SupportKey::new("athena", "time-travel", SpecVersion::v2()),
            SupportEntry::with_level(SupportLevel::Full),
        );
        support.insert(
            SupportKey::new("athena", "variant-type", SpecVersion::v3()),
            SupportEntry::with_level(SupportLevel::Partial),
        );
        CompatibilityData::new(
            vec![
                platform("athena", PlatformGroup::Aws),
                platform("bigquery", PlatformGroup::Gcp),
                platform("synapse", PlatformGroup::Azure),
            ],
            vec![
                Feature::new("time-travel", "Time Travel", FeatureCategory::TimeTravel, SpecVersion::v2()),
                Feature::new("variant-type", "Variant Type", FeatureCategory::Types, SpecVersion::v3()),
                Feature::new("schema-evolution", "Schema Evolution", FeatureCategory::Schema, SpecVersion::v2()),
            ],
            vec![SpecVersion::v2(), SpecVersion::v3()],
            support,
        )
    }

    fn feature_ids<'a>(view: &FilteredView<'a>) -> Vec<&'a str> {
        view.features.iter().map(|f| f.id.as_str()).collect()
    }

    #[test]
    fn test_no_filters_keeps_baseline_features() {
        let data = data();
        let view = apply_filters(&data, &FilterState::new());
        assert_eq!(view.platforms.len(), 3);
        assert_eq!(feature_ids(&view), ["time-travel", "schema-evolution"]);
        assert_eq!(view.versions.len(), 2);
    }

    #[test]
    fn test_v3_gating() {
        let data = data();
        let v2_only = apply_filters(&data, &FilterState::new().with_versions([SpecVersion::v2()]));
        assert!(!feature_ids(&v2_only).contains(&"variant-type"));

        let both = apply_filters(
            &data,
            &FilterState::new().with_versions([SpecVersion::v2(), SpecVersion::v3()]),
        );
        assert_eq!(feature_ids(&both), ["time-travel", "variant-type", "schema-evolution"]);
    }

    #[test]
    fn test_platform_selection_preserves_order() {
        let data = data();
        let view = apply_filters(&data, &FilterState::new().with_platforms(["synapse", "athena"]));
        let ids: Vec<&str> = view.platforms.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["athena", "synapse"]);
    }

    #[test]
    fn test_unknown_platform_yields_empty_view() {
        let data = data();
        let view = apply_filters(&data, &FilterState::new().with_platforms(["nope"]));
        assert!(view.platforms.is_empty());
        assert!(view.is_empty());
    }

    #[test]
    fn test_search_is_trimmed_and_case_insensitive() {
        let data = data();
        let view = apply_filters(&data, &FilterState::new().with_search("  TIME "));
        assert_eq!(feature_ids(&view), ["time-travel"]);
    }

    #[test]
    fn test_category_filter() {
        let data = data();
        let view = apply_filters(
            &data,
            &FilterState::new().with_categories([FeatureCategory::Schema]),
        );
        assert_eq!(feature_ids(&view), ["schema-evolution"]);
    }

    #[test]
    fn test_cells_applicability_and_highlight() {
        let data = data();
        let state = FilterState::new()
            .with_versions([SpecVersion::v2(), SpecVersion::v3()])
            .with_platforms(["athena"])
            .with_support_levels([SupportLevel::Partial]);
        let view = apply_filters(&data, &state);
        assert_eq!(view.cell_count(), 6);

        let cells: Vec<GridCell<'_>> = view.cells(&data).collect();
        assert_eq!(cells.len(), 6);

        let variant_v2 = cells
            .iter()
            .find(|c| c.feature.id == "variant-type" && c.version == &SpecVersion::v2())
            .unwrap();
        assert!(!variant_v2.applicable);
        assert_eq!(variant_v2.entry.level, SupportLevel::Unknown);

        let highlighted: Vec<_> = cells.iter().filter(|c| c.highlighted).collect();
        assert_eq!(highlighted.len(), 1);
        assert_eq!(highlighted[0].feature.id, "variant-type");
    }

    #[test]
    fn test_gate_with_future_version() {
        let v4 = Feature::new("x", "X", FeatureCategory::Types, SpecVersion::new("v4"));
        let baseline = SpecVersion::v2();
        assert!(!passes_version_gate(&v4, &[SpecVersion::v3()], Some(&baseline)));
        assert!(passes_version_gate(&v4, &[SpecVersion::new("v4")], Some(&baseline)));
    }

    #[test]
    fn test_later_version_keeps_earlier_features() {
        let v4 = SpecVersion::new("v4");
        let data = CompatibilityData::new(
            vec![Platform::new(
                "spark",
                "Spark",
                "Apache",
                PlatformCategory::OpenSource,
                PlatformGroup::ThirdParty,
            )],
            vec![
                Feature::new("f1", "Read Support", FeatureCategory::Core, SpecVersion::v2()),
                Feature::new("f2", "Variant Type", FeatureCategory::Types, SpecVersion::v3()),
                Feature::new("f3", "Future Type", FeatureCategory::Types, v4.clone()),
            ],
            vec![SpecVersion::v2(), SpecVersion::v3(), v4.clone()],
            IndexMap::new(),
        );

        let v4_only = apply_filters(&data, &FilterState::new().with_versions([v4]));
        assert_eq!(feature_ids(&v4_only), ["f1", "f2", "f3"]);

        let v2_only = apply_filters(&data, &FilterState::new().with_versions([SpecVersion::v2()]));
        assert_eq!(feature_ids(&v2_only), ["f1"]);
    }
}
