//! Version-to-version comparison of a platform's support.
//!
//! Every feature of the catalog is classified by the level it has at
//! version A and at version B:
//!
//! | A          | B            | Kind      |
//! |------------|--------------|-----------|
//! | same level | same level   | unchanged |
//! | `none`     | not `none`   | gained    |
//! | not `none` | `none`       | lost      |
//! | any other  | any other    | changed   |
//!
//! `unknown` is treated as an ordinary level: `unknown -> full` counts as
//! changed, not gained. Version gating does not apply here.

use crate::lookup::get_support_entry;
use crate::model::{CompatibilityData, SpecVersion, SupportLevel};
use serde::Serialize;

/// Classification of one feature between two versions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeKind {
    Unchanged,
    Gained,
    Lost,
    Changed,
}

impl ChangeKind {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Unchanged => "unchanged",
            Self::Gained => "gained",
            Self::Lost => "lost",
            Self::Changed => "changed",
        }
    }
}

impl std::fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify a level transition from version A to version B.
#[must_use]
pub fn classify(from: SupportLevel, to: SupportLevel) -> ChangeKind {
    if from == to {
        ChangeKind::Unchanged
    } else if from == SupportLevel::None {
        ChangeKind::Gained
    } else if to == SupportLevel::None {
        ChangeKind::Lost
    } else {
        ChangeKind::Changed
    }
}

/// One feature's levels at both versions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeatureChange {
    pub feature_id: String,
    pub feature_name: String,
    pub from: SupportLevel,
    pub to: SupportLevel,
    pub kind: ChangeKind,
}

/// Counts of gained, lost and changed features.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ComparisonCounts {
    pub gained: usize,
    pub lost: usize,
    pub changed: usize,
}

impl ComparisonCounts {
    #[must_use]
    pub const fn new(gained: usize, lost: usize, changed: usize) -> Self {
        Self {
            gained,
            lost,
            changed,
        }
    }

    /// Total number of features that differ between the versions.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.gained + self.lost + self.changed
    }

    fn record(&mut self, kind: ChangeKind) {
        match kind {
            ChangeKind::Gained => self.gained += 1,
            ChangeKind::Lost => self.lost += 1,
            ChangeKind::Changed => self.changed += 1,
            ChangeKind::Unchanged => {}
        }
    }
}

/// Full comparison result for one platform.
#[derive(Debug, Clone, Serialize)]
pub struct PlatformComparison {
    pub platform_id: String,
    pub platform_name: String,
    pub version_a: SpecVersion,
    pub version_b: SpecVersion,
    pub counts: ComparisonCounts,
    /// Only the features that differ
    pub changes: Vec<FeatureChange>,
}

/// Per-feature classification over the whole catalog, in catalog order.
///
/// Unchanged features are included with [`ChangeKind::Unchanged`].
#[must_use]
pub fn compare_features(
    data: &CompatibilityData,
    platform_id: &str,
    version_a: &SpecVersion,
    version_b: &SpecVersion,
) -> Vec<FeatureChange> {
    data.features()
        .iter()
        .map(|feature| {
            let from = get_support_entry(data, platform_id, &feature.id, version_a).level;
            let to = get_support_entry(data, platform_id, &feature.id, version_b).level;
            FeatureChange {
                feature_id: feature.id.clone(),
                feature_name: feature.name.clone(),
                from,
                to,
                kind: classify(from, to),
            }
        })
        .collect()
}

/// Count gained, lost and changed features of a platform between two
/// versions. Unknown platforms yield all-zero counts.
#[must_use]
pub fn compute_comparison(
    data: &CompatibilityData,
    platform_id: &str,
    version_a: &SpecVersion,
    version_b: &SpecVersion,
) -> ComparisonCounts {
    let mut counts = ComparisonCounts::default();
    for feature in data.features() {
        let from = get_support_entry(data, platform_id, &feature.id, version_a).level;
        let to = get_support_entry(data, platform_id, &feature.id, version_b).level;
        counts.record(classify(from, to));
    }
    counts
}

/// Counts plus the list of differing features for one platform.
#[must_use]
pub fn compare_platform(
    data: &CompatibilityData,
    platform_id: &str,
    version_a: &SpecVersion,
    version_b: &SpecVersion,
) -> PlatformComparison {
    let mut counts = ComparisonCounts::default();
    let changes = compare_features(data, platform_id, version_a, version_b)
        .into_iter()
        .inspect(|change| counts.record(change.kind))
        .filter(|change| change.kind != ChangeKind::Unchanged)
        .collect();

    let platform_name = data
        .platform(platform_id)
        .map_or_else(|| platform_id.to_string(), |p| p.name.clone());

    PlatformComparison {
        platform_id: platform_id.to_string(),
        platform_name,
        version_a: version_a.clone(),
        version_b: version_b.clone(),
        counts,
        changes,
    }
}

/// One comparison per platform, in snapshot order.
#[must_use]
pub fn compare_all_platforms(
    data: &CompatibilityData,
    version_a: &SpecVersion,
    version_b: &SpecVersion,
) -> Vec<PlatformComparison> {
    data.platforms()
        .iter()
        .map(|p| compare_platform(data, &p.id, version_a, version_b))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{
        Feature, FeatureCategory, Platform, PlatformCategory, PlatformGroup, SupportEntry,
        SupportKey,
    };
    use indexmap::IndexMap;

    #[test]
    fn test_classify_table() {
        use SupportLevel as L;
        assert_eq!(classify(L::Full, L::Full), ChangeKind::Unchanged);
        assert_eq!(classify(L::None, L::Full), ChangeKind::Gained);
        assert_eq!(classify(L::None, L::Unknown), ChangeKind::Gained);
        assert_eq!(classify(L::Partial, L::None), ChangeKind::Lost);
        assert_eq!(classify(L::Unknown, L::None), ChangeKind::Lost);
        assert_eq!(classify(L::Partial, L::Full), ChangeKind::Changed);
        assert_eq!(classify(L::Unknown, L::Full), ChangeKind::Changed);
    }

    fn data() -> CompatibilityData {
        let mut support = IndexMap::new();
        let mut put = |f: &str, v: SpecVersion, level| {
            support.insert(SupportKey::new("spark", f, v), SupportEntry::with_level(level));
        };
        put("f1", SpecVersion::v2(), SupportLevel::None);
        put("f1", SpecVersion::v3(), SupportLevel::Full);
        put("f2", SpecVersion::v2(), SupportLevel::Full);
        put("f2", SpecVersion::v3(), SupportLevel::None);
        put("f3", SpecVersion::v2(), SupportLevel::Partial);
        put("f3", SpecVersion::v3(), SupportLevel::Full);
        put("f4", SpecVersion::v2(), SupportLevel::Full);
        put("f4", SpecVersion::v3(), SupportLevel::Full);

        let features = ["f1", "f2", "f3", "f4"]
            .into_iter()
            .map(|id| Feature::new(id, id.to_uppercase(), FeatureCategory::Core, SpecVersion::v2()))
            .collect();

        CompatibilityData::new(
            vec![Platform::new(
                "spark",
                "Apache Spark",
                "Apache",
                PlatformCategory::OpenSource,
                PlatformGroup::ThirdParty,
            )],
            features,
            vec![SpecVersion::v2(), SpecVersion::v3()],
            support,
        )
    }

    #[test]
    fn test_counts_one_of_each() {
        let data = data();
        let counts = compute_comparison(&data, "spark", &SpecVersion::v2(), &SpecVersion::v3());
        assert_eq!(counts, ComparisonCounts::new(1, 1, 1));
        assert_eq!(counts.total(), 3);
    }

    #[test]
    fn test_reverse_direction_swaps_gained_and_lost() {
        let data = data();
        let counts = compute_comparison(&data, "spark", &SpecVersion::v3(), &SpecVersion::v2());
        assert_eq!(counts, ComparisonCounts::new(1, 1, 1));
        let changes = compare_features(&data, "spark", &SpecVersion::v3(), &SpecVersion::v2());
        assert_eq!(changes[0].kind, ChangeKind::Lost);
        assert_eq!(changes[1].kind, ChangeKind::Gained);
    }

    #[test]
    fn test_same_version_is_all_zero() {
        let data = data();
        let counts = compute_comparison(&data, "spark", &SpecVersion::v3(), &SpecVersion::v3());
        assert_eq!(counts, ComparisonCounts::default());
    }

    #[test]
    fn test_unknown_platform_is_all_zero() {
        let data = data();
        let counts = compute_comparison(&data, "nope", &SpecVersion::v2(), &SpecVersion::v3());
        assert_eq!(counts, ComparisonCounts::default());
    }

    #[test]
    fn test_compare_platform_lists_only_differences() {
        let data = data();
        let result = compare_platform(&data, "spark", &SpecVersion::v2(), &SpecVersion::v3());
        assert_eq!(result.platform_name, "Apache Spark");
        assert_eq!(result.changes.len(), 3);
        assert!(result.changes.iter().all(|c| c.feature_id != "f4"));
        assert_eq!(result.counts, ComparisonCounts::new(1, 1, 1));
    }

    #[test]
    fn test_compare_all_platforms() {
        let data = data();
        let all = compare_all_platforms(&data, &SpecVersion::v2(), &SpecVersion::v3());
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].platform_id, "spark");
    }
}
