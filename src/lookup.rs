//! Point lookup of a single support entry.

use crate::model::{CompatibilityData, SpecVersion, SupportEntry, SupportKey};

/// Support entry for `(platform, feature, version)`.
///
/// The key is built exactly as the loader builds it. Unknown ids and
/// uncovered combinations are not errors: the canonical
/// [`SupportEntry::UNKNOWN`] record is returned instead.
#[must_use]
pub fn get_support_entry<'a>(
    data: &'a CompatibilityData,
    platform_id: &str,
    feature_id: &str,
    version: &SpecVersion,
) -> &'a SupportEntry {
    let key = SupportKey::new(platform_id, feature_id, version.clone());
    data.entry_or_default(&key)
}

/// Closest known id to `input`, for "did you mean" hints.
///
/// Uses normalized Levenshtein similarity and ignores candidates below 0.6.
#[must_use]
pub fn suggest<'a, I>(input: &str, candidates: I) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    let needle = input.to_lowercase();
    candidates
        .into_iter()
        .map(|candidate| {
            (
                candidate,
                strsim::normalized_levenshtein(&needle, &candidate.to_lowercase()),
            )
        })
        .filter(|(_, score)| *score >= 0.6)
        .max_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(candidate, _)| candidate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{
        Feature, FeatureCategory, Platform, PlatformCategory, PlatformGroup, SupportLevel,
    };
    use indexmap::IndexMap;

    fn data() -> CompatibilityData {
        let mut support = IndexMap::new();
        support.insert(
            SupportKey::new("athena", "time-travel", SpecVersion::v2()),
            SupportEntry::with_level(SupportLevel::Full).notes("Via FOR TIMESTAMP AS OF"),
        );
        CompatibilityData::new(
            vec![Platform::new(
                "athena",
                "Amazon Athena",
                "AWS",
                PlatformCategory::Cloud,
                PlatformGroup::Aws,
            )],
            vec![Feature::new(
                "time-travel",
                "Time Travel",
                FeatureCategory::TimeTravel,
                SpecVersion::v2(),
            )],
            vec![SpecVersion::v2(), SpecVersion::v3()],
            support,
        )
    }

    #[test]
    fn test_hit() {
        let data = data();
        let entry = get_support_entry(&data, "athena", "time-travel", &SpecVersion::v2());
        assert_eq!(entry.level, SupportLevel::Full);
        assert_eq!(entry.notes, "Via FOR TIMESTAMP AS OF");
    }

    #[test]
    fn test_miss_returns_unknown() {
        let data = data();
        for (p, f, v) in [
            ("athena", "time-travel", SpecVersion::v3()),
            ("nonexistent", "time-travel", SpecVersion::v2()),
            ("athena", "nonexistent", SpecVersion::v2()),
        ] {
            let entry = get_support_entry(&data, p, f, &v);
            assert_eq!(entry.level, SupportLevel::Unknown);
            assert!(entry.notes.is_empty());
            assert!(entry.caveats.is_empty());
        }
    }

    #[test]
    fn test_suggest() {
        let ids = ["athena", "bigquery", "snowflake"];
        assert_eq!(suggest("athina", ids), Some("athena"));
        assert_eq!(suggest("BigQuery", ids), Some("bigquery"));
        assert_eq!(suggest("zzz", ids), None);
    }
}
