//! Merging vendor partitions and the feature catalog into one snapshot.

use super::{FeatureCatalog, VendorPartition};
use crate::error::{IntegrityErrorKind, LoadErrorKind, MatrixError, Result};
use crate::model::{validate_id, CompatibilityData, SupportKey};
use indexmap::IndexMap;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// What to do when two partitions define the same composite key.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    JsonSchema,
    clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum MergePolicy {
    /// Reject the data set with an integrity fault
    #[default]
    Strict,
    /// Keep the later partition's entry and log a warning
    LastWriteWins,
}

impl std::fmt::Display for MergePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Strict => write!(f, "strict"),
            Self::LastWriteWins => write!(f, "last-write-wins"),
        }
    }
}

/// Counters collected while merging.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MergeStats {
    pub partitions: usize,
    pub platforms: usize,
    pub features: usize,
    /// Sum of partition sizes before merging
    pub source_entries: usize,
    /// Size of the merged mapping
    pub merged_entries: usize,
    /// Keys replaced by a later partition (last-write-wins only)
    pub overwritten: Vec<SupportKey>,
    /// Keys referencing an unknown platform, feature or version
    /// (last-write-wins only; strict mode rejects them)
    pub orphans: Vec<SupportKey>,
}

impl MergeStats {
    /// True when no key was defined twice.
    #[must_use]
    pub fn is_disjoint(&self) -> bool {
        self.source_entries == self.merged_entries
    }
}

/// Builds a [`CompatibilityData`] from its source partitions.
#[derive(Debug, Clone, Copy, Default)]
pub struct Aggregator {
    policy: MergePolicy,
}

impl Aggregator {
    pub const fn new(policy: MergePolicy) -> Self {
        Self { policy }
    }

    #[must_use]
    pub const fn policy(&self) -> MergePolicy {
        self.policy
    }

    /// Merge the catalog and partitions into one snapshot.
    pub fn aggregate(
        &self,
        catalog: FeatureCatalog,
        partitions: Vec<VendorPartition>,
    ) -> Result<CompatibilityData> {
        self.aggregate_with_stats(catalog, partitions)
            .map(|(data, _)| data)
    }

    /// Merge the catalog and partitions, also returning merge counters.
    ///
    /// Platforms are concatenated in partition order and support maps are
    /// unioned. Any structural or integrity fault aborts the whole merge.
    pub fn aggregate_with_stats(
        &self,
        catalog: FeatureCatalog,
        partitions: Vec<VendorPartition>,
    ) -> Result<(CompatibilityData, MergeStats)> {
        validate_catalog(&catalog)?;

        let mut stats = MergeStats {
            partitions: partitions.len(),
            features: catalog.features.len(),
            ..MergeStats::default()
        };

        let mut platforms = Vec::new();
        let mut platform_owner: HashMap<String, String> = HashMap::new();
        let mut support = IndexMap::new();
        let mut key_owner: HashMap<SupportKey, String> = HashMap::new();

        for partition in partitions {
            tracing::debug!(
                partition = %partition.name,
                platforms = partition.platforms.len(),
                entries = partition.key_count(),
                "merging partition"
            );

            for platform in partition.platforms {
                check_id(&platform.id, "platform")?;
                if platform_owner
                    .insert(platform.id.clone(), partition.name.clone())
                    .is_some()
                {
                    return Err(MatrixError::integrity(
                        format!("partition '{}'", partition.name),
                        IntegrityErrorKind::DuplicatePlatform(platform.id),
                    ));
                }
                platforms.push(platform);
            }

            stats.source_entries += partition.support.len();
            for (key, entry) in partition.support {
                if let Some(previous) = key_owner.get(&key) {
                    match self.policy {
                        MergePolicy::Strict => {
                            return Err(MatrixError::integrity(
                                "merging support maps",
                                IntegrityErrorKind::KeyCollision {
                                    key: key.to_string(),
                                    first: previous.clone(),
                                    second: partition.name.clone(),
                                },
                            ));
                        }
                        MergePolicy::LastWriteWins => {
                            tracing::warn!(
                                key = %key,
                                first = %previous,
                                second = %partition.name,
                                "support key defined twice, keeping the later entry"
                            );
                            stats.overwritten.push(key.clone());
                        }
                    }
                }
                key_owner.insert(key.clone(), partition.name.clone());
                support.insert(key, entry);
            }
        }

        let known_platforms: HashSet<&str> = platforms.iter().map(|p| p.id.as_str()).collect();
        let known_features: HashSet<&str> =
            catalog.features.iter().map(|f| f.id.as_str()).collect();

        for key in support.keys() {
            let orphan = if !known_platforms.contains(key.platform.as_str()) {
                Some(("platform", key.platform.clone()))
            } else if !known_features.contains(key.feature.as_str()) {
                Some(("feature", key.feature.clone()))
            } else if !catalog.versions.contains(&key.version) {
                Some(("version", key.version.to_string()))
            } else {
                None
            };

            if let Some((kind, id)) = orphan {
                match self.policy {
                    MergePolicy::Strict => {
                        return Err(MatrixError::integrity(
                            format!("partition '{}'", key_owner[key]),
                            IntegrityErrorKind::OrphanEntry {
                                key: key.to_string(),
                                kind,
                                id,
                            },
                        ));
                    }
                    MergePolicy::LastWriteWins => {
                        tracing::warn!(key = %key, kind, id = %id, "support entry references unknown id");
                        stats.orphans.push(key.clone());
                    }
                }
            }
        }

        stats.platforms = platforms.len();
        stats.merged_entries = support.len();

        tracing::info!(
            partitions = stats.partitions,
            platforms = stats.platforms,
            features = stats.features,
            entries = stats.merged_entries,
            policy = %self.policy,
            "aggregated support matrix"
        );

        let data = CompatibilityData::new(platforms, catalog.features, catalog.versions, support);
        Ok((data, stats))
    }
}

fn validate_catalog(catalog: &FeatureCatalog) -> Result<()> {
    if catalog.versions.is_empty() {
        return Err(MatrixError::load(
            "feature catalog",
            LoadErrorKind::Empty("versions".to_string()),
        ));
    }

    let mut seen_versions = HashSet::new();
    for version in &catalog.versions {
        if !version.is_well_formed() {
            return Err(MatrixError::load(
                "feature catalog",
                LoadErrorKind::InvalidId {
                    id: version.to_string(),
                    reason: "versions must look like v<N>".to_string(),
                },
            ));
        }
        if !seen_versions.insert(version) {
            return Err(MatrixError::load(
                "feature catalog",
                LoadErrorKind::InvalidId {
                    id: version.to_string(),
                    reason: "version listed more than once".to_string(),
                },
            ));
        }
    }

    let mut seen_features = HashSet::new();
    for feature in &catalog.features {
        check_id(&feature.id, "feature")?;
        if !seen_features.insert(feature.id.as_str()) {
            return Err(MatrixError::integrity(
                "feature catalog",
                IntegrityErrorKind::DuplicateFeature(feature.id.clone()),
            ));
        }
        if !catalog.versions.contains(&feature.introduced_in) {
            return Err(MatrixError::load(
                "feature catalog",
                LoadErrorKind::UnknownVersion {
                    feature: feature.id.clone(),
                    version: feature.introduced_in.to_string(),
                },
            ));
        }
    }

    Ok(())
}

fn check_id(id: &str, kind: &str) -> Result<()> {
    validate_id(id).map_err(|reason| {
        MatrixError::load(
            format!("{kind} id"),
            LoadErrorKind::InvalidId {
                id: id.to_string(),
                reason,
            },
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{
        Feature, FeatureCategory, Platform, PlatformCategory, PlatformGroup, SpecVersion,
        SupportEntry, SupportLevel,
    };

    fn catalog() -> FeatureCatalog {
        FeatureCatalog::new(
            vec![
                Feature::new("f1", "Read Support", FeatureCategory::Core, SpecVersion::v2()),
                Feature::new("f2", "Variant Type", FeatureCategory::Types, SpecVersion::v3()),
            ],
            vec![SpecVersion::v2(), SpecVersion::v3()],
        )
    }

    fn platform(id: &str, group: PlatformGroup) -> Platform {
        Platform::new(id, id.to_uppercase(), "Vendor", PlatformCategory::Cloud, group)
    }

    fn entry(level: SupportLevel) -> SupportEntry {
        SupportEntry::with_level(level)
    }

    fn key(p: &str, f: &str, v: SpecVersion) -> SupportKey {
        SupportKey::new(p, f, v)
    }

    #[test]
    fn test_disjoint_partitions_merge_in_order() {
        let aws = VendorPartition::new("aws")
            .with_platform(platform("athena", PlatformGroup::Aws))
            .with_entry(key("athena", "f1", SpecVersion::v2()), entry(SupportLevel::Full));
        let gcp = VendorPartition::new("gcp")
            .with_platform(platform("bigquery", PlatformGroup::Gcp))
            .with_entry(key("bigquery", "f1", SpecVersion::v2()), entry(SupportLevel::Partial))
            .with_entry(key("bigquery", "f2", SpecVersion::v3()), entry(SupportLevel::None));

        let (data, stats) = Aggregator::default()
            .aggregate_with_stats(catalog(), vec![aws, gcp])
            .unwrap();

        let ids: Vec<&str> = data.platforms().iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["athena", "bigquery"]);
        assert_eq!(data.entry_count(), 3);
        assert!(stats.is_disjoint());
        assert_eq!(stats.source_entries, 3);
        assert!(stats.overwritten.is_empty());
    }

    #[test]
    fn test_strict_rejects_key_collision() {
        let first = VendorPartition::new("aws")
            .with_platform(platform("athena", PlatformGroup::Aws))
            .with_entry(key("athena", "f1", SpecVersion::v2()), entry(SupportLevel::Full));
        let second = VendorPartition::new("aws-extra")
            .with_entry(key("athena", "f1", SpecVersion::v2()), entry(SupportLevel::None));

        let err = Aggregator::new(MergePolicy::Strict)
            .aggregate(catalog(), vec![first, second])
            .unwrap_err();
        match err {
            MatrixError::Integrity {
                source: IntegrityErrorKind::KeyCollision { key, first, second },
                ..
            } => {
                assert_eq!(key, "athena:f1:v2");
                assert_eq!(first, "aws");
                assert_eq!(second, "aws-extra");
            }
            other => panic!("expected key collision, got {other:?}"),
        }
    }

    #[test]
    fn test_last_write_wins_keeps_later_entry() {
        let first = VendorPartition::new("aws")
            .with_platform(platform("athena", PlatformGroup::Aws))
            .with_entry(key("athena", "f1", SpecVersion::v2()), entry(SupportLevel::Full));
        let second = VendorPartition::new("aws-extra")
            .with_entry(key("athena", "f1", SpecVersion::v2()), entry(SupportLevel::None));

        let (data, stats) = Aggregator::new(MergePolicy::LastWriteWins)
            .aggregate_with_stats(catalog(), vec![first, second])
            .unwrap();

        let k = key("athena", "f1", SpecVersion::v2());
        assert_eq!(data.entry(&k).unwrap().level, SupportLevel::None);
        assert_eq!(stats.overwritten, vec![k]);
        assert!(!stats.is_disjoint());
        assert_eq!(stats.merged_entries + 1, stats.source_entries);
    }

    #[test]
    fn test_duplicate_platform_rejected() {
        let a = VendorPartition::new("a").with_platform(platform("spark", PlatformGroup::ThirdParty));
        let b = VendorPartition::new("b").with_platform(platform("spark", PlatformGroup::ThirdParty));
        let err = Aggregator::new(MergePolicy::LastWriteWins)
            .aggregate(catalog(), vec![a, b])
            .unwrap_err();
        assert!(matches!(
            err,
            MatrixError::Integrity {
                source: IntegrityErrorKind::DuplicatePlatform(ref id),
                ..
            } if id == "spark"
        ));
    }

    #[test]
    fn test_orphan_entry_strict_and_permissive() {
        let partition = || {
            VendorPartition::new("oss")
                .with_platform(platform("spark", PlatformGroup::ThirdParty))
                .with_entry(key("trino", "f1", SpecVersion::v2()), entry(SupportLevel::Full))
        };

        let err = Aggregator::new(MergePolicy::Strict)
            .aggregate(catalog(), vec![partition()])
            .unwrap_err();
        assert!(matches!(
            err,
            MatrixError::Integrity {
                source: IntegrityErrorKind::OrphanEntry { kind: "platform", .. },
                ..
            }
        ));

        let (_, stats) = Aggregator::new(MergePolicy::LastWriteWins)
            .aggregate_with_stats(catalog(), vec![partition()])
            .unwrap();
        assert_eq!(stats.orphans.len(), 1);
    }

    #[test]
    fn test_platform_id_with_delimiter_rejected() {
        let partition = VendorPartition::new("bad")
            .with_platform(platform("spark:3", PlatformGroup::ThirdParty));
        let err = Aggregator::default()
            .aggregate(catalog(), vec![partition])
            .unwrap_err();
        assert!(matches!(
            err,
            MatrixError::Load {
                source: LoadErrorKind::InvalidId { .. },
                ..
            }
        ));
    }

    #[test]
    fn test_feature_with_unknown_version_rejected() {
        let mut bad = catalog();
        bad.features.push(Feature::new(
            "f9",
            "Future",
            FeatureCategory::Core,
            SpecVersion::new("v4"),
        ));
        let err = Aggregator::default().aggregate(bad, Vec::new()).unwrap_err();
        assert!(matches!(
            err,
            MatrixError::Load {
                source: LoadErrorKind::UnknownVersion { .. },
                ..
            }
        ));
    }

    #[test]
    fn test_empty_versions_rejected() {
        let empty = FeatureCatalog::new(Vec::new(), Vec::new());
        assert!(Aggregator::default().aggregate(empty, Vec::new()).is_err());
    }
}
