//! The aggregated, immutable support-matrix snapshot.

use super::{Feature, Platform, SpecVersion, SupportEntry, SupportKey};
use crate::utils::content_hash;
use indexmap::IndexMap;
use serde::Serialize;

static UNKNOWN_ENTRY: SupportEntry = SupportEntry::UNKNOWN;

/// Aggregate root of the support matrix.
///
/// Built once by the loader and only ever shared by reference afterwards.
/// Platform, feature and version order is the order the sources declared
/// them in; the grid renders in that order.
#[derive(Debug, Clone, Serialize)]
#[must_use]
pub struct CompatibilityData {
    platforms: Vec<Platform>,
    features: Vec<Feature>,
    versions: Vec<SpecVersion>,
    support: IndexMap<SupportKey, SupportEntry>,
}

impl CompatibilityData {
    /// Assemble a snapshot from already-validated parts.
    ///
    /// The loader's [`Aggregator`](crate::loader::Aggregator) is the checked
    /// entry point; this constructor exists for synthetic snapshots.
    pub fn new(
        platforms: Vec<Platform>,
        features: Vec<Feature>,
        versions: Vec<SpecVersion>,
        support: IndexMap<SupportKey, SupportEntry>,
    ) -> Self {
        Self {
            platforms,
            features,
            versions,
            support,
        }
    }

    #[must_use]
    pub fn platforms(&self) -> &[Platform] {
        &self.platforms
    }

    #[must_use]
    pub fn features(&self) -> &[Feature] {
        &self.features
    }

    #[must_use]
    pub fn versions(&self) -> &[SpecVersion] {
        &self.versions
    }

    #[must_use]
    pub const fn support(&self) -> &IndexMap<SupportKey, SupportEntry> {
        &self.support
    }

    #[must_use]
    pub fn platform(&self, id: &str) -> Option<&Platform> {
        self.platforms.iter().find(|p| p.id == id)
    }

    #[must_use]
    pub fn feature(&self, id: &str) -> Option<&Feature> {
        self.features.iter().find(|f| f.id == id)
    }

    #[must_use]
    pub fn has_version(&self, version: &SpecVersion) -> bool {
        self.versions.contains(version)
    }

    /// The lowest version of the enumeration. Features introduced here are
    /// never hidden by version gating.
    #[must_use]
    pub fn baseline_version(&self) -> Option<&SpecVersion> {
        self.versions.iter().min()
    }

    /// Stored entry for a key, if any.
    #[must_use]
    pub fn entry(&self, key: &SupportKey) -> Option<&SupportEntry> {
        self.support.get(key)
    }

    /// Stored entry for a key, or the canonical unknown record.
    #[must_use]
    pub fn entry_or_default(&self, key: &SupportKey) -> &SupportEntry {
        self.support.get(key).unwrap_or(&UNKNOWN_ENTRY)
    }

    #[must_use]
    pub fn entry_count(&self) -> usize {
        self.support.len()
    }

    /// Stable content fingerprint of the snapshot, printed by `validate`.
    #[must_use]
    pub fn fingerprint(&self) -> String {
        let bytes = serde_json::to_vec(self).unwrap_or_default();
        format!("{:016x}", content_hash(&bytes))
    }
}
