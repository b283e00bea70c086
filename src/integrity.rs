//! Completeness analysis of a loaded snapshot.
//!
//! A cell is *expected* for every platform × feature × version where the
//! feature already exists at that version. Expected cells without an entry
//! are listed as missing; entries are also tallied per level so `validate`
//! can show how much of the matrix is still `unknown`.

use crate::model::{CompatibilityData, SupportKey, SupportLevel};
use serde::Serialize;

/// Entry counts per support level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LevelCounts {
    pub full: usize,
    pub partial: usize,
    pub none: usize,
    pub unknown: usize,
}

impl LevelCounts {
    fn record(&mut self, level: SupportLevel) {
        match level {
            SupportLevel::Full => self.full += 1,
            SupportLevel::Partial => self.partial += 1,
            SupportLevel::None => self.none += 1,
            SupportLevel::Unknown => self.unknown += 1,
        }
    }

    #[must_use]
    pub const fn get(&self, level: SupportLevel) -> usize {
        match level {
            SupportLevel::Full => self.full,
            SupportLevel::Partial => self.partial,
            SupportLevel::None => self.none,
            SupportLevel::Unknown => self.unknown,
        }
    }
}

/// Coverage of the snapshot against its expected cells.
#[derive(Debug, Clone, Serialize)]
pub struct CompletenessReport {
    pub platforms: usize,
    pub features: usize,
    pub versions: usize,
    pub expected: usize,
    pub present: usize,
    pub missing: Vec<SupportKey>,
    /// Entries for versions that predate the feature
    pub not_applicable: usize,
    pub levels: LevelCounts,
    pub fingerprint: String,
}

impl CompletenessReport {
    /// Share of expected cells that have an entry, in percent.
    #[must_use]
    pub fn coverage_percent(&self) -> f64 {
        if self.expected == 0 {
            return 100.0;
        }
        self.present as f64 / self.expected as f64 * 100.0
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }
}

/// Walk every expected cell of `data`.
#[must_use]
pub fn analyze_completeness(data: &CompatibilityData) -> CompletenessReport {
    let mut expected = 0;
    let mut present = 0;
    let mut missing = Vec::new();

    for platform in data.platforms() {
        for feature in data.features() {
            for version in data.versions().iter().filter(|v| feature.applies_to(v)) {
                expected += 1;
                let key = SupportKey::new(&platform.id, &feature.id, version.clone());
                if data.entry(&key).is_some() {
                    present += 1;
                } else {
                    missing.push(key);
                }
            }
        }
    }

    let mut levels = LevelCounts::default();
    let mut not_applicable = 0;
    for (key, entry) in data.support() {
        levels.record(entry.level);
        if data
            .feature(&key.feature)
            .is_some_and(|f| !f.applies_to(&key.version))
        {
            not_applicable += 1;
        }
    }

    CompletenessReport {
        platforms: data.platforms().len(),
        features: data.features().len(),
        versions: data.versions().len(),
        expected,
        present,
        missing,
        not_applicable,
        levels,
        fingerprint: data.fingerprint(),
    }
}
