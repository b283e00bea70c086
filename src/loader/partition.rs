//! Wire shapes of the source files.

use crate::error::{ErrorContext, LoadErrorKind, MatrixError, Result};
use crate::model::{Feature, Platform, SpecVersion, SupportEntry, SupportKey};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// One vendor's platforms and their support entries.
///
/// ```json
/// { "platforms": [ ... ], "support": { "athena:time-travel:v2": { "level": "full" } } }
/// ```
#[derive(Debug, Clone, Default, Serialize)]
pub struct VendorPartition {
    /// Source name used in diagnostics (the file stem when loaded from disk)
    #[serde(skip)]
    pub name: String,
    pub platforms: Vec<Platform>,
    pub support: IndexMap<SupportKey, SupportEntry>,
}

impl VendorPartition {
    /// Create an empty, named partition.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Parse a partition from JSON text.
    ///
    /// Support keys are parsed after the JSON shape is accepted, so a
    /// malformed key surfaces as [`LoadErrorKind::InvalidKey`].
    pub fn from_json_str(name: impl Into<String>, content: &str) -> Result<Self> {
        let name = name.into();
        let raw: RawPartition = serde_json::from_str(content)
            .with_context(|| format!("parsing vendor partition '{name}'"))?;

        let mut support = IndexMap::with_capacity(raw.support.len());
        for (raw_key, entry) in raw.support {
            let key: SupportKey = raw_key.parse().map_err(|_| {
                MatrixError::load(
                    format!("parsing vendor partition '{name}'"),
                    LoadErrorKind::InvalidKey(raw_key.clone()),
                )
            })?;
            support.insert(key, entry);
        }

        Ok(Self {
            name,
            platforms: raw.platforms,
            support,
        })
    }

    /// Add a platform.
    #[must_use]
    pub fn with_platform(mut self, platform: Platform) -> Self {
        self.platforms.push(platform);
        self
    }

    /// Add a support entry.
    #[must_use]
    pub fn with_entry(mut self, key: SupportKey, entry: SupportEntry) -> Self {
        self.support.insert(key, entry);
        self
    }

    #[must_use]
    pub fn key_count(&self) -> usize {
        self.support.len()
    }
}

/// Wire shape of a partition before its keys are parsed.
#[derive(Deserialize)]
struct RawPartition {
    platforms: Vec<Platform>,
    support: IndexMap<String, SupportEntry>,
}

/// The feature catalog and the version enumeration.
///
/// ```json
/// { "features": [ ... ], "versions": ["v2", "v3"] }
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FeatureCatalog {
    pub features: Vec<Feature>,
    pub versions: Vec<SpecVersion>,
}

impl FeatureCatalog {
    pub fn new(features: Vec<Feature>, versions: Vec<SpecVersion>) -> Self {
        Self { features, versions }
    }

    /// Parse the catalog from JSON text.
    pub fn from_json_str(content: &str) -> Result<Self> {
        serde_json::from_str(content).context("parsing feature catalog")
    }
}
