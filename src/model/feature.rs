//! Table-format features: the columns of the support matrix.

use super::SpecVersion;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// The eight fixed feature categories.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    JsonSchema,
    clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum FeatureCategory {
    /// Table creation, reads, writes
    Core,
    /// Position/equality deletes, merge-on-read, copy-on-write
    Deletes,
    /// Schema evolution, type promotion, default values
    Schema,
    /// Hidden partitioning, partition evolution, transforms
    Partitioning,
    /// Snapshots, branching and tagging, maintenance
    TimeTravel,
    /// Statistics, bloom filters
    Performance,
    /// Catalog integrations
    Catalog,
    /// Variant, geometry, vector and nanosecond types
    Types,
}

impl FeatureCategory {
    /// All categories in display order.
    pub const ALL: [Self; 8] = [
        Self::Core,
        Self::Deletes,
        Self::Schema,
        Self::Partitioning,
        Self::TimeTravel,
        Self::Performance,
        Self::Catalog,
        Self::Types,
    ];

    /// Wire tag.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Core => "core",
            Self::Deletes => "deletes",
            Self::Schema => "schema",
            Self::Partitioning => "partitioning",
            Self::TimeTravel => "time-travel",
            Self::Performance => "performance",
            Self::Catalog => "catalog",
            Self::Types => "types",
        }
    }
}

impl std::fmt::Display for FeatureCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A feature column in the support matrix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Feature {
    /// Unique identifier, the second segment of every support key
    pub id: String,
    /// Display name; free-text search matches against this
    pub name: String,
    pub category: FeatureCategory,
    /// Format version that introduced the feature
    pub introduced_in: SpecVersion,
    #[serde(default)]
    pub description: String,
}

impl Feature {
    /// Create a feature with an empty description.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        category: FeatureCategory,
        introduced_in: SpecVersion,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category,
            introduced_in,
            description: String::new(),
        }
    }

    /// Whether a support cell at `version` is meaningful for this feature.
    #[must_use]
    pub fn applies_to(&self, version: &SpecVersion) -> bool {
        *version >= self.introduced_in
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feature_wire_shape() {
        let json = r#"{
            "id": "variant-type",
            "name": "Variant Type",
            "category": "types",
            "introducedIn": "v3",
            "description": "Semi-structured variant column type"
        }"#;
        let feature: Feature = serde_json::from_str(json).unwrap();
        assert_eq!(feature.category, FeatureCategory::Types);
        assert_eq!(feature.introduced_in, SpecVersion::v3());
        assert!(feature.applies_to(&SpecVersion::v3()));
        assert!(!feature.applies_to(&SpecVersion::v2()));
    }

    #[test]
    fn test_category_tags_roundtrip_through_display() {
        for category in FeatureCategory::ALL {
            let json = format!("\"{category}\"");
            let parsed: FeatureCategory = serde_json::from_str(&json).unwrap();
            assert_eq!(parsed, category);
        }
    }

    #[test]
    fn test_unknown_category_rejected() {
        assert!(serde_json::from_str::<FeatureCategory>("\"streaming\"").is_err());
    }
}
