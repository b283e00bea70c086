//! Platforms: the engines and services that implement the table format.

use serde::{Deserialize, Serialize};

/// Whether a platform is a managed cloud service or an open-source engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PlatformCategory {
    Cloud,
    OpenSource,
}

impl std::fmt::Display for PlatformCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Cloud => write!(f, "cloud"),
            Self::OpenSource => write!(f, "open-source"),
        }
    }
}

/// Vendor grouping used to cluster platforms in the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlatformGroup {
    #[serde(rename = "AWS")]
    Aws,
    #[serde(rename = "GCP")]
    Gcp,
    Azure,
    Databricks,
    Snowflake,
    #[serde(rename = "3rd-Party")]
    ThirdParty,
}

impl std::fmt::Display for PlatformGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Aws => write!(f, "AWS"),
            Self::Gcp => write!(f, "GCP"),
            Self::Azure => write!(f, "Azure"),
            Self::Databricks => write!(f, "Databricks"),
            Self::Snowflake => write!(f, "Snowflake"),
            Self::ThirdParty => write!(f, "3rd-Party"),
        }
    }
}

/// A platform row in the support matrix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Platform {
    /// Unique identifier, also the first segment of every support key
    pub id: String,
    /// Display name
    pub name: String,
    /// Vendor name
    pub vendor: String,
    pub category: PlatformCategory,
    pub group: PlatformGroup,
    /// Vendor documentation for Iceberg support
    pub docs_url: String,
}

impl Platform {
    /// Create a platform with an empty documentation link.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        vendor: impl Into<String>,
        category: PlatformCategory,
        group: PlatformGroup,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            vendor: vendor.into(),
            category,
            group,
            docs_url: String::new(),
        }
    }
}
