//! Support levels, support entries and the composite support key.

use super::SpecVersion;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::str::FromStr;
use std::sync::OnceLock;

/// Delimiter of the string form of [`SupportKey`].
pub const KEY_DELIMITER: char = ':';

/// How completely a platform implements a feature at a given version.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum SupportLevel {
    Full,
    Partial,
    None,
    #[default]
    Unknown,
}

impl SupportLevel {
    /// All levels in display order.
    pub const ALL: [Self; 4] = [Self::Full, Self::Partial, Self::None, Self::Unknown];

    /// Compact marker for terminal grids.
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::Full => "✓",
            Self::Partial => "◐",
            Self::None => "✗",
            Self::Unknown => "?",
        }
    }

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Full => "full",
            Self::Partial => "partial",
            Self::None => "none",
            Self::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for SupportLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A labelled reference link attached to a support entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceLink {
    pub label: String,
    pub url: String,
}

/// One cell of the support matrix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupportEntry {
    pub level: SupportLevel,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub caveats: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub links: Option<Vec<ReferenceLink>>,
}

impl SupportEntry {
    /// The canonical record returned for a lookup miss.
    pub const UNKNOWN: Self = Self {
        level: SupportLevel::Unknown,
        notes: String::new(),
        caveats: Vec::new(),
        links: None,
    };

    /// Entry with the given level and nothing else.
    #[must_use]
    pub const fn with_level(level: SupportLevel) -> Self {
        Self {
            level,
            notes: String::new(),
            caveats: Vec::new(),
            links: None,
        }
    }

    /// Attach notes.
    #[must_use]
    pub fn notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    /// Append a caveat.
    #[must_use]
    pub fn caveat(mut self, caveat: impl Into<String>) -> Self {
        self.caveats.push(caveat.into());
        self
    }
}

impl Default for SupportEntry {
    fn default() -> Self {
        Self::UNKNOWN
    }
}

// ============================================================================
// Composite key
// ============================================================================

/// Structured `(platform, feature, version)` key of a support entry.
///
/// Keys are compared structurally; the `platform:feature:version` string
/// form only appears at the JSON boundary, where it is reproduced exactly.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SupportKey {
    pub platform: String,
    pub feature: String,
    pub version: SpecVersion,
}

impl SupportKey {
    pub fn new(
        platform: impl Into<String>,
        feature: impl Into<String>,
        version: SpecVersion,
    ) -> Self {
        Self {
            platform: platform.into(),
            feature: feature.into(),
            version,
        }
    }
}

impl std::fmt::Display for SupportKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}{KEY_DELIMITER}{}{KEY_DELIMITER}{}",
            self.platform, self.feature, self.version
        )
    }
}

impl FromStr for SupportKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(KEY_DELIMITER).collect();
        match parts.as_slice() {
            [platform, feature, version]
                if !platform.is_empty() && !feature.is_empty() && !version.is_empty() =>
            {
                Ok(Self::new(*platform, *feature, SpecVersion::new(*version)))
            }
            _ => Err(format!(
                "malformed support key '{s}' (expected platform{KEY_DELIMITER}feature{KEY_DELIMITER}version)"
            )),
        }
    }
}

impl Serialize for SupportKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for SupportKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// String form of the key for `(platform, feature, version)`.
#[must_use]
pub fn support_key(platform_id: &str, feature_id: &str, version: &SpecVersion) -> String {
    SupportKey::new(platform_id, feature_id, version.clone()).to_string()
}

fn id_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(r"^[A-Za-z0-9][A-Za-z0-9._-]*$").ok())
        .as_ref()
}

/// Check that an id is usable as a key segment.
///
/// Ids start with an alphanumeric character and contain only
/// alphanumerics, `.`, `_` and `-`; in particular never the key delimiter.
pub fn validate_id(id: &str) -> Result<(), String> {
    if id.contains(KEY_DELIMITER) {
        return Err(format!("contains the key delimiter '{KEY_DELIMITER}'"));
    }
    if !id_pattern().is_some_and(|re| re.is_match(id)) {
        return Err("must match [A-Za-z0-9][A-Za-z0-9._-]*".to_string());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_string_form_is_exact() {
        let key = SupportKey::new("athena", "time-travel", SpecVersion::v2());
        assert_eq!(key.to_string(), "athena:time-travel:v2");
        assert_eq!(
            support_key("athena", "time-travel", &SpecVersion::v2()),
            "athena:time-travel:v2"
        );
    }

    #[test]
    fn test_key_parse() {
        let key: SupportKey = "spark:variant-type:v3".parse().unwrap();
        assert_eq!(key.platform, "spark");
        assert_eq!(key.feature, "variant-type");
        assert_eq!(key.version, SpecVersion::v3());

        assert!("spark:variant-type".parse::<SupportKey>().is_err());
        assert!("a:b:c:d".parse::<SupportKey>().is_err());
        assert!("::v2".parse::<SupportKey>().is_err());
    }

    #[test]
    fn test_key_as_json_map_key() {
        let json = r#"{"spark:read-support:v2": {"level": "full"}}"#;
        let map: std::collections::HashMap<SupportKey, SupportEntry> =
            serde_json::from_str(json).unwrap();
        let key = SupportKey::new("spark", "read-support", SpecVersion::v2());
        assert_eq!(map[&key].level, SupportLevel::Full);

        let back = serde_json::to_string(&map).unwrap();
        assert!(back.contains("\"spark:read-support:v2\""));
    }

    #[test]
    fn test_entry_defaults() {
        let entry: SupportEntry = serde_json::from_str(r#"{"level": "partial"}"#).unwrap();
        assert_eq!(entry.level, SupportLevel::Partial);
        assert!(entry.notes.is_empty());
        assert!(entry.caveats.is_empty());
        assert!(entry.links.is_none());

        let unknown = SupportEntry::default();
        assert_eq!(unknown, SupportEntry::UNKNOWN);
        assert_eq!(unknown.level, SupportLevel::Unknown);
    }

    #[test]
    fn test_invalid_level_rejected() {
        assert!(serde_json::from_str::<SupportEntry>(r#"{"level": "mostly"}"#).is_err());
        assert!(serde_json::from_str::<SupportEntry>(r#"{"notes": "no level"}"#).is_err());
    }

    #[test]
    fn test_validate_id() {
        assert!(validate_id("athena").is_ok());
        assert!(validate_id("aws-glue-catalog").is_ok());
        assert!(validate_id("spark_3.5").is_ok());
        assert!(validate_id("bad:id").is_err());
        assert!(validate_id("").is_err());
        assert!(validate_id("-leading").is_err());
        assert!(validate_id("has space").is_err());
    }
}
