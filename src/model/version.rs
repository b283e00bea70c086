//! Format specification versions (`v2`, `v3`, ...).

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::str::FromStr;

/// One element of the ordered, open-ended version enumeration.
///
/// Versions are written `v<N>` on the wire. Ordering follows the numeric
/// suffix so that `v10` sorts after `v9`; malformed values (which the loader
/// rejects) sort after every well-formed one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct SpecVersion(String);

impl SpecVersion {
    /// Wrap a version string without checking its shape.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Format version 2.
    #[must_use]
    pub fn v2() -> Self {
        Self::new("v2")
    }

    /// Format version 3.
    #[must_use]
    pub fn v3() -> Self {
        Self::new("v3")
    }

    /// The raw string form.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Numeric suffix, if the value is well formed.
    #[must_use]
    pub fn number(&self) -> Option<u32> {
        let digits = self.0.strip_prefix('v')?;
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        digits.parse().ok()
    }

    /// Whether the value has the `v<N>` shape.
    #[must_use]
    pub fn is_well_formed(&self) -> bool {
        self.number().is_some()
    }
}

impl Ord for SpecVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        let rank = |v: &Self| v.number().map_or((1, 0), |n| (0, n));
        rank(self)
            .cmp(&rank(other))
            .then_with(|| self.0.cmp(&other.0))
    }
}

impl PartialOrd for SpecVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl std::fmt::Display for SpecVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for SpecVersion {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let version = Self::new(s.trim().to_lowercase());
        if version.is_well_formed() {
            Ok(version)
        } else {
            Err(format!("invalid version '{s}' (expected v<N>, e.g. v2)"))
        }
    }
}

impl From<&str> for SpecVersion {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_ordering() {
        let mut versions = vec![
            SpecVersion::new("v10"),
            SpecVersion::v3(),
            SpecVersion::v2(),
        ];
        versions.sort();
        let names: Vec<&str> = versions.iter().map(SpecVersion::as_str).collect();
        assert_eq!(names, ["v2", "v3", "v10"]);
        assert!(SpecVersion::v3() > SpecVersion::v2());
    }

    #[test]
    fn test_malformed_sorts_last() {
        assert!(SpecVersion::new("latest") > SpecVersion::new("v99"));
        assert!(!SpecVersion::new("latest").is_well_formed());
    }

    #[test]
    fn test_from_str() {
        assert_eq!("V3".parse::<SpecVersion>().unwrap(), SpecVersion::v3());
        assert!("three".parse::<SpecVersion>().is_err());
        assert!("v".parse::<SpecVersion>().is_err());
        assert!("v+3".parse::<SpecVersion>().is_err());
    }

    #[test]
    fn test_serde_is_plain_string() {
        let json = serde_json::to_string(&SpecVersion::v2()).unwrap();
        assert_eq!(json, "\"v2\"");
        let back: SpecVersion = serde_json::from_str("\"v3\"").unwrap();
        assert_eq!(back, SpecVersion::v3());
    }
}
