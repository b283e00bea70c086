//! Data model of the support matrix.
//!
//! Every type here is immutable once loaded. The composite
//! [`SupportKey`] is a structured tuple; its `platform:feature:version`
//! string form is only produced or parsed at the JSON boundary.

mod data;
mod feature;
mod platform;
mod support;
mod version;

pub use data::CompatibilityData;
pub use feature::{Feature, FeatureCategory};
pub use platform::{Platform, PlatformCategory, PlatformGroup};
pub use support::{
    support_key, validate_id, ReferenceLink, SupportEntry, SupportKey, SupportLevel,
    KEY_DELIMITER,
};
pub use version::SpecVersion;
