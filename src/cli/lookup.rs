//! Lookup command handler.

use super::{warn_unknown, CommonOptions};
use crate::model::SpecVersion;
use crate::pipeline::exit_codes;
use crate::reports::LookupReport;
use anyhow::Result;

/// Run the lookup command.
///
/// Unknown ids are not errors: the cell renders as `unknown` and a hint
/// is logged.
pub fn run_lookup(
    options: &CommonOptions,
    platform_id: &str,
    feature_id: &str,
    version: &SpecVersion,
) -> Result<i32> {
    let snapshot = options.load()?;
    let data = snapshot.data();

    if data.platform(platform_id).is_none() {
        warn_unknown("platform", platform_id, data.platforms().iter().map(|p| p.id.as_str()));
    }
    if data.feature(feature_id).is_none() {
        warn_unknown("feature", feature_id, data.features().iter().map(|f| f.id.as_str()));
    }
    if !data.has_version(version) {
        warn_unknown("version", version.as_str(), data.versions().iter().map(SpecVersion::as_str));
    }

    let report = LookupReport::build(data, platform_id, feature_id, version);
    options.emit(|reporter| reporter.generate_lookup_report(&report))?;
    Ok(exit_codes::SUCCESS)
}
