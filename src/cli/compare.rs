//! Compare command handler.
//!
//! Implements the `compare` subcommand: per-platform gained/lost/changed
//! counts between two format versions.

use super::{warn_unknown, CommonOptions};
use crate::compare::{compare_all_platforms, compare_platform};
use crate::model::SpecVersion;
use crate::pipeline::exit_codes;
use anyhow::{bail, Result};

/// Run the compare command.
///
/// With `platform` set only that platform is compared, and an unknown id is
/// an error since an all-zero comparison would be misleading.
pub fn run_compare(
    options: &CommonOptions,
    version_a: &SpecVersion,
    version_b: &SpecVersion,
    platform: Option<&str>,
) -> Result<i32> {
    let snapshot = options.load()?;
    let data = snapshot.data();

    for version in [version_a, version_b] {
        if !data.has_version(version) {
            warn_unknown("version", version.as_str(), data.versions().iter().map(SpecVersion::as_str));
        }
    }

    let comparisons = match platform {
        Some(id) => {
            if data.platform(id).is_none() {
                let hint = crate::lookup::suggest(id, data.platforms().iter().map(|p| p.id.as_str()))
                    .map(|candidate| format!(" (did you mean '{candidate}'?)"))
                    .unwrap_or_default();
                bail!("Unknown platform '{id}'{hint}");
            }
            vec![compare_platform(data, id, version_a, version_b)]
        }
        None => compare_all_platforms(data, version_a, version_b),
    };

    let total: usize = comparisons.iter().map(|c| c.counts.total()).sum();
    tracing::debug!("{version_a} -> {version_b}: {total} differing cells");

    options.emit(|reporter| reporter.generate_comparison_report(&comparisons))?;
    Ok(exit_codes::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::test_support;
    use crate::reports::ReportFormat;

    #[test]
    fn test_compare_counts_gained_variant() {
        let dir = test_support::data_dir();
        let options = test_support::options(&dir, ReportFormat::Json);
        run_compare(&options, &SpecVersion::v2(), &SpecVersion::v3(), Some("spark")).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&test_support::output(&dir)).unwrap();
        let counts = &value["comparisons"][0]["counts"];
        // variant-type goes unknown -> partial
        assert_eq!(counts["changed"], 1);
        assert_eq!(counts["gained"], 0);
        assert_eq!(counts["lost"], 0);
    }

    #[test]
    fn test_compare_unknown_platform_suggests() {
        let dir = test_support::data_dir();
        let options = test_support::options(&dir, ReportFormat::Json);
        let err = run_compare(&options, &SpecVersion::v2(), &SpecVersion::v3(), Some("sparkk"))
            .unwrap_err();
        assert!(err.to_string().contains("did you mean 'spark'"));
    }
}
