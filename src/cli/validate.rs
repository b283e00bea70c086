//! Validate command handler.
//!
//! Implements the `validate` subcommand: load the data directory, run the
//! integrity checks and report completeness.

use super::CommonOptions;
use crate::integrity::analyze_completeness;
use crate::pipeline::exit_codes;
use crate::reports::ValidationReport;
use anyhow::Result;

/// Run the validate command.
///
/// Structural and integrity faults surface as errors from loading. Missing
/// cells are only a failure with `fail_on_missing`.
pub fn run_validate(options: &CommonOptions, fail_on_missing: bool) -> Result<i32> {
    let snapshot = options.load()?;
    let completeness = analyze_completeness(snapshot.data());

    if !options.quiet {
        tracing::info!(
            "Coverage {:.1}% ({} of {} expected cells)",
            completeness.coverage_percent(),
            completeness.present,
            completeness.expected
        );
    }
    for key in &snapshot.stats.orphans {
        tracing::warn!("Orphan entry ignored: {key}");
    }

    let missing = !completeness.is_complete();
    let report = ValidationReport {
        policy: snapshot.policy,
        stats: snapshot.stats.clone(),
        completeness,
    };
    options.emit(|reporter| reporter.generate_validation_report(&report))?;

    if fail_on_missing && missing {
        return Ok(exit_codes::FINDINGS);
    }
    Ok(exit_codes::SUCCESS)
}
