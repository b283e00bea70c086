//! Verify command handler.
//!
//! Implements the `verify` subcommand: reconcile an engine test run with
//! the matrix levels of one platform.

use super::CommonOptions;
use crate::pipeline::exit_codes;
use crate::verify::{verify_report, TestRun};
use anyhow::{Context, Result};
use std::path::Path;

/// Run the verify command.
///
/// Exits with [`exit_codes::FINDINGS`] when any outcome contradicts the
/// matrix or any test errored.
pub fn run_verify(options: &CommonOptions, platform_id: &str, run_path: &Path) -> Result<i32> {
    let run = TestRun::load(run_path)
        .with_context(|| format!("Failed to read test run {}", run_path.display()))?;
    let snapshot = options.load()?;
    let data = snapshot.data();

    let report = verify_report(data, platform_id, &run);
    if !options.quiet {
        tracing::info!(
            "Verified {} tests from {}: {} discrepancies",
            report.summary.total,
            run.engine.as_deref().unwrap_or("unnamed engine"),
            report.summary.discrepancies
        );
    }

    options.emit(|reporter| reporter.generate_verification_report(&report))?;

    if report.is_clean() {
        Ok(exit_codes::SUCCESS)
    } else {
        Ok(exit_codes::FINDINGS)
    }
}
