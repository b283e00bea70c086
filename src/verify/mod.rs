//! Reconciling engine feature-test runs against the support matrix.
//!
//! Engine test harnesses write a JSON report with one record per feature
//! they exercised. Each record's outcome is checked against the level the
//! matrix claims for that platform, feature and version:
//!
//! - `skip` and `error` always match (nothing was proven either way)
//! - `pass` matches `full` or `partial`
//! - `fail` matches `none` only; a failure against an `unknown` cell is
//!   reported so the gap gets filled in
//!
//! Anything else is a discrepancy.

use crate::error::{ErrorContext, MatrixError, Result};
use crate::lookup::get_support_entry;
use crate::model::{CompatibilityData, SpecVersion, SupportLevel};
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Outcome of one engine test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TestOutcome {
    Pass,
    Fail,
    Skip,
    Error,
}

impl TestOutcome {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pass => "pass",
            Self::Fail => "fail",
            Self::Skip => "skip",
            Self::Error => "error",
        }
    }
}

impl std::fmt::Display for TestOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether a test outcome agrees with a matrix level.
#[must_use]
pub const fn outcome_matches(outcome: TestOutcome, level: SupportLevel) -> bool {
    match outcome {
        TestOutcome::Skip | TestOutcome::Error => true,
        TestOutcome::Pass => matches!(level, SupportLevel::Full | SupportLevel::Partial),
        TestOutcome::Fail => matches!(level, SupportLevel::None),
    }
}

fn default_tested_version() -> SpecVersion {
    SpecVersion::v2()
}

/// One record of a test run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestRecord {
    pub feature_id: String,
    #[serde(default)]
    pub feature_name: String,
    /// Version the harness tested against; harnesses default to v2
    #[serde(default = "default_tested_version")]
    pub version: SpecVersion,
    pub result: TestOutcome,
    #[serde(default)]
    pub details: String,
}

/// A parsed test-run report.
///
/// Harness-specific metadata (engine version strings and the like) is kept
/// in `metadata` and otherwise ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TestRun {
    #[serde(default)]
    pub engine: Option<String>,
    #[serde(default)]
    pub timestamp: Option<String>,
    pub tests: Vec<TestRecord>,
    #[serde(flatten)]
    pub metadata: IndexMap<String, serde_json::Value>,
}

impl TestRun {
    /// Parse a run from JSON text.
    pub fn from_json_str(content: &str) -> Result<Self> {
        let mut run: Self = serde_json::from_str(content).context("parsing test run")?;
        // Harnesses also write their own summary; it is recomputed.
        run.metadata.shift_remove("summary");
        Ok(run)
    }

    /// Read and parse a run from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| MatrixError::io(path, e))?;
        Self::from_json_str(&content).with_context(|| format!("reading {}", path.display()))
    }
}

/// A test record paired with the matrix level it was checked against.
#[derive(Debug, Clone, Serialize)]
pub struct VerifiedTest {
    #[serde(flatten)]
    pub record: TestRecord,
    pub matrix_level: SupportLevel,
    #[serde(rename = "match")]
    pub matches: bool,
}

/// Outcome counters of a verification.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct VerificationSummary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub skipped: usize,
    pub errors: usize,
    pub discrepancies: usize,
}

/// Result of reconciling one test run against the matrix.
#[derive(Debug, Clone, Serialize)]
pub struct VerificationReport {
    pub platform_id: String,
    pub engine: Option<String>,
    /// Timestamp written by the harness, if any
    pub run_timestamp: Option<String>,
    pub verified_at: DateTime<Utc>,
    pub tests: Vec<VerifiedTest>,
    pub summary: VerificationSummary,
}

impl VerificationReport {
    /// No discrepancies and no errored tests.
    #[must_use]
    pub const fn is_clean(&self) -> bool {
        self.summary.discrepancies == 0 && self.summary.errors == 0
    }

    /// Tests whose outcome contradicts the matrix.
    pub fn discrepancies(&self) -> impl Iterator<Item = &VerifiedTest> {
        self.tests.iter().filter(|t| !t.matches)
    }
}

/// Check every record of `run` against the matrix entries of `platform_id`.
pub fn verify_report(data: &CompatibilityData, platform_id: &str, run: &TestRun) -> VerificationReport {
    if data.platform(platform_id).is_none() {
        tracing::warn!(
            platform = platform_id,
            "platform not in matrix, every level resolves to unknown"
        );
    }

    let mut summary = VerificationSummary {
        total: run.tests.len(),
        ..VerificationSummary::default()
    };

    let tests = run
        .tests
        .iter()
        .map(|record| {
            match record.result {
                TestOutcome::Pass => summary.passed += 1,
                TestOutcome::Fail => summary.failed += 1,
                TestOutcome::Skip => summary.skipped += 1,
                TestOutcome::Error => summary.errors += 1,
            }

            if data.feature(&record.feature_id).is_none() {
                tracing::debug!(feature = %record.feature_id, "tested feature not in catalog");
            }

            let matrix_level =
                get_support_entry(data, platform_id, &record.feature_id, &record.version).level;
            let matches = outcome_matches(record.result, matrix_level);
            if !matches {
                summary.discrepancies += 1;
            }

            VerifiedTest {
                record: record.clone(),
                matrix_level,
                matches,
            }
        })
        .collect();

    tracing::info!(
        platform = platform_id,
        total = summary.total,
        discrepancies = summary.discrepancies,
        "verified test run"
    );

    VerificationReport {
        platform_id: platform_id.to_string(),
        engine: run.engine.clone(),
        run_timestamp: run.timestamp.clone(),
        verified_at: Utc::now(),
        tests,
        summary,
    }
}
