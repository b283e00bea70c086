//! Pipeline and CLI integration tests.
//!
//! These tests exercise the full load → query → report pipeline, error
//! handling paths, and CLI command handlers with the fixture data directory.

use iceberg_matrix::cli::{self, CommonOptions, GridArgs};
use iceberg_matrix::config::FilterDefaults;
use iceberg_matrix::pipeline::{exit_codes, load_snapshot, PipelineError};
use iceberg_matrix::reports::ReportFormat;
use iceberg_matrix::{
    analyze_completeness, compare_all_platforms, get_support_entry, verify_report, MergePolicy,
    SpecVersion, SupportLevel, TestRun,
};
use std::path::{Path, PathBuf};

// ============================================================================
// Test Fixtures
// ============================================================================

const FIXTURES_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures");

fn fixture_path(name: &str) -> PathBuf {
    Path::new(FIXTURES_DIR).join(name)
}

fn data_dir() -> PathBuf {
    fixture_path("data")
}

fn options(output: ReportFormat, out_dir: &tempfile::TempDir) -> CommonOptions {
    CommonOptions {
        data_dir: data_dir(),
        merge_policy: MergePolicy::Strict,
        output,
        output_file: Some(out_dir.path().join("report.out")),
        no_color: true,
        quiet: true,
    }
}

fn read_output(out_dir: &tempfile::TempDir) -> String {
    std::fs::read_to_string(out_dir.path().join("report.out")).expect("report written")
}

// ============================================================================
// Load Stage Tests
// ============================================================================

mod load_stage {
    use super::*;

    #[test]
    fn load_fixture_snapshot() {
        let snapshot = load_snapshot(&data_dir(), MergePolicy::Strict, true).expect("load");
        let ids: Vec<&str> = snapshot
            .data()
            .platforms()
            .iter()
            .map(|p| p.id.as_str())
            .collect();

        // partitions load in file-name order: aws, gcp, oss
        assert_eq!(ids, ["athena", "emr", "bigquery", "spark", "duckdb"]);
        assert_eq!(snapshot.data().features().len(), 10);
        assert_eq!(snapshot.stats.partitions, 3);
        assert!(snapshot.stats.is_disjoint());
        assert!(snapshot.stats.overwritten.is_empty());
    }

    #[test]
    fn load_missing_dir_is_pipeline_error() {
        let result = load_snapshot(Path::new("/nonexistent/matrix"), MergePolicy::Strict, true);
        assert!(matches!(result, Err(PipelineError::LoadFailed { .. })));
    }

    #[test]
    fn fixture_data_is_complete() {
        let snapshot = load_snapshot(&data_dir(), MergePolicy::Strict, true).expect("load");
        let report = analyze_completeness(snapshot.data());
        // 5 platforms x (8 v2 features x 2 versions + 2 v3 features)
        assert_eq!(report.expected, 90);
        assert!(report.is_complete());
        assert_eq!(report.not_applicable, 0);
    }
}

// ============================================================================
// Query Tests
// ============================================================================

mod queries {
    use super::*;

    #[test]
    fn lookup_fixture_cells() {
        let snapshot = load_snapshot(&data_dir(), MergePolicy::Strict, true).expect("load");
        let data = snapshot.data();

        let entry = get_support_entry(data, "athena", "time-travel", &SpecVersion::v2());
        assert_eq!(entry.level, SupportLevel::Full);
        assert!(entry.notes.contains("FOR TIMESTAMP AS OF"));

        let entry = get_support_entry(data, "bigquery", "variant-type", &SpecVersion::v2());
        assert_eq!(entry.level, SupportLevel::Unknown);
    }

    #[test]
    fn compare_v2_v3_per_platform() {
        let snapshot = load_snapshot(&data_dir(), MergePolicy::Strict, true).expect("load");
        let comparisons =
            compare_all_platforms(snapshot.data(), &SpecVersion::v2(), &SpecVersion::v3());

        let counts: Vec<(&str, usize, usize, usize)> = comparisons
            .iter()
            .map(|c| {
                (
                    c.platform_id.as_str(),
                    c.counts.gained,
                    c.counts.lost,
                    c.counts.changed,
                )
            })
            .collect();
        assert_eq!(
            counts,
            [
                ("athena", 1, 2, 0),
                ("emr", 0, 2, 1),
                ("bigquery", 0, 2, 1),
                ("spark", 0, 1, 2),
                ("duckdb", 0, 2, 0),
            ]
        );
    }

    #[test]
    fn verify_duckdb_run() {
        let snapshot = load_snapshot(&data_dir(), MergePolicy::Strict, true).expect("load");
        let run = TestRun::load(&fixture_path("runs/duckdb.json")).expect("run");
        assert!(run.metadata.contains_key("duckdb_version"));
        assert!(!run.metadata.contains_key("summary"));

        let report = verify_report(snapshot.data(), "duckdb", &run);
        assert_eq!(report.summary.total, 6);
        assert_eq!(report.summary.passed, 2);
        assert_eq!(report.summary.failed, 3);
        assert_eq!(report.summary.skipped, 1);
        assert_eq!(report.summary.discrepancies, 1);

        let discrepancies: Vec<&str> = report
            .discrepancies()
            .map(|t| t.record.feature_id.as_str())
            .collect();
        assert_eq!(discrepancies, ["position-deletes"]);
    }
}

// ============================================================================
// CLI Handler Tests
// ============================================================================

mod cli_handlers {
    use super::*;

    #[test]
    fn grid_markdown_with_highlight() {
        let out = tempfile::tempdir().unwrap();
        let args = GridArgs {
            versions: vec![SpecVersion::v2(), SpecVersion::v3()],
            platforms: vec!["duckdb".to_string()],
            levels: vec![SupportLevel::Partial],
            ..GridArgs::default()
        };
        let code = cli::run_grid(
            &options(ReportFormat::Markdown, &out),
            &FilterDefaults::default(),
            args,
        )
        .unwrap();
        assert_eq!(code, exit_codes::SUCCESS);

        let md = read_output(&out);
        assert!(md.contains("Variant Type"));
        assert!(md.contains("**"), "partial cells are highlighted");
    }

    #[test]
    fn grid_config_defaults_apply() {
        let out = tempfile::tempdir().unwrap();
        let defaults = FilterDefaults {
            versions: vec![SpecVersion::v2()],
            ..FilterDefaults::default()
        };
        cli::run_grid(&options(ReportFormat::Json, &out), &defaults, GridArgs::default()).unwrap();

        let value: serde_json::Value = serde_json::from_str(&read_output(&out)).unwrap();
        assert_eq!(value["versions"], serde_json::json!(["v2"]));
        assert_eq!(value["features"].as_array().unwrap().len(), 8);
    }

    #[test]
    fn validate_fixture_passes_strict() {
        let out = tempfile::tempdir().unwrap();
        let code = cli::run_validate(&options(ReportFormat::Csv, &out), true).unwrap();
        assert_eq!(code, exit_codes::SUCCESS);
        assert!(!read_output(&out).is_empty());
    }

    #[test]
    fn verify_fixture_reports_discrepancy() {
        let out = tempfile::tempdir().unwrap();
        let code = cli::run_verify(
            &options(ReportFormat::Markdown, &out),
            "duckdb",
            &fixture_path("runs/duckdb.json"),
        )
        .unwrap();
        assert_eq!(code, exit_codes::FINDINGS);
        assert!(read_output(&out).contains("## Discrepancies"));
    }

    #[test]
    fn compare_single_platform_table() {
        let out = tempfile::tempdir().unwrap();
        let code = cli::run_compare(
            &options(ReportFormat::Table, &out),
            &SpecVersion::v2(),
            &SpecVersion::v3(),
            Some("spark"),
        )
        .unwrap();
        assert_eq!(code, exit_codes::SUCCESS);
        let table = read_output(&out);
        assert!(table.contains("spark"));
        assert!(!table.contains("duckdb"));
    }
}
