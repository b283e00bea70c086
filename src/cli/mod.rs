//! CLI command handlers.
//!
//! This module provides testable command handlers that are invoked by main.rs.
//! Each handler implements the business logic for a specific CLI subcommand
//! and returns the process exit code; main.rs calls `std::process::exit()`.

mod compare;
mod config;
mod grid;
mod lookup;
mod validate;
mod verify;

pub use compare::run_compare;
pub use config::{run_config_init, run_config_path, run_config_show};
pub use grid::{run_grid, GridArgs};
pub use lookup::run_lookup;
pub use validate::run_validate;
pub use verify::run_verify;

use crate::config::AppConfig;
use crate::loader::MergePolicy;
use crate::pipeline::{load_snapshot, select_reporter, write_output, LoadedSnapshot, OutputTarget};
use crate::reports::{ReportError, ReportFormat, ReportGenerator};
use anyhow::Result;
use std::path::PathBuf;

/// Settings shared by every command that reads the data directory.
///
/// Resolved once in main.rs from the config file with CLI flags layered on
/// top.
#[derive(Debug, Clone)]
pub struct CommonOptions {
    pub data_dir: PathBuf,
    pub merge_policy: MergePolicy,
    pub output: ReportFormat,
    pub output_file: Option<PathBuf>,
    pub no_color: bool,
    pub quiet: bool,
}

impl CommonOptions {
    /// Options from an effective (already merged) configuration.
    #[must_use]
    pub fn from_config(config: &AppConfig, quiet: bool) -> Self {
        Self {
            data_dir: config.data.dir_or_default(),
            merge_policy: config.data.merge_policy,
            output: config.output.format,
            output_file: config.output.file.clone(),
            no_color: config.output.no_color,
            quiet,
        }
    }

    fn target(&self) -> OutputTarget {
        OutputTarget::from_option(self.output_file.clone())
    }

    fn load(&self) -> Result<LoadedSnapshot> {
        Ok(load_snapshot(&self.data_dir, self.merge_policy, self.quiet)?)
    }

    /// Render with the reporter for the configured format and write it out.
    fn emit<F>(&self, render: F) -> Result<()>
    where
        F: FnOnce(&dyn ReportGenerator) -> Result<String, ReportError>,
    {
        let target = self.target();
        let reporter = select_reporter(self.output, &target, self.no_color);
        let content = render(reporter.as_ref())?;
        write_output(&content, &target, self.quiet)
    }
}

/// Warn about an id that is not in `known`, with a "did you mean" hint.
fn warn_unknown<'a, I>(kind: &str, id: &str, known: I)
where
    I: IntoIterator<Item = &'a str>,
{
    match crate::lookup::suggest(id, known) {
        Some(candidate) => {
            tracing::warn!("Unknown {kind} '{id}' (did you mean '{candidate}'?)");
        }
        None => tracing::warn!("Unknown {kind} '{id}'"),
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    //! Writes a small data directory for handler tests.

    use crate::loader::{CATALOG_FILE, PLATFORMS_DIR};
    use tempfile::TempDir;

    pub const CATALOG: &str = r#"{
        "versions": ["v2", "v3"],
        "features": [
            {"id": "time-travel", "name": "Time Travel", "category": "time-travel",
             "description": "Query older snapshots", "introducedIn": "v2"},
            {"id": "variant-type", "name": "Variant Type", "category": "types",
             "description": "Semi-structured values", "introducedIn": "v3"}
        ]
    }"#;

    pub const SPARK: &str = r#"{
        "platforms": [
            {"id": "spark", "name": "Apache Spark", "vendor": "Apache",
             "category": "open-source", "group": "3rd-Party", "docsUrl": ""}
        ],
        "support": {
            "spark:time-travel:v2": {"level": "full", "notes": "", "caveats": []},
            "spark:time-travel:v3": {"level": "full", "notes": "", "caveats": []},
            "spark:variant-type:v3": {"level": "partial", "notes": "Read only", "caveats": []}
        }
    }"#;

    pub fn data_dir() -> TempDir {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join(CATALOG_FILE), CATALOG).unwrap();
        std::fs::create_dir(tmp.path().join(PLATFORMS_DIR)).unwrap();
        std::fs::write(tmp.path().join(PLATFORMS_DIR).join("spark.json"), SPARK).unwrap();
        tmp
    }

    pub fn options(dir: &TempDir, output: crate::reports::ReportFormat) -> super::CommonOptions {
        super::CommonOptions {
            data_dir: dir.path().to_path_buf(),
            merge_policy: crate::loader::MergePolicy::Strict,
            output,
            output_file: Some(dir.path().join("out.txt")),
            no_color: true,
            quiet: true,
        }
    }

    pub fn output(dir: &TempDir) -> String {
        std::fs::read_to_string(dir.path().join("out.txt")).unwrap()
    }
}
