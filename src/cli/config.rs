//! Config command handlers (`config show|path|init`).

use crate::config::{
    config_search_paths, discover_config_file, write_example_config, AppConfig, Validatable,
    CONFIG_FILE_NAMES,
};
use crate::pipeline::exit_codes;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Print the effective configuration as YAML.
///
/// Validation problems are reported on stderr and turn the exit code into
/// [`exit_codes::FINDINGS`].
pub fn run_config_show(config: &AppConfig, loaded_from: Option<&Path>) -> Result<i32> {
    match loaded_from {
        Some(path) => eprintln!("# Loaded from: {}", path.display()),
        None => eprintln!("# No config file found; showing defaults"),
    }
    let yaml = serde_yaml::to_string(config).context("failed to serialize config")?;
    print!("{yaml}");

    let errors = config.validate();
    for error in &errors {
        eprintln!("# invalid: {error}");
    }
    Ok(if errors.is_empty() {
        exit_codes::SUCCESS
    } else {
        exit_codes::FINDINGS
    })
}

/// Print the config search paths and the active file.
pub fn run_config_path(explicit: Option<&Path>) -> Result<i32> {
    eprintln!("Config file search paths (in order):");
    for path in config_search_paths() {
        eprintln!("  {}", path.display());
    }
    eprintln!();
    eprintln!("Recognized file names:");
    for name in CONFIG_FILE_NAMES {
        eprintln!("  {name}");
    }
    eprintln!();
    match discover_config_file(explicit) {
        Some(path) => eprintln!("Active config file: {}", path.display()),
        None => eprintln!("No config file found."),
    }
    Ok(exit_codes::SUCCESS)
}

/// Write an example `.iceberg-matrix.yaml` into `dir`.
pub fn run_config_init(dir: &Path) -> Result<PathBuf> {
    let target = dir.join(CONFIG_FILE_NAMES[0]);
    write_example_config(&target)
        .with_context(|| format!("failed to initialize {}", target.display()))?;
    Ok(target)
}
