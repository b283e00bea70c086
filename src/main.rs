//! iceberg-matrix: query an Iceberg platform support matrix

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use iceberg_matrix::{
    cli::{self, CommonOptions, GridArgs},
    config::{AppConfig, DataConfig, OutputConfig, Validatable},
    pipeline::exit_codes,
    FeatureCategory, MergePolicy, ReportFormat, SpecVersion, SupportLevel,
};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "iceberg-matrix")]
#[command(version)]
#[command(about = "Query, filter and compare the Iceberg platform support matrix", long_about = None)]
#[command(after_help = "EXIT CODES:
    0  Success
    1  Discrepancies, missing cells or an empty grid
    3  Error occurred

EXAMPLES:
    # Grid of v2 support for AWS services
    iceberg-matrix grid --version v2 --platform athena,emr,glue

    # Single cell
    iceberg-matrix lookup spark variant-type v3

    # What changes for every platform between v2 and v3
    iceberg-matrix compare v2 v3 -o markdown

    # Check a test harness run against the matrix
    iceberg-matrix verify spark results/spark.json")]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Disable colored output (also respects `NO_COLOR` env)
    #[arg(long, global = true)]
    no_color: bool,

    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory holding features.json and platforms/*.json
    #[arg(long, global = true, env = "ICEBERG_MATRIX_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// How to treat the same key defined by two partitions
    #[arg(long, global = true, value_enum)]
    merge_policy: Option<MergePolicy>,

    /// Output format (auto: table, or inferred from the output file extension)
    #[arg(short, long, global = true, value_enum)]
    output: Option<ReportFormat>,

    /// Output file path (stdout if not specified)
    #[arg(short = 'O', long, global = true)]
    output_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

// ============================================================================
// Command argument structs
// ============================================================================

/// Arguments for the `grid` subcommand
#[derive(Parser)]
struct GridCommand {
    /// Versions to show as columns (comma-separated, e.g. v2,v3)
    #[arg(long = "version", value_name = "VERSION", value_delimiter = ',')]
    versions: Vec<SpecVersion>,

    /// Platform ids to keep (comma-separated)
    #[arg(long = "platform", value_name = "ID", value_delimiter = ',')]
    platforms: Vec<String>,

    /// Feature categories to keep (comma-separated)
    #[arg(long = "category", value_name = "CATEGORY", value_enum, value_delimiter = ',')]
    categories: Vec<FeatureCategory>,

    /// Support levels to highlight (does not remove rows)
    #[arg(long = "level", value_name = "LEVEL", value_enum, value_delimiter = ',')]
    levels: Vec<SupportLevel>,

    /// Case-insensitive substring of the feature name
    #[arg(short, long)]
    search: Option<String>,
}

impl From<GridCommand> for GridArgs {
    fn from(cmd: GridCommand) -> Self {
        Self {
            versions: cmd.versions,
            platforms: cmd.platforms,
            categories: cmd.categories,
            levels: cmd.levels,
            search: cmd.search,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Render the filtered support grid
    Grid(GridCommand),

    /// Show the support entry of one platform, feature and version
    Lookup {
        /// Platform id, e.g. athena
        platform: String,
        /// Feature id, e.g. time-travel
        feature: String,
        /// Format version, e.g. v2
        version: SpecVersion,
    },

    /// Count features gained, lost and changed between two versions
    Compare {
        /// Baseline version
        version_a: SpecVersion,
        /// Target version
        version_b: SpecVersion,
        /// Compare only this platform
        #[arg(long)]
        platform: Option<String>,
    },

    /// Load the data directory, run integrity checks and report completeness
    Validate {
        /// Exit with code 1 when expected cells are missing
        #[arg(long)]
        fail_on_missing: bool,
    },

    /// Reconcile an engine test run with the matrix
    Verify {
        /// Platform the run was executed against
        platform: String,
        /// Test run JSON written by the feature test harness
        report: PathBuf,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Generate JSON Schema for the config file format (honours -O)
    ConfigSchema,

    /// Show, discover, or initialize configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Sub-subcommands for the `config` command
#[derive(Subcommand)]
enum ConfigAction {
    /// Print current effective configuration (merged from defaults + file + flags)
    Show,
    /// Print config file search paths and discovered config file
    Path,
    /// Generate an example .iceberg-matrix.yaml in the current directory
    Init,
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging; reports own stdout
    let log_level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "warn"
    } else {
        "info"
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| log_level.to_string()),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(io::stderr),
        )
        .init();

    let code = match run(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {err:#}");
            exit_codes::ERROR
        }
    };
    std::process::exit(code);
}

/// Layer CLI flags over the discovered config file.
fn effective_config(cli: &Cli) -> Result<(AppConfig, Option<PathBuf>)> {
    let overrides = AppConfig {
        data: DataConfig {
            dir: cli.data_dir.clone(),
            ..DataConfig::default()
        },
        output: OutputConfig {
            format: cli.output.unwrap_or_default(),
            file: cli.output_file.clone(),
            no_color: cli.no_color,
        },
        ..AppConfig::default()
    };
    let (mut config, loaded_from) =
        AppConfig::from_file_with_overrides(cli.config.as_deref(), &overrides)?;

    // Explicit flags win even when they name the default value
    if let Some(policy) = cli.merge_policy {
        config.data.merge_policy = policy;
    }
    if let Some(format) = cli.output {
        config.output.format = format;
    }

    if let Some(path) = &loaded_from {
        tracing::debug!("Using config file {}", path.display());
    }
    Ok((config, loaded_from))
}

fn run(cli: Cli) -> Result<i32> {
    let (config, loaded_from) = effective_config(&cli)?;

    if !matches!(cli.command, Commands::Config { .. }) {
        for error in config.validate() {
            tracing::warn!("Config: {error}");
        }
    }
    let options = CommonOptions::from_config(&config, cli.quiet);

    match cli.command {
        Commands::Grid(args) => cli::run_grid(&options, &config.filter, args.into()),

        Commands::Lookup {
            platform,
            feature,
            version,
        } => cli::run_lookup(&options, &platform, &feature, &version),

        Commands::Compare {
            version_a,
            version_b,
            platform,
        } => cli::run_compare(&options, &version_a, &version_b, platform.as_deref()),

        Commands::Validate { fail_on_missing } => cli::run_validate(&options, fail_on_missing),

        Commands::Verify { platform, report } => cli::run_verify(&options, &platform, &report),

        Commands::Completions { shell } => {
            generate(shell, &mut Cli::command(), "iceberg-matrix", &mut io::stdout());
            Ok(exit_codes::SUCCESS)
        }

        Commands::ConfigSchema => {
            let schema = iceberg_matrix::config::generate_json_schema()
                .context("failed to generate config schema")?;
            match cli.output_file {
                Some(path) => {
                    std::fs::write(&path, &schema)
                        .with_context(|| format!("failed to write {}", path.display()))?;
                    eprintln!("Schema written to {}", path.display());
                }
                None => println!("{schema}"),
            }
            Ok(exit_codes::SUCCESS)
        }

        Commands::Config { action } => match action {
            ConfigAction::Show => cli::run_config_show(&config, loaded_from.as_deref()),
            ConfigAction::Path => cli::run_config_path(cli.config.as_deref()),
            ConfigAction::Init => {
                let cwd = std::env::current_dir().context("cannot determine current directory")?;
                let path = cli::run_config_init(&cwd)?;
                eprintln!("Created {}", path.display());
                Ok(exit_codes::SUCCESS)
            }
        },
    }
}
