//! **Query engine for an Apache Iceberg platform support matrix.**
//!
//! `iceberg-matrix` loads a snapshot of which platforms (cloud services and
//! open-source engines) support which Iceberg table-format features at which
//! format version, and answers questions about it: filtered grids, point
//! lookups, version-to-version comparisons, completeness checks and
//! reconciliation of engine test runs against the recorded levels.
//!
//! ## Core Concepts & Modules
//!
//! - **[`model`]**: the snapshot, [`CompatibilityData`], and its parts.
//!   Support cells are keyed by a structured [`SupportKey`] whose string
//!   form is `platform:feature:version`.
//! - **[`loader`]**: reads `features.json` plus one JSON partition per
//!   vendor and merges them with the [`Aggregator`] under a [`MergePolicy`].
//! - **[`filter`]**: [`apply_filters`] narrows platforms and features by a
//!   [`FilterState`], including version-introduction gating.
//! - **[`lookup`]**: [`get_support_entry`] never fails; misses yield the
//!   canonical `unknown` entry.
//! - **[`compare`]**: gained/lost/changed counts between two versions.
//! - **[`integrity`]** and **[`verify`]**: completeness analysis and test-run
//!   reconciliation.
//! - **[`reports`]**: table, JSON, CSV and Markdown renderers.
//!
//! ## Getting Started
//!
//! ```no_run
//! use std::path::Path;
//! use iceberg_matrix::{apply_filters, load_data_dir, FilterState, MergePolicy, SpecVersion};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let data = load_data_dir(Path::new("data"), MergePolicy::Strict)?;
//!
//!     let filter = FilterState::new()
//!         .with_versions([SpecVersion::v2()])
//!         .with_search("time");
//!     let view = apply_filters(&data, &filter);
//!
//!     for feature in &view.features {
//!         println!("{} ({})", feature.name, feature.category);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ### Comparing Versions
//!
//! ```no_run
//! use std::path::Path;
//! use iceberg_matrix::{compute_comparison, load_data_dir, MergePolicy, SpecVersion};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let data = load_data_dir(Path::new("data"), MergePolicy::Strict)?;
//!     let counts = compute_comparison(&data, "spark", &SpecVersion::v2(), &SpecVersion::v3());
//!     println!("gained {} lost {} changed {}", counts.gained, counts.lost, counts.changed);
//!     Ok(())
//! }
//! ```
//!
//! ## Command-Line Interface (CLI)
//!
//! The `iceberg-matrix` binary wraps these operations in the `grid`,
//! `lookup`, `compare`, `validate` and `verify` subcommands.

// Lint to discourage unwrap() in production code - prefer explicit error handling
#![warn(clippy::unwrap_used)]
#![allow(
    // Coverage percentages are computed from bounded cell counts
    clippy::cast_precision_loss,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions
)]

pub mod cli;
pub mod compare;
pub mod config;
pub mod error;
pub mod filter;
pub mod integrity;
pub mod loader;
pub mod lookup;
pub mod model;
pub mod pipeline;
pub mod reports;
pub mod utils;
pub mod verify;

// Re-export main types for convenience
pub use compare::{
    compare_all_platforms, compare_features, compute_comparison, ChangeKind, ComparisonCounts,
    FeatureChange, PlatformComparison,
};
pub use config::{AppConfig, ConfigError, Validatable};
pub use error::{ErrorContext, MatrixError, Result};
pub use filter::{apply_filters, FilterState, FilteredView, GridCell};
pub use integrity::{analyze_completeness, CompletenessReport};
pub use loader::{load_data_dir, Aggregator, FeatureCatalog, MergePolicy, MergeStats, VendorPartition};
pub use lookup::get_support_entry;
pub use model::{
    CompatibilityData, Feature, FeatureCategory, Platform, PlatformCategory, PlatformGroup,
    SpecVersion, SupportEntry, SupportKey, SupportLevel,
};
pub use reports::{ReportFormat, ReportGenerator};
pub use verify::{verify_report, TestOutcome, TestRun, VerificationReport};
