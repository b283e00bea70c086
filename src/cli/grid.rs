//! Grid command handler.
//!
//! Implements the `grid` subcommand: filter the matrix and render it.

use super::{warn_unknown, CommonOptions};
use crate::config::FilterDefaults;
use crate::filter::{apply_filters, FilterState};
use crate::model::{CompatibilityData, FeatureCategory, SpecVersion, SupportLevel};
use crate::pipeline::exit_codes;
use crate::reports::GridReport;
use anyhow::Result;

/// Filter selections given on the command line.
///
/// A non-empty list replaces the matching config default; an empty list
/// keeps it.
#[derive(Debug, Clone, Default)]
pub struct GridArgs {
    pub versions: Vec<SpecVersion>,
    pub platforms: Vec<String>,
    pub categories: Vec<FeatureCategory>,
    pub levels: Vec<SupportLevel>,
    pub search: Option<String>,
}

impl GridArgs {
    fn into_filter_state(self, defaults: &FilterDefaults) -> FilterState {
        let mut state = defaults.to_filter_state();
        if !self.versions.is_empty() {
            state = state.with_versions(self.versions);
        }
        if !self.platforms.is_empty() {
            state = state.with_platforms(self.platforms);
        }
        if !self.categories.is_empty() {
            state = state.with_categories(self.categories);
        }
        if let Some(query) = self.search {
            state = state.with_search(query);
        }
        state.with_support_levels(self.levels)
    }
}

/// Run the grid command, returning the desired exit code.
///
/// An empty view still renders its "no data" state and exits with
/// [`exit_codes::FINDINGS`].
pub fn run_grid(options: &CommonOptions, defaults: &FilterDefaults, args: GridArgs) -> Result<i32> {
    let snapshot = options.load()?;
    let data = snapshot.data();
    let filter = args.into_filter_state(defaults);

    warn_unknown_selections(data, &filter);
    tracing::debug!("Applying filters: {}", filter.description());

    let view = apply_filters(data, &filter);
    let grid = GridReport {
        data,
        view: &view,
        filter: &filter,
    };
    options.emit(|reporter| reporter.generate_grid_report(&grid))?;

    if view.is_empty() {
        if !options.quiet {
            tracing::info!("No rows match: {}", filter.description());
        }
        return Ok(exit_codes::FINDINGS);
    }
    Ok(exit_codes::SUCCESS)
}

fn warn_unknown_selections(data: &CompatibilityData, filter: &FilterState) {
    for id in &filter.selected_platforms {
        if data.platform(id).is_none() {
            warn_unknown("platform", id, data.platforms().iter().map(|p| p.id.as_str()));
        }
    }
    for version in &filter.selected_versions {
        if !data.has_version(version) {
            warn_unknown("version", version.as_str(), data.versions().iter().map(SpecVersion::as_str));
        }
    }
}
