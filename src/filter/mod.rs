//! Filter engine for the support grid.

mod engine;
mod state;

pub use engine::{apply_filters, passes_version_gate, FilteredView, GridCell};
pub use state::FilterState;
