//! A Rust library for finding groups of units whose shared traits activate
//! the most synergies, using an exhaustive branch-and-bound search.

pub mod algorithm;
pub mod config;
pub mod error;
pub mod loader;
pub mod models;
pub mod utils;

// Re-export the most common types for easier use
// Core types
pub use config::{BoundStrategy, SearchConfig, SearchConfigBuilder};
pub use error::{Result, SynergyError};
pub use models::{Catalog, ThresholdTable, Unit};

// Search
pub use algorithm::search::{
    CancellationToken, FilteredPool, FilteredUnit, SearchOutcome, SearchStats, SearchStatus,
    Searcher, Solution, SolutionIter, SolutionMember, filter_units, find_valid_groups,
    find_valid_groups_with_token,
};

// Loading and persistence
pub use loader::{load_thresholds, load_units};
pub use utils::io::{results_path, write_solutions};
