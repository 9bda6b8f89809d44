//! Synergy group search
//!
//! Finds every fixed-size group of units that activates at least a minimum
//! number of distinct traits. The pipeline is:
//!
//! 1. Activation filter: drop traits the whole catalog cannot activate and
//!    units left without traits, then order units by trait count
//! 2. Bound estimator: upper bound on reachable active traits for a
//!    partial group
//! 3. Search engine: depth-first branch-and-bound over combinations,
//!    produced lazily and cancellable
//!
//! Parallel exploration of top-level branches yields the same solution
//! sequence as the sequential engine.

pub mod activation;
pub mod bound;
pub mod cancel;
pub mod counts;
pub mod engine;
pub mod parallel;
pub mod solver;
pub mod types;
pub mod validation;

// Re-export key types
pub use activation::{FilteredPool, FilteredUnit, filter_units};
pub use bound::{BoundEstimator, bound, slot_capped_bound};
pub use cancel::CancellationToken;
pub use counts::{TraitCounts, TraitId, TraitIndex};
pub use engine::{Searcher, SolutionIter};
pub use parallel::run_parallel;
pub use solver::{find_valid_groups, find_valid_groups_with_token, prepare_pool, search, token_for};
pub use types::{SearchOutcome, SearchStats, SearchStatus, Solution, SolutionMember};
