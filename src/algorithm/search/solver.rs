//! End-to-end group search
//!
//! Validates the run configuration, derives the search pool and runs the
//! engine, sequentially or in parallel. Configuration errors are raised
//! before the engine explores a single combination.

use log::info;

use crate::algorithm::search::activation::{FilteredPool, filter_units};
use crate::algorithm::search::cancel::CancellationToken;
use crate::algorithm::search::engine::Searcher;
use crate::algorithm::search::parallel::run_parallel;
use crate::algorithm::search::types::SearchOutcome;
use crate::algorithm::search::validation::validate_config;
use crate::config::SearchConfig;
use crate::error::Result;
use crate::models::{Catalog, ThresholdTable};

/// Validate inputs and build the search pool
pub fn prepare_pool(
    catalog: &Catalog,
    thresholds: &ThresholdTable,
    config: &SearchConfig,
) -> Result<FilteredPool> {
    validate_config(config)?;
    catalog.validate()?;
    filter_units(catalog, thresholds, config.exclude_traitless_units)
}

/// Cancellation token honouring the configured time limit
#[must_use]
pub fn token_for(config: &SearchConfig) -> CancellationToken {
    config
        .time_limit
        .map_or_else(CancellationToken::new, CancellationToken::with_timeout)
}

/// Find every group of `config.group_size` units activating at least
/// `config.min_active_traits` traits
pub fn find_valid_groups(
    catalog: &Catalog,
    thresholds: &ThresholdTable,
    config: &SearchConfig,
) -> Result<SearchOutcome> {
    find_valid_groups_with_token(catalog, thresholds, config, &token_for(config))
}

/// [`find_valid_groups`] with a caller-supplied cancellation token
///
/// The token is used as given; `config.time_limit` is not applied on top.
pub fn find_valid_groups_with_token(
    catalog: &Catalog,
    thresholds: &ThresholdTable,
    config: &SearchConfig,
    token: &CancellationToken,
) -> Result<SearchOutcome> {
    let pool = prepare_pool(catalog, thresholds, config)?;
    search(&pool, config, token)
}

/// Run the engine over an already filtered pool
pub fn search(
    pool: &FilteredPool,
    config: &SearchConfig,
    token: &CancellationToken,
) -> Result<SearchOutcome> {
    let searcher = Searcher::new(pool, config)?;
    if pool.len() < config.group_size {
        info!(
            "Pool of {} units is smaller than the group size {}; nothing to search",
            pool.len(),
            config.group_size
        );
        return Ok(SearchOutcome::empty());
    }

    if config.use_parallel {
        Ok(run_parallel(&searcher, token))
    } else {
        Ok(searcher.run(token))
    }
}
