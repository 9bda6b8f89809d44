//! Parallel search
//!
//! Explores the top-level branches (the choice of first member) on the
//! Rayon thread pool. Every branch owns its iterator and trait counts, and
//! branch results are concatenated in first-member order, so the output is
//! identical to the sequential engine.

use std::time::Instant;

use log::info;
use rayon::prelude::*;

use crate::algorithm::search::cancel::CancellationToken;
use crate::algorithm::search::counts::TraitCounts;
use crate::algorithm::search::engine::{Searcher, log_outcome};
use crate::algorithm::search::types::{SearchOutcome, SearchStats, SearchStatus, Solution};
use crate::utils::logging::progress;

struct BranchResult {
    solutions: Vec<Solution>,
    status: SearchStatus,
    stats: SearchStats,
}

/// Run the search with one task per first member
#[must_use]
pub fn run_parallel(searcher: &Searcher<'_>, token: &CancellationToken) -> SearchOutcome {
    let start = Instant::now();
    let pool = searcher.pool();
    let mut stats = SearchStats {
        nodes_visited: 1,
        ..SearchStats::default()
    };

    if token.is_cancelled() {
        stats.elapsed = start.elapsed();
        return SearchOutcome {
            solutions: Vec::new(),
            status: SearchStatus::Cancelled,
            stats,
        };
    }

    let root = TraitCounts::new(pool.trait_index().len());
    if !searcher.may_qualify(&root, 0, 0) {
        stats.branches_pruned = 1;
        stats.elapsed = start.elapsed();
        info!("Root bound below target; no group can qualify");
        return SearchOutcome {
            solutions: Vec::new(),
            status: SearchStatus::Complete,
            stats,
        };
    }

    // may_qualify guarantees pool.len() >= group_size
    let branch_count = pool.len() - searcher.group_size() + 1;
    info!(
        "Using parallel processing with {} threads over {branch_count} top-level branches",
        rayon::current_num_threads()
    );

    let (mp, main_pb) = progress::create_multi_progress(
        branch_count as u64,
        Some("Exploring top-level branches"),
        searcher.show_progress(),
    );

    let results: Vec<BranchResult> = (0..branch_count)
        .into_par_iter()
        .map(|first| {
            let mut iter = searcher.branch(first, token.clone());
            let solutions: Vec<Solution> = iter.by_ref().collect();
            main_pb.inc(1);
            BranchResult {
                solutions,
                status: iter.status().unwrap_or(SearchStatus::Complete),
                stats: iter.stats(),
            }
        })
        .collect();

    let mut solutions = Vec::with_capacity(results.iter().map(|r| r.solutions.len()).sum());
    let mut status = SearchStatus::Complete;
    for result in results {
        if result.status == SearchStatus::Cancelled {
            status = SearchStatus::Cancelled;
        }
        stats.absorb(&result.stats);
        solutions.extend(result.solutions);
    }
    stats.elapsed = start.elapsed();

    progress::finish_progress_bar(&main_pb, Some("Search complete"));
    drop(mp);
    log_outcome(&stats, solutions.len(), status);

    SearchOutcome {
        solutions,
        status,
        stats,
    }
}
