//! Branch-and-bound search engine
//!
//! Enumerates every combination of `group_size` pool units in increasing
//! index order. Each node first checks the cancellation token, then either
//! evaluates a full group or asks the bound estimator whether any
//! completion could still reach the activation target.
//!
//! The traversal is an explicit stack driven by [`SolutionIter`], so
//! solutions are produced lazily. The trait-count accumulator is pushed
//! when a unit joins the group and popped when the engine backtracks; it is
//! owned by the iterator and never shared.

use std::time::Instant;

use log::{info, warn};
use smallvec::SmallVec;

use crate::algorithm::search::activation::FilteredPool;
use crate::algorithm::search::bound::BoundEstimator;
use crate::algorithm::search::cancel::CancellationToken;
use crate::algorithm::search::counts::{SuffixCarriers, TraitCounts};
use crate::algorithm::search::types::{
    SearchOutcome, SearchStats, SearchStatus, Solution, SolutionMember,
};
use crate::algorithm::search::validation::validate_parameters;
use crate::config::{BoundStrategy, SearchConfig};
use crate::error::Result;
use crate::utils::logging::progress;

/// Search over one filtered pool with fixed parameters
#[derive(Debug)]
pub struct Searcher<'p> {
    pool: &'p FilteredPool,
    carriers: SuffixCarriers,
    estimator: BoundEstimator<'p>,
    group_size: usize,
    min_active_traits: usize,
    show_progress: bool,
}

impl<'p> Searcher<'p> {
    /// Prepare a search; fails if group size or target is zero
    pub fn new(pool: &'p FilteredPool, config: &SearchConfig) -> Result<Self> {
        Self::with_parameters(
            pool,
            config.group_size,
            config.min_active_traits,
            config.bound_strategy,
        )
        .map(|searcher| Self {
            show_progress: config.show_progress,
            ..searcher
        })
    }

    /// Prepare a search from explicit parameters
    pub fn with_parameters(
        pool: &'p FilteredPool,
        group_size: usize,
        min_active_traits: usize,
        strategy: BoundStrategy,
    ) -> Result<Self> {
        validate_parameters(group_size, min_active_traits)?;
        let index = pool.trait_index();
        Ok(Self {
            pool,
            carriers: SuffixCarriers::build(pool.units(), index.len()),
            estimator: BoundEstimator::new(index, strategy),
            group_size,
            min_active_traits,
            show_progress: false,
        })
    }

    /// The pool being searched
    #[must_use]
    pub const fn pool(&self) -> &'p FilteredPool {
        self.pool
    }

    /// Number of members per group
    #[must_use]
    pub const fn group_size(&self) -> usize {
        self.group_size
    }

    /// Active traits a group needs to qualify
    #[must_use]
    pub const fn min_active_traits(&self) -> usize {
        self.min_active_traits
    }

    pub(crate) const fn show_progress(&self) -> bool {
        self.show_progress
    }

    /// Lazily enumerate qualifying groups
    #[must_use]
    pub fn solutions(&self, token: CancellationToken) -> SolutionIter<'_> {
        SolutionIter::root(self, token)
    }

    /// Enumerate the groups whose first member is `pool[first]`
    ///
    /// Concatenating the branches for `first = 0, 1, ...` yields the same
    /// sequence as [`Searcher::solutions`] without the root bound check.
    #[must_use]
    pub fn branch(&self, first: usize, token: CancellationToken) -> SolutionIter<'_> {
        SolutionIter::with_first(self, first, token)
    }

    /// Run the search to completion or cancellation on the current thread
    #[must_use]
    pub fn run(&self, token: &CancellationToken) -> SearchOutcome {
        let start = Instant::now();
        let mut stats = SearchStats::default();
        info!(
            "Searching {} units for groups of {} with at least {} active traits ({} bound)",
            self.pool.len(),
            self.group_size,
            self.min_active_traits,
            self.estimator.strategy()
        );

        let spinner = if self.show_progress {
            progress::create_spinner(Some("Searching groups"))
        } else {
            progress::hidden()
        };

        let mut iter = self.solutions(token.clone());
        let mut solutions = Vec::new();
        for solution in iter.by_ref() {
            solutions.push(solution);
            if solutions.len() % 1000 == 0 {
                spinner.set_message(format!("Found {} groups", solutions.len()));
            }
        }

        let status = iter.status().unwrap_or(SearchStatus::Complete);
        stats.absorb(&iter.stats());
        stats.elapsed = start.elapsed();
        progress::finish_progress_bar(
            &spinner,
            Some(&format!("Found {} groups", solutions.len())),
        );
        log_outcome(&stats, solutions.len(), status);

        SearchOutcome {
            solutions,
            status,
            stats,
        }
    }

    /// Whether a node at `start` with the given counts can still qualify
    pub(crate) fn may_qualify(&self, counts: &TraitCounts, start: usize, members: usize) -> bool {
        let slots = self.group_size - members;
        if self.pool.len() - start < slots {
            return false;
        }
        let capacity = self.pool.units()[start..start + slots]
            .iter()
            .map(|u| u.trait_ids().len())
            .sum();
        self.estimator.estimate(
            counts.as_slice(),
            self.carriers.row(start),
            slots,
            capacity,
        ) >= self.min_active_traits
    }

    fn build_solution(&self, members: &[usize], counts: &TraitCounts) -> Solution {
        let index = self.pool.trait_index();
        Solution {
            members: members
                .iter()
                .map(|&i| {
                    let unit = &self.pool.units()[i];
                    SolutionMember {
                        name: unit.name().to_string(),
                        traits: unit.traits().to_vec(),
                    }
                })
                .collect(),
            active_traits: counts
                .active_traits(index)
                .into_iter()
                .map(|id| index.label(id).to_string())
                .collect(),
        }
    }
}

pub(crate) fn log_outcome(stats: &SearchStats, found: usize, status: SearchStatus) {
    let secs = stats.elapsed.as_secs_f64();
    match status {
        SearchStatus::Complete => info!(
            "Search complete: {} groups found, {} nodes visited, {} pruned in {:.2?} ({:.0} nodes/sec)",
            found,
            stats.nodes_visited,
            stats.branches_pruned,
            stats.elapsed,
            if secs > 0.0 { stats.nodes_visited as f64 / secs } else { 0.0 }
        ),
        SearchStatus::Cancelled => warn!(
            "Search cancelled after {:.2?}: {} groups found so far, {} nodes visited",
            stats.elapsed, found, stats.nodes_visited
        ),
    }
}

enum Node {
    Emit(Solution),
    Closed,
    Opened,
    Cancelled,
}

/// Lazy sequence of qualifying groups
///
/// Not restartable: once exhausted or cancelled it keeps returning `None`.
/// [`SolutionIter::status`] tells the two apart.
#[derive(Debug)]
pub struct SolutionIter<'s> {
    searcher: &'s Searcher<'s>,
    token: CancellationToken,
    counts: TraitCounts,
    members: SmallVec<[usize; 8]>,
    // Next candidate index of every open node, innermost last
    frames: SmallVec<[usize; 8]>,
    // Members fixed before the traversal started
    base_depth: usize,
    pending: Option<usize>,
    status: Option<SearchStatus>,
    stats: SearchStats,
}

impl<'s> SolutionIter<'s> {
    fn root(searcher: &'s Searcher<'s>, token: CancellationToken) -> Self {
        Self {
            searcher,
            token,
            counts: TraitCounts::new(searcher.pool.trait_index().len()),
            members: SmallVec::new(),
            frames: SmallVec::new(),
            base_depth: 0,
            pending: Some(0),
            status: None,
            stats: SearchStats::default(),
        }
    }

    fn with_first(searcher: &'s Searcher<'s>, first: usize, token: CancellationToken) -> Self {
        let mut iter = Self::root(searcher, token);
        match searcher.pool.units().get(first) {
            Some(unit) => {
                iter.counts.add(unit.trait_ids());
                iter.members.push(first);
                iter.base_depth = 1;
                iter.pending = Some(first + 1);
            }
            None => {
                iter.pending = None;
                iter.status = Some(SearchStatus::Complete);
            }
        }
        iter
    }

    /// `None` while running, then how the traversal ended
    #[must_use]
    pub const fn status(&self) -> Option<SearchStatus> {
        self.status
    }

    /// Counters so far
    #[must_use]
    pub const fn stats(&self) -> SearchStats {
        self.stats
    }

    fn enter(&mut self, start: usize) -> Node {
        self.stats.nodes_visited += 1;
        if self.token.is_cancelled() {
            return Node::Cancelled;
        }

        let searcher = self.searcher;
        if self.members.len() == searcher.group_size {
            self.stats.groups_evaluated += 1;
            let active = self.counts.active_count(searcher.pool.trait_index());
            if active >= searcher.min_active_traits {
                return Node::Emit(searcher.build_solution(&self.members, &self.counts));
            }
            return Node::Closed;
        }

        if !searcher.may_qualify(&self.counts, start, self.members.len()) {
            self.stats.branches_pruned += 1;
            return Node::Closed;
        }

        self.frames.push(start);
        Node::Opened
    }

    /// Advance the innermost open node to its next candidate.
    /// Returns false once every node is exhausted.
    fn advance(&mut self) -> bool {
        let searcher = self.searcher;
        let units = searcher.pool.units();
        loop {
            let Some(&next) = self.frames.last() else {
                return false;
            };
            let depth = self.base_depth + self.frames.len() - 1;
            if self.members.len() > depth {
                if let Some(previous) = self.members.pop() {
                    self.counts.remove(units[previous].trait_ids());
                }
            }

            let slots = searcher.group_size - self.members.len();
            if next >= units.len() || units.len() - next < slots {
                self.frames.pop();
                continue;
            }

            if let Some(frame) = self.frames.last_mut() {
                *frame = next + 1;
            }
            self.members.push(next);
            self.counts.add(units[next].trait_ids());
            self.pending = Some(next + 1);
            return true;
        }
    }
}

impl Iterator for SolutionIter<'_> {
    type Item = Solution;

    fn next(&mut self) -> Option<Solution> {
        if self.status.is_some() {
            return None;
        }
        loop {
            if let Some(start) = self.pending.take() {
                match self.enter(start) {
                    Node::Emit(solution) => return Some(solution),
                    Node::Closed | Node::Opened => {}
                    Node::Cancelled => {
                        self.status = Some(SearchStatus::Cancelled);
                        return None;
                    }
                }
            }
            if !self.advance() {
                self.status = Some(SearchStatus::Complete);
                return None;
            }
        }
    }
}
