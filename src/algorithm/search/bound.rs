//! Bound estimator
//!
//! Upper bounds on the number of traits a partial group can end up with.
//! Both strategies are admissible: they never report less than the best
//! completion actually reachable from the remaining pool, so pruning on
//! them never loses a qualifying group.

use smallvec::SmallVec;

use crate::algorithm::search::activation::FilteredUnit;
use crate::algorithm::search::counts::{TraitCounts, TraitIndex, carrier_counts};
use crate::config::BoundStrategy;

/// Loose bound over an arbitrary remaining pool
///
/// Traits already active count once; every other trait counts if its
/// current count plus all of its remaining carriers reaches the threshold,
/// regardless of how many picks are left.
#[must_use]
pub fn bound(counts: &TraitCounts, remaining: &[FilteredUnit], index: &TraitIndex) -> usize {
    let carriers = carrier_counts(remaining, index.len());
    loose_bound(counts.as_slice(), &carriers, index.thresholds())
}

/// Slot-capped bound over an arbitrary remaining pool
///
/// `slots` is the number of members still to be picked.
#[must_use]
pub fn slot_capped_bound(
    counts: &TraitCounts,
    remaining: &[FilteredUnit],
    slots: usize,
    index: &TraitIndex,
) -> usize {
    let carriers = carrier_counts(remaining, index.len());
    let mut sizes: SmallVec<[usize; 32]> = remaining.iter().map(|u| u.trait_ids().len()).collect();
    sizes.sort_unstable_by(|a, b| b.cmp(a));
    let capacity = sizes.iter().take(slots).sum();
    capped_bound(counts.as_slice(), &carriers, slots, capacity, index.thresholds())
}

/// Bound evaluation with precomputed carrier counts
///
/// Used by the engine, which keeps a suffix table of carriers and knows the
/// increment capacity of the next picks from the pool ordering.
#[derive(Debug, Clone, Copy)]
pub struct BoundEstimator<'a> {
    thresholds: &'a [u32],
    strategy: BoundStrategy,
}

impl<'a> BoundEstimator<'a> {
    /// Create an estimator over the given trait index
    #[must_use]
    pub fn new(index: &'a TraitIndex, strategy: BoundStrategy) -> Self {
        Self {
            thresholds: index.thresholds(),
            strategy,
        }
    }

    /// Strategy in use
    #[must_use]
    pub const fn strategy(&self) -> BoundStrategy {
        self.strategy
    }

    /// Estimate the best reachable active-trait count
    ///
    /// * `counts` - counts of the partial group
    /// * `carriers` - per-trait carrier counts of the remaining pool
    /// * `slots` - members still to pick
    /// * `capacity` - most trait increments `slots` remaining picks can add
    #[must_use]
    pub fn estimate(&self, counts: &[u32], carriers: &[u32], slots: usize, capacity: usize) -> usize {
        match self.strategy {
            BoundStrategy::Loose => loose_bound(counts, carriers, self.thresholds),
            BoundStrategy::SlotCapped => {
                capped_bound(counts, carriers, slots, capacity, self.thresholds)
            }
        }
    }
}

fn loose_bound(counts: &[u32], carriers: &[u32], thresholds: &[u32]) -> usize {
    counts
        .iter()
        .zip(carriers)
        .zip(thresholds)
        .filter(|((count, carried), threshold)| **count + **carried >= **threshold)
        .count()
}

fn capped_bound(
    counts: &[u32],
    carriers: &[u32],
    slots: usize,
    capacity: usize,
    thresholds: &[u32],
) -> usize {
    let mut active_now = 0;
    let mut deficits: SmallVec<[usize; 32]> = SmallVec::new();
    for ((&count, &carried), &threshold) in counts.iter().zip(carriers).zip(thresholds) {
        if count >= threshold {
            active_now += 1;
            continue;
        }
        let deficit = (threshold - count) as usize;
        if deficit <= slots && deficit <= carried as usize {
            deficits.push(deficit);
        }
    }

    // Cheapest deficits first maximises how many fit into the capacity
    deficits.sort_unstable();
    let mut budget = capacity;
    let mut reachable = 0;
    for deficit in deficits {
        if deficit > budget {
            break;
        }
        budget -= deficit;
        reachable += 1;
    }
    active_now + reachable
}
