//! Shared counting utilities
//!
//! Traits are interned to dense integer ids so that per-group counts and
//! per-suffix carrier counts are plain vectors indexed by id.

use rustc_hash::FxHashMap;

use crate::algorithm::search::activation::FilteredUnit;

/// Dense identifier of an interned trait
pub type TraitId = usize;

/// Interned trait labels with their activation thresholds
#[derive(Debug, Clone, Default)]
pub struct TraitIndex {
    labels: Vec<String>,
    thresholds: Vec<u32>,
    ids: FxHashMap<String, TraitId>,
}

impl TraitIndex {
    /// Create an empty index
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Intern a trait, returning its id. Re-interning keeps the first
    /// threshold.
    pub fn intern(&mut self, label: &str, threshold: u32) -> TraitId {
        if let Some(&id) = self.ids.get(label) {
            return id;
        }
        let id = self.labels.len();
        self.labels.push(label.to_string());
        self.thresholds.push(threshold);
        self.ids.insert(label.to_string(), id);
        id
    }

    /// Id of an interned trait
    #[must_use]
    pub fn id(&self, label: &str) -> Option<TraitId> {
        self.ids.get(label).copied()
    }

    /// Label of a trait id
    #[must_use]
    pub fn label(&self, id: TraitId) -> &str {
        &self.labels[id]
    }

    /// Threshold of a trait id
    #[must_use]
    pub fn threshold(&self, id: TraitId) -> u32 {
        self.thresholds[id]
    }

    /// Thresholds indexed by trait id
    #[must_use]
    pub fn thresholds(&self) -> &[u32] {
        &self.thresholds
    }

    /// Number of interned traits
    #[must_use]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Whether no trait is interned
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// Per-trait member counts of a partial group
///
/// Additions and removals mirror each other so the engine can push a unit
/// before descending and pop it when backtracking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraitCounts {
    counts: Vec<u32>,
}

impl TraitCounts {
    /// All-zero counts for `trait_count` traits
    #[must_use]
    pub fn new(trait_count: usize) -> Self {
        Self {
            counts: vec![0; trait_count],
        }
    }

    /// Counts accumulated over a set of units
    #[must_use]
    pub fn from_units<'u>(
        trait_count: usize,
        units: impl IntoIterator<Item = &'u FilteredUnit>,
    ) -> Self {
        let mut counts = Self::new(trait_count);
        for unit in units {
            counts.add(unit.trait_ids());
        }
        counts
    }

    /// Add one for each of the given traits
    pub fn add(&mut self, traits: &[TraitId]) {
        for &t in traits {
            self.counts[t] += 1;
        }
    }

    /// Undo a previous [`TraitCounts::add`]
    pub fn remove(&mut self, traits: &[TraitId]) {
        for &t in traits {
            debug_assert!(self.counts[t] > 0, "trait count underflow");
            self.counts[t] -= 1;
        }
    }

    /// Count of one trait
    #[must_use]
    pub fn get(&self, id: TraitId) -> u32 {
        self.counts[id]
    }

    /// Counts indexed by trait id
    #[must_use]
    pub fn as_slice(&self) -> &[u32] {
        &self.counts
    }

    /// Whether a trait has reached its threshold
    #[must_use]
    pub fn is_active(&self, id: TraitId, index: &TraitIndex) -> bool {
        self.counts[id] >= index.threshold(id)
    }

    /// Number of traits that have reached their threshold
    #[must_use]
    pub fn active_count(&self, index: &TraitIndex) -> usize {
        self.counts
            .iter()
            .zip(index.thresholds())
            .filter(|(count, threshold)| count >= threshold)
            .count()
    }

    /// Ids of the traits that have reached their threshold, ascending
    #[must_use]
    pub fn active_traits(&self, index: &TraitIndex) -> Vec<TraitId> {
        (0..self.counts.len())
            .filter(|&id| self.is_active(id, index))
            .collect()
    }
}

/// Carrier counts of every pool suffix
///
/// Row `start` holds, per trait, how many units in `pool[start..]` carry
/// it. The last row (`start == pool.len()`) is all zeros.
#[derive(Debug, Clone)]
pub struct SuffixCarriers {
    table: Vec<u32>,
    width: usize,
}

impl SuffixCarriers {
    /// Build the table for a pool over `trait_count` traits
    #[must_use]
    pub fn build(units: &[FilteredUnit], trait_count: usize) -> Self {
        let rows = units.len() + 1;
        let mut table = vec![0u32; rows * trait_count];
        for start in (0..units.len()).rev() {
            let (head, tail) = table.split_at_mut((start + 1) * trait_count);
            let row = &mut head[start * trait_count..];
            row.copy_from_slice(&tail[..trait_count]);
            for &t in units[start].trait_ids() {
                row[t] += 1;
            }
        }
        Self {
            table,
            width: trait_count,
        }
    }

    /// Carrier counts for `pool[start..]`
    #[must_use]
    pub fn row(&self, start: usize) -> &[u32] {
        &self.table[start * self.width..(start + 1) * self.width]
    }
}

/// Carrier counts of an arbitrary slice of units
#[must_use]
pub fn carrier_counts(units: &[FilteredUnit], trait_count: usize) -> Vec<u32> {
    let mut carriers = vec![0u32; trait_count];
    for unit in units {
        for &t in unit.trait_ids() {
            carriers[t] += 1;
        }
    }
    carriers
}
