//! Activation filter
//!
//! Derives, from the whole catalog, which traits can ever activate and
//! reduces every unit to those traits. The resulting pool is what the
//! search engine enumerates over.

use std::cmp::Reverse;

use log::{debug, info};
use smallvec::SmallVec;

use crate::algorithm::search::counts::{TraitId, TraitIndex};
use crate::error::Result;
use crate::models::{Catalog, ThresholdTable};

/// A unit restricted to its activatable traits
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilteredUnit {
    name: String,
    traits: Vec<String>,
    trait_ids: SmallVec<[TraitId; 8]>,
    catalog_index: usize,
}

impl FilteredUnit {
    /// Name of the unit
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Retained trait labels, in the unit's declaration order
    #[must_use]
    pub fn traits(&self) -> &[String] {
        &self.traits
    }

    /// Retained traits as interned ids
    #[must_use]
    pub fn trait_ids(&self) -> &[TraitId] {
        &self.trait_ids
    }

    /// Position of the unit in the catalog
    #[must_use]
    pub const fn catalog_index(&self) -> usize {
        self.catalog_index
    }
}

/// Search pool produced by [`filter_units`]
///
/// Units are ordered by descending number of retained traits, ties in
/// catalog order. The slot-capped bound relies on this ordering.
#[derive(Debug, Clone)]
pub struct FilteredPool {
    units: Vec<FilteredUnit>,
    index: TraitIndex,
    inert_traits: Vec<String>,
    dropped_units: Vec<String>,
}

impl FilteredPool {
    /// Units in search order
    #[must_use]
    pub fn units(&self) -> &[FilteredUnit] {
        &self.units
    }

    /// Number of units in the pool
    #[must_use]
    pub fn len(&self) -> usize {
        self.units.len()
    }

    /// Whether the pool is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Activatable traits and their thresholds
    #[must_use]
    pub const fn trait_index(&self) -> &TraitIndex {
        &self.index
    }

    /// Traits whose catalog-wide carrier count is below threshold
    #[must_use]
    pub fn inert_traits(&self) -> &[String] {
        &self.inert_traits
    }

    /// Names of units removed for having no activatable trait
    #[must_use]
    pub fn dropped_units(&self) -> &[String] {
        &self.dropped_units
    }
}

/// Reduce a catalog to its search pool
///
/// A trait is activatable when at least `threshold` units of the whole
/// catalog carry it. Units keep only activatable traits; with
/// `exclude_traitless` set, units left with none are dropped.
///
/// Fails before filtering if a unit references a trait without a threshold
/// or if a threshold is zero.
pub fn filter_units(
    catalog: &Catalog,
    thresholds: &ThresholdTable,
    exclude_traitless: bool,
) -> Result<FilteredPool> {
    thresholds.validate()?;
    catalog.check_thresholds(thresholds)?;

    let carriers = catalog.trait_carrier_counts();
    let activation_threshold = |label: &str| -> Option<u32> {
        let count = carriers.get(label).copied().unwrap_or(0);
        thresholds
            .get(label)
            .filter(|&threshold| count >= threshold as usize)
    };

    let mut index = TraitIndex::new();
    let mut inert_traits = Vec::new();
    let mut units = Vec::with_capacity(catalog.len());
    let mut dropped_units = Vec::new();

    for (catalog_index, unit) in catalog.units().iter().enumerate() {
        let mut traits = Vec::with_capacity(unit.traits().len());
        let mut trait_ids = SmallVec::new();
        for label in unit.traits() {
            if let Some(threshold) = activation_threshold(label) {
                trait_ids.push(index.intern(label, threshold));
                traits.push(label.clone());
            } else if !inert_traits.contains(label) {
                debug!(
                    "Trait '{label}' is inert: {} carriers, threshold {:?}",
                    carriers.get(label.as_str()).copied().unwrap_or(0),
                    thresholds.get(label)
                );
                inert_traits.push(label.clone());
            }
        }

        if traits.is_empty() && exclude_traitless {
            debug!("Dropping unit '{}': no activatable traits", unit.name());
            dropped_units.push(unit.name().to_string());
            continue;
        }

        units.push(FilteredUnit {
            name: unit.name().to_string(),
            traits,
            trait_ids,
            catalog_index,
        });
    }

    // Stable: ties keep catalog order
    units.sort_by_key(|u| Reverse(u.trait_ids.len()));

    info!(
        "Activation filter kept {} of {} units and {} traits ({} inert traits, {} units dropped)",
        units.len(),
        catalog.len(),
        index.len(),
        inert_traits.len(),
        dropped_units.len()
    );

    Ok(FilteredPool {
        units,
        index,
        inert_traits,
        dropped_units,
    })
}
