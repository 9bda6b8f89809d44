//! Catalog of units
//!
//! The catalog is loaded once per run and is read-only afterwards. It only
//! offers validation helpers; everything the search needs is derived by the
//! activation filter.

use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};

use crate::error::{Result, SynergyError};
use crate::models::thresholds::ThresholdTable;
use crate::models::unit::Unit;

/// Ordered, immutable sequence of units
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    units: Vec<Unit>,
}

impl Catalog {
    /// Create a catalog from units in catalog order
    #[must_use]
    pub fn new(units: Vec<Unit>) -> Self {
        Self { units }
    }

    /// Units in catalog order
    #[must_use]
    pub fn units(&self) -> &[Unit] {
        &self.units
    }

    /// Number of units
    #[must_use]
    pub fn len(&self) -> usize {
        self.units.len()
    }

    /// Whether the catalog has no units
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Count, for every trait label, how many units carry it
    #[must_use]
    pub fn trait_carrier_counts(&self) -> FxHashMap<&str, usize> {
        let mut counts = FxHashMap::default();
        for unit in &self.units {
            for t in unit.traits() {
                *counts.entry(t.as_str()).or_insert(0) += 1;
            }
        }
        counts
    }

    /// Check the record shape: non-empty unique names, non-empty labels
    pub fn validate(&self) -> Result<()> {
        let mut seen = FxHashSet::default();
        for (idx, unit) in self.units.iter().enumerate() {
            if unit.name().is_empty() {
                return Err(SynergyError::InvalidCatalog(format!(
                    "unit at position {idx} has an empty name"
                )));
            }
            if !seen.insert(unit.name()) {
                return Err(SynergyError::InvalidCatalog(format!(
                    "duplicate unit name '{}'",
                    unit.name()
                )));
            }
            if unit.traits().iter().any(String::is_empty) {
                return Err(SynergyError::InvalidCatalog(format!(
                    "unit '{}' has an empty trait label",
                    unit.name()
                )));
            }
        }
        Ok(())
    }

    /// Fail with the first trait referenced by a unit but absent from the
    /// threshold table, in catalog order
    pub fn check_thresholds(&self, thresholds: &ThresholdTable) -> Result<()> {
        for unit in &self.units {
            if let Some(missing) = unit.traits().iter().find(|t| !thresholds.contains(t)) {
                return Err(SynergyError::MissingThreshold {
                    unit: unit.name().to_string(),
                    trait_name: missing.clone(),
                });
            }
        }
        Ok(())
    }
}

impl FromIterator<Unit> for Catalog {
    fn from_iter<I: IntoIterator<Item = Unit>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
