//! Trait activation thresholds

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SynergyError};

/// Mapping from trait label to the number of group members that must carry
/// the trait for it to become active
///
/// There is no implicit default: a trait missing from the table is a
/// configuration error as soon as a unit references it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ThresholdTable {
    entries: BTreeMap<String, u32>,
}

impl ThresholdTable {
    /// Create an empty table
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the threshold for a trait, replacing any previous entry
    pub fn insert(&mut self, trait_name: impl Into<String>, threshold: u32) -> Option<u32> {
        self.entries.insert(trait_name.into(), threshold)
    }

    /// Threshold of a trait, if the table has one
    #[must_use]
    pub fn get(&self, trait_name: &str) -> Option<u32> {
        self.entries.get(trait_name).copied()
    }

    /// Whether the table has an entry for the trait
    #[must_use]
    pub fn contains(&self, trait_name: &str) -> bool {
        self.entries.contains_key(trait_name)
    }

    /// Number of entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries in label order
    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Check that every threshold is a positive integer
    pub fn validate(&self) -> Result<()> {
        match self.entries.iter().find(|(_, v)| **v == 0) {
            Some((trait_name, value)) => Err(SynergyError::InvalidThreshold {
                trait_name: trait_name.clone(),
                value: *value,
            }),
            None => Ok(()),
        }
    }
}

impl<K: Into<String>> FromIterator<(K, u32)> for ThresholdTable {
    fn from_iter<I: IntoIterator<Item = (K, u32)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}
