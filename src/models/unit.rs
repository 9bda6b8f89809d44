//! Unit model
//!
//! A unit is a named catalog entry carrying a set of trait labels.

use serde::{Deserialize, Serialize};

/// A single catalog entry
///
/// Units deserialize from the `{"Name": ..., "Trait": [...]}` records of a
/// units file. Trait labels form a set: duplicates are collapsed on
/// construction and on load, keeping the first occurrence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Unit {
    /// Unique name of the unit
    #[serde(rename = "Name")]
    name: String,
    /// Trait labels carried by the unit
    #[serde(rename = "Trait", deserialize_with = "deserialize_trait_set")]
    traits: Vec<String>,
}

impl Unit {
    /// Create a unit from a name and its trait labels
    #[must_use]
    pub fn new<N, I, T>(name: N, traits: I) -> Self
    where
        N: Into<String>,
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self {
            name: name.into(),
            traits: dedup_labels(traits.into_iter().map(Into::into)),
        }
    }

    /// Name of the unit
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Trait labels carried by the unit, in declaration order
    #[must_use]
    pub fn traits(&self) -> &[String] {
        &self.traits
    }

    /// Whether the unit carries the given trait
    #[must_use]
    pub fn has_trait(&self, trait_name: &str) -> bool {
        self.traits.iter().any(|t| t == trait_name)
    }
}

fn dedup_labels(labels: impl Iterator<Item = String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for label in labels {
        if !out.contains(&label) {
            out.push(label);
        }
    }
    out
}

fn deserialize_trait_set<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let labels = Vec::<String>::deserialize(deserializer)?;
    Ok(dedup_labels(labels.into_iter()))
}
