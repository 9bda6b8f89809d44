//! Console output utilities
//!
//! This module provides utilities for formatted console output.

use std::time::Duration;

use itertools::Itertools;

use crate::algorithm::search::{FilteredPool, SearchStatus, Solution};
use crate::models::{Catalog, ThresholdTable};

/// Print the catalog, one unit per line
pub fn print_catalog(catalog: &Catalog) {
    println!("Units ({}):", catalog.len());
    for unit in catalog.units() {
        println!("  {}: {}", unit.name(), unit.traits().join(", "));
    }
}

/// Print the threshold table, one trait per line
pub fn print_thresholds(thresholds: &ThresholdTable) {
    println!("Trait thresholds:");
    for (trait_name, threshold) in thresholds.iter() {
        println!("  {trait_name}: {threshold}");
    }
}

/// Print the search pool in search order
pub fn print_pool(pool: &FilteredPool) {
    println!("Search pool ({} units):", pool.len());
    for unit in pool.units() {
        println!("  {}: {}", unit.name(), unit.traits().join(", "));
    }
    if !pool.inert_traits().is_empty() {
        println!("Inert traits: {}", pool.inert_traits().join(", "));
    }
}

/// Print summary information about a finished search
pub fn print_run_summary(found: usize, elapsed: Duration, status: SearchStatus) {
    println!(
        "Finished in {:.2}s, found {} groups.",
        elapsed.as_secs_f64(),
        found
    );
    if status == SearchStatus::Cancelled {
        println!("Search was cancelled; the list may be incomplete.");
    }
}

/// Print sample solutions
pub fn print_sample_solutions(solutions: &[Solution], limit: usize) {
    println!("First {} groups:", limit.min(solutions.len()));
    for (idx, solution) in solutions.iter().take(limit).enumerate() {
        println!(
            "Group {}: [{}] active: {}",
            idx + 1,
            solution.names().join(", "),
            solution.active_traits.join(", ")
        );
    }
}
