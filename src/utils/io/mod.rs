//! IO utilities for file operations
//!
//! This module provides utilities for persisting search results.

pub mod output;

// Re-export commonly used functions for convenience
pub use output::{results_file_name, results_path, write_solutions, write_solutions_to};
