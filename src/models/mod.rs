//! Catalog model
//!
//! Immutable in-memory representation of units and trait thresholds.

pub mod catalog;
pub mod thresholds;
pub mod unit;

pub use catalog::Catalog;
pub use thresholds::ThresholdTable;
pub use unit::Unit;
