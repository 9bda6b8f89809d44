//! Utility functions
//!
//! Logging, progress reporting, console output and result persistence.

pub mod io;
pub mod logging;
