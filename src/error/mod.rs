//! Error handling for the synergy search.

pub mod util;

use std::io;
use std::path::PathBuf;

/// Specialized error type for catalog loading and group search
#[derive(Debug, thiserror::Error)]
pub enum SynergyError {
    /// A unit references a trait that has no activation threshold
    #[error("Unit '{unit}' references trait '{trait_name}' which has no threshold")]
    MissingThreshold {
        /// Name of the offending unit
        unit: String,
        /// The trait label without a threshold entry
        trait_name: String,
    },

    /// A search parameter is out of range
    #[error("Invalid parameter {name}: {value} (must be a positive integer)")]
    InvalidParameter {
        /// Parameter name
        name: &'static str,
        /// The rejected value
        value: usize,
    },

    /// A threshold table entry is not a positive integer
    #[error("Invalid threshold for trait '{trait_name}': {value} (must be a positive integer)")]
    InvalidThreshold {
        /// Trait label
        trait_name: String,
        /// The rejected value
        value: u32,
    },

    /// The catalog itself is malformed
    #[error("Invalid catalog: {0}")]
    InvalidCatalog(String),

    /// Error opening or reading a file
    #[error("IO error for {}: {source}", .path.display())]
    Io {
        /// File that failed
        path: PathBuf,
        /// Underlying error
        #[source]
        source: io::Error,
    },

    /// A JSON document did not have the expected shape
    #[error("JSON error in {}: {source}", .path.display())]
    Json {
        /// File that failed to parse
        path: PathBuf,
        /// Underlying error
        #[source]
        source: serde_json::Error,
    },

    /// Writing results failed
    #[error("Output error: {0}")]
    Output(String),
}

impl SynergyError {
    /// Whether this error stems from the run configuration rather than I/O
    #[must_use]
    pub const fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            Self::MissingThreshold { .. }
                | Self::InvalidParameter { .. }
                | Self::InvalidThreshold { .. }
                | Self::InvalidCatalog(_)
        )
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn json(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::Json {
            path: path.into(),
            source,
        }
    }
}

/// Result type for synergy search operations
pub type Result<T> = std::result::Result<T, SynergyError>;
