//! Utility functions for error handling
//!
//! File access helpers that attach the path and purpose to I/O failures.

use std::fs;
use std::io;
use std::path::Path;

use crate::error::{Result, SynergyError};

fn with_purpose(path: &Path, purpose: &str, e: io::Error) -> SynergyError {
    let context = match e.kind() {
        io::ErrorKind::PermissionDenied => "permission denied".to_string(),
        io::ErrorKind::NotFound => "file not found".to_string(),
        io::ErrorKind::InvalidData => "file is not valid UTF-8".to_string(),
        _ => format!("failed to read {purpose}"),
    };
    SynergyError::io(path, io::Error::new(e.kind(), format!("{context} ({purpose}): {e}")))
}

/// Read a file to string with rich error information
///
/// # Arguments
/// * `path` - The file to read
/// * `purpose` - What the file is needed for (for error context)
pub fn safe_read_to_string(path: &Path, purpose: &str) -> Result<String> {
    if path.is_dir() {
        return Err(SynergyError::io(
            path,
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("expected a file for {purpose}, found a directory"),
            ),
        ));
    }
    fs::read_to_string(path).map_err(|e| with_purpose(path, purpose, e))
}

/// Make sure a directory exists, creating it if needed
pub fn ensure_directory(path: &Path) -> Result<()> {
    if path.exists() && !path.is_dir() {
        return Err(SynergyError::io(
            path,
            io::Error::new(io::ErrorKind::InvalidInput, "path is not a directory"),
        ));
    }
    fs::create_dir_all(path).map_err(|e| SynergyError::io(path, e))
}
