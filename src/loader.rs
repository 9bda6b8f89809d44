//! Catalog and threshold file loading
//!
//! Units files are JSON arrays of `{"Name": str, "Trait": [str]}` records;
//! threshold files are JSON objects mapping trait labels to positive
//! integers. Shape errors name the offending file.

use std::path::Path;
use std::time::Instant;

use crate::error::util::safe_read_to_string;
use crate::error::{Result, SynergyError};
use crate::models::{Catalog, ThresholdTable};
use crate::utils::logging::{log_operation_complete, log_operation_start};

/// Load and validate a units file
pub fn load_units(path: &Path) -> Result<Catalog> {
    let start = Instant::now();
    log_operation_start("Loading units from", path);
    let text = safe_read_to_string(path, "units file")?;
    let catalog = parse_units(&text).map_err(|e| match e {
        SynergyError::Json { source, .. } => SynergyError::json(path, source),
        SynergyError::InvalidCatalog(msg) => {
            SynergyError::InvalidCatalog(format!("{}: {msg}", path.display()))
        }
        other => other,
    })?;
    log_operation_complete("loaded", path, catalog.len(), Some(start.elapsed()));
    Ok(catalog)
}

/// Load and validate a thresholds file
pub fn load_thresholds(path: &Path) -> Result<ThresholdTable> {
    let start = Instant::now();
    log_operation_start("Loading trait thresholds from", path);
    let text = safe_read_to_string(path, "thresholds file")?;
    let thresholds = parse_thresholds(&text).map_err(|e| match e {
        SynergyError::Json { source, .. } => SynergyError::json(path, source),
        other => other,
    })?;
    log_operation_complete("loaded", path, thresholds.len(), Some(start.elapsed()));
    Ok(thresholds)
}

/// Parse and validate units JSON
pub fn parse_units(text: &str) -> Result<Catalog> {
    let catalog: Catalog =
        serde_json::from_str(text).map_err(|e| SynergyError::json("<units>", e))?;
    catalog.validate()?;
    Ok(catalog)
}

/// Parse and validate thresholds JSON
pub fn parse_thresholds(text: &str) -> Result<ThresholdTable> {
    let thresholds: ThresholdTable =
        serde_json::from_str(text).map_err(|e| SynergyError::json("<thresholds>", e))?;
    thresholds.validate()?;
    Ok(thresholds)
}
