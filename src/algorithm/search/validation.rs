//! Validation of search parameters

use crate::config::SearchConfig;
use crate::error::{Result, SynergyError};

/// Check that group size and activation target are positive
pub fn validate_parameters(group_size: usize, min_active_traits: usize) -> Result<()> {
    if group_size == 0 {
        return Err(SynergyError::InvalidParameter {
            name: "group_size",
            value: group_size,
        });
    }
    if min_active_traits == 0 {
        return Err(SynergyError::InvalidParameter {
            name: "min_active_traits",
            value: min_active_traits,
        });
    }
    Ok(())
}

/// Validate the parameters carried by a configuration
pub fn validate_config(config: &SearchConfig) -> Result<()> {
    validate_parameters(config.group_size, config.min_active_traits)
}
