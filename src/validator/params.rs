//! Print parameter validation

use crate::config::EngineConfig;
use crate::error::ValidationError;
use crate::model::PrintParameters;

/// Smallest accepted infill percentage
pub const MIN_INFILL_PERCENT: f64 = 1.0;

/// Largest accepted infill percentage
pub const MAX_INFILL_PERCENT: f64 = 100.0;

/// Check that an infill percentage is a finite number in `[1, 100]`
pub fn validate_infill(infill_percent: f64) -> Result<(), ValidationError> {
    if infill_percent.is_finite()
        && (MIN_INFILL_PERCENT..=MAX_INFILL_PERCENT).contains(&infill_percent)
    {
        Ok(())
    } else {
        Err(ValidationError::InfillOutOfRange {
            value: infill_percent,
        })
    }
}

/// Check that a quantity is in `[1, max]`
pub fn validate_quantity(quantity: u32, max: u32) -> Result<(), ValidationError> {
    if (1..=max).contains(&quantity) {
        Ok(())
    } else {
        Err(ValidationError::QuantityOutOfRange {
            value: quantity,
            max,
        })
    }
}

/// Validate a complete set of print parameters against the configuration
///
/// Checks, in order: the infill range, the quantity range and the
/// material's price and density.
pub fn validate_print_parameters(
    params: &PrintParameters<'_>,
    config: &EngineConfig,
) -> Result<(), ValidationError> {
    validate_infill(params.infill_percent)?;
    validate_quantity(params.quantity, config.max_quantity())?;
    params.material.validate()
}
