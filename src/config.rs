//! Engine configuration
//!
//! Every pricing rate and the build envelope are caller-supplied values, so
//! quotes can be reproduced under different pricing regimes without touching
//! the calculator.

use crate::error::ValidationError;
use crate::model::BuildEnvelope;

/// Configuration consumed by the build-fit check and the quote calculator
///
/// # Example
///
/// ```
/// use stlquote::EngineConfig;
///
/// let config = EngineConfig::new()
///     .with_build_cube(220.0)
///     .with_hourly_rate(12.5)
///     .with_max_quantity(20);
///
/// assert!(config.validate().is_ok());
/// assert_eq!(config.setup_cost(), 25.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EngineConfig {
    build_envelope: BuildEnvelope,
    base_hours_per_cm3: f64,
    hourly_rate: f64,
    setup_cost: f64,
    max_quantity: u32,
}

impl EngineConfig {
    /// Default base print-time rate in hours per cm³
    pub const DEFAULT_BASE_HOURS_PER_CM3: f64 = 0.6;
    /// Default machine time cost per hour
    pub const DEFAULT_HOURLY_RATE: f64 = 10.0;
    /// Default fixed setup cost
    pub const DEFAULT_SETUP_COST: f64 = 25.0;
    /// Default maximum quantity per order
    pub const DEFAULT_MAX_QUANTITY: u32 = 50;

    /// Create a configuration with the default rates and a 256 mm build cube
    pub fn new() -> Self {
        Self {
            build_envelope: BuildEnvelope::default(),
            base_hours_per_cm3: Self::DEFAULT_BASE_HOURS_PER_CM3,
            hourly_rate: Self::DEFAULT_HOURLY_RATE,
            setup_cost: Self::DEFAULT_SETUP_COST,
            max_quantity: Self::DEFAULT_MAX_QUANTITY,
        }
    }

    /// Load a configuration from JSON; missing fields take their defaults
    #[cfg(feature = "serde")]
    pub fn from_json(json: &str) -> crate::Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Set the build envelope
    pub fn with_build_envelope(mut self, envelope: BuildEnvelope) -> Self {
        self.build_envelope = envelope;
        self
    }

    /// Set a cubic build envelope with the given edge length in mm
    pub fn with_build_cube(self, size: f64) -> Self {
        self.with_build_envelope(BuildEnvelope::cube(size))
    }

    /// Set the base print-time rate in hours per cm³
    pub fn with_base_hours_per_cm3(mut self, hours: f64) -> Self {
        self.base_hours_per_cm3 = hours;
        self
    }

    /// Set the machine time cost per hour
    pub fn with_hourly_rate(mut self, rate: f64) -> Self {
        self.hourly_rate = rate;
        self
    }

    /// Set the fixed setup cost
    pub fn with_setup_cost(mut self, cost: f64) -> Self {
        self.setup_cost = cost;
        self
    }

    /// Set the maximum quantity per order
    pub fn with_max_quantity(mut self, max: u32) -> Self {
        self.max_quantity = max;
        self
    }

    /// Build envelope
    pub fn build_envelope(&self) -> &BuildEnvelope {
        &self.build_envelope
    }

    /// Base print-time rate in hours per cm³
    pub fn base_hours_per_cm3(&self) -> f64 {
        self.base_hours_per_cm3
    }

    /// Machine time cost per hour
    pub fn hourly_rate(&self) -> f64 {
        self.hourly_rate
    }

    /// Fixed setup cost
    pub fn setup_cost(&self) -> f64 {
        self.setup_cost
    }

    /// Maximum quantity per order
    pub fn max_quantity(&self) -> u32 {
        self.max_quantity
    }

    /// Check that all values are usable
    ///
    /// Rates and the setup cost must be finite and non-negative, envelope
    /// axes finite and positive, and the maximum quantity at least 1.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let env = &self.build_envelope;
        for (axis, value) in [("x", env.x), ("y", env.y), ("z", env.z)] {
            if !(value.is_finite() && value > 0.0) {
                return Err(ValidationError::InvalidConfig(format!(
                    "build envelope {} must be a positive number, got {}",
                    axis, value
                )));
            }
        }

        for (name, value) in [
            ("base hours per cm³", self.base_hours_per_cm3),
            ("hourly rate", self.hourly_rate),
            ("setup cost", self.setup_cost),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(ValidationError::InvalidConfig(format!(
                    "{} must be a non-negative number, got {}",
                    name, value
                )));
            }
        }

        if self.max_quantity == 0 {
            return Err(ValidationError::InvalidConfig(
                "maximum quantity must be at least 1".to_string(),
            ));
        }

        Ok(())
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}
