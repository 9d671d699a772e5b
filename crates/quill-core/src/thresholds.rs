//! Gate thresholds supplied per run.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// Thresholds the decision gate compares scores against.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct GateThresholds {
    /// Target Flesch Reading Ease score.
    pub readability_target: f64,
    /// Acceptable shortfall below the target.
    pub readability_tolerance: f64,
    /// Minimum brand-consistency score (0-100).
    pub brand_minimum: f64,
    /// Minimum technical-accuracy score (0-100).
    pub accuracy_minimum: f64,
}

impl GateThresholds {
    /// Lowest readability score that still passes.
    #[must_use]
    pub fn readability_floor(&self) -> f64 {
        self.readability_target - self.readability_tolerance
    }

    /// Check that every threshold is usable.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` for non-finite values, a negative
    /// tolerance, or minima outside `[0, 100]`.
    pub fn validate(&self) -> Result<(), CoreError> {
        let fields = [
            ("readability_target", self.readability_target),
            ("readability_tolerance", self.readability_tolerance),
            ("brand_minimum", self.brand_minimum),
            ("accuracy_minimum", self.accuracy_minimum),
        ];
        if let Some((name, _)) = fields.iter().find(|(_, value)| !value.is_finite()) {
            return Err(CoreError::Validation(format!("{name} must be a finite number")));
        }
        if self.readability_tolerance < 0.0 {
            return Err(CoreError::Validation(
                "readability_tolerance must not be negative".to_string(),
            ));
        }
        for (name, value) in [
            ("brand_minimum", self.brand_minimum),
            ("accuracy_minimum", self.accuracy_minimum),
        ] {
            if !(0.0..=100.0).contains(&value) {
                return Err(CoreError::Validation(format!(
                    "{name} must be within 0-100 (got {value})"
                )));
            }
        }
        Ok(())
    }
}
