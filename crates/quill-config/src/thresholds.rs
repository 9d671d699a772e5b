//! Gate threshold configuration.
//!
//! Thresholds have no built-in defaults: every run must supply them through
//! TOML, environment, or CLI overrides.

use quill_core::thresholds::GateThresholds;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq)]
pub struct ThresholdsConfig {
    /// Target Flesch Reading Ease score.
    #[serde(default)]
    pub readability_target: Option<f64>,

    /// Acceptable shortfall below the readability target.
    #[serde(default)]
    pub readability_tolerance: Option<f64>,

    /// Minimum brand-consistency score (0-100).
    #[serde(default)]
    pub brand_minimum: Option<f64>,

    /// Minimum technical-accuracy score (0-100).
    #[serde(default)]
    pub accuracy_minimum: Option<f64>,
}

impl ThresholdsConfig {
    /// Whether every threshold has a value.
    pub fn is_configured(&self) -> bool {
        self.missing_fields().is_empty()
    }

    /// Layer `overrides` on top of `self`, field by field.
    #[must_use]
    pub fn merged_with(self, overrides: Self) -> Self {
        Self {
            readability_target: overrides.readability_target.or(self.readability_target),
            readability_tolerance: overrides
                .readability_tolerance
                .or(self.readability_tolerance),
            brand_minimum: overrides.brand_minimum.or(self.brand_minimum),
            accuracy_minimum: overrides.accuracy_minimum.or(self.accuracy_minimum),
        }
    }

    /// Resolve into validated gate thresholds.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotConfigured` listing missing fields, or
    /// `ConfigError::InvalidValue` if the values are out of range.
    pub fn require(&self) -> Result<GateThresholds, ConfigError> {
        let missing = self.missing_fields();
        if !missing.is_empty() {
            return Err(ConfigError::NotConfigured {
                section: "thresholds".to_string(),
                missing: missing.join(", "),
            });
        }

        let thresholds = GateThresholds {
            readability_target: self.readability_target.unwrap_or_default(),
            readability_tolerance: self.readability_tolerance.unwrap_or_default(),
            brand_minimum: self.brand_minimum.unwrap_or_default(),
            accuracy_minimum: self.accuracy_minimum.unwrap_or_default(),
        };
        thresholds
            .validate()
            .map_err(|error| ConfigError::InvalidValue {
                field: "thresholds".to_string(),
                reason: error.to_string(),
            })?;
        Ok(thresholds)
    }

    fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("readability_target", self.readability_target),
            ("readability_tolerance", self.readability_tolerance),
            ("brand_minimum", self.brand_minimum),
            ("accuracy_minimum", self.accuracy_minimum),
        ]
        .into_iter()
        .filter(|(_, value)| value.is_none())
        .map(|(name, _)| name)
        .collect()
    }
}
