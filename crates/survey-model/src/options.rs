//! Tunable thresholds for role detection.

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};

/// Options controlling detector thresholds and name bonuses.
///
/// Every field has a default, so a partial JSON object deserializes into a
/// complete set of options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectionOptions {
    /// Minimum fraction of numerically parseable rows for the score column.
    pub min_numeric_fraction: f64,

    /// Acceptance threshold shared by the keyword and exact-value detectors.
    pub category_threshold: f64,

    /// Multiplier applied when a column name matches a detector's bonus pattern.
    pub name_bonus_multiplier: f64,

    /// Primary acceptance threshold of the date detector.
    pub date_threshold: f64,

    /// Fallback acceptance threshold of the date detector.
    pub date_fallback_threshold: f64,

    /// Multiplier for columns whose name mentions a date or time.
    pub date_name_bonus: f64,

    /// Freeform candidates below this uniqueness ratio are halved.
    pub low_uniqueness_cutoff: f64,
}

impl Default for DetectionOptions {
    fn default() -> Self {
        Self {
            min_numeric_fraction: 0.9,
            category_threshold: 0.5,
            name_bonus_multiplier: 1.1,
            date_threshold: 0.6,
            date_fallback_threshold: 0.5,
            date_name_bonus: 1.2,
            low_uniqueness_cutoff: 0.4,
        }
    }
}

impl DetectionOptions {
    #[must_use]
    pub fn with_min_numeric_fraction(mut self, value: f64) -> Self {
        self.min_numeric_fraction = value;
        self
    }

    #[must_use]
    pub fn with_category_threshold(mut self, value: f64) -> Self {
        self.category_threshold = value;
        self
    }

    #[must_use]
    pub fn with_name_bonus_multiplier(mut self, value: f64) -> Self {
        self.name_bonus_multiplier = value;
        self
    }

    #[must_use]
    pub fn with_date_thresholds(mut self, primary: f64, fallback: f64) -> Self {
        self.date_threshold = primary;
        self.date_fallback_threshold = fallback;
        self
    }

    /// Checks that thresholds are finite and non-negative and multipliers positive.
    pub fn validate(&self) -> Result<()> {
        let thresholds = [
            ("min_numeric_fraction", self.min_numeric_fraction),
            ("category_threshold", self.category_threshold),
            ("date_threshold", self.date_threshold),
            ("date_fallback_threshold", self.date_fallback_threshold),
            ("low_uniqueness_cutoff", self.low_uniqueness_cutoff),
        ];
        for (field, value) in thresholds {
            if !value.is_finite() || value < 0.0 {
                return Err(ModelError::InvalidOption {
                    field,
                    reason: format!("expected a finite value >= 0, got {value}"),
                });
            }
        }

        let multipliers = [
            ("name_bonus_multiplier", self.name_bonus_multiplier),
            ("date_name_bonus", self.date_name_bonus),
        ];
        for (field, value) in multipliers {
            if !value.is_finite() || value <= 0.0 {
                return Err(ModelError::InvalidOption {
                    field,
                    reason: format!("expected a finite value > 0, got {value}"),
                });
            }
        }

        if self.date_fallback_threshold > self.date_threshold {
            return Err(ModelError::InvalidOption {
                field: "date_fallback_threshold",
                reason: format!(
                    "fallback {} exceeds primary threshold {}",
                    self.date_fallback_threshold, self.date_threshold
                ),
            });
        }
        Ok(())
    }
}
