//! Aggregate similarity schema
//!
//! Weights of the two terms combined by the label-aware lookup score: feature
//! similarity and exact label equality. Only used for ad hoc lookups where
//! the query carries a label; leave-one-out evaluation scores features alone.

use serde::{Deserialize, Serialize};

/// Term weights for the label-aware aggregate score
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct AggregateSchema {
    /// Schema version for future compatibility
    #[serde(default = "default_version")]
    pub version: u32,

    /// Weight of the feature-set similarity term
    #[serde(default = "default_features_weight")]
    pub features: f64,

    /// Weight of the exact label-match term
    #[serde(default = "default_label_weight")]
    pub label: f64,
}

fn default_version() -> u32 {
    1
}

fn default_features_weight() -> f64 {
    0.7
}

fn default_label_weight() -> f64 {
    0.3
}

impl Default for AggregateSchema {
    fn default() -> Self {
        Self {
            version: default_version(),
            features: default_features_weight(),
            label: default_label_weight(),
        }
    }
}

impl AggregateSchema {
    pub fn new(features: f64, label: f64) -> Self {
        Self {
            version: 1,
            features,
            label,
        }
    }

    /// Schema that ignores labels entirely
    pub fn features_only() -> Self {
        Self::new(1.0, 0.0)
    }

    /// Validate the schema
    /// - Checks that weights are non-negative
    /// - Normalizes weights to sum to 1.0 if they don't
    pub fn validate_and_normalize(&mut self) -> Result<(), SchemaError> {
        if self.features < 0.0 || self.features.is_nan() {
            return Err(SchemaError::NegativeWeight("features".to_string()));
        }
        if self.label < 0.0 || self.label.is_nan() {
            return Err(SchemaError::NegativeWeight("label".to_string()));
        }

        let weight_sum = self.features + self.label;
        if weight_sum <= 0.0 {
            return Err(SchemaError::ZeroTotalWeight);
        }

        if (weight_sum - 1.0).abs() > 0.001 {
            self.features /= weight_sum;
            self.label /= weight_sum;
        }

        Ok(())
    }
}

/// Errors that can occur during schema validation
#[derive(Debug, Clone, thiserror::Error)]
pub enum SchemaError {
    #[error("Term '{0}' has negative weight")]
    NegativeWeight(String),

    #[error("Total weight cannot be zero")]
    ZeroTotalWeight,
}
