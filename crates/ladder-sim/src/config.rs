//! Evolution configuration.

use serde::{Deserialize, Serialize};

use crate::error::{SimError, SimResult};

/// Product-formula order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrotterOrder {
    /// Lie-Trotter: every term once per step.
    #[default]
    First,
    /// Symmetric Suzuki split: forward then reverse half steps.
    Second,
}

/// Options for a Trotterized time evolution.
///
/// Every field has a default, so `{}` deserializes to
/// `time = 1.0, steps = 1, order = first`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvolutionConfig {
    /// Total evolution time.
    pub time: f64,
    /// Number of Trotter slices.
    pub steps: usize,
    /// Product-formula order.
    pub order: TrotterOrder,
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            time: 1.0,
            steps: 1,
            order: TrotterOrder::First,
        }
    }
}

impl EvolutionConfig {
    /// First-order evolution for `time` over `steps` slices.
    pub fn new(time: f64, steps: usize) -> Self {
        Self {
            time,
            steps,
            order: TrotterOrder::First,
        }
    }

    /// Set the product-formula order.
    #[must_use]
    pub fn with_order(mut self, order: TrotterOrder) -> Self {
        self.order = order;
        self
    }

    /// Parse from JSON; missing fields take their defaults.
    pub fn from_json(json: &str) -> SimResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject zero steps and non-finite times.
    pub fn validate(&self) -> SimResult<()> {
        if self.steps == 0 {
            return Err(SimError::InvalidSteps(0));
        }
        if !self.time.is_finite() {
            return Err(SimError::InvalidTime(self.time));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EvolutionConfig::from_json("{}").unwrap();
        assert_eq!(config, EvolutionConfig::default());
        assert_eq!(config.time, 1.0);
        assert_eq!(config.steps, 1);
        assert_eq!(config.order, TrotterOrder::First);
    }

    #[test]
    fn test_partial_json() {
        let config = EvolutionConfig::from_json(r#"{"steps": 4, "order": "second"}"#).unwrap();
        assert_eq!(config.steps, 4);
        assert_eq!(config.order, TrotterOrder::Second);
        assert_eq!(config.time, 1.0);
    }

    #[test]
    fn test_invalid() {
        assert!(matches!(
            EvolutionConfig::from_json(r#"{"steps": 0}"#),
            Err(SimError::InvalidSteps(0))
        ));
        assert!(matches!(
            EvolutionConfig::from_json(r#"{"steps": "many"}"#),
            Err(SimError::Config(_))
        ));
    }
}
