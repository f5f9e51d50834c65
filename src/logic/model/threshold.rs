//! Risk Threshold
//!
//! Converts a classifier probability into the binary high-risk flag.
//! The comparison is inclusive: a score equal to the threshold is high risk.

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_RISK_THRESHOLD;
use crate::logic::error::{GateError, GateResult};

/// Process-wide risk threshold in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct RiskThreshold(f64);

impl RiskThreshold {
    pub fn new(value: f64) -> GateResult<Self> {
        if !value.is_finite() || !(0.0..=1.0).contains(&value) {
            return Err(GateError::Config(format!(
                "risk threshold must be within [0, 1], got {}",
                value
            )));
        }
        Ok(Self(value))
    }

    pub fn value(&self) -> f64 {
        self.0
    }

    /// `score >= threshold`, compared at the classifier's f32 precision
    pub fn is_high_risk(&self, score: f32) -> bool {
        score >= self.0 as f32
    }

    /// 1 if high risk, 0 otherwise
    pub fn flag(&self, score: f32) -> u8 {
        u8::from(self.is_high_risk(score))
    }
}

impl Default for RiskThreshold {
    fn default() -> Self {
        Self(DEFAULT_RISK_THRESHOLD)
    }
}

impl TryFrom<f64> for RiskThreshold {
    type Error = GateError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<RiskThreshold> for f64 {
    fn from(t: RiskThreshold) -> Self {
        t.0
    }
}
