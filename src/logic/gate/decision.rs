//! Gate Decision
//!
//! Per-row flags and the single batch verdict.
//! One high-risk row fails the whole batch.

use serde::Serialize;

use crate::logic::config::GateConfig;
use crate::logic::model::RiskThreshold;
use crate::logic::table::FeatureTable;

/// Scored patch, written once to the audit table
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredRow {
    pub identifier: String,
    /// Feature cells as found in the input, in configured feature order
    pub features: Vec<String>,
    pub risk_score: f32,
    pub high_risk_flag: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum GateDecision {
    Pass,
    Fail,
}

impl GateDecision {
    pub fn from_high_risk_count(n_high_risk: usize) -> Self {
        if n_high_risk > 0 {
            GateDecision::Fail
        } else {
            GateDecision::Pass
        }
    }

    /// Human-readable verdict line
    pub fn message(&self, n_high_risk: usize) -> String {
        match self {
            GateDecision::Pass => "✅ PASS: No high-risk patches detected. CI continues.".to_string(),
            GateDecision::Fail => format!(
                "🚨 FAIL: {} high-risk patch(es) detected. CI BLOCKED.",
                n_high_risk
            ),
        }
    }
}

/// Attach scores and flags to every row of a validated table
pub fn flag_rows(table: &FeatureTable, config: &GateConfig, scores: &[f32]) -> Vec<ScoredRow> {
    let threshold: RiskThreshold = config.risk_threshold;

    (0..table.len())
        .zip(scores)
        .map(|(row, &risk_score)| ScoredRow {
            identifier: table.cell(row, &config.identifier_column).unwrap_or_default().to_string(),
            features: config.feature_columns.iter()
                .map(|c| table.cell(row, c).unwrap_or_default().to_string())
                .collect(),
            risk_score,
            high_risk_flag: threshold.flag(risk_score),
        })
        .collect()
}

pub fn count_high_risk(rows: &[ScoredRow]) -> usize {
    rows.iter().filter(|r| r.high_risk_flag == 1).count()
}

/// Mean risk score, None for an empty batch.
/// Accumulated in f64, reported at score precision.
pub fn average_risk(rows: &[ScoredRow]) -> Option<f32> {
    if rows.is_empty() {
        return None;
    }
    let total: f64 = rows.iter().map(|r| f64::from(r.risk_score)).sum();
    Some((total / rows.len() as f64) as f32)
}
