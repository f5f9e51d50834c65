//! Gate Summary & Report emission
//!
//! The structured summary goes to stdout first (pretty JSON), followed by a
//! blank line and the human-readable verdict.

use std::io::{self, Write};

use serde::Serialize;

use super::decision::{GateDecision, ScoredRow};

/// Aggregate over one invocation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GateSummary {
    pub input_file: String,
    pub n_high_risk: usize,
    pub n_rows: usize,
    pub avg_risk_score: Option<f32>,
    pub risk_threshold: f64,
    pub decision: GateDecision,
    pub audit_file: String,
    pub model_sha256: Option<String>,
    pub feature_layout_version: u8,
    pub feature_layout_hash: String,
    pub run_id: String,
    pub scored_at: String,
}

/// Outcome of a completed run (audit already written)
#[derive(Debug, Clone)]
pub struct GateReport {
    pub summary: GateSummary,
    pub rows: Vec<ScoredRow>,
}

impl GateReport {
    pub fn decision(&self) -> GateDecision {
        self.summary.decision
    }
}

/// Write summary then verdict
pub fn emit<W: Write>(report: &GateReport, out: &mut W) -> io::Result<()> {
    let json = serde_json::to_string_pretty(&report.summary)?;
    writeln!(out, "{}", json)?;
    writeln!(out)?;
    writeln!(out, "{}", report.decision().message(report.summary.n_high_risk))?;
    out.flush()
}
