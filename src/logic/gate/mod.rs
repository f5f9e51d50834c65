//! Gate Module - Scoring and CI gating pipeline
//!
//! ```text
//! START -> LOADED -> VALIDATED -> SCORED -> DECIDED -> {PASS | FAIL | ERROR}
//! ```
//!
//! Every transition is one-way. Any error before the audit write leaves
//! no audit file behind; a returned `GateReport` always has one.

pub mod audit;
pub mod decision;
pub mod scorer;
pub mod summary;


use std::path::Path;

use crate::constants::{EXIT_ERROR, EXIT_FAIL, EXIT_PASS};
use crate::logic::config::GateConfig;
use crate::logic::error::{ErrorKind, GateResult};
use crate::logic::features::LayoutInfo;
use crate::logic::model::RiskClassifier;
use crate::logic::table;

pub use decision::GateDecision;
pub use summary::{emit, GateReport, GateSummary};

// ============================================================================
// OUTCOME
// ============================================================================

/// Typed result of one invocation; only `main` turns it into an exit code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateOutcome {
    Pass,
    Fail,
    Error(ErrorKind),
}

impl GateOutcome {
    pub fn from_result(result: &GateResult<GateReport>) -> Self {
        match result {
            Ok(report) => match report.decision() {
                GateDecision::Pass => GateOutcome::Pass,
                GateDecision::Fail => GateOutcome::Fail,
            },
            Err(e) => GateOutcome::Error(e.kind()),
        }
    }

    pub fn exit_code(&self) -> i32 {
        match self {
            GateOutcome::Pass => EXIT_PASS,
            GateOutcome::Fail => EXIT_FAIL,
            GateOutcome::Error(_) => EXIT_ERROR,
        }
    }
}

// ============================================================================
// PIPELINE
// ============================================================================

/// Run the gate over one input file.
///
/// `load_classifier` is only called once the table has validated, so schema
/// failures never touch the model artifact.
pub fn run_gate<F>(
    input: &Path,
    config: &GateConfig,
    audit_dir: &Path,
    load_classifier: F,
) -> GateResult<GateReport>
where
    F: FnOnce(&GateConfig) -> GateResult<Box<dyn RiskClassifier>>,
{
    // LOADED
    let mut table = table::load_table(input)?;

    // VALIDATED
    table::validate(&mut table, config)?;

    // SCORED
    let classifier = load_classifier(config)?;
    let scores = scorer::score_table(&table, config, classifier.as_ref())?;

    // DECIDED
    let rows = decision::flag_rows(&table, config, &scores);
    let n_high_risk = decision::count_high_risk(&rows);
    let gate_decision = GateDecision::from_high_risk_count(n_high_risk);

    let audit_file = audit::audit_path(input, audit_dir);
    let layout = LayoutInfo::for_columns(&config.feature_columns);
    audit::write_audit(&audit_file, config, &rows)?;

    let summary = GateSummary {
        input_file: input.display().to_string(),
        n_high_risk,
        n_rows: rows.len(),
        avg_risk_score: decision::average_risk(&rows),
        risk_threshold: config.risk_threshold.value(),
        decision: gate_decision,
        audit_file: audit_file.display().to_string(),
        model_sha256: classifier.fingerprint().map(str::to_string),
        feature_layout_version: layout.version,
        feature_layout_hash: layout.hash,
        run_id: uuid::Uuid::new_v4().to_string(),
        scored_at: chrono::Utc::now().to_rfc3339(),
    };

    match gate_decision {
        GateDecision::Fail => log::warn!("FAIL: {} high-risk patch(es) detected", n_high_risk),
        GateDecision::Pass => log::info!("PASS: No high-risk patches detected"),
    }

    Ok(GateReport { summary, rows })
}
