//! Audit Writer
//!
//! Persists every scored row as `scored_<input name>` for traceability.
//! Written once per run, after scoring and before the verdict is reported.

use std::path::{Path, PathBuf};

use csv::Writer;

use crate::constants::{AUDIT_PREFIX, HIGH_RISK_FLAG_COLUMN, RISK_SCORE_COLUMN};
use crate::logic::config::GateConfig;
use crate::logic::error::{GateError, GateResult};

use super::decision::ScoredRow;

/// `<audit_dir>/scored_<input base name>`
pub fn audit_path(input: &Path, audit_dir: &Path) -> PathBuf {
    let base = input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    audit_dir.join(format!("{}{}", AUDIT_PREFIX, base))
}

pub fn audit_header(config: &GateConfig) -> Vec<String> {
    let mut header = Vec::with_capacity(config.feature_columns.len() + 3);
    header.push(config.identifier_column.clone());
    header.extend(config.feature_columns.iter().cloned());
    header.push(RISK_SCORE_COLUMN.to_string());
    header.push(HIGH_RISK_FLAG_COLUMN.to_string());
    header
}

/// Write the audit table (header-only for an empty batch)
pub fn write_audit(path: &Path, config: &GateConfig, rows: &[ScoredRow]) -> GateResult<()> {
    let fail = |e: &dyn std::fmt::Display| GateError::Audit {
        path: path.to_path_buf(),
        reason: e.to_string(),
    };

    let mut writer = Writer::from_path(path).map_err(|e| fail(&e))?;

    writer.write_record(audit_header(config)).map_err(|e| fail(&e))?;

    for row in rows {
        let mut record = Vec::with_capacity(row.features.len() + 3);
        record.push(row.identifier.clone());
        record.extend(row.features.iter().cloned());
        record.push(row.risk_score.to_string());
        record.push(row.high_risk_flag.to_string());
        writer.write_record(&record).map_err(|e| fail(&e))?;
    }

    writer.flush().map_err(|e| fail(&e))?;

    log::info!("Scored output saved to {}", path.display());
    Ok(())
}
