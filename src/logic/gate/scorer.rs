//! Risk Scorer
//!
//! Builds the `[rows, features]` matrix in configured feature order and asks
//! the classifier for one positive-class probability per row.

use ndarray::Array2;

use crate::logic::config::GateConfig;
use crate::logic::error::{GateError, GateResult};
use crate::logic::model::RiskClassifier;
use crate::logic::table::FeatureTable;

/// Parse one feature cell: numbers, or true/false as 1/0
pub fn parse_feature(raw: &str) -> Option<f32> {
    let value = raw.trim();

    if value.eq_ignore_ascii_case("true") {
        return Some(1.0);
    }
    if value.eq_ignore_ascii_case("false") {
        return Some(0.0);
    }

    value.parse::<f32>().ok().filter(|v| v.is_finite())
}

/// Feature matrix restricted and reordered to the configured columns.
/// Extra columns are ignored; every cell must parse (no defaulting).
pub fn feature_matrix(table: &FeatureTable, config: &GateConfig) -> GateResult<Array2<f32>> {
    let n_features = config.feature_columns.len();

    let indices = config.feature_columns.iter()
        .map(|name| {
            table.column_index(name)
                .ok_or_else(|| GateError::InvalidSchema { missing: vec![name.clone()] })
        })
        .collect::<GateResult<Vec<usize>>>()?;

    let mut values = Vec::with_capacity(table.len() * n_features);
    for (row_idx, row) in table.rows().iter().enumerate() {
        for (name, &col) in config.feature_columns.iter().zip(&indices) {
            let raw = row.get(col).map(String::as_str).unwrap_or("");
            let value = parse_feature(raw).ok_or_else(|| {
                GateError::ModelFailure(format!(
                    "invalid value {:?} for feature '{}' in row {}",
                    raw, name, row_idx + 1
                ))
            })?;
            values.push(value);
        }
    }

    Array2::from_shape_vec((table.len(), n_features), values)
        .map_err(|e| GateError::ModelFailure(format!("Array error: {}", e)))
}

/// One probability per row, in input order
pub fn score_table(
    table: &FeatureTable,
    config: &GateConfig,
    classifier: &dyn RiskClassifier,
) -> GateResult<Vec<f32>> {
    if table.is_empty() {
        log::info!("No patches to score");
        return Ok(Vec::new());
    }

    let matrix = feature_matrix(table, config)?;

    log::info!(
        "Scoring {} patches with threshold={} using {}",
        matrix.nrows(),
        config.risk_threshold.value(),
        classifier.name()
    );

    let probs = classifier.predict_probability(matrix.view())?;

    if probs.len() != matrix.nrows() {
        return Err(GateError::ModelFailure(format!(
            "classifier returned {} probabilities for {} rows",
            probs.len(),
            matrix.nrows()
        )));
    }
    if let Some((row, p)) = probs.iter().enumerate().find(|(_, p)| !(0.0..=1.0).contains(*p)) {
        return Err(GateError::ModelFailure(format!(
            "probability {} for row {} is outside [0, 1]",
            p,
            row + 1
        )));
    }

    Ok(probs)
}
