//! Schema Validator
//!
//! Confirms every feature column and the identifier column are present.
//! The only repair allowed is renaming an identifier alias to the canonical name.

use crate::logic::config::GateConfig;
use crate::logic::error::{GateError, GateResult};

use super::loader::FeatureTable;

/// Required columns absent from the table, in required order
pub fn missing_columns(table: &FeatureTable, required: &[String]) -> Vec<String> {
    required
        .iter()
        .filter(|c| !table.has_column(c))
        .cloned()
        .collect()
}

/// Rename the first present alias to the canonical identifier.
///
/// No-op when the canonical name already exists. Returns the alias renamed, if any.
pub fn normalize_identifier(table: &mut FeatureTable, config: &GateConfig) -> Option<String> {
    if table.has_column(&config.identifier_column) {
        return None;
    }

    let alias = config
        .identifier_aliases
        .iter()
        .find(|alias| table.has_column(alias))?
        .clone();

    table.rename_column(&alias, &config.identifier_column);
    log::info!("Renamed '{}' column to '{}'", alias, config.identifier_column);
    Some(alias)
}

/// Validate (and normalize) the table in place
pub fn validate(table: &mut FeatureTable, config: &GateConfig) -> GateResult<()> {
    let required = config.required_columns();

    if !missing_columns(table, &required).is_empty() {
        normalize_identifier(table, config);
    }

    let missing = missing_columns(table, &required);
    if !missing.is_empty() {
        log::error!("Missing required columns: {:?}", missing);
        return Err(GateError::InvalidSchema { missing });
    }

    Ok(())
}
