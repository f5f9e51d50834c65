//! Error handling
//!
//! Every failure of a gate run lands in one of these variants.
//! All of them surface as the ERROR outcome (exit code 2).

use std::path::PathBuf;
use thiserror::Error;

pub type GateResult<T> = Result<T, GateError>;

#[derive(Debug, Error)]
pub enum GateError {
    // Invocation errors
    #[error("Usage: risk-gate path/to/new_firmware_features.csv")]
    Usage,

    #[error("Invalid configuration: {0}")]
    Config(String),

    // Input errors
    #[error("Input features file not found at {}", path.display())]
    NotFound { path: PathBuf },

    #[error("Malformed input table {}: {reason}", path.display())]
    Malformed { path: PathBuf, reason: String },

    #[error("Missing required columns: {}", missing.join(", "))]
    InvalidSchema { missing: Vec<String> },

    // Scoring errors
    #[error("Model failure: {0}")]
    ModelFailure(String),

    // Output errors
    #[error("Failed to write audit table {}: {reason}", path.display())]
    Audit { path: PathBuf, reason: String },
}

/// Coarse error classification carried by `GateOutcome`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Usage,
    Config,
    NotFound,
    Malformed,
    InvalidSchema,
    ModelFailure,
    Audit,
}

impl GateError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            GateError::Usage => ErrorKind::Usage,
            GateError::Config(_) => ErrorKind::Config,
            GateError::NotFound { .. } => ErrorKind::NotFound,
            GateError::Malformed { .. } => ErrorKind::Malformed,
            GateError::InvalidSchema { .. } => ErrorKind::InvalidSchema,
            GateError::ModelFailure(_) => ErrorKind::ModelFailure,
            GateError::Audit { .. } => ErrorKind::Audit,
        }
    }
}
