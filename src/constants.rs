//! Central Configuration Constants
//!
//! Single source of truth for all configuration defaults.
//! Overrides are resolved in `logic::config`; nothing here is read at runtime
//! except through `GateConfig`.

/// Default model artifact (ONNX export of the trained classifier)
///
/// v001: baseline classifier
/// v002: tuned hyperparameters (current)
pub const DEFAULT_MODEL_PATH: &str = "models/catboost_classifier_v002.onnx";

/// Default risk threshold
///
/// 0.50 balances precision (~85%) against recall (~80%).
/// Raise it (e.g. 0.70) for stricter gating, lower it (e.g. 0.30) for more coverage.
pub const DEFAULT_RISK_THRESHOLD: f64 = 0.50;

/// Canonical identifier column (firmware version label)
pub const IDENTIFIER_COLUMN: &str = "firmware_version";

/// Alternate names accepted for the identifier column
pub const IDENTIFIER_ALIASES: &[&str] = &["version"];

/// Prefix of the audit table written next to the working directory
pub const AUDIT_PREFIX: &str = "scored_";

/// Audit columns appended after the feature columns
pub const RISK_SCORE_COLUMN: &str = "risk_score";
pub const HIGH_RISK_FLAG_COLUMN: &str = "high_risk_flag";

/// App version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// App name (also the per-user config/data directory name)
pub const APP_NAME: &str = "patch-risk-gate";

// ============================================
// Override sources
// ============================================

/// Path of a JSON config file superseding built-in defaults
pub const ENV_CONFIG_FILE: &str = "RISK_GATE_CONFIG";

/// Model artifact path override
pub const ENV_MODEL_PATH: &str = "RISK_GATE_MODEL_PATH";

/// Risk threshold override
pub const ENV_THRESHOLD: &str = "RISK_GATE_THRESHOLD";

/// Config file name looked up under the user config directory
pub const CONFIG_FILE_NAME: &str = "config.json";

// ============================================
// Exit codes (contract consumed by CI orchestration)
// ============================================

pub const EXIT_PASS: i32 = 0;
pub const EXIT_FAIL: i32 = 1;
pub const EXIT_ERROR: i32 = 2;
