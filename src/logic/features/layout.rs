//! Feature Layout - Centralized Feature Definition
//!
//! **CRITICAL: This file controls the feature schema shared with the trained model**
//!
//! ## Rules (NEVER break these):
//! 1. Add feature → increment FEATURE_VERSION and retrain
//! 2. Change order → increment FEATURE_VERSION and retrain
//! 3. Remove feature → increment FEATURE_VERSION and retrain
//!
//! All features are PRE-DEPLOYMENT metrics:
//! - `code_churn_score`: lines_changed / days_since_release
//! - `previous_version_error_rate`: historical error rate of the prior release
//! - `avg_device_age_days`: fleet maturity at release time
//! - `is_hotfix`: 0/1 flag for expedited releases
//! - `patch_security`: 0/1 flag for security patches

use crc32fast::Hasher;

// ============================================================================
// FEATURE VERSION
// ============================================================================

/// Current feature layout version
/// MUST be incremented when layout changes
pub const FEATURE_VERSION: u8 = 2;

// ============================================================================
// FEATURE LAYOUT (Authoritative source)
// ============================================================================

/// Feature names in exact order the classifier was trained on
pub const FEATURE_LAYOUT: &[&str] = &[
    "code_churn_score",            // 0: complexity signal
    "previous_version_error_rate", // 1: regression signal
    "avg_device_age_days",         // 2: fleet maturity
    "is_hotfix",                   // 3: expedited release flag
    "patch_security",              // 4: security patch flag
];

/// Total number of features
/// IMPORTANT: Must match FEATURE_LAYOUT.len()!
pub const FEATURE_COUNT: usize = 5;

const _: () = assert!(FEATURE_LAYOUT.len() == FEATURE_COUNT);

// ============================================================================
// LAYOUT HASH
// ============================================================================

/// Compute CRC32 hash of an ordered feature list
/// Used to fingerprint the feature contract in every gate summary
pub fn compute_layout_hash<S: AsRef<str>>(names: &[S]) -> u32 {
    let mut hasher = Hasher::new();

    hasher.update(&[FEATURE_VERSION]);

    for name in names {
        hasher.update(name.as_ref().as_bytes());
        hasher.update(&[0]); // Separator
    }

    hasher.finalize()
}

/// Hash of the built-in layout
pub fn layout_hash() -> u32 {
    compute_layout_hash(FEATURE_LAYOUT)
}

/// Default feature columns as owned strings (seed for `GateConfig`)
pub fn default_feature_columns() -> Vec<String> {
    FEATURE_LAYOUT.iter().map(|s| s.to_string()).collect()
}

// ============================================================================
// LAYOUT INFO
// ============================================================================

/// Layout information for logging / summary output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutInfo {
    pub version: u8,
    pub hash: String,
    pub feature_count: usize,
}

impl LayoutInfo {
    pub fn for_columns(columns: &[String]) -> Self {
        Self {
            version: FEATURE_VERSION,
            hash: format!("{:08x}", compute_layout_hash(columns)),
            feature_count: columns.len(),
        }
    }

    /// True when the columns are exactly the built-in layout
    pub fn is_builtin(&self) -> bool {
        self.hash == format!("{:08x}", layout_hash())
    }
}

// ============================================================================
// TESTS
// ============================================================================
