//! Model Module - Classifier capability and thresholding
//!
//! The trained classifier is an external artifact; everything downstream
//! talks to it through `RiskClassifier`.

pub mod inference;
pub mod threshold;

pub use inference::{load_classifier, RiskClassifier};
pub use threshold::RiskThreshold;
