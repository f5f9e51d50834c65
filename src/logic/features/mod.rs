//! Features Module - Patch signal contract
//!
//! The ordered feature layout shared with the trained classifier.

pub mod layout;

pub use layout::{default_feature_columns, LayoutInfo};
