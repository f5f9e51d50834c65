//! Table Module - Input loading and schema validation

pub mod loader;
pub mod schema;

#[cfg(test)]
mod tests;

pub use loader::{load_table, FeatureTable};
pub use schema::validate;
