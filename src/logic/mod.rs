pub mod config;
pub mod error;
pub mod features;
pub mod gate;
pub mod model;
pub mod table;
