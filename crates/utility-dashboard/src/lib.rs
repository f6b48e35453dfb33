//! Property codes, utility service scoring, and the property registry that
//! persists them for the utility dashboard.

pub mod config;
pub mod error;
pub mod properties;
pub mod telemetry;
