//! Common utilities for integration tests

pub mod known_models;
pub mod test_helpers;

// Re-export commonly used items
pub use known_models::{relaxation_solution, ExactRelaxation};
pub use test_helpers::{noiseless_observations, relative_error, series_conditions};
