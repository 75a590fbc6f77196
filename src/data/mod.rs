//! Observation data generation
//!
//! Synthetic observation sets with known generating parameters, used by
//! the demos and the end-to-end tests to verify that estimation
//! recovers a planted ground truth.

// module declaration
pub mod synthetic;

// re-export commonly used types for convenience
pub use synthetic::{synthetic_observations, SyntheticConfig};
