//! Export module for estimation data and fit results.
//!
//! # Available formats
//!
//! | Format  | Module          | Version |
//! |---------|-----------------|---------|
//! | CSV     | [`csv`]         | v0.1.0  |
//!
//! # Usage example
//!
//! ```rust,ignore
//! use kinfit_rs::output::export::{export_fit_csv, export_observations_csv};
//!
//! // The raw measurements
//! export_observations_csv(&observations, "observations.csv", None)?;
//!
//! // Measurements next to the fitted model
//! export_fit_csv(&problem, &outcome.parameters, "fit.csv", None)?;
//! ```

pub mod csv;

// Re-export the most commonly used items at the module level so users can write:
//   use kinfit_rs::output::export::{export_fit_csv, CsvConfig};
// instead of the full sub-module path.
pub use csv::{export_fit_csv, export_observations_csv, CsvConfig, CsvMetadata};
