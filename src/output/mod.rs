//! Output module for estimation results
//!
//! This module provides tools to output fit results in various formats:
//! - **Visualization**: PNG/SVG plots using plotters
//! - **Export**: CSV data export for external analysis
//!
//! # Architecture
//!
//! ```text
//! output/
//! ├── mod.rs              ← This file
//! ├── visualization/      ← Plots and graphics
//! │   ├── mod.rs
//! │   ├── config.rs
//! │   ├── fit_plot.rs
//! │   └── convergence.rs
//! └── export/             ← Data export
//!     ├── mod.rs
//!     └── csv.rs
//! ```
//!
//! # Quick Start
//!
//! ## Visualization
//!
//! ```rust,ignore
//! use kinfit_rs::output::visualization::{plot_fit_overlay, PlotConfig};
//!
//! // Generate PNG plot
//! plot_fit_overlay(&problem, &outcome.parameters, "fit.png", None)?;
//! ```
//!
//! ## CSV Export
//!
//! ```rust,ignore
//! use kinfit_rs::output::export::{export_fit_csv, CsvConfig};
//!
//! // Export to CSV
//! export_fit_csv(&problem, &outcome.parameters, "fit.csv", None)?;
//! ```
//!
//! # Design Philosophy
//!
//! The output module separates concerns:
//! - **Visualization**: For human interpretation (plots, graphs)
//! - **Export**: For programmatic analysis (CSV)
//!
//! Both sub-modules read the same `FitProblem` and parameter vectors the
//! optimizer works with, so a finished fit can be rendered and exported
//! without reshaping any data.

pub mod export;
pub mod visualization;

// Re-export commonly used items for convenience
pub use visualization::{
    plot_convergence,
    plot_convergence_comparison,
    plot_fit_overlay,
    PlotConfig,
    NO_TITLE,
};

pub use export::{
    export_fit_csv,
    export_observations_csv,
    CsvConfig,
    CsvMetadata,
};
