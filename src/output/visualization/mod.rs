//! Visualization module for estimation results
//!
//! This module provides tools to visualize fit results using the `plotters` library.
//!
//! # Organization
//!
//! - **config**: Shared plot configuration (`PlotConfig`)
//! - **fit_plot**: Measured data with the fitted model overlaid
//! - **convergence**: Loss traces of optimizer runs
//!
//! # Quick Start
//!
//! ## Fit Overlay (Data vs Model)
//!
//! ```rust,ignore
//! use kinfit_rs::output::visualization::{plot_fit_overlay, PlotConfig};
//!
//! let outcome = optimizer.fit(&problem, initial, &mut ctx)?;
//!
//! // Plot with default config
//! plot_fit_overlay(&problem, &outcome.parameters, "fit.png", None)?;
//!
//! // Or with custom config
//! let mut config = PlotConfig::fit_overlay("Glucose Decay");
//! config.width = 1920;
//! plot_fit_overlay(&problem, &outcome.parameters, "fit.png", Some(&config))?;
//! ```
//!
//! ## Convergence (Loss vs Iteration)
//!
//! ```rust,ignore
//! use kinfit_rs::output::visualization::plot_convergence;
//!
//! plot_convergence(&outcome.loss_history, "convergence.png", None)?;
//! ```
//!
//! # When to Use Which Module
//!
//! | Use Case | Module | Function |
//! |----------|--------|----------|
//! | Data with the fitted model | `fit_plot` | `plot_fit_overlay` |
//! | Loss trace of one run | `convergence` | `plot_convergence` |
//! | Compare runs | `convergence` | `plot_convergence_comparison` |

pub mod config;
pub mod convergence;
pub mod fit_plot;

pub use config::{IntoOptionalTitle, PlotConfig, NO_TITLE};

pub use convergence::{plot_convergence, plot_convergence_comparison};

pub use fit_plot::plot_fit_overlay;
