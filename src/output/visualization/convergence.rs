//! Convergence plotting for optimizer runs
//!
//! This module plots the per-iteration loss trace recorded in
//! [`FitOutcome::loss_history`](crate::optimize::FitOutcome), either for
//! a single run or overlaid across runs to compare optimizer variants,
//! learning rates or seeds.
//!
//! # Available functions
//!
//! - [`plot_convergence`]            — Single run: loss vs iteration
//! - [`plot_convergence_comparison`] — Overlay several traces on the same axes
//!
//! # Usage
//!
//! ```rust,ignore
//! use kinfit_rs::output::visualization::{plot_convergence, plot_convergence_comparison};
//!
//! let outcome = optimizer.fit(&problem, initial, &mut ctx)?;
//! plot_convergence(&outcome.loss_history, "convergence.png", None)?;
//!
//! plot_convergence_comparison(
//!     &[
//!         ("Gradient descent", &outcome_gd.loss_history),
//!         ("Mini-batch", &outcome_mb.loss_history),
//!     ],
//!     "comparison.png",
//!     None,
//! )?;
//! ```

use plotters::prelude::*;
use std::error::Error;

use super::config::{PlotConfig, NO_TITLE};

// =================================================================================================
// Helper Functions
// =================================================================================================

/// Reject traces a chart cannot represent
fn validate_trace(label: &str, history: &[f64]) -> Result<(), Box<dyn Error>> {
    if history.is_empty() {
        return Err(format!("Loss trace '{label}' is empty; nothing to plot").into());
    }
    if let Some(index) = history.iter().position(|loss| !loss.is_finite()) {
        return Err(format!(
            "Loss trace '{label}' contains a non-finite value at iteration {index}"
        )
        .into());
    }
    Ok(())
}

// =================================================================================================
// Public API
// =================================================================================================

/// Plot the loss trace of a single optimizer run
///
/// Iterations run along the x-axis, the recorded batch loss along the
/// y-axis on a linear scale.
///
/// # Arguments
///
/// * `history`     — Per-iteration losses, usually `outcome.loss_history`
/// * `output_path` — Output file path (`.png` → bitmap, `.svg` → vector)
/// * `config`      — Optional plot configuration; `None` uses defaults
///
/// # Errors
///
/// Returns `Err` if the trace is empty, contains a non-finite value, or
/// the backend cannot write to `output_path`.
///
/// # Example
///
/// ```rust,ignore
/// use kinfit_rs::output::visualization::plot_convergence;
///
/// plot_convergence(&outcome.loss_history, "convergence.png", None)?;
/// ```
pub fn plot_convergence(
    history: &[f64],
    output_path: &str,
    config: Option<&PlotConfig>,
) -> Result<(), Box<dyn Error>> {
    validate_trace("history", history)?;

    let default_config = PlotConfig::convergence(NO_TITLE);
    let config = config.unwrap_or(&default_config);

    // A one-entry trace still needs a non-degenerate x-range
    let max_iteration = ((history.len() - 1) as f64).max(1.0);
    let max_loss = history
        .iter()
        .cloned()
        .fold(f64::NEG_INFINITY, f64::max)
        .max(1e-10);

    let ext = std::path::Path::new(output_path)
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or("png");

    match ext {
        "svg" => {
            let backend = SVGBackend::new(output_path, (config.width, config.height));
            plot_convergence_impl(backend, history, config, max_iteration, max_loss)
        }
        _ => {
            let backend = BitMapBackend::new(output_path, (config.width, config.height));
            plot_convergence_impl(backend, history, config, max_iteration, max_loss)
        }
    }
}

/// Overlay several loss traces on the same axes
///
/// Each trace gets a palette color and a legend entry, so runs with
/// different optimizer variants, batch sizes or seeds can be compared
/// directly. Traces may have different lengths.
///
/// # Arguments
///
/// * `traces`      — `(label, loss history)` pairs
/// * `output_path` — Output file path (`.png` or `.svg`)
/// * `config`      — Optional plot configuration; `None` uses defaults
///
/// # Errors
///
/// Returns `Err` if no traces are given, any trace is empty or carries
/// a non-finite value, or the backend cannot write to `output_path`.
///
/// # Example
///
/// ```rust,ignore
/// use kinfit_rs::output::visualization::plot_convergence_comparison;
///
/// plot_convergence_comparison(
///     &[("Full batch", &gd.loss_history), ("Stochastic", &sgd.loss_history)],
///     "comparison.png",
///     None,
/// )?;
/// ```
pub fn plot_convergence_comparison(
    traces: &[(&str, &[f64])],
    output_path: &str,
    config: Option<&PlotConfig>,
) -> Result<(), Box<dyn Error>> {
    if traces.is_empty() {
        return Err("No loss traces provided".into());
    }
    for (label, history) in traces {
        validate_trace(label, history)?;
    }

    let default_config = PlotConfig::convergence(NO_TITLE);
    let config = config.unwrap_or(&default_config);

    let max_iteration = traces
        .iter()
        .map(|(_, history)| (history.len() - 1) as f64)
        .fold(0.0_f64, f64::max)
        .max(1.0);

    let max_loss = traces
        .iter()
        .flat_map(|(_, history)| history.iter())
        .cloned()
        .fold(f64::NEG_INFINITY, f64::max)
        .max(1e-10);

    let ext = std::path::Path::new(output_path)
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or("png");

    match ext {
        "svg" => {
            let backend = SVGBackend::new(output_path, (config.width, config.height));
            plot_comparison_impl(backend, traces, config, max_iteration, max_loss)
        }
        _ => {
            let backend = BitMapBackend::new(output_path, (config.width, config.height));
            plot_comparison_impl(backend, traces, config, max_iteration, max_loss)
        }
    }
}

// =================================================================================================
// Private Plot Implementations
// =================================================================================================

/// Render a single loss trace with the given drawing backend
fn plot_convergence_impl<DB: DrawingBackend>(
    backend: DB,
    history: &[f64],
    config: &PlotConfig,
    max_iteration: f64,
    max_loss: f64,
) -> Result<(), Box<dyn Error>>
where
    DB::ErrorType: 'static,
{
    let root = backend.into_drawing_area();
    root.fill(&config.background)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(&config.title, ("sans-serif", 40).into_font())
        .margin(15)
        .x_label_area_size(45)
        .y_label_area_size(60)
        .build_cartesian_2d(0.0..max_iteration, 0.0..(max_loss * 1.1))?;

    if config.show_grid {
        chart
            .configure_mesh()
            .x_desc(&config.xlabel)
            .y_desc(&config.ylabel)
            .x_label_formatter(&|x| format!("{:.0}", x))
            .y_label_formatter(&|y| format!("{:.2e}", y))
            .draw()?;
    }

    chart
        .draw_series(LineSeries::new(
            history.iter().enumerate().map(|(i, l)| (i as f64, *l)),
            ShapeStyle::from(&config.line_color).stroke_width(config.line_width),
        ))?
        .label("Loss")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &config.line_color));

    chart
        .configure_series_labels()
        .background_style(&config.background.mix(0.8))
        .border_style(&BLACK)
        .draw()?;

    root.present()?;
    Ok(())
}

/// Render overlaid loss traces for comparison
fn plot_comparison_impl<DB: DrawingBackend>(
    backend: DB,
    traces: &[(&str, &[f64])],
    config: &PlotConfig,
    max_iteration: f64,
    max_loss: f64,
) -> Result<(), Box<dyn Error>>
where
    DB::ErrorType: 'static,
{
    let root = backend.into_drawing_area();
    root.fill(&config.background)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(&config.title, ("sans-serif", 40).into_font())
        .margin(15)
        .x_label_area_size(45)
        .y_label_area_size(60)
        .build_cartesian_2d(0.0..max_iteration, 0.0..(max_loss * 1.1))?;

    if config.show_grid {
        chart
            .configure_mesh()
            .x_desc(&config.xlabel)
            .y_desc(&config.ylabel)
            .x_label_formatter(&|x| format!("{:.0}", x))
            .y_label_formatter(&|y| format!("{:.2e}", y))
            .draw()?;
    }

    for (idx, (label, history)) in traces.iter().enumerate() {
        let color = config.get_series_color(idx);

        chart
            .draw_series(LineSeries::new(
                history.iter().enumerate().map(|(i, l)| (i as f64, *l)),
                ShapeStyle::from(&color).stroke_width(config.line_width),
            ))?
            .label(*label)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &color));
    }

    chart
        .configure_series_labels()
        .background_style(&config.background.mix(0.8))
        .border_style(&BLACK)
        .draw()?;

    root.present()?;
    Ok(())
}

// =================================================================================================
// Tests
// =================================================================================================
