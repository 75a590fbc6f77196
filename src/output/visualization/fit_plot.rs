//! Fit-overlay plotting for estimation results
//!
//! This module plots measured concentrations against the fitted model.
//! Observations are grouped into one series per initial concentration,
//! drawn as scatter points, and each series gets a smooth curve of model
//! predictions at the estimated parameters over the same time span.
//!
//! # Available functions
//!
//! - [`plot_fit_overlay`] — Scatter of the data plus one fitted curve per series
//!
//! # Usage
//!
//! ```rust,ignore
//! use kinfit_rs::output::visualization::plot_fit_overlay;
//!
//! let outcome = optimizer.fit(&problem, initial, &mut ctx)?;
//! plot_fit_overlay(&problem, &outcome.parameters, "fit.png", None)?;
//! ```

use plotters::prelude::*;
use std::error::Error;

use super::config::{PlotConfig, NO_TITLE};
use crate::error::FitResult;
use crate::kinetics::{Conditions, ObservationSet};
use crate::optimize::FitProblem;

/// Samples per fitted curve
const CURVE_POINTS: usize = 200;

// =================================================================================================
// Helper Functions — Group Observations into Series
// =================================================================================================

/// One experiment: all rows sharing an initial concentration
struct ObservedSeries {
    /// Concentration at t = 0 (g/L), the series key
    initial_concentration: f64,

    /// Temperature of the first row; the fitted curve is sampled at it
    temperature: f64,

    /// (elapsed_time, measured) pairs in row order
    points: Vec<(f64, f64)>,
}

/// Group observation rows into per-experiment series, first-seen order
///
/// The grouping key is the initial concentration, matching
/// [`ObservationSet::initial_concentrations`]. Rows of one experiment
/// normally share a temperature; if they do not, the first row wins.
fn collect_series(observations: &ObservationSet) -> Vec<ObservedSeries> {
    let mut series: Vec<ObservedSeries> = Vec::new();

    for index in 0..observations.len() {
        let (conditions, measured) = observations.row(index);
        let point = (conditions.elapsed_time, measured);

        match series
            .iter_mut()
            .find(|s| s.initial_concentration == conditions.initial_concentration)
        {
            Some(existing) => existing.points.push(point),
            None => series.push(ObservedSeries {
                initial_concentration: conditions.initial_concentration,
                temperature: conditions.temperature,
                points: vec![point],
            }),
        }
    }

    series
}

/// Model predictions for one series over `0..=max_time`
///
/// Evaluates the fitted model at `CURVE_POINTS + 1` evenly spaced times
/// under the series' initial concentration and temperature.
fn fitted_curve(
    problem: &FitProblem,
    parameters: &nalgebra::DVector<f64>,
    series: &ObservedSeries,
    max_time: f64,
) -> FitResult<Vec<(f64, f64)>> {
    let mut curve = Vec::with_capacity(CURVE_POINTS + 1);
    for i in 0..=CURVE_POINTS {
        let time = max_time * i as f64 / CURVE_POINTS as f64;
        let conditions = Conditions::new(series.initial_concentration, series.temperature, time);
        curve.push((time, problem.predict(parameters, &conditions)?));
    }
    Ok(curve)
}

// =================================================================================================
// Public API
// =================================================================================================

/// Plot measured data with the fitted model overlaid
///
/// Observations are split into one series per initial concentration and
/// drawn as scatter points; each series gets a curve of predictions at
/// `parameters` over the full observed time span. Colors follow
/// `config.series_colors` or the built-in palette.
///
/// # Arguments
///
/// * `problem`     — The fitted problem (model, integrator, observations)
/// * `parameters`  — Parameter estimate to draw, usually `outcome.parameters`
/// * `output_path` — Output file path (`.png` → bitmap, `.svg` → vector)
/// * `config`      — Optional plot configuration; `None` uses defaults
///
/// # Errors
///
/// Returns `Err` if the parameter vector does not match the model, a
/// prediction overflows, or the backend cannot write to `output_path`.
///
/// # Example
///
/// ```rust,ignore
/// use kinfit_rs::output::visualization::plot_fit_overlay;
///
/// let outcome = optimizer.fit(&problem, initial, &mut ctx)?;
/// plot_fit_overlay(&problem, &outcome.parameters, "fit.png", None)?;
/// ```
pub fn plot_fit_overlay(
    problem: &FitProblem,
    parameters: &nalgebra::DVector<f64>,
    output_path: &str,
    config: Option<&PlotConfig>,
) -> Result<(), Box<dyn Error>> {
    if parameters.len() != problem.model.parameter_count() {
        return Err(format!(
            "Parameter length mismatch: {} expects {} parameters, got {}",
            problem.model_name(),
            problem.model.parameter_count(),
            parameters.len()
        )
        .into());
    }

    let series = collect_series(problem.observations());

    let default_config = PlotConfig::fit_overlay(NO_TITLE);
    let config = config.unwrap_or(&default_config);

    let max_time = series
        .iter()
        .flat_map(|s| s.points.iter().map(|(t, _)| *t))
        .fold(0.0_f64, f64::max);
    // All rows at t = 0 would collapse the x-range; stretch it to [0, 1]
    let max_time = if max_time > 0.0 { max_time } else { 1.0 };

    let curves: Vec<Vec<(f64, f64)>> = series
        .iter()
        .map(|s| fitted_curve(problem, parameters, s, max_time))
        .collect::<FitResult<_>>()?;

    let max_conc = series
        .iter()
        .flat_map(|s| s.points.iter().map(|(_, c)| *c))
        .chain(curves.iter().flatten().map(|(_, c)| *c))
        .fold(f64::NEG_INFINITY, f64::max)
        .max(1e-10);

    let ext = std::path::Path::new(output_path)
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or("png");

    match ext {
        "svg" => {
            let backend = SVGBackend::new(output_path, (config.width, config.height));
            plot_fit_overlay_impl(backend, &series, &curves, config, max_time, max_conc)
        }
        _ => {
            let backend = BitMapBackend::new(output_path, (config.width, config.height));
            plot_fit_overlay_impl(backend, &series, &curves, config, max_time, max_conc)
        }
    }
}

// =================================================================================================
// Private Plot Implementation
// =================================================================================================

/// Render the fit overlay with the given drawing backend
fn plot_fit_overlay_impl<DB: DrawingBackend>(
    backend: DB,
    series: &[ObservedSeries],
    curves: &[Vec<(f64, f64)>],
    config: &PlotConfig,
    max_time: f64,
    max_conc: f64,
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
        .build_cartesian_2d(0.0..max_time, 0.0..(max_conc * 1.1))?;

    if config.show_grid {
        chart
            .configure_mesh()
            .x_desc(&config.xlabel)
            .y_desc(&config.ylabel)
            .x_label_formatter(&|x| format!("{:.0}", x))
            .y_label_formatter(&|y| format!("{:.3}", y))
            .draw()?;
    }

    for (k, (experiment, curve)) in series.iter().zip(curves.iter()).enumerate() {
        // get_series_color falls back to the built-in 10-colour palette (config.rs)
        let color = config.get_series_color(k);

        // Fitted curve first, measured points on top of it
        chart
            .draw_series(LineSeries::new(
                curve.iter().copied(),
                ShapeStyle::from(&color).stroke_width(config.line_width),
            ))?
            .label(format!("G0 = {} g/L", experiment.initial_concentration))
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &color));

        chart.draw_series(
            experiment
                .points
                .iter()
                .map(|(t, c)| Circle::new((*t, *c), 3, color.filled())),
        )?;
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
