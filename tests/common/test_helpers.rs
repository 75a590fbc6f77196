//! Helper functions for integration tests

use kinfit_rs::kinetics::{Conditions, ObservationSet, RateLaw};
use kinfit_rs::solver::Integrator;
use nalgebra::DVector;

/// Condition rows for a grid of experiments: every starting
/// concentration sampled at every time, all at one temperature
pub fn series_conditions(initials: &[f64], times: &[f64], temperature: f64) -> Vec<Conditions> {
    let mut rows = Vec::with_capacity(initials.len() * times.len());
    for &initial in initials {
        for &time in times {
            rows.push(Conditions::new(initial, temperature, time));
        }
    }
    rows
}

/// Observation set whose measured values are the model's own exact
/// predictions at `truth`; a fit against it should recover `truth`
pub fn noiseless_observations(
    model: &dyn RateLaw,
    integrator: &dyn Integrator,
    truth: &DVector<f64>,
    conditions: Vec<Conditions>,
) -> ObservationSet {
    let measured: Vec<f64> = conditions
        .iter()
        .map(|row| {
            let rates = model.rate_constants(truth, row).unwrap();
            integrator
                .integrate(&rates, row.initial_concentration, row.elapsed_time)
                .unwrap()
        })
        .collect();
    ObservationSet::new(conditions, measured).unwrap()
}

/// Compute relative error: |actual - expected| / |expected|
pub fn relative_error(actual: f64, expected: f64) -> f64 {
    if expected.abs() < 1e-10 {
        (actual - expected).abs()
    } else {
        (actual - expected).abs() / expected.abs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_error() {
        assert!((relative_error(1.0, 1.0) - 0.0).abs() < 1e-10);
        assert!((relative_error(1.1, 1.0) - 0.1).abs() < 1e-10);
        assert!((relative_error(0.9, 1.0) - 0.1).abs() < 1e-10);
    }

    #[test]
    fn test_series_conditions_cover_the_grid() {
        let rows = series_conditions(&[10.0, 20.0], &[0.0, 5.0, 10.0], 300.0);

        assert_eq!(rows.len(), 6);
        assert_eq!(rows[0], Conditions::new(10.0, 300.0, 0.0));
        assert_eq!(rows[5], Conditions::new(20.0, 300.0, 10.0));
    }
}
