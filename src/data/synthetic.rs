//! Synthetic observation generation
//!
//! Produces observation sets from known parameters, for exercising the
//! optimizer against a recoverable ground truth. For each configured
//! initial concentration, time walks from zero to the horizon in random
//! integer steps; each observation is the integrator's prediction at
//! the true parameters, optionally disturbed by relative noise:
//!
//! ```text
//! y_observed = y · (1 + u),    u ~ U(−a, a)
//! ```
//!
//! With `a = 0` the set reproduces the model exactly, which is the
//! regime where a fit should recover the generating parameters to high
//! accuracy.
//!
//! # Example
//!
//! ```rust
//! use kinfit_rs::data::{synthetic_observations, SyntheticConfig};
//! use kinfit_rs::models::DirectRate;
//! use kinfit_rs::solver::Rk4Integrator;
//! use nalgebra::DVector;
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//!
//! let truth = DVector::from_vec(vec![0.031, 0.0653]);
//! let observations = synthetic_observations(
//!     &DirectRate::new(),
//!     &Rk4Integrator::new(),
//!     &truth,
//!     &SyntheticConfig::default(),
//!     &mut StdRng::seed_from_u64(42),
//! )?;
//! assert!(observations.len() >= 3 * 9); // three series, horizon 40, steps of at most 5
//! # Ok::<(), kinfit_rs::error::FitError>(())
//! ```

use nalgebra::DVector;
use rand::rngs::StdRng;
use rand::Rng;

use crate::error::{FitError, FitResult};
use crate::kinetics::{Conditions, ObservationSet, RateLaw};
use crate::solver::Integrator;

// =================================================================================================
// Configuration
// =================================================================================================

/// Shape of a synthetic observation set
#[derive(Debug, Clone, PartialEq)]
pub struct SyntheticConfig {
    /// One observation series per starting concentration
    pub initial_concentrations: Vec<f64>,

    /// Last sampled time; sampling runs while `t <= horizon`
    pub horizon: f64,

    /// Temperature column stamped on every observation \[K\]
    pub temperature: f64,

    /// Relative noise amplitude `a` in `y · U(−a, a)`; zero disables noise
    pub noise_amplitude: f64,

    /// Smallest random time increment between samples
    pub min_time_step: u64,

    /// Largest random time increment between samples
    pub max_time_step: u64,
}

impl Default for SyntheticConfig {
    /// Three decay series from 10, 15 and 20 over 40 time units at
    /// 323.15 K, with 5 % relative noise
    fn default() -> Self {
        Self {
            initial_concentrations: vec![10.0, 15.0, 20.0],
            horizon: 40.0,
            temperature: 323.15,
            noise_amplitude: 0.05,
            min_time_step: 1,
            max_time_step: 5,
        }
    }
}

impl SyntheticConfig {
    /// Default configuration with the noise turned off
    pub fn noiseless() -> Self {
        Self {
            noise_amplitude: 0.0,
            ..Self::default()
        }
    }

    /// Check every field for usability.
    ///
    /// # Errors
    /// [`FitError::InvalidConfiguration`] naming the offending field.
    pub fn validate(&self) -> FitResult<()> {
        if self.initial_concentrations.is_empty() {
            return Err(FitError::invalid_configuration(
                "at least one initial concentration is required",
            ));
        }
        if let Some(value) = self
            .initial_concentrations
            .iter()
            .find(|value| !value.is_finite())
        {
            return Err(FitError::invalid_configuration(format!(
                "initial concentrations must be finite, got {value}"
            )));
        }
        if !self.horizon.is_finite() || self.horizon < 0.0 {
            return Err(FitError::invalid_configuration(format!(
                "sampling horizon must be finite and non-negative, got {}",
                self.horizon
            )));
        }
        if !self.temperature.is_finite() || self.temperature <= 0.0 {
            return Err(FitError::invalid_configuration(format!(
                "temperature must be finite and positive, got {} K",
                self.temperature
            )));
        }
        if !self.noise_amplitude.is_finite() || !(0.0..1.0).contains(&self.noise_amplitude) {
            return Err(FitError::invalid_configuration(format!(
                "noise amplitude must lie in [0, 1), got {}",
                self.noise_amplitude
            )));
        }
        if self.min_time_step == 0 {
            return Err(FitError::invalid_configuration(
                "minimum time step must be at least 1",
            ));
        }
        if self.max_time_step < self.min_time_step {
            return Err(FitError::invalid_configuration(format!(
                "maximum time step {} is smaller than minimum time step {}",
                self.max_time_step, self.min_time_step
            )));
        }
        Ok(())
    }
}

// =================================================================================================
// Generation
// =================================================================================================

/// Generate an observation set from known true parameters.
///
/// Observation times are random, so two calls differ unless the RNG is
/// seeded identically; a seeded RNG reproduces the set exactly.
///
/// # Errors
/// [`FitError::InvalidConfiguration`] for an unusable configuration or
/// a truth vector whose length does not match the model;
/// [`FitError::NumericOverflow`] when integration at the true
/// parameters diverges.
pub fn synthetic_observations(
    model: &dyn RateLaw,
    integrator: &dyn Integrator,
    truth: &DVector<f64>,
    config: &SyntheticConfig,
    rng: &mut StdRng,
) -> FitResult<ObservationSet> {
    config.validate()?;
    if truth.len() != model.parameter_count() {
        return Err(FitError::invalid_configuration(format!(
            "{} expects {} parameters, got a truth vector of length {}",
            model.name(),
            model.parameter_count(),
            truth.len()
        )));
    }

    let mut conditions = Vec::new();
    let mut measured = Vec::new();

    for &initial in &config.initial_concentrations {
        let mut time = 0.0;
        while time <= config.horizon {
            let point = Conditions::new(initial, config.temperature, time);
            let rates = model.rate_constants(truth, &point)?;
            let mut value = integrator.integrate(&rates, initial, time)?;
            if config.noise_amplitude > 0.0 {
                value += value * rng.random_range(-config.noise_amplitude..config.noise_amplitude);
            }
            conditions.push(point);
            measured.push(value);

            time += rng.random_range(config.min_time_step..=config.max_time_step) as f64;
        }
    }

    ObservationSet::new(conditions, measured)
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DirectRate;
    use crate::solver::Rk4Integrator;
    use rand::SeedableRng;

    fn truth() -> DVector<f64> {
        DVector::from_vec(vec![0.031, 0.0653])
    }

    // ====== Configuration tests ======

    #[test]
    fn default_configuration_is_valid() {
        let config = SyntheticConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.initial_concentrations, vec![10.0, 15.0, 20.0]);
        assert_eq!(config.horizon, 40.0);
        assert_eq!(config.noise_amplitude, 0.05);
    }

    #[test]
    fn noiseless_configuration_only_drops_the_noise() {
        let config = SyntheticConfig::noiseless();
        assert_eq!(config.noise_amplitude, 0.0);
        assert_eq!(
            config.initial_concentrations,
            SyntheticConfig::default().initial_concentrations
        );
    }

    #[test]
    fn empty_concentration_list_is_rejected() {
        let config = SyntheticConfig {
            initial_concentrations: vec![],
            ..SyntheticConfig::default()
        };
        assert!(matches!(
            config.validate().unwrap_err(),
            FitError::InvalidConfiguration { .. }
        ));
    }

    #[test]
    fn full_relative_noise_is_rejected() {
        let config = SyntheticConfig {
            noise_amplitude: 1.0,
            ..SyntheticConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn inverted_time_step_bounds_are_rejected() {
        let config = SyntheticConfig {
            min_time_step: 5,
            max_time_step: 2,
            ..SyntheticConfig::default()
        };
        assert!(config.validate().is_err());
    }

    // ====== Generation tests ======

    #[test]
    fn noiseless_observations_reproduce_the_integrator() {
        let model = DirectRate::new();
        let integrator = Rk4Integrator::new();
        let mut rng = StdRng::seed_from_u64(9);

        let observations = synthetic_observations(
            &model,
            &integrator,
            &truth(),
            &SyntheticConfig::noiseless(),
            &mut rng,
        )
        .unwrap();

        for index in 0..observations.len() {
            let (conditions, measured) = observations.row(index);
            let rates = model.rate_constants(&truth(), &conditions).unwrap();
            let clean = integrator
                .integrate(&rates, conditions.initial_concentration, conditions.elapsed_time)
                .unwrap();
            assert_eq!(measured, clean);
        }
    }

    #[test]
    fn noise_stays_within_the_relative_bound() {
        let model = DirectRate::new();
        let integrator = Rk4Integrator::new();
        let mut rng = StdRng::seed_from_u64(13);
        let config = SyntheticConfig::default();

        let observations =
            synthetic_observations(&model, &integrator, &truth(), &config, &mut rng).unwrap();

        for index in 0..observations.len() {
            let (conditions, measured) = observations.row(index);
            let rates = model.rate_constants(&truth(), &conditions).unwrap();
            let clean = integrator
                .integrate(&rates, conditions.initial_concentration, conditions.elapsed_time)
                .unwrap();
            assert!((measured - clean).abs() <= config.noise_amplitude * clean.abs());
        }
    }

    #[test]
    fn sampling_times_follow_the_random_walk_contract() {
        let model = DirectRate::new();
        let integrator = Rk4Integrator::new();
        let mut rng = StdRng::seed_from_u64(5);
        let config = SyntheticConfig::noiseless();

        let observations =
            synthetic_observations(&model, &integrator, &truth(), &config, &mut rng).unwrap();

        let mut previous: Option<Conditions> = None;
        for index in 0..observations.len() {
            let (conditions, _) = observations.row(index);
            assert!(conditions.elapsed_time <= config.horizon);

            match previous {
                // Each series starts over at t = 0
                Some(last) if last.initial_concentration != conditions.initial_concentration => {
                    assert_eq!(conditions.elapsed_time, 0.0);
                }
                Some(last) => {
                    let delta = conditions.elapsed_time - last.elapsed_time;
                    assert!((1.0..=5.0).contains(&delta));
                }
                None => assert_eq!(conditions.elapsed_time, 0.0),
            }
            previous = Some(conditions);
        }
    }

    #[test]
    fn identical_seeds_reproduce_the_set() {
        let model = DirectRate::new();
        let integrator = Rk4Integrator::new();
        let config = SyntheticConfig::default();

        let first = synthetic_observations(
            &model,
            &integrator,
            &truth(),
            &config,
            &mut StdRng::seed_from_u64(21),
        )
        .unwrap();
        let second = synthetic_observations(
            &model,
            &integrator,
            &truth(),
            &config,
            &mut StdRng::seed_from_u64(21),
        )
        .unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn truth_length_mismatch_is_rejected() {
        let err = synthetic_observations(
            &DirectRate::new(),
            &Rk4Integrator::new(),
            &DVector::from_vec(vec![0.031]),
            &SyntheticConfig::noiseless(),
            &mut StdRng::seed_from_u64(0),
        )
        .unwrap_err();

        assert!(matches!(err, FitError::InvalidConfiguration { .. }));
    }
}
