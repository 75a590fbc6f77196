//! Estimation problem definition
//!
//! A fit problem combines a rate law, an integrator and the observed
//! data into the loss function the optimizer descends.

use crate::error::{FitError, FitResult};
use crate::kinetics::{Conditions, ObservationSet, RateLaw};
use crate::solver::Integrator;
use nalgebra::DVector;

/// Parameter-estimation problem
///
/// Defines a specific case to fit:
/// - Rate law (how parameters become rate constants)
/// - Integrator (how rate constants become predictions)
/// - Observation set (what the predictions are compared against)
///
/// # Design
///
/// The same problem can be fitted with different optimizer variants.
/// This is the "WHAT to fit" (not "HOW to fit"). All loss evaluations
/// are pure: the same parameters always produce bitwise-identical
/// values, and evaluating a loss never mutates the problem.
///
/// # Loss Definition
///
/// The loss over a batch of observations is the MEAN squared residual,
///
/// ```text
/// L(p) = (1/B) · Σ (predict(p, xᵢ) − yᵢ)²
/// ```
///
/// so its magnitude is comparable across the full set, a mini-batch
/// and a single observation.
///
/// # Examples
///
/// ```rust
/// use kinfit_rs::kinetics::{Conditions, ObservationSet};
/// use kinfit_rs::models::DirectRate;
/// use kinfit_rs::optimize::FitProblem;
/// use kinfit_rs::solver::Rk4Integrator;
/// use nalgebra::DVector;
///
/// let observations = ObservationSet::new(
///     vec![Conditions::new(10.0, 323.15, 0.0), Conditions::new(10.0, 323.15, 5.0)],
///     vec![10.0, 8.4],
/// ).unwrap();
///
/// let problem = FitProblem::new(
///     Box::new(DirectRate::new()),
///     Box::new(Rk4Integrator::new()),
///     observations,
/// );
///
/// let loss = problem.loss(&DVector::from_vec(vec![0.031, 0.0653])).unwrap();
/// assert!(loss.is_finite());
/// ```
pub struct FitProblem {
    /// Rate law (parameters → rate constants)
    pub model: Box<dyn RateLaw>,

    /// Numerical integrator (rate constants → predicted concentration)
    pub integrator: Box<dyn Integrator>,

    /// Observed data, validated on construction
    observations: ObservationSet,
}

impl FitProblem {
    /// Create a fit problem
    pub fn new(
        model: Box<dyn RateLaw>,
        integrator: Box<dyn Integrator>,
        observations: ObservationSet,
    ) -> Self {
        Self {
            model,
            integrator,
            observations,
        }
    }

    /// The observed data
    pub fn observations(&self) -> &ObservationSet {
        &self.observations
    }

    /// Number of observations
    pub fn len(&self) -> usize {
        self.observations.len()
    }

    /// Always false; the observation set is non-empty by construction
    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    /// Model name
    pub fn model_name(&self) -> &str {
        self.model.name()
    }

    /// Predicted concentration for one set of conditions
    pub fn predict(&self, parameters: &DVector<f64>, conditions: &Conditions) -> FitResult<f64> {
        let rates = self.model.rate_constants(parameters, conditions)?;
        self.integrator.integrate(
            &rates,
            conditions.initial_concentration,
            conditions.elapsed_time,
        )
    }

    /// Squared residual of a single observation.
    ///
    /// This is the scalar fast path: the mean over one observation is
    /// the squared residual itself, with no accumulator.
    pub fn observation_loss(
        &self,
        parameters: &DVector<f64>,
        conditions: &Conditions,
        measured: f64,
    ) -> FitResult<f64> {
        let residual = self.predict(parameters, conditions)? - measured;
        Ok(residual * residual)
    }

    /// Mean squared residual over the rows selected by `indices`.
    ///
    /// # Errors
    /// [`FitError::InvalidBatch`] for an empty index batch;
    /// [`FitError::NumericOverflow`] when a prediction or the
    /// accumulated sum is non-finite.
    ///
    /// # Panics
    /// Panics when an index is out of range. Batches are produced by
    /// the sampling strategies, which never emit out-of-range indices,
    /// so this would indicate a programming error.
    pub fn batch_loss(&self, parameters: &DVector<f64>, indices: &[usize]) -> FitResult<f64> {
        match indices {
            [] => Err(FitError::invalid_batch(
                "loss over an empty index batch is undefined",
            )),
            // Single observation: skip the accumulator entirely
            [index] => {
                let (conditions, measured) = self.observations.row(*index);
                self.observation_loss(parameters, &conditions, measured)
            }
            _ => {
                let mut sum = 0.0;
                for &index in indices {
                    let (conditions, measured) = self.observations.row(index);
                    sum += self.observation_loss(parameters, &conditions, measured)?;
                }
                let loss = sum / indices.len() as f64;
                if !loss.is_finite() {
                    return Err(FitError::overflow("loss evaluation", loss));
                }
                Ok(loss)
            }
        }
    }

    /// Mean squared residual over the full observation set
    pub fn loss(&self, parameters: &DVector<f64>) -> FitResult<f64> {
        let mut sum = 0.0;
        for index in 0..self.observations.len() {
            let (conditions, measured) = self.observations.row(index);
            sum += self.observation_loss(parameters, &conditions, measured)?;
        }
        let loss = sum / self.observations.len() as f64;
        if !loss.is_finite() {
            return Err(FitError::overflow("loss evaluation", loss));
        }
        Ok(loss)
    }
}

impl std::fmt::Debug for FitProblem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FitProblem")
            .field("model", &self.model.name())
            .field("integrator", &self.integrator.name())
            .field("observations", &self.observations.len())
            .finish()
    }
}

// ================================================================================================
// Tests
// ================================================================================================
