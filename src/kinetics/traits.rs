//! Rate-law traits and types
//!
//! This module defines the core API for kinetic models:
//! - `RateLaw`: trait for all rate-law parameterizations
//! - `RateConstants`: the (k1, k2) pair driving the reversible decay ODE

use crate::error::FitResult;
use crate::kinetics::Conditions;
use nalgebra::DVector;

// =================================================================================================
// Rate Constants
// =================================================================================================

/// First-order rate constants of the reversible decay reaction.
///
/// The reaction network is a consumption step with constant `k1` and a
/// regeneration step with constant `k2`, giving the balance
///
/// ```text
/// dG/dt = k2·(G0 − G) − k1·G
/// ```
///
/// where `G` is the current concentration and `G0` the initial
/// concentration. Both constants have units of 1/time.
///
/// # Example
/// ```
/// use kinfit_rs::kinetics::RateConstants;
///
/// let rates = RateConstants::new(0.0310, 0.0653);
/// let slope = rates.derivative(20.0, 20.0);
///
/// // At G = G0 only the consumption term acts
/// assert!((slope + 0.0310 * 20.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RateConstants {
    /// Consumption rate constant (1/time)
    pub k1: f64,

    /// Regeneration rate constant (1/time)
    pub k2: f64,
}

impl RateConstants {
    /// Create a rate-constant pair
    pub fn new(k1: f64, k2: f64) -> Self {
        Self { k1, k2 }
    }

    /// Right-hand side of the decay ODE at concentration `concentration`
    /// for a run that started at `initial_concentration`
    #[inline]
    pub fn derivative(&self, concentration: f64, initial_concentration: f64) -> f64 {
        self.k2 * (initial_concentration - concentration) - self.k1 * concentration
    }

    /// Steady-state concentration `G0·k2/(k1 + k2)`.
    ///
    /// Only meaningful when `k1 + k2 > 0`; with both constants zero the
    /// system does not move and no steady state exists.
    pub fn equilibrium(&self, initial_concentration: f64) -> f64 {
        initial_concentration * self.k2 / (self.k1 + self.k2)
    }
}

// =================================================================================================
// Rate Law Trait
// =================================================================================================

/// Trait for kinetic rate laws
///
/// # Responsibility
/// Maps a parameter vector (the quantity being estimated) and the
/// experimental conditions to concrete rate constants.
/// Does NOT integrate the ODE (that's the Integrator's job) and does NOT
/// judge fit quality (that's the loss's job).
///
/// The rate law provides the "chemistry" (how parameters become rates),
/// the Integrator provides the "numerics" (how rates become trajectories).
///
/// # Mandatory Point
/// All new kinetic parameterizations MUST implement this trait.
pub trait RateLaw: Send + Sync {
    /// Length of the parameter vector this law expects
    ///
    /// Used by the optimizer to validate initial values and to size
    /// gradients.
    fn parameter_count(&self) -> usize;

    /// Evaluates the rate constants at the given parameters and conditions
    ///
    /// # Arguments
    /// * `parameters` - Candidate parameter vector, length `parameter_count()`
    /// * `conditions` - Experimental conditions of one observation
    ///
    /// # Returns
    /// The (k1, k2) pair, or [`FitError::NumericOverflow`] when the
    /// mapping produces a non-finite constant (e.g. an Arrhenius
    /// exponential blowing up).
    ///
    /// # Panics
    /// Implementations panic when `parameters.len()` disagrees with
    /// `parameter_count()`. That would indicate a programming error, not
    /// a user error.
    ///
    /// [`FitError::NumericOverflow`]: crate::error::FitError::NumericOverflow
    fn rate_constants(
        &self,
        parameters: &DVector<f64>,
        conditions: &Conditions,
    ) -> FitResult<RateConstants>;

    /// Name of the rate law (used for display and export metadata)
    fn name(&self) -> &str;

    /// Description of the rate law (optional)
    fn description(&self) -> Option<&str> {
        None
    }

    /// Default starting point for an estimation run.
    ///
    /// The all-zero vector: no reaction at all, every parameter learned
    /// from the data.
    fn initial_guess(&self) -> DVector<f64> {
        DVector::zeros(self.parameter_count())
    }
}
