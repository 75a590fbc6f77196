//! Numerical integrator trait
//!
//! # Design Philosophy
//!
//! The integrator answers exactly one question: given fixed rate
//! constants, what concentration does the decay ODE predict after a
//! given time? Everything else (which parameters produced the
//! constants, how good the prediction is) belongs to the rate law and
//! the optimizer.
//!
//! # Stability Guarantee
//!
//! - `Integrator` trait: STABLE, new methods get their own traits
//! - Implementations: EXTENSIBLE (new schemes can be added freely)

use crate::error::FitResult;
use crate::kinetics::RateConstants;

// =================================================================================================
// Integrator Trait
// =================================================================================================

/// Trait for fixed-step ODE integrators of the decay equation
///
/// # Responsibility
/// Advances the concentration of the reversible decay ODE
///
/// ```text
/// dG/dt = k2·(G0 − G) − k1·G,    G(0) = G0
/// ```
///
/// from `t = 0` to the requested elapsed time. Implementations own
/// their step size; callers choose accuracy by choosing the
/// implementation and its step.
///
/// # Stepping Convention
///
/// All implementations step until the accumulated time reaches the
/// requested elapsed time. When the step does not divide the elapsed
/// time evenly, the final step carries the state past it; pick a step
/// that divides the horizon when exact endpoints matter. A
/// non-positive elapsed time performs no steps and returns the initial
/// concentration unchanged.
pub trait Integrator: Send + Sync {
    /// Predicted concentration after `elapsed_time`, starting from
    /// `initial_concentration` at `t = 0`.
    ///
    /// # Errors
    /// [`FitError::NumericOverflow`] when an integration step produces
    /// a non-finite concentration (the scheme diverged for these rate
    /// constants and step size).
    ///
    /// [`FitError::NumericOverflow`]: crate::error::FitError::NumericOverflow
    fn integrate(
        &self,
        rates: &RateConstants,
        initial_concentration: f64,
        elapsed_time: f64,
    ) -> FitResult<f64>;

    /// Step size used by this integrator
    fn step_size(&self) -> f64;

    /// Name of the method (used for display and export metadata)
    fn name(&self) -> &str;
}
