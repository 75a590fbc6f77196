//! Forward Euler integrator
//!
//! # Mathematical Background
//!
//! The Forward Euler method is the simplest explicit time-stepping
//! scheme for the decay ODE:
//!
//! ```text
//! Gₙ₊₁ = Gₙ + h · f(Gₙ)
//! ```
//!
//! where `f(G) = k2·(G0 − G) − k1·G` is the decay derivative.
//!
//! # Characteristics
//!
//! - **Order**: First-order accurate (global error ~ O(h))
//! - **Stability**: Conditionally stable, `h·(k1 + k2) < 2` on the
//!   decay problem
//! - **Complexity**: 1 derivative evaluation per step
//! - **Memory**: O(1), only the current concentration
//!
//! # Advantages
//!
//! ✅ Simplest possible time integrator
//! ✅ Lowest cost per step
//! ✅ Useful as a convergence-order baseline
//!
//! # Limitations
//!
//! ⚠️ First-order accuracy only (needs a small step for precision)
//! ⚠️ Tighter stability restriction than RK4
//!
//! # When to Use
//!
//! Convergence-order baselines and quick experiments. Production
//! estimation runs use [`Rk4Integrator`](crate::solver::Rk4Integrator),
//! which reaches the same accuracy with far fewer steps.

use crate::error::FitResult;
use crate::kinetics::RateConstants;
use crate::solver::traits::Integrator;
use crate::solver::{validate_concentration, validate_step_size};

// =================================================================================================
// Euler Integrator
// =================================================================================================

/// Forward Euler integrator with a fixed step.
///
/// Shares the stepping convention of [`Rk4Integrator`]: steps are
/// taken until the accumulated time reaches the requested elapsed
/// time, a non-positive elapsed time returns the initial
/// concentration, and a non-divisible horizon is overshot by the last
/// step.
///
/// [`Rk4Integrator`]: crate::solver::Rk4Integrator
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EulerIntegrator {
    step: f64,
}

impl EulerIntegrator {
    /// Default step size, matching the RK4 default for comparisons
    pub const DEFAULT_STEP: f64 = 0.5;

    /// Create an Euler integrator with the default step size
    pub fn new() -> Self {
        Self {
            step: Self::DEFAULT_STEP,
        }
    }

    /// Create an Euler integrator with a custom step size
    ///
    /// # Errors
    /// [`FitError::InvalidConfiguration`] when `step` is not finite
    /// and positive.
    ///
    /// [`FitError::InvalidConfiguration`]: crate::error::FitError::InvalidConfiguration
    pub fn with_step(step: f64) -> FitResult<Self> {
        validate_step_size(step)?;
        Ok(Self { step })
    }
}

impl Default for EulerIntegrator {
    fn default() -> Self {
        Self::new()
    }
}

impl Integrator for EulerIntegrator {
    fn integrate(
        &self,
        rates: &RateConstants,
        initial_concentration: f64,
        elapsed_time: f64,
    ) -> FitResult<f64> {
        let h = self.step;
        let g0 = initial_concentration;

        let mut g = g0;
        let mut t = 0.0;
        let mut step = 0;

        while t < elapsed_time {
            t += h;
            step += 1;

            g += h * rates.derivative(g, g0);

            validate_concentration(g, step)?;
        }

        Ok(g)
    }

    fn step_size(&self) -> f64 {
        self.step
    }

    fn name(&self) -> &'static str {
        "Forward Euler"
    }
}

// =================================================================================================
// Tests
// =================================================================================================
