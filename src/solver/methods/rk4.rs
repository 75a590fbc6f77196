//! Runge-Kutta 4 (RK4) integrator
//!
//! # Mathematical Background
//!
//! The classical fourth-order Runge-Kutta method integrates the decay
//! ODE
//!
//! ```text
//! dG/dt = f(G) = k2·(G0 − G) − k1·G
//! ```
//!
//! using a weighted average of four slope estimates per step:
//!
//! ```text
//! K₁ = f(Gₙ)
//! K₂ = f(Gₙ + h/2 · K₁)
//! K₃ = f(Gₙ + h/2 · K₂)
//! K₄ = f(Gₙ + h · K₃)
//!
//! Gₙ₊₁ = Gₙ + h/6 · (K₁ + 2K₂ + 2K₃ + K₄)
//! ```
//!
//! # Characteristics
//!
//! - **Order**: Fourth-order accurate (global error ~ O(h⁴))
//! - **Stability**: |R(z)| ≤ 1 region roughly z ∈ (−2.78, 0) for the
//!   linear decay problem, so moderate rate constants tolerate h = 0.5
//! - **Complexity**: 4 derivative evaluations per step
//! - **Memory**: O(1), the four slopes are plain scalars
//!
//! # Advantages
//!
//! ✅ Fourth-order accuracy (halving h cuts the error ~16×)
//! ✅ Excellent accuracy/cost tradeoff for the smooth decay dynamics
//! ✅ No tuning parameters beyond the step size
//!
//! # Limitations
//!
//! ⚠️ 4× more derivative evaluations than Euler
//! ⚠️ Explicit: diverges for rate constants far outside the stable
//!    region (reported as [`FitError::NumericOverflow`])
//! ⚠️ Fixed step (not adaptive)
//!
//! # When to Use
//!
//! This is the production integrator for estimation runs. Every loss
//! evaluation integrates each observation, so the per-call cost
//! matters; RK4 keeps the step count small for the accuracy the fit
//! needs.
//!
//! # Comparison with Euler
//!
//! | Method | Order | Evals/Step | Error  |
//! |--------|-------|------------|--------|
//! | Euler  | 1     | 1          | O(h)   |
//! | RK4    | 4     | 4          | O(h⁴)  |
//!
//! [`FitError::NumericOverflow`]: crate::error::FitError::NumericOverflow

use crate::error::FitResult;
use crate::kinetics::RateConstants;
use crate::solver::traits::Integrator;
use crate::solver::{validate_concentration, validate_step_size};

// =================================================================================================
// RK4 Integrator
// =================================================================================================

/// Classical fourth-order Runge-Kutta integrator with a fixed step.
///
/// # Algorithm
///
/// Starting from `G = G0` at `t = 0`, steps are taken until the
/// accumulated time reaches the requested elapsed time:
///
/// 1. **Stage 1**: K₁ = f(Gₙ) — slope at the beginning of the interval
/// 2. **Stage 2**: K₂ = f(Gₙ + h/2·K₁) — slope at the midpoint using K₁
/// 3. **Stage 3**: K₃ = f(Gₙ + h/2·K₂) — slope at the midpoint using K₂
/// 4. **Stage 4**: K₄ = f(Gₙ + h·K₃) — slope at the end using K₃
/// 5. **Update**: Gₙ₊₁ = Gₙ + h/6·(K₁ + 2K₂ + 2K₃ + K₄)
///
/// A non-positive elapsed time performs no steps and returns the
/// initial concentration. When the step does not divide the elapsed
/// time, the final step overshoots it (see the stepping convention on
/// [`Integrator`]).
///
/// # Example
///
/// ```rust
/// use kinfit_rs::kinetics::RateConstants;
/// use kinfit_rs::solver::{Integrator, Rk4Integrator};
///
/// let rates = RateConstants::new(1.0, 1.0);
/// let integrator = Rk4Integrator::new();
///
/// // With k1 = k2 the system settles at half the initial concentration
/// let g = integrator.integrate(&rates, 20.0, 40.0).unwrap();
/// assert!((g - 10.0).abs() < 0.01);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rk4Integrator {
    step: f64,
}

impl Rk4Integrator {
    /// Default step size, suited to rate constants of order 0.01–1
    pub const DEFAULT_STEP: f64 = 0.5;

    /// Create an RK4 integrator with the default step size
    pub fn new() -> Self {
        Self {
            step: Self::DEFAULT_STEP,
        }
    }

    /// Create an RK4 integrator with a custom step size
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

impl Default for Rk4Integrator {
    fn default() -> Self {
        Self::new()
    }
}

impl Integrator for Rk4Integrator {
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

        // ====== Time Integration ======

        while t < elapsed_time {
            t += h;
            step += 1;

            // ====== RK4 Stages ======

            let k1 = rates.derivative(g, g0);
            let k2 = rates.derivative(g + h / 2.0 * k1, g0);
            let k3 = rates.derivative(g + h / 2.0 * k2, g0);
            let k4 = rates.derivative(g + h * k3, g0);

            // ====== RK4 Update ======

            // Simpson weights: endpoints 1/6 each, midpoints 1/3 each
            g += h / 6.0 * (k1 + 2.0 * k2 + 2.0 * k3 + k4);

            // ====== Validation ======

            validate_concentration(g, step)?;
        }

        Ok(g)
    }

    fn step_size(&self) -> f64 {
        self.step
    }

    fn name(&self) -> &'static str {
        "Runge-Kutta 4"
    }
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    // ====== Creation tests ======

    #[test]
    fn creation_uses_default_step() {
        let integrator = Rk4Integrator::new();
        assert_eq!(integrator.step_size(), 0.5);
        assert_eq!(integrator.name(), "Runge-Kutta 4");
    }

    #[test]
    fn default_matches_new() {
        assert_eq!(Rk4Integrator::default(), Rk4Integrator::new());
    }

    #[test]
    fn custom_step_is_accepted() {
        let integrator = Rk4Integrator::with_step(0.125).unwrap();
        assert_eq!(integrator.step_size(), 0.125);
    }

    #[test]
    fn non_positive_step_is_rejected() {
        assert!(Rk4Integrator::with_step(0.0).is_err());
        assert!(Rk4Integrator::with_step(-0.5).is_err());
        assert!(Rk4Integrator::with_step(f64::NAN).is_err());
    }

    // ====== Degenerate time tests ======

    #[test]
    fn zero_elapsed_time_returns_initial_concentration() {
        let rates = RateConstants::new(0.3, 0.1);
        let integrator = Rk4Integrator::new();

        assert_eq!(integrator.integrate(&rates, 17.0, 0.0).unwrap(), 17.0);
    }

    #[test]
    fn negative_elapsed_time_returns_initial_concentration() {
        let rates = RateConstants::new(0.3, 0.1);
        let integrator = Rk4Integrator::new();

        assert_eq!(integrator.integrate(&rates, 17.0, -4.0).unwrap(), 17.0);
    }

    // ====== Numerical accuracy tests ======

    #[test]
    fn single_step_matches_hand_computed_stages() {
        // Pure decay: k2 = 0, so f(G) = -k1·G with a known staged update
        let rates = RateConstants::new(0.3, 0.0);
        let h = 0.5;
        let g0 = 1.0;

        let k1 = -0.3 * g0;
        let k2 = -0.3 * (g0 + h / 2.0 * k1);
        let k3 = -0.3 * (g0 + h / 2.0 * k2);
        let k4 = -0.3 * (g0 + h * k3);
        let expected = g0 + h / 6.0 * (k1 + 2.0 * k2 + 2.0 * k3 + k4);

        let integrator = Rk4Integrator::with_step(h).unwrap();
        let actual = integrator.integrate(&rates, g0, h).unwrap();

        assert_relative_eq!(actual, expected, epsilon = 1e-15);
    }

    #[test]
    fn pure_decay_tracks_the_analytical_solution() {
        // k2 = 0 reduces the ODE to dG/dt = -k1·G with G(t) = G0·exp(-k1·t)
        let k = 0.3;
        let rates = RateConstants::new(k, 0.0);
        let integrator = Rk4Integrator::new();

        for &t in &[1.0, 5.0, 10.0, 20.0] {
            let analytical = 10.0 * (-k * t).exp();
            let numerical = integrator.integrate(&rates, 10.0, t).unwrap();
            let relative_error = ((numerical - analytical) / analytical).abs();

            assert!(
                relative_error < 1e-4,
                "at t = {t}: relative error {relative_error} too large"
            );
        }
    }

    #[test]
    fn symmetric_rates_settle_at_half_the_initial_concentration() {
        let rates = RateConstants::new(1.0, 1.0);
        let integrator = Rk4Integrator::new();

        let g = integrator.integrate(&rates, 20.0, 40.0).unwrap();
        assert!((g - 10.0).abs() < 0.01, "got {g}, expected ~10.0");
    }

    #[test]
    fn long_horizon_approaches_the_equilibrium() {
        let rates = RateConstants::new(0.0310, 0.0653);
        let integrator = Rk4Integrator::new();

        let equilibrium = rates.equilibrium(15.0);
        let g = integrator.integrate(&rates, 15.0, 400.0).unwrap();

        assert_relative_eq!(g, equilibrium, epsilon = 1e-6);
    }

    // ====== Stepping convention tests ======

    #[test]
    fn final_step_overshoots_a_non_divisible_horizon() {
        // h = 0.4 over t = 1.0 takes three steps, integrating to t = 1.2
        let rates = RateConstants::new(0.3, 0.0);
        let h = 0.4;

        let short = Rk4Integrator::with_step(h).unwrap();
        let actual = short.integrate(&rates, 10.0, 1.0).unwrap();

        let three_steps = short.integrate(&rates, 10.0, 1.2).unwrap();
        assert_relative_eq!(actual, three_steps, epsilon = 1e-12);
    }

    // ====== Overflow tests ======

    #[test]
    fn stiff_rates_overflow_loudly() {
        // k1·h far beyond the stability region: the scheme diverges and
        // must report it instead of returning infinity
        let rates = RateConstants::new(1.0e8, 0.0);
        let integrator = Rk4Integrator::new();

        let err = integrator.integrate(&rates, 1.0, 40.0).unwrap_err();
        assert!(err.is_overflow());
        assert!(err.to_string().contains("integration step"));
    }

    #[test]
    fn non_finite_rate_constant_is_caught_at_the_first_step() {
        let rates = RateConstants::new(f64::NAN, 0.0);
        let integrator = Rk4Integrator::new();

        let err = integrator.integrate(&rates, 1.0, 10.0).unwrap_err();
        assert!(err.is_overflow());
        assert!(err.to_string().contains("step 1"));
    }
}
