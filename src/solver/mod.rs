//! Numerical integrators
//!
//! This module provides the trait and implementations for integrating
//! the reversible decay ODE. An integrator applies a fixed-step
//! numerical scheme to the derivative supplied by a set of rate
//! constants.
//!
//! # Core Concepts
//!
//! ## The Architecture (WHAT vs HOW)
//!
//! Prediction is split across three layers:
//!
//! 1. **Rate law** (`kinetics::RateLaw`) - WHAT reaction to integrate
//!    - Maps estimated parameters to rate constants
//!    - Owns the chemistry, knows nothing about time stepping
//!
//! 2. **Integrator** (`Integrator` trait) - HOW to integrate it
//!    - Applies the numerical scheme (Euler, RK4)
//!    - Owns its step size
//!    - Independent of how the constants were obtained
//!
//! 3. **Fit problem** (`optimize::FitProblem`) - WHY to integrate
//!    - Composes rate law + integrator + observations into a loss
//!
//! This separation allows:
//! - Same rate law with different integrators
//! - Same integrator with different rate laws
//! - Easy benchmarking and convergence-order comparison
//!
//! # Module Organization
//!
//! - **`traits`**: The `Integrator` trait
//! - **`methods`**: Concrete schemes
//!   - `Rk4Integrator`: classical fourth-order Runge-Kutta
//!   - `EulerIntegrator`: forward Euler
//!
//! # Quick Start Example
//!
//! ```rust
//! use kinfit_rs::kinetics::RateConstants;
//! use kinfit_rs::solver::{Integrator, Rk4Integrator};
//!
//! let rates = RateConstants::new(0.0310, 0.0653);
//! let integrator = Rk4Integrator::new();
//!
//! let g = integrator.integrate(&rates, 20.0, 40.0).unwrap();
//! assert!(g > 0.0 && g < 20.0);
//! ```
//!
//! # Error Handling
//!
//! Integration reports [`FitError::NumericOverflow`] as soon as a step
//! produces NaN or infinity. A diverging scheme therefore fails loudly
//! at the step that broke, never by returning a poisoned number.
//!
//! Common causes:
//! - Rate constants far outside the stable region for the step size
//! - Candidate parameters from an optimizer exploring a bad direction
//!
//! [`FitError::NumericOverflow`]: crate::error::FitError::NumericOverflow

// =================================================================================================
// Module Declarations
// =================================================================================================
mod methods;
mod traits;

// =================================================================================================
// Public Re-exports
// =================================================================================================

pub use methods::{EulerIntegrator, Rk4Integrator};
pub use traits::Integrator;

// =================================================================================================
// Helper Functions
// =================================================================================================

use crate::error::{FitError, FitResult};

/// Validate a concentration value for numerical issues
///
/// Checks that an integration step did not produce NaN or Inf, which
/// would indicate the scheme diverged for the given rate constants and
/// step size.
///
/// # Arguments
///
/// * `concentration` - Concentration after the step
/// * `step` - Step index (for error reporting)
pub(crate) fn validate_concentration(concentration: f64, step: usize) -> FitResult<()> {
    if !concentration.is_finite() {
        return Err(FitError::overflow(
            format!("integration step {step}"),
            concentration,
        ));
    }
    Ok(())
}

/// Validate an integrator step size at construction time
pub(crate) fn validate_step_size(step: f64) -> FitResult<()> {
    if !step.is_finite() || step <= 0.0 {
        return Err(FitError::invalid_configuration(format!(
            "integration step must be finite and > 0, got {step}"
        )));
    }
    Ok(())
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finite_concentration_is_accepted() {
        assert!(validate_concentration(12.5, 3).is_ok());
        assert!(validate_concentration(0.0, 0).is_ok());
        assert!(validate_concentration(-4.0, 1).is_ok());
    }

    #[test]
    fn nan_is_reported_with_step_index() {
        let err = validate_concentration(f64::NAN, 42).unwrap_err();
        assert!(err.is_overflow());
        assert!(err.to_string().contains("integration step 42"));
    }

    #[test]
    fn infinity_is_reported() {
        let err = validate_concentration(f64::INFINITY, 7).unwrap_err();
        assert!(err.is_overflow());
    }

    #[test]
    fn step_size_must_be_positive_and_finite() {
        assert!(validate_step_size(0.5).is_ok());
        assert!(validate_step_size(0.0).is_err());
        assert!(validate_step_size(-1.0).is_err());
        assert!(validate_step_size(f64::NAN).is_err());
        assert!(validate_step_size(f64::INFINITY).is_err());
    }
}
