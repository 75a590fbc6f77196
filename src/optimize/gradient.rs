//! Central-difference gradient estimation
//!
//! # Mathematical Background
//!
//! The loss has no analytic derivative (its value comes out of an ODE
//! integration), so gradients are estimated numerically with the
//! central-difference formula applied per coordinate:
//!
//! ```text
//! ∂f/∂pᵢ ≈ (f(p + h·eᵢ) − f(p − h·eᵢ)) / (2h)
//! ```
//!
//! # Accuracy
//!
//! The truncation error is O(h²) — one order better than the forward
//! difference at the cost of a second function evaluation per
//! coordinate. The default spacing of `1e-6` balances truncation error
//! (shrinks with h) against floating-point cancellation (grows as h
//! shrinks) for losses of order 1.
//!
//! # Cost
//!
//! `2·len(p)` function evaluations per gradient. For the fit problems
//! in this crate each evaluation integrates every observation in the
//! batch, which is why the estimator is the dominant cost of an
//! optimization run.

use crate::error::{FitError, FitResult};
use crate::optimize::FitProblem;
use nalgebra::DVector;

/// Default perturbation spacing for the central difference
pub const DEFAULT_SPACING: f64 = 1e-6;

fn validate_spacing(spacing: f64) -> FitResult<()> {
    if !spacing.is_finite() || spacing <= 0.0 {
        return Err(FitError::invalid_configuration(format!(
            "gradient spacing must be finite and > 0, got {spacing}"
        )));
    }
    Ok(())
}

/// Central-difference gradient of an arbitrary scalar function.
///
/// Each coordinate is perturbed by `±spacing` while all others stay at
/// their base value; the function is never handed a vector with more
/// than one perturbed coordinate.
///
/// # Errors
/// [`FitError::InvalidConfiguration`] for a non-positive spacing, any
/// error returned by `f`, and [`FitError::NumericOverflow`] when a
/// difference quotient itself comes out non-finite.
///
/// # Example
///
/// ```rust
/// use kinfit_rs::optimize::{gradient, DEFAULT_SPACING};
/// use nalgebra::DVector;
///
/// let f = |p: &DVector<f64>| Ok(p[0] * p[0] + 3.0 * p[1] * p[1]);
/// let at = DVector::from_vec(vec![2.0, -1.0]);
///
/// let grad = gradient(f, &at, DEFAULT_SPACING).unwrap();
/// assert!((grad[0] - 4.0).abs() < 1e-6);
/// assert!((grad[1] + 6.0).abs() < 1e-6);
/// ```
pub fn gradient<F>(mut f: F, parameters: &DVector<f64>, spacing: f64) -> FitResult<DVector<f64>>
where
    F: FnMut(&DVector<f64>) -> FitResult<f64>,
{
    validate_spacing(spacing)?;

    let mut grad = DVector::zeros(parameters.len());
    let mut probe = parameters.clone();

    for i in 0..parameters.len() {
        probe[i] = parameters[i] + spacing;
        let forward = f(&probe)?;

        probe[i] = parameters[i] - spacing;
        let backward = f(&probe)?;

        grad[i] = (forward - backward) / (2.0 * spacing);
        probe[i] = parameters[i];

        if !grad[i].is_finite() {
            return Err(FitError::overflow("gradient estimate", grad[i]));
        }
    }

    Ok(grad)
}

/// Gradient of a fit problem's batch loss at the given parameters.
///
/// Thin wrapper over [`gradient`] with the loss restricted to the rows
/// selected by `indices`; this is the form the optimizer consumes.
pub fn batch_loss_gradient(
    problem: &FitProblem,
    parameters: &DVector<f64>,
    indices: &[usize],
    spacing: f64,
) -> FitResult<DVector<f64>> {
    gradient(|p| problem.batch_loss(p, indices), parameters, spacing)
}

// ================================================================================================
// Tests
// ================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    // ====== Accuracy tests ======

    #[test]
    fn quadratic_gradient_matches_the_analytic_derivative() {
        let f = |p: &DVector<f64>| Ok(p[0] * p[0] + 3.0 * p[1] * p[1]);
        let at = DVector::from_vec(vec![2.0, -1.0]);

        let grad = gradient(f, &at, DEFAULT_SPACING).unwrap();

        assert_relative_eq!(grad[0], 4.0, epsilon = 1e-6);
        assert_relative_eq!(grad[1], -6.0, epsilon = 1e-6);
    }

    #[test]
    fn linear_function_is_differentiated_exactly_to_roundoff() {
        // Central difference is exact for affine functions up to cancellation
        let f = |p: &DVector<f64>| Ok(5.0 * p[0] - 2.0 * p[1] + 1.0);
        let at = DVector::from_vec(vec![0.3, 0.7]);

        let grad = gradient(f, &at, DEFAULT_SPACING).unwrap();

        assert_relative_eq!(grad[0], 5.0, epsilon = 1e-9);
        assert_relative_eq!(grad[1], -2.0, epsilon = 1e-9);
    }

    #[test]
    fn gradient_at_a_minimum_is_small() {
        let f = |p: &DVector<f64>| Ok((p[0] - 1.5) * (p[0] - 1.5));
        let at = DVector::from_vec(vec![1.5]);

        let grad = gradient(f, &at, DEFAULT_SPACING).unwrap();
        assert!(grad[0].abs() < 1e-9);
    }

    // ====== Perturbation protocol tests ======

    #[test]
    fn each_call_perturbs_exactly_one_coordinate() {
        let base = DVector::from_vec(vec![1.0, 2.0, 3.0]);
        let mut seen: Vec<DVector<f64>> = Vec::new();

        let _ = gradient(
            |p: &DVector<f64>| {
                seen.push(p.clone());
                Ok(0.0)
            },
            &base,
            DEFAULT_SPACING,
        )
        .unwrap();

        // Two evaluations per coordinate, in +/- order
        assert_eq!(seen.len(), 6);
        for (call, probe) in seen.iter().enumerate() {
            let coordinate = call / 2;
            let sign = if call % 2 == 0 { 1.0 } else { -1.0 };

            for i in 0..base.len() {
                let expected = if i == coordinate {
                    base[i] + sign * DEFAULT_SPACING
                } else {
                    base[i]
                };
                assert_eq!(probe[i], expected, "call {call}, coordinate {i}");
            }
        }
    }

    // ====== Error handling tests ======

    #[test]
    fn non_positive_spacing_is_rejected() {
        let f = |p: &DVector<f64>| Ok(p[0]);
        let at = DVector::from_vec(vec![1.0]);

        assert!(gradient(f, &at, 0.0).is_err());
        assert!(gradient(f, &at, -1e-6).is_err());
        assert!(gradient(f, &at, f64::NAN).is_err());
    }

    #[test]
    fn function_errors_propagate() {
        let f = |_: &DVector<f64>| -> FitResult<f64> {
            Err(FitError::overflow("loss evaluation", f64::INFINITY))
        };
        let at = DVector::from_vec(vec![1.0, 2.0]);

        let err = gradient(f, &at, DEFAULT_SPACING).unwrap_err();
        assert!(err.is_overflow());
    }

    #[test]
    fn non_finite_quotient_is_reported() {
        // Finite values whose difference overflows the quotient
        let f = |p: &DVector<f64>| Ok(if p[0] > 1.0 { f64::MAX } else { -f64::MAX });
        let at = DVector::from_vec(vec![1.0]);

        let err = gradient(f, &at, DEFAULT_SPACING).unwrap_err();
        assert!(err.is_overflow());
        assert!(err.to_string().contains("gradient estimate"));
    }
}
