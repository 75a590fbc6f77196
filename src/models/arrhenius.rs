//! Arrhenius four-parameter rate law
//!
//! Expands pre-exponential factors and activation energies into rate
//! constants through the Arrhenius equation, using each observation's
//! temperature.

use crate::error::{FitError, FitResult};
use crate::kinetics::{Conditions, RateConstants, RateLaw};
use nalgebra::DVector;

/// Gas constant in cal/(mol·K), matching activation energies given in
/// cal/mol.
pub const GAS_CONSTANT: f64 = 1.987;

/// Arrhenius expansion of a single rate constant.
///
/// ```text
/// k(T) = k0 · exp(−Ea / (R·T))
/// ```
///
/// # Arguments
/// * `k0` - Pre-exponential factor (1/time)
/// * `ea` - Activation energy (cal/mol)
/// * `temperature` - Absolute temperature (K)
///
/// # Errors
/// [`FitError::NumericOverflow`] when the exponential produces a
/// non-finite constant. This happens quickly for large negative
/// activation energies, so candidate parameters far from physical
/// values fail loudly instead of poisoning downstream arithmetic.
pub fn arrhenius_k(k0: f64, ea: f64, temperature: f64) -> FitResult<f64> {
    let k = k0 * (-ea / (GAS_CONSTANT * temperature)).exp();

    if !k.is_finite() {
        return Err(FitError::overflow("Arrhenius expansion", k));
    }
    Ok(k)
}

/// Rate law whose parameter vector is `[k0_1, ea_1, k0_2, ea_2]`.
///
/// # Mathematical Background
///
/// Both rate constants of the decay reaction follow the Arrhenius
/// equation:
///
/// ```text
/// k1(T) = k0_1 · exp(−Ea_1 / (R·T))
/// k2(T) = k0_2 · exp(−Ea_2 / (R·T))
/// ```
///
/// with `R = 1.987 cal/(mol·K)` and `T` read from each observation's
/// conditions. Estimating the four Arrhenius parameters instead of the
/// constants themselves lets a single fit describe data collected at
/// several temperatures.
///
/// # Characteristics
///
/// - ✅ Captures the temperature dependence of the reaction
/// - ✅ Pure mapping, no integration state
/// - ⚠️ Four parameters of very different magnitudes (k0 ~ 1e5,
///   Ea ~ 1e4); expect slower convergence than the direct law
/// - ⚠️ The exponential overflows for large negative activation
///   energies; such candidates are reported as errors, and outer
///   searches may skip them
///
/// # Example
/// ```
/// use kinfit_rs::kinetics::{Conditions, RateLaw};
/// use kinfit_rs::models::ArrheniusRate;
/// use nalgebra::DVector;
///
/// let law = ArrheniusRate::new();
/// let parameters = DVector::from_vec(vec![5.91e5, 10733.0, 2.07, 2224.0]);
/// let conditions = Conditions::new(10.0, 323.15, 5.0);
///
/// let rates = law.rate_constants(&parameters, &conditions).unwrap();
/// assert!(rates.k1 > 0.0 && rates.k2 > 0.0);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ArrheniusRate;

impl ArrheniusRate {
    /// Create the Arrhenius four-parameter law
    pub fn new() -> Self {
        Self
    }
}

impl RateLaw for ArrheniusRate {
    fn parameter_count(&self) -> usize {
        4
    }

    fn rate_constants(
        &self,
        parameters: &DVector<f64>,
        conditions: &Conditions,
    ) -> FitResult<RateConstants> {
        // A wrong length here is a programming error, not a user error
        assert_eq!(
            parameters.len(),
            4,
            "ArrheniusRate expects a [k0_1, ea_1, k0_2, ea_2] parameter vector, got length {}",
            parameters.len()
        );

        let k1 = arrhenius_k(parameters[0], parameters[1], conditions.temperature)?;
        let k2 = arrhenius_k(parameters[2], parameters[3], conditions.temperature)?;

        Ok(RateConstants::new(k1, k2))
    }

    fn name(&self) -> &str {
        "Arrhenius"
    }

    fn description(&self) -> Option<&str> {
        Some("Rate constants expanded from [k0_1, ea_1, k0_2, ea_2] via k = k0·exp(−Ea/(R·T))")
    }
}

// =================================================================================================
// Tests
// =================================================================================================
#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    // ====== Expansion tests ======

    #[test]
    fn expansion_matches_the_closed_form() {
        let k = arrhenius_k(2.07, 2224.0, 323.15).unwrap();
        let expected = 2.07 * (-2224.0 / (GAS_CONSTANT * 323.15)).exp();

        assert_relative_eq!(k, expected, epsilon = 1e-15);
    }

    #[test]
    fn zero_prefactor_gives_zero_rate() {
        assert_eq!(arrhenius_k(0.0, 5000.0, 300.0).unwrap(), 0.0);
    }

    #[test]
    fn rate_grows_with_temperature_for_positive_activation_energy() {
        let cold = arrhenius_k(1.0e5, 8000.0, 300.0).unwrap();
        let hot = arrhenius_k(1.0e5, 8000.0, 350.0).unwrap();

        assert!(hot > cold);
    }

    #[test]
    fn large_negative_activation_energy_overflows() {
        let err = arrhenius_k(1.0, -1.0e7, 323.15).unwrap_err();

        assert!(err.is_overflow());
        assert!(err.to_string().contains("Arrhenius expansion"));
    }

    // ====== Rate law tests ======

    #[test]
    fn both_constants_are_expanded() {
        let law = ArrheniusRate::new();
        let parameters = DVector::from_vec(vec![5.91e5, 10733.0, 2.07, 2224.0]);
        let conditions = Conditions::new(10.0, 323.15, 0.0);

        let rates = law.rate_constants(&parameters, &conditions).unwrap();

        assert_relative_eq!(
            rates.k1,
            arrhenius_k(5.91e5, 10733.0, 323.15).unwrap(),
            epsilon = 1e-15
        );
        assert_relative_eq!(
            rates.k2,
            arrhenius_k(2.07, 2224.0, 323.15).unwrap(),
            epsilon = 1e-15
        );
    }

    #[test]
    fn overflow_in_either_pair_is_reported() {
        let law = ArrheniusRate::new();
        let conditions = Conditions::new(10.0, 323.15, 0.0);

        let bad_first = DVector::from_vec(vec![1.0, -1.0e7, 2.07, 2224.0]);
        assert!(law.rate_constants(&bad_first, &conditions).unwrap_err().is_overflow());

        let bad_second = DVector::from_vec(vec![5.91e5, 10733.0, 1.0, -1.0e7]);
        assert!(law.rate_constants(&bad_second, &conditions).unwrap_err().is_overflow());
    }

    #[test]
    fn initial_guess_has_four_zeros() {
        let guess = ArrheniusRate::new().initial_guess();
        assert_eq!(guess.len(), 4);
        assert!(guess.iter().all(|&p| p == 0.0));
    }

    #[test]
    #[should_panic(expected = "expects a [k0_1, ea_1, k0_2, ea_2] parameter vector")]
    fn wrong_parameter_count_panics() {
        let law = ArrheniusRate::new();
        let parameters = DVector::from_vec(vec![1.0, 2.0]);
        let _ = law.rate_constants(&parameters, &Conditions::new(10.0, 323.15, 0.0));
    }
}
