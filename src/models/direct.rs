//! Direct two-parameter rate law
//!
//! The simplest parameterization: the estimated vector is the
//! rate-constant pair itself.

use crate::error::FitResult;
use crate::kinetics::{Conditions, RateConstants, RateLaw};
use nalgebra::DVector;

/// Rate law whose parameter vector is `[k1, k2]` directly.
///
/// # Mathematical Background
///
/// The reversible decay reaction
///
/// ```text
/// dG/dt = k2·(G0 − G) − k1·G
/// ```
///
/// is driven by two first-order constants. This law performs no
/// temperature expansion: the constants hold for the temperature the
/// data was collected at, and the `temperature` field of the conditions
/// is ignored.
///
/// # Characteristics
///
/// - ✅ Two parameters, the easiest estimation problem in the crate
/// - ✅ Pure identity mapping, cannot overflow on its own
/// - ⚠️ Valid for a single temperature only; use
///   [`ArrheniusRate`](crate::models::ArrheniusRate) for temperature
///   dependence
///
/// # Example
/// ```
/// use kinfit_rs::kinetics::{Conditions, RateLaw};
/// use kinfit_rs::models::DirectRate;
/// use nalgebra::DVector;
///
/// let law = DirectRate::new();
/// let parameters = DVector::from_vec(vec![0.0310, 0.0653]);
/// let conditions = Conditions::new(10.0, 323.15, 5.0);
///
/// let rates = law.rate_constants(&parameters, &conditions).unwrap();
/// assert_eq!((rates.k1, rates.k2), (0.0310, 0.0653));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectRate;

impl DirectRate {
    /// Create the direct two-parameter law
    pub fn new() -> Self {
        Self
    }
}

impl RateLaw for DirectRate {
    fn parameter_count(&self) -> usize {
        2
    }

    fn rate_constants(
        &self,
        parameters: &DVector<f64>,
        _conditions: &Conditions,
    ) -> FitResult<RateConstants> {
        // A wrong length here is a programming error, not a user error
        assert_eq!(
            parameters.len(),
            2,
            "DirectRate expects a [k1, k2] parameter vector, got length {}",
            parameters.len()
        );

        Ok(RateConstants::new(parameters[0], parameters[1]))
    }

    fn name(&self) -> &str {
        "Direct rate constants"
    }

    fn description(&self) -> Option<&str> {
        Some("Parameter vector is the rate-constant pair [k1, k2]; temperature is ignored")
    }
}

// =================================================================================================
// Tests
// =================================================================================================
#[cfg(test)]
mod tests {
    use super::*;

    fn any_conditions() -> Conditions {
        Conditions::new(20.0, 323.15, 10.0)
    }

    #[test]
    fn parameters_map_through_unchanged() {
        let law = DirectRate::new();
        let parameters = DVector::from_vec(vec![0.4, 0.7]);

        let rates = law.rate_constants(&parameters, &any_conditions()).unwrap();
        assert_eq!(rates, RateConstants::new(0.4, 0.7));
    }

    #[test]
    fn temperature_has_no_effect() {
        let law = DirectRate::new();
        let parameters = DVector::from_vec(vec![0.4, 0.7]);

        let cold = Conditions::new(20.0, 273.15, 10.0);
        let hot = Conditions::new(20.0, 373.15, 10.0);

        assert_eq!(
            law.rate_constants(&parameters, &cold).unwrap(),
            law.rate_constants(&parameters, &hot).unwrap()
        );
    }

    #[test]
    fn initial_guess_has_two_zeros() {
        let guess = DirectRate::new().initial_guess();
        assert_eq!(guess.len(), 2);
        assert!(guess.iter().all(|&p| p == 0.0));
    }

    #[test]
    #[should_panic(expected = "expects a [k1, k2] parameter vector")]
    fn wrong_parameter_count_panics() {
        let law = DirectRate::new();
        let parameters = DVector::from_vec(vec![0.1, 0.2, 0.3]);
        let _ = law.rate_constants(&parameters, &any_conditions());
    }
}
