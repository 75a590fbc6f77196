//! Known-solution kinetics for testing
//!
//! The reversible decay ODE has a closed-form solution, making it
//! ideal for validating integrator accuracy and isolating optimizer
//! behavior from discretization error.

use kinfit_rs::error::FitResult;
use kinfit_rs::kinetics::RateConstants;
use kinfit_rs::solver::Integrator;

// =================================================================================================
// Closed-Form Solution
// =================================================================================================

/// Exact solution of dG/dt = k2·(G0 − G) − k1·G with G(0) = G0
///
/// Analytical solution: G(t) = G_eq + (G0 − G_eq)·exp(−(k1+k2)·t)
/// where G_eq = G0·k2/(k1+k2).
///
/// With both rate constants zero the system does not move and the
/// concentration stays at G0.
pub fn relaxation_solution(
    rates: &RateConstants,
    initial_concentration: f64,
    elapsed_time: f64,
) -> f64 {
    let relaxation_rate = rates.k1 + rates.k2;
    if relaxation_rate == 0.0 {
        return initial_concentration;
    }
    let equilibrium = rates.equilibrium(initial_concentration);
    equilibrium
        + (initial_concentration - equilibrium) * (-relaxation_rate * elapsed_time).exp()
}

// =================================================================================================
// Exact Integrator
// =================================================================================================

/// Integrator that evaluates the closed-form solution directly.
///
/// Useful when a test exercises the optimizer rather than the
/// numerics: predictions carry no discretization error, so any
/// residual after a fit comes from the fit itself.
#[derive(Debug, Clone, Copy)]
pub struct ExactRelaxation;

impl Integrator for ExactRelaxation {
    fn integrate(
        &self,
        rates: &RateConstants,
        initial_concentration: f64,
        elapsed_time: f64,
    ) -> FitResult<f64> {
        Ok(relaxation_solution(rates, initial_concentration, elapsed_time))
    }

    fn step_size(&self) -> f64 {
        // Closed form, no discretization
        0.0
    }

    fn name(&self) -> &str {
        "Exact Relaxation"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_solution_starts_at_the_initial_concentration() {
        let rates = RateConstants::new(0.3, 0.7);
        assert_eq!(relaxation_solution(&rates, 20.0, 0.0), 20.0);
    }

    #[test]
    fn test_solution_relaxes_to_equilibrium() {
        let rates = RateConstants::new(0.0310, 0.0653);
        let long_time = relaxation_solution(&rates, 20.0, 1e6);
        assert!((long_time - rates.equilibrium(20.0)).abs() < 1e-9);
    }

    #[test]
    fn test_symmetric_rates_split_the_material_in_half() {
        let rates = RateConstants::new(1.0, 1.0);
        let long_time = relaxation_solution(&rates, 20.0, 100.0);
        assert!((long_time - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_rates_never_move() {
        let rates = RateConstants::new(0.0, 0.0);
        assert_eq!(relaxation_solution(&rates, 15.0, 40.0), 15.0);
    }

    #[test]
    fn test_exact_integrator_matches_the_solution() {
        let rates = RateConstants::new(0.1, 0.2);
        let via_trait = ExactRelaxation.integrate(&rates, 20.0, 5.0).unwrap();
        assert_eq!(via_trait, relaxation_solution(&rates, 20.0, 5.0));
    }
}
