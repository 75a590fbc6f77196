//! Convergence tests for numerical integrators
//!
//! These tests verify that the integrators exhibit the expected
//! convergence rates when refining the step size, using the
//! closed-form solution of the decay ODE as the reference. All steps
//! are powers of two so that they divide the horizon exactly and no
//! step overshoots the final time.

use kinfit_rs::kinetics::RateConstants;
use kinfit_rs::solver::{EulerIntegrator, Integrator, Rk4Integrator};

mod common;
use common::relaxation_solution;

#[test]
fn test_euler_first_order_convergence() {
    // Euler should have first-order convergence: error ~ O(h)
    // When h → h/2, error should → error/2

    let rates = RateConstants::new(0.1, 0.2);
    let initial = 20.0;
    let total_time = 5.0;
    let exact = relaxation_solution(&rates, initial, total_time);

    let steps = [0.5, 0.25, 0.125, 0.0625];
    let mut errors = Vec::new();

    for &step in &steps {
        let euler = EulerIntegrator::with_step(step).unwrap();
        let value = euler.integrate(&rates, initial, total_time).unwrap();
        errors.push((value - exact).abs());
    }

    // Check convergence ratios
    for i in 0..errors.len() - 1 {
        let ratio = errors[i] / errors[i + 1];
        println!("Euler convergence ratio {}->{}: {}", i, i + 1, ratio);

        // Should be close to 2 for first-order
        assert!(
            ratio > 1.8 && ratio < 2.2,
            "Convergence ratio {} not first-order",
            ratio
        );
    }
}

#[test]
fn test_rk4_fourth_order_convergence() {
    // RK4 should have fourth-order convergence: error ~ O(h⁴)
    // When h → h/2, error should → error/16

    let rates = RateConstants::new(0.1, 0.2);
    let initial = 20.0;
    let total_time = 5.0;
    let exact = relaxation_solution(&rates, initial, total_time);

    let steps = [0.5, 0.25, 0.125, 0.0625];
    let mut errors = Vec::new();

    for &step in &steps {
        let rk4 = Rk4Integrator::with_step(step).unwrap();
        let value = rk4.integrate(&rates, initial, total_time).unwrap();
        errors.push((value - exact).abs());
    }

    // Check convergence ratios
    for i in 0..errors.len() - 1 {
        let ratio = errors[i] / errors[i + 1];
        println!("RK4 convergence ratio {}->{}: {}", i, i + 1, ratio);

        // Should be close to 16 for fourth-order
        assert!(
            ratio > 12.0 && ratio < 20.0,
            "Convergence ratio {} not fourth-order",
            ratio
        );
    }
}

#[test]
fn test_rk4_beats_euler_at_the_same_step() {
    let rates = RateConstants::new(0.1, 0.2);
    let initial = 20.0;
    let total_time = 5.0;
    let exact = relaxation_solution(&rates, initial, total_time);
    let step = 0.125;

    let euler_value = EulerIntegrator::with_step(step)
        .unwrap()
        .integrate(&rates, initial, total_time)
        .unwrap();
    let rk4_value = Rk4Integrator::with_step(step)
        .unwrap()
        .integrate(&rates, initial, total_time)
        .unwrap();

    let euler_error = (euler_value - exact).abs();
    let rk4_error = (rk4_value - exact).abs();
    println!("step {step}: Euler error {euler_error:e}, RK4 error {rk4_error:e}");

    assert!(
        rk4_error < euler_error / 10.0,
        "RK4 ({rk4_error:e}) not clearly more accurate than Euler ({euler_error:e})"
    );
}

#[test]
fn test_symmetric_rates_reach_equilibrium() {
    // With k1 = k2 half the material remains at steady state
    let rates = RateConstants::new(1.0, 1.0);
    let initial = 20.0;
    let horizon = 40.0;

    let euler_value = EulerIntegrator::with_step(0.5)
        .unwrap()
        .integrate(&rates, initial, horizon)
        .unwrap();
    let rk4_value = Rk4Integrator::with_step(0.5)
        .unwrap()
        .integrate(&rates, initial, horizon)
        .unwrap();

    assert!(
        (euler_value - 10.0).abs() < 0.01,
        "Euler missed the equilibrium: {euler_value}"
    );
    assert!(
        (rk4_value - 10.0).abs() < 0.01,
        "RK4 missed the equilibrium: {rk4_value}"
    );
}
