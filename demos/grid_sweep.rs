//! Example: Initial-Value Grid Sweep
//!
//! Gradient descent converges to the basin of its starting point, so
//! a poor initial guess costs accuracy. This example runs the sweep
//! in three stages:
//!
//! 1. Coarse sweep: 5 × 5 grid of starting values over [0.01, 0.09]²
//! 2. Refined sweep: 3 × 3 grid around the coarse winner
//! 3. Polish: tight-tolerance full-batch descent from the refined best
//!
//! Candidates whose runs diverge numerically are skipped and counted,
//! not treated as failures. Compile with `--features parallel` to fan
//! candidates out on the Rayon pool once the grid reaches the
//! parallel threshold.

use kinfit_rs::{
    data::{synthetic_observations, SyntheticConfig},
    models::DirectRate,
    optimize::{FitContext, FitProblem, Optimizer},
    output::{plot_fit_overlay, PlotConfig},
    solver::Rk4Integrator,
    sweep::{linspace, parallel_threshold, sweep_initial_values, SweepGrid},
};

use nalgebra::DVector;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::Instant;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("═══════════════════════════════════════════════════════");
    println!("  Initial-Value Grid Sweep");
    println!("═══════════════════════════════════════════════════════\n");

    // ====== Problem setup ======

    let truth = DVector::from_vec(vec![0.0310, 0.0653]);
    let observations = synthetic_observations(
        &DirectRate::new(),
        &Rk4Integrator::new(),
        &truth,
        &SyntheticConfig::noiseless(),
        &mut StdRng::seed_from_u64(5),
    )?;

    println!("Noiseless observations : {} rows", observations.len());
    println!("Ground truth           : k1 = {}, k2 = {}\n", truth[0], truth[1]);

    let problem = FitProblem::new(
        Box::new(DirectRate::new()),
        Box::new(Rk4Integrator::new()),
        observations,
    );

    // ====== Stage 1: coarse sweep ======

    println!("═══════════════════════════════════════════════════════");
    println!("  Stage 1: Coarse Sweep (5 × 5)");
    println!("═══════════════════════════════════════════════════════\n");

    let coarse_grid = SweepGrid::new(vec![
        linspace(0.01, 0.09, 5),
        linspace(0.01, 0.09, 5),
    ])?;

    println!("  Candidates         : {}", coarse_grid.len());
    println!("  Parallel threshold : {}\n", parallel_threshold());

    let optimizer = Optimizer::gradient_descent(2e-5, 0.0, 400);

    let clock = Instant::now();
    let coarse = sweep_initial_values(&problem, &optimizer, &coarse_grid, 0)?;
    println!("  ✓ {:.2}s", clock.elapsed().as_secs_f64());

    println!("  Evaluated  : {}", coarse.evaluated);
    println!("  Skipped    : {}", coarse.skipped);
    println!(
        "  Best start : [{:.3}, {:.3}]",
        coarse.best_initial[0], coarse.best_initial[1]
    );
    println!("  Best loss  : {:e}\n", coarse.best.loss);

    // ====== Stage 2: refined sweep around the winner ======

    println!("═══════════════════════════════════════════════════════");
    println!("  Stage 2: Refined Sweep (3 × 3)");
    println!("═══════════════════════════════════════════════════════\n");

    // Half a coarse cell to either side of the winning start
    let half_cell = 0.01;
    let refined_grid = SweepGrid::new(vec![
        linspace(
            coarse.best_initial[0] - half_cell,
            coarse.best_initial[0] + half_cell,
            3,
        ),
        linspace(
            coarse.best_initial[1] - half_cell,
            coarse.best_initial[1] + half_cell,
            3,
        ),
    ])?;

    let clock = Instant::now();
    let refined = sweep_initial_values(&problem, &optimizer, &refined_grid, 100)?;
    println!("  ✓ {:.2}s", clock.elapsed().as_secs_f64());

    println!("  Evaluated  : {}", refined.evaluated);
    println!("  Skipped    : {}", refined.skipped);
    println!(
        "  Best start : [{:.3}, {:.3}]",
        refined.best_initial[0], refined.best_initial[1]
    );
    println!("  Best loss  : {:e}\n", refined.best.loss);

    // ====== Stage 3: polish the refined winner ======

    println!("═══════════════════════════════════════════════════════");
    println!("  Stage 3: Polish");
    println!("═══════════════════════════════════════════════════════\n");

    let polish = Optimizer::gradient_descent(4e-5, 1e-12, 3000);

    let clock = Instant::now();
    let outcome = polish.fit(
        &problem,
        refined.best.parameters.clone(),
        &mut FitContext::seeded(1),
    )?;
    println!("  ✓ {:.2}s, {} iterations\n", clock.elapsed().as_secs_f64(), outcome.iterations);

    println!(
        "{:<12} {:>12} {:>12} {:>12}",
        "Parameter", "Recovered", "Truth", "Rel. error"
    );
    println!("{:-<50}", "");
    for (index, label) in ["k1", "k2"].iter().enumerate() {
        let relative = (outcome.parameters[index] - truth[index]).abs() / truth[index];
        println!(
            "{:<12} {:>12.6} {:>12.6} {:>11.2e}",
            label, outcome.parameters[index], truth[index], relative
        );
    }
    println!("\nFinal loss: {:e}", outcome.loss);

    // ====== Plot ======

    let overlay_path = std::env::temp_dir().join("grid_sweep_overlay.svg");
    let overlay_config = PlotConfig::fit_overlay("Sweep-polished fit");
    plot_fit_overlay(
        &problem,
        &outcome.parameters,
        overlay_path.to_str().unwrap(),
        Some(&overlay_config),
    )?;
    println!("Fit overlay -> {:?}", overlay_path);

    Ok(())
}
