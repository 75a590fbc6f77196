//! Example: Arrhenius Parameter Estimation
//!
//! The Arrhenius rate law ties both rate constants to temperature:
//!
//! ```text
//! k_i(T) = k0_i · exp(−Ea_i / (R·T))
//! ```
//!
//! Observations at two temperatures make the activation energies
//! identifiable. This example perturbs the regeneration prefactor
//! k0_2 away from its reference value, lets gradient descent pull it
//! back, and compares the recovered rate constants at both
//! temperatures.
//!
//! **Parameters** (reference values):
//! - k0_1 = 5.91e5, Ea_1 = 10733 cal/mol
//! - k0_2 = 2.07,   Ea_2 = 2224 cal/mol
//! - R = 1.987 cal/(mol·K)

use kinfit_rs::{
    kinetics::{Conditions, ObservationSet, RateLaw},
    models::{arrhenius_k, ArrheniusRate},
    optimize::{FitContext, FitProblem, Optimizer, ProgressObserver},
    output::{export_fit_csv, plot_convergence, CsvConfig, CsvMetadata, PlotConfig},
    solver::{Integrator, Rk4Integrator},
};

use nalgebra::DVector;
use std::time::Instant;

/// Progress sink printing one line every `every` iterations
struct ConsoleProgress {
    every: usize,
}

impl ProgressObserver for ConsoleProgress {
    fn on_iteration(&mut self, iteration: usize, loss: f64, best_loss: f64) {
        if iteration % self.every == 0 {
            println!(
                "    iteration {:>4}: loss {:.8} (best {:.8})",
                iteration, loss, best_loss
            );
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("═══════════════════════════════════════════════════════");
    println!("  Arrhenius Parameter Estimation");
    println!("═══════════════════════════════════════════════════════\n");

    // ====== Ground truth ======

    let truth = DVector::from_vec(vec![5.91e5, 10733.0, 2.07, 2224.0]);

    println!("Rate constants along temperature:");
    println!("{:<10} {:>12} {:>12}", "T (K)", "k1 (1/time)", "k2 (1/time)");
    println!("{:-<36}", "");
    for &temperature in &[313.15, 323.15, 333.15, 353.15] {
        let k1 = arrhenius_k(truth[0], truth[1], temperature)?;
        let k2 = arrhenius_k(truth[2], truth[3], temperature)?;
        println!("{:<10.2} {:>12.5} {:>12.5}", temperature, k1, k2);
    }

    // ====== Observations at two temperatures ======

    let model = ArrheniusRate::new();
    let integrator = Rk4Integrator::with_step(1.0)?;

    let mut conditions = Vec::new();
    let mut measured = Vec::new();
    for &temperature in &[323.15, 353.15] {
        for &initial in &[10.0, 15.0, 20.0] {
            for &time in &[10.0, 20.0, 40.0] {
                let row = Conditions::new(initial, temperature, time);
                let rates = model.rate_constants(&truth, &row)?;
                conditions.push(row);
                measured.push(integrator.integrate(&rates, initial, time)?);
            }
        }
    }
    let observations = ObservationSet::new(conditions, measured)?;

    println!(
        "\nObservations: {} rows at 323.15 K and 353.15 K\n",
        observations.len()
    );

    let problem = FitProblem::new(
        Box::new(ArrheniusRate::new()),
        Box::new(Rk4Integrator::with_step(1.0)?),
        observations,
    );

    // ====== Perturbed start ======

    // The four parameters span eight orders of magnitude; this run
    // disturbs only the regeneration prefactor and recovers it.
    let mut start = truth.clone();
    start[2] = 2.5;

    println!("Start: k0_2 perturbed to {} (truth {})\n", start[2], truth[2]);

    // ====== Estimation run ======

    println!("═══════════════════════════════════════════════════════");
    println!("  Running Fit");
    println!("═══════════════════════════════════════════════════════\n");

    let optimizer = Optimizer::gradient_descent(1e-2, 0.0, 400);
    let mut ctx =
        FitContext::seeded(0).with_progress(Box::new(ConsoleProgress { every: 50 }));

    let clock = Instant::now();
    let outcome = optimizer.fit(&problem, start.clone(), &mut ctx)?;
    let elapsed = clock.elapsed().as_secs_f64();

    println!(
        "\n  ✓ {:.2}s, {} iterations, final loss {:e}\n",
        elapsed, outcome.iterations, outcome.loss
    );

    // ====== Recovered parameters ======

    println!("═══════════════════════════════════════════════════════");
    println!("  Recovered Parameters");
    println!("═══════════════════════════════════════════════════════\n");

    let labels = ["k0_1", "Ea_1", "k0_2", "Ea_2"];
    println!(
        "{:<8} {:>14} {:>14} {:>14}",
        "", "Start", "Recovered", "Truth"
    );
    println!("{:-<52}", "");
    for (index, label) in labels.iter().enumerate() {
        println!(
            "{:<8} {:>14.4} {:>14.4} {:>14.4}",
            label, start[index], outcome.parameters[index], truth[index]
        );
    }

    println!("\nRate constants at the measured temperatures:");
    println!(
        "{:<10} {:>14} {:>14} {:>12}",
        "T (K)", "k2 recovered", "k2 truth", "Rel. diff"
    );
    println!("{:-<52}", "");
    for &temperature in &[323.15, 353.15] {
        let recovered = arrhenius_k(outcome.parameters[2], outcome.parameters[3], temperature)?;
        let reference = arrhenius_k(truth[2], truth[3], temperature)?;
        println!(
            "{:<10.2} {:>14.6} {:>14.6} {:>11.4}%",
            temperature,
            recovered,
            reference,
            (recovered - reference).abs() / reference * 100.0
        );
    }

    // ====== Export and plot ======

    println!("\n═══════════════════════════════════════════════════════");
    println!("  Export");
    println!("═══════════════════════════════════════════════════════\n");

    let tmp_dir = std::env::temp_dir();

    let metadata =
        CsvMetadata::from_fit(problem.model_name(), problem.integrator.name(), &outcome);
    let csv_config = CsvConfig::default().with_metadata(metadata);
    let fit_path = tmp_dir.join("fit_arrhenius_fitted.csv");
    export_fit_csv(
        &problem,
        &outcome.parameters,
        fit_path.to_str().unwrap(),
        Some(&csv_config),
    )?;
    println!("  Fitted CSV  -> {:?}", fit_path);

    let convergence_path = tmp_dir.join("fit_arrhenius_convergence.svg");
    let convergence_config = PlotConfig::convergence("Arrhenius prefactor recovery");
    plot_convergence(
        &outcome.loss_history,
        convergence_path.to_str().unwrap(),
        Some(&convergence_config),
    )?;
    println!("  Convergence -> {:?}", convergence_path);

    Ok(())
}
