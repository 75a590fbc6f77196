//! Example: Direct Rate-Law Estimation
//!
//! Generates a noisy synthetic dataset at known rate constants and
//! recovers them with all three descent variants:
//!
//! - Full-batch gradient descent (flat-gradient stop)
//! - Stochastic gradient descent (patience stop)
//! - Mini-batch gradient descent (patience stop)
//!
//! Compares recovered parameters, losses and wall time, then exports
//! the fitted dataset as CSV and renders the fit-overlay and
//! convergence plots.
//!
//! **Kinetic System**:
//! - Reaction: dG/dt = k2·(G0 − G) − k1·G
//! - Truth: k1 = 0.0310, k2 = 0.0653 (1/time)
//! - Data: three series from 10, 15 and 20 g/L over 40 time units
//! - Noise: 5% relative, uniform

use kinfit_rs::{
    data::{synthetic_observations, SyntheticConfig},
    models::DirectRate,
    optimize::{FitContext, FitProblem, Optimizer, ProgressObserver},
    output::{
        export_fit_csv, export_observations_csv, plot_convergence_comparison, plot_fit_overlay,
        CsvConfig, CsvMetadata, PlotConfig,
    },
    solver::Rk4Integrator,
};

use nalgebra::DVector;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::Instant;

/// Progress sink printing one line every `every` iterations
struct ConsoleProgress {
    every: usize,
}

impl ProgressObserver for ConsoleProgress {
    fn on_iteration(&mut self, iteration: usize, loss: f64, best_loss: f64) {
        if iteration % self.every == 0 {
            println!(
                "    iteration {:>5}: loss {:.6} (best {:.6})",
                iteration, loss, best_loss
            );
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("═══════════════════════════════════════════════════════");
    println!("  Direct Rate-Law Estimation - Three Descent Variants");
    println!("═══════════════════════════════════════════════════════\n");

    // ====== Ground truth ======

    let truth = DVector::from_vec(vec![0.0310, 0.0653]);

    println!("Ground truth:");
    println!("  k1 (consumption)  : {} 1/time", truth[0]);
    println!("  k2 (regeneration) : {} 1/time", truth[1]);
    println!(
        "  G_eq fraction     : {:.4}\n",
        truth[1] / (truth[0] + truth[1])
    );

    // ====== Synthetic data ======

    let config = SyntheticConfig::default();
    let observations = synthetic_observations(
        &DirectRate::new(),
        &Rk4Integrator::new(),
        &truth,
        &config,
        &mut StdRng::seed_from_u64(42),
    )?;

    println!("Synthetic data:");
    println!("  Series  : {:?} g/L", config.initial_concentrations);
    println!("  Horizon : {} time units", config.horizon);
    println!("  Noise   : {}% relative", config.noise_amplitude * 100.0);
    println!("  Rows    : {}\n", observations.len());

    let tmp_dir = std::env::temp_dir();

    let observations_path = tmp_dir.join("fit_direct_observations.csv");
    export_observations_csv(&observations, observations_path.to_str().unwrap(), None)?;
    println!("  Raw data -> {:?}\n", observations_path);

    let problem = FitProblem::new(
        Box::new(DirectRate::new()),
        Box::new(Rk4Integrator::new()),
        observations,
    );

    // ====== Estimation runs ======

    let start = DVector::from_vec(vec![0.05, 0.05]);

    let variants: Vec<(&str, Optimizer)> = vec![
        ("Full batch", Optimizer::gradient_descent(4e-5, 1e-12, 3000)),
        ("Stochastic", Optimizer::stochastic(2e-5, 1e-9, 3000, 200)),
        ("Mini-batch (4)", Optimizer::mini_batch(2e-5, 1e-9, 3000, 200, 4)),
    ];

    println!("═══════════════════════════════════════════════════════");
    println!("  Running Fits: {} Variants", variants.len());
    println!("═══════════════════════════════════════════════════════\n");

    let mut results = Vec::new();

    for (name, optimizer) in &variants {
        println!("  {}:", name);

        let mut ctx = FitContext::seeded(7);
        if *name == "Full batch" {
            ctx = ctx.with_progress(Box::new(ConsoleProgress { every: 500 }));
        }

        let clock = Instant::now();
        let outcome = optimizer.fit(&problem, start.clone(), &mut ctx)?;
        let elapsed = clock.elapsed().as_secs_f64();

        println!(
            "  ✓ {:.2}s, {} iterations, {:?}\n",
            elapsed, outcome.iterations, outcome.status
        );
        results.push((*name, elapsed, outcome));
    }

    // ====== Results ======

    println!("═══════════════════════════════════════════════════════");
    println!("  Results");
    println!("═══════════════════════════════════════════════════════\n");

    println!(
        "{:<16} {:>10} {:>10} {:>12} {:>8} {:>10}",
        "Variant", "k1", "k2", "Loss (MSE)", "Iters", "Time (s)"
    );
    println!("{:-<70}", "");
    for (name, elapsed, outcome) in &results {
        println!(
            "{:<16} {:>10.5} {:>10.5} {:>12.6} {:>8} {:>10.2}",
            name,
            outcome.parameters[0],
            outcome.parameters[1],
            outcome.loss,
            outcome.iterations,
            elapsed
        );
    }
    println!("{:<16} {:>10.5} {:>10.5}", "(truth)", truth[0], truth[1]);

    // ====== Export and plots ======

    let (best_name, _, best) = results
        .iter()
        .min_by(|a, b| a.2.loss.total_cmp(&b.2.loss))
        .unwrap();

    println!("\n═══════════════════════════════════════════════════════");
    println!("  Export: Best Variant Is {}", best_name);
    println!("═══════════════════════════════════════════════════════\n");

    let mut metadata =
        CsvMetadata::from_fit(problem.model_name(), problem.integrator.name(), best);
    metadata.add_custom("Seed".to_string(), "42".to_string());
    let csv_config = CsvConfig::default().with_metadata(metadata);

    let fit_path = tmp_dir.join("fit_direct_fitted.csv");
    export_fit_csv(
        &problem,
        &best.parameters,
        fit_path.to_str().unwrap(),
        Some(&csv_config),
    )?;
    println!("  Fitted CSV  -> {:?}", fit_path);

    let overlay_path = tmp_dir.join("fit_direct_overlay.svg");
    let overlay_config = PlotConfig::fit_overlay(format!("Direct fit ({})", best_name));
    plot_fit_overlay(
        &problem,
        &best.parameters,
        overlay_path.to_str().unwrap(),
        Some(&overlay_config),
    )?;
    println!("  Fit overlay -> {:?}", overlay_path);

    let traces: Vec<(&str, &[f64])> = results
        .iter()
        .map(|(name, _, outcome)| (*name, outcome.loss_history.as_slice()))
        .collect();
    let convergence_path = tmp_dir.join("fit_direct_convergence.svg");
    let convergence_config = PlotConfig::convergence("Loss by descent variant");
    plot_convergence_comparison(
        &traces,
        convergence_path.to_str().unwrap(),
        Some(&convergence_config),
    )?;
    println!("  Convergence -> {:?}", convergence_path);

    Ok(())
}
