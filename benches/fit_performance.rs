//! Performance benchmarks for the estimation pipeline
//!
//! The pipeline has three cost layers, benchmarked separately:
//!
//! # What We're Measuring
//!
//! 1. **Integrators** (Euler vs RK4):
//!    - Cost per prediction grows linearly with the horizon
//!    - RK4 does 4 derivative evaluations per step vs Euler's 1
//!
//! 2. **Central-difference gradient**:
//!    - 2 loss evaluations per parameter
//!    - DirectRate (2 parameters) vs ArrheniusRate (4 parameters)
//!      should therefore differ by ≈ 2×
//!
//! 3. **Descent variants** (fixed 50-iteration budget):
//!    - Full-batch: gradient over all rows, every iteration
//!    - Stochastic: gradient over one row, plus the full-data loss
//!      tracked for the stop rule and history
//!    - Mini-batch: between the two
//!
//! # Expected Results
//!
//! **RK4 / Euler ratio** ≈ 4.0 at a shared step size.
//!
//! **Variant ordering**: full batch slowest, stochastic fastest. The
//! gap is smaller than the batch-size ratio suggests because every
//! variant also pays for one full-data loss per iteration.
//!
//! # Running Benchmarks
//!
//! ```bash
//! # Everything
//! cargo bench --bench fit_performance
//!
//! # One layer
//! cargo bench --bench fit_performance Integrator
//! cargo bench --bench fit_performance Gradient
//! cargo bench --bench fit_performance Descent
//! ```

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use nalgebra::DVector;
use std::hint::black_box;

use kinfit_rs::kinetics::{Conditions, ObservationSet, RateConstants, RateLaw};
use kinfit_rs::models::{ArrheniusRate, DirectRate};
use kinfit_rs::optimize::{batch_loss_gradient, FitContext, FitProblem, Optimizer, DEFAULT_SPACING};
use kinfit_rs::solver::{EulerIntegrator, Integrator, Rk4Integrator};

// =================================================================================================
// Fixtures
// =================================================================================================

/// Twelve observations on a 3 × 4 grid, generated by integrating the
/// model at the given truth so that fits stay well-conditioned
fn grid_problem(model: Box<dyn RateLaw>, truth: &DVector<f64>) -> FitProblem {
    let integrator = Rk4Integrator::new();
    let mut conditions = Vec::new();
    let mut measured = Vec::new();

    for &initial in &[10.0, 15.0, 20.0] {
        for &time in &[0.0, 10.0, 20.0, 40.0] {
            let row = Conditions::new(initial, 323.15, time);
            let rates = model.rate_constants(truth, &row).unwrap();
            conditions.push(row);
            measured.push(integrator.integrate(&rates, initial, time).unwrap());
        }
    }

    FitProblem::new(
        model,
        Box::new(Rk4Integrator::new()),
        ObservationSet::new(conditions, measured).unwrap(),
    )
}

fn direct_problem() -> FitProblem {
    grid_problem(
        Box::new(DirectRate::new()),
        &DVector::from_vec(vec![0.0310, 0.0653]),
    )
}

fn arrhenius_problem() -> FitProblem {
    grid_problem(
        Box::new(ArrheniusRate::new()),
        &DVector::from_vec(vec![5.91e5, 10733.0, 2.07, 2224.0]),
    )
}

// =================================================================================================
// Benchmark Functions
// =================================================================================================

/// Single-prediction cost of both integrators across horizons.
///
/// The step size is the shared default, so the horizon sets the step
/// count and the cost should scale linearly with it.
fn benchmark_integrators(c: &mut Criterion) {
    let mut group = c.benchmark_group("Integrator");
    let rates = RateConstants::new(0.0310, 0.0653);

    for &horizon in [10.0, 40.0, 160.0].iter() {
        let steps = (horizon / Rk4Integrator::DEFAULT_STEP) as u64;

        let euler = EulerIntegrator::new();
        group.throughput(Throughput::Elements(steps));
        group.bench_with_input(
            BenchmarkId::new("Forward Euler", horizon),
            &horizon,
            |b, &horizon| {
                b.iter(|| {
                    euler
                        .integrate(black_box(&rates), black_box(20.0), black_box(horizon))
                        .unwrap()
                });
            },
        );

        let rk4 = Rk4Integrator::new();
        group.throughput(Throughput::Elements(steps * 4));
        group.bench_with_input(
            BenchmarkId::new("Runge-Kutta 4", horizon),
            &horizon,
            |b, &horizon| {
                b.iter(|| {
                    rk4.integrate(black_box(&rates), black_box(20.0), black_box(horizon))
                        .unwrap()
                });
            },
        );
    }

    group.finish();
}

/// One full-data gradient estimate for each model.
///
/// Central differences cost 2 loss evaluations per parameter, so the
/// four-parameter Arrhenius law should come in at about twice the
/// two-parameter direct law on the same observation set.
fn benchmark_gradient(c: &mut Criterion) {
    let mut group = c.benchmark_group("Gradient");

    let cases = [
        ("2 parameters", direct_problem(), vec![0.05, 0.05]),
        (
            "4 parameters",
            arrhenius_problem(),
            vec![5.91e5, 10733.0, 2.5, 2224.0],
        ),
    ];

    for (label, problem, at) in cases {
        let indices: Vec<usize> = (0..problem.len()).collect();
        let at = DVector::from_vec(at);

        // Loss evaluations per gradient: 2 per parameter, each over
        // every row
        group.throughput(Throughput::Elements(
            (2 * at.len() * problem.len()) as u64,
        ));
        group.bench_function(label, |b| {
            b.iter(|| {
                batch_loss_gradient(
                    black_box(&problem),
                    black_box(&at),
                    black_box(&indices),
                    DEFAULT_SPACING,
                )
                .unwrap()
            });
        });
    }

    group.finish();
}

/// Fifty-iteration runs of the three descent variants on the same
/// twelve-row problem
fn benchmark_descent_variants(c: &mut Criterion) {
    let mut group = c.benchmark_group("Descent");
    // Each measured iteration is a complete 50-step fit
    group.sample_size(10);

    let problem = direct_problem();
    let start = DVector::from_vec(vec![0.05, 0.05]);

    let variants = [
        ("full batch", Optimizer::gradient_descent(4e-5, 0.0, 50)),
        ("stochastic", Optimizer::stochastic(2e-5, 0.0, 50, 1000)),
        ("mini-batch of 4", Optimizer::mini_batch(2e-5, 0.0, 50, 1000, 4)),
    ];

    for (label, optimizer) in variants {
        group.bench_function(label, |b| {
            b.iter(|| {
                optimizer
                    .fit(
                        black_box(&problem),
                        black_box(start.clone()),
                        &mut FitContext::seeded(0),
                    )
                    .unwrap()
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_integrators,
    benchmark_gradient,
    benchmark_descent_variants,
);
criterion_main!(benches);
