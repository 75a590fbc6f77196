//! Initial-value sweeps
//!
//! Gradient descent finds the minimum nearest its starting point, and
//! a kinetic loss surface can hold more than one basin. The remedy is
//! a multi-start sweep: run the same optimizer from every point of a
//! grid of initial parameter vectors and keep the run with the lowest
//! full-data loss.
//!
//! # Core Concepts
//!
//! - [`SweepGrid`]: one axis of candidate values per model parameter;
//!   the candidate set is the cartesian product of the axes.
//! - [`sweep_initial_values`]: runs every candidate and returns the
//!   best [`FitOutcome`] together with sweep bookkeeping.
//!
//! Candidates whose runs blow up numerically are skipped and counted,
//! not treated as failures; a sweep only errs when every candidate
//! diverges or a run hits a non-numeric error.
//!
//! # Reproducibility
//!
//! Each candidate gets its own RNG seeded from `base_seed` plus the
//! candidate's index, so runs are independent of execution order. A
//! sweep executed in parallel picks exactly the same winner as the
//! same sweep executed sequentially.

use std::sync::atomic::{AtomicUsize, Ordering};

use nalgebra::DVector;

use crate::error::{FitError, FitResult};
use crate::optimize::{FitContext, FitOutcome, FitProblem, Optimizer};

// =================================================================================================
// Parallel Execution Threshold
// =================================================================================================
//
// Deciding *when* to hand candidates off to Rayon is an execution
// concern of the sweep, not of the optimizer.  It therefore lives here
// rather than in optimize/descent.rs.
//
// The threshold is stored in an AtomicUsize so that it can be changed
// at runtime (useful in benchmarks and tests) without requiring a mutex
// on every sweep call.  Relaxed ordering is sufficient: the value is a
// performance hint, not a synchronisation point.
// =================================================================================================

/// Default number of candidates above which [`sweep_initial_values`]
/// switches to parallel dispatch.
///
/// The crossover is set at 16 candidates.  Each candidate is a full
/// descent run costing many integrations, so the pool dispatch pays for
/// itself quickly; below 16 the sweep is usually over before the pool
/// has warmed up.
const DEFAULT_PARALLEL_THRESHOLD: usize = 16;

/// Runtime-configurable parallel-execution threshold.
///
/// Read via [`parallel_threshold()`], written via [`set_parallel_threshold()`].
static PARALLEL_THRESHOLD: AtomicUsize = AtomicUsize::new(DEFAULT_PARALLEL_THRESHOLD);

/// Return the current parallel-execution threshold.
///
/// [`sweep_initial_values`] dispatches candidates sequentially when the
/// grid holds fewer candidates than this value, and switches to Rayon
/// when it holds at least this many — but only when the crate is
/// compiled with the `parallel` feature.
///
/// # Example
///
/// ```rust
/// use kinfit_rs::sweep::parallel_threshold;
///
/// assert!(parallel_threshold() > 0);
/// ```
pub fn parallel_threshold() -> usize {
    PARALLEL_THRESHOLD.load(Ordering::Relaxed)
}

/// Set the parallel-execution threshold to a new value.
///
/// # Panics
///
/// Panics when `threshold == 0`.  A zero-candidate threshold would
/// force parallel dispatch on every single-candidate sweep, which is
/// never the intended behaviour.
///
/// # Example
///
/// ```rust
/// use kinfit_rs::sweep::{parallel_threshold, set_parallel_threshold};
///
/// let previous = parallel_threshold();
/// set_parallel_threshold(64);
/// assert_eq!(parallel_threshold(), 64);
///
/// // Restore so other tests are not affected.
/// set_parallel_threshold(previous);
/// ```
pub fn set_parallel_threshold(threshold: usize) {
    assert!(threshold > 0, "parallel threshold must be at least 1");
    PARALLEL_THRESHOLD.store(threshold, Ordering::Relaxed);
}

/// RAII guard that saves the current threshold on construction and
/// restores it on drop.
///
/// Only compiled in test builds.  Prevents one test from leaking a
/// modified threshold value into the next.
#[cfg(test)]
pub(crate) struct ThresholdGuard {
    previous: usize,
}

#[cfg(test)]
impl ThresholdGuard {
    /// Set the threshold to `new_value` and return a guard that will
    /// restore the previous value on drop.
    pub(crate) fn save(new_value: usize) -> Self {
        let previous = parallel_threshold();
        set_parallel_threshold(new_value);
        Self { previous }
    }
}

#[cfg(test)]
impl Drop for ThresholdGuard {
    fn drop(&mut self) {
        // Bypass the public setter so that restoring to any value
        // (including the original default) never panics.
        PARALLEL_THRESHOLD.store(self.previous, Ordering::Relaxed);
    }
}

// =================================================================================================
// Sweep Grid
// =================================================================================================

/// Evenly spaced values from `start` to `stop` inclusive.
///
/// The usual way to build a [`SweepGrid`] axis. `count == 1` yields
/// just `start`; `count == 0` yields an empty axis, which the grid
/// constructor rejects.
pub fn linspace(start: f64, stop: f64, count: usize) -> Vec<f64> {
    if count == 1 {
        return vec![start];
    }
    (0..count)
        .map(|i| start + (stop - start) * i as f64 / (count - 1) as f64)
        .collect()
}

/// Grid of candidate initial parameter vectors.
///
/// One axis per model parameter; the candidates are the cartesian
/// product of the axes, enumerated with the last axis varying fastest.
///
/// # Example
///
/// ```rust
/// use kinfit_rs::sweep::{linspace, SweepGrid};
///
/// let grid = SweepGrid::new(vec![
///     linspace(0.0, 0.1, 5), // k1 candidates
///     linspace(0.0, 0.1, 5), // k2 candidates
/// ])?;
/// assert_eq!(grid.len(), 25);
/// # Ok::<(), kinfit_rs::error::FitError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SweepGrid {
    axes: Vec<Vec<f64>>,
}

impl SweepGrid {
    /// Grid from one axis of candidate values per parameter.
    ///
    /// # Errors
    /// [`FitError::InvalidConfiguration`] when the axis list is empty,
    /// any axis is empty, or any candidate value is non-finite.
    pub fn new(axes: Vec<Vec<f64>>) -> FitResult<Self> {
        if axes.is_empty() {
            return Err(FitError::invalid_configuration(
                "a sweep grid needs at least one axis",
            ));
        }
        for (index, axis) in axes.iter().enumerate() {
            if axis.is_empty() {
                return Err(FitError::invalid_configuration(format!(
                    "sweep axis {index} is empty; every parameter needs at least one candidate"
                )));
            }
            if let Some(value) = axis.iter().find(|value| !value.is_finite()) {
                return Err(FitError::invalid_configuration(format!(
                    "sweep axis {index} contains the non-finite value {value}"
                )));
            }
        }
        Ok(Self { axes })
    }

    /// Number of axes, one per model parameter
    pub fn axis_count(&self) -> usize {
        self.axes.len()
    }

    /// Total number of candidates, the product of the axis lengths
    pub fn len(&self) -> usize {
        self.axes.iter().map(Vec::len).product()
    }

    /// Always false; every axis holds at least one value
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Every candidate vector, last axis varying fastest
    pub fn candidates(&self) -> Vec<DVector<f64>> {
        let total = self.len();
        let mut out = Vec::with_capacity(total);
        let mut indices = vec![0usize; self.axes.len()];

        for _ in 0..total {
            out.push(DVector::from_iterator(
                self.axes.len(),
                indices.iter().zip(&self.axes).map(|(&i, axis)| axis[i]),
            ));
            // Odometer increment over the axis indices
            for axis_index in (0..self.axes.len()).rev() {
                indices[axis_index] += 1;
                if indices[axis_index] < self.axes[axis_index].len() {
                    break;
                }
                indices[axis_index] = 0;
            }
        }
        out
    }
}

// =================================================================================================
// Sweep Execution
// =================================================================================================

/// Result of a completed initial-value sweep
#[derive(Debug, Clone, PartialEq)]
pub struct SweepOutcome {
    /// Outcome of the winning run
    pub best: FitOutcome,

    /// The initial vector the winning run started from
    pub best_initial: DVector<f64>,

    /// Candidates whose runs completed
    pub evaluated: usize,

    /// Candidates skipped because their runs diverged numerically
    pub skipped: usize,
}

/// Run `optimizer` from every candidate of `grid` and keep the run
/// with the lowest full-data loss.
///
/// Candidate `i` runs with a context seeded `base_seed + i`, so the
/// sweep is reproducible and order-independent. Ties on the loss keep
/// the earliest candidate in grid order, which makes the parallel and
/// sequential paths pick identically.
///
/// # Errors
/// [`FitError::InvalidConfiguration`] when the grid's axis count does
/// not match the model's parameter count;
/// [`FitError::NumericOverflow`] when every candidate diverged;
/// any non-overflow error from an individual run is propagated as is.
///
/// # Example
///
/// ```rust
/// use kinfit_rs::kinetics::{Conditions, ObservationSet};
/// use kinfit_rs::models::DirectRate;
/// use kinfit_rs::optimize::{FitProblem, Optimizer};
/// use kinfit_rs::solver::Rk4Integrator;
/// use kinfit_rs::sweep::{linspace, sweep_initial_values, SweepGrid};
///
/// let problem = FitProblem::new(
///     Box::new(DirectRate::new()),
///     Box::new(Rk4Integrator::new()),
///     ObservationSet::new(
///         vec![
///             Conditions::new(10.0, 323.15, 5.0),
///             Conditions::new(10.0, 323.15, 25.0),
///         ],
///         vec![8.4, 6.9],
///     )?,
/// );
///
/// let grid = SweepGrid::new(vec![linspace(0.0, 0.1, 2), linspace(0.0, 0.1, 2)])?;
/// let optimizer = Optimizer::gradient_descent(1e-5, 1e-12, 50);
///
/// let sweep = sweep_initial_values(&problem, &optimizer, &grid, 0)?;
/// assert_eq!(sweep.evaluated + sweep.skipped, grid.len());
/// # Ok::<(), kinfit_rs::error::FitError>(())
/// ```
pub fn sweep_initial_values(
    problem: &FitProblem,
    optimizer: &Optimizer,
    grid: &SweepGrid,
    base_seed: u64,
) -> FitResult<SweepOutcome> {
    let expected = problem.model.parameter_count();
    if grid.axis_count() != expected {
        return Err(FitError::invalid_configuration(format!(
            "{} expects {} parameters, got a sweep grid with {} axes",
            problem.model_name(),
            expected,
            grid.axis_count()
        )));
    }

    let candidates = grid.candidates();

    #[cfg(feature = "parallel")]
    {
        if candidates.len() >= parallel_threshold() {
            use rayon::prelude::*;

            let runs = candidates
                .par_iter()
                .enumerate()
                .map(|(index, candidate)| {
                    run_candidate(problem, optimizer, candidate, base_seed, index)
                })
                .collect::<FitResult<Vec<_>>>()?;
            return pick_best(runs, &candidates);
        }
    }

    let runs = candidates
        .iter()
        .enumerate()
        .map(|(index, candidate)| run_candidate(problem, optimizer, candidate, base_seed, index))
        .collect::<FitResult<Vec<_>>>()?;
    pick_best(runs, &candidates)
}

/// One candidate's run: `Ok(Some(..))` on completion, `Ok(None)` when
/// the run diverged and should be skipped, `Err` for everything else
fn run_candidate(
    problem: &FitProblem,
    optimizer: &Optimizer,
    candidate: &DVector<f64>,
    base_seed: u64,
    index: usize,
) -> FitResult<Option<(usize, FitOutcome)>> {
    let mut ctx = FitContext::seeded(base_seed.wrapping_add(index as u64));
    match optimizer.fit(problem, candidate.clone(), &mut ctx) {
        Ok(outcome) => Ok(Some((index, outcome))),
        Err(error) if error.is_overflow() => Ok(None),
        Err(error) => Err(error),
    }
}

fn pick_best(
    runs: Vec<Option<(usize, FitOutcome)>>,
    candidates: &[DVector<f64>],
) -> FitResult<SweepOutcome> {
    let total = runs.len();
    let mut best: Option<(usize, FitOutcome)> = None;
    let mut evaluated = 0usize;

    for (index, outcome) in runs.into_iter().flatten() {
        evaluated += 1;
        let better = match &best {
            None => true,
            Some((_, incumbent)) => outcome.loss < incumbent.loss,
        };
        if better {
            best = Some((index, outcome));
        }
    }

    match best {
        Some((index, outcome)) => Ok(SweepOutcome {
            best: outcome,
            best_initial: candidates[index].clone(),
            evaluated,
            skipped: total - evaluated,
        }),
        None => Err(FitError::overflow(
            format!("initial-value sweep: all {total} candidates diverged"),
            f64::INFINITY,
        )),
    }
}

// =================================================================================================
// Tests
// =================================================================================================
