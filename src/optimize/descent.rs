//! Gradient-descent parameter estimation
//!
//! One optimizer drives all three descent variants. They share the same
//! update rule and differ only in the sampling strategy feeding the
//! gradient estimate and in the rule that decides when to stop:
//!
//! # Mathematical Background
//!
//! Each iteration proposes the update
//!
//! ```text
//! p_{n+1} = p_n − α ∇L_B(p_n)
//! ```
//!
//! where α is the learning rate and ∇L_B is the central-difference
//! gradient of the loss restricted to the sampled batch B.
//!
//! # Variants
//!
//! | Constructor                      | Batch per iteration     | Stop rule                      |
//! |----------------------------------|-------------------------|--------------------------------|
//! | [`Optimizer::gradient_descent`]  | all observations        | [`StopPolicy::FlatGradient`]   |
//! | [`Optimizer::stochastic`]        | one random observation  | [`StopPolicy::Patience`]       |
//! | [`Optimizer::mini_batch`]        | shuffled slices         | [`StopPolicy::Patience`]       |
//!
//! # Stop Rules
//!
//! Full-batch gradients are exact, so plain gradient descent stops when
//! the proposed update itself is negligible: every component of
//! `α·∇L` within `epsilon`, tested before the update is applied. The
//! stochastic variants see noisy gradients for which that test is
//! meaningless; they instead watch the full-data loss and stop after
//! `max_n_iter_no_change` consecutive iterations without meaningful
//! improvement over the best loss seen so far.
//!
//! Exhausting the iteration budget is a normal outcome, reported as
//! [`FitStatus::Exhausted`], not an error. Errors are reserved for
//! numeric blow-ups and invalid configurations.

use nalgebra::DVector;

use crate::error::{FitError, FitResult};
use crate::optimize::context::FitContext;
use crate::optimize::gradient::{gradient, DEFAULT_SPACING};
use crate::optimize::problem::FitProblem;
use crate::optimize::sampler::{Sampler, Sampling};

// =================================================================================================
// Stop Policy
// =================================================================================================

/// Rule deciding when a run has converged
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopPolicy {
    /// Stop when every component of the proposed update `α·∇L` is at
    /// most `epsilon` in magnitude. Tested before the update is
    /// applied, so a converged run returns the unperturbed iterate.
    /// Meaningful only for exact full-batch gradients.
    FlatGradient,

    /// Stop after a run of iterations without meaningful improvement.
    ///
    /// An iteration counts as flat when `loss + epsilon > best_loss`;
    /// any improvement deeper than `epsilon` resets the run. Suits the
    /// stochastic variants, whose loss trace is noisy by construction.
    Patience {
        /// Consecutive flat iterations tolerated before stopping
        max_n_iter_no_change: usize,
    },
}

// =================================================================================================
// Fit Outcome
// =================================================================================================

/// How a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FitStatus {
    /// The stop rule fired within the iteration budget
    Converged,

    /// The iteration budget ran out first; a normal outcome, the
    /// iterate is still usable
    Exhausted,
}

/// Result of a completed estimation run.
///
/// Plain gradient descent reports the final iterate; the stochastic
/// variants report the iterate with the lowest full-data loss seen
/// during the run, which need not be the final one.
#[derive(Debug, Clone, PartialEq)]
pub struct FitOutcome {
    /// Estimated parameters
    pub parameters: DVector<f64>,

    /// Full-data mean squared error of `parameters`
    pub loss: f64,

    /// Whether the stop rule fired
    pub status: FitStatus,

    /// Loop index at which the stop rule fired, or the full budget
    pub iterations: usize,

    /// Full-data loss after each applied update, in iteration order
    pub loss_history: Vec<f64>,
}

impl FitOutcome {
    /// True when the stop rule fired within the budget
    pub fn converged(&self) -> bool {
        self.status == FitStatus::Converged
    }
}

// =================================================================================================
// Optimizer
// =================================================================================================

/// Gradient-descent optimizer, parameterized by sampling strategy and
/// stop policy.
///
/// # Example
///
/// ```rust
/// use kinfit_rs::kinetics::{Conditions, ObservationSet};
/// use kinfit_rs::models::DirectRate;
/// use kinfit_rs::optimize::{FitContext, FitProblem, Optimizer};
/// use kinfit_rs::solver::Rk4Integrator;
/// use nalgebra::DVector;
///
/// let conditions = vec![
///     Conditions::new(10.0, 323.15, 5.0),
///     Conditions::new(10.0, 323.15, 20.0),
/// ];
/// let problem = FitProblem::new(
///     Box::new(DirectRate::new()),
///     Box::new(Rk4Integrator::new()),
///     ObservationSet::new(conditions, vec![8.1, 5.9])?,
/// );
///
/// let optimizer = Optimizer::gradient_descent(1e-4, 1e-10, 200);
/// let outcome = optimizer.fit(&problem, DVector::zeros(2), &mut FitContext::seeded(0))?;
/// assert!(outcome.loss.is_finite());
/// # Ok::<(), kinfit_rs::error::FitError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Optimizer {
    learning_rate: f64,
    epsilon: f64,
    max_iterations: usize,
    gradient_spacing: f64,
    sampling: Sampling,
    stopping: StopPolicy,
}

impl Optimizer {
    // ====== Constructors ======

    /// Plain gradient descent: full-batch gradients, flat-gradient stop
    pub fn gradient_descent(learning_rate: f64, epsilon: f64, max_iterations: usize) -> Self {
        Self {
            learning_rate,
            epsilon,
            max_iterations,
            gradient_spacing: DEFAULT_SPACING,
            sampling: Sampling::FullBatch,
            stopping: StopPolicy::FlatGradient,
        }
    }

    /// Stochastic gradient descent: one random observation per
    /// iteration, patience stop
    pub fn stochastic(
        learning_rate: f64,
        epsilon: f64,
        max_iterations: usize,
        max_n_iter_no_change: usize,
    ) -> Self {
        Self {
            learning_rate,
            epsilon,
            max_iterations,
            gradient_spacing: DEFAULT_SPACING,
            sampling: Sampling::SingleObservation,
            stopping: StopPolicy::Patience {
                max_n_iter_no_change,
            },
        }
    }

    /// Mini-batch gradient descent: shuffled epoch slices of
    /// `batch_size` observations, patience stop
    pub fn mini_batch(
        learning_rate: f64,
        epsilon: f64,
        max_iterations: usize,
        max_n_iter_no_change: usize,
        batch_size: usize,
    ) -> Self {
        Self {
            learning_rate,
            epsilon,
            max_iterations,
            gradient_spacing: DEFAULT_SPACING,
            sampling: Sampling::MiniBatch { batch_size },
            stopping: StopPolicy::Patience {
                max_n_iter_no_change,
            },
        }
    }

    /// Replace the central-difference spacing, builder style
    pub fn with_gradient_spacing(mut self, spacing: f64) -> Self {
        self.gradient_spacing = spacing;
        self
    }

    // ====== Queries ======

    /// Learning rate α
    pub fn learning_rate(&self) -> f64 {
        self.learning_rate
    }

    /// Convergence tolerance ε
    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    /// Iteration budget
    pub fn max_iterations(&self) -> usize {
        self.max_iterations
    }

    /// Central-difference spacing for gradient estimates
    pub fn gradient_spacing(&self) -> f64 {
        self.gradient_spacing
    }

    /// Sampling strategy feeding each gradient estimate
    pub fn sampling(&self) -> Sampling {
        self.sampling
    }

    /// Stop rule
    pub fn stopping(&self) -> StopPolicy {
        self.stopping
    }

    // ====== Estimation ======

    /// Run the descent loop from `initial`.
    ///
    /// The context provides the RNG driving the sampling strategy and
    /// the progress sink; seeding the context makes the run fully
    /// reproducible.
    ///
    /// # Errors
    /// [`FitError::InvalidConfiguration`] for a non-positive learning
    /// rate or spacing, a negative tolerance, or an initial vector
    /// whose length does not match the model;
    /// [`FitError::InvalidBatch`] for a zero mini-batch size;
    /// [`FitError::NumericOverflow`] when an integration, loss, or
    /// gradient evaluation diverges mid-run.
    pub fn fit(
        &self,
        problem: &FitProblem,
        initial: DVector<f64>,
        ctx: &mut FitContext,
    ) -> FitResult<FitOutcome> {
        self.validate(problem, &initial)?;

        let mut params = initial;
        let mut sampler = Sampler::new(self.sampling, problem.len());

        // Full-data loss of the starting point; every patience
        // comparison is against the best of these.
        let mut best_loss = problem.loss(&params)?;
        let mut best_params = params.clone();
        let mut current_loss = best_loss;
        let mut stalled = 0usize;

        let mut history = Vec::new();
        let mut status = FitStatus::Exhausted;
        let mut iterations = self.max_iterations;

        for iteration in 0..self.max_iterations {
            let batch = sampler.draw(&mut ctx.rng);
            let grad = gradient(
                |p| problem.batch_loss(p, batch),
                &params,
                self.gradient_spacing,
            )?;
            let update = &grad * self.learning_rate;

            match self.stopping {
                StopPolicy::FlatGradient => {
                    // Tested before applying, so a converged run
                    // returns the unperturbed iterate.
                    if update.iter().all(|step| step.abs() <= self.epsilon) {
                        status = FitStatus::Converged;
                        iterations = iteration;
                        break;
                    }
                    params -= &update;
                    current_loss = problem.loss(&params)?;
                    if current_loss < best_loss {
                        best_loss = current_loss;
                    }
                    history.push(current_loss);
                    ctx.progress.on_iteration(iteration, current_loss, best_loss);
                }
                StopPolicy::Patience {
                    max_n_iter_no_change,
                } => {
                    params -= &update;
                    current_loss = problem.loss(&params)?;
                    history.push(current_loss);
                    ctx.progress
                        .on_iteration(iteration, current_loss, f64::min(best_loss, current_loss));

                    if current_loss + self.epsilon > best_loss {
                        stalled += 1;
                    } else {
                        stalled = 0;
                    }
                    // The triggering iteration never becomes the best
                    // snapshot; the break precedes the update below.
                    if stalled >= max_n_iter_no_change {
                        status = FitStatus::Converged;
                        iterations = iteration;
                        break;
                    }
                    if current_loss < best_loss {
                        best_loss = current_loss;
                        best_params.copy_from(&params);
                    }
                }
            }
        }

        let (parameters, loss) = match self.stopping {
            StopPolicy::FlatGradient => (params, current_loss),
            StopPolicy::Patience { .. } => (best_params, best_loss),
        };

        Ok(FitOutcome {
            parameters,
            loss,
            status,
            iterations,
            loss_history: history,
        })
    }

    fn validate(&self, problem: &FitProblem, initial: &DVector<f64>) -> FitResult<()> {
        if !self.learning_rate.is_finite() || self.learning_rate <= 0.0 {
            return Err(FitError::invalid_configuration(format!(
                "learning rate must be finite and positive, got {}",
                self.learning_rate
            )));
        }
        if !self.epsilon.is_finite() || self.epsilon < 0.0 {
            return Err(FitError::invalid_configuration(format!(
                "convergence tolerance must be finite and non-negative, got {}",
                self.epsilon
            )));
        }
        if !self.gradient_spacing.is_finite() || self.gradient_spacing <= 0.0 {
            return Err(FitError::invalid_configuration(format!(
                "gradient spacing must be finite and positive, got {}",
                self.gradient_spacing
            )));
        }
        if let Sampling::MiniBatch { batch_size } = self.sampling {
            if batch_size == 0 {
                return Err(FitError::invalid_batch("mini-batch size must be at least 1"));
            }
        }
        let expected = problem.model.parameter_count();
        if initial.len() != expected {
            return Err(FitError::invalid_configuration(format!(
                "{} expects {} parameters, got an initial vector of length {}",
                problem.model_name(),
                expected,
                initial.len()
            )));
        }
        Ok(())
    }
}

// =================================================================================================
// Tests
// =================================================================================================
