//! Parameter estimation by gradient descent
//!
//! This module turns a rate law, an integrator, and a set of observed
//! concentrations into parameter estimates. It is organized around
//! four pieces:
//!
//! # Architecture
//!
//! ```text
//! FitProblem  =  RateLaw + Integrator + ObservationSet
//!      │
//!      │  batch_loss(parameters, indices)     mean squared error
//!      ▼
//! gradient()                                  central differences
//!      │
//!      ▼
//! Optimizer::fit(problem, initial, ctx)       descent loop
//!      │
//!      ▼
//! FitOutcome                                  estimate + diagnostics
//! ```
//!
//! The [`Optimizer`] is one state machine covering plain, stochastic,
//! and mini-batch gradient descent; the variants differ only in their
//! [`Sampling`] strategy and [`StopPolicy`]. All randomness flows
//! through the [`FitContext`], so seeded runs replay exactly.
//!
//! # Quick Start
//!
//! ```rust
//! use kinfit_rs::kinetics::{Conditions, ObservationSet};
//! use kinfit_rs::models::DirectRate;
//! use kinfit_rs::optimize::{FitContext, FitProblem, Optimizer};
//! use kinfit_rs::solver::Rk4Integrator;
//! use nalgebra::DVector;
//!
//! let observations = ObservationSet::new(
//!     vec![
//!         Conditions::new(10.0, 323.15, 4.0),
//!         Conditions::new(10.0, 323.15, 12.0),
//!         Conditions::new(10.0, 323.15, 30.0),
//!     ],
//!     vec![8.86, 7.06, 6.17],
//! )?;
//! let problem = FitProblem::new(
//!     Box::new(DirectRate::new()),
//!     Box::new(Rk4Integrator::new()),
//!     observations,
//! );
//!
//! let optimizer = Optimizer::gradient_descent(1e-5, 1e-12, 500);
//! let outcome = optimizer.fit(&problem, DVector::zeros(2), &mut FitContext::seeded(0))?;
//!
//! println!(
//!     "k1 = {:.4}, k2 = {:.4} after {} iterations",
//!     outcome.parameters[0], outcome.parameters[1], outcome.iterations
//! );
//! # Ok::<(), kinfit_rs::error::FitError>(())
//! ```

// module declaration
pub mod context;
pub mod descent;
pub mod gradient;
pub mod problem;
pub mod sampler;

// re-export commonly used types for convenience
pub use context::{FitContext, NoProgress, ProgressObserver};
pub use descent::{FitOutcome, FitStatus, Optimizer, StopPolicy};
pub use gradient::{batch_loss_gradient, gradient, DEFAULT_SPACING};
pub use problem::FitProblem;
pub use sampler::Sampling;
