//! kinfit-rs: Kinetic Parameter Estimation Framework
//!
//! A flexible and extensible framework for estimating reaction-kinetics
//! parameters from measured concentration data using gradient descent.
//! Built with Rust for performance and safety.
//!
//! # Architecture
//!
//! kinfit-rs is built on two core principles:
//!
//! 1. **Separation of Model and Numerics**
//!    - Rate laws define parameterizations (what the rate constants are)
//!    - Integrators provide methods (how concentration evolves in time)
//!    - The optimizer only sees a loss function (how good an estimate is)
//!
//! 2. **Extensibility and Type Safety**
//!    - Trait-based design for easy extension
//!    - One optimizer state machine covers full-batch, stochastic and
//!      mini-batch descent
//!    - Stable API (v0.1.0+)
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
//! // 1. Collect the observations
//! let observations = ObservationSet::new(
//!     vec![
//!         Conditions::new(10.0, 323.15, 0.0),
//!         Conditions::new(10.0, 323.15, 8.0),
//!         Conditions::new(10.0, 323.15, 16.0),
//!     ],
//!     vec![10.0, 8.54, 7.58],
//! )?;
//!
//! // 2. Define the estimation problem
//! let problem = FitProblem::new(
//!     Box::new(DirectRate::new()),
//!     Box::new(Rk4Integrator::new()),
//!     observations,
//! );
//!
//! // 3. Fit
//! let optimizer = Optimizer::gradient_descent(
//!     1e-4,     // learning rate
//!     1e-10,    // convergence tolerance
//!     2_000,    // iteration budget
//! );
//! let mut ctx = FitContext::seeded(42);
//! let outcome = optimizer.fit(&problem, DVector::zeros(2), &mut ctx)?;
//!
//! // 4. Access results
//! println!("k1 = {:.4}, k2 = {:.4}", outcome.parameters[0], outcome.parameters[1]);
//! println!("loss = {:.6} after {} iterations", outcome.loss, outcome.iterations);
//! assert!(outcome.loss.is_finite());
//! # Ok::<(), kinfit_rs::error::FitError>(())
//! ```
//!
//! # Modules
//!
//! - [`kinetics`]: Reaction data types and the rate-law abstraction
//! - [`models`]: Rate-law parameterizations (direct constants, Arrhenius)
//! - [`solver`]: Numerical integrators (methods)
//! - [`optimize`]: Gradient computation and the descent loop
//! - [`sweep`]: Initial-value grids and multi-start estimation
//! - [`data`]: Synthetic observation generation
//! - [`output`]: Result visualization and export
//! - [`error`]: Shared error type

// Core modules
pub mod error;
pub mod kinetics;
pub mod models;
pub mod solver;

// Estimation
pub mod optimize;
pub mod sweep;

// Data generation and output
pub mod data;
pub mod output;

pub mod prelude {
    //! Convenient imports for common usage
    //!
    //! ```rust
    //!
    //! use kinfit_rs::prelude::*;
    //! ```
    pub use crate::error::{FitError, FitResult};
    pub use crate::kinetics::{Conditions,
                              ObservationSet,
                              RateConstants,
                              RateLaw};
    pub use crate::models::{ArrheniusRate, DirectRate};
    pub use crate::optimize::{FitContext,
                              FitOutcome,
                              FitProblem,
                              FitStatus,
                              Optimizer,
                              Sampling,
                              StopPolicy};
    pub use crate::solver::{EulerIntegrator, Integrator, Rk4Integrator};
    pub use crate::sweep::{sweep_initial_values, SweepGrid, SweepOutcome};
}
