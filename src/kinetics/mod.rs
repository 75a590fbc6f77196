//! Kinetic models
//!
//! This module provides the traits and data types for reversible
//! first-order decay kinetics. A rate law maps an estimated parameter
//! vector to the rate constants of the reaction; the observation types
//! hold the experimental data those parameters are fitted against.
//!
//! # Core Concepts
//!
//! - **Rate Law**: Maps parameters + conditions to rate constants
//! - **Rate Constants**: The (k1, k2) pair of the decay ODE
//! - **Conditions**: Independent variables of one observation
//! - **Observation Set**: Validated, row-aligned experimental data
//!
//! # Architecture
//!
//! Rate laws are **separate from numerical integrators**:
//! - The rate law provides the **chemistry** (parameters → rates)
//! - The integrator provides the **numerics** (rates → trajectory)
//!
//! This separation allows:
//! - Same rate law with different integrators (Euler, Runge-Kutta)
//! - Same integrator with different laws (direct constants, Arrhenius)
//!
//! # Example
//!
//! ```rust
//! use kinfit_rs::kinetics::{Conditions, RateLaw};
//! use kinfit_rs::models::DirectRate;
//! use nalgebra::DVector;
//!
//! let law = DirectRate::new();
//! let parameters = DVector::from_vec(vec![0.0310, 0.0653]);
//! let conditions = Conditions::new(20.0, 323.15, 0.0);
//!
//! let rates = law.rate_constants(&parameters, &conditions).unwrap();
//! assert_eq!(rates.k1, 0.0310);
//! ```

// module declaration
pub mod data;
pub mod traits;

// re-export commonly used types for convenience
pub use data::{Conditions, ObservationSet};
pub use traits::{RateConstants, RateLaw};
