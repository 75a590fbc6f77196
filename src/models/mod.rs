//! Rate-law implementations for parameter estimation
//!
//! All models implement the [`RateLaw`](crate::kinetics::RateLaw) trait.
//! The optimizer estimates the parameter vector — models are responsible
//! for turning candidate parameters into rate constants, the integrator
//! for turning rate constants into predicted concentrations.
//!
//! # Available Models
//!
//! ## [`DirectRate`] — two parameters
//!
//! The parameter vector IS the rate-constant pair `[k1, k2]`. Use this
//! model when all observations share one temperature, so the constants
//! themselves are the quantity of interest.
//!
//! ## [`ArrheniusRate`] — four parameters
//!
//! The parameter vector holds pre-exponential factors and activation
//! energies `[k0_1, ea_1, k0_2, ea_2]`; each observation's temperature
//! expands them through the Arrhenius equation. Use this model when the
//! temperature dependence of the reaction is being estimated.

// =================================================================================================
// Module Declarations
// =================================================================================================

pub mod arrhenius;
pub mod direct;

// =================================================================================================
// Public Re-exports
// =================================================================================================

pub use arrhenius::{arrhenius_k, ArrheniusRate, GAS_CONSTANT};
pub use direct::DirectRate;
