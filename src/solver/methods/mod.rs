//! Numerical methods for integrating the decay ODE
//!
//! This module contains concrete implementations of the
//! [`Integrator`](crate::solver::Integrator) trait.
//!
//! # Architecture
//!
//! The separation between the abstract interface (`solver::traits`) and
//! concrete implementations (`solver::methods`) follows the Open-Closed
//! Principle:
//! - **Open** for extension: Add new methods without modifying existing code
//! - **Closed** for modification: The `Integrator` trait is stable
//!
//! # Available Methods
//!
//! - **[`EulerIntegrator`]**: Forward Euler method
//!   - Order: First-order O(h)
//!   - Cost: 1 derivative evaluation per step
//!   - Use: Convergence-order baselines, quick experiments
//!
//! - **[`Rk4Integrator`]**: Classical fourth-order Runge-Kutta
//!   - Order: Fourth-order O(h⁴)
//!   - Cost: 4 derivative evaluations per step
//!   - Use: **Production estimation runs**
//!
//! # Design Philosophy
//!
//! Each integrator is:
//! - **Self-contained**: No shared mutable state
//! - **Reusable**: One instance serves an entire estimation run
//! - **Cheap to call**: The optimizer integrates every observation on
//!   every loss evaluation, so the per-call overhead is just the
//!   stepping loop

pub mod euler;
pub mod rk4;

// Re-exports for convenience
pub use euler::EulerIntegrator;
pub use rk4::Rk4Integrator;
