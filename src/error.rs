//! Error types for kinetic parameter estimation.
//!
//! Every fallible operation in the crate returns [`FitError`] through the
//! [`FitResult`] alias. The taxonomy is deliberately small:
//!
//! - [`FitError::NumericOverflow`] — a rate law, integration step or loss
//!   evaluation produced a non-finite value. Overflow is surfaced as an
//!   error so callers can react (an initial-value sweep skips the
//!   offending candidate), never as a silent infinity in a result.
//! - [`FitError::InvalidBatch`] — observation data rejected at the API
//!   boundary: empty sets, mismatched condition/measurement lengths, or a
//!   zero mini-batch size.
//! - [`FitError::InvalidConfiguration`] — a numeric knob (step size,
//!   learning rate, spacing, grid axis) outside its valid range.
//!
//! Running out of iterations is NOT an error: the optimizer reports it as
//! a normal outcome (`FitStatus::Exhausted`) with the best result found.
//!
//! Parameter-count mismatches inside a rate-law evaluation are programming
//! errors, not user errors, and panic via debug assertions instead of
//! returning a variant here.

/// Crate-wide result alias for operations that may produce [`FitError`].
pub type FitResult<T> = Result<T, FitError>;

/// Unified error type for data validation, configuration checks and
/// numeric failures during integration or optimization.
#[derive(Debug, Clone, PartialEq)]
pub enum FitError {
    // ---- Numeric failures ----
    /// A computation produced NaN or ±inf. `context` names the stage
    /// (rate-constant evaluation, integration step, loss evaluation) and
    /// `value` is the offending number.
    NumericOverflow { context: String, value: f64 },

    // ---- Data validation ----
    /// Observation data rejected at the boundary: empty set, length
    /// mismatch, zero batch size, or an index batch that is empty.
    InvalidBatch { reason: String },

    // ---- Configuration validation ----
    /// A configuration value (step size, learning rate, gradient spacing,
    /// sweep axis) is outside its valid range.
    InvalidConfiguration { reason: String },
}

impl FitError {
    /// Builds a [`FitError::NumericOverflow`] for a named computation stage.
    pub fn overflow(context: impl Into<String>, value: f64) -> Self {
        FitError::NumericOverflow { context: context.into(), value }
    }

    /// Builds a [`FitError::InvalidBatch`] with a descriptive reason.
    pub fn invalid_batch(reason: impl Into<String>) -> Self {
        FitError::InvalidBatch { reason: reason.into() }
    }

    /// Builds a [`FitError::InvalidConfiguration`] with a descriptive reason.
    pub fn invalid_configuration(reason: impl Into<String>) -> Self {
        FitError::InvalidConfiguration { reason: reason.into() }
    }

    /// True when the error is a numeric overflow. Outer searches use this
    /// to skip diverging candidate runs while still aborting on genuine
    /// usage errors.
    pub fn is_overflow(&self) -> bool {
        matches!(self, FitError::NumericOverflow { .. })
    }
}

impl std::error::Error for FitError {}

impl std::fmt::Display for FitError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FitError::NumericOverflow { context, value } => {
                write!(
                    f,
                    "Numeric overflow during {context}: got {value}. \
                     Try smaller rate constants, a smaller integration step, \
                     or a smaller learning rate."
                )
            }
            FitError::InvalidBatch { reason } => {
                write!(f, "Invalid observation batch: {reason}")
            }
            FitError::InvalidConfiguration { reason } => {
                write!(f, "Invalid configuration: {reason}")
            }
        }
    }
}
