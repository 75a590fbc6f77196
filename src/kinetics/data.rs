//! Observation data types
//!
//! This module provides the experimental-condition record and the
//! validated observation container that estimation runs fit against.

use crate::error::{FitError, FitResult};
use std::fmt;

// =================================================================================================
// Experimental Conditions
// =================================================================================================

/// Experimental conditions of a single observation.
///
/// One row of the independent variables: how the experiment started, at
/// what temperature it ran and when the sample was taken. Rate laws that
/// carry their constants directly ignore the temperature; the Arrhenius
/// parameterization reads it.
///
/// # Example
/// ```
/// use kinfit_rs::kinetics::Conditions;
///
/// let conditions = Conditions::new(20.0, 323.15, 12.0);
/// assert_eq!(conditions.initial_concentration, 20.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Conditions {
    /// Concentration at t = 0 (g/L)
    pub initial_concentration: f64,

    /// Reaction temperature (K)
    pub temperature: f64,

    /// Time of the measurement, counted from the start of the run
    pub elapsed_time: f64,
}

impl Conditions {
    /// Create a condition record
    pub fn new(initial_concentration: f64, temperature: f64, elapsed_time: f64) -> Self {
        Self {
            initial_concentration,
            temperature,
            elapsed_time,
        }
    }
}

impl fmt::Display for Conditions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "G0 = {} g/L, T = {} K, t = {}",
            self.initial_concentration, self.temperature, self.elapsed_time
        )
    }
}

// =================================================================================================
// Observation Set
// =================================================================================================

/// Paired experimental conditions and measured concentrations.
///
/// The container is validated on construction and immutable afterwards:
/// every condition row has exactly one measured value, and the set is
/// never empty. Loss evaluation, batching and data export all index into
/// the same rows, so the pairing can never drift.
#[derive(Debug, Clone, PartialEq)]
pub struct ObservationSet {
    conditions: Vec<Conditions>,
    measured: Vec<f64>,
}

impl ObservationSet {
    // ======================================= constructors =======================================

    /// Create an observation set from paired rows.
    ///
    /// # Errors
    /// [`FitError::InvalidBatch`] when the set is empty, the lengths
    /// disagree, or a measured value is non-finite.
    pub fn new(conditions: Vec<Conditions>, measured: Vec<f64>) -> FitResult<Self> {
        if conditions.len() != measured.len() {
            return Err(FitError::invalid_batch(format!(
                "{} condition rows but {} measured values; every observation needs exactly one of each",
                conditions.len(),
                measured.len()
            )));
        }
        if conditions.is_empty() {
            return Err(FitError::invalid_batch(
                "observation set is empty; at least one observation is required",
            ));
        }
        if let Some(index) = measured.iter().position(|y| !y.is_finite()) {
            return Err(FitError::invalid_batch(format!(
                "measured value at row {index} is not finite: {}",
                measured[index]
            )));
        }

        Ok(Self {
            conditions,
            measured,
        })
    }

    // ========================================== Queries ==========================================

    /// Number of observations
    pub fn len(&self) -> usize {
        self.conditions.len()
    }

    /// Always false once constructed; present for API completeness
    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    /// Distinct initial concentrations, in first-seen order.
    ///
    /// Used to group rows into per-experiment series for plotting and
    /// export.
    pub fn initial_concentrations(&self) -> Vec<f64> {
        let mut seen: Vec<f64> = Vec::new();
        for conditions in &self.conditions {
            if !seen.contains(&conditions.initial_concentration) {
                seen.push(conditions.initial_concentration);
            }
        }
        seen
    }

    // ======================================== Extractions ========================================

    /// All condition rows
    pub fn conditions(&self) -> &[Conditions] {
        &self.conditions
    }

    /// All measured values, row-aligned with `conditions()`
    pub fn measured(&self) -> &[f64] {
        &self.measured
    }

    /// One observation row (panics when out of range)
    pub fn row(&self, index: usize) -> (Conditions, f64) {
        (self.conditions[index], self.measured[index])
    }
}

impl fmt::Display for ObservationSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ObservationSet [{} rows, {} experiments]",
            self.len(),
            self.initial_concentrations().len()
        )
    }
}

// =================================================================================================
// Tests
// =================================================================================================
#[cfg(test)]
mod tests {
    use super::*;

    fn three_rows() -> (Vec<Conditions>, Vec<f64>) {
        let conditions = vec![
            Conditions::new(10.0, 323.15, 0.0),
            Conditions::new(10.0, 323.15, 4.0),
            Conditions::new(15.0, 323.15, 4.0),
        ];
        let measured = vec![10.0, 8.2, 12.5];
        (conditions, measured)
    }

    // ====== Construction tests ======

    #[test]
    fn valid_rows_build_a_set() {
        let (conditions, measured) = three_rows();
        let set = ObservationSet::new(conditions, measured).unwrap();

        assert_eq!(set.len(), 3);
        assert!(!set.is_empty());
        assert_eq!(set.row(1), (Conditions::new(10.0, 323.15, 4.0), 8.2));
    }

    #[test]
    fn length_mismatch_is_rejected() {
        let (conditions, mut measured) = three_rows();
        measured.pop();

        let err = ObservationSet::new(conditions, measured).unwrap_err();
        assert!(matches!(err, FitError::InvalidBatch { .. }));
        assert!(err.to_string().contains("3 condition rows but 2 measured values"));
    }

    #[test]
    fn empty_set_is_rejected() {
        let err = ObservationSet::new(Vec::new(), Vec::new()).unwrap_err();
        assert!(matches!(err, FitError::InvalidBatch { .. }));
    }

    #[test]
    fn non_finite_measurement_is_rejected() {
        let (conditions, mut measured) = three_rows();
        measured[2] = f64::NAN;

        let err = ObservationSet::new(conditions, measured).unwrap_err();
        assert!(err.to_string().contains("row 2"));
    }

    // ====== Query tests ======

    #[test]
    fn initial_concentrations_deduplicate_in_order() {
        let (conditions, measured) = three_rows();
        let set = ObservationSet::new(conditions, measured).unwrap();

        assert_eq!(set.initial_concentrations(), vec![10.0, 15.0]);
    }

    #[test]
    #[should_panic]
    fn row_out_of_range_panics() {
        let (conditions, measured) = three_rows();
        let set = ObservationSet::new(conditions, measured).unwrap();
        let _ = set.row(3);
    }
}
