//! CSV export for observation sets and fit results
//!
//! Writes estimation data to CSV (Comma-Separated Values) format, which
//! is compatible with Excel, Python pandas, MATLAB, and most data
//! analysis tools.
//!
//! # Features
//!
//! - **Observation export**: the raw measured data, one row per sample
//! - **Fit export**: measured data side by side with the fitted model
//! - **Metadata support**: optional header comments with run parameters
//! - **Customizable**: delimiter, decimal separator, precision
//!
//! # Quick Examples
//!
//! ## Observations
//!
//! ```rust,ignore
//! use kinfit_rs::output::export::export_observations_csv;
//!
//! export_observations_csv(&observations, "data.csv", None)?;
//! ```
//!
//! **Output** (`data.csv`):
//! ```csv
//! Initial (g/L),Temperature (K),Time,Measured (g/L)
//! 10.000000,323.150000,0.000000,10.000000
//! 10.000000,323.150000,4.000000,8.861073
//! ...
//! ```
//!
//! ## Fit Alongside the Data
//!
//! ```rust,ignore
//! use kinfit_rs::output::export::{export_fit_csv, CsvConfig, CsvMetadata};
//!
//! let metadata = CsvMetadata::from_fit("Direct rate constants", "Runge-Kutta 4", &outcome);
//! let config = CsvConfig::default().with_metadata(metadata);
//!
//! export_fit_csv(&problem, &outcome.parameters, "fit.csv", Some(&config))?;
//! ```
//!
//! **Output** (`fit.csv`):
//! ```csv
//! # Kinetic Fit Data
//! # Generated: 2026-08-22T15:30:00Z
//! # Model: Direct rate constants
//! # Integrator: Runge-Kutta 4
//! # Iterations: 827
//! # Loss: 0.0000312
//! #
//! Initial (g/L),Temperature (K),Time,Measured (g/L),Fitted (g/L)
//! 10.000000,323.150000,0.000000,10.000000,10.000000
//! ...
//! ```

use std::error::Error;
use std::fs::File;
use std::io::Write;

use nalgebra::DVector;

use crate::kinetics::ObservationSet;
use crate::optimize::{FitOutcome, FitProblem};

// =============================================================================
// Configuration Structures
// =============================================================================

/// Configuration for CSV export
///
/// # Example
///
/// ```rust,ignore
/// let config = CsvConfig {
///     delimiter: ';',        // European CSV
///     precision: 10,         // High precision
///     ..Default::default()
/// };
/// ```
#[derive(Clone)]
pub struct CsvConfig {
    /// Column delimiter (default: ',')
    pub delimiter: char,

    /// Decimal separator (default: '.')
    pub decimal_separator: char,

    /// Number of decimal places for floating-point values (default: 6)
    pub precision: usize,

    /// Include metadata header comments (default: false)
    pub include_metadata: bool,

    /// Metadata to include in the header
    pub metadata: Option<CsvMetadata>,
}

impl Default for CsvConfig {
    fn default() -> Self {
        Self {
            delimiter: ',',
            decimal_separator: '.',
            precision: 6,
            include_metadata: false,
            metadata: None,
        }
    }
}

impl CsvConfig {
    /// Config with European CSV format (semicolon, comma for decimal)
    pub fn european() -> Self {
        Self {
            delimiter: ';',
            decimal_separator: ',',
            ..Default::default()
        }
    }

    /// Config with high precision (12 decimal places)
    pub fn high_precision() -> Self {
        Self {
            precision: 12,
            ..Default::default()
        }
    }

    /// Builder pattern: set delimiter
    pub fn delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Builder pattern: set precision
    pub fn precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }

    /// Builder pattern: enable metadata
    pub fn with_metadata(mut self, metadata: CsvMetadata) -> Self {
        self.include_metadata = true;
        self.metadata = Some(metadata);
        self
    }
}

/// Metadata for CSV header comments
///
/// All fields are optional; only non-None fields appear in the header.
#[derive(Clone, Default)]
pub struct CsvMetadata {
    /// Rate-law name (e.g. "Direct rate constants", "Arrhenius")
    pub model_name: Option<String>,

    /// Integrator name (e.g. "Runge-Kutta 4", "Forward Euler")
    pub integrator_name: Option<String>,

    /// Iterations the fit ran for
    pub iterations: Option<usize>,

    /// Final full-data loss of the fit
    pub loss: Option<f64>,

    /// Additional custom parameters
    pub custom: Vec<(String, String)>,
}

impl CsvMetadata {
    /// Metadata from a completed fit
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let metadata = CsvMetadata::from_fit("Arrhenius", "Runge-Kutta 4", &outcome);
    /// ```
    pub fn from_fit(model: &str, integrator: &str, outcome: &FitOutcome) -> Self {
        Self {
            model_name: Some(model.to_string()),
            integrator_name: Some(integrator.to_string()),
            iterations: Some(outcome.iterations),
            loss: Some(outcome.loss),
            custom: Vec::new(),
        }
    }

    /// Add a custom parameter
    pub fn add_custom(&mut self, key: String, value: String) {
        self.custom.push((key, value));
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Write metadata header comments to the file
fn write_metadata_header(file: &mut File, metadata: &CsvMetadata) -> Result<(), Box<dyn Error>> {
    writeln!(file, "# Kinetic Fit Data")?;

    // Timestamp (current time)
    let now = chrono::Utc::now();
    writeln!(file, "# Generated: {}", now.to_rfc3339())?;

    if let Some(model) = &metadata.model_name {
        writeln!(file, "# Model: {}", model)?;
    }
    if let Some(integrator) = &metadata.integrator_name {
        writeln!(file, "# Integrator: {}", integrator)?;
    }
    if let Some(iterations) = metadata.iterations {
        writeln!(file, "# Iterations: {}", iterations)?;
    }
    if let Some(loss) = metadata.loss {
        writeln!(file, "# Loss: {}", loss)?;
    }

    for (key, value) in &metadata.custom {
        writeln!(file, "# {}: {}", key, value)?;
    }

    // Separator
    writeln!(file, "#")?;

    Ok(())
}

/// Format number with configured precision and decimal separator
fn format_number(value: f64, config: &CsvConfig) -> String {
    let formatted = format!("{:.prec$}", value, prec = config.precision);

    if config.decimal_separator != '.' {
        formatted.replace('.', &config.decimal_separator.to_string())
    } else {
        formatted
    }
}

/// Reject condition rows carrying non-finite values
fn validate_conditions(observations: &ObservationSet) -> Result<(), Box<dyn Error>> {
    for conditions in observations.conditions() {
        if !conditions.initial_concentration.is_finite()
            || !conditions.temperature.is_finite()
            || !conditions.elapsed_time.is_finite()
        {
            return Err(format!("Invalid data: NaN or Inf detected in conditions ({conditions})").into());
        }
    }
    Ok(())
}

// =============================================================================
// Export Functions
// =============================================================================

/// Export an observation set to CSV.
///
/// One row per observation: initial concentration, temperature, time
/// and the measured concentration, with an optional metadata header.
///
/// # Arguments
///
/// * `observations` - The measured data
/// * `output_path` - Output file path
/// * `configuration` - Optional CSV configuration (default if None)
///
/// # Errors
///
/// - Non-finite condition values
/// - File creation errors
///
/// # Example
///
/// ```rust,ignore
/// export_observations_csv(&observations, "observations.csv", None)?;
/// ```
pub fn export_observations_csv(
    observations: &ObservationSet,
    output_path: &str,
    configuration: Option<&CsvConfig>,
) -> Result<(), Box<dyn Error>> {
    // ============================= Validation =============================

    validate_conditions(observations)?;

    // ============================= Configuration ==========================

    let binding = CsvConfig::default();
    let configuration = configuration.unwrap_or(&binding);

    // ============================= Open File ==============================

    let mut file = File::create(output_path)?;

    // ============================= Write Metadata =========================

    if configuration.include_metadata {
        if let Some(metadata) = &configuration.metadata {
            write_metadata_header(&mut file, metadata)?;
        }
    }

    // ============================= Write Header ===========================

    let d = configuration.delimiter;
    writeln!(
        file,
        "Initial (g/L){d}Temperature (K){d}Time{d}Measured (g/L)"
    )?;

    // ============================= Write Data =============================

    for index in 0..observations.len() {
        let (conditions, measured) = observations.row(index);
        writeln!(
            file,
            "{}{d}{}{d}{}{d}{}",
            format_number(conditions.initial_concentration, configuration),
            format_number(conditions.temperature, configuration),
            format_number(conditions.elapsed_time, configuration),
            format_number(measured, configuration),
        )?;
    }

    Ok(())
}

/// Export a fit result next to the data it was fitted against.
///
/// Same rows as [`export_observations_csv`] plus a fitted column: the
/// model's prediction at `parameters` under each row's conditions.
///
/// # Arguments
///
/// * `problem` - The fitted problem (model, integrator, observations)
/// * `parameters` - Parameter estimate to evaluate, usually `outcome.parameters`
/// * `output_path` - Output file path
/// * `configuration` - Optional CSV configuration
///
/// # Errors
///
/// - Parameter vector length not matching the model
/// - Prediction overflow at `parameters`
/// - File creation errors
///
/// # Example
///
/// ```rust,ignore
/// export_fit_csv(&problem, &outcome.parameters, "fit.csv", None)?;
/// ```
pub fn export_fit_csv(
    problem: &FitProblem,
    parameters: &DVector<f64>,
    output_path: &str,
    configuration: Option<&CsvConfig>,
) -> Result<(), Box<dyn Error>> {
    // ============================= Validation =============================

    if parameters.len() != problem.model.parameter_count() {
        return Err(format!(
            "Parameter length mismatch: {} expects {} parameters, got {}",
            problem.model_name(),
            problem.model.parameter_count(),
            parameters.len()
        )
        .into());
    }
    validate_conditions(problem.observations())?;

    // ============================= Configuration ==========================

    let binding = CsvConfig::default();
    let configuration = configuration.unwrap_or(&binding);

    // ============================= Open File ==============================

    let mut file = File::create(output_path)?;

    // ============================= Write Metadata =========================

    if configuration.include_metadata {
        if let Some(metadata) = &configuration.metadata {
            write_metadata_header(&mut file, metadata)?;
        }
    }

    // ============================= Write Header ===========================

    let d = configuration.delimiter;
    writeln!(
        file,
        "Initial (g/L){d}Temperature (K){d}Time{d}Measured (g/L){d}Fitted (g/L)"
    )?;

    // ============================= Write Data =============================

    let observations = problem.observations();
    for index in 0..observations.len() {
        let (conditions, measured) = observations.row(index);
        let fitted = problem.predict(parameters, &conditions)?;
        writeln!(
            file,
            "{}{d}{}{d}{}{d}{}{d}{}",
            format_number(conditions.initial_concentration, configuration),
            format_number(conditions.temperature, configuration),
            format_number(conditions.elapsed_time, configuration),
            format_number(measured, configuration),
            format_number(fitted, configuration),
        )?;
    }

    Ok(())
}

// =================================================================================================
// Tests
// =================================================================================================
