//! Error types for the payroll engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every failure the engine can report. All of them are deterministic
//! configuration or input errors; none are transient.

use thiserror::Error;

/// The main error type for the payroll engine.
///
/// # Example
///
/// ```
/// use payroll_engine::error::EngineError;
///
/// let error = EngineError::ParameterFileMissing {
///     year: 2031,
///     path: "config/params/params_2031.yaml".to_string(),
/// };
/// assert_eq!(
///     error.to_string(),
///     "Parameter file for year 2031 not found: config/params/params_2031.yaml"
/// );
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// No parameter file exists for the requested fiscal year.
    #[error("Parameter file for year {year} not found: {path}")]
    ParameterFileMissing {
        /// The fiscal year that was requested.
        year: i32,
        /// The path (or directory) that was searched.
        path: String,
    },

    /// A parameter file exists but could not be parsed.
    #[error("Failed to parse parameter file '{path}': {message}")]
    ParameterParse {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// Parameters were parsed but violate a tariff or rate invariant.
    #[error("Invalid parameters for year {year}: {message}")]
    ParameterValidation {
        /// The fiscal year of the offending parameters.
        year: i32,
        /// Which invariant was violated.
        message: String,
    },

    /// An employee class name was not recognised.
    #[error("Invalid employee class: {value}")]
    InvalidEmployeeClass {
        /// The value that failed to parse.
        value: String,
    },

    /// No rate is configured for the given employee class and rate name.
    #[error("Unknown rate '{rate}' for employee class '{employee_class}'")]
    UnknownRate {
        /// The employee class that was queried.
        employee_class: String,
        /// The rate name that was queried.
        rate: String,
    },

    /// A caller-supplied value was out of range.
    #[error("Invalid input '{field}': {message}")]
    InvalidInput {
        /// The offending field.
        field: String,
        /// Why the value was rejected.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
