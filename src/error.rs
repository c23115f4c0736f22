//! Error types for the Vencimento Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while fetching and reporting
//! payroll data.

use chrono::NaiveDate;
use thiserror::Error;

/// The main error type for the Vencimento Engine.
///
/// Item-level problems inside a payroll payload (a non-numeric monthly value,
/// a missing reference year) never surface here: the extractor skips them.
/// Only call-level failures are represented.
///
/// # Example
///
/// ```
/// use vencimento_engine::error::EngineError;
///
/// let error = EngineError::ProfessorNotFound {
///     registration_id: "00292553-03".to_string(),
/// };
/// assert_eq!(error.to_string(), "Professor not found: 00292553-03");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// Configuration parsed but holds an unusable value.
    #[error("Invalid configuration field '{field}': {message}")]
    InvalidConfig {
        /// The offending field.
        field: String,
        /// Why the value was rejected.
        message: String,
    },

    /// The payroll provider has no record for the registration id.
    #[error("Professor not found: {registration_id}")]
    ProfessorNotFound {
        /// The registration id (matrícula) that was looked up.
        registration_id: String,
    },

    /// The professor exists but no salary entry falls inside the period.
    #[error("No salary records for '{registration_id}' between {start} and {end}")]
    NoRecords {
        /// The registration id (matrícula) that was looked up.
        registration_id: String,
        /// Requested period start.
        start: NaiveDate,
        /// Requested period end.
        end: NaiveDate,
    },

    /// A caller-supplied value was rejected before any lookup happened.
    #[error("Invalid request field '{field}': {message}")]
    InvalidRequest {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// The remote payroll API failed (auth, transport or decoding).
    #[error("Payroll provider error: {message}")]
    Provider {
        /// A description of the failure.
        message: String,
    },

    /// The audit export could not be written.
    #[error("Failed to write export '{path}': {message}")]
    Export {
        /// The target file path.
        path: String,
        /// A description of the I/O or serialization failure.
        message: String,
    },
}

impl EngineError {
    /// Shorthand for a [`EngineError::Provider`] error.
    pub fn provider(message: impl Into<String>) -> Self {
        Self::Provider {
            message: message.into(),
        }
    }

    /// Shorthand for an [`EngineError::InvalidRequest`] error.
    pub fn invalid_request(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidRequest {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
