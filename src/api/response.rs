//! Response types for the Vencimento Engine API.
//!
//! This module defines the success payloads, the error response structures
//! and the mapping from engine errors to HTTP status codes.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::export::ExportReceipt;
use crate::models::Report;

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        let message = error.to_string();
        match error {
            EngineError::ConfigNotFound { .. }
            | EngineError::ConfigParseError { .. }
            | EngineError::InvalidConfig { .. } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details("CONFIG_ERROR", "Configuration error", message),
            },
            EngineError::ProfessorNotFound { .. } => ApiErrorResponse {
                status: StatusCode::NOT_FOUND,
                error: ApiError::with_details(
                    "PROFESSOR_NOT_FOUND",
                    message,
                    "Check the registration id (matrícula) and try again",
                ),
            },
            EngineError::NoRecords { .. } => ApiErrorResponse {
                status: StatusCode::NOT_FOUND,
                error: ApiError::with_details(
                    "NO_RECORDS",
                    message,
                    "No vencimento entry was paid in the requested period",
                ),
            },
            EngineError::InvalidRequest { field, .. } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details("VALIDATION_ERROR", message, field),
            },
            EngineError::Provider { .. } => ApiErrorResponse {
                status: StatusCode::BAD_GATEWAY,
                error: ApiError::with_details(
                    "PROVIDER_ERROR",
                    "Payroll API request failed",
                    message,
                ),
            },
            EngineError::Export { .. } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details("EXPORT_ERROR", "Export failed", message),
            },
        }
    }
}

/// Outcome of the audit export attached to a full report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportStatus {
    /// Whether the file was written.
    pub success: bool,
    /// Name of the written file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    /// Failure description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ExportStatus {
    /// Status for a written export.
    pub fn written(receipt: &ExportReceipt) -> Self {
        Self {
            success: true,
            filename: Some(receipt.filename.clone()),
            message: None,
        }
    }

    /// Status for a failed export.
    pub fn failed(error: &EngineError) -> Self {
        Self {
            success: false,
            filename: None,
            message: Some(error.to_string()),
        }
    }
}

/// Body of a successful `POST /vencimentos`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FullReportResponse {
    /// The full report.
    pub report: Report,
    /// Export outcome; absent when exports are disabled.
    pub export: Option<ExportStatus>,
}
