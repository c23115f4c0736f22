//! HTTP API module for the Vencimento Engine.
//!
//! This module provides the REST endpoints for building vencimento reports,
//! previewing their summary and validating registration ids.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{
    normalize_registration_id, validate_period, ReportRequest, ValidateProfessorRequest,
    ValidatedReportRequest, MAX_PERIOD_DAYS,
};
pub use response::{ApiError, ApiErrorResponse, ExportStatus, FullReportResponse};
pub use state::AppState;
