//! HTTP request handlers for the Vencimento Engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use chrono::{NaiveDate, Utc};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::EngineError;
use crate::export::AuditExport;
use crate::provider::PayrollDataProvider;
use crate::service::build_report;

use super::request::{normalize_registration_id, ReportRequest, ValidateProfessorRequest};
use super::response::{ApiError, ApiErrorResponse, ExportStatus, FullReportResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router<P: PayrollDataProvider + 'static>(state: AppState<P>) -> Router {
    Router::new()
        .route("/vencimentos", post(full_report_handler::<P>))
        .route("/vencimentos/preview", post(preview_handler::<P>))
        .route("/professores/validate", post(validate_professor_handler::<P>))
        .with_state(state)
}

fn today() -> NaiveDate {
    Utc::now().date_naive()
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

fn error_response(correlation_id: Uuid, error: EngineError) -> Response {
    warn!(correlation_id = %correlation_id, error = %error, "Request failed");
    ApiErrorResponse::from(error).into_response()
}

/// Unwraps a JSON body, turning extractor rejections into 400 responses.
fn parse_payload<T>(
    correlation_id: Uuid,
    payload: Result<Json<T>, JsonRejection>,
) -> Result<T, Response> {
    let rejection = match payload {
        Ok(Json(request)) => return Ok(request),
        Err(rejection) => rejection,
    };

    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::new("VALIDATION_ERROR", body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    Err(json_response(StatusCode::BAD_REQUEST, error))
}

/// Handler for `POST /vencimentos`.
///
/// Builds the full report and, when an export directory is configured,
/// writes the audit export. A failed export is reported in the body and does
/// not fail the request.
async fn full_report_handler<P: PayrollDataProvider + 'static>(
    State(state): State<AppState<P>>,
    payload: Result<Json<ReportRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing full report request");

    let request = match parse_payload(correlation_id, payload) {
        Ok(request) => request,
        Err(response) => return response,
    };
    let request = match request.validate(today()) {
        Ok(request) => request,
        Err(err) => return error_response(correlation_id, err),
    };

    let start_time = Instant::now();
    let professor = match state
        .service()
        .fetch_professor(&request.registration_id)
        .await
    {
        Ok(professor) => professor,
        Err(err) => return error_response(correlation_id, err),
    };
    let report = match build_report(
        &professor,
        &request.registration_id,
        request.start_date,
        request.end_date,
    ) {
        Ok(report) => report,
        Err(err) => return error_response(correlation_id, err),
    };

    let export = state.export_dir().map(|dir| {
        let document = AuditExport::build(
            &report,
            &professor,
            request.start_date,
            request.end_date,
            Utc::now(),
        );
        match document.write_to_dir(dir) {
            Ok(receipt) => ExportStatus::written(&receipt),
            Err(err) => {
                warn!(
                    correlation_id = %correlation_id,
                    error = %err,
                    "Audit export failed"
                );
                ExportStatus::failed(&err)
            }
        }
    });

    info!(
        correlation_id = %correlation_id,
        registration_id = %request.registration_id,
        periods = report.periods.len(),
        records = report.record_count,
        grand_total = %report.grand_total,
        duration_us = start_time.elapsed().as_micros(),
        "Full report completed"
    );
    json_response(StatusCode::OK, FullReportResponse { report, export })
}

/// Handler for `POST /vencimentos/preview`.
async fn preview_handler<P: PayrollDataProvider + 'static>(
    State(state): State<AppState<P>>,
    payload: Result<Json<ReportRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing preview request");

    let request = match parse_payload(correlation_id, payload) {
        Ok(request) => request,
        Err(response) => return response,
    };
    let request = match request.validate(today()) {
        Ok(request) => request,
        Err(err) => return error_response(correlation_id, err),
    };

    match state
        .service()
        .compute_summary(&request.registration_id, request.start_date, request.end_date)
        .await
    {
        Ok(summary) => {
            info!(
                correlation_id = %correlation_id,
                registration_id = %summary.registration_id,
                records = summary.record_count,
                grand_total = %summary.grand_total,
                "Preview completed"
            );
            json_response(StatusCode::OK, summary)
        }
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for `POST /professores/validate`.
async fn validate_professor_handler<P: PayrollDataProvider + 'static>(
    State(state): State<AppState<P>>,
    payload: Result<Json<ValidateProfessorRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();

    let request = match parse_payload(correlation_id, payload) {
        Ok(request) => request,
        Err(response) => return response,
    };
    let registration_id = match normalize_registration_id(&request.registration_id) {
        Ok(id) => id,
        Err(err) => return error_response(correlation_id, err),
    };

    match state.service().validate_professor(&registration_id).await {
        Ok(info) => {
            info!(
                correlation_id = %correlation_id,
                registration_id = %info.registration_id,
                "Professor validated"
            );
            json_response(StatusCode::OK, info)
        }
        Err(err) => error_response(correlation_id, err),
    }
}
