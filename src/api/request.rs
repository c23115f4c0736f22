//! Request types for the Vencimento Engine API.
//!
//! This module defines the JSON request bodies and the validation applied to
//! them before any payroll lookup happens.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Longest accepted period, in days (ten years).
pub const MAX_PERIOD_DAYS: i64 = 365 * 10;

/// Request body for `/vencimentos` and `/vencimentos/preview`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportRequest {
    /// Registration id (matrícula); normalized before use.
    pub registration_id: String,
    /// Period start (inclusive, month granularity).
    pub start_date: NaiveDate,
    /// Period end (inclusive, month granularity).
    pub end_date: NaiveDate,
}

/// Request body for `/professores/validate`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidateProfessorRequest {
    /// Registration id (matrícula); normalized before use.
    pub registration_id: String,
}

/// A report request that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedReportRequest {
    /// Normalized registration id (`NNNNNNNN-NN`).
    pub registration_id: String,
    /// Period start.
    pub start_date: NaiveDate,
    /// Period end.
    pub end_date: NaiveDate,
}

impl ReportRequest {
    /// Normalizes the registration id and checks the period against `today`.
    pub fn validate(&self, today: NaiveDate) -> EngineResult<ValidatedReportRequest> {
        let registration_id = normalize_registration_id(&self.registration_id)?;
        validate_period(self.start_date, self.end_date, today)?;
        Ok(ValidatedReportRequest {
            registration_id,
            start_date: self.start_date,
            end_date: self.end_date,
        })
    }
}

/// Normalizes a registration id to the `NNNNNNNN-NN` format.
///
/// Everything except digits and dashes is stripped first. Then:
/// - `NNNNNNNN-NN` is accepted as is,
/// - ten digits are split as `NNNNNNNN-NN`,
/// - eight digits get a `-00` suffix,
/// - fewer digits are zero-padded to eight and get a `-00` suffix.
///
/// # Examples
///
/// ```
/// use vencimento_engine::api::normalize_registration_id;
///
/// assert_eq!(normalize_registration_id("00292553-03").unwrap(), "00292553-03");
/// assert_eq!(normalize_registration_id("0029255303").unwrap(), "00292553-03");
/// assert_eq!(normalize_registration_id("292553").unwrap(), "00292553-00");
/// assert!(normalize_registration_id("123456789012").is_err());
/// ```
pub fn normalize_registration_id(raw: &str) -> EngineResult<String> {
    let cleaned: String = raw
        .trim()
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '-')
        .collect();

    let digits: String = cleaned.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return Err(EngineError::invalid_request(
            "registration_id",
            "registration id is required",
        ));
    }

    if is_canonical(&cleaned) {
        return Ok(cleaned);
    }

    match digits.len() {
        10 => Ok(format!("{}-{}", &digits[..8], &digits[8..])),
        8 => Ok(format!("{}-00", digits)),
        n if n < 8 => Ok(format!("{:0>8}-00", digits)),
        _ => Err(EngineError::invalid_request(
            "registration_id",
            "invalid format, expected 00000000-00",
        )),
    }
}

fn is_canonical(id: &str) -> bool {
    let bytes = id.as_bytes();
    bytes.len() == 11
        && bytes[8] == b'-'
        && bytes[..8].iter().all(u8::is_ascii_digit)
        && bytes[9..].iter().all(u8::is_ascii_digit)
}

/// Checks a requested period.
///
/// The start must not be after the end, the end must not be after `today`,
/// and the period may span at most [`MAX_PERIOD_DAYS`] days.
pub fn validate_period(start: NaiveDate, end: NaiveDate, today: NaiveDate) -> EngineResult<()> {
    if start > end {
        return Err(EngineError::invalid_request(
            "start_date",
            "start date must not be after end date",
        ));
    }
    if end > today {
        return Err(EngineError::invalid_request(
            "end_date",
            "end date cannot be in the future",
        ));
    }
    if (end - start).num_days() > MAX_PERIOD_DAYS {
        return Err(EngineError::invalid_request(
            "end_date",
            "period cannot be longer than 10 years",
        ));
    }
    Ok(())
}
