//! Vencimento report service.
//!
//! Fetches a professor's payroll through a [`PayrollDataProvider`] and runs the
//! pipeline over it. The fetch is the only I/O; report building is delegated
//! to the pure functions in [`crate::pipeline`].

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{EngineError, EngineResult};
use crate::models::{Professor, Report, SalaryRecord, SummaryReport};
use crate::pipeline::{
    aggregate_by_month, aggregate_totals, assemble_report, assemble_summary,
    extract_salary_records,
};
use crate::provider::PayrollDataProvider;

/// Identity check result for a registration id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfessorInfo {
    /// The registration id (matrícula) that was looked up.
    pub registration_id: String,
    /// The professor's name.
    pub professor_name: String,
    /// Reference years available in the financial history.
    pub reference_years: Vec<i32>,
}

/// Computes vencimento reports for single professors.
#[derive(Debug, Clone)]
pub struct VencimentoService<P> {
    provider: P,
}

impl<P: PayrollDataProvider> VencimentoService<P> {
    /// Creates a service over a payroll provider.
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    /// Fetches a professor, mapping a missing record to `ProfessorNotFound`.
    pub async fn fetch_professor(&self, registration_id: &str) -> EngineResult<Professor> {
        let response = self
            .provider
            .fetch_professor_record(registration_id)
            .await?;

        match response.and_then(|r| r.servidor) {
            Some(professor) => Ok(professor),
            None => {
                warn!(registration_id = %registration_id, "Professor not found");
                Err(EngineError::ProfessorNotFound {
                    registration_id: registration_id.to_string(),
                })
            }
        }
    }

    /// Looks a professor up without building any report.
    pub async fn validate_professor(&self, registration_id: &str) -> EngineResult<ProfessorInfo> {
        let professor = self.fetch_professor(registration_id).await?;
        Ok(ProfessorInfo {
            registration_id: registration_id.to_string(),
            professor_name: professor.name().to_string(),
            reference_years: professor.reference_years(),
        })
    }

    /// Builds the full report for a professor and period.
    ///
    /// # Errors
    ///
    /// - `ProfessorNotFound` when the provider has no record
    /// - `NoRecords` when no salary entry falls inside the period
    /// - `Provider` when the fetch itself fails
    pub async fn compute_full_report(
        &self,
        registration_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> EngineResult<Report> {
        let professor = self.fetch_professor(registration_id).await?;
        build_report(&professor, registration_id, start, end)
    }

    /// Builds the summary preview for a professor and period.
    ///
    /// Errors as [`VencimentoService::compute_full_report`].
    pub async fn compute_summary(
        &self,
        registration_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> EngineResult<SummaryReport> {
        let professor = self.fetch_professor(registration_id).await?;
        build_summary(&professor, registration_id, start, end)
    }
}

fn extract_non_empty(
    professor: &Professor,
    registration_id: &str,
    start: NaiveDate,
    end: NaiveDate,
) -> EngineResult<Vec<SalaryRecord>> {
    let records = extract_salary_records(professor, start, end);
    if records.is_empty() {
        info!(
            registration_id = %registration_id,
            start = %start,
            end = %end,
            "No salary records in period"
        );
        return Err(EngineError::NoRecords {
            registration_id: registration_id.to_string(),
            start,
            end,
        });
    }
    Ok(records)
}

/// Runs the full pipeline over an already fetched professor.
pub fn build_report(
    professor: &Professor,
    registration_id: &str,
    start: NaiveDate,
    end: NaiveDate,
) -> EngineResult<Report> {
    let records = extract_non_empty(professor, registration_id, start, end)?;
    let periods = aggregate_by_month(records);
    let report = assemble_report(professor.name(), registration_id, periods, start, end);

    info!(
        registration_id = %registration_id,
        periods = report.periods.len(),
        records = report.record_count,
        grand_total = %report.grand_total,
        "Report assembled"
    );
    Ok(report)
}

/// Runs the summary pipeline over an already fetched professor.
pub fn build_summary(
    professor: &Professor,
    registration_id: &str,
    start: NaiveDate,
    end: NaiveDate,
) -> EngineResult<SummaryReport> {
    let records = extract_non_empty(professor, registration_id, start, end)?;
    let totals = aggregate_totals(&records);
    Ok(assemble_summary(
        professor.name(),
        registration_id,
        &totals,
        start,
        end,
    ))
}
