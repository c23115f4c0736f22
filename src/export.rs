//! Audit-grade JSON export of a report.
//!
//! The export bundles everything needed to audit a report after the fact: the
//! consultation parameters, the summary figures, the complete professor
//! payload as returned by the provider, every salary record numbered from 1,
//! and a per-month summary.

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{EngineError, EngineResult};
use crate::models::{MonthYear, Professor, Report};

/// Parameters of the lookup that produced the report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsultationInfo {
    /// The registration id (matrícula) that was looked up.
    pub registration_id: String,
    /// Requested period start.
    pub start_date: NaiveDate,
    /// Requested period end.
    pub end_date: NaiveDate,
    /// When the export was produced.
    pub timestamp: DateTime<Utc>,
    /// Number of exported records.
    pub total_records: usize,
}

/// Headline figures of the report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryMetadata {
    /// The professor's name.
    pub professor_name: String,
    /// Sum of every salary record.
    pub total_amount: Decimal,
    /// Average amount per record.
    pub average_per_record: Decimal,
    /// First month of the period, `MM/YYYY`.
    pub period_start: String,
    /// Last month of the period, `MM/YYYY`.
    pub period_end: String,
    /// Number of months with at least one record.
    pub total_periods: usize,
    /// Number of salary records.
    pub total_records: usize,
}

/// One exported salary record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportedRecord {
    /// Position in the export, starting at 1.
    pub record_id: usize,
    /// Calendar year.
    pub year: i32,
    /// Calendar month.
    pub month: u32,
    /// English month name (e.g. `February`).
    pub month_name: String,
    /// First day of the month.
    pub date: NaiveDate,
    /// Upper-cased rubric name.
    pub source_label: String,
    /// Rubric code, if any.
    pub source_code: Option<i64>,
    /// Amount paid.
    pub amount: Decimal,
}

/// Totals of one month in the export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyExportTotal {
    /// Calendar year.
    pub year: i32,
    /// Calendar month.
    pub month: u32,
    /// English month name.
    pub month_name: String,
    /// Sum of the month's records.
    pub total_amount: Decimal,
    /// Number of records in the month.
    pub record_count: usize,
}

/// The complete audit export document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditExport {
    /// Lookup parameters.
    pub consultation_info: ConsultationInfo,
    /// Headline figures.
    pub summary_metadata: SummaryMetadata,
    /// Professor payload exactly as decoded from the provider.
    pub professor_complete_data: Professor,
    /// Every salary record, chronologically.
    pub vencimento_records: Vec<ExportedRecord>,
    /// Per-month totals keyed `YYYY-MM`.
    pub monthly_summary: BTreeMap<String, MonthlyExportTotal>,
}

/// Where an export was written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportReceipt {
    /// File name inside the export directory.
    pub filename: String,
    /// Full path of the written file.
    pub path: PathBuf,
    /// Number of exported records.
    pub record_count: usize,
}

fn month_name(year: i32, month: u32) -> String {
    NaiveDate::from_ymd_opt(year, month, 1)
        .map(|d| d.format("%B").to_string())
        .unwrap_or_default()
}

impl AuditExport {
    /// Builds the export document for a report.
    pub fn build(
        report: &Report,
        professor: &Professor,
        start: NaiveDate,
        end: NaiveDate,
        timestamp: DateTime<Utc>,
    ) -> Self {
        let vencimento_records: Vec<ExportedRecord> = report
            .records()
            .enumerate()
            .map(|(i, record)| ExportedRecord {
                record_id: i + 1,
                year: record.year,
                month: record.month,
                month_name: month_name(record.year, record.month),
                date: record.date,
                source_label: record.source_label.clone(),
                source_code: record.source_code,
                amount: record.amount,
            })
            .collect();

        let monthly_summary = report
            .periods
            .iter()
            .map(|p| {
                let key = MonthYear {
                    year: p.year,
                    month: p.month,
                }
                .key();
                let total = MonthlyExportTotal {
                    year: p.year,
                    month: p.month,
                    month_name: month_name(p.year, p.month),
                    total_amount: p.total,
                    record_count: p.count,
                };
                (key, total)
            })
            .collect();

        Self {
            consultation_info: ConsultationInfo {
                registration_id: report.registration_id.clone(),
                start_date: start,
                end_date: end,
                timestamp,
                total_records: vencimento_records.len(),
            },
            summary_metadata: SummaryMetadata {
                professor_name: report.professor_name.clone(),
                total_amount: report.grand_total,
                average_per_record: report.average_per_record,
                period_start: report.period_start.to_string(),
                period_end: report.period_end.to_string(),
                total_periods: report.periods.len(),
                total_records: report.record_count,
            },
            professor_complete_data: professor.clone(),
            vencimento_records,
            monthly_summary,
        }
    }

    /// File name for this export: `vencimento_data_{id}_{YYYYmmdd_HHMMSS}.json`.
    pub fn filename(&self) -> String {
        format!(
            "vencimento_data_{}_{}.json",
            self.consultation_info.registration_id,
            self.consultation_info.timestamp.format("%Y%m%d_%H%M%S")
        )
    }

    /// Writes the export, pretty-printed, into `directory`.
    ///
    /// The directory is created if missing.
    pub fn write_to_dir(&self, directory: &Path) -> EngineResult<ExportReceipt> {
        let filename = self.filename();
        let path = directory.join(&filename);
        let export_error = |message: String| EngineError::Export {
            path: path.display().to_string(),
            message,
        };

        fs::create_dir_all(directory).map_err(|e| export_error(e.to_string()))?;
        let file = File::create(&path).map_err(|e| export_error(e.to_string()))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, self).map_err(|e| export_error(e.to_string()))?;
        writer.flush().map_err(|e| export_error(e.to_string()))?;

        info!(
            path = %path.display(),
            records = self.vencimento_records.len(),
            "Audit export written"
        );

        Ok(ExportReceipt {
            filename,
            record_count: self.vencimento_records.len(),
            path,
        })
    }
}
