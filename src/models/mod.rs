//! Core data models for the Vencimento Engine.
//!
//! This module contains the payroll provider schema, the normalized salary
//! records and the report structures built from them.

mod lenient;
mod payroll;
mod report;
mod salary_record;

pub use payroll::{FinancialRecordYear, LineItem, PayrollResponse, Professor, UNKNOWN_PROFESSOR_NAME};
pub use report::{
    MonthYear, PeriodAggregate, PeriodTotal, Report, SummaryReport, period_label,
};
pub use salary_record::SalaryRecord;
