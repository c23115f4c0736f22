//! The payroll extraction and aggregation pipeline.
//!
//! Everything in this module is pure and synchronous: it takes an already
//! fetched payload and produces values, with no I/O and no shared state. The
//! stages run leaf first:
//!
//! 1. [`is_salary_item`] classifies line items,
//! 2. [`in_range`] filters months against the requested period,
//! 3. [`extract_salary_records`] flattens the payload into [`SalaryRecord`]s,
//! 4. [`aggregate_by_month`] groups them into sorted monthly aggregates,
//! 5. [`assemble_report`] produces the final [`Report`].
//!
//! [`SalaryRecord`]: crate::models::SalaryRecord
//! [`Report`]: crate::models::Report

mod aggregator;
mod assembler;
mod classifier;
mod extractor;
mod period_filter;

pub use aggregator::{aggregate_by_month, aggregate_totals};
pub use assembler::{assemble_report, assemble_summary, average_per_record, report_title};
pub use classifier::{SALARY_LABEL_KEYWORDS, SALARY_RUBRIC_CODE, is_salary_item};
pub use extractor::extract_salary_records;
pub use period_filter::{in_range, month_start};
