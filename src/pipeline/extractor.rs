//! Salary record extraction.
//!
//! This module walks a professor's financial history (years → line items →
//! monthly values) and emits one [`SalaryRecord`] per salary-bearing line item
//! and month that falls inside the requested period.

use chrono::NaiveDate;
use tracing::debug;

use crate::models::{Professor, SalaryRecord};

use super::classifier::is_salary_item;
use super::period_filter::in_range;

/// Extracts the salary records of a professor within a period.
///
/// For every yearly block with a reference year, every line item accepted by
/// [`is_salary_item`] contributes one record per month (January to December)
/// whose value is present, positive and inside `[start, end]` at month
/// granularity.
///
/// Malformed entries are skipped one by one and never abort the extraction:
/// a block without a reference year is ignored, as is any month whose value
/// was missing, non-numeric or not positive. The 13th-salary value is not
/// emitted; it has no calendar month of its own.
///
/// Records are emitted in payload order: year block, then line item, then
/// month. Chronological ordering is the aggregator's job.
///
/// # Examples
///
/// ```
/// use vencimento_engine::models::{FinancialRecordYear, LineItem, Professor};
/// use vencimento_engine::pipeline::extract_salary_records;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let professor = Professor {
///     financial_records: vec![FinancialRecordYear {
///         reference_year: Some(2020),
///         items: vec![LineItem {
///             code: Some(101),
///             feb: Some(Decimal::from_str("1500.00").unwrap()),
///             ..LineItem::default()
///         }],
///     }],
///     ..Professor::default()
/// };
///
/// let records = extract_salary_records(
///     &professor,
///     NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
///     NaiveDate::from_ymd_opt(2020, 12, 31).unwrap(),
/// );
///
/// assert_eq!(records.len(), 1);
/// assert_eq!(records[0].month, 2);
/// assert_eq!(records[0].amount, Decimal::from_str("1500.00").unwrap());
/// ```
pub fn extract_salary_records(
    professor: &Professor,
    start: NaiveDate,
    end: NaiveDate,
) -> Vec<SalaryRecord> {
    let mut records = Vec::new();

    for block in &professor.financial_records {
        let Some(year) = block.reference_year else {
            debug!(
                items = block.items.len(),
                "Skipping financial record without reference year"
            );
            continue;
        };

        for item in &block.items {
            if !is_salary_item(item.code, item.label_or_empty()) {
                continue;
            }
            let label = item.label_or_empty().to_uppercase();

            for month in 1..=12u32 {
                let Some(amount) = item.payment_for_month(month) else {
                    continue;
                };
                if !in_range(year, month, start, end) {
                    continue;
                }
                match SalaryRecord::new(year, month, amount, label.clone(), item.code) {
                    Some(record) => records.push(record),
                    None => debug!(year, month, "Skipping entry with invalid date"),
                }
            }
        }
    }

    debug!(
        records = records.len(),
        start = %start,
        end = %end,
        "Extracted salary records"
    );
    records
}
