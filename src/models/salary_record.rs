//! Normalized salary records.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One positive salary payment for one month, taken from one payroll line item.
///
/// Records are produced by the extractor and never modified afterwards.
///
/// # Example
///
/// ```
/// use vencimento_engine::models::SalaryRecord;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let record = SalaryRecord::new(2020, 2, Decimal::from_str("1500.00").unwrap(), "VENCIMENTO", Some(101)).unwrap();
/// assert_eq!(record.date.to_string(), "2020-02-01");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SalaryRecord {
    /// Calendar year of the payment.
    pub year: i32,
    /// Calendar month of the payment (1-12).
    pub month: u32,
    /// Amount paid; always greater than zero.
    pub amount: Decimal,
    /// Upper-cased rubric name of the originating line item.
    pub source_label: String,
    /// Rubric code of the originating line item, when the provider sent one.
    pub source_code: Option<i64>,
    /// First day of the payment month.
    pub date: NaiveDate,
}

impl SalaryRecord {
    /// Builds a record dated on the first of the month.
    ///
    /// Returns `None` when `(year, month)` is not a valid calendar month.
    pub fn new(
        year: i32,
        month: u32,
        amount: Decimal,
        source_label: impl Into<String>,
        source_code: Option<i64>,
    ) -> Option<Self> {
        let date = NaiveDate::from_ymd_opt(year, month, 1)?;
        Some(Self {
            year,
            month,
            amount,
            source_label: source_label.into(),
            source_code,
            date,
        })
    }

    /// The `(year, month)` grouping key.
    pub fn period_key(&self) -> (i32, u32) {
        (self.year, self.month)
    }
}
