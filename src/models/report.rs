//! Report models for the Vencimento Engine.
//!
//! This module contains the per-month aggregates and the two report shapes
//! handed to the presentation layer: the full [`Report`] with every
//! constituent record, and the lightweight [`SummaryReport`] used for
//! previews.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::SalaryRecord;

/// A month/year pair used for report period bounds.
///
/// Displays as `MM/YYYY`.
///
/// # Example
///
/// ```
/// use vencimento_engine::models::MonthYear;
/// use chrono::NaiveDate;
///
/// let bound = MonthYear::from_date(NaiveDate::from_ymd_opt(2020, 3, 15).unwrap());
/// assert_eq!(bound.to_string(), "03/2020");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MonthYear {
    /// Year component (ordered first so derived ordering is chronological).
    pub year: i32,
    /// Month component (1-12).
    pub month: u32,
}

impl MonthYear {
    /// Takes the month and year of a date, ignoring the day.
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Formats as `YYYY-MM`, the sortable key used in summaries and exports.
    pub fn key(&self) -> String {
        format!("{:04}-{:02}", self.year, self.month)
    }
}

impl fmt::Display for MonthYear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}/{}", self.month, self.year)
    }
}

/// All salary records of one calendar month.
///
/// Invariants: `total` is the exact sum of the record amounts, `count` equals
/// the number of records, and every record shares `(year, month)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodAggregate {
    /// Calendar year.
    pub year: i32,
    /// Calendar month (1-12).
    pub month: u32,
    /// Display label such as `Feb/2020`.
    pub label: String,
    /// The month's records, in the order they were supplied.
    pub records: Vec<SalaryRecord>,
    /// Sum of the record amounts.
    pub total: Decimal,
    /// Number of records.
    pub count: usize,
}

impl PeriodAggregate {
    /// Starts an empty aggregate for a month.
    pub fn new(year: i32, month: u32) -> Self {
        Self {
            year,
            month,
            label: period_label(year, month),
            records: Vec::new(),
            total: Decimal::ZERO,
            count: 0,
        }
    }

    /// Adds a record, keeping `total` and `count` in step.
    ///
    /// Returns `false`, leaving the aggregate unchanged, when the amount would
    /// overflow `total`.
    pub fn push(&mut self, record: SalaryRecord) -> bool {
        let Some(total) = self.total.checked_add(record.amount) else {
            return false;
        };
        self.total = total;
        self.count += 1;
        self.records.push(record);
        true
    }

    /// Drops the constituent records, keeping only the totals.
    pub fn to_total(&self) -> PeriodTotal {
        PeriodTotal {
            year: self.year,
            month: self.month,
            total: self.total,
            count: self.count,
        }
    }
}

/// The totals of one calendar month without its records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodTotal {
    /// Calendar year.
    pub year: i32,
    /// Calendar month (1-12).
    pub month: u32,
    /// Sum of the month's record amounts.
    pub total: Decimal,
    /// Number of records in the month.
    pub count: usize,
}

impl PeriodTotal {
    /// Starts an empty total for a month.
    pub fn new(year: i32, month: u32) -> Self {
        Self {
            year,
            month,
            total: Decimal::ZERO,
            count: 0,
        }
    }

    /// Adds one record amount.
    ///
    /// Returns `false`, leaving the total unchanged, on overflow.
    pub fn add(&mut self, amount: Decimal) -> bool {
        let Some(total) = self.total.checked_add(amount) else {
            return false;
        };
        self.total = total;
        self.count += 1;
        true
    }

    /// The month as a [`MonthYear`].
    pub fn month_year(&self) -> MonthYear {
        MonthYear {
            year: self.year,
            month: self.month,
        }
    }
}

/// The full vencimento report for one professor and one period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    /// The professor's name.
    pub professor_name: String,
    /// The registration id (matrícula) that was looked up.
    pub registration_id: String,
    /// Human-readable report title.
    pub title: String,
    /// First month of the requested period.
    pub period_start: MonthYear,
    /// Last month of the requested period.
    pub period_end: MonthYear,
    /// Monthly aggregates in ascending chronological order.
    pub periods: Vec<PeriodAggregate>,
    /// Sum of every period total.
    pub grand_total: Decimal,
    /// `grand_total / record_count`, or zero when there are no records.
    pub average_per_record: Decimal,
    /// Number of salary records across all periods.
    pub record_count: usize,
}

impl Report {
    /// Iterates over every record of every period, chronologically.
    pub fn records(&self) -> impl Iterator<Item = &SalaryRecord> {
        self.periods.iter().flat_map(|p| p.records.iter())
    }

    /// Projects the report onto its summary, without the per-record detail.
    ///
    /// The projection copies the already computed totals; nothing is recomputed.
    pub fn summary(&self) -> SummaryReport {
        SummaryReport {
            professor_name: self.professor_name.clone(),
            registration_id: self.registration_id.clone(),
            period_start: self.period_start,
            period_end: self.period_end,
            record_count: self.record_count,
            grand_total: self.grand_total,
            average_per_record: self.average_per_record,
            monthly_totals: self
                .periods
                .iter()
                .map(|p| (p.to_total().month_year().key(), p.total))
                .collect(),
        }
    }
}

/// A preview of the report holding only monthly totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryReport {
    /// The professor's name.
    pub professor_name: String,
    /// The registration id (matrícula) that was looked up.
    pub registration_id: String,
    /// First month of the requested period.
    pub period_start: MonthYear,
    /// Last month of the requested period.
    pub period_end: MonthYear,
    /// Number of salary records across all months.
    pub record_count: usize,
    /// Sum of every monthly total.
    pub grand_total: Decimal,
    /// `grand_total / record_count`, or zero when there are no records.
    pub average_per_record: Decimal,
    /// Monthly totals keyed `YYYY-MM`.
    pub monthly_totals: BTreeMap<String, Decimal>,
}

/// Formats a month as `Mon/YYYY` (for example `Feb/2020`).
pub fn period_label(year: i32, month: u32) -> String {
    NaiveDate::from_ymd_opt(year, month, 1)
        .map(|d| d.format("%b/%Y").to_string())
        .unwrap_or_else(|| format!("{:02}/{}", month, year))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn record(year: i32, month: u32, amount: &str) -> SalaryRecord {
        SalaryRecord::new(year, month, dec(amount), "VENCIMENTO", Some(101)).unwrap()
    }

    #[test]
    fn test_month_year_display_and_key() {
        let bound = MonthYear {
            year: 2020,
            month: 3,
        };
        assert_eq!(bound.to_string(), "03/2020");
        assert_eq!(bound.key(), "2020-03");
    }

    #[test]
    fn test_month_year_orders_chronologically() {
        let dec_2019 = MonthYear {
            year: 2019,
            month: 12,
        };
        let jan_2020 = MonthYear {
            year: 2020,
            month: 1,
        };
        assert!(dec_2019 < jan_2020);
    }

    #[test]
    fn test_period_label() {
        assert_eq!(period_label(2020, 2), "Feb/2020");
        assert_eq!(period_label(2020, 13), "13/2020");
    }

    #[test]
    fn test_push_keeps_invariants() {
        let mut aggregate = PeriodAggregate::new(2020, 2);
        aggregate.push(record(2020, 2, "1500.10"));
        aggregate.push(record(2020, 2, "200.20"));
        assert_eq!(aggregate.total, dec("1700.30"));
        assert_eq!(aggregate.count, 2);
        assert_eq!(aggregate.records.len(), 2);
        assert_eq!(aggregate.label, "Feb/2020");
    }

    #[test]
    fn test_push_refuses_overflowing_amount() {
        let huge = "50000000000000000000000000000";
        let mut aggregate = PeriodAggregate::new(2020, 2);
        assert!(aggregate.push(record(2020, 2, huge)));
        assert!(!aggregate.push(record(2020, 2, huge)));
        assert_eq!(aggregate.total, dec(huge));
        assert_eq!(aggregate.count, 1);
        assert_eq!(aggregate.records.len(), 1);

        let mut total = PeriodTotal::new(2020, 2);
        assert!(total.add(dec(huge)));
        assert!(!total.add(dec(huge)));
        assert_eq!(total.count, 1);
    }

    #[test]
    fn test_to_total_matches_aggregate() {
        let mut aggregate = PeriodAggregate::new(2020, 5);
        aggregate.push(record(2020, 5, "0.10"));
        aggregate.push(record(2020, 5, "0.20"));
        let total = aggregate.to_total();
        assert_eq!(total.total, dec("0.30"));
        assert_eq!(total.count, 2);
        assert_eq!(total.month_year().key(), "2020-05");
    }

    #[test]
    fn test_summary_projection_copies_totals() {
        let mut feb = PeriodAggregate::new(2020, 2);
        feb.push(record(2020, 2, "100.00"));
        let report = Report {
            professor_name: "ANA".to_string(),
            registration_id: "00000001-00".to_string(),
            title: "t".to_string(),
            period_start: MonthYear {
                year: 2020,
                month: 1,
            },
            period_end: MonthYear {
                year: 2020,
                month: 12,
            },
            periods: vec![feb],
            grand_total: dec("100.00"),
            average_per_record: dec("100.00"),
            record_count: 1,
        };

        let summary = report.summary();
        assert_eq!(summary.monthly_totals.get("2020-02"), Some(&dec("100.00")));
        assert_eq!(summary.grand_total, report.grand_total);
        assert_eq!(summary.record_count, 1);
        assert_eq!(report.records().count(), 1);
    }
}
