//! Monthly aggregation of salary records.
//!
//! Groups salary records by calendar month and sums them with exact decimal
//! arithmetic. Two shapes are produced from the same grouping: full
//! [`PeriodAggregate`]s that keep every record, and [`PeriodTotal`]s that keep
//! only the sums for lightweight previews.

use std::borrow::Borrow;
use std::collections::BTreeMap;

use rust_decimal::Decimal;
use tracing::debug;

use crate::models::{PeriodAggregate, PeriodTotal, SalaryRecord};

/// Groups records by `(year, month)` into chronologically sorted aggregates.
///
/// Within each month the records keep the order they were supplied in. The
/// output is sorted ascending by `(year, month)` and holds one entry per
/// distinct month. Empty input gives empty output. A record whose amount
/// would overflow the totals is skipped.
///
/// # Examples
///
/// ```
/// use vencimento_engine::models::SalaryRecord;
/// use vencimento_engine::pipeline::aggregate_by_month;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let records = vec![
///     SalaryRecord::new(2020, 3, Decimal::from_str("100.00").unwrap(), "VENCIMENTO", Some(101)).unwrap(),
///     SalaryRecord::new(2020, 1, Decimal::from_str("50.00").unwrap(), "VENCIMENTO", Some(101)).unwrap(),
///     SalaryRecord::new(2020, 3, Decimal::from_str("25.50").unwrap(), "SALARIO", None).unwrap(),
/// ];
///
/// let periods = aggregate_by_month(records);
/// assert_eq!(periods.len(), 2);
/// assert_eq!((periods[0].year, periods[0].month), (2020, 1));
/// assert_eq!(periods[1].total, Decimal::from_str("125.50").unwrap());
/// assert_eq!(periods[1].count, 2);
/// ```
pub fn aggregate_by_month(records: Vec<SalaryRecord>) -> Vec<PeriodAggregate> {
    group_by_month(records, PeriodAggregate::new, PeriodAggregate::push)
}

/// Sums records by `(year, month)` without keeping the records themselves.
///
/// Produces exactly the totals and counts [`aggregate_by_month`] would, in the
/// same order.
pub fn aggregate_totals(records: &[SalaryRecord]) -> Vec<PeriodTotal> {
    group_by_month(records, PeriodTotal::new, |total, record: &SalaryRecord| {
        total.add(record.amount)
    })
}

/// Shared grouping routine behind both aggregations.
///
/// Keeps a running grand total across all months; a record whose amount would
/// overflow it, or its month's total, is skipped. The sum of the returned
/// month totals therefore always fits in a `Decimal`.
fn group_by_month<R, B>(
    records: impl IntoIterator<Item = R>,
    open: impl Fn(i32, u32) -> B,
    insert: impl Fn(&mut B, R) -> bool,
) -> Vec<B>
where
    R: Borrow<SalaryRecord>,
{
    let mut grouped: BTreeMap<(i32, u32), B> = BTreeMap::new();
    let mut running = Decimal::ZERO;

    for record in records {
        let (year, month) = record.borrow().period_key();
        let amount = record.borrow().amount;

        let Some(next) = running.checked_add(amount) else {
            debug!(year, month, amount = %amount, "Skipping record that would overflow the grand total");
            continue;
        };
        let bucket = grouped
            .entry((year, month))
            .or_insert_with(|| open(year, month));
        if insert(bucket, record) {
            running = next;
        } else {
            debug!(year, month, amount = %amount, "Skipping record that would overflow the monthly total");
        }
    }

    grouped.into_values().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn record(year: i32, month: u32, amount: &str, label: &str) -> SalaryRecord {
        SalaryRecord::new(year, month, dec(amount), label, Some(101)).unwrap()
    }

    #[test]
    fn test_empty_input_gives_empty_output() {
        assert!(aggregate_by_month(vec![]).is_empty());
        assert!(aggregate_totals(&[]).is_empty());
    }

    #[test]
    fn test_output_sorted_across_years() {
        let records = vec![
            record(2021, 1, "1.00", "A"),
            record(2020, 12, "1.00", "A"),
            record(2020, 2, "1.00", "A"),
        ];
        let keys: Vec<(i32, u32)> = aggregate_by_month(records)
            .iter()
            .map(|p| (p.year, p.month))
            .collect();
        assert_eq!(keys, vec![(2020, 2), (2020, 12), (2021, 1)]);
    }

    #[test]
    fn test_group_preserves_input_order() {
        let records = vec![
            record(2020, 5, "1.00", "FIRST"),
            record(2020, 4, "9.00", "OTHER"),
            record(2020, 5, "2.00", "SECOND"),
            record(2020, 5, "3.00", "THIRD"),
        ];
        let periods = aggregate_by_month(records);
        let labels: Vec<&str> = periods[1]
            .records
            .iter()
            .map(|r| r.source_label.as_str())
            .collect();
        assert_eq!(labels, vec!["FIRST", "SECOND", "THIRD"]);
    }

    #[test]
    fn test_totals_are_exact() {
        // 0.1 summed ten times is exactly 1.0 with decimals.
        let records: Vec<SalaryRecord> = (0..10).map(|_| record(2020, 1, "0.1", "A")).collect();
        let periods = aggregate_by_month(records);
        assert_eq!(periods[0].total, dec("1.0"));
        assert_eq!(periods[0].count, 10);
    }

    #[test]
    fn test_totals_match_full_aggregation() {
        let records = vec![
            record(2020, 1, "1500.33", "A"),
            record(2020, 1, "12.01", "B"),
            record(2020, 7, "999.99", "A"),
            record(2019, 7, "0.01", "A"),
        ];
        let totals = aggregate_totals(&records);
        let full: Vec<PeriodTotal> = aggregate_by_month(records)
            .iter()
            .map(PeriodAggregate::to_total)
            .collect();
        assert_eq!(totals, full);
    }

    #[test]
    fn test_overflowing_amounts_are_skipped() {
        let huge = "50000000000000000000000000000";
        let records = vec![
            record(2020, 2, huge, "A"),
            record(2020, 2, huge, "B"),
            record(2020, 3, huge, "C"),
            record(2020, 4, "10.00", "D"),
        ];

        let periods = aggregate_by_month(records.clone());
        let keys: Vec<(i32, u32, usize)> =
            periods.iter().map(|p| (p.year, p.month, p.count)).collect();
        assert_eq!(keys, vec![(2020, 2, 1), (2020, 4, 1)]);
        assert_eq!(periods[0].total, dec(huge));

        let totals = aggregate_totals(&records);
        let full: Vec<PeriodTotal> = periods.iter().map(PeriodAggregate::to_total).collect();
        assert_eq!(totals, full);
    }

    #[test]
    fn test_no_duplicate_keys() {
        let records = vec![
            record(2020, 3, "1.00", "A"),
            record(2020, 3, "1.00", "B"),
            record(2020, 3, "1.00", "C"),
        ];
        let periods = aggregate_by_month(records);
        assert_eq!(periods.len(), 1);
        assert_eq!(periods[0].total, dec("3.00"));
    }
}
