//! Report assembly.
//!
//! Combines professor identity, the requested period and the monthly
//! aggregates into the final [`Report`] or its [`SummaryReport`] preview.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::models::{MonthYear, PeriodAggregate, PeriodTotal, Report, SummaryReport};

/// Builds the report title shown above the monthly table.
pub fn report_title(professor_name: &str, registration_id: &str) -> String {
    format!(
        "Relatório de Vencimentos - {} - Matrícula {}",
        professor_name, registration_id
    )
}

/// Divides a total by a record count, returning zero for an empty set.
pub fn average_per_record(total: Decimal, count: usize) -> Decimal {
    if count == 0 {
        Decimal::ZERO
    } else {
        total / Decimal::from(count)
    }
}

/// Sums amounts, saturating at the `Decimal` bounds instead of panicking.
///
/// Totals produced by the aggregator always fit, so this only saturates for
/// hand-built periods.
fn saturating_sum(amounts: impl Iterator<Item = Decimal>) -> Decimal {
    amounts.fold(Decimal::ZERO, Decimal::saturating_add)
}

/// Assembles the full report from monthly aggregates.
///
/// `grand_total` and `record_count` are the sums of the period totals and
/// counts; `average_per_record` is their quotient, or zero when there are no
/// records. Periods are expected in ascending order, as produced by
/// [`aggregate_by_month`](super::aggregate_by_month).
///
/// # Examples
///
/// ```
/// use vencimento_engine::pipeline::assemble_report;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let report = assemble_report(
///     "MARIA",
///     "00292553-03",
///     vec![],
///     NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
///     NaiveDate::from_ymd_opt(2020, 12, 31).unwrap(),
/// );
/// assert_eq!(report.grand_total, Decimal::ZERO);
/// assert_eq!(report.average_per_record, Decimal::ZERO);
/// assert_eq!(report.period_start.to_string(), "01/2020");
/// ```
pub fn assemble_report(
    professor_name: &str,
    registration_id: &str,
    periods: Vec<PeriodAggregate>,
    start: NaiveDate,
    end: NaiveDate,
) -> Report {
    let grand_total = saturating_sum(periods.iter().map(|p| p.total));
    let record_count: usize = periods.iter().map(|p| p.count).sum();

    Report {
        professor_name: professor_name.to_string(),
        registration_id: registration_id.to_string(),
        title: report_title(professor_name, registration_id),
        period_start: MonthYear::from_date(start),
        period_end: MonthYear::from_date(end),
        periods,
        grand_total,
        average_per_record: average_per_record(grand_total, record_count),
        record_count,
    }
}

/// Assembles the summary preview from monthly totals.
///
/// Uses the same arithmetic as [`assemble_report`], so for the same records
/// both produce identical totals.
pub fn assemble_summary(
    professor_name: &str,
    registration_id: &str,
    totals: &[PeriodTotal],
    start: NaiveDate,
    end: NaiveDate,
) -> SummaryReport {
    let grand_total = saturating_sum(totals.iter().map(|t| t.total));
    let record_count: usize = totals.iter().map(|t| t.count).sum();

    SummaryReport {
        professor_name: professor_name.to_string(),
        registration_id: registration_id.to_string(),
        period_start: MonthYear::from_date(start),
        period_end: MonthYear::from_date(end),
        record_count,
        grand_total,
        average_per_record: average_per_record(grand_total, record_count),
        monthly_totals: totals
            .iter()
            .map(|t| (t.month_year().key(), t.total))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SalaryRecord;
    use crate::pipeline::{aggregate_by_month, aggregate_totals};
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample_records() -> Vec<SalaryRecord> {
        vec![
            SalaryRecord::new(2020, 1, dec("1000.00"), "VENCIMENTO", Some(101)).unwrap(),
            SalaryRecord::new(2020, 1, dec("500.00"), "SALARIO", None).unwrap(),
            SalaryRecord::new(2020, 2, dec("1000.00"), "VENCIMENTO", Some(101)).unwrap(),
        ]
    }

    #[test]
    fn test_average_per_record_zero_count() {
        assert_eq!(average_per_record(dec("100"), 0), Decimal::ZERO);
    }

    #[test]
    fn test_average_per_record() {
        assert_eq!(average_per_record(dec("2500.00"), 3), dec("2500.00") / dec("3"));
        assert_eq!(average_per_record(dec("3000.00"), 2), dec("1500.00"));
    }

    #[test]
    fn test_report_title() {
        assert_eq!(
            report_title("MARIA", "00292553-03"),
            "Relatório de Vencimentos - MARIA - Matrícula 00292553-03"
        );
    }

    #[test]
    fn test_assemble_report_totals() {
        let periods = aggregate_by_month(sample_records());
        let report = assemble_report("MARIA", "1", periods, date(2020, 1, 10), date(2020, 2, 5));

        assert_eq!(report.grand_total, dec("2500.00"));
        assert_eq!(report.record_count, 3);
        assert_eq!(report.periods.len(), 2);
        assert_eq!(report.period_start.to_string(), "01/2020");
        assert_eq!(report.period_end.to_string(), "02/2020");
        let sum: Decimal = report.periods.iter().map(|p| p.total).sum();
        assert_eq!(sum, report.grand_total);
    }

    #[test]
    fn test_hand_built_overflowing_periods_saturate() {
        let huge = dec("50000000000000000000000000000");
        let mut feb = PeriodAggregate::new(2020, 2);
        let mut mar = PeriodAggregate::new(2020, 3);
        assert!(feb.push(SalaryRecord::new(2020, 2, huge, "VENCIMENTO", Some(101)).unwrap()));
        assert!(mar.push(SalaryRecord::new(2020, 3, huge, "VENCIMENTO", Some(101)).unwrap()));

        let report = assemble_report("MARIA", "1", vec![feb, mar], date(2020, 1, 1), date(2020, 12, 31));
        assert_eq!(report.grand_total, Decimal::MAX);
        assert_eq!(report.record_count, 2);
    }

    #[test]
    fn test_summary_matches_report_projection() {
        let records = sample_records();
        let totals = aggregate_totals(&records);
        let summary = assemble_summary("MARIA", "1", &totals, date(2020, 1, 1), date(2020, 2, 1));

        let report = assemble_report(
            "MARIA",
            "1",
            aggregate_by_month(records),
            date(2020, 1, 1),
            date(2020, 2, 1),
        );

        assert_eq!(summary, report.summary());
        assert_eq!(summary.monthly_totals.get("2020-01"), Some(&dec("1500.00")));
        assert_eq!(summary.monthly_totals.get("2020-02"), Some(&dec("1000.00")));
    }
}
