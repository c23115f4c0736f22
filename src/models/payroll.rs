//! Payroll provider response schema.
//!
//! These types mirror the JSON returned by the payroll API's registration
//! lookup. Field names follow the provider's upper-case naming through serde
//! renames; decoding is lenient so malformed cells become `None` instead of
//! failing the whole response.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::lenient;

/// Name used when the provider omits `SERVIDOR_NOME`.
pub const UNKNOWN_PROFESSOR_NAME: &str = "Desconhecido";

/// Top-level response of a registration lookup.
///
/// A response without a `servidor` block means the registration id is unknown.
///
/// # Example
///
/// ```
/// use vencimento_engine::models::PayrollResponse;
///
/// let json = r#"{
///     "servidor": {
///         "SERVIDOR_NOME": "MARIA DA SILVA",
///         "fichasFinanceiras": []
///     }
/// }"#;
/// let response: PayrollResponse = serde_json::from_str(json).unwrap();
/// assert_eq!(response.servidor.unwrap().name(), "MARIA DA SILVA");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PayrollResponse {
    /// The professor's identity and financial history.
    #[serde(default)]
    pub servidor: Option<Professor>,
}

/// A professor (servidor) with their yearly financial records.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Professor {
    /// Full name as registered with the payroll provider.
    #[serde(
        rename = "SERVIDOR_NOME",
        default,
        deserialize_with = "lenient::string"
    )]
    pub nome: Option<String>,
    /// One block per reference year (ficha financeira).
    #[serde(
        rename = "fichasFinanceiras",
        default,
        deserialize_with = "lenient::seq"
    )]
    pub financial_records: Vec<FinancialRecordYear>,
    /// Every other identity field the provider returns, kept for the audit export.
    #[serde(flatten)]
    pub other: BTreeMap<String, Value>,
}

impl Professor {
    /// Returns the professor's name, or a placeholder when the provider omitted it.
    pub fn name(&self) -> &str {
        self.nome
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or(UNKNOWN_PROFESSOR_NAME)
    }

    /// Returns the reference years present in the financial history, in payload order.
    pub fn reference_years(&self) -> Vec<i32> {
        self.financial_records
            .iter()
            .filter_map(|r| r.reference_year)
            .collect()
    }
}

/// A yearly financial record block (ficha financeira).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FinancialRecordYear {
    /// The calendar year the block refers to. Absent or zero when malformed.
    #[serde(
        rename = "FICHA_FINANCEIRA_ANO_REFERENCIA",
        default,
        deserialize_with = "lenient::year"
    )]
    pub reference_year: Option<i32>,
    /// The payroll line items (verbas) paid during the year.
    #[serde(
        rename = "fichasFinanceirasItens",
        default,
        deserialize_with = "lenient::seq"
    )]
    pub items: Vec<LineItem>,
}

/// A single payroll line item (rubrica/verba) with its twelve monthly values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    /// The rubric code identifying the kind of payment.
    #[serde(
        rename = "FICHA_FINANCEIRA_ITEM_COD_VERBA",
        default,
        deserialize_with = "lenient::integer"
    )]
    pub code: Option<i64>,
    /// Free-text rubric name.
    #[serde(
        rename = "FICHA_FINANCEIRA_ITEM_NOME_VERBA",
        default,
        deserialize_with = "lenient::string"
    )]
    pub label: Option<String>,
    /// January payment.
    #[serde(rename = "FICHA_FINANCEIRA_ITEM_JAN", default, deserialize_with = "lenient::decimal")]
    pub jan: Option<Decimal>,
    /// February payment.
    #[serde(rename = "FICHA_FINANCEIRA_ITEM_FEV", default, deserialize_with = "lenient::decimal")]
    pub feb: Option<Decimal>,
    /// March payment.
    #[serde(rename = "FICHA_FINANCEIRA_ITEM_MAR", default, deserialize_with = "lenient::decimal")]
    pub mar: Option<Decimal>,
    /// April payment.
    #[serde(rename = "FICHA_FINANCEIRA_ITEM_ABR", default, deserialize_with = "lenient::decimal")]
    pub apr: Option<Decimal>,
    /// May payment.
    #[serde(rename = "FICHA_FINANCEIRA_ITEM_MAI", default, deserialize_with = "lenient::decimal")]
    pub may: Option<Decimal>,
    /// June payment.
    #[serde(rename = "FICHA_FINANCEIRA_ITEM_JUN", default, deserialize_with = "lenient::decimal")]
    pub jun: Option<Decimal>,
    /// July payment.
    #[serde(rename = "FICHA_FINANCEIRA_ITEM_JUL", default, deserialize_with = "lenient::decimal")]
    pub jul: Option<Decimal>,
    /// August payment.
    #[serde(rename = "FICHA_FINANCEIRA_ITEM_AGO", default, deserialize_with = "lenient::decimal")]
    pub aug: Option<Decimal>,
    /// September payment.
    #[serde(rename = "FICHA_FINANCEIRA_ITEM_SET", default, deserialize_with = "lenient::decimal")]
    pub sep: Option<Decimal>,
    /// October payment.
    #[serde(rename = "FICHA_FINANCEIRA_ITEM_OUT", default, deserialize_with = "lenient::decimal")]
    pub oct: Option<Decimal>,
    /// November payment.
    #[serde(rename = "FICHA_FINANCEIRA_ITEM_NOV", default, deserialize_with = "lenient::decimal")]
    pub nov: Option<Decimal>,
    /// December payment.
    #[serde(rename = "FICHA_FINANCEIRA_ITEM_DEZ", default, deserialize_with = "lenient::decimal")]
    pub dec: Option<Decimal>,
    /// 13th-salary payment. Decoded but not part of the monthly aggregation.
    #[serde(
        rename = "FICHA_FINANCEIRA_ITEM_DEC_TERCEIRO",
        default,
        deserialize_with = "lenient::decimal"
    )]
    pub thirteenth_salary: Option<Decimal>,
    /// Yearly total as reported by the provider.
    #[serde(
        rename = "FICHA_FINANCEIRA_ITEM_TOTAL",
        default,
        deserialize_with = "lenient::decimal"
    )]
    pub total: Option<Decimal>,
}

impl LineItem {
    /// Returns the raw value for a calendar month (1-12), if present.
    ///
    /// Out-of-range months return `None`. Non-positive values are returned as
    /// is; [`LineItem::payment_for_month`] applies the positivity rule.
    pub fn monthly_value(&self, month: u32) -> Option<Decimal> {
        match month {
            1 => self.jan,
            2 => self.feb,
            3 => self.mar,
            4 => self.apr,
            5 => self.may,
            6 => self.jun,
            7 => self.jul,
            8 => self.aug,
            9 => self.sep,
            10 => self.oct,
            11 => self.nov,
            12 => self.dec,
            _ => None,
        }
    }

    /// Returns the payment for a month, treating zero and negative values as absent.
    pub fn payment_for_month(&self, month: u32) -> Option<Decimal> {
        self.monthly_value(month).filter(|v| *v > Decimal::ZERO)
    }

    /// Returns the label, or an empty string when absent.
    pub fn label_or_empty(&self) -> &str {
        self.label.as_deref().unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_deserialize_full_response() {
        let json = r#"{
            "servidor": {
                "SERVIDOR_NOME": "JOAO PEREIRA",
                "SERVIDOR_MATRICULA": "00292553-03",
                "fichasFinanceiras": [
                    {
                        "FICHA_FINANCEIRA_ANO_REFERENCIA": 2020,
                        "fichasFinanceirasItens": [
                            {
                                "FICHA_FINANCEIRA_ITEM_COD_VERBA": 101,
                                "FICHA_FINANCEIRA_ITEM_NOME_VERBA": "VENCIMENTO BASE",
                                "FICHA_FINANCEIRA_ITEM_JAN": 1500.0,
                                "FICHA_FINANCEIRA_ITEM_FEV": "1500.25",
                                "FICHA_FINANCEIRA_ITEM_MAR": null,
                                "FICHA_FINANCEIRA_ITEM_DEC_TERCEIRO": 1500,
                                "FICHA_FINANCEIRA_ITEM_TOTAL": 4500.25
                            }
                        ]
                    }
                ]
            }
        }"#;

        let response: PayrollResponse = serde_json::from_str(json).unwrap();
        let professor = response.servidor.unwrap();
        assert_eq!(professor.name(), "JOAO PEREIRA");
        assert_eq!(
            professor.other.get("SERVIDOR_MATRICULA"),
            Some(&Value::String("00292553-03".to_string()))
        );

        let item = &professor.financial_records[0].items[0];
        assert_eq!(professor.financial_records[0].reference_year, Some(2020));
        assert_eq!(item.code, Some(101));
        assert_eq!(item.jan, Some(dec("1500")));
        assert_eq!(item.feb, Some(dec("1500.25")));
        assert_eq!(item.mar, None);
        assert_eq!(item.apr, None);
        assert_eq!(item.thirteenth_salary, Some(dec("1500")));
        assert_eq!(item.total, Some(dec("4500.25")));
    }

    #[test]
    fn test_missing_servidor_is_none() {
        let response: PayrollResponse = serde_json::from_str("{}").unwrap();
        assert!(response.servidor.is_none());
    }

    #[test]
    fn test_null_collections_become_empty() {
        let json = r#"{"SERVIDOR_NOME": null, "fichasFinanceiras": null}"#;
        let professor: Professor = serde_json::from_str(json).unwrap();
        assert!(professor.financial_records.is_empty());
        assert_eq!(professor.name(), UNKNOWN_PROFESSOR_NAME);
    }

    #[test]
    fn test_malformed_cells_become_none() {
        let json = r#"{
            "FICHA_FINANCEIRA_ANO_REFERENCIA": "not a year",
            "fichasFinanceirasItens": [
                {
                    "FICHA_FINANCEIRA_ITEM_COD_VERBA": "abc",
                    "FICHA_FINANCEIRA_ITEM_NOME_VERBA": 42,
                    "FICHA_FINANCEIRA_ITEM_JAN": "garbage",
                    "FICHA_FINANCEIRA_ITEM_FEV": true
                }
            ]
        }"#;
        let record: FinancialRecordYear = serde_json::from_str(json).unwrap();
        assert_eq!(record.reference_year, None);
        let item = &record.items[0];
        assert_eq!(item.code, None);
        assert_eq!(item.label, None);
        assert_eq!(item.jan, None);
        assert_eq!(item.feb, None);
    }

    #[test]
    fn test_zero_year_is_absent() {
        let json = r#"{"FICHA_FINANCEIRA_ANO_REFERENCIA": 0}"#;
        let record: FinancialRecordYear = serde_json::from_str(json).unwrap();
        assert_eq!(record.reference_year, None);
    }

    #[test]
    fn test_string_year_is_accepted() {
        let json = r#"{"FICHA_FINANCEIRA_ANO_REFERENCIA": "2021"}"#;
        let record: FinancialRecordYear = serde_json::from_str(json).unwrap();
        assert_eq!(record.reference_year, Some(2021));
    }

    #[test]
    fn test_monthly_value_maps_every_month() {
        let item = LineItem {
            jan: Some(dec("1")),
            feb: Some(dec("2")),
            mar: Some(dec("3")),
            apr: Some(dec("4")),
            may: Some(dec("5")),
            jun: Some(dec("6")),
            jul: Some(dec("7")),
            aug: Some(dec("8")),
            sep: Some(dec("9")),
            oct: Some(dec("10")),
            nov: Some(dec("11")),
            dec: Some(dec("12")),
            ..LineItem::default()
        };
        for month in 1..=12u32 {
            assert_eq!(item.monthly_value(month), Some(Decimal::from(month)));
        }
        assert_eq!(item.monthly_value(0), None);
        assert_eq!(item.monthly_value(13), None);
    }

    #[test]
    fn test_payment_for_month_excludes_non_positive() {
        let item = LineItem {
            jan: Some(Decimal::ZERO),
            feb: Some(dec("-10.00")),
            mar: Some(dec("0.01")),
            ..LineItem::default()
        };
        assert_eq!(item.payment_for_month(1), None);
        assert_eq!(item.payment_for_month(2), None);
        assert_eq!(item.payment_for_month(3), Some(dec("0.01")));
    }

    #[test]
    fn test_reference_years_skips_missing() {
        let professor = Professor {
            financial_records: vec![
                FinancialRecordYear {
                    reference_year: Some(2019),
                    items: vec![],
                },
                FinancialRecordYear {
                    reference_year: None,
                    items: vec![],
                },
                FinancialRecordYear {
                    reference_year: Some(2020),
                    items: vec![],
                },
            ],
            ..Professor::default()
        };
        assert_eq!(professor.reference_years(), vec![2019, 2020]);
    }

    #[test]
    fn test_malformed_entries_are_dropped_individually() {
        let json = r#"{
            "servidor": {
                "SERVIDOR_NOME": "ANA",
                "fichasFinanceiras": [
                    null,
                    "garbage",
                    {
                        "FICHA_FINANCEIRA_ANO_REFERENCIA": 2020,
                        "fichasFinanceirasItens": [
                            {
                                "FICHA_FINANCEIRA_ITEM_COD_VERBA": 101,
                                "FICHA_FINANCEIRA_ITEM_FEV": 1500.00
                            },
                            null,
                            "garbage",
                            42
                        ]
                    },
                    {
                        "FICHA_FINANCEIRA_ANO_REFERENCIA": 2021,
                        "fichasFinanceirasItens": {}
                    }
                ]
            }
        }"#;

        let professor = serde_json::from_str::<PayrollResponse>(json)
            .unwrap()
            .servidor
            .unwrap();
        assert_eq!(professor.reference_years(), vec![2020, 2021]);
        assert_eq!(professor.financial_records[0].items.len(), 1);
        assert_eq!(
            professor.financial_records[0].items[0].payment_for_month(2),
            Some(dec("1500.00"))
        );
        assert!(professor.financial_records[1].items.is_empty());
    }

    #[test]
    fn test_financial_records_as_object_is_empty() {
        let json = r#"{"servidor": {"SERVIDOR_NOME": "ANA", "fichasFinanceiras": {}}}"#;
        let professor = serde_json::from_str::<PayrollResponse>(json)
            .unwrap()
            .servidor
            .unwrap();
        assert!(professor.financial_records.is_empty());
        assert_eq!(professor.name(), "ANA");
    }
}
