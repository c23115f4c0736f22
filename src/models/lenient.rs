//! Tolerant field decoders for the payroll provider's JSON.
//!
//! The provider mixes numbers, numeric strings and nulls in the same fields.
//! These helpers turn anything unusable into `None` (or an empty collection)
//! so one bad cell never rejects the whole payload.

use std::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::debug;

/// Decodes an optional monetary value.
pub(crate) fn decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(decimal_from_value))
}

/// Decodes an optional integer (rubric code).
pub(crate) fn integer<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(integer_from_value))
}

/// Decodes a reference year. Zero counts as absent.
pub(crate) fn year<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value
        .as_ref()
        .and_then(integer_from_value)
        .and_then(|y| i32::try_from(y).ok())
        .filter(|y| *y != 0))
}

/// Decodes an optional string; other JSON types are dropped.
pub(crate) fn string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => Some(s),
        _ => None,
    })
}

/// Decodes a sequence element by element.
///
/// Elements that do not decode as `T` are dropped. Anything other than an
/// array (`null`, an object, a scalar) decodes as empty.
pub(crate) fn seq<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let elements = match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Array(elements)) => elements,
        Some(other) => {
            debug!(kind = value_kind(&other), "Expected an array, decoding as empty");
            return Ok(Vec::new());
        }
        None => return Ok(Vec::new()),
    };

    Ok(elements
        .into_iter()
        .enumerate()
        .filter_map(|(index, element)| {
            let kind = value_kind(&element);
            serde_json::from_value(element)
                .map_err(|e| debug!(index, kind, error = %e, "Skipping undecodable element"))
                .ok()
        })
        .collect())
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn decimal_from_value(value: &Value) -> Option<Decimal> {
    match value {
        Value::Number(n) => {
            let text = n.to_string();
            Decimal::from_str(&text)
                .or_else(|_| Decimal::from_scientific(&text))
                .ok()
                .or_else(|| n.as_f64().and_then(Decimal::from_f64))
        }
        Value::String(s) => parse_decimal_str(s),
        _ => None,
    }
}

/// Parses `1500.00` as well as the Brazilian `1.500,00`.
///
/// Any other use of commas (`1,500.00`, `1,2,3`) is rejected.
pub(crate) fn parse_decimal_str(raw: &str) -> Option<Decimal> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(d) = Decimal::from_str(trimmed) {
        return Some(d);
    }
    parse_brazilian(trimmed)
}

/// Parses `[-]D{1,3}(.DDD)*,D+` or `[-]D+,D+`.
fn parse_brazilian(raw: &str) -> Option<Decimal> {
    let (integer, fraction) = raw.split_once(',')?;
    if fraction.is_empty() || !fraction.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }

    let (sign, digits) = match integer.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", integer),
    };
    let groups: Vec<&str> = digits.split('.').collect();
    let all_digits = groups
        .iter()
        .all(|g| !g.is_empty() && g.chars().all(|c| c.is_ascii_digit()));
    let grouped_by_thousands =
        groups.len() == 1 || (groups[0].len() <= 3 && groups[1..].iter().all(|g| g.len() == 3));
    if !all_digits || !grouped_by_thousands {
        return None;
    }

    Decimal::from_str(&format!("{}{}.{}", sign, groups.concat(), fraction)).ok()
}

fn integer_from_value(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
