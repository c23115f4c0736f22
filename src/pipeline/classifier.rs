//! Salary line-item classification.
//!
//! Decides whether a payroll line item is a salary (vencimento) entry, from its
//! rubric code and free-text label.

/// Rubric code of the base salary (vencimento) entry.
pub const SALARY_RUBRIC_CODE: i64 = 101;

/// Label fragments that mark a salary entry, compared against the upper-cased label.
///
/// The accented `SUBSÍDIO` is matched literally; the unaccented spelling is not.
pub const SALARY_LABEL_KEYWORDS: [&str; 3] = ["VENCIMENTO", "SALARIO", "SUBSÍDIO"];

/// Returns `true` if a line item represents a salary payment.
///
/// An item qualifies when its code is [`SALARY_RUBRIC_CODE`], or when its
/// label, upper-cased, contains any of [`SALARY_LABEL_KEYWORDS`]. Upper-casing
/// is Unicode aware, so `subsídio` matches `SUBSÍDIO`.
///
/// # Examples
///
/// ```
/// use vencimento_engine::pipeline::is_salary_item;
///
/// assert!(is_salary_item(Some(101), ""));
/// assert!(is_salary_item(None, "Vencimento Base"));
/// assert!(is_salary_item(Some(7), "subsídio mensal"));
/// assert!(!is_salary_item(Some(999), "OUTRO"));
/// ```
pub fn is_salary_item(code: Option<i64>, label: &str) -> bool {
    if code == Some(SALARY_RUBRIC_CODE) {
        return true;
    }

    let label = label.to_uppercase();
    !label.is_empty()
        && SALARY_LABEL_KEYWORDS
            .iter()
            .any(|keyword| label.contains(keyword))
}
