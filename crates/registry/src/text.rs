//! Input normalization shared by the record constructors.

use chrono::NaiveDate;

use chipreg_core::Violations;

pub(crate) const BIRTH_DATE_RULE: &str = "birthDate must be a date (YYYY-MM-DD)";

/// Trimmed value, or `None` when absent or blank.
pub(crate) fn optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Trimmed value, or an empty string when absent.
pub(crate) fn required(value: Option<String>) -> String {
    optional(value).unwrap_or_default()
}

/// `YYYY-MM-DD` date, `None` when absent or blank. Unparseable input records
/// [`BIRTH_DATE_RULE`].
pub(crate) fn date(value: Option<String>, violations: &mut Violations) -> Option<NaiveDate> {
    let raw = optional(value)?;
    match NaiveDate::parse_from_str(&raw, "%Y-%m-%d") {
        Ok(date) => Some(date),
        Err(_) => {
            violations.push(BIRTH_DATE_RULE);
            None
        }
    }
}
