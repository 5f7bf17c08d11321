use crate::error::{DairyError, DairyResult};
use chrono::NaiveDate;

pub fn parse_date_safe(date_str: &str) -> Option<NaiveDate> {
    if date_str.trim().is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(date_str, "%Y%m%d"))
        .ok()
}

/// Validates a required `YYYY-MM-DD` field, returning the original string.
/// Records are stored and matched by their exact date text, so the parsed
/// value is only used as a well-formedness check.
pub fn require_date<'a>(field: &str, value: &'a str) -> DairyResult<&'a str> {
    match parse_date_safe(value) {
        Some(_) => Ok(value),
        None => Err(DairyError::Validation(format!(
            "Invalid {} (expected YYYY-MM-DD)",
            field
        ))),
    }
}

/// Canonical shift label, or a validation error for anything that is not
/// Morning/Evening (matched case-insensitively).
pub fn canonical_shift(shift: &str) -> DairyResult<&'static str> {
    match shift.trim().to_ascii_lowercase().as_str() {
        "morning" => Ok("Morning"),
        "evening" => Ok("Evening"),
        _ => Err(DairyError::Validation(
            "Shift must be Morning or Evening".to_string(),
        )),
    }
}
