//! Calendar-date validation for form fields. Every date column in the schema
//! stores a plain `YYYY-MM-DD` string, so the forms accept exactly that shape
//! and nothing else.

use chrono::NaiveDate;

use crate::error::OpError;

/// The one date format the store accepts.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a strict zero-padded `YYYY-MM-DD` date. Chrono alone would accept
/// unpadded components, so the parsed date must render back to the exact
/// input string.
pub fn parse_iso_date(text: &str) -> Option<NaiveDate> {
    let date = NaiveDate::parse_from_str(text, DATE_FORMAT).ok()?;
    if date.format(DATE_FORMAT).to_string() == text {
        Some(date)
    } else {
        None
    }
}

/// Validate a required date field, naming the field in the failure message.
pub fn require_date(label: &str, text: &str) -> Result<(), OpError> {
    if parse_iso_date(text).is_some() {
        Ok(())
    } else {
        Err(OpError::validation(format!(
            "{label} must be a valid date in YYYY-MM-DD format"
        )))
    }
}

/// Validate a date field that may be left blank.
pub fn optional_date(label: &str, text: &str) -> Result<(), OpError> {
    if text.is_empty() {
        Ok(())
    } else {
        require_date(label, text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_padded_iso_dates() {
        assert!(parse_iso_date("2024-01-01").is_some());
        assert!(parse_iso_date("1999-12-31").is_some());
    }

    #[test]
    fn rejects_other_formats() {
        assert!(parse_iso_date("01/01/2024").is_none());
        assert!(parse_iso_date("2024-1-1").is_none());
        assert!(parse_iso_date("2024-13-01").is_none());
        assert!(parse_iso_date("yesterday").is_none());
        assert!(parse_iso_date("").is_none());
    }

    #[test]
    fn optional_date_allows_blank() {
        assert!(optional_date("return date", "").is_ok());
        assert!(optional_date("return date", "2024-02-30").is_err());
    }
}
