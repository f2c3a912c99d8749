//! Display formatting helpers.

use chrono::Datelike;

/// Pattern used when the caller has no preference.
pub const DEFAULT_DATE_FORMAT: &str = "YYYY-MM-DD";

/// Formats `date` by substituting the first `YYYY`, `MM` and `DD` tokens in
/// `pattern`.
///
/// The year is written as-is; month and day are zero-padded to two digits.
/// Any other text in `pattern` is kept verbatim.
#[must_use]
pub fn format_date(date: &impl Datelike, pattern: &str) -> String {
    pattern
        .replacen("YYYY", &date.year().to_string(), 1)
        .replacen("MM", &format!("{:02}", date.month()), 1)
        .replacen("DD", &format!("{:02}", date.day()), 1)
}
