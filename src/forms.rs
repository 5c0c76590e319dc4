//! Form field sanitizers and validation helpers shared by HTML form handlers.

use std::borrow::Cow;

use chrono::NaiveDate;
use minijinja::HtmlEscape;
use serde::Serialize;
use validator::{ValidationError, ValidationErrors};

/// A single field-level validation failure, rendered next to the form
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Replace markup-significant characters with HTML entities.
///
/// Backslash and backtick are escaped on top of what the template engine does.
pub fn escape_html(s: &str) -> String {
    HtmlEscape(s)
        .to_string()
        .replace('\\', "&#x5C;")
        .replace('`', "&#96;")
}

/// Trim then escape: the standard treatment of free-text form fields.
pub fn trim_escape(s: Option<&str>) -> String {
    escape_html(s.unwrap_or_default().trim())
}

/// Parse an ISO-8601 calendar date, accepting a full date-time as well.
///
/// The date is `YYYY-MM-DD` or `YYYYMMDD`, with no sign and no surrounding
/// whitespace. It may be followed by `T` (or a space) and a time of day with an
/// optional fraction and UTC offset. Only the date part is kept; offsets are
/// ignored.
pub fn parse_iso8601_date(s: &str) -> Option<NaiveDate> {
    let (date, rest) = split_calendar_date(s)?;
    match rest.as_bytes() {
        [] => Some(date),
        [b'T' | b't' | b' ', time @ ..] if is_iso8601_time(time) => Some(date),
        _ => None,
    }
}

fn split_calendar_date(s: &str) -> Option<(NaiveDate, &str)> {
    let b = s.as_bytes();
    let extended = b.get(4) == Some(&b'-');
    let (len, month_at, day_at) = if extended { (10, 5, 8) } else { (8, 4, 6) };
    if b.len() < len || (extended && b[7] != b'-') {
        return None;
    }
    let year = digits(&b[..4])?;
    let month = digits(&b[month_at..month_at + 2])?;
    let day = digits(&b[day_at..day_at + 2])?;
    let date = NaiveDate::from_ymd_opt(year as i32, month, day)?;
    Some((date, &s[len..]))
}

fn digits(b: &[u8]) -> Option<u32> {
    b.iter().try_fold(0u32, |acc, c| {
        c.is_ascii_digit().then(|| acc * 10 + u32::from(c - b'0'))
    })
}

/// Two ASCII digits at `at` forming a number no greater than `max`
fn two_digits(b: &[u8], at: usize, max: u32) -> bool {
    b.get(at..at + 2)
        .and_then(digits)
        .map_or(false, |n| n <= max)
}

/// `hh[:mm[:ss]][.fff][Z|+hh[:mm]]`, colons optional
fn is_iso8601_time(b: &[u8]) -> bool {
    if !two_digits(b, 0, 23) {
        return false;
    }
    let mut i = 2;
    for _ in 0..2 {
        let at = if b.get(i) == Some(&b':') { i + 1 } else { i };
        if !two_digits(b, at, 59) {
            break;
        }
        i = at + 2;
    }
    if matches!(b.get(i), Some(b'.' | b',')) {
        let fraction = b[i + 1..].iter().take_while(|c| c.is_ascii_digit()).count();
        if fraction == 0 {
            return false;
        }
        i += 1 + fraction;
    }
    is_utc_offset(&b[i..])
}

fn is_utc_offset(b: &[u8]) -> bool {
    match b {
        [] | [b'Z' | b'z'] => true,
        [b'+' | b'-', rest @ ..] if two_digits(rest, 0, 23) => {
            let minutes = &rest[2..];
            minutes.is_empty()
                || (matches!(minutes, [b':', _, _] | [_, _])
                    && two_digits(minutes, minutes.len() - 2, 59))
        }
        _ => false,
    }
}

/// `validator` hook for optional date fields
pub fn validate_iso8601_date(value: &str) -> Result<(), ValidationError> {
    if parse_iso8601_date(value).is_some() {
        return Ok(());
    }
    let mut err = ValidationError::new("iso8601");
    err.message = Some(Cow::Borrowed("Invalid date"));
    Err(err)
}

/// Flatten `ValidationErrors` into field errors following the form's field order.
pub fn collect_field_errors(errors: &ValidationErrors, order: &[&'static str]) -> Vec<FieldError> {
    let by_field = errors.field_errors();
    let mut out = Vec::new();
    for field in order {
        if let Some(list) = by_field.get(*field) {
            for err in list.iter() {
                let message = err
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("Invalid value for {}", field));
                out.push(FieldError::new(*field, message));
            }
        }
    }
    out
}
