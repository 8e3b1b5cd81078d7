//! Number, date and phone formatting
//!
//! Pure helpers that implement the format-table lookups. They return `None`
//! when the input cannot be formatted, and the wrapper turns that into a
//! null value.
//!
//! Copyright (c) 2025 Safeval Team
//! Licensed under the Apache-2.0 license

use crate::coerce::coerce;
use crate::scalar::Scalar;
use crate::settings::{is_valid_strftime, Settings, PHONE_DIGIT_PLACEHOLDER};
use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Largest number of decimals [`format_number`] renders; larger requests are clamped
pub const MAX_DECIMALS: usize = 20;

const DATE_TIME_PATTERNS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"];

/// Round half away from zero to `decimals` places
fn round_to(value: f64, decimals: usize) -> f64 {
    let factor = 10f64.powi(decimals.min(MAX_DECIMALS) as i32);
    let scaled = value * factor;
    if !scaled.is_finite() {
        return value;
    }
    scaled.round() / factor
}

fn group_thousands(digits: &str, separator: &str) -> String {
    let len = digits.len();
    let mut grouped = String::with_capacity(len + len / 3 * separator.len());
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            grouped.push_str(separator);
        }
        grouped.push(ch);
    }
    grouped
}

/// Format a number with a fixed number of decimals and the configured
/// separators, e.g. `1234567.891` → `"1,234,567.89"`.
pub fn format_number(value: f64, decimals: usize, settings: &Settings) -> String {
    if !value.is_finite() {
        return Scalar::Float(value).to_text();
    }

    let decimals = decimals.min(MAX_DECIMALS);
    let rounded = round_to(value, decimals);
    let text = format!("{:.*}", decimals, rounded.abs());
    let (int_part, frac_part) = match text.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (text.as_str(), None),
    };

    let is_nonzero = text.bytes().any(|b| b.is_ascii_digit() && b != b'0');
    let mut out = String::new();
    if rounded < 0.0 && is_nonzero {
        out.push('-');
    }
    out.push_str(&group_thousands(int_part, &settings.thousands_separator));
    if let Some(frac) = frac_part {
        out.push_str(&settings.decimal_separator);
        out.push_str(frac);
    }
    out
}

/// Interpret a scalar as a point in time.
///
/// Numbers and numeric strings are unix timestamps (UTC). Strings may also
/// be `YYYY-MM-DD`, `YYYY-MM-DD HH:MM[:SS]` or RFC 3339; an RFC 3339 offset
/// keeps its local wall-clock time.
pub fn parse_datetime(value: &Scalar) -> Option<NaiveDateTime> {
    if let Some(seconds) = coerce(value, false) {
        if !seconds.is_finite() {
            return None;
        }
        return DateTime::from_timestamp(seconds.trunc() as i64, 0).map(|dt| dt.naive_utc());
    }

    let text = value.as_str()?.trim();
    if text.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.naive_local());
    }
    for pattern in DATE_TIME_PATTERNS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(text, pattern) {
            return Some(dt);
        }
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}

/// Render a timestamp with a strftime pattern; `None` for invalid patterns
pub fn format_datetime(value: &NaiveDateTime, pattern: &str) -> Option<String> {
    if !is_valid_strftime(pattern) {
        return None;
    }
    Some(value.format(pattern).to_string())
}

/// Format the digits of `text` with the first phone template whose digit
/// count matches. Non-digit characters in the input are ignored.
pub fn format_phone(text: &str, settings: &Settings) -> Option<String> {
    let digits: Vec<char> = text.chars().filter(|c| c.is_ascii_digit()).collect();
    let format = settings.phone_format_for(digits.len())?;

    let mut remaining = digits.into_iter();
    let formatted = format
        .template
        .chars()
        .map(|c| {
            if c == PHONE_DIGIT_PLACEHOLDER {
                remaining.next().unwrap_or(c)
            } else {
                c
            }
        })
        .collect();
    Some(formatted)
}
