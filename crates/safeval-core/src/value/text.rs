//! Text, truncation and formatting operations
//!
//! All of these work on the string form of the value and pass null through
//! untouched.
//!
//! Copyright (c) 2025 Safeval Team
//! Licensed under the Apache-2.0 license

use super::SmartValue;
use crate::coerce::coerce;
use crate::encode;
use crate::format::{format_datetime, format_number, format_phone, parse_datetime};
use crate::scalar::Scalar;
use crate::truncate::{self, DEFAULT_ELLIPSIS};

impl SmartValue {
    fn map_text<F>(&self, f: F) -> Self
    where
        F: FnOnce(&str) -> String,
    {
        match &self.raw {
            Scalar::Null => self.clone(),
            other => self.derive(Scalar::Str(f(&other.to_text()))),
        }
    }

    /// Trim surrounding whitespace
    pub fn trim(&self) -> Self {
        self.map_text(|text| text.trim().to_string())
    }

    /// Remove HTML tags, decode entities and trim
    pub fn text_only(&self) -> Self {
        self.map_text(|text| encode::strip_tags(text).trim().to_string())
    }

    /// Keep at most `max` words, ending with `"..."` when cut
    pub fn max_words(&self, max: usize) -> Self {
        self.max_words_with(max, DEFAULT_ELLIPSIS)
    }

    pub fn max_words_with(&self, max: usize, ellipsis: &str) -> Self {
        self.map_text(|text| truncate::max_words(text, max, ellipsis))
    }

    /// Keep at most `max` characters, ending with `"..."` when cut
    pub fn max_chars(&self, max: usize) -> Self {
        self.max_chars_with(max, DEFAULT_ELLIPSIS)
    }

    pub fn max_chars_with(&self, max: usize, ellipsis: &str) -> Self {
        self.map_text(|text| truncate::max_chars(text, max, ellipsis))
    }

    /// Fixed decimals with the configured separators; non-numeric becomes null
    pub fn number_format(&self, decimals: usize) -> Self {
        match coerce(&self.raw, self.settings.null_as_zero) {
            Some(number) => {
                let text = format_number(number, decimals, &self.settings);
                self.derive(Scalar::Str(text))
            }
            None => self.derive(Scalar::Null),
        }
    }

    /// Format as a date; `None` uses the configured default pattern
    pub fn date_format(&self, pattern: Option<&str>) -> Self {
        let pattern = pattern.unwrap_or(&self.settings.date_format).to_string();
        self.format_timestamp(&pattern)
    }

    /// Format as a date and time; `None` uses the configured default pattern
    pub fn date_time_format(&self, pattern: Option<&str>) -> Self {
        let pattern = pattern.unwrap_or(&self.settings.date_time_format).to_string();
        self.format_timestamp(&pattern)
    }

    fn format_timestamp(&self, pattern: &str) -> Self {
        let formatted = parse_datetime(&self.raw).and_then(|dt| format_datetime(&dt, pattern));
        self.derive(formatted.map(Scalar::Str).unwrap_or(Scalar::Null))
    }

    /// Format with the phone table; unmatched digit counts become null
    pub fn phone_format(&self) -> Self {
        let formatted = match &self.raw {
            Scalar::Null => None,
            other => format_phone(&other.to_text(), &self.settings),
        };
        self.derive(formatted.map(Scalar::Str).unwrap_or(Scalar::Null))
    }
}
