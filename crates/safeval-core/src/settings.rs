//! Formatting and coercion settings
//!
//! Settings are an explicit, immutable context rather than process-wide
//! state. A [`SmartValue`](crate::SmartValue) holds an `Arc<Settings>` and
//! every value derived from it shares the same settings.
//!
//! Copyright (c) 2025 Safeval Team
//! Licensed under the Apache-2.0 license

use crate::error::{Error, Result};
use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, OnceLock};

static DEFAULT_SETTINGS: OnceLock<Arc<Settings>> = OnceLock::new();

/// Placeholder replaced by one digit in a phone template
pub const PHONE_DIGIT_PLACEHOLDER: char = '#';

/// One entry of the phone format table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhoneFormat {
    /// Number of digits a phone number must have to use this template
    pub digits: usize,
    /// Template where each `#` is replaced by the next digit
    pub template: String,
}

impl PhoneFormat {
    pub fn new(digits: usize, template: impl Into<String>) -> Self {
        Self {
            digits,
            template: template.into(),
        }
    }
}

/// Settings read by formatting and arithmetic operations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Treat null operands as `0.0` in arithmetic
    pub null_as_zero: bool,

    /// Decimal separator used by number and percent formatting
    pub decimal_separator: String,

    /// Thousands separator used by number and percent formatting
    pub thousands_separator: String,

    /// Default strftime pattern for `date_format`
    pub date_format: String,

    /// Default strftime pattern for `date_time_format`
    pub date_time_format: String,

    /// Ordered phone format table; the first matching digit count wins
    pub phone_formats: Vec<PhoneFormat>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            null_as_zero: false,
            decimal_separator: ".".to_string(),
            thousands_separator: ",".to_string(),
            date_format: "%b %-d, %Y".to_string(),
            date_time_format: "%b %-d, %Y %-I:%M %p".to_string(),
            phone_formats: vec![
                PhoneFormat::new(10, "(###) ###-####"),
                PhoneFormat::new(11, "# (###) ###-####"),
            ],
        }
    }
}

impl Settings {
    /// Shared default settings
    pub fn shared_default() -> Arc<Settings> {
        DEFAULT_SETTINGS
            .get_or_init(|| Arc::new(Settings::default()))
            .clone()
    }

    /// Check the settings for internal consistency
    pub fn validate(&self) -> Result<()> {
        if self.decimal_separator.is_empty() {
            return Err(Error::configuration(
                "decimal_separator",
                "decimal separator must not be empty",
            ));
        }
        if self.decimal_separator == self.thousands_separator {
            return Err(Error::configuration(
                "thousands_separator",
                format!(
                    "thousands separator '{}' must differ from the decimal separator",
                    self.thousands_separator
                ),
            ));
        }

        validate_strftime("date_format", &self.date_format)?;
        validate_strftime("date_time_format", &self.date_time_format)?;

        for (index, format) in self.phone_formats.iter().enumerate() {
            let placeholders = format
                .template
                .chars()
                .filter(|c| *c == PHONE_DIGIT_PLACEHOLDER)
                .count();
            if placeholders != format.digits {
                return Err(Error::configuration(
                    format!("phone_formats[{}]", index),
                    format!(
                        "template '{}' has {} placeholders but expects {} digits",
                        format.template, placeholders, format.digits
                    ),
                ));
            }
        }

        Ok(())
    }

    /// Find the phone template for a digit count
    pub fn phone_format_for(&self, digits: usize) -> Option<&PhoneFormat> {
        self.phone_formats.iter().find(|f| f.digits == digits)
    }
}

/// True if chrono can render the pattern
pub fn is_valid_strftime(pattern: &str) -> bool {
    !StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error))
}

fn validate_strftime(field: &str, pattern: &str) -> Result<()> {
    if is_valid_strftime(pattern) {
        Ok(())
    } else {
        Err(Error::configuration(
            field,
            format!("invalid strftime pattern '{}'", pattern),
        ))
    }
}

/// Builder for creating settings programmatically
#[derive(Debug, Clone, Default)]
pub struct SettingsBuilder {
    settings: Settings,
}

impl SettingsBuilder {
    /// Start from the default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Treat null operands as zero
    pub fn null_as_zero(mut self, enabled: bool) -> Self {
        self.settings.null_as_zero = enabled;
        self
    }

    /// Set decimal and thousands separators
    pub fn separators(mut self, decimal: impl Into<String>, thousands: impl Into<String>) -> Self {
        self.settings.decimal_separator = decimal.into();
        self.settings.thousands_separator = thousands.into();
        self
    }

    /// Set the default date pattern
    pub fn date_format(mut self, pattern: impl Into<String>) -> Self {
        self.settings.date_format = pattern.into();
        self
    }

    /// Set the default date-time pattern
    pub fn date_time_format(mut self, pattern: impl Into<String>) -> Self {
        self.settings.date_time_format = pattern.into();
        self
    }

    /// Replace the phone format table
    pub fn phone_formats<I>(mut self, formats: I) -> Self
    where
        I: IntoIterator<Item = PhoneFormat>,
    {
        self.settings.phone_formats = formats.into_iter().collect();
        self
    }

    /// Validate and build the settings
    pub fn build(self) -> Result<Settings> {
        self.settings.validate()?;
        Ok(self.settings)
    }

    /// Validate and build shareable settings
    pub fn build_shared(self) -> Result<Arc<Settings>> {
        self.build().map(Arc::new)
    }
}
