//! The immutable value wrapper
//!
//! A [`SmartValue`] wraps one [`Scalar`] together with a sticky numeric
//! error flag and the [`Settings`] it was created with. Every operation
//! returns a new wrapper; the receiver is never modified.
//!
//! # Examples
//!
//! ```
//! use safeval_core::SmartValue;
//!
//! let price = SmartValue::new("19.5").multiply(2).add(1);
//! assert_eq!(price.float(), 40.0);
//!
//! // A bad operand poisons the rest of the chain instead of panicking
//! let broken = SmartValue::new("abc").add(5).add(5);
//! assert!(broken.value().is_null());
//! assert!(broken.has_numeric_error());
//!
//! // Display output is always HTML-encoded
//! assert_eq!(SmartValue::new("<b>hi</b>").to_string(), "&lt;b&gt;hi&lt;/b&gt;");
//! ```
//!
//! Copyright (c) 2025 Safeval Team
//! Licensed under the Apache-2.0 license

mod arithmetic;
mod conditional;
mod text;

use crate::chain::Step;
use crate::classify;
use crate::encode;
use crate::error::Result;
use crate::scalar::Scalar;
use crate::settings::Settings;
use serde::{Serialize, Serializer};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Immutable wrapper around a scalar value
#[derive(Debug, Clone)]
pub struct SmartValue {
    raw: Scalar,
    numeric_error: bool,
    settings: Arc<Settings>,
}

impl SmartValue {
    /// Wrap a value using the shared default settings
    pub fn new(raw: impl Into<Scalar>) -> Self {
        Self::with_settings(raw, Settings::shared_default())
    }

    /// Wrap a value with explicit settings
    pub fn with_settings(raw: impl Into<Scalar>, settings: Arc<Settings>) -> Self {
        Self {
            raw: raw.into(),
            numeric_error: false,
            settings,
        }
    }

    /// A wrapped null
    pub fn null() -> Self {
        Self::new(Scalar::Null)
    }

    /// Wrap a JSON scalar; arrays and objects are rejected
    pub fn from_json(value: &Value, settings: Arc<Settings>) -> Result<Self> {
        Ok(Self::with_settings(Scalar::from_json(value)?, settings))
    }

    /// New wrapper with the same settings and error state
    pub(crate) fn derive(&self, raw: Scalar) -> Self {
        Self {
            raw,
            numeric_error: self.numeric_error,
            settings: Arc::clone(&self.settings),
        }
    }

    /// New wrapper produced by an arithmetic step
    pub(crate) fn derive_numeric(&self, raw: Scalar, numeric_error: bool) -> Self {
        Self {
            raw,
            numeric_error: self.numeric_error || numeric_error,
            settings: Arc::clone(&self.settings),
        }
    }

    /// Settings shared by this value and everything derived from it
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Shared handle to the settings
    pub fn settings_handle(&self) -> Arc<Settings> {
        Arc::clone(&self.settings)
    }

    /// The original, unencoded value
    pub fn value(&self) -> &Scalar {
        &self.raw
    }

    pub fn into_value(self) -> Scalar {
        self.raw
    }

    /// True once any arithmetic step in this chain failed
    pub fn has_numeric_error(&self) -> bool {
        self.numeric_error
    }

    /// Integer conversion: floats truncate toward zero, numeric strings are
    /// parsed, `true` is `1`, everything else is `0`.
    pub fn int(&self) -> i64 {
        match &self.raw {
            Scalar::Int(i) => *i,
            Scalar::Float(f) => *f as i64,
            Scalar::Bool(b) => i64::from(*b),
            Scalar::Str(s) if classify::is_numeric_str(s) => {
                let trimmed = s.trim();
                trimmed
                    .parse::<i64>()
                    .unwrap_or_else(|_| trimmed.parse::<f64>().map(|f| f as i64).unwrap_or(0))
            }
            _ => 0,
        }
    }

    /// Float conversion; non-numeric values are `0.0`, `true` is `1.0`
    pub fn float(&self) -> f64 {
        match &self.raw {
            Scalar::Bool(b) => f64::from(u8::from(*b)),
            other => crate::coerce::coerce(other, true).unwrap_or(0.0),
        }
    }

    /// Truthiness (the inverse of [`is_empty`](Self::is_empty))
    pub fn bool(&self) -> bool {
        classify::is_truthy(&self.raw)
    }

    /// The unencoded string form
    pub fn string(&self) -> String {
        self.raw.to_text()
    }

    /// HTML-encoded string form; the same text `Display` produces
    pub fn html_encode(&self) -> String {
        encode::html_encode(&self.raw.to_text())
    }

    /// URL-encoded string form
    pub fn url_encode(&self) -> String {
        encode::url_encode(&self.raw.to_text())
    }

    /// JSON literal of the raw value
    pub fn json_encode(&self) -> String {
        encode::json_encode(&self.raw)
    }

    /// Explicitly unencoded output
    pub fn no_encode(&self) -> String {
        self.raw.to_text()
    }

    /// Alias of [`no_encode`](Self::no_encode) for values that hold markup
    pub fn raw_html(&self) -> String {
        self.no_encode()
    }

    /// HTML-encode, then turn newlines into `<br>` tags
    pub fn nl2br(&self) -> String {
        let encoded = self.html_encode().replace("\r\n", "\n");
        encoded.replace('\n', "<br>\n")
    }

    /// Apply a closure to the raw value
    pub fn apply<F>(&self, f: F) -> Self
    where
        F: FnOnce(&Scalar) -> Scalar,
    {
        self.derive(f(&self.raw))
    }

    /// Apply a named step such as `"max-chars:20"`.
    ///
    /// Unknown names and malformed arguments are errors.
    pub fn apply_step(&self, step: &str) -> Result<Self> {
        let step: Step = step.parse()?;
        Ok(step.apply(self))
    }
}

impl PartialEq for SmartValue {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw && self.numeric_error == other.numeric_error
    }
}

impl fmt::Display for SmartValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.html_encode())
    }
}

impl Serialize for SmartValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.raw.serialize(serializer)
    }
}

impl From<SmartValue> for Scalar {
    fn from(value: SmartValue) -> Self {
        value.raw
    }
}

impl From<&SmartValue> for Scalar {
    fn from(value: &SmartValue) -> Self {
        value.raw.clone()
    }
}

impl Default for SmartValue {
    fn default() -> Self {
        Self::null()
    }
}
