//! Value classification predicates
//!
//! Four overlapping notions of "nothing" are in play and every conditional
//! operation picks exactly one of them:
//!
//! | Predicate    | True for                                              |
//! |--------------|-------------------------------------------------------|
//! | [`is_null`]    | `Null`                                              |
//! | [`is_missing`] | `Null`, `""`                                        |
//! | [`is_blank`]   | `""` only                                           |
//! | [`is_zero`]    | numeric-looking values equal to `0.0`               |
//! | [`is_empty`]   | `Null`, `""`, `"0"`, `false`, `0`, `0.0`            |
//!
//! None of these consult a wrapper's numeric error state.
//!
//! Copyright (c) 2025 Safeval Team
//! Licensed under the Apache-2.0 license

use crate::scalar::Scalar;
use regex::Regex;
use std::sync::OnceLock;

static NUMERIC_STRING: OnceLock<Regex> = OnceLock::new();

fn numeric_string_regex() -> &'static Regex {
    NUMERIC_STRING.get_or_init(|| {
        Regex::new(r"^\s*[+-]?(\d+(\.\d*)?|\.\d+)([eE][+-]?\d+)?\s*$")
            .expect("numeric string pattern is valid")
    })
}

/// True if the string matches the numeric-string grammar (sign, digits,
/// optional fraction and exponent, surrounding whitespace allowed)
pub fn is_numeric_str(s: &str) -> bool {
    numeric_string_regex().is_match(s)
}

/// Number types, and strings that look like numbers.
///
/// `"abc"`, `"1,234"`, `"0x1A"` and booleans are never numeric.
pub fn is_numeric(value: &Scalar) -> bool {
    match value {
        Scalar::Int(_) | Scalar::Float(_) => true,
        Scalar::Str(s) => is_numeric_str(s),
        Scalar::Null | Scalar::Bool(_) => false,
    }
}

pub fn is_null(value: &Scalar) -> bool {
    value.is_null()
}

/// Null or the empty string. Zero is not missing.
pub fn is_missing(value: &Scalar) -> bool {
    match value {
        Scalar::Null => true,
        Scalar::Str(s) => s.is_empty(),
        _ => false,
    }
}

/// Exactly the empty string. Null is not blank.
pub fn is_blank(value: &Scalar) -> bool {
    matches!(value, Scalar::Str(s) if s.is_empty())
}

/// Numeric-looking and equal to zero (`0`, `0.0`, `"0"`, `"0.00"`, `"-0"`)
pub fn is_zero(value: &Scalar) -> bool {
    match value {
        Scalar::Int(i) => *i == 0,
        Scalar::Float(f) => *f == 0.0,
        Scalar::Str(s) if is_numeric_str(s) => {
            s.trim().parse::<f64>().map(|f| f == 0.0).unwrap_or(false)
        }
        _ => false,
    }
}

/// Loose emptiness: null, `""`, `"0"`, `false`, `0` and `0.0`.
///
/// Only the exact string `"0"` counts; `"0.0"` and `" 0"` are not empty.
pub fn is_empty(value: &Scalar) -> bool {
    match value {
        Scalar::Null => true,
        Scalar::Bool(b) => !b,
        Scalar::Int(i) => *i == 0,
        Scalar::Float(f) => *f == 0.0,
        Scalar::Str(s) => s.is_empty() || s == "0",
    }
}

/// Truthiness used by conditional selection
pub fn is_truthy(value: &Scalar) -> bool {
    !is_empty(value)
}
