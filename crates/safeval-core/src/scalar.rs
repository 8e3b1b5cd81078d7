//! The scalar value model
//!
//! A [`Scalar`] holds exactly one of the primitive shapes a template value can
//! take. Arrays and objects are never scalars; converting one from JSON is a
//! construction error.
//!
//! Copyright (c) 2025 Safeval Team
//! Licensed under the Apache-2.0 license

use crate::error::{Error, Result, ValueKind};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// A single raw value: null, boolean, integer, float, or string
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

impl Scalar {
    /// Convert a JSON value, rejecting arrays and objects
    pub fn from_json(value: &Value) -> Result<Self> {
        match value {
            Value::Null => Ok(Scalar::Null),
            Value::Bool(b) => Ok(Scalar::Bool(*b)),
            Value::Number(n) => Ok(match n.as_i64() {
                Some(i) => Scalar::Int(i),
                None => Scalar::Float(n.as_f64().unwrap_or(f64::NAN)),
            }),
            Value::String(s) => Ok(Scalar::Str(s.clone())),
            Value::Array(_) | Value::Object(_) => Err(Error::InvalidConstruction {
                found: ValueKind::of(value),
                path: None,
            }),
        }
    }

    /// Parse a command-line literal.
    ///
    /// JSON scalars (`null`, `true`, `42`, `1.5`, `"quoted"`) become typed
    /// values; anything else, including JSON arrays and objects, is kept as
    /// the literal string.
    pub fn from_literal(literal: &str) -> Self {
        match serde_json::from_str::<Value>(literal) {
            Ok(value @ (Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_))) => {
                Scalar::from_json(&value).unwrap_or_else(|_| Scalar::Str(literal.to_string()))
            }
            _ => Scalar::Str(literal.to_string()),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Scalar::Null)
    }

    /// Borrow the string payload, if this is a string
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Scalar::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Name of the variant, for diagnostics
    pub fn type_name(&self) -> &'static str {
        match self {
            Scalar::Null => "null",
            Scalar::Bool(_) => "bool",
            Scalar::Int(_) => "int",
            Scalar::Float(_) => "float",
            Scalar::Str(_) => "string",
        }
    }

    /// The string form used by text operations and display.
    pub fn to_text(&self) -> String {
        self.to_string()
    }

    /// Convert into a JSON value
    pub fn to_json(&self) -> Value {
        match self {
            Scalar::Null => Value::Null,
            Scalar::Bool(b) => Value::Bool(*b),
            Scalar::Int(i) => Value::from(*i),
            Scalar::Float(f) => serde_json::Number::from_f64(*f)
                .map(Value::Number)
                .unwrap_or(Value::Null),
            Scalar::Str(s) => Value::String(s.clone()),
        }
    }
}

fn float_text(f: f64) -> String {
    if f.is_nan() {
        return "NAN".to_string();
    }
    if f.is_infinite() {
        return if f > 0.0 { "INF".to_string() } else { "-INF".to_string() };
    }
    if f.fract() == 0.0 && f.abs() < 1e15 {
        return format!("{:.0}", f);
    }
    format!("{}", f)
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Null => Ok(()),
            Scalar::Bool(true) => write!(f, "1"),
            Scalar::Bool(false) => Ok(()),
            Scalar::Int(i) => write!(f, "{}", i),
            Scalar::Float(x) => write!(f, "{}", float_text(*x)),
            Scalar::Str(s) => write!(f, "{}", s),
        }
    }
}

impl From<bool> for Scalar {
    fn from(b: bool) -> Self {
        Scalar::Bool(b)
    }
}

macro_rules! scalar_from_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Scalar {
                fn from(i: $t) -> Self {
                    Scalar::Int(i64::from(i))
                }
            }
        )*
    };
}

scalar_from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<usize> for Scalar {
    fn from(i: usize) -> Self {
        i64::try_from(i).map(Scalar::Int).unwrap_or(Scalar::Float(i as f64))
    }
}

impl From<u64> for Scalar {
    fn from(i: u64) -> Self {
        i64::try_from(i).map(Scalar::Int).unwrap_or(Scalar::Float(i as f64))
    }
}

impl From<f32> for Scalar {
    fn from(x: f32) -> Self {
        Scalar::Float(f64::from(x))
    }
}

impl From<f64> for Scalar {
    fn from(x: f64) -> Self {
        Scalar::Float(x)
    }
}

impl From<&str> for Scalar {
    fn from(s: &str) -> Self {
        Scalar::Str(s.to_string())
    }
}

impl From<String> for Scalar {
    fn from(s: String) -> Self {
        Scalar::Str(s)
    }
}

impl From<&String> for Scalar {
    fn from(s: &String) -> Self {
        Scalar::Str(s.clone())
    }
}

impl From<&Scalar> for Scalar {
    fn from(s: &Scalar) -> Self {
        s.clone()
    }
}

impl<T: Into<Scalar>> From<Option<T>> for Scalar {
    fn from(opt: Option<T>) -> Self {
        opt.map(Into::into).unwrap_or(Scalar::Null)
    }
}
