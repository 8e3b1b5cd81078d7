//! Chain steps and their textual form
//!
//! A step is written `name[:arg[:arg]]`. Names are case-insensitive and may
//! use kebab, snake or camel case (`max-chars`, `max_chars`, `maxChars`).
//! The final argument of a step takes the rest of the text, so patterns such
//! as `date-format:%H:%M` need no escaping.
//!
//! Copyright (c) 2025 Safeval Team
//! Licensed under the Apache-2.0 license

use crate::error::{Error, Result};
use crate::format::MAX_DECIMALS;
use crate::scalar::Scalar;
use crate::value::SmartValue;
use std::fmt;
use std::str::FromStr;

/// Step names accepted by [`Step::from_str`]
pub const STEP_NAMES: &[&str] = &[
    "add",
    "subtract",
    "multiply",
    "divide",
    "percent",
    "percent-of",
    "max-words",
    "max-chars",
    "or",
    "and",
    "and-prefix",
    "if-null",
    "if-blank",
    "if-zero",
    "if",
    "set",
    "trim",
    "text-only",
    "number-format",
    "date-format",
    "date-time-format",
    "phone-format",
];

/// One chainable operation
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    Add(Scalar),
    Subtract(Scalar),
    Multiply(Scalar),
    Divide(Scalar),
    Percent {
        decimals: usize,
        zero_fallback: Option<Scalar>,
    },
    PercentOf {
        total: Scalar,
        decimals: usize,
    },
    MaxWords {
        max: usize,
        ellipsis: Option<String>,
    },
    MaxChars {
        max: usize,
        ellipsis: Option<String>,
    },
    Or(Scalar),
    And(Scalar),
    AndPrefix(Scalar),
    IfNull(Scalar),
    IfBlank(Scalar),
    IfZero(Scalar),
    If {
        condition: Scalar,
        value: Scalar,
    },
    Set(Scalar),
    Trim,
    TextOnly,
    NumberFormat {
        decimals: usize,
    },
    DateFormat(Option<String>),
    DateTimeFormat(Option<String>),
    PhoneFormat,
}

impl Step {
    /// Apply this step to a value
    pub fn apply(&self, value: &SmartValue) -> SmartValue {
        match self {
            Step::Add(operand) => value.add(operand),
            Step::Subtract(operand) => value.subtract(operand),
            Step::Multiply(operand) => value.multiply(operand),
            Step::Divide(operand) => value.divide(operand),
            Step::Percent { decimals, zero_fallback } => {
                value.percent_with(*decimals, zero_fallback.clone())
            }
            Step::PercentOf { total, decimals } => value.percent_of(total, *decimals),
            Step::MaxWords { max, ellipsis } => match ellipsis {
                Some(ellipsis) => value.max_words_with(*max, ellipsis),
                None => value.max_words(*max),
            },
            Step::MaxChars { max, ellipsis } => match ellipsis {
                Some(ellipsis) => value.max_chars_with(*max, ellipsis),
                None => value.max_chars(*max),
            },
            Step::Or(fallback) => value.or(fallback),
            Step::And(suffix) => value.and(suffix),
            Step::AndPrefix(prefix) => value.and_prefix(prefix),
            Step::IfNull(fallback) => value.if_null(fallback),
            Step::IfBlank(fallback) => value.if_blank(fallback),
            Step::IfZero(fallback) => value.if_zero(fallback),
            Step::If { condition, value: if_true } => value.if_then(condition, if_true),
            Step::Set(new_value) => value.set(new_value),
            Step::Trim => value.trim(),
            Step::TextOnly => value.text_only(),
            Step::NumberFormat { decimals } => value.number_format(*decimals),
            Step::DateFormat(pattern) => value.date_format(pattern.as_deref()),
            Step::DateTimeFormat(pattern) => value.date_time_format(pattern.as_deref()),
            Step::PhoneFormat => value.phone_format(),
        }
    }

    /// Canonical kebab-case name
    pub fn name(&self) -> &'static str {
        match self {
            Step::Add(_) => "add",
            Step::Subtract(_) => "subtract",
            Step::Multiply(_) => "multiply",
            Step::Divide(_) => "divide",
            Step::Percent { .. } => "percent",
            Step::PercentOf { .. } => "percent-of",
            Step::MaxWords { .. } => "max-words",
            Step::MaxChars { .. } => "max-chars",
            Step::Or(_) => "or",
            Step::And(_) => "and",
            Step::AndPrefix(_) => "and-prefix",
            Step::IfNull(_) => "if-null",
            Step::IfBlank(_) => "if-blank",
            Step::IfZero(_) => "if-zero",
            Step::If { .. } => "if",
            Step::Set(_) => "set",
            Step::Trim => "trim",
            Step::TextOnly => "text-only",
            Step::NumberFormat { .. } => "number-format",
            Step::DateFormat(_) => "date-format",
            Step::DateTimeFormat(_) => "date-time-format",
            Step::PhoneFormat => "phone-format",
        }
    }
}

/// `maxChars`, `MAX_CHARS` and `max-chars` all become `max-chars`
fn normalize_name(name: &str) -> String {
    let mut normalized = String::with_capacity(name.len() + 4);
    let mut previous_lower = false;
    for ch in name.trim().chars() {
        if ch == '_' || ch == '-' {
            normalized.push('-');
            previous_lower = false;
        } else if ch.is_uppercase() {
            if previous_lower {
                normalized.push('-');
            }
            normalized.extend(ch.to_lowercase());
            previous_lower = false;
        } else {
            normalized.push(ch);
            previous_lower = ch.is_lowercase() || ch.is_ascii_digit();
        }
    }
    normalized
}

/// Argument cursor for one step
struct Args<'a> {
    step: &'a str,
    rest: Option<&'a str>,
}

impl<'a> Args<'a> {
    /// Next argument, split at the first `:`
    fn next(&mut self) -> Option<&'a str> {
        let rest = self.rest?;
        match rest.split_once(':') {
            Some((head, tail)) => {
                self.rest = Some(tail);
                Some(head)
            }
            None => {
                self.rest = None;
                Some(rest)
            }
        }
    }

    /// Everything that is left, colons included
    fn remainder(&mut self) -> Option<&'a str> {
        self.rest.take()
    }

    fn required_remainder(&mut self, what: &str) -> Result<&'a str> {
        self.remainder()
            .ok_or_else(|| Error::invalid_step(self.step, format!("missing {}", what)))
    }

    fn required_next(&mut self, what: &str) -> Result<&'a str> {
        self.next()
            .ok_or_else(|| Error::invalid_step(self.step, format!("missing {}", what)))
    }

    fn count(&self, text: &str, what: &str) -> Result<usize> {
        text.trim().parse::<usize>().map_err(|_| {
            Error::invalid_step(
                self.step,
                format!("{} must be a non-negative integer, got '{}'", what, text),
            )
        })
    }

    fn decimals(&self, text: &str) -> Result<usize> {
        let decimals = self.count(text, "decimals")?;
        if decimals > MAX_DECIMALS {
            return Err(Error::invalid_step(
                self.step,
                format!("decimals must be at most {}, got {}", MAX_DECIMALS, decimals),
            ));
        }
        Ok(decimals)
    }

    fn no_more(&mut self) -> Result<()> {
        match self.rest {
            Some(extra) => Err(Error::invalid_step(
                self.step,
                format!("unexpected argument '{}'", extra),
            )),
            None => Ok(()),
        }
    }
}

impl FromStr for Step {
    type Err = Error;

    fn from_str(text: &str) -> Result<Self> {
        let (raw_name, rest) = match text.split_once(':') {
            Some((name, rest)) => (name, Some(rest)),
            None => (text, None),
        };
        let name = normalize_name(raw_name);
        let mut args = Args { step: text, rest };

        let step = match name.as_str() {
            "add" => Step::Add(Scalar::from_literal(args.required_remainder("operand")?)),
            "subtract" => Step::Subtract(Scalar::from_literal(args.required_remainder("operand")?)),
            "multiply" => Step::Multiply(Scalar::from_literal(args.required_remainder("operand")?)),
            "divide" => Step::Divide(Scalar::from_literal(args.required_remainder("divisor")?)),
            "percent" => {
                let decimals = match args.next() {
                    Some(d) => args.decimals(d)?,
                    None => 0,
                };
                let zero_fallback = args.remainder().map(Scalar::from_literal);
                Step::Percent { decimals, zero_fallback }
            }
            "percent-of" => {
                let total = Scalar::from_literal(args.required_next("total")?);
                let decimals = match args.remainder() {
                    Some(d) => args.decimals(d)?,
                    None => 0,
                };
                Step::PercentOf { total, decimals }
            }
            "max-words" | "max-chars" => {
                let max_text = args.required_next("limit")?;
                let max = args.count(max_text, "limit")?;
                let ellipsis = args.remainder().map(str::to_string);
                if name == "max-words" {
                    Step::MaxWords { max, ellipsis }
                } else {
                    Step::MaxChars { max, ellipsis }
                }
            }
            "or" => Step::Or(Scalar::from_literal(args.required_remainder("fallback")?)),
            "and" => Step::And(Scalar::from_literal(args.required_remainder("suffix")?)),
            "and-prefix" => {
                Step::AndPrefix(Scalar::from_literal(args.required_remainder("prefix")?))
            }
            "if-null" => Step::IfNull(Scalar::from_literal(args.required_remainder("fallback")?)),
            "if-blank" => Step::IfBlank(Scalar::from_literal(args.required_remainder("fallback")?)),
            "if-zero" => Step::IfZero(Scalar::from_literal(args.required_remainder("fallback")?)),
            "if" => {
                let condition = Scalar::from_literal(args.required_next("condition")?);
                let value = Scalar::from_literal(args.required_remainder("value")?);
                Step::If { condition, value }
            }
            "set" => Step::Set(Scalar::from_literal(args.required_remainder("value")?)),
            "trim" => Step::Trim,
            "text-only" => Step::TextOnly,
            "number-format" => {
                let decimals = match args.remainder() {
                    Some(d) => args.decimals(d)?,
                    None => 0,
                };
                Step::NumberFormat { decimals }
            }
            "date-format" => Step::DateFormat(args.remainder().map(str::to_string)),
            "date-time-format" => Step::DateTimeFormat(args.remainder().map(str::to_string)),
            "phone-format" => Step::PhoneFormat,
            _ => {
                return Err(Error::UnknownStep {
                    name: raw_name.to_string(),
                })
            }
        };

        args.no_more()?;
        Ok(step)
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Strings that would parse back as another type are written quoted
        let literal = |s: &Scalar| match s {
            Scalar::Str(text) if Scalar::from_literal(text) == *s => text.clone(),
            other => other.to_json().to_string(),
        };
        write!(f, "{}", self.name())?;
        match self {
            Step::Add(s)
            | Step::Subtract(s)
            | Step::Multiply(s)
            | Step::Divide(s)
            | Step::Or(s)
            | Step::And(s)
            | Step::AndPrefix(s)
            | Step::IfNull(s)
            | Step::IfBlank(s)
            | Step::IfZero(s)
            | Step::Set(s) => write!(f, ":{}", literal(s)),
            Step::Percent { decimals, zero_fallback } => {
                write!(f, ":{}", decimals)?;
                match zero_fallback {
                    Some(fallback) => write!(f, ":{}", literal(fallback)),
                    None => Ok(()),
                }
            }
            Step::PercentOf { total, decimals } => write!(f, ":{}:{}", literal(total), decimals),
            Step::MaxWords { max, ellipsis } | Step::MaxChars { max, ellipsis } => {
                write!(f, ":{}", max)?;
                match ellipsis {
                    Some(ellipsis) => write!(f, ":{}", ellipsis),
                    None => Ok(()),
                }
            }
            Step::If { condition, value } => {
                write!(f, ":{}:{}", literal(condition), literal(value))
            }
            Step::NumberFormat { decimals } => write!(f, ":{}", decimals),
            Step::DateFormat(Some(p)) | Step::DateTimeFormat(Some(p)) => write!(f, ":{}", p),
            Step::DateFormat(None)
            | Step::DateTimeFormat(None)
            | Step::Trim
            | Step::TextOnly
            | Step::PhoneFormat => Ok(()),
        }
    }
}
