//! Arithmetic with sticky error propagation
//!
//! Each step coerces both operands. If the chain is already poisoned, an
//! operand is not numeric, or the divisor is zero, the result is null and
//! the error flag is set for every later step.
//!
//! Copyright (c) 2025 Safeval Team
//! Licensed under the Apache-2.0 license

use super::SmartValue;
use crate::coerce::coerce;
use crate::format::format_number;
use crate::scalar::Scalar;

impl SmartValue {
    fn binary_op<F>(&self, op: &'static str, operand: Scalar, compute: F) -> Self
    where
        F: FnOnce(f64, f64) -> Option<Scalar>,
    {
        let null_as_zero = self.settings.null_as_zero;
        let left = coerce(&self.raw, null_as_zero);
        let right = coerce(&operand, null_as_zero);

        let result = match (self.numeric_error, left, right) {
            (false, Some(left), Some(right)) => compute(left, right),
            _ => None,
        };

        match result {
            Some(value) => self.derive_numeric(value, false),
            None => {
                log::debug!(
                    "{} poisoned chain: left={:?} right={:?} already_poisoned={}",
                    op,
                    self.raw,
                    operand,
                    self.numeric_error
                );
                self.derive_numeric(Scalar::Null, true)
            }
        }
    }

    pub fn add(&self, operand: impl Into<Scalar>) -> Self {
        self.binary_op("add", operand.into(), |l, r| Some(Scalar::Float(l + r)))
    }

    pub fn subtract(&self, operand: impl Into<Scalar>) -> Self {
        self.binary_op("subtract", operand.into(), |l, r| Some(Scalar::Float(l - r)))
    }

    pub fn multiply(&self, operand: impl Into<Scalar>) -> Self {
        self.binary_op("multiply", operand.into(), |l, r| Some(Scalar::Float(l * r)))
    }

    /// Divide; a zero divisor poisons the chain. Zero as the dividend is fine.
    pub fn divide(&self, divisor: impl Into<Scalar>) -> Self {
        self.binary_op("divide", divisor.into(), |l, r| {
            if r == 0.0 {
                None
            } else {
                Some(Scalar::Float(l / r))
            }
        })
    }

    /// Format a ratio as a percentage: `0.5` → `"50%"` with `decimals == 0`
    pub fn percent(&self, decimals: usize) -> Self {
        self.percent_with(decimals, None)
    }

    /// Like [`percent`](Self::percent), but a value of exactly zero yields
    /// `zero_fallback` verbatim.
    ///
    /// Numeric validity is checked first: a poisoned or non-numeric value is
    /// null even when a fallback is given.
    pub fn percent_or(&self, decimals: usize, zero_fallback: impl Into<Scalar>) -> Self {
        self.percent_with(decimals, Some(zero_fallback.into()))
    }

    pub(crate) fn percent_with(&self, decimals: usize, zero_fallback: Option<Scalar>) -> Self {
        let left = if self.numeric_error {
            None
        } else {
            coerce(&self.raw, self.settings.null_as_zero)
        };

        match (left, zero_fallback) {
            (None, _) => {
                log::debug!("percent poisoned chain: value={:?}", self.raw);
                self.derive_numeric(Scalar::Null, true)
            }
            (Some(left), Some(fallback)) if left == 0.0 => self.derive_numeric(fallback, false),
            (Some(left), _) => {
                let text = format!("{}%", format_number(left * 100.0, decimals, &self.settings));
                self.derive_numeric(Scalar::Str(text), false)
            }
        }
    }

    /// This value as a percentage of `total`; a zero total poisons the chain
    pub fn percent_of(&self, total: impl Into<Scalar>, decimals: usize) -> Self {
        let settings = self.settings_handle();
        self.binary_op("percent_of", total.into(), |l, r| {
            if r == 0.0 {
                None
            } else {
                let text = format_number(l / r * 100.0, decimals, &settings);
                Some(Scalar::Str(format!("{}%", text)))
            }
        })
    }
}
