//! Numeric coercion
//!
//! The single place that decides whether a value can take part in
//! arithmetic. Every arithmetic operation coerces both operands here.
//!
//! Copyright (c) 2025 Safeval Team
//! Licensed under the Apache-2.0 license

use crate::classify::is_numeric_str;
use crate::scalar::Scalar;

/// Convert a scalar to a float, or `None` if it cannot be used in math.
///
/// Floats pass through and numeric-looking values are parsed. `Null`
/// becomes `0.0` only when `null_as_zero` is set; non-numeric strings and
/// booleans always fail regardless of the policy.
pub fn coerce(value: &Scalar, null_as_zero: bool) -> Option<f64> {
    match value {
        Scalar::Float(f) => Some(*f),
        Scalar::Int(i) => Some(*i as f64),
        Scalar::Str(s) if is_numeric_str(s) => s.trim().parse::<f64>().ok(),
        Scalar::Null if null_as_zero => Some(0.0),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numbers_pass_through() {
        assert_eq!(coerce(&Scalar::Float(1.25), false), Some(1.25));
        assert_eq!(coerce(&Scalar::Int(-3), false), Some(-3.0));
        assert_eq!(coerce(&Scalar::Str(" 12.5 ".into()), false), Some(12.5));
        assert_eq!(coerce(&Scalar::Str("1e2".into()), false), Some(100.0));
    }

    #[test]
    fn test_null_policy() {
        assert_eq!(coerce(&Scalar::Null, false), None);
        assert_eq!(coerce(&Scalar::Null, true), Some(0.0));
    }

    #[test]
    fn test_non_numeric_ignores_policy() {
        assert_eq!(coerce(&Scalar::Str("abc".into()), true), None);
        assert_eq!(coerce(&Scalar::Str("".into()), true), None);
        assert_eq!(coerce(&Scalar::Str("1,234".into()), true), None);
        assert_eq!(coerce(&Scalar::Bool(true), true), None);
    }
}
