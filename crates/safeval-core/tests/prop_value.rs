//! Property-based tests for the value wrapper
//!
//! These tests verify the invariants that should hold for all inputs:
//! arithmetic inverses, idempotent fallbacks, sticky errors and the
//! character-count guarantees of truncation.

use proptest::prelude::*;
use safeval_core::{coerce, truncate, Scalar, SmartValue};

/// Strategy for generating scalars of every shape
fn scalar_strategy() -> impl Strategy<Value = Scalar> {
    prop_oneof![
        Just(Scalar::Null),
        any::<bool>().prop_map(Scalar::Bool),
        (-1_000_000i64..1_000_000).prop_map(Scalar::Int),
        (-1.0e6f64..1.0e6).prop_map(Scalar::Float),
        "[a-z0-9 .,]{0,12}".prop_map(Scalar::Str),
    ]
}

/// Strategy for finite, moderately sized numbers
fn number_strategy() -> impl Strategy<Value = f64> {
    -1.0e6f64..1.0e6
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-9 * a.abs().max(b.abs()).max(1.0)
}

proptest! {
    #[test]
    fn divide_then_multiply_is_identity(a in number_strategy(), b in number_strategy()) {
        prop_assume!(b != 0.0);
        let result = SmartValue::new(a).divide(b).multiply(b);
        prop_assert!(!result.has_numeric_error());
        prop_assert!(close(result.float(), a), "{} vs {}", result.float(), a);
    }

    #[test]
    fn add_then_subtract_is_coercion(v in number_strategy(), x in number_strategy()) {
        let as_text = Scalar::Str(v.to_string());
        let result = SmartValue::new(as_text.clone()).add(x.to_string()).subtract(x);
        let expected = coerce(&as_text, false).unwrap();
        prop_assert!(close(result.float(), expected));
    }

    #[test]
    fn or_is_idempotent(v in scalar_strategy(), f in scalar_strategy()) {
        let once = SmartValue::new(v).or(f.clone());
        prop_assert_eq!(once.or(f), once);
    }

    #[test]
    fn set_adopts_new_value(v in scalar_strategy(), w in scalar_strategy()) {
        let replaced = SmartValue::new(v).set(SmartValue::new(w.clone()));
        prop_assert_eq!(replaced.value(), &w);
    }

    #[test]
    fn poisoned_chains_stay_poisoned(
        ops in proptest::collection::vec((0u8..4, number_strategy()), 0..8)
    ) {
        let mut value = SmartValue::new("abc").add(5);
        for (op, operand) in ops {
            value = match op {
                0 => value.add(operand),
                1 => value.subtract(operand),
                2 => value.multiply(operand),
                _ => value.divide(operand),
            };
            prop_assert!(value.has_numeric_error());
            prop_assert!(value.value().is_null());
        }
    }

    #[test]
    fn max_chars_respects_budget(text in "\\PC{0,40}", max in 0usize..30) {
        let out = truncate::max_chars(&text, max, "...");
        let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
        if collapsed.chars().count() <= max {
            prop_assert_eq!(out, collapsed);
        } else {
            prop_assert!(out.ends_with("..."));
            prop_assert!(out.chars().count() <= max + 3);
        }
    }

    #[test]
    fn max_words_respects_budget(
        words in proptest::collection::vec("[a-zé]{1,6}", 0..12),
        max in 0usize..8
    ) {
        let text = words.join("  ");
        let out = truncate::max_words(&text, max, "...");
        if words.len() <= max {
            prop_assert_eq!(out, words.join(" "));
        } else {
            let kept = out.trim_end_matches("...");
            prop_assert_eq!(kept.split_whitespace().count(), max);
            prop_assert!(out.ends_with("..."));
        }
    }

    #[test]
    fn display_never_contains_raw_markup(text in "[<>&\"' a-z]{0,20}") {
        let shown = SmartValue::new(text).to_string();
        prop_assert!(!shown.contains('<'));
        prop_assert!(!shown.contains('>'));
        prop_assert!(!shown.contains('"'));
    }
}
