//! Conditional replacement and the fail-fast family
//!
//! These operate on the raw value only. They never look at the numeric
//! error flag, but they carry it forward unchanged.
//!
//! Copyright (c) 2025 Safeval Team
//! Licensed under the Apache-2.0 license

use super::SmartValue;
use crate::abort::{ExitProcess, FailFast};
use crate::classify;
use crate::error::{Error, Result};
use crate::scalar::Scalar;

impl SmartValue {
    pub fn is_null(&self) -> bool {
        classify::is_null(&self.raw)
    }

    /// Null or `""`
    pub fn is_missing(&self) -> bool {
        classify::is_missing(&self.raw)
    }

    /// Exactly `""`
    pub fn is_blank(&self) -> bool {
        classify::is_blank(&self.raw)
    }

    pub fn is_zero(&self) -> bool {
        classify::is_zero(&self.raw)
    }

    /// Null, `""`, `"0"`, `false`, `0` or `0.0`
    pub fn is_empty(&self) -> bool {
        classify::is_empty(&self.raw)
    }

    pub fn is_not_empty(&self) -> bool {
        !self.is_empty()
    }

    /// Use `fallback` when this value is missing
    pub fn or(&self, fallback: impl Into<Scalar>) -> Self {
        if self.is_missing() {
            self.derive(fallback.into())
        } else {
            self.clone()
        }
    }

    /// Append `suffix` to the string form unless this value is missing
    pub fn and(&self, suffix: impl Into<Scalar>) -> Self {
        if self.is_missing() {
            return self.clone();
        }
        let joined = format!("{}{}", self.raw.to_text(), suffix.into().to_text());
        self.derive(Scalar::Str(joined))
    }

    /// Prepend `prefix` to the string form unless this value is missing
    pub fn and_prefix(&self, prefix: impl Into<Scalar>) -> Self {
        if self.is_missing() {
            return self.clone();
        }
        let joined = format!("{}{}", prefix.into().to_text(), self.raw.to_text());
        self.derive(Scalar::Str(joined))
    }

    /// Use `fallback` only when this value is null
    pub fn if_null(&self, fallback: impl Into<Scalar>) -> Self {
        if self.is_null() {
            self.derive(fallback.into())
        } else {
            self.clone()
        }
    }

    /// Use `fallback` only when this value is `""`
    pub fn if_blank(&self, fallback: impl Into<Scalar>) -> Self {
        if self.is_blank() {
            self.derive(fallback.into())
        } else {
            self.clone()
        }
    }

    /// Use `fallback` only when this value is numerically zero
    pub fn if_zero(&self, fallback: impl Into<Scalar>) -> Self {
        if self.is_zero() {
            self.derive(fallback.into())
        } else {
            self.clone()
        }
    }

    /// Adopt `value_if_true` when `condition` is truthy, else keep this value
    pub fn if_then(&self, condition: impl Into<Scalar>, value_if_true: impl Into<Scalar>) -> Self {
        if classify::is_truthy(&condition.into()) {
            self.derive(value_if_true.into())
        } else {
            self.clone()
        }
    }

    /// Replace the value unconditionally
    pub fn set(&self, value: impl Into<Scalar>) -> Self {
        self.derive(value.into())
    }

    /// Return an error carrying `message` when this value is missing
    pub fn or_throw(&self, message: impl Into<String>) -> Result<Self> {
        if self.is_missing() {
            Err(Error::MissingValue {
                message: message.into(),
            })
        } else {
            Ok(self.clone())
        }
    }

    /// Terminate the process with `message` when this value is missing
    pub fn or_die(&self, message: &str) -> Self {
        self.or_die_with(&ExitProcess, message)
    }

    pub fn or_die_with(&self, handler: &dyn FailFast, message: &str) -> Self {
        if self.is_missing() {
            handler.die(message)
        }
        self.clone()
    }

    /// Respond "not found" and stop when this value is missing
    pub fn or_404(&self, message: &str) -> Self {
        self.or_404_with(&ExitProcess, message)
    }

    pub fn or_404_with(&self, handler: &dyn FailFast, message: &str) -> Self {
        if self.is_missing() {
            handler.not_found(message)
        }
        self.clone()
    }

    /// Redirect to `url` and stop when this value is missing
    pub fn or_redirect(&self, url: &str) -> Self {
        self.or_redirect_with(&ExitProcess, url)
    }

    pub fn or_redirect_with(&self, handler: &dyn FailFast, url: &str) -> Self {
        if self.is_missing() {
            handler.redirect(url)
        }
        self.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct PanicHandler;

    impl FailFast for PanicHandler {
        fn die(&self, message: &str) -> ! {
            panic!("die: {}", message)
        }

        fn not_found(&self, message: &str) -> ! {
            panic!("not_found: {}", message)
        }

        fn redirect(&self, url: &str) -> ! {
            panic!("redirect: {}", url)
        }
    }

    #[test]
    fn test_or_uses_missing() {
        assert_eq!(SmartValue::null().or("x").string(), "x");
        assert_eq!(SmartValue::new("").or("x").string(), "x");
        assert_eq!(SmartValue::new(0).or("fallback").value(), &Scalar::Int(0));
        assert_eq!(SmartValue::new(false).or("x").value(), &Scalar::Bool(false));
    }

    #[test]
    fn test_or_is_idempotent() {
        let once = SmartValue::new("").or("f");
        assert_eq!(once.or("f"), once);
    }

    #[test]
    fn test_and_and_prefix() {
        assert_eq!(SmartValue::new("Smith").and(", PhD").string(), "Smith, PhD");
        assert_eq!(SmartValue::new(5).and_prefix("$").string(), "$5");
        assert!(SmartValue::null().and("x").value().is_null());
        assert_eq!(SmartValue::new("").and_prefix("x").string(), "");
        assert_eq!(SmartValue::new(0).and(" items").string(), "0 items");
    }

    #[test]
    fn test_if_null_only_null() {
        assert_eq!(SmartValue::null().if_null("n").string(), "n");
        assert_eq!(SmartValue::new("").if_null("n").string(), "");
    }

    #[test]
    fn test_if_blank_only_blank() {
        assert_eq!(SmartValue::new("").if_blank("b").string(), "b");
        assert!(SmartValue::null().if_blank("b").value().is_null());
        assert_eq!(SmartValue::new(" ").if_blank("b").string(), " ");
    }

    #[test]
    fn test_if_zero_only_zero() {
        assert_eq!(SmartValue::new("0.00").if_zero("none").string(), "none");
        assert_eq!(SmartValue::new(0).if_zero("none").string(), "none");
        assert!(SmartValue::null().if_zero("none").value().is_null());
        assert_eq!(SmartValue::new("").if_zero("none").string(), "");
    }

    #[test]
    fn test_if_then() {
        let v = SmartValue::new("base");
        assert_eq!(v.if_then(true, "yes").string(), "yes");
        assert_eq!(v.if_then("0", "yes").string(), "base");
        assert_eq!(v.if_then(SmartValue::new("on"), SmartValue::new(3)).value(), &Scalar::Int(3));
    }

    #[test]
    fn test_set_replaces_anything() {
        assert_eq!(SmartValue::new("old").set(SmartValue::new(9)).value(), &Scalar::Int(9));
        assert!(SmartValue::new("old").set(Scalar::Null).value().is_null());
    }

    #[test]
    fn test_conditionals_ignore_but_carry_error_flag() {
        let poisoned = SmartValue::new("abc").add(1);
        let replaced = poisoned.or("n/a");
        assert_eq!(replaced.string(), "n/a");
        assert!(replaced.has_numeric_error());
    }

    #[test]
    fn test_or_throw() {
        let err = SmartValue::new("").or_throw("name required").unwrap_err();
        assert_eq!(err.to_string(), "Missing value: name required");
        assert_eq!(SmartValue::new(0).or_throw("unused").unwrap().value(), &Scalar::Int(0));
    }

    #[test]
    fn test_or_die_passes_present_values() {
        let v = SmartValue::new("ok").or_die_with(&PanicHandler, "unused");
        assert_eq!(v.string(), "ok");
        let v = SmartValue::new(0).or_404_with(&PanicHandler, "unused");
        assert_eq!(v.value(), &Scalar::Int(0));
    }

    #[test]
    #[should_panic(expected = "die: record missing")]
    fn test_or_die_invokes_handler() {
        SmartValue::null().or_die_with(&PanicHandler, "record missing");
    }

    #[test]
    #[should_panic(expected = "not_found: no such page")]
    fn test_or_404_invokes_handler() {
        SmartValue::new("").or_404_with(&PanicHandler, "no such page");
    }

    #[test]
    #[should_panic(expected = "redirect: /login")]
    fn test_or_redirect_invokes_handler() {
        SmartValue::null().or_redirect_with(&PanicHandler, "/login");
    }
}
