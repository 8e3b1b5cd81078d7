//! Safeval Core - immutable, chainable value wrapper for rendering
//!
//! This crate wraps untrusted scalar data (strings, numbers, booleans, null)
//! so it can be passed through chains of transformations and rendered
//! without accidental unescaped output.
//!
//! # Main Components
//!
//! - **Value model**: [`Scalar`] and the [`SmartValue`] wrapper
//! - **Classification**: missing / blank / zero / empty predicates in [`classify`]
//! - **Arithmetic**: chained math with a sticky numeric error flag
//! - **Truncation**: word and character limits with Unicode-safe counting
//! - **Chains**: declarative [`Chain`]s of parsed [`Step`]s
//!
//! # Example
//!
//! ```
//! use safeval_core::{Result, SmartValue};
//!
//! fn example() -> Result<()> {
//!     let title = SmartValue::new("The quick brown fox jumps over the lazy dog");
//!     assert_eq!(title.max_words(5).string(), "The quick brown fox jumps...");
//!
//!     let ratio = SmartValue::new(0).divide(4).percent_or(2, "N/A");
//!     assert_eq!(ratio.string(), "N/A");
//!
//!     let name = SmartValue::new("").or_throw("name is required");
//!     assert!(name.is_err());
//!     Ok(())
//! }
//! # example().unwrap();
//! ```
//!
//! Copyright (c) 2025 Safeval Team
//! Licensed under the Apache-2.0 license

pub mod abort;
pub mod chain;
pub mod classify;
pub mod coerce;
pub mod encode;
pub mod error;
pub mod format;
pub mod record;
pub mod scalar;
pub mod settings;
pub mod truncate;
pub mod value;

// Re-export main types for convenience
pub use abort::{ExitProcess, FailFast};
pub use chain::{Chain, Step};
pub use coerce::coerce;
pub use error::{Error, Result, ValueKind};
pub use record::{wrap_object, wrap_record, SmartRecord};
pub use scalar::Scalar;
pub use settings::{PhoneFormat, Settings, SettingsBuilder};
pub use value::SmartValue;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Wrap a value with the default settings
pub fn wrap(raw: impl Into<Scalar>) -> SmartValue {
    SmartValue::new(raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_version() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_wrap_shortcut() {
        assert_eq!(wrap("x"), SmartValue::new("x"));
    }
}
