//! Declarative transformation chains
//!
//! A [`Chain`] is an ordered list of [`Step`]s that can be built in code or
//! parsed from text, then applied to any number of values. Applying a chain
//! is equivalent to calling the corresponding [`SmartValue`] methods one
//! after another.
//!
//! ```
//! use safeval_core::{Chain, SmartValue};
//!
//! let chain = Chain::parse(["text-only", "max-chars:12"]).unwrap();
//! let out = chain.apply(&SmartValue::new("<p>The quick brown fox</p>"));
//! assert_eq!(out.string(), "The quick...");
//! ```
//!
//! Copyright (c) 2025 Safeval Team
//! Licensed under the Apache-2.0 license

mod step;


pub use step::{Step, STEP_NAMES};

use crate::error::Result;
use crate::value::SmartValue;
use std::fmt;

/// An ordered sequence of steps
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Chain {
    steps: Vec<Step>,
}

impl Chain {
    /// Create an empty chain
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse one step per item, e.g. `["add:5", "percent:1"]`
    pub fn parse<I, S>(steps: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let steps = steps
            .into_iter()
            .map(|s| s.as_ref().parse::<Step>())
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { steps })
    }

    /// Append a step
    pub fn then(mut self, step: Step) -> Self {
        self.steps.push(step);
        self
    }

    /// Append several steps
    pub fn then_all<I>(mut self, steps: I) -> Self
    where
        I: IntoIterator<Item = Step>,
    {
        self.steps.extend(steps);
        self
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Run every step in order
    pub fn apply(&self, value: &SmartValue) -> SmartValue {
        self.steps.iter().fold(value.clone(), |current, step| {
            let next = step.apply(&current);
            log::trace!(
                "{} -> {:?} (numeric_error={})",
                step,
                next.value(),
                next.has_numeric_error()
            );
            next
        })
    }
}

impl fmt::Display for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, step) in self.steps.iter().enumerate() {
            if i > 0 {
                write!(f, " | ")?;
            }
            write!(f, "{}", step)?;
        }
        Ok(())
    }
}

impl FromIterator<Step> for Chain {
    fn from_iter<I: IntoIterator<Item = Step>>(iter: I) -> Self {
        Self {
            steps: iter.into_iter().collect(),
        }
    }
}
