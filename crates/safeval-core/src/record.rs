//! Wrapping whole records
//!
//! Turns a JSON object of scalar fields into a map of [`SmartValue`]s that
//! share one settings context.
//!
//! Copyright (c) 2025 Safeval Team
//! Licensed under the Apache-2.0 license

use crate::error::{Error, Result, ValueKind};
use crate::scalar::Scalar;
use crate::settings::Settings;
use crate::value::SmartValue;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Field name to wrapped value
pub type SmartRecord = BTreeMap<String, SmartValue>;

/// Wrap every field of a record.
///
/// Nested arrays and objects are rejected with the offending field name.
pub fn wrap_record(record: &Map<String, Value>, settings: Arc<Settings>) -> Result<SmartRecord> {
    record
        .iter()
        .map(|(field, value)| {
            let scalar = Scalar::from_json(value).map_err(|_| Error::InvalidConstruction {
                found: ValueKind::of(value),
                path: Some(field.clone()),
            })?;
            Ok((field.clone(), SmartValue::with_settings(scalar, Arc::clone(&settings))))
        })
        .collect()
}

/// Wrap a JSON value that must be an object
pub fn wrap_object(value: &Value, settings: Arc<Settings>) -> Result<SmartRecord> {
    match value {
        Value::Object(record) => wrap_record(record, settings),
        other => Err(Error::InvalidConstruction {
            found: ValueKind::of(other),
            path: None,
        }),
    }
}
