//! Dynamic record

use std::collections::HashMap;

use serde::Deserialize;
use serde::Serialize;

use super::Value;

static NULL: Value = Value::Null;

/// One record returned by the hub API.
///
/// Records hold field values as a `HashMap<String, Value>`, so the same type
/// serves every resource kind. Reading a field that is not present yields
/// [`Value::Null`] rather than an error.
///
/// # Example
///
/// ```
/// use avhub_lib::model::{Record, Value};
///
/// let record = Record::new()
///     .set("id", 7i64)
///     .set("operator", "Waymo");
///
/// assert_eq!(record.value("operator"), &Value::from("Waymo"));
/// assert!(record.value("city").is_null());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    fields: HashMap<String, Value>,
}

impl Record {
    /// Creates a new empty record.
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Raw field access
    // =========================================================================

    /// Returns a reference to the field value, if it exists.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Returns the field value, or [`Value::Null`] when the field is absent.
    pub fn value(&self, field: &str) -> &Value {
        self.fields.get(field).unwrap_or(&NULL)
    }

    /// Returns `true` if the record contains the given field.
    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Returns a reference to all fields.
    pub fn fields(&self) -> &HashMap<String, Value> {
        &self.fields
    }

    /// Returns the number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` if the record has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Returns the string value of a field, if it is a string.
    pub fn get_str(&self, field: &str) -> Option<&str> {
        self.value(field).as_str()
    }

    /// Returns the identity of this record under `identity_field`.
    ///
    /// Null or empty identities count as absent.
    pub fn key(&self, identity_field: &str) -> Option<String> {
        let value = self.value(identity_field);
        if value.is_empty() {
            None
        } else {
            Some(value.to_string())
        }
    }

    // =========================================================================
    // Setters
    // =========================================================================

    /// Sets a field value (builder pattern).
    pub fn set(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(field.into(), value.into());
        self
    }

    /// Inserts a field value.
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(field.into(), value.into());
    }

    /// Removes a field and returns its value.
    pub fn remove(&mut self, field: &str) -> Option<Value> {
        self.fields.remove(field)
    }
}

impl FromIterator<(String, Value)> for Record {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}
