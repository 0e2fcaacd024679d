//! The page's global object, as seen by framework probes.
//!
//! Test frameworks publish their state as plain values on the page's global
//! object (e.g. a reporter object with a `finished` field). `GlobalScope` holds
//! those values as JSON so probes can read them without knowing the framework.

use serde_json::{Map, Value};
use std::sync::{PoisonError, RwLock};

/// Named values visible on the page's global object
#[derive(Debug, Default)]
pub struct GlobalScope {
    values: RwLock<Map<String, Value>>,
}

impl GlobalScope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set (or replace) a global
    pub fn set(&self, name: impl Into<String>, value: Value) {
        self.values
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(name.into(), value);
    }

    /// Remove a global, returning its previous value
    pub fn remove(&self, name: &str) -> Option<Value> {
        self.values
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(name)
    }

    pub fn get(&self, name: &str) -> Option<Value> {
        self.values
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .cloned()
    }

    /// Walk `name.field.field...` through nested objects.
    ///
    /// Any missing link, or a link that is not an object, yields `None`.
    pub fn lookup(&self, path: &[&str]) -> Option<Value> {
        let (first, rest) = path.split_first()?;
        let values = self.values.read().unwrap_or_else(PoisonError::into_inner);
        let mut current = values.get(*first)?;
        for segment in rest {
            current = current.as_object()?.get(*segment)?;
        }
        Some(current.clone())
    }
}

/// JavaScript truthiness of a JSON value.
///
/// `null`, `false`, `0` and `""` are falsy; every other value, including empty
/// objects and arrays, is truthy.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
