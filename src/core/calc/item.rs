use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::core::calc::num::to_num;

/// Category-specific geometry and options, exactly as entered in the form.
///
/// Values are kept raw (mostly strings, occasionally booleans or numbers
/// from older records) and only interpreted at pricing time. The accessors
/// reproduce the legacy reading rules: a field that is missing, empty, zero
/// or `false` takes the caller's default; the *string* "0" does not.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemData(Map<String, Value>);

impl ItemData {
    pub fn new() -> Self {
        Self(Map::new())
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    /// Builder-style [`ItemData::set`].
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(key, value);
        self
    }

    fn is_falsy(value: &Value) -> bool {
        match value {
            Value::Null => true,
            Value::Bool(b) => !b,
            Value::String(s) => s.is_empty(),
            Value::Number(n) => n.as_f64().unwrap_or(0.0) == 0.0,
            _ => false,
        }
    }

    /// Numeric field with a fallback for absent or falsy values.
    pub fn num_or(&self, key: &str, default: f64) -> f64 {
        match self.0.get(key) {
            Some(value) if !Self::is_falsy(value) => to_num(value),
            _ => default,
        }
    }

    /// Text field with a fallback for absent or falsy values.
    pub fn text_or(&self, key: &str, default: &str) -> String {
        match self.0.get(key) {
            Some(value) if !Self::is_falsy(value) => match value {
                Value::String(s) => s.clone(),
                Value::Number(n) => n.to_string(),
                Value::Bool(b) => b.to_string(),
                _ => String::new(),
            },
            _ => default.to_string(),
        }
    }

    /// Loose boolean: `true` or the string `"true"`, anything else is false.
    /// Legacy records stored checkbox state as strings.
    pub fn flag(&self, key: &str) -> bool {
        match self.0.get(key) {
            Some(Value::Bool(b)) => *b,
            Some(Value::String(s)) => s == "true",
            _ => false,
        }
    }
}

impl From<Map<String, Value>> for ItemData {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// One priced line of an offer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub id: i64,
    /// Free-form type text; normalized to a [`Category`](super::Category)
    /// at pricing time, never rewritten in storage.
    pub item_type: String,
    pub name: String,
    pub data: ItemData,
}
