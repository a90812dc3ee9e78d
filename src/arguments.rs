use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Argument envelope used by tool calls.
///
/// A thin wrapper over the JSON object the client supplies as `arguments`,
/// with typed accessors for validation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Arguments {
    values: HashMap<String, Value>,
}

impl Arguments {
    /// Create an empty argument set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the raw JSON value for a key.
    pub fn get_value(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// Insert a value, replacing any existing entry.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        self.values.insert(key.into(), value);
    }
}

impl From<HashMap<String, Value>> for Arguments {
    fn from(values: HashMap<String, Value>) -> Self {
        Self { values }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accessors() {
        let mut args = Arguments::new();
        args.insert("latitude", serde_json::json!(44.5));
        assert_eq!(args.get_value("latitude").and_then(Value::as_f64), Some(44.5));
        assert!(args.get_value("longitude").is_none());
    }
}
