//! Builder settings.
//!
//! Both structs deserialize with defaults for every missing key, so a host
//! can embed them in its own configuration file.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Attribute omission rules.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SerializerSettings {
    /// Drop attributes whose value is `null`.
    pub omit_null_attributes: bool,
    /// Drop attributes whose value is the JSON default for its kind:
    /// `null`, `false`, `0`, `""`, `[]` or `{}`.
    pub omit_default_attributes: bool,
}

impl SerializerSettings {
    pub fn omits(&self, value: &Value) -> bool {
        if self.omit_null_attributes && value.is_null() {
            return true;
        }
        self.omit_default_attributes && is_default(value)
    }
}

fn is_default(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
    }
}

/// Which links the URL link builder emits, and under which base URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkSettings {
    /// Prefix for every generated link, e.g. `https://api.example.com`.
    pub base_url: String,
    pub resource_links: bool,
    pub relationship_links: bool,
}

impl Default for LinkSettings {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            resource_links: true,
            relationship_links: true,
        }
    }
}
