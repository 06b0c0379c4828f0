//! Accessors over the loosely-typed JSON object a hook delivers on stdin.
//!
//! Native payloads are never trusted to have a shape: every accessor returns
//! `None` for a missing key, a JSON `null`, or a value of the wrong type, and
//! string accessors also treat `""` as missing.

use serde_json::{Map, Value};

/// Field names that carry the native event name, highest priority first.
pub const EVENT_NAME_FIELDS: [&str; 2] = ["hook_event_name", "type"];

/// One raw native event.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NativeEvent(Map<String, Value>);

impl NativeEvent {
    /// Wrap a parsed JSON value; anything but an object is rejected.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(map) => Some(Self(map)),
            _ => None,
        }
    }

    pub fn to_value(&self) -> Value {
        Value::Object(self.0.clone())
    }

    /// Native event name from `hook_event_name`, falling back to `type`.
    pub fn event_name(&self) -> Option<&str> {
        self.first_str(&EVENT_NAME_FIELDS)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        value_in(&self.0, key)
    }

    pub fn str(&self, key: &str) -> Option<&str> {
        str_in(&self.0, key)
    }

    pub fn first_str(&self, keys: &[&str]) -> Option<&str> {
        keys.iter().find_map(|k| self.str(k))
    }

    pub fn object(&self, key: &str) -> Option<&Map<String, Value>> {
        object_in(&self.0, key)
    }

    pub fn array(&self, key: &str) -> Option<&Vec<Value>> {
        self.get(key).and_then(Value::as_array)
    }

    pub fn u64(&self, key: &str) -> Option<u64> {
        u64_in(&self.0, key)
    }

    /// First present value among `keys`, using truthiness rather than mere
    /// presence so an empty object in the first slot does not shadow the next.
    pub fn first_truthy(&self, keys: &[&str]) -> Option<&Value> {
        keys.iter()
            .filter_map(|k| self.get(k))
            .find(|v| is_truthy(v))
    }
}

/// Value under `key`, with JSON `null` treated as absent.
pub fn value_in<'a>(map: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    map.get(key).filter(|v| !v.is_null())
}

/// Non-empty string under `key`.
pub fn str_in<'a>(map: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    map.get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
}

pub fn object_in<'a>(map: &'a Map<String, Value>, key: &str) -> Option<&'a Map<String, Value>> {
    map.get(key).and_then(Value::as_object)
}

/// Non-negative integer under `key`. Floats are rounded; negatives and
/// non-numbers are absent.
pub fn u64_in(map: &Map<String, Value>, key: &str) -> Option<u64> {
    let n = map.get(key)?.as_number()?;
    if let Some(u) = n.as_u64() {
        return Some(u);
    }
    let f = n.as_f64()?;
    if f.is_finite() && f >= 0.0 {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let rounded = f.round() as u64;
        Some(rounded)
    } else {
        None
    }
}

/// Loose truthiness: `null`, `false`, `0`, `""`, `[]` and `{}` are false.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}
