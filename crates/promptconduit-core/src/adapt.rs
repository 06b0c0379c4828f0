use serde_json::Value;

use crate::native::{NativeEvent, is_truthy, str_in};
use crate::types::{CanonicalEvent, EventType, Tool};

/// Fixed native-name → category table owned by one adapter.
pub type EventMapping = &'static [(&'static str, EventType)];

/// Look a native event name up in an adapter's table.
pub fn lookup(mapping: EventMapping, native_name: &str) -> Option<EventType> {
    mapping
        .iter()
        .find(|(name, _)| *name == native_name)
        .map(|(_, ty)| *ty)
}

/// Translate one tool's native hook events into [`CanonicalEvent`]s.
///
/// `translate` returning `None` means "skip this event": the name is not in
/// the adapter's table. It is never an error.
pub trait HookAdapter: Send + Sync {
    fn tool(&self) -> Tool;
    fn mapping(&self) -> EventMapping;
    fn translate(&self, native: &NativeEvent) -> Option<CanonicalEvent>;

    fn event_type(&self, native_name: &str) -> Option<EventType> {
        lookup(self.mapping(), native_name)
    }
}

/// Settings the adapters receive from configuration as opaque values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdapterOptions {
    /// Echo the whole native payload into `raw_event`.
    pub include_raw_event: bool,
    /// Stamped into every event's `adapter_version`.
    pub adapter_version: String,
}

impl AdapterOptions {
    pub fn new(include_raw_event: bool) -> Self {
        Self {
            include_raw_event,
            ..Self::default()
        }
    }
}

impl Default for AdapterOptions {
    fn default() -> Self {
        Self {
            include_raw_event: false,
            adapter_version: env!("CARGO_PKG_VERSION").to_owned(),
        }
    }
}

/// Success inferred from a tool's post-execution response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub success: bool,
    pub error_message: Option<String>,
}

/// Infer success from a response object.
///
/// Only an object can signal failure, through a truthy `error` or `is_error`
/// key. The message comes from `error`, else `message`, else the whole
/// response rendered as JSON. Anything that is not an object (including a
/// missing response) counts as success.
pub fn infer_outcome(response: Option<&Value>) -> Outcome {
    let Some(Value::Object(obj)) = response else {
        return Outcome {
            success: true,
            error_message: None,
        };
    };

    let truthy = |key: &str| obj.get(key).is_some_and(is_truthy);
    if !truthy("error") && !truthy("is_error") {
        return Outcome {
            success: true,
            error_message: None,
        };
    }

    let message = match obj.get("error").filter(|v| is_truthy(v)) {
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
        None => str_in(obj, "message")
            .map(str::to_owned)
            .unwrap_or_else(|| Value::Object(obj.clone()).to_string()),
    };
    Outcome {
        success: false,
        error_message: Some(message),
    }
}
