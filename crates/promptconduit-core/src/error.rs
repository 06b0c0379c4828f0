//! Error types for the canonical event model.

use thiserror::Error;

use crate::types::EventType;

#[derive(Debug, Error)]
pub enum ConduitError {
    #[error("unknown tool: {0}")]
    UnknownTool(String),

    #[error("unknown event type: {0}")]
    UnknownEventType(String),

    #[error("{event_type} event carries the wrong payload slot")]
    PayloadMismatch { event_type: EventType },

    #[error("{event_type} event is missing its native event name")]
    MissingRawEventType { event_type: EventType },

    #[error("canonical event json: {0}")]
    Json(#[from] serde_json::Error),
}
