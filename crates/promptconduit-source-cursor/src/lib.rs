//! promptconduit-source-cursor: Cursor hook adapter.
//! Normalizes Cursor agent and tab-completion hook payloads into
//! [`CanonicalEvent`]s. Agent and tab file operations share one category.
//!
//! [`CanonicalEvent`]: promptconduit_core::CanonicalEvent

pub mod translate;

pub use translate::{CursorAdapter, EVENT_MAPPING};
