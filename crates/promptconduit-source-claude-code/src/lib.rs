//! promptconduit-source-claude-code: Claude Code hook adapter.
//! Normalizes Claude Code hook payloads into [`CanonicalEvent`]s.
//!
//! [`CanonicalEvent`]: promptconduit_core::CanonicalEvent

pub mod translate;

pub use translate::{ClaudeCodeAdapter, EVENT_MAPPING};
