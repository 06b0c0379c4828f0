//! promptconduit-source-gemini: Gemini CLI hook adapter.
//! Normalizes Gemini CLI hook payloads into [`CanonicalEvent`]s and renames
//! Gemini's built-in tools to the names Claude Code uses for the same job.
//!
//! [`CanonicalEvent`]: promptconduit_core::CanonicalEvent

pub mod translate;

pub use translate::{EVENT_MAPPING, GeminiAdapter, TOOL_NAME_MAPPING, normalize_tool_name};
