use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::error::ConduitError;

// ─── Tool ─────────────────────────────────────────────────────────

/// The assistant product that emitted a native hook event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Tool {
    ClaudeCode,
    Cursor,
    GeminiCli,
    /// Catch-all for products without an adapter.
    Other,
}

impl Tool {
    pub const ALL: [Self; 4] = [Self::ClaudeCode, Self::Cursor, Self::GeminiCli, Self::Other];

    /// Tools that have an adapter.
    pub const SUPPORTED: [Self; 3] = [Self::ClaudeCode, Self::Cursor, Self::GeminiCli];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::ClaudeCode => "claude-code",
            Self::Cursor => "cursor",
            Self::GeminiCli => "gemini-cli",
            Self::Other => "other",
        }
    }

    /// Interpret an operator-supplied override. Case-insensitive; anything
    /// unrecognised becomes [`Tool::Other`], which no adapter owns.
    pub fn from_override(value: &str) -> Self {
        value.trim().parse().unwrap_or(Self::Other)
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tool {
    type Err = ConduitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "claude-code" => Ok(Self::ClaudeCode),
            "cursor" => Ok(Self::Cursor),
            "gemini-cli" | "gemini" => Ok(Self::GeminiCli),
            "other" => Ok(Self::Other),
            _ => Err(ConduitError::UnknownTool(s.to_owned())),
        }
    }
}

// ─── Event Type ───────────────────────────────────────────────────

/// Normalized event category shared by every tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    PromptSubmit,
    ToolPre,
    ToolPost,
    SessionStart,
    SessionEnd,
    AgentThought,
    AgentResponse,
    FileRead,
    FileEdit,
    FileCreate,
    ShellPre,
    ShellPost,
}

/// Which payload slot of a [`CanonicalEvent`] an [`EventType`] populates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PayloadKind {
    Prompt,
    Tool,
    Session,
    None,
}

impl EventType {
    pub const ALL: [Self; 12] = [
        Self::PromptSubmit,
        Self::ToolPre,
        Self::ToolPost,
        Self::SessionStart,
        Self::SessionEnd,
        Self::AgentThought,
        Self::AgentResponse,
        Self::FileRead,
        Self::FileEdit,
        Self::FileCreate,
        Self::ShellPre,
        Self::ShellPost,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::PromptSubmit => "prompt_submit",
            Self::ToolPre => "tool_pre",
            Self::ToolPost => "tool_post",
            Self::SessionStart => "session_start",
            Self::SessionEnd => "session_end",
            Self::AgentThought => "agent_thought",
            Self::AgentResponse => "agent_response",
            Self::FileRead => "file_read",
            Self::FileEdit => "file_edit",
            Self::FileCreate => "file_create",
            Self::ShellPre => "shell_pre",
            Self::ShellPost => "shell_post",
        }
    }

    pub fn payload_kind(self) -> PayloadKind {
        match self {
            Self::PromptSubmit => PayloadKind::Prompt,
            Self::ToolPre
            | Self::ToolPost
            | Self::FileRead
            | Self::FileEdit
            | Self::FileCreate
            | Self::ShellPre
            | Self::ShellPost => PayloadKind::Tool,
            Self::SessionStart | Self::SessionEnd => PayloadKind::Session,
            Self::AgentThought | Self::AgentResponse => PayloadKind::None,
        }
    }

    /// True for the "post" half of a pre/post pair.
    pub fn is_post(self) -> bool {
        matches!(self, Self::ToolPost | Self::ShellPost)
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventType {
    type Err = ConduitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| ConduitError::UnknownEventType(s.to_owned()))
    }
}

// ─── Context ──────────────────────────────────────────────────────

/// Workspace identity derived from the native event.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkspaceContext {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repo_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repo_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub working_directory: Option<String>,
    /// Paths in the order the source supplied them.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub files_referenced: Option<Vec<String>>,
}

impl WorkspaceContext {
    pub fn is_empty(&self) -> bool {
        self.repo_name.is_none()
            && self.repo_path.is_none()
            && self.working_directory.is_none()
            && self.files_referenced.is_none()
    }
}

/// Snapshot of repository state. Every field is filled by an independent
/// probe, so any subset may be present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GitContext {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commit_hash: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commit_message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commit_author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commit_timestamp: Option<String>,
    /// Absent on a detached HEAD.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_detached_head: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_dirty: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub staged_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unstaged_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub untracked_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ahead_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub behind_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upstream_branch: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remote_url: Option<String>,
}

// ─── Payloads ─────────────────────────────────────────────────────

/// A prompt attachment reduced to its kind and location.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptPayload {
    /// May be empty when the source omitted the text.
    pub prompt: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachments: Option<Vec<Attachment>>,
}

/// Payload shared by tool, shell and file events.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolPayload {
    pub tool_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_use_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl ToolPayload {
    /// Name used when the source did not report one.
    pub const UNKNOWN_TOOL: &'static str = "unknown";

    pub fn named(tool_name: impl Into<String>) -> Self {
        Self {
            tool_name: tool_name.into(),
            tool_use_id: None,
            input: None,
            output: None,
            success: None,
            duration_ms: None,
            error_message: None,
        }
    }
}

impl Default for ToolPayload {
    fn default() -> Self {
        Self::named(Self::UNKNOWN_TOOL)
    }
}

/// Session lifecycle detail. `source` is only set on session start,
/// `reason` only on session end.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl SessionPayload {
    pub fn started(source: Option<String>) -> Self {
        Self {
            source,
            reason: None,
        }
    }

    pub fn ended(reason: Option<String>) -> Self {
        Self {
            source: None,
            reason,
        }
    }
}

// ─── Event ────────────────────────────────────────────────────────

/// The normalized envelope every adapter produces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanonicalEvent {
    pub tool: Tool,
    pub event_type: EventType,
    pub event_id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub adapter_version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workspace: Option<WorkspaceContext>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub git: Option<GitContext>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt: Option<PromptPayload>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_event: Option<ToolPayload>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session: Option<SessionPayload>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_event_type: Option<String>,
    /// Whole native payload; only set in debug mode.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_event: Option<serde_json::Value>,
}

impl CanonicalEvent {
    /// Fresh envelope with a new event id and the current UTC time.
    pub fn new(tool: Tool, event_type: EventType, adapter_version: impl Into<String>) -> Self {
        Self {
            tool,
            event_type,
            event_id: Uuid::new_v4(),
            timestamp: Utc::now(),
            adapter_version: adapter_version.into(),
            session_id: None,
            workspace: None,
            git: None,
            prompt: None,
            tool_event: None,
            session: None,
            raw_event_type: None,
            raw_event: None,
        }
    }

    /// Check that exactly the payload slot for `event_type` is populated
    /// and that the native event name is kept.
    pub fn validate(&self) -> Result<(), ConduitError> {
        if self.raw_event_type.as_deref().is_none_or(str::is_empty) {
            return Err(ConduitError::MissingRawEventType {
                event_type: self.event_type,
            });
        }
        let slots = (
            self.prompt.is_some(),
            self.tool_event.is_some(),
            self.session.is_some(),
        );
        let ok = match self.event_type.payload_kind() {
            PayloadKind::Prompt => slots == (true, false, false),
            PayloadKind::Tool => slots == (false, true, false),
            PayloadKind::Session => slots == (false, false, true),
            PayloadKind::None => slots == (false, false, false),
        };
        if ok {
            Ok(())
        } else {
            Err(ConduitError::PayloadMismatch {
                event_type: self.event_type,
            })
        }
    }

    /// Structured form with every unset optional field omitted.
    pub fn serialize(&self) -> Result<serde_json::Value, ConduitError> {
        Ok(serde_json::to_value(self)?)
    }

    /// Inverse of [`CanonicalEvent::serialize`]. Nested payloads are only
    /// reconstructed when their key is present.
    pub fn parse(value: serde_json::Value) -> Result<Self, ConduitError> {
        let event: Self = serde_json::from_value(value)?;
        event.validate()?;
        Ok(event)
    }

    pub fn to_json_string(&self) -> Result<String, ConduitError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json_str(s: &str) -> Result<Self, ConduitError> {
        Self::parse(serde_json::from_str(s)?)
    }
}

// ─── Tests ────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn prompt_event() -> CanonicalEvent {
        let mut ev = CanonicalEvent::new(Tool::ClaudeCode, EventType::PromptSubmit, "0.3.0");
        ev.session_id = Some("s1".into());
        ev.prompt = Some(PromptPayload {
            prompt: "hello".into(),
            ..PromptPayload::default()
        });
        ev.raw_event_type = Some("UserPromptSubmit".into());
        ev
    }

    #[test]
    fn tool_serde_uses_kebab_case() {
        assert_eq!(
            serde_json::to_value(Tool::ClaudeCode).expect("serialize"),
            json!("claude-code")
        );
        assert_eq!(
            serde_json::to_value(Tool::GeminiCli).expect("serialize"),
            json!("gemini-cli")
        );
        for t in Tool::ALL {
            let back: Tool =
                serde_json::from_value(serde_json::to_value(t).expect("ser")).expect("de");
            assert_eq!(t, back);
        }
    }

    #[test]
    fn tool_display_and_parse() {
        for t in Tool::ALL {
            assert_eq!(t.to_string().parse::<Tool>().expect("parse"), t);
        }
        assert_eq!("gemini".parse::<Tool>().expect("alias"), Tool::GeminiCli);
        assert_eq!("CURSOR".parse::<Tool>().expect("case"), Tool::Cursor);
        assert!("windsurf".parse::<Tool>().is_err());
    }

    #[test]
    fn override_is_case_normalized_and_falls_back_to_other() {
        assert_eq!(Tool::from_override("  Claude-Code "), Tool::ClaudeCode);
        assert_eq!(Tool::from_override("windsurf"), Tool::Other);
    }

    #[test]
    fn event_type_wire_names() {
        for t in EventType::ALL {
            let v = serde_json::to_value(t).expect("serialize");
            assert_eq!(v, json!(t.as_str()));
            assert_eq!(t.as_str().parse::<EventType>().expect("parse"), t);
        }
        assert!("bogus".parse::<EventType>().is_err());
    }

    #[test]
    fn payload_kinds() {
        assert_eq!(EventType::PromptSubmit.payload_kind(), PayloadKind::Prompt);
        assert_eq!(EventType::ShellPost.payload_kind(), PayloadKind::Tool);
        assert_eq!(EventType::FileCreate.payload_kind(), PayloadKind::Tool);
        assert_eq!(EventType::SessionEnd.payload_kind(), PayloadKind::Session);
        assert_eq!(EventType::AgentThought.payload_kind(), PayloadKind::None);
        assert!(EventType::ToolPost.is_post());
        assert!(!EventType::ToolPre.is_post());
    }

    #[test]
    fn new_events_get_fresh_ids() {
        let a = CanonicalEvent::new(Tool::Cursor, EventType::AgentResponse, "v");
        let b = CanonicalEvent::new(Tool::Cursor, EventType::AgentResponse, "v");
        assert_ne!(a.event_id, b.event_id);
        assert!(b.timestamp >= a.timestamp);
    }

    #[test]
    fn serialize_omits_unset_fields() {
        let v = prompt_event().serialize().expect("serialize");
        let obj = v.as_object().expect("object");
        for key in ["workspace", "git", "tool_event", "session", "raw_event"] {
            assert!(!obj.contains_key(key), "{key} should be omitted");
        }
        assert!(!v.to_string().contains("null"));
        assert_eq!(v["prompt"], json!({"prompt": "hello"}));
        assert_eq!(v["event_type"], json!("prompt_submit"));
    }

    #[test]
    fn parse_roundtrip() {
        let mut ev = prompt_event();
        ev.git = Some(GitContext {
            branch: Some("main".into()),
            is_detached_head: Some(false),
            staged_count: Some(2),
            ..GitContext::default()
        });
        ev.workspace = Some(WorkspaceContext {
            repo_name: Some("repo".into()),
            files_referenced: Some(vec!["b.rs".into(), "a.rs".into()]),
            ..WorkspaceContext::default()
        });
        let back = CanonicalEvent::parse(ev.serialize().expect("ser")).expect("parse");
        assert_eq!(back, ev);
    }

    #[test]
    fn parse_rejects_mismatched_payload() {
        let mut ev = CanonicalEvent::new(Tool::ClaudeCode, EventType::ToolPost, "v");
        ev.raw_event_type = Some("PostToolUse".into());
        ev.session = Some(SessionPayload::started(Some("startup".into())));
        let err = CanonicalEvent::parse(ev.serialize().expect("ser")).expect_err("mismatch");
        assert!(err.to_string().contains("tool_post"));
    }

    #[test]
    fn parse_rejects_missing_native_name() {
        let mut v = prompt_event().serialize().expect("ser");
        v.as_object_mut().expect("object").remove("raw_event_type");
        let err = CanonicalEvent::parse(v).expect_err("missing name");
        assert!(matches!(err, ConduitError::MissingRawEventType { .. }));

        let mut ev = prompt_event();
        ev.raw_event_type = Some(String::new());
        assert!(ev.validate().is_err());
    }

    #[test]
    fn parse_rejects_unknown_tool() {
        let mut v = prompt_event().serialize().expect("ser");
        v["tool"] = json!("notepad");
        assert!(CanonicalEvent::parse(v).is_err());
    }

    #[test]
    fn attachment_uses_type_key() {
        let a = Attachment {
            kind: Some("file".into()),
            path: Some("/x.ts".into()),
        };
        assert_eq!(
            serde_json::to_value(&a).expect("ser"),
            json!({"type": "file", "path": "/x.ts"})
        );
    }

    #[test]
    fn tool_payload_default_is_unknown() {
        assert_eq!(ToolPayload::default().tool_name, "unknown");
    }
}
