//! Event translation from Cursor hook payloads to [`CanonicalEvent`].
//!
//! Cursor's post-execution hooks carry no failure signal, so shell and MCP
//! post events always report success.

use promptconduit_context::{EventContext, GitCommandRunner, GitExecutor};
use promptconduit_core::{
    AdapterOptions, Attachment, CanonicalEvent, EventMapping, EventType, HookAdapter,
    NativeEvent, PromptPayload, SessionPayload, Tool, ToolPayload, WorkspaceContext, lookup,
};
use serde_json::{Map, Value};

/// Native hook name → canonical category.
pub const EVENT_MAPPING: EventMapping = &[
    // Agent hooks
    ("beforeSubmitPrompt", EventType::PromptSubmit),
    ("beforeShellExecution", EventType::ShellPre),
    ("afterShellExecution", EventType::ShellPost),
    ("beforeMCPExecution", EventType::ToolPre),
    ("afterMCPExecution", EventType::ToolPost),
    ("beforeReadFile", EventType::FileRead),
    ("afterFileEdit", EventType::FileEdit),
    ("afterAgentResponse", EventType::AgentResponse),
    ("afterAgentThought", EventType::AgentThought),
    ("stop", EventType::SessionEnd),
    // Tab hooks
    ("beforeTabFileRead", EventType::FileRead),
    ("afterTabFileEdit", EventType::FileEdit),
];

const SHELL_TOOL: &str = "shell";
const MCP_TOOL: &str = "mcp";

pub struct CursorAdapter<R = GitExecutor> {
    ctx: EventContext<R>,
}

impl CursorAdapter<GitExecutor> {
    pub fn new(options: AdapterOptions) -> Self {
        Self {
            ctx: EventContext::new(options),
        }
    }
}

impl<R: GitCommandRunner> CursorAdapter<R> {
    pub fn with_runner(runner: R, options: AdapterOptions) -> Self {
        Self {
            ctx: EventContext::with_runner(runner, options),
        }
    }
}

impl<R: GitCommandRunner> HookAdapter for CursorAdapter<R> {
    fn tool(&self) -> Tool {
        Tool::Cursor
    }

    fn mapping(&self) -> EventMapping {
        EVENT_MAPPING
    }

    fn translate(&self, native: &NativeEvent) -> Option<CanonicalEvent> {
        let name = native.event_name()?;
        let Some(event_type) = lookup(EVENT_MAPPING, name) else {
            tracing::debug!(event = name, "cursor: unmapped hook event");
            return None;
        };

        let mut event = self.ctx.base_event(Tool::Cursor, event_type, native, name);
        event.session_id = native
            .first_str(&["conversation_id", "generation_id"])
            .map(str::to_owned);
        apply_workspace_root(&mut event, native);

        match event_type {
            EventType::PromptSubmit => event.prompt = Some(prompt_payload(native)),
            EventType::ShellPre | EventType::ShellPost => {
                event.tool_event = Some(shell_payload(native, event_type));
            }
            EventType::ToolPre | EventType::ToolPost => {
                event.tool_event = Some(mcp_payload(native, event_type));
            }
            EventType::FileRead | EventType::FileEdit => {
                event.tool_event = Some(file_payload(native, event_type));
            }
            EventType::SessionEnd => {
                event.session = Some(SessionPayload::ended(native.str("status").map(str::to_owned)));
            }
            _ => {}
        }
        Some(event)
    }
}

/// The first workspace root overrides the derived repository path and
/// seeds the working directory when none was found.
fn apply_workspace_root(event: &mut CanonicalEvent, native: &NativeEvent) {
    let Some(root) = native
        .array("workspace_roots")
        .and_then(|roots| roots.first())
        .and_then(Value::as_str)
        .filter(|r| !r.is_empty())
    else {
        return;
    };
    let workspace = event.workspace.get_or_insert_with(WorkspaceContext::default);
    workspace.repo_path = Some(root.to_owned());
    if workspace.working_directory.is_none() {
        workspace.working_directory = Some(root.to_owned());
    }
}

fn prompt_payload(native: &NativeEvent) -> PromptPayload {
    let attachments: Vec<Attachment> = native
        .array("attachments")
        .into_iter()
        .flatten()
        .filter_map(Value::as_object)
        .map(|a| Attachment {
            kind: a.get("type").and_then(Value::as_str).map(str::to_owned),
            path: a.get("path").and_then(Value::as_str).map(str::to_owned),
        })
        .collect();

    PromptPayload {
        prompt: native.str("prompt").unwrap_or_default().to_owned(),
        response_summary: None,
        attachments: (!attachments.is_empty()).then_some(attachments),
    }
}

fn shell_payload(native: &NativeEvent, event_type: EventType) -> ToolPayload {
    let mut payload = ToolPayload::named(SHELL_TOOL);
    payload.input = Some(pick(native, &["command", "cwd"]));
    payload.duration_ms = native.u64("duration");
    if event_type.is_post() {
        let mut output = Map::new();
        if let Some(stdout) = native.get("output") {
            output.insert("stdout".into(), stdout.clone());
        }
        payload.output = Some(Value::Object(output));
        payload.success = Some(true);
    }
    payload
}

fn mcp_payload(native: &NativeEvent, event_type: EventType) -> ToolPayload {
    let mut payload = ToolPayload::named(native.str("tool_name").unwrap_or(MCP_TOOL));
    payload.input = native.get("params").cloned();
    payload.duration_ms = native.u64("duration");
    if event_type.is_post() {
        payload.output = native.get("result").cloned();
        payload.success = Some(true);
    }
    payload
}

fn file_payload(native: &NativeEvent, event_type: EventType) -> ToolPayload {
    let is_edit = event_type == EventType::FileEdit;
    let mut payload = ToolPayload::named(event_type.as_str());
    if is_edit {
        payload.input = Some(pick(native, &["file_path"]));
        let edits = native.get("edits").cloned().unwrap_or_else(|| Value::Array(Vec::new()));
        let mut output = Map::new();
        output.insert("edits".into(), edits);
        payload.output = Some(Value::Object(output));
    } else {
        payload.input = Some(pick(native, &["file_path", "contents"]));
    }
    payload
}

/// Object holding the listed native keys that are present.
fn pick(native: &NativeEvent, keys: &[&str]) -> Value {
    let map: Map<String, Value> = keys
        .iter()
        .filter_map(|k| native.get(k).map(|v| ((*k).to_owned(), v.clone())))
        .collect();
    Value::Object(map)
}

#[cfg(test)]
mod tests {
    use super::*;
    use promptconduit_context::GitError;
    use serde_json::json;
    use std::path::Path;

    struct NoRepo;

    impl GitCommandRunner for NoRepo {
        fn run(&self, _dir: &Path, _args: &[&str]) -> Result<String, GitError> {
            Err(GitError::CommandFailed("not a repository".into()))
        }
    }

    fn translate(v: Value) -> Option<CanonicalEvent> {
        CursorAdapter::with_runner(NoRepo, AdapterOptions::default())
            .translate(&NativeEvent::from_value(v).expect("object"))
    }

    #[test]
    fn prompt_with_attachments() {
        let ev = translate(json!({
            "hook_event_name": "beforeSubmitPrompt",
            "conversation_id": "conv-1",
            "generation_id": "gen-1",
            "prompt": "refactor this",
            "attachments": [
                {"type": "file", "path": "/w/a.ts", "extra": 1},
                "not-an-object",
                {"type": "rule"}
            ]
        }))
        .expect("event");
        assert_eq!(ev.event_type, EventType::PromptSubmit);
        assert_eq!(ev.session_id.as_deref(), Some("conv-1"));
        let prompt = ev.prompt.expect("prompt");
        assert_eq!(prompt.prompt, "refactor this");
        assert_eq!(
            prompt.attachments,
            Some(vec![
                Attachment { kind: Some("file".into()), path: Some("/w/a.ts".into()) },
                Attachment { kind: Some("rule".into()), path: None },
            ])
        );
    }

    #[test]
    fn session_falls_back_to_generation_id() {
        let ev = translate(json!({
            "hook_event_name": "afterAgentResponse",
            "generation_id": "gen-9",
            "session_id": "ignored"
        }))
        .expect("event");
        assert_eq!(ev.session_id.as_deref(), Some("gen-9"));
    }

    #[test]
    fn empty_attachments_are_omitted() {
        let ev = translate(json!({"hook_event_name": "beforeSubmitPrompt", "attachments": []}))
            .expect("event");
        let prompt = ev.prompt.expect("prompt");
        assert_eq!(prompt.prompt, "");
        assert!(prompt.attachments.is_none());
    }

    #[test]
    fn workspace_root_overrides_repo_path() {
        let ev = translate(json!({
            "hook_event_name": "afterAgentThought",
            "workspace_roots": ["/w/main", "/w/other"]
        }))
        .expect("event");
        let ws = ev.workspace.expect("workspace");
        assert_eq!(ws.repo_path.as_deref(), Some("/w/main"));
        assert_eq!(ws.working_directory.as_deref(), Some("/w/main"));
    }

    #[test]
    fn workspace_root_keeps_existing_working_dir() {
        let ev = translate(json!({
            "hook_event_name": "afterAgentThought",
            "cwd": "/w/main/pkg",
            "workspace_roots": ["/w/main"]
        }))
        .expect("event");
        let ws = ev.workspace.expect("workspace");
        assert_eq!(ws.repo_path.as_deref(), Some("/w/main"));
        assert_eq!(ws.working_directory.as_deref(), Some("/w/main/pkg"));
    }

    #[test]
    fn shell_post_is_always_successful() {
        let ev = translate(json!({
            "hook_event_name": "afterShellExecution",
            "command": "cargo test",
            "output": "error: could not compile",
            "duration": 1532
        }))
        .expect("event");
        assert_eq!(ev.event_type, EventType::ShellPost);
        let tool = ev.tool_event.expect("tool");
        assert_eq!(tool.tool_name, "shell");
        assert_eq!(tool.input, Some(json!({"command": "cargo test"})));
        assert_eq!(tool.output, Some(json!({"stdout": "error: could not compile"})));
        assert_eq!(tool.success, Some(true));
        assert_eq!(tool.duration_ms, Some(1532));
        assert!(tool.error_message.is_none());
    }

    #[test]
    fn shell_pre_has_no_outcome() {
        let ev = translate(json!({
            "hook_event_name": "beforeShellExecution",
            "command": "ls",
            "cwd": "/w"
        }))
        .expect("event");
        let tool = ev.tool_event.expect("tool");
        assert_eq!(tool.input, Some(json!({"command": "ls", "cwd": "/w"})));
        assert!(tool.output.is_none());
        assert!(tool.success.is_none());
    }

    #[test]
    fn mcp_post_ignores_error_markers() {
        let ev = translate(json!({
            "hook_event_name": "afterMCPExecution",
            "tool_name": "github.search",
            "params": {"q": "x"},
            "result": {"is_error": true, "message": "rate limited"},
            "duration": 20
        }))
        .expect("event");
        let tool = ev.tool_event.expect("tool");
        assert_eq!(tool.tool_name, "github.search");
        assert_eq!(tool.input, Some(json!({"q": "x"})));
        assert_eq!(tool.success, Some(true));
        assert!(tool.error_message.is_none());
        assert_eq!(tool.duration_ms, Some(20));
    }

    #[test]
    fn mcp_default_name() {
        let ev = translate(json!({"hook_event_name": "beforeMCPExecution"})).expect("event");
        assert_eq!(ev.tool_event.expect("tool").tool_name, "mcp");
    }

    #[test]
    fn agent_and_tab_file_ops_share_categories() {
        for name in ["beforeReadFile", "beforeTabFileRead"] {
            let ev = translate(json!({
                "hook_event_name": name,
                "file_path": "/w/a.rs",
                "contents": "fn main() {}"
            }))
            .expect("event");
            assert_eq!(ev.event_type, EventType::FileRead);
            let tool = ev.tool_event.expect("tool");
            assert_eq!(tool.tool_name, "file_read");
            assert_eq!(
                tool.input,
                Some(json!({"file_path": "/w/a.rs", "contents": "fn main() {}"}))
            );
        }
        for name in ["afterFileEdit", "afterTabFileEdit"] {
            let ev = translate(json!({"hook_event_name": name, "file_path": "/w/a.rs"}))
                .expect("event");
            assert_eq!(ev.event_type, EventType::FileEdit);
            let tool = ev.tool_event.expect("tool");
            assert_eq!(tool.tool_name, "file_edit");
            assert_eq!(tool.output, Some(json!({"edits": []})));
        }
    }

    #[test]
    fn stop_ends_session() {
        let ev = translate(json!({"hook_event_name": "stop", "status": "completed"}))
            .expect("event");
        assert_eq!(ev.event_type, EventType::SessionEnd);
        assert_eq!(ev.session, Some(SessionPayload::ended(Some("completed".into()))));
    }

    #[test]
    fn unknown_names_are_skipped() {
        assert!(translate(json!({"hook_event_name": "SomeUnknownEvent"})).is_none());
        assert!(translate(json!({"hook_event_name": "Stop"})).is_none());
    }

    #[test]
    fn every_mapped_name_translates() {
        assert_eq!(EVENT_MAPPING.len(), 12);
        for (name, ty) in EVENT_MAPPING {
            let ev = translate(json!({"hook_event_name": name})).expect("event");
            assert_eq!(ev.event_type, *ty);
            assert!(ev.validate().is_ok(), "{name}");
        }
    }
}
