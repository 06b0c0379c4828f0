//! Event translation from Claude Code hook payloads to [`CanonicalEvent`].

use promptconduit_context::{EventContext, GitCommandRunner, GitExecutor};
use promptconduit_core::{
    AdapterOptions, CanonicalEvent, EventMapping, EventType, HookAdapter, NativeEvent,
    PayloadKind, PromptPayload, SessionPayload, Tool, ToolPayload, infer_outcome, lookup,
};

/// Native hook name → canonical category.
pub const EVENT_MAPPING: EventMapping = &[
    ("UserPromptSubmit", EventType::PromptSubmit),
    ("PreToolUse", EventType::ToolPre),
    ("PermissionRequest", EventType::ToolPre),
    ("PostToolUse", EventType::ToolPost),
    ("SessionStart", EventType::SessionStart),
    ("SessionEnd", EventType::SessionEnd),
    ("Stop", EventType::AgentResponse),
    ("SubagentStop", EventType::AgentResponse),
    ("Notification", EventType::AgentThought),
    ("PreCompact", EventType::AgentThought),
];

pub struct ClaudeCodeAdapter<R = GitExecutor> {
    ctx: EventContext<R>,
}

impl ClaudeCodeAdapter<GitExecutor> {
    pub fn new(options: AdapterOptions) -> Self {
        Self {
            ctx: EventContext::new(options),
        }
    }
}

impl<R: GitCommandRunner> ClaudeCodeAdapter<R> {
    pub fn with_runner(runner: R, options: AdapterOptions) -> Self {
        Self {
            ctx: EventContext::with_runner(runner, options),
        }
    }
}

impl<R: GitCommandRunner> HookAdapter for ClaudeCodeAdapter<R> {
    fn tool(&self) -> Tool {
        Tool::ClaudeCode
    }

    fn mapping(&self) -> EventMapping {
        EVENT_MAPPING
    }

    fn translate(&self, native: &NativeEvent) -> Option<CanonicalEvent> {
        let name = native.event_name()?;
        let Some(event_type) = lookup(EVENT_MAPPING, name) else {
            tracing::debug!(event = name, "claude-code: unmapped hook event");
            return None;
        };

        let mut event = self.ctx.base_event(Tool::ClaudeCode, event_type, native, name);
        match event_type.payload_kind() {
            PayloadKind::Prompt => event.prompt = Some(prompt_payload(native)),
            PayloadKind::Tool => event.tool_event = Some(tool_payload(native, event_type)),
            PayloadKind::Session => event.session = Some(session_payload(native, event_type)),
            PayloadKind::None => {}
        }
        Some(event)
    }
}

fn prompt_payload(native: &NativeEvent) -> PromptPayload {
    PromptPayload {
        prompt: native.str("prompt").unwrap_or_default().to_owned(),
        response_summary: native.str("responseSummary").map(str::to_owned),
        attachments: None,
    }
}

fn tool_payload(native: &NativeEvent, event_type: EventType) -> ToolPayload {
    let mut payload = ToolPayload::named(native.str("tool_name").unwrap_or(ToolPayload::UNKNOWN_TOOL));
    payload.tool_use_id = native.str("tool_use_id").map(str::to_owned);
    payload.input = native.get("tool_input").cloned();

    if event_type.is_post() {
        let response = native.get("tool_response");
        let outcome = infer_outcome(response);
        payload.output = response.cloned();
        payload.success = Some(outcome.success);
        payload.error_message = outcome.error_message;
    }
    payload
}

fn session_payload(native: &NativeEvent, event_type: EventType) -> SessionPayload {
    if event_type == EventType::SessionStart {
        SessionPayload::started(native.str("source").map(str::to_owned))
    } else {
        SessionPayload::ended(native.str("reason").map(str::to_owned))
    }
}
