//! Event translation from Gemini CLI hook payloads to [`CanonicalEvent`].

use promptconduit_context::{EventContext, GitCommandRunner, GitExecutor};
use promptconduit_core::{
    AdapterOptions, CanonicalEvent, EventMapping, EventType, HookAdapter, NativeEvent,
    PayloadKind, PromptPayload, SessionPayload, Tool, ToolPayload, infer_outcome, lookup,
};

/// Native hook name → canonical category.
pub const EVENT_MAPPING: EventMapping = &[
    ("SessionStart", EventType::SessionStart),
    ("SessionEnd", EventType::SessionEnd),
    ("BeforeAgent", EventType::PromptSubmit),
    ("AfterAgent", EventType::AgentResponse),
    ("BeforeModel", EventType::AgentThought),
    ("AfterModel", EventType::AgentThought),
    ("BeforeTool", EventType::ToolPre),
    ("AfterTool", EventType::ToolPost),
    ("BeforeToolSelection", EventType::ToolPre),
    ("PreCompress", EventType::AgentThought),
    ("Notification", EventType::AgentThought),
];

/// Gemini built-in tool → Claude Code tool name.
pub const TOOL_NAME_MAPPING: &[(&str, &str)] = &[
    ("read_file", "Read"),
    ("read_many_files", "Read"),
    ("write_file", "Write"),
    ("replace", "Edit"),
    ("list_directory", "Glob"),
    ("glob", "Glob"),
    ("find_files", "Glob"),
    ("search_file_content", "Grep"),
    ("grep", "Grep"),
    ("run_shell_command", "Bash"),
    ("google_web_search", "WebSearch"),
    ("web_fetch", "WebFetch"),
    ("write_todos", "TodoWrite"),
    ("save_memory", "Memory"),
    ("memory_tool", "Memory"),
    ("delegate_to_agent", "Task"),
];

const PROMPT_FIELDS: [&str; 3] = ["prompt", "user_message", "message"];

/// Rename a Gemini tool; names outside the table pass through unchanged.
pub fn normalize_tool_name(name: &str) -> &str {
    TOOL_NAME_MAPPING
        .iter()
        .find(|(gemini, _)| *gemini == name)
        .map_or(name, |(_, canonical)| *canonical)
}

pub struct GeminiAdapter<R = GitExecutor> {
    ctx: EventContext<R>,
}

impl GeminiAdapter<GitExecutor> {
    pub fn new(options: AdapterOptions) -> Self {
        Self {
            ctx: EventContext::new(options),
        }
    }
}

impl<R: GitCommandRunner> GeminiAdapter<R> {
    pub fn with_runner(runner: R, options: AdapterOptions) -> Self {
        Self {
            ctx: EventContext::with_runner(runner, options),
        }
    }
}

impl<R: GitCommandRunner> HookAdapter for GeminiAdapter<R> {
    fn tool(&self) -> Tool {
        Tool::GeminiCli
    }

    fn mapping(&self) -> EventMapping {
        EVENT_MAPPING
    }

    fn translate(&self, native: &NativeEvent) -> Option<CanonicalEvent> {
        let name = native.event_name()?;
        let Some(event_type) = lookup(EVENT_MAPPING, name) else {
            tracing::debug!(event = name, "gemini: unmapped hook event");
            return None;
        };

        let mut event = self.ctx.base_event(Tool::GeminiCli, event_type, native, name);
        match event_type.payload_kind() {
            PayloadKind::Prompt => {
                event.prompt = Some(PromptPayload {
                    prompt: native.first_str(&PROMPT_FIELDS).unwrap_or_default().to_owned(),
                    response_summary: native.str("response_summary").map(str::to_owned),
                    attachments: None,
                });
            }
            PayloadKind::Tool => event.tool_event = Some(tool_payload(native, event_type)),
            PayloadKind::Session => {
                event.session = Some(if event_type == EventType::SessionStart {
                    SessionPayload::started(native.str("source").map(str::to_owned))
                } else {
                    SessionPayload::ended(native.str("reason").map(str::to_owned))
                });
            }
            PayloadKind::None => {}
        }
        Some(event)
    }
}

fn tool_payload(native: &NativeEvent, event_type: EventType) -> ToolPayload {
    let native_name = native.str("tool_name").unwrap_or(ToolPayload::UNKNOWN_TOOL);
    let mut payload = ToolPayload::named(normalize_tool_name(native_name));
    payload.tool_use_id = native.str("tool_use_id").map(str::to_owned);
    payload.input = native.first_truthy(&["tool_input", "input"]).cloned();
    payload.duration_ms = native.u64("duration_ms");

    if event_type.is_post() {
        let output = native.first_truthy(&["tool_output", "output"]);
        let outcome = infer_outcome(output);
        payload.output = output.cloned();
        payload.success = Some(outcome.success);
        payload.error_message = outcome.error_message;
    }
    payload
}
