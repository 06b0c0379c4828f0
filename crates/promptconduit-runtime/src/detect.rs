//! Tool detection: decide which adapter owns a native event.

use promptconduit_core::native::is_truthy;
use promptconduit_core::{NativeEvent, Tool};

/// Field only Cursor puts on its hook payloads. Only a truthy value counts.
pub const CURSOR_MARKER: &str = "cursor_version";

pub const CLAUDE_CODE_EVENTS: &[&str] = &[
    "UserPromptSubmit",
    "PreToolUse",
    "PostToolUse",
    "SessionStart",
    "SessionEnd",
    "Stop",
    "SubagentStop",
    "PermissionRequest",
    "Notification",
    "PreCompact",
];

pub const CURSOR_EVENTS: &[&str] = &[
    "beforeSubmitPrompt",
    "beforeShellExecution",
    "afterShellExecution",
    "beforeMCPExecution",
    "afterMCPExecution",
    "beforeReadFile",
    "afterFileEdit",
    "afterAgentResponse",
    "afterAgentThought",
    "stop",
    "beforeTabFileRead",
    "afterTabFileEdit",
];

/// Gemini names that Claude Code does not also use. Gemini's
/// `SessionStart`, `SessionEnd` and `Notification` need the override.
pub const GEMINI_EVENTS: &[&str] = &[
    "BeforeAgent",
    "AfterAgent",
    "BeforeModel",
    "AfterModel",
    "BeforeTool",
    "AfterTool",
    "BeforeToolSelection",
    "PreCompress",
];

/// Name sets in the order they are checked.
const DETECTION_ORDER: [(Tool, &[&str]); 3] = [
    (Tool::Cursor, CURSOR_EVENTS),
    (Tool::GeminiCli, GEMINI_EVENTS),
    (Tool::ClaudeCode, CLAUDE_CODE_EVENTS),
];

/// Decide which tool emitted `native`.
///
/// A non-blank `override_tool` wins unconditionally (an unrecognised value
/// becomes [`Tool::Other`], which no adapter owns). Otherwise an absent or
/// empty event name fails, the Cursor marker short-circuits, and the name
/// sets are checked Cursor, Gemini, Claude Code. `None` means "skip".
pub fn detect(native: &NativeEvent, override_tool: Option<&str>) -> Option<Tool> {
    if let Some(forced) = override_tool.map(str::trim).filter(|s| !s.is_empty()) {
        return Some(Tool::from_override(forced));
    }

    let name = native.event_name()?;
    if native.get(CURSOR_MARKER).is_some_and(is_truthy) {
        return Some(Tool::Cursor);
    }

    DETECTION_ORDER
        .iter()
        .find(|(_, names)| names.contains(&name))
        .map(|(tool, _)| *tool)
}
