//! End-to-end detector → adapter scenarios with git mocked out.

use std::path::Path;

use promptconduit_context::{GitCommandRunner, GitError};
use promptconduit_core::{AdapterOptions, CanonicalEvent, EventType, NativeEvent, Tool};
use serde_json::{Value, json};

use crate::detect::detect;
use crate::registry::adapter_with_runner;

/// Answers every probe as a clean repository at `/repo` on `main`.
struct RepoAtSlashRepo;

impl GitCommandRunner for RepoAtSlashRepo {
    fn run(&self, _dir: &Path, args: &[&str]) -> Result<String, GitError> {
        let out = match args {
            ["rev-parse", "--show-toplevel"] => "/repo\n",
            ["rev-parse", "HEAD"] => "0123abcd\n",
            ["branch", "--show-current"] => "main\n",
            ["status", "--porcelain"] => "",
            _ => return Err(GitError::CommandFailed(args.join(" "))),
        };
        Ok(out.to_owned())
    }
}

fn native(v: Value) -> NativeEvent {
    NativeEvent::from_value(v).expect("object")
}

/// detect + translate, the same path the hook takes.
fn run(v: Value, override_tool: Option<&str>) -> (Option<Tool>, Option<CanonicalEvent>) {
    let ev = native(v);
    let tool = detect(&ev, override_tool);
    let event = tool
        .and_then(|t| adapter_with_runner(t, RepoAtSlashRepo, AdapterOptions::default()))
        .and_then(|adapter| adapter.translate(&ev));
    (tool, event)
}

#[test]
fn prompt_submit_from_claude_code() {
    let (tool, event) = run(
        json!({"hook_event_name": "UserPromptSubmit", "session_id": "s1", "cwd": "/repo", "prompt": "hello"}),
        None,
    );
    assert_eq!(tool, Some(Tool::ClaudeCode));
    let event = event.expect("event");
    assert_eq!(event.event_type, EventType::PromptSubmit);
    assert_eq!(event.session_id.as_deref(), Some("s1"));
    assert_eq!(event.prompt.as_ref().map(|p| p.prompt.as_str()), Some("hello"));

    let git = event.git.as_ref().expect("git context");
    assert_eq!(git.commit_hash.as_deref(), Some("0123abcd"));
    assert_eq!(git.branch.as_deref(), Some("main"));
    assert_eq!(git.is_dirty, Some(false));
    assert!(git.ahead_count.is_none());

    let ws = event.workspace.as_ref().expect("workspace");
    assert_eq!(ws.repo_name.as_deref(), Some("repo"));
    assert_eq!(ws.working_directory.as_deref(), Some("/repo"));

    let back = CanonicalEvent::parse(event.serialize().expect("serialize")).expect("parse");
    assert_eq!(back, event);
}

#[test]
fn tool_post_error_response() {
    let (_, event) = run(
        json!({
            "hook_event_name": "PostToolUse",
            "tool_name": "Bash",
            "tool_response": {"is_error": true, "message": "boom"}
        }),
        None,
    );
    let tool = event.expect("event").tool_event.expect("tool payload");
    assert_eq!(tool.success, Some(false));
    assert_eq!(tool.error_message.as_deref(), Some("boom"));
}

#[test]
fn tool_post_plain_response() {
    let (_, event) = run(
        json!({
            "hook_event_name": "PostToolUse",
            "tool_name": "Bash",
            "tool_response": {"stdout": "ok"}
        }),
        None,
    );
    let tool = event.expect("event").tool_event.expect("tool payload");
    assert_eq!(tool.success, Some(true));
    assert!(tool.error_message.is_none());
}

#[test]
fn unknown_event_is_skipped_everywhere() {
    let raw = json!({"hook_event_name": "SomeUnknownEvent", "cwd": "/repo"});
    let (tool, event) = run(raw.clone(), None);
    assert_eq!(tool, None);
    assert!(event.is_none());

    for tool in Tool::SUPPORTED {
        let adapter = adapter_with_runner(tool, RepoAtSlashRepo, AdapterOptions::default())
            .expect("adapter");
        assert!(adapter.translate(&native(raw.clone())).is_none(), "{tool}");
    }
}

#[test]
fn override_routes_ambiguous_event() {
    // SessionStart belongs to Claude Code's detection set, but Gemini CLI
    // emits it too; the override decides.
    let raw = json!({"hook_event_name": "SessionStart", "source": "startup"});

    let (tool, event) = run(raw.clone(), None);
    assert_eq!(tool, Some(Tool::ClaudeCode));
    assert_eq!(event.expect("event").tool, Tool::ClaudeCode);

    let (tool, event) = run(raw, Some("gemini-cli"));
    assert_eq!(tool, Some(Tool::GeminiCli));
    let event = event.expect("event");
    assert_eq!(event.tool, Tool::GeminiCli);
    assert_eq!(event.event_type, EventType::SessionStart);
}

#[test]
fn override_to_a_tool_without_the_name_skips() {
    let (tool, event) = run(json!({"hook_event_name": "UserPromptSubmit"}), Some("cursor"));
    assert_eq!(tool, Some(Tool::Cursor));
    assert!(event.is_none());
}

#[test]
fn every_detected_name_has_a_mapping() {
    use crate::detect::{CLAUDE_CODE_EVENTS, CURSOR_EVENTS, GEMINI_EVENTS};
    for (tool, names) in [
        (Tool::ClaudeCode, CLAUDE_CODE_EVENTS),
        (Tool::Cursor, CURSOR_EVENTS),
        (Tool::GeminiCli, GEMINI_EVENTS),
    ] {
        for name in names {
            let (detected, event) = run(json!({"hook_event_name": name}), None);
            assert_eq!(detected, Some(tool), "{name}");
            let event = event.unwrap_or_else(|| panic!("{name} should translate"));
            assert!(event.validate().is_ok(), "{name}");
        }
    }
}
