//! Shared envelope fields every adapter stamps onto its events.

use std::path::Path;

use promptconduit_core::{AdapterOptions, CanonicalEvent, EventType, NativeEvent, Tool};

use crate::executor::{GitCommandRunner, GitExecutor};
use crate::git::extract_git;
use crate::workspace::{extract_workspace, resolve_working_dir};

/// Context probes plus the configuration every adapter needs.
#[derive(Debug, Clone, Default)]
pub struct EventContext<R = GitExecutor> {
    runner: R,
    options: AdapterOptions,
}

impl EventContext<GitExecutor> {
    pub fn new(options: AdapterOptions) -> Self {
        Self::with_runner(GitExecutor::default(), options)
    }
}

impl<R: GitCommandRunner> EventContext<R> {
    pub fn with_runner(runner: R, options: AdapterOptions) -> Self {
        Self { runner, options }
    }

    pub fn options(&self) -> &AdapterOptions {
        &self.options
    }

    /// Envelope with identity, session, workspace, git and raw-event fields
    /// filled. Payload slots are left for the adapter.
    pub fn base_event(
        &self,
        tool: Tool,
        event_type: EventType,
        native: &NativeEvent,
        native_name: &str,
    ) -> CanonicalEvent {
        let mut event = CanonicalEvent::new(tool, event_type, self.options.adapter_version.clone());
        event.session_id = native.str("session_id").map(str::to_owned);
        event.workspace = extract_workspace(&self.runner, native);
        event.git = resolve_working_dir(native)
            .and_then(|dir| extract_git(&self.runner, Path::new(&dir)));
        event.raw_event_type = Some(native_name.to_owned());
        if self.options.include_raw_event {
            event.raw_event = Some(native.to_value());
        }
        event
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GitError;
    use serde_json::json;

    struct NotARepo;

    impl GitCommandRunner for NotARepo {
        fn run(&self, _dir: &Path, _args: &[&str]) -> Result<String, GitError> {
            Err(GitError::CommandFailed("fatal: not a git repository".into()))
        }
    }

    fn native() -> NativeEvent {
        NativeEvent::from_value(json!({
            "hook_event_name": "Stop",
            "session_id": "abc",
            "cwd": "/tmp/project"
        }))
        .expect("object")
    }

    #[test]
    fn base_fields() {
        let ctx = EventContext::with_runner(NotARepo, AdapterOptions::default());
        let ev = ctx.base_event(Tool::ClaudeCode, EventType::AgentResponse, &native(), "Stop");
        assert_eq!(ev.tool, Tool::ClaudeCode);
        assert_eq!(ev.session_id.as_deref(), Some("abc"));
        assert_eq!(ev.raw_event_type.as_deref(), Some("Stop"));
        assert_eq!(ev.adapter_version, env!("CARGO_PKG_VERSION"));
        assert!(ev.git.is_none());
        assert!(ev.raw_event.is_none());
        let ws = ev.workspace.expect("workspace");
        assert_eq!(ws.working_directory.as_deref(), Some("/tmp/project"));
        assert!(ev.prompt.is_none() && ev.tool_event.is_none() && ev.session.is_none());
    }

    #[test]
    fn raw_event_only_in_debug() {
        let ctx = EventContext::with_runner(NotARepo, AdapterOptions::new(true));
        let ev = ctx.base_event(Tool::Cursor, EventType::AgentResponse, &native(), "Stop");
        assert_eq!(ev.raw_event, Some(native().to_value()));
    }

    #[test]
    fn fresh_identity_per_event() {
        let ctx = EventContext::with_runner(NotARepo, AdapterOptions::default());
        let a = ctx.base_event(Tool::Cursor, EventType::AgentResponse, &native(), "stop");
        let b = ctx.base_event(Tool::Cursor, EventType::AgentResponse, &native(), "stop");
        assert_ne!(a.event_id, b.event_id);
    }
}
