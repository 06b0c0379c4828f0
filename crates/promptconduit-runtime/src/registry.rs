//! Adapter registry: one [`HookAdapter`] per supported tool.

use promptconduit_context::{GitCommandRunner, GitExecutor};
use promptconduit_core::{AdapterOptions, CanonicalEvent, HookAdapter, NativeEvent, Tool};
use promptconduit_source_claude_code::ClaudeCodeAdapter;
use promptconduit_source_cursor::CursorAdapter;
use promptconduit_source_gemini::GeminiAdapter;

/// Adapter for `tool` backed by the real git executor. `None` for
/// [`Tool::Other`].
pub fn adapter_for(tool: Tool, options: AdapterOptions) -> Option<Box<dyn HookAdapter>> {
    adapter_with_runner(tool, GitExecutor::default(), options)
}

pub fn adapter_with_runner<R>(
    tool: Tool,
    runner: R,
    options: AdapterOptions,
) -> Option<Box<dyn HookAdapter>>
where
    R: GitCommandRunner + 'static,
{
    match tool {
        Tool::ClaudeCode => Some(Box::new(ClaudeCodeAdapter::with_runner(runner, options))),
        Tool::Cursor => Some(Box::new(CursorAdapter::with_runner(runner, options))),
        Tool::GeminiCli => Some(Box::new(GeminiAdapter::with_runner(runner, options))),
        Tool::Other => None,
    }
}

/// Translate `native` with the adapter owning `tool`. `None` means skip.
pub fn translate(tool: Tool, native: &NativeEvent, options: AdapterOptions) -> Option<CanonicalEvent> {
    let adapter = adapter_for(tool, options)?;
    adapter.translate(native)
}
