//! Workspace identity resolved from the native event's fields.

use std::path::Path;

use promptconduit_core::{NativeEvent, WorkspaceContext};
use promptconduit_core::native::str_in;
use serde_json::Value;

use crate::executor::GitCommandRunner;
use crate::git::last_segment;

/// Top-level fields that may carry the working directory, in priority order.
const CWD_FIELDS: [&str; 2] = ["cwd", "workingDirectory"];

/// Fields of the nested `context` object that may carry it.
const CONTEXT_CWD_FIELDS: [&str; 3] = ["workingDirectory", "cwd", "working_directory"];

/// Working directory from the event, checking top-level fields before the
/// nested `context` object.
pub fn resolve_working_dir(native: &NativeEvent) -> Option<String> {
    if let Some(dir) = native.first_str(&CWD_FIELDS) {
        return Some(dir.to_owned());
    }
    let context = native.object("context")?;
    CONTEXT_CWD_FIELDS
        .iter()
        .find_map(|k| str_in(context, k))
        .map(str::to_owned)
}

/// Build the workspace context for an event.
///
/// `None` when the event has neither a working directory nor a non-empty
/// `context` object, or when nothing useful could be derived.
pub fn extract_workspace<R: GitCommandRunner + ?Sized>(
    runner: &R,
    native: &NativeEvent,
) -> Option<WorkspaceContext> {
    let working_directory = resolve_working_dir(native);
    let context = native.object("context").filter(|c| !c.is_empty());
    if working_directory.is_none() && context.is_none() {
        return None;
    }

    let mut repo_name = context.and_then(|c| str_in(c, "repoName")).map(str::to_owned);
    let mut repo_path = context.and_then(|c| str_in(c, "repoPath")).map(str::to_owned);

    if repo_name.is_none() {
        if let Some(path) = &repo_path {
            repo_name = last_segment(path);
        } else if let Some(dir) = &working_directory {
            if let Some(top) = toplevel(runner, dir) {
                repo_name = last_segment(&top);
                repo_path = Some(top);
            }
        }
    }

    let files_referenced = context
        .and_then(|c| c.get("filesReferenced"))
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_owned)
                .collect()
        });

    let workspace = WorkspaceContext {
        repo_name,
        repo_path,
        working_directory,
        files_referenced,
    };
    (!workspace.is_empty()).then_some(workspace)
}

fn toplevel<R: GitCommandRunner + ?Sized>(runner: &R, dir: &str) -> Option<String> {
    match runner.run(Path::new(dir), &["rev-parse", "--show-toplevel"]) {
        Ok(out) => Some(out.trim().to_owned()).filter(|s| !s.is_empty()),
        Err(e) => {
            tracing::debug!(dir, error = %e, "repository top-level lookup failed");
            None
        }
    }
}
