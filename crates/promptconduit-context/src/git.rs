//! Repository snapshot built from independent read-only git probes.

use std::path::Path;

use promptconduit_core::GitContext;

use crate::executor::GitCommandRunner;

/// Per-entry counts from `git status --porcelain`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusCounts {
    pub staged: u32,
    pub unstaged: u32,
    pub untracked: u32,
    /// At least one status line was present.
    pub dirty: bool,
}

/// Snapshot the repository containing `dir`.
///
/// Returns `None` when the top-level probe fails or `dir` does not exist.
/// Every other probe is independent: a failure leaves only its own fields
/// unset.
pub fn extract_git<R: GitCommandRunner + ?Sized>(runner: &R, dir: &Path) -> Option<GitContext> {
    if dir.as_os_str().is_empty() {
        return None;
    }
    let top = probe(runner, dir, &["rev-parse", "--show-toplevel"])?;
    if top.is_empty() {
        return None;
    }

    let mut ctx = GitContext {
        commit_hash: probe_nonempty(runner, dir, &["rev-parse", "HEAD"]),
        commit_message: probe_nonempty(runner, dir, &["log", "-1", "--format=%s"]),
        commit_author: probe_nonempty(runner, dir, &["log", "-1", "--format=%an"]),
        commit_timestamp: probe_nonempty(runner, dir, &["log", "-1", "--format=%cI"]),
        remote_url: probe_nonempty(runner, dir, &["remote", "get-url", "origin"]),
        upstream_branch: probe_nonempty(
            runner,
            dir,
            &["rev-parse", "--abbrev-ref", "--symbolic-full-name", "@{upstream}"],
        ),
        ..GitContext::default()
    };

    if let Some(branch) = probe(runner, dir, &["branch", "--show-current"]) {
        ctx.is_detached_head = Some(branch.is_empty());
        ctx.branch = Some(branch).filter(|b| !b.is_empty());
    }

    if let Some(status) = probe_raw(runner, dir, &["status", "--porcelain"]) {
        let counts = classify_status(&status);
        ctx.is_dirty = Some(counts.dirty);
        ctx.staged_count = Some(counts.staged);
        ctx.unstaged_count = Some(counts.unstaged);
        ctx.untracked_count = Some(counts.untracked);
    }

    if let Some((ahead, behind)) = probe(
        runner,
        dir,
        &["rev-list", "--left-right", "--count", "@{upstream}...HEAD"],
    )
    .as_deref()
    .and_then(parse_ahead_behind)
    {
        ctx.ahead_count = Some(ahead);
        ctx.behind_count = Some(behind);
    }

    Some(ctx)
}

/// Classify porcelain status lines by their two-character code.
///
/// Index `?` is untracked; any other non-blank index character is staged;
/// a worktree character outside `{' ', '?'}` is unstaged. One entry can
/// count as both staged and unstaged.
pub fn classify_status(output: &str) -> StatusCounts {
    let mut counts = StatusCounts::default();
    for line in output.lines() {
        if line.trim().is_empty() {
            continue;
        }
        counts.dirty = true;
        let mut code = line.chars();
        let (Some(index), Some(worktree)) = (code.next(), code.next()) else {
            continue;
        };
        if index == '?' {
            counts.untracked += 1;
            continue;
        }
        if index != ' ' {
            counts.staged += 1;
        }
        if worktree != ' ' && worktree != '?' {
            counts.unstaged += 1;
        }
    }
    counts
}

/// Parse `git rev-list --left-right --count @{upstream}...HEAD`, which
/// prints `<behind>\t<ahead>`. Returns `(ahead, behind)`.
pub fn parse_ahead_behind(output: &str) -> Option<(u32, u32)> {
    let mut parts = output.split_whitespace();
    let behind = parts.next()?.parse().ok()?;
    let ahead = parts.next()?.parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some((ahead, behind))
}

/// Last path segment of `path`, ignoring trailing separators.
pub fn last_segment(path: &str) -> Option<String> {
    Path::new(path.trim_end_matches(['/', '\\']))
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .filter(|n| !n.is_empty())
}

fn probe_raw<R: GitCommandRunner + ?Sized>(runner: &R, dir: &Path, args: &[&str]) -> Option<String> {
    match runner.run(dir, args) {
        Ok(out) => Some(out),
        Err(e) => {
            tracing::debug!(?args, dir = %dir.display(), error = %e, "git probe failed");
            None
        }
    }
}

fn probe<R: GitCommandRunner + ?Sized>(runner: &R, dir: &Path, args: &[&str]) -> Option<String> {
    probe_raw(runner, dir, args).map(|s| s.trim().to_owned())
}

fn probe_nonempty<R: GitCommandRunner + ?Sized>(
    runner: &R,
    dir: &Path,
    args: &[&str],
) -> Option<String> {
    probe(runner, dir, args).filter(|s| !s.is_empty())
}
