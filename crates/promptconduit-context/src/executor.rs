//! GitCommandRunner trait and GitExecutor (timeout-bounded sync subprocess).

use std::io::Read;
use std::path::Path;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use crate::error::GitError;

/// Upper bound for a single read-only repository query.
pub const GIT_TIMEOUT: Duration = Duration::from_secs(2);

const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Trait for executing git commands in a directory. Enables mock injection for testing.
///
/// Implementations return raw stdout on a zero exit status.
pub trait GitCommandRunner: Send + Sync {
    fn run(&self, dir: &Path, args: &[&str]) -> Result<String, GitError>;
}

impl<T: GitCommandRunner + ?Sized> GitCommandRunner for &T {
    fn run(&self, dir: &Path, args: &[&str]) -> Result<String, GitError> {
        (**self).run(dir, args)
    }
}

/// Real git executor using `std::process::Command`.
#[derive(Debug, Clone)]
pub struct GitExecutor {
    git_bin: String,
    timeout: Duration,
}

impl GitExecutor {
    pub fn new(git_bin: impl Into<String>) -> Self {
        Self {
            git_bin: git_bin.into(),
            timeout: GIT_TIMEOUT,
        }
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for GitExecutor {
    fn default() -> Self {
        Self::new("git")
    }
}

impl GitCommandRunner for GitExecutor {
    fn run(&self, dir: &Path, args: &[&str]) -> Result<String, GitError> {
        let mut child = Command::new(&self.git_bin)
            .args(args)
            .current_dir(dir)
            .env("GIT_OPTIONAL_LOCKS", "0")
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()?;

        // Drain stdout off-thread so a full pipe cannot stall the child.
        let (tx, rx) = mpsc::channel();
        if let Some(mut stdout) = child.stdout.take() {
            thread::spawn(move || {
                let mut buf = Vec::new();
                let _ = stdout.read_to_end(&mut buf);
                let _ = tx.send(buf);
            });
        }

        let status = match wait_with_timeout(&mut child, self.timeout)? {
            Some(status) => status,
            None => {
                return Err(GitError::Timeout {
                    args: args.join(" "),
                    timeout: self.timeout,
                });
            }
        };

        if !status.success() {
            return Err(GitError::CommandFailed(format!(
                "git {}: exit code {}",
                args.join(" "),
                status.code().unwrap_or(-1)
            )));
        }

        let stdout = rx.recv_timeout(self.timeout).unwrap_or_default();
        Ok(String::from_utf8_lossy(&stdout).into_owned())
    }
}

/// Poll a child until it exits or the deadline passes. On timeout the child
/// is killed and reaped and `None` is returned.
fn wait_with_timeout(child: &mut Child, timeout: Duration) -> Result<Option<ExitStatus>, GitError> {
    let deadline = Instant::now() + timeout;
    loop {
        if let Some(status) = child.try_wait()? {
            return Ok(Some(status));
        }
        if Instant::now() >= deadline {
            let _ = child.kill();
            let _ = child.wait();
            return Ok(None);
        }
        thread::sleep(POLL_INTERVAL);
    }
}
