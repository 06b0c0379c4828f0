//! Error types for the git probe boundary.

use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GitError {
    #[error("git command failed: {0}")]
    CommandFailed(String),

    #[error("git {args} timed out after {timeout:?}")]
    Timeout { args: String, timeout: Duration },

    #[error("git io error: {0}")]
    Io(#[from] std::io::Error),
}
