//! promptconduit-context: workspace and repository context IO boundary.
//! Runs timeout-bounded read-only git probes and derives the workspace and
//! git snapshots attached to every canonical event. Probe failures degrade
//! to absent fields; nothing here returns an error to the adapters.

pub mod envelope;
pub mod error;
pub mod executor;
pub mod git;
pub mod workspace;

pub use envelope::EventContext;
pub use error::GitError;
pub use executor::{GIT_TIMEOUT, GitCommandRunner, GitExecutor};
pub use git::{StatusCounts, classify_status, extract_git, parse_ahead_behind};
pub use workspace::{extract_workspace, resolve_working_dir};
