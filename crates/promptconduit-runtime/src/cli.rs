//! CLI definition using clap derive.

use clap::{Args, Parser, Subcommand};

pub const ENV_API_KEY: &str = "PROMPTCONDUIT_API_KEY";
pub const ENV_API_URL: &str = "PROMPTCONDUIT_API_URL";
pub const ENV_DEBUG: &str = "PROMPTCONDUIT_DEBUG";
pub const ENV_TIMEOUT: &str = "PROMPTCONDUIT_TIMEOUT";
pub const ENV_TOOL: &str = "PROMPTCONDUIT_TOOL";

#[derive(Parser, Debug)]
#[command(
    name = "promptconduit",
    version,
    about = "Normalize AI coding assistant hook events and forward them to PromptConduit"
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    /// Defaults to `hook` when omitted, which is how tool hooks invoke us.
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Settings shared by every subcommand. Each can come from the environment.
///
/// Timeout and debug are taken as raw strings so a malformed environment
/// value degrades to the default instead of failing argument parsing.
#[derive(Args, Debug, Default, Clone)]
pub struct GlobalOpts {
    /// API key (Bearer token)
    #[arg(long, global = true, env = ENV_API_KEY, hide_env_values = true)]
    pub api_key: Option<String>,

    /// API base URL
    #[arg(long, global = true, env = ENV_API_URL)]
    pub api_url: Option<String>,

    /// Include the raw native event in every canonical event ("1" or "true")
    #[arg(long, global = true, env = ENV_DEBUG, num_args = 0..=1, default_missing_value = "true")]
    pub debug: Option<String>,

    /// HTTP request timeout in seconds
    #[arg(long, global = true, env = ENV_TIMEOUT)]
    pub timeout_secs: Option<String>,

    /// Force routing to one adapter (claude-code, cursor, gemini-cli)
    #[arg(long, global = true, env = ENV_TOOL)]
    pub tool: Option<String>,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Process one native hook event from stdin (used by tool hooks)
    Hook,
    /// Send one canonical event from stdin and wait for the result (internal)
    #[command(hide = true)]
    SendEvent,
    /// Print the canonical event for a native event on stdin without sending it
    Translate,
    /// Send a synthetic session_start event to verify connectivity
    Test,
    /// Show the effective configuration
    Status,
}
