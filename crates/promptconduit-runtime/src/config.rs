//! Effective configuration: CLI flags and environment (via clap), then the
//! JSON config file, then defaults.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use promptconduit_core::AdapterOptions;
use serde::Deserialize;

use crate::cli::GlobalOpts;

pub const DEFAULT_API_URL: &str = "https://api.promptconduit.dev";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

const CONFIG_DIR_NAME: &str = ".promptconduit";
const CONFIG_FILE_NAME: &str = "config.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub api_key: String,
    pub api_url: String,
    pub debug: bool,
    pub timeout_secs: u64,
    /// Forced tool override, passed to detection untouched.
    pub tool_override: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            api_url: DEFAULT_API_URL.to_owned(),
            debug: false,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            tool_override: None,
        }
    }
}

/// One environment's settings in the config file. Also the legacy flat layout.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct FileSettings {
    pub api_key: Option<String>,
    pub api_url: Option<String>,
    pub debug: Option<bool>,
    pub timeout_seconds: Option<u64>,
}

/// On-disk `~/.promptconduit/config.json`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct FileConfig {
    pub current_env: Option<String>,
    pub environments: HashMap<String, FileSettings>,
    #[serde(flatten)]
    pub legacy: FileSettings,
}

impl FileConfig {
    /// Settings of the active environment, else the legacy flat keys.
    pub fn current(&self) -> &FileSettings {
        self.current_env
            .as_deref()
            .and_then(|name| self.environments.get(name))
            .unwrap_or(&self.legacy)
    }

    /// Read and parse the file. A missing or malformed file yields `None`.
    pub fn load(path: &Path) -> Option<Self> {
        let data = match std::fs::read_to_string(path) {
            Ok(data) => data,
            Err(e) => {
                if e.kind() != std::io::ErrorKind::NotFound {
                    tracing::debug!(path = %path.display(), error = %e, "config file unreadable");
                }
                return None;
            }
        };
        match serde_json::from_str(&data) {
            Ok(cfg) => Some(cfg),
            Err(e) => {
                tracing::debug!(path = %path.display(), error = %e, "config file malformed, ignoring");
                None
            }
        }
    }
}

/// `~/.promptconduit/config.json`, if a home directory is known.
pub fn config_path() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .filter(|h| !h.is_empty())
        .map(|home| PathBuf::from(home).join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}

impl Config {
    /// Resolve from CLI/env options plus the default config file.
    pub fn load(opts: &GlobalOpts) -> Self {
        let file = config_path().and_then(|p| FileConfig::load(&p));
        Self::resolve(opts, file.as_ref())
    }

    /// Layer `opts` over `file` over defaults.
    pub fn resolve(opts: &GlobalOpts, file: Option<&FileConfig>) -> Self {
        let from_file = file.map(FileConfig::current).cloned().unwrap_or_default();

        let api_key = non_empty(opts.api_key.as_deref())
            .or(non_empty(from_file.api_key.as_deref()))
            .unwrap_or_default()
            .to_owned();
        let api_url = non_empty(opts.api_url.as_deref())
            .or(non_empty(from_file.api_url.as_deref()))
            .unwrap_or(DEFAULT_API_URL)
            .trim_end_matches('/')
            .to_owned();
        let debug = match opts.debug.as_deref() {
            Some(v) => parse_flag(v),
            None => from_file.debug.unwrap_or(false),
        };
        let timeout_secs = opts
            .timeout_secs
            .as_deref()
            .and_then(|v| v.trim().parse::<u64>().ok())
            .or(from_file.timeout_seconds)
            .filter(|&s| s > 0)
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        Self {
            api_key,
            api_url,
            debug,
            timeout_secs,
            tool_override: non_empty(opts.tool.as_deref()).map(str::to_owned),
        }
    }

    pub fn is_configured(&self) -> bool {
        !self.api_key.is_empty()
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn adapter_options(&self) -> AdapterOptions {
        AdapterOptions::new(self.debug)
    }
}

/// `first4…last4`, or `****` for keys too short to reveal anything.
pub fn mask_api_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() <= 8 {
        return "****".to_owned();
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{head}...{tail}")
}

fn parse_flag(value: &str) -> bool {
    matches!(value.trim().to_ascii_lowercase().as_str(), "1" | "true")
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}
