//! `status`: show the effective configuration.

use std::fmt::Write as _;

use promptconduit_core::Tool;

use crate::config::{Config, config_path, mask_api_key};

pub fn cmd_status(config: &Config) {
    print!("{}", render_status(config));
}

pub fn render_status(config: &Config) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "promptconduit v{}", env!("CARGO_PKG_VERSION"));
    let _ = writeln!(out);
    if config.is_configured() {
        let _ = writeln!(out, "API key:  {} (configured)", mask_api_key(&config.api_key));
    } else {
        let _ = writeln!(out, "API key:  not configured");
    }
    let _ = writeln!(out, "API URL:  {}", config.api_url);
    let _ = writeln!(out, "Debug:    {}", config.debug);
    let _ = writeln!(out, "Timeout:  {}s", config.timeout_secs);
    if let Some(tool) = &config.tool_override {
        let _ = writeln!(out, "Tool:     {} (forced)", Tool::from_override(tool));
    }
    if let Some(path) = config_path() {
        let _ = writeln!(out, "Config:   {}", path.display());
    }
    let supported: Vec<&str> = Tool::SUPPORTED.iter().map(|t| t.as_str()).collect();
    let _ = writeln!(out, "Adapters: {}", supported.join(", "));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn masks_key_and_lists_adapters() {
        let config = Config {
            api_key: "sk_live_abcdefghijkl".into(),
            tool_override: Some("gemini".into()),
            ..Config::default()
        };
        let text = render_status(&config);
        assert!(text.contains("sk_l...ijkl (configured)"));
        assert!(!text.contains("sk_live_abcdefghijkl"));
        assert!(text.contains("API URL:  https://api.promptconduit.dev"));
        assert!(text.contains("Tool:     gemini-cli (forced)"));
        assert!(text.contains("Adapters: claude-code, cursor, gemini-cli"));
    }

    #[test]
    fn unconfigured() {
        let text = render_status(&Config::default());
        assert!(text.contains("API key:  not configured"));
        assert!(!text.contains("Tool:"));
    }
}
