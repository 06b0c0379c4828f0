//! Dispatch entry point: native event on stdin → detector → adapter → worker.

use anyhow::Context;
use promptconduit_core::{AdapterOptions, CanonicalEvent, NativeEvent};
use tokio::io::AsyncReadExt;

use crate::config::Config;
use crate::deliver::deliver_detached;
use crate::detect::detect;
use crate::registry;

/// The only thing a hook ever writes to stdout.
pub const CONTINUE_RESPONSE: &str = r#"{"continue":true}"#;

pub fn print_continue() {
    println!("{CONTINUE_RESPONSE}");
}

/// Detect and translate one native event. `None` means skip: the input is
/// not a JSON object, no tool matched, or the adapter has no mapping.
pub fn process(
    input: &str,
    override_tool: Option<&str>,
    options: AdapterOptions,
) -> Option<CanonicalEvent> {
    let value: serde_json::Value = match serde_json::from_str(input) {
        Ok(v) => v,
        Err(e) => {
            tracing::debug!(error = %e, "hook input is not json, skipping");
            return None;
        }
    };
    let Some(native) = NativeEvent::from_value(value) else {
        tracing::debug!("hook input is not a json object, skipping");
        return None;
    };

    let Some(tool) = detect(&native, override_tool) else {
        tracing::debug!(event = ?native.event_name(), "no tool recognised, skipping");
        return None;
    };
    let event = registry::translate(tool, &native, options);
    if event.is_none() {
        tracing::debug!(%tool, event = ?native.event_name(), "no canonical mapping, skipping");
    }
    event
}

/// `hook`: never fails and always answers `{"continue":true}`.
pub async fn cmd_hook(config: &Config) {
    if let Err(e) = run_hook(config).await {
        tracing::debug!(error = %e, "hook failed");
    }
    print_continue();
}

async fn run_hook(config: &Config) -> anyhow::Result<()> {
    let input = read_stdin().await?;
    if input.trim().is_empty() {
        tracing::debug!("empty hook input, skipping");
        return Ok(());
    }
    if !config.is_configured() {
        tracing::debug!("api key not configured, skipping");
        return Ok(());
    }

    let Some(event) = translate_blocking(input, config).await? else {
        return Ok(());
    };
    let json = event.to_json_string()?;
    deliver_detached(&json, config).await;
    Ok(())
}

/// `translate`: print the canonical event for a native event without sending it.
pub async fn cmd_translate(config: &Config) -> anyhow::Result<()> {
    let input = read_stdin().await?;
    if let Some(event) = translate_blocking(input, config).await? {
        let value = event.serialize()?;
        println!("{}", serde_json::to_string_pretty(&value)?);
    }
    Ok(())
}

/// Git probes block, so translation runs off the async workers.
async fn translate_blocking(input: String, config: &Config) -> anyhow::Result<Option<CanonicalEvent>> {
    let override_tool = config.tool_override.clone();
    let options = config.adapter_options();
    let event = tokio::task::spawn_blocking(move || {
        process(&input, override_tool.as_deref(), options)
    })
    .await
    .context("translation task panicked")?;
    Ok(event)
}

async fn read_stdin() -> anyhow::Result<String> {
    let mut input = String::new();
    tokio::io::stdin()
        .read_to_string(&mut input)
        .await
        .context("read stdin")?;
    Ok(input)
}
