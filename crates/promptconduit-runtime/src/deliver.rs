//! Event delivery: the detached worker hand-off and the blocking send it runs.

use std::process::Stdio;

use anyhow::Context;
use serde_json::Value;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::process::{Child, Command};

use crate::cli::{ENV_API_KEY, ENV_API_URL, ENV_TIMEOUT};
use crate::client::{ApiClient, ApiResponse};
use crate::config::Config;

/// Hand `json` to a detached `send-event` worker and return without waiting.
///
/// When no worker can be started the event is sent inline instead. Either
/// way the transport outcome is swallowed.
pub async fn deliver_detached(json: &str, config: &Config) {
    let mut child = match spawn_worker(config) {
        Ok(child) => child,
        Err(e) => {
            tracing::debug!(error = %e, "detached worker unavailable, sending inline");
            let resp = send_blocking(json, config).await;
            if !resp.success {
                tracing::debug!(error = ?resp.error, "inline send failed");
            }
            return;
        }
    };

    if let Some(mut stdin) = child.stdin.take() {
        if let Err(e) = stdin.write_all(json.as_bytes()).await {
            tracing::debug!(error = %e, "failed to hand event to worker");
        }
        // Dropping stdin closes the pipe so the worker sees EOF.
    }
    tracing::debug!(pid = ?child.id(), "event handed to detached worker");
}

fn spawn_worker(config: &Config) -> anyhow::Result<Child> {
    let exe = std::env::current_exe().context("current executable path")?;
    let child = Command::new(exe)
        .arg("send-event")
        .env(ENV_API_KEY, &config.api_key)
        .env(ENV_API_URL, &config.api_url)
        .env(ENV_TIMEOUT, config.timeout_secs.to_string())
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .context("spawn send-event worker")?;
    Ok(child)
}

/// Parse `json` and POST it, waiting for the response. A JSON array is
/// sent as one batch.
pub async fn send_blocking(json: &str, config: &Config) -> ApiResponse {
    let event: Value = match serde_json::from_str(json) {
        Ok(v) => v,
        Err(e) => {
            return ApiResponse {
                success: false,
                status_code: 0,
                data: None,
                error: Some(format!("invalid event json: {e}")),
            };
        }
    };
    match ApiClient::new(config) {
        Ok(client) => match &event {
            Value::Array(events) => client.send_events_batch(events).await,
            single => client.send_event(single).await,
        },
        Err(e) => ApiResponse {
            success: false,
            status_code: 0,
            data: None,
            error: Some(format!("http client: {e}")),
        },
    }
}

/// `send-event`: the worker side of [`deliver_detached`].
pub async fn cmd_send_event(config: &Config) -> anyhow::Result<()> {
    let mut input = String::new();
    tokio::io::stdin()
        .read_to_string(&mut input)
        .await
        .context("read event from stdin")?;

    let resp = send_blocking(&input, config).await;
    if !resp.success {
        let error = resp.error.unwrap_or_default();
        tracing::warn!(status = resp.status_code, error = %error, "event delivery failed");
        anyhow::bail!("event delivery failed: {error}");
    }
    tracing::debug!(status = resp.status_code, "event delivered");
    Ok(())
}
