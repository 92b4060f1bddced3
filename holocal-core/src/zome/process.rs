//! Conductor bridge subprocess transport.
//!
//! Each zome call spawns the configured bridge binary (for example
//! `holocal-conductor-local`), writes one JSON [`ZomeCall`] line to its stdin
//! and reads one JSON [`Response`] from its stdout. Any executable that
//! speaks this protocol can stand in for a conductor.

use std::path::PathBuf;
use std::process::Stdio;

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tokio::process::Command as TokioCommand;
use tracing::debug;

use crate::error::{CalendarError, CalendarResult};
use crate::zome::protocol::Response;
use crate::zome::{ZomeCall, ZomeTransport};

#[derive(Debug, Clone)]
pub struct ProcessTransport {
    binary: String,
}

impl ProcessTransport {
    pub fn new(binary: impl Into<String>) -> Self {
        ProcessTransport {
            binary: binary.into(),
        }
    }

    fn binary_path(&self) -> CalendarResult<PathBuf> {
        which::which(&self.binary).map_err(|_| {
            CalendarError::Transport(format!(
                "Conductor bridge '{}' not found in PATH",
                self.binary
            ))
        })
    }
}

#[async_trait]
impl ZomeTransport for ProcessTransport {
    async fn call_zome(&self, call: ZomeCall) -> CalendarResult<serde_json::Value> {
        let request_json = serde_json::to_string(&call)
            .map_err(|e| CalendarError::Serialization(e.to_string()))?;

        let binary_path = self.binary_path()?;
        debug!(binary = %binary_path.display(), fn_name = %call.fn_name, "spawning conductor bridge");

        let mut child = TokioCommand::new(&binary_path)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|e| {
                CalendarError::Transport(format!(
                    "Failed to spawn {}: {}",
                    binary_path.display(),
                    e
                ))
            })?;

        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| CalendarError::Transport("Bridge stdin unavailable".into()))?;
        stdin
            .write_all(format!("{request_json}\n").as_bytes())
            .await
            .map_err(|e| CalendarError::Transport(format!("Failed to write request: {e}")))?;
        drop(stdin);

        let output = child
            .wait_with_output()
            .await
            .map_err(|e| CalendarError::Transport(format!("Bridge did not complete: {e}")))?;

        if !output.status.success() {
            return Err(CalendarError::Transport(format!(
                "Bridge exited with status: {}",
                output.status.code().unwrap_or(-1)
            )));
        }

        let response_str = String::from_utf8_lossy(&output.stdout);
        if response_str.trim().is_empty() {
            return Err(CalendarError::Transport("Bridge returned no response".into()));
        }

        let response: Response<serde_json::Value> = serde_json::from_str(response_str.trim())
            .map_err(|e| CalendarError::Transport(format!("Failed to parse response: {e}")))?;

        match response {
            Response::Success { data } => Ok(data),
            Response::Error { error } => Err(CalendarError::Transport(error)),
        }
    }
}
