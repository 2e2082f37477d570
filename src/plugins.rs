//! Built-in plugins available to configuration-driven runs.

use async_trait::async_trait;
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::{debug, error};

use crate::contract::{Plugin, PluginFailure};

/// Returns the buffer unchanged.
#[derive(Debug, Default, Clone, Copy)]
pub struct IdentityPlugin;

#[async_trait]
impl Plugin for IdentityPlugin {
    async fn transform(&self, data: Vec<u8>) -> Result<Vec<u8>, PluginFailure> {
        Ok(data)
    }
}

/// Pipes the buffer through an external program: bytes go to its stdin and its
/// stdout becomes the new content.
#[derive(Debug, Clone)]
pub struct CommandPlugin {
    program: String,
    args: Vec<String>,
}

impl CommandPlugin {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }
}

#[async_trait]
impl Plugin for CommandPlugin {
    async fn transform(&self, data: Vec<u8>) -> Result<Vec<u8>, PluginFailure> {
        debug!(program = %self.program, args = ?self.args, size = data.len(), "Spawning plugin command");
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                error!(program = %self.program, error = ?e, "Failed to launch plugin command");
                format!("failed to launch `{}`: {e}", self.program)
            })?;

        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| format!("`{}` has no stdin", self.program))?;
        let feed = async move {
            stdin.write_all(&data).await?;
            stdin.shutdown().await
        };

        // Feed stdin while draining stdout so large buffers cannot deadlock the pipe.
        let (fed, output) = tokio::join!(feed, child.wait_with_output());
        let output = output?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            error!(program = %self.program, status = %output.status, stderr = %stderr.trim(), "Plugin command failed");
            return Err(format!("`{}` exited with {}: {}", self.program, output.status, stderr.trim()).into());
        }
        match fed {
            // The program may legitimately stop reading once it has what it needs.
            Err(e) if e.kind() != std::io::ErrorKind::BrokenPipe => {
                error!(program = %self.program, error = ?e, "Failed to feed plugin command");
                Err(format!("failed to feed `{}`: {e}", self.program).into())
            }
            _ => Ok(output.stdout),
        }
    }
}
