//! Focus grant adapters.
//!
//! Obtaining real foreground focus is host-UI plumbing; these adapters either
//! do nothing or delegate to external commands configured by the user.

use async_trait::async_trait;
use cf_core::ports::{ClipboardReadError, ReadGrantPort};
use tokio::process::Command;
use tracing::{debug, warn};

/// Grant that is always available. Used when no external capability is set up.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopReadGrant;

#[async_trait]
impl ReadGrantPort for NoopReadGrant {
    async fn acquire(&self) -> Result<(), ClipboardReadError> {
        Ok(())
    }

    async fn release(&self) {}
}

/// Runs a shell command to acquire the grant and another to release it.
#[derive(Debug, Clone)]
pub struct CommandReadGrant {
    acquire_cmd: String,
    release_cmd: String,
}

impl CommandReadGrant {
    pub fn new(acquire_cmd: impl Into<String>, release_cmd: impl Into<String>) -> Self {
        Self {
            acquire_cmd: acquire_cmd.into(),
            release_cmd: release_cmd.into(),
        }
    }
}

fn shell(cmd: &str) -> Command {
    #[cfg(windows)]
    {
        let mut command = Command::new("cmd");
        command.arg("/C").arg(cmd);
        command
    }
    #[cfg(not(windows))]
    {
        let mut command = Command::new("sh");
        command.arg("-c").arg(cmd);
        command
    }
}

async fn run(cmd: &str) -> Result<(), String> {
    let status = shell(cmd)
        .kill_on_drop(true)
        .status()
        .await
        .map_err(|e| format!("failed to spawn '{cmd}': {e}"))?;
    if status.success() {
        Ok(())
    } else {
        Err(format!("'{cmd}' exited with {status}"))
    }
}

#[async_trait]
impl ReadGrantPort for CommandReadGrant {
    async fn acquire(&self) -> Result<(), ClipboardReadError> {
        if self.acquire_cmd.trim().is_empty() {
            return Ok(());
        }
        debug!(cmd = %self.acquire_cmd, "acquiring focus grant");
        run(&self.acquire_cmd).await.map_err(ClipboardReadError::Denied)
    }

    async fn release(&self) {
        if self.release_cmd.trim().is_empty() {
            return;
        }
        if let Err(err) = run(&self.release_cmd).await {
            warn!(error = %err, "failed to release focus grant");
        }
    }
}
