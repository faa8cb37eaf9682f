//! Clipboard access through the platform's clipboard command.

use async_trait::async_trait;
use roster_sheet::{Clipboard, ClipboardError};
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::{debug, warn};

/// Pipes text into an external program such as `pbcopy` or `wl-copy`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandClipboard {
    program: String,
    args: Vec<String>,
}

impl CommandClipboard {
    pub fn new(program: &str, args: Vec<String>) -> Self {
        Self {
            program: program.to_string(),
            args,
        }
    }

    /// `pbcopy` on macOS, `clip` on Windows, `wl-copy` under Wayland,
    /// `xclip` otherwise.
    pub fn platform_default() -> Self {
        if cfg!(target_os = "macos") {
            Self::new("pbcopy", Vec::new())
        } else if cfg!(windows) {
            Self::new("clip", Vec::new())
        } else if std::env::var_os("WAYLAND_DISPLAY").is_some() {
            Self::new("wl-copy", Vec::new())
        } else {
            Self::new("xclip", vec!["-selection".into(), "clipboard".into()])
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }
}

#[async_trait]
impl Clipboard for CommandClipboard {
    async fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        debug!(program = %self.program, bytes = text.len(), "writing clipboard");

        // Helpers such as xclip fork a background owner of the selection that
        // inherits the child's output handles, so nothing is piped back.
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| ClipboardError(format!("cannot run {}: {e}", self.program)))?;

        if let Some(mut stdin) = child.stdin.take() {
            if let Err(e) = stdin.write_all(text.as_bytes()).await {
                warn!(program = %self.program, error = %e, "clipboard helper refused input");
                // Reap the helper before reporting the failure.
                let _ = child.start_kill();
                let _ = child.wait().await;
                return Err(ClipboardError(format!("cannot write to {}: {e}", self.program)));
            }
            drop(stdin);
        }

        let status = child
            .wait()
            .await
            .map_err(|e| ClipboardError(format!("{} did not finish: {e}", self.program)))?;

        if status.success() {
            Ok(())
        } else {
            Err(ClipboardError(format!("{} exited with {status}", self.program)))
        }
    }
}
