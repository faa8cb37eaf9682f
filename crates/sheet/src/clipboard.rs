use crate::error::{ClipboardError, ExportError};
use crate::export::to_clipboard_text;
use async_trait::async_trait;
use roster_core::Employee;
use tracing::{debug, error, info};

/// An environment capability that accepts plain text.
#[async_trait]
pub trait Clipboard: Send + Sync {
    /// Replace the clipboard contents. May be rejected by the environment.
    async fn write_text(&self, text: &str) -> std::result::Result<(), ClipboardError>;
}

/// What a copy request did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyOutcome {
    /// Nothing was selected; the clipboard was not touched.
    Skipped,
    Copied { rows: usize },
}

impl CopyOutcome {
    /// User-facing notice, if any.
    #[must_use]
    pub fn notice(&self) -> Option<String> {
        match self {
            CopyOutcome::Skipped => None,
            CopyOutcome::Copied { rows } => Some(format!("Copied {rows} row(s) to clipboard!")),
        }
    }
}

/// Copy a selection to the clipboard as tab-separated text.
///
/// A rejected write is returned as [`ExportError::Clipboard`] and is not
/// retried.
pub async fn copy_selection<C: Clipboard + ?Sized>(
    rows: &[&Employee],
    clipboard: &C,
) -> Result<CopyOutcome, ExportError> {
    let Some(text) = to_clipboard_text(rows) else {
        debug!("copy requested with an empty selection");
        return Ok(CopyOutcome::Skipped);
    };

    match clipboard.write_text(&text).await {
        Ok(()) => {
            info!(rows = rows.len(), bytes = text.len(), "copied selection to clipboard");
            Ok(CopyOutcome::Copied { rows: rows.len() })
        }
        Err(e) => {
            error!(error = %e, "failed to copy selection");
            Err(ExportError::Clipboard(e))
        }
    }
}
