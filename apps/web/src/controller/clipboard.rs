//! Copy-to-clipboard for the tailored résumé.

use std::path::PathBuf;

use anyhow::{Context, Result};
use async_trait::async_trait;
use tokio::time::Instant;
use tracing::{info, warn};

use super::Controller;
use crate::ui::toast::ToastLevel;

pub const COPY_SUCCESS_MESSAGE: &str = "Resume copied to clipboard!";
pub const COPY_FAILED_MESSAGE: &str = "Failed to copy to clipboard";

/// The platform clipboard, consumed as-is.
#[async_trait]
pub trait Clipboard: Send + Sync {
    async fn write_text(&self, text: &str) -> Result<()>;
}

/// Writes the copied text to a file. Used by the terminal shell.
pub struct FileClipboard {
    path: PathBuf,
}

impl FileClipboard {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl Clipboard for FileClipboard {
    async fn write_text(&self, text: &str) -> Result<()> {
        tokio::fs::write(&self.path, text)
            .await
            .with_context(|| format!("Failed to write '{}'", self.path.display()))
    }
}

impl Controller {
    /// Copies the currently displayed tailored text.
    pub async fn copy_results(&self, clipboard: &dyn Clipboard) -> bool {
        let text = self.with_state(|s| s.page.results.tailored_text.clone());

        match clipboard.write_text(&text).await {
            Ok(()) => {
                info!("Copied {} chars to clipboard", text.len());
                self.with_state(|s| s.page.copy_button.mark_copied(Instant::now()));
                self.show_toast(COPY_SUCCESS_MESSAGE, ToastLevel::Success);
                true
            }
            Err(e) => {
                warn!("Copy error: {e:#}");
                self.show_toast(COPY_FAILED_MESSAGE, ToastLevel::Error);
                false
            }
        }
    }
}
