//! Résumé documents staged in memory before upload.

use std::path::Path;

use anyhow::{Context, Result};
use bytes::Bytes;

/// Extensions accepted by File Intake, compared lowercase against the text after the last `.`.
pub const ACCEPTED_EXTENSIONS: &[&str] = &["txt", "md", "pdf"];

/// `accept` filter handed to the native file chooser.
pub const CHOOSER_ACCEPT_FILTER: &str = ".txt,.md,.pdf";

/// A user-selected document held in memory, not yet transmitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagedFile {
    pub name: String,
    pub contents: Bytes,
}

impl StagedFile {
    pub fn new(name: impl Into<String>, contents: impl Into<Bytes>) -> Self {
        Self {
            name: name.into(),
            contents: contents.into(),
        }
    }

    /// Reads a document from disk, keeping only its file name.
    pub async fn read_from_path(path: &Path) -> Result<Self> {
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .with_context(|| format!("'{}' has no usable file name", path.display()))?
            .to_string();

        let contents = tokio::fs::read(path)
            .await
            .with_context(|| format!("Failed to read '{}'", path.display()))?;

        Ok(Self::new(name, contents))
    }

    pub fn size_bytes(&self) -> u64 {
        self.contents.len() as u64
    }

    /// Size as shown in the selection display, e.g. `12.3 KB`.
    pub fn size_label(&self) -> String {
        format_size_kb(self.size_bytes())
    }

    /// Lowercased text after the final `.`, if the name has one.
    pub fn extension(&self) -> Option<String> {
        extension_of(&self.name)
    }

    pub fn mime_type(&self) -> &'static str {
        match self.extension().as_deref() {
            Some("pdf") => "application/pdf",
            Some("md") => "text/markdown",
            Some("txt") => "text/plain",
            _ => "application/octet-stream",
        }
    }
}

fn extension_of(name: &str) -> Option<String> {
    name.rsplit_once('.').map(|(_, ext)| ext.to_lowercase())
}

/// True iff the file name ends in one of [`ACCEPTED_EXTENSIONS`] (case-insensitive).
/// Names without any `.` are rejected.
pub fn is_accepted_filename(name: &str) -> bool {
    extension_of(name)
        .map(|ext| ACCEPTED_EXTENSIONS.contains(&ext.as_str()))
        .unwrap_or(false)
}

/// Bytes rendered as KiB with one decimal place.
pub fn format_size_kb(bytes: u64) -> String {
    format!("{:.1} KB", bytes as f64 / 1024.0)
}
