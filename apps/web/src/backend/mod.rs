//! Backend client: the single point of entry for every call to the résumé service.
//!
//! Coordinators depend on the [`Backend`] trait only; [`HttpBackend`] is the production
//! implementation and tests substitute a scripted one.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::file::StagedFile;
use crate::models::score::TailorPayload;

pub mod http;

pub use http::HttpBackend;

pub const STATUS_PATH: &str = "/check-ollama-status/";
pub const INGEST_PATH: &str = "/ingest-resume/";
pub const TAILOR_PATH: &str = "/tailor-resume/";

/// Multipart field carrying the résumé document.
pub const RESUME_FIELD: &str = "resume_file";

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-2xx response. `detail` is the backend's own message when the body had one.
    #[error("API error (status {status}): {}", detail.as_deref().unwrap_or("no detail"))]
    Api { status: u16, detail: Option<String> },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

// ────────────────────────────────────────────────────────────────────────────
// Wire types
// ────────────────────────────────────────────────────────────────────────────

/// GET /check-ollama-status/. A body without the flag reads as not running.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct HealthStatus {
    #[serde(default)]
    pub ollama_running: bool,
}

/// POST /tailor-resume/ request body.
#[derive(Debug, Serialize)]
pub struct TailorRequest<'a> {
    pub text: &'a str,
}

/// POST /tailor-resume/ success body.
#[derive(Debug, Deserialize)]
pub struct TailorResponse {
    pub tailored_resume: TailorPayload,
}

/// Error body shared by every endpoint.
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub detail: Option<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

/// The résumé service as seen by the coordinators. Implement this to swap transports
/// without touching controller code.
#[async_trait]
pub trait Backend: Send + Sync {
    async fn check_status(&self) -> Result<HealthStatus, BackendError>;

    async fn ingest_resume(&self, file: &StagedFile) -> Result<(), BackendError>;

    async fn tailor_resume(&self, job_description: &str) -> Result<TailorPayload, BackendError>;
}
