//! Readiness Monitor: backend health polling and connectivity events.

use tracing::{info, warn};

use super::Controller;
use crate::errors::ClientError;
use crate::ui::status::StatusLevel;
use crate::ui::toast::ToastLevel;

pub const READY_MESSAGE: &str = "System ready! Ollama is running and models are available.";
pub const NOT_READY_MESSAGE: &str =
    "Ollama is not running. Please start Ollama and pull required models.";
pub const UNREACHABLE_MESSAGE: &str =
    "Cannot connect to backend server. Please ensure the server is running.";
pub const OFFLINE_MESSAGE: &str = "No internet connection. Some features may not work.";

/// Outcome of one readiness check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Readiness {
    Ready,
    /// Backend answered but its model runtime is down, either as a `false` flag or as an
    /// error response.
    NotReady,
    Unreachable,
    /// A newer check started before this one resolved; its result was discarded.
    Superseded,
}

impl Controller {
    /// Queries backend health and updates the banner and upload trigger.
    pub async fn check_system_status(&self) -> Readiness {
        let generation = self.with_state(|s| s.session.begin_status_check());

        let result = self
            .bounded(self.backend.check_status(), "Status check failed")
            .await;

        self.with_state(|s| {
            if !s.session.is_current_status_check(generation) {
                info!("Discarding superseded status check #{generation}");
                return Readiness::Superseded;
            }

            match result {
                Ok(health) if health.ollama_running => {
                    info!("Backend ready");
                    s.page.status.set(StatusLevel::Success, READY_MESSAGE);
                    s.page.enable_upload();
                    Readiness::Ready
                }
                Ok(_) => {
                    warn!("Backend reachable but Ollama is not running");
                    s.page.status.set(StatusLevel::Error, NOT_READY_MESSAGE);
                    Readiness::NotReady
                }
                Err(e @ ClientError::Backend { .. }) => {
                    warn!("Backend reachable but its status check failed: {e}");
                    s.page.status.set(StatusLevel::Error, NOT_READY_MESSAGE);
                    Readiness::NotReady
                }
                Err(e) => {
                    warn!("Status check failed: {e}");
                    s.page.status.set(StatusLevel::Error, UNREACHABLE_MESSAGE);
                    Readiness::Unreachable
                }
            }
        })
    }

    /// Connectivity restored.
    pub async fn on_online(&self) -> Readiness {
        info!("Connection restored");
        self.show_toast("Connection restored", ToastLevel::Success);
        self.check_system_status().await
    }

    /// Connectivity lost. Forces the error banner without querying the backend.
    pub fn on_offline(&self) {
        warn!("Connection lost");
        self.show_toast("No internet connection", ToastLevel::Warning);
        self.set_status(StatusLevel::Error, OFFLINE_MESSAGE);
    }
}
