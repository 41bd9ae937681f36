//! The page controller: one handler per named trigger.
//!
//! All state sits behind a single `std::sync::Mutex` that is only held for short,
//! synchronous updates and never across an `.await`. Handlers therefore interleave only
//! at network suspension points, like callbacks on a UI event loop.

use std::future::Future;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use tokio::time::Instant;
use tracing::error;
use uuid::Uuid;

use crate::backend::{Backend, BackendError};
use crate::errors::{ClientError, UNEXPECTED_MESSAGE};
use crate::session::SessionState;
use crate::state::ClientState;
use crate::ui::status::StatusLevel;
use crate::ui::toast::ToastLevel;
use crate::ui::Page;

pub mod clipboard;
pub mod intake;
pub mod readiness;
pub mod tailor;
pub mod upload;

pub use clipboard::{Clipboard, FileClipboard};
pub use intake::FileChooserRequest;
pub use readiness::Readiness;

pub struct Controller {
    backend: Arc<dyn Backend>,
    state: Mutex<ClientState>,
    request_timeout: Duration,
}

impl Controller {
    pub fn new(backend: Arc<dyn Backend>, request_timeout: Duration) -> Self {
        Self {
            backend,
            state: Mutex::new(ClientState::default()),
            request_timeout,
        }
    }

    /// Runs `f` against the locked state. A poisoned lock is recovered rather than
    /// propagated: the state is plain data and stays usable.
    fn with_state<R>(&self, f: impl FnOnce(&mut ClientState) -> R) -> R {
        let mut guard = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut guard)
    }

    /// Snapshot of the view model with expired toasts dropped.
    pub fn page(&self) -> Page {
        self.with_state(|s| {
            s.page.toasts.expire(Instant::now());
            s.page.clone()
        })
    }

    pub fn session(&self) -> SessionState {
        self.with_state(|s| s.session.clone())
    }

    // ────────────────────────────────────────────────────────────────────────
    // Notification & loading plumbing
    // ────────────────────────────────────────────────────────────────────────

    pub fn show_toast(&self, message: impl Into<String>, level: ToastLevel) -> Uuid {
        let message = message.into();
        self.with_state(|s| {
            let now = Instant::now();
            s.page.toasts.expire(now);
            s.page.toasts.push(message, level, now)
        })
    }

    /// Click on a toast.
    pub fn dismiss_toast(&self, id: Uuid) -> bool {
        self.with_state(|s| s.page.toasts.dismiss(id))
    }

    pub fn show_loading(&self, message: &str) {
        self.with_state(|s| s.page.loading.show(message));
    }

    pub fn hide_loading(&self) {
        self.with_state(|s| s.page.loading.hide());
    }

    fn set_status(&self, level: StatusLevel, message: &str) {
        self.with_state(|s| s.page.status.set(level, message));
    }

    /// Surfaces a request refused before it reached the network.
    fn reject(&self, err: &ClientError) {
        let level = match err {
            ClientError::Busy(_) => ToastLevel::Warning,
            _ => ToastLevel::Error,
        };
        self.show_toast(err.user_message(), level);
    }

    /// Last-resort handler for faults no coordinator dealt with.
    pub fn report_unexpected(&self, err: &dyn std::fmt::Display) {
        error!("Unexpected error: {err}");
        self.show_toast(UNEXPECTED_MESSAGE, ToastLevel::Error);
    }

    /// Runs `task` on its own tokio task. An error it returns, or a panic inside it, is
    /// reported through [`Controller::report_unexpected`] and yields `None`.
    pub async fn supervise<T, E, F>(&self, task: F) -> Option<T>
    where
        F: Future<Output = Result<T, E>> + Send + 'static,
        T: Send + 'static,
        E: std::fmt::Display + Send + 'static,
    {
        match tokio::spawn(task).await {
            Ok(Ok(value)) => Some(value),
            Ok(Err(e)) => {
                self.report_unexpected(&format!("{e:#}"));
                None
            }
            Err(join_err) => {
                self.report_unexpected(&join_err);
                None
            }
        }
    }

    /// Bounds a backend call by the request timeout and classifies its failure.
    async fn bounded<T, F>(&self, call: F, fallback: &str) -> Result<T, ClientError>
    where
        F: Future<Output = Result<T, BackendError>>,
    {
        match tokio::time::timeout(self.request_timeout, call).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(e)) => Err(ClientError::from_backend(e, fallback)),
            Err(_) => Err(ClientError::Timeout(self.request_timeout)),
        }
    }
}
