//! Transient notifications stacked in one always-visible container.

use std::time::Duration;

use tokio::time::Instant;
use uuid::Uuid;

/// How long a toast stays up when nobody clicks it.
pub const TOAST_TTL: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Success,
    Error,
    Warning,
    Info,
}

impl ToastLevel {
    pub fn icon(self) -> &'static str {
        match self {
            ToastLevel::Success => "fa-check-circle",
            ToastLevel::Error => "fa-exclamation-circle",
            ToastLevel::Warning => "fa-exclamation-triangle",
            ToastLevel::Info => "fa-info-circle",
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            ToastLevel::Success => "#28a745",
            ToastLevel::Error => "#dc3545",
            ToastLevel::Warning => "#ffc107",
            ToastLevel::Info => "#17a2b8",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ToastLevel::Success => "success",
            ToastLevel::Error => "error",
            ToastLevel::Warning => "warning",
            ToastLevel::Info => "info",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub id: Uuid,
    pub level: ToastLevel,
    pub message: String,
    pub expires_at: Instant,
}

#[derive(Debug, Clone, Default)]
pub struct ToastStack {
    toasts: Vec<Toast>,
}

impl ToastStack {
    /// Appends a toast expiring [`TOAST_TTL`] after `now` and returns its id.
    pub fn push(&mut self, message: impl Into<String>, level: ToastLevel, now: Instant) -> Uuid {
        let id = Uuid::new_v4();
        self.toasts.push(Toast {
            id,
            level,
            message: message.into(),
            expires_at: now + TOAST_TTL,
        });
        id
    }

    /// Click-to-dismiss. Returns false if the toast had already gone.
    pub fn dismiss(&mut self, id: Uuid) -> bool {
        let before = self.toasts.len();
        self.toasts.retain(|t| t.id != id);
        self.toasts.len() != before
    }

    /// Drops every toast whose deadline has passed.
    pub fn expire(&mut self, now: Instant) {
        self.toasts.retain(|t| t.expires_at > now);
    }

    /// Toasts still on screen at `now`, oldest first.
    pub fn visible(&self, now: Instant) -> impl Iterator<Item = &Toast> {
        self.toasts.iter().filter(move |t| t.expires_at > now)
    }

    pub fn len(&self) -> usize {
        self.toasts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }
}
