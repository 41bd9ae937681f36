/// Severity of the single status banner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Success,
    Error,
    Warning,
}

impl StatusLevel {
    pub fn icon(self) -> &'static str {
        match self {
            StatusLevel::Success => "fa-check-circle",
            StatusLevel::Error => "fa-exclamation-circle",
            StatusLevel::Warning => "fa-exclamation-triangle",
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            StatusLevel::Success => "#28a745",
            StatusLevel::Error => "#dc3545",
            StatusLevel::Warning => "#ffc107",
        }
    }
}

/// The system status card. Every update replaces the previous one; no history is kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusBanner {
    pub level: StatusLevel,
    pub message: String,
}

impl Default for StatusBanner {
    fn default() -> Self {
        Self {
            level: StatusLevel::Warning,
            message: "Checking system status...".to_string(),
        }
    }
}

impl StatusBanner {
    pub fn set(&mut self, level: StatusLevel, message: impl Into<String>) {
        self.level = level;
        self.message = message.into();
    }
}
