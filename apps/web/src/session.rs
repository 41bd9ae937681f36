//! Session state owned by the controller, with its transitions spelled out as methods.

use crate::models::file::StagedFile;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ResumeState {
    #[default]
    NotUploaded,
    Uploaded,
}

/// In-flight token for one kind of request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RequestSlot {
    #[default]
    Idle,
    InFlight,
}

impl RequestSlot {
    /// Takes the slot. Returns false if a request is already outstanding.
    pub fn try_acquire(&mut self) -> bool {
        match self {
            RequestSlot::Idle => {
                *self = RequestSlot::InFlight;
                true
            }
            RequestSlot::InFlight => false,
        }
    }

    pub fn release(&mut self) {
        *self = RequestSlot::Idle;
    }

    pub fn is_in_flight(self) -> bool {
        self == RequestSlot::InFlight
    }
}

#[derive(Debug, Clone, Default)]
pub struct SessionState {
    resume: ResumeState,
    staged_file: Option<StagedFile>,
    job_description: String,
    pub upload: RequestSlot,
    pub tailor: RequestSlot,
    status_generation: u64,
}

impl SessionState {
    pub fn resume(&self) -> ResumeState {
        self.resume
    }

    pub fn resume_uploaded(&self) -> bool {
        self.resume == ResumeState::Uploaded
    }

    /// Only a successful upload moves the résumé forward; nothing moves it back.
    pub fn mark_uploaded(&mut self) {
        self.resume = ResumeState::Uploaded;
    }

    pub fn staged_file(&self) -> Option<&StagedFile> {
        self.staged_file.as_ref()
    }

    /// Replaces the staged file, returning the one it displaced.
    pub fn stage(&mut self, file: StagedFile) -> Option<StagedFile> {
        self.staged_file.replace(file)
    }

    pub fn job_description(&self) -> &str {
        &self.job_description
    }

    pub fn set_job_description(&mut self, text: impl Into<String>) {
        self.job_description = text.into();
    }

    pub fn form_gate(&self) -> bool {
        form_gate(self.resume_uploaded(), &self.job_description)
    }

    /// Starts a readiness check and returns its generation.
    pub fn begin_status_check(&mut self) -> u64 {
        self.status_generation += 1;
        self.status_generation
    }

    /// False once a newer check has started.
    pub fn is_current_status_check(&self, generation: u64) -> bool {
        self.status_generation == generation
    }
}

/// The tailor action is enabled iff a résumé was uploaded and the job description
/// has non-whitespace content.
pub fn form_gate(resume_uploaded: bool, job_description: &str) -> bool {
    resume_uploaded && !job_description.trim().is_empty()
}
