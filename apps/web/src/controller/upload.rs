//! Upload Coordinator: sends the staged résumé to the ingest endpoint.

use tracing::{info, warn};

use super::Controller;
use crate::errors::ClientError;
use crate::ui::toast::ToastLevel;

pub const NO_FILE_MESSAGE: &str = "Please select a resume file first.";
pub const UPLOAD_BUSY_MESSAGE: &str = "An upload is already in progress.";
pub const UPLOADING_MESSAGE: &str = "Uploading and processing your resume...";
pub const UPLOAD_FALLBACK: &str = "Failed to upload resume";
pub const UPLOAD_SUCCESS_MESSAGE: &str = "Resume uploaded and processed successfully!";

impl Controller {
    pub async fn upload_resume(&self) -> Result<(), ClientError> {
        let acquired = self.with_state(|s| {
            let Some(file) = s.session.staged_file().cloned() else {
                return Err(ClientError::Precondition(NO_FILE_MESSAGE));
            };
            if !s.session.upload.try_acquire() {
                return Err(ClientError::Busy(UPLOAD_BUSY_MESSAGE));
            }
            s.page.loading.show(UPLOADING_MESSAGE);
            Ok(file)
        });

        let file = match acquired {
            Ok(file) => file,
            Err(e) => {
                self.reject(&e);
                return Err(e);
            }
        };

        info!("Uploading {} ({} bytes)", file.name, file.size_bytes());
        let result = self
            .bounded(self.backend.ingest_resume(&file), UPLOAD_FALLBACK)
            .await;

        self.with_state(|s| {
            s.session.upload.release();
            s.page.loading.hide();
            if result.is_ok() {
                s.session.mark_uploaded();
                s.refresh_form_gate();
            }
        });

        match result {
            Ok(()) => {
                info!("Resume {} ingested", file.name);
                self.show_toast(UPLOAD_SUCCESS_MESSAGE, ToastLevel::Success);
                Ok(())
            }
            Err(e) => {
                warn!("Upload error: {e}");
                self.show_toast(format!("Upload failed: {}", e.user_message()), ToastLevel::Error);
                Err(e)
            }
        }
    }
}
