//! Tailor Coordinator and Form Gate wiring.

use tokio::time::Instant;
use tracing::{info, warn};

use super::Controller;
use crate::errors::ClientError;
use crate::models::score::{TailorPayload, TailoredResume};
use crate::ui::toast::ToastLevel;

pub const EMPTY_JOB_DESCRIPTION_MESSAGE: &str = "Please enter a job description.";
pub const NOT_UPLOADED_MESSAGE: &str = "Please upload a resume first.";
pub const TAILOR_BUSY_MESSAGE: &str = "A tailoring request is already in progress.";
pub const TAILORING_MESSAGE: &str = "Analyzing job description and tailoring your resume...";
pub const TAILOR_FALLBACK: &str = "Failed to tailor resume";
pub const TAILOR_SUCCESS_MESSAGE: &str = "Resume tailored successfully!";

impl Controller {
    /// Text-changed trigger for the job description box.
    pub fn on_job_description_changed(&self, text: impl Into<String>) -> bool {
        let text = text.into();
        self.with_state(|s| {
            s.session.set_job_description(text);
            s.refresh_form_gate();
            s.page.tailor_enabled
        })
    }

    pub async fn tailor_resume(&self) -> Result<TailoredResume, ClientError> {
        let acquired = self.with_state(|s| {
            let text = s.session.job_description().trim().to_string();
            if text.is_empty() {
                return Err(ClientError::Precondition(EMPTY_JOB_DESCRIPTION_MESSAGE));
            }
            if !s.session.resume_uploaded() {
                return Err(ClientError::Precondition(NOT_UPLOADED_MESSAGE));
            }
            if !s.session.tailor.try_acquire() {
                return Err(ClientError::Busy(TAILOR_BUSY_MESSAGE));
            }
            s.page.loading.show(TAILORING_MESSAGE);
            Ok(text)
        });

        let job_description = match acquired {
            Ok(text) => text,
            Err(e) => {
                self.reject(&e);
                return Err(e);
            }
        };

        info!("Tailoring against a {}-char job description", job_description.len());
        let result = self
            .bounded(self.backend.tailor_resume(&job_description), TAILOR_FALLBACK)
            .await;

        self.with_state(|s| {
            s.session.tailor.release();
            s.page.loading.hide();
        });

        match result {
            Ok(payload) => {
                let tailored = self.display_results(payload);
                self.show_toast(TAILOR_SUCCESS_MESSAGE, ToastLevel::Success);
                Ok(tailored)
            }
            Err(e) => {
                warn!("Tailoring error: {e}");
                self.show_toast(
                    format!("Tailoring failed: {}", e.user_message()),
                    ToastLevel::Error,
                );
                Err(e)
            }
        }
    }

    /// Normalises the payload and projects it into the results section.
    pub fn display_results(&self, payload: TailorPayload) -> TailoredResume {
        let tailored = TailoredResume::from(payload);
        info!(
            "Rendering tailored resume ({} chars, ats_score: {})",
            tailored.text.len(),
            tailored.ats_score.is_some()
        );
        self.with_state(|s| s.page.results.display(&tailored, Instant::now()));
        tailored
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::Ordering;
    use std::sync::Arc;
    use std::time::Duration;

    use serde_json::json;

    use super::*;
    use crate::controller::testing::{Reply, ScriptedBackend};
    use crate::models::file::StagedFile;
    use crate::ui::results::ScoreCategory;

    fn setup(backend: ScriptedBackend) -> (Arc<ScriptedBackend>, Controller) {
        let backend = Arc::new(backend);
        let controller = Controller::new(backend.clone(), Duration::from_secs(60));
        (backend, controller)
    }

    /// Stages and uploads a résumé so the tailor preconditions hold.
    async fn uploaded(backend: ScriptedBackend) -> (Arc<ScriptedBackend>, Controller) {
        backend.push_ingest(Reply::Ok(()));
        let (backend, controller) = setup(backend);
        controller.on_file_chosen(StagedFile::new("cv.txt", "Jane Doe"));
        controller.upload_resume().await.unwrap();
        (backend, controller)
    }

    fn last_toast(controller: &Controller) -> String {
        controller
            .page()
            .toasts
            .visible(Instant::now())
            .last()
            .map(|t| t.message.clone())
            .unwrap_or_default()
    }

    fn structured_payload() -> TailorPayload {
        serde_json::from_value(json!({
            "tailored_resume": "T",
            "ats_score": {
                "overall_score": 87,
                "keyword_score": 150,
                "skill_score": 40,
                "experience_score": 60,
                "format_score": 70,
                "analysis": "A",
                "recommendations": ["R1"],
                "missing_keywords": ["k1", "k2", "k3", "k4", "k5", "k6", "k7", "k8", "k9", "k10", "k11", "k12"]
            }
        }))
        .unwrap()
    }

    #[test]
    fn test_gate_tracks_text_changes() {
        let (_, controller) = setup(ScriptedBackend::default());
        assert!(!controller.on_job_description_changed("Rust"));
    }

    #[tokio::test]
    async fn test_gate_enables_after_upload_and_text() {
        let (_, controller) = uploaded(ScriptedBackend::default()).await;
        assert!(!controller.page().tailor_enabled);
        assert!(controller.on_job_description_changed("Rust engineer"));
        assert!(!controller.on_job_description_changed("   "));
    }

    #[tokio::test]
    async fn test_empty_job_description_checked_first() {
        let (backend, controller) = setup(ScriptedBackend::default());
        controller.on_job_description_changed("  \n ");

        let err = controller.tailor_resume().await.unwrap_err();

        assert!(matches!(err, ClientError::Precondition(EMPTY_JOB_DESCRIPTION_MESSAGE)));
        assert_eq!(last_toast(&controller), EMPTY_JOB_DESCRIPTION_MESSAGE);
        assert_eq!(backend.tailor_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_requires_uploaded_resume() {
        let (backend, controller) = setup(ScriptedBackend::default());
        controller.on_job_description_changed("Rust engineer");

        let err = controller.tailor_resume().await.unwrap_err();

        assert!(matches!(err, ClientError::Precondition(NOT_UPLOADED_MESSAGE)));
        assert_eq!(last_toast(&controller), NOT_UPLOADED_MESSAGE);
        assert_eq!(backend.tailor_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_legacy_string_renders_text_only() {
        let backend = ScriptedBackend::default();
        backend.push_tailor(Reply::Ok(TailorPayload::Legacy("plain text".to_string())));
        let (backend, controller) = uploaded(backend).await;
        controller.on_job_description_changed("  Rust engineer  ");

        let tailored = controller.tailor_resume().await.unwrap();

        assert_eq!(tailored.text, "plain text");
        let page = controller.page();
        assert_eq!(page.results.tailored_text, "plain text");
        assert!(page.results.score.is_none());
        assert!(page.results.visible);
        assert!(!page.loading.is_visible());
        assert_eq!(last_toast(&controller), TAILOR_SUCCESS_MESSAGE);
        assert_eq!(
            backend.last_job_description.lock().unwrap().as_deref(),
            Some("Rust engineer")
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_structured_payload_renders_scores() {
        let backend = ScriptedBackend::default();
        backend.push_tailor(Reply::Ok(structured_payload()));
        let (_, controller) = uploaded(backend).await;
        controller.on_job_description_changed("Rust engineer");

        controller.tailor_resume().await.unwrap();

        let page = controller.page();
        let panel = page.results.score.as_ref().unwrap();
        assert_eq!(page.results.tailored_text, "T");
        assert_eq!(panel.overall, "87");
        assert_eq!(panel.bar(ScoreCategory::Keyword).unwrap().target_width, 100.0);
        assert_eq!(panel.analysis, "A");
        assert_eq!(panel.recommendations, vec!["R1"]);
        assert_eq!(
            panel.missing_keywords.as_deref(),
            Some("k1, k2, k3, k4, k5, k6, k7, k8, k9, k10...")
        );
    }

    #[tokio::test]
    async fn test_backend_failure_keeps_state_consistent() {
        let backend = ScriptedBackend::default();
        backend.push_tailor(Reply::Api(503, None));
        let (_, controller) = uploaded(backend).await;
        controller.on_job_description_changed("Rust engineer");

        let err = controller.tailor_resume().await.unwrap_err();

        assert!(matches!(err, ClientError::Backend { status: 503, .. }));
        let page = controller.page();
        assert!(!page.loading.is_visible());
        assert!(!page.results.visible);
        assert!(page.tailor_enabled);
        assert!(controller.session().resume_uploaded());
        assert!(!controller.session().tailor.is_in_flight());
        assert_eq!(last_toast(&controller), "Tailoring failed: Failed to tailor resume");
    }

    #[tokio::test(start_paused = true)]
    async fn test_hung_tailor_request_times_out() {
        let backend = ScriptedBackend::default();
        backend.push_tailor(Reply::Hang);
        let (_, controller) = uploaded(backend).await;
        controller.on_job_description_changed("Rust engineer");

        let err = controller.tailor_resume().await.unwrap_err();

        assert!(matches!(err, ClientError::Timeout(_)));
        assert!(!controller.page().loading.is_visible());
        assert_eq!(
            last_toast(&controller),
            "Tailoring failed: The server did not respond within 60 seconds."
        );
    }

    #[tokio::test]
    async fn test_overlapping_tailor_is_rejected() {
        let backend = ScriptedBackend::gated();
        backend
            .push_ingest(Reply::Ok(()))
            .push_tailor(Reply::Ok(TailorPayload::Legacy("done".to_string())));
        let (backend, controller) = setup(backend);
        controller.on_file_chosen(StagedFile::new("cv.txt", "Jane Doe"));
        backend.release_one();
        controller.upload_resume().await.unwrap();
        controller.on_job_description_changed("Rust engineer");

        // The tailor answer is held until the second click has been refused.
        let second = async {
            while backend.tailor_calls.load(Ordering::SeqCst) < 1 {
                tokio::task::yield_now().await;
            }
            let result = controller.tailor_resume().await;
            backend.release_one();
            result
        };

        let (first, second) = tokio::join!(controller.tailor_resume(), second);

        assert_eq!(first.unwrap().text, "done");
        assert!(matches!(second, Err(ClientError::Busy(_))));
        assert_eq!(backend.tailor_calls.load(Ordering::SeqCst), 1);
        assert!(!controller.page().loading.is_visible());
    }
}
