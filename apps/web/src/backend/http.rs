use async_trait::async_trait;
use reqwest::{multipart, Client, Response};
use tracing::{debug, warn};

use super::{
    Backend, BackendError, ErrorBody, HealthStatus, TailorRequest, TailorResponse, INGEST_PATH,
    RESUME_FIELD, STATUS_PATH, TAILOR_PATH,
};
use crate::models::file::StagedFile;
use crate::models::score::TailorPayload;

/// reqwest-backed client for the résumé service.
///
/// No client-level timeout is set: the controller bounds every call itself so that
/// expiry is reported the same way for every transport.
#[derive(Clone)]
pub struct HttpBackend {
    client: Client,
    base_url: String,
}

impl HttpBackend {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// Passes 2xx responses through; turns anything else into [`BackendError::Api`],
/// keeping `detail` from the JSON body when one can be parsed.
async fn ensure_success(response: Response) -> Result<Response, BackendError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    warn!("Backend returned {}: {}", status, body);

    let detail = serde_json::from_str::<ErrorBody>(&body)
        .ok()
        .and_then(|b| b.detail)
        .filter(|d| !d.trim().is_empty());

    Err(BackendError::Api {
        status: status.as_u16(),
        detail,
    })
}

#[async_trait]
impl Backend for HttpBackend {
    async fn check_status(&self) -> Result<HealthStatus, BackendError> {
        let response = self.client.get(self.url(STATUS_PATH)).send().await?;
        let response = ensure_success(response).await?;
        let body = response.bytes().await?;
        let health: HealthStatus = serde_json::from_slice(&body)?;
        debug!("Backend health: ollama_running={}", health.ollama_running);
        Ok(health)
    }

    async fn ingest_resume(&self, file: &StagedFile) -> Result<(), BackendError> {
        let part =
            multipart::Part::stream_with_length(file.contents.clone(), file.size_bytes())
                .file_name(file.name.clone())
                .mime_str(file.mime_type())?;
        let form = multipart::Form::new().part(RESUME_FIELD, part);

        let response = self
            .client
            .post(self.url(INGEST_PATH))
            .multipart(form)
            .send()
            .await?;
        ensure_success(response).await?;

        debug!("Ingested {} ({} bytes)", file.name, file.size_bytes());
        Ok(())
    }

    async fn tailor_resume(&self, job_description: &str) -> Result<TailorPayload, BackendError> {
        let response = self
            .client
            .post(self.url(TAILOR_PATH))
            .json(&TailorRequest {
                text: job_description,
            })
            .send()
            .await?;
        let response = ensure_success(response).await?;
        let body = response.bytes().await?;
        let decoded: TailorResponse = serde_json::from_slice(&body)?;
        Ok(decoded.tailored_resume)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        extract::Multipart,
        http::{header, HeaderMap, StatusCode},
        routing::{get, post},
        Json, Router,
    };
    use serde_json::{json, Value};

    /// Serves `router` on an ephemeral port and returns its base URL.
    async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}")
    }

    #[tokio::test]
    async fn test_check_status_reads_flag() {
        let base = serve(Router::new().route(
            STATUS_PATH,
            get(|| async { Json(json!({ "ollama_running": true })) }),
        ))
        .await;

        let health = HttpBackend::new(base).check_status().await.unwrap();
        assert!(health.ollama_running);
    }

    #[tokio::test]
    async fn test_check_status_missing_flag_is_not_running() {
        let base = serve(Router::new().route(
            STATUS_PATH,
            get(|| async { Json(json!({ "available_models": ["llama3"] })) }),
        ))
        .await;

        let health = HttpBackend::new(base).check_status().await.unwrap();
        assert!(!health.ollama_running);
    }

    #[tokio::test]
    async fn test_check_status_bad_json_is_parse_error() {
        let base = serve(Router::new().route(STATUS_PATH, get(|| async { "not json" }))).await;

        let err = HttpBackend::new(base).check_status().await.unwrap_err();
        assert!(matches!(err, BackendError::Parse(_)), "got {err:?}");
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_http_error() {
        // Bind then drop to get a port nothing listens on.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = HttpBackend::new(format!("http://{addr}"))
            .check_status()
            .await
            .unwrap_err();
        assert!(matches!(err, BackendError::Http(_)), "got {err:?}");
    }

    #[tokio::test]
    async fn test_ingest_sends_sized_resume_file_field() {
        let base = serve(Router::new().route(
            INGEST_PATH,
            post(|headers: HeaderMap, mut multipart: Multipart| async move {
                let field = multipart.next_field().await.unwrap().unwrap();
                let name = field.name().unwrap_or_default().to_string();
                let file_name = field.file_name().unwrap_or_default().to_string();
                let declared = headers
                    .get(header::CONTENT_LENGTH)
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| v.parse::<u64>().ok());
                let bytes = field.bytes().await.unwrap();
                if name == RESUME_FIELD
                    && file_name == "cv.txt"
                    && &bytes[..] == b"hello"
                    && declared.is_some()
                {
                    (StatusCode::OK, Json(json!({ "message": "ok" })))
                } else {
                    (StatusCode::BAD_REQUEST, Json(json!({ "detail": "wrong field" })))
                }
            }),
        ))
        .await;

        HttpBackend::new(base)
            .ingest_resume(&StagedFile::new("cv.txt", "hello"))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_ingest_error_extracts_detail() {
        let base = serve(Router::new().route(
            INGEST_PATH,
            post(|| async {
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    Json(json!({ "detail": "Unsupported file type" })),
                )
            }),
        ))
        .await;

        let err = HttpBackend::new(base)
            .ingest_resume(&StagedFile::new("cv.txt", "hello"))
            .await
            .unwrap_err();
        match err {
            BackendError::Api { status, detail } => {
                assert_eq!(status, 422);
                assert_eq!(detail.as_deref(), Some("Unsupported file type"));
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_error_without_json_body_has_no_detail() {
        let base = serve(Router::new().route(
            TAILOR_PATH,
            post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
        ))
        .await;

        let err = HttpBackend::new(base).tailor_resume("jd").await.unwrap_err();
        match err {
            BackendError::Api { status, detail } => {
                assert_eq!(status, 500);
                assert!(detail.is_none());
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_tailor_posts_text_and_decodes_both_shapes() {
        let base = serve(Router::new().route(
            TAILOR_PATH,
            post(|Json(body): Json<Value>| async move {
                let text = body["text"].as_str().unwrap_or_default().to_string();
                if text == "legacy" {
                    Json(json!({ "tailored_resume": "plain text" }))
                } else {
                    Json(json!({
                        "tailored_resume": {
                            "tailored_resume": format!("for: {text}"),
                            "ats_score": { "overall_score": 91 }
                        }
                    }))
                }
            }),
        ))
        .await;

        let backend = HttpBackend::new(base);

        let legacy = backend.tailor_resume("legacy").await.unwrap();
        assert_eq!(legacy, TailorPayload::Legacy("plain text".to_string()));

        let structured = backend.tailor_resume("Rust engineer").await.unwrap();
        match structured {
            TailorPayload::Structured {
                tailored_resume,
                ats_score,
            } => {
                assert_eq!(tailored_resume, "for: Rust engineer");
                assert_eq!(ats_score.unwrap()["overall_score"], 91);
            }
            other => panic!("expected structured payload, got {other:?}"),
        }
    }
}
