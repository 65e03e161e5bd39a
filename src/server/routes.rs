// src/server/routes.rs
// =============================================================================
// axum handlers for the verifier endpoint.
//
// The check-links handler takes the raw body so that every malformed request
// (not JSON, no `urls`, `urls` not a list of strings) gets the same 400
// response with an `{ "error": ... }` body. That includes bodies over the
// configured size limit.
// =============================================================================

use crate::checker::{parse_check_request, Verifier};
use crate::error::CheckerError;
use crate::links::{CheckResponse, ErrorResponse};
use axum::body::Bytes;
use axum::extract::rejection::BytesRejection;
use axum::extract::{DefaultBodyLimit, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::json;

#[derive(Clone)]
struct AppState {
    verifier: Verifier,
}

pub fn router(verifier: Verifier, max_body_bytes: usize) -> Router {
    Router::new()
        .route("/api/check-links", post(check_links))
        .route("/health", get(health))
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .with_state(AppState { verifier })
}

async fn check_links(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<CheckResponse>, CheckerError> {
    let body = body.map_err(|e| CheckerError::InvalidInput(e.body_text()))?;
    let request = parse_check_request(&body)?;

    tracing::info!(urls = request.urls.len(), "checking batch");
    let results = state.verifier.check_links(&request.urls).await?;

    Ok(Json(CheckResponse { results }))
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

impl IntoResponse for CheckerError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let error = match self {
            CheckerError::InvalidInput(message) => {
                tracing::debug!("rejected request: {}", message);
                message
            }
            other => {
                tracing::error!("batch failed: {}", other);
                "Internal Server Error".to_string()
            }
        };

        (status, Json(ErrorResponse { error })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CheckerConfig;
    use crate::dispatch::{BatchDispatcher, RemoteVerifier};
    use crate::links::{CheckResult, LinkRecord};
    use tokio::net::TcpListener;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    // Serves the router on an ephemeral port and returns its base URL.
    async fn spawn_service() -> String {
        spawn_service_with_limit(CheckerConfig::default().max_body_bytes).await
    }

    async fn spawn_service_with_limit(max_body_bytes: usize) -> String {
        let verifier = Verifier::new(&CheckerConfig::default()).unwrap();
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router(verifier, max_body_bytes))
                .await
                .unwrap();
        });
        format!("http://{}", addr)
    }

    #[tokio::test]
    async fn test_check_links_endpoint() {
        let target = MockServer::start().await;
        Mock::given(method("HEAD"))
            .and(path("/ok"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&target)
            .await;
        Mock::given(method("HEAD"))
            .and(path("/no-head"))
            .respond_with(ResponseTemplate::new(405))
            .mount(&target)
            .await;
        Mock::given(method("GET"))
            .and(path("/no-head"))
            .respond_with(ResponseTemplate::new(403))
            .mount(&target)
            .await;

        let service = spawn_service().await;
        let ok = format!("{}/ok", target.uri());
        let no_head = format!("{}/no-head", target.uri());

        let response = reqwest::Client::new()
            .post(format!("{}/api/check-links", service))
            .json(&json!({ "urls": [ok, no_head] }))
            .send()
            .await
            .unwrap();

        assert_eq!(response.status().as_u16(), 200);
        let body: CheckResponse = response.json().await.unwrap();
        assert_eq!(body.results.len(), 2);
        assert!(body.results.contains(&CheckResult { url: ok, status: 200 }));
        assert!(body.results.contains(&CheckResult { url: no_head, status: 403 }));
    }

    #[tokio::test]
    async fn test_malformed_body_is_400() {
        let service = spawn_service().await;
        let client = reqwest::Client::new();

        for body in [r#"{}"#, r#"{"urls": "https://a.example"}"#, "not json"] {
            let response = client
                .post(format!("{}/api/check-links", service))
                .header("content-type", "application/json")
                .body(body)
                .send()
                .await
                .unwrap();

            assert_eq!(response.status().as_u16(), 400, "body: {}", body);
            let error: ErrorResponse = response.json().await.unwrap();
            assert!(!error.error.is_empty());
        }
    }

    #[tokio::test]
    async fn test_oversized_body_is_400_with_json_error() {
        let service = spawn_service_with_limit(64).await;
        let urls: Vec<String> = (0..10)
            .map(|i| format!("https://a.example/{}", i))
            .collect();

        let response = reqwest::Client::new()
            .post(format!("{}/api/check-links", service))
            .json(&json!({ "urls": urls }))
            .send()
            .await
            .unwrap();

        assert_eq!(response.status().as_u16(), 400);
        let error: ErrorResponse = response.json().await.unwrap();
        assert!(!error.error.is_empty());
    }

    #[tokio::test]
    async fn test_health() {
        let service = spawn_service().await;
        let body: serde_json::Value = reqwest::get(format!("{}/health", service))
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(body, json!({ "status": "ok" }));
    }

    #[test]
    fn test_internal_error_response() {
        let response = CheckerError::Internal("probe task failed".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_dispatch_through_service() {
        let target = MockServer::start().await;
        Mock::given(method("HEAD"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&target)
            .await;

        let service = spawn_service().await;
        let remote = RemoteVerifier::new(format!("{}/api/check-links", service)).unwrap();

        let links: Vec<LinkRecord> = (0..12)
            .map(|i| LinkRecord::pending(format!("{}/doc/{}", target.uri(), i), 1))
            .collect();

        let checked = BatchDispatcher::default()
            .dispatch(links, &remote, |_| {})
            .await;

        assert_eq!(checked.len(), 12);
        assert!(checked.iter().all(|l| l.status == Some(200)));
    }
}
