// src/dispatch/verifier.rs
// =============================================================================
// Where a chunk of URLs gets verified.
//
// The dispatcher only needs "give me results for these URLs". Two ways to
// answer that:
// - LocalVerifier: run the verifier in this process
// - RemoteVerifier: POST the chunk to a verifier service
//   (`pdf-link-checker serve`, or anything speaking the same JSON)
// =============================================================================

use crate::checker::Verifier;
use crate::error::{CheckerError, Result};
use crate::links::{CheckRequest, CheckResponse, CheckResult, ErrorResponse};
use async_trait::async_trait;
use reqwest::Client;

/// Verifies one chunk of URLs.
///
/// An `Err` means the whole chunk made no progress. Per-URL failures are
/// reported inside the results as status 0.
#[async_trait]
pub trait VerifyBatch: Send + Sync {
    async fn verify(&self, urls: &[String]) -> Result<Vec<CheckResult>>;
}

pub struct LocalVerifier {
    verifier: Verifier,
}

impl LocalVerifier {
    pub fn new(verifier: Verifier) -> Self {
        Self { verifier }
    }
}

#[async_trait]
impl VerifyBatch for LocalVerifier {
    async fn verify(&self, urls: &[String]) -> Result<Vec<CheckResult>> {
        self.verifier.check_links(urls).await
    }
}

/// Client for a verifier service endpoint.
pub struct RemoteVerifier {
    http: Client,
    endpoint: String,
}

impl RemoteVerifier {
    pub fn new(endpoint: impl Into<String>) -> Result<Self> {
        let http = Client::builder().build()?;

        Ok(Self {
            http,
            endpoint: endpoint.into(),
        })
    }
}

#[async_trait]
impl VerifyBatch for RemoteVerifier {
    async fn verify(&self, urls: &[String]) -> Result<Vec<CheckResult>> {
        let request = CheckRequest {
            urls: urls.to_vec(),
        };

        let response = self.http.post(&self.endpoint).json(&request).send().await?;

        let status = response.status();
        if !status.is_success() {
            // Prefer the service's own `{ "error": ... }` message
            let message = match response.json::<ErrorResponse>().await {
                Ok(body) => body.error,
                Err(_) => status
                    .canonical_reason()
                    .unwrap_or("Unknown error")
                    .to_string(),
            };
            return Err(CheckerError::Service {
                status: status.as_u16(),
                message,
            });
        }

        let body: CheckResponse = response.json().await?;
        Ok(body.results)
    }
}
