// src/checker/http.rs
// =============================================================================
// The link verifier: decides whether URLs are alive by probing them over HTTP.
//
// Per URL:
// 1. HEAD request with its own timeout
// 2. If the server answers 405 (Method Not Allowed), one GET request with a
//    fresh, independent timeout; its status replaces the HEAD status
// 3. Timeout or any network-level error -> status 0
//
// Every URL of a batch is probed at the same time, one tokio task each. There
// is no concurrency cap here: the caller bounds the batch size.
//
// Rust concepts:
// - tokio::spawn: independent tasks, so one slow URL never holds up another
// - tokio::time::timeout: wraps a future with a deadline; when it fires the
//   request future is dropped, which cancels that probe and nothing else
// - join_all: waits for every task of the batch
// =============================================================================

use crate::config::CheckerConfig;
use crate::error::{CheckerError, Result};
use crate::links::{normalize_status, CheckResult};
use futures::future::join_all;
use reqwest::{Client, Method, StatusCode};
use std::time::Duration;
use tracing::{debug, instrument};

/// Why a probe produced no status code. Only used for logging: every variant
/// is reported to the caller as status 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeFailure {
    /// The probe's own deadline fired
    Timeout,
    /// Could not resolve hostname
    Dns,
    /// Connection refused / reset / unreachable
    Connect,
    /// TLS handshake or certificate problem
    Tls,
    /// Redirect loop or too many redirects
    Redirect,
    /// Anything else reqwest reports (bad URL, protocol error, ...)
    Other(String),
}

impl ProbeFailure {
    // Sorts a reqwest error into a ProbeFailure.
    //
    // reqwest does not expose DNS/TLS failures as distinct kinds, so we look
    // at the error chain text for those.
    fn from_reqwest(error: &reqwest::Error) -> Self {
        let text = error_chain_text(error).to_lowercase();

        if error.is_timeout() {
            ProbeFailure::Timeout
        } else if error.is_redirect() {
            ProbeFailure::Redirect
        } else if text.contains("dns") || text.contains("resolve") {
            ProbeFailure::Dns
        } else if text.contains("certificate") || text.contains("tls") || text.contains("ssl") {
            ProbeFailure::Tls
        } else if error.is_connect() {
            ProbeFailure::Connect
        } else {
            ProbeFailure::Other(error.to_string())
        }
    }
}

impl std::fmt::Display for ProbeFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProbeFailure::Timeout => write!(f, "request timed out"),
            ProbeFailure::Dns => write!(f, "could not resolve hostname"),
            ProbeFailure::Connect => write!(f, "connection failed"),
            ProbeFailure::Tls => write!(f, "TLS error"),
            ProbeFailure::Redirect => write!(f, "too many redirects"),
            ProbeFailure::Other(message) => write!(f, "{}", message),
        }
    }
}

fn error_chain_text(error: &(dyn std::error::Error + 'static)) -> String {
    let mut text = error.to_string();
    let mut source = error.source();
    while let Some(inner) = source {
        text.push_str(": ");
        text.push_str(&inner.to_string());
        source = inner.source();
    }
    text
}

/// Probes URLs and reports one status code per URL.
///
/// Cloning is cheap: the reqwest client is reference counted, so all clones
/// share one connection pool.
#[derive(Debug, Clone)]
pub struct Verifier {
    client: Client,
    timeout: Duration,
}

impl Verifier {
    /// Builds a verifier from the probe settings of `config`.
    pub fn new(config: &CheckerConfig) -> Result<Self> {
        let client = Client::builder().user_agent(&config.user_agent).build()?;

        Ok(Self {
            client,
            timeout: config.probe_timeout(),
        })
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Checks every URL concurrently and returns one result per URL, in input
    /// order. Duplicate URLs are probed independently.
    ///
    /// Network problems with individual URLs never fail the batch. The only
    /// error is an internal one: a probe task that could not be joined.
    #[instrument(skip_all, fields(urls = urls.len()))]
    pub async fn check_links(&self, urls: &[String]) -> Result<Vec<CheckResult>> {
        let tasks = urls.iter().cloned().map(|url| {
            let verifier = self.clone();
            tokio::spawn(async move { verifier.check_link(url).await })
        });

        let joined = join_all(tasks).await;

        joined
            .into_iter()
            .map(|task| {
                task.map_err(|e| CheckerError::Internal(format!("probe task failed: {}", e)))
            })
            .collect()
    }

    /// Checks a single URL: HEAD, then GET if HEAD is answered with 405.
    pub async fn check_link(&self, url: String) -> CheckResult {
        let outcome = match self.probe(Method::HEAD, &url).await {
            Ok(StatusCode::METHOD_NOT_ALLOWED) => {
                debug!(url = %url, "HEAD not allowed, retrying with GET");
                self.probe(Method::GET, &url).await
            }
            other => other,
        };

        match outcome {
            Ok(code) => {
                debug!(url = %url, status = code.as_u16(), "checked");
                CheckResult {
                    url,
                    status: normalize_status(code.as_u16()),
                }
            }
            Err(failure) => {
                debug!(url = %url, %failure, "probe failed");
                CheckResult::network_error(url)
            }
        }
    }

    // One request with its own deadline. Only the response head is awaited;
    // the body of a GET is never read.
    async fn probe(&self, method: Method, url: &str) -> std::result::Result<StatusCode, ProbeFailure> {
        let request = self.client.request(method, url).send();

        match tokio::time::timeout(self.timeout, request).await {
            Ok(Ok(response)) => Ok(response.status()),
            Ok(Err(e)) => Err(ProbeFailure::from_reqwest(&e)),
            Err(_elapsed) => Err(ProbeFailure::Timeout),
        }
    }
}
