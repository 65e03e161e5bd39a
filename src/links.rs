// src/links.rs
// =============================================================================
// The data that flows between the extractor, the dispatcher, the verifier and
// the presentation layer.
//
// - LinkRecord: one hyperlink found in the document, plus its latest status
// - CheckRequest / CheckResponse: the JSON bodies of the verifier endpoint
// - CheckResult: one verified URL
//
// A status is either an HTTP status code in [100, 599] or the sentinel 0,
// which means "network error or timeout".
// =============================================================================

use serde::{Deserialize, Serialize};

/// Status reported when a probe timed out or failed at the network level.
pub const NETWORK_ERROR_STATUS: u16 = 0;

/// A hyperlink extracted from the document.
///
/// `status` stays `None` until a chunk containing this URL has been verified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkRecord {
    pub url: String,
    pub page: u32,
    #[serde(default)]
    pub status: Option<u16>,
}

impl LinkRecord {
    /// Builds a record that has not been checked yet.
    pub fn pending(url: impl Into<String>, page: u32) -> Self {
        Self {
            url: url.into(),
            page,
            status: None,
        }
    }

    /// The display state, derived from the latest status only.
    pub fn state(&self) -> LinkState {
        LinkState::from_status(self.status)
    }
}

/// How a link should be presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkState {
    /// Not checked yet
    Pending,
    /// 2xx
    Valid,
    /// Anything else, including the network error sentinel
    Broken,
}

impl LinkState {
    pub fn from_status(status: Option<u16>) -> Self {
        match status {
            None => LinkState::Pending,
            Some(code) if (200..300).contains(&code) => LinkState::Valid,
            Some(_) => LinkState::Broken,
        }
    }
}

/// Body of `POST /api/check-links`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckRequest {
    pub urls: Vec<String>,
}

/// The verified status of one URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckResult {
    pub url: String,
    pub status: u16,
}

impl CheckResult {
    pub fn network_error(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            status: NETWORK_ERROR_STATUS,
        }
    }
}

/// Successful response of the verifier endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckResponse {
    pub results: Vec<CheckResult>,
}

/// Error response of the verifier endpoint (4xx and 5xx).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

// Keeps every reported status inside {0} ∪ [100, 599].
//
// reqwest accepts any three-digit code a server sends; codes outside the HTTP
// range are reported as a failed check.
pub fn normalize_status(code: u16) -> u16 {
    if (100..=599).contains(&code) {
        code
    } else {
        NETWORK_ERROR_STATUS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_from_status() {
        assert_eq!(LinkState::from_status(None), LinkState::Pending);
        assert_eq!(LinkState::from_status(Some(200)), LinkState::Valid);
        assert_eq!(LinkState::from_status(Some(204)), LinkState::Valid);
        assert_eq!(LinkState::from_status(Some(301)), LinkState::Broken);
        assert_eq!(LinkState::from_status(Some(404)), LinkState::Broken);
        assert_eq!(LinkState::from_status(Some(0)), LinkState::Broken);
    }

    #[test]
    fn test_normalize_status() {
        assert_eq!(normalize_status(200), 200);
        assert_eq!(normalize_status(100), 100);
        assert_eq!(normalize_status(599), 599);
        assert_eq!(normalize_status(600), 0);
        assert_eq!(normalize_status(99), 0);
    }

    #[test]
    fn test_pending_record_serializes_null_status() {
        let record = LinkRecord::pending("https://ok.example/a", 1);
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"url": "https://ok.example/a", "page": 1, "status": null})
        );
    }

    #[test]
    fn test_record_without_status_deserializes_as_pending() {
        let record: LinkRecord =
            serde_json::from_str(r#"{"url": "https://ok.example/a", "page": 3}"#).unwrap();
        assert_eq!(record.status, None);
        assert_eq!(record.state(), LinkState::Pending);
    }
}
