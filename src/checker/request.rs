// src/checker/request.rs
// =============================================================================
// Structural validation of a verifier request body.
//
// A valid body is a JSON object whose `urls` field is an array of strings.
// The URLs themselves are not validated: a string that is not a usable URL
// is simply probed and reported as status 0.
// =============================================================================

use crate::error::{CheckerError, Result};
use crate::links::CheckRequest;
use serde_json::Value;

pub fn parse_check_request(body: &[u8]) -> Result<CheckRequest> {
    let value: Value = serde_json::from_slice(body)
        .map_err(|e| CheckerError::InvalidInput(format!("request body is not JSON: {}", e)))?;

    let urls = value
        .get("urls")
        .and_then(Value::as_array)
        .ok_or_else(|| CheckerError::InvalidInput("Invalid URLs provided".to_string()))?;

    let urls = urls
        .iter()
        .map(|url| {
            url.as_str().map(str::to_string).ok_or_else(|| {
                CheckerError::InvalidInput(format!("Invalid URLs provided: {} is not a string", url))
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(CheckRequest { urls })
}
