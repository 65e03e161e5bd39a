// src/checker/mod.rs
// =============================================================================
// The link verifier.
//
// Submodules:
// - http: probes URLs (HEAD, GET fallback, per-probe timeout)
// - request: validates the `{ "urls": [...] }` body the verifier endpoint
//   receives
// =============================================================================

mod http;
mod request;

pub use http::Verifier;
pub use request::parse_check_request;
