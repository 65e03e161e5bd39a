// src/dispatch/mod.rs
// =============================================================================
// Client-side orchestration of a verification session.
//
// - batch: splits the link list into chunks and merges results as they come
// - verifier: the VerifyBatch seam, with in-process and remote implementations
// =============================================================================

mod batch;
mod verifier;

pub use batch::{BatchDispatcher, DispatchEvent};
pub use verifier::{LocalVerifier, RemoteVerifier, VerifyBatch};
