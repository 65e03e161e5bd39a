// src/server/mod.rs
// =============================================================================
// The verifier as an HTTP service.
//
// Routes:
// - POST /api/check-links   { "urls": [...] } -> { "results": [...] }
// - GET  /health            -> { "status": "ok" }
//
// Status codes:
// - 200 with one result per URL (per-URL failures are status 0 inside)
// - 400 { "error": ... } when the body is not a list of URLs, or is larger
//   than `max_body_bytes`
// - 500 { "error": "Internal Server Error" } on unexpected failure
// =============================================================================

mod routes;

pub use routes::router;

use crate::checker::Verifier;
use crate::config::CheckerConfig;
use crate::error::Result;
use tokio::net::TcpListener;

/// Binds `config.bind` and serves until Ctrl-C.
pub async fn serve(config: &CheckerConfig) -> Result<()> {
    let verifier = Verifier::new(config)?;
    let listener = TcpListener::bind(&config.bind).await?;

    tracing::info!(
        addr = %listener.local_addr()?,
        timeout_ms = verifier.timeout().as_millis() as u64,
        "verifier service listening"
    );

    axum::serve(listener, router(verifier, config.max_body_bytes))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("verifier service stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for Ctrl-C: {}", e);
    }
}
