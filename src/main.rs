// src/main.rs
// =============================================================================
// Entry point of the pdf-link-checker CLI.
//
// What happens here:
// 1. Parse command-line arguments and load the config file
// 2. Dispatch to the subcommand handler (check or serve)
// 3. Exit with the proper code:
//    0 = every link valid, 1 = broken links found,
//    2 = error, or links left unchecked because a chunk failed
// =============================================================================

mod checker;  // src/checker/ - the link verifier
mod cli;      // src/cli.rs - command-line parsing
mod config;   // src/config.rs - config file
mod dispatch; // src/dispatch/ - chunked verification with progress
mod error;    // src/error.rs - CheckerError
mod extract;  // src/extract/ - links from documents
mod links;    // src/links.rs - LinkRecord and the wire types
mod logging;  // src/logging.rs - tracing subscriber
mod report;   // src/report.rs - progress, table and JSON output
mod server;   // src/server/ - the verifier HTTP service

use anyhow::{Context, Result};
use checker::Verifier;
use clap::Parser;
use cli::{Cli, Commands};
use config::CheckerConfig;
use dispatch::{BatchDispatcher, LocalVerifier, RemoteVerifier, VerifyBatch};
use report::Summary;
use std::path::PathBuf;

#[tokio::main]
async fn main() {
    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

async fn run() -> Result<i32> {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    let mut config = CheckerConfig::load(cli.config.as_deref()).context("failed to load config")?;

    match cli.command {
        Commands::Check {
            input,
            json,
            endpoint,
            chunk_size,
            timeout_ms,
            base_url,
        } => {
            if endpoint.is_some() {
                config.endpoint = endpoint;
            }
            if let Some(chunk_size) = chunk_size {
                config.chunk_size = chunk_size;
            }
            if let Some(timeout_ms) = timeout_ms {
                config.probe_timeout_ms = timeout_ms;
            }
            handle_check(&config, input, json, base_url.as_deref()).await
        }
        Commands::Serve { bind, timeout_ms } => {
            if let Some(bind) = bind {
                config.bind = bind;
            }
            if let Some(timeout_ms) = timeout_ms {
                config.probe_timeout_ms = timeout_ms;
            }
            eprintln!("🔌 Verifier service on http://{}/api/check-links", config.bind);
            server::serve(&config).await?;
            Ok(0)
        }
    }
}

// Handles the 'check' subcommand
async fn handle_check(
    config: &CheckerConfig,
    input: PathBuf,
    json: bool,
    base_url: Option<&str>,
) -> Result<i32> {
    eprintln!("🔍 Reading links from {}", input.display());

    let links = extract::extract_file(&input, base_url)
        .with_context(|| format!("failed to read links from {}", input.display()))?;

    if links.is_empty() {
        eprintln!("✅ No links found to check");
        report::print_results(&links, json)?;
        return Ok(0);
    }

    let verifier: Box<dyn VerifyBatch> = match &config.endpoint {
        Some(endpoint) => {
            tracing::info!(endpoint = %endpoint, "using remote verifier");
            Box::new(RemoteVerifier::new(endpoint.clone())?)
        }
        None => {
            let verifier = Verifier::new(config)?;
            tracing::info!(timeout_ms = verifier.timeout().as_millis() as u64, "using in-process verifier");
            Box::new(LocalVerifier::new(verifier))
        }
    };

    let dispatcher = BatchDispatcher::new(config.chunk_size);
    tracing::debug!(chunk_size = dispatcher.chunk_size(), "dispatcher ready");

    let links = dispatcher
        .dispatch(links, verifier.as_ref(), |event| report::print_progress(&event))
        .await;

    report::print_results(&links, json)?;

    let summary = Summary::of(&links);
    if summary.broken > 0 {
        Ok(1)
    } else if summary.pending > 0 {
        Ok(2)
    } else {
        Ok(0)
    }
}
