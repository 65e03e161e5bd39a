// src/cli.rs
// =============================================================================
// Command-line interface, using clap's derive API.
//
//   pdf-link-checker check paper.pdf
//   pdf-link-checker check links.json
//   pdf-link-checker check report.txt --json --chunk-size 5
//   pdf-link-checker check page.html --base-url https://example.com/
//   pdf-link-checker check report.txt --endpoint http://127.0.0.1:3000/api/check-links
//   pdf-link-checker serve --bind 0.0.0.0:3000
//
// Flags that also exist in the config file override the file's value.
// =============================================================================

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "pdf-link-checker",
    version,
    about = "Extract the links of a document and check that each one is reachable",
    long_about = "pdf-link-checker takes the hyperlinks of a document, checks them in chunks of \
                  ten with a HEAD request (falling back to GET on 405) and reports an HTTP status \
                  per link. Status 0 means the link timed out or could not be reached."
)]
pub struct Cli {
    /// Log progress details to stderr (RUST_LOG overrides this)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file (default: ./pdf-link-checker.toml if present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check every link of a document
    ///
    /// The document kind follows the file extension:
    /// .pdf   - the URI targets of each page's link annotations
    /// .json  - a list of {"url", "page"} objects from an external extractor
    /// .html  - one HTML page
    /// other  - text or Markdown, pages separated by form feeds (pdftotext output)
    Check {
        /// Document to read links from
        input: PathBuf,

        /// Output results as JSON instead of a table
        #[arg(long)]
        json: bool,

        /// Verifier service to send chunks to, instead of checking in process
        #[arg(long)]
        endpoint: Option<String>,

        /// Number of links checked together
        #[arg(long)]
        chunk_size: Option<usize>,

        /// Timeout for each HEAD / GET probe, in milliseconds
        #[arg(long)]
        timeout_ms: Option<u64>,

        /// Base URL for resolving relative links in HTML documents
        #[arg(long)]
        base_url: Option<String>,
    },

    /// Run the verifier as an HTTP service (POST /api/check-links)
    Serve {
        /// Address to listen on
        #[arg(long)]
        bind: Option<String>,

        /// Timeout for each HEAD / GET probe, in milliseconds
        #[arg(long)]
        timeout_ms: Option<u64>,
    },
}
