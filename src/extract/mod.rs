// src/extract/mod.rs
// =============================================================================
// Turns a document into the list of links to check.
//
// The output contract is the same for every document kind: a list of
// `{ url, page }` records, status unset, de-duplicated by URL and in page
// order. The first occurrence of a URL wins, so a link that appears on pages
// 2 and 5 is reported for page 2.
//
// Only http:// and https:// links are kept, whatever the document kind.
//
// Submodules:
// - pdf: link annotations of a PDF, page by page
// - json: links already extracted by an external tool
// - markdown: plain text / Markdown, pages separated by form feeds
// - html: a single HTML page
// =============================================================================

mod html;
mod json;
mod markdown;
mod pdf;

pub use html::extract_html_links;
pub use json::parse_link_list;
pub use markdown::extract_markdown_links;
pub use pdf::extract_pdf_links;

use crate::error::Result;
use crate::links::LinkRecord;
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Input formats, chosen by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    Json,
    Html,
    /// Anything else is read as text / Markdown
    Text,
}

impl DocumentKind {
    pub fn from_path(path: &Path) -> Self {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase());

        match extension.as_deref() {
            Some("pdf") => DocumentKind::Pdf,
            Some("json") => DocumentKind::Json,
            Some("html") | Some("htm") => DocumentKind::Html,
            _ => DocumentKind::Text,
        }
    }
}

/// Reads `path` and returns its de-duplicated links, all pending.
///
/// `base_url` is only used for HTML documents, to resolve relative hrefs.
pub fn extract_file(path: &Path, base_url: Option<&str>) -> Result<Vec<LinkRecord>> {
    let kind = DocumentKind::from_path(path);

    let links = match kind {
        DocumentKind::Pdf => extract_pdf_links(&fs::read(path)?)?,
        DocumentKind::Json => parse_link_list(&fs::read_to_string(path)?)?,
        DocumentKind::Html => extract_html_links(&fs::read_to_string(path)?, base_url),
        DocumentKind::Text => extract_markdown_links(&fs::read_to_string(path)?),
    };

    let unique = dedupe_by_url(links);
    tracing::info!(path = %path.display(), ?kind, links = unique.len(), "extracted links");

    Ok(unique)
}

/// True for the only schemes the verifier probes.
pub(crate) fn is_http_link(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

/// Keeps the first record for every URL, preserving order.
pub fn dedupe_by_url(links: Vec<LinkRecord>) -> Vec<LinkRecord> {
    let mut seen = HashSet::new();
    links
        .into_iter()
        .filter(|link| seen.insert(link.url.clone()))
        .collect()
}
