// src/extract/html.rs
// =============================================================================
// Extracts links from an HTML document.
//
// An HTML file is a single page. Every <a href> is collected; relative hrefs
// are resolved against `base_url` when one is given and skipped otherwise.
//
// We use the `scraper` crate for the DOM and CSS selectors, and the `url`
// crate to resolve relative links the way a browser does.
// =============================================================================

use super::is_http_link;
use crate::links::LinkRecord;
use scraper::{Html, Selector};
use url::Url;

const HTML_PAGE: u32 = 1;

pub fn extract_html_links(html: &str, base_url: Option<&str>) -> Vec<LinkRecord> {
    let document = Html::parse_document(html);

    // "a[href]" is a constant, valid selector
    let selector = Selector::parse("a[href]").expect("static selector");

    let base = match base_url.map(Url::parse) {
        Some(Ok(url)) => Some(url),
        Some(Err(e)) => {
            tracing::warn!(base_url = ?base_url, "invalid base URL, relative links skipped: {}", e);
            None
        }
        None => None,
    };

    document
        .select(&selector)
        .filter_map(|element| element.value().attr("href"))
        .filter_map(|href| resolve_url(base.as_ref(), href))
        .filter(|url| is_http_link(url))
        .map(|url| LinkRecord::pending(url, HTML_PAGE))
        .collect()
}

// Resolves a possibly-relative href to an absolute URL
//
// Examples (base = "https://example.com/page"):
//   "/docs"              -> Some("https://example.com/docs")
//   "https://other.com"  -> Some("https://other.com/")
//   "/docs" without base -> None
fn resolve_url(base: Option<&Url>, href: &str) -> Option<String> {
    match Url::parse(href) {
        Ok(url) => Some(url.to_string()),
        Err(_) => base.and_then(|base| base.join(href).ok()).map(|url| url.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn urls(records: &[LinkRecord]) -> Vec<&str> {
        records.iter().map(|r| r.url.as_str()).collect()
    }

    #[test]
    fn test_extract_absolute_link() {
        let html = r#"<a href="https://www.rust-lang.org">Rust</a>"#;
        let links = extract_html_links(html, None);
        assert_eq!(urls(&links), vec!["https://www.rust-lang.org/"]);
        assert_eq!(links[0].page, 1);
    }

    #[test]
    fn test_resolve_relative_link() {
        let html = r#"<a href="/docs">Docs</a>"#;
        let links = extract_html_links(html, Some("https://example.com/page"));
        assert_eq!(urls(&links), vec!["https://example.com/docs"]);
    }

    #[test]
    fn test_relative_link_without_base_is_skipped() {
        let html = r#"<a href="/docs">Docs</a><a href="https://a.example/">A</a>"#;
        let links = extract_html_links(html, None);
        assert_eq!(urls(&links), vec!["https://a.example/"]);
    }

    #[test]
    fn test_skip_mailto() {
        let html = r#"<a href="mailto:test@example.com">Email</a>"#;
        let links = extract_html_links(html, Some("https://example.com"));
        assert!(links.is_empty());
    }

    #[test]
    fn test_multiple_links() {
        let html = r#"
            <a href="https://rust-lang.org">Rust</a>
            <a href="/docs">Docs</a>
            <a href="../about">About</a>
        "#;
        let links = extract_html_links(html, Some("https://example.com/page/"));
        assert_eq!(links.len(), 3);
    }
}
