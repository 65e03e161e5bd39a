// src/extract/json.rs
// =============================================================================
// Reads links that were already extracted by an external tool, e.g. a PDF
// annotation dump:
//
//   [ { "url": "https://ok.example/a", "page": 1 }, ... ]
//
// Any `status` present in the file is dropped: a fresh extraction always
// starts out pending. Only http:// and https:// links are kept.
// =============================================================================

use super::is_http_link;
use crate::error::Result;
use crate::links::LinkRecord;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct ExtractedLink {
    url: String,
    page: u32,
}

pub fn parse_link_list(json: &str) -> Result<Vec<LinkRecord>> {
    let extracted: Vec<ExtractedLink> = serde_json::from_str(json)?;

    Ok(extracted
        .into_iter()
        .filter(|link| is_http_link(&link.url))
        .map(|link| LinkRecord::pending(link.url, link.page))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_list_keeps_only_http_links() {
        let links = parse_link_list(
            r#"[
                {"url": "https://ok.example/a", "page": 1},
                {"url": "mailto:x@y.z", "page": 2},
                {"url": "http://plain.example/", "page": 3}
            ]"#,
        )
        .unwrap();
        assert_eq!(
            links,
            vec![
                LinkRecord::pending("https://ok.example/a", 1),
                LinkRecord::pending("http://plain.example/", 3),
            ]
        );
    }

    #[test]
    fn test_previous_status_is_dropped() {
        let links =
            parse_link_list(r#"[{"url": "https://ok.example/a", "page": 1, "status": 404}]"#)
                .unwrap();
        assert_eq!(links[0].status, None);
    }

    #[test]
    fn test_malformed_list() {
        assert!(parse_link_list(r#"{"url": "https://ok.example/a"}"#).is_err());
        assert!(parse_link_list(r#"[{"page": 1}]"#).is_err());
    }
}
