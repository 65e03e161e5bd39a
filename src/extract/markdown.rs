// src/extract/markdown.rs
// =============================================================================
// Extracts links from plain text and Markdown documents.
//
// Pages are separated by form feed characters (\x0c), which is how
// `pdftotext` marks page breaks. Page N is the text after the (N-1)-th form
// feed. A document without form feeds is a single page.
//
// Within a page we collect:
// - Markdown links and autolinks: [text](https://...) and <https://...>
// - Bare http(s):// tokens in ordinary text
//
// Only http:// and https:// links are kept; mailto:, relative paths etc. are
// skipped.
// =============================================================================

use super::is_http_link;
use crate::links::LinkRecord;
use pulldown_cmark::{Event, Parser, Tag};

const PAGE_SEPARATOR: char = '\x0c';

// Characters that commonly end a sentence or wrap a URL in prose and are
// almost never the last character of the URL itself.
const TRAILING_PUNCTUATION: &[char] = &['.', ',', ';', ':', '!', '?', ')', ']', '>', '"', '\''];

pub fn extract_markdown_links(text: &str) -> Vec<LinkRecord> {
    let mut links = Vec::new();

    for (index, page_text) in text.split(PAGE_SEPARATOR).enumerate() {
        let page = index as u32 + 1;
        for url in page_links(page_text) {
            links.push(LinkRecord::pending(url, page));
        }
    }

    links
}

// Collects the links of a single page in reading order.
fn page_links(markdown: &str) -> Vec<String> {
    let mut links = Vec::new();

    // Depth of nested link tags; text inside a link is its label, not a URL
    // of its own
    let mut link_depth = 0usize;

    // pulldown-cmark may emit one run of text as several Text events, so we
    // buffer them and scan the whole run at once
    let mut text_run = String::new();

    for event in Parser::new(markdown) {
        match event {
            Event::Start(Tag::Link(_link_type, dest_url, _title)) => {
                scan_bare_urls(&text_run, &mut links);
                text_run.clear();

                link_depth += 1;
                let url = dest_url.to_string();
                if is_http_link(&url) {
                    links.push(url);
                }
            }
            Event::End(Tag::Link(..)) => {
                text_run.clear();
                link_depth = link_depth.saturating_sub(1);
            }
            Event::Text(text) | Event::Code(text) if link_depth == 0 => {
                text_run.push_str(&text);
            }
            Event::SoftBreak | Event::HardBreak => {
                text_run.push(' ');
            }
            _ => {
                scan_bare_urls(&text_run, &mut links);
                text_run.clear();
            }
        }
    }
    scan_bare_urls(&text_run, &mut links);

    links
}

fn scan_bare_urls(text: &str, links: &mut Vec<String>) {
    for token in text.split_whitespace() {
        // Earliest scheme wins, so an https:// URL carrying an http:// URL in
        // its query keeps its own prefix
        let start = match ["http://", "https://"]
            .iter()
            .filter_map(|scheme| token.find(scheme))
            .min()
        {
            Some(start) => start,
            None => continue,
        };
        let candidate = token[start..].trim_end_matches(TRAILING_PUNCTUATION);
        if is_http_link(candidate) && candidate.len() > "http://".len() {
            links.push(candidate.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn urls(records: &[LinkRecord]) -> Vec<&str> {
        records.iter().map(|r| r.url.as_str()).collect()
    }

    #[test]
    fn test_extract_simple_link() {
        let links = extract_markdown_links("Check out [Rust](https://www.rust-lang.org)!");
        assert_eq!(urls(&links), vec!["https://www.rust-lang.org"]);
        assert_eq!(links[0].page, 1);
        assert_eq!(links[0].status, None);
    }

    #[test]
    fn test_pages_split_on_form_feed() {
        let text = "intro https://a.example/one\x0cnothing here\x0csee [b](https://b.example/)";
        let links = extract_markdown_links(text);

        assert_eq!(links.len(), 2);
        assert_eq!(links[0].url, "https://a.example/one");
        assert_eq!(links[0].page, 1);
        assert_eq!(links[1].url, "https://b.example/");
        assert_eq!(links[1].page, 3);
    }

    #[test]
    fn test_bare_url_trailing_punctuation() {
        let links = extract_markdown_links("Visit https://ok.example/a. Or (https://ok.example/b), ok?");
        assert_eq!(
            urls(&links),
            vec!["https://ok.example/a", "https://ok.example/b"]
        );
    }

    #[test]
    fn test_link_label_is_not_scanned() {
        let links = extract_markdown_links("[https://label.example](https://target.example)");
        assert_eq!(urls(&links), vec!["https://target.example"]);
    }

    #[test]
    fn test_autolink() {
        let links = extract_markdown_links("<https://auto.example/x>");
        assert_eq!(urls(&links), vec!["https://auto.example/x"]);
    }

    #[test]
    fn test_skip_mailto_and_relative_links() {
        let links = extract_markdown_links("[email](mailto:test@example.com) [docs](./docs/README.md)");
        assert!(links.is_empty());
    }

    #[test]
    fn test_nested_http_url_keeps_outer_https_prefix() {
        let links = extract_markdown_links("see https://a.example/login?next=http://b.example/x now");
        assert_eq!(urls(&links), vec!["https://a.example/login?next=http://b.example/x"]);
    }

    #[test]
    fn test_url_across_line_break_is_two_tokens() {
        let links = extract_markdown_links("first https://a.example\nsecond https://b.example");
        assert_eq!(urls(&links), vec!["https://a.example", "https://b.example"]);
    }
}
