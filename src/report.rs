// src/report.rs
// =============================================================================
// Presentation of link records: the progress line printed while chunks are
// being verified, and the final table or JSON dump.
//
// Status display follows LinkState only:
//   ⏳ pending (code shown as "...")
//   ✅ valid (2xx)
//   ❌ broken (everything else; a network error / timeout shows code 0)
// =============================================================================

use crate::dispatch::DispatchEvent;
use crate::links::{LinkRecord, LinkState};
use anyhow::Result;
use std::io::Write;

const URL_COLUMN: usize = 60;

/// Counts per display state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub valid: usize,
    pub broken: usize,
    pub pending: usize,
}

impl Summary {
    pub fn of(links: &[LinkRecord]) -> Self {
        let mut summary = Summary::default();
        for link in links {
            match link.state() {
                LinkState::Valid => summary.valid += 1,
                LinkState::Broken => summary.broken += 1,
                LinkState::Pending => summary.pending += 1,
            }
        }
        summary
    }

    pub fn total(&self) -> usize {
        self.valid + self.broken + self.pending
    }
}

pub fn status_icon(state: LinkState) -> &'static str {
    match state {
        LinkState::Pending => "⏳",
        LinkState::Valid => "✅",
        LinkState::Broken => "❌",
    }
}

fn status_code(status: Option<u16>) -> String {
    match status {
        Some(code) => code.to_string(),
        None => "...".to_string(),
    }
}

/// One line on stderr per dispatcher event.
pub fn print_progress(event: &DispatchEvent<'_>) {
    eprintln!("{}", progress_line(event));
}

// While checking, every line carries the hourglass; the last one is a summary.
fn progress_line(event: &DispatchEvent<'_>) -> String {
    let line = match event {
        DispatchEvent::Started { links, chunks } => {
            format!("Checking {} link(s) in {} chunk(s)...", links.len(), chunks)
        }
        DispatchEvent::ChunkMerged {
            links,
            chunk,
            chunks,
        } => {
            let summary = Summary::of(links);
            format!(
                "Checking link statuses... chunk {}/{} ({} of {} checked)",
                chunk,
                chunks,
                summary.total() - summary.pending,
                summary.total()
            )
        }
        DispatchEvent::ChunkFailed {
            chunk,
            chunks,
            error,
        } => format!("chunk {}/{} could not be checked: {}", chunk, chunks, error),
        DispatchEvent::Finished { links } => {
            let summary = Summary::of(links);
            format!(
                "Done: {} valid, {} broken, {} pending",
                summary.valid, summary.broken, summary.pending
            )
        }
    };

    if event.checking() {
        format!("{} {}", status_icon(LinkState::Pending), line)
    } else {
        format!("🌐 {}", line)
    }
}

/// Prints the final results either as a table or as JSON.
pub fn print_results(links: &[LinkRecord], json: bool) -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(links)?)?;
    } else {
        write_table(&mut out, links)?;
    }
    Ok(())
}

pub fn write_table<W: Write>(out: &mut W, links: &[LinkRecord]) -> Result<()> {
    writeln!(out, "Found {} Links", links.len())?;
    writeln!(
        out,
        "{:<8} {:<width$} {:>6} {:>6}",
        "STATUS",
        "URL",
        "PAGE",
        "CODE",
        width = URL_COLUMN
    )?;
    writeln!(out, "{}", "=".repeat(URL_COLUMN + 23))?;

    for link in links {
        writeln!(
            out,
            "{:<8} {:<width$} {:>6} {:>6}",
            status_icon(link.state()),
            truncate_url(&link.url),
            link.page,
            status_code(link.status),
            width = URL_COLUMN
        )?;
    }

    let summary = Summary::of(links);
    writeln!(out)?;
    writeln!(out, "📊 Summary:")?;
    writeln!(out, "   ✅ Valid: {}", summary.valid)?;
    writeln!(out, "   ❌ Broken: {}", summary.broken)?;
    if summary.pending > 0 {
        writeln!(out, "   ⏳ Pending: {}", summary.pending)?;
    }
    writeln!(out, "   📋 Total: {}", summary.total())?;

    Ok(())
}

// Shortens long URLs to fit the column, on a char boundary.
fn truncate_url(url: &str) -> String {
    if url.chars().count() > URL_COLUMN - 3 {
        let head: String = url.chars().take(URL_COLUMN - 3).collect();
        format!("{}...", head)
    } else {
        url.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(url: &str, status: Option<u16>) -> LinkRecord {
        LinkRecord {
            url: url.to_string(),
            page: 1,
            status,
        }
    }

    #[test]
    fn test_summary_counts() {
        let links = vec![
            record("https://a.example", Some(200)),
            record("https://b.example", Some(0)),
            record("https://c.example", Some(404)),
            record("https://d.example", None),
        ];
        assert_eq!(
            Summary::of(&links),
            Summary {
                valid: 1,
                broken: 2,
                pending: 1
            }
        );
        assert_eq!(Summary::of(&links).total(), 4);
    }

    #[test]
    fn test_table_rows() {
        let links = vec![
            record("https://ok.example/a", Some(200)),
            record("https://down.example", Some(0)),
            record("https://later.example", None),
        ];
        let mut out = Vec::new();
        write_table(&mut out, &links).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.starts_with("Found 3 Links"));
        let ok_row = text.lines().find(|l| l.contains("ok.example")).unwrap();
        assert!(ok_row.starts_with("✅"));
        assert!(ok_row.trim_end().ends_with("200"));
        let down_row = text.lines().find(|l| l.contains("down.example")).unwrap();
        assert!(down_row.starts_with("❌"));
        assert!(down_row.trim_end().ends_with('0'));
        let pending_row = text.lines().find(|l| l.contains("later.example")).unwrap();
        assert!(pending_row.starts_with("⏳"));
        assert!(pending_row.trim_end().ends_with("..."));
        assert!(text.contains("⏳ Pending: 1"));
    }

    #[test]
    fn test_progress_lines() {
        let links = vec![
            record("https://a.example", Some(200)),
            record("https://b.example", Some(404)),
            record("https://c.example", None),
        ];

        let merged = progress_line(&DispatchEvent::ChunkMerged {
            links: &links,
            chunk: 1,
            chunks: 2,
        });
        assert_eq!(
            merged,
            "⏳ Checking link statuses... chunk 1/2 (2 of 3 checked)"
        );

        let failed = progress_line(&DispatchEvent::ChunkFailed {
            chunk: 2,
            chunks: 2,
            error: &crate::error::CheckerError::Internal("boom".into()),
        });
        assert!(failed.starts_with("⏳ chunk 2/2 could not be checked"));

        let finished = progress_line(&DispatchEvent::Finished { links: &links });
        assert_eq!(finished, "🌐 Done: 1 valid, 1 broken, 1 pending");
    }

    #[test]
    fn test_truncate_long_url() {
        let long = format!("https://example.com/{}", "a".repeat(100));
        let shown = truncate_url(&long);
        assert_eq!(shown.chars().count(), URL_COLUMN);
        assert!(shown.ends_with("..."));
        assert_eq!(truncate_url("https://a.example"), "https://a.example");
    }
}
