// src/dispatch/batch.rs
// =============================================================================
// The batch dispatcher: feeds the verifier one fixed-size chunk at a time and
// publishes partial results after every chunk.
//
// How it works:
// 1. Split the URLs of the link list into chunks of `chunk_size`
// 2. For each chunk, in order: ask the verifier, wait for the whole chunk
// 3. Merge the results into the working list by URL
// 4. Hand the updated list to the observer, then move on
//
// Only one chunk is in flight at any time. That caps the number of
// simultaneous outbound probes at `chunk_size`. A chunk that fails as a whole
// leaves its links pending and does not stop the remaining chunks.
//
// The working list is owned by `dispatch` and only touched between chunks, so
// it needs no locking.
// =============================================================================

use super::verifier::VerifyBatch;
use crate::error::CheckerError;
use crate::links::{CheckResult, LinkRecord};
use std::collections::HashMap;
use tracing::{debug, info, warn};

pub const DEFAULT_CHUNK_SIZE: usize = 10;

/// What the dispatcher reports while it works.
#[derive(Debug)]
pub enum DispatchEvent<'a> {
    /// Verification is starting; every link is pending.
    Started {
        links: &'a [LinkRecord],
        chunks: usize,
    },
    /// A chunk's results were merged. `chunk` counts from 1.
    ChunkMerged {
        links: &'a [LinkRecord],
        chunk: usize,
        chunks: usize,
    },
    /// A chunk could not be verified; its links keep their previous status.
    ChunkFailed {
        chunk: usize,
        chunks: usize,
        error: &'a CheckerError,
    },
    /// All chunks have been processed.
    Finished { links: &'a [LinkRecord] },
}

impl DispatchEvent<'_> {
    /// True from the start of dispatch until the last chunk is done.
    pub fn checking(&self) -> bool {
        !matches!(self, DispatchEvent::Finished { .. })
    }
}

#[derive(Debug, Clone)]
pub struct BatchDispatcher {
    chunk_size: usize,
}

impl Default for BatchDispatcher {
    fn default() -> Self {
        Self::new(DEFAULT_CHUNK_SIZE)
    }
}

impl BatchDispatcher {
    /// A chunk size of 0 is treated as 1.
    pub fn new(chunk_size: usize) -> Self {
        Self {
            chunk_size: chunk_size.max(1),
        }
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// The URL chunks `dispatch` will send, in order.
    pub fn plan(&self, records: &[LinkRecord]) -> Vec<Vec<String>> {
        records
            .chunks(self.chunk_size)
            .map(|chunk| chunk.iter().map(|record| record.url.clone()).collect())
            .collect()
    }

    /// Verifies `records` chunk by chunk and returns the merged list.
    ///
    /// `observer` sees a `Started` event, one `ChunkMerged` or `ChunkFailed`
    /// per chunk, and a final `Finished` event.
    pub async fn dispatch<V, F>(
        &self,
        records: Vec<LinkRecord>,
        verifier: &V,
        mut observer: F,
    ) -> Vec<LinkRecord>
    where
        V: VerifyBatch + ?Sized,
        F: FnMut(DispatchEvent<'_>),
    {
        let mut links = records;
        let plan = self.plan(&links);
        let chunks = plan.len();

        info!(links = links.len(), chunks, chunk_size = self.chunk_size, "dispatch started");
        observer(DispatchEvent::Started {
            links: &links,
            chunks,
        });

        for (index, urls) in plan.iter().enumerate() {
            let chunk = index + 1;
            debug!(chunk, chunks, size = urls.len(), "verifying chunk");

            match verifier.verify(urls).await {
                Ok(results) => {
                    merge_results(&mut links, &results);
                    observer(DispatchEvent::ChunkMerged {
                        links: &links,
                        chunk,
                        chunks,
                    });
                }
                Err(error) => {
                    warn!(chunk, chunks, "chunk verification failed: {}", error);
                    observer(DispatchEvent::ChunkFailed {
                        chunk,
                        chunks,
                        error: &error,
                    });
                }
            }
        }

        info!("dispatch finished");
        observer(DispatchEvent::Finished { links: &links });

        links
    }
}

/// Copies each result's status onto every record with the same URL.
///
/// Records without a matching result are left untouched.
pub fn merge_results(links: &mut [LinkRecord], results: &[CheckResult]) {
    // First result for a URL wins
    let mut by_url: HashMap<&str, u16> = HashMap::new();
    for result in results {
        by_url.entry(result.url.as_str()).or_insert(result.status);
    }

    for link in links.iter_mut() {
        if let Some(&status) = by_url.get(link.url.as_str()) {
            link.status = Some(status);
        }
    }
}
