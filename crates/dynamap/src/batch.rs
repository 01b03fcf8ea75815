//! Store-limit-sized batch dispatch.
//!
//! The store caps batch-get calls at 100 keys and batch-write calls at 25
//! operations. [`send_in_chunks`] owns the partitioning so every caller
//! gets the same behavior: one call per chunk, dispatched sequentially,
//! results concatenated in chunk order, trailing under-sized chunk flushed.

use std::future::Future;

use dynamap_core::Result;

/// Maximum keys per batch-get call.
pub const BATCH_GET_LIMIT: usize = 100;

/// Maximum write operations per batch-write call.
pub const BATCH_WRITE_LIMIT: usize = 25;

/// Sends `items` in chunks of at most `limit`, one `send` call per chunk.
///
/// Each call receives exactly the current chunk, never the full input.
/// An empty input issues no calls. A failing chunk fails the whole
/// operation; chunks already sent stay applied (no compensation).
pub async fn send_in_chunks<T, R, F, Fut>(items: &[T], limit: usize, mut send: F) -> Result<Vec<R>>
where
    T: Clone,
    F: FnMut(Vec<T>) -> Fut,
    Fut: Future<Output = Result<Vec<R>>>,
{
    let mut collected = Vec::new();
    for chunk in items.chunks(limit) {
        tracing::trace!(chunk_len = chunk.len(), "dispatching batch chunk");
        let mut results = send(chunk.to_vec()).await?;
        collected.append(&mut results);
    }
    Ok(collected)
}
