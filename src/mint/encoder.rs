//! Chunked confidential-metadata encoding.
//!
//! The payload is split into fixed-size slices and each slice is encrypted
//! through the oracle strictly in order. The loop is sequential on purpose:
//! progress reporting and the readiness check stay deterministic, and the
//! contract side relies on handle order matching slice order.

use std::num::NonZeroUsize;

use tracing::debug;

use crate::chain::{Address, EncryptedChunk, EncryptionOracle};
use crate::error::{MintError, MintResult};

/// Number of chunks [`encode`] produces for a payload of `payload_len` bytes.
pub fn chunk_count(payload_len: usize, chunk_size: NonZeroUsize) -> usize {
    payload_len.div_ceil(chunk_size.get())
}

/// Split `payload` into consecutive chunks of at most `chunk_size` bytes
/// (the last may be shorter), encrypt each sequentially, and return the
/// handles in slice order. `progress` receives the cumulative percentage
/// (0-100 by processed bytes over total) after every chunk.
///
/// Oracle readiness is checked before the first chunk; a not-yet-initialized
/// oracle fails the whole call with `EncryptionUnavailable` rather than
/// mid-stream. An empty payload yields no chunks and no progress callbacks.
pub async fn encode<F>(
    oracle: &dyn EncryptionOracle,
    contract: &str,
    account: &Address,
    payload: &[u8],
    chunk_size: NonZeroUsize,
    mut progress: F,
) -> MintResult<Vec<EncryptedChunk>>
where
    F: FnMut(u8) + Send,
{
    if !oracle.is_ready() {
        return Err(MintError::EncryptionUnavailable);
    }
    if payload.is_empty() {
        return Ok(Vec::new());
    }

    let total = payload.len();
    let mut handles = Vec::with_capacity(chunk_count(total, chunk_size));
    let mut done = 0usize;

    for chunk in payload.chunks(chunk_size.get()) {
        let handle = oracle
            .encrypt_chunk(contract, account, chunk)
            .await
            .map_err(|e| MintError::EncryptionFailed(e.to_string()))?;
        handles.push(handle);

        done += chunk.len();
        let pct = (done * 100 / total) as u8;
        debug!(done, total, pct, "encrypted chunk");
        progress(pct);
    }

    Ok(handles)
}

/// Concatenate chunk handles into the single argument blob the mint call
/// takes, in slice order.
pub fn concat(handles: &[EncryptedChunk]) -> Vec<u8> {
    handles
        .iter()
        .flat_map(|h| h.as_bytes().iter().copied())
        .collect()
}
