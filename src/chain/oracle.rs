//! Encryption oracle seam: opaque ciphertext handles for payload chunks.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::Address;

/// Opaque handle returned by the oracle for one payload chunk. Handle order
/// must match chunk order; the contract side interprets the concatenation as
/// the original payload's ciphertext sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncryptedChunk(pub Vec<u8>);

impl EncryptedChunk {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(&self.0)
    }
}

#[derive(Debug, Error)]
#[error("encryption oracle error: {0}")]
pub struct OracleError(pub String);

/// External confidential-compute service. `is_ready` reflects whether the
/// SDK finished its own `initialize()`; the encoder checks it before the
/// first chunk, never mid-stream.
#[async_trait]
pub trait EncryptionOracle: Send + Sync {
    fn is_ready(&self) -> bool;

    async fn encrypt_chunk(
        &self,
        contract: &str,
        account: &Address,
        chunk: &[u8],
    ) -> Result<EncryptedChunk, OracleError>;
}
