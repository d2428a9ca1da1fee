//! Error taxonomy for the mint workflow.
//!
//! Every variant is terminal for the current attempt: the core never retries
//! on its own, each error is surfaced verbatim for user-facing display. The
//! one place errors are swallowed is per-candidate probe failures during
//! operation resolution (logged at debug, they drive the fallback iteration).

use thiserror::Error;

pub type MintResult<T> = Result<T, MintError>;

#[derive(Debug, Error)]
pub enum MintError {
    /// The wallet provider is missing (browser: `window.ethereum` absent) or
    /// its transport failed. Carries the underlying reason.
    #[error("wallet provider unavailable: {0}")]
    WalletUnavailable(String),

    #[error("wallet request rejected by the user")]
    UserRejected,

    #[error("wallet not connected")]
    NotConnected,

    #[error("invalid mint target: {0}")]
    InvalidTarget(String),

    /// Every candidate operation was absent from the contract ABI or failed
    /// during submission. No transaction was submitted.
    #[error("contract exposes none of the candidate mint operations")]
    NoSupportedOperation,

    #[error("chain switch failed: {0}")]
    ChainSwitchFailed(String),

    /// The encryption oracle has not completed its own initialization.
    #[error("encryption oracle not initialized")]
    EncryptionUnavailable,

    /// The oracle failed mid-stream on one chunk.
    #[error("encryption failed: {0}")]
    EncryptionFailed(String),

    #[error("transaction submission failed: {0}")]
    SubmissionFailed(String),

    #[error("transaction confirmation failed: {0}")]
    ConfirmationFailed(String),
}
