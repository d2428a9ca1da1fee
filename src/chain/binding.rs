//! Contract binding seam: named callable operations over a bound contract.

use async_trait::async_trait;
use thiserror::Error;

use super::Address;

#[derive(Debug, Error)]
pub enum BindingError {
    #[error("no such operation: {0}")]
    UnknownOperation(String),

    #[error("submission failed: {0}")]
    Submission(String),

    #[error("confirmation failed: {0}")]
    Confirmation(String),
}

/// A contract already bound to `(address, abi, signer)` by the adapter.
/// Exposes named operations; the dispatcher probes these in priority order
/// instead of requiring upfront ABI knowledge.
#[async_trait]
pub trait ContractBinding: Send + Sync {
    /// Whether the bound ABI exposes a callable operation with this name.
    fn has_operation(&self, name: &str) -> bool;

    /// Submit `name(recipient, payload)` as one signed transaction. Resolves
    /// as soon as the transaction is accepted, before confirmation.
    async fn invoke(
        &self,
        name: &str,
        recipient: &Address,
        payload: &[u8],
    ) -> Result<Box<dyn TxHandle>, BindingError>;
}

/// Handle to one submitted transaction.
#[async_trait]
pub trait TxHandle: Send + Sync {
    fn tx_id(&self) -> &str;

    /// Block until the ledger confirms the transaction. Single best-effort
    /// wait; resubmission, gas bumping and nonce management all belong to
    /// the external binding.
    async fn wait_for_confirmation(&self) -> Result<(), BindingError>;
}
