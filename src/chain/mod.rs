//! Trait seams for the external collaborators.
//!
//! The workflow core delegates everything non-trivial: key custody and RPC to
//! the wallet provider, transaction submission and receipts to the contract
//! binding, and ciphertext production to the encryption oracle. This module
//! defines those seams; adapters (browser bridge, JSON-RPC binding, relayer
//! SDK) live outside this crate.

mod address;
mod binding;
mod oracle;
mod provider;

pub use address::{Address, AddressParseError};
pub use binding::{BindingError, ContractBinding, TxHandle};
pub use oracle::{EncryptedChunk, EncryptionOracle, OracleError};
pub use provider::{ChainDescriptor, NativeCurrency, ProviderError, WalletProvider};
