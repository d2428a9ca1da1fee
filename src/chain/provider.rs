//! Wallet provider seam: account access, chain query, chain switch/register.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::Address;

/// Chain registration descriptor, handed to the wallet when it does not know
/// the target chain (the `wallet_addEthereumChain` shape).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainDescriptor {
    pub chain_id: u64,
    pub name: String,
    pub rpc_url: String,
    pub explorer_url: String,
    pub currency: NativeCurrency,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NativeCurrency {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
}

impl ChainDescriptor {
    /// Sepolia testnet, the chain every source dapp targets.
    pub fn sepolia() -> Self {
        Self {
            chain_id: 11_155_111,
            name: "Sepolia".into(),
            rpc_url: "https://rpc.sepolia.org".into(),
            explorer_url: "https://sepolia.etherscan.io".into(),
            currency: NativeCurrency {
                name: "Sepolia Ether".into(),
                symbol: "ETH".into(),
                decimals: 18,
            },
        }
    }
}

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("provider unavailable")]
    Unavailable,

    #[error("request rejected by the user")]
    Rejected,

    /// The wallet does not know the chain; callers register it with
    /// [`WalletProvider::add_chain`] and retry the switch once.
    #[error("chain {0} unknown to the wallet")]
    UnknownChain(u64),

    #[error("provider rpc error: {0}")]
    Rpc(String),
}

/// The browser-injected wallet agent. All calls suspend on wallet RPC; none
/// are retried here.
#[async_trait]
pub trait WalletProvider: Send + Sync {
    /// Request account access. The first returned account becomes the active
    /// session address.
    async fn request_accounts(&self) -> Result<Vec<Address>, ProviderError>;

    async fn chain_id(&self) -> Result<u64, ProviderError>;

    async fn switch_chain(&self, chain_id: u64) -> Result<(), ProviderError>;

    async fn add_chain(&self, descriptor: &ChainDescriptor) -> Result<(), ProviderError>;
}
