//! Session Manager - wallet-connection state and lifecycle.
//!
//! Owns the single shared session record. Connect and disconnect mutate it,
//! external account-change events arrive as explicit inbound calls, and the
//! mint dispatcher reads it through [`SessionState`]. Nothing else in the
//! crate holds mutable shared state.

use std::sync::{Arc, RwLock};

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::chain::{Address, ChainDescriptor, ProviderError, WalletProvider};
use crate::config::{ChainPolicy, MintConfig};
use crate::error::{MintError, MintResult};

/// Connected-wallet snapshot. `connected()` is derived from `address`, so
/// the "connected iff an address is present" invariant cannot drift.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct WalletSession {
    pub address: Option<Address>,
    pub chain_id: Option<u64>,
}

impl WalletSession {
    pub fn connected(&self) -> bool {
        self.address.is_some()
    }
}

/// Shared handle to the session record, for wiring into a dispatcher.
#[derive(Clone, Default)]
pub struct SessionState(Arc<RwLock<WalletSession>>);

impl SessionState {
    pub fn snapshot(&self) -> WalletSession {
        self.0.read().unwrap_or_else(|p| p.into_inner()).clone()
    }

    fn set(&self, session: WalletSession) {
        *self.0.write().unwrap_or_else(|p| p.into_inner()) = session;
    }

    fn update(&self, apply: impl FnOnce(&mut WalletSession)) {
        apply(&mut self.0.write().unwrap_or_else(|p| p.into_inner()));
    }
}

pub struct SessionManager {
    provider: Option<Arc<dyn WalletProvider>>,
    state: SessionState,
    config: MintConfig,
}

impl SessionManager {
    /// `provider: None` models the no-wallet-installed browser; every
    /// provider-touching call then fails `WalletUnavailable`.
    pub fn new(provider: Option<Arc<dyn WalletProvider>>, config: MintConfig) -> Self {
        Self {
            provider,
            state: SessionState::default(),
            config,
        }
    }

    /// Shared session record, cloned into the mint dispatcher.
    pub fn state(&self) -> SessionState {
        self.state.clone()
    }

    pub fn session(&self) -> WalletSession {
        self.state.snapshot()
    }

    /// Request account access and record the session. If a target chain is
    /// configured, enforce it per the chain policy: `BlockConnect` fails the
    /// whole connect, `BlockMint` stays connected and leaves the refusal to
    /// the dispatcher.
    pub async fn connect(&self) -> MintResult<WalletSession> {
        let provider = self.provider()?;

        let accounts = provider.request_accounts().await.map_err(map_connect)?;
        let address = accounts.into_iter().next().ok_or(MintError::UserRejected)?;
        let chain_id = provider.chain_id().await.map_err(map_connect)?;

        self.state.set(WalletSession {
            address: Some(address.clone()),
            chain_id: Some(chain_id),
        });
        info!(address = %address.short(), chain_id, "wallet connected");

        if let Some(chain) = self.config.chain.clone() {
            if let Err(err) = self.ensure_chain(&chain).await {
                match self.config.chain_policy {
                    ChainPolicy::BlockConnect => {
                        self.disconnect();
                        return Err(err);
                    }
                    ChainPolicy::BlockMint => {
                        warn!(%err, "chain switch failed; minting blocked until resolved");
                    }
                }
            }
        }

        Ok(self.state.snapshot())
    }

    /// Purely local: the wallet has no protocol for being told.
    pub fn disconnect(&self) {
        self.state.set(WalletSession::default());
        info!("wallet disconnected");
    }

    /// Inbound account-change event from the wallet. An empty list means the
    /// wallet revoked access and behaves like [`disconnect`](Self::disconnect).
    /// Arriving mid-mint is fine; the in-flight attempt keeps running.
    pub fn on_accounts_changed(&self, accounts: Vec<Address>) {
        match accounts.into_iter().next() {
            None => self.disconnect(),
            Some(address) => {
                debug!(address = %address.short(), "active account changed");
                self.state.update(|s| s.address = Some(address));
            }
        }
    }

    /// Move the wallet onto `target`. If the wallet does not know the chain,
    /// register it with the descriptor and retry the switch exactly once.
    /// Any other failure surfaces without retry.
    pub async fn ensure_chain(&self, target: &ChainDescriptor) -> MintResult<()> {
        let provider = self.provider()?;

        let current = provider.chain_id().await.map_err(map_connect)?;
        if current == target.chain_id {
            self.state.update(|s| s.chain_id = Some(current));
            return Ok(());
        }

        match provider.switch_chain(target.chain_id).await {
            Ok(()) => {}
            Err(ProviderError::UnknownChain(_)) => {
                provider
                    .add_chain(target)
                    .await
                    .map_err(|e| MintError::ChainSwitchFailed(e.to_string()))?;
                provider
                    .switch_chain(target.chain_id)
                    .await
                    .map_err(|e| MintError::ChainSwitchFailed(e.to_string()))?;
            }
            Err(ProviderError::Rejected) => return Err(MintError::UserRejected),
            Err(err) => return Err(MintError::ChainSwitchFailed(err.to_string())),
        }

        self.state.update(|s| s.chain_id = Some(target.chain_id));
        info!(chain_id = target.chain_id, "switched chain");
        Ok(())
    }

    fn provider(&self) -> MintResult<&Arc<dyn WalletProvider>> {
        self.provider
            .as_ref()
            .ok_or_else(|| MintError::WalletUnavailable("no provider injected".into()))
    }
}

fn map_connect(err: ProviderError) -> MintError {
    match err {
        ProviderError::Rejected => MintError::UserRejected,
        other => {
            warn!(%other, "provider call failed");
            MintError::WalletUnavailable(other.to_string())
        }
    }
}
