//! Mint Dispatcher - ordered operation resolution and single-submission
//! lifecycle.
//!
//! # Flow
//!
//! ```text
//! mint(request)
//!     │  requires session.connected, non-empty target, right chain
//!     ▼
//! encode payload (optional oracle path, sequential chunks)
//!     │
//!     ▼
//! resolve: probe candidate ops in order ── all absent/failing ──▶ NoSupportedOperation
//!     │ first success
//!     ▼
//! PendingMint { tx_id }  ── confirm() ──▶ Success { tx_id } | Failed { reason }
//! ```
//!
//! Exactly one transaction is submitted per attempt. The busy flag is held
//! from submission until the pending attempt resolves; callers disable their
//! mint trigger on it. Once submitted, an attempt cannot be aborted.

mod encoder;

pub use encoder::{chunk_count, concat, encode};

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info};

use crate::chain::{Address, ContractBinding, EncryptionOracle, TxHandle};
use crate::config::{ChainPolicy, MintConfig};
use crate::error::{MintError, MintResult};
use crate::notice::{NoticeBoard, NoticeLevel};
use crate::session::SessionState;

/// One mint attempt. Immutable once submitted.
#[derive(Debug, Clone)]
pub struct MintRequest {
    pub recipient: Address,
    pub contract_address: String,
    pub payload: Vec<u8>,
}

/// Attempt lifecycle as reported to the UI layer. Not persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum MintStatus {
    Pending { tx_id: String },
    Success { tx_id: String },
    Failed { reason: String },
}

/// What was actually submitted: which candidate won, and when.
#[derive(Debug, Clone, Serialize)]
pub struct MintReceipt {
    pub operation: String,
    pub tx_id: String,
    pub submitted_at: DateTime<Utc>,
}

pub struct MintDispatcher {
    binding: Arc<dyn ContractBinding>,
    oracle: Option<Arc<dyn EncryptionOracle>>,
    session: SessionState,
    config: MintConfig,
    notices: Arc<NoticeBoard>,
    minting: Arc<AtomicBool>,
}

impl MintDispatcher {
    pub fn new(binding: Arc<dyn ContractBinding>, session: SessionState, config: MintConfig) -> Self {
        let notices = Arc::new(NoticeBoard::new(config.notice_ttl));
        Self {
            binding,
            oracle: None,
            session,
            config,
            notices,
            minting: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Attach the encryption oracle; payloads are then chunk-encrypted before
    /// submission. The handle is owned and explicit, never a global.
    pub fn with_oracle(mut self, oracle: Arc<dyn EncryptionOracle>) -> Self {
        self.oracle = Some(oracle);
        self
    }

    /// Busy flag, true from submission until the pending attempt resolves
    /// (or its handle is dropped). Concurrent mints are not de-duplicated
    /// here; callers disable their trigger on this.
    pub fn is_minting(&self) -> bool {
        self.minting.load(Ordering::SeqCst)
    }

    /// Post-attempt notices; each clears itself after the configured TTL.
    pub fn notices(&self) -> &NoticeBoard {
        &self.notices
    }

    pub async fn mint(&self, request: &MintRequest) -> MintResult<PendingMint> {
        self.mint_with_progress(request, |_| {}).await
    }

    /// Like [`mint`](Self::mint), reporting encryption progress (0-100) after
    /// each chunk when an oracle is attached.
    pub async fn mint_with_progress<F>(
        &self,
        request: &MintRequest,
        progress: F,
    ) -> MintResult<PendingMint>
    where
        F: FnMut(u8) + Send,
    {
        match self.submit(request, progress).await {
            Ok(pending) => {
                self.notices.post(
                    NoticeLevel::Info,
                    format!("mint submitted: {}", pending.tx_id()),
                );
                Ok(pending)
            }
            Err(err) => {
                self.notices.post(NoticeLevel::Error, err.to_string());
                Err(err)
            }
        }
    }

    async fn submit<F>(&self, request: &MintRequest, progress: F) -> MintResult<PendingMint>
    where
        F: FnMut(u8) + Send,
    {
        let session = self.session.snapshot();
        if !session.connected() {
            return Err(MintError::NotConnected);
        }

        let contract = request.contract_address.trim();
        if contract.is_empty() {
            return Err(MintError::InvalidTarget("empty contract address".into()));
        }

        // BlockMint policy: connected but on the wrong chain means no submission.
        if self.config.chain_policy == ChainPolicy::BlockMint {
            if let Some(chain) = &self.config.chain {
                if session.chain_id != Some(chain.chain_id) {
                    return Err(MintError::ChainSwitchFailed(format!(
                        "wallet is on chain {}, expected {}",
                        session
                            .chain_id
                            .map(|id| id.to_string())
                            .unwrap_or_else(|| "unknown".into()),
                        chain.chain_id
                    )));
                }
            }
        }

        let busy = BusyGuard::hold(self.minting.clone());

        let payload = match &self.oracle {
            Some(oracle) => {
                let handles = encoder::encode(
                    oracle.as_ref(),
                    contract,
                    &request.recipient,
                    &request.payload,
                    self.config.chunk_size,
                    progress,
                )
                .await?;
                encoder::concat(&handles)
            }
            None => request.payload.clone(),
        };

        let (operation, handle) = self.resolve_and_submit(&request.recipient, &payload).await?;

        Ok(PendingMint {
            receipt: MintReceipt {
                operation,
                tx_id: handle.tx_id().to_string(),
                submitted_at: Utc::now(),
            },
            handle,
            notices: self.notices.clone(),
            _busy: busy,
        })
    }

    /// Ordered resolution: the first candidate that both exists on the ABI
    /// and does not fail during submission wins, and iteration stops there.
    /// Per-candidate probe failures are expected and only logged at debug;
    /// they drive the fallback, not the caller-visible error.
    async fn resolve_and_submit(
        &self,
        recipient: &Address,
        payload: &[u8],
    ) -> MintResult<(String, Box<dyn TxHandle>)> {
        for name in &self.config.candidate_ops {
            if !self.binding.has_operation(name) {
                debug!(operation = %name, "candidate absent, trying next");
                continue;
            }
            match self.binding.invoke(name, recipient, payload).await {
                Ok(handle) => {
                    info!(operation = %name, tx_id = %handle.tx_id(), "mint submitted");
                    return Ok((name.clone(), handle));
                }
                Err(err) => {
                    debug!(operation = %name, %err, "candidate failed, trying next");
                }
            }
        }
        Err(MintError::NoSupportedOperation)
    }
}

/// A submitted-but-unconfirmed mint. Holds the busy flag until resolution;
/// dropping it without confirming releases the flag but cannot abort the
/// on-chain transaction.
pub struct PendingMint {
    receipt: MintReceipt,
    handle: Box<dyn TxHandle>,
    notices: Arc<NoticeBoard>,
    _busy: BusyGuard,
}

impl PendingMint {
    pub fn tx_id(&self) -> &str {
        &self.receipt.tx_id
    }

    pub fn receipt(&self) -> &MintReceipt {
        &self.receipt
    }

    pub fn status(&self) -> MintStatus {
        MintStatus::Pending {
            tx_id: self.receipt.tx_id.clone(),
        }
    }

    /// Single best-effort confirmation wait. Posts the outcome notice and
    /// releases the busy flag; never yields `Pending`.
    pub async fn confirm(self) -> MintStatus {
        match self.handle.wait_for_confirmation().await {
            Ok(()) => {
                let tx_id = self.receipt.tx_id.clone();
                info!(%tx_id, operation = %self.receipt.operation, "mint confirmed");
                self.notices
                    .post(NoticeLevel::Success, format!("mint confirmed: {tx_id}"));
                MintStatus::Success { tx_id }
            }
            Err(err) => {
                let reason = MintError::ConfirmationFailed(err.to_string()).to_string();
                self.notices.post(NoticeLevel::Error, reason.clone());
                MintStatus::Failed { reason }
            }
        }
    }
}

// Manual impl: the tx handle is an opaque trait object.
impl fmt::Debug for PendingMint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PendingMint")
            .field("receipt", &self.receipt)
            .finish_non_exhaustive()
    }
}

struct BusyGuard(Arc<AtomicBool>);

impl BusyGuard {
    fn hold(flag: Arc<AtomicBool>) -> Self {
        flag.store(true, Ordering::SeqCst);
        Self(flag)
    }
}

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}
