//! fhemint: wallet-session + confidential mint-dispatch core.
//!
//! # Architecture
//!
//! ```text
//! SessionManager ────────▶ WalletSession (the one shared record)
//!   │  connect / disconnect /        ▲
//!   │  accounts-changed events       │ reads
//!   │                                │
//!   └─▶ WalletProvider (trait)   MintDispatcher
//!                                    │
//!                 encode payload     │  probe candidate ops in order,
//!                 (chunked, in       │  submit once, await confirmation
//!                 slice order)       │
//!                        │           ▼
//!          EncryptionOracle     ContractBinding (trait)
//!              (trait)               │
//!                                    ▼
//!                              PendingMint ──▶ Success | Failed
//! ```
//!
//! # Operations
//!
//! | Operation | Component | Description |
//! |-----------|-----------|-------------|
//! | `connect` | [`SessionManager`] | Request accounts, record session, enforce chain policy |
//! | `disconnect` | [`SessionManager`] | Clear the session locally |
//! | `on_accounts_changed` | [`SessionManager`] | Inbound wallet event; empty list disconnects |
//! | `ensure_chain` | [`SessionManager`] | Switch chain, registering it once if unknown |
//! | `mint` | [`MintDispatcher`] | Resolve + submit exactly one transaction |
//! | `confirm` | [`PendingMint`] | Single best-effort confirmation wait |
//! | `encode` | [`mint`] module | Sequential chunked encryption with progress |
//!
//! External collaborators (wallet provider, contract binding, encryption
//! oracle) are consumed through the traits in [`chain`], never implemented
//! here. The `relay` feature adds the thin HTTP backend (`POST /api/mint`).

pub mod chain;
pub mod config;
pub mod error;
pub mod logging;
pub mod mint;
pub mod notice;
pub mod runtime;
pub mod session;

#[cfg(feature = "relay")]
pub mod relay;

pub use chain::{
    Address, ChainDescriptor, ContractBinding, EncryptedChunk, EncryptionOracle, NativeCurrency,
    TxHandle, WalletProvider,
};
pub use config::{ChainPolicy, MintConfig};
pub use error::{MintError, MintResult};
pub use mint::{MintDispatcher, MintReceipt, MintRequest, MintStatus, PendingMint};
pub use notice::{Notice, NoticeBoard, NoticeLevel};
pub use session::{SessionManager, SessionState, WalletSession};

#[cfg(feature = "relay")]
pub use relay::{create_router, RelayState};
