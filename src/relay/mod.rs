//! HTTP relay - forwards mint requests to a server-side dispatcher.
//!
//! The thin backend variant of the workflow: a browser posts
//! `{walletAddress}` and the relay runs the same dispatcher logic with its
//! own signer, returning `{success, txHash}` or `{error}`.

mod routes;

pub use routes::{create_router, RelayState};
