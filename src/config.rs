//! Mint workflow configuration. Higher layers construct this.

use std::num::NonZeroUsize;
use std::time::Duration;

use crate::chain::ChainDescriptor;

/// Candidate mint entry points, probed in this order against unknown ABIs.
pub const DEFAULT_CANDIDATE_OPS: &[&str] = &["safeMint", "mint", "publicMint"];

/// Fixed slice size for confidential-metadata chunking.
pub const DEFAULT_CHUNK_SIZE: NonZeroUsize = match NonZeroUsize::new(32) {
    Some(n) => n,
    None => unreachable!(),
};

/// How long a posted notice stays visible before it clears itself.
pub const DEFAULT_NOTICE_TTL: Duration = Duration::from_secs(8);

/// What a failed chain switch blocks. The source dapps disagree on this, so
/// it is a policy flag rather than a hardcoded choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChainPolicy {
    /// `connect()` succeeds anyway; the dispatcher refuses to submit while
    /// the wallet sits on the wrong chain.
    #[default]
    BlockMint,
    /// `connect()` itself fails when the wallet cannot reach the target
    /// chain, leaving the session disconnected.
    BlockConnect,
}

#[derive(Debug, Clone)]
pub struct MintConfig {
    /// Ordered operation names the dispatcher probes.
    pub candidate_ops: Vec<String>,
    pub chunk_size: NonZeroUsize,
    /// Target chain; `None` skips chain enforcement entirely.
    pub chain: Option<ChainDescriptor>,
    pub chain_policy: ChainPolicy,
    pub notice_ttl: Duration,
}

impl Default for MintConfig {
    fn default() -> Self {
        Self {
            candidate_ops: DEFAULT_CANDIDATE_OPS.iter().map(|s| s.to_string()).collect(),
            chunk_size: DEFAULT_CHUNK_SIZE,
            chain: None,
            chain_policy: ChainPolicy::default(),
            notice_ttl: DEFAULT_NOTICE_TTL,
        }
    }
}

impl MintConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_candidates<I, S>(mut self, ops: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.candidate_ops = ops.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_chunk_size(mut self, size: NonZeroUsize) -> Self {
        self.chunk_size = size;
        self
    }

    pub fn with_chain(mut self, chain: ChainDescriptor) -> Self {
        self.chain = Some(chain);
        self
    }

    pub fn with_chain_policy(mut self, policy: ChainPolicy) -> Self {
        self.chain_policy = policy;
        self
    }

    pub fn with_notice_ttl(mut self, ttl: Duration) -> Self {
        self.notice_ttl = ttl;
        self
    }
}
