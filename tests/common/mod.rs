#![allow(dead_code)]
//! Shared mock collaborators for the integration suites.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use fhemint::chain::{
    Address, BindingError, ChainDescriptor, ContractBinding, EncryptedChunk, EncryptionOracle,
    OracleError, ProviderError, TxHandle, WalletProvider,
};

pub const ALICE: &str = "0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266";
pub const BOB: &str = "0x70997970c51812dc3a010c7d01b50e0d17dc79c8";
pub const CONTRACT: &str = "0x5fbdb2315678afecb367f032d93f642f64180aa3";

pub fn addr(s: &str) -> Address {
    s.parse().expect("test address")
}

/// Scriptable wallet provider.
pub struct MockProvider {
    pub accounts: Vec<Address>,
    pub reject_connect: bool,
    pub fail_rpc: bool,
    pub fail_switch: bool,
    pub chain: Mutex<u64>,
    pub known_chains: Mutex<HashSet<u64>>,
    pub switch_calls: AtomicUsize,
    pub add_calls: AtomicUsize,
}

impl MockProvider {
    pub fn with_account(account: Address, chain: u64) -> Self {
        Self {
            accounts: vec![account],
            reject_connect: false,
            fail_rpc: false,
            fail_switch: false,
            chain: Mutex::new(chain),
            known_chains: Mutex::new(HashSet::from([chain])),
            switch_calls: AtomicUsize::new(0),
            add_calls: AtomicUsize::new(0),
        }
    }

    pub fn rejecting() -> Self {
        let mut provider = Self::with_account(addr(ALICE), 1);
        provider.reject_connect = true;
        provider
    }

    pub fn failing_rpc() -> Self {
        let mut provider = Self::with_account(addr(ALICE), 1);
        provider.fail_rpc = true;
        provider
    }

    pub fn knows_chain(self, chain_id: u64) -> Self {
        self.known_chains
            .lock()
            .expect("known_chains lock")
            .insert(chain_id);
        self
    }

    pub fn failing_switch(mut self) -> Self {
        self.fail_switch = true;
        self
    }
}

#[async_trait]
impl WalletProvider for MockProvider {
    async fn request_accounts(&self) -> Result<Vec<Address>, ProviderError> {
        if self.reject_connect {
            return Err(ProviderError::Rejected);
        }
        if self.fail_rpc {
            return Err(ProviderError::Rpc("rpc node unreachable".into()));
        }
        Ok(self.accounts.clone())
    }

    async fn chain_id(&self) -> Result<u64, ProviderError> {
        Ok(*self.chain.lock().expect("chain lock"))
    }

    async fn switch_chain(&self, chain_id: u64) -> Result<(), ProviderError> {
        self.switch_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_switch {
            return Err(ProviderError::Rpc("switch refused".into()));
        }
        if !self
            .known_chains
            .lock()
            .expect("known_chains lock")
            .contains(&chain_id)
        {
            return Err(ProviderError::UnknownChain(chain_id));
        }
        *self.chain.lock().expect("chain lock") = chain_id;
        Ok(())
    }

    async fn add_chain(&self, descriptor: &ChainDescriptor) -> Result<(), ProviderError> {
        self.add_calls.fetch_add(1, Ordering::SeqCst);
        self.known_chains
            .lock()
            .expect("known_chains lock")
            .insert(descriptor.chain_id);
        Ok(())
    }
}

#[derive(Clone, Copy)]
pub enum OpBehavior {
    Succeed,
    FailSubmission,
}

/// Scriptable contract binding; records every probe and invocation.
pub struct MockBinding {
    ops: HashMap<String, OpBehavior>,
    pub confirm_ok: bool,
    pub probes: AtomicUsize,
    pub invoked: Mutex<Vec<String>>,
    pub payloads: Mutex<Vec<Vec<u8>>>,
    sequence: AtomicU64,
}

impl MockBinding {
    pub fn new(ops: &[(&str, OpBehavior)]) -> Self {
        Self {
            ops: ops
                .iter()
                .map(|(name, behavior)| (name.to_string(), *behavior))
                .collect(),
            confirm_ok: true,
            probes: AtomicUsize::new(0),
            invoked: Mutex::new(Vec::new()),
            payloads: Mutex::new(Vec::new()),
            sequence: AtomicU64::new(1),
        }
    }

    pub fn exposing(names: &[&str]) -> Self {
        let ops: Vec<(&str, OpBehavior)> =
            names.iter().map(|n| (*n, OpBehavior::Succeed)).collect();
        Self::new(&ops)
    }

    pub fn failing_confirmation(mut self) -> Self {
        self.confirm_ok = false;
        self
    }

    pub fn invocations(&self) -> Vec<String> {
        self.invoked.lock().expect("invoked lock").clone()
    }

    pub fn last_payload(&self) -> Option<Vec<u8>> {
        self.payloads.lock().expect("payloads lock").last().cloned()
    }
}

#[async_trait]
impl ContractBinding for MockBinding {
    fn has_operation(&self, name: &str) -> bool {
        self.probes.fetch_add(1, Ordering::SeqCst);
        self.ops.contains_key(name)
    }

    async fn invoke(
        &self,
        name: &str,
        _recipient: &Address,
        payload: &[u8],
    ) -> Result<Box<dyn TxHandle>, BindingError> {
        self.invoked
            .lock()
            .expect("invoked lock")
            .push(name.to_string());
        match self.ops.get(name) {
            Some(OpBehavior::Succeed) => {
                self.payloads
                    .lock()
                    .expect("payloads lock")
                    .push(payload.to_vec());
                let n = self.sequence.fetch_add(1, Ordering::SeqCst);
                Ok(Box::new(MockTx {
                    tx_id: format!("0x{n:064x}"),
                    confirm_ok: self.confirm_ok,
                }))
            }
            Some(OpBehavior::FailSubmission) => {
                Err(BindingError::Submission("execution reverted".into()))
            }
            None => Err(BindingError::UnknownOperation(name.to_string())),
        }
    }
}

pub struct MockTx {
    pub tx_id: String,
    pub confirm_ok: bool,
}

#[async_trait]
impl TxHandle for MockTx {
    fn tx_id(&self) -> &str {
        &self.tx_id
    }

    async fn wait_for_confirmation(&self) -> Result<(), BindingError> {
        if self.confirm_ok {
            Ok(())
        } else {
            Err(BindingError::Confirmation("transaction dropped".into()))
        }
    }
}

/// Identity oracle: ciphertext equals plaintext, so round trips are checkable.
pub struct MockOracle {
    pub ready: AtomicBool,
    pub calls: AtomicUsize,
}

impl MockOracle {
    pub fn ready() -> Self {
        Self {
            ready: AtomicBool::new(true),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn uninitialized() -> Self {
        Self {
            ready: AtomicBool::new(false),
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl EncryptionOracle for MockOracle {
    fn is_ready(&self) -> bool {
        self.ready.load(Ordering::SeqCst)
    }

    async fn encrypt_chunk(
        &self,
        _contract: &str,
        _account: &Address,
        chunk: &[u8],
    ) -> Result<EncryptedChunk, OracleError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(EncryptedChunk(chunk.to_vec()))
    }
}
