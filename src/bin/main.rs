//! fhemint relay daemon.
//!
//! Serves the HTTP mint relay over a dry-run chain stack so the workflow is
//! runnable end-to-end locally. Production deployments embed the library and
//! inject their own `WalletProvider`/`ContractBinding` implementations.
//!
//! Usage:
//!   fhemint serve [--listen 127.0.0.1:3001] [--contract 0x...] [--payload <uri>]
//!
//! Output: structured logs on stderr (FHEMINT_LOG_JSON=1 for JSON).

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use tracing::info;

use fhemint::chain::{
    Address, BindingError, ChainDescriptor, ContractBinding, ProviderError, TxHandle,
    WalletProvider,
};
use fhemint::logging::init_logging;
use fhemint::runtime::shutdown_signal;
use fhemint::{create_router, MintConfig, MintDispatcher, RelayState, SessionManager};

const DEFAULT_LISTEN: &str = "127.0.0.1:3001";
// Well-known dev account; the dry-run signer.
const RELAY_SIGNER: &str = "0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266";
const DEFAULT_CONTRACT: &str = "0x5fbdb2315678afecb367f032d93f642f64180aa3";
const DEFAULT_PAYLOAD: &str = "https://example.com/nft.json";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let opts = ParsedArgs::parse(&args);

    if opts.help {
        print_usage();
        return Ok(());
    }
    if opts.version {
        println!("fhemint {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    match opts.command.as_deref() {
        Some("serve") => cmd_serve(&opts).await,
        Some(cmd) => anyhow::bail!("unknown command: {cmd}"),
        None => {
            print_usage();
            Ok(())
        }
    }
}

#[derive(Default)]
struct ParsedArgs {
    command: Option<String>,
    listen: Option<String>,
    contract: Option<String>,
    payload: Option<String>,
    help: bool,
    version: bool,
}

impl ParsedArgs {
    fn parse(args: &[String]) -> Self {
        let mut opts = Self::default();
        let mut it = args.iter();
        while let Some(arg) = it.next() {
            match arg.as_str() {
                "--help" | "-h" => opts.help = true,
                "--version" | "-V" => opts.version = true,
                "--listen" => opts.listen = it.next().cloned(),
                "--contract" => opts.contract = it.next().cloned(),
                "--payload" => opts.payload = it.next().cloned(),
                other if opts.command.is_none() => opts.command = Some(other.to_string()),
                other => tracing::warn!(arg = other, "ignoring unexpected argument"),
            }
        }
        opts
    }
}

fn print_usage() {
    println!("fhemint - wallet session + mint dispatch relay");
    println!();
    println!("Commands:");
    println!("  serve                 Run the HTTP mint relay (dry-run chain stack)");
    println!();
    println!("Options:");
    println!("  --listen <addr>       Listen address (default {DEFAULT_LISTEN})");
    println!("  --contract <0x..>     Target contract address");
    println!("  --payload <uri>       Payload minted for each request");
    println!("  -h, --help            Show this help");
    println!("  -V, --version         Show version");
}

async fn cmd_serve(opts: &ParsedArgs) -> anyhow::Result<()> {
    let listen = opts.listen.as_deref().unwrap_or(DEFAULT_LISTEN).to_string();
    let contract = opts
        .contract
        .clone()
        .unwrap_or_else(|| DEFAULT_CONTRACT.into());
    let payload = opts
        .payload
        .clone()
        .unwrap_or_else(|| DEFAULT_PAYLOAD.into());

    let signer: Address = RELAY_SIGNER.parse().context("relay signer address")?;
    let chain = ChainDescriptor::sepolia();
    let config = MintConfig::default();

    let provider = Arc::new(DryRunProvider::new(signer, chain.chain_id));
    let session = SessionManager::new(Some(provider), config.clone());
    session.connect().await.context("connect relay signer")?;

    let binding = Arc::new(DryRunBinding::default());
    let dispatcher = Arc::new(MintDispatcher::new(binding, session.state(), config));

    let state = RelayState {
        dispatcher,
        contract_address: contract,
        payload: payload.into_bytes(),
        service: "fhemint".into(),
    };
    let router = create_router(state);

    let listener = tokio::net::TcpListener::bind(&listen)
        .await
        .with_context(|| format!("bind {listen}"))?;
    info!(%listen, "relay listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

/// Server-side "wallet": one fixed signer account, already on-chain.
struct DryRunProvider {
    signer: Address,
    chain_id: u64,
}

impl DryRunProvider {
    fn new(signer: Address, chain_id: u64) -> Self {
        Self { signer, chain_id }
    }
}

#[async_trait]
impl WalletProvider for DryRunProvider {
    async fn request_accounts(&self) -> Result<Vec<Address>, ProviderError> {
        Ok(vec![self.signer.clone()])
    }

    async fn chain_id(&self) -> Result<u64, ProviderError> {
        Ok(self.chain_id)
    }

    async fn switch_chain(&self, _chain_id: u64) -> Result<(), ProviderError> {
        Ok(())
    }

    async fn add_chain(&self, _descriptor: &ChainDescriptor) -> Result<(), ProviderError> {
        Ok(())
    }
}

/// Accepts the standard mint entry points and fabricates tx ids; nothing
/// leaves the process.
#[derive(Default)]
struct DryRunBinding {
    sequence: AtomicU64,
}

#[async_trait]
impl ContractBinding for DryRunBinding {
    fn has_operation(&self, name: &str) -> bool {
        matches!(name, "safeMint" | "mint")
    }

    async fn invoke(
        &self,
        name: &str,
        recipient: &Address,
        _payload: &[u8],
    ) -> Result<Box<dyn TxHandle>, BindingError> {
        let n = self.sequence.fetch_add(1, Ordering::SeqCst);
        info!(operation = name, recipient = %recipient.short(), "dry-run submission");
        Ok(Box::new(DryRunTx {
            tx_id: format!("0x{:064x}", 0xf1e_0000_0000u64 + n),
        }))
    }
}

struct DryRunTx {
    tx_id: String,
}

#[async_trait]
impl TxHandle for DryRunTx {
    fn tx_id(&self) -> &str {
        &self.tx_id
    }

    async fn wait_for_confirmation(&self) -> Result<(), BindingError> {
        // Simulated block time.
        tokio::time::sleep(Duration::from_millis(200)).await;
        Ok(())
    }
}
