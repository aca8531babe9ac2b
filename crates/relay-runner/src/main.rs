//! Bridge relay entrypoint.
//!
//! This binary polls the relay chain for newly BEEFY-finalized blocks and,
//! for each one, drives the commitment discovery and proof-assembly
//! scanner over the configured parachain and watched accounts.
//!
//! Environment:
//! - `.env` values loaded at startup
//! - `CONFIG` (or `--config`) selects the JSON configuration file

mod sig_down;

use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use alloy_primitives::Address;
use dotenvy::dotenv;
use relay_core::{Config, Connections, Scanner};
use relay_rpc::{EthereumClient, ParachainClient, RelayChainClient, SubstrateEventQuery};
use relay_types::RelayBlockNumber;
use tokio_util::sync::CancellationToken;

use crate::sig_down::SigDown;

/// How long to wait between polls of the relay chain's finalized head when
/// no new block has appeared yet.
const POLL_INTERVAL: Duration = Duration::from_secs(6);

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = Config::load()?;
    let contract_address = Address::from_str(&config.inbound_channel_address)
        .map_err(|err| format!("invalid inbound_channel_address: {err}"))?;

    let parachain = ParachainClient::connect(config.parachain_rpc.clone())?;
    let relay_chain = RelayChainClient::connect(config.relay_chain_rpc.clone())?;
    let event_query = SubstrateEventQuery::connect(config.parachain_rpc.clone())?;
    let ethereum = EthereumClient::connect(config.ethereum_rpc.clone(), contract_address);

    let connections = Connections {
        ethereum: Arc::new(ethereum),
        parachain: Arc::new(parachain),
        relay_chain: Arc::new(relay_chain),
        event_query: Arc::new(event_query),
    };
    let scanner = Scanner::new(
        connections,
        config.para_id,
        config.accounts.clone(),
        config.strict_proof_roots,
    );

    let sig_down = SigDown::try_new()?;
    let cancellation = sig_down.cancellation_token();

    let mut last_scanned: Option<RelayBlockNumber> = None;
    while !cancellation.is_cancelled() {
        match run_once(&scanner, &cancellation, last_scanned).await {
            Ok(Some(scanned_up_to)) => last_scanned = Some(scanned_up_to),
            Ok(None) => {}
            Err(err) => tracing::error!(error = %err, "scan failed"),
        }

        tokio::select! {
            _ = tokio::time::sleep(POLL_INTERVAL) => {}
            _ = cancellation.cancelled() => {}
        }
    }

    sig_down.wait_for_signal_handler().await;
    tracing::info!("shutdown signal received, exiting");
    Ok(())
}

/// Scans up to the relay chain's current finalized head, if it has moved
/// past what was last scanned. Returns the block number scanned up to.
async fn run_once(
    scanner: &Scanner,
    cancellation: &CancellationToken,
    last_scanned: Option<RelayBlockNumber>,
) -> Result<Option<RelayBlockNumber>, relay_types::Error> {
    let finalized = scanner.finalized_number().await?;
    if last_scanned.is_some_and(|last| finalized.get() <= last.get()) {
        return Ok(None);
    }

    tracing::info!(beefy_block_number = finalized.get(), "scanning");
    let tasks = scanner.scan(finalized, cancellation).await?;
    tracing::info!(task_count = tasks.len(), "scan complete");
    for task in &tasks {
        tracing::debug!(
            para_block_number = task.header.number.get(),
            proof_count = task.basic_channel_proofs.len(),
            "assembled task"
        );
    }

    Ok(Some(finalized))
}
