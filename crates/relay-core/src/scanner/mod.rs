mod bundle_proof_fetcher;
mod commitment_walker;
mod inclusion_resolver;
mod nonce_comparator;

use std::sync::Arc;

use relay_rpc::{EthereumApi, EventQuery, ParachainApi, RelayChainApi};
use relay_types::{Account, Error, ParaBlockNumber, RelayBlockNumber, Task};
use tokio_util::sync::CancellationToken;

use crate::cancel::check_cancelled;

/// The connections a scanner needs to every chain it touches. Held behind
/// `Arc<dyn Trait>` so a runner can share one set of clients across
/// concurrently scheduled scans.
pub struct Connections {
    pub ethereum: Arc<dyn EthereumApi>,
    pub parachain: Arc<dyn ParachainApi>,
    pub relay_chain: Arc<dyn RelayChainApi>,
    pub event_query: Arc<dyn EventQuery>,
}

/// Drives one pass of commitment discovery and proof assembly for a fixed
/// parachain and a fixed set of watched accounts.
pub struct Scanner {
    connections: Connections,
    para_id: u32,
    accounts: Vec<Account>,
    strict_proof_roots: bool,
}

impl Scanner {
    pub fn new(
        connections: Connections,
        para_id: u32,
        accounts: Vec<Account>,
        strict_proof_roots: bool,
    ) -> Self {
        Self {
            connections,
            para_id,
            accounts,
            strict_proof_roots,
        }
    }

    /// The relay chain's most recently BEEFY-finalized block number, i.e.
    /// the next `beefy_block_number` a caller should pass to [`Self::scan`].
    pub async fn finalized_number(&self) -> Result<RelayBlockNumber, Error> {
        Ok(self.connections.relay_chain.finalized_number().await?)
    }

    /// Scans for outstanding commitments as of a newly finalized BEEFY
    /// block. `beefy_block_number` is the relay-chain block the BEEFY
    /// client just finalized; the parachain head it attests to is the one
    /// finalized one block earlier.
    pub async fn scan(
        &self,
        beefy_block_number: RelayBlockNumber,
        cancellation: &CancellationToken,
    ) -> Result<Vec<Task>, Error> {
        check_cancelled(cancellation)?;

        let attested_relay_block = RelayBlockNumber(beefy_block_number.get() - 1);
        let relay_block_hash = self
            .connections
            .relay_chain
            .block_hash(attested_relay_block)
            .await?
            .ok_or(relay_types::TransportError::MissingData {
                endpoint: "chain_getBlockHash".to_string(),
            })?;

        let parachain_head = self
            .connections
            .relay_chain
            .fetch_parachain_head(relay_block_hash, self.para_id)
            .await?
            .ok_or(Error::NotRegistered {
                para_id: self.para_id,
                relay_block: attested_relay_block,
            })?;

        let last_para_block_number: ParaBlockNumber = parachain_head.number;
        let para_block_hash = self
            .connections
            .parachain
            .block_hash(last_para_block_number)
            .await?
            .ok_or(relay_types::TransportError::MissingData {
                endpoint: "chain_getBlockHash".to_string(),
            })?;

        let targets = nonce_comparator::compute_targets(
            self.connections.ethereum.as_ref(),
            self.connections.parachain.as_ref(),
            &self.accounts,
            para_block_hash,
            cancellation,
        )
        .await?;

        if targets.is_empty() {
            return Ok(Vec::new());
        }

        let tasks = commitment_walker::walk(
            self.connections.parachain.as_ref(),
            self.connections.event_query.as_ref(),
            self.strict_proof_roots,
            last_para_block_number,
            targets,
            cancellation,
        )
        .await?;

        let tasks = inclusion_resolver::resolve(
            self.connections.parachain.as_ref(),
            self.connections.relay_chain.as_ref(),
            self.para_id,
            tasks,
            cancellation,
        )
        .await?;

        Ok(tasks)
    }
}
