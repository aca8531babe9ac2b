//! In-memory stand-ins for the three chain RPC surfaces, used by this
//! crate's own unit tests and by the integration suite under `tests/`.
//! Exposed behind the `test-support` feature rather than `#[cfg(test)]` so
//! the integration tests (a separate compilation unit) can use them too.

use std::collections::BTreeMap;
use std::sync::Mutex;

use async_trait::async_trait;
use relay_rpc::{EthereumApi, EventQuery, ParachainApi, RelayChainApi};
use relay_types::{
    Account, CommittedEvent, Hash, Header, MerkleProof, Nonce, ParaBlockNumber,
    PersistedValidationData, RelayBlockNumber, TransportError,
};

#[derive(Default)]
pub struct StubEthereum {
    nonces: BTreeMap<Account, Nonce>,
}

impl StubEthereum {
    pub fn new(nonces: impl IntoIterator<Item = (Account, Nonce)>) -> Self {
        Self {
            nonces: nonces.into_iter().collect(),
        }
    }
}

#[async_trait]
impl EthereumApi for StubEthereum {
    async fn nonce(&self, account: Account) -> Result<Nonce, TransportError> {
        Ok(self.nonces.get(&account).copied().unwrap_or(Nonce(0)))
    }
}

#[derive(Default)]
pub struct StubParachain {
    block_hashes: BTreeMap<u64, Hash>,
    headers: BTreeMap<Hash, Header>,
    nonces: BTreeMap<(Hash, Account), Nonce>,
    validation_data: BTreeMap<Hash, PersistedValidationData>,
    merkle_proofs: BTreeMap<(Hash, u32), MerkleProof>,
}

impl StubParachain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_block(mut self, number: ParaBlockNumber, header: Header) -> Self {
        let hash = Hash::keccak256(format!("block-{}", number.get()));
        self.block_hashes.insert(number.get(), hash);
        self.headers.insert(hash, header);
        self
    }

    pub fn with_nonce(mut self, block_hash: Hash, account: Account, nonce: Nonce) -> Self {
        self.nonces.insert((block_hash, account), nonce);
        self
    }

    pub fn with_validation_data(mut self, block_hash: Hash, data: PersistedValidationData) -> Self {
        self.validation_data.insert(block_hash, data);
        self
    }

    pub fn with_merkle_proof(mut self, digest_hash: Hash, index: u32, proof: MerkleProof) -> Self {
        self.merkle_proofs.insert((digest_hash, index), proof);
        self
    }

    pub fn block_hash_for(&self, number: ParaBlockNumber) -> Hash {
        self.block_hashes
            .get(&number.get())
            .copied()
            .unwrap_or_else(|| Hash::keccak256(format!("block-{}", number.get())))
    }
}

#[async_trait]
impl ParachainApi for StubParachain {
    async fn block_hash(&self, number: ParaBlockNumber) -> Result<Option<Hash>, TransportError> {
        Ok(self.block_hashes.get(&number.get()).copied())
    }

    async fn header(&self, block_hash: Hash) -> Result<Header, TransportError> {
        self.headers
            .get(&block_hash)
            .cloned()
            .ok_or(TransportError::MissingData {
                endpoint: "stub-parachain".to_string(),
            })
    }

    async fn outbound_nonce(
        &self,
        block_hash: Hash,
        account: Account,
    ) -> Result<Nonce, TransportError> {
        Ok(self
            .nonces
            .get(&(block_hash, account))
            .copied()
            .unwrap_or(Nonce(0)))
    }

    async fn validation_data(
        &self,
        block_hash: Hash,
    ) -> Result<Option<PersistedValidationData>, TransportError> {
        Ok(self.validation_data.get(&block_hash).copied())
    }

    async fn merkle_proof(
        &self,
        digest_hash: Hash,
        bundle_index: u32,
    ) -> Result<Option<MerkleProof>, TransportError> {
        Ok(self.merkle_proofs.get(&(digest_hash, bundle_index)).cloned())
    }
}

#[derive(Default)]
pub struct StubRelayChain {
    block_hashes: BTreeMap<u64, Hash>,
    heads: BTreeMap<(Hash, u32), Header>,
    all_heads: BTreeMap<Hash, Vec<Header>>,
    finalized_number: Option<RelayBlockNumber>,
}

impl StubRelayChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_block(mut self, number: RelayBlockNumber, hash: Hash) -> Self {
        self.finalized_number = Some(self.finalized_number.map_or(number, |n| n.max(number)));
        self.block_hashes.insert(number.get(), hash);
        self
    }

    pub fn with_head(mut self, relay_block_hash: Hash, para_id: u32, header: Header) -> Self {
        self.heads.insert((relay_block_hash, para_id), header.clone());
        self.all_heads
            .entry(relay_block_hash)
            .or_default()
            .push(header);
        self
    }
}

#[async_trait]
impl RelayChainApi for StubRelayChain {
    async fn block_hash(&self, number: RelayBlockNumber) -> Result<Option<Hash>, TransportError> {
        Ok(self.block_hashes.get(&number.get()).copied())
    }

    async fn finalized_number(&self) -> Result<RelayBlockNumber, TransportError> {
        self.finalized_number.ok_or(TransportError::MissingData {
            endpoint: "stub-relay-chain".to_string(),
        })
    }

    async fn fetch_parachain_head(
        &self,
        relay_block_hash: Hash,
        para_id: u32,
    ) -> Result<Option<Header>, TransportError> {
        Ok(self.heads.get(&(relay_block_hash, para_id)).cloned())
    }

    async fn fetch_parachain_heads(
        &self,
        relay_block_hash: Hash,
    ) -> Result<Vec<Header>, TransportError> {
        Ok(self.all_heads.get(&relay_block_hash).cloned().unwrap_or_default())
    }
}

#[derive(Default)]
pub struct StubEventQuery {
    events: Mutex<BTreeMap<Hash, CommittedEvent>>,
}

impl StubEventQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_event(self, block_hash: Hash, event: CommittedEvent) -> Self {
        self.events.lock().unwrap().insert(block_hash, event);
        self
    }
}

#[async_trait]
impl EventQuery for StubEventQuery {
    async fn query_event(&self, block_hash: Hash) -> Result<Option<CommittedEvent>, TransportError> {
        Ok(self.events.lock().unwrap().get(&block_hash).cloned())
    }
}
