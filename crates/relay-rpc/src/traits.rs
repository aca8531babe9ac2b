use relay_types::{
    Account, CommittedEvent, Hash, Header, MerkleProof, Nonce, ParaBlockNumber,
    PersistedValidationData, RelayBlockNumber, TransportError,
};

/// Read-only view of the source parachain. `relay-core` depends only on this
/// trait — stub implementations back the integration test suite, and
/// `ParachainClient` (this crate) is the production implementation.
#[async_trait::async_trait]
pub trait ParachainApi: Send + Sync {
    async fn block_hash(&self, number: ParaBlockNumber) -> Result<Option<Hash>, TransportError>;

    async fn header(&self, block_hash: Hash) -> Result<Header, TransportError>;

    /// The outbound channel's current nonce for `account` at `block_hash`.
    /// Absent storage means the account has never sent a message: zero.
    async fn outbound_nonce(
        &self,
        block_hash: Hash,
        account: Account,
    ) -> Result<Nonce, TransportError>;

    async fn validation_data(
        &self,
        block_hash: Hash,
    ) -> Result<Option<PersistedValidationData>, TransportError>;

    /// The Merkle inclusion proof for the bundle at `bundle_index` within
    /// the commitment identified by `digest_hash`.
    async fn merkle_proof(
        &self,
        digest_hash: Hash,
        bundle_index: u32,
    ) -> Result<Option<MerkleProof>, TransportError>;
}

/// Read-only view of the relay chain: parachain registration and inclusion.
#[async_trait::async_trait]
pub trait RelayChainApi: Send + Sync {
    async fn block_hash(&self, number: RelayBlockNumber) -> Result<Option<Hash>, TransportError>;

    /// The relay-chain block number of the most recent BEEFY-finalized
    /// block, i.e. the one a runner should scan up to next.
    async fn finalized_number(&self) -> Result<RelayBlockNumber, TransportError>;

    /// The parachain header the relay chain has recorded as included for
    /// `para_id` at `relay_block_hash`, or `None` if not registered there.
    async fn fetch_parachain_head(
        &self,
        relay_block_hash: Hash,
        para_id: u32,
    ) -> Result<Option<Header>, TransportError>;

    /// Every registered parachain's head at `relay_block_hash`, in the
    /// deterministic order the relay's parachain-heads storage iterates
    /// them (ascending by para ID).
    async fn fetch_parachain_heads(
        &self,
        relay_block_hash: Hash,
    ) -> Result<Vec<Header>, TransportError>;
}

/// Read-only view of the Ethereum-side inbound channel contract.
#[async_trait::async_trait]
pub trait EthereumApi: Send + Sync {
    /// The inbound channel's currently delivered nonce for `account`,
    /// evaluated against pending state.
    async fn nonce(&self, account: Account) -> Result<Nonce, TransportError>;
}

/// Reads the `BasicOutboundChannel.Committed` event (if any) out of a given
/// block's event log. Injected separately from [`ParachainApi`] so stub
/// tests can supply events independent of header construction, matching the
/// dependency-injection point this relay's design calls out explicitly.
#[async_trait::async_trait]
pub trait EventQuery: Send + Sync {
    async fn query_event(
        &self,
        block_hash: Hash,
    ) -> Result<Option<CommittedEvent>, TransportError>;
}
