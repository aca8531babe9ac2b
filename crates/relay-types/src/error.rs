use thiserror::Error;

use crate::{Account, Hash, ParaBlockNumber, RelayBlockNumber};

/// A failure talking to one of the three chain RPC surfaces. Concrete
/// transports (`relay-rpc`) produce these; the core only ever matches on the
/// variant, never the transport-specific cause.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("request to {endpoint} failed: {source}")]
    Request {
        endpoint: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    #[error("response from {endpoint} could not be decoded: {reason}")]
    Decode { endpoint: String, reason: String },
    #[error("endpoint {endpoint} returned no data for a value expected to exist")]
    MissingData { endpoint: String },
}

/// An inconsistency between two chain surfaces that should agree, discovered
/// while walking commitments or assembling a proof. Every variant is fatal to
/// the `scan` call that raised it — the caller must not proceed as if the
/// scan had succeeded.
#[derive(Debug, Error)]
pub enum InconsistencyError {
    #[error("block {block} has a commitment digest but no matching Committed event")]
    EventsMissing { block: Hash },
    #[error(
        "commitment hash in header digest ({digest_hash}) does not match the Committed event ({event_hash})"
    )]
    CommitmentHashMismatch { digest_hash: Hash, event_hash: Hash },
    #[error("parachain block {para_block} has no PersistedValidationData")]
    ValidationDataMissing { para_block: ParaBlockNumber },
    #[error(
        "parachain block {para_block} was not found included in any relay-chain block on or after {window_start}"
    )]
    InclusionNotFound {
        para_block: ParaBlockNumber,
        window_start: RelayBlockNumber,
    },
    #[error(
        "Merkle proof for account {account} does not resolve to the expected root (expected {expected}, computed {computed})"
    )]
    ProofRootMismatch {
        account: Account,
        expected: Hash,
        computed: Hash,
    },
}

/// Top-level error returned by `Scanner::scan`.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error("parachain {para_id} is not registered on the relay chain as of block {relay_block}")]
    NotRegistered {
        para_id: u32,
        relay_block: RelayBlockNumber,
    },
    #[error(transparent)]
    Inconsistency(#[from] InconsistencyError),
    #[error("scan cancelled")]
    Cancelled,
}
