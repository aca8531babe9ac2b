use serde::{Deserialize, Serialize};

use crate::{BundleProof, Header, RelayBlockNumber};

/// Everything a consumer needs to build an MMR-leaf membership proof for one
/// candidate parachain block: the relay-chain block it was included in, and
/// every parachain's head at that relay block (the MMR leaf set), in the
/// order the relay chain's parachain-heads storage iterates them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProofInput {
    pub para_id: u32,
    pub relay_block_number: RelayBlockNumber,
    pub para_heads: Vec<Header>,
}

/// One candidate parachain block discovered by a `scan` call, together with
/// the bundle proofs it contributed and (once the inclusion resolver has
/// run) the inclusion witness a consumer needs to finish the job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub header: Header,
    pub basic_channel_proofs: Vec<BundleProof>,
    pub proof_input: Option<ProofInput>,
}
