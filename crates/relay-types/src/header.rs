use parity_scale_codec::{Decode, Encode};
use serde::{Deserialize, Serialize};

use crate::{Hash, ParaBlockNumber};

/// An entry in a parachain header's digest log. `Commitment` announces that
/// a channel produced a commitment with this root in the block; everything
/// else is opaque to the walker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Encode, Decode)]
pub enum AuxiliaryDigestItem {
    Commitment { hash: Hash },
    Other,
}

impl AuxiliaryDigestItem {
    pub fn commitment_hash(&self) -> Option<Hash> {
        match self {
            AuxiliaryDigestItem::Commitment { hash } => Some(*hash),
            AuxiliaryDigestItem::Other => None,
        }
    }
}

/// A parachain block header, opaque beyond the fields the scanner needs to
/// walk backwards and to locate commitment digests. Carried whole through
/// the pipeline for downstream re-encoding by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Encode, Decode)]
pub struct Header {
    pub number: ParaBlockNumber,
    pub parent_hash: Hash,
    pub state_root: Hash,
    pub extrinsics_root: Hash,
    pub digest: Vec<AuxiliaryDigestItem>,
}

impl Header {
    /// The commitment digest items in this header, in digest order.
    pub fn commitment_hashes(&self) -> impl Iterator<Item = Hash> + '_ {
        self.digest.iter().filter_map(AuxiliaryDigestItem::commitment_hash)
    }
}
