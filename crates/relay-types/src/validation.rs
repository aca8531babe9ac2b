use parity_scale_codec::{Decode, Encode};
use serde::{Deserialize, Serialize};

use crate::RelayBlockNumber;

/// The subset of a parachain block's `PersistedValidationData` the resolver
/// needs: the relay-chain block it was backed against, which anchors the
/// search window for the block's eventual inclusion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Encode, Decode)]
pub struct PersistedValidationData {
    pub relay_parent_number: RelayBlockNumber,
}
