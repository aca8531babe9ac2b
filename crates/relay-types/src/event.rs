use parity_scale_codec::{Decode, Encode};
use serde::{Deserialize, Serialize};

use crate::{Hash, MessageBundle};

/// The `BasicOutboundChannel.Committed` event, decoded from a block's event
/// log: the commitment hash announced in the same block's header digest,
/// and the bundles that make up the commitment, in tree-leaf order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Encode, Decode)]
pub struct CommittedEvent {
    pub hash: Hash,
    pub bundles: Vec<MessageBundle>,
}
