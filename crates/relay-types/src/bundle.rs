use parity_scale_codec::{Decode, Encode};
use serde::{Deserialize, Serialize};

use crate::{Account, Hash, Nonce};

/// A per-account group of messages inside a commitment. The relay never
/// interprets `messages` — it only needs the bundle's SCALE encoding to
/// recompute the leaf hash a Merkle proof commits to.
#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode, Serialize, Deserialize)]
pub struct MessageBundle {
    pub account: Account,
    pub nonce: Nonce,
    pub messages: Vec<Vec<u8>>,
}

impl MessageBundle {
    /// `keccak256(scale_encode(self))`, the leaf a `MerkleProof` proves
    /// inclusion of. This encoding was not specified explicitly upstream;
    /// SCALE is used because every other parachain-side value this relay
    /// hashes is SCALE-encoded first.
    pub fn leaf_hash(&self) -> Hash {
        Hash::keccak256(self.encode())
    }
}

/// A Keccak-256 Merkle inclusion proof, byte-exact with the format produced
/// by the parachain's bundle-commitment pallet: `items[i]` is the sibling at
/// level `i`, and bit `i` of `position_bits` is set when that sibling sits on
/// the left.
#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode, Serialize, Deserialize)]
pub struct MerkleProof {
    pub leaf_index: u32,
    pub number_of_leaves: u32,
    pub items: Vec<Hash>,
    pub position_bits: u64,
}

impl MerkleProof {
    /// Recomputes the Merkle root for `leaf` against this proof's path and
    /// compares it with `expected_root`.
    pub fn verify(&self, leaf: Hash, expected_root: Hash) -> bool {
        self.root(leaf) == expected_root
    }

    /// Recomputes the Merkle root for `leaf` against this proof's path.
    pub fn root(&self, leaf: Hash) -> Hash {
        let mut computed = leaf;
        for (level, sibling) in self.items.iter().enumerate() {
            let sibling_on_left = (self.position_bits >> level) & 1 == 1;
            computed = if sibling_on_left {
                Hash::keccak256([sibling.as_bytes(), computed.as_bytes()].concat())
            } else {
                Hash::keccak256([computed.as_bytes(), sibling.as_bytes()].concat())
            };
        }
        computed
    }
}

/// A bundle together with the Merkle proof tying it to a commitment root.
/// `proof`'s reconstructed root must equal the digest item's announced hash
/// — this is checked once, by `BundleProofFetcher`, before the pair is ever
/// placed in a `Task`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BundleProof {
    pub bundle: MessageBundle,
    pub proof: MerkleProof,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_item_proof_with_sibling_on_right() {
        let leaf = Hash::keccak256(b"leaf");
        let sibling = Hash::keccak256(b"sibling");
        let root = Hash::keccak256([leaf.as_bytes(), sibling.as_bytes()].concat());
        let proof = MerkleProof {
            leaf_index: 0,
            number_of_leaves: 2,
            items: vec![sibling],
            position_bits: 0,
        };
        assert!(proof.verify(leaf, root));
    }

    #[test]
    fn single_item_proof_with_sibling_on_left() {
        let leaf = Hash::keccak256(b"leaf");
        let sibling = Hash::keccak256(b"sibling");
        let root = Hash::keccak256([sibling.as_bytes(), leaf.as_bytes()].concat());
        let proof = MerkleProof {
            leaf_index: 1,
            number_of_leaves: 2,
            items: vec![sibling],
            position_bits: 1,
        };
        assert!(proof.verify(leaf, root));
    }

    #[test]
    fn mismatched_root_fails_verification() {
        let leaf = Hash::keccak256(b"leaf");
        let sibling = Hash::keccak256(b"sibling");
        let proof = MerkleProof {
            leaf_index: 0,
            number_of_leaves: 2,
            items: vec![sibling],
            position_bits: 0,
        };
        assert!(!proof.verify(leaf, Hash::ZERO));
    }

    #[test]
    fn bundle_leaf_hash_is_deterministic() {
        let bundle = MessageBundle {
            account: Account([1u8; 32]),
            nonce: Nonce(5),
            messages: vec![vec![1, 2, 3]],
        };
        let a = bundle.leaf_hash();
        let b = bundle.leaf_hash();
        assert_eq!(a, b);
    }
}
