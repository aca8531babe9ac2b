use std::fmt;

use alloy_primitives::B256;
use parity_scale_codec::{Decode, Encode, Input};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A 32-byte hash, used uniformly for block hashes, digest commitment hashes
/// and Merkle roots — the chains agree on Keccak-256 for all of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Hash(pub B256);

impl Hash {
    pub const ZERO: Hash = Hash(B256::ZERO);

    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_slice()
    }

    pub fn keccak256(data: impl AsRef<[u8]>) -> Self {
        Hash(alloy_primitives::keccak256(data))
    }
}

impl From<[u8; 32]> for Hash {
    fn from(bytes: [u8; 32]) -> Self {
        Hash(B256::from(bytes))
    }
}

impl From<B256> for Hash {
    fn from(value: B256) -> Self {
        Hash(value)
    }
}

impl From<Hash> for B256 {
    fn from(value: Hash) -> Self {
        value.0
    }
}

impl fmt::Display for Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for Hash {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Hash {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse::<B256>().map(Hash).map_err(serde::de::Error::custom)
    }
}

impl Encode for Hash {
    fn encode(&self) -> Vec<u8> {
        self.0.as_slice().to_vec()
    }
}

impl Decode for Hash {
    fn decode<I: Input>(input: &mut I) -> Result<Self, parity_scale_codec::Error> {
        let mut bytes = [0u8; 32];
        input.read(&mut bytes)?;
        Ok(Hash(B256::from(bytes)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keccak256_of_empty_input_matches_known_constant() {
        let hash = Hash::keccak256([]);
        assert_eq!(
            hash.to_string(),
            "0xc5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a47"
        );
    }

    #[test]
    fn round_trips_through_json() {
        let hash = Hash::keccak256(b"bundle");
        let json = serde_json::to_string(&hash).unwrap();
        let back: Hash = serde_json::from_str(&json).unwrap();
        assert_eq!(hash, back);
    }

    #[test]
    fn round_trips_through_scale() {
        let hash = Hash::keccak256(b"digest");
        let encoded = hash.encode();
        let back = Hash::decode(&mut &encoded[..]).unwrap();
        assert_eq!(hash, back);
    }
}
