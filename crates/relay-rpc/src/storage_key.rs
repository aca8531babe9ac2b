use parity_scale_codec::Encode;
use twox_hash::XxHash64;
use std::hash::Hasher;

/// Builds a Substrate storage key for a map entry:
/// `twox128(pallet) || twox128(item) || twox64(encoded_key) || encoded_key`,
/// the standard `StorageMap` layout with a `Twox64Concat` hasher.
pub fn map_key(pallet: &str, item: &str, key: &impl Encode) -> Vec<u8> {
    let mut out = prefix(pallet, item);
    let encoded = key.encode();
    out.extend_from_slice(&twox64(&encoded));
    out.extend_from_slice(&encoded);
    out
}

/// Builds a Substrate storage key for a plain (non-map) value:
/// `twox128(pallet) || twox128(item)`.
pub fn plain_key(pallet: &str, item: &str) -> Vec<u8> {
    prefix(pallet, item)
}

fn prefix(pallet: &str, item: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(32);
    out.extend_from_slice(&twox128(pallet.as_bytes()));
    out.extend_from_slice(&twox128(item.as_bytes()));
    out
}

fn twox128(data: &[u8]) -> [u8; 16] {
    let mut out = [0u8; 16];
    out[..8].copy_from_slice(&twox64_seeded(data, 0).to_le_bytes());
    out[8..].copy_from_slice(&twox64_seeded(data, 1).to_le_bytes());
    out
}

fn twox64(data: &[u8]) -> [u8; 8] {
    twox64_seeded(data, 0).to_le_bytes()
}

fn twox64_seeded(data: &[u8], seed: u64) -> u64 {
    let mut hasher = XxHash64::with_seed(seed);
    hasher.write(data);
    hasher.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn map_key_is_deterministic_and_key_dependent() {
        let a = map_key("BasicOutboundChannel", "Nonce", &1u64);
        let b = map_key("BasicOutboundChannel", "Nonce", &2u64);
        assert_ne!(a, b);
        assert_eq!(a, map_key("BasicOutboundChannel", "Nonce", &1u64));
    }

    #[test]
    fn plain_key_is_32_bytes() {
        let key = plain_key("System", "Events");
        assert_eq!(key.len(), 32);
    }
}
