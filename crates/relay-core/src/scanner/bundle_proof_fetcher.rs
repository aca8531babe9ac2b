use std::collections::{BTreeMap, BTreeSet};

use relay_rpc::ParachainApi;
use relay_types::{Account, BundleProof, Error, Hash, InconsistencyError, MessageBundle, Nonce, TransportError};

/// For each bundle in a commitment (in tree-leaf order), decides whether it
/// belongs to an account still being searched for, fetches and verifies its
/// Merkle proof, and mutates `searching`/`targets` in place as accounts are
/// satisfied or ruled out.
///
/// Returns the bundle proofs collected for this commitment.
pub async fn scan_basic_channel_proofs(
    parachain: &dyn ParachainApi,
    strict_proof_roots: bool,
    digest_hash: Hash,
    targets: &BTreeMap<Account, Nonce>,
    searching: &mut BTreeSet<Account>,
    bundles: &[MessageBundle],
) -> Result<Vec<BundleProof>, Error> {
    let mut proofs = Vec::new();
    for (index, bundle) in bundles.iter().enumerate() {
        if !searching.contains(&bundle.account) {
            continue;
        }
        let target = targets[&bundle.account];

        if bundle.nonce.get() < target.get() {
            // The target has not been committed yet anywhere earlier either.
            searching.remove(&bundle.account);
            continue;
        }

        let proof = parachain
            .merkle_proof(digest_hash, index as u32)
            .await?
            .ok_or(TransportError::MissingData {
                endpoint: "basicOutboundChannel_getMerkleProof".to_string(),
            })?;
        let leaf = bundle.leaf_hash();
        let computed = proof.root(leaf);

        if computed != digest_hash {
            if strict_proof_roots {
                return Err(Error::Inconsistency(InconsistencyError::ProofRootMismatch {
                    account: bundle.account,
                    expected: digest_hash,
                    computed,
                }));
            }
            tracing::warn!(
                account = %bundle.account,
                digest_hash = %digest_hash,
                computed = %computed,
                "Merkle proof did not resolve to the announced commitment root, dropping account for this scan"
            );
            searching.remove(&bundle.account);
            continue;
        }

        proofs.push(BundleProof {
            bundle: bundle.clone(),
            proof,
        });

        if bundle.nonce.get() == target.get() {
            searching.remove(&bundle.account);
        }
    }
    Ok(proofs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::StubParachain;
    use relay_types::MerkleProof;

    fn bundle(account: Account, nonce: u64) -> MessageBundle {
        MessageBundle {
            account,
            nonce: Nonce(nonce),
            messages: vec![],
        }
    }

    fn trivial_proof() -> MerkleProof {
        MerkleProof {
            leaf_index: 0,
            number_of_leaves: 1,
            items: vec![],
            position_bits: 0,
        }
    }

    #[tokio::test]
    async fn bundle_below_target_marks_done_without_collecting() {
        let account = Account([1u8; 32]);
        let digest_hash = Hash::keccak256(b"digest");
        let parachain = StubParachain::new();
        let mut searching = BTreeSet::from([account]);
        let targets = BTreeMap::from([(account, Nonce(6))]);
        let bundles = vec![bundle(account, 5)];

        let proofs = scan_basic_channel_proofs(
            &parachain,
            true,
            digest_hash,
            &targets,
            &mut searching,
            &bundles,
        )
        .await
        .unwrap();

        assert!(proofs.is_empty());
        assert!(searching.is_empty());
    }

    #[tokio::test]
    async fn matching_bundle_is_collected_and_marks_done() {
        let account = Account([2u8; 32]);
        let b = bundle(account, 6);
        let digest_hash = b.leaf_hash();
        let proof = trivial_proof();
        let parachain = StubParachain::new().with_merkle_proof(digest_hash, 0, proof);
        let mut searching = BTreeSet::from([account]);
        let targets = BTreeMap::from([(account, Nonce(6))]);

        let proofs = scan_basic_channel_proofs(
            &parachain,
            true,
            digest_hash,
            &targets,
            &mut searching,
            &[b],
        )
        .await
        .unwrap();

        assert_eq!(proofs.len(), 1);
        assert!(searching.is_empty());
    }

    #[tokio::test]
    async fn later_bundle_is_collected_but_keeps_searching() {
        let account = Account([3u8; 32]);
        let b = bundle(account, 8);
        let digest_hash = b.leaf_hash();
        let proof = trivial_proof();
        let parachain = StubParachain::new().with_merkle_proof(digest_hash, 0, proof);
        let mut searching = BTreeSet::from([account]);
        let targets = BTreeMap::from([(account, Nonce(6))]);

        let proofs = scan_basic_channel_proofs(
            &parachain,
            true,
            digest_hash,
            &targets,
            &mut searching,
            &[b],
        )
        .await
        .unwrap();

        assert_eq!(proofs.len(), 1);
        assert!(searching.contains(&account));
    }

    #[tokio::test]
    async fn strict_proof_root_mismatch_is_a_hard_error() {
        let account = Account([4u8; 32]);
        let b = bundle(account, 6);
        let digest_hash = Hash::keccak256(b"not-the-real-commitment");
        let proof = trivial_proof();
        let parachain = StubParachain::new().with_merkle_proof(digest_hash, 0, proof);
        let mut searching = BTreeSet::from([account]);
        let targets = BTreeMap::from([(account, Nonce(6))]);

        let result = scan_basic_channel_proofs(
            &parachain,
            true,
            digest_hash,
            &targets,
            &mut searching,
            &[b],
        )
        .await;

        assert!(matches!(
            result,
            Err(Error::Inconsistency(InconsistencyError::ProofRootMismatch { .. }))
        ));
    }

    #[tokio::test]
    async fn lenient_proof_root_mismatch_drops_the_account() {
        let account = Account([5u8; 32]);
        let b = bundle(account, 6);
        let digest_hash = Hash::keccak256(b"not-the-real-commitment");
        let proof = trivial_proof();
        let parachain = StubParachain::new().with_merkle_proof(digest_hash, 0, proof);
        let mut searching = BTreeSet::from([account]);
        let targets = BTreeMap::from([(account, Nonce(6))]);

        let proofs = scan_basic_channel_proofs(
            &parachain,
            false,
            digest_hash,
            &targets,
            &mut searching,
            &[b],
        )
        .await
        .unwrap();

        assert!(proofs.is_empty());
        assert!(searching.is_empty());
    }
}
