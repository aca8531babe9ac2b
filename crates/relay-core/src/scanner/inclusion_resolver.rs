use relay_rpc::{ParachainApi, RelayChainApi};
use relay_types::{Error, InconsistencyError, ProofInput, RelayBlockNumber, Task, TransportError};
use tokio_util::sync::CancellationToken;

use crate::cancel::check_cancelled;

/// How many relay-chain blocks past `relay_parent_number + 1` a parachain
/// block is allowed to take to get included before the resolver gives up.
/// A parachain block must be included quickly or it is dropped by the
/// relay chain; scanning further would only mask a bug.
const FINALIZATION_TIMEOUT: u64 = 4;

/// For each task, finds the relay-chain block that included its parachain
/// block and attaches the `ProofInput` a consumer needs to build an
/// MMR-leaf membership proof.
pub async fn resolve(
    parachain: &dyn ParachainApi,
    relay_chain: &dyn RelayChainApi,
    para_id: u32,
    mut tasks: Vec<Task>,
    cancellation: &CancellationToken,
) -> Result<Vec<Task>, Error> {
    for task in &mut tasks {
        check_cancelled(cancellation)?;

        let block_hash = parachain
            .block_hash(task.header.number)
            .await?
            .ok_or(TransportError::MissingData {
                endpoint: "chain_getBlockHash".to_string(),
            })?;
        let validation_data = parachain
            .validation_data(block_hash)
            .await?
            .ok_or(InconsistencyError::ValidationDataMissing {
                para_block: task.header.number,
            })?;

        let window_start = RelayBlockNumber(validation_data.relay_parent_number.get() + 1);
        let mut found = None;
        for offset in 0..FINALIZATION_TIMEOUT {
            check_cancelled(cancellation)?;
            let candidate = RelayBlockNumber(window_start.get() + offset);
            let relay_block_hash = match relay_chain.block_hash(candidate).await? {
                Some(hash) => hash,
                None => continue,
            };
            let head = relay_chain
                .fetch_parachain_head(relay_block_hash, para_id)
                .await?
                .ok_or(Error::NotRegistered {
                    para_id,
                    relay_block: candidate,
                })?;
            if head.number == task.header.number {
                found = Some((candidate, relay_block_hash));
                break;
            }
        }

        let (relay_block_number, relay_block_hash) =
            found.ok_or(InconsistencyError::InclusionNotFound {
                para_block: task.header.number,
                window_start,
            })?;

        let para_heads = relay_chain.fetch_parachain_heads(relay_block_hash).await?;

        task.proof_input = Some(ProofInput {
            para_id,
            relay_block_number,
            para_heads,
        });
    }
    Ok(tasks)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{StubParachain, StubRelayChain};
    use relay_types::{Account, AuxiliaryDigestItem, BundleProof, Hash, Header, MerkleProof, MessageBundle, Nonce, PersistedValidationData};

    fn header(number: u64) -> Header {
        Header {
            number: relay_types::ParaBlockNumber(number),
            parent_hash: Hash::ZERO,
            state_root: Hash::ZERO,
            extrinsics_root: Hash::ZERO,
            digest: vec![AuxiliaryDigestItem::Other],
        }
    }

    fn task_for(header: Header) -> Task {
        Task {
            header,
            basic_channel_proofs: vec![BundleProof {
                bundle: MessageBundle {
                    account: Account([1u8; 32]),
                    nonce: Nonce(1),
                    messages: vec![],
                },
                proof: MerkleProof {
                    leaf_index: 0,
                    number_of_leaves: 1,
                    items: vec![],
                    position_bits: 0,
                },
            }],
            proof_input: None,
        }
    }

    #[tokio::test]
    async fn resolves_inclusion_within_window() {
        let para_id = 1000u32;
        let task_header = header(97);
        let block_hash = Hash::keccak256(b"para-97");
        let parachain = StubParachain::new()
            .with_block(relay_types::ParaBlockNumber(97), task_header.clone())
            .with_validation_data(
                parachain_hash_for(97),
                PersistedValidationData {
                    relay_parent_number: relay_types::RelayBlockNumber(1000),
                },
            );
        let _ = block_hash;

        let relay_hash = Hash::keccak256(b"relay-1002");
        let relay_chain = StubRelayChain::new()
            .with_block(relay_types::RelayBlockNumber(1002), relay_hash)
            .with_head(relay_hash, para_id, task_header.clone());

        let tasks = resolve(
            &parachain,
            &relay_chain,
            para_id,
            vec![task_for(task_header)],
            &CancellationToken::new(),
        )
        .await
        .unwrap();

        let proof_input = tasks[0].proof_input.as_ref().unwrap();
        assert_eq!(proof_input.relay_block_number.get(), 1002);
        assert_eq!(proof_input.para_heads.len(), 1);
    }

    #[tokio::test]
    async fn missing_inclusion_within_window_is_an_error() {
        let para_id = 1000u32;
        let task_header = header(97);
        let parachain = StubParachain::new()
            .with_block(relay_types::ParaBlockNumber(97), task_header.clone())
            .with_validation_data(
                parachain_hash_for(97),
                PersistedValidationData {
                    relay_parent_number: relay_types::RelayBlockNumber(1000),
                },
            );
        let relay_chain = StubRelayChain::new();

        let result = resolve(
            &parachain,
            &relay_chain,
            para_id,
            vec![task_for(task_header)],
            &CancellationToken::new(),
        )
        .await;

        assert!(matches!(
            result,
            Err(Error::Inconsistency(InconsistencyError::InclusionNotFound { .. }))
        ));
    }

    #[tokio::test]
    async fn unregistered_parachain_within_window_is_not_registered_error() {
        let para_id = 1000u32;
        let task_header = header(97);
        let parachain = StubParachain::new()
            .with_block(relay_types::ParaBlockNumber(97), task_header.clone())
            .with_validation_data(
                parachain_hash_for(97),
                PersistedValidationData {
                    relay_parent_number: relay_types::RelayBlockNumber(1000),
                },
            );
        // Relay block 1001 exists, but no parachain head is registered for
        // `para_id` there — distinct from the block simply being absent.
        let relay_chain = StubRelayChain::new()
            .with_block(relay_types::RelayBlockNumber(1001), Hash::keccak256(b"relay-1001"));

        let result = resolve(
            &parachain,
            &relay_chain,
            para_id,
            vec![task_for(task_header)],
            &CancellationToken::new(),
        )
        .await;

        assert!(matches!(
            result,
            Err(Error::NotRegistered {
                para_id: reported_para_id,
                relay_block,
            }) if reported_para_id == para_id && relay_block.get() == 1001
        ));
    }

    fn parachain_hash_for(number: u64) -> Hash {
        Hash::keccak256(format!("block-{number}"))
    }
}
