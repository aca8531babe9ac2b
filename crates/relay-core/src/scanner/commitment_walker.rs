use std::collections::BTreeMap;

use relay_rpc::{EventQuery, ParachainApi};
use relay_types::{Account, Error, InconsistencyError, Nonce, ParaBlockNumber, Task, TransportError};
use tokio_util::sync::CancellationToken;

use crate::cancel::check_cancelled;
use crate::scanner::bundle_proof_fetcher;

/// Walks the parachain backwards from `start` looking for commitments that
/// satisfy the still-missing nonces in `targets`. Stops when every account
/// is done (satisfied, or ruled out as not-yet-committed, or dropped by a
/// lenient proof-root mismatch) or when it runs out of blocks.
///
/// Returns tasks in ascending block-number order, per the ordering
/// invariant: the walk itself descends, so the result is stable-sorted
/// before it is returned.
pub async fn walk(
    parachain: &dyn ParachainApi,
    event_query: &dyn EventQuery,
    strict_proof_roots: bool,
    start: ParaBlockNumber,
    mut targets: BTreeMap<Account, Nonce>,
    cancellation: &CancellationToken,
) -> Result<Vec<Task>, Error> {
    let mut searching: std::collections::BTreeSet<Account> = targets.keys().copied().collect();
    let mut tasks = Vec::new();
    let mut current = start.get();

    while !searching.is_empty() && current >= 1 {
        check_cancelled(cancellation)?;

        let block_number = ParaBlockNumber(current);
        let block_hash = parachain
            .block_hash(block_number)
            .await?
            .ok_or(TransportError::MissingData {
                endpoint: "chain_getBlockHash".to_string(),
            })?;
        let header = parachain.header(block_hash).await?;

        let commitment_hashes: Vec<_> = header.commitment_hashes().collect();
        if !commitment_hashes.is_empty() {
            let event = event_query
                .query_event(block_hash)
                .await?
                .ok_or(InconsistencyError::EventsMissing { block: block_hash })?;

            let mut block_proofs = Vec::new();
            for digest_hash in commitment_hashes {
                if digest_hash != event.hash {
                    return Err(Error::Inconsistency(InconsistencyError::CommitmentHashMismatch {
                        digest_hash,
                        event_hash: event.hash,
                    }));
                }
                let proofs = bundle_proof_fetcher::scan_basic_channel_proofs(
                    parachain,
                    strict_proof_roots,
                    digest_hash,
                    &targets,
                    &mut searching,
                    &event.bundles,
                )
                .await?;
                block_proofs.extend(proofs);
            }

            if !block_proofs.is_empty() {
                tasks.push(Task {
                    header,
                    basic_channel_proofs: block_proofs,
                    proof_input: None,
                });
            }
        }

        // Accounts already marked Done no longer need a target entry; keep
        // `targets` in sync so a later commitment can't resurrect them.
        targets.retain(|account, _| searching.contains(account));

        if current == 1 {
            break;
        }
        current -= 1;
    }

    tasks.sort_by_key(|task| task.header.number.get());
    Ok(tasks)
}
