use std::collections::BTreeMap;

use relay_rpc::{EthereumApi, ParachainApi};
use relay_types::{Account, Error, Hash, Nonce};
use tokio_util::sync::CancellationToken;

use crate::cancel::check_cancelled;

/// Reads the delivered nonce on Ethereum and the generated nonce on the
/// parachain for every watched account, and returns the first-missing-nonce
/// target for every account where the parachain is ahead.
///
/// Only this function ever reads Ethereum state.
pub async fn compute_targets(
    ethereum: &dyn EthereumApi,
    parachain: &dyn ParachainApi,
    accounts: &[Account],
    para_block_hash: Hash,
    cancellation: &CancellationToken,
) -> Result<BTreeMap<Account, Nonce>, Error> {
    let mut targets = BTreeMap::new();
    for &account in accounts {
        check_cancelled(cancellation)?;
        let eth_nonce = ethereum.nonce(account).await?;
        let para_nonce = parachain.outbound_nonce(para_block_hash, account).await?;
        if para_nonce.get() > eth_nonce.get() {
            targets.insert(account, Nonce(eth_nonce.get() + 1));
        }
    }
    Ok(targets)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{StubEthereum, StubParachain};

    #[tokio::test]
    async fn no_drift_produces_no_targets() {
        let account = Account([1u8; 32]);
        let ethereum = StubEthereum::new([(account, Nonce(5))]);
        let parachain = StubParachain::new().with_nonce(Hash::ZERO, account, Nonce(5));
        let targets = compute_targets(
            &ethereum,
            &parachain,
            &[account],
            Hash::ZERO,
            &CancellationToken::new(),
        )
        .await
        .unwrap();
        assert!(targets.is_empty());
    }

    #[tokio::test]
    async fn drift_produces_first_missing_nonce() {
        let account = Account([1u8; 32]);
        let ethereum = StubEthereum::new([(account, Nonce(5))]);
        let parachain = StubParachain::new().with_nonce(Hash::ZERO, account, Nonce(6));
        let targets = compute_targets(
            &ethereum,
            &parachain,
            &[account],
            Hash::ZERO,
            &CancellationToken::new(),
        )
        .await
        .unwrap();
        assert_eq!(targets.get(&account), Some(&Nonce(6)));
    }

    #[tokio::test]
    async fn absent_parachain_storage_counts_as_zero() {
        let account = Account([2u8; 32]);
        let ethereum = StubEthereum::new([(account, Nonce(0))]);
        let parachain = StubParachain::new();
        let targets = compute_targets(
            &ethereum,
            &parachain,
            &[account],
            Hash::ZERO,
            &CancellationToken::new(),
        )
        .await
        .unwrap();
        assert!(targets.is_empty());
    }
}
