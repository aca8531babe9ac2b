use alloy_primitives::{Address, FixedBytes};
use alloy_provider::{DynProvider, Provider, ProviderBuilder};
use alloy_rpc_types_eth::BlockId;
use alloy_sol_types::sol;
use relay_types::{Account, Nonce, TransportError};
use url::Url;

use crate::traits::EthereumApi;

sol! {
    #[sol(rpc)]
    interface IInboundChannel {
        function nonce(bytes32 account) external view returns (uint64);
    }
}

/// Read-only client for the Ethereum-side inbound channel contract, built on
/// the same `alloy-provider`/`ProviderBuilder` stack the teacher uses for its
/// EVM chain providers — minus signing and nonce management, since this
/// relay never sends transactions.
#[derive(Clone)]
pub struct EthereumClient {
    contract_address: Address,
    provider: DynProvider,
}

impl std::fmt::Debug for EthereumClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EthereumClient")
            .field("contract_address", &self.contract_address)
            .finish_non_exhaustive()
    }
}

impl EthereumClient {
    pub fn connect(rpc_url: Url, contract_address: Address) -> Self {
        let provider = ProviderBuilder::new().connect_http(rpc_url).erased();
        Self {
            contract_address,
            provider,
        }
    }
}

#[async_trait::async_trait]
impl EthereumApi for EthereumClient {
    #[tracing::instrument(skip(self), fields(contract = %self.contract_address))]
    async fn nonce(&self, account: Account) -> Result<Nonce, TransportError> {
        let contract = IInboundChannel::new(self.contract_address, self.provider.clone());
        let account_word = FixedBytes::<32>::from(*account.as_bytes());
        let value = contract
            .nonce(account_word)
            .block(BlockId::pending())
            .call()
            .await
            .map_err(|err| TransportError::Request {
                endpoint: "eth_call:nonce".to_string(),
                source: Box::new(err),
            })?;
        Ok(Nonce(value))
    }
}
