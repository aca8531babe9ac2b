use jsonrpsee::core::client::ClientT;
use jsonrpsee::http_client::{HttpClient, HttpClientBuilder};
use jsonrpsee::rpc_params;
use relay_types::{Hash, Header, RelayBlockNumber, TransportError};
use url::Url;

use crate::traits::RelayChainApi;

/// `RelayChainApi` over the relay's bridge-pallet RPC methods, which resolve
/// parachain registration and return full `Header` values directly as JSON
/// — the same chain-specific-RPC approach `ParachainClient` takes for
/// header and proof lookups, for the same reason.
pub struct RelayChainClient {
    http: HttpClient,
    endpoint: String,
}

impl RelayChainClient {
    pub fn connect(rpc_url: Url) -> Result<Self, TransportError> {
        let endpoint = rpc_url.to_string();
        let http = HttpClientBuilder::default()
            .build(rpc_url)
            .map_err(|err| TransportError::Request {
                endpoint: endpoint.clone(),
                source: Box::new(err),
            })?;
        Ok(Self { http, endpoint })
    }

    fn transport_err(&self, err: impl std::error::Error + Send + Sync + 'static) -> TransportError {
        TransportError::Request {
            endpoint: self.endpoint.clone(),
            source: Box::new(err),
        }
    }
}

#[async_trait::async_trait]
impl RelayChainApi for RelayChainClient {
    #[tracing::instrument(skip(self))]
    async fn block_hash(&self, number: RelayBlockNumber) -> Result<Option<Hash>, TransportError> {
        self.http
            .request("chain_getBlockHash", rpc_params![number.get()])
            .await
            .map_err(|err| self.transport_err(err))
    }

    #[tracing::instrument(skip(self))]
    async fn finalized_number(&self) -> Result<RelayBlockNumber, TransportError> {
        let number: u64 = self
            .http
            .request("beefy_getFinalizedNumber", rpc_params![])
            .await
            .map_err(|err| self.transport_err(err))?;
        Ok(RelayBlockNumber(number))
    }

    #[tracing::instrument(skip(self))]
    async fn fetch_parachain_head(
        &self,
        relay_block_hash: Hash,
        para_id: u32,
    ) -> Result<Option<Header>, TransportError> {
        self.http
            .request("paras_head", rpc_params![relay_block_hash, para_id])
            .await
            .map_err(|err| self.transport_err(err))
    }

    #[tracing::instrument(skip(self))]
    async fn fetch_parachain_heads(
        &self,
        relay_block_hash: Hash,
    ) -> Result<Vec<Header>, TransportError> {
        self.http
            .request("paras_heads", rpc_params![relay_block_hash])
            .await
            .map_err(|err| self.transport_err(err))
    }
}
