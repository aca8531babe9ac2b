use jsonrpsee::core::client::ClientT;
use jsonrpsee::http_client::{HttpClient, HttpClientBuilder};
use jsonrpsee::rpc_params;
use parity_scale_codec::Decode;
use relay_types::{
    Account, Hash, Header, MerkleProof, Nonce, ParaBlockNumber, PersistedValidationData,
    TransportError,
};
use url::Url;

use crate::storage_key;
use crate::traits::ParachainApi;

/// `ParachainApi` over a mix of the standard Substrate JSON-RPC surface
/// (`chain_getBlockHash`, `state_getStorage`, used for the two raw storage
/// reads the scanner needs) and this chain's own bridge-pallet RPC methods,
/// which return the relay's own types directly as JSON rather than raw SCALE
/// — no generic Substrate node exposes header digests or bundle proofs in a
/// form this relay could decode without chain-specific knowledge anyway.
pub struct ParachainClient {
    http: HttpClient,
    endpoint: String,
}

impl ParachainClient {
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

    fn decode_err(&self, reason: impl Into<String>) -> TransportError {
        TransportError::Decode {
            endpoint: self.endpoint.clone(),
            reason: reason.into(),
        }
    }

    async fn get_storage_at(
        &self,
        key: &[u8],
        at: Hash,
    ) -> Result<Option<Vec<u8>>, TransportError> {
        let key_hex = format!("0x{}", hex::encode(key));
        let at_hex = format!("0x{}", hex::encode(at.as_bytes()));
        let raw: Option<String> = self
            .http
            .request("state_getStorage", rpc_params![key_hex, at_hex])
            .await
            .map_err(|err| self.transport_err(err))?;
        raw.map(|s| hex::decode(s.trim_start_matches("0x")).map_err(|err| self.decode_err(err.to_string())))
            .transpose()
    }
}

#[async_trait::async_trait]
impl ParachainApi for ParachainClient {
    #[tracing::instrument(skip(self))]
    async fn block_hash(&self, number: ParaBlockNumber) -> Result<Option<Hash>, TransportError> {
        self.http
            .request("chain_getBlockHash", rpc_params![number.get()])
            .await
            .map_err(|err| self.transport_err(err))
    }

    #[tracing::instrument(skip(self))]
    async fn header(&self, block_hash: Hash) -> Result<Header, TransportError> {
        let raw: Option<Header> = self
            .http
            .request("chain_getHeader", rpc_params![block_hash])
            .await
            .map_err(|err| self.transport_err(err))?;
        raw.ok_or_else(|| TransportError::MissingData {
            endpoint: self.endpoint.clone(),
        })
    }

    #[tracing::instrument(skip(self))]
    async fn outbound_nonce(
        &self,
        block_hash: Hash,
        account: Account,
    ) -> Result<Nonce, TransportError> {
        let key = storage_key::map_key("BasicOutboundChannel", "Nonce", &account);
        match self.get_storage_at(&key, block_hash).await? {
            Some(bytes) => {
                Nonce::decode(&mut &bytes[..]).map_err(|err| self.decode_err(err.to_string()))
            }
            None => Ok(Nonce(0)),
        }
    }

    #[tracing::instrument(skip(self))]
    async fn validation_data(
        &self,
        block_hash: Hash,
    ) -> Result<Option<PersistedValidationData>, TransportError> {
        let key = storage_key::plain_key("ParachainSystem", "ValidationData");
        match self.get_storage_at(&key, block_hash).await? {
            Some(bytes) => PersistedValidationData::decode(&mut &bytes[..])
                .map(Some)
                .map_err(|err| self.decode_err(err.to_string())),
            None => Ok(None),
        }
    }

    #[tracing::instrument(skip(self))]
    async fn merkle_proof(
        &self,
        digest_hash: Hash,
        bundle_index: u32,
    ) -> Result<Option<MerkleProof>, TransportError> {
        self.http
            .request(
                "basicOutboundChannel_getMerkleProof",
                rpc_params![digest_hash, bundle_index],
            )
            .await
            .map_err(|err| self.transport_err(err))
    }
}
