use jsonrpsee::core::client::ClientT;
use jsonrpsee::http_client::{HttpClient, HttpClientBuilder};
use jsonrpsee::rpc_params;
use relay_types::{CommittedEvent, Hash, TransportError};
use url::Url;

use crate::traits::EventQuery;

/// Reads the basic channel's `Committed` event for a block through a
/// chain-specific RPC method, rather than decoding the full
/// `System::Events` log — decoding an arbitrary runtime's event enum
/// generically is out of scope for this relay, and this chain exposes the
/// one event the scanner needs directly.
pub struct SubstrateEventQuery {
    http: HttpClient,
    endpoint: String,
}

impl SubstrateEventQuery {
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
}

#[async_trait::async_trait]
impl EventQuery for SubstrateEventQuery {
    #[tracing::instrument(skip(self))]
    async fn query_event(&self, block_hash: Hash) -> Result<Option<CommittedEvent>, TransportError> {
        self.http
            .request("basicOutboundChannel_committedEvent", rpc_params![block_hash])
            .await
            .map_err(|err| TransportError::Request {
                endpoint: self.endpoint.clone(),
                source: Box::new(err),
            })
    }
}
