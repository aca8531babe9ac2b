//! Concrete chain clients for the three RPC surfaces the scanning core
//! depends on, plus the trait definitions themselves so `relay-core` can be
//! built and tested against stub implementations.

mod ethereum;
mod events;
mod parachain;
mod relay_chain;
mod storage_key;
mod traits;

pub use ethereum::EthereumClient;
pub use events::SubstrateEventQuery;
pub use parachain::ParachainClient;
pub use relay_chain::RelayChainClient;
pub use traits::{EthereumApi, EventQuery, ParachainApi, RelayChainApi};
