use std::fmt;

use parity_scale_codec::{Decode, Encode};
use serde::{Deserialize, Serialize};

macro_rules! u64_newtype {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Encode, Decode,
        )]
        #[serde(transparent)]
        pub struct $name(pub u64);

        impl $name {
            pub fn get(self) -> u64 {
                self.0
            }

            pub fn checked_sub(self, rhs: u64) -> Option<Self> {
                self.0.checked_sub(rhs).map(Self)
            }

            pub fn saturating_sub(self, rhs: u64) -> Self {
                Self(self.0.saturating_sub(rhs))
            }
        }

        impl From<u64> for $name {
            fn from(value: u64) -> Self {
                Self(value)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

u64_newtype!(
    Nonce,
    "The monotonically increasing delivery nonce for a single account on the outbound channel."
);
u64_newtype!(
    ParaBlockNumber,
    "A parachain block number — a distinct namespace from `RelayBlockNumber`, never comparable to it directly."
);
u64_newtype!(
    RelayBlockNumber,
    "A relay-chain block number — a distinct namespace from `ParaBlockNumber`, never comparable to it directly."
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn para_and_relay_block_numbers_are_distinct_types() {
        let para = ParaBlockNumber(10);
        let relay = RelayBlockNumber(10);
        // This test exists to document the invariant: the line below would not
        // compile if uncommented, because the two types are not comparable.
        // assert_eq!(para, relay);
        assert_eq!(para.get(), relay.get());
    }

    #[test]
    fn saturating_sub_floors_at_zero() {
        let block = ParaBlockNumber(3);
        assert_eq!(block.saturating_sub(10), ParaBlockNumber(0));
    }
}
