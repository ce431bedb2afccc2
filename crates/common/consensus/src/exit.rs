use ember_bls::BLSSignature;
use serde::{Deserialize, Serialize};
use ssz_derive::{Decode, Encode};
use tree_hash_derive::TreeHash;

/// A voluntary exit request.
#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize, Encode, Decode, TreeHash)]
pub struct Exit {
    /// Minimum epoch for processing exit
    #[serde(with = "serde_utils::quoted_u64")]
    pub epoch: u64,
    #[serde(with = "serde_utils::quoted_u64")]
    pub validator_index: u64,
    pub signature: BLSSignature,
}

impl Exit {
    /// The exit with its signature blanked, whose root is the signed message.
    pub fn signing_message(&self) -> Exit {
        Exit {
            signature: BLSSignature::empty(),
            ..self.clone()
        }
    }
}
