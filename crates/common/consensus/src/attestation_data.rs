use alloy_primitives::B256;
use serde::{Deserialize, Serialize};
use ssz_derive::{Decode, Encode};
use tree_hash_derive::TreeHash;

use crate::crosslink::Crosslink;

#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize, Encode, Decode, TreeHash)]
pub struct AttestationData {
    #[serde(with = "serde_utils::quoted_u64")]
    pub slot: u64,
    #[serde(with = "serde_utils::quoted_u64")]
    pub shard: u64,
    pub beacon_block_root: B256,
    pub epoch_boundary_root: B256,
    pub shard_block_root: B256,
    pub latest_crosslink: Crosslink,
    #[serde(with = "serde_utils::quoted_u64")]
    pub justified_epoch: u64,
    pub justified_block_root: B256,
}
