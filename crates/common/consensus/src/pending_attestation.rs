use serde::{Deserialize, Serialize};
use ssz_derive::{Decode, Encode};
use ssz_types::BitList;
use tree_hash_derive::TreeHash;

use crate::{attestation_data::AttestationData, constants::MaxValidatorsPerCommittee};

#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize, Encode, Decode, TreeHash)]
pub struct PendingAttestation {
    pub aggregation_bitfield: BitList<MaxValidatorsPerCommittee>,
    pub data: AttestationData,
    pub custody_bitfield: BitList<MaxValidatorsPerCommittee>,
    #[serde(with = "serde_utils::quoted_u64")]
    pub inclusion_slot: u64,
}
