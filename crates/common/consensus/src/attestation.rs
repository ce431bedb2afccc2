use ember_bls::BLSSignature;
use serde::{Deserialize, Serialize};
use ssz_derive::{Decode, Encode};
use ssz_types::BitList;
use tree_hash_derive::TreeHash;

use crate::{attestation_data::AttestationData, constants::MaxValidatorsPerCommittee};

#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize, Encode, Decode, TreeHash)]
pub struct Attestation {
    pub aggregation_bitfield: BitList<MaxValidatorsPerCommittee>,
    pub data: AttestationData,
    pub custody_bitfield: BitList<MaxValidatorsPerCommittee>,
    pub aggregate_signature: BLSSignature,
}
