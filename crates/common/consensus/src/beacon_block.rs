use alloy_primitives::B256;
use ember_bls::BLSSignature;
use serde::{Deserialize, Serialize};
use ssz_derive::{Decode, Encode};
use ssz_types::VariableList;
use tree_hash_derive::TreeHash;

use crate::{
    attestation::Attestation,
    constants::{MaxAttestations, MaxDeposits, MaxExits},
    deposit::Deposit,
    eth_1_data::Eth1Data,
    exit::Exit,
};

#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize, Encode, Decode, TreeHash)]
pub struct BeaconBlockBody {
    pub attestations: VariableList<Attestation, MaxAttestations>,
    pub deposits: VariableList<Deposit, MaxDeposits>,
    pub exits: VariableList<Exit, MaxExits>,
}

#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize, Encode, Decode, TreeHash)]
pub struct BeaconBlock {
    // Header
    #[serde(with = "serde_utils::quoted_u64")]
    pub slot: u64,
    pub parent_root: B256,
    pub state_root: B256,
    pub randao_reveal: BLSSignature,
    pub eth1_data: Eth1Data,
    pub signature: BLSSignature,

    // Body
    pub body: BeaconBlockBody,
}
