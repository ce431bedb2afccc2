use alloy_primitives::B256;
use ember_bls::{BLSSignature, PubKey};
use ethereum_hashing::hash_fixed;
use serde::{Deserialize, Serialize};
use ssz::Encode;
use ssz_derive::{Decode, Encode};
use ssz_types::VariableList;
use tree_hash_derive::TreeHash;

use crate::constants::MaxDepositBranchLength;

#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize, Encode, Decode, TreeHash)]
pub struct DepositInput {
    pub pubkey: PubKey,
    pub withdrawal_credentials: B256,

    /// A BLS signature of this ``DepositInput``
    pub proof_of_possession: BLSSignature,
}

impl DepositInput {
    /// The input with its proof of possession blanked, whose root is the signed message.
    pub fn signing_message(&self) -> DepositInput {
        DepositInput {
            proof_of_possession: BLSSignature::empty(),
            ..self.clone()
        }
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize, Encode, Decode, TreeHash)]
pub struct DepositData {
    /// Amount in Gwei
    #[serde(with = "serde_utils::quoted_u64")]
    pub amount: u64,

    /// Timestamp from deposit contract
    #[serde(with = "serde_utils::quoted_u64")]
    pub timestamp: u64,
    pub deposit_input: DepositInput,
}

#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize, Encode, Decode, TreeHash)]
pub struct Deposit {
    /// Branch in the deposit tree
    pub branch: VariableList<B256, MaxDepositBranchLength>,

    /// Index in the deposit tree
    #[serde(with = "serde_utils::quoted_u64")]
    pub index: u64,
    pub deposit_data: DepositData,
}

impl DepositData {
    /// The deposit tree leaf: SHA-256 of the encoded deposit data.
    pub fn leaf(&self) -> B256 {
        B256::from(hash_fixed(&self.as_ssz_bytes()))
    }
}
