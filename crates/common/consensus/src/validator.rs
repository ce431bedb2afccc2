use alloy_primitives::B256;
use ember_bls::PubKey;
use serde::{Deserialize, Serialize};
use ssz_derive::{Decode, Encode};
use tree_hash_derive::TreeHash;

use crate::status_flags::StatusFlags;

#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize, Encode, Decode, TreeHash)]
pub struct Validator {
    pub pubkey: PubKey,

    /// Commitment to pubkey for withdrawals
    pub withdrawal_credentials: B256,

    #[serde(with = "serde_utils::quoted_u64")]
    pub activation_epoch: u64,
    #[serde(with = "serde_utils::quoted_u64")]
    pub exit_epoch: u64,
    #[serde(with = "serde_utils::quoted_u64")]
    pub withdrawal_epoch: u64,
    #[serde(with = "serde_utils::quoted_u64")]
    pub penalized_epoch: u64,

    pub status_flags: StatusFlags,
}

impl Validator {
    /// A freshly deposited validator: every lifecycle epoch unset.
    pub fn new(pubkey: PubKey, withdrawal_credentials: B256, far_future_epoch: u64) -> Self {
        Self {
            pubkey,
            withdrawal_credentials,
            activation_epoch: far_future_epoch,
            exit_epoch: far_future_epoch,
            withdrawal_epoch: far_future_epoch,
            penalized_epoch: far_future_epoch,
            status_flags: StatusFlags::default(),
        }
    }

    pub fn is_active_validator(&self, epoch: u64) -> bool {
        self.activation_epoch <= epoch && epoch < self.exit_epoch
    }

    /// Returns `None` for an unset epoch.
    pub fn scheduled(epoch: u64, far_future_epoch: u64) -> Option<u64> {
        (epoch != far_future_epoch).then_some(epoch)
    }

    pub fn is_penalized(&self, far_future_epoch: u64) -> bool {
        Self::scheduled(self.penalized_epoch, far_future_epoch).is_some()
    }
}
