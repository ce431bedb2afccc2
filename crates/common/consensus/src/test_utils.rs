use std::cell::RefCell;

use alloy_primitives::B256;
use ember_bls::{BLSSignature, PubKey, SignatureVerifier};
use ember_network_spec::networks::BeaconNetworkSpec;
use ssz_types::VariableList;

use crate::{
    beacon_state::BeaconState,
    deposit::{Deposit, DepositData, DepositInput},
    eth_1_data::Eth1Data,
};

pub struct AcceptAll;

impl SignatureVerifier for AcceptAll {
    fn verify(&self, _: &PubKey, _: B256, _: &BLSSignature, _: u64) -> bool {
        true
    }
}

pub struct RejectAll;

impl SignatureVerifier for RejectAll {
    fn verify(&self, _: &PubKey, _: B256, _: &BLSSignature, _: u64) -> bool {
        false
    }
}

/// Accepts everything and remembers the last `(pubkey, message, domain)` it was asked about.
#[derive(Default)]
pub struct RecordingVerifier {
    last_call: RefCell<Option<(PubKey, B256, u64)>>,
}

impl RecordingVerifier {
    pub fn last_call(&self) -> Option<(PubKey, B256, u64)> {
        self.last_call.borrow().clone()
    }
}

impl SignatureVerifier for RecordingVerifier {
    fn verify(&self, pubkey: &PubKey, message: B256, _: &BLSSignature, domain: u64) -> bool {
        *self.last_call.borrow_mut() = Some((pubkey.clone(), message, domain));
        true
    }
}

pub fn pubkey(byte: u8) -> PubKey {
    PubKey::from([byte; 48])
}

/// A deposit of ``amount`` for ``pubkey(byte)``, without a merkle branch.
pub fn deposit(byte: u8, amount: u64) -> Deposit {
    Deposit {
        branch: VariableList::empty(),
        index: 0,
        deposit_data: DepositData {
            amount,
            timestamp: 0,
            deposit_input: DepositInput {
                pubkey: pubkey(byte),
                withdrawal_credentials: B256::repeat_byte(byte),
                proof_of_possession: BLSSignature::empty(),
            },
        },
    }
}

/// Genesis with ``validator_count`` fully funded, active validators.
pub fn genesis_state(spec: &BeaconNetworkSpec, validator_count: u8) -> BeaconState {
    let deposits = (0..validator_count)
        .map(|byte| deposit(byte, spec.max_deposit_amount))
        .collect::<Vec<_>>();
    BeaconState::genesis(&deposits, 0, Eth1Data::default(), spec, &AcceptAll)
        .expect("genesis state")
}
