use alloy_primitives::B256;
use ember_bls::{BLSSignature, PubKey, SignatureVerifier};
use ember_consensus::{
    beacon_state::BeaconState,
    deposit::{Deposit, DepositData, DepositInput},
    eth_1_data::Eth1Data,
    misc::{get_entry_exit_effect_epoch, get_epoch_start_slot},
};
use ember_network_spec::networks::{BeaconNetworkSpec, MAINNET};
use ssz_types::VariableList;

struct AcceptAll;

impl SignatureVerifier for AcceptAll {
    fn verify(&self, _: &PubKey, _: B256, _: &BLSSignature, _: u64) -> bool {
        true
    }
}

fn deposit(byte: u8, amount: u64) -> Deposit {
    Deposit {
        branch: VariableList::empty(),
        index: byte as u64,
        deposit_data: DepositData {
            amount,
            timestamp: 0,
            deposit_input: DepositInput {
                pubkey: PubKey::from([byte; 48]),
                withdrawal_credentials: B256::repeat_byte(byte),
                proof_of_possession: BLSSignature::empty(),
            },
        },
    }
}

/// 25 active validators, four below the ejection balance and one exactly at it.
fn state_with_low_balances(spec: &BeaconNetworkSpec) -> BeaconState {
    let deposits = (0..25)
        .map(|byte| deposit(byte, spec.max_deposit_amount))
        .collect::<Vec<_>>();
    let mut state =
        BeaconState::genesis(&deposits, 0, Eth1Data::default(), spec, &AcceptAll).unwrap();
    assert_eq!(
        state
            .get_active_validator_indices(spec.genesis_epoch())
            .len(),
        25
    );

    let ejection_balance = spec.ejection_balance;
    let mut registry = state.registry_mut();
    registry.set_balance(0, ejection_balance / 4).unwrap();
    registry.set_balance(5, ejection_balance / 8).unwrap();
    registry.set_balance(15, 0).unwrap();
    registry.set_balance(20, ejection_balance / 2).unwrap();
    registry.set_balance(1, ejection_balance).unwrap();
    state
}

#[test]
fn test_ejected_validators_leave_at_effect_epoch() {
    let spec = &**MAINNET;
    let mut state = state_with_low_balances(spec);
    let effect_epoch = get_entry_exit_effect_epoch(state.get_current_epoch(spec), spec);

    state.process_ejections(spec).unwrap();
    state
        .process_slots(
            get_epoch_start_slot(effect_epoch, spec).unwrap(),
            B256::ZERO,
            spec,
        )
        .unwrap();

    let active = state.get_active_validator_indices(state.get_current_epoch(spec));
    assert_eq!(active.len(), 21);
    for index in [0, 5, 15, 20] {
        assert!(!active.contains(&index));
    }
    assert!(active.contains(&1));
}

#[test]
fn test_epoch_passes_compose() {
    let spec = &**MAINNET;
    let mut state = state_with_low_balances(spec);
    let effect_epoch = get_entry_exit_effect_epoch(state.get_current_epoch(spec), spec);

    state.process_ejections(spec).unwrap();
    state.update_validator_registry(spec).unwrap();
    state.process_penalties_and_exits(spec).unwrap();
    let after_first_round = state.snapshot();

    state.process_ejections(spec).unwrap();
    state.update_validator_registry(spec).unwrap();
    state.process_penalties_and_exits(spec).unwrap();

    assert_eq!(state, after_first_round);
    assert_eq!(state.get_active_validator_indices(effect_epoch).len(), 21);
}

#[test]
fn test_snapshot_is_independent() {
    let spec = &**MAINNET;
    let state = state_with_low_balances(spec);
    let mut copy = state.snapshot();

    copy.registry_mut().set_balance(2, 7).unwrap();
    copy.latest_randao_mixes[0] = B256::repeat_byte(0xaa);
    copy.process_ejections(spec).unwrap();

    assert_eq!(state.registry().balance(2).unwrap(), spec.max_deposit_amount);
    assert_eq!(state.latest_randao_mixes[0], B256::ZERO);
    assert!(state.registry().validators().iter().all(|validator| {
        validator.exit_epoch == spec.far_future_epoch
    }));
    assert_ne!(copy, state);
}
