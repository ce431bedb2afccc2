use alloy_primitives::B256;
use ember_bls::SignatureVerifier;
use ember_network_spec::networks::BeaconNetworkSpec;
use ssz_types::{FixedVector, VariableList};
use tracing::{info, warn};

use crate::{
    beacon_state::BeaconState, crosslink::Crosslink, deposit::Deposit, errors::ConsensusError,
    eth_1_data::Eth1Data, fork::Fork,
};

impl BeaconState {
    /// Get the initial beacon state from the genesis deposits.
    ///
    /// Deposits with an invalid proof of possession are skipped. Every validator funded with at
    /// least ``MAX_DEPOSIT_AMOUNT`` is active from the genesis epoch.
    pub fn genesis<V: SignatureVerifier>(
        deposits: &[Deposit],
        genesis_time: u64,
        latest_eth1_data: Eth1Data,
        spec: &BeaconNetworkSpec,
        verifier: &V,
    ) -> Result<Self, ConsensusError> {
        let genesis_epoch = spec.genesis_epoch();

        let mut state = BeaconState {
            // Misc
            slot: spec.genesis_slot,
            genesis_time,
            fork: Fork {
                previous_version: spec.genesis_fork_version,
                current_version: spec.genesis_fork_version,
                epoch: genesis_epoch,
            },

            // Validator registry
            validator_registry: VariableList::empty(),
            validator_balances: VariableList::empty(),
            validator_registry_update_epoch: genesis_epoch,

            // Randomness and committees
            latest_randao_mixes: FixedVector::from_elem(B256::ZERO),
            previous_epoch_start_shard: spec.genesis_start_shard,
            current_epoch_start_shard: spec.genesis_start_shard,
            previous_calculation_epoch: genesis_epoch,
            current_calculation_epoch: genesis_epoch,
            previous_epoch_seed: B256::ZERO,
            current_epoch_seed: B256::ZERO,

            // Finality
            previous_justified_epoch: genesis_epoch,
            justified_epoch: genesis_epoch,
            justification_bitfield: 0,
            finalized_epoch: genesis_epoch,

            // Recent state
            latest_crosslinks: FixedVector::from_elem(Crosslink {
                epoch: genesis_epoch,
                shard_block_root: B256::ZERO,
            }),
            latest_block_roots: FixedVector::from_elem(B256::ZERO),
            latest_index_roots: FixedVector::from_elem(B256::ZERO),
            latest_penalized_balances: FixedVector::from_elem(0),
            latest_attestations: VariableList::empty(),
            batched_block_roots: VariableList::empty(),

            // Ethereum 1.0 chain data
            latest_eth1_data,
            eth1_data_votes: VariableList::empty(),
        };

        // Process initial deposits
        for deposit in deposits {
            let deposit_input = &deposit.deposit_data.deposit_input;
            match state.process_deposit(
                &deposit_input.pubkey,
                deposit.deposit_data.amount,
                &deposit_input.proof_of_possession,
                deposit_input.withdrawal_credentials,
                spec,
                verifier,
            ) {
                Ok(_) => {}
                Err(ConsensusError::InvalidProofOfPossession { pubkey }) => {
                    warn!(?pubkey, "Skipping genesis deposit");
                }
                Err(err) => return Err(err),
            }
        }

        // Process initial activations
        for index in 0..state.registry().len() as u64 {
            if state.get_effective_balance(index, spec)? >= spec.max_deposit_amount {
                state.activate_validator(index, true, spec)?;
            }
        }

        let genesis_active_index_root = state.compute_active_index_root(genesis_epoch);
        state.latest_index_roots = FixedVector::from_elem(genesis_active_index_root);
        state.current_epoch_seed = state.generate_seed(genesis_epoch, spec)?;

        info!(
            genesis_time,
            validators = state.registry().len(),
            active = state.get_active_validator_indices(genesis_epoch).len(),
            "Built genesis state"
        );
        Ok(state)
    }
}
