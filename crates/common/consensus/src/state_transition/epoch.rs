use std::cmp::{max, min};

use ember_network_spec::networks::BeaconNetworkSpec;
use itertools::Itertools;
use ssz_types::VariableList;
use tracing::{debug, info};

use crate::{
    beacon_state::BeaconState,
    constants::{
        LATEST_INDEX_ROOTS_LENGTH, LATEST_PENALIZED_EXIT_LENGTH, LATEST_RANDAO_MIXES_LENGTH,
    },
    errors::ConsensusError,
    misc::{get_entry_exit_effect_epoch, slot_to_epoch},
    validator::Validator,
};

impl BeaconState {
    /// Run every epoch pass, in order. Called on the last slot of the epoch.
    pub fn process_epoch(&mut self, spec: &BeaconNetworkSpec) -> Result<(), ConsensusError> {
        self.verify_registry_invariant()?;

        self.process_eth1_data_votes(spec)?;
        self.process_ejections(spec)?;
        self.update_validator_registry(spec)?;
        self.process_penalties_and_exits(spec)?;
        self.process_final_updates(spec)?;

        debug!(epoch = self.get_current_epoch(spec), "Processed epoch");
        Ok(())
    }

    /// Adopt the Ethereum 1.0 data that won a majority of the votes cast during the voting
    /// period, and start a new period.
    pub fn process_eth1_data_votes(
        &mut self,
        spec: &BeaconNetworkSpec,
    ) -> Result<(), ConsensusError> {
        let next_epoch = self.get_current_epoch(spec) + 1;
        if next_epoch % spec.eth1_data_voting_period != 0 {
            return Ok(());
        }

        let majority = spec
            .eth1_data_voting_period
            .saturating_mul(spec.slots_per_epoch);
        if let Some(vote) = self
            .eth1_data_votes
            .iter()
            .filter(|vote| vote.vote_count.saturating_mul(2) > majority)
            .last()
        {
            info!(
                deposit_root = ?vote.eth1_data.deposit_root,
                block_hash = ?vote.eth1_data.block_hash,
                vote_count = vote.vote_count,
                "Adopted eth1 data"
            );
            self.latest_eth1_data = vote.eth1_data.clone();
        }
        self.eth1_data_votes = VariableList::empty();

        Ok(())
    }

    /// Iterate through the validator registry and eject active validators with balance below
    /// ``EJECTION_BALANCE``.
    pub fn process_ejections(&mut self, spec: &BeaconNetworkSpec) -> Result<(), ConsensusError> {
        self.verify_registry_invariant()?;
        let current_epoch = self.get_current_epoch(spec);

        let ejected = self
            .registry()
            .iter()
            .filter(|(_, validator, balance)| {
                validator.is_active_validator(current_epoch) && *balance < spec.ejection_balance
            })
            .map(|(index, _, balance)| (index, balance))
            .collect::<Vec<_>>();

        for (index, balance) in ejected {
            if self.exit_validator(index, spec)? {
                info!(index, balance, "Validator ejected");
            }
        }

        Ok(())
    }

    /// Update the validator registry: activate pending validators and exit those that asked to,
    /// each bounded by the maximum balance churn.
    pub fn update_validator_registry(
        &mut self,
        spec: &BeaconNetworkSpec,
    ) -> Result<(), ConsensusError> {
        self.verify_registry_invariant()?;
        let current_epoch = self.get_current_epoch(spec);
        let effect_epoch = get_entry_exit_effect_epoch(current_epoch, spec);

        // The active validators
        let active_validator_indices = self.get_active_validator_indices(current_epoch);
        // The total effective balance of active validators
        let total_balance = self.get_total_balance(&active_validator_indices, spec)?;

        // The maximum balance churn in Gwei (for deposits and exits separately)
        let max_balance_churn = max(
            spec.max_deposit_amount,
            total_balance / spec.max_balance_churn_quotient.saturating_mul(2),
        );

        // Churn already spent by validators scheduled at the effect epoch earlier in this epoch
        let (activated_churn, exited_churn) = self.registry().iter().fold(
            (0u64, 0u64),
            |(activated, exited), (_, validator, balance)| {
                let effective_balance = min(balance, spec.max_deposit_amount);
                (
                    if validator.activation_epoch == effect_epoch {
                        activated.saturating_add(effective_balance)
                    } else {
                        activated
                    },
                    if validator.status_flags.initiated_exit
                        && validator.exit_epoch == effect_epoch
                    {
                        exited.saturating_add(effective_balance)
                    } else {
                        exited
                    },
                )
            },
        );

        // Activate validators within the allowable balance churn
        let mut balance_churn = activated_churn;
        let mut to_activate = vec![];
        for (index, validator, balance) in self.registry().iter() {
            if validator.activation_epoch > effect_epoch && balance >= spec.max_deposit_amount {
                balance_churn =
                    balance_churn.saturating_add(min(balance, spec.max_deposit_amount));
                if balance_churn > max_balance_churn {
                    break;
                }
                to_activate.push(index);
            }
        }
        for &index in &to_activate {
            self.activate_validator(index, false, spec)?;
        }

        // Exit validators within the allowable balance churn
        let mut balance_churn = exited_churn;
        let mut to_exit = vec![];
        for (index, validator, balance) in self.registry().iter() {
            if validator.status_flags.initiated_exit
                && validator.activation_epoch != spec.far_future_epoch
                && validator.exit_epoch > effect_epoch
            {
                balance_churn =
                    balance_churn.saturating_add(min(balance, spec.max_deposit_amount));
                if balance_churn > max_balance_churn {
                    break;
                }
                to_exit.push(index);
            }
        }
        for &index in &to_exit {
            self.exit_validator(index, spec)?;
        }

        self.validator_registry_update_epoch = current_epoch;
        info!(
            epoch = current_epoch,
            activated = to_activate.len(),
            exited = to_exit.len(),
            max_balance_churn,
            "Updated validator registry"
        );
        Ok(())
    }

    /// Apply the delayed penalty to validators penalized half a penalized-exit window ago and
    /// make them withdrawable, move other eligible validators to withdrawable at most
    /// ``MAX_EXIT_DEQUEUES_PER_EPOCH`` per epoch, and make sure every withdrawable validator
    /// exits.
    pub fn process_penalties_and_exits(
        &mut self,
        spec: &BeaconNetworkSpec,
    ) -> Result<(), ConsensusError> {
        self.verify_registry_invariant()?;
        let current_epoch = self.get_current_epoch(spec);
        let effect_epoch = get_entry_exit_effect_epoch(current_epoch, spec);
        let penalized_withdrawal_epochs = LATEST_PENALIZED_EXIT_LENGTH / 2;

        let active_validator_indices = self.get_active_validator_indices(current_epoch);
        let total_balance = self.get_total_balance(&active_validator_indices, spec)?;

        let epoch_index = current_epoch % LATEST_PENALIZED_EXIT_LENGTH;
        let start_index = (epoch_index + 1) % LATEST_PENALIZED_EXIT_LENGTH;
        let total_at_start = self.latest_penalized_balances[start_index as usize];
        let total_at_end = self.latest_penalized_balances[epoch_index as usize];
        let total_penalties = total_at_end.saturating_sub(total_at_start);

        let mut penalties = vec![];
        for (index, validator, balance) in self.registry().iter() {
            if validator.status_flags.withdrawable
                || !validator.is_penalized(spec.far_future_epoch)
                || current_epoch
                    != validator
                        .penalized_epoch
                        .saturating_add(penalized_withdrawal_epochs)
            {
                continue;
            }
            let effective_balance = min(balance, spec.max_deposit_amount) as u128;
            let penalty = if total_balance == 0 {
                0
            } else {
                effective_balance * min(total_penalties as u128 * 3, total_balance as u128)
                    / total_balance as u128
            };
            // Bounded by the effective balance
            penalties.push((index, penalty as u64));
        }
        // A penalized validator leaves the withdrawal queue together with its penalty, so the
        // dequeue limit can never hold it back for a second penalty.
        for (index, penalty) in penalties {
            let balance = self.registry_mut().decrease_balance(index, penalty)?;
            self.prepare_validator_for_withdrawal(index, spec)?;
            info!(index, penalty, balance, "Applied penalty");
        }

        let is_penalty_due = |validator: &Validator| {
            validator.is_penalized(spec.far_future_epoch)
                && current_epoch
                    == validator
                        .penalized_epoch
                        .saturating_add(penalized_withdrawal_epochs)
        };
        let dequeued = self
            .registry()
            .validators()
            .iter()
            .filter(|validator| {
                validator.status_flags.withdrawable
                    && validator.withdrawal_epoch == current_epoch
                    && !is_penalty_due(validator)
            })
            .count();
        let remaining_dequeues =
            (spec.max_exit_dequeues_per_epoch as usize).saturating_sub(dequeued);

        let eligible_indices = self
            .registry()
            .iter()
            .filter(|(_, validator, _)| {
                if validator.status_flags.withdrawable {
                    false
                } else if validator.penalized_epoch <= current_epoch {
                    current_epoch
                        >= validator
                            .penalized_epoch
                            .saturating_add(penalized_withdrawal_epochs)
                } else {
                    current_epoch
                        >= validator
                            .exit_epoch
                            .saturating_add(spec.min_validator_withdrawal_epochs)
                }
            })
            .sorted_by_key(|(_, validator, _)| validator.exit_epoch)
            .take(remaining_dequeues)
            .map(|(index, _, _)| index)
            .collect::<Vec<_>>();
        for index in eligible_indices {
            self.prepare_validator_for_withdrawal(index, spec)?;
        }

        let withdrawable_indices = self
            .registry()
            .iter()
            .filter(|(_, validator, _)| {
                validator.status_flags.withdrawable && validator.exit_epoch > effect_epoch
            })
            .map(|(index, _, _)| index)
            .collect::<Vec<_>>();
        for index in withdrawable_indices {
            self.exit_validator(index, spec)?;
        }

        Ok(())
    }

    /// Carry the per-epoch ring buffers forward into the next epoch and drop attestations that
    /// are no longer needed.
    pub fn process_final_updates(
        &mut self,
        spec: &BeaconNetworkSpec,
    ) -> Result<(), ConsensusError> {
        let current_epoch = self.get_current_epoch(spec);
        let next_epoch = current_epoch + 1;

        self.latest_penalized_balances[(next_epoch % LATEST_PENALIZED_EXIT_LENGTH) as usize] =
            self.latest_penalized_balances[(current_epoch % LATEST_PENALIZED_EXIT_LENGTH) as usize];
        self.latest_randao_mixes[(next_epoch % LATEST_RANDAO_MIXES_LENGTH) as usize] =
            self.get_randao_mix(current_epoch, spec)?;

        let index_root_epoch = next_epoch.saturating_add(spec.entry_exit_delay);
        self.latest_index_roots[(index_root_epoch % LATEST_INDEX_ROOTS_LENGTH) as usize] =
            self.compute_active_index_root(index_root_epoch);

        let retained = self
            .latest_attestations
            .iter()
            .filter(|attestation| slot_to_epoch(attestation.data.slot, spec) >= current_epoch)
            .cloned()
            .collect::<Vec<_>>();
        self.latest_attestations = VariableList::new(retained)
            .map_err(|_| ConsensusError::ListFull("latest_attestations"))?;

        Ok(())
    }
}
