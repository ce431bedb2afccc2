use ember_network_spec::networks::BeaconNetworkSpec;
use tracing::{debug, info};

use crate::{
    beacon_state::BeaconState, constants::LATEST_PENALIZED_EXIT_LENGTH,
    errors::ConsensusError, misc::get_entry_exit_effect_epoch,
};

impl BeaconState {
    /// Activate the validator of the given ``index``.
    pub fn activate_validator(
        &mut self,
        index: u64,
        is_genesis: bool,
        spec: &BeaconNetworkSpec,
    ) -> Result<(), ConsensusError> {
        let activation_epoch = if is_genesis {
            spec.genesis_epoch()
        } else {
            get_entry_exit_effect_epoch(self.get_current_epoch(spec), spec)
        };
        self.registry_mut().validator_mut(index)?.activation_epoch = activation_epoch;
        info!(index, activation_epoch, "Validator activated");
        Ok(())
    }

    /// Initiate the validator of the given ``index``.
    pub fn initiate_validator_exit(&mut self, index: u64) -> Result<(), ConsensusError> {
        self.registry_mut()
            .validator_mut(index)?
            .status_flags
            .initiated_exit = true;
        debug!(index, "Validator initiated exit");
        Ok(())
    }

    /// Exit the validator of the given ``index``. Returns `false` if it is already scheduled to
    /// exit no later than the entry/exit effect epoch.
    pub fn exit_validator(
        &mut self,
        index: u64,
        spec: &BeaconNetworkSpec,
    ) -> Result<bool, ConsensusError> {
        let exit_epoch = get_entry_exit_effect_epoch(self.get_current_epoch(spec), spec);
        let mut registry = self.registry_mut();
        let validator = registry.validator_mut(index)?;
        if validator.exit_epoch <= exit_epoch {
            return Ok(false);
        }
        validator.exit_epoch = exit_epoch;
        info!(index, exit_epoch, "Validator exit scheduled");
        Ok(true)
    }

    /// Set the validator with the given ``index`` with ``WITHDRAWABLE`` flag.
    pub fn prepare_validator_for_withdrawal(
        &mut self,
        index: u64,
        spec: &BeaconNetworkSpec,
    ) -> Result<(), ConsensusError> {
        let withdrawal_epoch = self.get_current_epoch(spec);
        let mut registry = self.registry_mut();
        let validator = registry.validator_mut(index)?;
        validator.status_flags.withdrawable = true;
        validator.withdrawal_epoch = withdrawal_epoch;
        info!(index, withdrawal_epoch, "Validator prepared for withdrawal");
        Ok(())
    }

    /// Penalize the validator of the given ``index``, rewarding ``whistleblower_index``.
    pub fn penalize_validator(
        &mut self,
        index: u64,
        whistleblower_index: u64,
        spec: &BeaconNetworkSpec,
    ) -> Result<(), ConsensusError> {
        self.verify_registry_invariant()?;
        let current_epoch = self.get_current_epoch(spec);
        let registry = self.registry();
        if registry.validator(index)?.is_penalized(spec.far_future_epoch) {
            return Err(ConsensusError::InvalidOperation(format!(
                "validator {index} is already penalized"
            )));
        }

        let effective_balance = self.get_effective_balance(index, spec)?;
        let whistleblower_reward = effective_balance / spec.whistleblower_reward_quotient;
        registry
            .balance(whistleblower_index)?
            .checked_add(whistleblower_reward)
            .ok_or(ConsensusError::ArithmeticOverflow("whistleblower reward"))?;
        let penalized_slot = (current_epoch % LATEST_PENALIZED_EXIT_LENGTH) as usize;
        let penalized_balance = self.latest_penalized_balances[penalized_slot]
            .checked_add(effective_balance)
            .ok_or(ConsensusError::ArithmeticOverflow("latest_penalized_balances"))?;

        self.exit_validator(index, spec)?;
        self.latest_penalized_balances[penalized_slot] = penalized_balance;
        let mut registry = self.registry_mut();
        registry.increase_balance(whistleblower_index, whistleblower_reward)?;
        registry.decrease_balance(index, whistleblower_reward)?;
        registry.validator_mut(index)?.penalized_epoch = current_epoch;

        info!(
            index,
            whistleblower_index, effective_balance, whistleblower_reward, "Validator penalized"
        );
        Ok(())
    }
}
