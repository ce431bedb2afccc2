use alloy_primitives::B256;
use ember_merkle::merkle_root;
use ember_network_spec::networks::BeaconNetworkSpec;
use tracing::debug;

use crate::{
    beacon_state::BeaconState, constants::LATEST_BLOCK_ROOTS_LENGTH, errors::ConsensusError,
};

impl BeaconState {
    /// Advance the state to ``target_slot``, recording ``previous_block_root`` for every slot
    /// passed and running the epoch transition at the end of each epoch.
    pub fn process_slots(
        &mut self,
        target_slot: u64,
        previous_block_root: B256,
        spec: &BeaconNetworkSpec,
    ) -> Result<(), ConsensusError> {
        self.verify_registry_invariant()?;
        if target_slot <= self.slot {
            return Err(ConsensusError::InvalidArgument(format!(
                "target slot {target_slot} is not after the current slot {}",
                self.slot
            )));
        }

        let mut next = self.snapshot();
        while next.slot < target_slot {
            next.process_slot(previous_block_root, spec)?;
        }
        *self = next;

        Ok(())
    }

    fn process_slot(
        &mut self,
        previous_block_root: B256,
        spec: &BeaconNetworkSpec,
    ) -> Result<(), ConsensusError> {
        self.latest_block_roots[(self.slot % LATEST_BLOCK_ROOTS_LENGTH) as usize] =
            previous_block_root;

        let next_slot = self
            .slot
            .checked_add(1)
            .ok_or(ConsensusError::ArithmeticOverflow("process_slot"))?;
        if next_slot % LATEST_BLOCK_ROOTS_LENGTH == 0 {
            let batched_root = merkle_root(&self.latest_block_roots)
                .map_err(|err| ConsensusError::InvalidArgument(err.to_string()))?;
            self.batched_block_roots
                .push(batched_root)
                .map_err(|_| ConsensusError::ListFull("batched_block_roots"))?;
            debug!(slot = self.slot, ?batched_root, "Batched block roots");
        }

        if next_slot % spec.slots_per_epoch == 0 {
            self.process_epoch(spec)?;
        }
        self.slot = next_slot;

        Ok(())
    }
}
