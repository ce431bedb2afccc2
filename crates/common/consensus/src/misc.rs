use alloy_primitives::B256;
use ember_network_spec::networks::BeaconNetworkSpec;

use crate::errors::ConsensusError;

/// Return the epoch number of the given ``slot``.
pub fn slot_to_epoch(slot: u64, spec: &BeaconNetworkSpec) -> u64 {
    slot / spec.slots_per_epoch
}

/// Return the starting slot of the given ``epoch``.
pub fn get_epoch_start_slot(epoch: u64, spec: &BeaconNetworkSpec) -> Result<u64, ConsensusError> {
    epoch
        .checked_mul(spec.slots_per_epoch)
        .ok_or(ConsensusError::ArithmeticOverflow("get_epoch_start_slot"))
}

/// An entry or exit triggered in the ``epoch`` given by the input takes effect at the epoch
/// given by the output.
pub fn get_entry_exit_effect_epoch(epoch: u64, spec: &BeaconNetworkSpec) -> u64 {
    epoch.saturating_add(1).saturating_add(spec.entry_exit_delay)
}

pub fn xor(left: &[u8], right: &[u8]) -> B256 {
    let mut bytes = [0u8; 32];
    for (byte, (l, r)) in bytes.iter_mut().zip(left.iter().zip(right.iter())) {
        *byte = l ^ r;
    }
    B256::from(bytes)
}
