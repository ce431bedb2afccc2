pub mod attestation;
pub mod attestation_data;
pub mod beacon_block;
pub mod beacon_state;
pub mod codec;
pub mod constants;
pub mod crosslink;
pub mod deposit;
pub mod errors;
pub mod eth_1_data;
pub mod exit;
pub mod fork;
pub mod math;
pub mod misc;
pub mod pending_attestation;
pub mod proposal_signed_data;
pub mod registry;
pub mod state_transition;
pub mod status;
pub mod status_flags;
pub mod store;
pub mod validator;

#[cfg(test)]
pub(crate) mod test_utils;
