//! Everything that moves a [`BeaconState`](crate::beacon_state::BeaconState) forward. Each
//! function validates its input before touching the state, so an error leaves the state as it
//! was.

pub mod deposits;
pub mod epoch;
pub mod genesis;
pub mod lifecycle;
pub mod operations;
pub mod slots;
