//! Preset sizes. These fix the shape of the encoded records and therefore cannot be changed at
//! runtime; everything else is read from the injected `BeaconNetworkSpec`.
//!
//! Each size is declared once as a type-level length used by the record definitions, and the
//! integer constant is read back from it.

use ssz_types::typenum::{
    U16, U64, U128, U1024, U4096, U8192, U16384, U16777216, U1099511627776, Unsigned,
};

pub type ShardCount = U1024;
pub type LatestBlockRootsLength = U8192;
pub type LatestRandaoMixesLength = U8192;
pub type LatestIndexRootsLength = U8192;
pub type LatestPenalizedExitLength = U8192;
pub type ValidatorRegistryLimit = U1099511627776;
pub type MaxValidatorsPerCommittee = U4096;
pub type MaxPendingAttestations = U16384;
pub type MaxEth1DataVotes = U1024;
pub type MaxBatchedBlockRoots = U16777216;
pub type MaxDepositBranchLength = U64;

// Block body limits
pub type MaxAttestations = U128;
pub type MaxDeposits = U16;
pub type MaxExits = U16;

pub const SHARD_COUNT: u64 = ShardCount::U64;
pub const LATEST_BLOCK_ROOTS_LENGTH: u64 = LatestBlockRootsLength::U64;
pub const LATEST_RANDAO_MIXES_LENGTH: u64 = LatestRandaoMixesLength::U64;
pub const LATEST_INDEX_ROOTS_LENGTH: u64 = LatestIndexRootsLength::U64;
pub const LATEST_PENALIZED_EXIT_LENGTH: u64 = LatestPenalizedExitLength::U64;
pub const VALIDATOR_REGISTRY_LIMIT: u64 = ValidatorRegistryLimit::U64;
pub const MAX_VALIDATORS_PER_COMMITTEE: u64 = MaxValidatorsPerCommittee::U64;
pub const MAX_PENDING_ATTESTATIONS: u64 = MaxPendingAttestations::U64;
pub const MAX_ETH1_DATA_VOTES: u64 = MaxEth1DataVotes::U64;
pub const MAX_BATCHED_BLOCK_ROOTS: u64 = MaxBatchedBlockRoots::U64;
pub const MAX_DEPOSIT_BRANCH_LENGTH: u64 = MaxDepositBranchLength::U64;

pub const MAX_ATTESTATIONS: u64 = MaxAttestations::U64;
pub const MAX_DEPOSITS: u64 = MaxDeposits::U64;
pub const MAX_EXITS: u64 = MaxExits::U64;

/// Sentinel for epochs that have not been set yet.
pub const FAR_FUTURE_EPOCH: u64 = u64::MAX;

pub const UINT64_MAX: u64 = u64::MAX;
pub const UINT64_MAX_SQRT: u64 = 4294967295;
