use alloy_primitives::B256;
use ember_bls::{BLSSignature, PubKey, SignatureVerifier};
use ember_network_spec::networks::BeaconNetworkSpec;
use ethereum_hashing::hash_fixed;
use serde::{Deserialize, Serialize};
use ssz_derive::{Decode, Encode};
use ssz_types::{
    FixedVector, VariableList,
    serde_utils::{quoted_u64_fixed_vec, quoted_u64_var_list},
};
use tree_hash::TreeHash;
use tree_hash_derive::TreeHash;

use crate::{
    constants::{
        LATEST_BLOCK_ROOTS_LENGTH, LATEST_INDEX_ROOTS_LENGTH, LATEST_RANDAO_MIXES_LENGTH,
        LatestBlockRootsLength, LatestIndexRootsLength, LatestPenalizedExitLength,
        LatestRandaoMixesLength, MaxBatchedBlockRoots, MaxEth1DataVotes, MaxPendingAttestations,
        ShardCount, ValidatorRegistryLimit,
    },
    crosslink::Crosslink,
    deposit::DepositInput,
    errors::ConsensusError,
    eth_1_data::{Eth1Data, Eth1DataVote},
    fork::Fork,
    misc::slot_to_epoch,
    pending_attestation::PendingAttestation,
    registry::{BalanceList, Registry, RegistryMut, ValidatorList},
};

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize, Encode, Decode, TreeHash)]
pub struct BeaconState {
    // Misc
    #[serde(with = "serde_utils::quoted_u64")]
    pub slot: u64,
    #[serde(with = "serde_utils::quoted_u64")]
    pub genesis_time: u64,
    pub fork: Fork,

    // Validator registry
    pub(crate) validator_registry: ValidatorList,
    #[serde(with = "quoted_u64_var_list")]
    pub(crate) validator_balances: BalanceList,
    #[serde(with = "serde_utils::quoted_u64")]
    pub validator_registry_update_epoch: u64,

    // Randomness and committees
    pub latest_randao_mixes: FixedVector<B256, LatestRandaoMixesLength>,
    #[serde(with = "serde_utils::quoted_u64")]
    pub previous_epoch_start_shard: u64,
    #[serde(with = "serde_utils::quoted_u64")]
    pub current_epoch_start_shard: u64,
    #[serde(with = "serde_utils::quoted_u64")]
    pub previous_calculation_epoch: u64,
    #[serde(with = "serde_utils::quoted_u64")]
    pub current_calculation_epoch: u64,
    pub previous_epoch_seed: B256,
    pub current_epoch_seed: B256,

    // Finality
    #[serde(with = "serde_utils::quoted_u64")]
    pub previous_justified_epoch: u64,
    #[serde(with = "serde_utils::quoted_u64")]
    pub justified_epoch: u64,
    #[serde(with = "serde_utils::quoted_u64")]
    pub justification_bitfield: u64,
    #[serde(with = "serde_utils::quoted_u64")]
    pub finalized_epoch: u64,

    // Recent state
    pub latest_crosslinks: FixedVector<Crosslink, ShardCount>,
    pub latest_block_roots: FixedVector<B256, LatestBlockRootsLength>,
    pub latest_index_roots: FixedVector<B256, LatestIndexRootsLength>,
    /// Balances penalized at every epoch, carried forward cumulatively
    #[serde(with = "quoted_u64_fixed_vec")]
    pub latest_penalized_balances: FixedVector<u64, LatestPenalizedExitLength>,
    pub latest_attestations: VariableList<PendingAttestation, MaxPendingAttestations>,
    pub batched_block_roots: VariableList<B256, MaxBatchedBlockRoots>,

    // Ethereum 1.0 chain data
    pub latest_eth1_data: Eth1Data,
    pub eth1_data_votes: VariableList<Eth1DataVote, MaxEth1DataVotes>,
}

impl BeaconState {
    pub fn registry(&self) -> Registry<'_> {
        Registry::new(&self.validator_registry, &self.validator_balances)
    }

    pub fn registry_mut(&mut self) -> RegistryMut<'_> {
        RegistryMut::new(&mut self.validator_registry, &mut self.validator_balances)
    }

    /// Fail with [`ConsensusError::InvariantViolation`] unless every validator has exactly one
    /// balance. A decoded state is not guaranteed to satisfy this.
    pub fn verify_registry_invariant(&self) -> Result<(), ConsensusError> {
        self.registry().verify_aligned()
    }

    /// Independent copy of the state. No list or buffer is shared with `self`.
    pub fn snapshot(&self) -> BeaconState {
        self.clone()
    }

    /// Return the current epoch.
    pub fn get_current_epoch(&self, spec: &BeaconNetworkSpec) -> u64 {
        slot_to_epoch(self.slot, spec)
    }

    /// Return the previous epoch (unless the current epoch is the genesis epoch).
    pub fn get_previous_epoch(&self, spec: &BeaconNetworkSpec) -> u64 {
        let current_epoch = self.get_current_epoch(spec);
        let genesis_epoch = spec.genesis_epoch();
        if current_epoch <= genesis_epoch {
            genesis_epoch
        } else {
            current_epoch - 1
        }
    }

    /// Return the sequence of active validator indices at ``epoch``.
    pub fn get_active_validator_indices(&self, epoch: u64) -> Vec<u64> {
        self.registry()
            .iter()
            .filter_map(|(index, validator, _)| {
                validator.is_active_validator(epoch).then_some(index)
            })
            .collect()
    }

    /// Return the effective balance (also known as "balance at stake") for a validator.
    pub fn get_effective_balance(
        &self,
        index: u64,
        spec: &BeaconNetworkSpec,
    ) -> Result<u64, ConsensusError> {
        Ok(self.registry().balance(index)?.min(spec.max_deposit_amount))
    }

    /// Return the combined effective balance of the ``indices``.
    pub fn get_total_balance(
        &self,
        indices: &[u64],
        spec: &BeaconNetworkSpec,
    ) -> Result<u64, ConsensusError> {
        indices.iter().try_fold(0u64, |total, &index| {
            total
                .checked_add(self.get_effective_balance(index, spec)?)
                .ok_or(ConsensusError::ArithmeticOverflow("get_total_balance"))
        })
    }

    /// Return the randao mix at a recent ``epoch``.
    pub fn get_randao_mix(
        &self,
        epoch: u64,
        spec: &BeaconNetworkSpec,
    ) -> Result<B256, ConsensusError> {
        let current_epoch = self.get_current_epoch(spec);
        if epoch > current_epoch
            || current_epoch >= epoch.saturating_add(LATEST_RANDAO_MIXES_LENGTH)
        {
            return Err(ConsensusError::InvalidArgument(format!(
                "randao mix of epoch {epoch} is outside the window of epoch {current_epoch}"
            )));
        }
        Ok(self.latest_randao_mixes[(epoch % LATEST_RANDAO_MIXES_LENGTH) as usize])
    }

    /// Return the index root at a recent ``epoch``.
    pub fn get_active_index_root(
        &self,
        epoch: u64,
        spec: &BeaconNetworkSpec,
    ) -> Result<B256, ConsensusError> {
        let horizon = self
            .get_current_epoch(spec)
            .saturating_add(spec.entry_exit_delay);
        if epoch > horizon || horizon >= epoch.saturating_add(LATEST_INDEX_ROOTS_LENGTH) {
            return Err(ConsensusError::InvalidArgument(format!(
                "index root of epoch {epoch} is outside the window ending at epoch {horizon}"
            )));
        }
        Ok(self.latest_index_roots[(epoch % LATEST_INDEX_ROOTS_LENGTH) as usize])
    }

    /// Root of the list of validators active at ``epoch``.
    pub fn compute_active_index_root(&self, epoch: u64) -> B256 {
        let indices: VariableList<u64, ValidatorRegistryLimit> =
            self.get_active_validator_indices(epoch).into();
        indices.tree_hash_root()
    }

    /// Generate a seed for the given ``epoch``.
    pub fn generate_seed(
        &self,
        epoch: u64,
        spec: &BeaconNetworkSpec,
    ) -> Result<B256, ConsensusError> {
        let randao_mix = self.get_randao_mix(epoch.saturating_sub(spec.seed_lookahead), spec)?;
        let index_root = self.get_active_index_root(epoch, spec)?;
        Ok(B256::from(hash_fixed(
            &[randao_mix.as_slice(), index_root.as_slice()].concat(),
        )))
    }

    /// Return the block root at a recent ``slot``.
    pub fn get_block_root(&self, slot: u64) -> Result<B256, ConsensusError> {
        if slot >= self.slot || self.slot > slot.saturating_add(LATEST_BLOCK_ROOTS_LENGTH) {
            return Err(ConsensusError::InvalidArgument(format!(
                "slot {slot} is outside the block roots window of slot {}",
                self.slot
            )));
        }
        Ok(self.latest_block_roots[(slot % LATEST_BLOCK_ROOTS_LENGTH) as usize])
    }

    /// Return the signature domain of a message of ``domain_type`` at ``epoch``, defaulting to
    /// the current epoch.
    pub fn get_domain(
        &self,
        domain_type: u64,
        epoch: Option<u64>,
        spec: &BeaconNetworkSpec,
    ) -> u64 {
        let epoch = epoch.unwrap_or_else(|| self.get_current_epoch(spec));
        self.fork.get_domain(epoch, domain_type)
    }

    /// Check the deposit signature of ``pubkey`` over its own deposit input.
    pub fn validate_proof_of_possession<V: SignatureVerifier>(
        &self,
        pubkey: &PubKey,
        proof_of_possession: &BLSSignature,
        withdrawal_credentials: B256,
        spec: &BeaconNetworkSpec,
        verifier: &V,
    ) -> bool {
        let message = DepositInput {
            pubkey: pubkey.clone(),
            withdrawal_credentials,
            proof_of_possession: BLSSignature::empty(),
        }
        .tree_hash_root();
        verifier.verify(
            pubkey,
            message,
            proof_of_possession,
            self.get_domain(spec.domain_deposit, None, spec),
        )
    }
}
