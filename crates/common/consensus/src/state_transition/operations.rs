use ember_bls::{BLSSignature, SignatureVerifier};
use ember_network_spec::networks::BeaconNetworkSpec;
use ethereum_hashing::hash_fixed;
use tracing::{debug, info};

use crate::{
    beacon_block::BeaconBlock,
    beacon_state::BeaconState,
    codec::hash_tree_root,
    constants::LATEST_RANDAO_MIXES_LENGTH,
    errors::ConsensusError,
    eth_1_data::{Eth1Data, Eth1DataVote},
    exit::Exit,
    misc::{get_entry_exit_effect_epoch, xor},
};

impl BeaconState {
    /// Apply the deposits and then the exits of ``block``. Either every operation applies or
    /// the state is left untouched.
    pub fn process_block_operations<V: SignatureVerifier>(
        &mut self,
        block: &BeaconBlock,
        spec: &BeaconNetworkSpec,
        verifier: &V,
    ) -> Result<(), ConsensusError> {
        let mut next = self.snapshot();
        for deposit in block.body.deposits.iter() {
            next.process_deposit_operation(deposit, spec, verifier)?;
        }
        for exit in block.body.exits.iter() {
            next.process_exit(exit, spec, verifier)?;
        }
        *self = next;

        debug!(
            slot = block.slot,
            deposits = block.body.deposits.len(),
            exits = block.body.exits.len(),
            "Processed block operations"
        );
        Ok(())
    }

    /// Process a voluntary exit signed by the exiting validator.
    pub fn process_exit<V: SignatureVerifier>(
        &mut self,
        exit: &Exit,
        spec: &BeaconNetworkSpec,
        verifier: &V,
    ) -> Result<(), ConsensusError> {
        self.verify_registry_invariant()?;
        let current_epoch = self.get_current_epoch(spec);
        let validator = self.registry().validator(exit.validator_index)?;

        if !validator.is_active_validator(current_epoch) {
            return Err(ConsensusError::InvalidOperation(format!(
                "validator {} is not active at epoch {current_epoch}",
                exit.validator_index
            )));
        }
        // Verify the validator has not yet exited
        if validator.exit_epoch <= get_entry_exit_effect_epoch(current_epoch, spec) {
            return Err(ConsensusError::InvalidOperation(format!(
                "validator {} has already exited",
                exit.validator_index
            )));
        }
        // Exits must specify an epoch when they become valid; they are not valid before then
        if current_epoch < exit.epoch {
            return Err(ConsensusError::InvalidOperation(format!(
                "exit of validator {} is not valid before epoch {}",
                exit.validator_index, exit.epoch
            )));
        }
        if !verifier.verify(
            &validator.pubkey,
            hash_tree_root(&exit.signing_message()),
            &exit.signature,
            self.get_domain(spec.domain_exit, Some(exit.epoch), spec),
        ) {
            return Err(ConsensusError::InvalidSignature("exit"));
        }

        self.initiate_validator_exit(exit.validator_index)?;
        info!(
            validator_index = exit.validator_index,
            epoch = exit.epoch,
            "Processed voluntary exit"
        );
        Ok(())
    }

    /// Mix the proposer's ``randao_reveal`` into the randao mix of the current epoch. The reveal
    /// is checked against the pubkey of the validator at ``proposer_index``.
    pub fn process_randao<V: SignatureVerifier>(
        &mut self,
        proposer_index: u64,
        randao_reveal: &BLSSignature,
        spec: &BeaconNetworkSpec,
        verifier: &V,
    ) -> Result<(), ConsensusError> {
        let current_epoch = self.get_current_epoch(spec);
        let proposer = self.registry().validator(proposer_index)?;

        if !verifier.verify(
            &proposer.pubkey,
            hash_tree_root(&current_epoch),
            randao_reveal,
            self.get_domain(spec.domain_randao, None, spec),
        ) {
            return Err(ConsensusError::InvalidSignature("randao"));
        }

        let mix_index = (current_epoch % LATEST_RANDAO_MIXES_LENGTH) as usize;
        self.latest_randao_mixes[mix_index] = xor(
            self.latest_randao_mixes[mix_index].as_slice(),
            &hash_fixed(&randao_reveal.to_bytes()),
        );
        Ok(())
    }

    /// Count a vote for ``eth1_data``.
    pub fn process_eth1_data(&mut self, eth1_data: &Eth1Data) -> Result<(), ConsensusError> {
        if let Some(vote) = self
            .eth1_data_votes
            .iter_mut()
            .find(|vote| vote.eth1_data == *eth1_data)
        {
            vote.vote_count = vote
                .vote_count
                .checked_add(1)
                .ok_or(ConsensusError::ArithmeticOverflow("eth1 data vote count"))?;
            return Ok(());
        }

        self.eth1_data_votes
            .push(Eth1DataVote {
                eth1_data: eth1_data.clone(),
                vote_count: 1,
            })
            .map_err(|_| ConsensusError::ListFull("eth1_data_votes"))
    }
}
