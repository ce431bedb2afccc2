use alloy_primitives::B256;
use ember_bls::{BLSSignature, PubKey, SignatureVerifier};
use ember_merkle::is_valid_merkle_branch;
use ember_network_spec::networks::BeaconNetworkSpec;
use tracing::{info, warn};

use crate::{
    beacon_state::BeaconState, deposit::Deposit, errors::ConsensusError, validator::Validator,
};

impl BeaconState {
    /// Process a deposit from Ethereum 1.0, returning the index of the credited validator.
    ///
    /// An unknown ``pubkey`` must carry a valid proof of possession and is appended to the
    /// registry; a known one is topped up.
    pub fn process_deposit<V: SignatureVerifier>(
        &mut self,
        pubkey: &PubKey,
        amount: u64,
        proof_of_possession: &BLSSignature,
        withdrawal_credentials: B256,
        spec: &BeaconNetworkSpec,
        verifier: &V,
    ) -> Result<u64, ConsensusError> {
        self.verify_registry_invariant()?;

        if let Some(index) = self.registry().find_by_pubkey(pubkey) {
            let balance = self.registry_mut().increase_balance(index, amount)?;
            info!(index, amount, balance, "Deposit topped up validator");
            return Ok(index);
        }

        if !self.validate_proof_of_possession(
            pubkey,
            proof_of_possession,
            withdrawal_credentials,
            spec,
            verifier,
        ) {
            warn!(?pubkey, amount, "Deposit rejected: invalid proof of possession");
            return Err(ConsensusError::InvalidProofOfPossession {
                pubkey: pubkey.clone(),
            });
        }

        let validator = Validator::new(
            pubkey.clone(),
            withdrawal_credentials,
            spec.far_future_epoch,
        );
        let index = self.registry_mut().push(validator, amount)?;
        info!(index, amount, "Deposit added validator");
        Ok(index)
    }

    /// Verify ``deposit`` against the deposit root of the latest Ethereum 1.0 data, then
    /// process it.
    pub fn process_deposit_operation<V: SignatureVerifier>(
        &mut self,
        deposit: &Deposit,
        spec: &BeaconNetworkSpec,
        verifier: &V,
    ) -> Result<u64, ConsensusError> {
        if !is_valid_merkle_branch(
            deposit.deposit_data.leaf(),
            &deposit.branch,
            spec.deposit_contract_tree_depth,
            deposit.index,
            self.latest_eth1_data.deposit_root,
        ) {
            warn!(index = deposit.index, "Deposit rejected: invalid merkle branch");
            return Err(ConsensusError::InvalidMerkleBranch {
                index: deposit.index,
            });
        }

        let deposit_input = &deposit.deposit_data.deposit_input;
        self.process_deposit(
            &deposit_input.pubkey,
            deposit.deposit_data.amount,
            &deposit_input.proof_of_possession,
            deposit_input.withdrawal_credentials,
            spec,
            verifier,
        )
    }
}
