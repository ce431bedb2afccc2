//! Aligned access to the validator registry and its balances.
//!
//! The two lists are encoded as separate members of the state, but every index names a
//! `(Validator, balance)` pair. [`Registry`] and [`RegistryMut`] are the only way to reach them,
//! and neither can change the length of one list without the other.

use ember_bls::PubKey;
use ssz_types::VariableList;

use crate::{constants::ValidatorRegistryLimit, errors::ConsensusError, validator::Validator};

pub type ValidatorList = VariableList<Validator, ValidatorRegistryLimit>;
pub type BalanceList = VariableList<u64, ValidatorRegistryLimit>;

#[derive(Debug, Clone, Copy)]
pub struct Registry<'a> {
    validators: &'a ValidatorList,
    balances: &'a BalanceList,
}

impl<'a> Registry<'a> {
    pub(crate) fn new(validators: &'a ValidatorList, balances: &'a BalanceList) -> Self {
        Self {
            validators,
            balances,
        }
    }

    pub fn len(&self) -> usize {
        self.validators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.validators.is_empty()
    }

    pub fn validators(&self) -> &'a [Validator] {
        self.validators
    }

    pub fn balances(&self) -> &'a [u64] {
        self.balances
    }

    pub fn validator(&self, index: u64) -> Result<&'a Validator, ConsensusError> {
        self.validators
            .get(index as usize)
            .ok_or(ConsensusError::ValidatorIndexOutOfRange(index))
    }

    pub fn balance(&self, index: u64) -> Result<u64, ConsensusError> {
        self.balances
            .get(index as usize)
            .copied()
            .ok_or(ConsensusError::ValidatorIndexOutOfRange(index))
    }

    /// Iterate `(index, validator, balance)` in registry order.
    pub fn iter(self) -> impl Iterator<Item = (u64, &'a Validator, u64)> {
        self.validators
            .iter()
            .zip(self.balances.iter())
            .enumerate()
            .map(|(index, (validator, balance))| (index as u64, validator, *balance))
    }

    pub fn find_by_pubkey(&self, pubkey: &PubKey) -> Option<u64> {
        self.validators
            .iter()
            .position(|validator| validator.pubkey == *pubkey)
            .map(|index| index as u64)
    }

    pub fn verify_aligned(&self) -> Result<(), ConsensusError> {
        if self.validators.len() != self.balances.len() {
            return Err(ConsensusError::InvariantViolation(format!(
                "validator registry has {} entries but {} balances",
                self.validators.len(),
                self.balances.len()
            )));
        }
        Ok(())
    }
}

#[derive(Debug)]
pub struct RegistryMut<'a> {
    validators: &'a mut ValidatorList,
    balances: &'a mut BalanceList,
}

impl<'a> RegistryMut<'a> {
    pub(crate) fn new(validators: &'a mut ValidatorList, balances: &'a mut BalanceList) -> Self {
        Self {
            validators,
            balances,
        }
    }

    pub fn as_view(&self) -> Registry<'_> {
        Registry::new(self.validators, self.balances)
    }

    /// Append a validator together with its balance, returning the new index.
    pub fn push(&mut self, validator: Validator, balance: u64) -> Result<u64, ConsensusError> {
        self.as_view().verify_aligned()?;
        let index = self.validators.len();
        if index >= ValidatorList::max_len() {
            return Err(ConsensusError::ListFull("validator_registry"));
        }
        self.validators
            .push(validator)
            .map_err(|_| ConsensusError::ListFull("validator_registry"))?;
        self.balances
            .push(balance)
            .map_err(|_| ConsensusError::ListFull("validator_balances"))?;
        Ok(index as u64)
    }

    pub fn validator_mut(&mut self, index: u64) -> Result<&mut Validator, ConsensusError> {
        self.validators
            .get_mut(index as usize)
            .ok_or(ConsensusError::ValidatorIndexOutOfRange(index))
    }

    pub fn balance_mut(&mut self, index: u64) -> Result<&mut u64, ConsensusError> {
        self.balances
            .get_mut(index as usize)
            .ok_or(ConsensusError::ValidatorIndexOutOfRange(index))
    }

    pub fn set_balance(&mut self, index: u64, balance: u64) -> Result<(), ConsensusError> {
        *self.balance_mut(index)? = balance;
        Ok(())
    }

    /// Increase the balance at ``index`` by ``delta``, failing on overflow.
    pub fn increase_balance(&mut self, index: u64, delta: u64) -> Result<u64, ConsensusError> {
        let balance = self.balance_mut(index)?;
        *balance = balance
            .checked_add(delta)
            .ok_or(ConsensusError::ArithmeticOverflow("increase_balance"))?;
        Ok(*balance)
    }

    /// Decrease the balance at ``index`` by ``delta``, flooring at zero.
    pub fn decrease_balance(&mut self, index: u64, delta: u64) -> Result<u64, ConsensusError> {
        let balance = self.balance_mut(index)?;
        *balance = balance.saturating_sub(delta);
        Ok(*balance)
    }
}
