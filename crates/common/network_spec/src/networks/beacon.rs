use std::sync::{Arc, LazyLock};

use anyhow::{Context, ensure};
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Network {
    Mainnet,
    Minimal,
    Custom(String),
}

impl<'de> Deserialize<'de> for Network {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        match String::deserialize(deserializer)?.as_str() {
            "mainnet" => Ok(Network::Mainnet),
            "minimal" => Ok(Network::Minimal),
            custom => Ok(Network::Custom(custom.to_string())),
        }
    }
}

/// Runtime parameters of the beacon chain. Sizes that fix the shape of encoded records are
/// compile-time presets and live with the consensus types instead.
#[derive(Clone, Debug, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub struct BeaconNetworkSpec {
    #[serde(rename = "CONFIG_NAME")]
    pub network: Network,
    pub network_id: u64,
    pub chain_id: u64,

    // Genesis
    pub genesis_slot: u64,
    pub genesis_fork_version: u64,
    pub genesis_start_shard: u64,
    pub far_future_epoch: u64,

    // Time parameters
    pub slots_per_epoch: u64,
    pub entry_exit_delay: u64,
    pub seed_lookahead: u64,
    pub eth1_data_voting_period: u64,
    pub min_validator_withdrawal_epochs: u64,

    // Gwei values
    pub ejection_balance: u64,
    pub max_deposit_amount: u64,
    pub min_deposit_amount: u64,

    // Validator cycle
    pub max_balance_churn_quotient: u64,
    pub max_exit_dequeues_per_epoch: u64,
    pub whistleblower_reward_quotient: u64,

    // Deposit contract
    pub deposit_contract_tree_depth: u64,

    // Signature domains
    pub domain_deposit: u64,
    pub domain_attestation: u64,
    pub domain_proposal: u64,
    pub domain_exit: u64,
    pub domain_randao: u64,
}

impl BeaconNetworkSpec {
    pub fn from_yaml_str(contents: &str) -> anyhow::Result<Self> {
        let spec: Self =
            serde_yaml::from_str(contents).context("Failed to parse network spec YAML")?;
        spec.validate()?;
        Ok(spec)
    }

    /// Reject values that would make epoch arithmetic divide by zero.
    pub fn validate(&self) -> anyhow::Result<()> {
        ensure!(self.slots_per_epoch > 0, "SLOTS_PER_EPOCH must be non-zero");
        ensure!(
            self.max_balance_churn_quotient > 0,
            "MAX_BALANCE_CHURN_QUOTIENT must be non-zero"
        );
        ensure!(
            self.whistleblower_reward_quotient > 0,
            "WHISTLEBLOWER_REWARD_QUOTIENT must be non-zero"
        );
        ensure!(
            self.eth1_data_voting_period > 0,
            "ETH1_DATA_VOTING_PERIOD must be non-zero"
        );
        ensure!(
            self.deposit_contract_tree_depth <= 64,
            "DEPOSIT_CONTRACT_TREE_DEPTH must be at most 64"
        );
        Ok(())
    }

    pub fn genesis_epoch(&self) -> u64 {
        self.genesis_slot / self.slots_per_epoch
    }
}

pub static MAINNET: LazyLock<Arc<BeaconNetworkSpec>> = LazyLock::new(|| {
    BeaconNetworkSpec {
        network: Network::Mainnet,
        network_id: 1,
        chain_id: 1,
        genesis_slot: 1 << 63,
        genesis_fork_version: 0,
        genesis_start_shard: 0,
        far_future_epoch: u64::MAX,
        slots_per_epoch: 64,
        entry_exit_delay: 4,
        seed_lookahead: 1,
        eth1_data_voting_period: 16,
        min_validator_withdrawal_epochs: 256,
        ejection_balance: 16_000_000_000,
        max_deposit_amount: 32_000_000_000,
        min_deposit_amount: 1_000_000_000,
        max_balance_churn_quotient: 32,
        max_exit_dequeues_per_epoch: 4,
        whistleblower_reward_quotient: 512,
        deposit_contract_tree_depth: 32,
        domain_deposit: 0,
        domain_attestation: 1,
        domain_proposal: 2,
        domain_exit: 3,
        domain_randao: 4,
    }
    .into()
});

pub static MINIMAL: LazyLock<Arc<BeaconNetworkSpec>> = LazyLock::new(|| {
    BeaconNetworkSpec {
        network: Network::Minimal,
        network_id: 0,
        chain_id: 0,
        genesis_slot: 0,
        genesis_fork_version: 0,
        genesis_start_shard: 0,
        far_future_epoch: u64::MAX,
        slots_per_epoch: 8,
        entry_exit_delay: 4,
        seed_lookahead: 1,
        eth1_data_voting_period: 2,
        min_validator_withdrawal_epochs: 4,
        ejection_balance: 16_000_000_000,
        max_deposit_amount: 32_000_000_000,
        min_deposit_amount: 1_000_000_000,
        max_balance_churn_quotient: 32,
        max_exit_dequeues_per_epoch: 4,
        whistleblower_reward_quotient: 512,
        deposit_contract_tree_depth: 32,
        domain_deposit: 0,
        domain_attestation: 1,
        domain_proposal: 2,
        domain_exit: 3,
        domain_randao: 4,
    }
    .into()
});
