//! Overridable configuration. Every value here may change between forks; the engine is generic
//! over `ChainSpec` rather than hard-coding mainnet numbers so a testnet or a future fork can
//! supply its own.

use crate::primitives::{Domain, DomainType, Epoch, Gwei, Slot, Version};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainSpec {
    pub slots_per_epoch: u64,
    pub max_validators_per_committee: u64,
    pub target_committee_size: u64,
    pub max_committees_per_slot: u64,
    pub shuffle_round_count: u8,
    pub churn_limit_quotient: u64,
    pub min_per_epoch_churn_limit: u64,
    pub epochs_per_historical_vector: u64,
    pub epochs_per_slashings_vector: u64,
    pub slots_per_historical_root: u64,
    pub slots_per_eth1_voting_period: u64,
    pub min_validator_withdrawability_delay: Epoch,
    pub persistent_committee_period: Epoch,
    pub min_seed_lookahead: Epoch,
    pub max_seed_lookahead: Epoch,
    pub base_reward_factor: u64,
    pub proposer_reward_quotient: u64,
    pub whistleblower_reward_quotient: u64,
    pub inactivity_penalty_quotient: u64,
    pub min_slashing_penalty_quotient: u64,
    pub min_epochs_to_inactivity_penalty: u64,
    pub min_attestation_inclusion_delay: Slot,
    pub max_effective_balance: Gwei,
    pub effective_balance_increment: Gwei,
    pub ejection_balance: Gwei,
    pub far_future_epoch: Epoch,

    pub domain_beacon_proposer: DomainType,
    pub domain_beacon_attester: DomainType,
    pub domain_randao: DomainType,
    pub domain_deposit: DomainType,
    pub domain_voluntary_exit: DomainType,

    pub genesis_fork_version: Version,
    pub genesis_slot: Slot,
}

impl Default for ChainSpec {
    fn default() -> Self {
        Self::mainnet()
    }
}

impl ChainSpec {
    pub fn mainnet() -> Self {
        Self {
            slots_per_epoch: 32,
            max_validators_per_committee: 2048,
            target_committee_size: 128,
            max_committees_per_slot: 64,
            shuffle_round_count: 90,
            churn_limit_quotient: 65_536,
            min_per_epoch_churn_limit: 4,
            epochs_per_historical_vector: 65_536,
            epochs_per_slashings_vector: 8_192,
            slots_per_historical_root: 8_192,
            slots_per_eth1_voting_period: 1_024,
            min_validator_withdrawability_delay: 256,
            persistent_committee_period: 2_048,
            min_seed_lookahead: 1,
            max_seed_lookahead: 4,
            base_reward_factor: 64,
            proposer_reward_quotient: 8,
            whistleblower_reward_quotient: 512,
            inactivity_penalty_quotient: 1 << 25,
            min_slashing_penalty_quotient: 32,
            min_epochs_to_inactivity_penalty: 4,
            min_attestation_inclusion_delay: 1,
            max_effective_balance: 32_000_000_000,
            effective_balance_increment: 1_000_000_000,
            ejection_balance: 16_000_000_000,
            far_future_epoch: u64::MAX,

            domain_beacon_proposer: [0x00, 0x00, 0x00, 0x00],
            domain_beacon_attester: [0x01, 0x00, 0x00, 0x00],
            domain_randao: [0x02, 0x00, 0x00, 0x00],
            domain_deposit: [0x03, 0x00, 0x00, 0x00],
            domain_voluntary_exit: [0x04, 0x00, 0x00, 0x00],

            genesis_fork_version: [0x00, 0x00, 0x00, 0x00],
            genesis_slot: 0,
        }
    }

    /// `compute_domain`: `fork_version ++ domain_type`, the 8-byte domain separator mixed into
    /// every signing root via `SigningData`.
    pub fn compute_domain(&self, domain_type: DomainType, fork_version: Version) -> Domain {
        let mut domain = [0u8; 8];
        domain[0..4].copy_from_slice(&fork_version);
        domain[4..8].copy_from_slice(&domain_type);
        domain
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_mixes_fork_version_and_type() {
        let spec = ChainSpec::mainnet();
        let domain = spec.compute_domain(spec.domain_randao, [0x01, 0x02, 0x03, 0x04]);
        assert_eq!(domain, [0x01, 0x02, 0x03, 0x04, 0x02, 0x00, 0x00, 0x00]);
    }
}
