use crate::chain_spec::ChainSpec;
use crate::primitives::{Epoch, Gwei, Hash256, PublicKeyBytes};
use serde::{Deserialize, Serialize};
use ssz_derive::{Decode, Encode};
use tree_hash_derive::TreeHash;

/// A registry entry. `FAR_FUTURE_EPOCH` in any of the four epoch markers means "not yet
/// scheduled"; the markers are monotone non-decreasing wherever they are finite.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Encode, Decode, TreeHash)]
pub struct Validator {
    pub pubkey: PublicKeyBytes,
    pub withdrawal_credentials: Hash256,
    pub effective_balance: Gwei,
    pub slashed: bool,
    pub activation_eligibility_epoch: Epoch,
    pub activation_epoch: Epoch,
    pub exit_epoch: Epoch,
    pub withdrawable_epoch: Epoch,
}

impl Default for Validator {
    fn default() -> Self {
        Self {
            pubkey: PublicKeyBytes::empty(),
            withdrawal_credentials: Hash256::ZERO,
            effective_balance: 0,
            slashed: false,
            activation_eligibility_epoch: u64::MAX,
            activation_epoch: u64::MAX,
            exit_epoch: u64::MAX,
            withdrawable_epoch: u64::MAX,
        }
    }
}

impl Validator {
    /// `is_active_validator`: active at `epoch` iff activated no later than `epoch` and not yet
    /// exited as of `epoch`.
    pub fn is_active_at(&self, epoch: Epoch) -> bool {
        self.activation_epoch <= epoch && epoch < self.exit_epoch
    }

    /// `is_slashable_validator`: not slashed, and `epoch` falls within its active-or-exiting
    /// window.
    pub fn is_slashable_at(&self, epoch: Epoch) -> bool {
        !self.slashed && self.activation_epoch <= epoch && epoch < self.withdrawable_epoch
    }

    pub fn is_eligible_for_activation_queue(&self, spec: &ChainSpec) -> bool {
        self.activation_eligibility_epoch == spec.far_future_epoch
            && self.effective_balance == spec.max_effective_balance
    }

    pub fn is_exiting(&self) -> bool {
        self.exit_epoch != u64::MAX
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn activation_window() {
        let v = Validator {
            activation_epoch: 5,
            exit_epoch: 10,
            ..Default::default()
        };
        assert!(!v.is_active_at(4));
        assert!(v.is_active_at(5));
        assert!(v.is_active_at(9));
        assert!(!v.is_active_at(10));
    }
}
