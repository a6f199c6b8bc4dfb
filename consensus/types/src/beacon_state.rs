use crate::beacon_block_header::BeaconBlockHeader;
use crate::chain_spec::ChainSpec;
use crate::checkpoint::Checkpoint;
use crate::consts::{
    EpochsPerHistoricalVector, EpochsPerSlashingsVector, HistoricalRootsLimit,
    JustificationBitsLength, MaxAttestationsPerEpoch, SlotsPerEth1VotingPeriod,
    SlotsPerHistoricalRoot, ValidatorRegistryLimit, SLOTS_PER_EPOCH,
};
use crate::error::Error;
use crate::eth1_data::Eth1Data;
use crate::fork::Fork;
use crate::pending_attestation::PendingAttestation;
use crate::primitives::{Epoch, Gwei, Hash256, Slot, ValidatorIndex};
use crate::validator::Validator;
use safe_arith::SafeArith;
use serde::{Deserialize, Serialize};
use ssz_derive::{Decode, Encode};
use ssz_types::{BitVector, FixedVector, VariableList};
use tree_hash::TreeHash as _;
use tree_hash_derive::TreeHash;

/// The full consensus state. Three ring buffers (`block_roots`, `state_roots`, `randao_mixes`)
/// and one rolling accumulator (`slashings`) carry history that would otherwise grow unbounded;
/// each wraps modulo its fixed length rather than ever being resized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Encode, Decode, TreeHash)]
pub struct BeaconState {
    pub genesis_time: u64,
    pub slot: Slot,
    pub fork: Fork,
    pub latest_block_header: BeaconBlockHeader,
    pub block_roots: FixedVector<Hash256, SlotsPerHistoricalRoot>,
    pub state_roots: FixedVector<Hash256, SlotsPerHistoricalRoot>,
    pub historical_roots: VariableList<Hash256, HistoricalRootsLimit>,
    pub eth1_data: Eth1Data,
    pub eth1_data_votes: VariableList<Eth1Data, SlotsPerEth1VotingPeriod>,
    pub eth1_deposit_index: u64,
    pub validators: VariableList<Validator, ValidatorRegistryLimit>,
    pub balances: VariableList<Gwei, ValidatorRegistryLimit>,
    pub randao_mixes: FixedVector<Hash256, EpochsPerHistoricalVector>,
    pub slashings: FixedVector<Gwei, EpochsPerSlashingsVector>,
    pub previous_epoch_attestations: VariableList<PendingAttestation, MaxAttestationsPerEpoch>,
    pub current_epoch_attestations: VariableList<PendingAttestation, MaxAttestationsPerEpoch>,
    pub justification_bits: BitVector<JustificationBitsLength>,
    pub previous_justified_checkpoint: Checkpoint,
    pub current_justified_checkpoint: Checkpoint,
    pub finalized_checkpoint: Checkpoint,
}

impl BeaconState {
    pub fn new(genesis_time: u64, eth1_data: Eth1Data, spec: &ChainSpec) -> Self {
        Self {
            genesis_time,
            slot: spec.genesis_slot,
            fork: Fork {
                previous_version: spec.genesis_fork_version,
                current_version: spec.genesis_fork_version,
                epoch: 0,
            },
            latest_block_header: BeaconBlockHeader {
                body_root: crate::beacon_block_body::BeaconBlockBody::default().tree_hash_root(),
                ..Default::default()
            },
            block_roots: FixedVector::default(),
            state_roots: FixedVector::default(),
            historical_roots: VariableList::empty(),
            eth1_data,
            eth1_data_votes: VariableList::empty(),
            eth1_deposit_index: 0,
            validators: VariableList::empty(),
            balances: VariableList::empty(),
            randao_mixes: FixedVector::default(),
            slashings: FixedVector::default(),
            previous_epoch_attestations: VariableList::empty(),
            current_epoch_attestations: VariableList::empty(),
            justification_bits: BitVector::default(),
            previous_justified_checkpoint: Checkpoint::default(),
            current_justified_checkpoint: Checkpoint::default(),
            finalized_checkpoint: Checkpoint::default(),
        }
    }

    /// `compute_epoch_at_slot`.
    pub fn current_epoch(&self) -> Epoch {
        self.slot / SLOTS_PER_EPOCH
    }

    /// `get_previous_epoch`: one behind current, clamped at genesis so it never underflows.
    pub fn previous_epoch(&self) -> Epoch {
        let current = self.current_epoch();
        if current == 0 {
            0
        } else {
            current - 1
        }
    }

    /// `compute_start_slot_at_epoch`.
    pub fn start_slot_at_epoch(epoch: Epoch) -> Slot {
        epoch * SLOTS_PER_EPOCH
    }

    /// `get_block_root_at_slot`: ring buffer lookup, only valid for the trailing
    /// `SLOTS_PER_HISTORICAL_ROOT` slots.
    pub fn get_block_root_at_slot(&self, slot: Slot) -> Result<Hash256, Error> {
        let len = self.block_roots.len() as u64;
        if slot >= self.slot || self.slot > slot.safe_add(len).map_err(Error::from)? {
            return Err(Error::SlotOutOfRange {
                slot,
                state_slot: self.slot,
            });
        }
        Ok(self.block_roots[(slot % len) as usize])
    }

    /// `get_block_root`: the root of the first slot of `epoch`.
    pub fn get_block_root(&self, epoch: Epoch) -> Result<Hash256, Error> {
        self.get_block_root_at_slot(Self::start_slot_at_epoch(epoch))
    }

    pub fn get_randao_mix(&self, epoch: Epoch) -> Hash256 {
        let len = self.randao_mixes.len() as u64;
        self.randao_mixes[(epoch % len) as usize]
    }

    pub fn set_randao_mix(&mut self, epoch: Epoch, mix: Hash256) {
        let len = self.randao_mixes.len() as u64;
        self.randao_mixes[(epoch % len) as usize] = mix;
    }

    pub fn get_slashings(&self, epoch: Epoch) -> Gwei {
        let len = self.slashings.len() as u64;
        self.slashings[(epoch % len) as usize]
    }

    pub fn set_slashings(&mut self, epoch: Epoch, value: Gwei) {
        let len = self.slashings.len() as u64;
        self.slashings[(epoch % len) as usize] = value;
    }

    /// `get_active_validator_indices`: every validator active at `epoch`, in registry order.
    pub fn get_active_validator_indices(&self, epoch: Epoch) -> Vec<ValidatorIndex> {
        self.validators
            .iter()
            .enumerate()
            .filter(|(_, v)| v.is_active_at(epoch))
            .map(|(i, _)| i as ValidatorIndex)
            .collect()
    }

    /// `get_total_balance`: sum of effective balances, floored at `EFFECTIVE_BALANCE_INCREMENT`
    /// to keep committee math from dividing by zero on an empty set.
    pub fn get_total_balance(
        &self,
        indices: impl IntoIterator<Item = ValidatorIndex>,
        spec: &ChainSpec,
    ) -> Result<Gwei, Error> {
        let mut total: Gwei = 0;
        for i in indices {
            let validator = self
                .validators
                .get(i as usize)
                .ok_or(Error::UnknownValidator(i))?;
            total = total.safe_add(validator.effective_balance)?;
        }
        Ok(total.max(spec.effective_balance_increment))
    }

    pub fn get_total_active_balance(&self, spec: &ChainSpec) -> Result<Gwei, Error> {
        self.get_total_balance(self.get_active_validator_indices(self.current_epoch()), spec)
    }

    pub fn increase_balance(&mut self, index: ValidatorIndex, delta: Gwei) -> Result<(), Error> {
        let balance = self
            .balances
            .get_mut(index as usize)
            .ok_or(Error::UnknownValidator(index))?;
        *balance = balance.safe_add(delta)?;
        Ok(())
    }

    /// `decrease_balance`: saturates at zero rather than erroring, since a penalty may
    /// legitimately exceed the remaining balance.
    pub fn decrease_balance(&mut self, index: ValidatorIndex, delta: Gwei) -> Result<(), Error> {
        let balance = self
            .balances
            .get_mut(index as usize)
            .ok_or(Error::UnknownValidator(index))?;
        *balance = balance.saturating_sub(delta);
        Ok(())
    }

    pub fn validator(&self, index: ValidatorIndex) -> Result<&Validator, Error> {
        self.validators
            .get(index as usize)
            .ok_or(Error::UnknownValidator(index))
    }

    pub fn validator_mut(&mut self, index: ValidatorIndex) -> Result<&mut Validator, Error> {
        self.validators
            .get_mut(index as usize)
            .ok_or(Error::UnknownValidator(index))
    }
}
