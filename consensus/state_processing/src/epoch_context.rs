//! Committee and proposer caches. A single [`EpochContext`] holds everything derived from
//! the seed/shuffling machinery for three consecutive epochs -- previous, current and next --
//! so that committee lookups and proposer selection never recompute a shuffle mid-epoch.

use ethereum_hashing::hash;
use safe_arith::SafeArith;
use std::collections::HashMap;
use types::primitives::{CommitteeIndex, Epoch, Hash256, PublicKeyBytes, Slot, ValidatorIndex};
use types::{BeaconState, ChainSpec, Error as BeaconStateError};

#[derive(Debug, Clone)]
pub struct ShufflingEpoch {
    pub epoch: Epoch,
    pub seed: Hash256,
    /// Active validator indices at `epoch`, permuted by the seed. Committee `i` of slot `s`
    /// (slot-relative index within the epoch) is the slice of this vector computed by
    /// [`compute_committee_range`].
    pub shuffling: Vec<ValidatorIndex>,
    pub committees_per_slot: u64,
}

impl ShufflingEpoch {
    fn new(state: &BeaconState, epoch: Epoch, spec: &ChainSpec) -> Result<Self, BeaconStateError> {
        let seed = get_seed(state, epoch, spec.domain_beacon_attester, spec);
        let active_indices = state.get_active_validator_indices(epoch);
        let committees_per_slot = compute_committee_count_per_slot(active_indices.len(), spec);

        let seed_bytes: [u8; 32] = seed.0;
        let permutation = swap_or_not_shuffle::shuffle_list(
            (0..active_indices.len()).collect(),
            &seed_bytes,
            true,
        );
        let shuffling: Vec<ValidatorIndex> = permutation
            .into_iter()
            .map(|i| active_indices[i])
            .collect();

        Ok(Self {
            epoch,
            seed,
            shuffling,
            committees_per_slot,
        })
    }
}

#[derive(Debug, Clone)]
pub struct EpochContext {
    pub pubkey_to_index: HashMap<PublicKeyBytes, ValidatorIndex>,
    pub previous: ShufflingEpoch,
    pub current: ShufflingEpoch,
    pub next: ShufflingEpoch,
}

impl EpochContext {
    /// Builds the full context from scratch. Called once per state the caller wants to operate
    /// on; [`EpochContext::rotate`] is the cheaper path used by [`crate::per_slot_processing`]
    /// when advancing into a new epoch of an already-known state.
    pub fn new(state: &BeaconState, spec: &ChainSpec) -> Result<Self, BeaconStateError> {
        let current_epoch = state.current_epoch();
        let previous_epoch = state.previous_epoch();
        let next_epoch = current_epoch.safe_add(1)?;

        let pubkey_to_index = state
            .validators
            .iter()
            .enumerate()
            .map(|(i, v)| (v.pubkey, i as ValidatorIndex))
            .collect();

        Ok(Self {
            pubkey_to_index,
            previous: ShufflingEpoch::new(state, previous_epoch, spec)?,
            current: ShufflingEpoch::new(state, current_epoch, spec)?,
            next: ShufflingEpoch::new(state, next_epoch, spec)?,
        })
    }

    /// Drops `previous`, promotes `current` to `previous` and `next` to `current`, and computes
    /// a fresh `next` shuffling against the now-updated RANDAO mix. Registers new validators'
    /// pubkeys picked up by deposits processed since the context was built.
    pub fn rotate(&mut self, state: &BeaconState, spec: &ChainSpec) -> Result<(), BeaconStateError> {
        for (i, v) in state.validators.iter().enumerate() {
            self.pubkey_to_index.entry(v.pubkey).or_insert(i as ValidatorIndex);
        }
        let new_next_epoch = self.next.epoch.safe_add(1)?;
        let new_next = ShufflingEpoch::new(state, new_next_epoch, spec)?;
        self.previous = std::mem::replace(&mut self.current, std::mem::replace(&mut self.next, new_next));
        Ok(())
    }

    pub fn shuffling_for(&self, epoch: Epoch) -> Option<&ShufflingEpoch> {
        if epoch == self.previous.epoch {
            Some(&self.previous)
        } else if epoch == self.current.epoch {
            Some(&self.current)
        } else if epoch == self.next.epoch {
            Some(&self.next)
        } else {
            None
        }
    }

    /// `get_beacon_committee`: the slice of `epoch`'s shuffling assigned to `(slot, index)`.
    pub fn get_beacon_committee(
        &self,
        slot: Slot,
        index: CommitteeIndex,
        spec: &ChainSpec,
    ) -> Result<&[ValidatorIndex], BeaconStateError> {
        let epoch = slot / spec.slots_per_epoch;
        let shuffling = self
            .shuffling_for(epoch)
            .ok_or(BeaconStateError::EpochOutOfRange { epoch })?;
        let slot_in_epoch = slot % spec.slots_per_epoch;
        let committees_per_slot = shuffling.committees_per_slot;
        let committee_index = slot_in_epoch
            .safe_mul(committees_per_slot)?
            .safe_add(index)?;
        let committee_count = committees_per_slot.safe_mul(spec.slots_per_epoch)?;
        let (start, end) =
            compute_committee_range(shuffling.shuffling.len(), committee_index, committee_count)?;
        Ok(&shuffling.shuffling[start..end])
    }

    pub fn count_committees_per_slot(&self, epoch: Epoch) -> Option<u64> {
        self.shuffling_for(epoch).map(|s| s.committees_per_slot)
    }

    /// `get_beacon_proposer_index` for `state.slot`, via effective-balance-weighted rejection
    /// sampling over the current epoch's full shuffling.
    pub fn get_beacon_proposer_index(
        &self,
        state: &BeaconState,
        spec: &ChainSpec,
    ) -> Result<ValidatorIndex, BeaconStateError> {
        let epoch = state.current_epoch();
        let shuffling = self
            .shuffling_for(epoch)
            .ok_or(BeaconStateError::EpochOutOfRange { epoch })?;
        let seed_input = proposer_seed(state, spec)?;
        compute_proposer_index(state, &shuffling.shuffling, &seed_input, spec)
    }
}

/// `compute_committee_count_per_slot`: `clamp(floor(floor(active_count / SLOTS_PER_EPOCH) /
/// TARGET_COMMITTEE_SIZE), 1, MAX_COMMITTEES_PER_SLOT)`.
pub fn compute_committee_count_per_slot(active_validator_count: usize, spec: &ChainSpec) -> u64 {
    let per_epoch = active_validator_count as u64 / spec.slots_per_epoch;
    (per_epoch / spec.target_committee_size).clamp(1, spec.max_committees_per_slot)
}

/// `compute_committee`: start/end indices of committee `committee_index` of `committee_count`
/// total committees into a shuffling of `shuffling_len` active validators.
fn compute_committee_range(
    shuffling_len: usize,
    committee_index: u64,
    committee_count: u64,
) -> Result<(usize, usize), BeaconStateError> {
    let len = shuffling_len as u64;
    let start = len
        .safe_mul(committee_index)
        .map_err(BeaconStateError::from)?
        .safe_div(committee_count)
        .map_err(BeaconStateError::from)?;
    let end = len
        .safe_mul(committee_index.safe_add(1).map_err(BeaconStateError::from)?)
        .map_err(BeaconStateError::from)?
        .safe_div(committee_count)
        .map_err(BeaconStateError::from)?;
    Ok((start as usize, end as usize))
}

/// `get_seed`: `hash(domain_type ++ int_to_bytes8(epoch) ++ randao_mix(epoch +
/// EPOCHS_PER_HISTORICAL_VECTOR - 1))`.
pub fn get_seed(
    state: &BeaconState,
    epoch: Epoch,
    domain_type: types::primitives::DomainType,
    spec: &ChainSpec,
) -> Hash256 {
    let mix_epoch = epoch
        .saturating_add(spec.epochs_per_historical_vector)
        .saturating_sub(1);
    let mix = state.get_randao_mix(mix_epoch);
    let mut input = Vec::with_capacity(4 + 8 + 32);
    input.extend_from_slice(&domain_type);
    input.extend_from_slice(&int_to_bytes::int_to_bytes8(epoch));
    input.extend_from_slice(mix.as_slice());
    let digest = hash(&input);
    Hash256::from_slice(&digest)
}

fn proposer_seed(state: &BeaconState, spec: &ChainSpec) -> Result<[u8; 32], BeaconStateError> {
    let seed = get_seed(state, state.current_epoch(), spec.domain_beacon_proposer, spec);
    let mut input = [0u8; 40];
    input[..32].copy_from_slice(seed.as_slice());
    input[32..].copy_from_slice(&int_to_bytes::int_to_bytes8(state.slot));
    let digest = hash(&input);
    let mut out = [0u8; 32];
    out.copy_from_slice(&digest);
    Ok(out)
}

const MAX_RANDOM_BYTE: u64 = u8::MAX as u64;

/// `compute_proposer_index`: effective-balance-weighted rejection sampling over `indices`,
/// shuffled by `seed` one candidate at a time so the search never materializes a second
/// permutation.
fn compute_proposer_index(
    state: &BeaconState,
    indices: &[ValidatorIndex],
    seed: &[u8; 32],
    spec: &ChainSpec,
) -> Result<ValidatorIndex, BeaconStateError> {
    if indices.is_empty() {
        return Err(BeaconStateError::IndexOutOfRange(0));
    }
    let total = indices.len();
    let mut i: u64 = 0;
    loop {
        let shuffled = swap_or_not_shuffle::compute_shuffled_index(
            (i % total as u64) as usize,
            total,
            seed,
        )
        .ok_or(BeaconStateError::IndexOutOfRange(0))?;
        let candidate_index = indices[shuffled];

        let mut buf = [0u8; 40];
        buf[..32].copy_from_slice(seed);
        buf[32..].copy_from_slice(&int_to_bytes::int_to_bytes8(i / 32));
        let digest = hash(&buf);
        let random_byte = digest[(i % 32) as usize] as u64;

        let effective_balance = state.validator(candidate_index)?.effective_balance;
        if effective_balance
            .safe_mul(MAX_RANDOM_BYTE)
            .map_err(BeaconStateError::from)?
            >= spec
                .max_effective_balance
                .safe_mul(random_byte)
                .map_err(BeaconStateError::from)?
        {
            return Ok(candidate_index);
        }
        i += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn committee_count_clamps_to_one() {
        let spec = ChainSpec::mainnet();
        assert_eq!(compute_committee_count_per_slot(0, &spec), 1);
        assert_eq!(compute_committee_count_per_slot(32 * 128, &spec), 1);
    }

    #[test]
    fn committee_count_clamps_to_max() {
        let spec = ChainSpec::mainnet();
        assert_eq!(
            compute_committee_count_per_slot(32 * 128 * 1000, &spec),
            spec.max_committees_per_slot
        );
    }

    #[test]
    fn committee_range_covers_whole_shuffling() {
        let (start0, end0) = compute_committee_range(100, 0, 4).unwrap();
        let (start1, _end1) = compute_committee_range(100, 1, 4).unwrap();
        let (_start3, end3) = compute_committee_range(100, 3, 4).unwrap();
        assert_eq!(start0, 0);
        assert_eq!(end0, start1);
        assert_eq!(end3, 100);
    }
}
