use super::errors::{AttesterSlashingInvalid as Invalid, BlockOperationError};
use super::verify_indexed_attestation::{is_valid_indexed_attestation, IndexedAttestationInvalid};
use crate::common::slash_validator;
use crate::macros::verify;
use std::collections::BTreeSet;
use types::{AttestationData, AttesterSlashing, BeaconState, ChainSpec};

type Result<T> = std::result::Result<T, BlockOperationError<Invalid>>;

fn error(reason: Invalid) -> BlockOperationError<Invalid> {
    BlockOperationError::invalid(reason)
}

/// `is_slashable_attestation_data`: a double vote (same target epoch, different data) or a
/// surround vote (one attestation's source/target interval strictly contains the other's).
fn is_slashable_attestation_data(data_1: &AttestationData, data_2: &AttestationData) -> bool {
    (data_1 != data_2 && data_1.target.epoch == data_2.target.epoch)
        || (data_1.source.epoch < data_2.source.epoch && data_2.target.epoch < data_1.target.epoch)
        || (data_2.source.epoch < data_1.source.epoch && data_1.target.epoch < data_2.target.epoch)
}

/// `process_attester_slashing`: slashes every validator named by both indexed attestations'
/// attesting-index sets that is still slashable, provided the two attestations are themselves
/// mutually slashable and independently valid.
pub fn process_attester_slashing(
    state: &mut BeaconState,
    attester_slashing: &AttesterSlashing,
    block_proposer_index: u64,
    spec: &ChainSpec,
) -> Result<()> {
    let attestation_1 = &attester_slashing.attestation_1;
    let attestation_2 = &attester_slashing.attestation_2;

    verify!(
        is_slashable_attestation_data(&attestation_1.data, &attestation_2.data),
        Invalid::NotSlashable
    );

    map_indexed_err(is_valid_indexed_attestation(state, attestation_1, spec))?;
    map_indexed_err(is_valid_indexed_attestation(state, attestation_2, spec))?;

    let set_1: BTreeSet<_> = attestation_1.attesting_indices.iter().collect();
    let set_2: BTreeSet<_> = attestation_2.attesting_indices.iter().collect();
    let current_epoch = state.current_epoch();

    let mut slashed_any = false;
    for &&index in set_1.intersection(&set_2) {
        if state.validator(index)?.is_slashable_at(current_epoch) {
            slash_validator(state, index, None, block_proposer_index, spec)?;
            slashed_any = true;
        }
    }
    verify!(slashed_any, Invalid::NoSlashableIndices);

    Ok(())
}

fn map_indexed_err(
    result: std::result::Result<(), BlockOperationError<IndexedAttestationInvalid>>,
) -> Result<()> {
    result.map_err(|e| match e {
        BlockOperationError::Invalid(IndexedAttestationInvalid::IndicesEmptyOrUnsorted) => {
            error(Invalid::IndicesNotSorted)
        }
        BlockOperationError::Invalid(IndexedAttestationInvalid::BadSignature) => {
            error(Invalid::BadSignature)
        }
        BlockOperationError::BeaconStateError(e) => BlockOperationError::BeaconStateError(e),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use types::Checkpoint;

    #[test]
    fn double_vote_is_slashable() {
        let data_1 = AttestationData {
            target: Checkpoint { epoch: 5, root: types::Hash256::repeat_byte(1) },
            ..Default::default()
        };
        let data_2 = AttestationData {
            target: Checkpoint { epoch: 5, root: types::Hash256::repeat_byte(2) },
            ..Default::default()
        };
        assert!(is_slashable_attestation_data(&data_1, &data_2));
    }

    #[test]
    fn surround_vote_is_slashable() {
        let data_1 = AttestationData {
            source: Checkpoint { epoch: 1, ..Default::default() },
            target: Checkpoint { epoch: 10, ..Default::default() },
            ..Default::default()
        };
        let data_2 = AttestationData {
            source: Checkpoint { epoch: 2, ..Default::default() },
            target: Checkpoint { epoch: 9, ..Default::default() },
            ..Default::default()
        };
        assert!(is_slashable_attestation_data(&data_1, &data_2));
    }

    #[test]
    fn disjoint_votes_are_not_slashable() {
        let data_1 = AttestationData {
            source: Checkpoint { epoch: 1, ..Default::default() },
            target: Checkpoint { epoch: 2, ..Default::default() },
            ..Default::default()
        };
        let data_2 = AttestationData {
            source: Checkpoint { epoch: 3, ..Default::default() },
            target: Checkpoint { epoch: 4, ..Default::default() },
            ..Default::default()
        };
        assert!(!is_slashable_attestation_data(&data_1, &data_2));
    }
}
