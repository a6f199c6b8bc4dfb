use super::errors::{AttestationInvalid as Invalid, BlockOperationError};
use super::verify_indexed_attestation::{is_valid_indexed_attestation, IndexedAttestationInvalid};
use crate::epoch_context::EpochContext;
use crate::macros::verify;
use safe_arith::SafeArith;
use types::primitives::ValidatorIndex;
use types::{Attestation, BeaconState, ChainSpec, IndexedAttestation, PendingAttestation};

type Result<T> = std::result::Result<T, BlockOperationError<Invalid>>;

fn error(reason: Invalid) -> BlockOperationError<Invalid> {
    BlockOperationError::invalid(reason)
}

/// `process_attestation`: validates the vote's committee, target epoch and inclusion window,
/// folds it into `state.{previous,current}_epoch_attestations` as a `PendingAttestation` (the
/// form rewards processing reads back at epoch end), and only then checks its aggregate
/// signature -- a bad signature still fails the block, but state mutation happens first since
/// every check up to that point only reads `state`.
pub fn process_attestation(
    state: &mut BeaconState,
    attestation: &Attestation,
    proposer_index: ValidatorIndex,
    epoch_ctx: &EpochContext,
    spec: &ChainSpec,
) -> Result<()> {
    let data = &attestation.data;
    let current_epoch = state.current_epoch();
    let previous_epoch = state.previous_epoch();

    verify!(
        data.target.epoch == current_epoch || data.target.epoch == previous_epoch,
        Invalid::BadTargetEpoch
    );
    verify!(
        data.target.epoch == data.slot / spec.slots_per_epoch,
        Invalid::BadTargetEpoch
    );
    verify!(
        data.slot
            .safe_add(spec.min_attestation_inclusion_delay)
            .map_err(BlockOperationError::from)?
            <= state.slot,
        Invalid::IncludedTooEarly {
            state: state.slot,
            delay: spec.min_attestation_inclusion_delay,
            attestation: data.slot,
        }
    );
    verify!(
        state.slot
            <= data
                .slot
                .safe_add(spec.slots_per_epoch)
                .map_err(BlockOperationError::from)?,
        Invalid::IncludedTooLate {
            state: state.slot,
            attestation: data.slot,
        }
    );

    let committee = epoch_ctx
        .get_beacon_committee(data.slot, data.index, spec)
        .map_err(|_| error(Invalid::BadCommitteeIndex))?;
    verify!(
        attestation.aggregation_bits.len() == committee.len(),
        Invalid::BadAggregationBitsLength {
            committee_len: committee.len(),
            bitfield_len: attestation.aggregation_bits.len(),
        }
    );

    if data.target.epoch == current_epoch {
        verify!(
            data.source == state.current_justified_checkpoint,
            Invalid::WrongJustifiedCheckpoint
        );
    } else {
        verify!(
            data.source == state.previous_justified_checkpoint,
            Invalid::WrongJustifiedCheckpoint
        );
    }

    let attesting_indices = get_attesting_indices(committee, attestation)?;
    let pending_attestation = PendingAttestation {
        aggregation_bits: attestation.aggregation_bits.clone(),
        data: data.clone(),
        inclusion_delay: state
            .slot
            .safe_sub(data.slot)
            .map_err(BlockOperationError::from)?,
        proposer_index,
    };

    if data.target.epoch == current_epoch {
        state
            .current_epoch_attestations
            .push(pending_attestation)
            .map_err(BlockOperationError::from)?;
    } else {
        state
            .previous_epoch_attestations
            .push(pending_attestation)
            .map_err(BlockOperationError::from)?;
    }

    let indexed = IndexedAttestation {
        attesting_indices: ssz_types::VariableList::new(attesting_indices).map_err(|_| {
            error(Invalid::BadAggregationBitsLength {
                committee_len: committee.len(),
                bitfield_len: attestation.aggregation_bits.len(),
            })
        })?,
        data: data.clone(),
        signature: attestation.signature,
    };
    is_valid_indexed_attestation(state, &indexed, spec).map_err(|e| match e {
        BlockOperationError::Invalid(IndexedAttestationInvalid::IndicesEmptyOrUnsorted) => {
            error(Invalid::EmptyAggregationBitfield)
        }
        BlockOperationError::Invalid(IndexedAttestationInvalid::BadSignature) => {
            error(Invalid::BadSignature)
        }
        BlockOperationError::BeaconStateError(e) => BlockOperationError::BeaconStateError(e),
    })?;

    Ok(())
}

/// `get_attesting_indices`: committee members whose aggregation bit is set, in committee order
/// (callers that need `IndexedAttestation`'s sorted form sort afterwards).
fn get_attesting_indices(
    committee: &[ValidatorIndex],
    attestation: &Attestation,
) -> Result<Vec<ValidatorIndex>> {
    let mut indices: Vec<ValidatorIndex> = committee
        .iter()
        .enumerate()
        .filter(|(i, _)| attestation.aggregation_bits.get(*i).unwrap_or(false))
        .map(|(_, &index)| index)
        .collect();
    verify!(!indices.is_empty(), Invalid::EmptyAggregationBitfield);
    indices.sort_unstable();
    Ok(indices)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_bad_target_epoch() {
        let spec = ChainSpec::mainnet();
        let state = BeaconState::new(0, types::Eth1Data::default(), &spec);
        let epoch_ctx = EpochContext::new(&state, &spec).unwrap();
        let attestation = Attestation {
            aggregation_bits: ssz_types::BitList::with_capacity(1).unwrap(),
            data: types::AttestationData {
                target: types::Checkpoint { epoch: 99, ..Default::default() },
                ..Default::default()
            },
            signature: types::SignatureBytes::empty(),
        };
        let mut state = state;
        let err =
            process_attestation(&mut state, &attestation, 0, &epoch_ctx, &spec).unwrap_err();
        assert_eq!(err, BlockOperationError::Invalid(Invalid::BadTargetEpoch));
    }
}
