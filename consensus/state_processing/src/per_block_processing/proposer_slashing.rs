use super::errors::{BlockOperationError, ProposerSlashingInvalid as Invalid};
use crate::common::slash_validator;
use crate::macros::verify;
use types::{BeaconState, ChainSpec, ProposerSlashing};

type Result<T> = std::result::Result<T, BlockOperationError<Invalid>>;

fn error(reason: Invalid) -> BlockOperationError<Invalid> {
    BlockOperationError::invalid(reason)
}

/// `process_proposer_slashing`: two headers, same slot and proposer, different bodies, each
/// independently signed by that proposer -- the canonical evidence that a validator proposed
/// two conflicting blocks for one slot.
pub fn process_proposer_slashing(
    state: &mut BeaconState,
    proposer_slashing: &ProposerSlashing,
    block_proposer_index: u64,
    spec: &ChainSpec,
) -> Result<()> {
    let header_1 = &proposer_slashing.signed_header_1.message;
    let header_2 = &proposer_slashing.signed_header_2.message;

    verify!(
        header_1.slot == header_2.slot,
        Invalid::SlotMismatch {
            slot_1: header_1.slot,
            slot_2: header_2.slot,
        }
    );
    verify!(
        header_1.proposer_index == header_2.proposer_index,
        Invalid::ProposersDiffer
    );
    verify!(header_1 != header_2, Invalid::BodiesMatch);

    let slashed_index = header_1.proposer_index;
    let current_epoch = state.current_epoch();
    let proposer = state
        .validator(slashed_index)
        .map_err(|_| error(Invalid::ProposerUnknown(slashed_index)))?;
    verify!(
        proposer.is_slashable_at(current_epoch),
        Invalid::ProposerNotSlashable(slashed_index)
    );
    let proposer_pubkey = proposer.pubkey;

    for (i, signed_header) in [
        &proposer_slashing.signed_header_1,
        &proposer_slashing.signed_header_2,
    ]
    .into_iter()
    .enumerate()
    {
        let epoch = signed_header.message.slot / spec.slots_per_epoch;
        let fork_version = state.fork.version_for_epoch(epoch);
        let domain = spec.compute_domain(spec.domain_beacon_proposer, fork_version);
        let signing_root = signed_header.message.signing_root(domain);
        let valid = bls::verify(&proposer_pubkey, &signing_root.0, &signed_header.signature);
        verify!(valid, Invalid::BadSignature(i));
    }

    slash_validator(state, slashed_index, None, block_proposer_index, spec)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use types::{BeaconBlockHeader, Eth1Data, SignedBeaconBlockHeader};

    #[test]
    fn rejects_slot_mismatch() {
        let spec = ChainSpec::mainnet();
        let mut state = BeaconState::new(0, Eth1Data::default(), &spec);
        let slashing = ProposerSlashing {
            signed_header_1: SignedBeaconBlockHeader {
                message: BeaconBlockHeader {
                    slot: 1,
                    ..Default::default()
                },
                ..Default::default()
            },
            signed_header_2: SignedBeaconBlockHeader {
                message: BeaconBlockHeader {
                    slot: 2,
                    ..Default::default()
                },
                ..Default::default()
            },
        };
        let err = process_proposer_slashing(&mut state, &slashing, 0, &spec).unwrap_err();
        assert_eq!(
            err,
            BlockOperationError::Invalid(Invalid::SlotMismatch { slot_1: 1, slot_2: 2 })
        );
    }

    #[test]
    fn rejects_identical_headers() {
        let spec = ChainSpec::mainnet();
        let mut state = BeaconState::new(0, Eth1Data::default(), &spec);
        let header = SignedBeaconBlockHeader::default();
        let slashing = ProposerSlashing {
            signed_header_1: header.clone(),
            signed_header_2: header,
        };
        let err = process_proposer_slashing(&mut state, &slashing, 0, &spec).unwrap_err();
        assert_eq!(err, BlockOperationError::Invalid(Invalid::BodiesMatch));
    }
}
