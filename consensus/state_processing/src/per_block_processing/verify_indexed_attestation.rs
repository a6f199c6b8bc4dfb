//! `is_valid_indexed_attestation`, shared by [`super::attestation`] (after converting an
//! aggregated `Attestation` to its indexed form) and [`super::attester_slashing`] (which
//! receives the indexed form directly).

use super::errors::BlockOperationError;
use types::{BeaconState, ChainSpec, IndexedAttestation};

#[derive(Debug, PartialEq, Clone)]
pub enum IndexedAttestationInvalid {
    IndicesEmptyOrUnsorted,
    BadSignature,
}

type Result<T> = std::result::Result<T, BlockOperationError<IndexedAttestationInvalid>>;

/// Non-signature checks plus a `fast_aggregate_verify` over the attesting indices' pubkeys
/// against `data`'s signing root under the beacon-attester domain for `data.target.epoch`.
pub fn is_valid_indexed_attestation(
    state: &BeaconState,
    indexed: &IndexedAttestation,
    spec: &ChainSpec,
) -> Result<()> {
    if !indexed.indices_are_sorted_and_unique() {
        return Err(BlockOperationError::invalid(
            IndexedAttestationInvalid::IndicesEmptyOrUnsorted,
        ));
    }

    let mut pubkeys = Vec::with_capacity(indexed.attesting_indices.len());
    for &index in indexed.attesting_indices.iter() {
        pubkeys.push(&state.validator(index)?.pubkey);
    }

    let fork_version = state.fork.version_for_epoch(indexed.data.target.epoch);
    let domain = spec.compute_domain(spec.domain_beacon_attester, fork_version);
    let signing_root = indexed.data.signing_root(domain);

    let valid = bls::fast_aggregate_verify(&pubkeys, &signing_root.0, &indexed.signature);
    if !valid {
        return Err(BlockOperationError::invalid(
            IndexedAttestationInvalid::BadSignature,
        ));
    }
    Ok(())
}
