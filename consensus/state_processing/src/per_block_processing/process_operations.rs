//! Fans a block body's five operation lists out to their per-kind processors, in the fixed
//! order: proposer slashings, attester slashings, attestations, deposits, voluntary exits.
//! Each list is independent of the others within a block; only within a list does order matter
//! (slashings applied earlier can change a later operation's validator-state checks).

use super::attestation::process_attestation;
use super::attester_slashing::process_attester_slashing;
use super::deposit::process_deposit;
use super::errors::BlockProcessingError;
use super::exit::process_voluntary_exit;
use super::proposer_slashing::process_proposer_slashing;
use crate::epoch_context::EpochContext;
use ssz_types::typenum::Unsigned;
use types::primitives::ValidatorIndex;
use types::{BeaconBlockBody, BeaconState, ChainSpec};

pub fn process_operations(
    state: &mut BeaconState,
    body: &BeaconBlockBody,
    proposer_index: ValidatorIndex,
    epoch_ctx: &EpochContext,
    spec: &ChainSpec,
) -> Result<(), BlockProcessingError> {
    let outstanding_deposits = state
        .eth1_data
        .deposit_count
        .saturating_sub(state.eth1_deposit_index);
    let expected_deposits = outstanding_deposits.min(types::consts::MaxDeposits::to_u64());
    if body.deposits.len() as u64 != expected_deposits {
        return Err(BlockProcessingError::TooManyOperations);
    }

    for (index, proposer_slashing) in body.proposer_slashings.iter().enumerate() {
        process_proposer_slashing(state, proposer_slashing, proposer_index, spec)
            .map_err(|e| BlockProcessingError::from((index, e)))?;
    }

    for (index, attester_slashing) in body.attester_slashings.iter().enumerate() {
        process_attester_slashing(state, attester_slashing, proposer_index, spec)
            .map_err(|e| BlockProcessingError::from((index, e)))?;
    }

    for (index, attestation) in body.attestations.iter().enumerate() {
        process_attestation(state, attestation, proposer_index, epoch_ctx, spec)
            .map_err(|e| BlockProcessingError::from((index, e)))?;
    }

    for (index, deposit) in body.deposits.iter().enumerate() {
        process_deposit(state, deposit, spec).map_err(|e| BlockProcessingError::from((index, e)))?;
    }

    for (index, signed_exit) in body.voluntary_exits.iter().enumerate() {
        process_voluntary_exit(state, signed_exit, spec)
            .map_err(|e| BlockProcessingError::from((index, e)))?;
    }

    Ok(())
}
