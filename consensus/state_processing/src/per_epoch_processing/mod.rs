pub mod epoch_process;
pub mod final_updates;
pub mod justification_and_finalization;
pub mod registry_updates;
pub mod rewards_and_penalties;
pub mod slashings;

use crate::epoch_context::EpochContext;
use epoch_process::EpochProcess;
use tracing::instrument;
use types::{BeaconState, ChainSpec, Error as BeaconStateError};

#[derive(Debug, PartialEq)]
pub enum Error {
    BeaconStateError(BeaconStateError),
}

impl From<BeaconStateError> for Error {
    fn from(e: BeaconStateError) -> Self {
        Error::BeaconStateError(e)
    }
}

/// What a caller can observe about an epoch transition without re-deriving it: the per-validator
/// attester flags and the stake sums they imply.
pub struct EpochProcessingSummary {
    pub statuses: Vec<epoch_process::AttesterStatus>,
    pub total_balances: epoch_process::TotalBalances,
}

/// Runs the five epoch-boundary stages in fixed order against `state`, which must already be one
/// slot past the last slot of the epoch being closed out (the increment [`crate::per_slot_processing`]
/// performs after calling this).
#[instrument(level = "debug", skip_all)]
pub fn process_epoch(
    state: &mut BeaconState,
    epoch_ctx: &EpochContext,
    spec: &ChainSpec,
) -> Result<EpochProcessingSummary, Error> {
    let epoch_process = EpochProcess::new(state, epoch_ctx, spec)?;

    justification_and_finalization::process_justification_and_finalization(
        state,
        &epoch_process.total_balances,
        spec,
    )?;
    rewards_and_penalties::process_rewards_and_penalties(state, &epoch_process, spec)?;
    registry_updates::process_registry_updates(state, spec)?;
    slashings::process_slashings(state, epoch_process.total_balances.current_epoch, spec)?;
    final_updates::process_final_updates(state, spec)?;

    Ok(EpochProcessingSummary {
        statuses: epoch_process.statuses,
        total_balances: epoch_process.total_balances,
    })
}
