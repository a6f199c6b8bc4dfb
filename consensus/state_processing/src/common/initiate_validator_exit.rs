use safe_arith::SafeArith;
use types::{BeaconState, ChainSpec, Error as BeaconStateError, ValidatorIndex};

/// `get_validator_churn_limit`: the number of validators allowed to exit (or enter) per epoch,
/// floored at `MIN_PER_EPOCH_CHURN_LIMIT` so a small active set still has *some* churn.
pub fn get_validator_churn_limit(
    state: &BeaconState,
    spec: &ChainSpec,
) -> Result<u64, BeaconStateError> {
    let active_count = state.get_active_validator_indices(state.current_epoch()).len() as u64;
    Ok((active_count / spec.churn_limit_quotient).max(spec.min_per_epoch_churn_limit))
}

/// `compute_activation_exit_epoch`: the earliest epoch an exit (or activation) can land in,
/// `MAX_SEED_LOOKAHEAD` epochs out so the shuffling for that epoch is already seeded.
pub fn compute_activation_exit_epoch(epoch: types::Epoch, spec: &ChainSpec) -> types::Epoch {
    epoch + 1 + spec.max_seed_lookahead
}

/// `initiate_validator_exit`: assigns the validator the earliest exit-queue epoch that has not
/// yet reached the churn limit, scanning the full registry each call -- voluntary exits and
/// slashings inside a single block are rare enough that this is cheap relative to the O(n) work
/// already required to validate the operation.
pub fn initiate_validator_exit(
    state: &mut BeaconState,
    index: ValidatorIndex,
    spec: &ChainSpec,
) -> Result<(), BeaconStateError> {
    if state.validator(index)?.exit_epoch != spec.far_future_epoch {
        return Ok(());
    }

    let churn_limit = get_validator_churn_limit(state, spec)?;
    let delayed_activation_exit_epoch =
        compute_activation_exit_epoch(state.current_epoch(), spec);
    let mut exit_queue_epoch = state
        .validators
        .iter()
        .map(|v| v.exit_epoch)
        .filter(|&epoch| epoch != spec.far_future_epoch)
        .max()
        .unwrap_or(delayed_activation_exit_epoch)
        .max(delayed_activation_exit_epoch);

    let exit_queue_churn = state
        .validators
        .iter()
        .filter(|v| v.exit_epoch == exit_queue_epoch)
        .count() as u64;
    if exit_queue_churn >= churn_limit {
        exit_queue_epoch = exit_queue_epoch.safe_add(1)?;
    }

    let validator = state.validator_mut(index)?;
    validator.exit_epoch = exit_queue_epoch;
    validator.withdrawable_epoch =
        exit_queue_epoch.safe_add(spec.min_validator_withdrawability_delay)?;
    Ok(())
}
