use crate::common::initiate_validator_exit::initiate_validator_exit;
use safe_arith::SafeArith;
use types::{BeaconState, ChainSpec, Error as BeaconStateError, ValidatorIndex};

/// `slash_validator`: marks the validator slashed, extends its withdrawal delay out to a full
/// `EPOCHS_PER_SLASHINGS_VECTOR`, folds its effective balance into the slashings accumulator for
/// that epoch, applies the immediate minimum slashing penalty, and splits a whistleblower reward
/// between the reporter (if any -- self-reports pay the whole reward to the proposer) and the
/// block proposer.
pub fn slash_validator(
    state: &mut BeaconState,
    slashed_index: ValidatorIndex,
    whistleblower_index: Option<ValidatorIndex>,
    proposer_index: ValidatorIndex,
    spec: &ChainSpec,
) -> Result<(), BeaconStateError> {
    let current_epoch = state.current_epoch();
    initiate_validator_exit(state, slashed_index, spec)?;

    let validator = state.validator_mut(slashed_index)?;
    validator.slashed = true;
    validator.withdrawable_epoch = validator.withdrawable_epoch.max(
        current_epoch.safe_add(spec.epochs_per_slashings_vector)?,
    );
    let effective_balance = validator.effective_balance;

    let slashed_balance = state.get_slashings(current_epoch);
    state.set_slashings(
        current_epoch,
        slashed_balance.safe_add(effective_balance)?,
    );

    state.decrease_balance(
        slashed_index,
        effective_balance.safe_div(spec.min_slashing_penalty_quotient)?,
    )?;

    let whistleblower_index = whistleblower_index.unwrap_or(proposer_index);
    let whistleblower_reward = effective_balance.safe_div(spec.whistleblower_reward_quotient)?;
    let proposer_reward = whistleblower_reward.safe_div(spec.proposer_reward_quotient)?;
    state.increase_balance(proposer_index, proposer_reward)?;
    state.increase_balance(
        whistleblower_index,
        whistleblower_reward.safe_sub(proposer_reward)?,
    )?;

    Ok(())
}
