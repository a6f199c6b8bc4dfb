//! Applies the correlation penalty: validators whose slashing half-life expires this epoch
//! pay a penalty proportional to how much of the total stake was slashed this
//! `EPOCHS_PER_SLASHINGS_VECTOR` window.

use safe_arith::SafeArith;
use types::{BeaconState, ChainSpec, Error as BeaconStateError};

pub const PROPORTIONAL_SLASHING_MULTIPLIER: u64 = 3;

pub fn process_slashings(
    state: &mut BeaconState,
    total_active_balance: u64,
    spec: &ChainSpec,
) -> Result<(), BeaconStateError> {
    let epoch = state.current_epoch();
    let total_slashings: u64 = state
        .slashings
        .iter()
        .try_fold(0u64, |acc, &s| acc.safe_add(s))?;
    let adjusted_total_slashing_balance = total_slashings
        .saturating_mul(PROPORTIONAL_SLASHING_MULTIPLIER)
        .min(total_active_balance);
    let increment = spec.effective_balance_increment;
    let half_life = spec.epochs_per_slashings_vector / 2;

    for index in 0..state.validators.len() as u64 {
        let validator = state.validator(index)?;
        if validator.slashed && epoch.saturating_add(half_life) == validator.withdrawable_epoch {
            let penalty_numerator = (validator.effective_balance / increment)
                .safe_mul(adjusted_total_slashing_balance)?;
            let penalty = (penalty_numerator / total_active_balance).safe_mul(increment)?;
            state.decrease_balance(index, penalty)?;
        }
    }

    Ok(())
}
