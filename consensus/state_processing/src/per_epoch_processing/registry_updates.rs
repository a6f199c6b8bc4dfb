//! Activation-eligibility marking, ejection of under-collateralized validators, and advancing
//! the activation queue by up to one churn limit's worth of validators.

use crate::common::{compute_activation_exit_epoch, get_validator_churn_limit, initiate_validator_exit};
use types::{BeaconState, ChainSpec, Error as BeaconStateError};

pub fn process_registry_updates(state: &mut BeaconState, spec: &ChainSpec) -> Result<(), BeaconStateError> {
    let current_epoch = state.current_epoch();

    for index in 0..state.validators.len() as u64 {
        if state.validator(index)?.is_eligible_for_activation_queue(spec) {
            state.validator_mut(index)?.activation_eligibility_epoch = current_epoch + 1;
        }
        let validator = state.validator(index)?;
        if validator.is_active_at(current_epoch) && validator.effective_balance <= spec.ejection_balance {
            initiate_validator_exit(state, index, spec)?;
        }
    }

    let finalized_epoch = state.finalized_checkpoint.epoch;
    let mut activation_queue: Vec<u64> = (0..state.validators.len() as u64)
        .filter(|&i| {
            let v = &state.validators[i as usize];
            v.activation_eligibility_epoch <= finalized_epoch && v.activation_epoch == spec.far_future_epoch
        })
        .collect();
    activation_queue.sort_by_key(|&i| {
        (state.validators[i as usize].activation_eligibility_epoch, i)
    });

    let churn_limit = get_validator_churn_limit(state, spec)?;
    let activation_exit_epoch = compute_activation_exit_epoch(current_epoch, spec);
    for &index in activation_queue.iter().take(churn_limit as usize) {
        state.validator_mut(index)?.activation_epoch = activation_exit_epoch;
    }

    Ok(())
}
