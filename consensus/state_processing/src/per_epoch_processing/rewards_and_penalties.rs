//! Rewards and penalties. Phase 0 scores each eligible validator across four independent
//! components -- FFG source, FFG target, head vote, and inclusion delay -- plus a quadratic
//! inactivity leak once finality has stalled for more than `MIN_EPOCHS_TO_INACTIVITY_PENALTY`
//! epochs. The four components and the leak are folded into one pass per validator here rather
//! than four separate list comprehensions, reusing the stake sums [`EpochProcess`] already
//! collected.

use crate::per_epoch_processing::epoch_process::EpochProcess;
use safe_arith::SafeArith;
use types::primitives::{integer_sqrt, Gwei};
use types::{BeaconState, ChainSpec, Error as BeaconStateError};

pub const BASE_REWARDS_PER_EPOCH: u64 = 4;

fn base_reward(effective_balance: Gwei, total_active_balance: Gwei, spec: &ChainSpec) -> Gwei {
    effective_balance
        .saturating_mul(spec.base_reward_factor)
        .checked_div(integer_sqrt(total_active_balance))
        .unwrap_or(0)
        .checked_div(BASE_REWARDS_PER_EPOCH)
        .unwrap_or(0)
}

fn proposer_reward(base_reward: Gwei, spec: &ChainSpec) -> Gwei {
    base_reward / spec.proposer_reward_quotient
}

pub fn process_rewards_and_penalties(
    state: &mut BeaconState,
    epoch_process: &EpochProcess,
    spec: &ChainSpec,
) -> Result<(), BeaconStateError> {
    let previous_epoch = state.previous_epoch();
    if previous_epoch == 0 {
        // No attestations exist yet at genesis + 1; nothing to reward or penalize.
        return Ok(());
    }

    let total_active_balance = epoch_process.total_balances.current_epoch;
    let finality_delay = previous_epoch.saturating_sub(state.finalized_checkpoint.epoch);
    let in_inactivity_leak = finality_delay > spec.min_epochs_to_inactivity_penalty;
    let increment = spec.effective_balance_increment;

    let mut rewards = vec![0u64; state.validators.len()];
    let mut penalties = vec![0u64; state.validators.len()];

    for (index, status) in epoch_process.statuses.iter().enumerate() {
        let is_eligible = status.is_active_in_previous_epoch
            || (status.is_slashed
                && previous_epoch.saturating_add(1) < state.validator(index as u64)?.withdrawable_epoch);
        if !is_eligible {
            continue;
        }

        let br = base_reward(status.effective_balance, total_active_balance, spec);
        let prop_reward = proposer_reward(br, spec);
        let is_unslashed = !status.is_slashed;

        for (is_attester, attesting_balance, total_balance) in [
            (
                status.is_previous_epoch_source_attester && is_unslashed,
                epoch_process.total_balances.previous_epoch_source_attesters,
                epoch_process.total_balances.previous_epoch,
            ),
            (
                status.is_previous_epoch_target_attester && is_unslashed,
                epoch_process.total_balances.previous_epoch_target_attesters,
                epoch_process.total_balances.previous_epoch,
            ),
            (
                status.is_previous_epoch_head_attester && is_unslashed,
                epoch_process.total_balances.previous_epoch_head_attesters,
                epoch_process.total_balances.previous_epoch,
            ),
        ] {
            if is_attester {
                let numerator = br.safe_mul(attesting_balance / increment)?;
                rewards[index] = rewards[index].safe_add(numerator / (total_balance / increment))?;
            } else {
                penalties[index] = penalties[index].safe_add(br)?;
            }
        }

        if status.is_previous_epoch_source_attester && is_unslashed {
            if let Some(info) = status.inclusion_info {
                rewards[info.proposer_index as usize] =
                    rewards[info.proposer_index as usize].safe_add(prop_reward)?;
                let max_attester_reward = br.saturating_sub(prop_reward);
                let delay = info.delay.max(1);
                rewards[index] = rewards[index].safe_add(max_attester_reward / delay)?;
            }
        }

        if in_inactivity_leak {
            penalties[index] = penalties[index]
                .safe_add(BASE_REWARDS_PER_EPOCH.safe_mul(br)?.saturating_sub(prop_reward))?;
            if !status.is_previous_epoch_target_attester || status.is_slashed {
                let leak_penalty = status
                    .effective_balance
                    .safe_mul(finality_delay)?
                    / spec.inactivity_penalty_quotient;
                penalties[index] = penalties[index].safe_add(leak_penalty)?;
            }
        }
    }

    for (index, (reward, penalty)) in rewards.iter().zip(penalties.iter()).enumerate() {
        state.increase_balance(index as u64, *reward)?;
        state.decrease_balance(index as u64, *penalty)?;
    }

    Ok(())
}
