//! The four chained justification/finalization rules: two epochs can newly become
//! justified each transition (the previous epoch via the old 2/3-majority target vote, the
//! current epoch likewise), and a justified epoch finalizes once it is linked to by 1, 2 or 3
//! further justified epochs in the right pattern of `justification_bits`.

use crate::per_epoch_processing::epoch_process::TotalBalances;
use types::{BeaconState, ChainSpec, Checkpoint, Error as BeaconStateError};

pub fn process_justification_and_finalization(
    state: &mut BeaconState,
    total_balances: &TotalBalances,
    spec: &ChainSpec,
) -> Result<(), BeaconStateError> {
    let previous_epoch = state.previous_epoch();
    let current_epoch = state.current_epoch();

    if current_epoch <= 1 {
        return Ok(());
    }

    let old_previous_justified_checkpoint = state.previous_justified_checkpoint;
    let old_current_justified_checkpoint = state.current_justified_checkpoint;

    state.previous_justified_checkpoint = state.current_justified_checkpoint;
    shift_justification_bits(state)?;

    if total_balances.previous_epoch_target_attesters * 3 >= total_balances.previous_epoch * 2 {
        state.current_justified_checkpoint = Checkpoint {
            epoch: previous_epoch,
            root: state.get_block_root(previous_epoch)?,
        };
        state.justification_bits.set(1, true)?;
    }
    if total_balances.current_epoch_target_attesters * 3 >= total_balances.current_epoch * 2 {
        state.current_justified_checkpoint = Checkpoint {
            epoch: current_epoch,
            root: state.get_block_root(current_epoch)?,
        };
        state.justification_bits.set(0, true)?;
    }

    let bits: Vec<bool> = (0..4).map(|i| state.justification_bits.get(i).unwrap_or(false)).collect();

    if bits[1] && bits[2] && bits[3] && old_previous_justified_checkpoint.epoch + 3 == current_epoch {
        state.finalized_checkpoint = old_previous_justified_checkpoint;
    }
    if bits[1] && bits[2] && old_previous_justified_checkpoint.epoch + 2 == current_epoch {
        state.finalized_checkpoint = old_previous_justified_checkpoint;
    }
    if bits[0] && bits[1] && bits[2] && old_current_justified_checkpoint.epoch + 2 == current_epoch {
        state.finalized_checkpoint = old_current_justified_checkpoint;
    }
    if bits[0] && bits[1] && old_current_justified_checkpoint.epoch + 1 == current_epoch {
        state.finalized_checkpoint = old_current_justified_checkpoint;
    }

    Ok(())
}

/// Shifts every bit one position towards the least-significant end (bit 0 becomes bit 1, etc.)
/// and clears bit 0, making room for this epoch's two verdicts.
fn shift_justification_bits(state: &mut BeaconState) -> Result<(), BeaconStateError> {
    let previous: Vec<bool> = (0..4)
        .map(|i| state.justification_bits.get(i).unwrap_or(false))
        .collect();
    state.justification_bits.set(0, false)?;
    for i in 1..4 {
        state.justification_bits.set(i, previous[i - 1])?;
    }
    Ok(())
}
