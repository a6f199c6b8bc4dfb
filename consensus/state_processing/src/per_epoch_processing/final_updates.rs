//! Last stage of epoch processing: Eth1 voting-period reset, hysteresis-gated effective
//! balance updates, ring-buffer rotation for slashings/randao, historical-root accumulation, and
//! handing `current_epoch_attestations` over to become `previous_epoch_attestations`.

use safe_arith::SafeArith;
use tree_hash::TreeHash;
use types::{BeaconState, ChainSpec, Error as BeaconStateError, HistoricalBatch};

pub fn process_final_updates(state: &mut BeaconState, spec: &ChainSpec) -> Result<(), BeaconStateError> {
    let current_epoch = state.current_epoch();
    let next_epoch = current_epoch.safe_add(1)?;

    if state.slot.safe_add(1)?.safe_rem(spec.slots_per_eth1_voting_period)? == 0 {
        state.eth1_data_votes = ssz_types::VariableList::empty();
    }

    let upward_threshold = 3 * (spec.effective_balance_increment / 2);
    for index in 0..state.validators.len() {
        let balance = state.balances[index];
        let validator = &mut state.validators[index];
        if balance < validator.effective_balance || validator.effective_balance + upward_threshold < balance
        {
            validator.effective_balance = (balance - balance % spec.effective_balance_increment)
                .min(spec.max_effective_balance);
        }
    }

    state.set_slashings(next_epoch, 0);
    let mix = state.get_randao_mix(current_epoch);
    state.set_randao_mix(next_epoch, mix);

    if next_epoch.safe_rem(spec.slots_per_historical_root / spec.slots_per_epoch)? == 0 {
        let batch = HistoricalBatch {
            block_roots: state.block_roots.clone(),
            state_roots: state.state_roots.clone(),
        };
        state
            .historical_roots
            .push(batch.tree_hash_root())
            .map_err(BeaconStateError::from)?;
    }

    state.previous_epoch_attestations = std::mem::take(&mut state.current_epoch_attestations);

    Ok(())
}
