use crate::epoch_context::EpochContext;
use crate::per_epoch_processing::{process_epoch, EpochProcessingSummary};
use safe_arith::{ArithError, SafeArith};
use tracing::instrument;
use tree_hash::TreeHash;
use types::primitives::Slot;
use types::{BeaconState, ChainSpec, Error as BeaconStateError, Hash256};

#[derive(Debug, PartialEq)]
pub enum Error {
    BeaconStateError(BeaconStateError),
    ArithError(ArithError),
    EpochProcessingError(crate::per_epoch_processing::Error),
    /// `target_slot` is not strictly ahead of `state.slot` -- slots only ever move forward.
    SlotOutOfOrder { state: Slot, target: Slot },
}

impl From<BeaconStateError> for Error {
    fn from(e: BeaconStateError) -> Self {
        Error::BeaconStateError(e)
    }
}

impl From<ArithError> for Error {
    fn from(e: ArithError) -> Self {
        Error::ArithError(e)
    }
}

impl From<crate::per_epoch_processing::Error> for Error {
    fn from(e: crate::per_epoch_processing::Error) -> Self {
        Error::EpochProcessingError(e)
    }
}

/// Advances `state` forward by one slot, running epoch processing when the new slot crosses an
/// epoch boundary. If the caller already knows `state`'s root, passing it as `state_root` skips
/// a tree-hash recomputation.
#[instrument(level = "debug", skip_all)]
pub fn per_slot_processing(
    state: &mut BeaconState,
    state_root: Option<Hash256>,
    epoch_ctx: &mut EpochContext,
    spec: &ChainSpec,
) -> Result<Option<EpochProcessingSummary>, Error> {
    cache_state(state, state_root)?;

    let summary = if state.slot > spec.genesis_slot
        && state.slot.safe_add(1)?.safe_rem(spec.slots_per_epoch)? == 0
    {
        Some(process_epoch(state, epoch_ctx, spec)?)
    } else {
        None
    };

    state.slot.safe_add_assign(1)?;

    if state.slot.safe_rem(spec.slots_per_epoch)? == 0 {
        epoch_ctx.rotate(state, spec)?;
    }

    Ok(summary)
}

/// Drives `state` forward slot by slot until it reaches `target_slot`, running
/// [`per_slot_processing`] once per slot so every epoch boundary crossed along the way gets its
/// full transition. A no-op if `state` is already at `target_slot`.
#[instrument(level = "debug", skip_all, fields(target_slot = target_slot))]
pub fn process_slots(
    state: &mut BeaconState,
    epoch_ctx: &mut EpochContext,
    target_slot: Slot,
    spec: &ChainSpec,
) -> Result<(), Error> {
    if state.slot > target_slot {
        return Err(Error::SlotOutOfOrder {
            state: state.slot,
            target: target_slot,
        });
    }
    while state.slot < target_slot {
        per_slot_processing(state, None, epoch_ctx, spec)?;
    }
    Ok(())
}

/// Stashes the outgoing slot's post-state root into the `state_roots`/`block_roots` ring
/// buffers before the slot counter advances.
#[instrument(skip_all)]
fn cache_state(state: &mut BeaconState, state_root: Option<Hash256>) -> Result<(), Error> {
    let previous_state_root = state_root.unwrap_or_else(|| state.tree_hash_root());
    let previous_slot = state.slot;

    let len = state.state_roots.len() as u64;
    state.state_roots[(previous_slot % len) as usize] = previous_state_root;

    if state.latest_block_header.state_root == Hash256::ZERO {
        state.latest_block_header.state_root = previous_state_root;
    }

    let latest_block_root = state.latest_block_header.tree_hash_root();
    let len = state.block_roots.len() as u64;
    state.block_roots[(previous_slot % len) as usize] = latest_block_root;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::per_slot_processing;
    use types::Eth1Data;

    #[test]
    fn advances_slot_without_epoch_transition() {
        let spec = ChainSpec::mainnet();
        let mut state = BeaconState::new(0, Eth1Data::default(), &spec);
        let mut epoch_ctx = EpochContext::new(&state, &spec).unwrap();
        let starting_slot = state.slot;
        per_slot_processing(&mut state, None, &mut epoch_ctx, &spec).unwrap();
        assert_eq!(state.slot, starting_slot + 1);
    }

    #[test]
    fn runs_epoch_processing_at_boundary() {
        let spec = ChainSpec::mainnet();
        let mut state = BeaconState::new(0, Eth1Data::default(), &spec);
        let mut epoch_ctx = EpochContext::new(&state, &spec).unwrap();
        for _ in 0..spec.slots_per_epoch - 1 {
            assert!(per_slot_processing(&mut state, None, &mut epoch_ctx, &spec)
                .unwrap()
                .is_none());
        }
        let summary = per_slot_processing(&mut state, None, &mut epoch_ctx, &spec).unwrap();
        assert!(summary.is_some());
        assert_eq!(state.slot, spec.slots_per_epoch);
    }

    #[test]
    fn process_slots_reaches_target_in_one_call() {
        let spec = ChainSpec::mainnet();
        let mut state = BeaconState::new(0, Eth1Data::default(), &spec);
        let mut epoch_ctx = EpochContext::new(&state, &spec).unwrap();
        process_slots(&mut state, &mut epoch_ctx, spec.slots_per_epoch * 2 + 5, &spec).unwrap();
        assert_eq!(state.slot, spec.slots_per_epoch * 2 + 5);
    }

    #[test]
    fn process_slots_rejects_moving_backwards() {
        let spec = ChainSpec::mainnet();
        let mut state = BeaconState::new(0, Eth1Data::default(), &spec);
        let mut epoch_ctx = EpochContext::new(&state, &spec).unwrap();
        state.slot = 10;
        let err = process_slots(&mut state, &mut epoch_ctx, 5, &spec).unwrap_err();
        assert_eq!(err, Error::SlotOutOfOrder { state: 10, target: 5 });
    }
}
