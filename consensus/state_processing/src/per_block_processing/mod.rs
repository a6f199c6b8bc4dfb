//! block-body processing. [`process_block`] runs the header, RANDAO, eth1-vote and
//! operations stages in fixed order against a state already advanced to the block's slot by
//! [`crate::per_slot_processing`].

pub mod attestation;
pub mod attester_slashing;
pub mod block_header;
pub mod deposit;
pub mod errors;
pub mod eth1_data;
pub mod exit;
pub mod process_operations;
pub mod proposer_slashing;
pub mod randao;
pub mod verify_indexed_attestation;

use crate::epoch_context::EpochContext;
use errors::BlockProcessingError;
use tracing::instrument;
use types::{BeaconState, ChainSpec, SignedBeaconBlock};

/// Runs every block-body stage against `state`, which must already sit at `block.slot`. The
/// caller is responsible for having run [`crate::per_slot_processing::process_slots`] first;
/// this function never advances the slot itself.
#[instrument(level = "debug", skip_all)]
pub fn process_block(
    state: &mut BeaconState,
    block: &SignedBeaconBlock,
    epoch_ctx: &EpochContext,
    spec: &ChainSpec,
) -> Result<(), BlockProcessingError> {
    let message = &block.message;
    let proposer_index = epoch_ctx.get_beacon_proposer_index(state, spec)?;

    block_header::process_block_header(state, message, proposer_index, spec)?;
    randao::process_randao(state, message, proposer_index, spec)?;
    eth1_data::process_eth1_data(state, &message.body.eth1_data, spec)?;
    process_operations::process_operations(
        state,
        &message.body,
        proposer_index,
        epoch_ctx,
        spec,
    )?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use types::Eth1Data;

    #[test]
    fn rejects_wrong_slot() {
        let spec = ChainSpec::mainnet();
        let mut state = BeaconState::new(0, Eth1Data::default(), &spec);
        state
            .validators
            .push(types::Validator {
                effective_balance: spec.max_effective_balance,
                activation_epoch: 0,
                ..Default::default()
            })
            .unwrap();
        state.balances.push(spec.max_effective_balance).unwrap();
        state.slot = 5;
        let epoch_ctx = EpochContext::new(&state, &spec).unwrap();
        let mut block = SignedBeaconBlock::default();
        block.message.slot = 4;
        let err = process_block(&mut state, &block, &epoch_ctx, &spec).unwrap_err();
        assert!(matches!(err, BlockProcessingError::HeaderInvalid { .. }));
    }
}
