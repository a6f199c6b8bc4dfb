use super::errors::{BlockOperationError, HeaderInvalid};
use crate::macros::verify;
use tree_hash::TreeHash;
use types::{BeaconBlock, BeaconState, ChainSpec};

type Result<T> = std::result::Result<T, BlockOperationError<HeaderInvalid>>;

fn error(reason: HeaderInvalid) -> BlockOperationError<HeaderInvalid> {
    BlockOperationError::invalid(reason)
}

/// `process_block_header`: the block's slot and parent must match `state`, its declared
/// proposer must be the one computed by [`crate::epoch_context::EpochContext`] and not already
/// slashed, and `state.latest_block_header` is then replaced with this block's header (minus
/// its `state_root`, left zero until the caller fills it in post-transition).
pub fn process_block_header(
    state: &mut BeaconState,
    block: &BeaconBlock,
    proposer_index: u64,
    spec: &ChainSpec,
) -> Result<()> {
    verify!(block.slot == state.slot, HeaderInvalid::StateSlotMismatch);

    let expected_parent_root = state.latest_block_header.tree_hash_root();
    verify!(
        block.parent_root == expected_parent_root,
        HeaderInvalid::ParentBlockRootMismatch {
            state: expected_parent_root,
            block: block.parent_root,
        }
    );

    verify!(
        block.proposer_index == proposer_index,
        HeaderInvalid::ProposerIndexMismatch {
            block: block.proposer_index,
            expected: proposer_index,
        }
    );

    let proposer = state
        .validator(proposer_index)
        .map_err(BlockOperationError::from)?;
    verify!(!proposer.slashed, HeaderInvalid::ProposerSlashed(proposer_index));

    state.latest_block_header = block.to_header();
    state.latest_block_header.state_root = types::Hash256::ZERO;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use types::Eth1Data;

    #[test]
    fn rejects_slot_mismatch() {
        let spec = ChainSpec::mainnet();
        let mut state = BeaconState::new(0, Eth1Data::default(), &spec);
        state.slot = 5;
        let mut block = BeaconBlock::default();
        block.slot = 4;
        let err = process_block_header(&mut state, &block, 0, &spec).unwrap_err();
        assert_eq!(err, BlockOperationError::Invalid(HeaderInvalid::StateSlotMismatch));
    }
}
