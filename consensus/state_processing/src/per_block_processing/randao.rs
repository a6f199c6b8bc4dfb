use super::errors::{BlockOperationError, RandaoInvalid};
use crate::macros::verify;
use types::primitives::xor;
use types::{BeaconBlock, BeaconState, ChainSpec, Hash256};

type Result<T> = std::result::Result<T, BlockOperationError<RandaoInvalid>>;

/// `process_randao`: the proposer's reveal must verify against `hash_tree_root(current_epoch)`
/// under the randao domain, after which it is folded into the current epoch's randao mix by
/// XOR with its hash -- never overwritten outright, so a single biased reveal can only perturb
/// the mix, not choose it.
pub fn process_randao(
    state: &mut BeaconState,
    block: &BeaconBlock,
    proposer_index: u64,
    spec: &ChainSpec,
) -> Result<()> {
    let epoch = state.current_epoch();
    let proposer_pubkey = state.validator(proposer_index)?.pubkey;

    let fork_version = state.fork.version_for_epoch(epoch);
    let domain = spec.compute_domain(spec.domain_randao, fork_version);
    let mut epoch_root = [0u8; 32];
    epoch_root[..8].copy_from_slice(&int_to_bytes::int_to_bytes8(epoch));
    let signing_root = types::SigningData {
        object_root: Hash256::from(epoch_root),
        domain,
    }
    .signing_root();

    verify!(
        bls::verify(&proposer_pubkey, &signing_root.0, &block.body.randao_reveal),
        RandaoInvalid::BadSignature
    );

    let digest = ethereum_hashing::hash(block.body.randao_reveal.as_bytes());
    let mix = xor(state.get_randao_mix(epoch), Hash256::from_slice(&digest));
    state.set_randao_mix(epoch, mix);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use types::Eth1Data;

    #[test]
    fn rejects_bad_signature() {
        let spec = ChainSpec::mainnet();
        let mut state = BeaconState::new(0, Eth1Data::default(), &spec);
        state.validators.push(types::Validator {
            effective_balance: spec.max_effective_balance,
            ..Default::default()
        }).unwrap();
        state.balances.push(spec.max_effective_balance).unwrap();
        let block = BeaconBlock::default();
        let err = process_randao(&mut state, &block, 0, &spec).unwrap_err();
        assert_eq!(err, BlockOperationError::Invalid(RandaoInvalid::BadSignature));
    }
}
