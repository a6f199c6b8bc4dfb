use super::errors::{BlockOperationError, DepositInvalid as Invalid};
use crate::macros::verify;
use safe_arith::SafeArith;
use tree_hash::TreeHash;
use types::consts::DEPOSIT_CONTRACT_TREE_DEPTH;
use types::{BeaconState, ChainSpec, Deposit, Validator};

type Result<T> = std::result::Result<T, BlockOperationError<Invalid>>;

/// `process_deposit`: authenticates `deposit.data` against the Eth1 deposit Merkle root the
/// state already trusts, then either credits an existing validator's balance or -- if its
/// signature checks out -- enrolls a new one. A forged signature on a *new* pubkey does not
/// reject the block: deposits originate from an untrusted Eth1 log, so the only consequence of
/// a bad signature there is the deposit being dropped, exactly as if it had never been made.
pub fn process_deposit(
    state: &mut BeaconState,
    deposit: &Deposit,
    spec: &ChainSpec,
) -> Result<()> {
    let leaf = deposit.data.tree_hash_root();
    verify!(
        merkle_proof::verify_merkle_proof(
            leaf,
            &deposit.proof,
            DEPOSIT_CONTRACT_TREE_DEPTH + 1,
            state.eth1_deposit_index as usize,
            state.eth1_data.deposit_root,
        ),
        Invalid::BadMerkleProof
    );

    state.eth1_deposit_index = state
        .eth1_deposit_index
        .safe_add(1)
        .map_err(BlockOperationError::from)?;

    let pubkey = deposit.data.pubkey;
    let amount = deposit.data.amount;

    if let Some(index) = state.validators.iter().position(|v| v.pubkey == pubkey) {
        state
            .increase_balance(index as u64, amount)
            .map_err(BlockOperationError::from)?;
        return Ok(());
    }

    let domain = spec.compute_domain(spec.domain_deposit, spec.genesis_fork_version);
    let signing_root = deposit.data.signing_root(domain);
    if !bls::verify(&pubkey, &signing_root.0, &deposit.data.signature) {
        return Ok(());
    }

    let effective_balance = amount
        .saturating_sub(amount % spec.effective_balance_increment)
        .min(spec.max_effective_balance);
    let validator = Validator {
        pubkey,
        withdrawal_credentials: deposit.data.withdrawal_credentials,
        effective_balance,
        slashed: false,
        activation_eligibility_epoch: spec.far_future_epoch,
        activation_epoch: spec.far_future_epoch,
        exit_epoch: spec.far_future_epoch,
        withdrawable_epoch: spec.far_future_epoch,
    };
    state
        .validators
        .push(validator)
        .map_err(BlockOperationError::from)?;
    state
        .balances
        .push(amount)
        .map_err(BlockOperationError::from)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use types::{DepositData, Eth1Data};

    #[test]
    fn rejects_bad_merkle_proof() {
        let spec = ChainSpec::mainnet();
        let mut state = BeaconState::new(0, Eth1Data::default(), &spec);
        let deposit = Deposit {
            proof: Default::default(),
            data: DepositData {
                amount: spec.max_effective_balance,
                ..Default::default()
            },
        };
        let err = process_deposit(&mut state, &deposit, &spec).unwrap_err();
        assert_eq!(err, BlockOperationError::Invalid(Invalid::BadMerkleProof));
    }
}
