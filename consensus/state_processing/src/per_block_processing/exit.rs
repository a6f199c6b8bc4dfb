use super::errors::{BlockOperationError, ExitInvalid as Invalid};
use crate::common::initiate_validator_exit;
use crate::macros::verify;
use types::{BeaconState, ChainSpec, SignedVoluntaryExit};

type Result<T> = std::result::Result<T, BlockOperationError<Invalid>>;

fn error(reason: Invalid) -> BlockOperationError<Invalid> {
    BlockOperationError::invalid(reason)
}

/// `process_voluntary_exit`: a validator requests to leave the active set early. Must already be
/// active, not already exiting, past its `PERSISTENT_COMMITTEE_PERIOD` minimum tenure, and the
/// exit's nominal epoch must not be in the future -- callers can't pre-announce an exit, only
/// trigger one that has already arrived.
pub fn process_voluntary_exit(
    state: &mut BeaconState,
    signed_exit: &SignedVoluntaryExit,
    spec: &ChainSpec,
) -> Result<()> {
    let exit = &signed_exit.message;
    let current_epoch = state.current_epoch();

    let validator = state
        .validator(exit.validator_index)
        .map_err(|_| error(Invalid::ValidatorUnknown(exit.validator_index)))?;
    verify!(
        validator.is_active_at(current_epoch),
        Invalid::NotActive(exit.validator_index)
    );
    verify!(
        !validator.is_exiting(),
        Invalid::AlreadyExited(exit.validator_index)
    );
    verify!(
        current_epoch >= exit.epoch,
        Invalid::FutureEpoch {
            state: current_epoch,
            exit: exit.epoch,
        }
    );
    let earliest_exit_epoch = validator
        .activation_epoch
        .saturating_add(spec.persistent_committee_period);
    verify!(
        current_epoch >= earliest_exit_epoch,
        Invalid::TooYoungToExit {
            current_epoch,
            earliest_exit_epoch,
        }
    );

    let fork_version = state.fork.version_for_epoch(exit.epoch);
    let domain = spec.compute_domain(spec.domain_voluntary_exit, fork_version);
    let signing_root = exit.signing_root(domain);
    verify!(
        bls::verify(&validator.pubkey, &signing_root.0, &signed_exit.signature),
        Invalid::BadSignature
    );

    initiate_validator_exit(state, exit.validator_index, spec)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use types::{Eth1Data, Validator, VoluntaryExit};

    #[test]
    fn rejects_unknown_validator() {
        let spec = ChainSpec::mainnet();
        let mut state = BeaconState::new(0, Eth1Data::default(), &spec);
        let signed_exit = SignedVoluntaryExit {
            message: VoluntaryExit { epoch: 0, validator_index: 0 },
            ..Default::default()
        };
        let err = process_voluntary_exit(&mut state, &signed_exit, &spec).unwrap_err();
        assert_eq!(err, BlockOperationError::Invalid(Invalid::ValidatorUnknown(0)));
    }

    #[test]
    fn rejects_too_young_to_exit() {
        let spec = ChainSpec::mainnet();
        let mut state = BeaconState::new(0, Eth1Data::default(), &spec);
        state
            .validators
            .push(Validator {
                activation_epoch: 0,
                effective_balance: spec.max_effective_balance,
                ..Default::default()
            })
            .unwrap();
        state.balances.push(spec.max_effective_balance).unwrap();
        let signed_exit = SignedVoluntaryExit {
            message: VoluntaryExit { epoch: 0, validator_index: 0 },
            ..Default::default()
        };
        let err = process_voluntary_exit(&mut state, &signed_exit, &spec).unwrap_err();
        assert_eq!(
            err,
            BlockOperationError::Invalid(Invalid::TooYoungToExit {
                current_epoch: 0,
                earliest_exit_epoch: spec.persistent_committee_period,
            })
        );
    }
}
