use types::{BeaconState, ChainSpec, Error as BeaconStateError, Eth1Data};

/// `process_eth1_data`: every block casts one vote by appending its `eth1_data` to the rolling
/// `eth1_data_votes` list; once a value holds a strict majority of the *full voting period's*
/// worth of votes -- not just the votes cast so far -- it becomes `state.eth1_data`, so a value
/// can only win by being on track to sweep the whole period.
pub fn process_eth1_data(
    state: &mut BeaconState,
    eth1_data: &Eth1Data,
    spec: &ChainSpec,
) -> Result<(), BeaconStateError> {
    state.eth1_data_votes.push(eth1_data.clone())?;

    let vote_count = state
        .eth1_data_votes
        .iter()
        .filter(|vote| *vote == eth1_data)
        .count() as u64;
    if vote_count.saturating_mul(2) > spec.slots_per_eth1_voting_period {
        state.eth1_data = eth1_data.clone();
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use types::ChainSpec;

    #[test]
    fn majority_vote_updates_eth1_data() {
        let spec = ChainSpec {
            slots_per_eth1_voting_period: 2,
            ..ChainSpec::mainnet()
        };
        let mut state = BeaconState::new(0, Eth1Data::default(), &spec);
        let candidate = Eth1Data {
            deposit_count: 7,
            ..Default::default()
        };
        process_eth1_data(&mut state, &candidate, &spec).unwrap();
        assert_ne!(state.eth1_data, candidate);
        process_eth1_data(&mut state, &candidate, &spec).unwrap();
        assert_eq!(state.eth1_data, candidate);
    }
}
