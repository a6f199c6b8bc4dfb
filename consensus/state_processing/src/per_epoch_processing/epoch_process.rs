//! Single linear pass over the registry and the two attestation lists, producing per-
//! validator attester flags and the aggregate stake totals every later stage of epoch processing
//! needs. Doing this once up front avoids the O(validators * attestations) blow-up of re-scanning
//! `{previous,current}_epoch_attestations` from each of justification, rewards and registry
//! updates separately.

use crate::epoch_context::EpochContext;
use safe_arith::SafeArith;
use types::pending_attestation::PendingAttestation;
use types::primitives::{Epoch, Gwei, Slot, ValidatorIndex};
use types::{BeaconState, ChainSpec, Error as BeaconStateError};

#[derive(Debug, Clone, Copy)]
pub struct InclusionInfo {
    pub delay: Slot,
    pub proposer_index: ValidatorIndex,
}

#[derive(Debug, Clone, Default)]
pub struct AttesterStatus {
    pub is_active_in_previous_epoch: bool,
    pub is_active_in_current_epoch: bool,
    pub is_previous_epoch_source_attester: bool,
    pub is_previous_epoch_target_attester: bool,
    pub is_previous_epoch_head_attester: bool,
    pub is_current_epoch_target_attester: bool,
    pub is_slashed: bool,
    pub effective_balance: Gwei,
    /// Earliest (slot-delay, proposer) this validator's previous-epoch attestation was included
    /// under; `None` if it made none. Feeds the proposer micro-reward in rewards/penalties.
    pub inclusion_info: Option<InclusionInfo>,
}

/// The five stake sums `get_attestation_deltas`/`process_rewards_and_penalties` need: each is
/// the sum of effective balances of active validators satisfying the named predicate.
#[derive(Debug, Clone, Copy, Default)]
pub struct TotalBalances {
    pub current_epoch: Gwei,
    pub previous_epoch: Gwei,
    pub current_epoch_target_attesters: Gwei,
    pub previous_epoch_source_attesters: Gwei,
    pub previous_epoch_target_attesters: Gwei,
    pub previous_epoch_head_attesters: Gwei,
}

pub struct EpochProcess {
    pub statuses: Vec<AttesterStatus>,
    pub total_balances: TotalBalances,
}

impl EpochProcess {
    pub fn new(
        state: &BeaconState,
        epoch_ctx: &EpochContext,
        spec: &ChainSpec,
    ) -> Result<Self, BeaconStateError> {
        let previous_epoch = state.previous_epoch();
        let current_epoch = state.current_epoch();

        let mut statuses: Vec<AttesterStatus> = state
            .validators
            .iter()
            .map(|v| AttesterStatus {
                is_active_in_previous_epoch: v.is_active_at(previous_epoch),
                is_active_in_current_epoch: v.is_active_at(current_epoch),
                is_slashed: v.slashed,
                effective_balance: v.effective_balance,
                ..Default::default()
            })
            .collect();

        for attestation in state.previous_epoch_attestations.iter() {
            mark_attesters(
                &mut statuses,
                attestation,
                previous_epoch,
                state,
                epoch_ctx,
                spec,
            )?;
        }
        for attestation in state.current_epoch_attestations.iter() {
            mark_current_target(&mut statuses, attestation, current_epoch, state, epoch_ctx, spec)?;
        }

        let mut total_balances = TotalBalances::default();
        for status in &statuses {
            if status.is_active_in_current_epoch {
                total_balances.current_epoch =
                    total_balances.current_epoch.safe_add(status.effective_balance)?;
            }
            if status.is_active_in_previous_epoch {
                total_balances.previous_epoch =
                    total_balances.previous_epoch.safe_add(status.effective_balance)?;
            }
            if status.is_current_epoch_target_attester {
                total_balances.current_epoch_target_attesters = total_balances
                    .current_epoch_target_attesters
                    .safe_add(status.effective_balance)?;
            }
            if status.is_previous_epoch_source_attester {
                total_balances.previous_epoch_source_attesters = total_balances
                    .previous_epoch_source_attesters
                    .safe_add(status.effective_balance)?;
            }
            if status.is_previous_epoch_target_attester {
                total_balances.previous_epoch_target_attesters = total_balances
                    .previous_epoch_target_attesters
                    .safe_add(status.effective_balance)?;
            }
            if status.is_previous_epoch_head_attester {
                total_balances.previous_epoch_head_attesters = total_balances
                    .previous_epoch_head_attesters
                    .safe_add(status.effective_balance)?;
            }
        }
        // Floor every sum at one increment so downstream division never sees a zero
        // denominator, matching `get_total_balance`'s guarantee.
        let floor = spec.effective_balance_increment;
        total_balances.current_epoch = total_balances.current_epoch.max(floor);
        total_balances.previous_epoch = total_balances.previous_epoch.max(floor);
        total_balances.current_epoch_target_attesters =
            total_balances.current_epoch_target_attesters.max(floor);
        total_balances.previous_epoch_source_attesters =
            total_balances.previous_epoch_source_attesters.max(floor);
        total_balances.previous_epoch_target_attesters =
            total_balances.previous_epoch_target_attesters.max(floor);
        total_balances.previous_epoch_head_attesters =
            total_balances.previous_epoch_head_attesters.max(floor);

        Ok(Self {
            statuses,
            total_balances,
        })
    }
}

fn mark_attesters(
    statuses: &mut [AttesterStatus],
    attestation: &PendingAttestation,
    previous_epoch: Epoch,
    state: &BeaconState,
    epoch_ctx: &EpochContext,
    spec: &ChainSpec,
) -> Result<(), BeaconStateError> {
    let committee =
        epoch_ctx.get_beacon_committee(attestation.data.slot, attestation.data.index, spec)?;
    let is_matching_source = attestation.data.source == state.previous_justified_checkpoint;
    let is_matching_target =
        is_matching_source && attestation.data.target.epoch == previous_epoch;
    let is_matching_head = is_matching_target
        && attestation.data.beacon_block_root
            == state.get_block_root_at_slot(attestation.data.slot)?;

    for (committee_offset, &validator_index) in committee.iter().enumerate() {
        if !attestation
            .aggregation_bits
            .get(committee_offset)
            .unwrap_or(false)
        {
            continue;
        }
        let status = &mut statuses[validator_index as usize];
        if is_matching_source {
            status.is_previous_epoch_source_attester = true;
            let candidate = InclusionInfo {
                delay: attestation.inclusion_delay,
                proposer_index: attestation.proposer_index,
            };
            status.inclusion_info = Some(match status.inclusion_info {
                Some(existing) if existing.delay <= candidate.delay => existing,
                _ => candidate,
            });
        }
        if is_matching_target {
            status.is_previous_epoch_target_attester = true;
        }
        if is_matching_head {
            status.is_previous_epoch_head_attester = true;
        }
    }
    Ok(())
}

fn mark_current_target(
    statuses: &mut [AttesterStatus],
    attestation: &PendingAttestation,
    current_epoch: Epoch,
    state: &BeaconState,
    epoch_ctx: &EpochContext,
    spec: &ChainSpec,
) -> Result<(), BeaconStateError> {
    let committee =
        epoch_ctx.get_beacon_committee(attestation.data.slot, attestation.data.index, spec)?;
    let is_matching_target = attestation.data.source == state.current_justified_checkpoint
        && attestation.data.target.epoch == current_epoch;
    if !is_matching_target {
        return Ok(());
    }
    for (committee_offset, &validator_index) in committee.iter().enumerate() {
        if attestation
            .aggregation_bits
            .get(committee_offset)
            .unwrap_or(false)
        {
            statuses[validator_index as usize].is_current_epoch_target_attester = true;
        }
    }
    Ok(())
}
