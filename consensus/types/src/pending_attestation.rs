use crate::attestation_data::AttestationData;
use crate::consts::MaxValidatorsPerCommittee;
use crate::primitives::{Slot, ValidatorIndex};
use serde::{Deserialize, Serialize};
use ssz_derive::{Decode, Encode};
use ssz_types::BitList;
use tree_hash_derive::TreeHash;

/// The form attestations take once folded into `BeaconState.{previous,current}_epoch_attestations`:
/// the committee vote plus bookkeeping needed later to compute rewards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Encode, Decode, TreeHash)]
pub struct PendingAttestation {
    pub aggregation_bits: BitList<MaxValidatorsPerCommittee>,
    pub data: AttestationData,
    pub inclusion_delay: Slot,
    pub proposer_index: ValidatorIndex,
}
