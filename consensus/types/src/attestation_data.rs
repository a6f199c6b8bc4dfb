use crate::checkpoint::Checkpoint;
use crate::primitives::{CommitteeIndex, Domain, Hash256, Slot};
use crate::signing_data::SigningData;
use serde::{Deserialize, Serialize};
use ssz_derive::{Decode, Encode};
use tree_hash::TreeHash as _;
use tree_hash_derive::TreeHash;

/// What a committee member attests to: the block at `slot`/`index`, plus the two checkpoints
/// (`source`, `target`) whose justification this vote contributes towards.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Encode, Decode, TreeHash,
)]
pub struct AttestationData {
    pub slot: Slot,
    pub index: CommitteeIndex,
    pub beacon_block_root: Hash256,
    pub source: Checkpoint,
    pub target: Checkpoint,
}

impl AttestationData {
    pub fn signing_root(&self, domain: Domain) -> Hash256 {
        SigningData {
            object_root: self.tree_hash_root(),
            domain,
        }
        .signing_root()
    }
}
