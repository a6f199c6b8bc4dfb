use crate::primitives::{Domain, Epoch, Hash256, ValidatorIndex};
use crate::signing_data::SigningData;
use serde::{Deserialize, Serialize};
use ssz_derive::{Decode, Encode};
use tree_hash::TreeHash as _;
use tree_hash_derive::TreeHash;

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Encode, Decode, TreeHash,
)]
pub struct VoluntaryExit {
    pub epoch: Epoch,
    pub validator_index: ValidatorIndex,
}

impl VoluntaryExit {
    pub fn signing_root(&self, domain: Domain) -> Hash256 {
        SigningData {
            object_root: self.tree_hash_root(),
            domain,
        }
        .signing_root()
    }
}
