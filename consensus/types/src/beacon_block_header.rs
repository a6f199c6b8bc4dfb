use crate::primitives::{Hash256, Slot, ValidatorIndex};
use crate::signing_data::SigningData;
use serde::{Deserialize, Serialize};
use ssz_derive::{Decode, Encode};
use tree_hash::TreeHash;
use tree_hash_derive::TreeHash as TreeHashDerive;

#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Encode,
    Decode,
    TreeHashDerive,
)]
pub struct BeaconBlockHeader {
    pub slot: Slot,
    pub proposer_index: ValidatorIndex,
    pub parent_root: Hash256,
    pub state_root: Hash256,
    pub body_root: Hash256,
}

impl BeaconBlockHeader {
    /// `hash_tree_root(SigningData(header_root, domain))`, the root actually covered by a
    /// `SignedBeaconBlockHeader.signature`.
    pub fn signing_root(&self, domain: crate::primitives::Domain) -> Hash256 {
        SigningData {
            object_root: self.tree_hash_root(),
            domain,
        }
        .signing_root()
    }
}
