use crate::beacon_block_body::BeaconBlockBody;
use crate::beacon_block_header::BeaconBlockHeader;
use crate::primitives::{Hash256, Slot, ValidatorIndex};
use crate::signing_data::SigningData;
use serde::{Deserialize, Serialize};
use ssz_derive::{Decode, Encode};
use tree_hash::TreeHash;
use tree_hash_derive::TreeHash as TreeHashDerive;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Encode, Decode, TreeHashDerive)]
pub struct BeaconBlock {
    pub slot: Slot,
    pub proposer_index: ValidatorIndex,
    pub parent_root: Hash256,
    pub state_root: Hash256,
    pub body: BeaconBlockBody,
}

impl BeaconBlock {
    /// The `BeaconBlockHeader` summary of this block: `body` collapsed to its root.
    pub fn to_header(&self) -> BeaconBlockHeader {
        BeaconBlockHeader {
            slot: self.slot,
            proposer_index: self.proposer_index,
            parent_root: self.parent_root,
            state_root: self.state_root,
            body_root: self.body.tree_hash_root(),
        }
    }

    pub fn signing_root(&self, domain: crate::primitives::Domain) -> Hash256 {
        SigningData {
            object_root: self.tree_hash_root(),
            domain,
        }
        .signing_root()
    }
}
