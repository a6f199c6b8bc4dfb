use crate::consts::DepositProofLength;
use crate::deposit_data::DepositData;
use crate::primitives::Hash256;
use serde::{Deserialize, Serialize};
use ssz_derive::{Decode, Encode};
use ssz_types::FixedVector;
use tree_hash_derive::TreeHash;

/// `proof` is the Merkle branch from `data`'s leaf up to the deposit contract's root, depth
/// `DEPOSIT_CONTRACT_TREE_DEPTH + 1` (the extra level mixes in the deposit count).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Encode, Decode, TreeHash)]
pub struct Deposit {
    pub proof: FixedVector<Hash256, DepositProofLength>,
    pub data: DepositData,
}
