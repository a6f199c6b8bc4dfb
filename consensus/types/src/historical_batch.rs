use crate::consts::SlotsPerHistoricalRoot;
use crate::primitives::Hash256;
use serde::{Deserialize, Serialize};
use ssz_derive::{Decode, Encode};
use ssz_types::FixedVector;
use tree_hash_derive::TreeHash;

/// A frozen copy of one `SLOTS_PER_HISTORICAL_ROOT`-long window of block/state roots, folded
/// into `BeaconState.historical_roots` when the ring buffer wraps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Encode, Decode, TreeHash)]
pub struct HistoricalBatch {
    pub block_roots: FixedVector<Hash256, SlotsPerHistoricalRoot>,
    pub state_roots: FixedVector<Hash256, SlotsPerHistoricalRoot>,
}
