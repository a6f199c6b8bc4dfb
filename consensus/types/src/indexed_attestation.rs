use crate::attestation_data::AttestationData;
use crate::consts::MaxValidatorsPerCommittee;
use crate::primitives::{SignatureBytes, ValidatorIndex};
use serde::{Deserialize, Serialize};
use ssz_derive::{Decode, Encode};
use ssz_types::VariableList;
use tree_hash_derive::TreeHash;

/// The verified form of an [`Attestation`](crate::attestation::Attestation): aggregation bits
/// resolved to the sorted list of validator indices they name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Encode, Decode, TreeHash)]
pub struct IndexedAttestation {
    pub attesting_indices: VariableList<ValidatorIndex, MaxValidatorsPerCommittee>,
    pub data: AttestationData,
    pub signature: SignatureBytes,
}

impl IndexedAttestation {
    /// `is_valid_indexed_attestation` non-signature checks: non-empty, strictly sorted (which
    /// implies no duplicates).
    pub fn indices_are_sorted_and_unique(&self) -> bool {
        !self.attesting_indices.is_empty()
            && self
                .attesting_indices
                .windows(2)
                .all(|w| w[0] < w[1])
    }
}
