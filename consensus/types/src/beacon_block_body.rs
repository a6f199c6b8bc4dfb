use crate::attestation::Attestation;
use crate::attester_slashing::AttesterSlashing;
use crate::consts::{
    MaxAttestations, MaxAttesterSlashings, MaxDeposits, MaxProposerSlashings, MaxVoluntaryExits,
};
use crate::deposit::Deposit;
use crate::eth1_data::Eth1Data;
use crate::primitives::{Hash256, SignatureBytes};
use crate::proposer_slashing::ProposerSlashing;
use crate::signed::SignedVoluntaryExit;
use serde::{Deserialize, Serialize};
use ssz_derive::{Decode, Encode};
use ssz_types::VariableList;
use tree_hash_derive::TreeHash;

/// Everything a proposer bundles into a block besides the header fields. Each operation kind has
/// its own processing order and its own per-block cap, enforced by the `VariableList` bound.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Encode, Decode, TreeHash)]
pub struct BeaconBlockBody {
    pub randao_reveal: SignatureBytes,
    pub eth1_data: Eth1Data,
    pub graffiti: Hash256,
    pub proposer_slashings: VariableList<ProposerSlashing, MaxProposerSlashings>,
    pub attester_slashings: VariableList<AttesterSlashing, MaxAttesterSlashings>,
    pub attestations: VariableList<Attestation, MaxAttestations>,
    pub deposits: VariableList<Deposit, MaxDeposits>,
    pub voluntary_exits: VariableList<SignedVoluntaryExit, MaxVoluntaryExits>,
}

impl Default for BeaconBlockBody {
    fn default() -> Self {
        Self {
            randao_reveal: SignatureBytes::empty(),
            eth1_data: Eth1Data::default(),
            graffiti: Hash256::ZERO,
            proposer_slashings: VariableList::empty(),
            attester_slashings: VariableList::empty(),
            attestations: VariableList::empty(),
            deposits: VariableList::empty(),
            voluntary_exits: VariableList::empty(),
        }
    }
}
