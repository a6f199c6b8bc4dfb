use crate::primitives::{Gwei, Hash256, PublicKeyBytes, SignatureBytes};
use crate::signing_data::SigningData;
use serde::{Deserialize, Serialize};
use ssz_derive::{Decode, Encode};
use tree_hash::TreeHash;
use tree_hash_derive::TreeHash as TreeHashDerive;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Encode, Decode, TreeHashDerive)]
pub struct DepositData {
    pub pubkey: PublicKeyBytes,
    pub withdrawal_credentials: Hash256,
    pub amount: Gwei,
    pub signature: SignatureBytes,
}

impl DepositData {
    /// The object covered by `signature`: `DepositMessage` (everything but the signature
    /// itself), signed against the deposit domain which mixes no fork version.
    pub fn signing_root(&self, domain: crate::primitives::Domain) -> Hash256 {
        let message_root = DepositMessage {
            pubkey: self.pubkey,
            withdrawal_credentials: self.withdrawal_credentials,
            amount: self.amount,
        }
        .tree_hash_root();
        SigningData {
            object_root: message_root,
            domain,
        }
        .signing_root()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Encode, Decode, TreeHashDerive)]
struct DepositMessage {
    pubkey: PublicKeyBytes,
    withdrawal_credentials: Hash256,
    amount: Gwei,
}
