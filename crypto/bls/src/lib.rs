//! BLS12-381 oracle adapter.
//!
//! The state-transition engine never reasons about curve points directly; it only calls
//! [`verify`], [`fast_aggregate_verify`] and [`aggregate`]. This crate is the one place those
//! are implemented, against `blst` when the `supranational` feature is enabled (the default) or
//! against a trivial stand-in when `fake_crypto` is enabled for fast conformance-vector testing.

use serde::{Deserialize, Serialize};
use ssz_types::typenum::{U48, U96};
use ssz_types::FixedVector;
use tree_hash::{PackedEncoding, TreeHash, TreeHashType};

pub const PUBLIC_KEY_BYTES_LEN: usize = 48;
pub const SIGNATURE_BYTES_LEN: usize = 96;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PublicKeyBytes(#[serde(with = "serde_bytes_fixed::public_key")] [u8; PUBLIC_KEY_BYTES_LEN]);

impl PublicKeyBytes {
    pub fn empty() -> Self {
        Self([0; PUBLIC_KEY_BYTES_LEN])
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, Error> {
        if bytes.len() != PUBLIC_KEY_BYTES_LEN {
            return Err(Error::InvalidByteLength {
                got: bytes.len(),
                expected: PUBLIC_KEY_BYTES_LEN,
            });
        }
        let mut out = [0; PUBLIC_KEY_BYTES_LEN];
        out.copy_from_slice(bytes);
        Ok(Self(out))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl Default for PublicKeyBytes {
    fn default() -> Self {
        Self::empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SignatureBytes(#[serde(with = "serde_bytes_fixed::signature")] [u8; SIGNATURE_BYTES_LEN]);

impl SignatureBytes {
    pub fn empty() -> Self {
        Self([0; SIGNATURE_BYTES_LEN])
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, Error> {
        if bytes.len() != SIGNATURE_BYTES_LEN {
            return Err(Error::InvalidByteLength {
                got: bytes.len(),
                expected: SIGNATURE_BYTES_LEN,
            });
        }
        let mut out = [0; SIGNATURE_BYTES_LEN];
        out.copy_from_slice(bytes);
        Ok(Self(out))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl Default for SignatureBytes {
    fn default() -> Self {
        Self::empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    InvalidByteLength { got: usize, expected: usize },
    InvalidPublicKey,
    InvalidSignature,
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}

impl std::error::Error for Error {}

/// `verify(pk, msg, sig)`. Malformed inputs return `false` rather than an error -- a forged or
/// truncated signature is simply not a valid one.
#[cfg(feature = "supranational")]
pub fn verify(pubkey: &PublicKeyBytes, message: &[u8; 32], signature: &SignatureBytes) -> bool {
    let Ok(pk) = blst::min_pk::PublicKey::from_bytes(pubkey.as_bytes()) else {
        return false;
    };
    let Ok(sig) = blst::min_pk::Signature::from_bytes(signature.as_bytes()) else {
        return false;
    };
    sig.verify(true, message, DST, &[], &pk, true) == blst::BLST_ERROR::BLST_SUCCESS
}

/// `fast_aggregate_verify(pks, msg, sig)`: one message, many public keys, one aggregate
/// signature. Used for committee-level attestations where every signer attests to the same
/// `AttestationData` root.
#[cfg(feature = "supranational")]
pub fn fast_aggregate_verify(
    pubkeys: &[&PublicKeyBytes],
    message: &[u8; 32],
    signature: &SignatureBytes,
) -> bool {
    if pubkeys.is_empty() {
        return false;
    }
    let Ok(sig) = blst::min_pk::Signature::from_bytes(signature.as_bytes()) else {
        return false;
    };
    let parsed: Result<Vec<blst::min_pk::PublicKey>, _> = pubkeys
        .iter()
        .map(|pk| blst::min_pk::PublicKey::from_bytes(pk.as_bytes()))
        .collect();
    let Ok(parsed) = parsed else {
        return false;
    };
    let refs: Vec<&blst::min_pk::PublicKey> = parsed.iter().collect();
    sig.fast_aggregate_verify(true, message, DST, &refs) == blst::BLST_ERROR::BLST_SUCCESS
}

/// `aggregate(sigs)`: combines individual signatures into a single aggregate signature. Errs
/// only on malformed input bytes, never on an empty slice producing a meaningless result being
/// silently accepted -- callers must supply at least one signature.
#[cfg(feature = "supranational")]
pub fn aggregate(signatures: &[&SignatureBytes]) -> Result<SignatureBytes, Error> {
    let parsed: Result<Vec<blst::min_pk::Signature>, _> = signatures
        .iter()
        .map(|s| blst::min_pk::Signature::from_bytes(s.as_bytes()))
        .collect();
    let parsed = parsed.map_err(|_| Error::InvalidSignature)?;
    let refs: Vec<&blst::min_pk::Signature> = parsed.iter().collect();
    let agg = blst::min_pk::AggregateSignature::aggregate(&refs, true)
        .map_err(|_| Error::InvalidSignature)?;
    SignatureBytes::from_bytes(&agg.to_signature().to_bytes())
}

#[cfg(feature = "supranational")]
const DST: &[u8] = b"BLS_SIG_BLS12381G2_XMD:SHA-256_SSWU_RO_POP_";

/// With `supranational` disabled and `fake_crypto` enabled, every signature of the right length
/// is accepted. Exists only to let conformance-vector and fuzz harnesses skip real pairings;
/// never compiled into a production build.
#[cfg(all(feature = "fake_crypto", not(feature = "supranational")))]
pub fn verify(_pubkey: &PublicKeyBytes, _message: &[u8; 32], _signature: &SignatureBytes) -> bool {
    true
}

#[cfg(all(feature = "fake_crypto", not(feature = "supranational")))]
pub fn fast_aggregate_verify(
    pubkeys: &[&PublicKeyBytes],
    _message: &[u8; 32],
    _signature: &SignatureBytes,
) -> bool {
    !pubkeys.is_empty()
}

#[cfg(all(feature = "fake_crypto", not(feature = "supranational")))]
pub fn aggregate(signatures: &[&SignatureBytes]) -> Result<SignatureBytes, Error> {
    signatures
        .first()
        .map(|s| **s)
        .ok_or(Error::InvalidSignature)
}

impl ssz::Encode for PublicKeyBytes {
    fn is_ssz_fixed_len() -> bool {
        true
    }

    fn ssz_fixed_len() -> usize {
        PUBLIC_KEY_BYTES_LEN
    }

    fn ssz_bytes_len(&self) -> usize {
        PUBLIC_KEY_BYTES_LEN
    }

    fn ssz_append(&self, buf: &mut Vec<u8>) {
        buf.extend_from_slice(&self.0);
    }
}

impl ssz::Decode for PublicKeyBytes {
    fn is_ssz_fixed_len() -> bool {
        true
    }

    fn ssz_fixed_len() -> usize {
        PUBLIC_KEY_BYTES_LEN
    }

    fn from_ssz_bytes(bytes: &[u8]) -> Result<Self, ssz::DecodeError> {
        Self::from_bytes(bytes).map_err(|_| {
            ssz::DecodeError::InvalidByteLength {
                len: bytes.len(),
                expected: PUBLIC_KEY_BYTES_LEN,
            }
        })
    }
}

impl ssz::Encode for SignatureBytes {
    fn is_ssz_fixed_len() -> bool {
        true
    }

    fn ssz_fixed_len() -> usize {
        SIGNATURE_BYTES_LEN
    }

    fn ssz_bytes_len(&self) -> usize {
        SIGNATURE_BYTES_LEN
    }

    fn ssz_append(&self, buf: &mut Vec<u8>) {
        buf.extend_from_slice(&self.0);
    }
}

impl ssz::Decode for SignatureBytes {
    fn is_ssz_fixed_len() -> bool {
        true
    }

    fn ssz_fixed_len() -> usize {
        SIGNATURE_BYTES_LEN
    }

    fn from_ssz_bytes(bytes: &[u8]) -> Result<Self, ssz::DecodeError> {
        Self::from_bytes(bytes).map_err(|_| {
            ssz::DecodeError::InvalidByteLength {
                len: bytes.len(),
                expected: SIGNATURE_BYTES_LEN,
            }
        })
    }
}

impl TreeHash for PublicKeyBytes {
    fn tree_hash_type() -> TreeHashType {
        TreeHashType::Vector
    }

    fn tree_hash_packed_encoding(&self) -> PackedEncoding {
        unreachable!("PublicKeyBytes is not packable")
    }

    fn tree_hash_packing_factor() -> usize {
        unreachable!("PublicKeyBytes is not packable")
    }

    fn tree_hash_root(&self) -> tree_hash::Hash256 {
        FixedVector::<u8, U48>::new(self.0.to_vec())
            .expect("fixed length")
            .tree_hash_root()
    }
}

impl TreeHash for SignatureBytes {
    fn tree_hash_type() -> TreeHashType {
        TreeHashType::Vector
    }

    fn tree_hash_packed_encoding(&self) -> PackedEncoding {
        unreachable!("SignatureBytes is not packable")
    }

    fn tree_hash_packing_factor() -> usize {
        unreachable!("SignatureBytes is not packable")
    }

    fn tree_hash_root(&self) -> tree_hash::Hash256 {
        FixedVector::<u8, U96>::new(self.0.to_vec())
            .expect("fixed length")
            .tree_hash_root()
    }
}

mod serde_bytes_fixed {
    pub mod public_key {
        use super::super::PUBLIC_KEY_BYTES_LEN;
        use serde::{Deserializer, Serializer};

        pub fn serialize<S: Serializer>(
            bytes: &[u8; PUBLIC_KEY_BYTES_LEN],
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            serializer.serialize_str(&format!("0x{}", hex::encode(bytes)))
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<[u8; PUBLIC_KEY_BYTES_LEN], D::Error> {
            use serde::Deserialize;
            let s = String::deserialize(deserializer)?;
            let bytes = hex::decode(s.trim_start_matches("0x"))
                .map_err(serde::de::Error::custom)?;
            bytes
                .try_into()
                .map_err(|_| serde::de::Error::custom("wrong public key length"))
        }
    }

    pub mod signature {
        use super::super::SIGNATURE_BYTES_LEN;
        use serde::{Deserializer, Serializer};

        pub fn serialize<S: Serializer>(
            bytes: &[u8; SIGNATURE_BYTES_LEN],
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            serializer.serialize_str(&format!("0x{}", hex::encode(bytes)))
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<[u8; SIGNATURE_BYTES_LEN], D::Error> {
            use serde::Deserialize;
            let s = String::deserialize(deserializer)?;
            let bytes = hex::decode(s.trim_start_matches("0x"))
                .map_err(serde::de::Error::custom)?;
            bytes
                .try_into()
                .map_err(|_| serde::de::Error::custom("wrong signature length"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_roundtrip() {
        let pk = PublicKeyBytes::empty();
        assert_eq!(pk.as_bytes().len(), PUBLIC_KEY_BYTES_LEN);
        let sig = SignatureBytes::empty();
        assert_eq!(sig.as_bytes().len(), SIGNATURE_BYTES_LEN);
    }

    #[test]
    fn rejects_wrong_length() {
        assert!(PublicKeyBytes::from_bytes(&[0; 10]).is_err());
        assert!(SignatureBytes::from_bytes(&[0; 10]).is_err());
    }
}
