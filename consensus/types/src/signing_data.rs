use crate::primitives::{Domain, Hash256};

/// `SigningData { object_root, domain }`. Its `hash_tree_root` is what every BLS signature in
/// the data model actually signs -- computed here directly rather than through the derive
/// machinery since `Domain` is a transient 8-byte separator, never itself SSZ-serialized.
pub struct SigningData {
    pub object_root: Hash256,
    pub domain: Domain,
}

impl SigningData {
    /// Two-leaf Merkle root: `object_root` is already a 32-byte chunk, `domain` is zero-padded
    /// out to 32 bytes the way SSZ packs any vector shorter than a chunk.
    pub fn signing_root(&self) -> Hash256 {
        let mut domain_chunk = [0u8; 32];
        domain_chunk[..self.domain.len()].copy_from_slice(&self.domain);
        Hash256::from_slice(&ethereum_hashing::hash32_concat(
            self.object_root.as_slice(),
            &domain_chunk,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn differs_by_domain() {
        let root = Hash256::repeat_byte(0x11);
        let a = SigningData {
            object_root: root,
            domain: [0u8; 8],
        };
        let b = SigningData {
            object_root: root,
            domain: [1u8; 8],
        };
        assert_ne!(a.signing_root(), b.signing_root());
    }
}
