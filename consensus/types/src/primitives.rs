//! Fixed-width primitives shared by every container in the data model.

pub use alloy_primitives::B256 as Hash256;
pub use bls::{PublicKeyBytes, SignatureBytes};

pub type Slot = u64;
pub type Epoch = u64;
pub type CommitteeIndex = u64;
pub type ValidatorIndex = u64;
pub type Gwei = u64;
pub type DomainType = [u8; 4];
pub type Version = [u8; 4];
/// `fork_version ++ domain_type`, the phase-0 domain separator mixed into every signing root.
pub type Domain = [u8; 8];

/// Sentinel meaning "not yet scheduled" for a validator's activation/exit/withdrawable epoch.
pub const FAR_FUTURE_EPOCH: Epoch = u64::MAX;

/// Integer square root via Newton's method: `x_0 = n`, `x_{n+1} = floor((x_n + floor(n / x_n)) /
/// 2)`, iterated until non-decreasing. Delegates to the `integer-sqrt` crate rather than
/// re-deriving the iteration here.
pub fn integer_sqrt(n: u64) -> u64 {
    use integer_sqrt::IntegerSquareRoot;
    n.integer_sqrt()
}

/// Bitwise XOR of two 32-byte values, used to mix a RANDAO reveal's hash into the running
/// randomness accumulator.
pub fn xor(a: Hash256, b: Hash256) -> Hash256 {
    let mut out = [0u8; 32];
    for i in 0..32 {
        out[i] = a.0[i] ^ b.0[i];
    }
    Hash256::from(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_values() {
        assert_eq!(integer_sqrt(0), 0);
        assert_eq!(integer_sqrt(1), 1);
        assert_eq!(integer_sqrt(3), 1);
        assert_eq!(integer_sqrt(4), 2);
        assert_eq!(integer_sqrt(80), 8);
        assert_eq!(integer_sqrt(81), 9);
        assert_eq!(integer_sqrt(u64::MAX), 4_294_967_295);
    }

    #[test]
    fn xor_is_involutive() {
        let a = Hash256::from([0xffu8; 32]);
        let b = Hash256::from([0x0fu8; 32]);
        let mixed = xor(a, b);
        assert_eq!(xor(mixed, b), a);
        assert_eq!(xor(a, a), Hash256::ZERO);
    }
}
