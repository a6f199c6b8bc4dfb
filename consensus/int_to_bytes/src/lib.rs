//! Little-endian fixed-width integer encodings used throughout the beacon-chain wire format
//! and hashing inputs (seeds, round bytes, position windows).

pub fn int_to_bytes4(int: u32) -> Vec<u8> {
    int.to_le_bytes().to_vec()
}

pub fn int_to_bytes8(int: u64) -> Vec<u8> {
    int.to_le_bytes().to_vec()
}

pub fn int_to_bytes32(int: u64) -> Vec<u8> {
    let mut bytes = vec![0; 32];
    bytes[0..8].copy_from_slice(&int.to_le_bytes());
    bytes
}

pub fn int_to_bytes48(int: u64) -> Vec<u8> {
    let mut bytes = vec![0; 48];
    bytes[0..8].copy_from_slice(&int.to_le_bytes());
    bytes
}

pub fn int_to_fixed_bytes4(int: u32) -> [u8; 4] {
    int.to_le_bytes()
}

pub fn int_to_fixed_bytes8(int: u64) -> [u8; 8] {
    int.to_le_bytes()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_int_to_bytes4() {
        assert_eq!(int_to_bytes4(0), vec![0; 4]);
        assert_eq!(int_to_bytes4(1), vec![1, 0, 0, 0]);
        assert_eq!(int_to_bytes4(u32::MAX), vec![255; 4]);
    }

    #[test]
    fn test_int_to_bytes8() {
        assert_eq!(int_to_bytes8(0), vec![0; 8]);
        assert_eq!(int_to_bytes8(1), vec![1, 0, 0, 0, 0, 0, 0, 0]);
        assert_eq!(int_to_bytes8(u64::MAX), vec![255; 8]);
    }

    #[test]
    fn test_int_to_bytes32() {
        let mut expected = vec![0; 32];
        expected[0] = 1;
        assert_eq!(int_to_bytes32(1), expected);
    }
}
