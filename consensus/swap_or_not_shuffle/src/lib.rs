//! The "swap or not" shuffle: deterministically permutes a validator-index sequence from a
//! 32-byte seed. Used to derive committee assignments and proposer-selection candidates.
//!
//! Every honest node must compute byte-identical permutations, so this crate favours an
//! explicit, auditable implementation over cleverness. The only optimization taken: the SHA256
//! digest covering a 256-position window, and the single byte sliced out of it, are each
//! recomputed only when the scan crosses their respective boundary rather than once per
//! position.

use ethereum_hashing::hash;

/// Number of rounds of the shuffle. Each round roughly doubles the mixing of the previous one;
/// 90 rounds gives a shuffle indistinguishable from random for any practical list size.
pub const SHUFFLE_ROUND_COUNT: u8 = 90;

const SEED_SIZE: usize = 32;
const ROUND_SIZE: usize = 1;
const POSITION_WINDOW_SIZE: usize = 4;
const PIVOT_BUF_SIZE: usize = SEED_SIZE + ROUND_SIZE;
const SOURCE_BUF_SIZE: usize = SEED_SIZE + ROUND_SIZE + POSITION_WINDOW_SIZE;

/// Caches the hash of the position window `j / 256` so repeated queries within the same window
/// don't re-hash.
struct RoundSource {
    seed: [u8; SEED_SIZE],
    round: u8,
    window: Option<(u32, [u8; 32])>,
}

impl RoundSource {
    fn new(seed: &[u8; SEED_SIZE], round: u8) -> Self {
        Self {
            seed: *seed,
            round,
            window: None,
        }
    }

    fn bit_at(&mut self, position: usize) -> bool {
        let window_index = (position / 256) as u32;
        let digest = match &self.window {
            Some((w, digest)) if *w == window_index => *digest,
            _ => {
                let mut buf = [0u8; SOURCE_BUF_SIZE];
                buf[0..SEED_SIZE].copy_from_slice(&self.seed);
                buf[SEED_SIZE] = self.round;
                buf[SEED_SIZE + ROUND_SIZE..].copy_from_slice(&window_index.to_le_bytes());
                let digest: [u8; 32] = hash(&buf)
                    .try_into()
                    .expect("sha256 digest is 32 bytes");
                self.window = Some((window_index, digest));
                digest
            }
        };
        let byte = digest[(position % 256) / 8];
        (byte >> (position % 8)) & 1 == 1
    }
}

fn compute_pivot(seed: &[u8; SEED_SIZE], round: u8, index_count: usize) -> usize {
    let mut buf = [0u8; PIVOT_BUF_SIZE];
    buf[0..SEED_SIZE].copy_from_slice(seed);
    buf[SEED_SIZE] = round;
    let digest = hash(&buf);
    let mut eight = [0u8; 8];
    eight.copy_from_slice(&digest[0..8]);
    (u64::from_le_bytes(eight) % index_count as u64) as usize
}

fn rounds(forwards: bool) -> Box<dyn Iterator<Item = u8>> {
    if forwards {
        Box::new(0..SHUFFLE_ROUND_COUNT)
    } else {
        Box::new((0..SHUFFLE_ROUND_COUNT).rev())
    }
}

/// Permutes `input` in place via the forward (`forwards = true`) or inverse (`forwards = false`)
/// swap-or-not shuffle. Lists of length 0 or 1 are returned unchanged.
pub fn shuffle_list(mut input: Vec<usize>, seed: &[u8; 32], forwards: bool) -> Vec<usize> {
    let n = input.len();
    if n <= 1 {
        return input;
    }

    for round in rounds(forwards) {
        let pivot = compute_pivot(seed, round, n);
        let mut source = RoundSource::new(seed, round);
        shuffle_half(&mut input, &mut source, 0, pivot);
        // `source` caches a 256-position window; the two halves address disjoint position
        // ranges in general, so a fresh cache per half costs nothing correctness-wise but we
        // reuse it since `bit_at` re-hashes on window change regardless.
        shuffle_half(&mut input, &mut source, pivot + 1, n - 1);
    }

    input
}

/// Swaps `input[i]` and `input[j]` for the pair `(i, j)` walking inward from `[lo, hi]`,
/// deciding each swap from the bit at position `j` (the larger of the pair).
fn shuffle_half(input: &mut [usize], source: &mut RoundSource, lo: usize, hi: usize) {
    if lo > hi {
        // Empty half: happens when pivot == 0 (second half starts at 1 but hi wrapped) is
        // impossible since hi = n - 1 >= 1 for n > 1; this guards the lo = n case when
        // pivot == n - 1.
        return;
    }
    let (mut i, mut j) = (lo, hi);
    while i < j {
        if source.bit_at(j) {
            input.swap(i, j);
        }
        i += 1;
        j -= 1;
    }
}

/// Forward-shuffles `[0, index_count)` and returns the destination of `index`, without
/// materializing the full permutation. Equivalent to, but far cheaper than,
/// `shuffle_list((0..index_count).collect(), seed, true)[index]`.
pub fn compute_shuffled_index(index: usize, index_count: usize, seed: &[u8; 32]) -> Option<usize> {
    if index >= index_count || index_count <= 1 {
        return if index < index_count { Some(index) } else { None };
    }

    let mut cur = index;
    for round in rounds(true) {
        let pivot = compute_pivot(seed, round, index_count);
        let (lo, hi) = if cur <= pivot {
            (0, pivot)
        } else {
            (pivot + 1, index_count - 1)
        };
        let mirror = lo + hi - cur;
        let determining_position = std::cmp::max(cur, mirror);
        let mut source = RoundSource::new(seed, round);
        if source.bit_at(determining_position) {
            cur = mirror;
        }
    }
    Some(cur)
}

/// The inverse of [`compute_shuffled_index`]: given the destination `index` of a forward
/// shuffle, returns its pre-image.
pub fn compute_inverse_shuffled_index(
    index: usize,
    index_count: usize,
    seed: &[u8; 32],
) -> Option<usize> {
    if index >= index_count || index_count <= 1 {
        return if index < index_count { Some(index) } else { None };
    }

    let mut cur = index;
    for round in rounds(false) {
        let pivot = compute_pivot(seed, round, index_count);
        let (lo, hi) = if cur <= pivot {
            (0, pivot)
        } else {
            (pivot + 1, index_count - 1)
        };
        let mirror = lo + hi - cur;
        let determining_position = std::cmp::max(cur, mirror);
        let mut source = RoundSource::new(seed, round);
        if source.bit_at(determining_position) {
            cur = mirror;
        }
    }
    Some(cur)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seed(byte: u8) -> [u8; 32] {
        [byte; 32]
    }

    #[test]
    fn degenerate_lengths_are_identity() {
        assert_eq!(shuffle_list(vec![], &seed(0), true), Vec::<usize>::new());
        assert_eq!(shuffle_list(vec![7], &seed(0), true), vec![7]);
    }

    #[test]
    fn forward_then_inverse_is_identity() {
        let seed = seed(0x42);
        for n in [2usize, 3, 17, 255, 256, 257, 1024] {
            let input: Vec<usize> = (0..n).collect();
            let shuffled = shuffle_list(input.clone(), &seed, true);
            let restored = shuffle_list(shuffled, &seed, false);
            assert_eq!(restored, input, "round trip failed for n = {n}");
        }
    }

    #[test]
    fn shuffle_is_a_permutation() {
        let seed = seed(0x01);
        let n = 513;
        let input: Vec<usize> = (0..n).collect();
        let mut shuffled = shuffle_list(input, &seed, true);
        shuffled.sort_unstable();
        assert_eq!(shuffled, (0..n).collect::<Vec<_>>());
    }

    #[test]
    fn compute_shuffled_index_matches_full_shuffle() {
        let seed = seed(0x99);
        let n = 1024;
        let input: Vec<usize> = (0..n).collect();
        let shuffled = shuffle_list(input, &seed, true);
        for i in 0..n {
            assert_eq!(compute_shuffled_index(i, n, &seed), Some(shuffled[i]));
        }
    }

    #[test]
    fn compute_inverse_shuffled_index_is_the_inverse_permutation() {
        let seed = seed(0x77);
        let n = 300;
        for i in 0..n {
            let forward = compute_shuffled_index(i, n, &seed).unwrap();
            let back = compute_inverse_shuffled_index(forward, n, &seed).unwrap();
            assert_eq!(back, i);
        }
    }

    #[test]
    fn out_of_range_index_is_none() {
        assert_eq!(compute_shuffled_index(5, 5, &seed(0)), None);
    }
}
