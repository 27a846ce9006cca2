//! Hash family for the Bloom filter
//!
//! Each key is diffused once with SHA-256, then MurmurHash3 is applied to the
//! digest with seeds `0..k` to obtain k independent positions.

use std::io::Cursor;

use sha2::{Digest, Sha256};

/// SHA-256 digest of a key
pub type KeyDigest = [u8; 32];

/// Diffuse a raw key into a fixed 32-byte digest
pub fn key_digest(key: &[u8]) -> KeyDigest {
    Sha256::digest(key).into()
}

/// Seeded 64-bit MurmurHash3 of a digest
///
/// Uses the x64/128 variant and keeps the first 64-bit half of the state.
pub fn hash_digest(digest: &KeyDigest, seed: u32) -> u64 {
    let mut cursor = Cursor::new(&digest[..]);

    // Reading from an in-memory slice cannot fail
    let hash = murmur3::murmur3_x64_128(&mut cursor, seed).unwrap_or(0);
    hash as u64
}

/// Hash a single key with the given seed
pub fn hash_data(key: &[u8], seed: u32) -> u64 {
    hash_digest(&key_digest(key), seed)
}

/// Compute the k bit positions of a key in a filter of `n` bits
///
/// Position `i` is `hash_digest(sha256(key), i) % n`. The digest is computed
/// once and shared by all seeds. A zero-bit filter has no positions, so
/// `n == 0` yields an empty vector.
pub fn hash_positions(key: &[u8], k: u32, n: u64) -> Vec<u64> {
    if n == 0 {
        return Vec::new();
    }
    let digest = key_digest(key);
    (0..k).map(|seed| hash_digest(&digest, seed) % n).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_hash_data_deterministic() {
        let key = b"r12345";

        assert_eq!(hash_data(key, 3), hash_data(key, 3));
    }

    #[test]
    fn test_different_seed_different_output() {
        let key = b"r12345";

        assert_ne!(
            hash_data(key, 0),
            hash_data(key, 1),
            "Different seeds must behave as different hash functions"
        );
    }

    #[test]
    fn test_hash_data_matches_digest_path() {
        let key = b"some key";
        let digest = key_digest(key);

        for seed in 0..8 {
            assert_eq!(hash_data(key, seed), hash_digest(&digest, seed));
        }
    }

    #[test]
    fn test_positions_deterministic() {
        let first = hash_positions(b"rr42", 5, 64 << 20);
        let second = hash_positions(b"rr42", 5, 64 << 20);

        assert_eq!(first, second);
    }

    #[test]
    fn test_positions_count_and_bounds() {
        let n = 10_000;
        let positions = hash_positions(b"bounds", 7, n);

        assert_eq!(positions.len(), 7);
        for pos in &positions {
            assert!(*pos < n, "Position {} should be < n={}", pos, n);
        }

        let unique: HashSet<_> = positions.iter().collect();
        assert!(unique.len() >= 3, "Seeds should spread positions");
    }

    #[test]
    fn test_positions_follow_seed_order() {
        let key = b"ordered";
        let n = 1_000_003;
        let positions = hash_positions(key, 4, n);

        for (seed, pos) in positions.iter().enumerate() {
            assert_eq!(*pos, hash_data(key, seed as u32) % n);
        }
    }

    #[test]
    fn test_single_bit_capacity() {
        assert_eq!(hash_positions(b"anything", 3, 1), vec![0, 0, 0]);
    }

    #[test]
    fn test_hash_uniformity() {
        let n = 1000;
        let k = 7;
        let mut counts = vec![0usize; 10];

        for i in 0..1000 {
            let key = format!("element_{}", i);
            for pos in hash_positions(key.as_bytes(), k, n) {
                counts[(pos / 100) as usize] += 1;
            }
        }

        // ~700 per bucket, allow 50% variance
        for (i, count) in counts.iter().enumerate() {
            assert!(
                (350..=1050).contains(count),
                "Bucket {} has {} entries",
                i,
                count
            );
        }
    }

    #[test]
    fn test_zero_capacity_yields_no_positions() {
        assert!(hash_positions(b"r1", 5, 0).is_empty());
        assert!(hash_positions(b"", 0, 0).is_empty());
    }
}
