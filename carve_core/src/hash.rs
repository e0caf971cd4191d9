//! Small deterministic hashing helpers.
//!
//! Used wherever a stable pseudo-random value is needed without pulling in a
//! global RNG (e.g. placeholder per-triangle colours).

const FNV_OFFSET_32: u32 = 0x811c9dc5;
const FNV_PRIME_32: u32 = 0x01000193;

/// FNV-1a 32-bit hash over a sequence of `u32` words (little-endian bytes).
#[inline]
pub fn fnv1a_32(words: &[u32]) -> u32 {
    let mut hash = FNV_OFFSET_32;
    for word in words {
        for byte in word.to_le_bytes() {
            hash ^= byte as u32;
            hash = hash.wrapping_mul(FNV_PRIME_32);
        }
    }
    hash
}

/// Derive an opaque RGBA colour from a seed and an ordinal.
///
/// Alpha is always 255.
#[inline]
pub fn hashed_color(seed: u32, ordinal: u32) -> [u8; 4] {
    let [r, g, b, _] = fnv1a_32(&[seed, ordinal]).to_le_bytes();
    [r, g, b, 255]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fnv1a_known_empty() {
        assert_eq!(fnv1a_32(&[]), FNV_OFFSET_32);
    }

    #[test]
    fn test_fnv1a_deterministic() {
        assert_eq!(fnv1a_32(&[1, 2, 3]), fnv1a_32(&[1, 2, 3]));
        assert_ne!(fnv1a_32(&[1, 2, 3]), fnv1a_32(&[3, 2, 1]));
    }

    #[test]
    fn test_hashed_color_opaque() {
        for i in 0..64 {
            assert_eq!(hashed_color(7, i)[3], 255);
        }
        assert_ne!(hashed_color(7, 0), hashed_color(7, 1));
    }
}
