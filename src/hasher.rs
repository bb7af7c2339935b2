//! DJB2 string hashing.
//!
//! The hash runs over UTF-16 code units with 32-bit wraparound so that slot
//! and bucket indices match tables built by other DJB2 implementations that
//! index strings by code unit. Characters outside the BMP therefore
//! contribute two units (a surrogate pair).

/// Maps a string key to the 32-bit value tables reduce modulo capacity.
pub trait KeyHasher {
    fn hash_key(&self, key: &str) -> u32;
}

/// Deterministic DJB2 hasher; the default for both table strategies.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct StringHasher;

impl StringHasher {
    pub const SEED: u32 = 5381;

    /// `hash = hash * 33 + unit` for every UTF-16 unit, wrapping at 32 bits.
    #[inline]
    pub fn hash(key: &str) -> u32 {
        key.encode_utf16().fold(Self::SEED, |h, unit| {
            // (h << 5) + h == h * 33
            h.wrapping_shl(5).wrapping_add(h).wrapping_add(u32::from(unit))
        })
    }
}

impl KeyHasher for StringHasher {
    #[inline]
    fn hash_key(&self, key: &str) -> u32 {
        StringHasher::hash(key)
    }
}
