//! # Key-Size Legality
//!
//! A [`KeySizes`] range describes which bit lengths an algorithm accepts:
//!
//! ```text
//!   legal(size) ⇔ min ≤ size ≤ max  ∧  (size − min) mod skip = 0
//!
//!   HS256   KeySizes { min: 256,  max: ∞,     skip: 8 }   256, 264, 272, ...
//!   RS256   KeySizes { min: 2048, max: 16384, skip: 8 }   2048, 2056, ...
//!   ES256   KeySizes { min: 256,  max: 256,   skip: 0 }   exactly 256
//! ```
//!
//! A `skip` of zero means the range holds the single value `min`.

use crate::algorithms::AlgorithmDescriptor;
use crate::crypto::keys::SecretKey;
use crate::error::{Error, Result};

/// A range of legal key sizes in bits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeySizes {
    /// Smallest legal size
    pub min_bits: usize,
    /// Largest legal size
    pub max_bits: usize,
    /// Step between legal sizes, zero for a single size
    pub skip_bits: usize,
}

impl KeySizes {
    /// A range that accepts any size
    pub const ANY: KeySizes = KeySizes::new(0, usize::MAX, 1);

    /// Create a size range
    pub const fn new(min_bits: usize, max_bits: usize, skip_bits: usize) -> Self {
        Self {
            min_bits,
            max_bits,
            skip_bits,
        }
    }

    /// A range holding exactly one size
    pub const fn exactly(bits: usize) -> Self {
        Self::new(bits, bits, 0)
    }

    /// An open-ended range starting at `min_bits`
    pub const fn at_least(min_bits: usize, skip_bits: usize) -> Self {
        Self::new(min_bits, usize::MAX, skip_bits)
    }

    /// Whether `size_bits` is legal for this range
    pub const fn contains(&self, size_bits: usize) -> bool {
        if size_bits < self.min_bits || size_bits > self.max_bits {
            return false;
        }
        if self.skip_bits == 0 {
            return size_bits == self.min_bits;
        }
        (size_bits - self.min_bits) % self.skip_bits == 0
    }
}

/// Whether `size_bits` falls in any of the given ranges
pub fn is_legal_size(legal: &[KeySizes], size_bits: usize) -> bool {
    legal.iter().any(|range| range.contains(size_bits))
}

/// Fail with [`Error::SizeInvalid`] unless the key size is legal for the algorithm
pub fn assert_legal_size(key: &SecretKey, descriptor: &AlgorithmDescriptor) -> Result<()> {
    let bits = key.key_size_bits();
    if descriptor.legal_key_sizes.contains(bits) {
        Ok(())
    } else {
        Err(Error::SizeInvalid(format!(
            "{} does not accept a {bits}-bit key",
            descriptor.code
        )))
    }
}

/// Fail with [`Error::SizeInvalid`] unless a byte length is exactly `expected`
pub(crate) fn require_len(what: &str, actual: usize, expected: usize) -> Result<()> {
    if actual == expected {
        Ok(())
    } else {
        Err(Error::SizeInvalid(format!(
            "{what} must be {expected} bytes, got {actual}"
        )))
    }
}

/// Fail with [`Error::SizeInvalid`] unless an output buffer holds `needed` bytes
pub(crate) fn require_capacity(what: &str, capacity: usize, needed: usize) -> Result<()> {
    if capacity >= needed {
        Ok(())
    } else {
        Err(Error::SizeInvalid(format!(
            "{what} buffer holds {capacity} bytes, {needed} required"
        )))
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hmac_style_range() {
        let hs256 = KeySizes::at_least(256, 8);
        assert!(hs256.contains(256));
        assert!(hs256.contains(264));
        assert!(hs256.contains(4096));
        assert!(!hs256.contains(255));
        assert!(!hs256.contains(260));
    }

    #[test]
    fn test_rsa_style_range() {
        let rsa = KeySizes::new(2048, 16384, 8);
        assert!(rsa.contains(2048));
        assert!(rsa.contains(2056));
        assert!(rsa.contains(16384));
        assert!(!rsa.contains(2047));
        assert!(!rsa.contains(16392));
    }

    #[test]
    fn test_exact_range() {
        let p521 = KeySizes::exactly(521);
        assert!(p521.contains(521));
        assert!(!p521.contains(520));
        assert!(!p521.contains(528));
    }

    #[test]
    fn test_any_of_several_ranges() {
        let aes_kw = [
            KeySizes::exactly(128),
            KeySizes::exactly(192),
            KeySizes::exactly(256),
        ];
        assert!(is_legal_size(&aes_kw, 192));
        assert!(!is_legal_size(&aes_kw, 160));
        assert!(!is_legal_size(&[], 128));
    }

    #[test]
    fn test_any_accepts_everything() {
        assert!(KeySizes::ANY.contains(0));
        assert!(KeySizes::ANY.contains(12345));
    }
}
