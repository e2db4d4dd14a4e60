//! Constant-time comparison and zero-on-drop scratch buffers.

use subtle::ConstantTimeEq;
use zeroize::Zeroizing;

/// Compare two byte strings without leaking where they differ
///
/// Lengths are public in every JOSE structure, so a length mismatch
/// returns early. Equal-length inputs are compared in constant time.
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.ct_eq(b).into()
}

/// A zero-filled buffer that is wiped on drop, including on early return
pub fn secret_buffer(len: usize) -> Zeroizing<Vec<u8>> {
    Zeroizing::new(vec![0u8; len])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constant_time_eq() {
        assert!(constant_time_eq(b"abc", b"abc"));
        assert!(!constant_time_eq(b"abc", b"abd"));
        assert!(!constant_time_eq(b"abc", b"ab"));
        assert!(constant_time_eq(b"", b""));
    }

    #[test]
    fn test_secret_buffer() {
        let buf = secret_buffer(24);
        assert_eq!(buf.len(), 24);
        assert!(buf.iter().all(|b| *b == 0));
    }
}
