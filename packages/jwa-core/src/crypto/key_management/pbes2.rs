//! PBES2 key-encryption-key derivation (RFC 7518 §4.8).
//!
//! ```text
//!   salt = alg ‖ 0x00 ‖ p2s
//!   KEK  = PBKDF2-HMAC-SHA-n(password, salt, p2c, 16 | 24 | 32 bytes)
//! ```
//!
//! The iteration count read from a header is bounded by a per-algorithm
//! ceiling so that a hostile token cannot force unbounded work.

use rand::rngs::OsRng;
use rand::RngCore;
use zeroize::Zeroizing;

use super::KeyWrapHeader;
use crate::crypto::hash::HashAlgorithm;
use crate::crypto::kdf::pbkdf2_derive;
use crate::error::{Error, Result};

/// Shortest accepted `p2s`
pub const PBES2_MIN_SALT_BYTES: usize = 8;

/// Length of the `p2s` generated when the caller supplies none
pub const PBES2_SALT_BYTES: usize = 16;

/// The `p2s`/`p2c` pair to wrap with: the caller's values, or a random salt
/// and the iteration ceiling where they are unset
///
/// `header` is left as it is so that a failed wrap does not alter it.
pub(super) fn prepare_params(header: &KeyWrapHeader, max_iterations: u32) -> KeyWrapHeader {
    let p2s = if header.p2s.is_empty() {
        let mut salt = vec![0u8; PBES2_SALT_BYTES];
        OsRng.fill_bytes(&mut salt);
        salt
    } else {
        header.p2s.clone()
    };
    KeyWrapHeader {
        p2s,
        p2c: header.p2c.or(Some(max_iterations)),
        ..KeyWrapHeader::default()
    }
}

/// Derive the AES-KW key for `code` from `password` and the header's `p2s`/`p2c`
pub(super) fn derive_kek(
    code: &str,
    prf: HashAlgorithm,
    kek_bits: usize,
    max_iterations: u32,
    password: &[u8],
    header: &KeyWrapHeader,
) -> Result<Zeroizing<Vec<u8>>> {
    if header.p2s.len() < PBES2_MIN_SALT_BYTES {
        tracing::warn!(alg = code, salt_len = header.p2s.len(), "PBES2 salt too short");
        return Err(Error::UnsupportedConfiguration(format!(
            "{code} needs a p2s of at least {PBES2_MIN_SALT_BYTES} bytes"
        )));
    }

    let iterations = match header.p2c {
        Some(count) if (1..=max_iterations).contains(&count) => count,
        Some(count) => {
            tracing::warn!(alg = code, count, max_iterations, "PBES2 iteration count rejected");
            return Err(Error::UnsupportedConfiguration(format!(
                "{code} iteration count must be between 1 and {max_iterations}"
            )));
        }
        None => {
            return Err(Error::UnsupportedConfiguration(format!(
                "{code} requires the p2c header parameter"
            )))
        }
    };

    let mut salt = Vec::with_capacity(code.len() + 1 + header.p2s.len());
    salt.extend_from_slice(code.as_bytes());
    salt.push(0x00);
    salt.extend_from_slice(&header.p2s);

    pbkdf2_derive(prf, password, &salt, iterations, kek_bits / 8)
}
