//! # Key Derivation
//!
//! Two derivation functions feed the key-management algorithms.
//!
//! ## Concat KDF (NIST SP 800-56A §5.8.1, RFC 7518 §4.6.2)
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                           CONCAT KDF                                    │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  OtherInfo = LP(AlgorithmID) ‖ LP(PartyUInfo) ‖ LP(PartyVInfo)         │
//! │              ‖ BE32(keydatalen)                                         │
//! │                                                                         │
//! │      LP(x) = BE32(len(x)) ‖ x                                           │
//! │                                                                         │
//! │  for i in 1..=ceil(keydatalen / 256):                                   │
//! │      K(i) = SHA-256( BE32(i) ‖ Z ‖ OtherInfo )                          │
//! │                                                                         │
//! │  DerivedKey = (K(1) ‖ K(2) ‖ ...)[.. keydatalen / 8]                    │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! SuppPrivInfo is the empty octet string and contributes nothing.
//!
//! ## PBKDF2 (RFC 8018 §5.2)
//!
//! Used by PBES2 with HMAC-SHA-256/384/512 as the PRF.

use sha2::{Sha256, Sha384, Sha512};
use zeroize::Zeroizing;

use crate::crypto::hash::HashAlgorithm;
use crate::crypto::secret::secret_buffer;
use crate::error::{Error, Result};

/// Derive `key_bits` of keying material from a shared secret `z`
pub fn concat_kdf(
    z: &[u8],
    key_bits: usize,
    algorithm_id: &[u8],
    party_u_info: &[u8],
    party_v_info: &[u8],
) -> Result<Zeroizing<Vec<u8>>> {
    if key_bits == 0 || key_bits % 8 != 0 {
        return Err(Error::KeyDerivationFailed(format!(
            "key length must be a positive multiple of 8 bits, got {key_bits}"
        )));
    }
    let key_bits_u32 = u32::try_from(key_bits)
        .map_err(|_| Error::KeyDerivationFailed("key length too large".into()))?;

    let mut other_info = Vec::with_capacity(
        12 + algorithm_id.len() + party_u_info.len() + party_v_info.len() + 4,
    );
    for field in [algorithm_id, party_u_info, party_v_info] {
        other_info.extend_from_slice(&length_prefix(field)?);
        other_info.extend_from_slice(field);
    }
    other_info.extend_from_slice(&key_bits_u32.to_be_bytes());

    let hash = HashAlgorithm::Sha256;
    let reps = key_bits.div_ceil(hash.output_size_bits());

    let mut derived = secret_buffer(reps * hash.output_size_bytes());
    for (i, chunk) in derived.chunks_mut(hash.output_size_bytes()).enumerate() {
        let counter = (i as u32 + 1).to_be_bytes();
        let round = Zeroizing::new(hash.digest(&[&counter, z, &other_info]));
        chunk.copy_from_slice(&round);
    }
    derived.truncate(key_bits / 8);
    Ok(derived)
}

fn length_prefix(field: &[u8]) -> Result<[u8; 4]> {
    u32::try_from(field.len())
        .map(u32::to_be_bytes)
        .map_err(|_| Error::KeyDerivationFailed("KDF input too long".into()))
}

/// PBKDF2 with an HMAC-SHA-2 PRF, producing `len` bytes
pub fn pbkdf2_derive(
    prf: HashAlgorithm,
    password: &[u8],
    salt: &[u8],
    iterations: u32,
    len: usize,
) -> Result<Zeroizing<Vec<u8>>> {
    if iterations == 0 {
        return Err(Error::KeyDerivationFailed(
            "iteration count must be positive".into(),
        ));
    }
    let mut out = secret_buffer(len);
    match prf {
        HashAlgorithm::Sha256 => pbkdf2::pbkdf2_hmac::<Sha256>(password, salt, iterations, &mut out),
        HashAlgorithm::Sha384 => pbkdf2::pbkdf2_hmac::<Sha384>(password, salt, iterations, &mut out),
        HashAlgorithm::Sha512 => pbkdf2::pbkdf2_hmac::<Sha512>(password, salt, iterations, &mut out),
        HashAlgorithm::Sha1 => {
            return Err(Error::UnsupportedConfiguration(
                "PBKDF2 with SHA-1 is not offered".into(),
            ))
        }
    }
    Ok(out)
}

// ============================================================================
// TESTS
// ============================================================================
