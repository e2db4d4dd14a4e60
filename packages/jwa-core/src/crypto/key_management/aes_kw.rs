//! AES Key Wrap (RFC 3394) and AES-GCM key wrap (RFC 7518 §4.7).

use aes_kw::{KekAes128, KekAes192, KekAes256};
use rand::rngs::OsRng;
use rand::RngCore;

use super::{KeyWrapHeader, AES_KW_OVERHEAD};
use crate::crypto::encryption::{gcm_open, gcm_seal, GCM_NONCE_SIZE};
use crate::crypto::secret::secret_buffer;
use crate::crypto::sizes::require_capacity;
use crate::error::{Error, Result};

/// Smallest CEK AES-KW accepts: two 64-bit semiblocks
const MIN_KW_INPUT: usize = 16;

fn kek_wrap(kek: &[u8], data: &[u8], out: &mut [u8]) -> std::result::Result<(), aes_kw::Error> {
    match kek.len() {
        16 => KekAes128::try_from(kek)?.wrap(data, out),
        24 => KekAes192::try_from(kek)?.wrap(data, out),
        32 => KekAes256::try_from(kek)?.wrap(data, out),
        size => Err(aes_kw::Error::InvalidKekSize { size }),
    }
}

fn kek_unwrap(kek: &[u8], data: &[u8], out: &mut [u8]) -> std::result::Result<(), aes_kw::Error> {
    match kek.len() {
        16 => KekAes128::try_from(kek)?.unwrap(data, out),
        24 => KekAes192::try_from(kek)?.unwrap(data, out),
        32 => KekAes256::try_from(kek)?.unwrap(data, out),
        size => Err(aes_kw::Error::InvalidKekSize { size }),
    }
}

/// Wrap `cek` under `kek`, writing `cek.len() + 8` bytes
pub(super) fn wrap(kek: &[u8], cek: &[u8], out: &mut [u8]) -> Result<usize> {
    if cek.len() < MIN_KW_INPUT || cek.len() % 8 != 0 {
        return Err(Error::SizeInvalid(format!(
            "AES-KW needs a CEK of at least 16 bytes in 8-byte steps, got {}",
            cek.len()
        )));
    }
    let n = cek.len() + AES_KW_OVERHEAD;
    require_capacity("wrapped key", out.len(), n)?;

    kek_wrap(kek, cek, &mut out[..n]).map_err(|e| match e {
        aes_kw::Error::InvalidKekSize { size } => {
            Error::SizeInvalid(format!("no AES-KW variant for a {size}-byte key"))
        }
        other => Error::EncryptionFailed(other.to_string()),
    })?;
    Ok(n)
}

/// Unwrap `wrapped` under `kek`, writing `wrapped.len() - 8` bytes
pub(super) fn unwrap(kek: &[u8], wrapped: &[u8], out: &mut [u8]) -> Result<usize> {
    if wrapped.len() < MIN_KW_INPUT + AES_KW_OVERHEAD || wrapped.len() % 8 != 0 {
        return Err(Error::SizeInvalid(format!(
            "AES-KW encrypted key has invalid length {}",
            wrapped.len()
        )));
    }
    let n = wrapped.len() - AES_KW_OVERHEAD;
    let mut cek = secret_buffer(n);

    kek_unwrap(kek, wrapped, &mut cek).map_err(|e| match e {
        aes_kw::Error::IntegrityCheckFailed => {
            tracing::warn!("AES-KW integrity check failed");
            Error::IntegrityViolation
        }
        aes_kw::Error::InvalidKekSize { size } => {
            Error::SizeInvalid(format!("no AES-KW variant for a {size}-byte key"))
        }
        _ => Error::DecryptionFailed,
    })?;

    require_capacity("content encryption key", out.len(), n)?;
    out[..n].copy_from_slice(&cek);
    Ok(n)
}

/// AES-GCM key wrap: fresh IV, empty AAD; `iv` and `tag` go into the header
pub(super) fn gcm_wrap(
    kek: &[u8],
    header: &mut KeyWrapHeader,
    cek: &[u8],
    out: &mut [u8],
) -> Result<usize> {
    let mut iv = vec![0u8; GCM_NONCE_SIZE];
    OsRng.fill_bytes(&mut iv);

    let tag = gcm_seal(kek, &iv, &[], cek, out)?;
    header.iv = iv;
    header.tag = tag.to_vec();
    Ok(cek.len())
}

pub(super) fn gcm_unwrap(
    kek: &[u8],
    header: &KeyWrapHeader,
    wrapped: &[u8],
    out: &mut [u8],
) -> Result<usize> {
    let cek = gcm_open(kek, &header.iv, &[], wrapped, &header.tag)?;
    require_capacity("content encryption key", out.len(), cek.len())?;
    out[..cek.len()].copy_from_slice(&cek);
    Ok(cek.len())
}
