//! RSAES key transport (RFC 7518 §4.2, §4.3).

use rand::rngs::OsRng;
use rsa::{Oaep, Pkcs1v15Encrypt, RsaPrivateKey, RsaPublicKey};
use zeroize::Zeroizing;

use crate::crypto::keys::RsaKey;
use crate::crypto::sizes::require_capacity;
use crate::error::{Error, Result};

/// Encryption padding for an RSA key-transport algorithm
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(super) enum RsaPadding {
    /// RSAES-PKCS1-v1_5
    Pkcs1v15,
    /// RSAES-OAEP, SHA-1 with MGF1-SHA-1
    OaepSha1,
    /// RSAES-OAEP, SHA-256 with MGF1-SHA-256
    OaepSha256,
}

impl RsaPadding {
    fn encrypt(self, key: &RsaPublicKey, message: &[u8]) -> rsa::Result<Vec<u8>> {
        let mut rng = OsRng;
        match self {
            Self::Pkcs1v15 => key.encrypt(&mut rng, Pkcs1v15Encrypt, message),
            Self::OaepSha1 => key.encrypt(&mut rng, Oaep::new::<sha1::Sha1>(), message),
            Self::OaepSha256 => key.encrypt(&mut rng, Oaep::new::<sha2::Sha256>(), message),
        }
    }

    fn decrypt(self, key: &RsaPrivateKey, ciphertext: &[u8]) -> rsa::Result<Vec<u8>> {
        let mut rng = OsRng;
        match self {
            Self::Pkcs1v15 => key.decrypt_blinded(&mut rng, Pkcs1v15Encrypt, ciphertext),
            Self::OaepSha1 => key.decrypt_blinded(&mut rng, Oaep::new::<sha1::Sha1>(), ciphertext),
            Self::OaepSha256 => {
                key.decrypt_blinded(&mut rng, Oaep::new::<sha2::Sha256>(), ciphertext)
            }
        }
    }
}

/// Encrypt `cek` to the public key, writing one modulus worth of bytes
pub(super) fn encrypt(key: &RsaKey, padding: RsaPadding, cek: &[u8], out: &mut [u8]) -> Result<usize> {
    let encrypted = padding.encrypt(key.public_key(), cek).map_err(|e| match e {
        rsa::Error::MessageTooLong => Error::SizeInvalid(format!(
            "a {}-byte CEK is too long for a {}-bit RSA key with {:?}",
            cek.len(),
            key.key_size_bits(),
            padding
        )),
        other => Error::EncryptionFailed(other.to_string()),
    })?;

    require_capacity("wrapped key", out.len(), encrypted.len())?;
    out[..encrypted.len()].copy_from_slice(&encrypted);
    Ok(encrypted.len())
}

/// Decrypt an encrypted CEK
///
/// Padding and length failures are reported uniformly as
/// [`Error::DecryptionFailed`].
pub(super) fn decrypt(
    key: &RsaKey,
    padding: RsaPadding,
    wrapped: &[u8],
    out: &mut [u8],
) -> Result<usize> {
    let private = key.private_key()?;
    let cek = Zeroizing::new(
        padding
            .decrypt(private, wrapped)
            .map_err(|_| Error::DecryptionFailed)?,
    );

    require_capacity("content encryption key", out.len(), cek.len())?;
    out[..cek.len()].copy_from_slice(&cek);
    Ok(cek.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::test_support::rsa_2048;

    const PADDINGS: [RsaPadding; 3] = [
        RsaPadding::Pkcs1v15,
        RsaPadding::OaepSha1,
        RsaPadding::OaepSha256,
    ];

    #[test]
    fn test_round_trip_each_padding() {
        let key = rsa_2048();
        let cek = [0x42u8; 32];
        for padding in PADDINGS {
            let mut wrapped = [0u8; 256];
            assert_eq!(encrypt(key, padding, &cek, &mut wrapped).unwrap(), 256);

            let mut out = [0u8; 32];
            assert_eq!(decrypt(key, padding, &wrapped, &mut out).unwrap(), 32);
            assert_eq!(out, cek, "{padding:?}");
        }
    }

    #[test]
    fn test_encryption_is_randomized() {
        let key = rsa_2048();
        let mut a = [0u8; 256];
        let mut b = [0u8; 256];
        encrypt(key, RsaPadding::OaepSha256, &[1u8; 16], &mut a).unwrap();
        encrypt(key, RsaPadding::OaepSha256, &[1u8; 16], &mut b).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_tampered_ciphertext_fails_uniformly() {
        let key = rsa_2048();
        for padding in PADDINGS {
            let mut wrapped = [0u8; 256];
            encrypt(key, padding, &[7u8; 16], &mut wrapped).unwrap();
            wrapped[100] ^= 0x01;

            let mut out = [0u8; 64];
            assert!(matches!(
                decrypt(key, padding, &wrapped, &mut out),
                Err(Error::DecryptionFailed)
            ));
        }
    }

    #[test]
    fn test_wrong_padding_fails() {
        let key = rsa_2048();
        let mut wrapped = [0u8; 256];
        encrypt(key, RsaPadding::OaepSha1, &[7u8; 16], &mut wrapped).unwrap();

        let mut out = [0u8; 64];
        assert!(matches!(
            decrypt(key, RsaPadding::OaepSha256, &wrapped, &mut out),
            Err(Error::DecryptionFailed)
        ));
    }

    #[test]
    fn test_truncated_ciphertext() {
        let mut out = [0u8; 32];
        assert!(matches!(
            decrypt(rsa_2048(), RsaPadding::Pkcs1v15, &[0u8; 100], &mut out),
            Err(Error::DecryptionFailed)
        ));
    }

    #[test]
    fn test_cek_too_long() {
        // PKCS#1 v1.5 carries at most k - 11 bytes
        let mut wrapped = [0u8; 256];
        assert!(matches!(
            encrypt(rsa_2048(), RsaPadding::Pkcs1v15, &[0u8; 246], &mut wrapped),
            Err(Error::SizeInvalid(_))
        ));
    }

    #[test]
    fn test_public_key_cannot_decrypt() {
        let public = rsa_2048().to_public();
        let mut wrapped = [0u8; 256];
        encrypt(&public, RsaPadding::OaepSha1, &[3u8; 16], &mut wrapped).unwrap();

        let mut out = [0u8; 16];
        assert!(matches!(
            decrypt(&public, RsaPadding::OaepSha1, &wrapped, &mut out),
            Err(Error::InvalidKey(_))
        ));
    }
}
