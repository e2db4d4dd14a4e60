//! # Signing Module
//!
//! JWS signature algorithms (RFC 7518 §3).
//!
//! ## Algorithm Table
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       SIGNATURE ALGORITHMS                              │
//! ├──────────┬──────────────────────┬───────────────┬───────────────────────┤
//! │  Code    │  Scheme              │  Key          │  Signature size       │
//! ├──────────┼──────────────────────┼───────────────┼───────────────────────┤
//! │  HS256   │  HMAC-SHA-256        │  ≥256, step 8 │  32                   │
//! │  HS384   │  HMAC-SHA-384        │  ≥384, step 8 │  48                   │
//! │  HS512   │  HMAC-SHA-512        │  ≥512, step 8 │  64                   │
//! │  RS*     │  RSASSA-PKCS1-v1_5   │  2048..16384  │  modulus bytes        │
//! │  PS*     │  RSASSA-PSS          │  2048..16384  │  modulus bytes        │
//! │  ES256   │  ECDSA P-256         │  256          │  64  (r ‖ s)          │
//! │  ES384   │  ECDSA P-384         │  384          │  96  (r ‖ s)          │
//! │  ES512   │  ECDSA P-521         │  521          │  132 (r ‖ s)          │
//! └──────────┴──────────────────────┴───────────────┴───────────────────────┘
//! ```
//!
//! HMAC keys must be at least as long as the hash output (NIST SP 800-107
//! §5.3.4). PSS uses a salt as long as the hash.
//!
//! ## Security
//!
//! | Property | Guarantee |
//! |----------|-----------|
//! | HMAC verification | Constant-time tag comparison |
//! | Key gating | Type and size are checked before any signing math |
//! | ECDSA | Fixed-width `r ‖ s` encoding, never DER |

use rand::rngs::OsRng;
use rsa::{Pkcs1v15Sign, Pss};
use sha1::Sha1;
use sha2::{Sha256, Sha384, Sha512};

use crate::algorithms::{AlgorithmDescriptor, AlgorithmKind};
use crate::crypto::hash::HashAlgorithm;
use crate::crypto::keys::{EccCurve, KeyType, SecretKey};
use crate::crypto::secret::constant_time_eq;
use crate::crypto::sizes::{require_capacity, KeySizes};
use crate::error::{Error, Result};

/// Legal RSA modulus sizes for RS* and PS*
pub const RSA_SIGNING_KEY_SIZES: KeySizes = KeySizes::new(2048, 16384, 8);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum SignatureScheme {
    Hmac,
    RsaPkcs1,
    RsaPss,
    Ecdsa(EccCurve),
}

/// A JWS signature algorithm
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SignatureAlgorithm {
    descriptor: AlgorithmDescriptor,
    scheme: SignatureScheme,
    hash: HashAlgorithm,
}

impl SignatureAlgorithm {
    /// HMAC using SHA-256
    pub const HS256: Self = Self::hmac("HS256", HashAlgorithm::Sha256);
    /// HMAC using SHA-384
    pub const HS384: Self = Self::hmac("HS384", HashAlgorithm::Sha384);
    /// HMAC using SHA-512
    pub const HS512: Self = Self::hmac("HS512", HashAlgorithm::Sha512);
    /// RSASSA-PKCS1-v1_5 using SHA-256
    pub const RS256: Self = Self::rsa("RS256", SignatureScheme::RsaPkcs1, HashAlgorithm::Sha256);
    /// RSASSA-PKCS1-v1_5 using SHA-384
    pub const RS384: Self = Self::rsa("RS384", SignatureScheme::RsaPkcs1, HashAlgorithm::Sha384);
    /// RSASSA-PKCS1-v1_5 using SHA-512
    pub const RS512: Self = Self::rsa("RS512", SignatureScheme::RsaPkcs1, HashAlgorithm::Sha512);
    /// RSASSA-PSS using SHA-256 and MGF1 with SHA-256
    pub const PS256: Self = Self::rsa("PS256", SignatureScheme::RsaPss, HashAlgorithm::Sha256);
    /// RSASSA-PSS using SHA-384 and MGF1 with SHA-384
    pub const PS384: Self = Self::rsa("PS384", SignatureScheme::RsaPss, HashAlgorithm::Sha384);
    /// RSASSA-PSS using SHA-512 and MGF1 with SHA-512
    pub const PS512: Self = Self::rsa("PS512", SignatureScheme::RsaPss, HashAlgorithm::Sha512);
    /// ECDSA using P-256 and SHA-256
    pub const ES256: Self = Self::ecdsa("ES256", EccCurve::P256, HashAlgorithm::Sha256);
    /// ECDSA using P-384 and SHA-384
    pub const ES384: Self = Self::ecdsa("ES384", EccCurve::P384, HashAlgorithm::Sha384);
    /// ECDSA using P-521 and SHA-512
    pub const ES512: Self = Self::ecdsa("ES512", EccCurve::P521, HashAlgorithm::Sha512);

    /// Every signature algorithm, in registration order
    pub const ALL: [Self; 12] = [
        Self::HS256,
        Self::HS384,
        Self::HS512,
        Self::RS256,
        Self::RS384,
        Self::RS512,
        Self::PS256,
        Self::PS384,
        Self::PS512,
        Self::ES256,
        Self::ES384,
        Self::ES512,
    ];

    const fn hmac(code: &'static str, hash: HashAlgorithm) -> Self {
        Self {
            descriptor: AlgorithmDescriptor::new(
                code,
                AlgorithmKind::Signature,
                Some(KeyType::Symmetric),
                KeySizes::at_least(hash.output_size_bits(), 8),
            ),
            scheme: SignatureScheme::Hmac,
            hash,
        }
    }

    const fn rsa(code: &'static str, scheme: SignatureScheme, hash: HashAlgorithm) -> Self {
        Self {
            descriptor: AlgorithmDescriptor::new(
                code,
                AlgorithmKind::Signature,
                Some(KeyType::Rsa),
                RSA_SIGNING_KEY_SIZES,
            ),
            scheme,
            hash,
        }
    }

    const fn ecdsa(code: &'static str, curve: EccCurve, hash: HashAlgorithm) -> Self {
        Self {
            descriptor: AlgorithmDescriptor::new(
                code,
                AlgorithmKind::Signature,
                Some(KeyType::Ecc),
                KeySizes::exactly(curve.key_size_bits()),
            ),
            scheme: SignatureScheme::Ecdsa(curve),
            hash,
        }
    }

    /// The static descriptor
    pub fn descriptor(&self) -> &AlgorithmDescriptor {
        &self.descriptor
    }

    /// The registered code
    pub fn code(&self) -> &'static str {
        self.descriptor.code
    }

    /// The hash function this algorithm signs with
    pub fn hash(&self) -> HashAlgorithm {
        self.hash
    }

    /// Size of a signature produced with a key of `key_size_bits`
    pub fn signature_size_bytes(&self, key_size_bits: usize) -> usize {
        match self.scheme {
            SignatureScheme::Hmac => self.hash.output_size_bytes(),
            SignatureScheme::RsaPkcs1 | SignatureScheme::RsaPss => key_size_bits.div_ceil(8),
            SignatureScheme::Ecdsa(curve) => 2 * curve.field_bytes(),
        }
    }

    /// Sign `message` into `out`, returning the number of bytes written
    pub fn try_sign(&self, key: &SecretKey, message: &[u8], out: &mut [u8]) -> Result<usize> {
        self.descriptor.check_key(key)?;
        let needed = self.signature_size_bytes(key.key_size_bits());
        require_capacity("signature", out.len(), needed)?;

        match self.scheme {
            SignatureScheme::Hmac => {
                let mac = self.hash.hmac(key.symmetric_bytes()?, &[message])?;
                out[..mac.len()].copy_from_slice(&mac);
                Ok(mac.len())
            }
            SignatureScheme::RsaPkcs1 | SignatureScheme::RsaPss => {
                let private = key.rsa()?.private_key()?;
                let digest = self.hash.digest(&[message]);
                // sign_with_rng blinds the private-key operation
                let signature = if self.scheme == SignatureScheme::RsaPss {
                    private.sign_with_rng(&mut OsRng, pss(self.hash), &digest)
                } else {
                    private.sign_with_rng(&mut OsRng, pkcs1v15(self.hash), &digest)
                }
                .map_err(|e| Error::SigningFailed(e.to_string()))?;
                copy_out(&signature, out)
            }
            SignatureScheme::Ecdsa(_) => {
                let signature = key.ecc()?.sign_ecdsa(message)?;
                copy_out(&signature, out)
            }
        }
    }

    /// Sign `message` into a freshly allocated buffer
    pub fn sign(&self, key: &SecretKey, message: &[u8]) -> Result<Vec<u8>> {
        let mut out = vec![0u8; self.signature_size_bytes(key.key_size_bits())];
        let written = self.try_sign(key, message, &mut out)?;
        out.truncate(written);
        Ok(out)
    }

    /// Check a signature
    ///
    /// Returns `Ok(false)` for a signature that does not match and `Err`
    /// when the key itself is unusable for this algorithm.
    pub fn verify(&self, key: &SecretKey, message: &[u8], signature: &[u8]) -> Result<bool> {
        self.descriptor.check_key(key)?;

        match self.scheme {
            SignatureScheme::Hmac => {
                if signature.len() != self.hash.output_size_bytes() {
                    return Ok(false);
                }
                let expected = self.hash.hmac(key.symmetric_bytes()?, &[message])?;
                Ok(constant_time_eq(&expected, signature))
            }
            SignatureScheme::RsaPkcs1 | SignatureScheme::RsaPss => {
                let public = key.rsa()?.public_key();
                let digest = self.hash.digest(&[message]);
                let verified = if self.scheme == SignatureScheme::RsaPss {
                    public.verify(pss(self.hash), &digest, signature)
                } else {
                    public.verify(pkcs1v15(self.hash), &digest, signature)
                };
                Ok(verified.is_ok())
            }
            SignatureScheme::Ecdsa(_) => key.ecc()?.verify_ecdsa(message, signature),
        }
    }
}

fn copy_out(signature: &[u8], out: &mut [u8]) -> Result<usize> {
    require_capacity("signature", out.len(), signature.len())?;
    out[..signature.len()].copy_from_slice(signature);
    Ok(signature.len())
}

fn pkcs1v15(hash: HashAlgorithm) -> Pkcs1v15Sign {
    match hash {
        HashAlgorithm::Sha1 => Pkcs1v15Sign::new::<Sha1>(),
        HashAlgorithm::Sha256 => Pkcs1v15Sign::new::<Sha256>(),
        HashAlgorithm::Sha384 => Pkcs1v15Sign::new::<Sha384>(),
        HashAlgorithm::Sha512 => Pkcs1v15Sign::new::<Sha512>(),
    }
}

fn pss(hash: HashAlgorithm) -> Pss {
    match hash {
        HashAlgorithm::Sha1 => Pss::new::<Sha1>(),
        HashAlgorithm::Sha256 => Pss::new::<Sha256>(),
        HashAlgorithm::Sha384 => Pss::new::<Sha384>(),
        HashAlgorithm::Sha512 => Pss::new::<Sha512>(),
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::keys::{EccKey, SymmetricKey};
    use crate::crypto::test_support::rsa_2048;

    fn hmac_key(len: usize) -> SecretKey {
        SecretKey::from(SymmetricKey::from_bytes(&vec![0x0b; len]))
    }

    #[test]
    fn test_hs256_known_answer() {
        let sig = SignatureAlgorithm::HS256
            .sign(&hmac_key(32), b"hello jose")
            .unwrap();
        assert_eq!(
            hex::encode(sig),
            "9b3665ffe47a3dd02a1831934a71eb52d30642b33bfbe00c799d52b68bea84a1"
        );
    }

    #[test]
    fn test_hmac_sign_verify() {
        for (alg, len) in [
            (SignatureAlgorithm::HS256, 32),
            (SignatureAlgorithm::HS384, 48),
            (SignatureAlgorithm::HS512, 64),
        ] {
            let key = hmac_key(len + 1);
            let sig = alg.sign(&key, b"payload").unwrap();
            assert_eq!(sig.len(), alg.signature_size_bytes(key.key_size_bits()));
            assert!(alg.verify(&key, b"payload", &sig).unwrap());
            assert!(!alg.verify(&key, b"payloaD", &sig).unwrap());
            assert!(!alg.verify(&key, b"payload", &sig[..sig.len() - 1]).unwrap());
        }
    }

    #[test]
    fn test_hmac_tampered_signature() {
        let key = hmac_key(32);
        let mut sig = SignatureAlgorithm::HS256.sign(&key, b"msg").unwrap();
        sig[5] ^= 0x01;
        assert!(!SignatureAlgorithm::HS256.verify(&key, b"msg", &sig).unwrap());
    }

    #[test]
    fn test_hmac_short_key_rejected() {
        let result = SignatureAlgorithm::HS512.sign(&hmac_key(63), b"msg");
        assert!(matches!(result, Err(Error::SizeInvalid(_))));
    }

    #[test]
    fn test_short_output_buffer() {
        let mut out = [0u8; 31];
        let result = SignatureAlgorithm::HS256.try_sign(&hmac_key(32), b"msg", &mut out);
        assert!(matches!(result, Err(Error::SizeInvalid(_))));
    }

    #[test]
    fn test_rsa_sign_verify() {
        let key = SecretKey::from(rsa_2048().clone());
        let public = SecretKey::from(rsa_2048().to_public());

        for alg in [
            SignatureAlgorithm::RS256,
            SignatureAlgorithm::RS512,
            SignatureAlgorithm::PS256,
            SignatureAlgorithm::PS384,
        ] {
            let sig = alg.sign(&key, b"token body").unwrap();
            assert_eq!(sig.len(), 256);
            assert_eq!(alg.signature_size_bytes(2048), 256);
            assert!(alg.verify(&public, b"token body", &sig).unwrap());
            assert!(!alg.verify(&public, b"token bodY", &sig).unwrap());
        }
    }

    #[test]
    fn test_rsa_public_key_cannot_sign() {
        let public = SecretKey::from(rsa_2048().to_public());
        let result = SignatureAlgorithm::RS256.sign(&public, b"x");
        assert!(matches!(result, Err(Error::InvalidKey(_))));
    }

    #[test]
    fn test_rsa_pkcs1_is_deterministic() {
        let key = SecretKey::from(rsa_2048().clone());
        let a = SignatureAlgorithm::RS256.sign(&key, b"same").unwrap();
        let b = SignatureAlgorithm::RS256.sign(&key, b"same").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_ecdsa_sign_verify() {
        for (alg, curve, size) in [
            (SignatureAlgorithm::ES256, EccCurve::P256, 64),
            (SignatureAlgorithm::ES384, EccCurve::P384, 96),
            (SignatureAlgorithm::ES512, EccCurve::P521, 132),
        ] {
            let pair = EccKey::generate(curve);
            let key = SecretKey::from(pair.clone());
            let public = SecretKey::from(pair.to_public());

            let sig = alg.sign(&key, b"claims").unwrap();
            assert_eq!(sig.len(), size);
            assert_eq!(alg.signature_size_bytes(curve.key_size_bits()), size);
            assert!(alg.verify(&public, b"claims", &sig).unwrap());
            assert!(!alg.verify(&public, b"claimz", &sig).unwrap());
            assert!(!alg.verify(&public, b"claims", &sig[1..]).unwrap());
        }
    }

    #[test]
    fn test_ecdsa_wrong_curve_rejected() {
        let key = SecretKey::from(EccKey::generate(EccCurve::P384));
        let result = SignatureAlgorithm::ES256.sign(&key, b"x");
        assert!(matches!(result, Err(Error::SizeInvalid(_))));
    }

    #[test]
    fn test_key_type_mismatch() {
        let key = hmac_key(32);
        let result = SignatureAlgorithm::ES256.verify(&key, b"x", &[0u8; 64]);
        assert!(matches!(result, Err(Error::InvalidKey(_))));
    }

    #[test]
    fn test_rsa_legal_sizes() {
        let sizes = SignatureAlgorithm::PS512.descriptor().legal_key_sizes;
        assert!(sizes.contains(2048));
        assert!(sizes.contains(3072));
        assert!(sizes.contains(16384));
        assert!(!sizes.contains(2047));
        assert!(!sizes.contains(1024));
        assert!(!sizes.contains(16392));
    }
}
