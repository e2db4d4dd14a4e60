//! # Secret Key Model
//!
//! Every algorithm in the engine operates on a [`SecretKey`]. A key is
//! immutable once built and reports its type and bit length so the
//! algorithm descriptors can gate it before any math happens.
//!
//! ## Key Types
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          SECRET KEY VARIANTS                            │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  SecretKey::Symmetric(SymmetricKey)                                    │
//! │  ├── raw octets (zeroized on drop)                                     │
//! │  ├── size = 8 × len                                                    │
//! │  └── HS*, A*CBC-HS*, A*GCM, dir, A*KW, A*GCMKW, PBES2 (password)       │
//! │                                                                         │
//! │  SecretKey::Rsa(RsaKey)                                                │
//! │  ├── private key (optional) + public key                               │
//! │  ├── size = modulus bits                                               │
//! │  └── RS*, PS*, RSA1_5, RSA-OAEP, RSA-OAEP-256                          │
//! │                                                                         │
//! │  SecretKey::Ecc(EccKey)                                                │
//! │  ├── curve, private scalar (optional, zeroized), SEC1 public point     │
//! │  ├── size = 256 / 384 / 521                                            │
//! │  └── ES*, ECDH-ES, ECDH-ES+A*KW                                        │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Security
//!
//! - Symmetric bytes and ECC scalars are wiped when the key is dropped
//! - `Debug` output never includes key material
//! - RSA keys cannot be exported as raw bytes

use std::fmt;

use p256::ecdsa::signature::{Signer, Verifier};
use p256::elliptic_curve::sec1::ToEncodedPoint;
use rand::rngs::OsRng;
use rand::RngCore;
use rsa::traits::PublicKeyParts;
use rsa::{RsaPrivateKey, RsaPublicKey};
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use crate::error::{Error, Result};

/// Dispatch on a curve with the matching RustCrypto crate bound to `$krate`.
///
/// `p256`, `p384` and `p521` expose the same surface (`SecretKey`,
/// `PublicKey`, `ecdh`, `ecdsa`), so each arm shares one body.
macro_rules! with_curve {
    ($curve:expr, $krate:ident => $body:expr) => {
        match $curve {
            EccCurve::P256 => {
                use p256 as $krate;
                $body
            }
            EccCurve::P384 => {
                use p384 as $krate;
                $body
            }
            EccCurve::P521 => {
                use p521 as $krate;
                $body
            }
        }
    };
}

// ============================================================================
// KEY TYPES & CURVES
// ============================================================================

/// The family of a key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyType {
    /// Raw symmetric octets
    Symmetric,
    /// RSA key pair or public key
    Rsa,
    /// NIST elliptic-curve key
    Ecc,
}

impl KeyType {
    /// Lower-case name used in logs and errors
    pub fn as_str(&self) -> &'static str {
        match self {
            KeyType::Symmetric => "symmetric",
            KeyType::Rsa => "rsa",
            KeyType::Ecc => "ecc",
        }
    }
}

impl fmt::Display for KeyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// NIST curves used by ES* and ECDH-ES
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EccCurve {
    /// P-256 (secp256r1)
    P256,
    /// P-384 (secp384r1)
    P384,
    /// P-521 (secp521r1)
    P521,
}

impl EccCurve {
    /// The JWK `crv` name
    pub const fn name(&self) -> &'static str {
        match self {
            EccCurve::P256 => "P-256",
            EccCurve::P384 => "P-384",
            EccCurve::P521 => "P-521",
        }
    }

    /// Field size in bits
    pub const fn key_size_bits(&self) -> usize {
        match self {
            EccCurve::P256 => 256,
            EccCurve::P384 => 384,
            EccCurve::P521 => 521,
        }
    }

    /// Length of a scalar or coordinate in bytes
    pub const fn field_bytes(&self) -> usize {
        (self.key_size_bits() + 7) / 8
    }

    /// Look a curve up by its JWK `crv` name
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "P-256" => Some(EccCurve::P256),
            "P-384" => Some(EccCurve::P384),
            "P-521" => Some(EccCurve::P521),
            _ => None,
        }
    }
}

// ============================================================================
// SECRET KEY
// ============================================================================

/// Opaque key material handed to the engine
#[derive(Clone)]
pub enum SecretKey {
    /// Symmetric octets
    Symmetric(SymmetricKey),
    /// RSA key
    Rsa(RsaKey),
    /// Elliptic-curve key
    Ecc(EccKey),
}

impl SecretKey {
    /// The family of this key
    pub fn key_type(&self) -> KeyType {
        match self {
            SecretKey::Symmetric(_) => KeyType::Symmetric,
            SecretKey::Rsa(_) => KeyType::Rsa,
            SecretKey::Ecc(_) => KeyType::Ecc,
        }
    }

    /// Reported size of the key in bits
    pub fn key_size_bits(&self) -> usize {
        match self {
            SecretKey::Symmetric(key) => key.key_size_bits(),
            SecretKey::Rsa(key) => key.key_size_bits(),
            SecretKey::Ecc(key) => key.curve().key_size_bits(),
        }
    }

    /// Copy the raw key bytes into `out`, returning the number of bytes written
    ///
    /// Symmetric keys export their octets and ECC keys their private scalar.
    /// RSA keys and public-only ECC keys fail with [`Error::InvalidKey`].
    ///
    /// # Panics
    ///
    /// Panics if `out` is shorter than the key's byte length.
    pub fn export_into(&self, out: &mut [u8]) -> Result<usize> {
        let bytes: &[u8] = match self {
            SecretKey::Symmetric(key) => key.as_bytes(),
            SecretKey::Ecc(key) => key.private_scalar()?,
            SecretKey::Rsa(_) => {
                return Err(Error::InvalidKey(
                    "RSA keys cannot be exported as raw bytes".into(),
                ))
            }
        };
        assert!(
            out.len() >= bytes.len(),
            "export buffer holds {} bytes, key needs {}",
            out.len(),
            bytes.len()
        );
        out[..bytes.len()].copy_from_slice(bytes);
        Ok(bytes.len())
    }

    /// Export the raw key bytes into a buffer that is wiped on drop
    pub fn export(&self) -> Result<Zeroizing<Vec<u8>>> {
        let mut out = Zeroizing::new(vec![0u8; (self.key_size_bits() + 7) / 8]);
        let written = self.export_into(&mut out)?;
        out.truncate(written);
        Ok(out)
    }

    /// The symmetric key, if this is one
    pub fn as_symmetric(&self) -> Option<&SymmetricKey> {
        match self {
            SecretKey::Symmetric(key) => Some(key),
            _ => None,
        }
    }

    /// The RSA key, if this is one
    pub fn as_rsa(&self) -> Option<&RsaKey> {
        match self {
            SecretKey::Rsa(key) => Some(key),
            _ => None,
        }
    }

    /// The ECC key, if this is one
    pub fn as_ecc(&self) -> Option<&EccKey> {
        match self {
            SecretKey::Ecc(key) => Some(key),
            _ => None,
        }
    }

    pub(crate) fn symmetric_bytes(&self) -> Result<&[u8]> {
        self.as_symmetric()
            .map(SymmetricKey::as_bytes)
            .ok_or_else(|| wrong_type(KeyType::Symmetric, self.key_type()))
    }

    pub(crate) fn rsa(&self) -> Result<&RsaKey> {
        self.as_rsa()
            .ok_or_else(|| wrong_type(KeyType::Rsa, self.key_type()))
    }

    pub(crate) fn ecc(&self) -> Result<&EccKey> {
        self.as_ecc()
            .ok_or_else(|| wrong_type(KeyType::Ecc, self.key_type()))
    }
}

fn wrong_type(expected: KeyType, actual: KeyType) -> Error {
    Error::InvalidKey(format!("expected a {expected} key, got {actual}"))
}

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretKey")
            .field("type", &self.key_type())
            .field("bits", &self.key_size_bits())
            .finish_non_exhaustive()
    }
}

impl From<SymmetricKey> for SecretKey {
    fn from(key: SymmetricKey) -> Self {
        SecretKey::Symmetric(key)
    }
}

impl From<RsaKey> for SecretKey {
    fn from(key: RsaKey) -> Self {
        SecretKey::Rsa(key)
    }
}

impl From<EccKey> for SecretKey {
    fn from(key: EccKey) -> Self {
        SecretKey::Ecc(key)
    }
}

// ============================================================================
// SYMMETRIC KEYS
// ============================================================================

/// Raw symmetric key octets
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SymmetricKey {
    bytes: Vec<u8>,
}

impl SymmetricKey {
    /// Wrap existing key octets
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self {
            bytes: bytes.to_vec(),
        }
    }

    /// Generate `size_bits / 8` random bytes with the OS CSPRNG
    pub fn generate(size_bits: usize) -> Self {
        let mut bytes = vec![0u8; size_bits / 8];
        OsRng.fill_bytes(&mut bytes);
        Self { bytes }
    }

    /// Size in bits
    pub fn key_size_bits(&self) -> usize {
        self.bytes.len() * 8
    }

    /// Borrow the key octets
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

// ============================================================================
// RSA KEYS
// ============================================================================

/// An RSA key pair, or a public key on its own
#[derive(Clone)]
pub struct RsaKey {
    private: Option<RsaPrivateKey>,
    public: RsaPublicKey,
}

impl RsaKey {
    /// Generate a fresh key pair with a modulus of `bits` bits
    pub fn generate(bits: usize) -> Result<Self> {
        let private = RsaPrivateKey::new(&mut OsRng, bits)
            .map_err(|e| Error::InvalidKey(format!("RSA key generation failed: {e}")))?;
        Ok(Self::from_private(private))
    }

    /// Wrap a private key
    pub fn from_private(private: RsaPrivateKey) -> Self {
        let public = private.to_public_key();
        Self {
            private: Some(private),
            public,
        }
    }

    /// Wrap a public key (verify and encrypt only)
    pub fn from_public(public: RsaPublicKey) -> Self {
        Self {
            private: None,
            public,
        }
    }

    /// Modulus length in bits
    pub fn key_size_bits(&self) -> usize {
        self.public.n().bits()
    }

    /// Modulus length in bytes
    pub fn modulus_bytes(&self) -> usize {
        self.public.size()
    }

    /// Whether the private half is present
    pub fn has_private(&self) -> bool {
        self.private.is_some()
    }

    /// A public-only copy of this key
    pub fn to_public(&self) -> Self {
        Self::from_public(self.public.clone())
    }

    pub(crate) fn public_key(&self) -> &RsaPublicKey {
        &self.public
    }

    pub(crate) fn private_key(&self) -> Result<&RsaPrivateKey> {
        self.private
            .as_ref()
            .ok_or_else(|| Error::InvalidKey("RSA private key required".into()))
    }
}

// ============================================================================
// ELLIPTIC-CURVE KEYS
// ============================================================================

/// A NIST curve key with an optional private scalar
#[derive(Clone)]
pub struct EccKey {
    curve: EccCurve,
    d: Option<Zeroizing<Vec<u8>>>,
    /// SEC1 uncompressed point: `0x04 ‖ x ‖ y`
    public: Vec<u8>,
}

impl EccKey {
    /// Generate a fresh key pair on `curve`
    pub fn generate(curve: EccCurve) -> Self {
        let (d, public) = with_curve!(curve, c => {
            let secret = c::SecretKey::random(&mut OsRng);
            let public = secret.public_key().to_encoded_point(false).as_bytes().to_vec();
            (Zeroizing::new(secret.to_bytes().to_vec()), public)
        });
        Self {
            curve,
            d: Some(d),
            public,
        }
    }

    /// Build a key pair from a big-endian private scalar
    pub fn from_private_scalar(curve: EccCurve, d: &[u8]) -> Result<Self> {
        if d.len() != curve.field_bytes() {
            return Err(Error::InvalidKey(format!(
                "{} private scalar must be {} bytes",
                curve.name(),
                curve.field_bytes()
            )));
        }
        let public = with_curve!(curve, c => {
            let secret = c::SecretKey::from_slice(d)
                .map_err(|_| Error::InvalidKey(format!("invalid {} scalar", curve.name())))?;
            secret.public_key().to_encoded_point(false).as_bytes().to_vec()
        });
        Ok(Self {
            curve,
            d: Some(Zeroizing::new(d.to_vec())),
            public,
        })
    }

    /// Build a public key from a SEC1 encoded point (compressed or not)
    pub fn from_public_sec1(curve: EccCurve, sec1: &[u8]) -> Result<Self> {
        let public = with_curve!(curve, c => {
            c::PublicKey::from_sec1_bytes(sec1)
                .map_err(|_| Error::InvalidKey(format!("invalid {} point", curve.name())))?
                .to_encoded_point(false)
                .as_bytes()
                .to_vec()
        });
        Ok(Self {
            curve,
            d: None,
            public,
        })
    }

    /// Build a public key from its affine coordinates (JWK `x` and `y`)
    pub fn from_public_coordinates(curve: EccCurve, x: &[u8], y: &[u8]) -> Result<Self> {
        let n = curve.field_bytes();
        if x.len() != n || y.len() != n {
            return Err(Error::InvalidKey(format!(
                "{} coordinates must be {n} bytes",
                curve.name()
            )));
        }
        let mut sec1 = Vec::with_capacity(1 + 2 * n);
        sec1.push(0x04);
        sec1.extend_from_slice(x);
        sec1.extend_from_slice(y);
        Self::from_public_sec1(curve, &sec1)
    }

    /// The curve this key lives on
    pub fn curve(&self) -> EccCurve {
        self.curve
    }

    /// Whether the private scalar is present
    pub fn has_private(&self) -> bool {
        self.d.is_some()
    }

    /// The SEC1 uncompressed public point
    pub fn public_sec1(&self) -> &[u8] {
        &self.public
    }

    /// The affine `x` coordinate
    pub fn x(&self) -> &[u8] {
        let n = self.curve.field_bytes();
        &self.public[1..1 + n]
    }

    /// The affine `y` coordinate
    pub fn y(&self) -> &[u8] {
        let n = self.curve.field_bytes();
        &self.public[1 + n..]
    }

    /// A public-only copy of this key
    pub fn to_public(&self) -> Self {
        Self {
            curve: self.curve,
            d: None,
            public: self.public.clone(),
        }
    }

    pub(crate) fn private_scalar(&self) -> Result<&[u8]> {
        self.d
            .as_ref()
            .map(|d| d.as_slice())
            .ok_or_else(|| Error::InvalidKey("ECC private key required".into()))
    }

    /// Raw ECDH shared secret (the x coordinate of `d · Q`)
    pub(crate) fn diffie_hellman(&self, peer: &EccKey) -> Result<Zeroizing<Vec<u8>>> {
        if peer.curve != self.curve {
            return Err(Error::InvalidKey(format!(
                "curve mismatch: {} vs {}",
                self.curve.name(),
                peer.curve.name()
            )));
        }
        let d = self.private_scalar()?;
        let shared = with_curve!(self.curve, c => {
            let secret = c::SecretKey::from_slice(d)
                .map_err(|_| Error::KeyDerivationFailed("invalid private scalar".into()))?;
            let public = c::PublicKey::from_sec1_bytes(&peer.public)
                .map_err(|_| Error::KeyDerivationFailed("invalid peer point".into()))?;
            let shared = c::ecdh::diffie_hellman(secret.to_nonzero_scalar(), public.as_affine());
            Zeroizing::new(shared.raw_secret_bytes().to_vec())
        });
        Ok(shared)
    }

    /// ECDSA signature in fixed-width `r ‖ s` form
    pub(crate) fn sign_ecdsa(&self, message: &[u8]) -> Result<Vec<u8>> {
        let d = self.private_scalar()?;
        let signature = with_curve!(self.curve, c => {
            let signing = c::ecdsa::SigningKey::from_slice(d)
                .map_err(|_| Error::SigningFailed("invalid private scalar".into()))?;
            let signature: c::ecdsa::Signature = signing
                .try_sign(message)
                .map_err(|e| Error::SigningFailed(e.to_string()))?;
            signature.to_bytes().to_vec()
        });
        Ok(signature)
    }

    /// Check a fixed-width `r ‖ s` ECDSA signature
    pub(crate) fn verify_ecdsa(&self, message: &[u8], signature: &[u8]) -> Result<bool> {
        let valid = with_curve!(self.curve, c => {
            let verifying = c::ecdsa::VerifyingKey::from_sec1_bytes(&self.public)
                .map_err(|_| Error::InvalidKey("invalid public point".into()))?;
            match c::ecdsa::Signature::from_slice(signature) {
                Ok(signature) => verifying.verify(message, &signature).is_ok(),
                Err(_) => false,
            }
        });
        Ok(valid)
    }
}

impl fmt::Debug for SymmetricKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SymmetricKey")
            .field("bits", &self.key_size_bits())
            .finish_non_exhaustive()
    }
}

impl fmt::Debug for RsaKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RsaKey")
            .field("bits", &self.key_size_bits())
            .field("private", &self.has_private())
            .finish_non_exhaustive()
    }
}

impl fmt::Debug for EccKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EccKey")
            .field("curve", &self.curve.name())
            .field("private", &self.has_private())
            .finish_non_exhaustive()
    }
}

// ============================================================================
// TESTS
// ============================================================================
