//! # Key Management Module
//!
//! JWE key-management (`alg`) algorithms from RFC 7518 §4. Each algorithm
//! either transports a caller-chosen CEK (wrapping modes) or agrees on one
//! (direct modes).
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     KEY MANAGEMENT MODES                                │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  Direct (CEK produced, encrypted key empty)                            │
//! │  ├── dir          CEK = shared symmetric key                          │
//! │  └── ECDH-ES      CEK = ConcatKDF(ECDH(epk, recipient), enc)           │
//! │                                                                         │
//! │  Wrapping (CEK supplied, encrypted key produced)                       │
//! │  ├── A*KW         RFC 3394 AES Key Wrap with the shared key            │
//! │  ├── A*GCMKW      AES-GCM, header gains `iv` and `tag`                 │
//! │  ├── ECDH-ES+A*KW AES-KW with KEK = ConcatKDF(ECDH(..), alg)           │
//! │  ├── RSA1_5       RSAES-PKCS1-v1_5                                     │
//! │  ├── RSA-OAEP*    RSAES-OAEP with SHA-1 / SHA-256                      │
//! │  └── PBES2-*      AES-KW with KEK = PBKDF2(password, alg ‖ 0 ‖ p2s)    │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every KEK, shared secret and decrypted CEK lives in a zero-on-drop buffer.

mod aes_kw;
mod ecdh;
mod pbes2;
mod rsaes;

pub use self::pbes2::{PBES2_MIN_SALT_BYTES, PBES2_SALT_BYTES};

use self::rsaes::RsaPadding;
use crate::algorithms::{AlgorithmDescriptor, AlgorithmKind};
use crate::crypto::encryption::{AeadAlgorithm, GCM_TAG_SIZE};
use crate::crypto::hash::HashAlgorithm;
use crate::crypto::keys::{EccKey, KeyType, SecretKey};
use crate::crypto::sizes::{require_capacity, require_len, KeySizes};
use crate::error::{Error, Result};

/// Size of the AES-KW integrity block prepended to a wrapped key
pub const AES_KW_OVERHEAD: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum KeyManagementScheme {
    Direct,
    AesKw,
    AesGcmKw,
    EcdhEs,
    EcdhEsKw { kek_bits: usize },
    Rsa(RsaPadding),
    Pbes2 {
        prf: HashAlgorithm,
        kek_bits: usize,
        max_iterations: u32,
    },
}

/// JOSE header parameters consumed or produced by key management
///
/// Only the fields a given algorithm uses are read or written.
#[derive(Debug, Clone, Default)]
pub struct KeyWrapHeader {
    /// Content-encryption algorithm (`enc`); names the ECDH-ES direct KDF output
    pub enc: Option<AeadAlgorithm>,
    /// Override for the ECDH-ES direct output length in bits
    pub key_bit_length: Option<usize>,
    /// Agreement PartyUInfo (`apu`), already base64url-decoded
    pub apu: Vec<u8>,
    /// Agreement PartyVInfo (`apv`), already base64url-decoded
    pub apv: Vec<u8>,
    /// Ephemeral public key (`epk`); may carry a private scalar on wrap
    pub epk: Option<EccKey>,
    /// AES-GCM key wrap IV (`iv`)
    pub iv: Vec<u8>,
    /// AES-GCM key wrap tag (`tag`)
    pub tag: Vec<u8>,
    /// PBES2 salt input (`p2s`)
    pub p2s: Vec<u8>,
    /// PBES2 iteration count (`p2c`)
    pub p2c: Option<u32>,
}

impl KeyWrapHeader {
    /// A header for content encrypted with `enc`
    pub fn for_enc(enc: AeadAlgorithm) -> Self {
        Self {
            enc: Some(enc),
            ..Self::default()
        }
    }

    /// Set the ECDH-ES agreement party information
    pub fn with_party_info(mut self, apu: &[u8], apv: &[u8]) -> Self {
        self.apu = apu.to_vec();
        self.apv = apv.to_vec();
        self
    }

    /// Set the PBES2 salt input and iteration count
    pub fn with_pbes2(mut self, p2s: &[u8], p2c: u32) -> Self {
        self.p2s = p2s.to_vec();
        self.p2c = Some(p2c);
        self
    }

    /// Supply the ephemeral key pair used by ECDH-ES on wrap
    pub fn with_ephemeral_key(mut self, epk: EccKey) -> Self {
        self.epk = Some(epk);
        self
    }
}

/// A JWE key-management algorithm
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyManagementAlgorithm {
    descriptor: AlgorithmDescriptor,
    scheme: KeyManagementScheme,
}

impl KeyManagementAlgorithm {
    /// Direct use of a shared symmetric key as the CEK
    pub const DIR: Self = Self::new(
        "dir",
        KeyType::Symmetric,
        KeySizes::new(128, 512, 64),
        KeyManagementScheme::Direct,
    );
    /// AES Key Wrap with a 128-bit key
    pub const A128KW: Self = Self::aes_kw("A128KW", 128);
    /// AES Key Wrap with a 192-bit key
    pub const A192KW: Self = Self::aes_kw("A192KW", 192);
    /// AES Key Wrap with a 256-bit key
    pub const A256KW: Self = Self::aes_kw("A256KW", 256);
    /// AES-GCM key wrap with a 128-bit key
    pub const A128GCMKW: Self = Self::aes_gcm_kw("A128GCMKW", 128);
    /// AES-GCM key wrap with a 192-bit key
    pub const A192GCMKW: Self = Self::aes_gcm_kw("A192GCMKW", 192);
    /// AES-GCM key wrap with a 256-bit key
    pub const A256GCMKW: Self = Self::aes_gcm_kw("A256GCMKW", 256);
    /// ECDH-ES direct key agreement
    pub const ECDH_ES: Self = Self::new(
        "ECDH-ES",
        KeyType::Ecc,
        ECC_KEY_SIZES,
        KeyManagementScheme::EcdhEs,
    );
    /// ECDH-ES with AES-128 key wrap
    pub const ECDH_ES_A128KW: Self = Self::ecdh_es_kw("ECDH-ES+A128KW", 128);
    /// ECDH-ES with AES-192 key wrap
    pub const ECDH_ES_A192KW: Self = Self::ecdh_es_kw("ECDH-ES+A192KW", 192);
    /// ECDH-ES with AES-256 key wrap
    pub const ECDH_ES_A256KW: Self = Self::ecdh_es_kw("ECDH-ES+A256KW", 256);
    /// RSAES-PKCS1-v1_5
    pub const RSA1_5: Self = Self::rsa("RSA1_5", RsaPadding::Pkcs1v15);
    /// RSAES-OAEP with SHA-1 and MGF1-SHA-1
    pub const RSA_OAEP: Self = Self::rsa("RSA-OAEP", RsaPadding::OaepSha1);
    /// RSAES-OAEP with SHA-256 and MGF1-SHA-256
    pub const RSA_OAEP_256: Self = Self::rsa("RSA-OAEP-256", RsaPadding::OaepSha256);
    /// PBES2 with HMAC-SHA-256 and AES-128 key wrap
    pub const PBES2_HS256_A128KW: Self =
        Self::pbes2("PBES2-HS256+A128KW", HashAlgorithm::Sha256, 128, 310_000);
    /// PBES2 with HMAC-SHA-384 and AES-192 key wrap
    pub const PBES2_HS384_A192KW: Self =
        Self::pbes2("PBES2-HS384+A192KW", HashAlgorithm::Sha384, 192, 250_000);
    /// PBES2 with HMAC-SHA-512 and AES-256 key wrap
    pub const PBES2_HS512_A256KW: Self =
        Self::pbes2("PBES2-HS512+A256KW", HashAlgorithm::Sha512, 256, 120_000);

    /// Every key-management algorithm, in registration order
    pub const ALL: [Self; 17] = [
        Self::DIR,
        Self::A128KW,
        Self::A192KW,
        Self::A256KW,
        Self::A128GCMKW,
        Self::A192GCMKW,
        Self::A256GCMKW,
        Self::ECDH_ES,
        Self::ECDH_ES_A128KW,
        Self::ECDH_ES_A192KW,
        Self::ECDH_ES_A256KW,
        Self::RSA1_5,
        Self::RSA_OAEP,
        Self::RSA_OAEP_256,
        Self::PBES2_HS256_A128KW,
        Self::PBES2_HS384_A192KW,
        Self::PBES2_HS512_A256KW,
    ];

    const fn new(
        code: &'static str,
        key_type: KeyType,
        sizes: KeySizes,
        scheme: KeyManagementScheme,
    ) -> Self {
        Self {
            descriptor: AlgorithmDescriptor::new(
                code,
                AlgorithmKind::KeyManagement,
                Some(key_type),
                sizes,
            ),
            scheme,
        }
    }

    const fn aes_kw(code: &'static str, bits: usize) -> Self {
        Self::new(
            code,
            KeyType::Symmetric,
            KeySizes::exactly(bits),
            KeyManagementScheme::AesKw,
        )
    }

    const fn aes_gcm_kw(code: &'static str, bits: usize) -> Self {
        Self::new(
            code,
            KeyType::Symmetric,
            KeySizes::exactly(bits),
            KeyManagementScheme::AesGcmKw,
        )
    }

    const fn ecdh_es_kw(code: &'static str, kek_bits: usize) -> Self {
        Self::new(
            code,
            KeyType::Ecc,
            ECC_KEY_SIZES,
            KeyManagementScheme::EcdhEsKw { kek_bits },
        )
    }

    const fn rsa(code: &'static str, padding: RsaPadding) -> Self {
        Self::new(code, KeyType::Rsa, KeySizes::ANY, KeyManagementScheme::Rsa(padding))
    }

    const fn pbes2(
        code: &'static str,
        prf: HashAlgorithm,
        kek_bits: usize,
        max_iterations: u32,
    ) -> Self {
        Self::new(
            code,
            KeyType::Symmetric,
            KeySizes::ANY,
            KeyManagementScheme::Pbes2 {
                prf,
                kek_bits,
                max_iterations,
            },
        )
    }

    /// A copy of a PBES2 algorithm with a different iteration ceiling
    ///
    /// Other algorithms are returned unchanged.
    pub const fn with_max_iterations(self, limit: u32) -> Self {
        match self.scheme {
            KeyManagementScheme::Pbes2 { prf, kek_bits, .. } => Self {
                descriptor: self.descriptor,
                scheme: KeyManagementScheme::Pbes2 {
                    prf,
                    kek_bits,
                    max_iterations: limit,
                },
            },
            _ => self,
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

    /// Whether this algorithm produces the CEK instead of transporting one
    pub fn derives_cek(&self) -> bool {
        matches!(
            self.scheme,
            KeyManagementScheme::Direct | KeyManagementScheme::EcdhEs
        )
    }

    /// The PBES2 iteration ceiling, if this is a PBES2 algorithm
    pub fn max_iterations(&self) -> Option<u32> {
        match self.scheme {
            KeyManagementScheme::Pbes2 { max_iterations, .. } => Some(max_iterations),
            _ => None,
        }
    }

    /// Size of the encrypted key produced for a CEK of `cek_len` bytes
    pub fn wrapped_key_size_bytes(&self, key: &SecretKey, cek_len: usize) -> Result<usize> {
        Ok(match self.scheme {
            KeyManagementScheme::Direct | KeyManagementScheme::EcdhEs => 0,
            KeyManagementScheme::AesKw
            | KeyManagementScheme::EcdhEsKw { .. }
            | KeyManagementScheme::Pbes2 { .. } => cek_len + AES_KW_OVERHEAD,
            KeyManagementScheme::AesGcmKw => cek_len,
            KeyManagementScheme::Rsa(_) => key.rsa()?.modulus_bytes(),
        })
    }

    /// Wrap (or agree on) a content-encryption key
    ///
    /// For wrapping modes `cek` is read and the encrypted key is written to
    /// `wrapped_out`; the return value is its length. For direct modes
    /// (`dir`, `ECDH-ES`) `cek` is filled with the agreed key and `0` is
    /// returned. Header parameters the algorithm produces (`epk`, `iv`,
    /// `tag`, `p2s`, `p2c`) are written into `header` only when wrapping
    /// succeeds.
    pub fn wrap_key(
        &self,
        key: &SecretKey,
        header: &mut KeyWrapHeader,
        cek: &mut [u8],
        wrapped_out: &mut [u8],
    ) -> Result<usize> {
        self.descriptor.check_key(key)?;

        match self.scheme {
            KeyManagementScheme::Direct => {
                let shared = key.symmetric_bytes()?;
                check_enc_matches(header, shared.len())?;
                require_len("content encryption key", cek.len(), shared.len())?;
                cek.copy_from_slice(shared);
                Ok(0)
            }
            KeyManagementScheme::AesKw => {
                aes_kw::wrap(key.symmetric_bytes()?, cek, wrapped_out)
            }
            KeyManagementScheme::AesGcmKw => {
                let needed = self.wrapped_key_size_bytes(key, cek.len())?;
                require_capacity("wrapped key", wrapped_out.len(), needed)?;
                aes_kw::gcm_wrap(key.symmetric_bytes()?, header, cek, wrapped_out)
            }
            KeyManagementScheme::EcdhEs => {
                let (algorithm_id, key_bits) = direct_agreement_params(header)?;
                require_len("content encryption key", cek.len(), key_bits / 8)?;
                let (derived, epk) =
                    ecdh::agree_as_sender(key.ecc()?, header, algorithm_id.as_bytes(), key_bits)?;
                cek.copy_from_slice(&derived);
                header.epk = Some(epk);
                Ok(0)
            }
            KeyManagementScheme::EcdhEsKw { kek_bits } => {
                let (kek, epk) = ecdh::agree_as_sender(
                    key.ecc()?,
                    header,
                    self.code().as_bytes(),
                    kek_bits,
                )?;
                let written = aes_kw::wrap(&kek, cek, wrapped_out)?;
                header.epk = Some(epk);
                Ok(written)
            }
            KeyManagementScheme::Rsa(padding) => {
                let rsa_key = key.rsa()?;
                require_capacity("wrapped key", wrapped_out.len(), rsa_key.modulus_bytes())?;
                rsaes::encrypt(rsa_key, padding, cek, wrapped_out)
            }
            KeyManagementScheme::Pbes2 {
                prf,
                kek_bits,
                max_iterations,
            } => {
                let params = pbes2::prepare_params(header, max_iterations);
                let kek = pbes2::derive_kek(
                    self.code(),
                    prf,
                    kek_bits,
                    max_iterations,
                    key.symmetric_bytes()?,
                    &params,
                )?;
                let written = aes_kw::wrap(&kek, cek, wrapped_out)?;
                header.p2s = params.p2s;
                header.p2c = params.p2c;
                Ok(written)
            }
        }
    }

    /// Recover a content-encryption key
    ///
    /// Writes the CEK to `cek_out` and returns its length.
    pub fn unwrap_key(
        &self,
        key: &SecretKey,
        header: &KeyWrapHeader,
        wrapped: &[u8],
        cek_out: &mut [u8],
    ) -> Result<usize> {
        self.descriptor.check_key(key)?;

        match self.scheme {
            KeyManagementScheme::Direct => {
                require_empty(self.code(), wrapped)?;
                let shared = key.symmetric_bytes()?;
                check_enc_matches(header, shared.len())?;
                copy_cek(shared, cek_out)
            }
            KeyManagementScheme::AesKw => aes_kw::unwrap(key.symmetric_bytes()?, wrapped, cek_out),
            KeyManagementScheme::AesGcmKw => {
                if header.tag.len() != GCM_TAG_SIZE {
                    return Err(Error::IntegrityViolation);
                }
                aes_kw::gcm_unwrap(key.symmetric_bytes()?, header, wrapped, cek_out)
            }
            KeyManagementScheme::EcdhEs => {
                require_empty(self.code(), wrapped)?;
                let (algorithm_id, key_bits) = direct_agreement_params(header)?;
                let derived = ecdh::agree_as_recipient(
                    key.ecc()?,
                    header,
                    algorithm_id.as_bytes(),
                    key_bits,
                )?;
                copy_cek(&derived, cek_out)
            }
            KeyManagementScheme::EcdhEsKw { kek_bits } => {
                let kek = ecdh::agree_as_recipient(
                    key.ecc()?,
                    header,
                    self.code().as_bytes(),
                    kek_bits,
                )?;
                aes_kw::unwrap(&kek, wrapped, cek_out)
            }
            KeyManagementScheme::Rsa(padding) => rsaes::decrypt(key.rsa()?, padding, wrapped, cek_out),
            KeyManagementScheme::Pbes2 {
                prf,
                kek_bits,
                max_iterations,
            } => {
                let kek = pbes2::derive_kek(
                    self.code(),
                    prf,
                    kek_bits,
                    max_iterations,
                    key.symmetric_bytes()?,
                    header,
                )?;
                aes_kw::unwrap(&kek, wrapped, cek_out)
            }
        }
    }
}

/// Legal sizes for ECDH-ES keys: the P-256, P-384 and P-521 field sizes
const ECC_KEY_SIZES: KeySizes = KeySizes::new(256, 521, 1);

/// AlgorithmID and output length for ECDH-ES in direct mode
fn direct_agreement_params(header: &KeyWrapHeader) -> Result<(&'static str, usize)> {
    let enc = header.enc.ok_or_else(|| {
        Error::UnsupportedConfiguration("ECDH-ES requires the enc header parameter".into())
    })?;
    let key_bits = header.key_bit_length.unwrap_or_else(|| enc.cek_size_bits());
    Ok((enc.code(), key_bits))
}

fn check_enc_matches(header: &KeyWrapHeader, key_len: usize) -> Result<()> {
    match header.enc {
        Some(enc) if enc.cek_size_bits() != key_len * 8 => Err(Error::SizeInvalid(format!(
            "{} needs a {}-bit key, dir key is {} bits",
            enc.code(),
            enc.cek_size_bits(),
            key_len * 8
        ))),
        _ => Ok(()),
    }
}

fn require_empty(code: &str, wrapped: &[u8]) -> Result<()> {
    if wrapped.is_empty() {
        Ok(())
    } else {
        Err(Error::UnsupportedConfiguration(format!(
            "{code} expects an empty encrypted key"
        )))
    }
}

fn copy_cek(cek: &[u8], out: &mut [u8]) -> Result<usize> {
    require_capacity("content encryption key", out.len(), cek.len())?;
    out[..cek.len()].copy_from_slice(cek);
    Ok(cek.len())
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::keys::{EccCurve, SymmetricKey};
    use crate::crypto::test_support::rsa_2048;

    fn symmetric(len: usize) -> SecretKey {
        SecretKey::from(SymmetricKey::generate(len * 8))
    }

    fn round_trip(alg: KeyManagementAlgorithm, wrap_key: &SecretKey, unwrap_key: &SecretKey) {
        let enc = AeadAlgorithm::A256GCM;
        let mut header = KeyWrapHeader::for_enc(enc);
        let cek_len = enc.cek_size_bits() / 8;
        let mut cek: Vec<u8> = (0..cek_len as u8).collect();
        let mut wrapped = vec![0u8; alg.wrapped_key_size_bytes(wrap_key, cek_len).unwrap()];

        let n = alg.wrap_key(wrap_key, &mut header, &mut cek, &mut wrapped).unwrap();
        assert_eq!(n, wrapped.len(), "{}", alg.code());

        let mut out = vec![0u8; cek_len];
        let m = alg.unwrap_key(unwrap_key, &header, &wrapped[..n], &mut out).unwrap();
        assert_eq!(&out[..m], cek.as_slice(), "{}", alg.code());
    }

    #[test]
    fn test_round_trip_every_algorithm() {
        let shared = symmetric(32);
        round_trip(KeyManagementAlgorithm::DIR, &shared, &shared);

        for (alg, len) in [
            (KeyManagementAlgorithm::A128KW, 16),
            (KeyManagementAlgorithm::A192KW, 24),
            (KeyManagementAlgorithm::A256KW, 32),
            (KeyManagementAlgorithm::A128GCMKW, 16),
            (KeyManagementAlgorithm::A192GCMKW, 24),
            (KeyManagementAlgorithm::A256GCMKW, 32),
            (KeyManagementAlgorithm::PBES2_HS256_A128KW.with_max_iterations(2000), 12),
            (KeyManagementAlgorithm::PBES2_HS384_A192KW.with_max_iterations(2000), 9),
            (KeyManagementAlgorithm::PBES2_HS512_A256KW.with_max_iterations(2000), 40),
        ] {
            let key = symmetric(len);
            round_trip(alg, &key, &key);
        }

        for alg in [
            KeyManagementAlgorithm::ECDH_ES,
            KeyManagementAlgorithm::ECDH_ES_A128KW,
            KeyManagementAlgorithm::ECDH_ES_A192KW,
            KeyManagementAlgorithm::ECDH_ES_A256KW,
        ] {
            for curve in [EccCurve::P256, EccCurve::P384, EccCurve::P521] {
                let recipient = EccKey::generate(curve);
                round_trip(
                    alg,
                    &SecretKey::from(recipient.to_public()),
                    &SecretKey::from(recipient),
                );
            }
        }

        for alg in [
            KeyManagementAlgorithm::RSA1_5,
            KeyManagementAlgorithm::RSA_OAEP,
            KeyManagementAlgorithm::RSA_OAEP_256,
        ] {
            round_trip(
                alg,
                &SecretKey::from(rsa_2048().to_public()),
                &SecretKey::from(rsa_2048().clone()),
            );
        }
    }

    #[test]
    fn test_derives_cek() {
        assert!(KeyManagementAlgorithm::DIR.derives_cek());
        assert!(KeyManagementAlgorithm::ECDH_ES.derives_cek());
        assert!(!KeyManagementAlgorithm::ECDH_ES_A128KW.derives_cek());
        assert!(!KeyManagementAlgorithm::RSA_OAEP.derives_cek());
    }

    #[test]
    fn test_direct_fills_cek() {
        let shared = symmetric(32);
        let mut header = KeyWrapHeader::for_enc(AeadAlgorithm::A128CBC_HS256);
        let mut cek = [0u8; 32];
        let n = KeyManagementAlgorithm::DIR
            .wrap_key(&shared, &mut header, &mut cek, &mut [])
            .unwrap();
        assert_eq!(n, 0);
        assert_eq!(&cek, shared.export().unwrap().as_slice());
    }

    #[test]
    fn test_direct_rejects_mismatched_enc() {
        let shared = symmetric(32);
        let mut header = KeyWrapHeader::for_enc(AeadAlgorithm::A256CBC_HS512);
        let mut cek = [0u8; 32];
        let result = KeyManagementAlgorithm::DIR.wrap_key(&shared, &mut header, &mut cek, &mut []);
        assert!(matches!(result, Err(Error::SizeInvalid(_))));
    }

    #[test]
    fn test_direct_rejects_encrypted_key() {
        let shared = symmetric(16);
        let header = KeyWrapHeader::default();
        let mut out = [0u8; 16];
        let result = KeyManagementAlgorithm::DIR.unwrap_key(&shared, &header, &[1, 2, 3], &mut out);
        assert!(matches!(result, Err(Error::UnsupportedConfiguration(_))));
    }

    #[test]
    fn test_direct_key_sizes() {
        let sizes = KeyManagementAlgorithm::DIR.descriptor().legal_key_sizes;
        for bits in [128, 192, 256, 384, 512] {
            assert!(sizes.contains(bits));
        }
        assert!(!sizes.contains(136));
        assert!(!sizes.contains(576));
    }

    #[test]
    fn test_wrong_key_type() {
        let key = symmetric(16);
        let mut header = KeyWrapHeader::for_enc(AeadAlgorithm::A128GCM);
        let mut cek = [0u8; 16];
        let mut out = [0u8; 256];
        let result = KeyManagementAlgorithm::RSA_OAEP.wrap_key(&key, &mut header, &mut cek, &mut out);
        assert!(matches!(result, Err(Error::InvalidKey(_))));
    }

    #[test]
    fn test_wrapped_sizes() {
        let kek = symmetric(16);
        assert_eq!(
            KeyManagementAlgorithm::A128KW.wrapped_key_size_bytes(&kek, 32).unwrap(),
            40
        );
        assert_eq!(
            KeyManagementAlgorithm::A128GCMKW.wrapped_key_size_bytes(&kek, 32).unwrap(),
            32
        );
        assert_eq!(
            KeyManagementAlgorithm::DIR.wrapped_key_size_bytes(&kek, 32).unwrap(),
            0
        );
        let rsa = SecretKey::from(rsa_2048().to_public());
        assert_eq!(
            KeyManagementAlgorithm::RSA1_5.wrapped_key_size_bytes(&rsa, 32).unwrap(),
            256
        );
    }

    #[test]
    fn test_with_max_iterations() {
        let alg = KeyManagementAlgorithm::PBES2_HS256_A128KW;
        assert_eq!(alg.max_iterations(), Some(310_000));
        assert_eq!(alg.with_max_iterations(5).max_iterations(), Some(5));
        assert_eq!(KeyManagementAlgorithm::A128KW.with_max_iterations(5), KeyManagementAlgorithm::A128KW);
        assert_eq!(KeyManagementAlgorithm::A128KW.max_iterations(), None);
    }
}
