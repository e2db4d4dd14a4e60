//! # Content Encryption Module
//!
//! JWE content-encryption (`enc`) algorithms from RFC 7518 §5.
//!
//! ## AES-CBC-HMAC Composite (RFC 7518 §5.2)
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      AES_CBC_HMAC_SHA2 ENCRYPTION                       │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  CEK (N bytes)                                                         │
//! │  ┌──────────────────────┬──────────────────────┐                       │
//! │  │   MAC_KEY  (N/2)     │   ENC_KEY  (N/2)     │                       │
//! │  └──────────────────────┴──────────────────────┘                       │
//! │                                                                         │
//! │  Step 1: Encrypt                                                       │
//! │  ┌─────────────────────────────────────────────────────────────┐       │
//! │  │  C = AES-CBC(ENC_KEY, IV, PKCS#7(P))                         │       │
//! │  └─────────────────────────────────────────────────────────────┘       │
//! │                                                                         │
//! │  Step 2: Authenticate                                                  │
//! │  ┌─────────────────────────────────────────────────────────────┐       │
//! │  │  AL = BE64(bit length of A)                                  │       │
//! │  │  M  = HMAC-SHA-2(MAC_KEY, A ‖ IV ‖ C ‖ AL)                   │       │
//! │  │  T  = M[.. N/2]                                              │       │
//! │  └─────────────────────────────────────────────────────────────┘       │
//! │                                                                         │
//! │  Decryption verifies T in constant time BEFORE touching the cipher.   │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! | Code | CEK | MAC | Tag | IV |
//! |------|-----|-----|-----|----|
//! | A128CBC-HS256 | 256 bits | HMAC-SHA-256 | 16 bytes | 16 bytes |
//! | A192CBC-HS384 | 384 bits | HMAC-SHA-384 | 24 bytes | 16 bytes |
//! | A256CBC-HS512 | 512 bits | HMAC-SHA-512 | 32 bytes | 16 bytes |
//! | A128GCM | 128 bits | GHASH | 16 bytes | 12 bytes |
//! | A192GCM | 192 bits | GHASH | 16 bytes | 12 bytes |
//! | A256GCM | 256 bits | GHASH | 16 bytes | 12 bytes |
//!
//! ## Security Properties
//!
//! | Property | Guarantee |
//! |----------|-----------|
//! | Confidentiality | AES in CBC or GCM mode |
//! | Integrity | Tag covers AAD, IV and ciphertext |
//! | No padding oracle | Tag is verified before any unpadding |
//! | No partial plaintext | Output is untouched on tag failure, wiped on cipher failure |

use aes::{Aes128, Aes192, Aes256};
use aes_gcm::aead::consts::U12;
use aes_gcm::aead::{AeadInPlace, KeyInit, Nonce, Tag};
use aes_gcm::{Aes128Gcm, Aes256Gcm, AesGcm};
use cbc::cipher::block_padding::Pkcs7;
use cbc::cipher::{BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use rand::rngs::OsRng;
use rand::RngCore;
use zeroize::{Zeroize, Zeroizing};

use crate::algorithms::{AlgorithmDescriptor, AlgorithmKind};
use crate::crypto::hash::HashAlgorithm;
use crate::crypto::keys::{KeyType, SecretKey, SymmetricKey};
use crate::crypto::secret::{constant_time_eq, secret_buffer};
use crate::crypto::sizes::{require_capacity, require_len, KeySizes};
use crate::error::{Error, Result};

type Aes192Gcm = AesGcm<Aes192, U12>;

/// AES block size in bytes
pub const AES_BLOCK_SIZE: usize = 16;

/// AES-GCM nonce size in bytes (96 bits)
pub const GCM_NONCE_SIZE: usize = 12;

/// AES-GCM authentication tag size in bytes (128 bits)
pub const GCM_TAG_SIZE: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum AeadScheme {
    CbcHmac(HashAlgorithm),
    Gcm,
}

/// A JWE content-encryption algorithm
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AeadAlgorithm {
    descriptor: AlgorithmDescriptor,
    scheme: AeadScheme,
    cek_bits: usize,
    tag_bytes: usize,
}

impl AeadAlgorithm {
    /// AES-128-CBC with HMAC-SHA-256, 128-bit tag
    pub const A128CBC_HS256: Self = Self::cbc_hmac("A128CBC-HS256", HashAlgorithm::Sha256, 16);
    /// AES-192-CBC with HMAC-SHA-384, 192-bit tag
    pub const A192CBC_HS384: Self = Self::cbc_hmac("A192CBC-HS384", HashAlgorithm::Sha384, 24);
    /// AES-256-CBC with HMAC-SHA-512, 256-bit tag
    pub const A256CBC_HS512: Self = Self::cbc_hmac("A256CBC-HS512", HashAlgorithm::Sha512, 32);
    /// AES-GCM with a 128-bit key
    pub const A128GCM: Self = Self::gcm("A128GCM", 128);
    /// AES-GCM with a 192-bit key
    pub const A192GCM: Self = Self::gcm("A192GCM", 192);
    /// AES-GCM with a 256-bit key
    pub const A256GCM: Self = Self::gcm("A256GCM", 256);

    /// Every content-encryption algorithm, in registration order
    pub const ALL: [Self; 6] = [
        Self::A128CBC_HS256,
        Self::A192CBC_HS384,
        Self::A256CBC_HS512,
        Self::A128GCM,
        Self::A192GCM,
        Self::A256GCM,
    ];

    const fn cbc_hmac(code: &'static str, hash: HashAlgorithm, tag_bytes: usize) -> Self {
        // CEK is MAC key ‖ ENC key, each as long as the tag
        let cek_bits = tag_bytes * 2 * 8;
        Self {
            descriptor: AlgorithmDescriptor::new(
                code,
                AlgorithmKind::Aead,
                Some(KeyType::Symmetric),
                KeySizes::exactly(cek_bits),
            ),
            scheme: AeadScheme::CbcHmac(hash),
            cek_bits,
            tag_bytes,
        }
    }

    const fn gcm(code: &'static str, cek_bits: usize) -> Self {
        Self {
            descriptor: AlgorithmDescriptor::new(
                code,
                AlgorithmKind::Aead,
                Some(KeyType::Symmetric),
                KeySizes::exactly(cek_bits),
            ),
            scheme: AeadScheme::Gcm,
            cek_bits,
            tag_bytes: GCM_TAG_SIZE,
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

    /// Required content-encryption key size in bits
    pub fn cek_size_bits(&self) -> usize {
        self.cek_bits
    }

    /// Required nonce (IV) size in bytes
    pub fn nonce_size_bytes(&self) -> usize {
        match self.scheme {
            AeadScheme::CbcHmac(_) => AES_BLOCK_SIZE,
            AeadScheme::Gcm => GCM_NONCE_SIZE,
        }
    }

    /// Authentication tag size in bytes
    pub fn tag_size_bytes(&self) -> usize {
        self.tag_bytes
    }

    /// Exact ciphertext size for a plaintext of `plain_len` bytes
    pub fn cipher_text_size_bytes(&self, plain_len: usize) -> usize {
        match self.scheme {
            AeadScheme::CbcHmac(_) => AES_BLOCK_SIZE * (plain_len / AES_BLOCK_SIZE) + AES_BLOCK_SIZE,
            AeadScheme::Gcm => plain_len,
        }
    }

    /// A fresh random CEK of the right size
    pub fn generate_cek(&self) -> SymmetricKey {
        SymmetricKey::generate(self.cek_bits)
    }

    /// A fresh random nonce of the right size
    pub fn generate_nonce(&self) -> Vec<u8> {
        let mut nonce = vec![0u8; self.nonce_size_bytes()];
        OsRng.fill_bytes(&mut nonce);
        nonce
    }

    /// Encrypt and authenticate
    ///
    /// Writes `cipher_text_size_bytes(plaintext.len())` bytes of ciphertext
    /// and `tag_size_bytes()` bytes of tag. Returns the ciphertext length.
    pub fn encrypt(
        &self,
        key: &SecretKey,
        plaintext: &[u8],
        nonce: &[u8],
        aad: &[u8],
        ciphertext_out: &mut [u8],
        tag_out: &mut [u8],
    ) -> Result<usize> {
        self.descriptor.check_key(key)?;
        require_len("nonce", nonce.len(), self.nonce_size_bytes())?;
        let ct_len = self.cipher_text_size_bytes(plaintext.len());
        require_capacity("ciphertext", ciphertext_out.len(), ct_len)?;
        require_capacity("tag", tag_out.len(), self.tag_bytes)?;

        let cek = key.symmetric_bytes()?;
        match self.scheme {
            AeadScheme::CbcHmac(hash) => {
                let (mac_key, enc_key) = cek.split_at(cek.len() / 2);
                let written = cbc_encrypt(enc_key, nonce, plaintext, ciphertext_out)?;
                let tag = self.cbc_tag(hash, mac_key, aad, nonce, &ciphertext_out[..written])?;
                tag_out[..self.tag_bytes].copy_from_slice(&tag);
                Ok(written)
            }
            AeadScheme::Gcm => {
                let tag = gcm_seal(cek, nonce, aad, plaintext, ciphertext_out)?;
                tag_out[..GCM_TAG_SIZE].copy_from_slice(&tag);
                Ok(ct_len)
            }
        }
    }

    /// Verify and decrypt
    ///
    /// The tag is checked before any decryption. On
    /// [`Error::IntegrityViolation`] `plaintext_out` is left untouched; on a
    /// cipher failure after a valid tag it is zeroed. Returns the plaintext
    /// length.
    pub fn try_decrypt(
        &self,
        key: &SecretKey,
        ciphertext: &[u8],
        nonce: &[u8],
        aad: &[u8],
        tag: &[u8],
        plaintext_out: &mut [u8],
    ) -> Result<usize> {
        self.descriptor.check_key(key)?;
        require_len("nonce", nonce.len(), self.nonce_size_bytes())?;
        if tag.len() != self.tag_bytes {
            return Err(Error::IntegrityViolation);
        }

        let cek = key.symmetric_bytes()?;
        let plaintext = match self.scheme {
            AeadScheme::CbcHmac(hash) => {
                let (mac_key, enc_key) = cek.split_at(cek.len() / 2);
                let expected = self.cbc_tag(hash, mac_key, aad, nonce, ciphertext)?;
                if !constant_time_eq(&expected, tag) {
                    tracing::warn!(alg = self.code(), "authentication tag mismatch");
                    return Err(Error::IntegrityViolation);
                }
                match cbc_decrypt(enc_key, nonce, ciphertext) {
                    Ok(plaintext) => plaintext,
                    Err(err) => {
                        plaintext_out.zeroize();
                        return Err(err);
                    }
                }
            }
            AeadScheme::Gcm => gcm_open(cek, nonce, aad, ciphertext, tag).map_err(|err| {
                tracing::warn!(alg = self.code(), "authentication tag mismatch");
                err
            })?,
        };

        require_capacity("plaintext", plaintext_out.len(), plaintext.len())?;
        plaintext_out[..plaintext.len()].copy_from_slice(&plaintext);
        Ok(plaintext.len())
    }

    fn cbc_tag(
        &self,
        hash: HashAlgorithm,
        mac_key: &[u8],
        aad: &[u8],
        iv: &[u8],
        ciphertext: &[u8],
    ) -> Result<Zeroizing<Vec<u8>>> {
        let aad_bits = (aad.len() as u64 * 8).to_be_bytes();
        let mut mac = hash.hmac(mac_key, &[aad, iv, ciphertext, &aad_bits])?;
        mac.truncate(self.tag_bytes);
        Ok(mac)
    }
}

// ============================================================================
// AES-CBC
// ============================================================================

fn cbc_encrypt(key: &[u8], iv: &[u8], plaintext: &[u8], out: &mut [u8]) -> Result<usize> {
    fn run<C>(key: &[u8], iv: &[u8], plaintext: &[u8], out: &mut [u8]) -> Result<usize>
    where
        cbc::Encryptor<C>: KeyIvInit + BlockEncryptMut,
        C: cbc::cipher::BlockCipher + cbc::cipher::BlockEncryptMut,
    {
        let cipher = cbc::Encryptor::<C>::new_from_slices(key, iv)
            .map_err(|_| Error::EncryptionFailed("invalid AES-CBC key or IV".into()))?;
        cipher
            .encrypt_padded_b2b_mut::<Pkcs7>(plaintext, out)
            .map(|ct| ct.len())
            .map_err(|_| Error::EncryptionFailed("AES-CBC output buffer too small".into()))
    }

    match key.len() {
        16 => run::<Aes128>(key, iv, plaintext, out),
        24 => run::<Aes192>(key, iv, plaintext, out),
        32 => run::<Aes256>(key, iv, plaintext, out),
        n => Err(Error::SizeInvalid(format!("no AES variant for a {n}-byte key"))),
    }
}

fn cbc_decrypt(key: &[u8], iv: &[u8], ciphertext: &[u8]) -> Result<Zeroizing<Vec<u8>>> {
    fn run<C>(key: &[u8], iv: &[u8], ciphertext: &[u8]) -> Result<Zeroizing<Vec<u8>>>
    where
        cbc::Decryptor<C>: KeyIvInit + BlockDecryptMut,
        C: cbc::cipher::BlockCipher + cbc::cipher::BlockDecryptMut,
    {
        let cipher =
            cbc::Decryptor::<C>::new_from_slices(key, iv).map_err(|_| Error::DecryptionFailed)?;
        let mut buf = secret_buffer(ciphertext.len());
        let len = cipher
            .decrypt_padded_b2b_mut::<Pkcs7>(ciphertext, &mut buf)
            .map_err(|_| Error::DecryptionFailed)?
            .len();
        buf.truncate(len);
        Ok(buf)
    }

    match key.len() {
        16 => run::<Aes128>(key, iv, ciphertext),
        24 => run::<Aes192>(key, iv, ciphertext),
        32 => run::<Aes256>(key, iv, ciphertext),
        _ => Err(Error::DecryptionFailed),
    }
}

// ============================================================================
// AES-GCM (shared with AES-GCM key wrap)
// ============================================================================

/// Encrypt `plaintext` into `out` and return the 128-bit tag
pub(crate) fn gcm_seal(
    key: &[u8],
    nonce: &[u8],
    aad: &[u8],
    plaintext: &[u8],
    out: &mut [u8],
) -> Result<[u8; GCM_TAG_SIZE]> {
    fn run<C: AeadInPlace + KeyInit>(
        key: &[u8],
        nonce: &[u8],
        aad: &[u8],
        plaintext: &[u8],
        buf: &mut [u8],
    ) -> Result<[u8; GCM_TAG_SIZE]> {
        let cipher = C::new_from_slice(key)
            .map_err(|_| Error::EncryptionFailed("invalid AES-GCM key".into()))?;
        buf.copy_from_slice(plaintext);
        let tag = cipher
            .encrypt_in_place_detached(Nonce::<C>::from_slice(nonce), aad, buf)
            .map_err(|_| {
                buf.zeroize();
                Error::EncryptionFailed("AES-GCM encryption failed".into())
            })?;
        let mut out = [0u8; GCM_TAG_SIZE];
        out.copy_from_slice(&tag);
        Ok(out)
    }

    require_len("nonce", nonce.len(), GCM_NONCE_SIZE)?;
    require_capacity("ciphertext", out.len(), plaintext.len())?;
    let buf = &mut out[..plaintext.len()];
    match key.len() {
        16 => run::<Aes128Gcm>(key, nonce, aad, plaintext, buf),
        24 => run::<Aes192Gcm>(key, nonce, aad, plaintext, buf),
        32 => run::<Aes256Gcm>(key, nonce, aad, plaintext, buf),
        n => Err(Error::SizeInvalid(format!("no AES-GCM variant for a {n}-byte key"))),
    }
}

/// Verify the tag and decrypt into a zero-on-drop buffer
pub(crate) fn gcm_open(
    key: &[u8],
    nonce: &[u8],
    aad: &[u8],
    ciphertext: &[u8],
    tag: &[u8],
) -> Result<Zeroizing<Vec<u8>>> {
    fn run<C: AeadInPlace + KeyInit>(
        key: &[u8],
        nonce: &[u8],
        aad: &[u8],
        buf: &mut [u8],
        tag: &[u8],
    ) -> Result<()> {
        let cipher = C::new_from_slice(key).map_err(|_| Error::DecryptionFailed)?;
        cipher
            .decrypt_in_place_detached(
                Nonce::<C>::from_slice(nonce),
                aad,
                buf,
                Tag::<C>::from_slice(tag),
            )
            .map_err(|_| Error::IntegrityViolation)
    }

    require_len("nonce", nonce.len(), GCM_NONCE_SIZE)?;
    if tag.len() != GCM_TAG_SIZE {
        return Err(Error::IntegrityViolation);
    }
    let mut buf = Zeroizing::new(ciphertext.to_vec());
    match key.len() {
        16 => run::<Aes128Gcm>(key, nonce, aad, &mut buf, tag)?,
        24 => run::<Aes192Gcm>(key, nonce, aad, &mut buf, tag)?,
        32 => run::<Aes256Gcm>(key, nonce, aad, &mut buf, tag)?,
        _ => return Err(Error::DecryptionFailed),
    }
    Ok(buf)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const B1_PLAINTEXT: &[u8] = b"A cipher system must not be required to be secret, and it must be able to fall into the hands of the enemy without inconvenience";
    const B1_AAD: &[u8] = b"The second principle of Auguste Kerckhoffs";

    fn sequential_key(len: usize) -> SecretKey {
        SecretKey::from(SymmetricKey::from_bytes(&(0..len as u8).collect::<Vec<_>>()))
    }

    fn seal(alg: AeadAlgorithm, key: &SecretKey, pt: &[u8], iv: &[u8], aad: &[u8]) -> (Vec<u8>, Vec<u8>) {
        let mut ct = vec![0u8; alg.cipher_text_size_bytes(pt.len())];
        let mut tag = vec![0u8; alg.tag_size_bytes()];
        let n = alg.encrypt(key, pt, iv, aad, &mut ct, &mut tag).unwrap();
        ct.truncate(n);
        (ct, tag)
    }

    #[test]
    fn test_a128cbc_hs256_rfc7518_b1() {
        let alg = AeadAlgorithm::A128CBC_HS256;
        let key = sequential_key(32);
        let iv = hex::decode("1af38c2dc2b96ffdd86694092341bc04").unwrap();

        let (ct, tag) = seal(alg, &key, B1_PLAINTEXT, &iv, B1_AAD);

        assert_eq!(
            hex::encode(&ct),
            "c80edfa32ddf39d5ef00c0b468834279a2e46a1b8049f792f76bfe54b903a9c9\
             a94ac9b47ad2655c5f10f9aef71427e2fc6f9b3f399a221489f16362c7032336\
             09d45ac69864e3321cf82935ac4096c86e133314c54019e8ca7980dfa4b9cf1b\
             384c486f3a54c51078158ee5d79de59fbd34d848b3d69550a67646344427ade5\
             4b8851ffb598f7f80074b9473c82e2db"
        );
        assert_eq!(hex::encode(&tag), "652c3fa36b0a7c5b3219fab3a30bc1c4");

        let mut pt = vec![0u8; ct.len()];
        let n = alg.try_decrypt(&key, &ct, &iv, B1_AAD, &tag, &mut pt).unwrap();
        assert_eq!(&pt[..n], B1_PLAINTEXT);
    }

    #[test]
    fn test_round_trip_all_algorithms() {
        for alg in AeadAlgorithm::ALL {
            let key = SecretKey::from(alg.generate_cek());
            for len in [0usize, 1, 15, 16, 17, 33, 100] {
                let pt: Vec<u8> = (0..len).map(|i| i as u8).collect();
                let iv = alg.generate_nonce();
                let (ct, tag) = seal(alg, &key, &pt, &iv, b"header");
                assert_eq!(ct.len(), alg.cipher_text_size_bytes(len));
                assert_eq!(tag.len(), alg.tag_size_bytes());

                let mut out = vec![0u8; ct.len()];
                let n = alg.try_decrypt(&key, &ct, &iv, b"header", &tag, &mut out).unwrap();
                assert_eq!(&out[..n], pt.as_slice(), "{} len {len}", alg.code());
            }
        }
    }

    #[test]
    fn test_tamper_detection_leaves_output_untouched() {
        for alg in AeadAlgorithm::ALL {
            let key = SecretKey::from(alg.generate_cek());
            let iv = alg.generate_nonce();
            let (ct, tag) = seal(alg, &key, b"attack at dawn", &iv, b"aad");

            let mut bad_ct = ct.clone();
            bad_ct[0] ^= 0x80;
            let mut bad_tag = tag.clone();
            bad_tag[tag.len() - 1] ^= 0x01;

            for (c, a, t) in [
                (bad_ct.as_slice(), b"aad".as_slice(), tag.as_slice()),
                (ct.as_slice(), b"aaD".as_slice(), tag.as_slice()),
                (ct.as_slice(), b"aad".as_slice(), bad_tag.as_slice()),
            ] {
                let mut out = vec![0xEEu8; ct.len()];
                let result = alg.try_decrypt(&key, c, &iv, a, t, &mut out);
                assert!(matches!(result, Err(Error::IntegrityViolation)), "{}", alg.code());
                assert!(out.iter().all(|b| *b == 0xEE));
            }
        }
    }

    #[test]
    fn test_wrong_tag_length_is_integrity_violation() {
        let alg = AeadAlgorithm::A256CBC_HS512;
        let key = SecretKey::from(alg.generate_cek());
        let iv = alg.generate_nonce();
        let (ct, tag) = seal(alg, &key, b"x", &iv, b"");
        let mut out = vec![0u8; ct.len()];
        let result = alg.try_decrypt(&key, &ct, &iv, b"", &tag[..16], &mut out);
        assert!(matches!(result, Err(Error::IntegrityViolation)));
    }

    #[test]
    fn test_cipher_text_size_monotonic() {
        for alg in AeadAlgorithm::ALL {
            let mut previous = 0;
            for len in 0..80 {
                let size = alg.cipher_text_size_bytes(len);
                assert!(size >= previous);
                assert!(size >= len);
                previous = size;
            }
        }
        assert_eq!(AeadAlgorithm::A128CBC_HS256.cipher_text_size_bytes(0), 16);
        assert_eq!(AeadAlgorithm::A128CBC_HS256.cipher_text_size_bytes(16), 32);
        assert_eq!(AeadAlgorithm::A128GCM.cipher_text_size_bytes(16), 16);
    }

    #[test]
    fn test_tag_sizes_are_half_the_cek() {
        for alg in AeadAlgorithm::ALL.iter().take(3) {
            assert_eq!(alg.tag_size_bytes() * 2 * 8, alg.cek_size_bits());
        }
        assert_eq!(AeadAlgorithm::A192CBC_HS384.tag_size_bytes(), 24);
    }

    #[test]
    fn test_wrong_nonce_length() {
        let alg = AeadAlgorithm::A128GCM;
        let key = SecretKey::from(alg.generate_cek());
        let mut ct = [0u8; 4];
        let mut tag = [0u8; 16];
        let result = alg.encrypt(&key, b"data", &[0u8; 16], b"", &mut ct, &mut tag);
        assert!(matches!(result, Err(Error::SizeInvalid(_))));
    }

    #[test]
    fn test_wrong_key_size() {
        let key = sequential_key(32);
        let alg = AeadAlgorithm::A256CBC_HS512;
        let mut ct = [0u8; 16];
        let mut tag = [0u8; 32];
        let result = alg.encrypt(&key, b"", &[0u8; 16], b"", &mut ct, &mut tag);
        assert!(matches!(result, Err(Error::SizeInvalid(_))));
    }

    #[test]
    fn test_bad_padding_after_valid_tag_zeroes_output() {
        // Forge a ciphertext whose tag verifies but whose padding is invalid
        let alg = AeadAlgorithm::A128CBC_HS256;
        let key = sequential_key(32);
        let cek = key.symmetric_bytes().unwrap();
        let iv = [7u8; 16];
        let ct = [0x42u8; 16];
        let tag = alg
            .cbc_tag(HashAlgorithm::Sha256, &cek[..16], b"", &iv, &ct)
            .unwrap();

        let mut out = vec![0xEEu8; 16];
        let err = alg
            .try_decrypt(&key, &ct, &iv, b"", &tag, &mut out)
            .unwrap_err();
        assert!(matches!(err, Error::DecryptionFailed));
        assert!(out.iter().all(|b| *b == 0));
    }

    #[test]
    fn test_gcm_seal_unsupported_key_leaves_output_clean() {
        let mut out = [0u8; 8];
        let result = gcm_seal(&[1u8; 20], &[0u8; GCM_NONCE_SIZE], b"", b"plaintxt", &mut out);
        assert!(matches!(result, Err(Error::SizeInvalid(_))));
        assert_eq!(out, [0u8; 8]);
    }
}
