//! # Cryptography Module
//!
//! The JWA algorithm engine: every signature, content-encryption,
//! key-management and compression algorithm, plus the key model they share.
//!
//! ## Engine Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        JWA ALGORITHM ENGINE                             │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    KEY MODEL                                    │   │
//! │  ├─────────────────────────────────────────────────────────────────┤   │
//! │  │                                                                 │   │
//! │  │  SecretKey ──┬── Symmetric   raw bytes, zeroized on drop       │   │
//! │  │              ├── Rsa         private and/or public key         │   │
//! │  │              └── Ecc         P-256 / P-384 / P-521             │   │
//! │  │                                                                 │   │
//! │  │  Every algorithm gates its key on (type, KeySizes) first.      │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 SIGNATURES (JWS alg)                            │   │
//! │  ├─────────────────────────────────────────────────────────────────┤   │
//! │  │                                                                 │   │
//! │  │  HS256/384/512   HMAC-SHA-2, verified in constant time         │   │
//! │  │  RS256/384/512   RSASSA-PKCS1-v1_5                             │   │
//! │  │  PS256/384/512   RSASSA-PSS                                    │   │
//! │  │  ES256/384/512   ECDSA, fixed-width r ‖ s                      │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 CONTENT ENCRYPTION (JWE enc)                    │   │
//! │  ├─────────────────────────────────────────────────────────────────┤   │
//! │  │                                                                 │   │
//! │  │  A*CBC-HS*   AES-CBC + HMAC, tag checked before decrypting     │   │
//! │  │  A*GCM       AES-GCM, 96-bit nonce, 128-bit tag                │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 KEY MANAGEMENT (JWE alg)                        │   │
//! │  ├─────────────────────────────────────────────────────────────────┤   │
//! │  │                                                                 │   │
//! │  │  dir, A*KW, A*GCMKW, ECDH-ES[+A*KW], RSA1_5, RSA-OAEP[-256],   │   │
//! │  │  PBES2-HS*+A*KW                                                │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Security Considerations
//!
//! 1. **Key Zeroization**: symmetric keys, private scalars, shared secrets,
//!    KEKs and decrypted CEKs are zeroized when dropped
//! 2. **Constant-Time Comparison**: MAC and tag checks use `subtle`
//! 3. **Secure Random**: `rand::rngs::OsRng` for keys, nonces, IVs and salts
//! 4. **Caller-Owned Buffers**: operations write into pre-sized output
//!    slices and report the number of bytes written

mod compression;
mod encryption;
mod hash;
mod kdf;
mod key_management;
mod keys;
mod secret;
mod signing;
mod sizes;

pub use compression::CompressionAlgorithm;
pub use encryption::{AeadAlgorithm, AES_BLOCK_SIZE, GCM_NONCE_SIZE, GCM_TAG_SIZE};
pub use hash::HashAlgorithm;
pub use kdf::{concat_kdf, pbkdf2_derive};
pub use key_management::{
    KeyManagementAlgorithm, KeyWrapHeader, AES_KW_OVERHEAD, PBES2_MIN_SALT_BYTES,
    PBES2_SALT_BYTES,
};
pub use keys::{EccCurve, EccKey, KeyType, RsaKey, SecretKey, SymmetricKey};
pub use secret::{constant_time_eq, secret_buffer};
pub use signing::{SignatureAlgorithm, RSA_SIGNING_KEY_SIZES};
pub use sizes::{assert_legal_size, is_legal_size, KeySizes};
