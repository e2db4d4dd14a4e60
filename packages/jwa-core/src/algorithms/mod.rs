//! # Algorithm Descriptors, Registry & Credential Selection
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       ALGORITHM RESOLUTION                              │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  "RS256" ──► AlgorithmRegistry ──► Algorithm::Signature(RS256)         │
//! │                   │                         │                           │
//! │                   │ (kind, code)            │ descriptor                │
//! │                   ▼                         ▼                           │
//! │         ┌──────────────────┐     ┌──────────────────────────────┐      │
//! │         │ AlgorithmSource  │     │ code, kind,                  │      │
//! │         │ per family       │     │ accepted_key_type,           │      │
//! │         └──────────────────┘     │ legal_key_sizes              │      │
//! │                                  └──────────────────────────────┘      │
//! │                                                                         │
//! │  CredentialSelector                                                    │
//! │  ├── preferred codes (in order) × available keys                       │
//! │  └── first code with a key of the right type and size wins             │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod registry;
mod selector;

pub use registry::{
    AlgorithmRegistry, AlgorithmSource, CompressionAlgorithms, ContentEncryptionAlgorithms,
    KeyManagementAlgorithms, SignatureAlgorithms,
};
pub use selector::{
    CredentialSelection, CredentialSelector, EncryptionCredentials, EncryptionPreferences,
    SigningCredentials,
};

use std::fmt;

use crate::crypto::{
    AeadAlgorithm, CompressionAlgorithm, KeyManagementAlgorithm, KeySizes, KeyType, SecretKey,
    SignatureAlgorithm,
};
use crate::error::{Error, Result};

/// The family an algorithm belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AlgorithmKind {
    /// JWS `alg` values
    Signature,
    /// JWE `enc` values
    Aead,
    /// JWE `alg` values
    KeyManagement,
    /// JWE `zip` values
    Compression,
}

impl AlgorithmKind {
    /// All kinds, in registry order
    pub const ALL: [AlgorithmKind; 4] = [
        AlgorithmKind::Signature,
        AlgorithmKind::Aead,
        AlgorithmKind::KeyManagement,
        AlgorithmKind::Compression,
    ];
}

/// Static facts about an algorithm
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AlgorithmDescriptor {
    /// Registered JOSE code, case-sensitive
    pub code: &'static str,
    /// Family
    pub kind: AlgorithmKind,
    /// Key type the algorithm operates on, `None` for keyless algorithms
    pub accepted_key_type: Option<KeyType>,
    /// Legal key sizes in bits
    pub legal_key_sizes: KeySizes,
}

impl AlgorithmDescriptor {
    /// Create a descriptor
    pub const fn new(
        code: &'static str,
        kind: AlgorithmKind,
        accepted_key_type: Option<KeyType>,
        legal_key_sizes: KeySizes,
    ) -> Self {
        Self {
            code,
            kind,
            accepted_key_type,
            legal_key_sizes,
        }
    }

    /// Whether the key has the right type and a legal size
    pub fn accepts(&self, key: &SecretKey) -> bool {
        self.accepted_key_type == Some(key.key_type())
            && self.legal_key_sizes.contains(key.key_size_bits())
    }

    /// Fail unless the key has the right type and a legal size
    ///
    /// A type mismatch is [`Error::InvalidKey`]; an illegal size is
    /// [`Error::SizeInvalid`].
    pub fn check_key(&self, key: &SecretKey) -> Result<()> {
        match self.accepted_key_type {
            Some(expected) if expected == key.key_type() => {
                crate::crypto::assert_legal_size(key, self)
            }
            Some(expected) => Err(Error::InvalidKey(format!(
                "{} requires a {expected} key, got {}",
                self.code,
                key.key_type()
            ))),
            None => Err(Error::UnsupportedConfiguration(format!(
                "{} does not take a key",
                self.code
            ))),
        }
    }
}

/// Any registered algorithm
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Algorithm {
    /// Digital signature or MAC
    Signature(SignatureAlgorithm),
    /// Content encryption
    Aead(AeadAlgorithm),
    /// Key management
    KeyManagement(KeyManagementAlgorithm),
    /// Payload compression
    Compression(CompressionAlgorithm),
}

impl Algorithm {
    /// The static descriptor
    pub fn descriptor(&self) -> &AlgorithmDescriptor {
        match self {
            Algorithm::Signature(alg) => alg.descriptor(),
            Algorithm::Aead(alg) => alg.descriptor(),
            Algorithm::KeyManagement(alg) => alg.descriptor(),
            Algorithm::Compression(alg) => alg.descriptor(),
        }
    }

    /// The registered code
    pub fn code(&self) -> &'static str {
        self.descriptor().code
    }

    /// The family
    pub fn kind(&self) -> AlgorithmKind {
        self.descriptor().kind
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

// ============================================================================
// TESTS
// ============================================================================
