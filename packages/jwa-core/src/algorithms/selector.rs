//! Credential selection: match ordered algorithm preferences against keys.
//!
//! ```text
//!   preferences  ["RS256", "ES256"]        keys  [EC P-256]
//!        │
//!        ├── RS256  no RSA key of a legal size       ✗
//!        └── ES256  P-256 key                        ✓  ← first match wins
//! ```
//!
//! Selection is first-match-wins over the caller's order, not best-match.

use super::AlgorithmRegistry;
use crate::crypto::{
    AeadAlgorithm, CompressionAlgorithm, KeyManagementAlgorithm, SecretKey, SignatureAlgorithm,
};
use crate::error::{Error, Result};

/// A signing algorithm and the key to use with it
#[derive(Debug, Clone, Copy)]
pub struct SigningCredentials<'k> {
    /// Selected `alg`
    pub algorithm: SignatureAlgorithm,
    /// Key accepted by `algorithm`
    pub key: &'k SecretKey,
}

/// Ordered JWE preferences
///
/// `compression` may be empty, in which case no `zip` is selected.
#[derive(Debug, Clone, Copy, Default)]
pub struct EncryptionPreferences<'a> {
    /// Acceptable `alg` codes, most preferred first
    pub key_management: &'a [&'a str],
    /// Acceptable `enc` codes, most preferred first
    pub content_encryption: &'a [&'a str],
    /// Acceptable `zip` codes, most preferred first
    pub compression: &'a [&'a str],
}

/// A resolved JWE algorithm triple and the key-management key
#[derive(Debug, Clone, Copy)]
pub struct EncryptionCredentials<'k> {
    /// Selected `alg`
    pub key_management: KeyManagementAlgorithm,
    /// Key accepted by `key_management`
    pub key: &'k SecretKey,
    /// Selected `enc`
    pub content_encryption: AeadAlgorithm,
    /// Selected `zip`, if compression was requested
    pub compression: Option<CompressionAlgorithm>,
}

/// Signing credentials plus optional encryption credentials
#[derive(Debug, Clone, Copy)]
pub struct CredentialSelection<'k> {
    /// Credentials for the JWS
    pub signing: SigningCredentials<'k>,
    /// Credentials for the enclosing JWE, when encryption was requested
    pub encryption: Option<EncryptionCredentials<'k>>,
}

/// Chooses algorithms and keys from a registry
#[derive(Debug, Clone, Copy)]
pub struct CredentialSelector<'r> {
    registry: &'r AlgorithmRegistry,
}

impl Default for CredentialSelector<'static> {
    fn default() -> Self {
        Self::new(AlgorithmRegistry::shared())
    }
}

impl<'r> CredentialSelector<'r> {
    /// Select against `registry`
    pub fn new(registry: &'r AlgorithmRegistry) -> Self {
        Self { registry }
    }

    /// First preferred signing algorithm with a compatible key
    ///
    /// Unregistered codes are skipped.
    pub fn try_get_signing_credentials<'k>(
        &self,
        preferred: &[&str],
        keys: &'k [SecretKey],
    ) -> Option<SigningCredentials<'k>> {
        let selected = preferred.iter().find_map(|code| {
            let algorithm = self.registry.signature(code)?;
            let key = keys.iter().find(|key| algorithm.descriptor().accepts(key))?;
            Some(SigningCredentials { algorithm, key })
        });

        match &selected {
            Some(creds) => tracing::debug!(alg = creds.algorithm.code(), "Signing credentials selected"),
            None => tracing::debug!(
                preferences = preferred.len(),
                keys = keys.len(),
                "No signing credentials matched"
            ),
        }
        selected
    }

    /// Like [`try_get_signing_credentials`](Self::try_get_signing_credentials),
    /// failing with [`Error::CredentialsNotFound`]
    pub fn signing_credentials<'k>(
        &self,
        preferred: &[&str],
        keys: &'k [SecretKey],
    ) -> Result<SigningCredentials<'k>> {
        self.try_get_signing_credentials(preferred, keys)
            .ok_or_else(|| {
                Error::CredentialsNotFound(format!(
                    "no key matches signing algorithms {preferred:?}"
                ))
            })
    }

    /// First `(alg, key, enc)` combination in preference order, plus `zip`
    ///
    /// `alg` preferences are tried in order, then keys, then `enc`
    /// preferences. `dir` only pairs with an `enc` whose CEK size equals the
    /// key size. When `zip` codes are given one of them must be registered.
    pub fn try_get_encryption_credentials<'k>(
        &self,
        prefs: &EncryptionPreferences<'_>,
        keys: &'k [SecretKey],
    ) -> Option<EncryptionCredentials<'k>> {
        let compression = if prefs.compression.is_empty() {
            None
        } else {
            match prefs
                .compression
                .iter()
                .find_map(|code| self.registry.compression(code))
            {
                Some(zip) => Some(zip),
                None => {
                    tracing::debug!("No registered compression matched");
                    return None;
                }
            }
        };

        let encryptions: Vec<AeadAlgorithm> = prefs
            .content_encryption
            .iter()
            .filter_map(|code| self.registry.aead(code))
            .collect();

        for code in prefs.key_management {
            let Some(key_management) = self.registry.key_management(code) else {
                continue;
            };
            for key in keys.iter().filter(|key| key_management.descriptor().accepts(key)) {
                let content_encryption = encryptions.iter().copied().find(|enc| {
                    key_management != KeyManagementAlgorithm::DIR
                        || enc.cek_size_bits() == key.key_size_bits()
                });
                if let Some(content_encryption) = content_encryption {
                    tracing::debug!(
                        alg = key_management.code(),
                        enc = content_encryption.code(),
                        zip = compression.map(|zip| zip.code()),
                        "Encryption credentials selected"
                    );
                    return Some(EncryptionCredentials {
                        key_management,
                        key,
                        content_encryption,
                        compression,
                    });
                }
            }
        }

        tracing::debug!(keys = keys.len(), "No encryption credentials matched");
        None
    }

    /// Like [`try_get_encryption_credentials`](Self::try_get_encryption_credentials),
    /// failing with [`Error::CredentialsNotFound`]
    pub fn encryption_credentials<'k>(
        &self,
        prefs: &EncryptionPreferences<'_>,
        keys: &'k [SecretKey],
    ) -> Result<EncryptionCredentials<'k>> {
        self.try_get_encryption_credentials(prefs, keys)
            .ok_or_else(|| {
                Error::CredentialsNotFound(format!(
                    "no key matches alg {:?} with enc {:?}",
                    prefs.key_management, prefs.content_encryption
                ))
            })
    }

    /// Resolve signing credentials and, if requested, encryption credentials
    ///
    /// Signing and encryption keys are drawn from separate sets. Fails as a
    /// whole if either requested part has no match.
    pub fn select<'k>(
        &self,
        signing: &[&str],
        signing_keys: &'k [SecretKey],
        encryption: Option<(&EncryptionPreferences<'_>, &'k [SecretKey])>,
    ) -> Result<CredentialSelection<'k>> {
        let signing = self.signing_credentials(signing, signing_keys)?;
        let encryption = encryption
            .map(|(prefs, keys)| self.encryption_credentials(prefs, keys))
            .transpose()?;
        Ok(CredentialSelection {
            signing,
            encryption,
        })
    }
}

// ============================================================================
// TESTS
// ============================================================================
