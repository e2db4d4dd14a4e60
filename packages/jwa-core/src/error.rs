//! # Error Handling
//!
//! This module provides the error types for the JWA engine.
//!
//! ## Error Hierarchy
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                           ERROR HIERARCHY                               │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  Error (top-level)                                                     │
//! │  │                                                                      │
//! │  ├── Size Errors                                                       │
//! │  │   └── SizeInvalid              - Key/nonce/tag/buffer size illegal  │
//! │  │                                                                      │
//! │  ├── Integrity Errors                                                  │
//! │  │   └── IntegrityViolation       - Tag mismatch or KW check failed    │
//! │  │                                                                      │
//! │  ├── Configuration Errors                                              │
//! │  │   ├── UnsupportedConfiguration - Parameter combination rejected     │
//! │  │   ├── InvalidKey               - Wrong key type or bad material     │
//! │  │   └── InvalidConfig            - Engine configuration rejected      │
//! │  │                                                                      │
//! │  ├── Selection Errors                                                  │
//! │  │   └── CredentialsNotFound      - No algorithm/key pair matched      │
//! │  │                                                                      │
//! │  └── Operation Errors                                                  │
//! │      ├── EncryptionFailed         - Cipher or key wrap failed          │
//! │      ├── DecryptionFailed         - Cipher or key unwrap failed        │
//! │      ├── SigningFailed            - Signature primitive failed         │
//! │      ├── KeyDerivationFailed      - KDF or key agreement failed        │
//! │      └── CompressionFailed        - DEFLATE/INFLATE failed             │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Messages carry algorithm codes and sizes only. Key bytes, plaintext and
//! intermediate secrets never appear in an error.

use thiserror::Error;

/// Result type alias for engine operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the JWA engine
#[derive(Error, Debug)]
pub enum Error {
    // ========================================================================
    // Size Errors (100-199)
    // ========================================================================

    /// A key, nonce, tag or output buffer has an illegal size
    #[error("Invalid size: {0}")]
    SizeInvalid(String),

    // ========================================================================
    // Integrity Errors (200-299)
    // ========================================================================

    /// Authentication tag or key-wrap integrity check failed
    #[error("Integrity check failed")]
    IntegrityViolation,

    // ========================================================================
    // Configuration Errors (300-399)
    // ========================================================================

    /// The requested parameter combination is not supported
    #[error("Unsupported configuration: {0}")]
    UnsupportedConfiguration(String),

    /// The key has the wrong type or unusable material
    #[error("Invalid key: {0}")]
    InvalidKey(String),

    /// The engine configuration could not be loaded or is inconsistent
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ========================================================================
    // Selection Errors (400-499)
    // ========================================================================

    /// No preferred algorithm could be paired with an available key
    #[error("No credentials found: {0}")]
    CredentialsNotFound(String),

    // ========================================================================
    // Operation Errors (500-599)
    // ========================================================================

    /// Encryption or key wrapping failed
    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    /// Decryption or key unwrapping failed
    ///
    /// Padding, OAEP and key-unwrap failures all surface as this variant.
    #[error("Decryption failed")]
    DecryptionFailed,

    /// Signing failed
    #[error("Signing failed: {0}")]
    SigningFailed(String),

    /// Key agreement or key derivation failed
    #[error("Failed to derive key: {0}")]
    KeyDerivationFailed(String),

    /// Compression or decompression failed
    #[error("Compression failed: {0}")]
    CompressionFailed(String),
}

/// Coarse error category used by callers that map errors to protocol codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Illegal key, nonce, tag or buffer size
    SizeInvalid,
    /// Authentication failure
    IntegrityViolation,
    /// Rejected algorithm, key or parameter combination
    UnsupportedConfiguration,
    /// Credential selection found nothing
    CredentialsNotFound,
    /// An underlying primitive failed
    OperationFailed,
}

impl Error {
    /// Get the numeric error code
    ///
    /// Error codes are organized by category:
    /// - 100-199: Size
    /// - 200-299: Integrity
    /// - 300-399: Configuration
    /// - 400-499: Selection
    /// - 500-599: Operation
    pub fn code(&self) -> i32 {
        match self {
            Error::SizeInvalid(_) => 100,

            Error::IntegrityViolation => 200,

            Error::UnsupportedConfiguration(_) => 300,
            Error::InvalidKey(_) => 301,
            Error::InvalidConfig(_) => 302,

            Error::CredentialsNotFound(_) => 400,

            Error::EncryptionFailed(_) => 500,
            Error::DecryptionFailed => 501,
            Error::SigningFailed(_) => 502,
            Error::KeyDerivationFailed(_) => 503,
            Error::CompressionFailed(_) => 504,
        }
    }

    /// Get the category this error belongs to
    pub fn category(&self) -> ErrorCategory {
        match self.code() {
            100..=199 => ErrorCategory::SizeInvalid,
            200..=299 => ErrorCategory::IntegrityViolation,
            300..=399 => ErrorCategory::UnsupportedConfiguration,
            400..=499 => ErrorCategory::CredentialsNotFound,
            _ => ErrorCategory::OperationFailed,
        }
    }

    /// Check if this error is recoverable
    ///
    /// Cryptographic failures are never retried; every error is final.
    pub fn is_recoverable(&self) -> bool {
        false
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::InvalidConfig(err.to_string())
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes_match_categories() {
        assert_eq!(Error::SizeInvalid("x".into()).category(), ErrorCategory::SizeInvalid);
        assert_eq!(Error::IntegrityViolation.category(), ErrorCategory::IntegrityViolation);
        assert_eq!(
            Error::InvalidKey("x".into()).category(),
            ErrorCategory::UnsupportedConfiguration
        );
        assert_eq!(
            Error::CredentialsNotFound("x".into()).category(),
            ErrorCategory::CredentialsNotFound
        );
        assert_eq!(Error::DecryptionFailed.category(), ErrorCategory::OperationFailed);
        assert_eq!(Error::DecryptionFailed.code(), 501);
    }

    #[test]
    fn test_nothing_is_recoverable() {
        assert!(!Error::IntegrityViolation.is_recoverable());
        assert!(!Error::EncryptionFailed("boom".into()).is_recoverable());
    }

    #[test]
    fn test_serde_error_maps_to_invalid_config() {
        let err: Error = serde_json::from_str::<u32>("not json").unwrap_err().into();
        assert!(matches!(err, Error::InvalidConfig(_)));
    }
}
