//! # JWA Core
//!
//! The algorithm engine behind a JOSE implementation: the RFC 7518 signature,
//! content-encryption and key-management algorithms, the key model they
//! operate on, and the registry a token service uses to resolve `alg`,
//! `enc` and `zip` header values.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                           JWA CORE MODULES                              │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                        Algorithms                               │   │
//! │  │  - AlgorithmRegistry  ("HS256", "A256GCM", ...) → algorithm     │   │
//! │  │  - CredentialSelector preferences × keys → credentials          │   │
//! │  └──────────────────────────────┬──────────────────────────────────┘   │
//! │                                 │                                       │
//! │  ┌──────────────────────────────▼──────────────────────────────────┐   │
//! │  │                          Crypto                                 │   │
//! │  │                                                                 │   │
//! │  │  ┌────────────┐ ┌────────────┐ ┌──────────────┐ ┌───────────┐  │   │
//! │  │  │ Signatures │ │    AEAD    │ │ Key Mgmt     │ │ Compress  │  │   │
//! │  │  │ HS RS PS ES│ │ CBC-HS GCM │ │ dir KW ECDH  │ │ DEF       │  │   │
//! │  │  │            │ │            │ │ RSA PBES2    │ │           │  │   │
//! │  │  └─────┬──────┘ └─────┬──────┘ └──────┬───────┘ └───────────┘  │   │
//! │  │        └──────────────┴───────────────┘                         │   │
//! │  │                       │                                         │   │
//! │  │        SecretKey + KeySizes legality gate                       │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                                                         │
//! │  ┌─────────────┐  ┌─────────────┐                                      │
//! │  │   Config    │  │    Error    │                                      │
//! │  └─────────────┘  └─────────────┘                                      │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Hierarchy
//!
//! - [`error`] - Error type and categories
//! - [`config`] - Engine configuration (PBES2 limits, disabled algorithms)
//! - [`crypto`] - Keys, key-size rules and every algorithm family
//! - [`algorithms`] - Descriptors, registry and credential selection
//!
//! ## Quick Start
//!
//! ```
//! use jwa_core::algorithms::AlgorithmRegistry;
//! use jwa_core::crypto::{SecretKey, SymmetricKey};
//!
//! let registry = AlgorithmRegistry::shared();
//! let hs256 = registry.signature("HS256").unwrap();
//!
//! let key = SecretKey::from(SymmetricKey::generate(256));
//! let signature = hs256.sign(&key, b"payload").unwrap();
//! assert!(hs256.verify(&key, b"payload", &signature).unwrap());
//! ```
//!
//! ## Out of Scope
//!
//! JWS/JWE serialization, header parsing and key storage belong to the
//! caller. The engine only sees byte slices and typed keys.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

// ============================================================================
// MODULE DECLARATIONS
// ============================================================================

pub mod algorithms;
pub mod config;
pub mod crypto;
pub mod error;

// ============================================================================
// RE-EXPORTS
// ============================================================================

pub use algorithms::{Algorithm, AlgorithmKind, AlgorithmRegistry, CredentialSelector};
pub use config::EngineConfig;
pub use crypto::{KeySizes, SecretKey};
pub use error::{Error, ErrorCategory, Result};

// ============================================================================
// VERSION INFO
// ============================================================================

/// Returns the version of JWA Core
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

// ============================================================================
// TESTS
// ============================================================================
