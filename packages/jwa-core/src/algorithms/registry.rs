//! Algorithm registry keyed by `(kind, code)`.

use std::collections::HashMap;

use once_cell::sync::Lazy;

use super::{Algorithm, AlgorithmKind};
use crate::config::{EngineConfig, Pbes2Limits, DEFAULT_MAX_INFLATED_BYTES};
use crate::crypto::{
    AeadAlgorithm, CompressionAlgorithm, KeyManagementAlgorithm, SignatureAlgorithm,
};

/// A family of algorithms that can be registered
pub trait AlgorithmSource: Send + Sync {
    /// The family every produced algorithm belongs to
    fn kind(&self) -> AlgorithmKind;

    /// The algorithms to register, in order
    fn algorithms(&self) -> Vec<Algorithm>;
}

/// HS*, RS*, PS* and ES*
#[derive(Debug, Clone, Copy, Default)]
pub struct SignatureAlgorithms;

impl AlgorithmSource for SignatureAlgorithms {
    fn kind(&self) -> AlgorithmKind {
        AlgorithmKind::Signature
    }

    fn algorithms(&self) -> Vec<Algorithm> {
        SignatureAlgorithm::ALL.into_iter().map(Algorithm::Signature).collect()
    }
}

/// A*CBC-HS* and A*GCM
#[derive(Debug, Clone, Copy, Default)]
pub struct ContentEncryptionAlgorithms;

impl AlgorithmSource for ContentEncryptionAlgorithms {
    fn kind(&self) -> AlgorithmKind {
        AlgorithmKind::Aead
    }

    fn algorithms(&self) -> Vec<Algorithm> {
        AeadAlgorithm::ALL.into_iter().map(Algorithm::Aead).collect()
    }
}

/// Every key-management algorithm, with configurable PBES2 ceilings
#[derive(Debug, Clone, Copy, Default)]
pub struct KeyManagementAlgorithms {
    pbes2_limits: Pbes2Limits,
}

impl KeyManagementAlgorithms {
    /// Use the given PBES2 iteration ceilings
    pub fn with_pbes2_limits(pbes2_limits: Pbes2Limits) -> Self {
        Self { pbes2_limits }
    }

    fn apply_limits(&self, alg: KeyManagementAlgorithm) -> KeyManagementAlgorithm {
        let limit = match alg.code() {
            "PBES2-HS256+A128KW" => self.pbes2_limits.hs256,
            "PBES2-HS384+A192KW" => self.pbes2_limits.hs384,
            "PBES2-HS512+A256KW" => self.pbes2_limits.hs512,
            _ => return alg,
        };
        alg.with_max_iterations(limit)
    }
}

impl AlgorithmSource for KeyManagementAlgorithms {
    fn kind(&self) -> AlgorithmKind {
        AlgorithmKind::KeyManagement
    }

    fn algorithms(&self) -> Vec<Algorithm> {
        KeyManagementAlgorithm::ALL
            .into_iter()
            .map(|alg| Algorithm::KeyManagement(self.apply_limits(alg)))
            .collect()
    }
}

/// `DEF`, with a configurable inflate limit
#[derive(Debug, Clone, Copy)]
pub struct CompressionAlgorithms {
    max_inflated_bytes: usize,
}

impl CompressionAlgorithms {
    /// Use the given decompression limit
    pub fn with_max_inflated_bytes(max_inflated_bytes: usize) -> Self {
        Self { max_inflated_bytes }
    }
}

impl Default for CompressionAlgorithms {
    fn default() -> Self {
        Self::with_max_inflated_bytes(DEFAULT_MAX_INFLATED_BYTES)
    }
}

impl AlgorithmSource for CompressionAlgorithms {
    fn kind(&self) -> AlgorithmKind {
        AlgorithmKind::Compression
    }

    fn algorithms(&self) -> Vec<Algorithm> {
        CompressionAlgorithm::ALL
            .into_iter()
            .map(|alg| Algorithm::Compression(alg.with_max_inflated_bytes(self.max_inflated_bytes)))
            .collect()
    }
}

static SHARED: Lazy<AlgorithmRegistry> = Lazy::new(AlgorithmRegistry::default);

/// Read-only lookup of algorithms by family and code
///
/// ## Example
///
/// ```
/// use jwa_core::algorithms::AlgorithmRegistry;
///
/// let registry = AlgorithmRegistry::shared();
/// assert!(registry.signature("ES256").is_some());
/// assert!(registry.signature("es256").is_none());
/// ```
#[derive(Debug, Clone)]
pub struct AlgorithmRegistry {
    by_kind: HashMap<AlgorithmKind, HashMap<&'static str, Algorithm>>,
    order: Vec<Algorithm>,
}

impl AlgorithmRegistry {
    /// Register every algorithm from `sources`
    ///
    /// When two sources produce the same `(kind, code)` the first one is kept.
    pub fn from_sources(sources: &[&dyn AlgorithmSource]) -> Self {
        let mut registry = Self {
            by_kind: HashMap::new(),
            order: Vec::new(),
        };

        for source in sources {
            for alg in source.algorithms() {
                if alg.kind() != source.kind() {
                    tracing::warn!(
                        code = alg.code(),
                        kind = ?alg.kind(),
                        source_kind = ?source.kind(),
                        "Skipping algorithm from a source of another kind"
                    );
                    continue;
                }
                registry.insert(alg);
            }
        }

        tracing::debug!(count = registry.order.len(), "Algorithm registry built");
        registry
    }

    /// Build the standard registry with `config` applied
    pub fn with_config(config: &EngineConfig) -> Self {
        let key_management = KeyManagementAlgorithms::with_pbes2_limits(config.pbes2_max_iterations);
        let compression = CompressionAlgorithms::with_max_inflated_bytes(config.max_inflated_bytes);
        let mut registry = Self::from_sources(&[
            &SignatureAlgorithms,
            &ContentEncryptionAlgorithms,
            &key_management,
            &compression,
        ]);

        if !config.disabled_algorithms.is_empty() {
            for table in registry.by_kind.values_mut() {
                table.retain(|code, _| config.is_enabled(code));
            }
            registry.order.retain(|alg| config.is_enabled(alg.code()));
            tracing::debug!(
                disabled = config.disabled_algorithms.len(),
                remaining = registry.order.len(),
                "Disabled algorithms removed from registry"
            );
        }
        registry
    }

    /// The process-wide registry with default configuration
    pub fn shared() -> &'static AlgorithmRegistry {
        &SHARED
    }

    fn insert(&mut self, alg: Algorithm) {
        let table = self.by_kind.entry(alg.kind()).or_default();
        if table.contains_key(alg.code()) {
            tracing::warn!(code = alg.code(), "Duplicate algorithm registration ignored");
            return;
        }
        table.insert(alg.code(), alg);
        self.order.push(alg);
    }

    /// Look up an algorithm; codes are case-sensitive
    pub fn get(&self, kind: AlgorithmKind, code: &str) -> Option<Algorithm> {
        self.by_kind.get(&kind)?.get(code).copied()
    }

    /// Look up a JWS `alg`
    pub fn signature(&self, code: &str) -> Option<SignatureAlgorithm> {
        match self.get(AlgorithmKind::Signature, code)? {
            Algorithm::Signature(alg) => Some(alg),
            _ => None,
        }
    }

    /// Look up a JWE `enc`
    pub fn aead(&self, code: &str) -> Option<AeadAlgorithm> {
        match self.get(AlgorithmKind::Aead, code)? {
            Algorithm::Aead(alg) => Some(alg),
            _ => None,
        }
    }

    /// Look up a JWE `alg`
    pub fn key_management(&self, code: &str) -> Option<KeyManagementAlgorithm> {
        match self.get(AlgorithmKind::KeyManagement, code)? {
            Algorithm::KeyManagement(alg) => Some(alg),
            _ => None,
        }
    }

    /// Look up a JWE `zip`
    pub fn compression(&self, code: &str) -> Option<CompressionAlgorithm> {
        match self.get(AlgorithmKind::Compression, code)? {
            Algorithm::Compression(alg) => Some(alg),
            _ => None,
        }
    }

    /// Registered codes of one family, in registration order
    pub fn codes(&self, kind: AlgorithmKind) -> Vec<&'static str> {
        self.order
            .iter()
            .filter(|alg| alg.kind() == kind)
            .map(|alg| alg.code())
            .collect()
    }

    /// Number of registered algorithms
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether nothing is registered
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

impl Default for AlgorithmRegistry {
    fn default() -> Self {
        Self::with_config(&EngineConfig::default())
    }
}

// ============================================================================
// TESTS
// ============================================================================
