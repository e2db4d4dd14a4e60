//! # Engine Configuration
//!
//! Tunables that an operator may want to change without touching code.
//! Every field has a default, so an empty JSON object is a valid config.
//!
//! ```text
//! {
//!   "pbes2_max_iterations": { "hs256": 310000, "hs384": 250000, "hs512": 120000 },
//!   "max_inflated_bytes": 10485760,
//!   "disabled_algorithms": ["RSA1_5"]
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default inflate limit for `DEF` decompression (10 MiB)
pub const DEFAULT_MAX_INFLATED_BYTES: usize = 10 * 1024 * 1024;

/// Upper bounds on the PBES2 iteration count (`p2c`), per hash
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Pbes2Limits {
    /// Limit for PBES2-HS256+A128KW
    pub hs256: u32,
    /// Limit for PBES2-HS384+A192KW
    pub hs384: u32,
    /// Limit for PBES2-HS512+A256KW
    pub hs512: u32,
}

impl Default for Pbes2Limits {
    fn default() -> Self {
        // OWASP 2023 PBKDF2 recommendations
        Self {
            hs256: 310_000,
            hs384: 250_000,
            hs512: 120_000,
        }
    }
}

/// Configuration for building an algorithm registry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Maximum accepted PBES2 iteration counts
    pub pbes2_max_iterations: Pbes2Limits,
    /// Maximum size of a decompressed `DEF` payload
    pub max_inflated_bytes: usize,
    /// Algorithm codes left out of the registry
    pub disabled_algorithms: Vec<String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            pbes2_max_iterations: Pbes2Limits::default(),
            max_inflated_bytes: DEFAULT_MAX_INFLATED_BYTES,
            disabled_algorithms: Vec::new(),
        }
    }
}

impl EngineConfig {
    /// Parse and validate a JSON configuration document
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that would make an algorithm unusable
    pub fn validate(&self) -> Result<()> {
        let limits = &self.pbes2_max_iterations;
        if limits.hs256 == 0 || limits.hs384 == 0 || limits.hs512 == 0 {
            return Err(Error::InvalidConfig(
                "PBES2 iteration limits must be positive".into(),
            ));
        }
        if self.max_inflated_bytes == 0 {
            return Err(Error::InvalidConfig(
                "max_inflated_bytes must be positive".into(),
            ));
        }
        Ok(())
    }

    /// Whether an algorithm code may be registered
    pub fn is_enabled(&self, code: &str) -> bool {
        !self.disabled_algorithms.iter().any(|c| c == code)
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = EngineConfig::from_json("{}").unwrap();
        assert_eq!(config, EngineConfig::default());
        assert_eq!(config.pbes2_max_iterations.hs384, 250_000);
    }

    #[test]
    fn test_partial_limits() {
        let config =
            EngineConfig::from_json(r#"{"pbes2_max_iterations":{"hs512":5000}}"#).unwrap();
        assert_eq!(config.pbes2_max_iterations.hs512, 5000);
        assert_eq!(config.pbes2_max_iterations.hs256, 310_000);
    }

    #[test]
    fn test_disabled_algorithms() {
        let config = EngineConfig::from_json(r#"{"disabled_algorithms":["RSA1_5"]}"#).unwrap();
        assert!(!config.is_enabled("RSA1_5"));
        assert!(config.is_enabled("RSA-OAEP"));
    }

    #[test]
    fn test_zero_limit_rejected() {
        let result = EngineConfig::from_json(r#"{"pbes2_max_iterations":{"hs256":0}}"#);
        assert!(matches!(result, Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn test_malformed_json_rejected() {
        assert!(matches!(
            EngineConfig::from_json("{"),
            Err(Error::InvalidConfig(_))
        ));
    }
}
