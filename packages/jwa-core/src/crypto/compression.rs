//! JWE payload compression (`zip`, RFC 7516 §4.1.3).
//!
//! `DEF` is raw DEFLATE (RFC 1951) with no zlib or gzip framing. Inflation
//! is capped so that a small token cannot expand without bound.

use std::io::{Read, Write};

use flate2::read::DeflateDecoder;
use flate2::write::DeflateEncoder;
use flate2::Compression;

use crate::algorithms::{AlgorithmDescriptor, AlgorithmKind};
use crate::config::DEFAULT_MAX_INFLATED_BYTES;
use crate::crypto::sizes::KeySizes;
use crate::error::{Error, Result};

/// A JWE compression algorithm
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CompressionAlgorithm {
    descriptor: AlgorithmDescriptor,
    level: u32,
    max_inflated_bytes: usize,
}

impl CompressionAlgorithm {
    /// Raw DEFLATE
    pub const DEF: Self = Self {
        descriptor: AlgorithmDescriptor::new(
            "DEF",
            AlgorithmKind::Compression,
            None,
            KeySizes::ANY,
        ),
        level: 6,
        max_inflated_bytes: DEFAULT_MAX_INFLATED_BYTES,
    };

    /// Every compression algorithm, in registration order
    pub const ALL: [Self; 1] = [Self::DEF];

    /// A copy with a different decompression limit
    pub const fn with_max_inflated_bytes(self, limit: usize) -> Self {
        Self {
            max_inflated_bytes: limit,
            ..self
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

    /// Largest output [`decompress`](Self::decompress) will produce
    pub fn max_inflated_bytes(&self) -> usize {
        self.max_inflated_bytes
    }

    /// Compress a payload
    pub fn compress(&self, input: &[u8]) -> Result<Vec<u8>> {
        let mut encoder = DeflateEncoder::new(Vec::new(), Compression::new(self.level));
        encoder
            .write_all(input)
            .and_then(|_| encoder.finish())
            .map_err(|e| Error::CompressionFailed(e.to_string()))
    }

    /// Decompress a payload, failing if it would exceed the inflate limit
    pub fn decompress(&self, input: &[u8]) -> Result<Vec<u8>> {
        let limit = self.max_inflated_bytes;
        let mut out = Vec::new();
        // One byte past the limit is enough to tell that it was exceeded
        DeflateDecoder::new(input)
            .take((limit as u64).saturating_add(1))
            .read_to_end(&mut out)
            .map_err(|e| Error::CompressionFailed(e.to_string()))?;

        if out.len() > limit {
            tracing::warn!(limit, "inflated payload exceeds limit");
            return Err(Error::CompressionFailed(format!(
                "inflated payload exceeds {limit} bytes"
            )));
        }
        Ok(out)
    }
}

// ============================================================================
// TESTS
// ============================================================================
