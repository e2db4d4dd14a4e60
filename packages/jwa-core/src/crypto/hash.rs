//! Hash and HMAC helpers shared by the signature, AEAD and KDF code.

use hmac::{Hmac, Mac};
use sha1::Sha1;
use sha2::{Digest, Sha256, Sha384, Sha512};
use zeroize::Zeroizing;

use crate::error::{Error, Result};

/// Hash functions named by the JWA algorithm suite
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HashAlgorithm {
    /// SHA-1 (RSA-OAEP only)
    Sha1,
    /// SHA-256
    Sha256,
    /// SHA-384
    Sha384,
    /// SHA-512
    Sha512,
}

impl HashAlgorithm {
    /// Digest size in bits
    pub const fn output_size_bits(&self) -> usize {
        match self {
            HashAlgorithm::Sha1 => 160,
            HashAlgorithm::Sha256 => 256,
            HashAlgorithm::Sha384 => 384,
            HashAlgorithm::Sha512 => 512,
        }
    }

    /// Digest size in bytes
    pub const fn output_size_bytes(&self) -> usize {
        self.output_size_bits() / 8
    }

    /// Hash the concatenation of `parts`
    pub fn digest(&self, parts: &[&[u8]]) -> Vec<u8> {
        fn run<D: Digest>(parts: &[&[u8]]) -> Vec<u8> {
            let mut hasher = D::new();
            for part in parts {
                hasher.update(part);
            }
            hasher.finalize().to_vec()
        }

        match self {
            HashAlgorithm::Sha1 => run::<Sha1>(parts),
            HashAlgorithm::Sha256 => run::<Sha256>(parts),
            HashAlgorithm::Sha384 => run::<Sha384>(parts),
            HashAlgorithm::Sha512 => run::<Sha512>(parts),
        }
    }

    /// HMAC over the concatenation of `parts`, full digest length
    pub fn hmac(&self, key: &[u8], parts: &[&[u8]]) -> Result<Zeroizing<Vec<u8>>> {
        fn run<M: Mac + hmac::digest::KeyInit>(
            key: &[u8],
            parts: &[&[u8]],
        ) -> Result<Zeroizing<Vec<u8>>> {
            let mut mac = <M as Mac>::new_from_slice(key)
                .map_err(|_| Error::InvalidKey("HMAC key rejected".into()))?;
            for part in parts {
                mac.update(part);
            }
            Ok(Zeroizing::new(mac.finalize().into_bytes().to_vec()))
        }

        match self {
            HashAlgorithm::Sha1 => run::<Hmac<Sha1>>(key, parts),
            HashAlgorithm::Sha256 => run::<Hmac<Sha256>>(key, parts),
            HashAlgorithm::Sha384 => run::<Hmac<Sha384>>(key, parts),
            HashAlgorithm::Sha512 => run::<Hmac<Sha512>>(key, parts),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_sizes() {
        for hash in [
            HashAlgorithm::Sha1,
            HashAlgorithm::Sha256,
            HashAlgorithm::Sha384,
            HashAlgorithm::Sha512,
        ] {
            assert_eq!(hash.digest(&[b"abc"]).len(), hash.output_size_bytes());
            assert_eq!(
                hash.hmac(b"key", &[b"abc"]).unwrap().len(),
                hash.output_size_bytes()
            );
        }
    }

    #[test]
    fn test_digest_concatenates_parts() {
        let hash = HashAlgorithm::Sha256;
        assert_eq!(hash.digest(&[b"ab", b"c"]), hash.digest(&[b"abc"]));
        assert_eq!(
            hex::encode(hash.digest(&[b"abc"])),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_hmac_sha256_vector() {
        // RFC 4231 test case 2
        let mac = HashAlgorithm::Sha256
            .hmac(b"Jefe", &[b"what do ya want ", b"for nothing?"])
            .unwrap();
        assert_eq!(
            hex::encode(mac.as_slice()),
            "5bdcc146bf60754e6a042426089575c75a003f089d2739839dec58b964ec3843"
        );
    }
}
