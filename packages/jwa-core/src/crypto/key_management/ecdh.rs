//! ECDH-ES key agreement (RFC 7518 §4.6).
//!
//! ```text
//!   sender                                     recipient
//!   ──────                                     ─────────
//!   epk ← fresh key on recipient's curve
//!   Z = ECDH(epk.d, recipient.Q)               Z = ECDH(recipient.d, epk.Q)
//!   K = ConcatKDF(Z, AlgorithmID, apu, apv)    K = ConcatKDF(Z, ...)
//!   header.epk ← epk.Q (once wrapping succeeds)
//! ```

use zeroize::Zeroizing;

use super::KeyWrapHeader;
use crate::crypto::kdf::concat_kdf;
use crate::crypto::keys::EccKey;
use crate::error::{Error, Result};

/// Agree on `key_bits` of keying material with `recipient`
///
/// Uses the ephemeral key pair in `header.epk` when one is supplied and
/// generates one otherwise. Returns the keying material together with the
/// public half of the ephemeral key; the header itself is not modified.
pub(super) fn agree_as_sender(
    recipient: &EccKey,
    header: &KeyWrapHeader,
    algorithm_id: &[u8],
    key_bits: usize,
) -> Result<(Zeroizing<Vec<u8>>, EccKey)> {
    let generated;
    let ephemeral = match header.epk.as_ref() {
        Some(epk) if epk.has_private() => epk,
        Some(_) => {
            return Err(Error::UnsupportedConfiguration(
                "a caller supplied epk must include its private key".into(),
            ))
        }
        None => {
            generated = EccKey::generate(recipient.curve());
            &generated
        }
    };

    let z = ephemeral.diffie_hellman(recipient)?;
    let derived = concat_kdf(&z, key_bits, algorithm_id, &header.apu, &header.apv)?;
    Ok((derived, ephemeral.to_public()))
}

/// Recompute the sender's keying material from `header.epk`
pub(super) fn agree_as_recipient(
    recipient: &EccKey,
    header: &KeyWrapHeader,
    algorithm_id: &[u8],
    key_bits: usize,
) -> Result<Zeroizing<Vec<u8>>> {
    let epk = header.epk.as_ref().ok_or_else(|| {
        Error::UnsupportedConfiguration("ECDH-ES requires the epk header parameter".into())
    })?;
    let z = recipient.diffie_hellman(epk)?;
    concat_kdf(&z, key_bits, algorithm_id, &header.apu, &header.apv)
}

#[cfg(test)]
mod tests {
    use base64::engine::general_purpose::URL_SAFE_NO_PAD;
    use base64::Engine;

    use super::super::KeyManagementAlgorithm;
    use super::*;
    use crate::crypto::encryption::AeadAlgorithm;
    use crate::crypto::keys::{EccCurve, SecretKey};

    // RFC 7518 Appendix C
    const ALICE_D: &str = "0_NxaRPUMQoAJt50Gz8YiTr8gRTwyEaCumd-MToTmIo";
    const BOB_D: &str = "VEmDZpDXXK8p8N0Cndsxs924q6nS1RXFASRl6BfUqdw";

    fn p256(d: &str) -> EccKey {
        let d = URL_SAFE_NO_PAD.decode(d).unwrap();
        EccKey::from_private_scalar(EccCurve::P256, &d).unwrap()
    }

    #[test]
    fn test_ecdh_es_rfc7518_appendix_c() {
        let alice = p256(ALICE_D);
        let bob = p256(BOB_D);

        let mut header = KeyWrapHeader::for_enc(AeadAlgorithm::A128GCM)
            .with_party_info(b"Alice", b"Bob")
            .with_ephemeral_key(alice);
        let mut cek = [0u8; 16];
        KeyManagementAlgorithm::ECDH_ES
            .wrap_key(&SecretKey::from(bob.to_public()), &mut header, &mut cek, &mut [])
            .unwrap();
        assert_eq!(URL_SAFE_NO_PAD.encode(cek), "VqqN6vgjbSBcIijNcacQGg");

        let epk = header.epk.as_ref().unwrap();
        assert!(!epk.has_private());
        assert_eq!(
            URL_SAFE_NO_PAD.encode(epk.x()),
            "gI0GAILBdu7T53akrFmMyGcsF3n5dO7MmwNBHKW5SV0"
        );

        let mut recovered = [0u8; 16];
        KeyManagementAlgorithm::ECDH_ES
            .unwrap_key(&SecretKey::from(bob), &header, &[], &mut recovered)
            .unwrap();
        assert_eq!(recovered, cek);
    }

    #[test]
    fn test_ecdh_es_a128kw_known_answer() {
        let mut header = KeyWrapHeader::for_enc(AeadAlgorithm::A256GCM)
            .with_party_info(b"partyUInfo", b"partyVInfo")
            .with_ephemeral_key(p256(ALICE_D));
        let bob = p256(BOB_D);
        let mut cek: Vec<u8> = (0..32).collect();
        let mut wrapped = [0u8; 40];

        KeyManagementAlgorithm::ECDH_ES_A128KW
            .wrap_key(&SecretKey::from(bob.to_public()), &mut header, &mut cek, &mut wrapped)
            .unwrap();
        assert_eq!(
            hex::encode(wrapped),
            "76556a4cef4e419f572dc0f68e1a557f18663fbf72d58192f247394913bd00b2905bb721fe69c60e"
        );

        let mut out = [0u8; 32];
        KeyManagementAlgorithm::ECDH_ES_A128KW
            .unwrap_key(&SecretKey::from(bob), &header, &wrapped, &mut out)
            .unwrap();
        assert_eq!(out.as_slice(), cek.as_slice());
    }

    #[test]
    fn test_ecdh_es_a256kw_known_answer() {
        let mut header = KeyWrapHeader::for_enc(AeadAlgorithm::A256GCM)
            .with_party_info(b"partyUInfo", b"partyVInfo")
            .with_ephemeral_key(p256(ALICE_D));
        let mut cek: Vec<u8> = (0..32).collect();
        let mut wrapped = [0u8; 40];

        KeyManagementAlgorithm::ECDH_ES_A256KW
            .wrap_key(&SecretKey::from(p256(BOB_D).to_public()), &mut header, &mut cek, &mut wrapped)
            .unwrap();
        assert_eq!(
            hex::encode(wrapped),
            "56b69c8085775e256b88f80f6345db78506acd2107d12ba911fdff07dd98dd867f2105ea08d7629e"
        );
    }

    #[test]
    fn test_ecdh_es_kw_large_cek() {
        let recipient = EccKey::generate(EccCurve::P384);
        let mut header = KeyWrapHeader::default();
        let mut cek: Vec<u8> = (0..312).map(|i| (i * 7) as u8).collect();
        let mut wrapped = vec![0u8; 320];

        let n = KeyManagementAlgorithm::ECDH_ES_A192KW
            .wrap_key(&SecretKey::from(recipient.to_public()), &mut header, &mut cek, &mut wrapped)
            .unwrap();
        assert_eq!(n, 320);

        let mut out = vec![0u8; 312];
        KeyManagementAlgorithm::ECDH_ES_A192KW
            .unwrap_key(&SecretKey::from(recipient), &header, &wrapped, &mut out)
            .unwrap();
        assert_eq!(out, cek);
    }

    #[test]
    fn test_generated_epk_differs_per_wrap() {
        let recipient = SecretKey::from(EccKey::generate(EccCurve::P256).to_public());
        let mut first = KeyWrapHeader::for_enc(AeadAlgorithm::A128GCM);
        let mut second = KeyWrapHeader::for_enc(AeadAlgorithm::A128GCM);
        let mut a = [0u8; 16];
        let mut b = [0u8; 16];
        KeyManagementAlgorithm::ECDH_ES.wrap_key(&recipient, &mut first, &mut a, &mut []).unwrap();
        KeyManagementAlgorithm::ECDH_ES.wrap_key(&recipient, &mut second, &mut b, &mut []).unwrap();
        assert_ne!(a, b);
        assert_eq!(first.epk.unwrap().curve(), EccCurve::P256);
    }

    #[test]
    fn test_key_bit_length_override() {
        let recipient = EccKey::generate(EccCurve::P256);
        let mut header = KeyWrapHeader::for_enc(AeadAlgorithm::A128GCM);
        header.key_bit_length = Some(256);
        let mut cek = [0u8; 32];
        KeyManagementAlgorithm::ECDH_ES
            .wrap_key(&SecretKey::from(recipient.to_public()), &mut header, &mut cek, &mut [])
            .unwrap();

        let mut out = [0u8; 32];
        let n = KeyManagementAlgorithm::ECDH_ES
            .unwrap_key(&SecretKey::from(recipient), &header, &[], &mut out)
            .unwrap();
        assert_eq!(n, 32);
        assert_eq!(out, cek);
    }

    #[test]
    fn test_missing_epk() {
        let header = KeyWrapHeader::for_enc(AeadAlgorithm::A128GCM);
        let mut out = [0u8; 16];
        let result = KeyManagementAlgorithm::ECDH_ES.unwrap_key(
            &SecretKey::from(EccKey::generate(EccCurve::P256)),
            &header,
            &[],
            &mut out,
        );
        assert!(matches!(result, Err(Error::UnsupportedConfiguration(_))));
    }

    #[test]
    fn test_missing_enc() {
        let mut header = KeyWrapHeader::default();
        let mut cek = [0u8; 16];
        let result = KeyManagementAlgorithm::ECDH_ES.wrap_key(
            &SecretKey::from(EccKey::generate(EccCurve::P256)),
            &mut header,
            &mut cek,
            &mut [],
        );
        assert!(matches!(result, Err(Error::UnsupportedConfiguration(_))));
    }

    #[test]
    fn test_public_only_epk_rejected() {
        let recipient = EccKey::generate(EccCurve::P256);
        let mut header = KeyWrapHeader::for_enc(AeadAlgorithm::A128GCM)
            .with_ephemeral_key(EccKey::generate(EccCurve::P256).to_public());
        let mut cek = [0u8; 16];
        let result = KeyManagementAlgorithm::ECDH_ES.wrap_key(
            &SecretKey::from(recipient),
            &mut header,
            &mut cek,
            &mut [],
        );
        assert!(matches!(result, Err(Error::UnsupportedConfiguration(_))));
        assert!(header.epk.is_some());
    }

    #[test]
    fn test_epk_curve_mismatch() {
        let recipient = EccKey::generate(EccCurve::P521);
        let mut header = KeyWrapHeader::for_enc(AeadAlgorithm::A128GCM)
            .with_ephemeral_key(EccKey::generate(EccCurve::P256));
        let mut cek = [0u8; 16];
        let result = KeyManagementAlgorithm::ECDH_ES.wrap_key(
            &SecretKey::from(recipient.to_public()),
            &mut header,
            &mut cek,
            &mut [],
        );
        assert!(matches!(result, Err(Error::InvalidKey(_))));

        // The caller's key pair survives the failed wrap
        let epk = header.epk.as_ref().unwrap();
        assert!(epk.has_private());
        assert_eq!(epk.curve(), EccCurve::P256);
    }

    #[test]
    fn test_failed_key_wrap_keeps_epk() {
        let recipient = EccKey::generate(EccCurve::P256);
        let mut header = KeyWrapHeader::default().with_ephemeral_key(p256(ALICE_D));
        // 15 bytes is not a multiple of the 64-bit AES-KW block
        let mut cek = [0u8; 15];
        let mut wrapped = [0u8; 32];
        let result = KeyManagementAlgorithm::ECDH_ES_A128KW.wrap_key(
            &SecretKey::from(recipient.to_public()),
            &mut header,
            &mut cek,
            &mut wrapped,
        );
        assert!(result.is_err());
        assert!(header.epk.as_ref().unwrap().has_private());
    }
}
