//! # Key Management Demo
//!
//! Transports one content-encryption key with several JWE `alg` values and
//! prints the header parameters each one produces.
//!
//! ## Run
//!
//! ```bash
//! cargo run --example key_wrap_demo
//! ```

use jwa_core::crypto::{
    AeadAlgorithm, EccCurve, EccKey, KeyManagementAlgorithm, KeyWrapHeader, RsaKey, SecretKey,
    SymmetricKey,
};

fn show(label: &str, header: &KeyWrapHeader, wrapped: &[u8]) {
    println!("  {label}");
    println!("    encrypted key {} bytes", wrapped.len());
    if let Some(epk) = &header.epk {
        println!("    epk           {} x={}", epk.curve().name(), hex::encode(epk.x()));
    }
    if !header.iv.is_empty() {
        println!("    iv/tag        {} / {}", hex::encode(&header.iv), hex::encode(&header.tag));
    }
    if let Some(p2c) = header.p2c {
        println!("    p2s/p2c       {} / {p2c}", hex::encode(&header.p2s));
    }
}

fn main() -> jwa_core::Result<()> {
    println!("=== JWA Core: Key Management Demo ===\n");

    let enc = AeadAlgorithm::A256GCM;
    let cek = enc.generate_cek();
    let cek_len = cek.as_bytes().len();

    let recipient_ec = EccKey::generate(EccCurve::P384);
    let recipient_rsa = RsaKey::generate(2048)?;
    let cases = [
        (
            KeyManagementAlgorithm::A256KW,
            SecretKey::from(SymmetricKey::generate(256)),
            None,
        ),
        (
            KeyManagementAlgorithm::A128GCMKW,
            SecretKey::from(SymmetricKey::generate(128)),
            None,
        ),
        (
            KeyManagementAlgorithm::ECDH_ES_A256KW,
            SecretKey::from(recipient_ec.to_public()),
            Some(SecretKey::from(recipient_ec)),
        ),
        (
            KeyManagementAlgorithm::RSA_OAEP_256,
            SecretKey::from(recipient_rsa.to_public()),
            Some(SecretKey::from(recipient_rsa)),
        ),
        (
            KeyManagementAlgorithm::PBES2_HS256_A128KW.with_max_iterations(10_000),
            SecretKey::from(SymmetricKey::from_bytes(b"correct horse battery staple")),
            None,
        ),
    ];

    for (alg, wrapping_key, unwrapping_key) in &cases {
        let mut header = KeyWrapHeader::for_enc(enc).with_party_info(b"issuer", b"client");
        let mut transported = cek.as_bytes().to_vec();
        let mut wrapped = vec![0u8; alg.wrapped_key_size_bytes(wrapping_key, cek_len)?];
        let n = alg.wrap_key(wrapping_key, &mut header, &mut transported, &mut wrapped)?;
        show(alg.code(), &header, &wrapped[..n]);

        let mut recovered = vec![0u8; cek_len];
        let key = unwrapping_key.as_ref().unwrap_or(wrapping_key);
        let m = alg.unwrap_key(key, &header, &wrapped[..n], &mut recovered)?;
        println!("    recovered     {}", recovered[..m] == *cek.as_bytes());
        println!();
    }

    // ECDH-ES in direct mode agrees on the CEK instead of transporting one
    println!("  ECDH-ES (direct)");
    let recipient = EccKey::generate(EccCurve::P256);
    let mut header = KeyWrapHeader::for_enc(enc);
    let mut agreed = vec![0u8; cek_len];
    KeyManagementAlgorithm::ECDH_ES.wrap_key(
        &SecretKey::from(recipient.to_public()),
        &mut header,
        &mut agreed,
        &mut [],
    )?;
    println!("    agreed CEK    {}", hex::encode(&agreed));

    println!("\n=== Demo Complete ===");
    Ok(())
}
