//! # Content Encryption Demo
//!
//! Encrypts a payload with AES-CBC-HMAC and AES-GCM, then shows that a
//! flipped ciphertext bit is caught before any decryption happens.
//!
//! ## Run
//!
//! ```bash
//! cargo run --example encryption_demo
//! ```

use jwa_core::crypto::{AeadAlgorithm, CompressionAlgorithm, SecretKey};
use jwa_core::Error;

fn main() -> jwa_core::Result<()> {
    println!("=== JWA Core: Content Encryption Demo ===\n");

    let aad = b"eyJhbGciOiJkaXIiLCJlbmMiOiJBMTI4Q0JDLUhTMjU2In0";
    let payload = br#"{"sub":"alice","email":"alice@example.com","email_verified":true}"#;

    // Step 1: Compress
    println!("Step 1: Compressing the payload with DEF...");
    let compressed = CompressionAlgorithm::DEF.compress(payload)?;
    println!("  {} bytes -> {} bytes", payload.len(), compressed.len());
    println!();

    // Step 2: Encrypt with each family
    println!("Step 2: Encrypting...");
    for enc in [AeadAlgorithm::A128CBC_HS256, AeadAlgorithm::A256GCM] {
        let cek = SecretKey::from(enc.generate_cek());
        let nonce = enc.generate_nonce();

        let mut ciphertext = vec![0u8; enc.cipher_text_size_bytes(compressed.len())];
        let mut tag = vec![0u8; enc.tag_size_bytes()];
        let n = enc.encrypt(&cek, &compressed, &nonce, aad, &mut ciphertext, &mut tag)?;

        println!("  {}", enc.code());
        println!("    nonce      {}", hex::encode(&nonce));
        println!("    ciphertext {} bytes", n);
        println!("    tag        {}", hex::encode(&tag));

        // Step 3: Decrypt
        let mut plaintext = vec![0u8; n];
        let m = enc.try_decrypt(&cek, &ciphertext[..n], &nonce, aad, &tag, &mut plaintext)?;
        let restored = CompressionAlgorithm::DEF.decompress(&plaintext[..m])?;
        println!("    round trip {}", restored == payload);

        // Step 4: Tamper
        ciphertext[0] ^= 0x01;
        match enc.try_decrypt(&cek, &ciphertext[..n], &nonce, aad, &tag, &mut plaintext) {
            Err(Error::IntegrityViolation) => println!("    tampered   rejected (integrity violation)"),
            other => println!("    tampered   unexpected result {other:?}"),
        }
        println!();
    }

    println!("=== Demo Complete ===");
    Ok(())
}
