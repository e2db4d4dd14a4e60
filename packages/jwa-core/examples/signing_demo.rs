//! # Signature Demo
//!
//! Signs one payload with an HMAC, an RSA and an ECDSA algorithm resolved
//! from the registry, then shows that a modified payload fails verification.
//!
//! ## Run
//!
//! ```bash
//! cargo run --example signing_demo
//! ```

use jwa_core::algorithms::{AlgorithmRegistry, CredentialSelector};
use jwa_core::crypto::{EccCurve, EccKey, RsaKey, SecretKey, SymmetricKey};

fn main() -> jwa_core::Result<()> {
    println!("=== JWA Core: Signature Demo ===\n");

    // Step 1: Keys of each type
    println!("Step 1: Generating keys...");
    let hmac_key = SecretKey::from(SymmetricKey::generate(256));
    let rsa_key = SecretKey::from(RsaKey::generate(2048)?);
    let ec_key = SecretKey::from(EccKey::generate(EccCurve::P256));
    for key in [&hmac_key, &rsa_key, &ec_key] {
        println!("  {:<9} {} bits", key.key_type(), key.key_size_bits());
    }
    println!();

    // Step 2: Sign and verify
    println!("Step 2: Signing...");
    println!();
    println!("  ┌─────────────────────────────────────────────────────────────┐");
    println!("  │                   SIGNATURE FLOW                            │");
    println!("  ├─────────────────────────────────────────────────────────────┤");
    println!("  │                                                             │");
    println!("  │    \"HS256\" ──► registry ──► SignatureAlgorithm            │");
    println!("  │                                  │                          │");
    println!("  │    key ──► type + size check ◄───┘                          │");
    println!("  │                  │                                          │");
    println!("  │    payload ──► sign ──► signature                           │");
    println!("  │                                                             │");
    println!("  └─────────────────────────────────────────────────────────────┘");
    println!();

    let registry = AlgorithmRegistry::shared();
    let payload = br#"{"sub":"alice","scope":"openid"}"#;

    for (code, key) in [("HS256", &hmac_key), ("PS384", &rsa_key), ("ES256", &ec_key)] {
        let Some(alg) = registry.signature(code) else {
            println!("  {code}: not registered");
            continue;
        };
        let signature = alg.sign(key, payload)?;
        let valid = alg.verify(key, payload, &signature)?;
        let tampered = alg.verify(key, b"{\"sub\":\"mallory\"}", &signature)?;
        println!(
            "  {code}: {} byte signature, valid = {valid}, tampered payload valid = {tampered}",
            signature.len()
        );
        println!("         {}...", hex::encode(&signature[..16]));
    }
    println!();

    // Step 3: Let the selector choose
    println!("Step 3: Selecting credentials for [\"RS256\", \"ES256\"] with only an EC key...");
    let keys = [ec_key];
    let selector = CredentialSelector::new(registry);
    match selector.try_get_signing_credentials(&["RS256", "ES256"], &keys) {
        Some(creds) => println!("  Selected {}", creds.algorithm.code()),
        None => println!("  No credentials"),
    }

    println!("\n=== Demo Complete ===");
    Ok(())
}
