//! Key loading and key identifiers.
//!
//! Keys are generated and stored elsewhere; these helpers only read them.

use anyhow::{Context, Result};
use ed25519_dalek::{SigningKey, VerifyingKey};
use sha2::{Digest, Sha256};
use std::fs;
use std::path::Path;

/// Compute key_id from SPKI-encoded public key bytes.
///
/// Returns `sha256:<lowercase-hex>`.
pub fn compute_key_id(spki_bytes: &[u8]) -> String {
    format!("sha256:{}", hex::encode(Sha256::digest(spki_bytes)))
}

/// Compute key_id from a VerifyingKey.
pub fn compute_key_id_from_verifying_key(key: &VerifyingKey) -> Result<String> {
    use pkcs8::EncodePublicKey;

    let doc = key
        .to_public_key_der()
        .context("failed to encode public key as SPKI DER")?;
    Ok(compute_key_id(doc.as_bytes()))
}

/// Read the key a [`crate::Verifier`] checks tokens against (SPKI PEM).
pub fn load_public_key_pem(path: &Path) -> Result<VerifyingKey> {
    use pkcs8::DecodePublicKey;

    let pem = read_pem(path, "verification key")?;
    VerifyingKey::from_public_key_pem(&pem).with_context(|| {
        format!(
            "{} is not an SPKI PEM ed25519 verification key",
            path.display()
        )
    })
}

/// Read the key a [`crate::Signer`] signs tokens with (PKCS#8 PEM).
pub fn load_private_key_pem(path: &Path) -> Result<SigningKey> {
    use pkcs8::DecodePrivateKey;

    let pem = read_pem(path, "signing key")?;
    SigningKey::from_pkcs8_pem(&pem).with_context(|| {
        format!(
            "{} is not a PKCS#8 PEM ed25519 signing key",
            path.display()
        )
    })
}

fn read_pem(path: &Path, role: &str) -> Result<String> {
    fs::read_to_string(path)
        .with_context(|| format!("failed to read {role} file: {}", path.display()))
}
