//! Integration tests for the `sigresp` binary.

use chrono::{Duration, SecondsFormat, Utc};
use ed25519_dalek::SigningKey;
use pkcs8::{EncodePrivateKey, EncodePublicKey, LineEnding};
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

fn sigresp_cmd() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_sigresp"));
    cmd.env_remove("SIGRESP_PRIVATE_KEY")
        .env_remove("SIGRESP_PUBLIC_KEY");
    cmd
}

struct KeyFiles {
    private: PathBuf,
    public: PathBuf,
}

fn write_keypair(dir: &Path) -> KeyFiles {
    let key = SigningKey::generate(&mut rand::thread_rng());
    let private = dir.join("private_key.pem");
    let public = dir.join("public_key.pem");

    std::fs::write(
        &private,
        key.to_pkcs8_pem(LineEnding::LF).unwrap().as_bytes(),
    )
    .unwrap();
    std::fs::write(
        &public,
        key.verifying_key().to_public_key_pem(LineEnding::LF).unwrap(),
    )
    .unwrap();

    KeyFiles { private, public }
}

fn write_payload(dir: &Path) -> PathBuf {
    let path = dir.join("payload.json");
    std::fs::write(&path, r#"{"foo": "bar"}"#).unwrap();
    path
}

fn sign(payload: &Path, keys: &KeyFiles, out: &Path, extra: &[&str]) -> std::process::Output {
    sigresp_cmd()
        .arg("sign")
        .arg(payload)
        .arg("--key")
        .arg(&keys.private)
        .arg("--out")
        .arg(out)
        .args(extra)
        .output()
        .expect("failed to run sigresp sign")
}

fn verify(token: &Path, pubkey: &Path, extra: &[&str]) -> std::process::Output {
    sigresp_cmd()
        .arg("verify")
        .arg(token)
        .arg("--pubkey")
        .arg(pubkey)
        .args(extra)
        .output()
        .expect("failed to run sigresp verify")
}

#[test]
fn test_sign_verify_roundtrip() {
    let tmp = TempDir::new().unwrap();
    let keys = write_keypair(tmp.path());
    let payload = write_payload(tmp.path());
    let token = tmp.path().join("token.json");

    let output = sign(&payload, &keys, &token, &[]);
    assert!(output.status.success(), "sign should succeed");

    let content = std::fs::read_to_string(&token).unwrap();
    assert!(content.contains("\"data\""));
    assert!(content.contains("\"created_at\""));
    assert!(content.contains("\"signature\""));

    let output = verify(&token, &keys.public, &[]);
    assert_eq!(output.status.code(), Some(0));

    let stdout = String::from_utf8_lossy(&output.stdout);
    let payload: serde_json::Value = serde_json::from_str(stdout.trim()).unwrap();
    assert_eq!(payload["foo"], "bar");
}

#[test]
fn test_sign_to_stdout() {
    let tmp = TempDir::new().unwrap();
    let keys = write_keypair(tmp.path());
    let payload = write_payload(tmp.path());

    let output = sigresp_cmd()
        .arg("sign")
        .arg(&payload)
        .arg("--key")
        .arg(&keys.private)
        .output()
        .expect("failed to run sigresp sign");
    assert!(output.status.success());

    let token: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(token["data"]["foo"], "bar");
}

#[test]
fn test_keys_from_env() {
    let tmp = TempDir::new().unwrap();
    let keys = write_keypair(tmp.path());
    let payload = write_payload(tmp.path());
    let token = tmp.path().join("token.json");

    let output = sigresp_cmd()
        .env("SIGRESP_PRIVATE_KEY", &keys.private)
        .arg("sign")
        .arg(&payload)
        .arg("--out")
        .arg(&token)
        .output()
        .unwrap();
    assert!(output.status.success());

    let output = sigresp_cmd()
        .env("SIGRESP_PUBLIC_KEY", &keys.public)
        .arg("verify")
        .arg(&token)
        .output()
        .unwrap();
    assert!(output.status.success());
}

#[test]
fn test_verify_expired_exit_code() {
    let tmp = TempDir::new().unwrap();
    let keys = write_keypair(tmp.path());
    let payload = write_payload(tmp.path());
    let token = tmp.path().join("token.json");

    let created_at =
        (Utc::now() - Duration::minutes(2)).to_rfc3339_opts(SecondsFormat::Nanos, true);
    let output = sign(&payload, &keys, &token, &["--created-at", &created_at]);
    assert!(output.status.success());

    let output = verify(&token, &keys.public, &[]);
    assert_eq!(output.status.code(), Some(2), "expired token exits 2");
    assert!(output.stdout.is_empty(), "no payload on failure");
    assert!(String::from_utf8_lossy(&output.stderr).contains("expired"));
}

#[test]
fn test_verify_tampered_exit_code() {
    let tmp = TempDir::new().unwrap();
    let keys = write_keypair(tmp.path());
    let payload = write_payload(tmp.path());
    let token = tmp.path().join("token.json");

    assert!(sign(&payload, &keys, &token, &[]).status.success());

    let content = std::fs::read_to_string(&token).unwrap();
    std::fs::write(&token, content.replace("\"bar\"", "\"wrong\"")).unwrap();

    let output = verify(&token, &keys.public, &["--quiet"]);
    assert_eq!(output.status.code(), Some(4));
    assert!(output.stdout.is_empty());
    assert!(output.stderr.is_empty(), "quiet mode prints nothing");
}

#[test]
fn test_verify_wrong_key_exit_code() {
    let tmp = TempDir::new().unwrap();
    let keys = write_keypair(tmp.path());
    let other_dir = tmp.path().join("other");
    std::fs::create_dir_all(&other_dir).unwrap();
    let other = write_keypair(&other_dir);
    let payload = write_payload(tmp.path());
    let token = tmp.path().join("token.json");

    assert!(sign(&payload, &keys, &token, &[]).status.success());

    let output = verify(&token, &other.public, &[]);
    assert_eq!(output.status.code(), Some(4));
}

#[test]
fn test_verify_future_skew_flag() {
    let tmp = TempDir::new().unwrap();
    let keys = write_keypair(tmp.path());
    let payload = write_payload(tmp.path());
    let token = tmp.path().join("token.json");

    let created_at = (Utc::now() + Duration::hours(1)).to_rfc3339_opts(SecondsFormat::Nanos, true);
    assert!(sign(&payload, &keys, &token, &["--created-at", &created_at])
        .status
        .success());

    let output = verify(&token, &keys.public, &[]);
    assert!(output.status.success(), "accepted without a skew bound");

    let output = verify(&token, &keys.public, &["--max-future-skew", "30s"]);
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_verify_malformed_token() {
    let tmp = TempDir::new().unwrap();
    let keys = write_keypair(tmp.path());
    let token = tmp.path().join("token.json");
    std::fs::write(&token, r#"{"failhere"#).unwrap();

    let output = verify(&token, &keys.public, &[]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("malformed token"));
}

#[test]
fn test_sign_rejects_invalid_payload_json() {
    let tmp = TempDir::new().unwrap();
    let keys = write_keypair(tmp.path());
    let payload = tmp.path().join("payload.json");
    std::fs::write(&payload, "{not json").unwrap();
    let token = tmp.path().join("token.json");

    let output = sign(&payload, &keys, &token, &[]);
    assert_eq!(output.status.code(), Some(1));
    assert!(!token.exists());
}

#[test]
fn test_inspect_prints_fields() {
    let tmp = TempDir::new().unwrap();
    let keys = write_keypair(tmp.path());
    let payload = write_payload(tmp.path());
    let token = tmp.path().join("token.json");

    assert!(sign(&payload, &keys, &token, &[]).status.success());

    let output = sigresp_cmd()
        .arg("inspect")
        .arg(&token)
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("unix_nanos:"));
    assert!(stdout.contains("signature:   64 bytes"));
    assert!(stdout.contains("expired:     false"));
}

#[test]
fn test_payload_signed_as_written() {
    let tmp = TempDir::new().unwrap();
    let keys = write_keypair(tmp.path());
    let token = tmp.path().join("token.json");

    // Unsorted keys and an integer wider than u64 must survive untouched.
    let original = r#"{"z":1,"a":2,"serial":123456789012345678901234567890}"#;
    let payload = tmp.path().join("payload.json");
    std::fs::write(&payload, format!("{original}\n")).unwrap();

    assert!(sign(&payload, &keys, &token, &[]).status.success());

    let content = std::fs::read_to_string(&token).unwrap();
    assert!(content.contains(original), "token embeds payload verbatim");

    let output = verify(&token, &keys.public, &[]);
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim_end(), original);
}
