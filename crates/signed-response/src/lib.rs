//! Time-bound, Ed25519-signed response tokens.
//!
//! A [`SignedResponse`] wraps a JSON payload with its creation time and a
//! signature over both. A verifier holding the matching public key accepts
//! the token for one minute after creation.
//!
//! # Signing Input
//!
//! ```text
//! signature = ed25519_sign(private_key, data || ASCII_DECIMAL(unix_nanos(created_at)))
//! ```
//!
//! See [`canonical`].
//!
//! # Example
//!
//! ```rust
//! use ed25519_dalek::SigningKey;
//! use signed_response::{Signer, Verifier};
//!
//! let key = SigningKey::from_bytes(&[7u8; 32]);
//! let signer = Signer::new(key.clone());
//! let verifier = Verifier::new(key.verifying_key());
//!
//! let token = signer
//!     .sign_to_vec(&serde_json::json!({"foo": "bar"}))
//!     .unwrap();
//!
//! let payload = verifier.open(&token).unwrap();
//! assert_eq!(payload, br#"{"foo":"bar"}"#);
//! ```

pub mod canonical;
pub mod error;
pub mod keys;
pub mod signer;
pub mod token;
pub mod verifier;

pub use canonical::{canonicalize, unix_nanos};
pub use error::{OpenError, SignError, VerifyError};
pub use keys::{
    compute_key_id, compute_key_id_from_verifying_key, load_private_key_pem, load_public_key_pem,
};
pub use signer::{sign, Signer};
pub use token::SignedResponse;
pub use verifier::{open, verify, Verifier, VALIDITY_WINDOW};
