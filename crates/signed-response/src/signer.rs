//! Token signing.
//!
//! ```text
//! 1. data       = JSON(payload)
//! 2. created_at = explicit timestamp, or now when unset/zero
//! 3. signature  = ed25519_sign(private_key, data || unix_nanos(created_at))
//! ```

use chrono::{DateTime, Utc};
use ed25519_dalek::{SigningKey, VerifyingKey};
use serde::Serialize;

use crate::error::SignError;
use crate::keys::compute_key_id_from_verifying_key;
use crate::token::SignedResponse;

/// Signs payloads with one bound private key.
///
/// Immutable after construction; share it by reference across threads.
#[derive(Clone)]
pub struct Signer {
    key: SigningKey,
    key_id: String,
}

impl Signer {
    pub fn new(key: SigningKey) -> Self {
        let key_id = compute_key_id_from_verifying_key(&key.verifying_key())
            .unwrap_or_else(|_| "unknown".to_string());
        Self { key, key_id }
    }

    /// The public half of the bound key.
    pub fn verifying_key(&self) -> VerifyingKey {
        self.key.verifying_key()
    }

    /// `sha256:<hex>` of the public key, for logs.
    pub fn key_id(&self) -> &str {
        &self.key_id
    }

    /// Sign `payload`, stamped with the current time.
    pub fn sign<T>(&self, payload: &T) -> Result<SignedResponse, SignError>
    where
        T: Serialize + ?Sized,
    {
        self.sign_at(payload, None)
    }

    /// Sign `payload` with an explicit creation time.
    ///
    /// `None` and the zero instant both mean now.
    pub fn sign_at<T>(
        &self,
        payload: &T,
        created_at: Option<DateTime<Utc>>,
    ) -> Result<SignedResponse, SignError>
    where
        T: Serialize + ?Sized,
    {
        let mut response = SignedResponse::from_payload(payload, created_at)?;
        self.seal(&mut response);
        Ok(response)
    }

    /// Sign a token whose `data` is already set.
    pub fn seal(&self, response: &mut SignedResponse) {
        response.sign(&self.key);
        tracing::debug!(
            key_id = %self.key_id,
            created_at = %response.created_at,
            data_len = response.data_bytes().len(),
            "signed response"
        );
    }

    /// Sign `payload` and encode the token to its JSON wire form.
    pub fn sign_to_vec<T>(&self, payload: &T) -> Result<Vec<u8>, SignError>
    where
        T: Serialize + ?Sized,
    {
        let response = self.sign(payload)?;
        Ok(response.to_vec()?)
    }
}

impl std::fmt::Debug for Signer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Signer")
            .field("key_id", &self.key_id)
            .finish_non_exhaustive()
    }
}

/// Sign `payload` with an explicit key, stamped with the current time.
pub fn sign<T>(payload: &T, key: &SigningKey) -> Result<SignedResponse, SignError>
where
    T: Serialize + ?Sized,
{
    let mut response = SignedResponse::from_payload(payload, None)?;
    response.sign(key);
    Ok(response)
}
