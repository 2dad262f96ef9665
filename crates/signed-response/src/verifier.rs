//! Token verification.
//!
//! Checks run in this order and stop at the first failure:
//!
//! 1. signature is non-empty
//! 2. `created_at + VALIDITY_WINDOW` is not before now
//! 3. `created_at` is not beyond now + max future skew (only when configured)
//! 4. ed25519 signature over `canonicalize(data, created_at)`
//!
//! [`Verifier::verify`] returns a bool. [`Verifier::check`] returns the
//! reason, [`Verifier::open`] decodes wire bytes first and releases the
//! payload only on success.

use chrono::{DateTime, Duration, Utc};
use ed25519_dalek::{Signature, Verifier as _, VerifyingKey};
use serde::de::DeserializeOwned;

use crate::error::{OpenError, VerifyError};
use crate::keys::compute_key_id_from_verifying_key;
use crate::token::SignedResponse;

/// How long after `created_at` a token is accepted.
pub const VALIDITY_WINDOW: Duration = Duration::minutes(1);

/// Verifies tokens against one bound public key.
#[derive(Debug, Clone)]
pub struct Verifier {
    key: VerifyingKey,
    key_id: String,
    max_future_skew: Option<Duration>,
}

impl Verifier {
    /// Verifier with no upper bound on `created_at`.
    pub fn new(key: VerifyingKey) -> Self {
        let key_id =
            compute_key_id_from_verifying_key(&key).unwrap_or_else(|_| "unknown".to_string());
        Self {
            key,
            key_id,
            max_future_skew: None,
        }
    }

    /// Reject tokens whose `created_at` is more than `skew` ahead of now.
    ///
    /// Without this a forward-dated token stays valid until its own
    /// `created_at + VALIDITY_WINDOW`.
    pub fn with_max_future_skew(mut self, skew: Duration) -> Self {
        self.max_future_skew = Some(skew);
        self
    }

    pub fn verifying_key(&self) -> &VerifyingKey {
        &self.key
    }

    pub fn key_id(&self) -> &str {
        &self.key_id
    }

    /// True iff the token passes every check right now.
    pub fn verify(&self, response: &SignedResponse) -> bool {
        self.check(response).is_ok()
    }

    pub fn verify_at(&self, response: &SignedResponse, now: DateTime<Utc>) -> bool {
        self.check_at(response, now).is_ok()
    }

    /// Same checks as [`Verifier::verify`], naming the failure.
    pub fn check(&self, response: &SignedResponse) -> Result<(), VerifyError> {
        self.check_at(response, Utc::now())
    }

    pub fn check_at(
        &self,
        response: &SignedResponse,
        now: DateTime<Utc>,
    ) -> Result<(), VerifyError> {
        let result = self.run_checks(response, now);
        match &result {
            Ok(()) => tracing::debug!(
                key_id = %self.key_id,
                created_at = %response.created_at,
                "response verified"
            ),
            Err(e) => tracing::debug!(
                key_id = %self.key_id,
                created_at = %response.created_at,
                error = %e,
                "response rejected"
            ),
        }
        result
    }

    fn run_checks(&self, response: &SignedResponse, now: DateTime<Utc>) -> Result<(), VerifyError> {
        if response.signature.is_empty() {
            return Err(VerifyError::EmptySignature);
        }

        // Overflow past the maximum representable instant never expires.
        if let Some(expired_at) = response.created_at.checked_add_signed(VALIDITY_WINDOW) {
            if now > expired_at {
                return Err(VerifyError::Expired {
                    created_at: response.created_at,
                    expired_at,
                });
            }
        }

        if response.created_at > now {
            match self.max_future_skew {
                Some(skew) if response.created_at - now > skew => {
                    return Err(VerifyError::FutureDated {
                        created_at: response.created_at,
                        now,
                    });
                }
                Some(_) => {}
                None => tracing::warn!(
                    key_id = %self.key_id,
                    created_at = %response.created_at,
                    now = %now,
                    "response is dated in the future"
                ),
            }
        }

        let signature =
            Signature::from_slice(&response.signature).map_err(|e| VerifyError::MalformedSignature {
                reason: format!("invalid signature bytes: {e}"),
            })?;

        self.key
            .verify(&response.canonical_bytes(), &signature)
            .map_err(|_| VerifyError::SignatureInvalid)
    }

    /// Decode `token` and verify it, returning the raw payload bytes.
    pub fn open(&self, token: &[u8]) -> Result<Vec<u8>, OpenError> {
        let response = SignedResponse::from_slice(token).map_err(OpenError::MalformedToken)?;
        self.check(&response)?;
        Ok(response.into_data())
    }

    /// [`Verifier::open`], then decode the payload into `T`.
    pub fn open_as<T>(&self, token: &[u8]) -> Result<T, OpenError>
    where
        T: DeserializeOwned,
    {
        let data = self.open(token)?;
        serde_json::from_slice(&data).map_err(OpenError::Payload)
    }
}

/// Verify with an explicit key.
pub fn verify(response: &SignedResponse, key: &VerifyingKey) -> bool {
    Verifier::new(*key).verify(response)
}

/// Open with an explicit key.
pub fn open(token: &[u8], key: &VerifyingKey) -> Result<Vec<u8>, OpenError> {
    Verifier::new(*key).open(token)
}
