//! Error types for signing, verification and opening of tokens.

use chrono::{DateTime, Utc};

/// Signing errors.
#[derive(Debug, thiserror::Error)]
pub enum SignError {
    /// The payload could not be encoded as JSON. No token is produced.
    #[error("payload serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Verification errors.
///
/// The boolean [`crate::Verifier::verify`] collapses all of these to `false`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VerifyError {
    #[error("token is not signed")]
    EmptySignature,

    #[error("token expired: created at {created_at}, expired at {expired_at}")]
    Expired {
        created_at: DateTime<Utc>,
        expired_at: DateTime<Utc>,
    },

    #[error("token is dated in the future: created at {created_at}, now {now}")]
    FutureDated {
        created_at: DateTime<Utc>,
        now: DateTime<Utc>,
    },

    #[error("malformed signature: {reason}")]
    MalformedSignature { reason: String },

    #[error("signature verification failed")]
    SignatureInvalid,
}

impl VerifyError {
    /// True when the token failed on time rather than on its signature.
    pub fn is_expiry(&self) -> bool {
        matches!(self, Self::Expired { .. } | Self::FutureDated { .. })
    }
}

/// Errors returned by [`crate::Verifier::open`].
#[derive(Debug, thiserror::Error)]
pub enum OpenError {
    /// Token bytes are not a valid token structure.
    #[error("malformed token: {0}")]
    MalformedToken(#[source] serde_json::Error),

    #[error("verification failed: {0}")]
    Verification(#[from] VerifyError),

    /// Token verified but its payload did not decode into the requested type.
    #[error("payload does not match expected type: {0}")]
    Payload(#[source] serde_json::Error),
}

impl OpenError {
    /// The verification failure, if the token decoded but was rejected.
    pub fn verify_error(&self) -> Option<&VerifyError> {
        match self {
            Self::Verification(e) => Some(e),
            Self::MalformedToken(_) | Self::Payload(_) => None,
        }
    }
}
