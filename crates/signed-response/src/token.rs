//! The token exchanged between signer and verifier.
//!
//! Wire form (JSON):
//!
//! ```json
//! {
//!   "data": {"foo": "bar"},
//!   "created_at": "2026-10-19T12:00:00.123456789Z",
//!   "signature": "<base64>"
//! }
//! ```

use chrono::{DateTime, Utc};
use ed25519_dalek::{Signer as _, SigningKey};
use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;

use crate::canonical::canonicalize;
use crate::error::SignError;

/// Signed, time-stamped envelope around a JSON payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignedResponse {
    /// Serialized payload, kept byte-for-byte.
    pub data: Box<RawValue>,

    /// Creation time, nanosecond precision.
    pub created_at: DateTime<Utc>,

    /// Ed25519 signature over `canonicalize(data, created_at)`.
    #[serde(default, with = "base64_bytes")]
    pub signature: Vec<u8>,
}

impl SignedResponse {
    /// Unsigned token around already-serialized data.
    ///
    /// `created_at` starts at the zero instant and is replaced by the
    /// current time when the token is signed.
    pub fn new(data: Box<RawValue>) -> Self {
        Self {
            data,
            created_at: DateTime::<Utc>::default(),
            signature: Vec::new(),
        }
    }

    /// Unsigned token around `payload` serialized as JSON.
    pub fn from_payload<T>(payload: &T, created_at: Option<DateTime<Utc>>) -> Result<Self, SignError>
    where
        T: Serialize + ?Sized,
    {
        let data = serde_json::value::to_raw_value(payload)?;
        let mut response = Self::new(data);
        if let Some(ts) = created_at {
            response.created_at = ts;
        }
        Ok(response)
    }

    /// Decode a token from its JSON wire form.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(bytes)
    }

    /// Encode the token to its JSON wire form.
    pub fn to_vec(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }

    /// Raw payload bytes.
    pub fn data_bytes(&self) -> &[u8] {
        self.data.get().as_bytes()
    }

    /// Consume the token, returning the raw payload bytes.
    pub fn into_data(self) -> Vec<u8> {
        let data: Box<str> = self.data.into();
        data.into_string().into_bytes()
    }

    /// The bytes the signature covers.
    pub fn canonical_bytes(&self) -> Vec<u8> {
        canonicalize(self.data_bytes(), self.created_at)
    }

    pub fn is_signed(&self) -> bool {
        !self.signature.is_empty()
    }

    /// Sign in place.
    ///
    /// A zero `created_at` is set to now first; any other value is kept.
    pub fn sign(&mut self, key: &SigningKey) {
        if is_zero(self.created_at) {
            self.created_at = Utc::now();
        }

        let signature = key.sign(&self.canonical_bytes());
        self.signature = signature.to_bytes().to_vec();
    }
}

/// The Unix epoch counts as "unset".
pub(crate) fn is_zero(ts: DateTime<Utc>) -> bool {
    ts == DateTime::<Utc>::default()
}

/// Standard base64 for the signature field. `null` decodes to empty.
mod base64_bytes {
    use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&BASE64.encode(bytes))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<u8>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<String>::deserialize(deserializer)? {
            Some(encoded) => BASE64
                .decode(encoded.as_bytes())
                .map_err(|e| serde::de::Error::custom(format!("invalid base64 signature: {e}"))),
            None => Ok(Vec::new()),
        }
    }
}
