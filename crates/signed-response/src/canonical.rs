//! Canonical signing input.
//!
//! ```text
//! canonical(data, created_at) = data || ASCII_DECIMAL(unix_nanos(created_at))
//! ```
//!
//! No separator, no padding. Signer and verifier both go through
//! [`canonicalize`]; any other encoding of the timestamp breaks every token.

use chrono::{DateTime, Utc};

const NANOS_PER_SECOND: i128 = 1_000_000_000;

/// Nanoseconds since the Unix epoch.
///
/// Computed in 128 bits so every `DateTime<Utc>` has a value. Inside the
/// `i64` range (years 1677..=2262) this is the usual 64-bit nanosecond count.
pub fn unix_nanos(created_at: DateTime<Utc>) -> i128 {
    i128::from(created_at.timestamp()) * NANOS_PER_SECOND
        + i128::from(created_at.timestamp_subsec_nanos())
}

/// Build the exact byte string that gets signed.
pub fn canonicalize(data: &[u8], created_at: DateTime<Utc>) -> Vec<u8> {
    let stamp = unix_nanos(created_at).to_string();

    let mut out = Vec::with_capacity(data.len() + stamp.len());
    out.extend_from_slice(data);
    out.extend_from_slice(stamp.as_bytes());
    out
}
