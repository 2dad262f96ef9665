//! Exit codes for `sigresp`. Part of the public contract.

use signed_response::OpenError;

pub const SUCCESS: i32 = 0;
pub const USAGE_ERROR: i32 = 1; // Bad input, unreadable file, malformed token
pub const EXPIRED: i32 = 2; // Token expired or dated too far in the future
pub const SIGNATURE_INVALID: i32 = 4; // Empty, malformed or non-matching signature

/// Exit code for a token that failed to open.
pub fn for_open_error(err: &OpenError) -> i32 {
    match err.verify_error() {
        Some(e) if e.is_expiry() => EXPIRED,
        Some(_) => SIGNATURE_INVALID,
        None => USAGE_ERROR,
    }
}
