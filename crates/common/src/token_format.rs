//! Wire-format helpers shared by the token codecs and their test tooling.
//!
//! This module knows how tokens *look*, not how they are signed:
//! - Size limit applied before any decoding
//! - The legacy `T1==` sentinel
//! - Splitting and unverified inspection of JWT segments
//!
//! # Security
//!
//! Nothing here verifies a signature. Values read by
//! [`decode_jwt_header`] or [`decode_jwt_claims_unverified`] must not be
//! trusted until the owning codec has verified the token.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use thiserror::Error;

// =============================================================================
// Constants
// =============================================================================

/// Maximum accepted token size in bytes (32KB).
///
/// Checked before base64 decoding. The largest connection data a token can
/// carry is 999 four-byte characters, which percent-encodes to about 12KB
/// and base64-wraps to about 16KB in a T1 token. The generator refuses to
/// emit anything above this limit, so every token it issues decodes.
pub const MAX_TOKEN_SIZE_BYTES: usize = 32 * 1024;

/// Fixed prefix of every legacy (T1) token.
pub const LEGACY_TOKEN_SENTINEL: &str = "T1==";

// =============================================================================
// Error Types
// =============================================================================

/// Errors raised while inspecting a token's outer structure.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenFormatError {
    /// Token size exceeds [`MAX_TOKEN_SIZE_BYTES`].
    #[error("Token exceeds the maximum allowed size")]
    TokenTooLarge,

    /// Token does not have the expected structure.
    #[error("Token is malformed: {0}")]
    MalformedToken(&'static str),
}

// =============================================================================
// Functions
// =============================================================================

/// Reject tokens above [`MAX_TOKEN_SIZE_BYTES`].
///
/// # Errors
///
/// Returns `TokenFormatError::TokenTooLarge` for oversized input.
pub fn check_token_size(token: &str) -> Result<(), TokenFormatError> {
    if token.len() > MAX_TOKEN_SIZE_BYTES {
        tracing::debug!(
            target: "common.token_format",
            token_size = token.len(),
            max_size = MAX_TOKEN_SIZE_BYTES,
            "Token rejected: size exceeds maximum allowed"
        );
        return Err(TokenFormatError::TokenTooLarge);
    }
    Ok(())
}

/// Returns true when `token` carries the legacy sentinel.
#[must_use]
pub fn is_legacy_token(token: &str) -> bool {
    token.starts_with(LEGACY_TOKEN_SENTINEL)
}

/// Split a JWT into its `(header, claims, signature)` segments.
///
/// # Errors
///
/// - `TokenTooLarge` if the token exceeds the size limit
/// - `MalformedToken` unless there are exactly three non-empty segments
pub fn jwt_segments(token: &str) -> Result<(&str, &str, &str), TokenFormatError> {
    check_token_size(token)?;

    let mut parts = token.split('.');
    match (parts.next(), parts.next(), parts.next(), parts.next()) {
        (Some(header), Some(claims), Some(signature), None)
            if !header.is_empty() && !claims.is_empty() && !signature.is_empty() =>
        {
            Ok((header, claims, signature))
        }
        _ => {
            tracing::debug!(
                target: "common.token_format",
                parts = token.split('.').count(),
                "Token rejected: invalid JWT format"
            );
            Err(TokenFormatError::MalformedToken("expected three JWT segments"))
        }
    }
}

/// Decode a JWT header without verifying the signature.
///
/// # Errors
///
/// Returns `TokenFormatError` for bad structure, base64, or JSON.
pub fn decode_jwt_header(token: &str) -> Result<serde_json::Value, TokenFormatError> {
    let (header, _, _) = jwt_segments(token)?;
    decode_json_segment(header)
}

/// Decode JWT claims without verifying the signature.
///
/// # Errors
///
/// Returns `TokenFormatError` for bad structure, base64, or JSON.
pub fn decode_jwt_claims_unverified(token: &str) -> Result<serde_json::Value, TokenFormatError> {
    let (_, claims, _) = jwt_segments(token)?;
    decode_json_segment(claims)
}

fn decode_json_segment(segment: &str) -> Result<serde_json::Value, TokenFormatError> {
    let bytes = URL_SAFE_NO_PAD.decode(segment).map_err(|e| {
        tracing::debug!(target: "common.token_format", error = %e, "Failed to decode JWT segment base64");
        TokenFormatError::MalformedToken("segment is not base64url")
    })?;

    let value: serde_json::Value = serde_json::from_slice(&bytes).map_err(|e| {
        tracing::debug!(target: "common.token_format", error = %e, "Failed to parse JWT segment JSON");
        TokenFormatError::MalformedToken("segment is not JSON")
    })?;

    if value.is_object() {
        Ok(value)
    } else {
        Err(TokenFormatError::MalformedToken("segment is not a JSON object"))
    }
}

// =============================================================================
// Tests
// =============================================================================
