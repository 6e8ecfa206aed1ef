//! Signing primitive shared by the token codecs.
//!
//! HMAC-SHA1 over the canonical payload, hex-encoded (40 lowercase chars).
//! The platform fixes this algorithm for legacy tokens, so it is not
//! configurable.

use crate::errors::TokenError;
use common::secret::{ExposeSecret, SecretString};
use rand::Rng;
use ring::hmac;
use tracing::instrument;

/// Length of a hex-encoded signature.
pub const SIGNATURE_HEX_LEN: usize = 40;

fn signing_key(secret: &SecretString) -> Result<hmac::Key, TokenError> {
    let secret = secret.expose_secret();
    if secret.is_empty() {
        return Err(TokenError::Configuration(
            "Project secret must not be empty".to_string(),
        ));
    }
    Ok(hmac::Key::new(
        hmac::HMAC_SHA1_FOR_LEGACY_USE_ONLY,
        secret.as_bytes(),
    ))
}

/// Sign `payload` with the project secret.
///
/// # Errors
///
/// Returns `TokenError::Configuration` if the secret is empty.
#[instrument(skip_all)]
pub fn sign(secret: &SecretString, payload: &[u8]) -> Result<String, TokenError> {
    let key = signing_key(secret)?;
    Ok(hex::encode(hmac::sign(&key, payload).as_ref()))
}

/// Verify a hex signature produced by [`sign`] in constant time.
///
/// # Errors
///
/// - `Configuration` if the secret is empty
/// - `InvalidSignature` if the signature is not hex or does not match
#[instrument(skip_all)]
pub fn verify(secret: &SecretString, payload: &[u8], signature_hex: &str) -> Result<(), TokenError> {
    let key = signing_key(secret)?;
    let signature = hex::decode(signature_hex).map_err(|e| {
        tracing::debug!(target: "vc_sdk.crypto", error = %e, "Signature is not valid hex");
        TokenError::InvalidSignature
    })?;
    hmac::verify(&key, payload, &signature).map_err(|_| {
        tracing::debug!(target: "vc_sdk.crypto", "Signature mismatch");
        TokenError::InvalidSignature
    })
}

/// Draw a fresh token nonce in `[0, 1)`.
#[must_use]
pub fn generate_nonce() -> f64 {
    rand::thread_rng().gen::<f64>()
}
