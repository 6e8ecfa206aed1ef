//! Token wire formats.
//!
//! Each [`TokenType`] has its own [`TokenCodec`]. The two byte layouts are
//! unrelated, so they share only the interface and the claim model.

pub mod jwt;
pub mod legacy;

use crate::credential::CredentialContext;
use crate::errors::TokenError;
use crate::models::{TokenClaims, TokenType};
use common::token_format;

pub use jwt::JwtCodec;
pub use legacy::LegacyCodec;

/// Converts claims to and from one token format.
pub trait TokenCodec: Send + Sync {
    /// The format this codec produces.
    fn token_type(&self) -> TokenType;

    /// Canonicalize, sign, and assemble `claims` into a token string.
    ///
    /// # Errors
    ///
    /// Returns `TokenError` if signing fails.
    fn encode(
        &self,
        credential: &CredentialContext,
        claims: &TokenClaims,
    ) -> Result<String, TokenError>;

    /// Parse `token`, verify its signature against `credential`, and return its claims.
    ///
    /// # Errors
    ///
    /// - `MalformedToken` if the token cannot be parsed
    /// - `InvalidSignature` if the signature does not match or the token was
    ///   issued for another project
    fn decode(&self, credential: &CredentialContext, token: &str)
        -> Result<TokenClaims, TokenError>;
}

/// The codec for `token_type`.
#[must_use]
pub fn codec_for(token_type: TokenType) -> &'static dyn TokenCodec {
    match token_type {
        TokenType::T1 => &LegacyCodec,
        TokenType::Jwt => &JwtCodec,
    }
}

/// Detect the format of `token` and decode it with the matching codec.
///
/// # Errors
///
/// See [`TokenCodec::decode`].
pub fn decode_token(credential: &CredentialContext, token: &str) -> Result<TokenClaims, TokenError> {
    let token_type = if token_format::is_legacy_token(token) {
        TokenType::T1
    } else {
        TokenType::Jwt
    };
    codec_for(token_type).decode(credential, token)
}
