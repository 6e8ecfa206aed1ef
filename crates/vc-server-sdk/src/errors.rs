use common::token_format::TokenFormatError;
use thiserror::Error;

/// Errors raised while building, signing, or verifying tokens.
///
/// Messages never include the project secret, token strings, or connection
/// data, so they are safe to log.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("'{0}' is not a valid role for T1 tokens")]
    InvalidRole(String),

    #[error("Expire time {expire_time} must be after {now} and no later than {max}")]
    InvalidExpiry { expire_time: i64, now: i64, max: i64 },

    #[error("Connection data must be less than 1000 characters, got {length}")]
    DataTooLong { length: usize },

    #[error("'{0}' is not a valid token type, expected T1 or JWT")]
    InvalidTokenType(String),

    #[error("Session ID does not belong to the project")]
    SessionOwnership,

    #[error("Token of {length} bytes exceeds the {max} byte limit")]
    TokenTooLarge { length: usize, max: usize },

    #[error("Malformed token: {0}")]
    MalformedToken(String),

    #[error("Token signature is invalid")]
    InvalidSignature,
}

impl From<TokenFormatError> for TokenError {
    fn from(err: TokenFormatError) -> Self {
        TokenError::MalformedToken(err.to_string())
    }
}
