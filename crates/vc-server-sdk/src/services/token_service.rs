use crate::codec::codec_for;
use crate::credential::CredentialContext;
use crate::crypto;
use crate::errors::TokenError;
use crate::models::{TokenClaims, TokenOptions, TokenType};
use crate::session::belongs_to_project;
use chrono::Utc;
use common::observability::hash_for_correlation;
use common::token_format::MAX_TOKEN_SIZE_BYTES;
use tracing::instrument;

/// Latest allowed expiry, relative to now (30 days).
pub const MAX_TOKEN_LIFETIME_SECONDS: i64 = 30 * 24 * 60 * 60;

/// Connection data must be strictly shorter than this many characters.
pub const MAX_CONNECTION_DATA_CHARS: usize = 1000;

/// Mint a signed client token for `session_id`.
///
/// Validates session ownership, role, expiry, and connection data (in that
/// order), then encodes with the codec selected by `options` (JWT when
/// unset). Each call embeds the current time and a fresh nonce, so identical
/// inputs yield different tokens.
///
/// # Errors
///
/// - `SessionOwnership` if `session_id` was not created for this project
/// - `InvalidRole` for a role outside the fixed set in a T1 token
/// - `InvalidExpiry` if the expiry is not in `(now, now + 30 days]`
/// - `DataTooLong` if connection data is 1000 characters or more
/// - `TokenTooLarge` if the encoded token would exceed what `decode_token` accepts
#[instrument(skip_all, fields(session = %hash_for_correlation(session_id)))]
pub fn generate_token(
    credential: &CredentialContext,
    session_id: &str,
    options: &TokenOptions,
) -> Result<String, TokenError> {
    generate_token_at(credential, session_id, options, Utc::now().timestamp())
}

/// [`generate_token`] against an explicit `now` (epoch seconds).
pub(crate) fn generate_token_at(
    credential: &CredentialContext,
    session_id: &str,
    options: &TokenOptions,
    now: i64,
) -> Result<String, TokenError> {
    let token_type = options.token_type().unwrap_or_default();
    let claims = build_claims(credential, session_id, options, now)?;
    let token = codec_for(token_type).encode(credential, &claims)?;
    check_encoded_size(&token)?;

    tracing::debug!(
        target: "vc_sdk.token",
        project = %hash_for_correlation(credential.project_id()),
        token_type = %token_type,
        role = %claims.role,
        has_expiry = claims.expire_time.is_some(),
        "Token issued"
    );

    Ok(token)
}

/// Validate `options` and turn them into claims.
pub(crate) fn build_claims(
    credential: &CredentialContext,
    session_id: &str,
    options: &TokenOptions,
    now: i64,
) -> Result<TokenClaims, TokenError> {
    if !belongs_to_project(session_id, credential.project_id()) {
        tracing::debug!(target: "vc_sdk.token", "Token rejected: session not owned by project");
        return Err(TokenError::SessionOwnership);
    }

    let token_type = options.token_type().unwrap_or_default();
    let role = options.role().cloned().unwrap_or_default();
    if token_type == TokenType::T1 && !role.is_recognized() {
        tracing::debug!(target: "vc_sdk.token", role = %role, "Token rejected: unknown role for T1");
        return Err(TokenError::InvalidRole(role.to_string()));
    }

    let expire_time = options
        .expire_time()
        .map(|exp| validate_expire_time(exp.timestamp(), now))
        .transpose()?;

    let connection_data = options
        .data()
        .map(|data| validate_connection_data(data).map(|()| data.to_string()))
        .transpose()?;

    Ok(TokenClaims {
        project_id: credential.project_id().to_string(),
        session_id: session_id.to_string(),
        role,
        create_time: now,
        nonce: crypto::generate_nonce(),
        expire_time,
        connection_data,
        initial_layout_class_list: options.initial_layout_class_list().map(|l| l.encoded()),
    })
}

/// Accept `expire_time` only inside `(now, now + 30 days]`.
pub(crate) fn validate_expire_time(expire_time: i64, now: i64) -> Result<i64, TokenError> {
    let max = now.saturating_add(MAX_TOKEN_LIFETIME_SECONDS);
    if expire_time <= now || expire_time > max {
        tracing::debug!(
            target: "vc_sdk.token",
            expire_time = expire_time,
            now = now,
            max_allowed = max,
            "Token rejected: expire time outside allowed window"
        );
        return Err(TokenError::InvalidExpiry {
            expire_time,
            now,
            max,
        });
    }
    Ok(expire_time)
}

/// Connection data is limited by character count, not bytes.
pub(crate) fn validate_connection_data(data: &str) -> Result<(), TokenError> {
    let length = data.chars().count();
    if length >= MAX_CONNECTION_DATA_CHARS {
        tracing::debug!(
            target: "vc_sdk.token",
            length = length,
            "Token rejected: connection data too long"
        );
        return Err(TokenError::DataTooLong { length });
    }
    Ok(())
}

/// An issued token must stay within the decoders' size limit.
pub(crate) fn check_encoded_size(token: &str) -> Result<(), TokenError> {
    if token.len() > MAX_TOKEN_SIZE_BYTES {
        tracing::debug!(
            target: "vc_sdk.token",
            length = token.len(),
            max_size = MAX_TOKEN_SIZE_BYTES,
            "Token rejected: encoded size exceeds maximum allowed"
        );
        return Err(TokenError::TokenTooLarge {
            length: token.len(),
            max: MAX_TOKEN_SIZE_BYTES,
        });
    }
    Ok(())
}
