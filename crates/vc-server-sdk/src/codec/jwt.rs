//! JWT token format.
//!
//! HS256-signed JWT keyed with the project secret. Only the T1 format signs
//! with HMAC-SHA1. Claims:
//! `iss`, `ist`, `iat`, `nonce`, `role`, `scope`, `session_id`, and when set
//! `exp`, `connection_data`, `initial_layout_class_list`.

use super::TokenCodec;
use crate::credential::CredentialContext;
use crate::errors::TokenError;
use crate::models::{Role, TokenClaims, TokenType};
use common::secret::ExposeSecret;
use common::token_format::check_token_size;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::instrument;

/// Issuer type claim value.
pub const ISSUER_TYPE: &str = "project";

/// Capability scope granted by client tokens.
pub const SESSION_CONNECT_SCOPE: &str = "session.connect";

/// Codec for JWT tokens.
#[derive(Debug, Clone, Copy, Default)]
pub struct JwtCodec;

/// Claims as they appear on the wire. No `Debug`: it would print connection data.
#[derive(Serialize, Deserialize)]
struct WireClaims {
    iss: String,
    ist: String,
    iat: i64,
    nonce: f64,
    role: String,
    scope: String,
    session_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    exp: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    connection_data: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    initial_layout_class_list: Option<String>,
}

fn map_decode_error(err: &jsonwebtoken::errors::Error) -> TokenError {
    tracing::debug!(target: "vc_sdk.token", error = %err, "JWT verification failed");
    match err.kind() {
        ErrorKind::InvalidSignature | ErrorKind::InvalidIssuer => TokenError::InvalidSignature,
        _ => TokenError::MalformedToken(err.to_string()),
    }
}

impl TokenCodec for JwtCodec {
    fn token_type(&self) -> TokenType {
        TokenType::Jwt
    }

    #[instrument(skip_all)]
    fn encode(
        &self,
        credential: &CredentialContext,
        claims: &TokenClaims,
    ) -> Result<String, TokenError> {
        let wire = WireClaims {
            iss: credential.project_id().to_string(),
            ist: ISSUER_TYPE.to_string(),
            iat: claims.create_time,
            nonce: claims.nonce,
            role: claims.role.as_str().to_string(),
            scope: SESSION_CONNECT_SCOPE.to_string(),
            session_id: claims.session_id.clone(),
            exp: claims.expire_time,
            connection_data: claims.connection_data.clone(),
            initial_layout_class_list: claims.initial_layout_class_list.clone(),
        };

        let mut header = Header::new(Algorithm::HS256);
        header.typ = Some("JWT".to_string());

        let key = EncodingKey::from_secret(credential.project_secret().expose_secret().as_bytes());
        encode(&header, &wire, &key)
            .map_err(|e| TokenError::Configuration(format!("JWT signing operation failed: {e}")))
    }

    #[instrument(skip_all)]
    fn decode(
        &self,
        credential: &CredentialContext,
        token: &str,
    ) -> Result<TokenClaims, TokenError> {
        check_token_size(token)?;

        // Expiry is enforced by the platform; this path only verifies origin.
        let mut validation = Validation::new(Algorithm::HS256);
        validation.required_spec_claims = HashSet::new();
        validation.validate_exp = false;
        validation.validate_aud = false;
        validation.set_issuer(&[credential.project_id()]);

        let key = DecodingKey::from_secret(credential.project_secret().expose_secret().as_bytes());
        let wire = decode::<WireClaims>(token, &key, &validation)
            .map_err(|e| map_decode_error(&e))?
            .claims;

        if wire.ist != ISSUER_TYPE {
            return Err(TokenError::MalformedToken(format!(
                "unexpected ist claim: {}",
                wire.ist
            )));
        }
        if wire.scope != SESSION_CONNECT_SCOPE {
            return Err(TokenError::MalformedToken(format!(
                "unexpected scope claim: {}",
                wire.scope
            )));
        }

        Ok(TokenClaims {
            project_id: wire.iss,
            session_id: wire.session_id,
            role: Role::from(wire.role),
            create_time: wire.iat,
            nonce: wire.nonce,
            expire_time: wire.exp,
            connection_data: wire.connection_data,
            initial_layout_class_list: wire.initial_layout_class_list,
        })
    }
}
