//! Legacy `T1` token format.
//!
//! ```text
//! T1== base64( partner_id=<id>&sig=<hmac> ":" role=..&session_id=..&create_time=..&nonce=..[&expire_time=..][&connection_data=..][&initial_layout_class_list=..] )
//! ```
//!
//! Keys are written in this fixed order and values are form-url-encoded.
//! The signature covers the data string (everything after the first `:`).

use super::TokenCodec;
use crate::credential::CredentialContext;
use crate::crypto;
use crate::errors::TokenError;
use crate::models::{Role, TokenClaims, TokenType};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use common::token_format::{check_token_size, LEGACY_TOKEN_SENTINEL};
use std::collections::HashMap;
use tracing::instrument;
use url::form_urlencoded;

/// Codec for `T1` tokens.
#[derive(Debug, Clone, Copy, Default)]
pub struct LegacyCodec;

/// Canonical data string for `claims`.
pub(crate) fn data_string(claims: &TokenClaims) -> String {
    let mut data = form_urlencoded::Serializer::new(String::new());
    data.append_pair("role", claims.role.as_str())
        .append_pair("session_id", &claims.session_id)
        .append_pair("create_time", &claims.create_time.to_string())
        .append_pair("nonce", &claims.nonce.to_string());
    if let Some(expire_time) = claims.expire_time {
        data.append_pair("expire_time", &expire_time.to_string());
    }
    if let Some(connection_data) = &claims.connection_data {
        data.append_pair("connection_data", connection_data);
    }
    if let Some(classes) = &claims.initial_layout_class_list {
        data.append_pair("initial_layout_class_list", classes);
    }
    data.finish()
}

fn meta_string(project_id: &str, signature: &str) -> String {
    form_urlencoded::Serializer::new(String::new())
        .append_pair("partner_id", project_id)
        .append_pair("sig", signature)
        .finish()
}

fn parse_pairs(segment: &str) -> HashMap<String, String> {
    form_urlencoded::parse(segment.as_bytes())
        .into_owned()
        .collect()
}

fn required<'a>(pairs: &'a HashMap<String, String>, key: &str) -> Result<&'a str, TokenError> {
    pairs
        .get(key)
        .map(String::as_str)
        .ok_or_else(|| TokenError::MalformedToken(format!("missing field: {key}")))
}

fn parse_number<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, TokenError> {
    value
        .parse()
        .map_err(|_| TokenError::MalformedToken(format!("field {key} is not a number")))
}

impl TokenCodec for LegacyCodec {
    fn token_type(&self) -> TokenType {
        TokenType::T1
    }

    #[instrument(skip_all)]
    fn encode(
        &self,
        credential: &CredentialContext,
        claims: &TokenClaims,
    ) -> Result<String, TokenError> {
        let data = data_string(claims);
        let signature = crypto::sign(credential.project_secret(), data.as_bytes())?;
        let meta = meta_string(credential.project_id(), &signature);

        Ok(format!(
            "{LEGACY_TOKEN_SENTINEL}{}",
            STANDARD.encode(format!("{meta}:{data}"))
        ))
    }

    #[instrument(skip_all)]
    fn decode(
        &self,
        credential: &CredentialContext,
        token: &str,
    ) -> Result<TokenClaims, TokenError> {
        check_token_size(token)?;

        let encoded = token
            .strip_prefix(LEGACY_TOKEN_SENTINEL)
            .ok_or_else(|| TokenError::MalformedToken("missing T1 sentinel".to_string()))?;

        let raw = STANDARD.decode(encoded).map_err(|e| {
            tracing::debug!(target: "vc_sdk.token", error = %e, "T1 token is not valid base64");
            TokenError::MalformedToken("T1 token is not valid base64".to_string())
        })?;
        let raw = String::from_utf8(raw)
            .map_err(|_| TokenError::MalformedToken("T1 token is not UTF-8".to_string()))?;

        let (meta, data) = raw
            .split_once(':')
            .ok_or_else(|| TokenError::MalformedToken("missing ':' delimiter".to_string()))?;

        let meta_pairs = parse_pairs(meta);
        let signature = required(&meta_pairs, "sig")?;
        let partner_id = required(&meta_pairs, "partner_id")?;

        crypto::verify(credential.project_secret(), data.as_bytes(), signature)?;
        if partner_id != credential.project_id() {
            tracing::debug!(target: "vc_sdk.token", "T1 token issued for another project");
            return Err(TokenError::InvalidSignature);
        }

        let data_pairs = parse_pairs(data);
        let expire_time = data_pairs
            .get("expire_time")
            .map(|v| parse_number("expire_time", v))
            .transpose()?;

        Ok(TokenClaims {
            project_id: partner_id.to_string(),
            session_id: required(&data_pairs, "session_id")?.to_string(),
            role: Role::from(required(&data_pairs, "role")?),
            create_time: parse_number("create_time", required(&data_pairs, "create_time")?)?,
            nonce: parse_number("nonce", required(&data_pairs, "nonce")?)?,
            expire_time,
            connection_data: data_pairs.get("connection_data").cloned(),
            initial_layout_class_list: data_pairs.get("initial_layout_class_list").cloned(),
        })
    }
}
