//! Custom test assertions for expressive tests
//!
//! Provides trait-based assertions over T1 and JWT token strings. Claim
//! reads are unverified; use `assert_signed_by` to check the signature.

use base64::{engine::general_purpose::STANDARD, Engine};
use common::token_format::{decode_jwt_claims_unverified, decode_jwt_header, LEGACY_TOKEN_SENTINEL};
use std::collections::HashMap;
use url::form_urlencoded;
use vc_server_sdk::{decode_token, CredentialContext};

/// Decoded halves of a T1 token
struct LegacyParts {
    meta: HashMap<String, String>,
    data: HashMap<String, String>,
}

fn legacy_parts(token: &str) -> LegacyParts {
    let encoded = token
        .strip_prefix(LEGACY_TOKEN_SENTINEL)
        .unwrap_or_else(|| panic!("T1 token must start with {LEGACY_TOKEN_SENTINEL}"));
    let raw = STANDARD
        .decode(encoded)
        .unwrap_or_else(|e| panic!("Failed to base64 decode T1 token: {e}"));
    let raw = String::from_utf8(raw).expect("T1 payload must be UTF-8");
    let (meta, data) = raw
        .split_once(':')
        .expect("T1 payload must contain ':' delimiter");

    LegacyParts {
        meta: form_urlencoded::parse(meta.as_bytes()).into_owned().collect(),
        data: form_urlencoded::parse(data.as_bytes()).into_owned().collect(),
    }
}

/// Look up a claim by its T1 key or JWT claim name, whichever format `token` is
fn unverified_claim(token: &str, t1_key: &str, jwt_key: &str) -> Option<String> {
    if token.starts_with(LEGACY_TOKEN_SENTINEL) {
        let parts = legacy_parts(token);
        parts
            .meta
            .get(t1_key)
            .or_else(|| parts.data.get(t1_key))
            .cloned()
    } else {
        let claims = decode_jwt_claims_unverified(token).expect("JWT claims must decode");
        claims.get(jwt_key).map(|v| match v.as_str() {
            Some(s) => s.to_string(),
            None => v.to_string(),
        })
    }
}

/// Custom assertions for generated tokens
///
/// # Example
/// ```rust,ignore
/// token
///     .assert_valid_jwt()
///     .assert_issued_by("123456")
///     .assert_role("moderator")
///     .assert_signed_by(&credential);
/// ```
pub trait TokenAssertions {
    /// Assert that the token has the T1 layout
    fn assert_valid_t1(&self) -> &Self;

    /// Assert that the token is an HS256 JWT with the session.connect scope
    fn assert_valid_jwt(&self) -> &Self;

    /// Assert that the token was issued for the given project
    fn assert_issued_by(&self, project_id: &str) -> &Self;

    /// Assert that the token carries the given role
    fn assert_role(&self, role: &str) -> &Self;

    /// Assert that the token is for the given session
    fn assert_for_session(&self, session_id: &str) -> &Self;

    /// Assert the token's connection data (None = absent)
    fn assert_connection_data(&self, data: Option<&str>) -> &Self;

    /// Assert the token's expiry (None = absent)
    fn assert_expire_time(&self, expire_time: Option<i64>) -> &Self;

    /// Assert that the signature verifies against the credential
    fn assert_signed_by(&self, credential: &CredentialContext) -> &Self;
}

impl TokenAssertions for String {
    fn assert_valid_t1(&self) -> &Self {
        assert!(!self.contains('\n'), "T1 token must not contain newlines");
        let parts = legacy_parts(self);

        let sig = parts.meta.get("sig").expect("T1 meta must contain sig");
        assert_eq!(sig.len(), 40, "T1 sig must be 40 hex chars, got {sig}");
        assert!(
            sig.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()),
            "T1 sig must be lowercase hex"
        );
        assert!(
            parts.meta.contains_key("partner_id"),
            "T1 meta must contain partner_id"
        );
        for key in ["role", "session_id", "create_time", "nonce"] {
            assert!(parts.data.contains_key(key), "T1 data must contain {key}");
        }
        self
    }

    fn assert_valid_jwt(&self) -> &Self {
        let parts: Vec<_> = self.split('.').collect();
        assert_eq!(
            parts.len(),
            3,
            "JWT must have 3 parts (header.payload.signature), got {}",
            parts.len()
        );

        let header = decode_jwt_header(self).expect("JWT header must decode");
        assert_eq!(header["alg"], "HS256", "Expected HS256 algorithm");
        assert_eq!(header["typ"], "JWT", "Expected JWT type");

        let claims = decode_jwt_claims_unverified(self).expect("JWT claims must decode");
        assert_eq!(claims["ist"], "project", "Expected ist=project");
        assert_eq!(claims["scope"], "session.connect", "Expected session.connect scope");
        for key in ["iss", "iat", "nonce", "role", "session_id"] {
            assert!(claims.get(key).is_some(), "JWT claims must contain {key}");
        }
        self
    }

    fn assert_issued_by(&self, project_id: &str) -> &Self {
        let actual = unverified_claim(self, "partner_id", "iss");
        assert_eq!(
            actual.as_deref(),
            Some(project_id),
            "Token issued by wrong project"
        );
        self
    }

    fn assert_role(&self, role: &str) -> &Self {
        let actual = unverified_claim(self, "role", "role");
        assert_eq!(actual.as_deref(), Some(role), "Token has wrong role");
        self
    }

    fn assert_for_session(&self, session_id: &str) -> &Self {
        let actual = unverified_claim(self, "session_id", "session_id");
        assert_eq!(actual.as_deref(), Some(session_id), "Token for wrong session");
        self
    }

    fn assert_connection_data(&self, data: Option<&str>) -> &Self {
        let actual = unverified_claim(self, "connection_data", "connection_data");
        assert_eq!(actual.as_deref(), data, "Token has wrong connection data");
        self
    }

    fn assert_expire_time(&self, expire_time: Option<i64>) -> &Self {
        let actual = unverified_claim(self, "expire_time", "exp")
            .map(|v| v.parse::<i64>().expect("expiry must be an integer"));
        assert_eq!(actual, expire_time, "Token has wrong expiry");
        self
    }

    fn assert_signed_by(&self, credential: &CredentialContext) -> &Self {
        let result = decode_token(credential, self);
        assert!(
            result.is_ok(),
            "Token signature should verify, got {:?}",
            result.err()
        );
        self
    }
}
