//! Integration tests for token option validation
//!
//! Covers the expiry window, the connection data limit, role handling per
//! format, and token type parsing.

use chrono::Utc;
use vc_server_sdk::{decode_token, generate_token, Role, TokenError, TokenOptions, TokenType};
use vc_test_utils::*;

const THIRTY_DAYS: i64 = 30 * 24 * 60 * 60;

fn generate(options: &TokenOptions) -> Result<String, TokenError> {
    generate_token(
        &test_credential(),
        &test_session_id(TEST_PROJECT_ID),
        options,
    )
}

// ============================================================================
// Expiry window
// ============================================================================

/// Test that an expiry in the past is rejected
#[test]
fn test_past_expiry_is_rejected() {
    let past = Utc::now().timestamp() - 60;

    let result = generate(&TokenOptions::new().with_expire_time(past));

    assert!(
        matches!(result, Err(TokenError::InvalidExpiry { .. })),
        "Past expiry should be rejected, got {result:?}"
    );
}

/// Test that an expiry just inside the 30 day window is accepted
#[test]
fn test_expiry_inside_window_is_accepted() -> Result<(), anyhow::Error> {
    // Margin absorbs the clock moving between here and token generation
    let expire_time = Utc::now().timestamp() + THIRTY_DAYS - 60;

    let token = generate(&TokenOptions::new().with_expire_time(expire_time))?;

    token.assert_expire_time(Some(expire_time));
    Ok(())
}

/// Test that an expiry beyond 30 days is rejected
#[test]
fn test_expiry_beyond_window_is_rejected() {
    let expire_time = Utc::now().timestamp() + THIRTY_DAYS + 60;

    let result = generate(&TokenOptions::new().with_expire_time(expire_time));

    assert!(matches!(result, Err(TokenError::InvalidExpiry { .. })));
}

/// Test that a `DateTime` expiry is accepted and truncated to seconds
#[test]
fn test_datetime_expiry_is_accepted() -> Result<(), anyhow::Error> {
    let expire_at = Utc::now() + chrono::Duration::hours(2);

    let token = generate(
        &TokenOptions::new()
            .with_expire_time(expire_at)
            .with_token_type(TokenType::T1),
    )?;

    token.assert_expire_time(Some(expire_at.timestamp()));
    Ok(())
}

// ============================================================================
// Connection data
// ============================================================================

/// Generate a token carrying `data` in each format and check it verifies
fn assert_data_round_trips(data: &str) -> Result<(), anyhow::Error> {
    let credential = test_credential();

    for token_type in [TokenType::T1, TokenType::Jwt] {
        let token = generate(
            &TokenOptions::new()
                .with_data(data)
                .with_token_type(token_type),
        )?;

        token
            .assert_signed_by(&credential)
            .assert_connection_data(Some(data));

        let claims = decode_token(&credential, &token)?;
        assert_eq!(
            claims.connection_data.as_deref(),
            Some(data),
            "{token_type} token should carry the data unchanged"
        );
    }
    Ok(())
}

/// Test that 999 characters of data is accepted
#[test]
fn test_data_below_limit_is_accepted() -> Result<(), anyhow::Error> {
    assert_data_round_trips(&"a".repeat(999))
}

/// Test that 1000 characters of data is rejected
#[test]
fn test_data_at_limit_is_rejected() {
    let result = generate(&TokenOptions::new().with_data("a".repeat(1000)));

    assert_eq!(result, Err(TokenError::DataTooLong { length: 1000 }));
}

/// Test that the limit counts characters rather than bytes
#[test]
fn test_data_limit_counts_characters() -> Result<(), anyhow::Error> {
    // 999 two-byte characters
    assert_data_round_trips(&"é".repeat(999))
}

/// Test that the widest data allowed still decodes in both formats
#[test]
fn test_four_byte_data_at_limit_round_trips() -> Result<(), anyhow::Error> {
    // 999 four-byte characters percent-encode to 12 bytes each
    assert_data_round_trips(&"\u{1F600}".repeat(999))
}

/// Test that characters needing escapes in both formats round trip
#[test]
fn test_escaped_data_round_trips() -> Result<(), anyhow::Error> {
    assert_data_round_trips(&"\"&=:+\n".repeat(166))
}

/// Test that a layout list too large to decode is refused at generation
#[test]
fn test_oversized_layout_list_is_rejected() {
    let classes: Vec<String> = (0..5000).map(|i| format!("class-{i}")).collect();

    for token_type in [TokenType::T1, TokenType::Jwt] {
        let result = generate(
            &TokenOptions::new()
                .with_initial_layout_class_list(classes.clone())
                .with_token_type(token_type),
        );

        assert!(
            matches!(result, Err(TokenError::TokenTooLarge { .. })),
            "{token_type} token should be refused, got {result:?}"
        );
    }
}

// ============================================================================
// Roles
// ============================================================================

/// Test that T1 rejects roles outside the recognized set
#[test]
fn test_t1_rejects_unknown_role() {
    let result = generate(
        &TokenOptions::new()
            .with_role("superuser")
            .with_token_type(TokenType::T1),
    );

    assert_eq!(result, Err(TokenError::InvalidRole("superuser".to_string())));
}

/// Test that JWT passes an unknown role through unchanged
#[test]
fn test_jwt_passes_unknown_role_through() -> Result<(), anyhow::Error> {
    let token = generate(
        &TokenOptions::new()
            .with_role("superuser")
            .with_token_type(TokenType::Jwt),
    )?;

    token.assert_valid_jwt().assert_role("superuser");
    Ok(())
}

/// Test that every recognized role is accepted by T1
#[test]
fn test_t1_accepts_recognized_roles() -> Result<(), anyhow::Error> {
    for role in [
        Role::Subscriber,
        Role::Publisher,
        Role::Moderator,
        Role::PublisherOnly,
    ] {
        let expected = role.as_str().to_string();
        let token = generate(
            &TokenOptions::new()
                .with_role(role)
                .with_token_type(TokenType::T1),
        )?;
        token.assert_role(&expected);
    }
    Ok(())
}

// ============================================================================
// Token type parsing
// ============================================================================

/// Test that token type strings outside T1/JWT are rejected
#[test]
fn test_unknown_token_type_is_rejected() {
    let result = TokenOptions::new().with_token_type_str("SAML");

    assert_eq!(
        result.err(),
        Some(TokenError::InvalidTokenType("SAML".to_string()))
    );
}

/// Test that token type strings are matched exactly after trimming
#[test]
fn test_token_type_parsing() {
    assert_eq!(" T1 ".parse::<TokenType>(), Ok(TokenType::T1));
    assert_eq!("JWT".parse::<TokenType>(), Ok(TokenType::Jwt));
    assert!("jwt".parse::<TokenType>().is_err());
}
