//! Integration tests for the token codecs
//!
//! Drives the codecs directly with hand-built claims, including tampered
//! and cross-project tokens.

use base64::{engine::general_purpose::STANDARD, Engine};
use vc_server_sdk::{codec_for, decode_token, Role, TokenError, TokenType};
use vc_test_utils::*;

/// Test that both codecs round trip a full claim set
#[test]
fn test_codecs_round_trip_claims() -> Result<(), anyhow::Error> {
    let credential = test_credential();
    let claims = TestClaimsBuilder::new()
        .with_role(Role::Moderator)
        .with_data(TEST_CONNECTION_DATA)
        .with_layout_classes("focus")
        .expires_in(600)
        .with_nonce(0.25)
        .build();

    for token_type in [TokenType::T1, TokenType::Jwt] {
        let codec = codec_for(token_type);
        assert_eq!(codec.token_type(), token_type);

        let token = codec.encode(&credential, &claims)?;
        let decoded = codec.decode(&credential, &token)?;
        assert_eq!(decoded, claims, "{token_type} round trip should be lossless");
    }

    Ok(())
}

/// Test that a token signed by another project fails verification
#[test]
fn test_wrong_secret_fails_verification() -> Result<(), anyhow::Error> {
    let claims = TestClaimsBuilder::new().build();
    let impostor =
        vc_server_sdk::CredentialContext::new(TEST_PROJECT_ID, TEST_OTHER_PROJECT_SECRET)?;

    for token_type in [TokenType::T1, TokenType::Jwt] {
        let token = codec_for(token_type).encode(&impostor, &claims)?;
        let result = decode_token(&test_credential(), &token);
        assert_eq!(
            result,
            Err(TokenError::InvalidSignature),
            "{token_type} token with wrong secret should not verify"
        );
    }

    Ok(())
}

/// Test that a token issued for a different project is rejected
#[test]
fn test_other_project_token_is_rejected() -> Result<(), anyhow::Error> {
    let other = test_other_credential();
    let claims = TestClaimsBuilder::new()
        .for_project(TEST_OTHER_PROJECT_ID)
        .build();

    for token_type in [TokenType::T1, TokenType::Jwt] {
        let token = codec_for(token_type).encode(&other, &claims)?;
        assert!(decode_token(&test_credential(), &token).is_err());
        assert!(decode_token(&other, &token).is_ok());
    }

    Ok(())
}

/// Test that editing the signed T1 data invalidates the signature
#[test]
fn test_tampered_t1_data_fails_verification() -> Result<(), anyhow::Error> {
    let credential = test_credential();
    let claims = TestClaimsBuilder::new().with_role(Role::Subscriber).build();
    let token = codec_for(TokenType::T1).encode(&credential, &claims)?;

    let payload = String::from_utf8(STANDARD.decode(token.trim_start_matches("T1=="))?)?;
    let tampered = payload.replace("role=subscriber", "role=moderator");
    let tampered = format!("T1=={}", STANDARD.encode(tampered));

    assert_eq!(
        decode_token(&credential, &tampered),
        Err(TokenError::InvalidSignature)
    );

    Ok(())
}

/// Test that structurally broken tokens are reported as malformed
#[test]
fn test_malformed_tokens_are_rejected() {
    let credential = test_credential();

    for token in ["T1==", "T1==!!!", "T1==bm8gZGVsaW1pdGVy", "a.b", "not-a-token"] {
        let result = decode_token(&credential, token);
        assert!(
            matches!(result, Err(TokenError::MalformedToken(_))),
            "{token:?} should be malformed, got {result:?}"
        );
    }
}
