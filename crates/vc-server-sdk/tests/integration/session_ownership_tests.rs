//! Integration tests for session ownership
//!
//! A token may only be minted for a session the credential's project owns.

use std::sync::Arc;
use vc_server_sdk::{
    belongs_to_project, generate_token, ArchiveMode, MediaMode, Session, SessionProperties,
    TokenError, TokenOptions,
};
use vc_test_utils::*;

/// Test that a session owned by another project is rejected
#[test]
fn test_foreign_session_is_rejected() {
    let credential = test_credential();
    let foreign = test_session_id(TEST_OTHER_PROJECT_ID);

    let result = generate_token(&credential, &foreign, &TokenOptions::new());

    assert_eq!(result, Err(TokenError::SessionOwnership));
}

/// Test that ownership is checked before option validation
#[test]
fn test_ownership_is_checked_first() {
    let credential = test_credential();
    let foreign = test_session_id(TEST_OTHER_PROJECT_ID);

    let result = generate_token(
        &credential,
        &foreign,
        &TokenOptions::new().with_data("a".repeat(2000)),
    );

    assert_eq!(result, Err(TokenError::SessionOwnership));
}

/// Test that garbage session IDs are rejected rather than panicking
#[test]
fn test_garbage_session_ids_are_rejected() {
    let credential = test_credential();

    for session_id in ["", "1_", "not a session", "1_!!!!"] {
        let result = generate_token(&credential, session_id, &TokenOptions::new());
        assert_eq!(
            result,
            Err(TokenError::SessionOwnership),
            "Session ID {session_id:?} should be rejected"
        );
    }
}

/// Test ownership checks for a session created on the platform
#[test]
fn test_platform_session_id_ownership() {
    let session_id = test_session_id_with_seed(TEST_PROJECT_ID, 42);

    assert!(belongs_to_project(&session_id, TEST_PROJECT_ID));
    assert!(!belongs_to_project(&session_id, TEST_OTHER_PROJECT_ID));
}

/// Test that ownership is substring containment in the decoded body
///
/// The check is a sanity check rather than authentication, so any project
/// ID that appears inside the owner's ID also matches.
#[test]
fn test_ownership_is_substring_match() {
    let session_id = test_session_id(TEST_PROJECT_ID);

    assert!(belongs_to_project(&session_id, "12345"));
    assert!(belongs_to_project(&session_id, "3456"));
    assert!(!belongs_to_project(&session_id, "1234567"));
    assert!(!belongs_to_project(&session_id, ""));
}

/// Test that a session handle refuses a foreign session ID
#[test]
fn test_session_handle_rejects_foreign_session() {
    let client = test_client();

    let result = client.session(
        test_session_id(TEST_OTHER_PROJECT_ID),
        SessionProperties::new(),
    );

    assert!(matches!(result, Err(TokenError::SessionOwnership)));
}

/// Test that a session handle mints tokens for its own session
#[test]
fn test_session_handle_generates_tokens() -> Result<(), anyhow::Error> {
    let credential = test_shared_credential();
    let session_id = test_session_id(TEST_PROJECT_ID);
    let session = Session::new(
        Arc::clone(&credential),
        session_id.clone(),
        SessionProperties::new()
            .with_media_mode(MediaMode::Routed)
            .with_archive_mode(ArchiveMode::Always),
    )?;

    assert_eq!(session.is_peer_to_peer(), Some(false));
    let token = session.generate_token(&TokenOptions::new())?;
    token
        .assert_for_session(&session_id)
        .assert_signed_by(&credential);

    Ok(())
}

/// Test that incompatible session properties are rejected
#[test]
fn test_incompatible_properties_are_rejected() {
    let client = test_client();
    let session_id = test_session_id(TEST_PROJECT_ID);

    let relayed_archive = SessionProperties::new()
        .with_media_mode(MediaMode::Relayed)
        .with_archive_mode(ArchiveMode::Always);

    let result = client.session(session_id, relayed_archive);

    assert!(matches!(result, Err(TokenError::Configuration(_))));
}
