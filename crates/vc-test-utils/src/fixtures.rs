//! Deterministic fixtures for testing
//!
//! Session IDs are built the same way the platform lays them out:
//! `1_` + URL-safe base64 of `1~<project>~<location>~<created>~<random>~`.

use crate::test_ids::*;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use std::sync::Arc;
use vc_server_sdk::{Client, CredentialContext};

/// Credential for [`TEST_PROJECT_ID`].
pub fn test_credential() -> CredentialContext {
    CredentialContext::new(TEST_PROJECT_ID, TEST_PROJECT_SECRET)
        .expect("test credential should be valid")
}

/// Credential for [`TEST_OTHER_PROJECT_ID`].
pub fn test_other_credential() -> CredentialContext {
    CredentialContext::new(TEST_OTHER_PROJECT_ID, TEST_OTHER_PROJECT_SECRET)
        .expect("test credential should be valid")
}

/// Shared handle to [`test_credential`].
pub fn test_shared_credential() -> Arc<CredentialContext> {
    Arc::new(test_credential())
}

/// Client for [`TEST_PROJECT_ID`].
pub fn test_client() -> Client {
    Client::new(TEST_PROJECT_ID, TEST_PROJECT_SECRET).expect("test client should be valid")
}

/// A session ID owned by `project_id`.
///
/// The same `project_id` always produces the same session ID.
///
/// # Example
/// ```rust,ignore
/// let sid = test_session_id("123456");
/// assert!(sid.starts_with("1_MX4xMjM0NTZ"));
/// assert!(belongs_to_project(&sid, "123456"));
/// ```
pub fn test_session_id(project_id: &str) -> String {
    test_session_id_with_seed(project_id, 0)
}

/// A session ID owned by `project_id`, varied by `seed`.
pub fn test_session_id_with_seed(project_id: &str, seed: u32) -> String {
    let body = format!(
        "1~{project_id}~{TEST_SESSION_LOCATION}~{TEST_SESSION_CREATED_AT}~0.{seed:08}~"
    );
    format!("1_{}", URL_SAFE_NO_PAD.encode(body))
}
