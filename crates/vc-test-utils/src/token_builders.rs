//! Builder patterns for test data construction
//!
//! Provides fluent APIs for creating claim sets to feed the codecs directly.

use crate::test_ids::TEST_PROJECT_ID;
use crate::fixtures::test_session_id;
use chrono::{Duration, Utc};
use vc_server_sdk::{Role, TokenClaims};

/// Builder for creating test token claims
///
/// # Example
/// ```rust,ignore
/// let claims = TestClaimsBuilder::new()
///     .with_role(Role::Moderator)
///     .with_data("name=Johnny")
///     .expires_in(3600)
///     .build();
/// ```
pub struct TestClaimsBuilder {
    project_id: String,
    session_id: String,
    role: Role,
    create_time: i64,
    nonce: f64,
    expire_time: Option<i64>,
    connection_data: Option<String>,
    initial_layout_class_list: Option<String>,
}

impl TestClaimsBuilder {
    /// Create a new claims builder for the test project, issued now
    pub fn new() -> Self {
        Self {
            project_id: TEST_PROJECT_ID.to_string(),
            session_id: test_session_id(TEST_PROJECT_ID),
            role: Role::Publisher,
            create_time: Utc::now().timestamp(),
            nonce: 0.5,
            expire_time: None,
            connection_data: None,
            initial_layout_class_list: None,
        }
    }

    /// Set the issuing project and a session owned by it
    pub fn for_project(mut self, project_id: &str) -> Self {
        self.project_id = project_id.to_string();
        self.session_id = test_session_id(project_id);
        self
    }

    /// Set the role
    pub fn with_role(mut self, role: impl Into<Role>) -> Self {
        self.role = role.into();
        self
    }

    /// Set the connection data
    pub fn with_data(mut self, data: &str) -> Self {
        self.connection_data = Some(data.to_string());
        self
    }

    /// Set the pre-joined layout class list
    pub fn with_layout_classes(mut self, classes: &str) -> Self {
        self.initial_layout_class_list = Some(classes.to_string());
        self
    }

    /// Set expiration in seconds from now
    pub fn expires_in(mut self, seconds: i64) -> Self {
        self.expire_time = Some((Utc::now() + Duration::seconds(seconds)).timestamp());
        self
    }

    /// Set issued-at timestamp
    pub fn issued_at(mut self, timestamp: i64) -> Self {
        self.create_time = timestamp;
        self
    }

    /// Set the nonce
    pub fn with_nonce(mut self, nonce: f64) -> Self {
        self.nonce = nonce;
        self
    }

    /// Build the claims
    pub fn build(self) -> TokenClaims {
        TokenClaims {
            project_id: self.project_id,
            session_id: self.session_id,
            role: self.role,
            create_time: self.create_time,
            nonce: self.nonce,
            expire_time: self.expire_time,
            connection_data: self.connection_data,
            initial_layout_class_list: self.initial_layout_class_list,
        }
    }
}

impl Default for TestClaimsBuilder {
    fn default() -> Self {
        Self::new()
    }
}
