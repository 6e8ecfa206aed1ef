//! Fixed test IDs for deterministic tests
//!
//! Project IDs and secrets are constant so failures reproduce.

// Project IDs
pub const TEST_PROJECT_ID: &str = "123456";
pub const TEST_OTHER_PROJECT_ID: &str = "999999";

// Test secrets (40 hex chars, like real project secrets)
pub const TEST_PROJECT_SECRET: &str = "1234567890abcdef1234567890abcdef12345678";
pub const TEST_OTHER_PROJECT_SECRET: &str = "fedcba0987654321fedcba0987654321fedcba09";

// Session ID body fields
pub const TEST_SESSION_LOCATION: &str = "12.34.56.78";
pub const TEST_SESSION_CREATED_AT: &str = "Mon Mar 17 00:41:31 PDT 2014";

// Connection data
pub const TEST_CONNECTION_DATA: &str = "name=Johnny";

// Layout classes
pub const TEST_LAYOUT_CLASSES: [&str; 2] = ["focus", "inactive"];
