//! # VC Test Utilities
//!
//! Shared test utilities for the VC server SDK.
//!
//! This crate provides:
//! - Deterministic fixtures (fixed credentials, session IDs for a project)
//! - Test data builders (TestClaimsBuilder)
//! - Fixed test IDs and secrets
//! - Custom assertions (TokenAssertions trait)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use vc_test_utils::*;
//!
//! #[test]
//! fn test_example() {
//!     let credential = test_credential();
//!     let session_id = test_session_id(TEST_PROJECT_ID);
//!
//!     let token = generate_token(&credential, &session_id, &TokenOptions::new())?;
//!
//!     token
//!         .assert_valid_jwt()
//!         .assert_issued_by(TEST_PROJECT_ID)
//!         .assert_role("publisher");
//! }
//! ```

pub mod assertions;
pub mod fixtures;
pub mod test_ids;
pub mod token_builders;

// Re-export commonly used items
pub use assertions::*;
pub use fixtures::*;
pub use test_ids::*;
pub use token_builders::*;
