//! Secret types for protecting project secrets from accidental logging.
//!
//! This module re-exports types from the [`secrecy`] crate. Every value that
//! can sign a token (the project secret, raw HMAC keys) must be held in one
//! of these wrappers so that deriving `Debug` on a containing struct is
//! always safe.
//!
//! # Example
//!
//! ```rust
//! use common::secret::SecretString;
//! use secrecy::ExposeSecret;
//!
//! #[derive(Debug)]
//! struct ProjectCredential {
//!     project_id: String,
//!     project_secret: SecretString,  // Debug shows "[REDACTED]"
//! }
//!
//! let cred = ProjectCredential {
//!     project_id: "123456".to_string(),
//!     project_secret: SecretString::from("1234567890abcdef"),
//! };
//!
//! println!("{:?}", cred);
//!
//! // Signing code has to ask for the value explicitly
//! let secret: &str = cred.project_secret.expose_secret();
//! ```
//!
//! # Serde Integration
//!
//! Secrets can be deserialized straight out of a config document:
//!
//! ```rust
//! use serde::Deserialize;
//! use common::secret::SecretString;
//!
//! #[derive(Debug, Deserialize)]
//! struct ProjectFile {
//!     project_id: String,
//!     project_secret: SecretString,
//! }
//!
//! let json = r#"{"project_id": "123456", "project_secret": "s3cr3t"}"#;
//! let file: ProjectFile = serde_json::from_str(json).unwrap();
//! println!("{:?}", file);
//! ```

pub use secrecy::{ExposeSecret, SecretBox, SecretString};
