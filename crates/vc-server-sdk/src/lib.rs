//! Server-side SDK core for the video-conferencing platform.
//!
//! Creates session handles and mints signed, time-bound client tokens in
//! either the legacy `T1` format or the JWT format.

pub mod client;
pub mod codec;
pub mod config;
pub mod credential;
pub mod crypto;
pub mod errors;
pub mod models;
pub mod services;
pub mod session;

pub use client::Client;
pub use codec::{codec_for, decode_token, TokenCodec};
pub use config::{ConfigError, SdkConfig};
pub use credential::CredentialContext;
pub use errors::TokenError;
pub use models::{ExpireTime, LayoutClassList, Role, TokenClaims, TokenOptions, TokenType};
pub use services::token_service::generate_token;
pub use session::{belongs_to_project, ArchiveMode, MediaMode, Session, SessionProperties};
