//! Session handles and the session-ownership check.
//!
//! A session ID is a 2-character scheme prefix followed by a URL-safe
//! base64 body that (among other fields) contains the owning project ID.
//! The check below is a sanity check that a token is being minted with the
//! right credential. It is not authentication.

use crate::credential::CredentialContext;
use crate::errors::TokenError;
use crate::models::{TokenOptions, TokenType};
use crate::services::token_service;
use base64::{
    alphabet,
    engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig},
    Engine as _,
};
use common::observability::hash_for_correlation;
use std::net::Ipv4Addr;
use std::sync::Arc;
use tracing::instrument;

/// Length of the scheme prefix (`"1_"`, `"2_"`) at the start of a session ID.
pub const SESSION_ID_PREFIX_LEN: usize = 2;

/// Standard alphabet, optional padding, tolerant of trailing bits.
const LENIENT_STANDARD: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_encode_padding(false)
        .with_decode_padding_mode(DecodePaddingMode::Indifferent)
        .with_decode_allow_trailing_bits(true),
);

/// Whether `session_id` structurally encodes `project_id`.
///
/// Strips the scheme prefix, maps `-`/`_` back to `+`/`/`, drops anything
/// outside the base64 alphabet, and looks for `project_id` in the decoded
/// bytes. Undecodable input yields `false`.
#[must_use]
pub fn belongs_to_project(session_id: &str, project_id: &str) -> bool {
    if project_id.is_empty() {
        return false;
    }
    let Some(body) = session_id.get(SESSION_ID_PREFIX_LEN..) else {
        return false;
    };

    let mut normalized: String = body
        .chars()
        .map(|c| match c {
            '-' => '+',
            '_' => '/',
            other => other,
        })
        .filter(|c| c.is_ascii_alphanumeric() || *c == '+' || *c == '/')
        .collect();

    // A single dangling sextet can't encode a byte.
    if normalized.len() % 4 == 1 {
        normalized.pop();
    }

    match LENIENT_STANDARD.decode(normalized.as_bytes()) {
        Ok(decoded) => decoded
            .windows(project_id.len())
            .any(|window| window == project_id.as_bytes()),
        Err(e) => {
            tracing::debug!(target: "vc_sdk.session", error = %e, "Session ID body is not decodable");
            false
        }
    }
}

// ============================================================================
// Session options
// ============================================================================

/// How media flows between participants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaMode {
    /// Media goes through the platform's media router.
    Routed,
    /// Clients attempt to exchange media peer-to-peer.
    Relayed,
}

impl MediaMode {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaMode::Routed => "routed",
            MediaMode::Relayed => "relayed",
        }
    }
}

/// Whether the session is archived automatically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ArchiveMode {
    #[default]
    Manual,
    Always,
}

impl ArchiveMode {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            ArchiveMode::Manual => "manual",
            ArchiveMode::Always => "always",
        }
    }
}

/// Options echoed back from session creation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SessionProperties {
    media_mode: Option<MediaMode>,
    archive_mode: ArchiveMode,
    location: Option<Ipv4Addr>,
    e2ee: bool,
}

impl SessionProperties {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_media_mode(mut self, media_mode: MediaMode) -> Self {
        self.media_mode = Some(media_mode);
        self
    }

    #[must_use]
    pub fn with_archive_mode(mut self, archive_mode: ArchiveMode) -> Self {
        self.archive_mode = archive_mode;
        self
    }

    #[must_use]
    pub fn with_location(mut self, location: Ipv4Addr) -> Self {
        self.location = Some(location);
        self
    }

    #[must_use]
    pub fn with_e2ee(mut self, e2ee: bool) -> Self {
        self.e2ee = e2ee;
        self
    }

    #[must_use]
    pub fn media_mode(&self) -> Option<MediaMode> {
        self.media_mode
    }

    #[must_use]
    pub fn archive_mode(&self) -> ArchiveMode {
        self.archive_mode
    }

    #[must_use]
    pub fn location(&self) -> Option<Ipv4Addr> {
        self.location
    }

    #[must_use]
    pub fn e2ee(&self) -> bool {
        self.e2ee
    }

    /// Check the combinations the platform refuses.
    ///
    /// # Errors
    ///
    /// Returns `TokenError::Configuration` when
    /// - archive mode is `Always` without routed media
    /// - end-to-end encryption is combined with relayed media
    /// - end-to-end encryption is combined with `Always` archiving
    pub fn validate(&self) -> Result<(), TokenError> {
        if self.archive_mode == ArchiveMode::Always && self.media_mode != Some(MediaMode::Routed) {
            return Err(TokenError::Configuration(
                "A session with always archive mode must also have the routed media mode"
                    .to_string(),
            ));
        }
        if self.e2ee && self.media_mode == Some(MediaMode::Relayed) {
            return Err(TokenError::Configuration(
                "A session with relayed media mode cannot have e2ee enabled".to_string(),
            ));
        }
        if self.e2ee && self.archive_mode == ArchiveMode::Always {
            return Err(TokenError::Configuration(
                "A session with always archive mode cannot have e2ee enabled".to_string(),
            ));
        }
        Ok(())
    }
}

// ============================================================================
// Session
// ============================================================================

/// A created session, bound to the credential of the project that owns it.
#[derive(Debug, Clone)]
pub struct Session {
    credential: Arc<CredentialContext>,
    session_id: String,
    properties: SessionProperties,
    default_token_type: TokenType,
}

impl Session {
    /// Wrap an existing session ID.
    ///
    /// # Errors
    ///
    /// - `SessionOwnership` if `session_id` does not belong to the credential's project
    /// - `Configuration` if `properties` is an invalid combination
    #[instrument(skip_all, fields(session = %hash_for_correlation(&session_id)))]
    pub fn new(
        credential: Arc<CredentialContext>,
        session_id: String,
        properties: SessionProperties,
    ) -> Result<Self, TokenError> {
        properties.validate()?;
        if !belongs_to_project(&session_id, credential.project_id()) {
            tracing::debug!(target: "vc_sdk.session", "Session rejected: not owned by project");
            return Err(TokenError::SessionOwnership);
        }

        Ok(Self {
            credential,
            session_id,
            properties,
            default_token_type: TokenType::default(),
        })
    }

    /// Token type used when [`TokenOptions`] leaves it unset.
    #[must_use]
    pub fn with_default_token_type(mut self, token_type: TokenType) -> Self {
        self.default_token_type = token_type;
        self
    }

    #[must_use]
    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    #[must_use]
    pub fn properties(&self) -> &SessionProperties {
        &self.properties
    }

    /// `Some(true)` for relayed media, `None` when the media mode is unknown.
    #[must_use]
    pub fn is_peer_to_peer(&self) -> Option<bool> {
        self.properties
            .media_mode
            .map(|mode| mode == MediaMode::Relayed)
    }

    #[must_use]
    pub fn location_hint(&self) -> Option<Ipv4Addr> {
        self.properties.location
    }

    /// Mint a client token for this session.
    ///
    /// # Errors
    ///
    /// See [`token_service::generate_token`].
    pub fn generate_token(&self, options: &TokenOptions) -> Result<String, TokenError> {
        let options = options
            .clone()
            .with_default_token_type(self.default_token_type);
        token_service::generate_token(&self.credential, &self.session_id, &options)
    }
}
