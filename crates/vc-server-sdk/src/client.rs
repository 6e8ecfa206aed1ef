//! Top-level SDK handle.
//!
//! Owns the project credential and hands it to [`Session`]s and the token
//! service by shared reference.
//!
//! ```rust,ignore
//! use vc_server_sdk::{Client, Role, SessionProperties, TokenOptions};
//!
//! let client = Client::new("123456", "1234567890abcdef...")?;
//! let token = client.generate_token(
//!     &session_id,
//!     &TokenOptions::new().with_role(Role::Moderator).with_data("name=Johnny"),
//! )?;
//!
//! let session = client.session(session_id, SessionProperties::new())?;
//! let subscriber = session.generate_token(&TokenOptions::new().with_role(Role::Subscriber))?;
//! ```

use crate::codec;
use crate::config::{SdkConfig, DEFAULT_API_URL};
use crate::credential::CredentialContext;
use crate::errors::TokenError;
use crate::models::{TokenClaims, TokenOptions, TokenType};
use crate::services::token_service;
use crate::session::{Session, SessionProperties};
use common::secret::SecretString;
use std::sync::Arc;
use tracing::instrument;
use url::Url;

#[derive(Debug, Clone)]
pub struct Client {
    credential: Arc<CredentialContext>,
    api_url: Url,
    default_token_type: TokenType,
}

impl Client {
    /// Create a client for one project, pointed at the default API URL.
    ///
    /// # Errors
    ///
    /// Returns `TokenError::Configuration` if the id or secret is empty.
    pub fn new(
        project_id: impl Into<String>,
        project_secret: impl Into<SecretString>,
    ) -> Result<Self, TokenError> {
        let credential = CredentialContext::new(project_id, project_secret)?;
        let api_url = Url::parse(DEFAULT_API_URL)
            .map_err(|e| TokenError::Configuration(format!("Invalid default API URL: {e}")))?;

        Ok(Self {
            credential: Arc::new(credential),
            api_url,
            default_token_type: TokenType::default(),
        })
    }

    /// Create a client from loaded configuration.
    ///
    /// # Errors
    ///
    /// Returns `TokenError::Configuration` if the credential is invalid.
    #[instrument(skip_all)]
    pub fn from_config(config: &SdkConfig) -> Result<Self, TokenError> {
        let credential =
            CredentialContext::new(config.project_id.clone(), config.project_secret.clone())?;

        tracing::debug!(
            target: "vc_sdk.client",
            api_url = %config.api_url,
            default_token_type = %config.default_token_type,
            "Client configured"
        );

        Ok(Self {
            credential: Arc::new(credential),
            api_url: config.api_url.clone(),
            default_token_type: config.default_token_type,
        })
    }

    #[must_use]
    pub fn with_api_url(mut self, api_url: Url) -> Self {
        self.api_url = api_url;
        self
    }

    #[must_use]
    pub fn with_default_token_type(mut self, token_type: TokenType) -> Self {
        self.default_token_type = token_type;
        self
    }

    #[must_use]
    pub fn project_id(&self) -> &str {
        self.credential.project_id()
    }

    #[must_use]
    pub fn credential(&self) -> &Arc<CredentialContext> {
        &self.credential
    }

    /// Base URL the REST managers build request paths from.
    #[must_use]
    pub fn api_url(&self) -> &Url {
        &self.api_url
    }

    #[must_use]
    pub fn default_token_type(&self) -> TokenType {
        self.default_token_type
    }

    /// Mint a client token for `session_id`, using the client's default token
    /// type when `options` does not pick one.
    ///
    /// # Errors
    ///
    /// See [`token_service::generate_token`].
    pub fn generate_token(
        &self,
        session_id: &str,
        options: &TokenOptions,
    ) -> Result<String, TokenError> {
        let options = options
            .clone()
            .with_default_token_type(self.default_token_type);
        token_service::generate_token(&self.credential, session_id, &options)
    }

    /// Wrap a session created for this project.
    ///
    /// # Errors
    ///
    /// See [`Session::new`].
    pub fn session(
        &self,
        session_id: impl Into<String>,
        properties: SessionProperties,
    ) -> Result<Session, TokenError> {
        Ok(
            Session::new(Arc::clone(&self.credential), session_id.into(), properties)?
                .with_default_token_type(self.default_token_type),
        )
    }

    /// Verify a token issued with this client's credential and return its claims.
    ///
    /// # Errors
    ///
    /// See [`codec::decode_token`].
    pub fn decode_token(&self, token: &str) -> Result<TokenClaims, TokenError> {
        codec::decode_token(&self.credential, token)
    }
}
