use crate::errors::TokenError;
use common::secret::SecretString;
use secrecy::ExposeSecret;

/// A project's public identifier and private signing secret.
///
/// Immutable once built. `Debug` output redacts the secret.
#[derive(Debug, Clone)]
pub struct CredentialContext {
    project_id: String,
    project_secret: SecretString,
}

impl CredentialContext {
    /// Build a credential from a project id and secret.
    ///
    /// # Errors
    ///
    /// Returns `TokenError::Configuration` if either value is empty or blank.
    pub fn new(
        project_id: impl Into<String>,
        project_secret: impl Into<SecretString>,
    ) -> Result<Self, TokenError> {
        let project_id = project_id.into();
        let project_secret = project_secret.into();

        if project_id.trim().is_empty() {
            return Err(TokenError::Configuration(
                "Project ID must not be empty".to_string(),
            ));
        }
        if project_secret.expose_secret().trim().is_empty() {
            return Err(TokenError::Configuration(
                "Project secret must not be empty".to_string(),
            ));
        }

        Ok(Self {
            project_id,
            project_secret,
        })
    }

    #[must_use]
    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    #[must_use]
    pub fn project_secret(&self) -> &SecretString {
        &self.project_secret
    }
}
