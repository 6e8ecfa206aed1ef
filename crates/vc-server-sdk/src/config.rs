use crate::errors::TokenError;
use crate::models::TokenType;
use common::config::{ObservabilityConfig, DEFAULT_LOG_LEVEL};
use common::secret::SecretString;
use std::collections::HashMap;
use std::env;
use thiserror::Error;
use url::Url;

/// Default REST API base URL.
pub const DEFAULT_API_URL: &str = "https://api.opentok.com";

#[derive(Debug, Clone)]
pub struct SdkConfig {
    pub project_id: String,
    pub project_secret: SecretString,
    pub api_url: Url,
    pub default_token_type: TokenType,
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid value for {var}: {reason}")]
    InvalidValue { var: String, reason: String },
}

impl From<ConfigError> for TokenError {
    fn from(err: ConfigError) -> Self {
        TokenError::Configuration(err.to_string())
    }
}

fn required_var(vars: &HashMap<String, String>, name: &str) -> Result<String, ConfigError> {
    let value = vars
        .get(name)
        .ok_or_else(|| ConfigError::MissingEnvVar(name.to_string()))?;
    if value.trim().is_empty() {
        return Err(ConfigError::InvalidValue {
            var: name.to_string(),
            reason: "must not be empty".to_string(),
        });
    }
    Ok(value.clone())
}

impl SdkConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(&env::vars().collect())
    }

    /// Load configuration from a HashMap (for testing)
    pub fn from_vars(vars: &HashMap<String, String>) -> Result<Self, ConfigError> {
        let project_id = required_var(vars, "VC_PROJECT_ID")?;
        let project_secret = SecretString::from(required_var(vars, "VC_PROJECT_SECRET")?);

        let api_url_raw = vars
            .get("VC_API_URL")
            .map(String::as_str)
            .unwrap_or(DEFAULT_API_URL);
        let api_url = Url::parse(api_url_raw).map_err(|e| ConfigError::InvalidValue {
            var: "VC_API_URL".to_string(),
            reason: e.to_string(),
        })?;
        if !matches!(api_url.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidValue {
                var: "VC_API_URL".to_string(),
                reason: format!("unsupported scheme '{}'", api_url.scheme()),
            });
        }

        let default_token_type = match vars.get("VC_TOKEN_TYPE") {
            Some(raw) => raw.parse::<TokenType>().map_err(|e| ConfigError::InvalidValue {
                var: "VC_TOKEN_TYPE".to_string(),
                reason: e.to_string(),
            })?,
            None => TokenType::default(),
        };

        let log_level = vars
            .get("VC_LOG_LEVEL")
            .cloned()
            .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string());

        let json_logs = match vars.get("VC_JSON_LOGS").map(String::as_str) {
            None => false,
            Some("true") => true,
            Some("false") => false,
            Some(other) => {
                return Err(ConfigError::InvalidValue {
                    var: "VC_JSON_LOGS".to_string(),
                    reason: format!("expected true or false, got '{other}'"),
                })
            }
        };

        Ok(SdkConfig {
            project_id,
            project_secret,
            api_url,
            default_token_type,
            observability: ObservabilityConfig {
                log_level,
                json_logs,
            },
        })
    }
}
