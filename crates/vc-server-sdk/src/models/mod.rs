//! Token option and claim types.

use crate::errors::TokenError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::{SystemTime, UNIX_EPOCH};

// ============================================================================
// Role
// ============================================================================

/// Capability level embedded in a token.
///
/// `Other` carries project-specific roles. Those are only accepted in JWT
/// tokens; the T1 format rejects anything outside the known set.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Role {
    Subscriber,
    #[default]
    Publisher,
    Moderator,
    PublisherOnly,
    Other(String),
}

impl Role {
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Role::Subscriber => "subscriber",
            Role::Publisher => "publisher",
            Role::Moderator => "moderator",
            Role::PublisherOnly => "publisheronly",
            Role::Other(role) => role,
        }
    }

    /// True for the platform's fixed role set.
    #[must_use]
    pub fn is_recognized(&self) -> bool {
        !matches!(self, Role::Other(_))
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for Role {
    fn from(s: &str) -> Self {
        match s {
            "subscriber" => Role::Subscriber,
            "publisher" => Role::Publisher,
            "moderator" => Role::Moderator,
            "publisheronly" => Role::PublisherOnly,
            other => Role::Other(other.to_string()),
        }
    }
}

impl From<String> for Role {
    fn from(s: String) -> Self {
        Role::from(s.as_str())
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        role.as_str().to_string()
    }
}

// ============================================================================
// TokenType
// ============================================================================

/// Wire format of a generated token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TokenType {
    /// Legacy compact format (`T1==` + base64).
    T1,
    /// Signed JWT.
    #[default]
    Jwt,
}

impl TokenType {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenType::T1 => "T1",
            TokenType::Jwt => "JWT",
        }
    }
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TokenType {
    type Err = TokenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "T1" => Ok(TokenType::T1),
            "JWT" => Ok(TokenType::Jwt),
            other => Err(TokenError::InvalidTokenType(other.to_string())),
        }
    }
}

// ============================================================================
// ExpireTime
// ============================================================================

/// Absolute token expiry in seconds since the Unix epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ExpireTime(i64);

impl ExpireTime {
    #[must_use]
    pub fn from_timestamp(secs: i64) -> Self {
        Self(secs)
    }

    #[must_use]
    pub fn timestamp(&self) -> i64 {
        self.0
    }
}

impl From<i64> for ExpireTime {
    fn from(secs: i64) -> Self {
        Self(secs)
    }
}

impl From<u64> for ExpireTime {
    fn from(secs: u64) -> Self {
        Self(i64::try_from(secs).unwrap_or(i64::MAX))
    }
}

impl From<DateTime<Utc>> for ExpireTime {
    fn from(time: DateTime<Utc>) -> Self {
        Self(time.timestamp())
    }
}

impl From<SystemTime> for ExpireTime {
    fn from(time: SystemTime) -> Self {
        let secs = match time.duration_since(UNIX_EPOCH) {
            Ok(after) => i64::try_from(after.as_secs()).unwrap_or(i64::MAX),
            Err(before) => i64::try_from(before.duration().as_secs())
                .map(|s| -s)
                .unwrap_or(i64::MIN),
        };
        Self(secs)
    }
}

// ============================================================================
// LayoutClassList
// ============================================================================

/// Initial layout classes for a connection's published stream.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LayoutClassList {
    /// Individual class names, joined with a single space.
    Classes(Vec<String>),
    /// A pre-joined string used verbatim.
    Verbatim(String),
}

impl LayoutClassList {
    /// The value as it is written into the token.
    #[must_use]
    pub fn encoded(&self) -> String {
        match self {
            LayoutClassList::Classes(classes) => classes.join(" "),
            LayoutClassList::Verbatim(value) => value.clone(),
        }
    }
}

impl From<Vec<String>> for LayoutClassList {
    fn from(classes: Vec<String>) -> Self {
        LayoutClassList::Classes(classes)
    }
}

impl From<Vec<&str>> for LayoutClassList {
    fn from(classes: Vec<&str>) -> Self {
        LayoutClassList::Classes(classes.into_iter().map(str::to_string).collect())
    }
}

impl From<&[&str]> for LayoutClassList {
    fn from(classes: &[&str]) -> Self {
        LayoutClassList::Classes(classes.iter().map(|c| (*c).to_string()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for LayoutClassList {
    fn from(classes: [&str; N]) -> Self {
        LayoutClassList::Classes(classes.iter().map(|c| (*c).to_string()).collect())
    }
}

impl From<String> for LayoutClassList {
    fn from(value: String) -> Self {
        LayoutClassList::Verbatim(value)
    }
}

impl From<&str> for LayoutClassList {
    fn from(value: &str) -> Self {
        LayoutClassList::Verbatim(value.to_string())
    }
}

// ============================================================================
// TokenOptions
// ============================================================================

/// Caller-supplied options for a single token.
///
/// ```rust,ignore
/// let options = TokenOptions::new()
///     .with_role(Role::Moderator)
///     .with_data("name=Johnny")
///     .with_expire_time(Utc::now() + Duration::hours(1))
///     .with_token_type(TokenType::Jwt);
/// ```
#[derive(Clone, Default)]
pub struct TokenOptions {
    role: Option<Role>,
    expire_time: Option<ExpireTime>,
    data: Option<String>,
    initial_layout_class_list: Option<LayoutClassList>,
    token_type: Option<TokenType>,
}

/// Connection data is end-user metadata and is redacted.
impl fmt::Debug for TokenOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenOptions")
            .field("role", &self.role)
            .field("expire_time", &self.expire_time)
            .field("data", &self.data.as_ref().map(|_| "[REDACTED]"))
            .field("initial_layout_class_list", &self.initial_layout_class_list)
            .field("token_type", &self.token_type)
            .finish()
    }
}

impl TokenOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_role(mut self, role: impl Into<Role>) -> Self {
        self.role = Some(role.into());
        self
    }

    #[must_use]
    pub fn with_expire_time(mut self, expire_time: impl Into<ExpireTime>) -> Self {
        self.expire_time = Some(expire_time.into());
        self
    }

    #[must_use]
    pub fn with_data(mut self, data: impl Into<String>) -> Self {
        self.data = Some(data.into());
        self
    }

    #[must_use]
    pub fn with_initial_layout_class_list(mut self, classes: impl Into<LayoutClassList>) -> Self {
        self.initial_layout_class_list = Some(classes.into());
        self
    }

    #[must_use]
    pub fn with_token_type(mut self, token_type: TokenType) -> Self {
        self.token_type = Some(token_type);
        self
    }

    /// Select the token type from its string name (`"T1"` or `"JWT"`).
    ///
    /// # Errors
    ///
    /// Returns `TokenError::InvalidTokenType` for any other value.
    pub fn with_token_type_str(self, token_type: &str) -> Result<Self, TokenError> {
        Ok(self.with_token_type(token_type.parse()?))
    }

    /// Fill in the token type only when the caller has not chosen one.
    #[must_use]
    pub fn with_default_token_type(mut self, token_type: TokenType) -> Self {
        self.token_type.get_or_insert(token_type);
        self
    }

    #[must_use]
    pub fn role(&self) -> Option<&Role> {
        self.role.as_ref()
    }

    #[must_use]
    pub fn expire_time(&self) -> Option<ExpireTime> {
        self.expire_time
    }

    #[must_use]
    pub fn data(&self) -> Option<&str> {
        self.data.as_deref()
    }

    #[must_use]
    pub fn initial_layout_class_list(&self) -> Option<&LayoutClassList> {
        self.initial_layout_class_list.as_ref()
    }

    #[must_use]
    pub fn token_type(&self) -> Option<TokenType> {
        self.token_type
    }
}

// ============================================================================
// TokenClaims
// ============================================================================

/// The claims carried by a token, in format-neutral form.
///
/// Built fresh for every generated token and returned by the decode path.
#[derive(Clone, PartialEq)]
pub struct TokenClaims {
    /// Issuing project (`partner_id` in T1, `iss` in JWT).
    pub project_id: String,
    pub session_id: String,
    pub role: Role,
    /// Issued-at, seconds since the epoch (`create_time` / `iat`).
    pub create_time: i64,
    pub nonce: f64,
    pub expire_time: Option<i64>,
    pub connection_data: Option<String>,
    pub initial_layout_class_list: Option<String>,
}

/// Custom Debug implementation that redacts `connection_data`.
impl fmt::Debug for TokenClaims {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenClaims")
            .field("project_id", &self.project_id)
            .field("session_id", &self.session_id)
            .field("role", &self.role)
            .field("create_time", &self.create_time)
            .field("nonce", &self.nonce)
            .field("expire_time", &self.expire_time)
            .field(
                "connection_data",
                &self.connection_data.as_ref().map(|_| "[REDACTED]"),
            )
            .field("initial_layout_class_list", &self.initial_layout_class_list)
            .finish()
    }
}

impl TokenClaims {
    /// Compares everything except the per-token `nonce` and `create_time`.
    #[must_use]
    pub fn same_grant_as(&self, other: &TokenClaims) -> bool {
        self.project_id == other.project_id
            && self.session_id == other.session_id
            && self.role == other.role
            && self.expire_time == other.expire_time
            && self.connection_data == other.connection_data
            && self.initial_layout_class_list == other.initial_layout_class_list
    }
}
