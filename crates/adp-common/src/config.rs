use std::path::{Path, PathBuf};

use log::debug;
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Production API host.
pub const DEFAULT_BASE_URL: &str = "https://api.adp.com";

/// Production OAuth token endpoint for the client-credentials grant.
pub const DEFAULT_TOKEN_URL: &str =
    "https://accounts.adp.com/auth/oauth/v2/token?grant_type=client_credentials";

/// Page size used by the accumulating worker listing.
pub const DEFAULT_PAGE_SIZE: usize = 100;

/// Errors raised while validating or resolving a [`Config`].
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// A URL field does not parse.
    #[error("invalid {field} '{url}': {reason}")]
    InvalidUrl {
        /// Name of the offending field.
        field: &'static str,
        /// The rejected value.
        url: String,
        /// Parser message.
        reason: String,
    },

    /// Page size of zero would never advance the offset.
    #[error("page size must be greater than zero")]
    InvalidPageSize,

    /// No credential was configured at all.
    #[error("no credential configured")]
    MissingCredential,

    /// The credential environment variable is unset or empty.
    #[error("no credential configured: environment variable {0} is not set")]
    MissingCredentialEnv(String),
}

/// Connection settings for the ADP API.
///
/// The credential is the pre-encoded Basic auth value (base64 of
/// `client_id:client_secret`). It can be set directly or looked up from an
/// environment variable named by `credential_env`.
///
/// # Security
///
/// The credential is held in a [`SecretString`] and is never serialized.
///
/// # Examples
///
/// ```
/// use adp_common::Config;
///
/// let config = Config::new("certs/client.crt", "certs/client.key")
///     .with_credential("Y2xpZW50OnNlY3JldA==")
///     .with_timeout(30)
///     .with_page_size(250);
///
/// assert!(config.validate().is_ok());
/// assert_eq!(config.base_url, "https://api.adp.com");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// API host that relative request paths are resolved against.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// OAuth token endpoint, including the grant type query.
    #[serde(default = "default_token_url")]
    pub token_url: String,
    /// PEM client certificate presented on every connection.
    pub certificate_path: PathBuf,
    /// PEM private key matching `certificate_path`.
    pub key_path: PathBuf,
    /// Pre-encoded Basic credential.
    #[serde(skip_serializing, default)]
    pub credential: Option<SecretString>,
    /// Environment variable to read the credential from when `credential` is unset.
    #[serde(default)]
    pub credential_env: Option<String>,
    /// Request timeout in seconds. `None` disables the timeout.
    #[serde(default)]
    pub timeout_seconds: Option<u64>,
    /// Page size for streaming listings.
    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_token_url() -> String {
    DEFAULT_TOKEN_URL.to_string()
}

const fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

impl Config {
    /// Creates a configuration for the given certificate and key files with
    /// production endpoints.
    pub fn new(certificate_path: impl Into<PathBuf>, key_path: impl Into<PathBuf>) -> Self {
        Self {
            base_url: default_base_url(),
            token_url: default_token_url(),
            certificate_path: certificate_path.into(),
            key_path: key_path.into(),
            credential: None,
            credential_env: None,
            timeout_seconds: None,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    /// Sets the API host.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Sets the OAuth token endpoint.
    #[must_use]
    pub fn with_token_url(mut self, token_url: impl Into<String>) -> Self {
        self.token_url = token_url.into();
        self
    }

    /// Sets the pre-encoded Basic credential.
    #[must_use]
    pub fn with_credential(mut self, credential: impl Into<String>) -> Self {
        self.credential = Some(SecretString::new(credential.into().into()));
        self
    }

    /// Names the environment variable holding the credential.
    #[must_use]
    pub fn with_credential_env(mut self, variable: impl Into<String>) -> Self {
        self.credential_env = Some(variable.into());
        self
    }

    /// Sets the request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout_seconds: u64) -> Self {
        self.timeout_seconds = Some(timeout_seconds);
        self
    }

    /// Sets the streaming page size.
    #[must_use]
    pub const fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Certificate path as a [`Path`].
    pub fn certificate_path(&self) -> &Path {
        &self.certificate_path
    }

    /// Key path as a [`Path`].
    pub fn key_path(&self) -> &Path {
        &self.key_path
    }

    /// Checks that both URLs parse and the page size is usable.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] describing the first invalid setting.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [("base_url", &self.base_url), ("token_url", &self.token_url)] {
            url::Url::parse(value).map_err(|e| ConfigError::InvalidUrl {
                field,
                url: value.clone(),
                reason: e.to_string(),
            })?;
        }

        if self.page_size == 0 {
            return Err(ConfigError::InvalidPageSize);
        }

        Ok(())
    }

    /// Returns the credential, reading `credential_env` if it was not set
    /// directly.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingCredential`] or
    /// [`ConfigError::MissingCredentialEnv`] when neither source yields a value.
    pub fn resolve_credential(&self) -> Result<SecretString, ConfigError> {
        if let Some(credential) = &self.credential {
            return Ok(credential.clone());
        }

        let variable = self
            .credential_env
            .as_deref()
            .ok_or(ConfigError::MissingCredential)?;

        debug!("Reading credential from environment variable {variable}");
        std::env::var(variable)
            .ok()
            .filter(|value| !value.is_empty())
            .map(|value| SecretString::new(value.into()))
            .ok_or_else(|| ConfigError::MissingCredentialEnv(variable.to_string()))
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::expect_used)]

    use secrecy::ExposeSecret;

    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::new("client.crt", "client.key");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.token_url, DEFAULT_TOKEN_URL);
        assert_eq!(config.page_size, 100);
        assert!(config.timeout_seconds.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_toml() {
        let config: Config = toml::from_str(
            r#"
certificate_path = "/etc/adp/client.crt"
key_path = "/etc/adp/client.key"
credential_env = "ADP_CREDENTIAL"
timeout_seconds = 20
page_size = 50
            "#,
        )
        .unwrap();

        assert_eq!(config.certificate_path(), Path::new("/etc/adp/client.crt"));
        assert_eq!(config.key_path(), Path::new("/etc/adp/client.key"));
        assert_eq!(config.credential_env.as_deref(), Some("ADP_CREDENTIAL"));
        assert_eq!(config.timeout_seconds, Some(20));
        assert_eq!(config.page_size, 50);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_credential_is_not_serialized() {
        let config = Config::new("a.crt", "a.key").with_credential("c2VjcmV0");
        let json = serde_json::to_string(&config).unwrap();
        assert!(!json.contains("c2VjcmV0"));
    }

    #[test]
    fn test_validate_rejects_bad_url() {
        let config = Config::new("a.crt", "a.key").with_base_url("not a url");
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidUrl { field: "base_url", .. })
        ));
    }

    #[test]
    fn test_validate_rejects_zero_page_size() {
        let config = Config::new("a.crt", "a.key").with_page_size(0);
        assert!(matches!(config.validate(), Err(ConfigError::InvalidPageSize)));
    }

    #[test]
    fn test_resolve_credential_direct() {
        let config = Config::new("a.crt", "a.key")
            .with_credential("direct")
            .with_credential_env("ADP_COMMON_TEST_UNUSED");
        assert_eq!(config.resolve_credential().unwrap().expose_secret(), "direct");
    }

    #[test]
    fn test_resolve_credential_missing_env() {
        let config =
            Config::new("a.crt", "a.key").with_credential_env("ADP_COMMON_TEST_SURELY_UNSET");
        let err = config.resolve_credential().unwrap_err();
        assert!(err.to_string().contains("ADP_COMMON_TEST_SURELY_UNSET"));

        let bare = Config::new("a.crt", "a.key");
        assert!(matches!(
            bare.resolve_credential(),
            Err(ConfigError::MissingCredential)
        ));
    }
}
