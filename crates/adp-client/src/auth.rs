//! OAuth client-credentials authentication over mutual TLS.
//!
//! ADP requires the client certificate on every connection, including the
//! token request, so the same `reqwest::Client` is used for authentication
//! and for all later API calls.

use std::sync::OnceLock;
use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info, warn};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};

use adp_common::{Config, DEFAULT_TOKEN_URL, Token};

use crate::Authenticator;
use crate::credentials::Credentials;
use crate::error::ClientError;

/// Authenticator for ADP's OAuth token endpoint.
///
/// Holds the credentials, the TLS client built from them and, once
/// [`Authenticator::authenticate`] succeeds, the access token.
#[derive(Debug)]
pub struct OAuthAuthenticator {
    credentials: Credentials,
    token_url: String,
    timeout: Option<Duration>,
    client: OnceLock<reqwest::Client>,
    token: Option<Token>,
}

impl OAuthAuthenticator {
    /// Creates an authenticator that talks to the production token endpoint.
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            token_url: DEFAULT_TOKEN_URL.to_string(),
            timeout: None,
            client: OnceLock::new(),
            token: None,
        }
    }

    /// Creates an authenticator from a [`Config`], honoring its token URL and
    /// timeout.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the credential
    /// inputs fail validation.
    pub fn from_config(config: &Config) -> Result<Self, ClientError> {
        config.validate()?;
        let credentials = Credentials::from_config(config)?;

        let mut authenticator = Self::new(credentials).with_token_url(&config.token_url);
        if let Some(seconds) = config.timeout_seconds {
            authenticator = authenticator.with_timeout(Duration::from_secs(seconds));
        }
        Ok(authenticator)
    }

    /// Overrides the token endpoint.
    #[must_use]
    pub fn with_token_url(mut self, token_url: impl Into<String>) -> Self {
        self.token_url = token_url.into();
        self
    }

    /// Sets a request timeout on the TLS client.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// The credentials this authenticator was built from.
    pub const fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// The token endpoint in use.
    pub fn token_url(&self) -> &str {
        &self.token_url
    }

    /// Builds a fresh mutual-TLS client from the certificate and key files.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Certificate`] if either file cannot be read or
    /// the pair cannot be loaded as a TLS identity.
    pub fn new_http_client(&self) -> Result<reqwest::Client, ClientError> {
        let certificate_path = self.credentials.certificate_path();
        let key_path = self.credentials.key_path();

        let mut pem = std::fs::read(certificate_path).map_err(|e| {
            ClientError::Certificate(format!(
                "failed to read certificate {}: {e}",
                certificate_path.display()
            ))
        })?;
        let key = std::fs::read(key_path).map_err(|e| {
            ClientError::Certificate(format!("failed to read key {}: {e}", key_path.display()))
        })?;
        pem.push(b'\n');
        pem.extend_from_slice(&key);

        let identity = reqwest::Identity::from_pem(&pem)
            .map_err(|e| ClientError::Certificate(format!("invalid certificate/key pair: {e}")))?;

        let mut builder = reqwest::Client::builder()
            .use_rustls_tls()
            .identity(identity);
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }

        builder
            .build()
            .map_err(|e| ClientError::Certificate(format!("failed to build TLS client: {e}")))
    }
}

#[async_trait]
impl Authenticator for OAuthAuthenticator {
    async fn authenticate(&mut self) -> Result<(), ClientError> {
        let client = self.http_client()?.clone();

        debug!("Requesting access token from {}", self.token_url);
        let response = client
            .post(&self.token_url)
            .header(AUTHORIZATION, self.credentials.basic_authorization())
            .header(CONTENT_TYPE, "application/json")
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            warn!(
                "Token request failed with status {}: {}",
                status.as_u16(),
                body
            );
            return Err(ClientError::Authentication(body));
        }

        let token: Token = serde_json::from_str(&body)?;
        info!(
            "Authenticated, token type '{}' expires in {}s",
            token.token_type, token.expires_in
        );
        self.token = Some(token);
        Ok(())
    }

    fn http_client(&self) -> Result<&reqwest::Client, ClientError> {
        if let Some(client) = self.client.get() {
            return Ok(client);
        }
        let client = self.new_http_client()?;
        Ok(self.client.get_or_init(|| client))
    }

    fn token(&self) -> Option<&Token> {
        self.token.as_ref()
    }
}
