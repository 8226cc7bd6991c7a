//! # adp-client
//!
//! Client library for the ADP Workforce Now worker API.
//!
//! ADP authenticates with OAuth client credentials over mutual TLS: every
//! connection presents a client certificate, and every API call carries a
//! bearer token obtained from the token endpoint. This crate provides:
//! - `Credentials` validation for the certificate, key and Basic credential
//! - The `Authenticator` trait and its OAuth implementation
//! - A `Transport` that resolves, authorizes and status-checks API calls
//! - `WorkerService` for single, paginated and streaming worker fetches
//!
//! ## Example
//!
//! ```no_run
//! use adp_client::{Authenticator, Credentials, OAuthAuthenticator, WorkerService};
//! use adp_common::DEFAULT_BASE_URL;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let credentials = Credentials::new("certs/client.crt", "certs/client.key", "Y2xpZW50OnNlY3JldA==")?;
//!
//! let mut authenticator = OAuthAuthenticator::new(credentials);
//! authenticator.authenticate().await?;
//!
//! let service = WorkerService::new(authenticator, DEFAULT_BASE_URL);
//! for worker in service.list_workers().await? {
//!     println!("{} {}", worker.associate_oid(), worker.full_name());
//! }
//! # Ok(())
//! # }
//! ```

use async_trait::async_trait;
use reqwest::RequestBuilder;
use reqwest::header::{AUTHORIZATION, HeaderValue};

use adp_common::Token;

pub mod auth;
pub mod credentials;
pub mod error;
pub mod transport;
pub mod workers;

pub use auth::OAuthAuthenticator;
pub use credentials::Credentials;
pub use error::{ClientError, ValidationErrors};
pub use transport::Transport;
pub use workers::{WORKERS_PATH, WorkerService, WorkerStream};

/// Source of the TLS client and bearer token for API calls.
///
/// Authentication mutates the held token and therefore takes `&mut self`;
/// everything else reads through `&self`, so an authenticated value can be
/// shared behind an `Arc` by concurrent requests without locking.
#[must_use = "Authenticator must be used to make requests"]
#[async_trait]
pub trait Authenticator: Send + Sync {
    /// Obtain and store an access token.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The certificate/key pair cannot be loaded
    /// - Network communication fails
    /// - The token endpoint rejects the credential
    /// - The token response cannot be parsed
    async fn authenticate(&mut self) -> Result<(), ClientError>;

    /// The TLS-capable HTTP client used for every call.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Certificate`] if the client cannot be built.
    fn http_client(&self) -> Result<&reqwest::Client, ClientError>;

    /// The token obtained by the last successful [`authenticate`](Self::authenticate).
    fn token(&self) -> Option<&Token>;

    /// Whether a token is held.
    fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }

    /// Attach `Authorization: Bearer <token>` to a request.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::NotAuthenticated`] when no token is held.
    fn authorize(&self, request: RequestBuilder) -> Result<RequestBuilder, ClientError> {
        let token = self.token().ok_or(ClientError::NotAuthenticated)?;

        let mut value = HeaderValue::from_str(&token.bearer()).map_err(|_| {
            ClientError::Authentication("access token is not a valid header value".to_string())
        })?;
        value.set_sensitive(true);

        Ok(request.header(AUTHORIZATION, value))
    }
}
