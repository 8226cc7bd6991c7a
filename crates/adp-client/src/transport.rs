//! Authorized, status-checked calls against the API base URL.

use std::sync::Arc;

use log::{debug, warn};
use reqwest::header::CONTENT_TYPE;
use reqwest::{Method, Response};
use serde::de::DeserializeOwned;

use adp_common::WorkerPage;

use crate::Authenticator;
use crate::error::ClientError;

/// Executes API calls with the authenticator's TLS client and bearer token.
///
/// The authenticator is shared, so cloning a `Transport` is cheap and clones
/// can be moved into background tasks.
#[derive(Debug)]
pub struct Transport<A> {
    authenticator: Arc<A>,
    base_url: String,
}

// Manual impl: `A` itself does not need to be `Clone`
impl<A> Clone for Transport<A> {
    fn clone(&self) -> Self {
        Self {
            authenticator: Arc::clone(&self.authenticator),
            base_url: self.base_url.clone(),
        }
    }
}

impl<A: Authenticator> Transport<A> {
    /// Creates a transport for `base_url`, e.g. `https://api.adp.com`.
    pub fn new(authenticator: Arc<A>, base_url: impl Into<String>) -> Self {
        Self {
            authenticator,
            base_url: base_url.into(),
        }
    }

    /// The base URL paths are resolved against.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The shared authenticator.
    pub const fn authenticator(&self) -> &Arc<A> {
        &self.authenticator
    }

    /// Joins `path` onto the base URL with exactly one `/` between them.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Configuration`] if the result is not a valid URL.
    pub fn url_for(&self, path: &str) -> Result<reqwest::Url, ClientError> {
        let url = format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        );
        reqwest::Url::parse(&url)
            .map_err(|e| ClientError::Configuration(format!("Invalid URL '{url}': {e}")))
    }

    /// Sends an authorized request and checks for a 2xx status.
    ///
    /// The response is returned unread so the caller can decode it as it
    /// sees fit.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The URL cannot be built
    /// - No token is held
    /// - Network communication fails
    /// - The status is outside 200..300 ([`ClientError::HttpStatus`])
    pub async fn request(&self, method: Method, path: &str) -> Result<Response, ClientError> {
        let url = self.url_for(path)?;
        let client = self.authenticator.http_client()?;

        let is_get = method == Method::GET;
        let mut builder = self.authenticator.authorize(client.request(method, url.clone()))?;
        if is_get {
            builder = builder.header(CONTENT_TYPE, "application/json");
        }

        debug!("Sending request to {url}");
        let response = builder.send().await?;

        let status = response.status();
        if !status.is_success() {
            warn!("Request to {url} failed with status {}", status.as_u16());
            return Err(ClientError::HttpStatus {
                status: status.as_u16(),
            });
        }

        Ok(response)
    }

    /// GETs `path` and decodes the JSON body.
    ///
    /// # Errors
    ///
    /// Returns the errors of [`Transport::request`] plus
    /// [`ClientError::Decode`] when the body does not match `T`.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let response = self.request(Method::GET, path).await?;
        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Reads a response body as a [`WorkerPage`].
    ///
    /// An empty or whitespace-only body is a valid empty page, as is an
    /// object without a `workers` key.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Transport`] if the body cannot be read and
    /// [`ClientError::Decode`] if it is not a worker page.
    pub async fn decode_page(response: Response) -> Result<WorkerPage, ClientError> {
        let body = response.text().await?;
        if body.trim().is_empty() {
            return Ok(WorkerPage::default());
        }
        Ok(serde_json::from_str(&body)?)
    }
}
