use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

/// Access token returned by the client-credentials exchange.
///
/// The access token itself is kept in a [`SecretString`] so it never shows up
/// in `Debug` output or logs.
#[derive(Debug, Clone, Deserialize)]
pub struct Token {
    access_token: SecretString,
    /// Token type reported by the server, normally `Bearer`.
    #[serde(default)]
    pub token_type: String,
    /// Lifetime hint in seconds. Informational only; tokens are not refreshed.
    #[serde(default)]
    pub expires_in: u64,
    /// Space separated scopes granted to the token.
    #[serde(default)]
    pub scope: String,
}

impl Token {
    /// Creates a token from its parts.
    pub fn new(
        access_token: impl Into<String>,
        token_type: impl Into<String>,
        expires_in: u64,
        scope: impl Into<String>,
    ) -> Self {
        Self {
            access_token: SecretString::new(access_token.into().into()),
            token_type: token_type.into(),
            expires_in,
            scope: scope.into(),
        }
    }

    /// The raw access token.
    pub fn access_token(&self) -> &str {
        self.access_token.expose_secret()
    }

    /// Value for an `Authorization` header: `Bearer <access_token>`.
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.access_token())
    }

    /// Lifetime hint as a [`Duration`].
    pub const fn expires_in(&self) -> Duration {
        Duration::from_secs(self.expires_in)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::expect_used)]

    use super::*;

    #[test]
    fn test_decode_token_response() {
        let token: Token = serde_json::from_str(
            r#"{
                "access_token": "abc-123",
                "token_type": "Bearer",
                "expires_in": 3600,
                "scope": "api"
            }"#,
        )
        .unwrap();

        assert_eq!(token.access_token(), "abc-123");
        assert_eq!(token.token_type, "Bearer");
        assert_eq!(token.expires_in(), Duration::from_secs(3600));
        assert_eq!(token.scope, "api");
        assert_eq!(token.bearer(), "Bearer abc-123");
    }

    #[test]
    fn test_missing_access_token_fails() {
        let result = serde_json::from_str::<Token>(r#"{"token_type": "Bearer"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_debug_redacts_access_token() {
        let token = Token::new("super-secret", "Bearer", 60, "api");
        let debug = format!("{token:?}");
        assert!(!debug.contains("super-secret"));
    }
}
