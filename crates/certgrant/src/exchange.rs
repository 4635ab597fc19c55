//! Token endpoint exchange
//!
//! Posts the signed client assertion to the token endpoint as a form-encoded
//! client-credentials request and parses the JSON reply. Redirects are never
//! followed and every request runs under a bounded timeout.

use std::fmt;
use std::time::Duration;

use tracing::debug;

use crate::errors::{CredentialError, TransportKind};
use crate::types::{ClientAssertion, TokenErrorBody, TokenResponse};
use crate::{
    Result, CLIENT_ASSERTION_TYPE_JWT_BEARER, DEFAULT_EXCHANGE_TIMEOUT_SECS,
    GRANT_TYPE_CLIENT_CREDENTIALS,
};

/// Exchanges client assertions for access tokens
#[derive(Clone)]
pub struct TokenExchanger {
    client: reqwest::Client,
}

impl TokenExchanger {
    /// Exchanger with the default timeout of [`DEFAULT_EXCHANGE_TIMEOUT_SECS`]
    ///
    /// # Errors
    /// Returns [`CredentialError::Transport`] when the HTTP client cannot be
    /// constructed.
    pub fn new() -> Result<Self> {
        Self::with_timeout(Duration::from_secs(DEFAULT_EXCHANGE_TIMEOUT_SECS))
    }

    /// Exchanger with a caller-chosen whole-request timeout
    ///
    /// # Errors
    /// Returns [`CredentialError::Transport`] when the HTTP client cannot be
    /// constructed.
    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .timeout(timeout)
            .build()
            .map_err(|e| CredentialError::Transport {
                kind: TransportKind::Request,
                reason: format!("failed to build HTTP client: {e}"),
            })?;

        Ok(Self { client })
    }

    /// Exchanger over an existing reqwest client
    ///
    /// The client should be configured with `redirect::Policy::none()` and a
    /// request timeout; this constructor does not alter it.
    #[must_use]
    pub fn from_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// Post the assertion and return the issued token
    ///
    /// The form carries exactly the five client-credentials fields:
    /// `client_id`, `scope`, `client_assertion_type`, `client_assertion`
    /// and `grant_type`.
    ///
    /// # Errors
    /// [`CredentialError::Transport`] for network and body failures,
    /// [`CredentialError::Provider`] when the endpoint answers with a
    /// non-success status.
    pub async fn exchange(
        &self,
        endpoint: &str,
        client_id: &str,
        scope: &str,
        assertion: &ClientAssertion,
    ) -> Result<TokenResponse> {
        let params = [
            ("client_id", client_id),
            ("scope", scope),
            ("client_assertion_type", CLIENT_ASSERTION_TYPE_JWT_BEARER),
            ("client_assertion", assertion.as_str()),
            ("grant_type", GRANT_TYPE_CLIENT_CREDENTIALS),
        ];

        debug!(endpoint = %endpoint, client_id = %client_id, scope = %scope, "Requesting token");

        let response = self
            .client
            .post(endpoint)
            .form(&params)
            .send()
            .await
            .map_err(|e| CredentialError::Transport {
                kind: transport_kind(&e),
                reason: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            debug!(status = %status, "Token endpoint rejected the request");
            return Err(CredentialError::Provider {
                status: status.as_u16(),
                body: TokenErrorBody::from_body(&body),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| CredentialError::Transport {
                kind: transport_kind(&e),
                reason: format!("failed to read token response body: {e}"),
            })?;

        let mut token: TokenResponse =
            serde_json::from_str(&body).map_err(|e| CredentialError::Transport {
                kind: TransportKind::Decode,
                reason: format!("token endpoint returned HTTP {status} with an unparsable body: {e}"),
            })?;
        token.raw = body;

        debug!(
            token_type = %token.token_type,
            expires_in = ?token.expires_in,
            "Token issued"
        );

        Ok(token)
    }
}

impl fmt::Debug for TokenExchanger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenExchanger")
            .field("client", &"<reqwest::Client>")
            .finish()
    }
}

/// Map a reqwest failure onto the transport taxonomy
fn transport_kind(e: &reqwest::Error) -> TransportKind {
    if e.is_timeout() {
        TransportKind::Timeout
    } else if e.is_connect() {
        TransportKind::Connect
    } else if e.is_decode() {
        TransportKind::Decode
    } else {
        TransportKind::Request
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_with_default_and_custom_timeouts() {
        TokenExchanger::new().unwrap();
        TokenExchanger::with_timeout(Duration::from_millis(250)).unwrap();
    }

    #[test]
    fn debug_does_not_expose_client_internals() {
        let exchanger = TokenExchanger::new().unwrap();
        assert_eq!(
            format!("{exchanger:?}"),
            "TokenExchanger { client: \"<reqwest::Client>\" }"
        );
    }
}
