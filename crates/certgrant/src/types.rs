//! Wire-level records for the assertion and the token exchange
//!
//! Field names and serialized forms here are fixed by the provider protocol;
//! serde renames pin them independently of Rust naming.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{ASSERTION_JWT_TYPE, ASSERTION_SIGNING_ALGORITHM};

/// JWT header of a client assertion
///
/// Serializes to exactly `{"alg":"RS256","typ":"JWT","x5t":"..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssertionHeader {
    /// Signing algorithm identifier
    #[serde(rename = "alg")]
    pub algorithm: String,

    /// Token type
    pub typ: String,

    /// Base64url-encoded SHA-1 thumbprint of the signing certificate
    pub x5t: String,
}

impl AssertionHeader {
    /// Create the fixed RS256/JWT header for the given certificate thumbprint
    #[must_use]
    pub fn new(x5t: impl Into<String>) -> Self {
        Self {
            algorithm: ASSERTION_SIGNING_ALGORITHM.to_string(),
            typ: ASSERTION_JWT_TYPE.to_string(),
            x5t: x5t.into(),
        }
    }
}

/// JWT claims of a client assertion
///
/// `iss` and `sub` both carry the client id; `aud` is the token endpoint the
/// assertion will be posted to. `exp` is always `nbf` plus the assertion
/// lifetime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssertionClaims {
    /// Audience: the token endpoint URL
    pub aud: String,

    /// Issuer: the client id
    pub iss: String,

    /// Subject: the client id
    pub sub: String,

    /// Unique assertion identifier (fresh per invocation)
    pub jti: String,

    /// Not-before timestamp (Unix seconds)
    pub nbf: i64,

    /// Expiry timestamp (Unix seconds)
    pub exp: i64,
}

/// A finished client assertion in compact JWT form
///
/// The wrapped text is always three dot-joined unpadded base64url segments;
/// the signature segment covers exactly the first two.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientAssertion(String);

impl ClientAssertion {
    pub(crate) fn new(compact: String) -> Self {
        Self(compact)
    }

    /// The compact JWT text
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the assertion, returning the compact JWT text
    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

/// Parsed success response from the token endpoint
///
/// The access token is opaque text; nothing here validates it. The raw body is
/// kept alongside the parsed fields so callers can emit the provider's answer
/// verbatim.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    /// The issued access token
    pub access_token: String,

    /// Token type reported by the provider (typically `Bearer`)
    pub token_type: String,

    /// Token lifetime in seconds, when reported
    #[serde(default)]
    pub expires_in: Option<u64>,

    /// Granted scope, when echoed back
    #[serde(default)]
    pub scope: Option<String>,

    /// Provider-specific extra fields (e.g. `ext_expires_in`)
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,

    /// Raw response body text, preserved for verbatim output
    #[serde(skip)]
    pub raw: String,
}

/// Parsed error response from the token endpoint
///
/// Providers answer rejections with a JSON error document; when the body is
/// not JSON the raw text is kept and the structured fields stay empty.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TokenErrorBody {
    /// OAuth2 error code (e.g. `invalid_client`)
    #[serde(default)]
    pub error: Option<String>,

    /// Human-readable error description
    #[serde(default)]
    pub error_description: Option<String>,

    /// Provider-specific numeric error codes
    #[serde(default)]
    pub error_codes: Option<Vec<i64>>,

    /// Correlation id for support lookups
    #[serde(default)]
    pub correlation_id: Option<String>,

    /// Trace id for support lookups
    #[serde(default)]
    pub trace_id: Option<String>,

    /// Raw response body text
    #[serde(skip)]
    pub raw: String,
}

impl TokenErrorBody {
    /// Parse a provider error body, falling back to raw text when not JSON
    #[must_use]
    pub fn from_body(body: &str) -> Self {
        let mut parsed: Self = serde_json::from_str(body).unwrap_or_default();
        parsed.raw = body.to_string();
        parsed
    }
}

impl fmt::Display for TokenErrorBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.error, &self.error_description) {
            (Some(error), Some(description)) => write!(f, "{error}: {description}"),
            (Some(error), None) => write!(f, "{error}"),
            _ if !self.raw.is_empty() => write!(f, "{}", self.raw),
            _ => write!(f, "(empty response body)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_serializes_with_exact_field_names() {
        let header = AssertionHeader::new("NZmRAoAiJXD2aSq1Qo3nLC-kDzs");
        let json = serde_json::to_string(&header).unwrap();
        assert_eq!(
            json,
            r#"{"alg":"RS256","typ":"JWT","x5t":"NZmRAoAiJXD2aSq1Qo3nLC-kDzs"}"#
        );
    }

    #[test]
    fn claims_round_trip_through_json() {
        let claims = AssertionClaims {
            aud: "https://login.microsoftonline.com/t/oauth2/v2.0/token".to_string(),
            iss: "client-1".to_string(),
            sub: "client-1".to_string(),
            jti: "id-1".to_string(),
            nbf: 1_700_000_000,
            exp: 1_700_000_300,
        };
        let json = serde_json::to_string(&claims).unwrap();
        let back: AssertionClaims = serde_json::from_str(&json).unwrap();
        assert_eq!(back, claims);
    }

    #[test]
    fn token_response_captures_provider_extras() {
        let body = r#"{"token_type":"Bearer","expires_in":3599,"ext_expires_in":3599,"access_token":"eyJ0eXAi"}"#;
        let parsed: TokenResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.access_token, "eyJ0eXAi");
        assert_eq!(parsed.token_type, "Bearer");
        assert_eq!(parsed.expires_in, Some(3599));
        assert_eq!(parsed.scope, None);
        assert_eq!(parsed.extra["ext_expires_in"], 3599);
    }

    #[test]
    fn error_body_parses_provider_fields() {
        let body = r#"{"error":"invalid_client","error_description":"AADSTS700016: app not found","error_codes":[700016],"correlation_id":"abc","trace_id":"def"}"#;
        let parsed = TokenErrorBody::from_body(body);
        assert_eq!(parsed.error.as_deref(), Some("invalid_client"));
        assert_eq!(parsed.error_codes, Some(vec![700016]));
        assert_eq!(parsed.raw, body);
        assert!(parsed.to_string().starts_with("invalid_client: AADSTS700016"));
    }

    #[test]
    fn error_body_falls_back_to_raw_text() {
        let parsed = TokenErrorBody::from_body("<html>Bad Gateway</html>");
        assert_eq!(parsed.error, None);
        assert_eq!(parsed.to_string(), "<html>Bad Gateway</html>");
    }
}
