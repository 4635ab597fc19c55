//! Error taxonomy for credential-assertion construction and exchange
//!
//! Five kinds, each fatal to the invocation: certificate handling, private key
//! handling, signing, transport, and provider-signaled rejection. Nothing is
//! retried or swallowed internally.

use std::fmt;

use crate::types::TokenErrorBody;

/// Classification of transport-level token exchange failures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportKind {
    /// The request exceeded the configured timeout
    Timeout,
    /// A connection to the endpoint could not be established
    Connect,
    /// The request failed after the connection was established
    Request,
    /// A success response carried a body that could not be parsed
    Decode,
}

impl TransportKind {
    /// Stable lowercase name, used in log fields and error messages
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Timeout => "timeout",
            Self::Connect => "connect",
            Self::Request => "request",
            Self::Decode => "decode",
        }
    }
}

impl fmt::Display for TransportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Errors produced while issuing a token from a certificate credential
#[derive(Debug, thiserror::Error)]
pub enum CredentialError {
    /// Certificate could not be read, decoded, or parsed as X.509
    #[error("certificate error: {reason}")]
    Certificate {
        /// What went wrong with the certificate input
        reason: String,
    },

    /// Private key could not be read or is not a usable RSA key
    #[error("private key error: {reason}")]
    Key {
        /// What went wrong with the key input
        reason: String,
    },

    /// Signature over the assertion could not be produced
    #[error("signing error: {reason}")]
    Signing {
        /// What went wrong during signing
        reason: String,
    },

    /// The token exchange failed before a provider verdict was received
    #[error("transport error ({kind}): {reason}")]
    Transport {
        /// Failure classification
        kind: TransportKind,
        /// Underlying failure description
        reason: String,
    },

    /// The provider answered with a non-success status
    #[error("token endpoint rejected the request (HTTP {status}): {body}")]
    Provider {
        /// HTTP status code of the response
        status: u16,
        /// Parsed provider error body (raw text preserved)
        body: TokenErrorBody,
    },
}
