//! # certgrant - Certificate-Credential Token Issuance
//!
//! Issues short-lived OAuth2 access tokens for an application identity by
//! constructing an X.509 certificate-signed JWT client assertion and exchanging
//! it at the identity provider's token endpoint (client-credentials grant with
//! the RFC 7523 JWT-bearer assertion profile).
//!
//! ## Architecture
//!
//! - [`thumbprint`] - SHA-1 certificate thumbprint and the `x5t` header value
//! - [`assertion`] - JWT header/claims assembly and compact serialization
//! - [`signer`] - RSASSA-PKCS1-v1_5/SHA-256 signing behind the [`AssertionSigner`] trait
//! - [`exchange`] - the form-encoded POST to the token endpoint
//! - [`clock`] - injectable time and `jti` sources for deterministic tests
//! - [`config`] - validated credential inputs and token endpoint derivation
//! - [`types`] - wire-level records (header, claims, responses)
//! - [`errors`] - error taxonomy
//!
//! ## Quick Start
//!
//! ```no_run
//! use certgrant::{AssertionBuilder, Certificate, RsaAssertionSigner, TokenExchanger};
//!
//! # async fn issue() -> certgrant::Result<()> {
//! let cert = Certificate::from_file("app.crt")?;
//! let signer = RsaAssertionSigner::from_pem_file("app.key")?;
//!
//! let assertion = AssertionBuilder::new().build(&cert.x5t(), "tenant-id", "client-id", &signer)?;
//! drop(signer);
//!
//! let token = TokenExchanger::new()?
//!     .exchange(
//!         &certgrant::token_endpoint("tenant-id"),
//!         "client-id",
//!         "https://graph.microsoft.com/.default",
//!         &assertion,
//!     )
//!     .await?;
//! println!("{}", token.access_token);
//! # Ok(())
//! # }
//! ```

pub mod assertion;
pub mod clock;
pub mod config;
pub mod errors;
pub mod exchange;
pub mod signer;
pub mod thumbprint;
pub mod types;

// Re-export core types for convenience
pub use assertion::AssertionBuilder;
pub use clock::{Clock, JtiSource, SystemClock, UuidJtiSource};
pub use config::{token_endpoint, ConfigError, CredentialConfig};
pub use errors::{CredentialError, TransportKind};
pub use exchange::TokenExchanger;
pub use signer::{AssertionSigner, RsaAssertionSigner};
pub use thumbprint::{decode_hex_fingerprint, x5t_from_hex_fingerprint, Certificate};
pub use types::{AssertionClaims, AssertionHeader, ClientAssertion, TokenErrorBody, TokenResponse};

/// Crate result type
pub type Result<T> = std::result::Result<T, CredentialError>;

/// JWT type header value for client assertions
pub const ASSERTION_JWT_TYPE: &str = "JWT";

/// Assertion signing algorithm identifier (RSASSA-PKCS1-v1_5 with SHA-256, RFC 7518)
pub const ASSERTION_SIGNING_ALGORITHM: &str = "RS256";

/// Client assertion type for the JWT-bearer profile (RFC 7523)
pub const CLIENT_ASSERTION_TYPE_JWT_BEARER: &str =
    "urn:ietf:params:oauth:client-assertion-type:jwt-bearer";

/// Grant type for service-to-service token issuance
pub const GRANT_TYPE_CLIENT_CREDENTIALS: &str = "client_credentials";

/// Assertion validity window in seconds (exp - nbf)
pub const ASSERTION_LIFETIME_SECONDS: i64 = 300;

/// Default token exchange timeout in seconds
pub const DEFAULT_EXCHANGE_TIMEOUT_SECS: u64 = 30;
