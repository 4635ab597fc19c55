//! Client assertion assembly and signing
//!
//! Builds the compact JWT presented as `client_assertion`: base64url header
//! and claims segments joined by `.`, signed as-is, signature appended. The
//! signed message is exactly the two joined segments; nothing is re-encoded
//! between serialization and signing.

use std::sync::Arc;

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use tracing::debug;

use crate::clock::{Clock, JtiSource, SystemClock, UuidJtiSource};
use crate::config::token_endpoint;
use crate::errors::CredentialError;
use crate::signer::AssertionSigner;
use crate::types::{AssertionClaims, AssertionHeader, ClientAssertion};
use crate::{Result, ASSERTION_LIFETIME_SECONDS};

/// Assembles signed client assertions
///
/// Time and `jti` generation are injectable so tests can pin both; the
/// default sources are the system clock and random v4 UUIDs.
#[derive(Debug, Clone)]
pub struct AssertionBuilder {
    clock: Arc<dyn Clock>,
    jti: Arc<dyn JtiSource>,
}

impl AssertionBuilder {
    /// Builder with the system clock and UUID `jti` source
    #[must_use]
    pub fn new() -> Self {
        Self {
            clock: Arc::new(SystemClock),
            jti: Arc::new(UuidJtiSource),
        }
    }

    /// Builder with caller-provided time and `jti` sources
    #[must_use]
    pub fn with_sources(clock: Arc<dyn Clock>, jti: Arc<dyn JtiSource>) -> Self {
        Self { clock, jti }
    }

    /// Build and sign one client assertion
    ///
    /// The assertion is valid from now (`nbf`) for
    /// [`ASSERTION_LIFETIME_SECONDS`]. `aud` is the tenant's token endpoint,
    /// and `iss` and `sub` both carry the client id.
    ///
    /// # Errors
    /// Returns [`CredentialError::Signing`] when serialization or the
    /// signing operation fails.
    pub fn build(
        &self,
        x5t: &str,
        tenant_id: &str,
        client_id: &str,
        signer: &dyn AssertionSigner,
    ) -> Result<ClientAssertion> {
        let nbf = self.clock.now_unix();
        let claims = AssertionClaims {
            aud: token_endpoint(tenant_id),
            iss: client_id.to_string(),
            sub: client_id.to_string(),
            jti: self.jti.next_jti(),
            nbf,
            exp: nbf + ASSERTION_LIFETIME_SECONDS,
        };
        let header = AssertionHeader::new(x5t);

        let header_json = serde_json::to_string(&header).map_err(|e| CredentialError::Signing {
            reason: format!("failed to serialize assertion header: {e}"),
        })?;
        let claims_json = serde_json::to_string(&claims).map_err(|e| CredentialError::Signing {
            reason: format!("failed to serialize assertion claims: {e}"),
        })?;

        let header_b64 = URL_SAFE_NO_PAD.encode(header_json.as_bytes());
        let claims_b64 = URL_SAFE_NO_PAD.encode(claims_json.as_bytes());

        let message = format!("{header_b64}.{claims_b64}");
        let signature = signer.sign(message.as_bytes())?;
        let signature_b64 = URL_SAFE_NO_PAD.encode(&signature);

        debug!(
            jti = %claims.jti,
            aud = %claims.aud,
            nbf = claims.nbf,
            exp = claims.exp,
            "Built client assertion"
        );

        Ok(ClientAssertion::new(format!("{message}.{signature_b64}")))
    }
}

impl Default for AssertionBuilder {
    fn default() -> Self {
        Self::new()
    }
}
