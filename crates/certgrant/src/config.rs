//! Credential inputs and token endpoint derivation

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Authority host the token endpoint lives under
pub const AUTHORITY_HOST: &str = "https://login.microsoftonline.com";

/// Invalid or incomplete credential configuration
#[derive(Debug, thiserror::Error)]
#[error("invalid configuration: {reason}")]
pub struct ConfigError {
    /// What is wrong with the configuration
    pub reason: String,
}

/// Token endpoint URL for a tenant
///
/// Single source for both the assertion `aud` claim and the exchange POST
/// target; the two must always agree.
#[must_use]
pub fn token_endpoint(tenant_id: &str) -> String {
    format!("{AUTHORITY_HOST}/{tenant_id}/oauth2/v2.0/token")
}

/// Validated inputs for one token issuance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CredentialConfig {
    /// Directory tenant (GUID or verified domain name)
    pub tenant_id: String,

    /// Application (client) id of the registered identity
    pub client_id: String,

    /// Requested scope (e.g. `https://graph.microsoft.com/.default`)
    pub scope: String,

    /// Path to the X.509 certificate (PEM or DER)
    pub certificate: PathBuf,

    /// Path to the RSA private key (PEM, unencrypted)
    pub private_key: PathBuf,
}

impl CredentialConfig {
    /// Check the configuration before any credential work starts
    ///
    /// # Errors
    /// Returns [`ConfigError`] for empty fields or a tenant id that cannot
    /// appear in a URL path segment.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tenant_id.is_empty() {
            return Err(ConfigError {
                reason: "tenant_id must not be empty".to_string(),
            });
        }
        if let Some(bad) = self
            .tenant_id
            .chars()
            .find(|c| !c.is_ascii_alphanumeric() && !matches!(c, '-' | '.' | '_'))
        {
            return Err(ConfigError {
                reason: format!("tenant_id contains invalid character {bad:?}"),
            });
        }
        if self.client_id.is_empty() {
            return Err(ConfigError {
                reason: "client_id must not be empty".to_string(),
            });
        }
        if self.scope.is_empty() {
            return Err(ConfigError {
                reason: "scope must not be empty".to_string(),
            });
        }
        Ok(())
    }

    /// The token endpoint derived from this configuration's tenant
    #[must_use]
    pub fn token_endpoint(&self) -> String {
        token_endpoint(&self.tenant_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> CredentialConfig {
        CredentialConfig {
            tenant_id: "tenant-xyz".to_string(),
            client_id: "11112222-3333-4444-5555-666677778888".to_string(),
            scope: "https://graph.microsoft.com/.default".to_string(),
            certificate: PathBuf::from("app.crt"),
            private_key: PathBuf::from("app.key"),
        }
    }

    #[test]
    fn token_endpoint_has_fixed_shape() {
        assert_eq!(
            token_endpoint("tenant-xyz"),
            "https://login.microsoftonline.com/tenant-xyz/oauth2/v2.0/token"
        );
    }

    #[test]
    fn config_endpoint_matches_free_function() {
        let config = sample();
        assert_eq!(config.token_endpoint(), token_endpoint("tenant-xyz"));
    }

    #[test]
    fn accepts_guid_and_domain_tenants() {
        let mut config = sample();
        config.tenant_id = "a1b2c3d4-e5f6-7890-abcd-ef0123456789".to_string();
        config.validate().unwrap();

        config.tenant_id = "contoso.onmicrosoft.com".to_string();
        config.validate().unwrap();
    }

    #[test]
    fn rejects_empty_fields() {
        let mut config = sample();
        config.tenant_id = String::new();
        assert!(config.validate().is_err());

        let mut config = sample();
        config.client_id = String::new();
        assert!(config.validate().is_err());

        let mut config = sample();
        config.scope = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_tenant_with_path_breaking_characters() {
        for tenant in ["a/b", "a?b", "a#b", "a b", "a%2fb"] {
            let mut config = sample();
            config.tenant_id = tenant.to_string();
            let err = config.validate().unwrap_err();
            assert!(err.to_string().contains("invalid character"), "{tenant}");
        }
    }
}
