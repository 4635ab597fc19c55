//! Command-line argument parsing

use std::path::PathBuf;

use clap::Parser;

/// Main CLI application structure
#[derive(Parser, Debug, Clone)]
#[command(
    name = "certgrant",
    version,
    about = "Issue an OAuth2 access token from an X.509 certificate credential",
    long_about = "certgrant performs one client-credentials token issuance: it builds a\n\
                  certificate-signed JWT client assertion and exchanges it at the tenant's\n\
                  v2.0 token endpoint. The provider's token response is printed to stdout\n\
                  verbatim (just the access token with --token-only); everything else goes\n\
                  to stderr.\n\n\
                  Inputs can come from flags, CERTGRANT_* environment variables, or a\n\
                  config file (--config); flags and environment win over the file."
)]
pub struct Cli {
    /// Directory tenant (GUID or verified domain name)
    #[arg(long, env = "CERTGRANT_TENANT_ID")]
    pub tenant_id: Option<String>,

    /// Application (client) id of the registered identity
    #[arg(long, env = "CERTGRANT_CLIENT_ID")]
    pub client_id: Option<String>,

    /// Requested scope (e.g. https://graph.microsoft.com/.default)
    #[arg(long, env = "CERTGRANT_SCOPE")]
    pub scope: Option<String>,

    /// Path to the X.509 certificate (PEM or DER)
    #[arg(long, env = "CERTGRANT_CERTIFICATE")]
    pub certificate: Option<PathBuf>,

    /// Path to the RSA private key (PEM, unencrypted)
    #[arg(long, env = "CERTGRANT_PRIVATE_KEY")]
    pub private_key: Option<PathBuf>,

    /// Configuration file (TOML, YAML, or JSON)
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,

    /// Token exchange timeout in seconds
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// Print only the access token instead of the full response JSON
    #[arg(long)]
    pub token_only: bool,

    /// Enable verbose output
    #[arg(long, short = 'v')]
    pub verbose: bool,
}
