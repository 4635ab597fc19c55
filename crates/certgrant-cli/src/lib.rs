//! # certgrant CLI
//!
//! One-shot command-line front end over the `certgrant` library: resolve
//! inputs from flags, environment, and an optional config file, issue one
//! token, print it, exit.
//!
//! The provider's token response goes to stdout verbatim (`--token-only`
//! narrows that to the access token); diagnostics go to stderr.
//!
//! ## Exit codes
//!
//! - `0` token issued
//! - `2` configuration or usage error (clap uses 2 for bad flags as well)
//! - `3` certificate error
//! - `4` private key error
//! - `5` signing error
//! - `6` transport error
//! - `7` provider rejected the request

pub mod cli;
pub mod config;

use std::time::Duration;

use clap::Parser;
use tracing::debug;

use certgrant::{
    AssertionBuilder, Certificate, CredentialConfig, CredentialError, RsaAssertionSigner,
    TokenExchanger, DEFAULT_EXCHANGE_TIMEOUT_SECS,
};

pub use cli::Cli;
pub use config::{FileSettings, SettingsError};

/// Errors that end a run, each mapped to a process exit code
#[derive(Debug, thiserror::Error)]
pub enum RunError {
    /// The config file could not be loaded
    #[error(transparent)]
    Settings(#[from] SettingsError),

    /// A required input was provided by neither flags, environment, nor file
    #[error("missing required input: --{flag} (flag, {env}, or config file)")]
    MissingInput {
        /// Long flag name, without the leading dashes
        flag: &'static str,
        /// Environment variable that also carries the value
        env: &'static str,
    },

    /// The resolved inputs failed validation
    #[error(transparent)]
    Config(#[from] certgrant::ConfigError),

    /// Token issuance failed
    #[error(transparent)]
    Credential(#[from] CredentialError),
}

impl RunError {
    /// Process exit code for this failure
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Settings(_) | Self::MissingInput { .. } | Self::Config(_) => 2,
            Self::Credential(e) => match e {
                CredentialError::Certificate { .. } => 3,
                CredentialError::Key { .. } => 4,
                CredentialError::Signing { .. } => 5,
                CredentialError::Transport { .. } => 6,
                CredentialError::Provider { .. } => 7,
            },
        }
    }
}

/// Run the CLI application
///
/// # Errors
/// Returns [`RunError`] for any failure; `main` maps it to an exit code.
pub async fn run() -> Result<(), RunError> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    execute(cli).await
}

/// Inputs after merging flags, environment, and the config file
#[derive(Debug)]
struct ResolvedRun {
    credential: CredentialConfig,
    timeout: Duration,
    token_only: bool,
}

async fn execute(cli: Cli) -> Result<(), RunError> {
    let resolved = resolve(cli)?;

    let cert = Certificate::from_file(&resolved.credential.certificate)?;
    let signer = RsaAssertionSigner::from_pem_file(&resolved.credential.private_key)?;

    let assertion = AssertionBuilder::new().build(
        &cert.x5t(),
        &resolved.credential.tenant_id,
        &resolved.credential.client_id,
        &signer,
    )?;
    // Key material is no longer needed once the assertion is signed
    drop(signer);

    let token = TokenExchanger::with_timeout(resolved.timeout)?
        .exchange(
            &resolved.credential.token_endpoint(),
            &resolved.credential.client_id,
            &resolved.credential.scope,
            &assertion,
        )
        .await?;

    if resolved.token_only {
        println!("{}", token.access_token);
    } else {
        println!("{}", token.raw);
    }
    Ok(())
}

/// Merge flag, environment, and file inputs; flags and environment win
fn resolve(cli: Cli) -> Result<ResolvedRun, RunError> {
    let file = match cli.config.as_deref() {
        Some(path) => {
            debug!(path = %path.display(), "Loading config file");
            FileSettings::from_file(path)?
        }
        None => FileSettings::default(),
    };

    let credential = CredentialConfig {
        tenant_id: cli
            .tenant_id
            .or(file.tenant_id)
            .ok_or(RunError::MissingInput {
                flag: "tenant-id",
                env: "CERTGRANT_TENANT_ID",
            })?,
        client_id: cli
            .client_id
            .or(file.client_id)
            .ok_or(RunError::MissingInput {
                flag: "client-id",
                env: "CERTGRANT_CLIENT_ID",
            })?,
        scope: cli.scope.or(file.scope).ok_or(RunError::MissingInput {
            flag: "scope",
            env: "CERTGRANT_SCOPE",
        })?,
        certificate: cli
            .certificate
            .or(file.certificate)
            .ok_or(RunError::MissingInput {
                flag: "certificate",
                env: "CERTGRANT_CERTIFICATE",
            })?,
        private_key: cli
            .private_key
            .or(file.private_key)
            .ok_or(RunError::MissingInput {
                flag: "private-key",
                env: "CERTGRANT_PRIVATE_KEY",
            })?,
    };
    credential.validate()?;

    let timeout_secs = cli
        .timeout_secs
        .or(file.timeout_secs)
        .unwrap_or(DEFAULT_EXCHANGE_TIMEOUT_SECS);

    Ok(ResolvedRun {
        credential,
        timeout: Duration::from_secs(timeout_secs),
        token_only: cli.token_only,
    })
}

fn init_tracing(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let default_directive = if verbose {
        "certgrant=debug,certgrant_cli=debug"
    } else {
        "warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    // stdout carries only the token output
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
