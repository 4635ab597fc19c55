//! Certificate thumbprint derivation
//!
//! The `x5t` JWT header value is the unpadded URL-safe base64 encoding of the
//! 20-byte SHA-1 digest of the certificate's DER encoding. Tooling usually
//! prints that digest as colon-delimited hex; [`decode_hex_fingerprint`] turns
//! the hex text back into raw bytes first. Encoding the hex text itself
//! produces a wrong thumbprint that providers reject with an opaque error.

use std::fmt;
use std::path::Path;

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use sha1::{Digest, Sha1};
use tracing::debug;
use x509_cert::der::{Decode, Document};

use crate::errors::CredentialError;
use crate::Result;

/// Length in bytes of a SHA-1 certificate fingerprint
pub const SHA1_FINGERPRINT_LEN: usize = 20;

const PEM_CERT_TAG: &[u8] = b"-----BEGIN CERTIFICATE-----";

/// An X.509 certificate held as validated DER bytes
///
/// Loadable from PEM or raw DER; immutable once loaded. The thumbprint is
/// always computed over the DER encoding, regardless of the input form.
#[derive(Clone)]
pub struct Certificate {
    der: Vec<u8>,
}

impl Certificate {
    /// Load a certificate from PEM (`-----BEGIN CERTIFICATE-----`) or raw DER
    ///
    /// Both forms are validated as X.509 before acceptance. The stored bytes
    /// are the input DER or the decoded PEM body exactly as given; nothing is
    /// re-encoded.
    ///
    /// # Errors
    /// Returns [`CredentialError::Certificate`] if the input parses as neither.
    pub fn from_pem_or_der(input: &[u8]) -> Result<Self> {
        let der = match find_pem_start(input) {
            Some(start) => {
                let text = std::str::from_utf8(&input[start..]).map_err(|e| {
                    CredentialError::Certificate {
                        reason: format!("invalid PEM certificate: {e}"),
                    }
                })?;
                let (_, document) =
                    Document::from_pem(text).map_err(|e| CredentialError::Certificate {
                        reason: format!("invalid PEM certificate: {e}"),
                    })?;
                document
                    .decode_msg::<x509_cert::Certificate>()
                    .map_err(|e| CredentialError::Certificate {
                        reason: format!("PEM body is not an X.509 certificate: {e}"),
                    })?;
                document.into_vec()
            }
            None => {
                x509_cert::Certificate::from_der(input).map_err(|e| {
                    CredentialError::Certificate {
                        reason: format!("input is neither PEM nor DER X.509: {e}"),
                    }
                })?;
                input.to_vec()
            }
        };

        Ok(Self { der })
    }

    /// Load a certificate from a PEM or DER file
    ///
    /// # Errors
    /// Returns [`CredentialError::Certificate`] if the file cannot be read or
    /// does not hold an X.509 certificate.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|e| CredentialError::Certificate {
            reason: format!("failed to read {}: {e}", path.display()),
        })?;
        let cert = Self::from_pem_or_der(&bytes)?;
        debug!(path = %path.display(), x5t = %cert.x5t(), "Loaded certificate");
        Ok(cert)
    }

    /// SHA-1 digest of the DER encoding, as 20 raw bytes
    #[must_use]
    pub fn sha1_fingerprint(&self) -> [u8; SHA1_FINGERPRINT_LEN] {
        let mut hasher = Sha1::new();
        hasher.update(&self.der);
        let digest = hasher.finalize();

        let mut fingerprint = [0u8; SHA1_FINGERPRINT_LEN];
        fingerprint.copy_from_slice(&digest);
        fingerprint
    }

    /// The `x5t` header value: unpadded base64url of the raw fingerprint bytes
    #[must_use]
    pub fn x5t(&self) -> String {
        URL_SAFE_NO_PAD.encode(self.sha1_fingerprint())
    }

    /// The validated DER bytes
    #[must_use]
    pub fn der_bytes(&self) -> &[u8] {
        &self.der
    }
}

impl fmt::Debug for Certificate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Certificate")
            .field("der_len", &self.der.len())
            .finish()
    }
}

/// Decode a hex-printed SHA-1 fingerprint into its 20 raw bytes
///
/// Accepts the colon-delimited form tooling prints (`35:99:91:...`), the same
/// with spaces, or 40 bare hex digits, in either case. The decode is explicit:
/// the hex text is never treated as the fingerprint itself.
///
/// # Errors
/// Returns [`CredentialError::Certificate`] when the text is not hex or does
/// not decode to exactly 20 bytes.
pub fn decode_hex_fingerprint(text: &str) -> Result<[u8; SHA1_FINGERPRINT_LEN]> {
    let cleaned: String = text
        .chars()
        .filter(|c| !matches!(c, ':' | ' ' | '\t' | '\n' | '\r'))
        .collect();

    let bytes = hex::decode(&cleaned).map_err(|e| CredentialError::Certificate {
        reason: format!("fingerprint is not valid hex: {e}"),
    })?;

    if bytes.len() != SHA1_FINGERPRINT_LEN {
        return Err(CredentialError::Certificate {
            reason: format!(
                "fingerprint must be {SHA1_FINGERPRINT_LEN} bytes, got {}",
                bytes.len()
            ),
        });
    }

    let mut fingerprint = [0u8; SHA1_FINGERPRINT_LEN];
    fingerprint.copy_from_slice(&bytes);
    Ok(fingerprint)
}

/// The `x5t` value for a hex-printed fingerprint
///
/// # Errors
/// Returns [`CredentialError::Certificate`] when the text is not a valid
/// 20-byte hex fingerprint.
pub fn x5t_from_hex_fingerprint(text: &str) -> Result<String> {
    Ok(URL_SAFE_NO_PAD.encode(decode_hex_fingerprint(text)?))
}

fn find_pem_start(input: &[u8]) -> Option<usize> {
    input
        .windows(PEM_CERT_TAG.len())
        .position(|window| window == PEM_CERT_TAG)
}
