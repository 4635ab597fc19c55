//! Common test utilities for integration tests
//!
//! This module provides shared infrastructure for exercising assertion
//! signing and token exchange against a mock token endpoint.

#![allow(dead_code)]

use std::time::Duration;

use serde_json::json;
use wiremock::{
    matchers::{method, path},
    Mock, MockServer, ResponseTemplate,
};

use certgrant::{Clock, JtiSource};

/// Tenant the mock endpoint is mounted under
pub const MOCK_TENANT: &str = "tenant-xyz";

/// Mock v2.0 token endpoint
pub struct MockTokenServer {
    pub server: MockServer,
    pub token_endpoint: String,
}

impl MockTokenServer {
    /// Start a mock server exposing the v2.0 token path for [`MOCK_TENANT`]
    pub async fn start() -> Self {
        let server = MockServer::start().await;
        let token_endpoint = format!("{}{}", server.uri(), Self::token_path());

        Self {
            server,
            token_endpoint,
        }
    }

    fn token_path() -> String {
        format!("/{MOCK_TENANT}/oauth2/v2.0/token")
    }

    /// Mock a successful token response
    pub async fn mock_token_success(&self, access_token: &str) {
        Mock::given(method("POST"))
            .and(path(Self::token_path()))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "token_type": "Bearer",
                "expires_in": 3599,
                "ext_expires_in": 3599,
                "access_token": access_token,
            })))
            .mount(&self.server)
            .await;
    }

    /// Mock a provider rejection in the documented error body shape
    pub async fn mock_token_error(&self, status: u16, error: &str, description: &str) {
        Mock::given(method("POST"))
            .and(path(Self::token_path()))
            .respond_with(ResponseTemplate::new(status).set_body_json(json!({
                "error": error,
                "error_description": description,
                "error_codes": [700016],
                "timestamp": "2024-01-01 00:00:00Z",
                "trace_id": "0000aaaa-11bb-cc22-dd33-eeee4444ffff",
                "correlation_id": "aaaa0000-bb11-2222-33cc-444444dddddd",
            })))
            .mount(&self.server)
            .await;
    }

    /// Mock a success response that only arrives after `delay`
    pub async fn mock_token_delayed(&self, access_token: &str, delay: Duration) {
        Mock::given(method("POST"))
            .and(path(Self::token_path()))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_delay(delay)
                    .set_body_json(json!({
                        "token_type": "Bearer",
                        "expires_in": 3599,
                        "access_token": access_token,
                    })),
            )
            .mount(&self.server)
            .await;
    }

    /// Mock a 200 whose body is not the token JSON shape
    pub async fn mock_token_malformed(&self) {
        Mock::given(method("POST"))
            .and(path(Self::token_path()))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>proxy login</html>"))
            .mount(&self.server)
            .await;
    }

    /// Mock a rejection with no body at all
    pub async fn mock_token_empty_error(&self, status: u16) {
        Mock::given(method("POST"))
            .and(path(Self::token_path()))
            .respond_with(ResponseTemplate::new(status))
            .mount(&self.server)
            .await;
    }

    /// Mock a redirect away from the token endpoint
    pub async fn mock_token_redirect(&self, location: &str) {
        Mock::given(method("POST"))
            .and(path(Self::token_path()))
            .respond_with(ResponseTemplate::new(302).insert_header("Location", location))
            .mount(&self.server)
            .await;
    }

    /// Form fields of the only request the server has seen
    pub async fn single_request_form(&self) -> Vec<(String, String)> {
        let requests = self
            .server
            .received_requests()
            .await
            .expect("request recording disabled");
        assert_eq!(requests.len(), 1, "expected exactly one token request");

        url::form_urlencoded::parse(&requests[0].body)
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect()
    }
}

/// Clock pinned to a fixed instant
#[derive(Debug)]
pub struct FixedClock(pub i64);

impl Clock for FixedClock {
    fn now_unix(&self) -> i64 {
        self.0
    }
}

/// `jti` source that always yields the same id
#[derive(Debug)]
pub struct FixedJti(pub &'static str);

impl JtiSource for FixedJti {
    fn next_jti(&self) -> String {
        self.0.to_string()
    }
}

/// Generate a test RSA key pair (PEM format) for signing tests
pub fn generate_test_rsa_keypair() -> (Vec<u8>, Vec<u8>) {
    use rsa::pkcs8::{EncodePrivateKey, EncodePublicKey, LineEnding};
    use rsa::RsaPrivateKey;

    let mut rng = rand::thread_rng();
    let bits = 2048;
    let private_key = RsaPrivateKey::new(&mut rng, bits).expect("Failed to generate RSA key");
    let public_key = private_key.to_public_key();

    let private_pem = private_key
        .to_pkcs8_pem(LineEnding::LF)
        .expect("Failed to encode private key")
        .as_bytes()
        .to_vec();

    let public_pem = public_key
        .to_public_key_pem(LineEnding::LF)
        .expect("Failed to encode public key")
        .as_bytes()
        .to_vec();

    (private_pem, public_pem)
}
