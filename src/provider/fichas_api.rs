//! Client for the Fichas Financeiras payroll API.
//!
//! Every lookup authenticates first (`POST /login`) and then queries the
//! registration endpoint with the returned token in the `X-Auth-Token` header.

use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::FichasApiConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::PayrollResponse;

use super::PayrollDataProvider;

const AUTH_TOKEN_HEADER: &str = "X-Auth-Token";

#[derive(Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
struct LoginResponse {
    token: String,
}

#[derive(Serialize)]
struct RegistrationLookup<'a> {
    matricula: &'a str,
}

/// HTTP client for the payroll API.
#[derive(Clone)]
pub struct FichasApiClient {
    client: Client,
    base_url: String,
    email: String,
    password: String,
}

impl std::fmt::Debug for FichasApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FichasApiClient")
            .field("base_url", &self.base_url)
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

impl FichasApiClient {
    /// Builds a client from configuration.
    ///
    /// The base URL is `https://{host}` unless the host already carries a scheme.
    pub fn new(config: &FichasApiConfig) -> EngineResult<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .build()
            .map_err(|e| EngineError::provider(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url(&config.host),
            email: config.email.clone(),
            password: config.password.clone(),
        })
    }

    /// The base URL requests are sent to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Obtains a fresh authentication token.
    pub async fn authenticate(&self) -> EngineResult<String> {
        let url = format!("{}/login", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(&LoginRequest {
                email: &self.email,
                password: &self.password,
            })
            .send()
            .await
            .map_err(|e| EngineError::provider(format!("authentication request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = %status, "Payroll API authentication rejected");
            return Err(EngineError::provider(format!(
                "authentication failed (status {})",
                status
            )));
        }

        let body: LoginResponse = response
            .json()
            .await
            .map_err(|e| EngineError::provider(format!("invalid login response: {}", e)))?;
        debug!("Payroll API token acquired");
        Ok(body.token)
    }
}

impl PayrollDataProvider for FichasApiClient {
    async fn fetch_professor_record(
        &self,
        registration_id: &str,
    ) -> EngineResult<Option<PayrollResponse>> {
        let token = self.authenticate().await?;
        let url = format!("{}/servidor/busca/matricula", self.base_url);

        let response = self
            .client
            .post(&url)
            .header(AUTH_TOKEN_HEADER, token)
            .json(&RegistrationLookup {
                matricula: registration_id,
            })
            .send()
            .await
            .map_err(|e| EngineError::provider(format!("registration lookup failed: {}", e)))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            info!(registration_id = %registration_id, "Registration not found by payroll API");
            return Ok(None);
        }
        if !status.is_success() {
            return Err(EngineError::provider(format!(
                "registration lookup failed (status {})",
                status
            )));
        }

        let payload: PayrollResponse = response
            .json()
            .await
            .map_err(|e| EngineError::provider(format!("invalid payroll response: {}", e)))?;
        Ok(Some(payload))
    }
}

fn base_url(host: &str) -> String {
    let host = host.trim().trim_end_matches('/');
    if host.starts_with("http://") || host.starts_with("https://") {
        host.to_string()
    } else {
        format!("https://{}", host)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(host: &str) -> FichasApiConfig {
        FichasApiConfig {
            host: host.to_string(),
            email: "a@b.c".to_string(),
            password: "secret".to_string(),
            timeout_secs: 2,
            accept_invalid_certs: false,
        }
    }

    #[test]
    fn test_base_url_adds_https() {
        assert_eq!(base_url("fichas.example.gov.br"), "https://fichas.example.gov.br");
    }

    #[test]
    fn test_base_url_keeps_scheme_and_strips_slash() {
        assert_eq!(base_url("http://127.0.0.1:8080/"), "http://127.0.0.1:8080");
    }

    #[test]
    fn test_debug_hides_password() {
        let client = FichasApiClient::new(&config("api.local")).unwrap();
        let rendered = format!("{:?}", client);
        assert!(rendered.contains("https://api.local"));
        assert!(!rendered.contains("secret"));
    }

    #[tokio::test]
    async fn test_unreachable_host_is_provider_error() {
        // Port 1 on loopback refuses connections.
        let client = FichasApiClient::new(&config("http://127.0.0.1:1")).unwrap();
        match client.fetch_professor_record("00292553-03").await {
            Err(EngineError::Provider { message }) => {
                assert!(message.contains("authentication request failed"));
            }
            other => panic!("Expected provider error, got {:?}", other),
        }
    }
}
