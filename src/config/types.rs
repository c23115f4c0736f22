//! Configuration types for the Vencimento Engine.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from the YAML configuration file.

use std::path::PathBuf;

use serde::Deserialize;

fn default_timeout_secs() -> u64 {
    10
}

fn default_bind_address() -> String {
    "0.0.0.0:3000".to_string()
}

/// Connection settings for the Fichas payroll API.
#[derive(Debug, Clone, Deserialize)]
pub struct FichasApiConfig {
    /// Host name of the API, without scheme (e.g. `fichas.example.gov.br`).
    pub host: String,
    /// Login e-mail used to obtain a token.
    pub email: String,
    /// Login password used to obtain a token.
    pub password: String,
    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Accept self-signed certificates (sandbox environments only).
    #[serde(default)]
    pub accept_invalid_certs: bool,
}

/// HTTP server settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Socket address the API listens on.
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
        }
    }
}

/// Audit export settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExportConfig {
    /// Directory the JSON audit exports are written to. No export when absent.
    #[serde(default)]
    pub directory: Option<PathBuf>,
}

/// The complete service configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceConfig {
    /// Payroll API connection.
    pub fichas_api: FichasApiConfig,
    /// HTTP server.
    #[serde(default)]
    pub server: ServerConfig,
    /// Audit export.
    #[serde(default)]
    pub export: ExportConfig,
}
