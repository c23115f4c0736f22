//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the service
//! configuration from a YAML file.

use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::error::{EngineError, EngineResult};

use super::types::{ExportConfig, FichasApiConfig, ServerConfig, ServiceConfig};

/// Loads and provides access to the service configuration.
///
/// # File Structure
///
/// ```text
/// fichas_api:
///   host: fichas.example.gov.br
///   email: integracao@example.gov.br
///   password: secret
///   timeout_secs: 10
///   accept_invalid_certs: false
/// server:
///   bind_address: 0.0.0.0:3000
/// export:
///   directory: ./exports
/// ```
///
/// # Example
///
/// ```no_run
/// use vencimento_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/vencimento.yaml").unwrap();
/// println!("Payroll API host: {}", loader.fichas_api().host);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: ServiceConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified YAML file.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - The file is missing (`ConfigNotFound`)
    /// - The file contains invalid YAML or misses a required field (`ConfigParseError`)
    /// - A value is unusable, such as an empty host or a zero timeout (`InvalidConfig`)
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        Self::from_yaml_str(&content, &path_str)
    }

    /// Parses configuration from YAML text. `origin` is used in error messages.
    pub fn from_yaml_str(content: &str, origin: &str) -> EngineResult<Self> {
        let config: ServiceConfig =
            serde_yaml::from_str(content).map_err(|e| EngineError::ConfigParseError {
                path: origin.to_string(),
                message: e.to_string(),
            })?;

        Self::validate(&config)?;
        Ok(Self { config })
    }

    fn validate(config: &ServiceConfig) -> EngineResult<()> {
        if config.fichas_api.host.trim().is_empty() {
            return Err(EngineError::InvalidConfig {
                field: "fichas_api.host".to_string(),
                message: "must not be empty".to_string(),
            });
        }
        if config.fichas_api.timeout_secs == 0 {
            return Err(EngineError::InvalidConfig {
                field: "fichas_api.timeout_secs".to_string(),
                message: "must be greater than zero".to_string(),
            });
        }
        Ok(())
    }

    /// Returns the underlying configuration.
    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// Returns the payroll API settings.
    pub fn fichas_api(&self) -> &FichasApiConfig {
        &self.config.fichas_api
    }

    /// Returns the request timeout for the payroll API.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.config.fichas_api.timeout_secs)
    }

    /// Returns the HTTP server settings.
    pub fn server(&self) -> &ServerConfig {
        &self.config.server
    }

    /// Returns the audit export settings.
    pub fn export(&self) -> &ExportConfig {
        &self.config.export
    }
}
