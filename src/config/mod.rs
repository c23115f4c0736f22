//! Configuration loading and management for the Vencimento Engine.
//!
//! This module loads the service configuration from a YAML file: payroll API
//! credentials, HTTP server settings and the audit export directory.
//!
//! # Example
//!
//! ```no_run
//! use vencimento_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/vencimento.yaml").unwrap();
//! println!("Listening on {}", config.server().bind_address);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{ExportConfig, FichasApiConfig, ServerConfig, ServiceConfig};
