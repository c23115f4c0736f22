//! Application state for the Vencimento Engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::service::VencimentoService;

/// Shared application state.
///
/// Holds the report service and the optional audit export directory.
pub struct AppState<P> {
    service: Arc<VencimentoService<P>>,
    export_dir: Option<PathBuf>,
}

// Manual impl: `P` itself need not be `Clone` behind the `Arc`.
impl<P> Clone for AppState<P> {
    fn clone(&self) -> Self {
        Self {
            service: Arc::clone(&self.service),
            export_dir: self.export_dir.clone(),
        }
    }
}

impl<P> AppState<P> {
    /// Creates a new application state. Exports are disabled when
    /// `export_dir` is `None`.
    pub fn new(service: VencimentoService<P>, export_dir: Option<PathBuf>) -> Self {
        Self {
            service: Arc::new(service),
            export_dir,
        }
    }

    /// Returns the report service.
    pub fn service(&self) -> &VencimentoService<P> {
        &self.service
    }

    /// Returns the export directory, if exports are enabled.
    pub fn export_dir(&self) -> Option<&Path> {
        self.export_dir.as_deref()
    }
}
