//! Payroll data providers.
//!
//! A provider turns a registration id into a [`PayrollResponse`]. It owns
//! authentication, transport and decoding; the pipeline never sees
//! credentials or performs network I/O.

mod fichas_api;
mod static_provider;

use std::future::Future;

use crate::error::EngineResult;
use crate::models::PayrollResponse;

pub use fichas_api::FichasApiClient;
pub use static_provider::StaticPayrollProvider;

/// Source of professor payroll records.
///
/// Implementations must be shareable across request handlers, hence the
/// `Send + Sync` bound and the `Send` future.
pub trait PayrollDataProvider: Send + Sync {
    /// Fetches the payroll record of a registration id.
    ///
    /// Returns `Ok(None)` when the provider has no record for the id. Transport
    /// and authentication failures are reported as [`EngineError::Provider`].
    ///
    /// [`EngineError::Provider`]: crate::error::EngineError::Provider
    fn fetch_professor_record(
        &self,
        registration_id: &str,
    ) -> impl Future<Output = EngineResult<Option<PayrollResponse>>> + Send;
}
