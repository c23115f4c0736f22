//! In-memory payroll provider.

use std::collections::HashMap;

use crate::error::EngineResult;
use crate::models::PayrollResponse;

use super::PayrollDataProvider;

/// A provider backed by a fixed map of registration id to response.
///
/// Useful for tests, benchmarks and replaying previously captured payloads.
///
/// # Example
///
/// ```
/// use vencimento_engine::models::PayrollResponse;
/// use vencimento_engine::provider::StaticPayrollProvider;
///
/// let provider = StaticPayrollProvider::new()
///     .with_record("00292553-03", PayrollResponse::default());
/// assert_eq!(provider.len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct StaticPayrollProvider {
    records: HashMap<String, PayrollResponse>,
}

impl StaticPayrollProvider {
    /// Creates an empty provider.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a record, replacing any previous one for the same id.
    pub fn with_record(mut self, registration_id: impl Into<String>, response: PayrollResponse) -> Self {
        self.records.insert(registration_id.into(), response);
        self
    }

    /// Parses a captured JSON payload and adds it.
    pub fn with_json(
        self,
        registration_id: impl Into<String>,
        json: &str,
    ) -> Result<Self, serde_json::Error> {
        let response: PayrollResponse = serde_json::from_str(json)?;
        Ok(self.with_record(registration_id, response))
    }

    /// Number of registered records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the provider holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl PayrollDataProvider for StaticPayrollProvider {
    async fn fetch_professor_record(
        &self,
        registration_id: &str,
    ) -> EngineResult<Option<PayrollResponse>> {
        Ok(self.records.get(registration_id).cloned())
    }
}
