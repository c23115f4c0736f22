//! Vencimento Engine for public-school payroll records
//!
//! This crate fetches a professor's financial history from the payroll API,
//! extracts the base-salary (vencimento) payments inside a requested period,
//! and aggregates them into chronological monthly reports.

#![warn(missing_docs)]

pub mod api;
pub mod config;
pub mod error;
pub mod export;
pub mod models;
pub mod pipeline;
pub mod provider;
pub mod service;
