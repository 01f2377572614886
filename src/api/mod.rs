//! # Report API
//!
//! HTTP access to the report-storage backend.

pub mod client;
pub mod error;
pub mod types;

pub use client::ApiClient;
pub use error::{ApiError, ApiResult};
pub use types::{display_status, parse_reports, Report, ReportId, HIGH_RISK_STATUS, URGENT_LABEL};
