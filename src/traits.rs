use crate::api::{ApiResult, Report, ReportId};
use async_trait::async_trait;

/// Remote report storage as seen by the history screen.
#[async_trait]
pub trait ReportBackend: Send + Sync {
    async fn list_reports(&self) -> ApiResult<Vec<Report>>;
    async fn delete_report(&self, id: &ReportId, token: &str) -> ApiResult<()>;
}
