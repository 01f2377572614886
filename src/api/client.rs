//! # API Client
//!
//! HTTP client for the report-storage backend.

use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use reqwest::{Client, RequestBuilder, Response};
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;

use super::error::{ApiError, ApiResult};
use super::types::{parse_reports, Report, ReportId};
use crate::traits::ReportBackend;

/// HTTP client for the report API.
///
/// Cheap to clone; clones share the same connection pool and the same
/// default `Authorization` header, so clearing it on logout affects every
/// holder.
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    http: Client,
    default_authorization: Arc<RwLock<Option<String>>>,
}

impl ApiClient {
    /// Creates a client for `base_url` (e.g. `http://127.0.0.1:8000`).
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Network`] if the TLS backend cannot be initialized.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> ApiResult<Self> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            base_url,
            http,
            default_authorization: Arc::new(RwLock::new(None)),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// URL of the report collection. The trailing slash is part of the route.
    pub fn reports_url(&self) -> String {
        format!("{}/api/reports/", self.base_url)
    }

    pub fn report_url(&self, id: &ReportId) -> String {
        format!("{}/api/reports/{}/", self.base_url, id)
    }

    /// Sets the header attached to every request that does not carry its own.
    pub fn set_default_bearer(&self, token: &str) {
        *self
            .default_authorization
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Some(format!("Bearer {token}"));
    }

    pub fn clear_default_authorization(&self) {
        *self
            .default_authorization
            .write()
            .unwrap_or_else(PoisonError::into_inner) = None;
    }

    pub fn default_authorization(&self) -> Option<String> {
        self.default_authorization
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn with_default_authorization(&self, req: RequestBuilder) -> RequestBuilder {
        match self.default_authorization() {
            Some(value) => req.header(AUTHORIZATION, value),
            None => req,
        }
    }

    /// Lists every report visible to the current session, in backend order.
    ///
    /// No explicit credential is sent; only the default header, if set.
    ///
    /// # Errors
    ///
    /// * [`ApiError::Network`] - Network request failed
    /// * [`ApiError::Server`] - Non-success status
    /// * [`ApiError::InvalidResponse`] - Body is not a report array
    pub async fn list_reports(&self) -> ApiResult<Vec<Report>> {
        let started = std::time::Instant::now();
        let res = self
            .with_default_authorization(self.http.get(self.reports_url()))
            .send()
            .await?;
        let body = success_body(res).await?;
        let reports =
            parse_reports(&body).map_err(|e| ApiError::InvalidResponse(e.to_string()))?;
        tracing::debug!(
            count = reports.len(),
            elapsed_ms = started.elapsed().as_millis(),
            "listed reports"
        );
        Ok(reports)
    }

    /// Deletes one report with `Authorization: Bearer <token>`.
    ///
    /// Any 2xx status counts as success; the body is ignored.
    ///
    /// # Errors
    ///
    /// * [`ApiError::Network`] - Network request failed
    /// * [`ApiError::Server`] - Non-success status (e.g. 401, 404)
    pub async fn delete_report(&self, id: &ReportId, token: &str) -> ApiResult<()> {
        let res = self
            .http
            .delete(self.report_url(id))
            .bearer_auth(token)
            .send()
            .await?;
        success_body(res).await?;
        tracing::info!(report_id = %id, "deleted report");
        Ok(())
    }
}

async fn success_body(res: Response) -> ApiResult<String> {
    let status = res.status();
    if !status.is_success() {
        return Err(ApiError::Server {
            status: status.as_u16(),
            message: res.text().await.unwrap_or_default(),
        });
    }
    Ok(res.text().await?)
}

#[async_trait]
impl ReportBackend for ApiClient {
    async fn list_reports(&self) -> ApiResult<Vec<Report>> {
        ApiClient::list_reports(self).await
    }

    async fn delete_report(&self, id: &ReportId, token: &str) -> ApiResult<()> {
        ApiClient::delete_report(self, id, token).await
    }
}
