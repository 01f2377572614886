//! Runs [`Command`]s produced by the state machine and reports back as events.

use crate::app::Command;
use crate::browser;
use crate::events::AppEvent;
use crate::traits::ReportBackend;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedSender;

/// Spawns `fut` and turns a panic inside it into an [`AppEvent::Error`].
pub fn spawn_monitored(
    tx: UnboundedSender<AppEvent>,
    label: &'static str,
    fut: impl Future<Output = ()> + Send + 'static,
) {
    tokio::spawn(async move {
        let handle = tokio::spawn(fut);
        if let Err(join_err) = handle.await {
            let msg = if join_err.is_panic() {
                match join_err.into_panic().downcast::<String>() {
                    Ok(s) => *s,
                    Err(payload) => match payload.downcast::<&str>() {
                        Ok(s) => s.to_string(),
                        Err(_) => "unknown panic".to_string(),
                    },
                }
            } else {
                "task cancelled".to_string()
            };
            tracing::error!("{label} panicked: {msg}");
            if tx
                .send(AppEvent::Error(format!("{label} crashed: {msg}")))
                .is_err()
            {
                tracing::warn!("{label}: channel closed while reporting panic");
            }
        }
    });
}

/// Executes one command to completion and sends its outcome on `tx`.
pub async fn run_command(
    backend: &dyn ReportBackend,
    cmd: Command,
    tx: &UnboundedSender<AppEvent>,
) {
    let event = match cmd {
        Command::FetchReports => match backend.list_reports().await {
            Ok(reports) => AppEvent::ReportsLoaded(reports),
            Err(e) => AppEvent::ReportsFailed(e.to_string()),
        },
        Command::DeleteReport { id, token } => match backend.delete_report(&id, &token).await {
            Ok(()) => AppEvent::DeleteSucceeded(id),
            Err(e) => AppEvent::DeleteFailed {
                id,
                error: e.to_string(),
            },
        },
        Command::OpenUrl(url) => match browser::open_in_browser(&url) {
            Ok(()) => {
                tracing::debug!(%url, "opened in browser");
                return;
            }
            Err(e) => AppEvent::Error(format!("{e}")),
        },
    };
    if tx.send(event).is_err() {
        tracing::warn!("event channel closed before command result was delivered");
    }
}

pub struct Dispatcher {
    backend: Arc<dyn ReportBackend>,
    tx: UnboundedSender<AppEvent>,
}

impl Dispatcher {
    pub fn new(backend: Arc<dyn ReportBackend>, tx: UnboundedSender<AppEvent>) -> Self {
        Self { backend, tx }
    }

    pub fn dispatch(&self, cmd: Command) {
        let label = match &cmd {
            Command::FetchReports => "fetch_reports",
            Command::DeleteReport { .. } => "delete_report",
            Command::OpenUrl(_) => "open_url",
        };
        tracing::debug!(label, "dispatching command");
        let backend = self.backend.clone();
        let tx = self.tx.clone();
        spawn_monitored(self.tx.clone(), label, async move {
            run_command(backend.as_ref(), cmd, &tx).await;
        });
    }
}
