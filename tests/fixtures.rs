#![allow(dead_code)]

use arogya::api::{ApiClient, ApiError, ApiResult, Report, ReportId};
use arogya::app::{AppConfig, AppState, Command};
use arogya::dispatch::run_command;
use arogya::events::AppEvent;
use arogya::session::{SessionStore, ACCESS_TOKEN_KEY, EMAIL_KEY, REFRESH_TOKEN_KEY, USERNAME_KEY};
use arogya::traits::ReportBackend;
use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

pub const TOKEN: &str = "test-access-token";

pub fn report(id: u64) -> Report {
    report_with_status(id, "Normal")
}

pub fn report_with_status(id: u64, status: &str) -> Report {
    Report {
        id: ReportId::from(id),
        status: status.to_string(),
        created_at: Utc.with_ymd_and_hms(2025, 1, 5, 9, 30, 0).unwrap(),
        ai_description: format!("Findings for report {id}.\nDetails follow."),
    }
}

pub fn reports(ids: &[u64]) -> Vec<Report> {
    ids.iter().map(|&id| report(id)).collect()
}

pub fn ids(state: &AppState) -> Vec<String> {
    state
        .history
        .reports()
        .iter()
        .map(|r| r.id.to_string())
        .collect()
}

pub fn signed_in_store() -> SessionStore {
    let mut store = SessionStore::in_memory();
    store.set_item(ACCESS_TOKEN_KEY, TOKEN).unwrap();
    store.set_item(REFRESH_TOKEN_KEY, "test-refresh-token").unwrap();
    store.set_item(USERNAME_KEY, "asha").unwrap();
    store.set_item(EMAIL_KEY, "asha@example.com").unwrap();
    store
}

pub fn config() -> AppConfig {
    AppConfig {
        web_url: "http://localhost:5173".to_string(),
        version_string: "arogya test".to_string(),
    }
}

pub fn offline_client() -> ApiClient {
    ApiClient::new("http://127.0.0.1:9", Duration::from_secs(1)).unwrap()
}

pub fn press(code: KeyCode) -> AppEvent {
    AppEvent::Key(KeyEvent {
        code,
        modifiers: KeyModifiers::NONE,
        kind: KeyEventKind::Press,
        state: KeyEventState::NONE,
    })
}

/// In-memory backend that records every call.
#[derive(Default)]
pub struct ScriptedBackend {
    pub reports: Mutex<Vec<Report>>,
    pub fail_list: AtomicBool,
    pub fail_delete: AtomicBool,
    pub list_calls: AtomicUsize,
    pub delete_calls: Mutex<Vec<(String, String)>>,
}

impl ScriptedBackend {
    pub fn with_reports(reports: Vec<Report>) -> Self {
        Self {
            reports: Mutex::new(reports),
            ..Default::default()
        }
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn delete_calls(&self) -> Vec<(String, String)> {
        self.delete_calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ReportBackend for ScriptedBackend {
    async fn list_reports(&self) -> ApiResult<Vec<Report>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_list.load(Ordering::SeqCst) {
            return Err(ApiError::Server {
                status: 500,
                message: "internal error".to_string(),
            });
        }
        Ok(self.reports.lock().unwrap().clone())
    }

    async fn delete_report(&self, id: &ReportId, token: &str) -> ApiResult<()> {
        self.delete_calls
            .lock()
            .unwrap()
            .push((id.to_string(), token.to_string()));
        if self.fail_delete.load(Ordering::SeqCst) {
            return Err(ApiError::Server {
                status: 404,
                message: "not found".to_string(),
            });
        }
        self.reports.lock().unwrap().retain(|r| &r.id != id);
        Ok(())
    }
}

/// Runs `cmd` and every follow-up command it triggers, feeding each outcome
/// back into `state` the way the event loop does.
pub async fn settle(
    state: &mut AppState,
    backend: &dyn ReportBackend,
    store: &mut SessionStore,
    client: &ApiClient,
    cmd: Option<Command>,
    now: Instant,
) {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut next = cmd;
    while let Some(cmd) = next.take() {
        assert!(
            !matches!(cmd, Command::OpenUrl(_)),
            "tests must not open a browser"
        );
        run_command(backend, cmd, &tx).await;
        let event = rx.recv().await.expect("command produced no event");
        next = state.handle_event(event, store, client, now);
    }
}

/// Feeds a key press and settles whatever it triggers.
pub async fn key(
    state: &mut AppState,
    backend: &dyn ReportBackend,
    store: &mut SessionStore,
    client: &ApiClient,
    code: KeyCode,
    now: Instant,
) {
    let cmd = state.handle_event(press(code), store, client, now);
    settle(state, backend, store, client, cmd, now).await;
}

/// A mounted, loaded history screen backed by `backend`.
pub async fn mounted(
    backend: &dyn ReportBackend,
    store: &mut SessionStore,
    client: &ApiClient,
) -> AppState {
    let mut state = AppState::new(config(), store);
    let cmd = state.mount();
    settle(&mut state, backend, store, client, Some(cmd), Instant::now()).await;
    state
}
