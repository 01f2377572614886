//! Report history: list retrieval, delete confirmation and the success banner.
//!
//! Three independent pieces of state live here: the list view
//! (`Loading → Loaded | Error`), the delete dialog (closed or holding the
//! pending id) and the success banner (hidden or visible until a deadline).
//! Operations never do I/O; they return a [`Command`] for the event loop to run
//! and receive the outcome through the `on_*` methods.

use crate::api::{Report, ReportId};
use crate::app::Command;
use crate::session::SessionStore;
use std::time::{Duration, Instant};
use thiserror::Error;

pub const SUCCESS_BANNER_TTL: Duration = Duration::from_secs(3);
pub const DELETE_SUCCESS_MESSAGE: &str = "Report deleted successfully.";

/// Failures shown to the user. Messages are fixed; the underlying cause is
/// only logged.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryError {
    #[error("Failed to load your report history. Please try again.")]
    FetchFailure,
    #[error("Authorization failed. Please log in again.")]
    AuthorizationMissing,
    #[error("Could not delete the report. Please try again.")]
    DeleteFailure,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ListView {
    Loading,
    Loaded(Vec<Report>),
    Error(HistoryError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuccessBanner {
    pub message: String,
    pub expires_at: Instant,
}

#[derive(Debug, Clone)]
pub struct HistoryState {
    pub view: ListView,
    pub cursor: usize,
    /// Report staged for deletion; `Some` while the confirmation is open.
    pub pending_delete: Option<ReportId>,
    /// Delete request currently on the wire.
    pub deleting: Option<ReportId>,
    /// Delete-side failure shown over the list.
    pub notice: Option<HistoryError>,
    pub banner: Option<SuccessBanner>,
}

impl Default for HistoryState {
    fn default() -> Self {
        Self::new()
    }
}

impl HistoryState {
    pub fn new() -> Self {
        Self {
            view: ListView::Loading,
            cursor: 0,
            pending_delete: None,
            deleting: None,
            notice: None,
            banner: None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.view, ListView::Loading)
    }

    /// Reports currently on screen; empty unless loaded.
    pub fn reports(&self) -> &[Report] {
        match &self.view {
            ListView::Loaded(reports) => reports,
            ListView::Loading | ListView::Error(_) => &[],
        }
    }

    pub fn selected_report(&self) -> Option<&Report> {
        self.reports().get(self.cursor)
    }

    pub fn move_cursor_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_cursor_down(&mut self) {
        if self.cursor + 1 < self.reports().len() {
            self.cursor += 1;
        }
    }

    // --- List retrieval ---

    pub fn fetch_reports(&mut self) -> Command {
        self.view = ListView::Loading;
        Command::FetchReports
    }

    /// Replaces the list wholesale, in backend order.
    pub fn on_reports_loaded(&mut self, reports: Vec<Report>) {
        tracing::debug!(count = reports.len(), "report list loaded");
        self.cursor = self.cursor.min(reports.len().saturating_sub(1));
        self.view = ListView::Loaded(reports);
        self.notice = None;
    }

    pub fn on_reports_failed(&mut self, error: &str) {
        tracing::error!(error, "failed to fetch reports");
        self.view = ListView::Error(HistoryError::FetchFailure);
    }

    // --- Deletion ---

    pub fn is_confirm_open(&self) -> bool {
        self.pending_delete.is_some()
    }

    /// Stages `id` and opens the confirmation. Refused while another delete
    /// is still in flight.
    pub fn request_delete(&mut self, id: ReportId) -> bool {
        if let Some(in_flight) = &self.deleting {
            tracing::debug!(report_id = %id, %in_flight, "delete already in flight");
            return false;
        }
        self.notice = None;
        self.pending_delete = Some(id);
        true
    }

    pub fn request_delete_selected(&mut self) -> bool {
        match self.selected_report().map(|r| r.id.clone()) {
            Some(id) => self.request_delete(id),
            None => false,
        }
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    /// Closes the dialog in every case. Returns the delete command only when
    /// a report is pending and an access token is stored.
    pub fn confirm_delete(&mut self, store: &SessionStore) -> Option<Command> {
        let id = self.pending_delete.take()?;
        let Some(token) = store.access_token() else {
            tracing::warn!(report_id = %id, "delete attempted without an access token");
            self.notice = Some(HistoryError::AuthorizationMissing);
            return None;
        };
        self.deleting = Some(id.clone());
        Some(Command::DeleteReport {
            id,
            token: token.to_string(),
        })
    }

    /// Resynchronizes the list and shows the banner.
    pub fn on_delete_succeeded(&mut self, id: &ReportId, now: Instant) -> Command {
        tracing::info!(report_id = %id, "report deleted");
        self.clear_in_flight(id);
        self.show_banner(DELETE_SUCCESS_MESSAGE, now);
        self.fetch_reports()
    }

    /// The list is left as it was; nothing is retried.
    pub fn on_delete_failed(&mut self, id: &ReportId, error: &str) {
        tracing::error!(report_id = %id, error, "failed to delete report");
        self.clear_in_flight(id);
        self.notice = Some(HistoryError::DeleteFailure);
    }

    fn clear_in_flight(&mut self, id: &ReportId) {
        if self.deleting.as_ref() == Some(id) {
            self.deleting = None;
        }
    }

    // --- Banner ---

    /// Shows the banner for [`SUCCESS_BANNER_TTL`]. A banner already on screen
    /// is replaced along with its deadline.
    pub fn show_banner(&mut self, message: &str, now: Instant) {
        self.banner = Some(SuccessBanner {
            message: message.to_string(),
            expires_at: now + SUCCESS_BANNER_TTL,
        });
    }

    pub fn prune_banner(&mut self, now: Instant) {
        if self.banner.as_ref().is_some_and(|b| now >= b.expires_at) {
            self.banner = None;
        }
    }

    pub fn banner_message(&self) -> Option<&str> {
        self.banner.as_ref().map(|b| b.message.as_str())
    }

    // --- Errors ---

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    /// The message to show, if any: a delete-side notice first, then a
    /// failed list load.
    pub fn error(&self) -> Option<HistoryError> {
        self.notice.or(match self.view {
            ListView::Error(e) => Some(e),
            ListView::Loading | ListView::Loaded(_) => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::ACCESS_TOKEN_KEY;
    use chrono::{TimeZone, Utc};

    fn make_report(id: u64, status: &str) -> Report {
        Report {
            id: ReportId::from(id),
            status: status.to_string(),
            created_at: Utc.with_ymd_and_hms(2025, 1, 5, 12, 0, 0).unwrap(),
            ai_description: format!("Summary {id}\nDetails"),
        }
    }

    fn loaded(ids: &[u64]) -> HistoryState {
        let mut state = HistoryState::new();
        state.on_reports_loaded(ids.iter().map(|&id| make_report(id, "Normal")).collect());
        state
    }

    fn store_with_token() -> SessionStore {
        let mut store = SessionStore::in_memory();
        store.set_item(ACCESS_TOKEN_KEY, "tok").unwrap();
        store
    }

    #[test]
    fn starts_loading() {
        let state = HistoryState::new();
        assert!(state.is_loading());
        assert!(state.reports().is_empty());
    }

    #[test]
    fn fetch_sets_loading_and_returns_command() {
        let mut state = loaded(&[1]);
        assert_eq!(state.fetch_reports(), Command::FetchReports);
        assert!(state.is_loading());
    }

    #[test]
    fn load_replaces_list_wholesale() {
        let mut state = loaded(&[1, 2, 3]);
        state.on_reports_loaded(vec![make_report(9, "Normal")]);
        let ids: Vec<_> = state.reports().iter().map(|r| r.id.clone()).collect();
        assert_eq!(ids, vec![ReportId::from(9)]);
    }

    #[test]
    fn load_preserves_backend_order() {
        let state = loaded(&[3, 1, 2]);
        let ids: Vec<_> = state.reports().iter().map(|r| r.id.to_string()).collect();
        assert_eq!(ids, vec!["3", "1", "2"]);
    }

    #[test]
    fn load_clamps_cursor() {
        let mut state = loaded(&[1, 2, 3]);
        state.cursor = 2;
        state.on_reports_loaded(vec![make_report(1, "Normal")]);
        assert_eq!(state.cursor, 0);
    }

    #[test]
    fn load_empty_list_resets_cursor() {
        let mut state = loaded(&[1, 2]);
        state.cursor = 1;
        state.on_reports_loaded(vec![]);
        assert_eq!(state.cursor, 0);
        assert_eq!(state.view, ListView::Loaded(vec![]));
    }

    #[test]
    fn fetch_failure_sets_error_view() {
        let mut state = HistoryState::new();
        state.on_reports_failed("connection refused");
        assert_eq!(state.view, ListView::Error(HistoryError::FetchFailure));
        assert_eq!(state.error(), Some(HistoryError::FetchFailure));
        assert!(state.reports().is_empty());
    }

    #[test]
    fn fetch_failure_message_is_fixed() {
        assert_eq!(
            HistoryError::FetchFailure.to_string(),
            "Failed to load your report history. Please try again."
        );
    }

    #[test]
    fn cursor_moves_within_bounds() {
        let mut state = loaded(&[1, 2]);
        state.move_cursor_up();
        assert_eq!(state.cursor, 0);
        state.move_cursor_down();
        state.move_cursor_down();
        assert_eq!(state.cursor, 1);
    }

    #[test]
    fn cursor_down_on_empty_stays() {
        let mut state = loaded(&[]);
        state.move_cursor_down();
        assert_eq!(state.cursor, 0);
    }

    #[test]
    fn request_delete_opens_dialog_without_command() {
        let mut state = loaded(&[1]);
        assert!(state.request_delete(ReportId::from(1)));
        assert!(state.is_confirm_open());
        assert_eq!(state.pending_delete, Some(ReportId::from(1)));
    }

    #[test]
    fn request_delete_selected_uses_cursor() {
        let mut state = loaded(&[1, 2]);
        state.move_cursor_down();
        assert!(state.request_delete_selected());
        assert_eq!(state.pending_delete, Some(ReportId::from(2)));
    }

    #[test]
    fn request_delete_selected_on_empty_list_is_noop() {
        let mut state = loaded(&[]);
        assert!(!state.request_delete_selected());
        assert!(!state.is_confirm_open());
    }

    #[test]
    fn cancel_clears_pending() {
        let mut state = loaded(&[1]);
        state.request_delete(ReportId::from(1));
        state.cancel_delete();
        assert!(!state.is_confirm_open());
        assert_eq!(state.reports().len(), 1);
    }

    #[test]
    fn confirm_without_token_closes_dialog_and_sets_notice() {
        let mut state = loaded(&[1]);
        state.request_delete(ReportId::from(1));

        let cmd = state.confirm_delete(&SessionStore::in_memory());

        assert_eq!(cmd, None);
        assert!(!state.is_confirm_open());
        assert_eq!(state.notice, Some(HistoryError::AuthorizationMissing));
        assert_eq!(state.reports().len(), 1);
        assert_eq!(state.deleting, None);
    }

    #[test]
    fn confirm_with_token_returns_delete_command() {
        let mut state = loaded(&[1]);
        state.request_delete(ReportId::from(1));

        let cmd = state.confirm_delete(&store_with_token());

        assert_eq!(
            cmd,
            Some(Command::DeleteReport {
                id: ReportId::from(1),
                token: "tok".to_string(),
            })
        );
        assert!(!state.is_confirm_open());
        assert_eq!(state.deleting, Some(ReportId::from(1)));
    }

    #[test]
    fn confirm_without_pending_is_noop() {
        let mut state = loaded(&[1]);
        assert_eq!(state.confirm_delete(&store_with_token()), None);
        assert_eq!(state.notice, None);
    }

    #[test]
    fn request_refused_while_delete_in_flight() {
        let mut state = loaded(&[1, 2]);
        state.request_delete(ReportId::from(1));
        state.confirm_delete(&store_with_token());

        assert!(!state.request_delete(ReportId::from(2)));
        assert!(!state.is_confirm_open());
    }

    #[test]
    fn delete_success_shows_banner_and_refetches() {
        let mut state = loaded(&[1]);
        state.request_delete(ReportId::from(1));
        state.confirm_delete(&store_with_token());
        let now = Instant::now();

        let cmd = state.on_delete_succeeded(&ReportId::from(1), now);

        assert_eq!(cmd, Command::FetchReports);
        assert!(state.is_loading());
        assert_eq!(state.banner_message(), Some(DELETE_SUCCESS_MESSAGE));
        assert_eq!(state.deleting, None);
    }

    #[test]
    fn delete_failure_keeps_list_and_sets_notice() {
        let mut state = loaded(&[1]);
        state.request_delete(ReportId::from(1));
        state.confirm_delete(&store_with_token());

        state.on_delete_failed(&ReportId::from(1), "500 Internal Server Error");

        assert_eq!(state.notice, Some(HistoryError::DeleteFailure));
        assert_eq!(state.reports().len(), 1);
        assert!(!state.is_confirm_open());
        assert_eq!(state.banner, None);
        assert_eq!(state.deleting, None);
    }

    #[test]
    fn banner_hidden_after_ttl() {
        let mut state = loaded(&[]);
        let now = Instant::now();
        state.show_banner("done", now);

        state.prune_banner(now + Duration::from_millis(2999));
        assert!(state.banner.is_some());

        state.prune_banner(now + SUCCESS_BANNER_TTL);
        assert!(state.banner.is_none());
    }

    #[test]
    fn replacing_banner_rearms_deadline() {
        let mut state = loaded(&[]);
        let first = Instant::now();
        state.show_banner("first", first);
        let second = first + Duration::from_secs(2);
        state.show_banner("second", second);

        // The first banner's deadline passes without hiding the second.
        state.prune_banner(first + SUCCESS_BANNER_TTL);
        assert_eq!(state.banner_message(), Some("second"));

        state.prune_banner(second + SUCCESS_BANNER_TTL);
        assert_eq!(state.banner_message(), None);
    }

    #[test]
    fn successful_load_clears_notice() {
        let mut state = loaded(&[1]);
        state.notice = Some(HistoryError::DeleteFailure);
        state.on_reports_loaded(vec![]);
        assert_eq!(state.notice, None);
    }

    #[test]
    fn notice_takes_precedence_in_error() {
        let mut state = HistoryState::new();
        state.on_reports_failed("x");
        state.notice = Some(HistoryError::AuthorizationMissing);
        assert_eq!(state.error(), Some(HistoryError::AuthorizationMissing));
        state.dismiss_notice();
        assert_eq!(state.error(), Some(HistoryError::FetchFailure));
    }
}
