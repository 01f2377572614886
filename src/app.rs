use crate::api::{ApiClient, ReportId};
use crate::events::AppEvent;
use crate::history::HistoryState;
use crate::input::{self, Action, InputContext, OverlayMode};
use crate::nav::{MenuItem, NavState};
use crate::session::SessionStore;
use crate::tui::navbar;
use ratatui::layout::Rect;
use std::time::{Duration, Instant};

// UI constants
pub const TICK_RATE_MS: u64 = 100;
pub const SPINNER_FRAME_COUNT: usize = 10;
pub const NARROW_WIDTH_THRESHOLD: u16 = 60;
pub const ERROR_TTL_SECS: u64 = 10;

/// I/O requested by a state transition, executed by the event loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    FetchReports,
    DeleteReport { id: ReportId, token: String },
    OpenUrl(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    History,
    Login,
}

/// Immutable configuration set at startup.
pub struct AppConfig {
    pub web_url: String,
    pub version_string: String,
}

pub struct AppState {
    pub config: AppConfig,
    pub route: Route,

    // Controllers
    pub nav: NavState,
    pub history: HistoryState,

    // Transient UI
    pub tutorial_open: bool,
    pub viewport: Rect,
    pub error: Option<(String, Instant)>,
    pub spinner_frame: usize,
    pub should_quit: bool,
}

impl AppState {
    pub fn new(config: AppConfig, store: &SessionStore) -> Self {
        Self {
            config,
            route: Route::History,
            nav: NavState::mount(store),
            history: HistoryState::new(),
            tutorial_open: false,
            viewport: Rect::default(),
            error: None,
            spinner_frame: 0,
            should_quit: false,
        }
    }

    /// Initial fetch for the history screen.
    pub fn mount(&mut self) -> Command {
        self.history.fetch_reports()
    }

    pub fn overlay_mode(&self) -> OverlayMode {
        if self.history.is_confirm_open() {
            OverlayMode::Confirm
        } else if self.nav.profile_open {
            OverlayMode::Profile
        } else if self.nav.is_menu_open() {
            OverlayMode::Menu
        } else if self.tutorial_open {
            OverlayMode::Tutorial
        } else {
            OverlayMode::None
        }
    }

    pub fn input_context(&self) -> InputContext {
        InputContext {
            has_error: self.error.is_some() || self.history.error().is_some(),
            is_loading: self.history.is_loading(),
            signed_out: self.route == Route::Login,
            overlay: self.overlay_mode(),
        }
    }

    /// Single entry point for the event loop. Returns the I/O to start, if any.
    pub fn handle_event(
        &mut self,
        event: AppEvent,
        store: &mut SessionStore,
        client: &ApiClient,
        now: Instant,
    ) -> Option<Command> {
        match event {
            AppEvent::Key(key) => {
                let action = input::map_key(key, &self.input_context());
                self.apply(action, store, client)
            }
            AppEvent::Tick => {
                self.advance_spinner();
                self.prune(now);
                None
            }
            AppEvent::Resize { width, height } => {
                self.viewport = Rect::new(0, 0, width, height);
                None
            }
            AppEvent::ReportsLoaded(_)
            | AppEvent::ReportsFailed(_)
            | AppEvent::DeleteSucceeded(_)
            | AppEvent::DeleteFailed { .. }
                if self.route != Route::History =>
            {
                tracing::debug!("dropping report result that arrived after logout");
                None
            }
            AppEvent::ReportsLoaded(reports) => {
                self.history.on_reports_loaded(reports);
                None
            }
            AppEvent::ReportsFailed(error) => {
                self.history.on_reports_failed(&error);
                None
            }
            AppEvent::DeleteSucceeded(id) => {
                if self.is_stale_delete(&id) {
                    return None;
                }
                Some(self.history.on_delete_succeeded(&id, now))
            }
            AppEvent::DeleteFailed { id, error } => {
                if !self.is_stale_delete(&id) {
                    self.history.on_delete_failed(&id, &error);
                }
                None
            }
            AppEvent::Error(msg) => {
                tracing::error!(error = %msg, "background failure");
                self.set_error(msg, now);
                None
            }
        }
    }

    /// A delete result this history screen did not issue, e.g. one started
    /// before a logout and a fresh sign-in.
    fn is_stale_delete(&self, id: &ReportId) -> bool {
        let stale = self.history.deleting.as_ref() != Some(id);
        if stale {
            tracing::debug!(report_id = %id, "dropping result of a delete no longer in flight");
        }
        stale
    }

    pub fn apply(
        &mut self,
        action: Action,
        store: &mut SessionStore,
        client: &ApiClient,
    ) -> Option<Command> {
        match action {
            Action::Quit => self.should_quit = true,
            Action::DismissError => {
                self.clear_error();
                self.history.dismiss_notice();
            }
            Action::MoveUp => self.history.move_cursor_up(),
            Action::MoveDown => self.history.move_cursor_down(),
            Action::Refresh => return Some(self.history.fetch_reports()),
            Action::RequestDelete => {
                self.history.request_delete_selected();
            }
            Action::ConfirmYes => return self.history.confirm_delete(store),
            Action::ConfirmNo => self.history.cancel_delete(),
            Action::OpenDetails => return self.detail_url().map(Command::OpenUrl),
            Action::UploadNew => return Some(Command::OpenUrl(self.upload_url())),
            Action::OpenUserMenu => self.nav.open_user_menu(navbar::avatar_anchor(self.viewport)),
            Action::MenuUp => self.nav.menu_up(),
            Action::MenuDown => self.nav.menu_down(),
            Action::MenuSelect => match self.nav.selected_menu_item() {
                Some(MenuItem::Profile) => self.nav.open_profile_dialog(),
                Some(MenuItem::Logout) => self.logout(store, client),
                None => {}
            },
            Action::OpenProfile => self.nav.open_profile_dialog(),
            Action::Logout => self.logout(store, client),
            Action::OpenTutorial => self.tutorial_open = true,
            Action::CloseOverlay => self.close_overlay(),
            Action::ReloadSession => return self.reload_session(store, client),
            Action::None => {}
        }
        None
    }

    fn close_overlay(&mut self) {
        match self.overlay_mode() {
            OverlayMode::Profile => self.nav.close_profile_dialog(),
            OverlayMode::Menu => self.nav.close_user_menu(),
            OverlayMode::Tutorial => self.tutorial_open = false,
            OverlayMode::Confirm => self.history.cancel_delete(),
            OverlayMode::None => {}
        }
    }

    /// Local session teardown followed by a switch to the sign-in screen.
    pub fn logout(&mut self, store: &mut SessionStore, client: &ApiClient) {
        self.nav.logout(store, client);
        self.nav.close_profile_dialog();
        self.history = HistoryState::new();
        self.tutorial_open = false;
        self.route = Route::Login;
    }

    /// Picks up credentials written by an external login and remounts the
    /// history screen.
    pub fn reload_session(
        &mut self,
        store: &mut SessionStore,
        client: &ApiClient,
    ) -> Option<Command> {
        store.reload();
        let Some(token) = store.access_token() else {
            self.set_error(
                "Still signed out. Sign in through the web app, then press r.".to_string(),
                Instant::now(),
            );
            return None;
        };
        client.set_default_bearer(token);
        self.clear_error();
        self.nav = NavState::mount(store);
        self.history = HistoryState::new();
        self.route = Route::History;
        Some(self.history.fetch_reports())
    }

    pub fn detail_url(&self) -> Option<String> {
        self.history.selected_report().map(|r| {
            format!(
                "{}/dashboard?report_id={}",
                self.config.web_url.trim_end_matches('/'),
                r.id
            )
        })
    }

    pub fn upload_url(&self) -> String {
        format!("{}/dashboard", self.config.web_url.trim_end_matches('/'))
    }

    pub fn advance_spinner(&mut self) {
        self.spinner_frame = (self.spinner_frame + 1) % SPINNER_FRAME_COUNT;
    }

    pub fn prune(&mut self, now: Instant) {
        self.history.prune_banner(now);
        self.prune_error(now);
    }

    pub fn set_error(&mut self, msg: String, now: Instant) {
        self.error = Some((msg, now));
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    pub fn prune_error(&mut self, now: Instant) {
        if let Some((_, ts)) = &self.error {
            if now.saturating_duration_since(*ts) >= Duration::from_secs(ERROR_TTL_SECS) {
                self.error = None;
            }
        }
    }

    /// App-level toast first, then whatever the history screen reports.
    pub fn error_message(&self) -> Option<String> {
        self.error
            .as_ref()
            .map(|(msg, _)| msg.clone())
            .or_else(|| self.history.notice.map(|e| e.to_string()))
    }
}
