use arogya::api::ApiClient;
use arogya::app::{self, AppConfig, AppState};
use arogya::cli::Cli;
use arogya::dispatch::Dispatcher;
use arogya::events::EventHandler;
use arogya::session::SessionStore;
use arogya::traits::ReportBackend;
use arogya::tui;

use clap::Parser;
use color_eyre::eyre::{eyre, Result};
use crossterm::execute;
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen, SetTitle};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Rect;
use ratatui::Terminal;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

fn setup_verbose_logging() -> Result<()> {
    let state_dir = state_dir_or_fallback();
    std::fs::create_dir_all(&state_dir)
        .map_err(|e| eyre!("Failed to create log directory {state_dir:?}: {e}"))?;
    let log_path = state_dir.join("debug.log");
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .map_err(|e| eyre!("Failed to open log file {log_path:?}: {e}"))?;
    tracing_subscriber::fmt()
        .with_writer(file)
        .with_ansi(false)
        .init();
    tracing::info!(
        "arogya v{} starting with verbose logging",
        env!("CARGO_PKG_VERSION")
    );
    Ok(())
}

fn state_dir_or_fallback() -> PathBuf {
    if let Some(state) = dirs::state_dir() {
        state.join("arogya")
    } else if let Some(home) = dirs::home_dir() {
        home.join(".local").join("state").join("arogya")
    } else {
        PathBuf::from("/tmp/arogya")
    }
}

fn open_session(args: &Cli) -> Result<SessionStore> {
    let path = match &args.session_file {
        Some(p) => p.clone(),
        None => SessionStore::default_path()
            .ok_or_else(|| eyre!("Could not determine a config directory; pass --session-file"))?,
    };
    tracing::info!(path = %path.display(), "using session file");
    Ok(SessionStore::load(path))
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Cli::parse();

    if args.verbose {
        setup_verbose_logging()?;
    }

    let mut store = open_session(&args)?;
    let client = ApiClient::new(args.api_url.clone(), Duration::from_secs(args.timeout))
        .map_err(|e| eyre!("Failed to build HTTP client: {e}"))?;
    // The web login leaves the bearer on the shared client; restore it here.
    if let Some(token) = store.access_token() {
        client.set_default_bearer(token);
    }

    let version_string = format!(
        "arogya v{}+{}",
        env!("CARGO_PKG_VERSION"),
        env!("BUILD_NUMBER")
    );
    let mut state = AppState::new(
        AppConfig {
            web_url: args.web_url.clone(),
            version_string,
        },
        &store,
    );

    // Setup terminal with panic hook before anything draws
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        if let Err(e) = terminal::disable_raw_mode() {
            eprintln!("Failed to disable raw mode during panic: {e}");
        }
        if let Err(e) = execute!(io::stdout(), LeaveAlternateScreen, SetTitle("")) {
            eprintln!("Failed to leave alternate screen during panic: {e}");
        }
        original_hook(panic_info);
    }));

    terminal::enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, SetTitle("Arogya AI | Report History"))?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let size = terminal.size()?;
    state.viewport = Rect::new(0, 0, size.width, size.height);

    let mut events = EventHandler::new(Duration::from_millis(app::TICK_RATE_MS));
    let backend: Arc<dyn ReportBackend> = Arc::new(client.clone());
    let dispatcher = Dispatcher::new(backend, events.sender());

    dispatcher.dispatch(state.mount());

    let result = run_app(
        &mut terminal,
        &mut state,
        &mut events,
        &dispatcher,
        &mut store,
        &client,
    )
    .await;

    events.stop();

    // Restore terminal
    terminal::disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, SetTitle(""))?;
    terminal.show_cursor()?;

    result
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    state: &mut AppState,
    events: &mut EventHandler,
    dispatcher: &Dispatcher,
    store: &mut SessionStore,
    client: &ApiClient,
) -> Result<()> {
    loop {
        terminal.draw(|f| tui::render::render(f, state))?;

        let Some(event) = events.next().await else {
            tracing::warn!("event channel closed");
            return Ok(());
        };
        if let Some(cmd) = state.handle_event(event, store, client, Instant::now()) {
            dispatcher.dispatch(cmd);
        }

        if state.should_quit {
            return Ok(());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_session_file_is_used() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        let args = Cli::try_parse_from([
            "arogya",
            "--session-file",
            path.to_str().unwrap(),
        ])
        .unwrap();
        let store = open_session(&args).unwrap();
        assert_eq!(store.path(), Some(path.as_path()));
    }

    #[test]
    fn state_dir_ends_with_app_name() {
        assert!(state_dir_or_fallback().ends_with("arogya"));
    }
}
