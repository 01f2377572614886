//! Terminal input thread and application event channel.
//!
//! [`EventHandler`] reads the terminal on an OS thread (not a tokio task)
//! because `crossterm::event::poll()` blocks. Results of spawned API calls
//! arrive on the same channel through [`EventHandler::sender`], so the main
//! loop sees one ordered stream of events.

use crate::api::{Report, ReportId};
use crossterm::event::{self, Event as CrosstermEvent, KeyEvent};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;
use tokio::sync::mpsc;

#[derive(Debug)]
pub enum AppEvent {
    Key(KeyEvent),
    Tick,
    Resize { width: u16, height: u16 },
    ReportsLoaded(Vec<Report>),
    /// Raw error text; logged, never displayed.
    ReportsFailed(String),
    DeleteSucceeded(ReportId),
    DeleteFailed { id: ReportId, error: String },
    /// Global toast for failures outside the history flow (browser, task crash).
    Error(String),
}

pub struct EventHandler {
    rx: mpsc::UnboundedReceiver<AppEvent>,
    tx: mpsc::UnboundedSender<AppEvent>,
    shutdown: Arc<AtomicBool>,
    thread: Option<JoinHandle<()>>,
}

impl EventHandler {
    pub fn new(tick_rate: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let event_tx = tx.clone();
        let shutdown = Arc::new(AtomicBool::new(false));
        let shutdown_flag = shutdown.clone();

        let thread = std::thread::spawn(move || {
            while !shutdown_flag.load(Ordering::Relaxed) {
                match event::poll(tick_rate) {
                    Err(e) => {
                        let _ = event_tx.send(AppEvent::Error(format!("Terminal poll error: {e}")));
                        break;
                    }
                    Ok(false) => {
                        if event_tx.send(AppEvent::Tick).is_err() {
                            break;
                        }
                        continue;
                    }
                    Ok(true) => {}
                }
                let forwarded = match event::read() {
                    Ok(CrosstermEvent::Key(key)) => Some(AppEvent::Key(key)),
                    Ok(CrosstermEvent::Resize(width, height)) => {
                        Some(AppEvent::Resize { width, height })
                    }
                    Ok(_) => None,
                    // EINTR: retry silently
                    Err(e) if e.kind() == std::io::ErrorKind::Interrupted => None,
                    Err(e) => {
                        let _ = event_tx.send(AppEvent::Error(format!("Terminal read error: {e}")));
                        break;
                    }
                };
                if let Some(ev) = forwarded {
                    if event_tx.send(ev).is_err() {
                        break;
                    }
                }
            }
        });

        Self {
            rx,
            tx,
            shutdown,
            thread: Some(thread),
        }
    }

    pub fn sender(&self) -> mpsc::UnboundedSender<AppEvent> {
        self.tx.clone()
    }

    pub async fn next(&mut self) -> Option<AppEvent> {
        self.rx.recv().await
    }

    pub fn stop(&mut self) {
        self.shutdown.store(true, Ordering::Relaxed);
        if let Some(handle) = self.thread.take() {
            if handle.join().is_err() {
                tracing::error!("input thread panicked");
            }
        }
    }
}

impl Drop for EventHandler {
    fn drop(&mut self) {
        // Signal only; joining here could block on a pending poll during unwinding.
        self.shutdown.store(true, Ordering::Relaxed);
    }
}
