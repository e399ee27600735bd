//! Main application state and TUI event loop.
//!
//! [`App`] owns the theme and the last successful [`RenderResult`]. Snapshots
//! arrive from the refresh orchestrator over an `mpsc` channel and refresh
//! requests go back through a [`RefreshTrigger`].

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    text::Text,
    widgets::Paragraph,
    Frame, Terminal,
};
use tokio::sync::mpsc;

use recovery_core::error::{RecoveryError, Result};
use recovery_runtime::orchestrator::{RefreshSnapshot, RefreshTrigger};
use recovery_runtime::pipeline::RenderResult;

use crate::chart_view;
use crate::components::header::Header;
use crate::components::indicators::RefreshIndicator;
use crate::themes::Theme;

/// Header lines plus the refresh status line.
const HEADER_HEIGHT: u16 = 5;

// ── KeyAction ─────────────────────────────────────────────────────────────────

/// What a key press asks the event loop to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Refresh,
    Quit,
}

// ── App ───────────────────────────────────────────────────────────────────────

/// Root application state for the recovery charts TUI.
pub struct App {
    pub theme: Theme,
    /// Data file shown in the header.
    pub data_file: String,
    /// `true` from a refresh request until the next snapshot arrives.
    pub refreshing: bool,
    /// Set to `true` to break out of the event loop on the next iteration.
    pub should_quit: bool,
    /// Most recent successful refresh, `None` until the first one lands.
    pub last_result: Option<RenderResult>,
}

impl App {
    /// The initial load is already running when the app starts, so the app
    /// begins in the refreshing state.
    pub fn new(theme_name: &str, data_file: String) -> Self {
        Self {
            theme: Theme::from_name(theme_name),
            data_file,
            refreshing: true,
            should_quit: false,
            last_result: None,
        }
    }

    // ── Public event loop ─────────────────────────────────────────────────────

    /// Run the TUI until the user quits or the snapshot channel closes.
    ///
    /// Keyboard input is polled synchronously with a 250 ms timeout while
    /// snapshots are drained from `rx` with `try_recv`. Terminal failures
    /// come back as [`RecoveryError::Terminal`].
    pub async fn run(
        self,
        rx: mpsc::Receiver<RefreshSnapshot>,
        trigger: RefreshTrigger,
    ) -> Result<()> {
        self.run_terminal(rx, trigger).await.map_err(terminal_error)
    }

    async fn run_terminal(
        mut self,
        mut rx: mpsc::Receiver<RefreshSnapshot>,
        trigger: RefreshTrigger,
    ) -> io::Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let tick_rate = Duration::from_millis(250);

        let result = loop {
            if let Err(e) = terminal.draw(|frame| self.render(frame)) {
                break Err(e);
            }

            match Self::next_key(tick_rate) {
                Ok(Some(key)) => match self.handle_key(key) {
                    Some(KeyAction::Quit) => break Ok(()),
                    Some(KeyAction::Refresh) => {
                        if trigger.refresh() {
                            tracing::debug!("refresh requested from keyboard");
                            self.refreshing = true;
                        } else {
                            tracing::warn!("refresh loop is no longer running");
                        }
                    }
                    None => {}
                },
                Ok(None) => {}
                Err(e) => break Err(e),
            }

            // Drain any pending snapshots (non-blocking).
            loop {
                match rx.try_recv() {
                    Ok(snapshot) => self.update_from_snapshot(snapshot),
                    Err(mpsc::error::TryRecvError::Empty) => break,
                    Err(mpsc::error::TryRecvError::Disconnected) => {
                        self.should_quit = true;
                        break;
                    }
                }
            }

            if self.should_quit {
                break Ok(());
            }
        };

        // Restore terminal state unconditionally.
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        result
    }

    /// Map a key press to an action.
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<KeyAction> {
        if key.kind != KeyEventKind::Press {
            return None;
        }
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
                Some(KeyAction::Quit)
            }
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.should_quit = true;
                Some(KeyAction::Quit)
            }
            KeyCode::Char('r') | KeyCode::Char('R') => Some(KeyAction::Refresh),
            _ => None,
        }
    }

    /// Apply a completed refresh.
    ///
    /// A failed refresh keeps whatever is on screen; the orchestrator has
    /// already logged the error.
    pub fn update_from_snapshot(&mut self, snapshot: RefreshSnapshot) {
        self.refreshing = false;
        match snapshot.outcome {
            Ok(result) => self.last_result = Some(result),
            Err(_) => tracing::debug!(
                generation = snapshot.generation,
                "refresh failed; keeping previous charts"
            ),
        }
    }

    // ── Private helpers ───────────────────────────────────────────────────────

    fn next_key(timeout: Duration) -> io::Result<Option<KeyEvent>> {
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                return Ok(Some(key));
            }
        }
        Ok(None)
    }

    /// Render the current application state into `frame`.
    fn render(&self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(HEADER_HEIGHT), Constraint::Min(0)])
            .split(frame.area());

        let mut lines = Header::new(&self.data_file, &self.theme).to_lines();
        let last_refresh = self
            .last_result
            .as_ref()
            .map(|r| (r.generated_at, r.records_loaded));
        lines.push(RefreshIndicator::new(self.refreshing, last_refresh, &self.theme).to_line());
        frame.render_widget(Paragraph::new(Text::from(lines)), chunks[0]);

        match self.last_result {
            Some(ref result) => {
                chart_view::render_charts(frame, chunks[1], &result.charts, &self.theme)
            }
            None => chart_view::render_no_data(frame, chunks[1], &self.theme),
        }
    }
}

fn terminal_error(e: io::Error) -> RecoveryError {
    RecoveryError::Terminal(e.to_string())
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use ratatui::backend::TestBackend;
    use recovery_runtime::pipeline::ChartData;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn result(values: &[i64]) -> RenderResult {
        RenderResult {
            charts: vec![ChartData {
                state_abbrev: "VIC".to_string(),
                title: "Victorian Recoveries (as at: 09:30 PM)".to_string(),
                color: "#EE0290".to_string(),
                labels: vec!["April".to_string(); values.len()],
                values: values.to_vec(),
            }],
            generated_at: Utc::now(),
            records_loaded: values.len(),
        }
    }

    fn snapshot(generation: u64, outcome: std::result::Result<RenderResult, String>) -> RefreshSnapshot {
        RefreshSnapshot {
            generation,
            outcome,
        }
    }

    fn screen(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 24)).unwrap();
        terminal.draw(|frame| app.render(frame)).unwrap();
        let buffer = terminal.backend().buffer();
        buffer
            .content
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|c| c.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_app_creation_defaults() {
        let app = App::new("dark", "data.csv".to_string());
        assert_eq!(app.data_file, "data.csv");
        assert!(app.refreshing);
        assert!(!app.should_quit);
        assert!(app.last_result.is_none());
    }

    #[test]
    fn test_handle_key_quit() {
        let mut app = App::new("dark", "data.csv".to_string());
        assert_eq!(app.handle_key(key(KeyCode::Char('q'))), Some(KeyAction::Quit));
        assert!(app.should_quit);

        let mut app = App::new("dark", "data.csv".to_string());
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(app.handle_key(ctrl_c), Some(KeyAction::Quit));
    }

    #[test]
    fn test_handle_key_refresh() {
        let mut app = App::new("light", "data.csv".to_string());
        assert_eq!(app.handle_key(key(KeyCode::Char('r'))), Some(KeyAction::Refresh));
        assert_eq!(app.handle_key(key(KeyCode::Char('R'))), Some(KeyAction::Refresh));
        assert_eq!(app.handle_key(key(KeyCode::Char('c'))), None);
        assert!(!app.should_quit);
    }

    #[test]
    fn test_handle_key_ignores_release() {
        let mut app = App::new("dark", "data.csv".to_string());
        let mut release = key(KeyCode::Char('q'));
        release.kind = KeyEventKind::Release;
        assert_eq!(app.handle_key(release), None);
        assert!(!app.should_quit);
    }

    #[test]
    fn test_update_from_snapshot_success_replaces_charts() {
        let mut app = App::new("dark", "data.csv".to_string());
        app.update_from_snapshot(snapshot(0, Ok(result(&[1]))));
        app.update_from_snapshot(snapshot(1, Ok(result(&[7, 8]))));

        assert!(!app.refreshing);
        let charts = &app.last_result.as_ref().unwrap().charts;
        assert_eq!(charts[0].values, vec![7, 8]);
    }

    #[test]
    fn test_update_from_snapshot_failure_keeps_previous_charts() {
        let mut app = App::new("dark", "data.csv".to_string());
        app.update_from_snapshot(snapshot(0, Ok(result(&[5]))));
        app.refreshing = true;
        app.update_from_snapshot(snapshot(1, Err("Failed to read file".to_string())));

        assert!(!app.refreshing);
        assert_eq!(app.last_result.as_ref().unwrap().charts[0].values, vec![5]);
    }

    #[test]
    fn test_terminal_error_keeps_io_message() {
        let err = terminal_error(io::Error::new(io::ErrorKind::Other, "not a tty"));
        assert!(matches!(err, RecoveryError::Terminal(_)));
        assert_eq!(err.to_string(), "Terminal error: not a tty");
    }

    #[test]
    fn test_render_before_first_load() {
        let app = App::new("dark", "data.csv".to_string());
        let out = screen(&app);
        assert!(out.contains("RECOVERIES BY MONTH"), "{out}");
        assert!(out.contains("refreshing…"), "{out}");
        assert!(out.contains("No recovery data loaded"), "{out}");
    }

    #[test]
    fn test_render_after_load_shows_chart() {
        let mut app = App::new("classic", "data.csv".to_string());
        app.update_from_snapshot(snapshot(0, Ok(result(&[3]))));
        let out = screen(&app);
        assert!(out.contains("Victorian Recoveries"), "{out}");
        assert!(out.contains("Last refresh:"), "{out}");
        assert!(!out.contains("refreshing…"), "{out}");
    }
}
