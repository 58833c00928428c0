//! Application state and TUI event loop.
//!
//! [`App`] owns the fleet store for the lifetime of the session. Key presses
//! are translated into state changes by [`App::handle_key`], which is free
//! of terminal I/O; [`App::run`] only draws and feeds it events.

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Frame, Terminal};

use fleet_data::store::{FleetSource, FleetStore, StoreAction, StoreEvent};
use fleet_runtime::dashboard::{DashboardSnapshot, VehicleDetail};

use crate::components::chart::ChartKind;
use crate::dashboard_view::{self, DashboardViewState};
use crate::themes::Theme;
use crate::vehicle_view::{self, VehicleTab};

const TICK_RATE: Duration = Duration::from_millis(250);

// ── Screen ────────────────────────────────────────────────────────────────────

/// Which screen the TUI is currently rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    Dashboard,
    Vehicle { id: String, tab: VehicleTab },
}

impl Screen {
    pub fn vehicle(id: impl Into<String>) -> Self {
        Screen::Vehicle {
            id: id.into(),
            tab: VehicleTab::default(),
        }
    }
}

// ── App ───────────────────────────────────────────────────────────────────────

/// Root application state.
pub struct App {
    pub theme: Theme,
    pub store: FleetStore,
    /// IANA zone name shown in the header.
    pub timezone: String,
    pub screen: Screen,
    /// Selected dashboard row.
    pub selected: usize,
    pub chart: ChartKind,
    /// Vehicle id awaiting a `y` to confirm deletion.
    pub pending_delete: Option<String>,
    /// One-line message shown instead of the key hints.
    pub status: Option<String>,
    pub should_quit: bool,
}

impl App {
    pub fn new(theme_name: &str, store: FleetStore, timezone: String, screen: Screen) -> Self {
        Self {
            theme: Theme::from_name(theme_name),
            store,
            timezone,
            screen,
            selected: 0,
            chart: ChartKind::default(),
            pending_delete: None,
            status: None,
            should_quit: false,
        }
    }

    /// Show `message` in the status line.
    pub fn with_status(mut self, message: impl Into<String>) -> Self {
        self.status = Some(message.into());
        self
    }

    // ── Event loop ────────────────────────────────────────────────────────────

    /// Run the TUI until the user quits.
    ///
    /// The terminal is restored even when drawing or reading events fails.
    pub fn run(mut self) -> io::Result<FleetStore> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let result = self.event_loop(&mut terminal);

        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        result.map(|()| self.store)
    }

    fn event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> io::Result<()> {
        while !self.should_quit {
            terminal.draw(|frame| self.render(frame))?;

            if event::poll(TICK_RATE)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key);
                    }
                }
            }
        }
        Ok(())
    }

    // ── Input ─────────────────────────────────────────────────────────────────

    /// Apply one key press.
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        if let Some(id) = self.pending_delete.take() {
            self.resolve_delete(&id, key.code);
            return;
        }

        match self.screen.clone() {
            Screen::Dashboard => self.handle_dashboard_key(key.code),
            Screen::Vehicle { id, tab } => self.handle_vehicle_key(key.code, id, tab),
        }
    }

    fn handle_dashboard_key(&mut self, code: KeyCode) {
        let count = self.store.vehicles().len();
        match code {
            KeyCode::Char('q') | KeyCode::Char('Q') => self.should_quit = true,
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected = self.selected.saturating_sub(1);
                self.status = None;
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.selected + 1 < count {
                    self.selected += 1;
                }
                self.status = None;
            }
            KeyCode::Enter => {
                if let Some(v) = self.store.vehicles().get(self.selected) {
                    self.screen = Screen::vehicle(v.id.clone());
                    self.status = None;
                }
            }
            KeyCode::Char('d') => {
                if let Some(v) = self.store.vehicles().get(self.selected) {
                    self.status = Some(format!("Delete {}? (y/n)", v.title()));
                    self.pending_delete = Some(v.id.clone());
                }
            }
            KeyCode::Tab => self.chart = self.chart.toggle(),
            _ => {}
        }
    }

    fn handle_vehicle_key(&mut self, code: KeyCode, id: String, tab: VehicleTab) {
        match code {
            KeyCode::Char('q') | KeyCode::Char('Q') => self.should_quit = true,
            KeyCode::Esc | KeyCode::Backspace => self.screen = Screen::Dashboard,
            KeyCode::Tab => self.chart = self.chart.toggle(),
            KeyCode::Char(c) => {
                if let Some(next) = VehicleTab::from_key(c) {
                    if next != tab {
                        self.screen = Screen::Vehicle { id, tab: next };
                    }
                }
            }
            _ => {}
        }
    }

    /// `y` deletes the vehicle and its logs; any other key cancels.
    fn resolve_delete(&mut self, id: &str, code: KeyCode) {
        if !matches!(code, KeyCode::Char('y') | KeyCode::Char('Y')) {
            self.status = Some("Delete cancelled.".to_string());
            return;
        }

        let title = self
            .store
            .find_vehicle(id)
            .map(|v| v.title())
            .unwrap_or_else(|| id.to_string());

        match self.store.dispatch(StoreAction::Delete(id.to_string())) {
            Ok(StoreEvent::Deleted { logs_removed, .. }) => {
                tracing::info!(id, logs_removed, "vehicle deleted from dashboard");
                self.status = Some(format!("{title} has been deleted."));
            }
            Ok(event) => {
                tracing::debug!(id, ?event, "unexpected store event for delete");
            }
            Err(e) => {
                tracing::warn!(id, error = %e, "delete failed");
                self.status = Some(e.to_string());
            }
        }

        let count = self.store.vehicles().len();
        self.selected = self.selected.min(count.saturating_sub(1));
    }

    // ── Rendering ─────────────────────────────────────────────────────────────

    /// Render the current screen into `frame`.
    pub fn render(&self, frame: &mut Frame) {
        let area = frame.area();
        match &self.screen {
            Screen::Dashboard => {
                let snapshot = DashboardSnapshot::build(&self.store);
                let state = DashboardViewState {
                    timezone: &self.timezone,
                    selected: self.selected,
                    chart: self.chart,
                    status: self.status.as_deref(),
                };
                dashboard_view::render_dashboard(frame, area, &snapshot, &state, &self.theme);
            }
            Screen::Vehicle { id, tab } => match VehicleDetail::build(&self.store, id) {
                Ok(detail) => {
                    vehicle_view::render_vehicle(frame, area, &detail, *tab, self.chart, &self.theme)
                }
                Err(_) => vehicle_view::render_not_found(frame, area, id, &self.theme),
            },
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
