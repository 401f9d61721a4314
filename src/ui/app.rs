//! Main application state and UI loop
//!
//! Contains the App struct and main UI event handling logic

use crate::environment::Environment;
use crate::events::Event as WorkerEvent;
use crate::layout::LayoutStore;
use crate::ui::dashboard::{DashboardState, KeyOutcome, render_dashboard};
use crate::ui::splash::render_splash;
use crossterm::event::{self, Event, KeyCode, KeyEvent};
use ratatui::{Frame, Terminal, backend::Backend};
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tokio::sync::{broadcast, mpsc};

/// UI configuration data grouped by concern
#[derive(Debug, Clone)]
pub struct UIConfig {
    pub with_background_color: bool,
    pub refresh_interval: Duration,
    pub export_dir: PathBuf,
}

impl UIConfig {
    pub fn new(with_background_color: bool, refresh_interval: Duration, export_dir: PathBuf) -> Self {
        Self {
            with_background_color,
            refresh_interval,
            export_dir,
        }
    }
}

/// The different screens in the application.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Screen {
    /// Preload gate shown at the start of the application.
    Splash,
    /// Market sections and the activity log.
    Dashboard,
}

/// Application state
#[derive(Debug)]
pub struct App {
    /// The current screen being displayed in the application.
    current_screen: Screen,

    /// When the preload gate opened.
    splash_start: Instant,

    /// How long the preload gate stays up.
    preload_gate: Duration,

    /// Dashboard state. Fed from the first fetch on, even behind the splash.
    state: DashboardState,

    /// Receives events from worker tasks.
    event_receiver: mpsc::Receiver<WorkerEvent>,

    /// Broadcasts shutdown signal to worker tasks.
    shutdown_sender: broadcast::Sender<()>,
}

impl App {
    /// Creates a new instance of the application.
    pub fn new(
        environment: Environment,
        layout: LayoutStore,
        event_receiver: mpsc::Receiver<WorkerEvent>,
        shutdown_sender: broadcast::Sender<()>,
        preload_gate: Duration,
        ui_config: UIConfig,
    ) -> Self {
        Self {
            current_screen: Screen::Splash,
            splash_start: Instant::now(),
            preload_gate,
            state: DashboardState::new(environment, layout, ui_config),
            event_receiver,
            shutdown_sender,
        }
    }

    /// Moves events from the worker channel into the dashboard queue.
    fn drain_events(&mut self) {
        while let Ok(event) = self.event_receiver.try_recv() {
            self.state.add_event(event);
        }
    }

    /// Routes a key press; returns whether the app should exit.
    fn handle_key(&mut self, key: KeyEvent) -> bool {
        match self.current_screen {
            Screen::Splash => {
                if matches!(key.code, KeyCode::Esc | KeyCode::Char('q')) {
                    return true;
                }
                // Any other key skips the gate
                self.current_screen = Screen::Dashboard;
                false
            }
            Screen::Dashboard => self.state.handle_key(key) == KeyOutcome::Quit,
        }
    }
}

/// Runs the application UI in a loop, handling events and rendering the appropriate screen.
pub async fn run<B: Backend>(terminal: &mut Terminal<B>, mut app: App) -> std::io::Result<()> {
    loop {
        app.drain_events();
        app.state.update();
        terminal.draw(|f| render(f, &app))?;

        if app.current_screen == Screen::Splash && app.splash_start.elapsed() >= app.preload_gate {
            app.current_screen = Screen::Dashboard;
            continue;
        }

        // Poll for key events
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                // Skip events that are not KeyEventKind::Press
                if key.kind == event::KeyEventKind::Release {
                    continue;
                }

                if app.handle_key(key) {
                    // Send shutdown signal to workers
                    let _ = app.shutdown_sender.send(());
                    return Ok(());
                }
            }
        }

        // Let the worker tasks run between frames
        tokio::task::yield_now().await;
    }
}

/// Renders the current screen based on the application state.
fn render(f: &mut Frame, app: &App) {
    match app.current_screen {
        Screen::Splash => render_splash(f),
        Screen::Dashboard => render_dashboard(f, &app.state),
    }
}
