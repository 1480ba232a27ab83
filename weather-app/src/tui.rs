//! Terminal window: event loop, key mapping, background lookups.

use std::io;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::Local;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::{Backend, CrosstermBackend},
    layout::{Position, Rect},
};
use tokio::sync::mpsc::{self, UnboundedSender};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};
use weather_core::WeatherLookup;

use crate::action::{Action, Effect};
use crate::reducer::reducer;
use crate::state::{AppState, WeatherView};
use crate::ui;

/// How long to wait for a key before checking for finished lookups.
const POLL_INTERVAL: Duration = Duration::from_millis(50);

pub async fn run(lookup: WeatherLookup) -> Result<()> {
    let _guard = TerminalGuard::enter()?;
    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)?;

    event_loop(&mut terminal, lookup).await
}

/// Raw mode, alternate screen and mouse capture for as long as it lives.
/// Dropping it restores the terminal on every exit path, panics included.
struct TerminalGuard;

impl TerminalGuard {
    fn enter() -> Result<Self> {
        enable_raw_mode().context("Failed to enable raw mode")?;
        // From here on, an early return drops the guard and undoes raw mode.
        let guard = Self;
        execute!(io::stdout(), EnterAlternateScreen, EnableMouseCapture)
            .context("Failed to enter alternate screen")?;
        Ok(guard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        // ===== Cleanup =====
        if let Err(e) = disable_raw_mode() {
            warn!(error = %e, "failed to disable raw mode");
        }
        if let Err(e) = execute!(
            io::stdout(),
            LeaveAlternateScreen,
            DisableMouseCapture,
            crossterm::cursor::Show
        ) {
            warn!(error = %e, "failed to restore terminal");
        }
    }
}

async fn event_loop<B: Backend>(terminal: &mut Terminal<B>, lookup: WeatherLookup) -> Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut runner = LookupRunner::new(lookup, tx);
    let mut state = AppState::default();
    info!("window opened");

    while !state.should_quit {
        terminal.draw(|frame| ui::render(frame, &state))?;

        if event::poll(POLL_INTERVAL)? {
            let size = terminal.size()?;
            let window = Rect::new(0, 0, size.width, size.height);
            if let Some(action) = event_action(&event::read()?, window) {
                dispatch(&mut state, &mut runner, action);
            }
        }

        while let Ok(action) = rx.try_recv() {
            dispatch(&mut state, &mut runner, action);
        }
    }

    info!("window closed");
    Ok(())
}

fn dispatch(state: &mut AppState, runner: &mut LookupRunner, action: Action) {
    if let Some(effect) = reducer(state, action) {
        runner.handle(effect);
    }
}

/// Maps a terminal event onto an action. Only key presses and left clicks
/// on the Search button count; `window` is the full terminal area.
pub fn event_action(event: &Event, window: Rect) -> Option<Action> {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => key_press_action(key),
        Event::Mouse(mouse) => mouse_action(mouse, window),
        _ => None,
    }
}

fn mouse_action(mouse: &MouseEvent, window: Rect) -> Option<Action> {
    let MouseEventKind::Down(MouseButton::Left) = mouse.kind else {
        return None;
    };
    ui::search_button_area(window)
        .contains(Position::new(mouse.column, mouse.row))
        .then_some(Action::Search)
}

fn key_press_action(key: &KeyEvent) -> Option<Action> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Char('c') if ctrl => Some(Action::Quit),
        KeyCode::Char('u') if ctrl => Some(Action::InputClear),
        KeyCode::Char(_) if ctrl => None,
        KeyCode::Char(c) => Some(Action::InputChar(c)),
        KeyCode::Backspace => Some(Action::InputBackspace),
        KeyCode::Enter => Some(Action::Search),
        KeyCode::Esc => Some(Action::Quit),
        _ => None,
    }
}

/// Runs lookups on the tokio runtime and reports back through the channel.
/// At most one lookup is in flight; dropping the runner aborts it.
struct LookupRunner {
    lookup: WeatherLookup,
    tx: UnboundedSender<Action>,
    in_flight: Option<JoinHandle<()>>,
}

impl LookupRunner {
    fn new(lookup: WeatherLookup, tx: UnboundedSender<Action>) -> Self {
        Self {
            lookup,
            tx,
            in_flight: None,
        }
    }

    fn handle(&mut self, effect: Effect) {
        match effect {
            Effect::Lookup { seq, query } => {
                self.cancel();
                debug!(seq, city = %query.city, "starting lookup");

                let lookup = self.lookup.clone();
                let tx = self.tx.clone();
                self.in_flight = Some(tokio::spawn(async move {
                    let action = match lookup.lookup(&query).await {
                        Ok(report) => Action::LookupDidLoad {
                            seq,
                            view: WeatherView::from_report(report, Local::now()),
                        },
                        Err(e) => Action::LookupDidError {
                            seq,
                            message: e.to_string(),
                        },
                    };
                    // The window may already be gone.
                    let _ = tx.send(action);
                }));
            }
            Effect::CancelLookup => self.cancel(),
        }
    }

    fn cancel(&mut self) {
        if let Some(handle) = self.in_flight.take() {
            if !handle.is_finished() {
                debug!("aborting lookup in flight");
            }
            handle.abort();
        }
    }
}

impl Drop for LookupRunner {
    fn drop(&mut self) {
        self.cancel();
    }
}
