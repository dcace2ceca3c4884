//! # nex-tui: Terminal dashboard for energy network models
//!
//! An Elm-style reactive loop over a loaded network registry: keyboard
//! events become [`message::Message`] values, [`update::dispatch`]
//! applies them and recomputes exactly the panels the change made
//! stale, and [`view::draw`] projects the state onto the terminal.
//!
//! Panels recompute only when visible. A filter change on a hidden tab
//! costs nothing until that tab is activated, at which point the tab
//! switch itself refreshes the incoming panels.

use std::io;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use crossterm::event::{self, Event};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing::info;

use nex_core::NetworkStatistics;
use nex_io::NetworkInput;

pub mod events;
pub mod explorer;
pub mod filter;
pub mod message;
pub mod models;
pub mod panel;
pub mod panels;
pub mod persist;
pub mod registry;
pub mod theme;
pub mod update;
pub mod view;

use message::Message;
use models::{AppState, DashboardOptions};
use registry::NetworkRegistry;
use update::{bootstrap, dispatch};

/// Source of terminal events; the run loop is tested against a scripted
/// implementation.
pub trait EventSource {
    /// Next event within `timeout`, or `None` on a tick without input.
    fn next(&mut self, timeout: Duration) -> io::Result<Option<Event>>;
}

pub struct CrosstermEventSource;

impl EventSource for CrosstermEventSource {
    fn next(&mut self, timeout: Duration) -> io::Result<Option<Event>> {
        if event::poll(timeout)? {
            return Ok(Some(event::read()?));
        }
        Ok(None)
    }
}

/// Load the requested networks and run the dashboard until quit.
pub fn run_dashboard(input: NetworkInput, mut opts: DashboardOptions) -> anyhow::Result<()> {
    let networks = nex_io::load_networks(input).context("loading networks")?;
    let registry = NetworkRegistry::new(networks)?;
    info!(networks = registry.len(), "starting dashboard");

    if opts.dark_mode.is_none() && opts.persist_prefs {
        opts.dark_mode = Some(persist::load_prefs().dark_mode);
    }
    let mut state = AppState::new(
        Arc::new(registry),
        Arc::new(NetworkStatistics),
        &opts,
    );
    bootstrap(&mut state);

    enable_raw_mode().context("enabling raw mode")?;
    let mut stdout = io::stdout();
    crossterm::execute!(stdout, EnterAlternateScreen).context("entering alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("creating terminal")?;

    let result = run_loop(
        &mut terminal,
        &mut state,
        &mut CrosstermEventSource,
        opts.persist_prefs,
    );

    disable_raw_mode().ok();
    crossterm::execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
    terminal.show_cursor().ok();

    result
}

/// Draw/input/dispatch loop. Extracted from the terminal setup so tests
/// can drive it with a scripted [`EventSource`].
pub fn run_loop<B, E>(
    terminal: &mut Terminal<B>,
    state: &mut AppState,
    events: &mut E,
    persist_prefs: bool,
) -> anyhow::Result<()>
where
    B: ratatui::backend::Backend,
    E: EventSource,
{
    loop {
        terminal.draw(|f| view::draw(f, state))?;

        if let Some(event) = events.next(Duration::from_millis(250))? {
            match event {
                Event::Key(key) => {
                    if let Some(msg) = events::map_key(key, state) {
                        let was_dark_toggle = msg == Message::ToggleDarkMode;
                        dispatch(state, msg);
                        if was_dark_toggle && persist_prefs {
                            persist::save_prefs(&persist::UiPrefs {
                                dark_mode: state.filter.dark_mode,
                            });
                        }
                    }
                }
                Event::Resize(w, h) => {
                    dispatch(state, Message::Resize(w, h));
                }
                _ => {}
            }
        }

        if state.should_quit {
            info!("dashboard quit");
            return Ok(());
        }
    }
}
