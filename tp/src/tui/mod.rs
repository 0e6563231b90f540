//! Terminal User Interface for the trip planner
//!
//! Two screens:
//! - Preferences form with destination autocomplete (keyboard and mouse)
//! - Itinerary view with per-activity info panels, map links and CSV export

mod app;
mod events;
mod runner;
pub mod state;
mod views;

pub use app::App;
pub use events::{Event, EventHandler};
pub use runner::{TaskResult, TuiRunner};
pub use state::{AppState, FormField, PendingRequest, Screen};

use std::io::{self, Stdout};
use std::sync::Arc;

use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use eyre::Result;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::domain::Coordinates;
use crate::planner::{ItineraryPlanner, LocationInfoClient};

/// Terminal type alias
pub type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Network clients the TUI spawns requests on
pub struct Services {
    pub planner: Arc<ItineraryPlanner>,
    pub info: Arc<LocationInfoClient>,
    /// User location resolved at startup, if any
    pub coords: Option<Coordinates>,
}

/// Initialize the terminal for TUI mode
pub fn init() -> Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore the terminal to normal mode
pub fn restore() -> Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture)?;
    Ok(())
}

/// Run the TUI until the user quits
pub async fn run(state: AppState, services: Services) -> Result<()> {
    let terminal = init()?;

    // Use a guard to ensure terminal is restored even on early return/error
    struct TerminalGuard;
    impl Drop for TerminalGuard {
        fn drop(&mut self) {
            let _ = restore();
        }
    }
    let _guard = TerminalGuard;

    let mut runner = TuiRunner::new(terminal, App::new(state), services);
    runner.run().await
}
