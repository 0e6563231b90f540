//! TUI Runner - main loop that owns the terminal and background requests
//!
//! The TuiRunner is responsible for:
//! - Dispatching terminal events to App
//! - Spawning the network requests App queues
//! - Routing finished requests back into the state
//! - Rendering at ~30 FPS

use std::sync::Arc;
use std::time::Duration;

use eyre::Result;
use ratatui::layout::Rect;
use tokio::sync::mpsc;
use tracing::debug;

use super::app::App;
use super::events::{Event, EventHandler};
use super::state::PendingRequest;
use super::{Services, Tui, views};
use crate::domain::{Itinerary, Language};
use crate::planner::{ItineraryGenerationError, LocationInfo, LocationInfoError};

/// Result of a spawned request, tagged so stale ones can be dropped
#[derive(Debug)]
pub enum TaskResult {
    Itinerary {
        generation: u64,
        result: Result<Itinerary, ItineraryGenerationError>,
    },
    LocationInfo {
        generation: u64,
        index: usize,
        result: Result<LocationInfo, LocationInfoError>,
    },
}

/// TUI Runner that manages the terminal and event loop
pub struct TuiRunner {
    app: App,
    terminal: Tui,
    services: Services,
    event_handler: EventHandler,
    results_tx: mpsc::UnboundedSender<TaskResult>,
    results_rx: mpsc::UnboundedReceiver<TaskResult>,
}

impl TuiRunner {
    pub fn new(terminal: Tui, app: App, services: Services) -> Self {
        let (results_tx, results_rx) = mpsc::unbounded_channel();
        Self {
            app,
            terminal,
            services,
            event_handler: EventHandler::new(Duration::from_millis(33)), // ~30 FPS
            results_tx,
            results_rx,
        }
    }

    /// Run the TUI main loop
    pub async fn run(&mut self) -> Result<()> {
        loop {
            self.terminal.draw(|frame| views::render(self.app.state(), frame))?;

            tokio::select! {
                event = self.event_handler.next() => match event? {
                    Event::Tick => self.app.state_mut().tick(),
                    Event::Key(key) => {
                        if self.app.handle_key(key) {
                            break;
                        }
                    }
                    Event::Mouse(mouse) => {
                        let size = self.terminal.size()?;
                        self.app.handle_mouse(mouse, Rect::new(0, 0, size.width, size.height));
                    }
                    Event::Resize(width, height) => {
                        debug!(width, height, "Terminal resized");
                    }
                },
                Some(result) = self.results_rx.recv() => self.apply_result(result),
            }

            self.dispatch_pending();

            if self.app.state().should_quit {
                break;
            }
        }

        Ok(())
    }

    fn apply_result(&mut self, result: TaskResult) {
        let state = self.app.state_mut();
        match result {
            TaskResult::Itinerary { generation, result } => state.apply_itinerary(generation, result),
            TaskResult::LocationInfo {
                generation,
                index,
                result,
            } => state.apply_location_info(generation, index, result),
        }
    }

    /// Spawn every request the last state change queued
    fn dispatch_pending(&mut self) {
        let lang = self.app.state().lang;
        for request in self.app.state_mut().take_pending() {
            spawn_request(&self.services, lang, request, self.results_tx.clone());
        }
    }
}

/// Run one request on the runtime; the task always reports back
pub fn spawn_request(
    services: &Services,
    lang: Language,
    request: PendingRequest,
    tx: mpsc::UnboundedSender<TaskResult>,
) -> tokio::task::JoinHandle<()> {
    match request {
        PendingRequest::Itinerary { generation, prefs } => {
            debug!(generation, "spawn_request: itinerary");
            let planner = Arc::clone(&services.planner);
            tokio::spawn(async move {
                let result = planner.request_itinerary(&prefs, lang).await;
                let _ = tx.send(TaskResult::Itinerary { generation, result });
            })
        }
        PendingRequest::LocationInfo {
            generation,
            index,
            place,
            destination,
        } => {
            debug!(generation, index, %place, "spawn_request: location info");
            let info = Arc::clone(&services.info);
            let coords = services.coords;
            tokio::spawn(async move {
                let result = info.request_location_info(&place, &destination, coords, lang).await;
                let _ = tx.send(TaskResult::LocationInfo {
                    generation,
                    index,
                    result,
                });
            })
        }
    }
}
