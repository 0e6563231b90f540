//! TUI application - input handling
//!
//! The App owns the AppState and turns key and mouse events into state
//! changes. It does not render and it does not perform I/O beyond the CSV
//! export the user asks for.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::{Position, Rect};
use tracing::{debug, warn};

use super::state::{AppState, FormField, Screen};
use super::views;
use crate::suggest::NavOutcome;

/// TUI application
#[derive(Debug)]
pub struct App {
    state: AppState,
}

impl App {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut AppState {
        &mut self.state
    }

    /// Handle a key event
    ///
    /// Returns true if the application should exit.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return true;
        }

        self.state.notice = None;
        match self.state.screen {
            Screen::Form => self.handle_form_key(key),
            Screen::Itinerary => self.handle_itinerary_key(key),
        }
        self.state.should_quit
    }

    fn handle_form_key(&mut self, key: KeyEvent) {
        let focus = self.state.form.focus;

        // An open suggestion list gets the first look at navigation keys
        if focus == FormField::Destination {
            match self.state.suggestions.handle_key(key) {
                NavOutcome::Committed(label) => {
                    self.state.commit_destination(label);
                    return;
                }
                NavOutcome::Handled => return,
                NavOutcome::Ignored => {}
            }
        }

        match (key.code, key.modifiers) {
            (KeyCode::Char('s'), m) if m.contains(KeyModifiers::CONTROL) => {
                self.state.submit();
            }
            (KeyCode::Esc, _) => {
                self.state.should_quit = true;
            }
            (KeyCode::Tab, _) | (KeyCode::Down, _) => self.move_focus(true),
            (KeyCode::BackTab, _) | (KeyCode::Up, _) => self.move_focus(false),
            (KeyCode::Enter, _) => match focus {
                FormField::Submit => {
                    self.state.submit();
                }
                FormField::Interests => self.state.form.toggle_current_interest(),
                _ => self.move_focus(true),
            },
            (KeyCode::Left, _) if focus == FormField::Interests => self.state.form.move_interest_cursor(-1),
            (KeyCode::Right, _) if focus == FormField::Interests => self.state.form.move_interest_cursor(1),
            (KeyCode::Char(' '), _) if focus == FormField::Interests => self.state.form.toggle_current_interest(),
            (KeyCode::Char(c), m) if !m.contains(KeyModifiers::CONTROL) && focus.is_text() => {
                if let Some(buffer) = self.state.form.input_mut(focus) {
                    buffer.push(c);
                }
                self.after_edit(focus);
            }
            (KeyCode::Backspace, _) if focus.is_text() => {
                if let Some(buffer) = self.state.form.input_mut(focus) {
                    buffer.pop();
                }
                self.after_edit(focus);
            }
            _ => {}
        }
    }

    fn move_focus(&mut self, forward: bool) {
        self.state.suggestions.close();
        if forward {
            self.state.form.focus_next();
        } else {
            self.state.form.focus_prev();
        }
    }

    fn after_edit(&mut self, field: FormField) {
        if field == FormField::Destination {
            self.state.destination_edited();
        }
    }

    fn handle_itinerary_key(&mut self, key: KeyEvent) {
        let selected = self.state.itinerary.as_ref().map(|v| v.selected).unwrap_or(0);

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.state.should_quit = true,
            KeyCode::Down | KeyCode::Char('j') => {
                if let Some(view) = self.state.itinerary.as_mut() {
                    view.select_next();
                }
            }
            KeyCode::Up | KeyCode::Char('k') => {
                if let Some(view) = self.state.itinerary.as_mut() {
                    view.select_prev();
                }
            }
            KeyCode::Enter | KeyCode::Char('i') => self.state.toggle_panel(selected),
            KeyCode::Char('m') => {
                let url = self
                    .state
                    .itinerary
                    .as_ref()
                    .and_then(|v| v.activity(selected))
                    .map(|a| a.location.map_url());
                if let Some(url) = url {
                    let label = self.state.messages().view_on_map;
                    self.state.set_notice(format!("{}: {}", label, url));
                }
            }
            KeyCode::Char('e') => match self.state.export_csv(std::path::Path::new(".")) {
                Ok(path) => {
                    debug!(path = %path.display(), "Exported itinerary CSV");
                    self.state.set_notice(format!("Saved {}", path.display()));
                }
                Err(e) => {
                    warn!(error = %e, "CSV export failed");
                    self.state.set_error(format!("Export failed: {}", e));
                }
            },
            KeyCode::Char('n') => self.state.reset(),
            _ => {}
        }
    }

    /// Handle a mouse event against the frame `area`
    pub fn handle_mouse(&mut self, mouse: MouseEvent, area: Rect) {
        if self.state.screen != Screen::Form {
            return;
        }

        let layout = views::form_layout(&self.state, area);
        let pos = Position::new(mouse.column, mouse.row);
        let row_in_dropdown = layout
            .dropdown
            .filter(|d| d.contains(pos))
            .and_then(|d| (pos.y - d.y).checked_sub(1))
            .map(usize::from);

        match mouse.kind {
            MouseEventKind::Moved => {
                if let Some(row) = row_in_dropdown {
                    self.state.suggestions.hover(row);
                }
            }
            MouseEventKind::Down(MouseButton::Left) => {
                if let Some(row) = row_in_dropdown {
                    if let Some(label) = self.state.suggestions.select(row) {
                        self.state.commit_destination(label);
                    }
                    return;
                }

                let clicked = layout.fields.iter().find(|(_, rect)| rect.contains(pos)).map(|(f, _)| *f);
                if clicked != Some(FormField::Destination) {
                    self.state.suggestions.click_outside();
                }
                if let Some(field) = clicked {
                    self.state.form.focus = field;
                    if field == FormField::Submit {
                        self.state.submit();
                    }
                }
            }
            _ => {}
        }
    }
}
