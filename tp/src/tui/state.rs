//! TUI application state
//!
//! Pure data structures for the TUI. No rendering and no I/O here; network
//! work is queued as [`PendingRequest`]s for the runner to spawn.

use std::path::{Path, PathBuf};

use eyre::{Context, Result};
use tracing::debug;

use crate::domain::{Activity, INTEREST_OPTIONS, Itinerary, Language, TripPreferences};
use crate::export;
use crate::locale::Messages;
use crate::places::{PlaceRecord, SuggestionMatcher};
use crate::planner::{InfoPanel, ItineraryGenerationError, LocationInfo, LocationInfoError, PanelAction};
use crate::suggest::SuggestionBox;
use crate::validation::{PreferencesValidator, ValidationErrors};

/// Which screen is displayed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    Form,
    Itinerary,
}

/// Focusable elements of the preferences form, in tab order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormField {
    #[default]
    Destination,
    Duration,
    Budget,
    Interests,
    OtherInterest,
    Restrictions,
    Submit,
}

impl FormField {
    const ORDER: [FormField; 7] = [
        Self::Destination,
        Self::Duration,
        Self::Budget,
        Self::Interests,
        Self::OtherInterest,
        Self::Restrictions,
        Self::Submit,
    ];

    /// Fields shown for the current interest selection
    pub fn visible(wants_other: bool) -> Vec<FormField> {
        Self::ORDER
            .into_iter()
            .filter(|f| wants_other || *f != Self::OtherInterest)
            .collect()
    }

    pub fn next(self, wants_other: bool) -> Self {
        let fields = Self::visible(wants_other);
        let i = fields.iter().position(|f| *f == self).unwrap_or(0);
        fields[(i + 1) % fields.len()]
    }

    pub fn prev(self, wants_other: bool) -> Self {
        let fields = Self::visible(wants_other);
        let i = fields.iter().position(|f| *f == self).unwrap_or(0);
        fields[(i + fields.len() - 1) % fields.len()]
    }

    pub fn is_text(self) -> bool {
        !matches!(self, Self::Interests | Self::Submit)
    }
}

/// Raw form input
#[derive(Debug, Clone)]
pub struct FormState {
    pub prefs: TripPreferences,
    /// Duration as typed; parsed on submit
    pub duration_input: String,
    pub focus: FormField,
    /// Highlighted interest tag
    pub interest_cursor: usize,
}

impl Default for FormState {
    fn default() -> Self {
        Self::new()
    }
}

impl FormState {
    pub fn new() -> Self {
        let prefs = TripPreferences::default();
        Self {
            duration_input: prefs.duration.map(|d| d.to_string()).unwrap_or_default(),
            prefs,
            focus: FormField::Destination,
            interest_cursor: 0,
        }
    }

    /// Text buffer behind a text field
    pub fn input(&self, field: FormField) -> &str {
        match field {
            FormField::Destination => &self.prefs.destination,
            FormField::Duration => &self.duration_input,
            FormField::Budget => &self.prefs.budget,
            FormField::OtherInterest => self.prefs.other_interest.as_deref().unwrap_or(""),
            FormField::Restrictions => &self.prefs.restrictions,
            FormField::Interests | FormField::Submit => "",
        }
    }

    pub fn input_mut(&mut self, field: FormField) -> Option<&mut String> {
        match field {
            FormField::Destination => Some(&mut self.prefs.destination),
            FormField::Duration => Some(&mut self.duration_input),
            FormField::Budget => Some(&mut self.prefs.budget),
            FormField::OtherInterest => Some(self.prefs.other_interest.get_or_insert_with(String::new)),
            FormField::Restrictions => Some(&mut self.prefs.restrictions),
            FormField::Interests | FormField::Submit => None,
        }
    }

    pub fn focus_next(&mut self) {
        self.focus = self.focus.next(self.prefs.wants_other());
    }

    pub fn focus_prev(&mut self) {
        self.focus = self.focus.prev(self.prefs.wants_other());
    }

    pub fn move_interest_cursor(&mut self, delta: isize) {
        let len = INTEREST_OPTIONS.len() as isize;
        self.interest_cursor = (self.interest_cursor as isize + delta).rem_euclid(len) as usize;
    }

    /// Toggle the highlighted interest tag
    pub fn toggle_current_interest(&mut self) {
        self.prefs.toggle_interest(INTEREST_OPTIONS[self.interest_cursor]);
        if self.focus == FormField::OtherInterest && !self.prefs.wants_other() {
            self.focus = FormField::Interests;
        }
    }

    /// Preferences as they would be submitted
    pub fn to_preferences(&self) -> TripPreferences {
        let mut prefs = self.prefs.clone();
        prefs.duration = self.duration_input.trim().parse().ok();
        prefs
    }
}

/// A generated itinerary and its per-activity info panels
#[derive(Debug, Clone)]
pub struct ItineraryView {
    pub destination: String,
    pub itinerary: Itinerary,
    /// One panel per activity, in display order
    pub panels: Vec<InfoPanel>,
    pub selected: usize,
}

impl ItineraryView {
    pub fn new(destination: impl Into<String>, itinerary: Itinerary) -> Self {
        let panels = vec![InfoPanel::new(); itinerary.activity_count()];
        Self {
            destination: destination.into(),
            itinerary,
            panels,
            selected: 0,
        }
    }

    pub fn activity(&self, index: usize) -> Option<&Activity> {
        self.itinerary.activities().nth(index).map(|(_, a)| a)
    }

    pub fn select_next(&mut self) {
        if !self.panels.is_empty() {
            self.selected = (self.selected + 1).min(self.panels.len() - 1);
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }
}

/// Network work queued by a state change
#[derive(Debug, Clone, PartialEq)]
pub enum PendingRequest {
    Itinerary {
        generation: u64,
        prefs: TripPreferences,
    },
    LocationInfo {
        generation: u64,
        index: usize,
        place: String,
        destination: String,
    },
}

/// Complete TUI state
#[derive(Debug)]
pub struct AppState {
    pub lang: Language,
    pub screen: Screen,
    pub form: FormState,
    pub suggestions: SuggestionBox,
    pub places: Vec<PlaceRecord>,
    pub validator: PreferencesValidator,
    /// Field errors from the last submit attempt
    pub errors: ValidationErrors,
    /// An itinerary request is in flight
    pub loading: bool,
    /// Bumped for every submit and reset; results tagged with an older
    /// generation are dropped
    pub generation: u64,
    pub itinerary: Option<ItineraryView>,
    pub error: Option<String>,
    pub notice: Option<String>,
    pub pending: Vec<PendingRequest>,
    pub should_quit: bool,
    /// Animation counter for the loading indicator
    pub spinner: usize,
}

impl AppState {
    pub fn new(
        lang: Language,
        matcher: SuggestionMatcher,
        validator: PreferencesValidator,
        places: Vec<PlaceRecord>,
    ) -> Self {
        Self {
            lang,
            screen: Screen::Form,
            form: FormState::new(),
            suggestions: SuggestionBox::new(matcher),
            places,
            validator,
            errors: ValidationErrors::default(),
            loading: false,
            generation: 0,
            itinerary: None,
            error: None,
            notice: None,
            pending: Vec::new(),
            should_quit: false,
            spinner: 0,
        }
    }

    pub fn messages(&self) -> &'static Messages {
        Messages::for_language(self.lang)
    }

    pub fn set_error(&mut self, msg: impl Into<String>) {
        self.error = Some(msg.into());
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    pub fn set_notice(&mut self, msg: impl Into<String>) {
        self.notice = Some(msg.into());
    }

    pub fn tick(&mut self) {
        if self.loading || self.any_panel_loading() {
            self.spinner = self.spinner.wrapping_add(1);
        }
    }

    fn any_panel_loading(&self) -> bool {
        self.itinerary
            .as_ref()
            .is_some_and(|v| v.panels.iter().any(InfoPanel::is_loading))
    }

    /// Destination text changed; refresh suggestions
    pub fn destination_edited(&mut self) {
        let query = self.form.prefs.destination.clone();
        self.suggestions.set_query(&query, &self.places);
    }

    /// Put a chosen suggestion into the destination field
    pub fn commit_destination(&mut self, label: String) {
        debug!(%label, "commit_destination: called");
        self.form.prefs.destination = label;
    }

    /// Validate the form and queue an itinerary request
    ///
    /// Returns false when nothing was queued.
    pub fn submit(&mut self) -> bool {
        if self.loading {
            debug!("submit: ignored while loading");
            return false;
        }

        let prefs = self.form.to_preferences();
        self.errors = self.validator.validate(&prefs);
        if !self.errors.is_empty() {
            debug!(error_count = self.errors.len(), "submit: validation failed");
            return false;
        }

        self.suggestions.close();
        self.clear_error();
        self.loading = true;
        self.generation += 1;
        self.pending.push(PendingRequest::Itinerary {
            generation: self.generation,
            prefs,
        });
        true
    }

    /// Resolve an itinerary request
    pub fn apply_itinerary(&mut self, generation: u64, result: Result<Itinerary, ItineraryGenerationError>) {
        if generation != self.generation {
            debug!(generation, current = self.generation, "apply_itinerary: stale result dropped");
            return;
        }
        self.loading = false;

        match result {
            Ok(itinerary) => {
                let destination = self.form.prefs.destination.trim().to_string();
                self.itinerary = Some(ItineraryView::new(destination, itinerary));
                self.screen = Screen::Itinerary;
            }
            Err(e) => {
                self.set_error(e.user_message(self.lang));
            }
        }
    }

    /// Open or close the info panel of activity `index`
    pub fn toggle_panel(&mut self, index: usize) {
        let generation = self.generation;
        let Some(view) = self.itinerary.as_mut() else {
            return;
        };
        let Some(place) = view.activity(index).map(|a| a.location.name.clone()) else {
            return;
        };
        let destination = view.destination.clone();
        let Some(panel) = view.panels.get_mut(index) else {
            return;
        };

        if panel.toggle() == PanelAction::Fetch {
            self.pending.push(PendingRequest::LocationInfo {
                generation,
                index,
                place,
                destination,
            });
        }
    }

    /// Resolve a place info request
    pub fn apply_location_info(
        &mut self,
        generation: u64,
        index: usize,
        result: Result<LocationInfo, LocationInfoError>,
    ) {
        if generation != self.generation {
            debug!(generation, index, "apply_location_info: stale result dropped");
            return;
        }
        let lang = self.lang;
        if let Some(panel) = self.itinerary.as_mut().and_then(|v| v.panels.get_mut(index)) {
            panel.finish(result, lang);
        }
    }

    /// Discard the itinerary and start over with an empty form
    pub fn reset(&mut self) {
        debug!("reset: called");
        self.generation += 1;
        self.itinerary = None;
        self.screen = Screen::Form;
        self.form = FormState::new();
        self.errors = ValidationErrors::default();
        self.suggestions.close();
        self.clear_error();
        self.notice = None;
    }

    /// Write the current itinerary as CSV into `dir`
    pub fn export_csv(&self, dir: &Path) -> Result<PathBuf> {
        let view = self
            .itinerary
            .as_ref()
            .ok_or_else(|| eyre::eyre!("No itinerary to export"))?;
        let csv = export::to_csv(&view.itinerary, self.lang)?;
        let path = dir.join(export::csv_file_name(&view.destination));
        std::fs::write(&path, csv).context(format!("Failed to write {}", path.display()))?;
        Ok(path)
    }

    /// Take all queued requests
    pub fn take_pending(&mut self) -> Vec<PendingRequest> {
        std::mem::take(&mut self.pending)
    }
}
