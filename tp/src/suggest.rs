//! Keyboard navigation over destination suggestions
//!
//! Pure state machine: no rendering, no I/O. The TUI feeds it query edits,
//! key presses and pointer events and reads back what to draw.

use crossterm::event::{KeyCode, KeyEvent};
use tracing::debug;

use crate::places::{PlaceRecord, SuggestionMatcher};

/// Whether the suggestion list is showing
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum NavState {
    #[default]
    Closed,
    /// `active_index` is always `< candidates.len()`, and `candidates` is never empty
    Open { candidates: Vec<String>, active_index: usize },
}

/// What a key press did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavOutcome {
    /// The list was closed; the key belongs to the caller
    Ignored,
    /// The highlight moved or the list closed without a choice
    Handled,
    /// A suggestion was chosen and should become the field value
    Committed(String),
}

/// Autocomplete state for one input field
#[derive(Debug, Clone, Default)]
pub struct SuggestionBox {
    matcher: SuggestionMatcher,
    query: String,
    state: NavState,
}

impl SuggestionBox {
    pub fn new(matcher: SuggestionMatcher) -> Self {
        Self {
            matcher,
            query: String::new(),
            state: NavState::Closed,
        }
    }

    pub fn state(&self) -> &NavState {
        &self.state
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn is_open(&self) -> bool {
        matches!(self.state, NavState::Open { .. })
    }

    /// Candidates currently shown (empty when closed)
    pub fn candidates(&self) -> &[String] {
        match &self.state {
            NavState::Open { candidates, .. } => candidates,
            NavState::Closed => &[],
        }
    }

    pub fn active_index(&self) -> Option<usize> {
        match &self.state {
            NavState::Open { active_index, .. } => Some(*active_index),
            NavState::Closed => None,
        }
    }

    /// Recompute candidates after the query changed
    pub fn set_query(&mut self, query: &str, places: &[PlaceRecord]) {
        self.query = query.to_string();
        let candidates = self.matcher.matches(query, places);
        debug!(%query, count = candidates.len(), "SuggestionBox::set_query: recomputed");
        self.state = if candidates.is_empty() {
            NavState::Closed
        } else {
            NavState::Open {
                candidates,
                active_index: 0,
            }
        };
    }

    /// Apply a navigation key
    pub fn handle_key(&mut self, key: KeyEvent) -> NavOutcome {
        let NavState::Open {
            candidates,
            active_index,
        } = &mut self.state
        else {
            return NavOutcome::Ignored;
        };

        let len = candidates.len();
        match key.code {
            KeyCode::Down => {
                *active_index = (*active_index + 1) % len;
                NavOutcome::Handled
            }
            KeyCode::Up => {
                *active_index = (*active_index + len - 1) % len;
                NavOutcome::Handled
            }
            KeyCode::Enter => {
                let chosen = candidates[*active_index].clone();
                self.commit(chosen)
            }
            KeyCode::Esc => {
                self.close();
                NavOutcome::Handled
            }
            _ => NavOutcome::Ignored,
        }
    }

    /// Pointer moved over candidate `index`
    pub fn hover(&mut self, index: usize) {
        if let NavState::Open {
            candidates,
            active_index,
        } = &mut self.state
            && index < candidates.len()
        {
            *active_index = index;
        }
    }

    /// Pointer clicked candidate `index`
    pub fn select(&mut self, index: usize) -> Option<String> {
        let chosen = self.candidates().get(index).cloned()?;
        match self.commit(chosen) {
            NavOutcome::Committed(value) => Some(value),
            _ => None,
        }
    }

    /// Pointer pressed outside the field and its list
    pub fn click_outside(&mut self) {
        self.close();
    }

    pub fn close(&mut self) {
        self.state = NavState::Closed;
    }

    fn commit(&mut self, chosen: String) -> NavOutcome {
        debug!(%chosen, "SuggestionBox::commit: called");
        self.query = chosen.clone();
        self.state = NavState::Closed;
        NavOutcome::Committed(chosen)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use proptest::prelude::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn places() -> Vec<PlaceRecord> {
        vec![
            PlaceRecord::new("Kyoto", "Japan", None),
            PlaceRecord::new("Tokyo", "Japan", None),
            PlaceRecord::new("Kyoto", "Japan", Some("Kansai")),
        ]
    }

    #[test]
    fn test_query_with_matches_opens_at_zero() {
        let mut sb = SuggestionBox::default();
        sb.set_query("kyo", &places());
        assert!(sb.is_open());
        assert_eq!(sb.candidates().len(), 3);
        assert_eq!(sb.active_index(), Some(0));
    }

    #[test]
    fn test_short_or_unmatched_query_closes() {
        let mut sb = SuggestionBox::default();
        sb.set_query("kyo", &places());
        sb.set_query("k", &places());
        assert_eq!(sb.state(), &NavState::Closed);

        sb.set_query("kyo", &places());
        sb.set_query("zzz", &places());
        assert_eq!(sb.state(), &NavState::Closed);
        assert_eq!(sb.active_index(), None);
    }

    #[test]
    fn test_arrows_wrap_around() {
        let mut sb = SuggestionBox::default();
        sb.set_query("kyo", &places());

        assert_eq!(sb.handle_key(key(KeyCode::Up)), NavOutcome::Handled);
        assert_eq!(sb.active_index(), Some(2));
        sb.handle_key(key(KeyCode::Down));
        assert_eq!(sb.active_index(), Some(0));
        sb.handle_key(key(KeyCode::Down));
        sb.handle_key(key(KeyCode::Down));
        sb.handle_key(key(KeyCode::Down));
        assert_eq!(sb.active_index(), Some(0));
    }

    #[test]
    fn test_enter_commits_active_candidate() {
        let mut sb = SuggestionBox::default();
        sb.set_query("kyo", &places());
        sb.handle_key(key(KeyCode::Down));

        let outcome = sb.handle_key(key(KeyCode::Enter));
        assert_eq!(outcome, NavOutcome::Committed("Tokyo, Japan".to_string()));
        assert_eq!(sb.state(), &NavState::Closed);
        assert_eq!(sb.query(), "Tokyo, Japan");
    }

    #[test]
    fn test_escape_closes_without_commit() {
        let mut sb = SuggestionBox::default();
        sb.set_query("kyo", &places());
        assert_eq!(sb.handle_key(key(KeyCode::Esc)), NavOutcome::Handled);
        assert_eq!(sb.state(), &NavState::Closed);
        assert_eq!(sb.query(), "kyo");
    }

    #[test]
    fn test_keys_ignored_when_closed() {
        let mut sb = SuggestionBox::default();
        assert_eq!(sb.handle_key(key(KeyCode::Enter)), NavOutcome::Ignored);
        assert_eq!(sb.handle_key(key(KeyCode::Down)), NavOutcome::Ignored);
    }

    #[test]
    fn test_other_keys_ignored_when_open() {
        let mut sb = SuggestionBox::default();
        sb.set_query("kyo", &places());
        assert_eq!(sb.handle_key(key(KeyCode::Char('x'))), NavOutcome::Ignored);
        assert!(sb.is_open());
    }

    #[test]
    fn test_hover_and_click() {
        let mut sb = SuggestionBox::default();
        sb.set_query("kyo", &places());
        sb.hover(2);
        assert_eq!(sb.active_index(), Some(2));
        sb.hover(10);
        assert_eq!(sb.active_index(), Some(2));
        assert!(sb.is_open());

        assert_eq!(sb.select(0), Some("Kyoto, Japan".to_string()));
        assert!(!sb.is_open());
    }

    #[test]
    fn test_click_outside_closes_without_commit() {
        let mut sb = SuggestionBox::default();
        sb.set_query("tok", &places());
        sb.click_outside();
        assert!(!sb.is_open());
        assert_eq!(sb.query(), "tok");
    }

    proptest! {
        #[test]
        fn prop_down_presses_cycle_modulo(presses in 0usize..50) {
            let mut sb = SuggestionBox::default();
            sb.set_query("kyo", &places());
            let len = sb.candidates().len();
            for _ in 0..presses {
                sb.handle_key(key(KeyCode::Down));
                let idx = sb.active_index().unwrap();
                prop_assert!(idx < len);
            }
            prop_assert_eq!(sb.active_index(), Some(presses % len));
        }

        #[test]
        fn prop_index_always_in_bounds(keys in proptest::collection::vec(0u8..3, 0..40)) {
            let mut sb = SuggestionBox::default();
            sb.set_query("kyo", &places());
            for k in keys {
                let code = match k {
                    0 => KeyCode::Down,
                    1 => KeyCode::Up,
                    _ => KeyCode::Left,
                };
                sb.handle_key(key(code));
                if let Some(idx) = sb.active_index() {
                    prop_assert!(idx < sb.candidates().len());
                }
            }
        }
    }
}
