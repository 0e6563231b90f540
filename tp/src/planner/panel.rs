//! Per-activity info panel
//!
//! Each activity owns one panel. Opening a panel that has nothing to show
//! asks the caller to fetch; closing a loaded panel discards the answer so
//! the next open fetches fresh data.

use tracing::debug;

use super::{LocationInfo, LocationInfoError};
use crate::domain::{GroundingChunk, Language};

#[derive(Debug, Clone, PartialEq, Default)]
pub enum PanelState {
    #[default]
    Idle,
    Loading,
    Loaded {
        text: String,
        chunks: Vec<GroundingChunk>,
    },
    Failed(String),
}

/// What the caller must do after a toggle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelAction {
    /// Start a location info request for this panel
    Fetch,
    None,
}

#[derive(Debug, Clone, Default)]
pub struct InfoPanel {
    state: PanelState,
}

impl InfoPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &PanelState {
        &self.state
    }

    pub fn is_open(&self) -> bool {
        !matches!(self.state, PanelState::Idle)
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, PanelState::Loading)
    }

    /// Open or close the panel
    ///
    /// Idle and Failed move to Loading and request a fetch. Loaded closes
    /// back to Idle. A toggle while Loading is ignored.
    pub fn toggle(&mut self) -> PanelAction {
        let (next, action) = match &self.state {
            PanelState::Idle | PanelState::Failed(_) => (PanelState::Loading, PanelAction::Fetch),
            PanelState::Loaded { .. } => (PanelState::Idle, PanelAction::None),
            PanelState::Loading => return PanelAction::None,
        };
        debug!(from = ?self.state, to = ?next, "InfoPanel::toggle: called");
        self.state = next;
        action
    }

    /// Resolve a pending fetch
    ///
    /// Results that arrive when the panel is not loading are dropped.
    pub fn finish(&mut self, result: Result<LocationInfo, LocationInfoError>, lang: Language) {
        if !self.is_loading() {
            debug!("InfoPanel::finish: stale result dropped");
            return;
        }
        self.state = match result {
            Ok(info) => PanelState::Loaded {
                text: info.text,
                chunks: info.chunks,
            },
            Err(e) => PanelState::Failed(e.user_message(lang).to_string()),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locale::Messages;

    fn loaded() -> Result<LocationInfo, LocationInfoError> {
        Ok(LocationInfo {
            text: "Open daily".to_string(),
            chunks: vec![],
        })
    }

    #[test]
    fn test_open_fetches() {
        let mut panel = InfoPanel::new();
        assert_eq!(panel.toggle(), PanelAction::Fetch);
        assert_eq!(panel.state(), &PanelState::Loading);
    }

    #[test]
    fn test_toggle_while_loading_ignored() {
        let mut panel = InfoPanel::new();
        panel.toggle();
        assert_eq!(panel.toggle(), PanelAction::None);
        assert!(panel.is_loading());
    }

    #[test]
    fn test_open_close_reopen_fetches_twice() {
        let mut panel = InfoPanel::new();
        let mut fetches = 0;

        if panel.toggle() == PanelAction::Fetch {
            fetches += 1;
        }
        panel.finish(loaded(), Language::En);
        assert!(matches!(panel.state(), PanelState::Loaded { .. }));

        assert_eq!(panel.toggle(), PanelAction::None);
        assert_eq!(panel.state(), &PanelState::Idle);

        if panel.toggle() == PanelAction::Fetch {
            fetches += 1;
        }
        assert_eq!(fetches, 2);
    }

    #[test]
    fn test_failure_then_retry() {
        let mut panel = InfoPanel::new();
        panel.toggle();
        panel.finish(Err(LocationInfoError::EmptyResponse), Language::En);
        assert_eq!(
            panel.state(),
            &PanelState::Failed(Messages::for_language(Language::En).fetch_error.to_string())
        );
        assert!(panel.is_open());

        assert_eq!(panel.toggle(), PanelAction::Fetch);
        assert!(panel.is_loading());
    }

    #[test]
    fn test_finish_when_not_loading_is_dropped() {
        let mut panel = InfoPanel::new();
        panel.finish(loaded(), Language::En);
        assert_eq!(panel.state(), &PanelState::Idle);
    }
}
