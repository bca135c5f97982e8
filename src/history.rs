//! Submission history accordion
//!
//! Tracks which history entry has its code block expanded. At most one
//! entry is open at a time: opening one closes the rest, and re-clicking
//! an open entry closes it. No network calls are involved.

use crate::view::ChallengeView;

/// Visibility changes produced by one toggle click
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryDelta {
    /// Entry whose code block should be hidden, if any
    pub close: Option<i64>,
    /// Entry whose code block should be shown, if any
    pub open: Option<i64>,
}

/// Expand/collapse state of the submission history list
#[derive(Debug, Default)]
pub struct HistoryPanel {
    open: Option<i64>,
}

impl HistoryPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// The currently expanded entry, if any
    pub fn open_entry(&self) -> Option<i64> {
        self.open
    }

    /// Handle a click on an entry's "view code" control
    pub fn toggle(&mut self, submission_id: i64) -> HistoryDelta {
        match self.open.take() {
            Some(open) if open == submission_id => HistoryDelta {
                close: Some(open),
                open: None,
            },
            other => {
                self.open = Some(submission_id);
                HistoryDelta {
                    close: other,
                    open: Some(submission_id),
                }
            }
        }
    }

    /// Toggle and emit the resulting visibility changes to the view
    pub fn toggle_with_view(&mut self, submission_id: i64, view: &mut dyn ChallengeView) {
        let delta = self.toggle(submission_id);
        if let Some(id) = delta.close {
            view.set_code_visibility(id, false);
        }
        if let Some(id) = delta.open {
            view.set_code_visibility(id, true);
        }
    }
}
