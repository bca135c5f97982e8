//! Rendering seam
//!
//! The orchestration core never touches a DOM; it emits rendering calls
//! through these traits and a thin view layer turns them into markup. This
//! keeps every contract in this crate testable with a mock view.

use crate::models::{GlobalStats, SubmissionStatus, TestRunReport};

/// Data for one optimistically rendered history card.
///
/// `escaped_code` has already been HTML-escaped; the view must interpolate
/// it as-is without a second escaping pass.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryCard {
    pub id: i64,
    /// Display number ("Submission #N")
    pub number: i64,
    pub escaped_code: String,
    pub status: SubmissionStatus,
}

/// View operations of the challenge-details page
#[cfg_attr(test, mockall::automock)]
pub trait ChallengeView: Send {
    /// Disable or re-enable the submit trigger, toggling the busy
    /// indicator and the "Submitting..." label with it
    fn set_submit_busy(&mut self, busy: bool);

    /// Render an inline submit error in the error style
    fn show_submit_error(&mut self, message: &str);

    /// Render the inline submit result line
    fn show_submit_result(&mut self, number: i64, status: SubmissionStatus);

    /// Drop the "no submissions yet" placeholder if present
    fn remove_empty_placeholder(&mut self);

    /// Insert a new card at the top of the history list, code hidden
    fn prepend_history_card(&mut self, card: &HistoryCard);

    /// Clear the code editor after a successful submit
    fn clear_editor(&mut self);

    /// Show or hide a history entry's code block, updating its control label
    fn set_code_visibility(&mut self, submission_id: i64, visible: bool);

    /// Show or hide the test-run busy indicator
    fn set_test_busy(&mut self, busy: bool);

    /// Render the outcome of a full test run
    fn show_test_report(&mut self, report: &TestRunReport);

    /// Render an inline test-run error in the error style
    fn show_test_error(&mut self, message: &str);
}

/// Consumer of dashboard stats refreshes
#[cfg_attr(test, mockall::automock)]
pub trait StatsSink: Send {
    /// Re-render the fragments affected by a changed payload
    fn apply(&mut self, stats: &GlobalStats);
}
