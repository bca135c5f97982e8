//! Domain models and API payload types

pub mod comment;
pub mod judge;
pub mod stats;
pub mod submission;
pub mod test_run;

pub use comment::{Comment, CommentPage};
pub use judge::JudgeResult;
pub use stats::{ClassroomStats, GlobalStats, LeaderboardEntry, MentorStats, UserStats};
pub use submission::{Language, SubmissionDraft, SubmissionRecord, SubmissionStatus, TestStatus};
pub use test_run::{OutcomeKind, TestCase, TestOutcome, TestRunReport};
