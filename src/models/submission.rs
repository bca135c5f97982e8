//! Submission models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::{judge_language_ids, languages};

/// Programming language of a submission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Python,
    Javascript,
    Java,
    Cpp,
}

impl Language {
    /// Get language as the identifier the backend stores
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Python => languages::PYTHON,
            Self::Javascript => languages::JAVASCRIPT,
            Self::Java => languages::JAVA,
            Self::Cpp => languages::CPP,
        }
    }

    /// Parse language from its backend identifier
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            languages::PYTHON => Some(Self::Python),
            languages::JAVASCRIPT => Some(Self::Javascript),
            languages::JAVA => Some(Self::Java),
            languages::CPP => Some(Self::Cpp),
            _ => None,
        }
    }

    /// Numeric id the external judge expects for this language
    pub fn judge_id(&self) -> i32 {
        match self {
            Self::Python => judge_language_ids::PYTHON,
            Self::Javascript => judge_language_ids::JAVASCRIPT,
            Self::Java => judge_language_ids::JAVA,
            Self::Cpp => judge_language_ids::CPP,
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Result of the most recent test run, carried into the next submit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TestStatus {
    #[default]
    Pending,
    Passed,
    Failed,
}

impl TestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Passed => "passed",
            Self::Failed => "failed",
        }
    }
}

impl std::fmt::Display for TestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Status of a recorded submission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionStatus {
    Pending,
    Passed,
    Failed,
    Error,
}

impl SubmissionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Passed => "passed",
            Self::Failed => "failed",
            Self::Error => "error",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(Self::Pending),
            "passed" => Some(Self::Passed),
            "failed" => Some(Self::Failed),
            "error" => Some(Self::Error),
            _ => None,
        }
    }

    /// Whether the success style applies when rendering the status badge
    pub fn is_passed(&self) -> bool {
        matches!(self, Self::Passed)
    }
}

impl std::fmt::Display for SubmissionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Unsubmitted solution being edited in the code editor.
///
/// Consumed and cleared on a successful submit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmissionDraft {
    pub code: String,
    pub language: Language,
    /// Outcome of the last test run against this draft
    pub last_test_status: TestStatus,
}

impl SubmissionDraft {
    pub fn new(code: impl Into<String>, language: Language) -> Self {
        Self {
            code: code.into(),
            language,
            last_test_status: TestStatus::Pending,
        }
    }
}

/// One entry of the submission history. Immutable once created;
/// the history list keeps records newest-first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmissionRecord {
    pub id: i64,
    pub code: String,
    pub status: SubmissionStatus,
    pub created_at: DateTime<Utc>,
}
