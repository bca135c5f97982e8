//! External judge payloads

use serde::{Deserialize, Serialize};

use crate::constants::JUDGE_TERMINAL_STATUS;

/// Normalized response from one judge execution.
///
/// `status_id` is the judge's own enumeration; beyond "at or above 3 means
/// the run finished" its values are opaque to this client.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JudgeResult {
    pub stdout: String,
    pub stderr: String,
    pub compile_output: String,
    pub status_id: i32,
}

impl JudgeResult {
    /// Whether the judge has finished processing this run
    pub fn is_terminal(&self) -> bool {
        self.status_id >= JUDGE_TERMINAL_STATUS
    }
}

/// Body of the judge's creation endpoint
#[derive(Debug, Serialize)]
pub struct JudgeSubmitRequest {
    pub source_code: String,
    pub language_id: i32,
    pub stdin: String,
}

/// Response of the judge's creation endpoint
#[derive(Debug, Deserialize)]
pub struct JudgeSubmitResponse {
    pub token: String,
}

/// Raw status-by-token payload, before normalization
#[derive(Debug, Deserialize)]
pub struct JudgeStatusResponse {
    pub stdout: Option<String>,
    pub stderr: Option<String>,
    pub compile_output: Option<String>,
    pub status: JudgeStatus,
}

#[derive(Debug, Deserialize)]
pub struct JudgeStatus {
    pub id: i32,
}

impl From<JudgeStatusResponse> for JudgeResult {
    fn from(raw: JudgeStatusResponse) -> Self {
        Self {
            stdout: raw.stdout.unwrap_or_default(),
            stderr: raw.stderr.unwrap_or_default(),
            compile_output: raw.compile_output.unwrap_or_default(),
            status_id: raw.status.id,
        }
    }
}
