//! Typed client for the CodeQuest backend
//!
//! One thin data-access method per endpoint; orchestration lives in the
//! submission controller and test runner. Every state-mutating request
//! carries the anti-forgery token plus the programmatic-request marker so
//! the backend can tell it from a full-page form post.

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Response, StatusCode};
use serde::{Deserialize, Serialize};

use crate::{
    config::BackendConfig,
    constants::{CSRF_HEADER, REQUESTED_WITH_HEADER, REQUESTED_WITH_VALUE},
    error::{ClientError, ClientResult},
    models::{
        ClassroomStats, Comment, CommentPage, GlobalStats, Language, OutcomeKind,
        SubmissionStatus, TestOutcome, TestRunReport, TestStatus,
    },
    models::stats::ClassroomSummary,
};

/// Submission endpoint seam, mockable in tests
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SubmissionApi: Send + Sync {
    /// POST the draft to the challenge's submit endpoint
    async fn submit_solution(
        &self,
        code: &str,
        language: Language,
        status: TestStatus,
    ) -> ClientResult<SubmitAck>;
}

/// Server-side batch test endpoint seam, mockable in tests
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BatchTestApi: Send + Sync {
    /// Run all of the challenge's test cases in one server round trip
    async fn run_tests(&self, code: &str) -> ClientResult<TestRunReport>;
}

/// Stats endpoint seam used by the background poller
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StatsApi: Send + Sync {
    async fn global_stats(&self) -> ClientResult<GlobalStats>;
}

/// Acknowledgement of an accepted submission.
///
/// The backend answers in one of two shapes: the current nested
/// `{submission: {...}}` envelope or the legacy flat
/// `{status, submission_id, message}`. Both normalize to this.
#[derive(Debug, Clone)]
pub struct SubmitAck {
    /// Server-assigned id; authoritative when present
    pub id: Option<i64>,
    pub status: SubmissionStatus,
    pub message: Option<String>,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}

#[derive(Debug, Deserialize)]
struct SubmitEnvelope {
    submission: Option<SubmissionPayload>,
    status: Option<String>,
    submission_id: Option<i64>,
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SubmissionPayload {
    id: i64,
    status: String,
    message: Option<String>,
    created_at: Option<chrono::DateTime<chrono::Utc>>,
}

#[derive(Debug, Serialize)]
struct SubmitRequest<'a> {
    code: &'a str,
    language: &'a str,
    status: &'a str,
}

#[derive(Debug, Serialize)]
struct CommentRequest<'a> {
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct CommentEnvelope {
    comment: Comment,
}

#[derive(Debug, Deserialize)]
struct MentorClassroomsEnvelope {
    #[serde(default)]
    classrooms: Vec<ClassroomSummary>,
}

/// Batch run-tests response, one result per test case in challenge order
#[derive(Debug, Deserialize)]
struct BatchRunResponse {
    status: String,
    results: Vec<BatchCaseResult>,
}

#[derive(Debug, Deserialize)]
struct BatchCaseResult {
    #[allow(dead_code)]
    input: String,
    #[allow(dead_code)]
    expected: String,
    /// Older deployments name this field `output`
    #[serde(alias = "output", default)]
    user_output: String,
    passed: bool,
}

/// HTTP client bound to one backend deployment and one challenge
pub struct BackendClient {
    http: reqwest::Client,
    base_url: String,
    csrf_token: String,
    challenge_slug: String,
}

impl BackendClient {
    pub fn new(config: &BackendConfig) -> ClientResult<Self> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| ClientError::Transport(e.to_string()))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            csrf_token: config.csrf_token.clone(),
            challenge_slug: config.challenge_slug.clone(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Fetch one page of the challenge's comments, newest-first
    pub async fn comments(&self, page: u32) -> ClientResult<CommentPage> {
        let url = self.url(&format!(
            "/api/challenge/{}/comments/?page={}",
            self.challenge_slug, page
        ));
        let response = self.http.get(url).send().await?;
        read_json(response).await
    }

    /// Post a comment on the challenge
    pub async fn post_comment(&self, content: &str) -> ClientResult<Comment> {
        let url = self.url(&format!("/api/challenge/{}/comment/", self.challenge_slug));
        let response = self
            .http
            .post(url)
            .header(CSRF_HEADER, &self.csrf_token)
            .header(REQUESTED_WITH_HEADER, REQUESTED_WITH_VALUE)
            .json(&CommentRequest { content })
            .send()
            .await?;
        let envelope: CommentEnvelope = read_json(response).await?;
        Ok(envelope.comment)
    }

    /// Fetch aggregate stats for one classroom
    pub async fn classroom(&self, classroom_id: i64) -> ClientResult<ClassroomStats> {
        let url = self.url(&format!("/api/classroom/{}/", classroom_id));
        let response = self.http.get(url).send().await?;
        read_json(response).await
    }

    /// Fetch the classrooms this user mentors
    pub async fn mentor_classrooms(&self) -> ClientResult<Vec<ClassroomSummary>> {
        let url = self.url("/api/mentor-classrooms/");
        let response = self.http.get(url).send().await?;
        let envelope: MentorClassroomsEnvelope = read_json(response).await?;
        Ok(envelope.classrooms)
    }
}

#[async_trait]
impl SubmissionApi for BackendClient {
    async fn submit_solution(
        &self,
        code: &str,
        language: Language,
        status: TestStatus,
    ) -> ClientResult<SubmitAck> {
        let url = self.url(&format!("/api/challenge/{}/submit/", self.challenge_slug));
        let response = self
            .http
            .post(url)
            .header(CSRF_HEADER, &self.csrf_token)
            .header(REQUESTED_WITH_HEADER, REQUESTED_WITH_VALUE)
            .json(&SubmitRequest {
                code,
                language: language.as_str(),
                status: status.as_str(),
            })
            .send()
            .await?;

        let envelope: SubmitEnvelope = read_json(response).await?;
        parse_submit_ack(envelope)
    }
}

#[async_trait]
impl BatchTestApi for BackendClient {
    async fn run_tests(&self, code: &str) -> ClientResult<TestRunReport> {
        let url = self.url(&format!("/challenge/{}/run-tests/", self.challenge_slug));
        let form = [("code", code)];
        let response = self
            .http
            .post(url)
            .header(CSRF_HEADER, &self.csrf_token)
            .header(REQUESTED_WITH_HEADER, REQUESTED_WITH_VALUE)
            .form(&form)
            .send()
            .await?;

        let batch: BatchRunResponse = read_json(response).await?;
        Ok(batch_into_report(batch))
    }
}

#[async_trait]
impl StatsApi for BackendClient {
    async fn global_stats(&self) -> ClientResult<GlobalStats> {
        let url = self.url("/api/global-stats/");
        let response = self.http.get(url).send().await?;
        read_json(response).await
    }
}

/// Error payload shape shared by every endpoint
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

/// Check status and content type, then deserialize the body.
///
/// Non-2xx responses surface the server's `{error}` message verbatim when
/// there is one; a non-JSON body is a format error regardless of status.
async fn read_json<T: serde::de::DeserializeOwned>(response: Response) -> ClientResult<T> {
    let status = response.status();
    let is_json = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.contains("application/json"))
        .unwrap_or(false);

    if !is_json {
        return Err(ClientError::ResponseFormat(format!(
            "non-JSON response from server (status {})",
            status.as_u16()
        )));
    }

    if !status.is_success() {
        let message = response
            .json::<ErrorBody>()
            .await
            .map(|b| b.error)
            .unwrap_or_else(|_| default_error_message(status));
        return Err(ClientError::Backend {
            status: status.as_u16(),
            message,
        });
    }

    let body = response.text().await?;
    serde_json::from_str(&body)
        .map_err(|e| ClientError::ResponseFormat(format!("{} in body: {}", e, truncate(&body))))
}

fn default_error_message(status: StatusCode) -> String {
    format!("Request failed with status {}", status.as_u16())
}

fn truncate(body: &str) -> &str {
    if body.len() <= 200 {
        return body;
    }
    // Clamp down to a char boundary; byte 200 may fall inside a multibyte char
    let mut end = 200;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    &body[..end]
}

fn parse_submit_ack(envelope: SubmitEnvelope) -> ClientResult<SubmitAck> {
    // Nested shape wins when both are present
    if let Some(submission) = envelope.submission {
        let status = SubmissionStatus::parse(&submission.status).ok_or_else(|| {
            ClientError::ResponseFormat(format!("unknown submission status {:?}", submission.status))
        })?;
        return Ok(SubmitAck {
            id: Some(submission.id),
            status,
            message: submission.message,
            created_at: submission.created_at,
        });
    }

    let status_str = envelope
        .status
        .ok_or_else(|| ClientError::ResponseFormat("submit response missing status".to_string()))?;
    let status = SubmissionStatus::parse(&status_str).ok_or_else(|| {
        ClientError::ResponseFormat(format!("unknown submission status {:?}", status_str))
    })?;

    Ok(SubmitAck {
        id: envelope.submission_id,
        status,
        message: envelope.message,
        created_at: None,
    })
}

fn batch_into_report(batch: BatchRunResponse) -> TestRunReport {
    let outcomes = batch
        .results
        .into_iter()
        .enumerate()
        .map(|(index, case)| TestOutcome {
            test_index: index,
            passed: case.passed,
            actual_output: case.user_output,
            kind: OutcomeKind::Ok,
        })
        .collect();

    // The server's overall verdict is authoritative for batch runs
    let overall = match batch.status.as_str() {
        "passed" => TestStatus::Passed,
        _ => TestStatus::Failed,
    };

    TestRunReport { overall, outcomes }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nested_submit_shape_is_preferred() {
        let envelope: SubmitEnvelope = serde_json::from_str(
            r#"{"submission": {"id": 17, "status": "passed", "message": "Submission received.",
                "code": "print(42)"},
               "status": "failed", "submission_id": 3}"#,
        )
        .unwrap();
        let ack = parse_submit_ack(envelope).unwrap();
        assert_eq!(ack.id, Some(17));
        assert_eq!(ack.status, SubmissionStatus::Passed);
    }

    #[test]
    fn legacy_flat_submit_shape_parses() {
        let envelope: SubmitEnvelope =
            serde_json::from_str(r#"{"status": "failed", "submission_id": 3}"#).unwrap();
        let ack = parse_submit_ack(envelope).unwrap();
        assert_eq!(ack.id, Some(3));
        assert_eq!(ack.status, SubmissionStatus::Failed);
        assert!(ack.created_at.is_none());
    }

    #[test]
    fn legacy_shape_without_id_still_parses() {
        let envelope: SubmitEnvelope = serde_json::from_str(r#"{"status": "passed"}"#).unwrap();
        let ack = parse_submit_ack(envelope).unwrap();
        assert_eq!(ack.id, None);
    }

    #[test]
    fn missing_status_everywhere_is_a_format_error() {
        let envelope: SubmitEnvelope = serde_json::from_str(r#"{"message": "ok"}"#).unwrap();
        assert!(matches!(
            parse_submit_ack(envelope),
            Err(ClientError::ResponseFormat(_))
        ));
    }

    #[test]
    fn body_snippets_truncate_on_a_char_boundary() {
        let mut body = "a".repeat(199);
        body.push('é'); // bytes 199..201
        body.push_str(&"b".repeat(40));

        let cut = truncate(&body);
        assert_eq!(cut.len(), 199);
        assert!(cut.chars().all(|c| c == 'a'));

        assert_eq!(truncate("short"), "short");
    }

    #[test]
    fn batch_results_accept_both_output_field_names() {
        let batch: BatchRunResponse = serde_json::from_str(
            r#"{"status": "failed",
                "results": [
                    {"input": "7", "expected": "7", "user_output": "7", "passed": true},
                    {"input": "9", "expected": "9", "output": "8", "passed": false}
                ]}"#,
        )
        .unwrap();
        let report = batch_into_report(batch);
        assert_eq!(report.overall, TestStatus::Failed);
        assert_eq!(report.outcomes.len(), 2);
        assert_eq!(report.outcomes[1].actual_output, "8");
        assert!(!report.outcomes[1].passed);
    }
}
