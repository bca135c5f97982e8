//! Integration tests for the judge adapter against an in-process fake of
//! the token-based execution service.

use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::HeaderMap,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::Deserialize;
use serde_json::json;

use codequest_client::{
    config::JudgeConfig,
    error::ClientError,
    judge::{CodeExecutor, ExecutionOutcome, JudgeClient},
    models::Language,
};

const API_KEY: &str = "judge-key";

#[derive(Clone)]
struct FakeJudge {
    /// Polls served before the run turns terminal
    polls_until_done: u32,
    poll_calls: Arc<AtomicU32>,
    stdout: &'static str,
    stderr: &'static str,
    compile_output: &'static str,
}

impl FakeJudge {
    fn clean(polls_until_done: u32) -> Self {
        Self {
            polls_until_done,
            poll_calls: Arc::new(AtomicU32::new(0)),
            stdout: "42\n",
            stderr: "",
            compile_output: "",
        }
    }
}

#[derive(Deserialize)]
struct SubmitQuery {
    base64_encoded: String,
    wait: String,
}

#[derive(Deserialize)]
struct SubmitBody {
    source_code: String,
    language_id: u32,
    stdin: String,
}

async fn create_submission(
    Query(query): Query<SubmitQuery>,
    headers: HeaderMap,
    Json(body): Json<SubmitBody>,
) -> Response {
    assert_eq!(query.base64_encoded, "false");
    assert_eq!(query.wait, "false");
    assert_eq!(headers.get("X-Auth-Token").unwrap(), API_KEY);
    assert_eq!(body.language_id, 71);
    assert_eq!(body.stdin, "7");
    assert!(!body.source_code.is_empty());

    Json(json!({"token": "tok-123"})).into_response()
}

async fn submission_status(
    Path(token): Path<String>,
    State(judge): State<FakeJudge>,
) -> Response {
    assert_eq!(token, "tok-123");

    let call = judge.poll_calls.fetch_add(1, Ordering::SeqCst) + 1;
    if call <= judge.polls_until_done {
        return Json(json!({
            "stdout": null, "stderr": null, "compile_output": null,
            "status": {"id": 2},
        }))
        .into_response();
    }

    Json(json!({
        "stdout": judge.stdout,
        "stderr": judge.stderr,
        "compile_output": judge.compile_output,
        "status": {"id": 3},
    }))
    .into_response()
}

async fn spawn_judge(judge: FakeJudge) -> String {
    let app = Router::new()
        .route("/submissions/", post(create_submission))
        .route("/submissions/{token}", get(submission_status))
        .with_state(judge);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

fn config(base_url: &str, poll_timeout: Duration) -> JudgeConfig {
    JudgeConfig {
        base_url: base_url.to_string(),
        api_key: Some(API_KEY.to_string()),
        poll_interval: Duration::from_millis(20),
        poll_timeout,
    }
}

#[tokio::test]
async fn polls_until_terminal_then_returns_output() {
    let judge = FakeJudge::clean(2);
    let poll_calls = judge.poll_calls.clone();
    let base = spawn_judge(judge).await;

    let client = JudgeClient::new(config(&base, Duration::from_secs(5))).unwrap();
    let result = client
        .execute("print(input())", Language::Python, "7")
        .await
        .unwrap();

    assert!(result.is_terminal());
    assert_eq!(result.stdout, "42\n");
    assert_eq!(poll_calls.load(Ordering::SeqCst), 3);
    assert_eq!(
        ExecutionOutcome::classify(&result),
        ExecutionOutcome::Ok("42\n".to_string())
    );
}

#[tokio::test]
async fn null_fields_normalize_and_compile_errors_win() {
    let judge = FakeJudge {
        polls_until_done: 0,
        poll_calls: Arc::new(AtomicU32::new(0)),
        stdout: "partial",
        stderr: "warning",
        compile_output: "SyntaxError: invalid syntax",
    };
    let base = spawn_judge(judge).await;

    let client = JudgeClient::new(config(&base, Duration::from_secs(5))).unwrap();
    let result = client
        .execute("print(", Language::Python, "7")
        .await
        .unwrap();

    assert_eq!(
        ExecutionOutcome::classify(&result),
        ExecutionOutcome::CompileError("SyntaxError: invalid syntax".to_string())
    );
}

#[tokio::test]
async fn never_terminal_run_times_out() {
    let judge = FakeJudge::clean(u32::MAX);
    let base = spawn_judge(judge).await;

    let client = JudgeClient::new(config(&base, Duration::from_millis(150))).unwrap();
    let err = client
        .execute("while True: pass", Language::Python, "7")
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::Timeout));
}

#[tokio::test]
async fn cancellation_abandons_the_poll_series() {
    let judge = FakeJudge::clean(u32::MAX);
    let base = spawn_judge(judge).await;

    let client = JudgeClient::new(config(&base, Duration::from_secs(30))).unwrap();
    let cancel = client.cancellation_token();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(60)).await;
        cancel.cancel();
    });

    let err = client
        .execute("while True: pass", Language::Python, "7")
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::Cancelled));
}

#[tokio::test]
async fn unreachable_judge_is_a_submit_error() {
    let client = JudgeClient::new(config("http://127.0.0.1:9", Duration::from_secs(1))).unwrap();
    let err = client
        .execute("print(1)", Language::Python, "7")
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::AdapterSubmit(_)));
}
