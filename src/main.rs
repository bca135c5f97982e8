//! CodeQuest client - Headless entry point
//!
//! Runs the submit flow from a terminal: reads a solution file, runs the
//! challenge's tests through the backend batch endpoint, then submits and
//! prints the updated history. Useful for driving the client against a
//! deployment without a browser.

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use codequest_client::{
    backend::BackendClient,
    config::Config,
    models::{Language, SubmissionDraft, SubmissionStatus, TestRunReport},
    runner::{RunMode, TestRunner},
    session::ChallengeSession,
    submission::SubmissionController,
    utils::time::format_relative,
    view::{ChallengeView, HistoryCard},
};

/// Terminal renderer for the challenge view
struct ConsoleView;

impl ChallengeView for ConsoleView {
    fn set_submit_busy(&mut self, busy: bool) {
        if busy {
            println!("Submitting...");
        }
    }

    fn show_submit_error(&mut self, message: &str) {
        eprintln!("error: {}", message);
    }

    fn show_submit_result(&mut self, number: i64, status: SubmissionStatus) {
        println!("Submission #{}: {}", number, status.as_str().to_uppercase());
    }

    fn remove_empty_placeholder(&mut self) {}

    fn prepend_history_card(&mut self, card: &HistoryCard) {
        let badge = if card.status.is_passed() { "ok" } else { "!!" };
        println!("  {} history card #{} [{}]", badge, card.number, card.status);
    }

    fn clear_editor(&mut self) {}

    fn set_code_visibility(&mut self, _submission_id: i64, _visible: bool) {}

    fn set_test_busy(&mut self, busy: bool) {
        if busy {
            println!("Running tests...");
        }
    }

    fn show_test_report(&mut self, report: &TestRunReport) {
        println!("Overall status: {}", report.overall);
        for outcome in &report.outcomes {
            let mark = if outcome.passed { "PASS" } else { "FAIL" };
            println!("  Test {}: {}", outcome.test_index + 1, mark);
        }
    }

    fn show_test_error(&mut self, message: &str) {
        eprintln!("error: {}", message);
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let path = std::env::args()
        .nth(1)
        .ok_or_else(|| anyhow::anyhow!("usage: codequest-client <solution-file> [language]"))?;
    let language = std::env::args()
        .nth(2)
        .as_deref()
        .and_then(Language::parse)
        .unwrap_or(Language::Python);

    let config = Config::from_env()?;
    tracing::info!(
        backend = %config.backend.base_url,
        challenge = %config.backend.challenge_slug,
        "starting CodeQuest client"
    );

    let code = tokio::fs::read_to_string(&path).await?;
    let backend = Arc::new(BackendClient::new(&config.backend)?);

    let session = ChallengeSession::new();
    let runner = TestRunner::new(RunMode::Batch(backend.clone()), session.clone());
    let controller = SubmissionController::new(backend, session.clone());

    let mut view = ConsoleView;
    let mut draft = SubmissionDraft::new(code, language);

    if let Ok(report) = runner.run_all(&draft, &mut view).await {
        draft.last_test_status = report.overall;
    }

    if controller.submit(&mut draft, &mut view).await.is_ok() {
        let now = chrono::Utc::now();
        println!("\nSubmission history:");
        for record in session.history() {
            println!(
                "  #{} {} ({})",
                record.id,
                record.status,
                format_relative(record.created_at, now)
            );
        }
    }

    Ok(())
}
