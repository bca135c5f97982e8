//! Test runner
//!
//! Runs a challenge's test cases against the user's draft and aggregates
//! pass/fail. Two deployment modes share one contract: a single trusted
//! backend batch endpoint (preferred), or one external-judge execution per
//! test case with that case's input as stdin. The aggregate writes the
//! shared last-test-status slot consumed by the submission controller.

use std::sync::Arc;

use crate::{
    backend::BatchTestApi,
    error::{ClientError, ClientResult},
    judge::{CodeExecutor, ExecutionOutcome},
    models::{OutcomeKind, SubmissionDraft, TestCase, TestOutcome, TestRunReport},
    session::ChallengeSession,
    utils::validation::validate_source_code,
    view::ChallengeView,
};

/// Where test outcomes come from in this deployment
pub enum RunMode {
    /// One server round trip yields all outcomes, each pre-marked
    Batch(Arc<dyn BatchTestApi>),
    /// One judge execution per test case, compared client-side
    PerCase {
        executor: Arc<dyn CodeExecutor>,
        cases: Vec<TestCase>,
    },
}

/// Orchestrates one challenge's test runs
pub struct TestRunner {
    mode: RunMode,
    session: ChallengeSession,
}

impl TestRunner {
    pub fn new(mode: RunMode, session: ChallengeSession) -> Self {
        Self { mode, session }
    }

    /// Run all test cases for the draft and render the outcome.
    ///
    /// Empty code never reaches the network. A second run while one is in
    /// flight is rejected. The busy indicator is restored on every exit
    /// path, and the shared last-test-status slot is updated before the
    /// report is rendered.
    pub async fn run_all(
        &self,
        draft: &SubmissionDraft,
        view: &mut dyn ChallengeView,
    ) -> ClientResult<TestRunReport> {
        if let Err(msg) = validate_source_code(&draft.code) {
            let msg = if draft.code.trim().is_empty() {
                "Please enter code before running tests."
            } else {
                msg
            };
            view.show_test_error(msg);
            return Err(ClientError::Validation(msg.to_string()));
        }

        let Some(_guard) = self.session.try_begin_test_run() else {
            let msg = "A test run is already in progress.".to_string();
            view.show_test_error(&msg);
            return Err(ClientError::Validation(msg));
        };

        view.set_test_busy(true);
        let result = self.collect_report(draft).await;
        view.set_test_busy(false);

        match result {
            Ok(report) => {
                self.session.set_last_test_status(report.overall);
                view.show_test_report(&report);
                Ok(report)
            }
            Err(e) => {
                tracing::error!(error = %e, "test run failed");
                view.show_test_error(&e.user_message());
                Err(e)
            }
        }
    }

    async fn collect_report(&self, draft: &SubmissionDraft) -> ClientResult<TestRunReport> {
        match &self.mode {
            RunMode::Batch(api) => api.run_tests(&draft.code).await,
            RunMode::PerCase { executor, cases } => {
                Ok(run_per_case(executor.as_ref(), cases, draft).await)
            }
        }
    }
}

/// Execute every case through the judge, never aborting the batch.
///
/// An adapter failure on one case is recorded as an `AdapterError` outcome
/// for that case only; the aggregation then forces an overall failure.
async fn run_per_case(
    executor: &dyn CodeExecutor,
    cases: &[TestCase],
    draft: &SubmissionDraft,
) -> TestRunReport {
    let mut outcomes = Vec::with_capacity(cases.len());

    for (index, case) in cases.iter().enumerate() {
        let outcome = match executor.execute(&draft.code, draft.language, &case.input).await {
            Ok(result) => match ExecutionOutcome::classify(&result) {
                ExecutionOutcome::Ok(stdout) => {
                    let passed = stdout.trim() == case.expected_output.trim();
                    TestOutcome {
                        test_index: index,
                        passed,
                        actual_output: stdout,
                        kind: OutcomeKind::Ok,
                    }
                }
                ExecutionOutcome::RuntimeError(stderr) => TestOutcome {
                    test_index: index,
                    passed: false,
                    actual_output: stderr,
                    kind: OutcomeKind::RuntimeError,
                },
                ExecutionOutcome::CompileError(diagnostics) => TestOutcome {
                    test_index: index,
                    passed: false,
                    actual_output: diagnostics,
                    kind: OutcomeKind::CompileError,
                },
            },
            Err(e) => {
                tracing::warn!(test_index = index, error = %e, "judge call failed for test case");
                TestOutcome {
                    test_index: index,
                    passed: false,
                    actual_output: e.user_message(),
                    kind: OutcomeKind::AdapterError,
                }
            }
        };
        outcomes.push(outcome);
    }

    TestRunReport::from_outcomes(outcomes)
}
