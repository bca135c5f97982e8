//! Test case and test run models

use serde::{Deserialize, Serialize};

use super::submission::TestStatus;

/// One test case of a challenge. Sourced from challenge configuration;
/// read-only to the client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestCase {
    pub input: String,
    pub expected_output: String,
}

/// Classification of a single test outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeKind {
    /// Ran to completion; `actual_output` holds stdout
    Ok,
    /// Non-empty stderr; `actual_output` holds the diagnostics
    RuntimeError,
    /// Non-empty compile output; masks any runtime error
    CompileError,
    /// The judge adapter itself failed for this case
    AdapterError,
}

/// Outcome of one test case in one run. Derived per run, never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestOutcome {
    pub test_index: usize,
    pub passed: bool,
    pub actual_output: String,
    pub kind: OutcomeKind,
}

/// Aggregate result of a full test run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestRunReport {
    pub overall: TestStatus,
    pub outcomes: Vec<TestOutcome>,
}

impl TestRunReport {
    /// Derive the overall status: passed iff every outcome ran clean and matched
    pub fn from_outcomes(outcomes: Vec<TestOutcome>) -> Self {
        let all_passed = outcomes
            .iter()
            .all(|o| o.kind == OutcomeKind::Ok && o.passed);
        Self {
            overall: if all_passed { TestStatus::Passed } else { TestStatus::Failed },
            outcomes,
        }
    }
}
