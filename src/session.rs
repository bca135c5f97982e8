//! Per-page session state
//!
//! One session owns everything the challenge view shares: the submission
//! history, the last-test-status slot read at submit time, and the
//! in-flight flags that keep submissions and test runs mutually exclusive
//! with themselves. State is passed explicitly by handle, never held in
//! ambient globals, so a page gets exactly one instance and one
//! registration of each operation.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use crate::models::{SubmissionRecord, TestStatus};

/// Shared challenge-view state, cheap to clone
#[derive(Clone)]
pub struct ChallengeSession {
    inner: Arc<SessionInner>,
}

struct SessionInner {
    /// Submission history, newest-first
    history: Mutex<Vec<SubmissionRecord>>,

    /// Outcome of the most recent test run. Single writer at a time,
    /// guarded by the one-test-run-in-flight invariant.
    last_test_status: Mutex<TestStatus>,

    submit_in_flight: Arc<AtomicBool>,
    test_run_in_flight: Arc<AtomicBool>,
}

impl ChallengeSession {
    pub fn new() -> Self {
        Self::with_history(Vec::new())
    }

    /// Seed the session with server-rendered history, newest-first
    pub fn with_history(history: Vec<SubmissionRecord>) -> Self {
        Self {
            inner: Arc::new(SessionInner {
                history: Mutex::new(history),
                last_test_status: Mutex::new(TestStatus::Pending),
                submit_in_flight: Arc::new(AtomicBool::new(false)),
                test_run_in_flight: Arc::new(AtomicBool::new(false)),
            }),
        }
    }

    /// Snapshot of the history, newest-first
    pub fn history(&self) -> Vec<SubmissionRecord> {
        self.inner.history.lock().expect("history lock poisoned").clone()
    }

    /// Number of recorded submissions
    pub fn record_count(&self) -> usize {
        self.inner.history.lock().expect("history lock poisoned").len()
    }

    /// Prepend a new record; the list stays newest-first
    pub fn push_record(&self, record: SubmissionRecord) {
        self.inner
            .history
            .lock()
            .expect("history lock poisoned")
            .insert(0, record);
    }

    pub fn last_test_status(&self) -> TestStatus {
        *self
            .inner
            .last_test_status
            .lock()
            .expect("status lock poisoned")
    }

    pub fn set_last_test_status(&self, status: TestStatus) {
        *self
            .inner
            .last_test_status
            .lock()
            .expect("status lock poisoned") = status;
    }

    /// Claim the submit slot. `None` while another submission is pending.
    pub fn try_begin_submit(&self) -> Option<InFlightGuard> {
        InFlightGuard::claim(&self.inner.submit_in_flight)
    }

    /// Claim the test-run slot. `None` while another run is pending.
    pub fn try_begin_test_run(&self) -> Option<InFlightGuard> {
        InFlightGuard::claim(&self.inner.test_run_in_flight)
    }
}

impl Default for ChallengeSession {
    fn default() -> Self {
        Self::new()
    }
}

/// RAII claim on an in-flight slot; released on drop, so every exit path
/// of an operation restores the trigger.
pub struct InFlightGuard {
    flag: Arc<AtomicBool>,
}

impl InFlightGuard {
    fn claim(flag: &Arc<AtomicBool>) -> Option<Self> {
        if flag.swap(true, Ordering::AcqRel) {
            return None;
        }
        Some(Self { flag: flag.clone() })
    }
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}
