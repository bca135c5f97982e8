//! Submit Solution orchestration
//!
//! Drives the full submit protocol: local validation, the one-in-flight
//! guard, the network call, and the optimistic patch of the submission
//! history. The busy state is restored on every exit path, and failures
//! surface as inline messages without touching the history.

use std::sync::Arc;

use chrono::Utc;

use crate::{
    backend::{SubmissionApi, SubmitAck},
    error::{ClientError, ClientResult},
    models::{SubmissionDraft, SubmissionRecord, TestStatus},
    session::ChallengeSession,
    utils::escape_html,
    utils::validation::validate_source_code,
    view::{ChallengeView, HistoryCard},
};

/// Orchestrates the "Submit Solution" action for one challenge view
pub struct SubmissionController {
    api: Arc<dyn SubmissionApi>,
    session: ChallengeSession,
}

impl SubmissionController {
    pub fn new(api: Arc<dyn SubmissionApi>, session: ChallengeSession) -> Self {
        Self { api, session }
    }

    /// Submit the draft.
    ///
    /// On success the returned record has been prepended to the session
    /// history (newest-first) and the draft consumed: code cleared, test
    /// status reset. On any failure the history and draft are untouched.
    pub async fn submit(
        &self,
        draft: &mut SubmissionDraft,
        view: &mut dyn ChallengeView,
    ) -> ClientResult<SubmissionRecord> {
        if let Err(msg) = validate_source_code(&draft.code) {
            view.show_submit_error(msg);
            return Err(ClientError::Validation(msg.to_string()));
        }

        let Some(_guard) = self.session.try_begin_submit() else {
            let msg = "A submission is already in progress.";
            view.show_submit_error(msg);
            return Err(ClientError::Validation(msg.to_string()));
        };

        view.set_submit_busy(true);
        let result = self
            .api
            .submit_solution(&draft.code, draft.language, draft.last_test_status)
            .await;
        view.set_submit_busy(false);

        match result {
            Ok(ack) => Ok(self.apply_ack(ack, draft, view)),
            Err(e) => {
                tracing::error!(error = %e, "submission failed");
                view.show_submit_error(&e.user_message());
                Err(e)
            }
        }
    }

    /// Patch the history optimistically from a successful acknowledgement
    fn apply_ack(
        &self,
        ack: SubmitAck,
        draft: &mut SubmissionDraft,
        view: &mut dyn ChallengeView,
    ) -> SubmissionRecord {
        // Server-assigned id is authoritative; counting rendered cards is
        // the legacy fallback only.
        let number = ack
            .id
            .unwrap_or_else(|| self.session.record_count() as i64 + 1);

        let record = SubmissionRecord {
            id: number,
            code: draft.code.clone(),
            status: ack.status,
            created_at: ack.created_at.unwrap_or_else(Utc::now),
        };
        self.session.push_record(record.clone());

        view.remove_empty_placeholder();
        view.prepend_history_card(&HistoryCard {
            id: record.id,
            number,
            escaped_code: escape_html(&record.code),
            status: record.status,
        });
        view.show_submit_result(number, record.status);
        view.clear_editor();

        if let Some(message) = ack.message {
            tracing::info!(submission = record.id, "{}", message);
        }

        // Consume the draft
        draft.code.clear();
        draft.last_test_status = TestStatus::Pending;

        record
    }
}
