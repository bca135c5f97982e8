//! External code-execution service adapter
//!
//! Two-call protocol: submit source + stdin for an opaque token, then poll
//! the status-by-token endpoint until the run reaches a terminal state.
//! The raw result is normalized into a single outcome with a fixed
//! priority: compile errors mask runtime errors, which mask normal output.

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::{
    config::JudgeConfig,
    error::{ClientError, ClientResult},
    models::JudgeResult,
    models::judge::{JudgeStatusResponse, JudgeSubmitRequest, JudgeSubmitResponse},
    models::submission::Language,
    poll::poll_until,
};

/// Seam for executing one piece of code against one stdin, mockable in tests
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CodeExecutor: Send + Sync {
    async fn execute(
        &self,
        source_code: &str,
        language: Language,
        stdin: &str,
    ) -> ClientResult<JudgeResult>;
}

/// Classified outcome of one judge execution
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutionOutcome {
    /// Ran to completion; payload is stdout
    Ok(String),
    /// Payload is stderr
    RuntimeError(String),
    /// Payload is the compiler's diagnostics
    CompileError(String),
}

impl ExecutionOutcome {
    /// Classify a terminal judge result.
    ///
    /// Priority is fixed: compile output first, stderr second, stdout last.
    pub fn classify(result: &JudgeResult) -> Self {
        if !result.compile_output.is_empty() {
            Self::CompileError(result.compile_output.clone())
        } else if !result.stderr.is_empty() {
            Self::RuntimeError(result.stderr.clone())
        } else {
            Self::Ok(result.stdout.clone())
        }
    }

    /// The stdout/stderr/compile payload, whichever applies
    pub fn payload(&self) -> &str {
        match self {
            Self::Ok(s) | Self::RuntimeError(s) | Self::CompileError(s) => s,
        }
    }
}

/// Client for the external judge service
pub struct JudgeClient {
    http: reqwest::Client,
    config: JudgeConfig,
    cancel: CancellationToken,
}

impl JudgeClient {
    pub fn new(config: JudgeConfig) -> ClientResult<Self> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| ClientError::Transport(e.to_string()))?;

        Ok(Self {
            http,
            config,
            cancel: CancellationToken::new(),
        })
    }

    /// Token used to abandon in-flight poll series, e.g. on navigation
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Submit the source and obtain the opaque token for status polling
    async fn submit(
        &self,
        source_code: &str,
        language: Language,
        stdin: &str,
    ) -> ClientResult<String> {
        let url = format!(
            "{}/submissions/?base64_encoded=false&wait=false",
            self.config.base_url.trim_end_matches('/')
        );

        let mut request = self.http.post(url).json(&JudgeSubmitRequest {
            source_code: source_code.to_string(),
            language_id: language.judge_id(),
            stdin: stdin.to_string(),
        });
        if let Some(key) = &self.config.api_key {
            request = request.header("X-Auth-Token", key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| ClientError::AdapterSubmit(e.to_string()))?;

        if !response.status().is_success() {
            return Err(ClientError::AdapterSubmit(format!(
                "creation endpoint returned status {}",
                response.status().as_u16()
            )));
        }

        let body: JudgeSubmitResponse = response
            .json()
            .await
            .map_err(|e| ClientError::AdapterSubmit(format!("malformed creation response: {}", e)))?;

        Ok(body.token)
    }

    /// Fetch the current status of a run by token
    async fn status(&self, token: &str) -> ClientResult<JudgeResult> {
        let url = format!(
            "{}/submissions/{}?base64_encoded=false",
            self.config.base_url.trim_end_matches('/'),
            token
        );

        let mut request = self.http.get(url);
        if let Some(key) = &self.config.api_key {
            request = request.header("X-Auth-Token", key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| ClientError::AdapterPoll(e.to_string()))?;

        if !response.status().is_success() {
            return Err(ClientError::AdapterPoll(format!(
                "status endpoint returned status {}",
                response.status().as_u16()
            )));
        }

        let body: JudgeStatusResponse = response
            .json()
            .await
            .map_err(|e| ClientError::AdapterPoll(format!("malformed status response: {}", e)))?;

        Ok(JudgeResult::from(body))
    }
}

#[async_trait]
impl CodeExecutor for JudgeClient {
    async fn execute(
        &self,
        source_code: &str,
        language: Language,
        stdin: &str,
    ) -> ClientResult<JudgeResult> {
        let token = self.submit(source_code, language, stdin).await?;
        tracing::debug!(token = %token, "judge accepted submission");

        poll_until(
            || self.status(&token),
            JudgeResult::is_terminal,
            self.config.poll_interval,
            Some(self.config.poll_timeout),
            &self.cancel,
        )
        .await
    }
}
