//! Generic request/poll primitive
//!
//! Fires an async request on a fixed delay until the caller's terminal
//! predicate holds, a timeout ceiling elapses, or the cancellation token
//! fires. The ceiling is enforced here so individual callers cannot end up
//! in an unbounded loop against a stalled service.

use std::future::Future;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::error::{ClientError, ClientResult};

/// Poll `request` every `interval` until `is_terminal` accepts the result.
///
/// Fails with `Timeout` when `timeout` elapses, `Cancelled` when `cancel`
/// fires, and whatever error `request` itself returned otherwise. Both the
/// in-flight request and the delay are abandoned on cancellation; no timer
/// outlives the call.
pub async fn poll_until<T, F, Fut, P>(
    request: F,
    is_terminal: P,
    interval: Duration,
    timeout: Option<Duration>,
    cancel: &CancellationToken,
) -> ClientResult<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = ClientResult<T>>,
    P: Fn(&T) -> bool,
{
    let series = poll_series(request, is_terminal, interval, cancel);

    match timeout {
        Some(ceiling) => tokio::time::timeout(ceiling, series)
            .await
            .map_err(|_| ClientError::Timeout)?,
        None => series.await,
    }
}

async fn poll_series<T, F, Fut, P>(
    mut request: F,
    is_terminal: P,
    interval: Duration,
    cancel: &CancellationToken,
) -> ClientResult<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = ClientResult<T>>,
    P: Fn(&T) -> bool,
{
    loop {
        let result = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(ClientError::Cancelled),
            result = request() => result?,
        };

        if is_terminal(&result) {
            return Ok(result);
        }

        tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(ClientError::Cancelled),
            _ = tokio::time::sleep(interval) => {}
        }
    }
}
