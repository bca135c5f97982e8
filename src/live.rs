//! Background dashboard stats poller
//!
//! Periodically refreshes leaderboard/classroom aggregates without a page
//! reload. The serialized payload is diffed against the last applied one so
//! an unchanged response never touches the view. While the tab is hidden
//! the loop suspends entirely; restoring visibility triggers exactly one
//! immediate refresh before the normal cadence resumes.

use std::sync::Arc;

use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

use crate::{
    backend::StatsApi,
    config::StatsConfig,
    error::ClientResult,
    view::StatsSink,
};

/// Polls the global stats endpoint on a fixed cadence
pub struct StatsPoller {
    api: Arc<dyn StatsApi>,
    config: StatsConfig,
    /// Mirrors `document.hidden`
    visibility: watch::Receiver<bool>,
    cancel: CancellationToken,
    last_payload: Option<String>,
}

impl StatsPoller {
    pub fn new(
        api: Arc<dyn StatsApi>,
        config: StatsConfig,
        visibility: watch::Receiver<bool>,
        cancel: CancellationToken,
    ) -> Self {
        Self {
            api,
            config,
            visibility,
            cancel,
            last_payload: None,
        }
    }

    /// Run until cancelled. Applies changed payloads to `sink`.
    pub async fn run<S: StatsSink>(mut self, mut sink: S) {
        loop {
            if self.cancel.is_cancelled() {
                break;
            }

            // Suspend entirely while hidden; a visibility restore falls
            // through to an immediate refresh.
            if *self.visibility.borrow() {
                tokio::select! {
                    _ = self.cancel.cancelled() => break,
                    changed = self.visibility.wait_for(|hidden| !hidden) => {
                        if changed.is_err() {
                            break;
                        }
                    }
                }
            }

            let delay = match self.refresh(&mut sink).await {
                Ok(()) => self.config.interval,
                Err(e) => {
                    tracing::warn!(error = %e, "stats refresh failed, backing off");
                    self.config.retry_interval
                }
            };

            tokio::select! {
                _ = self.cancel.cancelled() => break,
                // Tab hidden mid-wait: drop the pending timer and suspend
                changed = self.visibility.wait_for(|hidden| *hidden) => {
                    if changed.is_err() {
                        break;
                    }
                }
                _ = tokio::time::sleep(delay) => {}
            }
        }

        tracing::debug!("stats poller stopped");
    }

    async fn refresh<S: StatsSink>(&mut self, sink: &mut S) -> ClientResult<()> {
        let stats = self.api.global_stats().await?;

        let payload = serde_json::to_string(&stats)?;
        if self.last_payload.as_deref() != Some(payload.as_str()) {
            self.last_payload = Some(payload);
            sink.apply(&stats);
        }

        Ok(())
    }
}

/// Convenience wrapper: spawn the poller and hand back the cancellation
/// token that stops it.
pub fn spawn_stats_poller<S>(
    api: Arc<dyn StatsApi>,
    config: StatsConfig,
    visibility: watch::Receiver<bool>,
    sink: S,
) -> CancellationToken
where
    S: StatsSink + 'static,
{
    let cancel = CancellationToken::new();
    let poller = StatsPoller::new(api, config, visibility, cancel.clone());
    tokio::spawn(poller.run(sink));
    cancel
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::time::Duration;

    use crate::error::ClientError;
    use crate::models::{GlobalStats, LeaderboardEntry};

    /// Scriptable stats endpoint fake: counts calls, can fail on demand,
    /// and switches payloads mid-test.
    struct FakeStatsApi {
        calls: AtomicU32,
        fail: Mutex<bool>,
        points: Mutex<i64>,
    }

    impl FakeStatsApi {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicU32::new(0),
                fail: Mutex::new(false),
                points: Mutex::new(100),
            })
        }

        fn calls(&self) -> u32 {
            self.calls.load(Ordering::SeqCst)
        }

        fn set_fail(&self, fail: bool) {
            *self.fail.lock().unwrap() = fail;
        }

        fn set_points(&self, points: i64) {
            *self.points.lock().unwrap() = points;
        }
    }

    #[async_trait]
    impl StatsApi for FakeStatsApi {
        async fn global_stats(&self) -> ClientResult<GlobalStats> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if *self.fail.lock().unwrap() {
                return Err(ClientError::Transport("down".to_string()));
            }
            Ok(GlobalStats {
                leaderboard: vec![LeaderboardEntry {
                    username: "alex".to_string(),
                    points: *self.points.lock().unwrap(),
                    solved: 10,
                }],
                ..GlobalStats::default()
            })
        }
    }

    /// Sink that counts how many times a changed payload was applied
    struct CountingSink(Arc<AtomicU32>);

    impl StatsSink for CountingSink {
        fn apply(&mut self, _stats: &GlobalStats) {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn config() -> StatsConfig {
        StatsConfig {
            interval: Duration::from_secs(10),
            retry_interval: Duration::from_secs(15),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn polls_on_the_normal_cadence_while_visible() {
        let api = FakeStatsApi::new();
        let applied = Arc::new(AtomicU32::new(0));
        let (_tx, rx) = watch::channel(false);
        let cancel = CancellationToken::new();

        let poller = StatsPoller::new(api.clone(), config(), rx, cancel.clone());
        let handle = tokio::spawn(poller.run(CountingSink(applied.clone())));

        tokio::time::sleep(Duration::from_secs(25)).await;
        cancel.cancel();
        handle.await.unwrap();

        // Immediate fetch at t=0, then t=10 and t=20
        assert_eq!(api.calls(), 3);
        // Payload never changed after the first apply
        assert_eq!(applied.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn no_fetches_while_hidden_and_one_on_restore() {
        let api = FakeStatsApi::new();
        let applied = Arc::new(AtomicU32::new(0));
        let (tx, rx) = watch::channel(true);
        let cancel = CancellationToken::new();

        let poller = StatsPoller::new(api.clone(), config(), rx, cancel.clone());
        let handle = tokio::spawn(poller.run(CountingSink(applied.clone())));

        tokio::time::sleep(Duration::from_secs(60)).await;
        assert_eq!(api.calls(), 0);

        tx.send(false).unwrap();
        tokio::time::sleep(Duration::from_secs(1)).await;
        assert_eq!(api.calls(), 1);

        cancel.cancel();
        handle.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn hiding_the_tab_drops_the_pending_timer() {
        let api = FakeStatsApi::new();
        let applied = Arc::new(AtomicU32::new(0));
        let (tx, rx) = watch::channel(false);
        let cancel = CancellationToken::new();

        let poller = StatsPoller::new(api.clone(), config(), rx, cancel.clone());
        let handle = tokio::spawn(poller.run(CountingSink(applied.clone())));

        tokio::time::sleep(Duration::from_secs(1)).await;
        assert_eq!(api.calls(), 1);

        // Hide before the 10s tick fires; nothing further may fire
        tx.send(true).unwrap();
        tokio::time::sleep(Duration::from_secs(120)).await;
        assert_eq!(api.calls(), 1);

        cancel.cancel();
        handle.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn failed_fetch_backs_off_to_the_retry_interval() {
        let api = FakeStatsApi::new();
        api.set_fail(true);
        let applied = Arc::new(AtomicU32::new(0));
        let (_tx, rx) = watch::channel(false);
        let cancel = CancellationToken::new();

        let poller = StatsPoller::new(api.clone(), config(), rx, cancel.clone());
        let handle = tokio::spawn(poller.run(CountingSink(applied.clone())));

        // Failing fetch at t=0; next attempt only at t=15
        tokio::time::sleep(Duration::from_secs(14)).await;
        assert_eq!(api.calls(), 1);
        tokio::time::sleep(Duration::from_secs(2)).await;
        assert_eq!(api.calls(), 2);
        assert_eq!(applied.load(Ordering::SeqCst), 0);

        cancel.cancel();
        handle.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn spawned_poller_is_stopped_by_its_token() {
        let api = FakeStatsApi::new();
        let applied = Arc::new(AtomicU32::new(0));
        let (_tx, rx) = watch::channel(false);

        let cancel = spawn_stats_poller(api.clone(), config(), rx, CountingSink(applied.clone()));

        tokio::time::sleep(Duration::from_secs(1)).await;
        assert_eq!(api.calls(), 1);

        cancel.cancel();
        tokio::time::sleep(Duration::from_secs(60)).await;
        assert_eq!(api.calls(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn unchanged_payload_is_not_reapplied() {
        let api = FakeStatsApi::new();
        let applied = Arc::new(AtomicU32::new(0));
        let (_tx, rx) = watch::channel(false);
        let cancel = CancellationToken::new();

        let poller = StatsPoller::new(api.clone(), config(), rx, cancel.clone());
        let handle = tokio::spawn(poller.run(CountingSink(applied.clone())));

        tokio::time::sleep(Duration::from_secs(15)).await;
        assert_eq!(applied.load(Ordering::SeqCst), 1);

        // Change the payload; the next tick must re-apply
        api.set_points(250);
        tokio::time::sleep(Duration::from_secs(10)).await;
        assert_eq!(applied.load(Ordering::SeqCst), 2);

        cancel.cancel();
        handle.await.unwrap();
    }
}
