//! Interval-based fetch-and-store for dashboard widgets.

use std::time::Duration;

use maicivy_shared::ApiError;
use serde::de::DeserializeOwned;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, Interval, MissedTickBehavior};

use crate::api_client::ApiClient;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollOptions {
    pub endpoint: String,
    /// `None` or zero fetches once.
    pub refresh_interval: Option<Duration>,
    pub enabled: bool,
}

impl PollOptions {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            refresh_interval: None,
            enabled: true,
        }
    }

    pub fn every(mut self, interval: Duration) -> Self {
        self.refresh_interval = Some(interval);
        self
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }
}

/// How a running poller has to react when its options are replaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionsChange {
    Unchanged,
    /// Same target, new cadence: cancel the old schedule, start this one.
    Reschedule(Option<Duration>),
    /// Endpoint or enabled flag changed: replace the poller.
    Restart,
}

impl PollOptions {
    pub fn change_from(&self, previous: &PollOptions) -> OptionsChange {
        if self.endpoint != previous.endpoint || self.enabled != previous.enabled {
            OptionsChange::Restart
        } else if self.refresh_interval != previous.refresh_interval {
            OptionsChange::Reschedule(self.refresh_interval)
        } else {
            OptionsChange::Unchanged
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PollState<T> {
    pub data: Option<T>,
    pub error: Option<ApiError>,
    pub is_loading: bool,
}

impl<T> PollState<T> {
    fn initial(enabled: bool) -> Self {
        Self {
            data: None,
            error: None,
            is_loading: enabled,
        }
    }
}

#[derive(Debug)]
enum PollCommand {
    Refetch,
    SetInterval(Option<Duration>),
}

/// Owns one polling schedule. Dropping it cancels the schedule and any
/// request in flight.
pub struct Poller<T> {
    state: watch::Receiver<PollState<T>>,
    commands: mpsc::UnboundedSender<PollCommand>,
    task: Option<JoinHandle<()>>,
}

impl<T> Poller<T>
where
    T: DeserializeOwned + Clone + Send + Sync + 'static,
{
    /// Start polling on the current tokio runtime. A disabled poller never
    /// spawns anything.
    pub fn spawn(client: ApiClient, options: PollOptions) -> Self {
        let (state_tx, state) = watch::channel(PollState::initial(options.enabled));
        let (commands, command_rx) = mpsc::unbounded_channel();

        let task = options.enabled.then(|| {
            tokio::spawn(run_poller(client, options, state_tx, command_rx))
        });

        Self {
            state,
            commands,
            task,
        }
    }

    pub fn state(&self) -> PollState<T> {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<PollState<T>> {
        self.state.clone()
    }

    /// Fetch now without disturbing the schedule.
    pub fn refetch(&self) {
        let _ = self.commands.send(PollCommand::Refetch);
    }

    /// Replace the schedule; the old interval is cancelled first.
    pub fn set_interval(&self, interval: Option<Duration>) {
        let _ = self.commands.send(PollCommand::SetInterval(interval));
    }

    /// Cancel the schedule and any request in flight.
    pub fn stop(&self) {
        if let Some(task) = &self.task {
            task.abort();
        }
    }
}

impl<T> Drop for Poller<T> {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

async fn run_poller<T>(
    client: ApiClient,
    options: PollOptions,
    state: watch::Sender<PollState<T>>,
    mut commands: mpsc::UnboundedReceiver<PollCommand>,
) where
    T: DeserializeOwned + Clone + Send + Sync + 'static,
{
    let mut schedule = schedule_for(options.refresh_interval);
    fetch_into(&client, &options.endpoint, &state).await;

    loop {
        tokio::select! {
            _ = next_tick(&mut schedule) => fetch_into(&client, &options.endpoint, &state).await,
            cmd = commands.recv() => match cmd {
                Some(PollCommand::Refetch) => fetch_into(&client, &options.endpoint, &state).await,
                Some(PollCommand::SetInterval(interval)) => {
                    tracing::debug!("Polling {} every {:?}", options.endpoint, interval);
                    schedule = schedule_for(interval);
                }
                None => return,
            },
        }
    }
}

fn schedule_for(interval: Option<Duration>) -> Option<Interval> {
    interval.filter(|period| !period.is_zero()).map(|period| {
        let mut ticker = time::interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        ticker
    })
}

async fn next_tick(schedule: &mut Option<Interval>) {
    match schedule {
        Some(ticker) => {
            ticker.tick().await;
        }
        None => std::future::pending().await,
    }
}

/// One fetch; keeps previous data on error.
async fn fetch_into<T>(client: &ApiClient, endpoint: &str, state: &watch::Sender<PollState<T>>)
where
    T: DeserializeOwned,
{
    state.send_modify(|s| s.is_loading = true);
    let result = client.get_json::<T>(endpoint).await;
    state.send_modify(|s| {
        match result {
            Ok(data) => {
                s.data = Some(data);
                s.error = None;
            }
            Err(e) => {
                tracing::warn!("Polling {} failed: {}", endpoint, e);
                s.error = Some(e);
            }
        }
        s.is_loading = false;
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    const STATS: &str = "/api/analytics/stats";

    async fn settled(poller: &Poller<Value>) -> PollState<Value> {
        let mut rx = poller.subscribe();
        let state = rx
            .wait_for(|s| !s.is_loading)
            .await
            .expect("poller stopped")
            .clone();
        state
    }

    #[tokio::test]
    async fn disabled_never_fetches() {
        let mut server = mockito::Server::new_async().await;
        let mock = server.mock("GET", STATS).expect(0).create_async().await;

        let poller: Poller<Value> =
            Poller::spawn(ApiClient::new(server.url()), PollOptions::new(STATS).enabled(false));
        poller.refetch();
        time::sleep(Duration::from_millis(50)).await;

        let state = poller.state();
        assert!(!state.is_loading);
        assert_eq!(state.data, None);
        assert_eq!(state.error, None);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn fetches_once_without_interval() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", STATS)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"totalVisits":100}"#)
            .expect(1)
            .create_async()
            .await;

        let poller: Poller<Value> =
            Poller::spawn(ApiClient::new(server.url()), PollOptions::new(STATS));
        let state = settled(&poller).await;

        assert_eq!(state.data, Some(json!({"totalVisits": 100})));
        assert_eq!(state.error, None);
        time::sleep(Duration::from_millis(50)).await;
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn keeps_stale_data_on_error() {
        let mut server = mockito::Server::new_async().await;
        let ok = server
            .mock("GET", STATS)
            .with_status(200)
            .with_body(r#"{"totalVisits":5}"#)
            .create_async()
            .await;

        let poller: Poller<Value> =
            Poller::spawn(ApiClient::new(server.url()), PollOptions::new(STATS));
        settled(&poller).await;

        ok.remove_async().await;
        server
            .mock("GET", STATS)
            .with_status(502)
            .create_async()
            .await;

        let mut rx = poller.subscribe();
        poller.refetch();
        let state = rx
            .wait_for(|s| s.error.is_some())
            .await
            .expect("poller stopped")
            .clone();

        assert_eq!(state.data, Some(json!({"totalVisits": 5})));
        let error = state.error.unwrap();
        assert_eq!(error.status(), Some(502));
        assert!(error.to_string().contains(STATS));
        assert!(error.to_string().contains("Bad Gateway"));
    }

    #[tokio::test]
    async fn interval_refetches_until_cleared() {
        let mut server = mockito::Server::new_async().await;
        let ok = server
            .mock("GET", STATS)
            .with_status(200)
            .with_body(r#"{"totalVisits":1}"#)
            .expect_at_least(3)
            .create_async()
            .await;

        let poller: Poller<Value> = Poller::spawn(
            ApiClient::new(server.url()),
            PollOptions::new(STATS).every(Duration::from_millis(20)),
        );
        time::sleep(Duration::from_millis(150)).await;
        ok.assert_async().await;

        // After the schedule is cleared a failing endpoint is never hit
        poller.set_interval(None);
        time::sleep(Duration::from_millis(30)).await;
        ok.remove_async().await;
        server
            .mock("GET", STATS)
            .with_status(500)
            .create_async()
            .await;
        time::sleep(Duration::from_millis(100)).await;

        assert_eq!(poller.state().error, None);
    }

    #[tokio::test]
    async fn new_interval_replaces_old_cadence() {
        let mut server = mockito::Server::new_async().await;
        let fast = server
            .mock("GET", STATS)
            .with_status(200)
            .with_body(r#"{"totalVisits":1}"#)
            .expect_at_least(5)
            .create_async()
            .await;

        let poller: Poller<Value> = Poller::spawn(
            ApiClient::new(server.url()),
            PollOptions::new(STATS).every(Duration::from_millis(20)),
        );
        time::sleep(Duration::from_millis(200)).await;
        fast.assert_async().await;

        // The next tick is due 200ms after the switch; nothing before it
        poller.set_interval(Some(Duration::from_millis(200)));
        time::sleep(Duration::from_millis(30)).await;
        fast.remove_async().await;
        let slow = server
            .mock("GET", STATS)
            .with_status(200)
            .with_body(r#"{"totalVisits":2}"#)
            .expect_at_least(1)
            .expect_at_most(2)
            .create_async()
            .await;
        time::sleep(Duration::from_millis(320)).await;

        slow.assert_async().await;
        assert_eq!(poller.state().data, Some(json!({"totalVisits": 2})));
    }

    #[test]
    fn option_changes_are_classified() {
        let base = PollOptions::new(STATS).every(Duration::from_secs(30));

        assert_eq!(base.clone().change_from(&base), OptionsChange::Unchanged);
        assert_eq!(
            base.clone().every(Duration::from_secs(5)).change_from(&base),
            OptionsChange::Reschedule(Some(Duration::from_secs(5)))
        );
        assert_eq!(
            PollOptions::new(STATS).change_from(&base),
            OptionsChange::Reschedule(None)
        );
        assert_eq!(
            base.clone().enabled(false).change_from(&base),
            OptionsChange::Restart
        );
        assert_eq!(
            PollOptions::new("/api/v1/analytics/themes")
                .every(Duration::from_secs(30))
                .change_from(&base),
            OptionsChange::Restart
        );
    }

    #[tokio::test]
    async fn drop_cancels_schedule() {
        let mut server = mockito::Server::new_async().await;
        let ok = server
            .mock("GET", STATS)
            .with_status(200)
            .with_body(r#"{"totalVisits":1}"#)
            .create_async()
            .await;

        let poller: Poller<Value> = Poller::spawn(
            ApiClient::new(server.url()),
            PollOptions::new(STATS).every(Duration::from_millis(20)),
        );
        let rx = poller.subscribe();
        settled(&poller).await;
        drop(poller);

        ok.remove_async().await;
        let late = server
            .mock("GET", STATS)
            .with_status(200)
            .expect(0)
            .create_async()
            .await;
        time::sleep(Duration::from_millis(100)).await;

        late.assert_async().await;
        assert!(rx.has_changed().is_err());
    }
}
