//! Realtime analytics connection with state management and auto-reconnect.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use maicivy_shared::{RawRealtimeMessage, RealtimeError, RealtimeMessage, RealtimeStats};
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, Interval, MissedTickBehavior};

use super::transport::{Connection, Frame, Transport, TungsteniteTransport};
use crate::backoff::ReconnectPolicy;
use crate::config::{ClientConfig, DEFAULT_PING_INTERVAL};

/// Connection state for the realtime socket
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionState {
    Connecting,
    Connected,
    Disconnected,
    /// Closed, with attempt number `attempt` due after `delay`.
    ReconnectScheduled { attempt: u32, delay: Duration },
}

impl ConnectionState {
    pub fn is_connected(&self) -> bool {
        matches!(self, ConnectionState::Connected)
    }

    pub fn is_connecting(&self) -> bool {
        matches!(self, ConnectionState::Connecting)
    }

    /// Three-state view: a scheduled reconnect still reads as disconnected.
    pub fn as_str(&self) -> &'static str {
        match self {
            ConnectionState::Connecting => "connecting",
            ConnectionState::Connected => "connected",
            ConnectionState::Disconnected | ConnectionState::ReconnectScheduled { .. } => {
                "disconnected"
            }
        }
    }
}

impl fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything a consumer can observe about one realtime client.
#[derive(Debug, Clone, PartialEq)]
pub struct RealtimeSnapshot {
    pub state: ConnectionState,
    /// Payload of the most recent stats-bearing message, replaced wholesale.
    pub latest: Option<RealtimeStats>,
    /// Last `current_visitors` value seen on the stream.
    pub current_visitors: Option<u64>,
    pub last_error: Option<RealtimeError>,
}

impl Default for RealtimeSnapshot {
    fn default() -> Self {
        Self {
            state: ConnectionState::Connecting,
            latest: None,
            current_visitors: None,
            last_error: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RealtimeOptions {
    pub url: String,
    pub auto_reconnect: bool,
    pub reconnect: ReconnectPolicy,
    pub ping_interval: Option<Duration>,
}

impl RealtimeOptions {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            auto_reconnect: true,
            reconnect: ReconnectPolicy::default(),
            ping_interval: Some(DEFAULT_PING_INTERVAL),
        }
    }

    pub fn from_config(config: &ClientConfig, auto_reconnect: bool) -> Self {
        Self {
            url: config.realtime_url(),
            auto_reconnect,
            reconnect: config.reconnect.clone(),
            ping_interval: config.ping_interval,
        }
    }

    pub fn with_auto_reconnect(mut self, auto_reconnect: bool) -> Self {
        self.auto_reconnect = auto_reconnect;
        self
    }

    pub fn with_reconnect(mut self, reconnect: ReconnectPolicy) -> Self {
        self.reconnect = reconnect;
        self
    }

    pub fn with_ping_interval(mut self, ping_interval: Option<Duration>) -> Self {
        self.ping_interval = ping_interval;
        self
    }
}

#[derive(Debug)]
enum Command {
    Reconnect,
    Shutdown,
}

/// A live connection to the realtime analytics endpoint.
///
/// Owns one driver task. Dropping the client (or calling [`close`] /
/// [`shutdown`]) cancels any scheduled reconnect and closes the open
/// connection, whatever state it is in.
///
/// [`close`]: RealtimeClient::close
/// [`shutdown`]: RealtimeClient::shutdown
pub struct RealtimeClient {
    commands: mpsc::UnboundedSender<Command>,
    snapshot: watch::Receiver<RealtimeSnapshot>,
    task: Option<JoinHandle<()>>,
}

impl RealtimeClient {
    /// Connect to the configured backend over WebSocket.
    pub fn connect(config: &ClientConfig, auto_reconnect: bool) -> Self {
        Self::spawn(
            RealtimeOptions::from_config(config, auto_reconnect),
            Arc::new(TungsteniteTransport),
        )
    }

    /// Start the driver task on the current tokio runtime.
    pub fn spawn(options: RealtimeOptions, transport: Arc<dyn Transport>) -> Self {
        let (commands, command_rx) = mpsc::unbounded_channel();
        let (snapshot_tx, snapshot) = watch::channel(RealtimeSnapshot::default());

        let driver = Driver {
            options,
            transport,
            commands: command_rx,
            snapshot: snapshot_tx,
            attempt: 0,
        };
        let task = tokio::spawn(driver.run());

        Self {
            commands,
            snapshot,
            task: Some(task),
        }
    }

    pub fn snapshot(&self) -> RealtimeSnapshot {
        self.snapshot.borrow().clone()
    }

    pub fn state(&self) -> ConnectionState {
        self.snapshot.borrow().state.clone()
    }

    /// Receiver that is notified on every snapshot change.
    pub fn subscribe(&self) -> watch::Receiver<RealtimeSnapshot> {
        self.snapshot.clone()
    }

    /// Close the current connection and open a fresh one with the backoff
    /// counter reset.
    pub fn reconnect(&self) {
        let _ = self.commands.send(Command::Reconnect);
    }

    /// Ask the driver to close the connection and stop.
    pub fn close(&self) {
        let _ = self.commands.send(Command::Shutdown);
    }

    /// Close and wait until the driver task has finished.
    pub async fn shutdown(mut self) {
        self.close();
        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                tracing::warn!("Realtime driver ended abnormally: {}", e);
            }
        }
    }
}

impl Drop for RealtimeClient {
    fn drop(&mut self) {
        self.close();
    }
}

enum SessionEnd {
    Closed,
    Reconnect,
    Shutdown,
}

enum Next {
    Connect,
    Shutdown,
}

/// Owns the connection, the retry counter and every timer.
struct Driver {
    options: RealtimeOptions,
    transport: Arc<dyn Transport>,
    commands: mpsc::UnboundedReceiver<Command>,
    snapshot: watch::Sender<RealtimeSnapshot>,
    /// Consecutive failed connections since the last successful open
    attempt: u32,
}

impl Driver {
    async fn run(mut self) {
        loop {
            self.set_state(ConnectionState::Connecting);

            let end = match self.open().await {
                Ok(conn) => {
                    self.attempt = 0;
                    self.set_state(ConnectionState::Connected);
                    tracing::info!("Realtime socket connected to {}", self.options.url);
                    self.drive(conn).await
                }
                Err(end) => end,
            };

            self.set_state(ConnectionState::Disconnected);

            let next = match end {
                SessionEnd::Shutdown => Next::Shutdown,
                SessionEnd::Reconnect => {
                    self.attempt = 0;
                    Next::Connect
                }
                SessionEnd::Closed => self.schedule_reconnect().await,
            };

            if let Next::Shutdown = next {
                tracing::debug!("Realtime driver for {} stopped", self.options.url);
                return;
            }
        }
    }

    async fn open(&mut self) -> Result<Box<dyn Connection>, SessionEnd> {
        let transport = self.transport.clone();
        let url = self.options.url.clone();

        tokio::select! {
            result = transport.connect(&url) => result.map_err(|e| {
                tracing::warn!("Realtime connection to {} failed: {}", url, e);
                self.record_error(e);
                SessionEnd::Closed
            }),
            cmd = self.commands.recv() => Err(interrupted(cmd)),
        }
    }

    async fn drive(&mut self, mut conn: Box<dyn Connection>) -> SessionEnd {
        let mut keepalive = self
            .options
            .ping_interval
            .filter(|period| !period.is_zero())
            .map(|period| {
                let mut ticker = time::interval_at(Instant::now() + period, period);
                ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
                ticker
            });

        loop {
            tokio::select! {
                cmd = self.commands.recv() => {
                    conn.close().await;
                    return interrupted(cmd);
                }
                frame = conn.next_frame() => match frame {
                    Some(Ok(Frame::Text(text))) => self.apply_text(&text),
                    Some(Ok(Frame::Other)) => {}
                    Some(Err(e)) => {
                        tracing::warn!("Realtime transport error: {}", e);
                        self.record_error(e);
                    }
                    None => {
                        tracing::info!("Realtime socket to {} closed", self.options.url);
                        return SessionEnd::Closed;
                    }
                },
                _ = next_tick(&mut keepalive) => {
                    if let Err(e) = send_ping(conn.as_mut()).await {
                        tracing::warn!("Realtime keepalive failed: {}", e);
                        self.record_error(e);
                    }
                }
            }
        }
    }

    /// Wait out the backoff for the next attempt, or park until a manual
    /// reconnect once the policy is exhausted.
    async fn schedule_reconnect(&mut self) -> Next {
        let delay = if self.options.auto_reconnect {
            self.options.reconnect.next_delay(self.attempt)
        } else {
            None
        };

        let Some(delay) = delay else {
            if self.options.auto_reconnect {
                tracing::warn!(
                    "Giving up on {} after {} reconnect attempts",
                    self.options.url,
                    self.attempt
                );
            }
            let cmd = self.commands.recv().await;
            return self.after_command(cmd);
        };

        self.attempt += 1;
        tracing::info!(
            "Reconnecting to {} in {}ms (attempt {})",
            self.options.url,
            delay.as_millis(),
            self.attempt
        );
        self.set_state(ConnectionState::ReconnectScheduled {
            attempt: self.attempt,
            delay,
        });

        tokio::select! {
            _ = time::sleep(delay) => Next::Connect,
            cmd = self.commands.recv() => self.after_command(cmd),
        }
    }

    fn after_command(&mut self, cmd: Option<Command>) -> Next {
        match cmd {
            Some(Command::Reconnect) => {
                self.attempt = 0;
                Next::Connect
            }
            Some(Command::Shutdown) | None => Next::Shutdown,
        }
    }

    fn apply_text(&self, text: &str) {
        let message = match serde_json::from_str::<RawRealtimeMessage>(text) {
            Ok(message) => message,
            Err(e) => {
                tracing::error!("Failed to parse realtime message: {}", e);
                self.record_error(RealtimeError::Parse(e.to_string()));
                return;
            }
        };

        let stats = match message.stats() {
            Some(Ok(stats)) => stats,
            Some(Err(e)) => {
                tracing::error!("Failed to decode {:?} stats: {}", message.kind, e);
                self.record_error(RealtimeError::Parse(e.to_string()));
                return;
            }
            None => {
                tracing::debug!("Ignoring realtime message of type {:?}", message.kind);
                return;
            }
        };

        self.snapshot.send_modify(|snapshot| {
            if let Some(visitors) = stats.current_visitors {
                snapshot.current_visitors = Some(visitors);
            }
            snapshot.latest = Some(stats);
        });
    }

    fn record_error(&self, error: RealtimeError) {
        self.snapshot
            .send_modify(|snapshot| snapshot.last_error = Some(error));
    }

    fn set_state(&self, state: ConnectionState) {
        self.snapshot.send_if_modified(|snapshot| {
            if snapshot.state == state {
                return false;
            }
            snapshot.state = state;
            true
        });
    }
}

fn interrupted(cmd: Option<Command>) -> SessionEnd {
    match cmd {
        Some(Command::Reconnect) => SessionEnd::Reconnect,
        Some(Command::Shutdown) | None => SessionEnd::Shutdown,
    }
}

async fn next_tick(ticker: &mut Option<Interval>) {
    match ticker {
        Some(ticker) => {
            ticker.tick().await;
        }
        None => std::future::pending().await,
    }
}

async fn send_ping(conn: &mut dyn Connection) -> Result<(), RealtimeError> {
    let json = serde_json::to_string(&RealtimeMessage::ping())
        .map_err(|e| RealtimeError::Transport(e.to_string()))?;
    conn.send_text(json).await
}
