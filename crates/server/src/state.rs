//! Application state shared across request handlers.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use maicivy_shared::{RealtimeStats, VisitorStatus, FREE_VISITS};
use tokio::sync::RwLock;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Visit count per session cookie value.
    sessions: Arc<RwLock<HashMap<String, u32>>>,
    live_sockets: Arc<AtomicU64>,
    total_events: Arc<AtomicU64>,
    letters_generated: Arc<AtomicU64>,
    pub heartbeat_interval: Duration,
}

impl AppState {
    pub fn new(heartbeat_interval: Duration) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            live_sockets: Arc::new(AtomicU64::new(0)),
            total_events: Arc::new(AtomicU64::new(0)),
            letters_generated: Arc::new(AtomicU64::new(0)),
            heartbeat_interval,
        }
    }

    /// Count one visit for `session_id` and return the resulting status.
    pub async fn record_visit(&self, session_id: &str) -> VisitorStatus {
        let visit_count = {
            let mut sessions = self.sessions.write().await;
            let count = sessions.entry(session_id.to_string()).or_insert(0);
            *count = count.saturating_add(1);
            *count
        };
        self.total_events.fetch_add(1, Ordering::Relaxed);

        VisitorStatus {
            visit_count,
            has_access: visit_count < FREE_VISITS,
            remaining_visits: FREE_VISITS.saturating_sub(visit_count),
            session_id: session_id.to_string(),
        }
    }

    pub async fn unique_visitors(&self) -> u64 {
        self.sessions.read().await.len() as u64
    }

    pub fn total_events(&self) -> u64 {
        self.total_events.load(Ordering::Relaxed)
    }

    pub fn letters_generated(&self) -> u64 {
        self.letters_generated.load(Ordering::Relaxed)
    }

    pub fn record_letter(&self) {
        self.letters_generated.fetch_add(1, Ordering::Relaxed);
        self.total_events.fetch_add(1, Ordering::Relaxed);
    }

    /// Track an open analytics socket; returns the new live count.
    pub fn socket_opened(&self) -> u64 {
        self.live_sockets.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub fn socket_closed(&self) {
        // Never underflow if a close races a failed open
        let _ = self
            .live_sockets
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1));
    }

    pub fn live_sockets(&self) -> u64 {
        self.live_sockets.load(Ordering::SeqCst)
    }

    /// Stats payload for realtime frames.
    pub async fn realtime_stats(&self) -> RealtimeStats {
        RealtimeStats {
            current_visitors: Some(self.live_sockets()),
            unique_today: self.unique_visitors().await,
            total_events: self.total_events(),
            letters_today: self.letters_generated(),
            timestamp: Some(chrono::Utc::now().timestamp().into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn third_visit_loses_access() {
        let state = AppState::new(Duration::from_secs(1));

        let first = state.record_visit("a").await;
        assert_eq!((first.visit_count, first.has_access, first.remaining_visits), (1, true, 2));

        state.record_visit("a").await;
        let third = state.record_visit("a").await;
        assert_eq!((third.visit_count, third.has_access, third.remaining_visits), (3, false, 0));

        let other = state.record_visit("b").await;
        assert_eq!(other.visit_count, 1);
        assert_eq!(state.unique_visitors().await, 2);
        assert_eq!(state.total_events(), 4);
    }

    #[test]
    fn socket_count_never_underflows() {
        let state = AppState::new(Duration::from_secs(1));
        state.socket_closed();
        assert_eq!(state.live_sockets(), 0);
        assert_eq!(state.socket_opened(), 1);
        state.socket_closed();
        assert_eq!(state.live_sockets(), 0);
    }
}
