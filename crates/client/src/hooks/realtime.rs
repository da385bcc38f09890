use std::cell::Cell;
use std::rc::Rc;

use dioxus::core::Task;
use dioxus::prelude::*;

use super::use_client_config;
use crate::config::ClientConfig;
use crate::realtime::{ConnectionState, RealtimeClient, RealtimeSnapshot};

/// A client plus the task mirroring its snapshots into a signal.
struct Live {
    client: RealtimeClient,
    mirror: Task,
}

impl Live {
    fn start(
        config: &ClientConfig,
        auto_reconnect: bool,
        mut snapshot: Signal<RealtimeSnapshot>,
    ) -> Self {
        let client = RealtimeClient::connect(config, auto_reconnect);
        let mut updates = client.subscribe();
        let mirror = spawn(async move {
            while updates.changed().await.is_ok() {
                let next = updates.borrow_and_update().clone();
                snapshot.set(next);
            }
        });
        Self { client, mirror }
    }
}

/// Live view over one realtime connection.
#[derive(Clone, Copy)]
pub struct UseRealtime {
    snapshot: Signal<RealtimeSnapshot>,
    live: Signal<Live>,
}

impl UseRealtime {
    pub fn snapshot(&self) -> RealtimeSnapshot {
        self.snapshot.cloned()
    }

    pub fn state(&self) -> ConnectionState {
        self.snapshot.read().state.clone()
    }

    pub fn current_visitors(&self) -> Option<u64> {
        self.snapshot.read().current_visitors
    }

    pub fn reconnect(&self) {
        self.live.peek().client.reconnect();
    }
}

/// Hook owning a [`RealtimeClient`] for the lifetime of the component.
///
/// Changing `auto_reconnect` between renders closes the current client and
/// opens a new one with the new setting.
///
/// # Arguments
/// * `auto_reconnect` - reconnect with backoff after the socket closes
pub fn use_realtime_analytics(auto_reconnect: bool) -> UseRealtime {
    let config = use_client_config();
    let mut snapshot = use_signal(RealtimeSnapshot::default);
    let mut live = use_signal({
        let config = config.clone();
        move || Live::start(&config, auto_reconnect, snapshot)
    });
    let applied = use_hook(|| Rc::new(Cell::new(auto_reconnect)));

    use_effect(use_reactive((&auto_reconnect,), move |(auto_reconnect,)| {
        if applied.replace(auto_reconnect) == auto_reconnect {
            return;
        }
        tracing::debug!("Realtime auto-reconnect changed to {}", auto_reconnect);

        let mut slot = live.write();
        slot.mirror.cancel();
        snapshot.set(RealtimeSnapshot::default());
        // The replaced client shuts its driver down on drop
        let _previous = std::mem::replace(&mut *slot, Live::start(&config, auto_reconnect, snapshot));
    }));

    use_drop(move || {
        if let Ok(live) = live.try_peek() {
            live.mirror.cancel();
            live.client.close();
        }
    });

    UseRealtime { snapshot, live }
}
