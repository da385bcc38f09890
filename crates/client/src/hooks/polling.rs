use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use dioxus::core::Task;
use dioxus::prelude::*;
use serde::de::DeserializeOwned;

use super::use_api_client;
use crate::api_client::ApiClient;
use crate::polling::{OptionsChange, PollOptions, PollState, Poller};

/// A poller plus the task mirroring its state into a signal.
struct Live<T> {
    poller: Poller<T>,
    mirror: Task,
}

impl<T> Live<T>
where
    T: DeserializeOwned + Clone + Send + Sync + 'static,
{
    fn start(client: ApiClient, options: PollOptions, mut state: Signal<PollState<T>>) -> Self {
        let poller = Poller::spawn(client, options);
        let mut updates = poller.subscribe();
        let mirror = spawn(async move {
            while updates.changed().await.is_ok() {
                let next = updates.borrow_and_update().clone();
                state.set(next);
            }
        });
        Self { poller, mirror }
    }
}

fn initial_state<T>(options: &PollOptions) -> PollState<T> {
    PollState {
        data: None,
        error: None,
        is_loading: options.enabled,
    }
}

pub struct UsePolling<T: 'static> {
    state: Signal<PollState<T>>,
    live: Signal<Live<T>>,
}

impl<T: 'static> Clone for UsePolling<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: 'static> Copy for UsePolling<T> {}

impl<T> UsePolling<T>
where
    T: DeserializeOwned + Clone + Send + Sync + 'static,
{
    pub fn state(&self) -> PollState<T> {
        self.state.cloned()
    }

    pub fn data(&self) -> Option<T> {
        self.state.read().data.clone()
    }

    pub fn refetch(&self) {
        self.live.peek().poller.refetch();
    }

    pub fn set_interval(&self, interval: Option<Duration>) {
        self.live.peek().poller.set_interval(interval);
    }
}

/// Hook that polls `options.endpoint` for the lifetime of the component.
///
/// `options` are re-read on every render. A changed refresh interval
/// reschedules the running poller; a changed endpoint or enabled flag
/// replaces it.
pub fn use_polling<T>(options: PollOptions) -> UsePolling<T>
where
    T: DeserializeOwned + Clone + Send + Sync + 'static,
{
    let client = use_api_client();
    let mut state = use_signal(|| initial_state(&options));
    let mut live = use_signal({
        let client = client.clone();
        let options = options.clone();
        move || Live::start(client, options, state)
    });
    let applied = use_hook({
        let options = options.clone();
        move || Rc::new(RefCell::new(options))
    });

    use_effect(use_reactive((&options,), move |(options,)| {
        let previous = applied.replace(options.clone());
        match options.change_from(&previous) {
            OptionsChange::Unchanged => return,
            OptionsChange::Reschedule(interval) => {
                live.peek().poller.set_interval(interval);
                return;
            }
            OptionsChange::Restart => {}
        }

        tracing::debug!("Polling target changed to {} (enabled: {})", options.endpoint, options.enabled);
        let mut slot = live.write();
        slot.mirror.cancel();
        state.set(initial_state(&options));
        // The replaced poller cancels its schedule on drop
        let _previous = std::mem::replace(&mut *slot, Live::start(client.clone(), options, state));
    }));

    use_drop(move || {
        if let Ok(live) = live.try_peek() {
            live.mirror.cancel();
            live.poller.stop();
        }
    });

    UsePolling { state, live }
}
