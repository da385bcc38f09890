use dioxus::core::Task;
use dioxus::prelude::*;

use super::{use_api_client, use_client_config};
use crate::visit_gate::{GateState, VisitGate};

/// Visit-gate state plus a way to re-run the check.
#[derive(Clone)]
pub struct UseVisitorStatus {
    state: Signal<GateState>,
    gate: VisitGate,
    task: Signal<Option<Task>>,
}

impl UseVisitorStatus {
    pub fn state(&self) -> GateState {
        self.state.cloned()
    }

    pub fn has_access(&self) -> bool {
        self.state.read().has_access()
    }

    pub fn is_loading(&self) -> bool {
        self.state.read().is_loading
    }

    /// Re-run the check; an in-flight check is cancelled first.
    pub fn refresh(&self) {
        let mut task = self.task;
        if let Some(previous) = task.write().take() {
            previous.cancel();
        }
        task.set(Some(spawn_resolve(self.gate.clone(), self.state)));
    }
}

fn spawn_resolve(gate: VisitGate, mut state: Signal<GateState>) -> Task {
    spawn(async move {
        state.write().is_loading = true;
        let next = gate.resolve().await;
        state.set(next);
    })
}

/// Hook that checks the visitor status once on mount.
pub fn use_visitor_status() -> UseVisitorStatus {
    let config = use_client_config();
    let client = use_api_client();
    let state = use_signal(GateState::loading);
    let gate = use_hook(move || VisitGate::new(client, config.retry.clone()));

    let initial = gate.clone();
    let task = use_signal(move || Some(spawn_resolve(initial, state)));

    UseVisitorStatus { state, gate, task }
}
