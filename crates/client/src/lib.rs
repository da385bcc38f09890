//! maicivy client layer
//!
//! Typed access to the maicivy backend: an HTTP client per data domain, a
//! reconnecting realtime analytics socket, the visit-gate resolver and a
//! polling helper. The `hooks` and `components` modules bind these to Dioxus
//! component lifecycles.

pub mod api;
pub mod api_client;
pub mod backoff;
pub mod components;
pub mod config;
pub mod hooks;
pub mod logging;
pub mod polling;
pub mod realtime;
pub mod visit_gate;

pub use api_client::ApiClient;
pub use backoff::{backoff, ReconnectPolicy, RetryPolicy};
pub use config::ClientConfig;
pub use polling::{OptionsChange, PollOptions, PollState, Poller};
pub use realtime::{ConnectionState, RealtimeClient, RealtimeOptions, RealtimeSnapshot};
pub use visit_gate::{GateState, VisitGate};
