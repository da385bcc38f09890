//! Dioxus hooks binding the client's owning objects to component lifecycles.
//!
//! Each hook creates its object on mount and tears it down on unmount;
//! components only read the mirrored state signals.

mod polling;
mod realtime;
mod visit_gate;

use dioxus::prelude::*;

use crate::api_client::ApiClient;
use crate::config::ClientConfig;

pub use polling::{use_polling, UsePolling};
pub use realtime::{use_realtime_analytics, UseRealtime};
pub use visit_gate::{use_visitor_status, UseVisitorStatus};

/// Client configuration from context, falling back to the environment.
pub fn use_client_config() -> ClientConfig {
    use_hook(|| {
        try_consume_context::<ClientConfig>().unwrap_or_else(|| {
            ClientConfig::from_env().unwrap_or_else(|e| {
                tracing::warn!("{}; using default backend", e);
                ClientConfig::default()
            })
        })
    })
}

/// Shared API client from context, so every hook uses one cookie jar.
pub fn use_api_client() -> ApiClient {
    let config = use_client_config();
    use_hook(move || {
        try_consume_context::<ApiClient>().unwrap_or_else(|| ApiClient::from_config(&config))
    })
}
