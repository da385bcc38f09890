//! maicivy desktop shell
//!
//! Renders the live analytics widgets against the backend named by
//! `MAICIVY_API_URL`.

#![allow(non_snake_case)]

use dioxus::prelude::*;
use maicivy_client::components::{AccessGate, LiveVisitors, ThemeStats};
use maicivy_client::{logging, ApiClient, ClientConfig};

fn main() {
    logging::init("maicivy_client=debug");
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    use_context_provider(|| {
        ClientConfig::from_env().unwrap_or_else(|e| {
            tracing::warn!("{}; using default backend", e);
            ClientConfig::default()
        })
    });
    let config = use_context::<ClientConfig>();
    use_context_provider(|| ApiClient::from_config(&config));

    rsx! {
        main { class: "mx-auto max-w-3xl space-y-6 p-6",
            LiveVisitors {}
            AccessGate {
                ThemeStats {}
            }
        }
    }
}
