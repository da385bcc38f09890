//! Live visitor counter fed by the realtime analytics socket.

use dioxus::prelude::*;

use super::ui::{Button, ButtonVariant, Card};
use crate::hooks::use_realtime_analytics;
use crate::realtime::ConnectionState;

#[derive(Props, Clone, PartialEq)]
pub struct ConnectionIndicatorProps {
    pub state: ConnectionState,
}

/// Colored dot for the socket state.
#[component]
pub fn ConnectionIndicator(props: ConnectionIndicatorProps) -> Element {
    let color_class = match props.state {
        ConnectionState::Connected => "bg-green-500",
        ConnectionState::Connecting | ConnectionState::ReconnectScheduled { .. } => {
            "bg-yellow-500"
        }
        ConnectionState::Disconnected => "bg-gray-500",
    };
    let title = props.state.to_string();

    rsx! {
        span {
            class: "w-2.5 h-2.5 {color_class} rounded-full inline-block",
            title: "{title}",
        }
    }
}

#[component]
pub fn LiveVisitors(#[props(default = true)] auto_reconnect: bool) -> Element {
    let realtime = use_realtime_analytics(auto_reconnect);
    let snapshot = realtime.snapshot();

    let count = snapshot
        .current_visitors
        .map_or_else(|| "-".to_string(), |n| n.to_string());
    let unique_today = snapshot.latest.as_ref().map(|s| s.unique_today);
    let offline = matches!(snapshot.state, ConnectionState::Disconnected);
    let on_reconnect = move |_| realtime.reconnect();

    rsx! {
        Card { title: "Live visitors".to_string(),
            div { class: "flex items-center gap-3",
                ConnectionIndicator { state: snapshot.state.clone() }
                span { class: "text-3xl font-bold text-white", "{count}" }
            }
            if let Some(unique) = unique_today {
                p { class: "mt-1 text-xs text-gray-400", "{unique} unique today" }
            }
            if offline {
                div { class: "mt-3",
                    Button { variant: ButtonVariant::Ghost, onclick: on_reconnect, "Reconnect" }
                }
            }
        }
    }
}
