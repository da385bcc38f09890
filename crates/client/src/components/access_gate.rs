//! Gate that shows its children only when the visit gate grants access.

use dioxus::prelude::*;
use maicivy_shared::FREE_VISITS;

use super::ui::{Button, ButtonVariant, Card, Skeleton};
use crate::hooks::use_visitor_status;

#[derive(Props, Clone, PartialEq)]
pub struct AccessGateProps {
    /// Rendered instead of the default locked notice.
    #[props(optional)]
    pub fallback: Option<Element>,
    pub children: Element,
}

#[component]
pub fn AccessGate(props: AccessGateProps) -> Element {
    let visitor = use_visitor_status();
    let state = visitor.state();

    if state.is_loading {
        return rsx! { Skeleton { lines: 4 } };
    }

    if state.has_access() {
        return rsx! { {props.children} };
    }

    if let Some(fallback) = props.fallback {
        return fallback;
    }

    let visits = state.status.as_ref().map_or(0, |s| s.visit_count);
    let on_refresh = move |_| visitor.refresh();

    rsx! {
        Card { title: "Access locked".to_string(),
            p { class: "text-sm text-gray-300",
                "You have used {visits} of {FREE_VISITS} free visits."
            }
            div { class: "mt-4",
                Button { variant: ButtonVariant::Ghost, onclick: on_refresh, "Check again" }
            }
        }
    }
}
