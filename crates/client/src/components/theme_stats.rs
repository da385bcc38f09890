//! Per-theme view counts, refreshed on an interval.

use std::time::Duration;

use dioxus::prelude::*;
use maicivy_shared::{ApiEnvelope, ThemeViews, PATH_ANALYTICS_THEMES};

use super::ui::{Card, Skeleton};
use crate::hooks::use_polling;
use crate::polling::PollOptions;

const REFRESH: Duration = Duration::from_secs(30);

#[component]
pub fn ThemeStats() -> Element {
    let poll = use_polling::<ApiEnvelope<Vec<ThemeViews>>>(
        PollOptions::new(PATH_ANALYTICS_THEMES).every(REFRESH),
    );
    let state = poll.state();

    // Errors are logged by the poller; stale rows or the skeleton stay up
    let body = match &state.data {
        None => rsx! { Skeleton {} },
        Some(envelope) => rsx! {
            ul { class: "space-y-1",
                for row in envelope.data.iter() {
                    li { key: "{row.theme}", class: "flex justify-between text-sm text-gray-200",
                        span { "{row.theme}" }
                        span { class: "font-mono", "{row.views}" }
                    }
                }
            }
        },
    };

    rsx! {
        Card { title: "Views by theme".to_string(), {body} }
    }
}
