use dioxus::prelude::*;

/// Pulsing placeholder shown while data loads.
#[component]
pub fn Skeleton(#[props(default = 3)] lines: usize) -> Element {
    rsx! {
        div { class: "animate-pulse space-y-2",
            for i in 0..lines {
                div { key: "{i}", class: "h-4 rounded bg-white/10" }
            }
        }
    }
}
