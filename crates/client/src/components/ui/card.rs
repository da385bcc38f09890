use dioxus::prelude::*;

#[derive(Props, Clone, PartialEq)]
pub struct CardProps {
    #[props(optional)]
    pub title: Option<String>,
    pub children: Element,
}

#[component]
pub fn Card(props: CardProps) -> Element {
    rsx! {
        section { class: "rounded-xl border border-white/10 bg-slate-900/80 p-5 shadow-lg",
            if let Some(title) = &props.title {
                h2 { class: "mb-3 text-lg font-semibold text-white", "{title}" }
            }
            {props.children}
        }
    }
}
