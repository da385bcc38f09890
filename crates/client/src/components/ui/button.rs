use dioxus::prelude::*;

#[derive(Clone, Copy, PartialEq, Eq, Default)]
pub enum ButtonVariant {
    #[default]
    Primary,
    Ghost,
}

#[derive(Props, Clone, PartialEq)]
pub struct ButtonProps {
    #[props(optional)]
    pub variant: Option<ButtonVariant>,
    #[props(optional)]
    pub disabled: Option<bool>,
    #[props(optional)]
    pub onclick: Option<EventHandler<MouseEvent>>,
    pub children: Element,
}

#[component]
pub fn Button(props: ButtonProps) -> Element {
    let disabled = props.disabled.unwrap_or(false);
    let variant_class = match props.variant.unwrap_or_default() {
        ButtonVariant::Primary => "bg-indigo-600 text-white hover:bg-indigo-500",
        ButtonVariant::Ghost => "bg-transparent text-gray-300 hover:bg-white/10",
    };

    rsx! {
        button {
            class: "inline-flex items-center rounded-md px-3 py-1.5 text-sm font-medium disabled:opacity-50 {variant_class}",
            r#type: "button",
            disabled,
            onclick: move |evt| {
                if disabled {
                    return;
                }
                if let Some(handler) = &props.onclick {
                    handler.call(evt);
                }
            },
            {props.children}
        }
    }
}
