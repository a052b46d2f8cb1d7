use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub(crate) struct MessageBoxProps {
    pub message: String,
    #[prop_or_default]
    pub error: bool,
}

/// Inline status line under a form or panel.
#[function_component(MessageBox)]
pub(crate) fn message_box(props: &MessageBoxProps) -> Html {
    let class = if props.error { "error-text" } else { "muted" };
    html! { <p class={class}>{props.message.clone()}</p> }
}
