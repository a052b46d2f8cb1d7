use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub(crate) struct ConfirmDialogProps {
    pub title: String,
    pub body: String,
    /// Disables the confirm button while the operation runs.
    #[prop_or_default]
    pub busy: bool,
    pub on_confirm: Callback<()>,
    pub on_cancel: Callback<()>,
}

/// Modal confirmation step used by every destructive action.
#[function_component(ConfirmDialog)]
pub(crate) fn confirm_dialog(props: &ConfirmDialogProps) -> Html {
    let on_confirm = {
        let cb = props.on_confirm.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let on_cancel = {
        let cb = props.on_cancel.clone();
        Callback::from(move |_| cb.emit(()))
    };

    html! {
        <div class="dialog-overlay" role="dialog" aria-modal="true">
            <div class="card">
                <header>
                    <h3>{props.title.clone()}</h3>
                </header>
                <p>{props.body.clone()}</p>
                <div class="actions">
                    <button class="ghost" onclick={on_cancel}>{"Cancel"}</button>
                    <button class="danger" disabled={props.busy} onclick={on_confirm}>
                        {"Delete"}
                    </button>
                </div>
            </div>
        </div>
    }
}
