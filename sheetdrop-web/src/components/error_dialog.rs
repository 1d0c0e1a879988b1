use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct ErrorDialogProps {
    /// The message to show; `None` keeps the dialog closed.
    pub message: Option<String>,
    pub on_close: Callback<()>,
}

/// Blocking modal for validation and upload failures.
#[function_component(ErrorDialog)]
pub fn error_dialog(props: &ErrorDialogProps) -> Html {
    let Some(message) = props.message.clone() else {
        return html! {};
    };

    let onclick = {
        let on_close = props.on_close.clone();
        Callback::from(move |_| on_close.emit(()))
    };

    html! {
        <div class="modal modal-open" role="alertdialog">
            <div class="modal-box">
                <h3 class="font-bold text-lg text-error">{"Something went wrong"}</h3>
                <p class="py-4">{message}</p>
                <div class="modal-action">
                    <button class="btn" onclick={onclick}>{"Close"}</button>
                </div>
            </div>
        </div>
    }
}
