//! Modal yes/no confirmation used for destructive actions.

use leptos::prelude::*;

#[component]
pub fn ConfirmDialog(
    title: String,
    message: String,
    #[prop(default = "Delete".to_owned())] confirm_label: String,
    #[prop(into)] busy: Signal<bool>,
    on_confirm: Callback<()>,
    on_cancel: Callback<()>,
) -> impl IntoView {
    view! {
        <div class="dialog-backdrop" on:click=move |_| on_cancel.run(())>
            <div class="dialog" on:click=|ev| ev.stop_propagation()>
                <h2>{title}</h2>
                <p>{message}</p>
                <div class="dialog__actions">
                    <button class="btn" on:click=move |_| on_cancel.run(()) disabled=move || busy.get()>
                        "Cancel"
                    </button>
                    <button
                        class="btn btn--danger"
                        on:click=move |_| on_confirm.run(())
                        disabled=move || busy.get()
                    >
                        {move || if busy.get() { "Deleting...".to_owned() } else { confirm_label.clone() }}
                    </button>
                </div>
            </div>
        </div>
    }
}
