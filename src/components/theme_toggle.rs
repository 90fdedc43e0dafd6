use leptos::prelude::*;

use crate::state::ui::UiState;

/// Light/dark switch backed by `util::dark_mode`.
#[component]
pub fn ThemeToggle() -> impl IntoView {
    let ui = expect_context::<RwSignal<UiState>>();

    view! {
        <button
            class="btn theme-toggle"
            on:click=move |_| {
                let current = ui.get().dark_mode;
                let next = crate::util::dark_mode::toggle(current);
                ui.update(|u| u.dark_mode = next);
            }
            title="Toggle dark mode"
        >
            {move || if ui.get().dark_mode { "☀" } else { "☾" }}
        </button>
    }
}
