//! Upload page: pick a book file, give it a title, send it.

#[cfg(test)]
#[path = "upload_test.rs"]
mod upload_test;

use std::time::Duration;

use leptos::prelude::*;

use crate::components::main_layout::MainLayout;
use crate::net::error::ApiError;
use crate::state::auth::BrowserSession;

/// Delay between a successful upload and the move back to the dashboard.
pub const REDIRECT_DELAY: Duration = Duration::from_secs(2);

/// Check the form before sending and return the trimmed title.
///
/// # Errors
///
/// Returns the message to show for the first missing field.
pub fn validate_upload(has_file: bool, title: &str) -> Result<String, &'static str> {
    if !has_file {
        return Err("Please select a file");
    }
    let title = title.trim();
    if title.is_empty() {
        return Err("Please enter a title");
    }
    Ok(title.to_owned())
}

/// Server `detail` when present, else a generic retry message.
pub fn upload_error_message(error: &ApiError) -> String {
    error
        .detail()
        .map_or_else(|| "Failed to upload book. Please try again.".to_owned(), str::to_owned)
}

#[component]
pub fn UploadPage() -> impl IntoView {
    let session = expect_context::<BrowserSession>();
    let title = RwSignal::new(String::new());
    let error = RwSignal::new(None::<String>);
    let success = RwSignal::new(None::<String>);
    let busy = RwSignal::new(false);
    let file_input = NodeRef::<leptos::html::Input>::new();

    #[cfg(feature = "hydrate")]
    let navigate = leptos_router::hooks::use_navigate();

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        #[cfg(feature = "hydrate")]
        let file = file_input.get().and_then(|input| input.files()).and_then(|files| files.get(0));
        #[cfg(not(feature = "hydrate"))]
        let file: Option<()> = None;

        let title_value = match validate_upload(file.is_some(), &title.get()) {
            Ok(t) => t,
            Err(msg) => {
                error.set(Some(msg.to_owned()));
                return;
            }
        };
        let Some(token) = super::current_token(&session) else {
            return;
        };
        error.set(None);
        success.set(None);
        busy.set(true);

        #[cfg(feature = "hydrate")]
        {
            let session = session.clone();
            let navigate = navigate.clone();
            leptos::task::spawn_local(async move {
                let Some(file) = file else {
                    return;
                };
                match session.backend().upload_book(&token, &file, &title_value).await {
                    Ok(book) => {
                        log::info!("uploaded book {}", book.id);
                        success.set(Some("Book uploaded successfully!".to_owned()));
                        title.set(String::new());
                        if let Some(input) = file_input.get_untracked() {
                            input.set_value("");
                        }
                        busy.set(false);
                        gloo_timers::future::sleep(REDIRECT_DELAY).await;
                        navigate("/dashboard", leptos_router::NavigateOptions::default());
                    }
                    Err(e) => {
                        log::warn!("upload failed: {e}");
                        error.set(Some(upload_error_message(&e)));
                        busy.set(false);
                    }
                }
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (file, token, title_value);
            busy.set(false);
        }
    };

    view! {
        <MainLayout>
            <div class="upload-page">
                <h1>"Upload Book"</h1>
                <p class="upload-page__subtitle">"Add a new eBook to your library"</p>
                <form class="upload-form" on:submit=on_submit>
                    <label class="upload-form__label">
                        "Title"
                        <input
                            class="upload-form__input"
                            type="text"
                            placeholder="Enter book title"
                            prop:value=move || title.get()
                            on:input=move |ev| title.set(event_target_value(&ev))
                        />
                    </label>
                    <label class="upload-form__label">
                        "Book File"
                        <input class="upload-form__input" type="file" accept=".pdf,.epub" node_ref=file_input/>
                    </label>
                    <p class="upload-form__hint">"Supported formats: PDF, EPUB"</p>
                    <Show when=move || error.get().is_some()>
                        <p class="upload-form__error">{move || error.get().unwrap_or_default()}</p>
                    </Show>
                    <Show when=move || success.get().is_some()>
                        <p class="upload-form__success">{move || success.get().unwrap_or_default()}</p>
                    </Show>
                    <button class="btn btn--primary" type="submit" disabled=move || busy.get()>
                        {move || if busy.get() { "Uploading..." } else { "Upload Book" }}
                    </button>
                </form>
            </div>
        </MainLayout>
    }
}
