//! Reader page for a single book.
//!
//! SYSTEM CONTEXT
//! ==============
//! Loads book metadata, the file bytes and any saved position, then renders
//! PDFs in an iframe opened at that page. Other formats get a download
//! hint. A missing progress record is normal for a fresh book.

#[cfg(test)]
#[path = "read_test.rs"]
mod read_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::{use_navigate, use_params_map};

use crate::components::main_layout::MainLayout;
use crate::components::notice::notify;
use crate::net::types::Book;
use crate::state::auth::BrowserSession;
use crate::state::ui::{NoticeKind, UiState};

/// Parse a route id; only positive integers name a book.
pub fn parse_book_id(raw: &str) -> Option<i64> {
    raw.trim().parse::<i64>().ok().filter(|id| *id > 0)
}

/// A saved position usable as a PDF page number.
pub fn normalize_position(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    trimmed.parse::<u32>().ok().filter(|page| *page > 0).map(|_| trimmed.to_owned())
}

/// Iframe source for a PDF object URL, opened at `position` when known.
pub fn pdf_src(object_url: &str, position: Option<&str>) -> String {
    let mut src = format!("{object_url}#toolbar=1&navpanes=1&scrollbar=1");
    if let Some(page) = position.and_then(normalize_position) {
        src.push_str("&page=");
        src.push_str(&page);
    }
    src
}

#[derive(Clone, Debug, Default)]
struct ReaderState {
    book: Option<Book>,
    file_url: Option<String>,
    loading: bool,
    error: Option<String>,
}

#[component]
pub fn ReadPage() -> impl IntoView {
    let session = expect_context::<BrowserSession>();
    let ui = expect_context::<RwSignal<UiState>>();
    let params = use_params_map();
    let navigate = use_navigate();
    let reader = RwSignal::new(ReaderState { loading: true, ..ReaderState::default() });
    let position = RwSignal::new("1".to_owned());
    let saved_position = RwSignal::new(None::<String>);
    let saving = RwSignal::new(false);

    let book_id = params.with_untracked(|p| p.get("id").as_deref().and_then(parse_book_id));
    match (book_id, super::current_token(&session)) {
        (Some(id), Some(token)) => load_book(session.clone(), token, id, reader, position, saved_position),
        (None, _) => {
            log::warn!("invalid book id in route");
            Effect::new(move || navigate("/dashboard", NavigateOptions { replace: true, ..NavigateOptions::default() }));
        }
        // The route guard redirects anonymous visitors.
        (Some(_), None) => {}
    }

    on_cleanup(move || {
        if let Some(url) = reader.get_untracked().file_url {
            crate::util::browser::revoke_object_url(&url);
        }
    });

    let on_save = Callback::new(move |()| {
        let (Some(id), Some(token)) = (book_id, super::current_token(&session)) else {
            return;
        };
        let Some(value) = normalize_position(&position.get()) else {
            notify(ui, NoticeKind::Error, "Please enter a valid page number");
            return;
        };
        saving.set(true);
        let session = session.clone();
        leptos::task::spawn_local(async move {
            match session.backend().save_progress(&token, id, &value).await {
                Ok(progress) => {
                    saved_position.set(Some(progress.position));
                    notify(ui, NoticeKind::Success, "Progress saved");
                }
                Err(e) => {
                    log::warn!("saving progress for book {id} failed: {e}");
                    notify(ui, NoticeKind::Error, "Failed to save progress");
                }
            }
            saving.set(false);
        });
    });

    let viewer = move || {
        let state = reader.get();
        let (Some(book), Some(url)) = (state.book, state.file_url) else {
            return view! { <p class="read-page__pending">"Preparing book..."</p> }.into_any();
        };
        if book.is_pdf() {
            let src = pdf_src(&url, saved_position.get().as_deref());
            view! { <iframe class="read-page__frame" src=src title=book.title></iframe> }.into_any()
        } else {
            let filename = if book.filename.is_empty() { format!("book_{}", book.id) } else { book.filename };
            view! {
                <div class="read-page__unsupported">
                    <p class="read-page__unsupported-title">"EPUB Reader"</p>
                    <p>"EPUB viewing is not supported in the browser yet."</p>
                    <a class="btn" href=url download=filename>"Download Instead"</a>
                </div>
            }
            .into_any()
        }
    };

    view! {
        <MainLayout>
            <Show
                when=move || !reader.get().loading
                fallback=move || view! { <p class="read-page__loading">"Loading your book..."</p> }
            >
                <Show
                    when=move || reader.get().error.is_none()
                    fallback=move || {
                        view! {
                            <div class="read-page__error">
                                <h1>"Error"</h1>
                                <p>{move || reader.get().error.unwrap_or_default()}</p>
                                <a class="btn" href="/dashboard">"Back to Dashboard"</a>
                            </div>
                        }
                    }
                >
                    <div class="read-page">
                        <header class="read-page__header">
                            <a class="btn btn--ghost" href="/dashboard" title="Back to Dashboard">"←"</a>
                            <h1 class="read-page__title">
                                {move || reader.get().book.map(|b| b.title).unwrap_or_default()}
                            </h1>
                            <span class="toolbar__spacer"></span>
                            <label class="read-page__position">
                                "Page"
                                <input
                                    type="number"
                                    min="1"
                                    prop:value=move || position.get()
                                    on:input=move |ev| position.set(event_target_value(&ev))
                                />
                            </label>
                            <button class="btn" on:click=move |_| on_save.run(()) disabled=move || saving.get()>
                                {move || if saving.get() { "Saving..." } else { "Save Progress" }}
                            </button>
                        </header>
                        <div class="read-page__viewer">{viewer}</div>
                    </div>
                </Show>
            </Show>
        </MainLayout>
    }
}

fn load_book(
    session: BrowserSession,
    token: String,
    book_id: i64,
    reader: RwSignal<ReaderState>,
    position: RwSignal<String>,
    saved_position: RwSignal<Option<String>>,
) {
    leptos::task::spawn_local(async move {
        let backend = session.backend();
        let book = match backend.get_book(&token, book_id).await {
            Ok(book) => book,
            Err(e) => {
                log::warn!("loading book {book_id} failed: {e}");
                reader.update(|s| {
                    s.loading = false;
                    s.error = Some(format!("Failed to load the book: {e}"));
                });
                return;
            }
        };
        let file_url = match backend.download_book(&token, book_id).await {
            Ok(download) => crate::util::browser::object_url(&download),
            Err(e) => Err(e.to_string()),
        };
        let file_url = match file_url {
            Ok(url) => url,
            Err(e) => {
                log::warn!("loading file for book {book_id} failed: {e}");
                reader.update(|s| {
                    s.loading = false;
                    s.error = Some("Failed to download the book file".to_owned());
                });
                return;
            }
        };
        match backend.get_progress(&token, book_id).await {
            Ok(Some(progress)) => {
                if let Some(page) = normalize_position(&progress.position) {
                    position.set(page.clone());
                    saved_position.set(Some(page));
                }
            }
            Ok(None) => {}
            Err(e) => log::debug!("no progress for book {book_id}: {e}"),
        }
        if let Err(orphaned) = attach_file(reader, book, file_url) {
            log::debug!("reader for book {book_id} closed before the file arrived");
            crate::util::browser::revoke_object_url(&orphaned);
        }
    });
}

/// Hand the loaded file to the page. Gives the URL back when the page has
/// already been torn down, so the caller can revoke it.
fn attach_file(reader: RwSignal<ReaderState>, book: Book, file_url: String) -> Result<(), String> {
    let stored = reader.try_update(|s| {
        s.book = Some(book);
        s.file_url = Some(file_url.clone());
        s.loading = false;
    });
    match stored {
        Some(()) => Ok(()),
        None => Err(file_url),
    }
}
