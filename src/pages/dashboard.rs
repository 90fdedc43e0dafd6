//! Dashboard page listing the signed-in user's books.
//!
//! SYSTEM CONTEXT
//! ==============
//! Authenticated landing route. Fetches the library once per mount and
//! drives download and delete. Book failures surface as notices and never
//! touch the session.

use leptos::prelude::*;
use leptos_router::components::A;

use crate::components::book_card::BookCard;
use crate::components::confirm_dialog::ConfirmDialog;
use crate::components::main_layout::MainLayout;
use crate::components::notice::notify;
use crate::net::types::Book;
use crate::state::auth::BrowserSession;
use crate::state::library::LibraryState;
use crate::state::ui::{NoticeKind, UiState};

#[component]
pub fn DashboardPage() -> impl IntoView {
    let session = expect_context::<BrowserSession>();
    let ui = expect_context::<RwSignal<UiState>>();
    let library = RwSignal::new(LibraryState::default());

    load_books(session.clone(), library);

    let download_session = session.clone();
    let on_download = Callback::new(move |book: Book| {
        let session = download_session.clone();
        leptos::task::spawn_local(async move {
            let Some(token) = super::current_token(&session) else {
                return;
            };
            let saved = session
                .backend()
                .download_book(&token, book.id)
                .await
                .map_err(|e| e.to_string())
                .and_then(|download| crate::util::browser::save_download(&download));
            if let Err(e) = saved {
                log::warn!("download of book {} failed: {e}", book.id);
                notify(ui, NoticeKind::Error, "Failed to download book");
            }
        });
    });

    let on_delete_request = Callback::new(move |book: Book| library.update(|s| s.pending_delete = Some(book)));
    let on_delete_cancel = Callback::new(move |()| library.update(|s| s.pending_delete = None));
    let on_delete_confirm = Callback::new(move |()| {
        let Some(book) = library.get_untracked().pending_delete else {
            return;
        };
        let Some(token) = super::current_token(&session) else {
            return;
        };
        library.update(|s| s.deleting = true);
        let session = session.clone();
        leptos::task::spawn_local(async move {
            let result = session.backend().delete_book(&token, book.id).await;
            library.update(|s| {
                s.deleting = false;
                s.pending_delete = None;
            });
            match result {
                Ok(()) => {
                    library.update(|s| s.remove(book.id));
                    notify(ui, NoticeKind::Success, "Book deleted successfully");
                }
                Err(e) => {
                    log::warn!("delete of book {} failed: {e}", book.id);
                    notify(ui, NoticeKind::Error, "Failed to delete book");
                }
            }
        });
    });

    view! {
        <MainLayout>
            <div class="dashboard-page">
                <header class="dashboard-page__header">
                    <h1>"My Library"</h1>
                    <A href="/upload" attr:class="btn btn--primary">"Upload Book"</A>
                </header>
                <Show when=move || library.get().error.is_some()>
                    <p class="dashboard-page__error">{move || library.get().error.unwrap_or_default()}</p>
                </Show>
                <Show when=move || !library.get().loading fallback=move || view! { <p>"Loading books..."</p> }>
                    <Show
                        when=move || !library.get().is_empty()
                        fallback=move || {
                            view! {
                                <div class="dashboard-page__empty">
                                    <p>"No books yet."</p>
                                    <A href="/upload" attr:class="btn">"Upload your first book"</A>
                                </div>
                            }
                        }
                    >
                        <div class="dashboard-page__cards">
                            {move || {
                                library
                                    .get()
                                    .items
                                    .into_iter()
                                    .map(|book| {
                                        view! {
                                            <BookCard book=book on_download=on_download on_delete=on_delete_request/>
                                        }
                                    })
                                    .collect_view()
                            }}
                        </div>
                    </Show>
                </Show>
            </div>
            {move || {
                library
                    .get()
                    .pending_delete
                    .map(|book| {
                        view! {
                            <ConfirmDialog
                                title="Delete book".to_owned()
                                message=format!("Delete \"{}\"? This cannot be undone.", book.title)
                                busy=Signal::derive(move || library.get().deleting)
                                on_confirm=on_delete_confirm
                                on_cancel=on_delete_cancel
                            />
                        }
                    })
            }}
        </MainLayout>
    }
}

fn load_books(session: BrowserSession, library: RwSignal<LibraryState>) {
    let Some(token) = super::current_token(&session) else {
        return;
    };
    library.update(LibraryState::start_loading);
    leptos::task::spawn_local(async move {
        match session.backend().list_books(&token).await {
            Ok(items) => library.update(|s| s.loaded(items)),
            Err(e) => {
                log::warn!("book list failed: {e}");
                library.update(|s| s.failed(e.to_string()));
            }
        }
    });
}
