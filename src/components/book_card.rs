//! Card for one book in the dashboard library grid.
//!
//! DESIGN
//! ======
//! The card only raises callbacks; the dashboard owns download and delete
//! so failures land in one notice path.

#[cfg(test)]
#[path = "book_card_test.rs"]
mod book_card_test;

use leptos::prelude::*;
use leptos_router::components::A;

use crate::net::types::Book;

/// Short format label shown on a card.
pub fn format_label(book: &Book) -> &'static str {
    if book.is_pdf() { "PDF" } else { "EPUB" }
}

#[component]
pub fn BookCard(book: Book, on_download: Callback<Book>, on_delete: Callback<Book>) -> impl IntoView {
    let read_href = format!("/read/{}", book.id);
    let label = format_label(&book);
    let title = book.title.clone();
    let filename = book.filename.clone();
    let download_book = book.clone();

    view! {
        <div class="book-card">
            <div class="book-card__header">
                <span class="book-card__title">{title}</span>
                <span class="book-card__format">{label}</span>
            </div>
            <span class="book-card__filename">{filename}</span>
            <div class="book-card__actions">
                <A href=read_href attr:class="btn btn--primary">"Read"</A>
                <button class="btn" on:click=move |_| on_download.run(download_book.clone())>
                    "Download"
                </button>
                <button class="btn btn--danger" on:click=move |_| on_delete.run(book.clone())>
                    "Delete"
                </button>
            </div>
        </div>
    }
}
