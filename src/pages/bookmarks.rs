//! Bookmarks page: searchable in-memory collection with add/edit/delete.

use leptos::prelude::*;

use crate::components::main_layout::MainLayout;
use crate::components::notice::notify;
use crate::state::bookmarks::{Bookmark, BookmarkDraft, BookmarksState, display_date};
use crate::state::ui::{NoticeKind, UiState};

#[derive(Clone, Copy)]
enum DraftField {
    Title,
    Url,
    Description,
    Tags,
}

impl DraftField {
    fn of(self, draft: &mut BookmarkDraft) -> &mut String {
        match self {
            Self::Title => &mut draft.title,
            Self::Url => &mut draft.url,
            Self::Description => &mut draft.description,
            Self::Tags => &mut draft.tags,
        }
    }
}

#[component]
pub fn BookmarksPage() -> impl IntoView {
    let bookmarks = expect_context::<RwSignal<BookmarksState>>();
    let ui = expect_context::<RwSignal<UiState>>();
    let draft = RwSignal::new(BookmarkDraft::default());
    let form_error = RwSignal::new(None::<&'static str>);

    let open_add = move |_| {
        draft.set(BookmarkDraft::default());
        form_error.set(None);
        bookmarks.update(|s| {
            s.editing = None;
            s.dialog_open = true;
        });
    };
    let open_edit = Callback::new(move |bookmark: Bookmark| {
        draft.set(BookmarkDraft::from_bookmark(&bookmark));
        form_error.set(None);
        bookmarks.update(|s| {
            s.editing = Some(bookmark.id);
            s.dialog_open = true;
        });
    });
    let on_delete = Callback::new(move |id: u64| {
        bookmarks.update(|s| s.remove(id));
        notify(ui, NoticeKind::Success, "Bookmark deleted");
    });
    let close_dialog = move || bookmarks.update(|s| s.dialog_open = false);

    let on_save = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let current = draft.get();
        let mut result = Ok(0);
        let now = crate::util::browser::now_iso();
        bookmarks.update(|s| result = s.save(s.editing, &current, &now));
        match result {
            Ok(_) => {
                close_dialog();
                notify(ui, NoticeKind::Success, "Bookmark saved");
            }
            Err(msg) => form_error.set(Some(msg)),
        }
    };

    let field = move |slot: DraftField| {
        move |ev: leptos::ev::Event| {
            let value = event_target_value(&ev);
            draft.update(|d| *slot.of(d) = value);
        }
    };

    view! {
        <MainLayout>
            <div class="bookmarks-page">
                <header class="bookmarks-page__header">
                    <h1>"Bookmarks"</h1>
                    <button class="btn btn--primary" on:click=open_add>"Add Bookmark"</button>
                </header>
                <input
                    class="bookmarks-page__search"
                    type="search"
                    placeholder="Search bookmarks..."
                    prop:value=move || bookmarks.get().query
                    on:input=move |ev| bookmarks.update(|s| s.query = event_target_value(&ev))
                />
                <div class="bookmarks-page__tags">
                    {move || {
                        bookmarks
                            .get()
                            .all_tags()
                            .into_iter()
                            .map(|tag| {
                                let value = tag.clone();
                                view! {
                                    <button
                                        class="tag-chip"
                                        on:click=move |_| bookmarks.update(|s| s.query = value.clone())
                                    >
                                        {tag}
                                    </button>
                                }
                            })
                            .collect_view()
                    }}
                </div>
                <Show
                    when=move || !bookmarks.get().filtered().is_empty()
                    fallback=|| view! { <p class="bookmarks-page__empty">"No bookmarks found."</p> }
                >
                    <ul class="bookmarks-page__list">
                        {move || {
                            bookmarks
                                .get()
                                .filtered()
                                .into_iter()
                                .map(|b| view! { <BookmarkRow bookmark=b on_edit=open_edit on_delete=on_delete/> })
                                .collect_view()
                        }}
                    </ul>
                </Show>
            </div>
            <Show when=move || bookmarks.get().dialog_open>
                <div class="dialog-backdrop" on:click=move |_| close_dialog()>
                    <form class="dialog" on:click=|ev| ev.stop_propagation() on:submit=on_save>
                        <h2>{move || if bookmarks.get().editing.is_some() { "Edit Bookmark" } else { "Add Bookmark" }}</h2>
                        <input
                            class="dialog__input"
                            placeholder="Title"
                            prop:value=move || draft.get().title
                            on:input=field(DraftField::Title)
                        />
                        <input
                            class="dialog__input"
                            placeholder="https://example.com"
                            prop:value=move || draft.get().url
                            on:input=field(DraftField::Url)
                        />
                        <textarea
                            class="dialog__input"
                            placeholder="Description"
                            prop:value=move || draft.get().description
                            on:input=field(DraftField::Description)
                        ></textarea>
                        <input
                            class="dialog__input"
                            placeholder="Tags, comma separated"
                            prop:value=move || draft.get().tags
                            on:input=field(DraftField::Tags)
                        />
                        <Show when=move || form_error.get().is_some()>
                            <p class="dialog__error">{move || form_error.get().unwrap_or_default()}</p>
                        </Show>
                        <div class="dialog__actions">
                            <button class="btn" type="button" on:click=move |_| close_dialog()>"Cancel"</button>
                            <button class="btn btn--primary" type="submit">"Save"</button>
                        </div>
                    </form>
                </div>
            </Show>
        </MainLayout>
    }
}

#[component]
fn BookmarkRow(bookmark: Bookmark, on_edit: Callback<Bookmark>, on_delete: Callback<u64>) -> impl IntoView {
    let id = bookmark.id;
    let date = display_date(&bookmark.created_at).to_owned();
    let tags = bookmark.tags.clone();
    let edit_target = bookmark.clone();

    view! {
        <li class="bookmark-row">
            <div class="bookmark-row__main">
                <a class="bookmark-row__title" href=bookmark.url.clone() target="_blank" rel="noopener noreferrer">
                    {bookmark.title.clone()}
                </a>
                <p class="bookmark-row__description">{bookmark.description.clone()}</p>
                <div class="bookmark-row__tags">
                    {tags.into_iter().map(|t| view! { <span class="tag-chip tag-chip--static">{t}</span> }).collect_view()}
                </div>
                <span class="bookmark-row__date">{date}</span>
            </div>
            <div class="bookmark-row__actions">
                <button class="btn" on:click=move |_| on_edit.run(edit_target.clone())>"Edit"</button>
                <button class="btn btn--danger" on:click=move |_| on_delete.run(id)>"Delete"</button>
            </div>
        </li>
    }
}
