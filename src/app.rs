//! Root application component with routing and context providers.

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    ParamSegment, StaticSegment,
    components::{Route, Router, Routes},
};

use crate::components::route_guard::RouteGuard;
use crate::config::ApiConfig;
use crate::net::api::ApiClient;
use crate::pages::{
    bookmarks::BookmarksPage,
    dashboard::DashboardPage,
    info::{ContactPage, PrivacyPage, TermsPage},
    landing::LandingPage,
    login::LoginPage,
    read::ReadPage,
    upload::UploadPage,
};
use crate::state::{auth::BrowserSession, bookmarks::BookmarksState, ui::UiState};
use crate::util::route_guard::Access;
use crate::util::token_store::LocalStorageTokenStore;

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
///
/// Provides the auth session, UI state and bookmark collection, restores any
/// persisted session once in the browser, and wraps every route in its
/// access guard.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let session = BrowserSession::new(LocalStorageTokenStore::default(), ApiClient::new(ApiConfig::from_env()));
    let ui = RwSignal::new(UiState::default());
    let bookmarks = RwSignal::new(BookmarksState::default());

    provide_context(session.clone());
    provide_context(ui);
    provide_context(bookmarks);

    // Effects only run in the browser, so SSR output stays in the loading
    // state and matches the first hydrated render.
    Effect::new(move || {
        session.restore();
        let dark = crate::util::dark_mode::read_preference();
        crate::util::dark_mode::apply(dark);
        ui.update(|u| u.dark_mode = dark);
    });

    view! {
        <Stylesheet id="leptos" href="/pkg/boimarker.css"/>
        <Title text="Boimarker - Bookmark Manager"/>

        <Router>
            <Routes fallback=|| "Page not found.".into_view()>
                <Route path=StaticSegment("") view=|| guarded(Access::PublicOnly, LandingPage)/>
                <Route path=StaticSegment("login") view=|| guarded(Access::PublicOnly, LoginPage)/>
                <Route path=StaticSegment("dashboard") view=|| guarded(Access::Protected, DashboardPage)/>
                <Route path=StaticSegment("upload") view=|| guarded(Access::Protected, UploadPage)/>
                <Route path=(StaticSegment("read"), ParamSegment("id")) view=|| guarded(Access::Protected, ReadPage)/>
                <Route path=StaticSegment("bookmarks") view=|| guarded(Access::Protected, BookmarksPage)/>
                <Route path=StaticSegment("contact") view=|| guarded(Access::Unrestricted, ContactPage)/>
                <Route path=StaticSegment("terms") view=|| guarded(Access::Unrestricted, TermsPage)/>
                <Route path=StaticSegment("privacy") view=|| guarded(Access::Unrestricted, PrivacyPage)/>
            </Routes>
        </Router>
    }
}

fn guarded<P, V>(access: Access, page: P) -> impl IntoView
where
    P: Fn() -> V + Copy + Send + Sync + 'static,
    V: IntoView + 'static,
{
    view! { <RouteGuard access=access>{move || page()}</RouteGuard> }
}
