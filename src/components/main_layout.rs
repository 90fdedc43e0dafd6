//! Page chrome for signed-in routes: navigation, identity, footer.
//!
//! SYSTEM CONTEXT
//! ==============
//! Wraps every protected page. Logout only clears the session; the route
//! guard around the page observes the status change and moves to `/login`.

use leptos::prelude::*;
use leptos_router::components::A;

use crate::components::footer::Footer;
use crate::components::notice::NoticeBanner;
use crate::components::theme_toggle::ThemeToggle;
use crate::state::auth::BrowserSession;

/// Navigation entries as `(href, label)`.
pub const NAV_LINKS: [(&str, &str); 3] = [("/dashboard", "Dashboard"), ("/upload", "Upload"), ("/bookmarks", "Bookmarks")];

#[component]
pub fn MainLayout(children: Children) -> impl IntoView {
    let session = expect_context::<BrowserSession>();
    let identity_session = session.clone();
    let identity = move || identity_session.identity().unwrap_or_else(|| "me".to_owned());

    let on_logout = move |_| session.logout();

    view! {
        <div class="layout">
            <header class="layout__header toolbar">
                <A href="/dashboard" attr:class="toolbar__brand">"Boimarker"</A>
                <span class="toolbar__divider" aria-hidden="true"></span>
                <nav class="toolbar__nav">
                    {NAV_LINKS
                        .iter()
                        .map(|(href, label)| view! { <A href=*href attr:class="toolbar__link">{*label}</A> })
                        .collect_view()}
                </nav>
                <span class="toolbar__spacer"></span>
                <ThemeToggle/>
                <span class="toolbar__self">{identity}</span>
                <button class="btn toolbar__logout" on:click=on_logout title="Logout">
                    "Logout"
                </button>
            </header>
            <NoticeBanner/>
            <main class="layout__main">{children()}</main>
            <Footer/>
        </div>
    }
}

/// Layout for public pages: brand, theme toggle, notices and footer only.
#[component]
pub fn PublicLayout(children: Children) -> impl IntoView {
    view! {
        <div class="layout layout--public">
            <header class="layout__header toolbar">
                <A href="/" attr:class="toolbar__brand">"Boimarker"</A>
                <span class="toolbar__spacer"></span>
                <ThemeToggle/>
            </header>
            <NoticeBanner/>
            <main class="layout__main">{children()}</main>
            <Footer/>
        </div>
    }
}
