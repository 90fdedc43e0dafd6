use leptos::prelude::*;
use leptos_router::components::A;

use crate::util::browser::current_year;

#[component]
pub fn Footer() -> impl IntoView {
    view! {
        <footer class="footer">
            <span class="footer__copyright">{format!("© {} Boimarker", current_year())}</span>
            <nav class="footer__links">
                <A href="/terms">"Terms"</A>
                <A href="/privacy">"Privacy"</A>
                <A href="/contact">"Contact"</A>
            </nav>
        </footer>
    }
}
