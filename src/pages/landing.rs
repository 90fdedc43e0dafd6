use leptos::prelude::*;
use leptos_router::components::A;

use crate::components::main_layout::PublicLayout;

/// Public welcome page. Signed-in visitors are redirected by the route guard.
#[component]
pub fn LandingPage() -> impl IntoView {
    view! {
        <PublicLayout>
            <section class="landing">
                <h1>"Boimarker"</h1>
                <p class="landing__tagline">"Keep your eBooks and bookmarks in one place, and pick up reading where you left off."</p>
                <A href="/login" attr:class="btn btn--primary">"Get Started"</A>
            </section>
        </PublicLayout>
    }
}
