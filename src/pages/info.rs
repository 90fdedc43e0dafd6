//! Static information pages: contact, terms, privacy.
//!
//! These render inside the public layout for every visitor regardless of
//! session state.

use leptos::prelude::*;

use crate::components::main_layout::PublicLayout;
use crate::components::notice::notify;
use crate::state::ui::{NoticeKind, UiState};

const LAST_UPDATED: &str = "Last updated: June 18, 2025";

#[component]
pub fn ContactPage() -> impl IntoView {
    let ui = expect_context::<RwSignal<UiState>>();
    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        notify(ui, NoticeKind::Success, "Thanks for reaching out. We'll get back to you soon.");
    };

    view! {
        <PublicLayout>
            <div class="info-page">
                <h1>"Contact Us"</h1>
                <section class="info-card">
                    <h2>"Get in Touch"</h2>
                    <p>"Have questions or feedback? We'd love to hear from you."</p>
                    <h3>"Email"</h3>
                    <p>"support@boimarker.com"</p>
                    <h3>"Office"</h3>
                    <p>"123 Bookmark Avenue" <br/> "San Francisco, CA 94107" <br/> "United States"</p>
                    <h3>"Hours"</h3>
                    <p>"Monday - Friday: 9:00 AM - 5:00 PM" <br/> "Weekend: Closed"</p>
                </section>
                <section class="info-card">
                    <h2>"Send a Message"</h2>
                    <form class="contact-form" on:submit=on_submit>
                        <input class="contact-form__input" placeholder="Your name"/>
                        <input class="contact-form__input" type="email" placeholder="Your email"/>
                        <textarea class="contact-form__input" placeholder="Your message" rows="4"></textarea>
                        <button class="btn btn--primary" type="submit">"Send Message"</button>
                    </form>
                </section>
            </div>
        </PublicLayout>
    }
}

#[component]
pub fn TermsPage() -> impl IntoView {
    view! {
        <PublicLayout>
            <article class="info-page">
                <h1>"Terms of Service"</h1>
                <p class="info-page__updated">{LAST_UPDATED}</p>
                <h2>"1. Introduction"</h2>
                <p>"By using Boimarker you agree to these terms. If you do not agree, do not use the service."</p>
                <h2>"2. Your Account"</h2>
                <p>"You are responsible for keeping your credentials safe and for all activity under your account."</p>
                <h2>"3. Your Content"</h2>
                <p>"You keep ownership of the books and bookmarks you upload. Only upload files you have the right to store."</p>
                <h2>"4. Termination"</h2>
                <p>"We may suspend accounts that violate these terms."</p>
            </article>
        </PublicLayout>
    }
}

#[component]
pub fn PrivacyPage() -> impl IntoView {
    view! {
        <PublicLayout>
            <article class="info-page">
                <h1>"Privacy Policy"</h1>
                <p class="info-page__updated">{LAST_UPDATED}</p>
                <h2>"Information we collect"</h2>
                <p>"Your email address, the files you upload, and your reading progress."</p>
                <h2>"How we use information"</h2>
                <p>"We use the information we collect from all our services to:"</p>
                <ul>
                    <li>"Provide, maintain, and improve our services"</li>
                    <li>"Develop new services and features"</li>
                    <li>"Protect Boimarker and our users"</li>
                </ul>
                <h2>"Sharing"</h2>
                <p>"We do not share personal information except:"</p>
                <ul>
                    <li>"With your consent"</li>
                    <li>"For legal reasons"</li>
                </ul>
            </article>
        </PublicLayout>
    }
}
