//! Login page with a register toggle.
//!
//! SYSTEM CONTEXT
//! ==============
//! Public-only route. A successful login flips the session to
//! authenticated and the surrounding route guard moves on to `/dashboard`;
//! this page never navigates by itself.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use leptos::prelude::*;

use crate::components::main_layout::PublicLayout;
use crate::net::types::Credentials;
use crate::state::auth::{AuthError, BrowserSession};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormMode {
    Login,
    Register,
}

impl FormMode {
    pub fn other(self) -> Self {
        match self {
            Self::Login => Self::Register,
            Self::Register => Self::Login,
        }
    }

    fn heading(self) -> &'static str {
        match self {
            Self::Login => "Sign in",
            Self::Register => "Create an account",
        }
    }

    fn submit_label(self) -> &'static str {
        match self {
            Self::Login => "Login",
            Self::Register => "Register",
        }
    }

    fn switch_label(self) -> &'static str {
        match self {
            Self::Login => "Need an account? Register",
            Self::Register => "Already registered? Login",
        }
    }
}

/// Trim the email and require both fields before any network call.
///
/// # Errors
///
/// Returns the message to show when a field is missing.
pub fn validate_credentials(email: &str, password: &str) -> Result<Credentials, &'static str> {
    let email = email.trim();
    if email.is_empty() {
        return Err("Please enter your email");
    }
    if password.is_empty() {
        return Err("Please enter your password");
    }
    Ok(Credentials::new(email, password))
}

/// Message shown for a failed login or register attempt.
pub fn failure_message(error: &AuthError) -> Option<String> {
    match error {
        AuthError::Superseded => None,
        AuthError::Rejected { detail, .. } => Some(detail.clone()),
        AuthError::Unavailable => Some("Server unavailable. Please try again.".to_owned()),
        AuthError::Storage(_) => Some("Could not save your session in this browser.".to_owned()),
    }
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let session = expect_context::<BrowserSession>();
    let mode = RwSignal::new(FormMode::Login);
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let error = RwSignal::new(None::<String>);
    let busy = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let credentials = match validate_credentials(&email.get(), &password.get()) {
            Ok(c) => c,
            Err(msg) => {
                error.set(Some(msg.to_owned()));
                return;
            }
        };
        error.set(None);
        busy.set(true);

        let session = session.clone();
        let current = mode.get();
        leptos::task::spawn_local(async move {
            let result = match current {
                FormMode::Login => session.login(credentials).await,
                FormMode::Register => match session.register(&credentials).await {
                    Ok(()) => session.login(credentials).await,
                    Err(e) => Err(e),
                },
            };
            if let Err(e) = result {
                error.set(failure_message(&e));
            }
            busy.set(false);
        });
    };

    view! {
        <PublicLayout>
            <div class="login-page">
                <div class="login-card">
                    <h1>"Boimarker"</h1>
                    <p class="login-card__subtitle">{move || mode.get().heading()}</p>
                    <form class="login-form" on:submit=on_submit>
                        <input
                            class="login-input"
                            type="email"
                            placeholder="Email"
                            prop:value=move || email.get()
                            on:input=move |ev| email.set(event_target_value(&ev))
                        />
                        <input
                            class="login-input"
                            type="password"
                            placeholder="Password"
                            prop:value=move || password.get()
                            on:input=move |ev| password.set(event_target_value(&ev))
                        />
                        <button class="btn btn--primary login-button" type="submit" disabled=move || busy.get()>
                            {move || if busy.get() { "Please wait..." } else { mode.get().submit_label() }}
                        </button>
                    </form>
                    <Show when=move || error.get().is_some()>
                        <p class="login-card__error">{move || error.get().unwrap_or_default()}</p>
                    </Show>
                    <button
                        class="btn btn--link login-card__switch"
                        on:click=move |_| {
                            mode.update(|m| *m = m.other());
                            error.set(None);
                        }
                    >
                        {move || mode.get().switch_label()}
                    </button>
                </div>
            </div>
        </PublicLayout>
    }
}
