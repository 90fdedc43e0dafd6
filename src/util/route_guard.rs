//! Route access rules shared by every page.
//!
//! SYSTEM CONTEXT
//! ==============
//! Route components must apply identical redirect behavior. The decision is a
//! pure function of the page's access level and the session status; the
//! reactive wiring only re-runs it when the status changes.

#[cfg(test)]
#[path = "route_guard_test.rs"]
mod route_guard_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;

use crate::state::auth::{BrowserSession, SessionStatus};

pub const LOGIN_PATH: &str = "/login";
pub const LANDING_PATH: &str = "/dashboard";

/// Who may see a page.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Access {
    /// Signed-in users only; anonymous visitors go to the login page.
    Protected,
    /// Signed-out visitors only (login, landing); signed-in users go to the dashboard.
    PublicOnly,
    /// Everyone.
    #[default]
    Unrestricted,
}

/// What a guarded route should do right now.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuardDecision {
    /// Session still restoring: show a neutral placeholder, do not redirect.
    Placeholder,
    Render,
    Redirect(&'static str),
}

pub fn guard_decision(access: Access, status: SessionStatus) -> GuardDecision {
    match (access, status) {
        (Access::Unrestricted, _) => GuardDecision::Render,
        (_, SessionStatus::Loading) => GuardDecision::Placeholder,
        (Access::Protected, SessionStatus::Anonymous) => GuardDecision::Redirect(LOGIN_PATH),
        (Access::PublicOnly, SessionStatus::Authenticated) => GuardDecision::Redirect(LANDING_PATH),
        (Access::Protected, SessionStatus::Authenticated) | (Access::PublicOnly, SessionStatus::Anonymous) => {
            GuardDecision::Render
        }
    }
}

/// Navigate away whenever the session status settles into a state `access`
/// does not allow.
pub fn install_route_guard<F>(session: BrowserSession, access: Access, navigate: F)
where
    F: Fn(&str, NavigateOptions) + Clone + 'static,
{
    let status = Memo::new(move |_| session.status());
    Effect::new(move || {
        if let GuardDecision::Redirect(path) = guard_decision(access, status.get()) {
            log::debug!("route guard redirect to {path}");
            navigate(path, NavigateOptions { replace: true, ..NavigateOptions::default() });
        }
    });
}
