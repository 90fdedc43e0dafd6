//! Wrapper that gates a route on the session status.
//!
//! DESIGN
//! ======
//! Holds no state of its own: the rendered branch and any redirect are both
//! derived from the session status memo, so nothing flickers while the
//! session is still restoring.

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::state::auth::BrowserSession;
use crate::util::route_guard::{Access, GuardDecision, guard_decision, install_route_guard};

#[component]
pub fn RouteGuard(access: Access, children: ChildrenFn) -> impl IntoView {
    let session = expect_context::<BrowserSession>();
    install_route_guard(session.clone(), access, use_navigate());

    let status = Memo::new(move |_| session.status());
    let decision = move || guard_decision(access, status.get());

    view! {
        <Show
            when=move || decision() == GuardDecision::Render
            fallback=move || {
                view! {
                    <div class="route-guard">
                        <p>{move || placeholder_text(decision())}</p>
                    </div>
                }
            }
        >
            {children()}
        </Show>
    }
}

fn placeholder_text(decision: GuardDecision) -> &'static str {
    match decision {
        GuardDecision::Redirect(_) => "Redirecting...",
        GuardDecision::Placeholder | GuardDecision::Render => "Loading...",
    }
}
