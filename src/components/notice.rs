//! Transient notice banner and the helper pages use to raise one.

use std::time::Duration;

use leptos::prelude::*;

use crate::state::ui::{NoticeKind, UiState};

/// How long a notice stays on screen.
pub const NOTICE_TIMEOUT: Duration = Duration::from_secs(4);

/// Show `message` and schedule its dismissal.
///
/// A newer notice is never cleared by an older notice's timer.
pub fn notify(ui: RwSignal<UiState>, kind: NoticeKind, message: impl Into<String>) {
    let message = message.into();
    match kind {
        NoticeKind::Error => log::warn!("notice: {message}"),
        NoticeKind::Success => log::info!("notice: {message}"),
    }
    let mut seq = 0;
    ui.update(|u| seq = u.push_notice(kind, message));

    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(async move {
        gloo_timers::future::sleep(NOTICE_TIMEOUT).await;
        ui.update(|u| u.dismiss_notice(seq));
    });
    #[cfg(not(feature = "hydrate"))]
    let _ = seq;
}

fn notice_class(kind: NoticeKind) -> &'static str {
    match kind {
        NoticeKind::Success => "notice notice--success",
        NoticeKind::Error => "notice notice--error",
    }
}

#[component]
pub fn NoticeBanner() -> impl IntoView {
    let ui = expect_context::<RwSignal<UiState>>();

    move || {
        ui.get().notice.map(|notice| {
            let seq = notice.seq;
            view! {
                <div class=notice_class(notice.kind) role="status">
                    <span class="notice__message">{notice.message}</span>
                    <button
                        class="notice__close"
                        title="Dismiss"
                        on:click=move |_| ui.update(|u| u.dismiss_notice(seq))
                    >
                        "×"
                    </button>
                </div>
            }
        })
    }
}
