//! Inline notice shown above every page.
//!
//! Auth flows push messages (permission denials, admin-only pages) into the
//! shared notice state; this banner shows the latest one until dismissed.

#[cfg(test)]
#[path = "notice_banner_test.rs"]
mod notice_banner_test;

use leptos::prelude::*;

use crate::app::AppNotices;
use crate::state::notice::NoticeState;

fn banner_text(state: &NoticeState) -> Option<String> {
    state.message.as_deref().map(str::trim).filter(|m| !m.is_empty()).map(str::to_owned)
}

/// Dismissible banner for the current notice, if any.
#[component]
pub fn NoticeBanner() -> impl IntoView {
    let notices = expect_context::<AppNotices>();

    let text = move || notices.with(banner_text);
    let on_dismiss = move |_| notices.update(NoticeState::dismiss);

    view! {
        <Show when=move || text().is_some()>
            <div class="notice-banner" role="alert">
                <span class="notice-banner__text">{move || text().unwrap_or_default()}</span>
                <button class="notice-banner__close" title="Dismiss" on:click=on_dismiss>
                    "x"
                </button>
            </div>
        </Show>
    }
}
