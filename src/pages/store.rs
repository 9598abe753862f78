//! Store landing page.
//!
//! SYSTEM CONTEXT
//! ==============
//! Public route. Shows who is signed in, a sign-out control, and one shelf of
//! games: personalized picks for signed-in users, otherwise the general
//! recommendations filtered by the cached preference tags.

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use leptos::prelude::*;

use crate::app::{AppActions, AppSession};
use crate::error::ApiError;
use crate::net::api_apps::{self, DEFAULT_PERSONALIZED_LIMIT, ShelfQuery};
use crate::net::pipeline::ApiClient;
use crate::net::types::AppSummary;
use crate::state::session::UserSnapshot;
use crate::util::preferences::{UserPreferences, load_preferences};
use crate::util::storage::{BrowserStorage, TierKind};

const SHELF_SIZE: u32 = 12;

fn greeting(user: &UserSnapshot) -> String {
    let name = user
        .nickname
        .as_deref()
        .or(user.username.as_deref())
        .filter(|n| !n.trim().is_empty())
        .map(str::to_owned)
        .or_else(|| user.user_id.map(|id| format!("player #{id}")));
    match name {
        Some(name) => format!("Welcome back, {name}"),
        None => "Welcome to the store".to_owned(),
    }
}

fn shelf_query(preferences: Option<&UserPreferences>) -> ShelfQuery {
    ShelfQuery {
        page_index: Some(0),
        page_size: Some(SHELF_SIZE),
        tag: preferences.and_then(|p| p.tags.first().cloned()),
    }
}

fn price_label(app: &AppSummary) -> String {
    match app.final_price.or(app.price) {
        Some(price) if price > 0.0 => format!("${price:.2}"),
        Some(_) => "Free".to_owned(),
        None => String::new(),
    }
}

async fn load_shelf(client: &impl ApiClient, signed_in: bool, query: &ShelfQuery) -> Result<Vec<AppSummary>, ApiError> {
    if signed_in {
        return api_apps::get_personalized_recommendations(client, DEFAULT_PERSONALIZED_LIMIT).await;
    }
    Ok(api_apps::get_recommendations(client, query).await?.content)
}

#[component]
pub fn StorePage() -> impl IntoView {
    let actions = expect_context::<AppActions>();
    let session = expect_context::<AppSession>();

    let games = RwSignal::new(Vec::<AppSummary>::new());
    let error = RwSignal::new(None::<String>);
    let loading = RwSignal::new(true);

    let signed_in = move || session.with(|s| s.current_token().is_some());
    let is_admin = move || session.with(|s| s.is_admin());
    let headline = move || session.with(|s| greeting(&s.current_user()));

    {
        let actions = actions.clone();
        let preferences = load_preferences(&BrowserStorage::new(TierKind::Durable));
        let query = shelf_query(preferences.as_ref());
        let signed_in = session.with_untracked(|s| s.current_token().is_some());
        leptos::task::spawn_local(async move {
            match load_shelf(actions.pipeline(), signed_in, &query).await {
                Ok(list) => games.set(list),
                Err(e) => error.set(Some(e.user_message())),
            }
            loading.set(false);
        });
    }

    let on_logout = move |_| actions.logout();

    view! {
        <div class="store-page">
            <header class="store-page__header">
                <h1>{headline}</h1>
                <Show
                    when=signed_in
                    fallback=|| view! {
                        <a class="btn" href="/login">"Sign In"</a>
                        <a class="btn" href="/join">"Join"</a>
                    }
                >
                    <Show when=is_admin>
                        <a class="btn" href="/admin">"Admin"</a>
                    </Show>
                    <a class="btn" href="/wishlist">"Wishlist"</a>
                    <button class="btn" on:click=on_logout.clone()>"Sign Out"</button>
                </Show>
            </header>
            <Show when=move || error.get().is_some()>
                <p class="store-page__error">{move || error.get().unwrap_or_default()}</p>
            </Show>
            <Show when=move || !loading.get() fallback=|| view! { <p>"Loading games..."</p> }>
                <ul class="store-page__shelf">
                    {move || {
                        games
                            .get()
                            .into_iter()
                            .map(|app| {
                                let href = format!("/app/{}", app.app_id);
                                let price = price_label(&app);
                                view! {
                                    <li class="store-card">
                                        <a href=href>{app.name}</a>
                                        <span class="store-card__price">{price}</span>
                                    </li>
                                }
                            })
                            .collect_view()
                    }}
                </ul>
            </Show>
        </div>
    }
}
