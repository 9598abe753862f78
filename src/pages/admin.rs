//! Admin dashboard.
//!
//! Only reachable once the route guard has confirmed the admin role. Shows
//! the server statistics and the first page of accounts with an
//! enable/disable toggle per account.

#[cfg(test)]
#[path = "admin_test.rs"]
mod admin_test;

use leptos::prelude::*;
use serde_json::Value;

use crate::app::AppActions;
use crate::net::api_admin::{self, AdminUser};

const USER_PAGE_SIZE: u32 = 20;

/// `totalUsers` -> `Total users`.
fn humanize(key: &str) -> String {
    let mut out = String::with_capacity(key.len() + 4);
    for (i, ch) in key.chars().enumerate() {
        if i == 0 {
            out.extend(ch.to_uppercase());
        } else if ch.is_ascii_uppercase() {
            out.push(' ');
            out.push(ch.to_ascii_lowercase());
        } else if ch == '_' {
            out.push(' ');
        } else {
            out.push(ch);
        }
    }
    out
}

fn render_value(value: &Value) -> String {
    match value {
        Value::Null => "-".to_owned(),
        Value::String(s) => s.clone(),
        Value::Array(items) => format!("{} items", items.len()),
        other => other.to_string(),
    }
}

/// Flattens the statistics payload into label/value rows. Nested objects
/// contribute `Parent / child` labels.
fn statistic_rows(stats: &Value) -> Vec<(String, String)> {
    let mut rows = Vec::new();
    collect_rows(None, stats, &mut rows);
    rows
}

fn collect_rows(prefix: Option<&str>, value: &Value, rows: &mut Vec<(String, String)>) {
    match value {
        Value::Object(map) => {
            for (key, inner) in map {
                let label = match prefix {
                    Some(prefix) => format!("{prefix} / {}", humanize(key).to_lowercase()),
                    None => humanize(key),
                };
                collect_rows(Some(&label), inner, rows);
            }
        }
        scalar => rows.push((prefix.unwrap_or("Value").to_owned(), render_value(scalar))),
    }
}

fn user_label(user: &AdminUser) -> String {
    let name = user.username.clone().unwrap_or_else(|| "(unnamed)".to_owned());
    match user.email.as_deref() {
        Some(email) => format!("{name} <{email}>"),
        None => name,
    }
}

#[component]
pub fn AdminPage() -> impl IntoView {
    let actions = expect_context::<AppActions>();

    let stats = RwSignal::new(Vec::<(String, String)>::new());
    let users = RwSignal::new(Vec::<AdminUser>::new());
    let error = RwSignal::new(None::<String>);

    {
        let actions = actions.clone();
        leptos::task::spawn_local(async move {
            match api_admin::get_statistics(actions.pipeline()).await {
                Ok(value) => stats.set(statistic_rows(&value)),
                Err(e) => error.set(Some(e.user_message())),
            }
            match api_admin::get_users(actions.pipeline(), 0, USER_PAGE_SIZE).await {
                Ok(page) => users.set(page.content),
                Err(e) => error.set(Some(e.user_message())),
            }
        });
    }

    let toggle = move |user_id: i64, enabled: bool| {
        let actions = actions.clone();
        leptos::task::spawn_local(async move {
            match api_admin::update_user_status(actions.pipeline(), user_id, enabled).await {
                Ok(()) => users.update(|list| {
                    if let Some(user) = list.iter_mut().find(|u| u.user_id == Some(user_id)) {
                        user.enabled = Some(enabled);
                    }
                }),
                Err(e) => error.set(Some(e.user_message())),
            }
        });
    };

    view! {
        <div class="admin-page">
            <h1>"Admin Dashboard"</h1>
            <Show when=move || error.get().is_some()>
                <p class="admin-page__error">{move || error.get().unwrap_or_default()}</p>
            </Show>
            <section class="admin-page__stats">
                <h2>"Statistics"</h2>
                <dl>
                    {move || {
                        stats
                            .get()
                            .into_iter()
                            .map(|(label, value)| view! { <dt>{label}</dt><dd>{value}</dd> })
                            .collect_view()
                    }}
                </dl>
            </section>
            <section class="admin-page__users">
                <h2>"Accounts"</h2>
                <ul>
                    {move || {
                        let toggle = toggle.clone();
                        users
                            .get()
                            .into_iter()
                            .map(|user| {
                                let label = user_label(&user);
                                let enabled = user.enabled.unwrap_or(true);
                                let user_id = user.user_id;
                                let toggle = toggle.clone();
                                view! {
                                    <li>
                                        <span>{label}</span>
                                        <button
                                            class="btn"
                                            disabled=user_id.is_none()
                                            on:click=move |_| {
                                                if let Some(id) = user_id {
                                                    toggle(id, !enabled);
                                                }
                                            }
                                        >
                                            {if enabled { "Disable" } else { "Enable" }}
                                        </button>
                                    </li>
                                }
                            })
                            .collect_view()
                    }}
                </ul>
            </section>
        </div>
    }
}
