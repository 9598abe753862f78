//! Account registration page.
//!
//! Checks the form locally, asks the server whether the username and email
//! are free, then registers and sends the user to sign in. Chosen tags are
//! cached locally so the store can filter shelves before the first login.

#[cfg(test)]
#[path = "join_test.rs"]
mod join_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::app::AppActions;
use crate::error::ApiError;
use crate::net::api::{self, join_request};
use crate::net::pipeline::ApiClient;
use crate::net::types::JoinRequest;
use crate::util::preferences::{UserPreferences, parse_tags, save_preferences};
use crate::util::routes::LOGIN_PATH;
use crate::util::storage::{BrowserStorage, TierKind};
use crate::util::validate::{is_email_valid, is_password_valid};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
struct JoinForm {
    email: String,
    username: String,
    password: String,
    confirm: String,
    tags: String,
}

fn validate_join_form(form: &JoinForm) -> Result<JoinRequest, &'static str> {
    if form.email.trim().is_empty() || form.username.trim().is_empty() || form.password.is_empty() {
        return Err("Fill in email, username and password.");
    }
    if !is_email_valid(form.email.trim()) {
        return Err("Enter a valid email address.");
    }
    if !is_password_valid(&form.password) {
        return Err("Password needs at least 8 letters or digits, mixing upper case, lower case and digits.");
    }
    if form.password != form.confirm {
        return Err("Passwords do not match.");
    }
    Ok(join_request(&form.email, &form.username, &form.password, &parse_tags(&form.tags)))
}

/// Availability checks, then registration. `Ok(Err(msg))` is a form-level
/// refusal the user can fix.
async fn register(client: &impl ApiClient, request: &JoinRequest) -> Result<Result<(), &'static str>, ApiError> {
    if !api::check_username_available(client, &request.username).await? {
        return Ok(Err("That username is already taken."));
    }
    if !api::check_email_available(client, &request.email).await? {
        return Ok(Err("That email is already registered."));
    }
    api::join(client, request).await?;
    Ok(Ok(()))
}

#[component]
pub fn JoinPage() -> impl IntoView {
    let actions = expect_context::<AppActions>();
    let navigate = use_navigate();

    let form = RwSignal::new(JoinForm::default());
    let info = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() {
            return;
        }
        let request = match validate_join_form(&form.get_untracked()) {
            Ok(request) => request,
            Err(message) => {
                info.set(message.to_owned());
                return;
            }
        };
        busy.set(true);
        info.set("Creating account...".to_owned());
        let actions = actions.clone();
        let navigate = navigate.clone();

        leptos::task::spawn_local(async move {
            match register(actions.pipeline(), &request).await {
                Ok(Ok(())) => {
                    let preferences = UserPreferences { tags: request.tags.clone() };
                    save_preferences(&BrowserStorage::new(TierKind::Durable), &preferences);
                    leptos::logging::log!("join: registered {}", request.username);
                    navigate(LOGIN_PATH, NavigateOptions::default());
                }
                Ok(Err(message)) => info.set(message.to_owned()),
                Err(e) => info.set(e.user_message()),
            }
            busy.set(false);
        });
    };

    let field = move |placeholder: &'static str, kind: &'static str, get: fn(&JoinForm) -> String, set: fn(&mut JoinForm, String)| {
        view! {
            <input
                class="login-input"
                type=kind
                placeholder=placeholder
                prop:value=move || form.with(get)
                on:input=move |ev| {
                    let value = event_target_value(&ev);
                    form.update(|f| set(f, value));
                }
            />
        }
    };

    view! {
        <div class="login-page">
            <div class="login-card">
                <h1>"Create Account"</h1>
                <form class="login-form" on:submit=on_submit>
                    {field("Email", "email", |f| f.email.clone(), |f, v| f.email = v)}
                    {field("Username", "text", |f| f.username.clone(), |f, v| f.username = v)}
                    {field("Password", "password", |f| f.password.clone(), |f, v| f.password = v)}
                    {field("Confirm password", "password", |f| f.confirm.clone(), |f, v| f.confirm = v)}
                    {field("Favourite tags (comma separated)", "text", |f| f.tags.clone(), |f, v| f.tags = v)}
                    <button class="login-button" type="submit" disabled=move || busy.get()>
                        "Join"
                    </button>
                </form>
                <Show when=move || !info.get().is_empty()>
                    <p class="login-message">{move || info.get()}</p>
                </Show>
                <p class="login-card__footer">
                    "Already have an account? "
                    <a href=LOGIN_PATH>"Sign in"</a>
                </p>
            </div>
        </div>
    }
}
