//! Sign-in page for `/login` and `/admin/login`.
//!
//! The admin entry point signs in the same way but only lands on the admin
//! dashboard when the account reports the admin role.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::{use_location, use_navigate};

use crate::app::AppActions;
use crate::state::auth::LoginOutcome;
use crate::state::cell::StateCell;
use crate::state::notice::ADMIN_REQUIRED_MESSAGE;
use crate::util::auth::safe_redirect_target;
use crate::util::routes::{self, HOME_PATH};
use crate::util::validate::validate_login_input;

const ADMIN_LOGIN_PATH: &str = "/admin/login";
const ADMIN_HOME_PATH: &str = "/admin";

/// Where to go once sign-in succeeded.
#[derive(Clone, Debug, PartialEq, Eq)]
enum LoginNext {
    Go(String),
    /// Admin entry point, but the account is not an admin.
    NotAdmin,
}

/// Notice for a sign-in whose profile fetch failed; the session stays.
fn identity_warning(outcome: &LoginOutcome) -> Option<String> {
    outcome
        .identity_refresh
        .as_ref()
        .err()
        .map(|e| format!("Signed in, but your profile could not be loaded. {}", e.user_message()))
}

fn next_after_login(redir: Option<&str>, admin_entry: bool, is_admin: bool) -> LoginNext {
    if admin_entry {
        return if is_admin { LoginNext::Go(ADMIN_HOME_PATH.to_owned()) } else { LoginNext::NotAdmin };
    }
    let target = redir.and_then(safe_redirect_target).unwrap_or(HOME_PATH);
    LoginNext::Go(target.to_owned())
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let actions = expect_context::<AppActions>();
    let location = use_location();
    let navigate = use_navigate();

    let username = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let remember_me = RwSignal::new(false);
    let info = RwSignal::new(String::new());
    let busy = RwSignal::new(false);
    let admin_entry = move || location.pathname.get() == ADMIN_LOGIN_PATH;

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() {
            return;
        }
        let (user, pass) = match validate_login_input(&username.get_untracked(), &password.get_untracked()) {
            Ok(fields) => fields,
            Err(message) => {
                info.set(message.to_owned());
                return;
            }
        };
        busy.set(true);
        info.set("Signing in...".to_owned());

        let search = location.search.get_untracked();
        let redir = routes::query_param(&format!("?{}", search.trim_start_matches('?')), "redir");
        let admin = location.pathname.get_untracked() == ADMIN_LOGIN_PATH;
        let remember = remember_me.get_untracked();
        let actions = actions.clone();
        let navigate = navigate.clone();

        leptos::task::spawn_local(async move {
            match actions.login(&user, &pass, remember).await {
                Ok(outcome) => {
                    if let Some(warning) = identity_warning(&outcome) {
                        actions.notices().write_with(|n| n.push(warning));
                    }
                    match next_after_login(redir.as_deref(), admin, actions.check_is_admin()) {
                        LoginNext::Go(target) => {
                            info.set(String::new());
                            navigate(&target, NavigateOptions::default());
                        }
                        LoginNext::NotAdmin => {
                            actions.notices().write_with(|n| n.push(ADMIN_REQUIRED_MESSAGE));
                            navigate(HOME_PATH, NavigateOptions::default());
                        }
                    }
                }
                Err(e) => info.set(e.user_message()),
            }
            password.set(String::new());
            busy.set(false);
        });
    };

    view! {
        <div class="login-page">
            <div class="login-card">
                <h1>{move || if admin_entry() { "Admin Sign In" } else { "Sign In" }}</h1>
                <form class="login-form" on:submit=on_submit>
                    <input
                        class="login-input"
                        type="text"
                        autocomplete="username"
                        placeholder="Username"
                        prop:value=move || username.get()
                        on:input=move |ev| username.set(event_target_value(&ev))
                    />
                    <input
                        class="login-input"
                        type="password"
                        autocomplete="current-password"
                        placeholder="Password"
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                    <label class="login-remember">
                        <input
                            type="checkbox"
                            prop:checked=move || remember_me.get()
                            on:change=move |ev| remember_me.set(event_target_checked(&ev))
                        />
                        "Remember me for 30 days"
                    </label>
                    <button class="login-button" type="submit" disabled=move || busy.get()>
                        "Sign In"
                    </button>
                </form>
                <Show when=move || !info.get().is_empty()>
                    <p class="login-message">{move || info.get()}</p>
                </Show>
                <Show when=move || !admin_entry()>
                    <p class="login-card__footer">
                        "New here? "
                        <a href="/join">"Create an account"</a>
                    </p>
                </Show>
            </div>
        </div>
    }
}
