//! Route guard and other shared auth UI helpers.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every navigation runs through `route_decision` before the page is left
//! in place. The decision logic is plain async code over `AuthActions` so it
//! is tested without a router; `install_route_guard` wires it to Leptos.
//!
//! ORDER
//! =====
//! 1. Token without identity: refresh it. A failed refresh on an auth-only
//!    route sends the user to sign in.
//! 2. Admin route without the admin role: permission notice, back home.
//! 3. Auth route without a token: sign in, then come back.
//! 4. Otherwise allow.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::{use_location, use_navigate};

use super::routes::{self, HOME_PATH, LOGIN_PATH, RouteMeta, RouteName};
use crate::state::auth::AuthActions;
use crate::state::cell::StateCell;
use crate::state::notice::{ADMIN_REQUIRED_MESSAGE, NoticeState};
use crate::state::session::SessionState;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    Redirect(String),
}

/// `/login?redir=<full_path>` with the target percent-encoded.
pub fn login_redirect_path(full_path: &str) -> String {
    let encoded: String = url::form_urlencoded::byte_serialize(full_path.as_bytes()).collect();
    format!("{LOGIN_PATH}?redir={encoded}")
}

/// Only same-origin absolute paths are honored as redirect targets.
pub fn safe_redirect_target(target: &str) -> Option<&str> {
    (target.starts_with('/') && !target.starts_with("//")).then_some(target)
}

/// Entry rule for the sign-in page. Signed-in visitors go to their `redir`
/// target (or home); anonymous visitors that came from another page get a
/// `redir` pointing back at it. `None` means stay.
pub fn login_route_redirect(signed_in: bool, full_path: &str, from: Option<&str>) -> Option<String> {
    let redir = routes::query_param(full_path, "redir").filter(|r| !r.is_empty());
    if signed_in {
        let target = redir.as_deref().and_then(safe_redirect_target).unwrap_or(HOME_PATH);
        return Some(target.to_owned());
    }
    if redir.is_some() {
        return None;
    }
    let from = routes::path_only(from?);
    if from == HOME_PATH || from == LOGIN_PATH || from.is_empty() {
        return None;
    }
    Some(login_redirect_path(from))
}

/// Steps 1-4 for a resolved route.
pub async fn guard_navigation<S, N>(actions: &AuthActions<S, N>, full_path: &str, meta: RouteMeta) -> GuardDecision
where
    S: StateCell<SessionState>,
    N: StateCell<NoticeState>,
{
    if actions.session().read_with(SessionState::needs_identity) {
        if let Err(e) = actions.refresh_identity().await {
            leptos::logging::warn!("guard: identity refresh before {full_path} failed: {e}");
            if meta.requires_auth {
                return GuardDecision::Redirect(login_redirect_path(full_path));
            }
        }
    }

    if meta.requires_admin && !actions.check_is_admin() {
        leptos::logging::warn!("guard: {full_path} requires admin");
        actions.notices().write_with(|n| n.push(ADMIN_REQUIRED_MESSAGE));
        return GuardDecision::Redirect(HOME_PATH.to_owned());
    }

    let has_token = actions.session().read_with(|s| s.current_token().is_some());
    if meta.requires_auth && !has_token {
        return GuardDecision::Redirect(login_redirect_path(full_path));
    }
    GuardDecision::Allow
}

/// Full decision for a navigation to `full_path`, coming from `from` (the
/// last allowed path, `None` on first load).
pub async fn route_decision<S, N>(actions: &AuthActions<S, N>, full_path: &str, from: Option<&str>) -> GuardDecision
where
    S: StateCell<SessionState>,
    N: StateCell<NoticeState>,
{
    let Some(route) = routes::resolve(full_path) else {
        return GuardDecision::Redirect(HOME_PATH.to_owned());
    };

    let decision = guard_navigation(actions, full_path, route.def.meta).await;
    if decision != GuardDecision::Allow || route.def.name != RouteName::Login {
        return decision;
    }

    // A token whose identity could not be fetched does not count as signed in.
    let signed_in = actions.session().read_with(|s| s.current_token().is_some() && !s.needs_identity());
    match login_route_redirect(signed_in, full_path, from) {
        Some(target) => GuardDecision::Redirect(target),
        None => GuardDecision::Allow,
    }
}

/// Run `route_decision` on every location change and apply redirects.
///
/// Must be called under a `<Router>`. Decisions that finish after a newer
/// navigation started are dropped.
pub fn install_route_guard<S, N>(actions: AuthActions<S, N>)
where
    S: StateCell<SessionState>,
    N: StateCell<NoticeState>,
{
    let location = use_location();
    let navigate = use_navigate();
    let previous = StoredValue::new(None::<String>);
    let generation = StoredValue::new(0_u64);

    Effect::new(move || {
        let path = location.pathname.get();
        let search = location.search.get();
        let search = search.trim_start_matches('?');
        let full_path = if search.is_empty() { path } else { format!("{path}?{search}") };

        let seq = generation.get_value().wrapping_add(1);
        generation.set_value(seq);
        let from = previous.get_value();
        let actions = actions.clone();
        let navigate = navigate.clone();

        leptos::task::spawn_local(async move {
            let decision = route_decision(&actions, &full_path, from.as_deref()).await;
            if generation.get_value() != seq {
                return;
            }
            match decision {
                GuardDecision::Allow => previous.set_value(Some(full_path)),
                GuardDecision::Redirect(target) => {
                    leptos::logging::log!("guard: {full_path} -> {target}");
                    navigate(&target, NavigateOptions { replace: true, ..NavigateOptions::default() });
                }
            }
        });
    });
}

/// Send the user home whenever a logout asks the host to reset its views.
pub fn install_reset_redirect<F>(notices: RwSignal<NoticeState>, navigate: F)
where
    F: Fn(&str, NavigateOptions) + Clone + 'static,
{
    let seen = StoredValue::new(notices.with_untracked(|n| n.reset_seq));
    Effect::new(move || {
        let reset_seq = notices.with(|n| n.reset_seq);
        if reset_seq != seen.get_value() {
            seen.set_value(reset_seq);
            navigate(HOME_PATH, NavigateOptions::default());
        }
    });
}
