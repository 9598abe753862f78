//! Root application component with routing and context providers.

use std::sync::Arc;

use leptos::prelude::*;
use leptos_meta::{Title, provide_meta_context};
use leptos_router::hooks::use_navigate;
use leptos_router::{
    ParamSegment, StaticSegment,
    components::{Redirect, Route, Router, Routes},
};

use crate::components::notice_banner::NoticeBanner;
use crate::config::ClientConfig;
use crate::net::pipeline::{AdminScopes, RequestPipeline};
use crate::net::transport::Transport;
use crate::pages::{admin::AdminPage, join::JoinPage, login::LoginPage, section::SectionPage, store::StorePage};
use crate::state::auth::AuthActions;
use crate::state::notice::NoticeState;
use crate::state::session::SessionState;
use crate::util::auth::{install_reset_redirect, install_route_guard};
use crate::util::token_store::TokenStore;

pub type AppSession = RwSignal<SessionState>;
pub type AppNotices = RwSignal<NoticeState>;
pub type AppActions = AuthActions<AppSession, AppNotices>;

fn load_config() -> ClientConfig {
    ClientConfig::from_build_env().unwrap_or_else(|e| {
        leptos::logging::error!("config: {e}; falling back to defaults");
        ClientConfig::default()
    })
}

#[cfg(feature = "csr")]
fn build_transport(config: &ClientConfig) -> Arc<dyn Transport> {
    Arc::new(crate::net::transport::GlooTransport::new(config.api_base_url.clone(), config.request_timeout))
}

#[cfg(not(feature = "csr"))]
fn build_transport(config: &ClientConfig) -> Arc<dyn Transport> {
    leptos::logging::warn!("transport: no browser fetch, {} unreachable", config.api_base_url);
    Arc::new(crate::net::transport::OfflineTransport)
}

/// Root application component.
///
/// Builds the session, notice and auth-action contexts, restores any
/// persisted token, and installs the route guard under the router.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let config = load_config();
    let session: AppSession = RwSignal::new(SessionState::default());
    let notices: AppNotices = RwSignal::new(NoticeState::default());
    let pipeline = RequestPipeline::new(
        build_transport(&config),
        session,
        notices,
        AdminScopes::new(config.admin_scopes.iter().cloned()),
    );
    let actions = AuthActions::new(pipeline, TokenStore::browser());
    actions.restore();

    provide_context(session);
    provide_context(notices);
    provide_context(actions.clone());

    view! {
        <Title text="Storefront"/>

        <Router>
            <RouteGuard actions/>
            <NoticeBanner/>
            <main class="storefront">
                <Routes fallback=|| view! { <Redirect path="/"/> }>
                    <Route path=StaticSegment("") view=StorePage/>
                    <Route path=StaticSegment("login") view=LoginPage/>
                    <Route path=(StaticSegment("admin"), StaticSegment("login")) view=LoginPage/>
                    <Route path=StaticSegment("admin") view=AdminPage/>
                    <Route path=StaticSegment("join") view=JoinPage/>
                    <Route path=(StaticSegment("app"), ParamSegment("appId")) view=SectionPage/>
                    <Route path=(StaticSegment("profile"), ParamSegment("userId")) view=SectionPage/>
                    <Route path=StaticSegment("wishlist") view=SectionPage/>
                    <Route path=StaticSegment("recommendations") view=SectionPage/>
                    <Route path=StaticSegment("new-releases") view=SectionPage/>
                    <Route path=StaticSegment("specials") view=SectionPage/>
                    <Route path=StaticSegment("free-games") view=SectionPage/>
                    <Route path=StaticSegment("community") view=SectionPage/>
                    <Route path=StaticSegment("friends") view=SectionPage/>
                    <Route path=(StaticSegment("friends"), StaticSegment("add")) view=SectionPage/>
                    <Route path=(StaticSegment("friends"), StaticSegment("pending")) view=SectionPage/>
                    <Route path=StaticSegment("about") view=SectionPage/>
                    <Route path=StaticSegment("chat") view=SectionPage/>
                </Routes>
            </main>
        </Router>
    }
}

/// Hooks the guard and the logout reset into the router. Renders nothing.
#[component]
fn RouteGuard(actions: AppActions) -> impl IntoView {
    let notices = *actions.notices();
    install_route_guard(actions);
    install_reset_redirect(notices, use_navigate());
}
