//! Client route table.
//!
//! DESIGN
//! ======
//! One static table drives both the router view mapping and the route guard,
//! so the auth/admin requirements of a path live next to its pattern. Patterns
//! use `:name` segments for parameters.

#[cfg(test)]
#[path = "routes_test.rs"]
mod routes_test;

/// Access requirements attached to a route.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RouteMeta {
    pub requires_auth: bool,
    pub requires_admin: bool,
}

impl RouteMeta {
    pub const OPEN: Self = Self { requires_auth: false, requires_admin: false };
    pub const AUTH: Self = Self { requires_auth: true, requires_admin: false };
    pub const ADMIN: Self = Self { requires_auth: true, requires_admin: true };
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RouteName {
    Store,
    Admin,
    App,
    Wishlist,
    Recommendations,
    NewReleases,
    Specials,
    FreeGames,
    Community,
    Profile,
    Friends,
    FriendAdd,
    FriendPending,
    About,
    Chat,
    Join,
    Login,
    AdminLogin,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RouteDef {
    pub name: RouteName,
    pub pattern: &'static str,
    pub title: &'static str,
    pub meta: RouteMeta,
}

const fn route(name: RouteName, pattern: &'static str, title: &'static str, meta: RouteMeta) -> RouteDef {
    RouteDef { name, pattern, title, meta }
}

pub const HOME_PATH: &str = "/";
pub const LOGIN_PATH: &str = "/login";

pub const ROUTES: &[RouteDef] = &[
    route(RouteName::Store, "/", "Store", RouteMeta::OPEN),
    route(RouteName::Admin, "/admin", "Admin", RouteMeta::ADMIN),
    route(RouteName::AdminLogin, "/admin/login", "Admin Sign In", RouteMeta::OPEN),
    route(RouteName::App, "/app/:appId", "Game", RouteMeta::OPEN),
    route(RouteName::Wishlist, "/wishlist", "Wishlist", RouteMeta::AUTH),
    route(RouteName::Recommendations, "/recommendations", "Recommended", RouteMeta::OPEN),
    route(RouteName::NewReleases, "/new-releases", "New Releases", RouteMeta::OPEN),
    route(RouteName::Specials, "/specials", "Specials", RouteMeta::OPEN),
    route(RouteName::FreeGames, "/free-games", "Free Games", RouteMeta::OPEN),
    route(RouteName::Community, "/community", "Community", RouteMeta::OPEN),
    route(RouteName::Profile, "/profile/:userId", "Profile", RouteMeta::OPEN),
    route(RouteName::Friends, "/friends", "Friends", RouteMeta::OPEN),
    route(RouteName::FriendAdd, "/friends/add", "Add Friends", RouteMeta::OPEN),
    route(RouteName::FriendPending, "/friends/pending", "Pending Requests", RouteMeta::OPEN),
    route(RouteName::About, "/about", "About", RouteMeta::OPEN),
    route(RouteName::Chat, "/chat", "Chat", RouteMeta::OPEN),
    route(RouteName::Join, "/join", "Join", RouteMeta::OPEN),
    route(RouteName::Login, "/login", "Sign In", RouteMeta::OPEN),
];

/// A path matched against the table, with extracted `:params`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedRoute {
    pub def: &'static RouteDef,
    pub params: Vec<(&'static str, String)>,
}

impl ResolvedRoute {
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.iter().find(|(k, _)| *k == name).map(|(_, v)| v.as_str())
    }
}

/// Path part of a full path (query and fragment removed).
pub fn path_only(full_path: &str) -> &str {
    full_path.split(['?', '#']).next().unwrap_or_default()
}

/// Match `full_path` against the table. `None` means the path is unknown and
/// should be sent home.
pub fn resolve(full_path: &str) -> Option<ResolvedRoute> {
    let path = path_only(full_path);
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    ROUTES.iter().find_map(|def| {
        let params = match_pattern(def.pattern, &segments)?;
        Some(ResolvedRoute { def, params })
    })
}

fn match_pattern(pattern: &'static str, segments: &[&str]) -> Option<Vec<(&'static str, String)>> {
    let parts: Vec<&'static str> = pattern.split('/').filter(|s| !s.is_empty()).collect();
    if parts.len() != segments.len() {
        return None;
    }
    let mut params = Vec::new();
    for (part, segment) in parts.iter().zip(segments) {
        match part.strip_prefix(':') {
            Some(name) => params.push((name, (*segment).to_owned())),
            None if part == segment => {}
            None => return None,
        }
    }
    Some(params)
}

/// Value of one query parameter, percent-decoded.
pub fn query_param(full_path: &str, key: &str) -> Option<String> {
    let (_, query) = full_path.split_once('?')?;
    let query = query.split('#').next().unwrap_or_default();
    url::form_urlencoded::parse(query.as_bytes())
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.into_owned())
}
