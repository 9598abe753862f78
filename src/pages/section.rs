//! Generic page for the remaining table routes.
//!
//! Shelf routes list their games, `/app/:appId` shows one game, and the rest
//! render their title only.

#[cfg(test)]
#[path = "section_test.rs"]
mod section_test;

use leptos::prelude::*;
use leptos_router::hooks::use_location;

use crate::app::AppActions;
use crate::error::ApiError;
use crate::net::api_apps::{self, Shelf, ShelfQuery};
use crate::net::pipeline::ApiClient;
use crate::net::types::AppSummary;
use crate::util::routes::{self, RouteName};

const SECTION_PAGE_SIZE: u32 = 24;

#[derive(Clone, Debug, PartialEq)]
enum Section {
    Shelf { title: &'static str, shelf: Shelf },
    App(i64),
    Plain(&'static str),
}

impl Section {
    fn title(&self) -> String {
        match self {
            Self::Shelf { title, .. } | Self::Plain(title) => (*title).to_owned(),
            Self::App(id) => format!("Game #{id}"),
        }
    }
}

fn section_for(path: &str) -> Option<Section> {
    let resolved = routes::resolve(path)?;
    let title = resolved.def.title;
    let shelf = match resolved.def.name {
        RouteName::Recommendations => Some(Shelf::Recommendations),
        RouteName::NewReleases => Some(Shelf::NewReleases),
        RouteName::Specials => Some(Shelf::Specials),
        RouteName::FreeGames => Some(Shelf::FreeGames),
        RouteName::App => {
            return Some(match resolved.param("appId").and_then(|id| id.parse().ok()) {
                Some(id) => Section::App(id),
                None => Section::Plain(title),
            });
        }
        _ => None,
    };
    Some(match shelf {
        Some(shelf) => Section::Shelf { title, shelf },
        None => Section::Plain(title),
    })
}

async fn load_section(client: &impl ApiClient, section: &Section) -> Result<Vec<AppSummary>, ApiError> {
    match section {
        Section::Shelf { shelf, .. } => {
            let query = ShelfQuery { page_index: Some(0), page_size: Some(SECTION_PAGE_SIZE), tag: None };
            Ok(api_apps::get_shelf(client, *shelf, &query).await?.content)
        }
        Section::App(id) => Ok(vec![api_apps::get_app(client, *id).await?]),
        Section::Plain(_) => Ok(Vec::new()),
    }
}

#[component]
pub fn SectionPage() -> impl IntoView {
    let actions = expect_context::<AppActions>();
    let location = use_location();

    let section = Memo::new(move |_| section_for(&location.pathname.get()));
    let games = RwSignal::new(Vec::<AppSummary>::new());
    let error = RwSignal::new(None::<String>);
    let generation = StoredValue::new(0_u64);

    Effect::new(move |_| {
        let Some(current) = section.get() else {
            return;
        };
        let seq = generation.get_value() + 1;
        generation.set_value(seq);
        games.set(Vec::new());
        error.set(None);

        let actions = actions.clone();
        leptos::task::spawn_local(async move {
            let result = load_section(actions.pipeline(), &current).await;
            if generation.get_value() != seq {
                return;
            }
            match result {
                Ok(list) => games.set(list),
                Err(e) => error.set(Some(e.user_message())),
            }
        });
    });

    view! {
        <div class="section-page">
            <h1>{move || section.get().map(|s| s.title()).unwrap_or_default()}</h1>
            <Show when=move || error.get().is_some()>
                <p class="section-page__error">{move || error.get().unwrap_or_default()}</p>
            </Show>
            <ul class="section-page__list">
                {move || {
                    games
                        .get()
                        .into_iter()
                        .map(|app| {
                            let href = format!("/app/{}", app.app_id);
                            let blurb = app.description.clone().unwrap_or_default();
                            view! {
                                <li class="store-card">
                                    <a href=href>{app.name}</a>
                                    <p>{blurb}</p>
                                </li>
                            }
                        })
                        .collect_view()
                }}
            </ul>
        </div>
    }
}
