use api::{Entity, ListQuery, Resource};
use dioxus::prelude::*;

use crate::auth::use_api;
use crate::crud::{excerpt, ManagerList, RetryBanner};
use crate::feedback::surface_error;

/// Public listing of one content type with search and category chips.
#[component]
pub fn PublicCatalog<R: Resource>(
    resource: R,
    on_open: EventHandler<i64>,
    #[props(default)] intro: String,
) -> Element {
    let _ = resource;
    let api = use_api();
    let mut list = use_signal(ManagerList::<R::Entity>::default);
    let mut error = use_signal(|| None::<String>);

    let mut fetch = use_resource(move || {
        let api = api.clone();
        async move {
            match api.list::<R>(&ListQuery::default()).await {
                Ok(items) => {
                    error.set(None);
                    list.write().replace_items(items);
                }
                Err(e) => error.set(surface_error(&format!("Loading {}", R::PLURAL), &e)),
            }
        }
    });
    let loading = fetch.read().is_none();

    let snapshot = list.read();
    let cards: Vec<(i64, String, String, String)> = snapshot
        .visible()
        .iter()
        .map(|e| {
            (
                e.id(),
                e.title().to_string(),
                e.category().unwrap_or_default().to_string(),
                excerpt(e.summary(), 180),
            )
        })
        .collect();
    let categories = snapshot.categories();
    let active = snapshot.category.clone();
    let search = snapshot.search.clone();
    drop(snapshot);
    let plural = R::PLURAL;

    rsx! {
        section {
            class: "catalog",
            h1 { "{plural}" }
            if !intro.is_empty() {
                p { class: "catalog-intro", "{intro}" }
            }

            div {
                class: "catalog-filters",
                input {
                    r#type: "search",
                    placeholder: "Search",
                    value: "{search}",
                    oninput: move |evt| list.write().search = evt.value(),
                }
                if !categories.is_empty() {
                    div {
                        class: "chips",
                        button {
                            class: if active.is_none() { "chip active" } else { "chip" },
                            onclick: move |_| list.write().category = None,
                            "All"
                        }
                        for category in categories {
                            button {
                                key: "{category}",
                                class: if active.as_deref() == Some(category.as_str()) { "chip active" } else { "chip" },
                                onclick: {
                                    let category = category.clone();
                                    move |_| list.write().category = Some(category.clone())
                                },
                                "{category}"
                            }
                        }
                    }
                }
            }

            RetryBanner {
                message: error(),
                on_retry: move |_| fetch.restart(),
            }

            if loading {
                p { class: "catalog-empty", "Loading..." }
            } else if cards.is_empty() && error().is_none() {
                p { class: "catalog-empty", "Nothing published yet." }
            }

            div {
                class: "catalog-grid",
                for (id, title, category, summary) in cards {
                    article {
                        key: "{id}",
                        class: "card",
                        onclick: move |_| on_open.call(id),
                        if !category.is_empty() {
                            span { class: "card-category", "{category}" }
                        }
                        h2 { class: "card-title", "{title}" }
                        p { class: "card-summary", "{summary}" }
                    }
                }
            }
        }
    }
}
