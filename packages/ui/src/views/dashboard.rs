use api::{ApiError, ListQuery, Newspapers, Publications, ReportStatus, Reports, Seminars, Services};
use dioxus::prelude::*;

use crate::auth::{use_api, use_auth};
use crate::crud::RetryBanner;
use crate::feedback::surface_error;

#[derive(Clone, Debug, Default, PartialEq)]
struct Counts {
    publications: usize,
    services: usize,
    seminars: usize,
    newspapers: usize,
    open_reports: usize,
}

/// Admin landing page: how much content exists and how many reports need attention.
#[component]
pub fn Dashboard(on_navigate: EventHandler<String>) -> Element {
    let api = use_api();
    let auth_state = use_auth();
    let mut error = use_signal(|| None::<String>);

    let mut counts = use_resource(move || {
        let api = api.clone();
        async move {
            let load = async {
                let reports = api.list::<Reports>(&ListQuery::default()).await?;
                Ok::<_, ApiError>(Counts {
                    publications: api.list::<Publications>(&ListQuery::default()).await?.len(),
                    services: api.list::<Services>(&ListQuery::default()).await?.len(),
                    seminars: api.list::<Seminars>(&ListQuery::default()).await?.len(),
                    newspapers: api.list::<Newspapers>(&ListQuery::default()).await?.len(),
                    open_reports: reports
                        .iter()
                        .filter(|r| matches!(r.status, ReportStatus::New | ReportStatus::InReview))
                        .count(),
                })
            };
            match load.await {
                Ok(counts) => {
                    error.set(None);
                    Some(counts)
                }
                Err(e) => {
                    error.set(surface_error("Loading dashboard", &e));
                    None
                }
            }
        }
    });

    let name = auth_state
        .read()
        .user()
        .map(|u| u.username.clone())
        .unwrap_or_default();
    let tiles: Vec<(&'static str, &'static str, String)> = {
        let c = counts.read().clone().flatten();
        let shown = |pick: fn(&Counts) -> usize| {
            c.as_ref().map(|c| pick(c).to_string()).unwrap_or_else(|| "…".to_string())
        };
        vec![
            ("Publications", "/admin/publications", shown(|c| c.publications)),
            ("Services", "/admin/services", shown(|c| c.services)),
            ("Seminars", "/admin/seminars", shown(|c| c.seminars)),
            ("Journal issues", "/admin/newspapers", shown(|c| c.newspapers)),
            ("Open reports", "/admin/reports", shown(|c| c.open_reports)),
        ]
    };

    rsx! {
        section {
            class: "dashboard",
            h1 { "Welcome, {name}" }
            RetryBanner {
                message: error(),
                on_retry: move |_| counts.restart(),
            }
            div {
                class: "dashboard-tiles",
                for (label, path, count) in tiles {
                    button {
                        key: "{path}",
                        class: "tile",
                        onclick: move |_| on_navigate.call(path.to_string()),
                        span { class: "tile-count", "{count}" }
                        span { class: "tile-label", "{label}" }
                    }
                }
            }
        }
    }
}
