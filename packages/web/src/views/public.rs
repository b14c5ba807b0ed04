//! Public site pages. Thin route wrappers around the shared views.

use api::{Newspapers, Publications, Seminars, Services};
use dioxus::prelude::*;
use ui::views::{
    NewspaperDetail, PublicCatalog, PublicationDetail, SeminarDetail, ServiceDetail,
    WhistleblowerForm,
};
use ui::use_config;

use crate::Route;

#[component]
pub fn Home() -> Element {
    let config = use_config();
    let nav = use_navigator();

    let sections = [
        ("Publications", "Policies, guides and annual reports.", Route::PublicationList {}),
        ("Services", "How we support compliance programmes.", Route::ServiceList {}),
        ("Seminars", "Upcoming training sessions.", Route::SeminarList {}),
        ("Journal", "Every issue of our journal.", Route::JournalList {}),
        ("Report a concern", "Confidential whistleblower channel.", Route::Whistleblower {}),
    ];

    rsx! {
        section {
            class: "hero",
            h1 { "{config.app.title}" }
            p { "Governance, ethics and compliance resources in one place." }
        }
        div {
            class: "sections",
            for (title, blurb, route) in sections {
                article {
                    key: "{title}",
                    class: "card",
                    onclick: move |_| {
                        nav.push(route.clone());
                    },
                    h2 { class: "card-title", "{title}" }
                    p { class: "card-summary", "{blurb}" }
                }
            }
        }
    }
}

#[component]
pub fn PublicationList() -> Element {
    let nav = use_navigator();
    rsx! {
        PublicCatalog::<Publications> {
            resource: Publications,
            intro: "Policies, guides and reports published by the office.",
            on_open: move |id: i64| {
                nav.push(Route::PublicationPage { id });
            },
        }
    }
}

#[component]
pub fn PublicationPage(id: i64) -> Element {
    let nav = use_navigator();
    rsx! {
        PublicationDetail {
            id,
            on_back: move |_| {
                nav.push(Route::PublicationList {});
            },
        }
    }
}

#[component]
pub fn ServiceList() -> Element {
    let nav = use_navigator();
    rsx! {
        PublicCatalog::<Services> {
            resource: Services,
            on_open: move |id: i64| {
                nav.push(Route::ServicePage { id });
            },
        }
    }
}

#[component]
pub fn ServicePage(id: i64) -> Element {
    let nav = use_navigator();
    rsx! {
        ServiceDetail {
            id,
            on_back: move |_| {
                nav.push(Route::ServiceList {});
            },
        }
    }
}

#[component]
pub fn SeminarList() -> Element {
    let nav = use_navigator();
    rsx! {
        PublicCatalog::<Seminars> {
            resource: Seminars,
            intro: "Training sessions and workshops.",
            on_open: move |id: i64| {
                nav.push(Route::SeminarPage { id });
            },
        }
    }
}

#[component]
pub fn SeminarPage(id: i64) -> Element {
    let nav = use_navigator();
    rsx! {
        SeminarDetail {
            id,
            on_back: move |_| {
                nav.push(Route::SeminarList {});
            },
        }
    }
}

#[component]
pub fn JournalList() -> Element {
    let nav = use_navigator();
    rsx! {
        PublicCatalog::<Newspapers> {
            resource: Newspapers,
            on_open: move |id: i64| {
                nav.push(Route::JournalPage { id });
            },
        }
    }
}

#[component]
pub fn JournalPage(id: i64) -> Element {
    let nav = use_navigator();
    rsx! {
        NewspaperDetail {
            id,
            on_back: move |_| {
                nav.push(Route::JournalList {});
            },
        }
    }
}

#[component]
pub fn Whistleblower() -> Element {
    rsx! {
        WhistleblowerForm {}
    }
}
