//! Public detail pages, one per content type.

use api::{Newspapers, Publications, Seminars, Services};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use dioxus::prelude::*;

use super::entity::{use_entity, Loaded};
use crate::crud::RetryBanner;
use crate::markdown::Markdown;

/// Human-readable date, or the raw value when it does not parse.
pub fn display_date(raw: &str) -> String {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.format("%-d %B %Y").to_string();
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S") {
        return dt.format("%-d %B %Y").to_string();
    }
    if let Ok(d) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return d.format("%-d %B %Y").to_string();
    }
    raw.to_string()
}

/// Date and time for events.
pub fn display_datetime(raw: &str) -> String {
    let parsed = DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.naive_local())
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S"))
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M"));
    match parsed {
        Ok(dt) => dt.format("%-d %B %Y, %H:%M").to_string(),
        Err(_) => display_date(raw),
    }
}

#[component]
fn DetailFrame(on_back: EventHandler<()>, back_label: String, children: Element) -> Element {
    rsx! {
        article {
            class: "detail",
            button {
                class: "btn btn-link detail-back",
                onclick: move |_| on_back.call(()),
                "← {back_label}"
            }
            {children}
        }
    }
}

#[component]
fn DetailFallback(state: Loaded<()>, on_retry: EventHandler<()>) -> Element {
    match state {
        Loaded::Loading | Loaded::Ready(_) => rsx! { p { class: "detail-loading", "Loading..." } },
        Loaded::NotFound => rsx! { p { class: "detail-missing", "This item does not exist or was removed." } },
        Loaded::Failed(message) => rsx! { RetryBanner { message, on_retry } },
    }
}

fn fallback<E>(loaded: &Loaded<E>) -> Loaded<()> {
    match loaded {
        Loaded::Loading => Loaded::Loading,
        Loaded::Ready(_) => Loaded::Ready(()),
        Loaded::NotFound => Loaded::NotFound,
        Loaded::Failed(message) => Loaded::Failed(message.clone()),
    }
}

#[component]
pub fn PublicationDetail(id: i64, on_back: EventHandler<()>) -> Element {
    let (loaded, mut fetch) = use_entity::<Publications>(id);
    let Loaded::Ready(p) = loaded.clone() else {
        return rsx! {
            DetailFrame { on_back, back_label: "Publications",
                DetailFallback { state: fallback(&loaded), on_retry: move |_| fetch.restart() }
            }
        };
    };
    rsx! {
        DetailFrame { on_back, back_label: "Publications",
            if let Some(cover) = p.cover_url.as_ref() {
                img { class: "detail-cover", src: "{cover}", alt: "" }
            }
            h1 { "{p.title}" }
            div {
                class: "detail-meta",
                if !p.category.is_empty() {
                    span { class: "card-category", "{p.category}" }
                }
                if let Some(date) = p.published_at.as_deref() {
                    span { "{display_date(date)}" }
                }
            }
            p { class: "detail-summary", "{p.summary}" }
            if let Some(pdf) = p.pdf_url.as_ref() {
                a { class: "btn btn-primary", href: "{pdf}", target: "_blank", rel: "noopener", "Download PDF" }
            }
        }
    }
}

#[component]
pub fn ServiceDetail(id: i64, on_back: EventHandler<()>) -> Element {
    let (loaded, mut fetch) = use_entity::<Services>(id);
    let Loaded::Ready(s) = loaded.clone() else {
        return rsx! {
            DetailFrame { on_back, back_label: "Services",
                DetailFallback { state: fallback(&loaded), on_retry: move |_| fetch.restart() }
            }
        };
    };
    rsx! {
        DetailFrame { on_back, back_label: "Services",
            if let Some(image) = s.image_url.as_ref() {
                img { class: "detail-cover", src: "{image}", alt: "" }
            }
            h1 { "{s.title}" }
            if !s.category.is_empty() {
                div { class: "detail-meta", span { class: "card-category", "{s.category}" } }
            }
            p { class: "detail-summary", "{s.summary}" }
            Markdown { source: s.description.clone() }
        }
    }
}

#[component]
pub fn SeminarDetail(id: i64, on_back: EventHandler<()>) -> Element {
    let (loaded, mut fetch) = use_entity::<Seminars>(id);
    let Loaded::Ready(s) = loaded.clone() else {
        return rsx! {
            DetailFrame { on_back, back_label: "Seminars",
                DetailFallback { state: fallback(&loaded), on_retry: move |_| fetch.restart() }
            }
        };
    };
    let seats = match s.capacity {
        Some(0) => Some("Fully booked".to_string()),
        Some(n) => Some(format!("{n} seats")),
        None => None,
    };
    rsx! {
        DetailFrame { on_back, back_label: "Seminars",
            if let Some(image) = s.image_url.as_ref() {
                img { class: "detail-cover", src: "{image}", alt: "" }
            }
            h1 { "{s.title}" }
            div {
                class: "detail-meta",
                if let Some(start) = s.starts_at.as_deref() {
                    span { "{display_datetime(start)}" }
                }
                if !s.location.is_empty() {
                    span { "{s.location}" }
                }
                if let Some(seats) = seats {
                    span { "{seats}" }
                }
            }
            p { class: "detail-summary", "{s.summary}" }
            Markdown { source: s.description.clone() }
        }
    }
}

#[component]
pub fn NewspaperDetail(id: i64, on_back: EventHandler<()>) -> Element {
    let (loaded, mut fetch) = use_entity::<Newspapers>(id);
    let Loaded::Ready(n) = loaded.clone() else {
        return rsx! {
            DetailFrame { on_back, back_label: "Journal",
                DetailFallback { state: fallback(&loaded), on_retry: move |_| fetch.restart() }
            }
        };
    };
    rsx! {
        DetailFrame { on_back, back_label: "Journal",
            if let Some(cover) = n.cover_url.as_ref() {
                img { class: "detail-cover", src: "{cover}", alt: "" }
            }
            h1 { "{n.title}" }
            div {
                class: "detail-meta",
                if let Some(issue) = n.issue_number {
                    span { "Issue {issue}" }
                }
                if let Some(date) = n.published_at.as_deref() {
                    span { "{display_date(date)}" }
                }
            }
            p { class: "detail-summary", "{n.summary}" }
            if let Some(pdf) = n.pdf_url.as_ref() {
                a { class: "btn btn-primary", href: "{pdf}", target: "_blank", rel: "noopener", "Read this issue" }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_dates() {
        assert_eq!(display_date("2024-03-05T10:00:00Z"), "5 March 2024");
        assert_eq!(display_date("2024-03-05"), "5 March 2024");
        assert_eq!(display_date("soon"), "soon");
        assert_eq!(display_datetime("2024-03-05T09:30"), "5 March 2024, 09:30");
    }
}
