//! Whistleblower report triage.

use api::{Entity, ListQuery, Report, ReportStatus, Reports};
use dioxus::prelude::*;
use dioxus_free_icons::icons::fa_solid_icons::{FaPaperclip, FaTrashCan};
use dioxus_free_icons::Icon;

use super::detail::display_date;
use crate::auth::use_api;
use crate::crud::components::delete_failure;
use crate::crud::{excerpt, ConfirmDelete, ManagerList, RetryBanner};
use crate::feedback::surface_error;

/// Reports matching the local status filter, on top of the list's own search.
pub fn with_status(list: &ManagerList<Report>, status: Option<ReportStatus>) -> Vec<Report> {
    list.visible()
        .into_iter()
        .filter(|r| status.map_or(true, |s| r.status == s))
        .collect()
}

#[component]
pub fn ReportsTriage(#[props(default)] initial_status: Option<String>) -> Element {
    let api = use_api();
    let mut list = use_signal(ManagerList::<Report>::default);
    let mut status_filter =
        use_signal(|| initial_status.as_deref().and_then(ReportStatus::parse));
    let mut error = use_signal(|| None::<String>);
    let mut expanded = use_signal(|| None::<i64>);

    let loader = api.clone();
    let mut fetch = use_resource(use_reactive!(|(initial_status,)| {
        let api = loader.clone();
        async move {
            match api.list::<Reports>(&ListQuery { category: None, status: initial_status }).await {
                Ok(items) => {
                    error.set(None);
                    list.write().replace_items(items);
                }
                Err(e) => error.set(surface_error("Loading reports", &e)),
            }
        }
    }));
    let loading = fetch.read().is_none();

    let status_api = api.clone();
    let change_status = move |(id, status): (i64, ReportStatus)| {
        let api = status_api.clone();
        spawn(async move {
            match api.set_report_status(id, status).await {
                Ok(()) => list.write().update_item(id, |r| r.status = status),
                Err(e) => error.set(surface_error(&format!("Updating report {id}"), &e)),
            }
        });
    };

    let confirm = move |_: ()| {
        let Some(id) = list.write().confirm_delete() else {
            return;
        };
        let api = api.clone();
        spawn(async move {
            match api.delete::<Reports>(id).await {
                Ok(()) => {
                    list.write().remove(id);
                    error.set(None);
                }
                Err(e) => {
                    list.write().delete_failed(id);
                    error.set(delete_failure::<Reports>(id, &e));
                }
            }
        });
    };

    let snapshot = list.read();
    let rows = with_status(&snapshot, status_filter());
    let pending = snapshot.pending_delete().map(|r| r.title().to_string());
    let search = snapshot.search.clone();
    let deleting = snapshot.is_deleting();
    drop(snapshot);
    let selected_status = status_filter().map(|s| s.as_str()).unwrap_or_default();

    rsx! {
        section {
            class: "manager",
            header {
                class: "manager-header",
                h1 { "Reports" }
            }

            RetryBanner {
                message: error(),
                on_retry: move |_| fetch.restart(),
            }

            div {
                class: "manager-filters",
                input {
                    r#type: "search",
                    placeholder: "Search subject or description",
                    value: "{search}",
                    oninput: move |evt| list.write().search = evt.value(),
                }
                select {
                    value: "{selected_status}",
                    onchange: move |evt| status_filter.set(ReportStatus::parse(&evt.value())),
                    option { value: "", "All statuses" }
                    for status in ReportStatus::ASSIGNABLE {
                        option { key: "{status.as_str()}", value: "{status.as_str()}", "{status.label()}" }
                    }
                }
            }

            if loading {
                p { class: "manager-empty", "Loading..." }
            } else if rows.is_empty() {
                p { class: "manager-empty", "No reports." }
            } else {
                table {
                    class: "manager-table",
                    thead {
                        tr {
                            th { "Received" }
                            th { "Subject" }
                            th { "Category" }
                            th { "Reporter" }
                            th { "Status" }
                            th { class: "actions", "" }
                        }
                    }
                    tbody {
                        for report in rows {
                            ReportRow {
                                key: "{report.id}",
                                report: report.clone(),
                                expanded: expanded() == Some(report.id),
                                on_toggle: move |id: i64| {
                                    let next = if expanded() == Some(id) { None } else { Some(id) };
                                    expanded.set(next);
                                },
                                on_status: change_status.clone(),
                                on_delete: move |id: i64| list.write().request_delete(id),
                            }
                        }
                    }
                }
            }

            if let Some(label) = pending {
                ConfirmDelete {
                    item_label: label,
                    busy: deleting,
                    on_confirm: confirm,
                    on_cancel: move |_| list.write().cancel_delete(),
                }
            }
        }
    }
}

#[component]
fn ReportRow(
    report: Report,
    expanded: bool,
    on_toggle: EventHandler<i64>,
    on_status: EventHandler<(i64, ReportStatus)>,
    on_delete: EventHandler<i64>,
) -> Element {
    let id = report.id;
    let received = report.created_at.as_deref().map(display_date).unwrap_or_default();
    let reporter = report.contact.clone().unwrap_or_else(|| "Anonymous".to_string());
    let preview = excerpt(&report.subject, 80);
    let current = report.status.as_str();

    rsx! {
        tr {
            class: if expanded { "report-row expanded" } else { "report-row" },
            td { "{received}" }
            td {
                class: "title",
                onclick: move |_| on_toggle.call(id),
                "{preview}"
                if report.attachment_url.is_some() {
                    Icon { icon: FaPaperclip, width: 12, height: 12 }
                }
            }
            td { "{report.category}" }
            td { "{reporter}" }
            td {
                select {
                    class: "status-{current}",
                    value: "{current}",
                    onchange: move |evt| {
                        if let Some(status) = ReportStatus::parse(&evt.value()) {
                            on_status.call((id, status));
                        }
                    },
                    if report.status == ReportStatus::Unknown {
                        option { value: "unknown", disabled: true, "Unknown" }
                    }
                    for status in ReportStatus::ASSIGNABLE {
                        option {
                            key: "{status.as_str()}",
                            value: "{status.as_str()}",
                            selected: status == report.status,
                            "{status.label()}"
                        }
                    }
                }
            }
            td {
                class: "actions",
                button {
                    class: "btn btn-icon btn-danger",
                    title: "Delete",
                    onclick: move |_| on_delete.call(id),
                    Icon { icon: FaTrashCan, width: 13, height: 13 }
                }
            }
        }
        if expanded {
            tr {
                class: "report-details",
                td {
                    colspan: "6",
                    p { "{report.description}" }
                    if let Some(url) = report.attachment_url.as_ref() {
                        a { href: "{url}", target: "_blank", rel: "noopener", "Open attachment" }
                    }
                }
            }
        }
    }
}
