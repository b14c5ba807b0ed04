//! Building blocks shared by the manager screens.

use api::{ApiError, Entity, FileUpload, ListQuery, Resource};
use dioxus::prelude::*;
use dioxus_free_icons::icons::fa_solid_icons::{FaPen, FaPlus, FaTrashCan};
use dioxus_free_icons::Icon;

use super::ManagerList;
use crate::auth::use_api;
use crate::feedback::surface_error;
use crate::views::ModalOverlay;

#[component]
pub fn ErrorBanner(message: Option<String>) -> Element {
    let Some(message) = message else {
        return rsx! {};
    };
    rsx! {
        div {
            class: "error-banner",
            role: "alert",
            "{message}"
        }
    }
}

/// Error banner with a button that re-runs the failed action.
#[component]
pub fn RetryBanner(message: Option<String>, on_retry: EventHandler<()>) -> Element {
    let Some(message) = message else {
        return rsx! {};
    };
    rsx! {
        div {
            class: "error-banner",
            role: "alert",
            span { "{message}" }
            button {
                class: "btn btn-link",
                onclick: move |_| on_retry.call(()),
                "Try again"
            }
        }
    }
}

/// Labelled input. `kind` is the HTML input type; `"textarea"` renders a text area.
#[component]
pub fn FormField(
    label: String,
    value: String,
    on_input: EventHandler<String>,
    #[props(default = "text".to_string())] kind: String,
    #[props(default)] error: Option<String>,
    #[props(default)] required: bool,
    #[props(default)] placeholder: String,
) -> Element {
    rsx! {
        label {
            class: if error.is_some() { "form-field invalid" } else { "form-field" },
            span {
                class: "form-label",
                "{label}"
                if required {
                    span { class: "form-required", " *" }
                }
            }
            if kind == "textarea" {
                textarea {
                    value: "{value}",
                    placeholder: "{placeholder}",
                    rows: "6",
                    oninput: move |evt| on_input.call(evt.value()),
                }
            } else {
                input {
                    r#type: "{kind}",
                    value: "{value}",
                    placeholder: "{placeholder}",
                    oninput: move |evt| on_input.call(evt.value()),
                }
            }
            if let Some(error) = error.as_ref() {
                span { class: "form-error", "{error}" }
            }
        }
    }
}

/// File input that reads the picked file into memory.
///
/// `existing` is the URL of the file the entity already has; it stays in use
/// unless a new file is picked.
#[component]
pub fn FilePicker(
    label: String,
    accept: String,
    selected: Option<FileUpload>,
    on_pick: EventHandler<Option<FileUpload>>,
    #[props(default)] existing: Option<String>,
    #[props(default)] error: Option<String>,
    #[props(default)] required: bool,
) -> Element {
    rsx! {
        div {
            class: if error.is_some() { "form-field invalid" } else { "form-field" },
            span {
                class: "form-label",
                "{label}"
                if required {
                    span { class: "form-required", " *" }
                }
            }
            input {
                r#type: "file",
                accept: "{accept}",
                onchange: move |evt: FormEvent| async move {
                    let Some(engine) = evt.files() else {
                        return;
                    };
                    let Some(name) = engine.files().first().cloned() else {
                        on_pick.call(None);
                        return;
                    };
                    match engine.read_file(&name).await {
                        Some(bytes) => {
                            let file_name = name.rsplit(['/', '\\']).next().unwrap_or(&name).to_string();
                            on_pick.call(Some(FileUpload::new(file_name, bytes)));
                        }
                        None => tracing::error!("Failed to read picked file {}", name),
                    }
                },
            }
            if let Some(file) = selected.as_ref() {
                div {
                    class: "file-selected",
                    span { "{file.file_name}" }
                    button {
                        class: "btn btn-link",
                        r#type: "button",
                        onclick: move |_| on_pick.call(None),
                        "Remove"
                    }
                }
            } else if let Some(url) = existing.as_ref() {
                div {
                    class: "file-existing",
                    "Current file: "
                    a { href: "{url}", target: "_blank", rel: "noopener", "view" }
                }
            }
            if let Some(error) = error.as_ref() {
                span { class: "form-error", "{error}" }
            }
        }
    }
}

/// Second step of a delete: nothing is sent until `on_confirm` fires.
#[component]
pub fn ConfirmDelete(
    item_label: String,
    busy: bool,
    on_confirm: EventHandler<()>,
    on_cancel: EventHandler<()>,
) -> Element {
    rsx! {
        ModalOverlay {
            title: "Delete item",
            on_close: move |_| on_cancel.call(()),
            p { class: "modal-body", "Delete \"{item_label}\"? This cannot be undone." }
            div {
                class: "modal-actions",
                button {
                    class: "btn",
                    disabled: busy,
                    onclick: move |_| on_cancel.call(()),
                    "Cancel"
                }
                button {
                    class: "btn btn-danger",
                    disabled: busy,
                    onclick: move |_| on_confirm.call(()),
                    if busy { "Deleting..." } else { "Delete" }
                }
            }
        }
    }
}

/// List screen for one managed resource: search, category filter, edit links
/// and confirmed delete. Successful deletes drop the row without refetching.
#[component]
pub fn ManagerTable<R: Resource>(
    resource: R,
    on_create: EventHandler<()>,
    on_edit: EventHandler<i64>,
    #[props(default)] initial_category: Option<String>,
) -> Element {
    let _ = resource;
    let api = use_api();
    let mut list = use_signal(ManagerList::<R::Entity>::default);
    let mut error = use_signal(|| None::<String>);

    let loader = api.clone();
    let mut fetch = use_resource(use_reactive!(|(initial_category,)| {
        let api = loader.clone();
        async move {
            let query = ListQuery {
                category: initial_category,
                status: None,
            };
            match api.list::<R>(&query).await {
                Ok(items) => {
                    error.set(None);
                    list.write().replace_items(items);
                    true
                }
                Err(e) => {
                    error.set(surface_error(&format!("Loading {}", R::PLURAL), &e));
                    false
                }
            }
        }
    }));
    let loading = fetch.read().is_none();

    let confirm = move |_: ()| {
        let Some(id) = list.write().confirm_delete() else {
            return;
        };
        let api = api.clone();
        spawn(async move {
            match api.delete::<R>(id).await {
                Ok(()) => {
                    list.write().remove(id);
                    error.set(None);
                }
                Err(e) => {
                    list.write().delete_failed(id);
                    error.set(delete_failure::<R>(id, &e));
                }
            }
        });
    };

    let snapshot = list.read();
    let rows: Vec<RowView> = snapshot.visible().iter().map(RowView::of).collect();
    let categories = snapshot.categories();
    let pending = snapshot.pending_delete().map(|e| e.title().to_string());
    let search = snapshot.search.clone();
    let selected_category = snapshot.category.clone().unwrap_or_default();
    let deleting = snapshot.is_deleting();
    drop(snapshot);
    let (label, plural) = (R::LABEL, R::PLURAL);

    rsx! {
        section {
            class: "manager",
            header {
                class: "manager-header",
                h1 { "{plural}" }
                button {
                    class: "btn btn-primary",
                    onclick: move |_| on_create.call(()),
                    Icon { icon: FaPlus, width: 12, height: 12 }
                    " New {label}"
                }
            }

            RetryBanner {
                message: error(),
                on_retry: move |_| fetch.restart(),
            }

            div {
                class: "manager-filters",
                input {
                    r#type: "search",
                    placeholder: "Search title or summary",
                    value: "{search}",
                    oninput: move |evt| list.write().search = evt.value(),
                }
                if !categories.is_empty() {
                    select {
                        value: "{selected_category}",
                        onchange: move |evt| {
                            let value = evt.value();
                            list.write().category = if value.is_empty() { None } else { Some(value) };
                        },
                        option { value: "", "All categories" }
                        for category in categories {
                            option { key: "{category}", value: "{category}", "{category}" }
                        }
                    }
                }
            }

            if loading {
                p { class: "manager-empty", "Loading..." }
            } else if rows.is_empty() {
                p { class: "manager-empty", "Nothing to show." }
            } else {
                table {
                    class: "manager-table",
                    thead {
                        tr {
                            th { "Title" }
                            th { "Category" }
                            th { "Summary" }
                            th { class: "actions", "" }
                        }
                    }
                    tbody {
                        for row in rows {
                            ManagerRow {
                                key: "{row.id}",
                                id: row.id,
                                title: row.title,
                                category: row.category,
                                summary: row.summary,
                                on_edit,
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

struct RowView {
    id: i64,
    title: String,
    category: String,
    summary: String,
}

impl RowView {
    fn of<E: Entity>(entity: &E) -> Self {
        Self {
            id: entity.id(),
            title: entity.title().to_string(),
            category: entity.category().unwrap_or_default().to_string(),
            summary: excerpt(entity.summary(), 120),
        }
    }
}

#[component]
fn ManagerRow(
    id: i64,
    title: String,
    category: String,
    summary: String,
    on_edit: EventHandler<i64>,
    on_delete: EventHandler<i64>,
) -> Element {
    rsx! {
        tr {
            td { class: "title", "{title}" }
            td { "{category}" }
            td { class: "summary", "{summary}" }
            td {
                class: "actions",
                button {
                    class: "btn btn-icon",
                    title: "Edit",
                    onclick: move |_| on_edit.call(id),
                    Icon { icon: FaPen, width: 13, height: 13 }
                }
                button {
                    class: "btn btn-icon btn-danger",
                    title: "Delete",
                    onclick: move |_| on_delete.call(id),
                    Icon { icon: FaTrashCan, width: 13, height: 13 }
                }
            }
        }
    }
}

pub(crate) fn delete_failure<R: Resource>(id: i64, error: &ApiError) -> Option<String> {
    surface_error(&format!("Deleting {} {id}", R::LABEL), error)
}

/// First `max` characters of `text` on a char boundary, with an ellipsis when cut.
pub fn excerpt(text: &str, max: usize) -> String {
    let text = text.trim();
    match text.char_indices().nth(max) {
        Some((cut, _)) => format!("{}…", text[..cut].trim_end()),
        None => text.to_string(),
    }
}
