//! Admin edit screens. Each one is a thin layout over a typed draft and
//! [`use_draft_editor`]; an absent `id` means create mode.

use api::{FileUpload, Resource};
use dioxus::prelude::*;

use crate::crud::{
    parse_count, use_draft_editor, Draft, DraftEditor, EditMode, ErrorBanner, FilePicker,
    FormField, NewspaperDraft, PublicationDraft, SeminarDraft, ServiceDraft,
};

const PDF: &str = "application/pdf,.pdf";
const IMAGES: &str = "image/*";

#[component]
fn EditorFrame(
    heading: String,
    loading: bool,
    saving: bool,
    not_found: bool,
    error: Option<String>,
    on_submit: EventHandler<()>,
    on_cancel: EventHandler<()>,
    children: Element,
) -> Element {
    if not_found {
        return rsx! {
            section {
                class: "editor",
                h1 { "{heading}" }
                p { class: "detail-missing", "This item does not exist or was removed." }
                button { class: "btn", onclick: move |_| on_cancel.call(()), "Back to list" }
            }
        };
    }
    rsx! {
        section {
            class: "editor",
            h1 { "{heading}" }
            ErrorBanner { message: error }
            if loading {
                p { "Loading..." }
            } else {
                form {
                    class: "editor-form",
                    onsubmit: move |evt: FormEvent| {
                        evt.prevent_default();
                        on_submit.call(());
                    },
                    {children}
                    div {
                        class: "editor-actions",
                        button {
                            class: "btn",
                            r#type: "button",
                            disabled: saving,
                            onclick: move |_| on_cancel.call(()),
                            "Cancel"
                        }
                        button {
                            class: "btn btn-primary",
                            r#type: "submit",
                            disabled: saving,
                            if saving { "Saving..." } else { "Save" }
                        }
                    }
                }
            }
        }
    }
}

fn heading<D: Draft>(mode: EditMode) -> String {
    match mode {
        EditMode::Create => format!("New {}", D::Resource::LABEL),
        EditMode::Edit(_) => format!("Edit {}", D::Resource::LABEL),
    }
}

fn frame_state<D: Draft>(editor: &DraftEditor<D>) -> (bool, bool, bool, Option<String>) {
    (
        *editor.loading.read(),
        *editor.saving.read(),
        *editor.not_found.read(),
        editor.error.read().clone(),
    )
}

#[component]
pub fn PublicationForm(id: Option<i64>, on_done: EventHandler<()>) -> Element {
    let mode = EditMode::from_id(id);
    let editor = use_draft_editor::<PublicationDraft>(mode);
    let mut draft = editor.draft;
    let (loading, saving, not_found, error) = frame_state(&editor);
    let d = draft.read().clone();
    let submitter = editor.clone();

    rsx! {
        EditorFrame {
            heading: heading::<PublicationDraft>(mode),
            loading, saving, not_found, error,
            on_submit: move |_| submitter.submit(on_done),
            on_cancel: on_done,
            FormField {
                label: "Title",
                value: d.title,
                required: true,
                error: editor.field_error("title"),
                on_input: move |v: String| draft.write().title = v,
            }
            FormField {
                label: "Category",
                value: d.category,
                on_input: move |v: String| draft.write().category = v,
            }
            FormField {
                label: "Publication date",
                kind: "date",
                value: d.published_at,
                on_input: move |v: String| draft.write().published_at = v,
            }
            FormField {
                label: "Summary",
                kind: "textarea",
                value: d.summary,
                on_input: move |v: String| draft.write().summary = v,
            }
            FilePicker {
                label: "PDF document",
                accept: PDF,
                required: mode.is_create(),
                selected: d.pdf,
                existing: d.existing_pdf,
                error: editor.field_error("pdf"),
                on_pick: move |f: Option<FileUpload>| draft.write().pdf = f,
            }
            FilePicker {
                label: "Cover image",
                accept: IMAGES,
                selected: d.cover,
                existing: d.existing_cover,
                error: editor.field_error("cover"),
                on_pick: move |f: Option<FileUpload>| draft.write().cover = f,
            }
        }
    }
}

#[component]
pub fn ServiceForm(id: Option<i64>, on_done: EventHandler<()>) -> Element {
    let mode = EditMode::from_id(id);
    let editor = use_draft_editor::<ServiceDraft>(mode);
    let mut draft = editor.draft;
    let (loading, saving, not_found, error) = frame_state(&editor);
    let d = draft.read().clone();
    let submitter = editor.clone();

    rsx! {
        EditorFrame {
            heading: heading::<ServiceDraft>(mode),
            loading, saving, not_found, error,
            on_submit: move |_| submitter.submit(on_done),
            on_cancel: on_done,
            FormField {
                label: "Title",
                value: d.title,
                required: true,
                error: editor.field_error("title"),
                on_input: move |v: String| draft.write().title = v,
            }
            FormField {
                label: "Category",
                value: d.category,
                on_input: move |v: String| draft.write().category = v,
            }
            FormField {
                label: "Summary",
                kind: "textarea",
                value: d.summary,
                on_input: move |v: String| draft.write().summary = v,
            }
            FormField {
                label: "Description (markdown)",
                kind: "textarea",
                value: d.description,
                on_input: move |v: String| draft.write().description = v,
            }
            FilePicker {
                label: "Image",
                accept: IMAGES,
                selected: d.image,
                existing: d.existing_image,
                error: editor.field_error("image"),
                on_pick: move |f: Option<FileUpload>| draft.write().image = f,
            }
        }
    }
}

#[component]
pub fn SeminarForm(id: Option<i64>, on_done: EventHandler<()>) -> Element {
    let mode = EditMode::from_id(id);
    let editor = use_draft_editor::<SeminarDraft>(mode);
    let mut draft = editor.draft;
    let (loading, saving, not_found, error) = frame_state(&editor);
    let d = draft.read().clone();
    let capacity = d.capacity.map(|c| c.to_string()).unwrap_or_default();
    let submitter = editor.clone();

    rsx! {
        EditorFrame {
            heading: heading::<SeminarDraft>(mode),
            loading, saving, not_found, error,
            on_submit: move |_| submitter.submit(on_done),
            on_cancel: on_done,
            FormField {
                label: "Title",
                value: d.title,
                required: true,
                error: editor.field_error("title"),
                on_input: move |v: String| draft.write().title = v,
            }
            FormField {
                label: "Category",
                value: d.category,
                on_input: move |v: String| draft.write().category = v,
            }
            FormField {
                label: "Starts at",
                kind: "datetime-local",
                value: d.starts_at,
                required: true,
                error: editor.field_error("starts_at"),
                on_input: move |v: String| draft.write().starts_at = v,
            }
            FormField {
                label: "Location",
                value: d.location,
                on_input: move |v: String| draft.write().location = v,
            }
            FormField {
                label: "Capacity",
                kind: "number",
                value: capacity,
                on_input: move |v: String| {
                    if let Ok(count) = parse_count(&v) {
                        draft.write().capacity = count;
                    }
                },
            }
            FormField {
                label: "Summary",
                kind: "textarea",
                value: d.summary,
                on_input: move |v: String| draft.write().summary = v,
            }
            FormField {
                label: "Description (markdown)",
                kind: "textarea",
                value: d.description,
                on_input: move |v: String| draft.write().description = v,
            }
            FilePicker {
                label: "Image",
                accept: IMAGES,
                required: mode.is_create(),
                selected: d.image,
                existing: d.existing_image,
                error: editor.field_error("image"),
                on_pick: move |f: Option<FileUpload>| draft.write().image = f,
            }
        }
    }
}

#[component]
pub fn NewspaperForm(id: Option<i64>, on_done: EventHandler<()>) -> Element {
    let mode = EditMode::from_id(id);
    let editor = use_draft_editor::<NewspaperDraft>(mode);
    let mut draft = editor.draft;
    let (loading, saving, not_found, error) = frame_state(&editor);
    let d = draft.read().clone();
    let issue = d.issue_number.map(|n| n.to_string()).unwrap_or_default();
    let submitter = editor.clone();

    rsx! {
        EditorFrame {
            heading: heading::<NewspaperDraft>(mode),
            loading, saving, not_found, error,
            on_submit: move |_| submitter.submit(on_done),
            on_cancel: on_done,
            FormField {
                label: "Title",
                value: d.title,
                required: true,
                error: editor.field_error("title"),
                on_input: move |v: String| draft.write().title = v,
            }
            FormField {
                label: "Issue number",
                kind: "number",
                value: issue,
                on_input: move |v: String| {
                    if let Ok(number) = parse_count(&v) {
                        draft.write().issue_number = number;
                    }
                },
            }
            FormField {
                label: "Publication date",
                kind: "date",
                value: d.published_at,
                on_input: move |v: String| draft.write().published_at = v,
            }
            FormField {
                label: "Summary",
                kind: "textarea",
                value: d.summary,
                on_input: move |v: String| draft.write().summary = v,
            }
            FilePicker {
                label: "PDF issue",
                accept: PDF,
                required: mode.is_create(),
                selected: d.pdf,
                existing: d.existing_pdf,
                error: editor.field_error("pdf"),
                on_pick: move |f: Option<FileUpload>| draft.write().pdf = f,
            }
            FilePicker {
                label: "Cover image",
                accept: IMAGES,
                selected: d.cover,
                existing: d.existing_cover,
                error: editor.field_error("cover"),
                on_pick: move |f: Option<FileUpload>| draft.write().cover = f,
            }
        }
    }
}
