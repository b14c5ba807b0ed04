//! Public whistleblower form. Works without a session.

use api::FileUpload;
use dioxus::prelude::*;

use crate::auth::use_api;
use crate::crud::{ErrorBanner, FilePicker, FormField, ReportDraft, ValidationErrors};
use crate::feedback::surface_error;

const ATTACHMENTS: &str = ".pdf,.doc,.docx,.txt,image/*";

#[component]
pub fn WhistleblowerForm() -> Element {
    let api = use_api();
    let mut draft = use_signal(ReportDraft::default);
    let mut field_errors = use_signal(ValidationErrors::new);
    let mut error = use_signal(|| None::<String>);
    let mut sending = use_signal(|| false);
    let mut sent = use_signal(|| false);

    let onsubmit = move |evt: FormEvent| {
        evt.prevent_default();
        if sending() {
            return;
        }
        let report = draft.read().clone();
        if let Err(errors) = report.validate() {
            error.set(Some(errors.to_string()));
            field_errors.set(errors);
            return;
        }
        field_errors.set(ValidationErrors::new());
        error.set(None);
        sending.set(true);
        let api = api.clone();
        spawn(async move {
            match api.submit_report(report.to_submission_payload()).await {
                Ok(()) => {
                    draft.set(ReportDraft::default());
                    sent.set(true);
                }
                Err(e) => error.set(surface_error("Submitting report", &e)),
            }
            sending.set(false);
        });
    };

    if sent() {
        return rsx! {
            section {
                class: "whistleblower",
                h1 { "Thank you" }
                p { "Your report was received and will be reviewed confidentially." }
                button {
                    class: "btn",
                    onclick: move |_| sent.set(false),
                    "Submit another report"
                }
            }
        };
    }

    let d = draft.read().clone();
    let errors = field_errors.read().clone();

    rsx! {
        section {
            class: "whistleblower",
            h1 { "Report a concern" }
            p {
                class: "catalog-intro",
                "Reports can be submitted anonymously. Leave the contact field empty or tick the box below."
            }
            ErrorBanner { message: error() }
            form {
                class: "editor-form",
                onsubmit: onsubmit,
                FormField {
                    label: "Subject",
                    value: d.subject,
                    required: true,
                    error: errors.get("subject").map(str::to_string),
                    on_input: move |v: String| draft.write().subject = v,
                }
                FormField {
                    label: "Category",
                    value: d.category,
                    placeholder: "e.g. fraud, harassment, conflict of interest",
                    on_input: move |v: String| draft.write().category = v,
                }
                FormField {
                    label: "What happened?",
                    kind: "textarea",
                    value: d.description,
                    required: true,
                    error: errors.get("description").map(str::to_string),
                    on_input: move |v: String| draft.write().description = v,
                }
                label {
                    class: "form-check",
                    input {
                        r#type: "checkbox",
                        checked: d.anonymous,
                        onchange: move |evt| draft.write().anonymous = evt.checked(),
                    }
                    span { "Submit anonymously" }
                }
                if !d.anonymous {
                    FormField {
                        label: "Contact (optional)",
                        value: d.contact,
                        on_input: move |v: String| draft.write().contact = v,
                    }
                }
                FilePicker {
                    label: "Attachment",
                    accept: ATTACHMENTS,
                    selected: d.attachment,
                    on_pick: move |f: Option<FileUpload>| draft.write().attachment = f,
                }
                div {
                    class: "editor-actions",
                    button {
                        class: "btn btn-primary",
                        r#type: "submit",
                        disabled: sending(),
                        if sending() { "Sending..." } else { "Send report" }
                    }
                }
            }
        }
    }
}
