//! Edit-screen state: load the entity (edit mode), validate, submit.
//!
//! Loading runs as a component resource keyed on the [`EditMode`]; switching
//! to another id or leaving the screen drops the in-flight fetch, so a late
//! response never overwrites the draft of a different entity. Submission is a
//! scoped task with the same property.

use api::Resource;
use dioxus::prelude::*;

use super::{Draft, EditMode, ValidationErrors};
use crate::auth::use_api;
use crate::client::AppApi;
use crate::feedback::surface_error;

/// Handles to the signals behind one edit screen.
pub struct DraftEditor<D: 'static> {
    api: AppApi,
    pub mode: EditMode,
    pub draft: Signal<D>,
    pub loading: Signal<bool>,
    pub saving: Signal<bool>,
    pub error: Signal<Option<String>>,
    pub field_errors: Signal<ValidationErrors>,
    pub not_found: Signal<bool>,
}

impl<D: 'static> Clone for DraftEditor<D> {
    fn clone(&self) -> Self {
        Self {
            api: self.api.clone(),
            mode: self.mode,
            draft: self.draft,
            loading: self.loading,
            saving: self.saving,
            error: self.error,
            field_errors: self.field_errors,
            not_found: self.not_found,
        }
    }
}

impl<D: Draft> DraftEditor<D> {
    pub fn field_error(&self, field: &str) -> Option<String> {
        self.field_errors.read().get(field).map(str::to_string)
    }

    /// Validate and send the draft. `on_saved` fires only after the backend
    /// accepted it; on failure the draft is left untouched for another try.
    pub fn submit(&self, on_saved: EventHandler<()>) {
        let mut editor = self.clone();
        if *editor.saving.peek() || *editor.loading.peek() {
            return;
        }

        let draft = editor.draft.read().clone();
        if let Err(errors) = draft.validate(editor.mode) {
            editor.error.set(Some(errors.to_string()));
            editor.field_errors.set(errors);
            return;
        }
        editor.field_errors.set(ValidationErrors::new());
        editor.error.set(None);
        editor.saving.set(true);

        let form = draft.to_submission_payload();
        spawn(async move {
            let result = match editor.mode {
                EditMode::Create => editor.api.create::<D::Resource>(form).await,
                EditMode::Edit(id) => editor.api.update::<D::Resource>(id, form).await,
            };
            editor.saving.set(false);
            match result {
                Ok(()) => on_saved.call(()),
                Err(e) => {
                    let context = format!("Saving {}", D::Resource::LABEL);
                    editor.error.set(surface_error(&context, &e));
                }
            }
        });
    }
}

/// Set up an edit screen for `D` in `mode`.
pub fn use_draft_editor<D: Draft>(mode: EditMode) -> DraftEditor<D> {
    let api = use_api();
    let mut draft = use_signal(D::default);
    let mut loading = use_signal(|| !mode.is_create());
    let saving = use_signal(|| false);
    let mut error = use_signal(|| None::<String>);
    let field_errors = use_signal(ValidationErrors::new);
    let mut not_found = use_signal(|| false);

    let loader = api.clone();
    let _ = use_resource(use_reactive!(|(mode,)| {
        let api = loader.clone();
        async move {
            not_found.set(false);
            error.set(None);
            let EditMode::Edit(id) = mode else {
                draft.set(D::default());
                loading.set(false);
                return;
            };
            loading.set(true);
            match api.fetch::<D::Resource>(id).await {
                Ok(entity) => draft.set(D::from_entity(&entity)),
                Err(e) if e.is_not_found() => {
                    tracing::warn!("{} {id} not found", D::Resource::LABEL);
                    not_found.set(true);
                }
                Err(e) => {
                    let context = format!("Loading {} {id}", D::Resource::LABEL);
                    error.set(surface_error(&context, &e));
                }
            }
            loading.set(false);
        }
    }));

    DraftEditor {
        api,
        mode,
        draft,
        loading,
        saving,
        error,
        field_errors,
        not_found,
    }
}
