use dioxus::prelude::*;

use crate::auth::{use_auth, use_auth_controller, AuthState};

/// Email and password sign-in. `on_success` fires once the session is stored.
#[component]
pub fn LoginForm(title: String, on_success: EventHandler<()>) -> Element {
    let controller = use_auth_controller();
    let mut auth_state = use_auth();
    let mut identifier = use_signal(String::new);
    let mut secret = use_signal(String::new);
    let mut error = use_signal(|| None::<String>);
    let mut submitting = use_signal(|| false);

    let onsubmit = move |evt: FormEvent| {
        evt.prevent_default();
        if submitting() {
            return;
        }
        let controller = controller.clone();
        submitting.set(true);
        error.set(None);
        spawn(async move {
            match controller.login(&identifier(), &secret()).await {
                Ok(user) => {
                    secret.set(String::new());
                    auth_state.set(AuthState::Authenticated(user));
                    on_success.call(());
                }
                Err(e) => error.set(Some(e.to_string())),
            }
            submitting.set(false);
        });
    };

    rsx! {
        div {
            class: "login-container",
            h1 { class: "login-title", "{title}" }
            p { class: "login-subtitle", "Sign in to manage content and reports." }
            form {
                class: "login-form",
                onsubmit: onsubmit,
                if let Some(message) = error() {
                    div { class: "error-banner", role: "alert", "{message}" }
                }
                label {
                    class: "form-field",
                    span { class: "form-label", "Email" }
                    input {
                        r#type: "email",
                        autocomplete: "username",
                        value: "{identifier}",
                        oninput: move |evt| identifier.set(evt.value()),
                    }
                }
                label {
                    class: "form-field",
                    span { class: "form-label", "Password" }
                    input {
                        r#type: "password",
                        autocomplete: "current-password",
                        value: "{secret}",
                        oninput: move |evt| secret.set(evt.value()),
                    }
                }
                button {
                    class: "btn btn-primary login-submit",
                    r#type: "submit",
                    disabled: submitting(),
                    if submitting() { "Signing in..." } else { "Sign in" }
                }
            }
        }
    }
}
