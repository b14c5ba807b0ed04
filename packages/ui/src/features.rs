//! Optional features switched on in [`PortalConfig::features`].

use dioxus::prelude::*;
use store::PortalConfig;

use crate::auth::use_api;
use crate::feedback::surface_error;

pub fn use_config() -> PortalConfig {
    use_context::<PortalConfig>()
}

/// Record a page view when analytics is enabled.
pub fn track_page_view(config: &PortalConfig, path: &str) {
    if config.features.analytics {
        tracing::info!(target: "analytics", path, "page view");
    }
}

/// Rough shape check; the backend does the real validation.
pub fn looks_like_email(value: &str) -> bool {
    let value = value.trim();
    match value.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && !value.contains(char::is_whitespace)
        }
        None => false,
    }
}

/// The address to subscribe, trimmed, or `None` when it fails the shape check.
pub fn newsletter_address(raw: &str) -> Option<String> {
    let address = raw.trim();
    looks_like_email(address).then(|| address.to_string())
}

/// Newsletter sign-up box. Renders nothing unless the feature is on.
#[component]
pub fn NewsletterSignup() -> Element {
    let config = use_config();
    let api = use_api();
    let mut email = use_signal(String::new);
    let mut status = use_signal(|| None::<Result<(), String>>);
    let mut sending = use_signal(|| false);

    if !config.features.newsletter {
        return rsx! {};
    }

    let onsubmit = move |evt: FormEvent| {
        evt.prevent_default();
        let Some(address) = newsletter_address(&email()) else {
            status.set(Some(Err("Please enter a valid email address.".to_string())));
            return;
        };
        let api = api.clone();
        sending.set(true);
        spawn(async move {
            match api.subscribe_newsletter(&address).await {
                Ok(()) => {
                    email.set(String::new());
                    status.set(Some(Ok(())));
                }
                Err(e) => {
                    let message = surface_error("Newsletter sign-up", &e)
                        .unwrap_or_else(|| e.user_message());
                    status.set(Some(Err(message)));
                }
            }
            sending.set(false);
        });
    };

    let notice = match status() {
        Some(Ok(())) => rsx! { p { class: "newsletter-ok", "Thanks, you are subscribed." } },
        Some(Err(message)) => rsx! { p { class: "form-error", "{message}" } },
        None => rsx! {},
    };

    rsx! {
        section {
            class: "newsletter",
            h2 { "Stay informed" }
            p { "New publications, seminars and journal issues in your inbox." }
            form {
                class: "newsletter-form",
                onsubmit: onsubmit,
                input {
                    r#type: "email",
                    placeholder: "you@example.com",
                    value: "{email}",
                    oninput: move |evt| email.set(evt.value()),
                }
                button {
                    class: "btn btn-primary",
                    r#type: "submit",
                    disabled: sending(),
                    "Subscribe"
                }
            }
            {notice}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_shape() {
        assert!(looks_like_email("reader@example.com"));
        assert!(looks_like_email("  reader@example.com "));
        assert!(!looks_like_email("reader@example"));
        assert!(!looks_like_email("@example.com"));
        assert!(!looks_like_email("read er@example.com"));
        assert!(!looks_like_email("reader"));
    }

    #[test]
    fn test_newsletter_address_is_trimmed() {
        assert_eq!(
            newsletter_address("  reader@example.com \n").as_deref(),
            Some("reader@example.com")
        );
        assert_eq!(newsletter_address(" reader@ "), None);
    }
}
