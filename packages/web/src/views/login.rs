//! Login page. Returns to the page that required a session, if any.

use dioxus::prelude::*;
use ui::views::LoginForm;
use ui::{login_screen, use_auth, use_config, LoginScreen, LogoutButton};

use crate::Route;

#[component]
pub fn Login(redirect: String) -> Element {
    let auth_state = use_auth();
    let config = use_config();
    let nav = use_navigator();

    let screen = login_screen(&auth_state.read(), &redirect);
    match screen {
        LoginScreen::Pending => rsx! {
            div { class: "page-loading", "Loading..." }
        },
        // A successful sign-in updates the auth state and lands in `Continue`.
        LoginScreen::Form => rsx! {
            LoginForm {
                title: config.app.title.clone(),
                on_success: move |_| tracing::debug!("Signed in from the login page"),
            }
        },
        LoginScreen::Continue(target) => {
            let route = Route::from_path(&target).unwrap_or(Route::Home {});
            nav.replace(route);
            rsx! {}
        }
        LoginScreen::NoAccess => {
            let username = auth_state
                .read()
                .user()
                .map(|user| user.username.clone())
                .unwrap_or_default();
            rsx! {
                div {
                    class: "login-container",
                    h1 { class: "login-title", "{config.app.title}" }
                    p {
                        class: "login-subtitle",
                        "You are signed in as {username}, which has no access to this area."
                    }
                    LogoutButton {
                        label: "Sign in with another account",
                        class: "btn btn-primary login-submit",
                        on_logged_out: move |_| tracing::debug!("Signed out to switch accounts"),
                    }
                    Link { class: "login-home", to: Route::Home {}, "Back to the site" }
                }
            }
        }
    }
}
