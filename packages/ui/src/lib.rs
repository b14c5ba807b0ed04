//! Shared UI for the compliance portal: authentication state, route guards,
//! the admin shell, the CRUD manager kit, and the screens built from them.

pub use dioxus_free_icons::Icon;
pub mod icons {
    pub use dioxus_free_icons::icons::fa_solid_icons::*;
}

mod client;
pub use client::{make_client, AppApi, AppAuth, PlatformBackend};

mod auth;
pub use auth::{
    use_api, use_auth, use_auth_controller, AuthController, AuthError, AuthProvider, AuthState,
    LogoutButton,
};

pub mod guard;
pub use guard::{admission, login_screen, requires_role, requires_session, GuardOutcome, LoginScreen};

mod navigation;
pub use navigation::hard_redirect_to_login;

pub mod shell;
pub use shell::{AdminShell, ShellState};

pub mod crud;
pub mod feedback;

mod markdown;
pub use markdown::{render_markdown, Markdown};

mod navbar;
pub use navbar::Navbar;

pub mod views;

pub mod features;
pub use features::{track_page_view, use_config, NewsletterSignup};
