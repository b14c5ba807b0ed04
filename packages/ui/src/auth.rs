//! # Authentication state and the controller that drives it
//!
//! [`AuthController`] owns the three transitions of the session lifecycle and
//! nothing else; it holds no state of its own beyond the [`ApiClient`] (and the
//! session store inside it). [`AuthProvider`] wraps it for the component tree:
//! it exposes the current [`AuthState`] as a signal, rehydrates on mount, and is
//! the single subscriber that turns [`AuthEvent::SessionLost`] into a redirect.
//!
//! ## States
//!
//! ```text
//! Unknown ──resume──▶ Anonymous ◀──logout / revalidation failure / 401──┐
//!    │                    │                                              │
//!    └──resume──▶ Authenticated(cached) ──revalidate──▶ Authenticated(fresh)
//!                         ▲
//!                       login
//! ```
//!
//! `Unknown` only exists until the provider's first effect runs. Guards treat it
//! as "wait", never as "signed out".
//!
//! ## Stale results
//!
//! Login and revalidation record the session epoch before going to the network
//! and write back with [`SessionStore::save_if_current`]. If the user logged out
//! (or anything else rewrote the session) in the meantime, the late response is
//! dropped instead of resurrecting the old session.

use api::{ApiClient, ApiError, AuthEvent, Credentials, Transport};
use dioxus::prelude::*;
use store::{PortalConfig, SessionBackend, StorageError, User};
use thiserror::Error;
use tokio::sync::broadcast::error::RecvError;

use crate::client::{make_client, AppApi, AppAuth};
use crate::navigation::hard_redirect_to_login;

/// Who is using the app right now.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum AuthState {
    /// Persisted session not looked at yet.
    #[default]
    Unknown,
    Anonymous,
    Authenticated(User),
}

impl AuthState {
    pub fn user(&self) -> Option<&User> {
        match self {
            AuthState::Authenticated(user) => Some(user),
            _ => None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, AuthState::Authenticated(_))
    }

    pub fn is_resolved(&self) -> bool {
        !matches!(self, AuthState::Unknown)
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum AuthError {
    #[error("Please enter both your email and password.")]
    InvalidCredentials,
    #[error("{}", .0.user_message())]
    Rejected(ApiError),
    #[error("Could not keep you signed in: {0}")]
    Storage(StorageError),
    #[error("Sign-in was interrupted. Please try again.")]
    Superseded,
}

/// Orchestrates login, logout and rehydration over an [`ApiClient`].
pub struct AuthController<T, B> {
    client: ApiClient<T, B>,
}

impl<T, B> Clone for AuthController<T, B> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
        }
    }
}

impl<T, B> PartialEq for AuthController<T, B> {
    fn eq(&self, other: &Self) -> bool {
        self.client == other.client
    }
}

impl<T: Transport, B: SessionBackend> AuthController<T, B> {
    pub fn new(client: ApiClient<T, B>) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &ApiClient<T, B> {
        &self.client
    }

    /// Resolve the starting state from storage alone, trusting the cached user.
    pub fn resume(&self) -> AuthState {
        match self.client.session().read() {
            Some(session) => {
                tracing::debug!("Resuming cached session for {}", session.user.username);
                AuthState::Authenticated(session.user)
            }
            None => AuthState::Anonymous,
        }
    }

    /// Confirm the cached token with the backend.
    ///
    /// Returns `None` when the session changed while the check was in flight;
    /// the caller should keep whatever state that change produced.
    pub async fn revalidate(&self) -> Option<AuthState> {
        let session = self.client.session();
        let Some(cached) = session.read() else {
            return Some(AuthState::Anonymous);
        };
        let epoch = session.epoch();

        match self.client.current_user().await {
            Ok(user) => match session.save_if_current(epoch, &cached.token, &user) {
                Ok(true) => {
                    tracing::info!("Session confirmed for {}", user.username);
                    Some(AuthState::Authenticated(user))
                }
                Ok(false) => {
                    tracing::debug!("Discarding revalidation result for a superseded session");
                    None
                }
                Err(e) => {
                    tracing::error!("Failed to refresh cached user: {e}");
                    Some(AuthState::Anonymous)
                }
            },
            Err(e) => {
                // A 401 has already cleared the store through the gateway.
                if session.clear_if_current(epoch) || session.read().is_none() {
                    tracing::warn!("Cached session rejected, signing out: {e}");
                    Some(AuthState::Anonymous)
                } else {
                    tracing::debug!("Discarding revalidation failure for a superseded session");
                    None
                }
            }
        }
    }

    /// Exchange credentials for a session and persist it.
    pub async fn login(&self, identifier: &str, secret: &str) -> Result<User, AuthError> {
        let identifier = identifier.trim();
        if identifier.is_empty() || secret.is_empty() {
            return Err(AuthError::InvalidCredentials);
        }

        let session = self.client.session();
        let epoch = session.epoch();
        let credentials = Credentials {
            identifier: identifier.to_string(),
            secret: secret.to_string(),
        };
        let response = self.client.login(&credentials).await.map_err(|e| {
            tracing::warn!("Login rejected for {identifier}: {e}");
            AuthError::Rejected(e)
        })?;

        match session.save_if_current(epoch, &response.token, &response.user) {
            Ok(true) => {
                tracing::info!(
                    "Signed in as {} ({})",
                    response.user.username,
                    response.user.role
                );
                Ok(response.user)
            }
            Ok(false) => Err(AuthError::Superseded),
            Err(e) => {
                tracing::error!("Failed to persist session: {e}");
                Err(AuthError::Storage(e))
            }
        }
    }

    /// Drop the session. No network call; in-flight responses are ignored afterwards.
    pub fn logout(&self) -> AuthState {
        self.client.session().clear();
        tracing::info!("Signed out");
        AuthState::Anonymous
    }
}

/// The current authentication state.
pub fn use_auth() -> Signal<AuthState> {
    use_context::<Signal<AuthState>>()
}

/// The app-wide auth controller.
pub fn use_auth_controller() -> AppAuth {
    use_context::<AppAuth>()
}

/// The app-wide API client.
pub fn use_api() -> AppApi {
    use_context::<AppAuth>().client().clone()
}

/// Provides [`AuthState`], the controller, the API client and the
/// [`PortalConfig`] to its children.
///
/// Rehydrates the persisted session on mount and redirects to the login page
/// whenever the gateway reports that authentication was lost.
#[component]
pub fn AuthProvider(config: PortalConfig, children: Element) -> Element {
    let controller = use_hook(|| AuthController::new(make_client(&config)));
    use_context_provider(|| controller.clone());
    use_context_provider(|| config.clone());
    let mut auth_state = use_context_provider(|| Signal::new(AuthState::Unknown));

    // Rehydrate: trust storage first, then confirm with the backend.
    let rehydrate = controller.clone();
    use_future(move || {
        let controller = rehydrate.clone();
        async move {
            let resumed = controller.resume();
            let needs_check = resumed.is_authenticated();
            auth_state.set(resumed);
            if needs_check {
                if let Some(state) = controller.revalidate().await {
                    auth_state.set(state);
                }
            }
        }
    });

    // Single owner of the auth-loss redirect.
    let watcher = controller.clone();
    use_future(move || {
        let controller = watcher.clone();
        async move {
            let mut events = controller.client().subscribe();
            loop {
                match events.recv().await {
                    Ok(AuthEvent::SessionLost { path }) => {
                        tracing::info!("Redirecting to login after auth loss on {path}");
                        auth_state.set(AuthState::Anonymous);
                        hard_redirect_to_login();
                    }
                    Err(RecvError::Lagged(skipped)) => {
                        tracing::debug!("Skipped {skipped} auth events");
                    }
                    Err(RecvError::Closed) => break,
                }
            }
        }
    });

    rsx! {
        {children}
    }
}

/// Button that signs the user out, then calls `on_logged_out`.
#[component]
pub fn LogoutButton(
    #[props(default = "Sign out".to_string())] label: String,
    #[props(default = "".to_string())] class: String,
    on_logged_out: EventHandler<()>,
) -> Element {
    let controller = use_auth_controller();
    let mut auth_state = use_auth();

    let onclick = move |_| {
        auth_state.set(controller.logout());
        on_logged_out.call(());
    };

    rsx! {
        button {
            class: "{class}",
            onclick: onclick,
            "{label}"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use api::testing::ScriptedTransport;
    use api::{HttpResponse, Method, CURRENT_USER_PATH, LOGIN_PATH};
    use serde_json::json;
    use store::{MemoryBackend, Role, SessionKeys, SessionStore};

    type TestController = AuthController<ScriptedTransport, MemoryBackend>;

    fn admin() -> User {
        User {
            id: 1,
            username: "admin".to_string(),
            role: Role::Admin,
        }
    }

    fn controller() -> (TestController, ScriptedTransport) {
        let transport = ScriptedTransport::new();
        let session = SessionStore::new(MemoryBackend::new(), SessionKeys::default());
        let client = ApiClient::new("http://api.test", transport.clone(), session);
        (AuthController::new(client), transport)
    }

    fn login_ok() -> HttpResponse {
        HttpResponse::json(
            200,
            &json!({"token": "abc123", "user": {"id": 1, "username": "admin", "role": "admin"}}),
        )
    }

    #[tokio::test]
    async fn test_login_persists_session() {
        let (controller, transport) = controller();
        transport.reply(Method::Post, LOGIN_PATH, login_ok());

        let user = controller.login("admin@example.com", "correct").await.unwrap();
        assert_eq!(user, admin());

        let session = controller.client().session().read().unwrap();
        assert_eq!(session.token, "abc123");
        assert_eq!(session.user.role, Role::Admin);
        assert_eq!(controller.resume(), AuthState::Authenticated(admin()));
    }

    #[tokio::test]
    async fn test_empty_secret_fails_before_network() {
        let (controller, transport) = controller();

        let err = controller.login("admin@example.com", "").await.unwrap_err();
        assert_eq!(err, AuthError::InvalidCredentials);
        let err = controller.login("   ", "secret").await.unwrap_err();
        assert_eq!(err, AuthError::InvalidCredentials);

        assert_eq!(transport.request_count(), 0);
        assert!(controller.client().session().read().is_none());
    }

    #[tokio::test]
    async fn test_rejected_login_surfaces_backend_message() {
        let (controller, transport) = controller();
        transport.reply(
            Method::Post,
            LOGIN_PATH,
            HttpResponse::json(401, &json!({"message": "Invalid email or password"})),
        );

        let err = controller.login("admin@example.com", "wrong").await.unwrap_err();
        assert_eq!(err.to_string(), "Invalid email or password");
        assert!(controller.client().session().read().is_none());
        assert_eq!(controller.resume(), AuthState::Anonymous);
    }

    #[tokio::test]
    async fn test_logout_is_unconditional() {
        let (controller, transport) = controller();
        assert_eq!(controller.logout(), AuthState::Anonymous);

        controller.client().session().save("abc123", &admin()).unwrap();
        assert_eq!(controller.logout(), AuthState::Anonymous);
        assert!(controller.client().session().read().is_none());
        assert_eq!(transport.request_count(), 0);
    }

    #[tokio::test]
    async fn test_revalidate_replaces_cached_user() {
        let (controller, transport) = controller();
        controller.client().session().save("abc123", &admin()).unwrap();
        transport.reply(
            Method::Get,
            CURRENT_USER_PATH,
            HttpResponse::json(200, &json!({"id": 1, "username": "root", "role": "admin"})),
        );

        let state = controller.revalidate().await.unwrap();
        let fresh = User {
            username: "root".to_string(),
            ..admin()
        };
        assert_eq!(state, AuthState::Authenticated(fresh.clone()));
        assert_eq!(controller.client().session().read().unwrap().user, fresh);
        assert_eq!(controller.client().session().token().as_deref(), Some("abc123"));
    }

    #[tokio::test]
    async fn test_revalidate_failure_signs_out() {
        let (controller, transport) = controller();
        controller.client().session().save("abc123", &admin()).unwrap();
        transport.reply(Method::Get, CURRENT_USER_PATH, HttpResponse::new(401, ""));

        assert_eq!(controller.revalidate().await, Some(AuthState::Anonymous));
        assert!(controller.client().session().read().is_none());
    }

    #[tokio::test]
    async fn test_revalidate_network_failure_signs_out() {
        let (controller, transport) = controller();
        controller.client().session().save("abc123", &admin()).unwrap();
        transport.fail(Method::Get, CURRENT_USER_PATH, "offline");

        assert_eq!(controller.revalidate().await, Some(AuthState::Anonymous));
        assert!(controller.client().session().read().is_none());
    }

    #[tokio::test]
    async fn test_no_token_resolves_anonymous_without_network() {
        let (controller, transport) = controller();
        assert_eq!(controller.resume(), AuthState::Anonymous);
        assert_eq!(controller.revalidate().await, Some(AuthState::Anonymous));
        assert_eq!(transport.request_count(), 0);
    }

    #[tokio::test]
    async fn test_response_after_logout_is_ignored() {
        let (controller, transport) = controller();
        controller.client().session().save("abc123", &admin()).unwrap();
        let (release, reply) = ScriptedTransport::deferred();
        transport.push(Method::Get, CURRENT_USER_PATH, reply);

        let (state, _) = tokio::join!(controller.revalidate(), async {
            controller.logout();
            let _ = release.send(HttpResponse::json(
                200,
                &json!({"id": 1, "username": "admin", "role": "admin"}),
            ));
        });

        assert_eq!(state, None);
        assert!(controller.client().session().read().is_none());
    }

    #[tokio::test]
    async fn test_login_response_after_logout_is_ignored() {
        let (controller, transport) = controller();
        let (release, reply) = ScriptedTransport::deferred();
        transport.push(Method::Post, LOGIN_PATH, reply);

        let (result, _) = tokio::join!(controller.login("admin@example.com", "correct"), async {
            controller.logout();
            let _ = release.send(login_ok());
        });

        assert_eq!(result.unwrap_err(), AuthError::Superseded);
        assert!(controller.client().session().read().is_none());
    }

    #[tokio::test]
    async fn test_login_then_logout_gates_admin_route() {
        use crate::guard::{requires_role, GuardOutcome};

        let (controller, transport) = controller();
        transport.reply(Method::Post, LOGIN_PATH, login_ok());

        controller.login("admin@example.com", "correct").await.unwrap();
        let state = controller.resume();
        assert_eq!(
            requires_role(&state, Role::Admin, "/admin/publications"),
            GuardOutcome::Allowed
        );

        let state = controller.logout();
        assert_eq!(
            requires_role(&state, Role::Admin, "/admin/publications"),
            GuardOutcome::RedirectTo("/login?redirect=%2Fadmin%2Fpublications".to_string())
        );
    }

    #[tokio::test]
    async fn test_post_login_destination_by_role() {
        use crate::guard::{login_screen, LoginScreen};

        let (controller, transport) = controller();
        transport.reply(Method::Post, LOGIN_PATH, login_ok());
        controller.login("admin@example.com", "correct").await.unwrap();
        let state = controller.resume();
        assert_eq!(
            login_screen(&state, "%2Fadmin%2Fpublications"),
            LoginScreen::Continue("/admin/publications".to_string())
        );
        assert_eq!(
            login_screen(&state, "//evil.example"),
            LoginScreen::Continue("/admin".to_string())
        );
        controller.logout();

        transport.reply(
            Method::Post,
            LOGIN_PATH,
            HttpResponse::json(
                200,
                &json!({"token": "def456", "user": {"id": 2, "username": "editor", "role": "editor"}}),
            ),
        );
        let user = controller.login("editor@example.com", "correct").await.unwrap();
        assert_eq!(user.role, Role::Editor);
        let state = controller.resume();
        assert_eq!(login_screen(&state, ""), LoginScreen::NoAccess);
        assert_eq!(login_screen(&state, "%2Fadmin%2Fpublications"), LoginScreen::NoAccess);
        assert_eq!(
            login_screen(&state, "%2Fseminars"),
            LoginScreen::Continue("/seminars".to_string())
        );
    }
}
