//! # Route guards
//!
//! Pure admission decisions over [`AuthState`]. A guard never looks at menu or
//! navigation state and remembers nothing between calls, so the same state and
//! the same requested location always give the same [`GuardOutcome`].
//!
//! | State | `requires_session` | `requires_role(r)` |
//! |-------|--------------------|--------------------|
//! | `Unknown` | `Pending` | `Pending` |
//! | `Anonymous` | redirect to login | redirect to login |
//! | `Authenticated` with role `r` | `Allowed` | `Allowed` |
//! | `Authenticated` with another role | `Allowed` | redirect to login |
//!
//! A role mismatch redirects exactly like a missing session, so the routing
//! layer does not reveal which areas exist.
//!
//! The login page itself decides with [`login_screen`]: a signed-in user is
//! only sent on when the destination would admit them. Otherwise the page
//! stays put, which keeps a role mismatch from bouncing between the login page
//! and the guarded page.

use store::Role;

use crate::auth::AuthState;

pub const LOGIN_ROUTE: &str = "/login";
/// Every page under this prefix requires [`Role::Admin`].
pub const ADMIN_ROUTE: &str = "/admin";
const DEFAULT_RETURN: &str = ADMIN_ROUTE;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GuardOutcome {
    Allowed,
    /// Auth state not resolved yet; render a neutral placeholder.
    Pending,
    RedirectTo(String),
}

impl GuardOutcome {
    /// Evaluate `next` only if this outcome is `Allowed`.
    pub fn and_then(self, next: impl FnOnce() -> GuardOutcome) -> GuardOutcome {
        match self {
            GuardOutcome::Allowed => next(),
            other => other,
        }
    }

    pub fn is_allowed(&self) -> bool {
        matches!(self, GuardOutcome::Allowed)
    }
}

pub fn requires_session(state: &AuthState, requested: &str) -> GuardOutcome {
    match state {
        AuthState::Unknown => GuardOutcome::Pending,
        AuthState::Anonymous => GuardOutcome::RedirectTo(login_redirect(requested)),
        AuthState::Authenticated(_) => GuardOutcome::Allowed,
    }
}

pub fn requires_role(state: &AuthState, role: Role, requested: &str) -> GuardOutcome {
    requires_session(state, requested).and_then(|| match state.user() {
        Some(user) if user.role == role => GuardOutcome::Allowed,
        _ => GuardOutcome::RedirectTo(login_redirect(requested)),
    })
}

fn is_admin_path(path: &str) -> bool {
    match path.strip_prefix(ADMIN_ROUTE) {
        Some(rest) => rest.is_empty() || rest.starts_with('/') || rest.starts_with('?'),
        None => false,
    }
}

/// Admission for any local path: the admin area needs [`Role::Admin`], the
/// rest of the site is public.
pub fn admission(state: &AuthState, path: &str) -> GuardOutcome {
    if is_admin_path(path) {
        requires_role(state, Role::Admin, path)
    } else {
        GuardOutcome::Allowed
    }
}

/// What the login page shows.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LoginScreen {
    /// Auth state not resolved yet.
    Pending,
    Form,
    /// Signed in and admitted to the destination: go there.
    Continue(String),
    /// Signed in, but the destination would send the user straight back.
    NoAccess,
}

/// Decide the login page for `state` and its raw `redirect` parameter.
pub fn login_screen(state: &AuthState, redirect: &str) -> LoginScreen {
    match state {
        AuthState::Unknown => LoginScreen::Pending,
        AuthState::Anonymous => LoginScreen::Form,
        AuthState::Authenticated(_) => {
            let target = return_path_or_default(redirect);
            if admission(state, &target).is_allowed() {
                LoginScreen::Continue(target)
            } else {
                LoginScreen::NoAccess
            }
        }
    }
}

/// Login URL that brings the user back to `requested` afterwards.
pub fn login_redirect(requested: &str) -> String {
    match safe_return_path(requested) {
        Some(path) => format!("{LOGIN_ROUTE}?redirect={}", urlencoding::encode(&path)),
        None => LOGIN_ROUTE.to_string(),
    }
}

/// Decode a `redirect` parameter and keep it only if it stays on this site.
///
/// Rejects absolute and protocol-relative URLs and the login page itself.
pub fn safe_return_path(raw: &str) -> Option<String> {
    let decoded = urlencoding::decode(raw.trim()).ok()?;
    let path = decoded.trim();
    let local = path.starts_with('/') && !path.starts_with("//") && !path.contains('\\');
    if !local || path == LOGIN_ROUTE || path.starts_with("/login?") {
        return None;
    }
    Some(path.to_string())
}

/// Where to go after a successful login.
pub fn return_path_or_default(raw: &str) -> String {
    safe_return_path(raw).unwrap_or_else(|| DEFAULT_RETURN.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use store::User;

    fn user(role: Role) -> AuthState {
        AuthState::Authenticated(User {
            id: 7,
            username: "someone".to_string(),
            role,
        })
    }

    #[test]
    fn test_unknown_defers() {
        assert_eq!(requires_session(&AuthState::Unknown, "/admin"), GuardOutcome::Pending);
        assert_eq!(
            requires_role(&AuthState::Unknown, Role::Admin, "/admin"),
            GuardOutcome::Pending
        );
    }

    #[test]
    fn test_anonymous_redirects_with_return_path() {
        assert_eq!(
            requires_session(&AuthState::Anonymous, "/admin/seminars/3/edit"),
            GuardOutcome::RedirectTo("/login?redirect=%2Fadmin%2Fseminars%2F3%2Fedit".to_string())
        );
    }

    #[test]
    fn test_role_mismatch_looks_like_logged_out() {
        let requested = "/admin/reports";
        let mismatch = requires_role(&user(Role::Editor), Role::Admin, requested);
        let logged_out = requires_role(&AuthState::Anonymous, Role::Admin, requested);
        assert_eq!(mismatch, logged_out);
        assert!(matches!(mismatch, GuardOutcome::RedirectTo(_)));
    }

    #[test]
    fn test_matching_role_allowed() {
        assert!(requires_role(&user(Role::Admin), Role::Admin, "/admin").is_allowed());
        assert!(requires_session(&user(Role::Editor), "/admin").is_allowed());
    }

    #[test]
    fn test_decisions_are_repeatable() {
        let states = [
            AuthState::Unknown,
            AuthState::Anonymous,
            user(Role::Admin),
            user(Role::Editor),
        ];
        for state in &states {
            for path in ["/admin", "/admin/publications/new", "/"] {
                let first = requires_role(state, Role::Admin, path);
                // Interleave an unrelated evaluation; it must not leak into the next one.
                let _ = requires_session(&AuthState::Anonymous, "/elsewhere");
                assert_eq!(requires_role(state, Role::Admin, path), first);
                assert_eq!(requires_session(state, path), requires_session(state, path));
            }
        }
    }

    #[test]
    fn test_safe_return_path() {
        assert_eq!(safe_return_path("/admin/reports").as_deref(), Some("/admin/reports"));
        assert_eq!(safe_return_path("%2Fadmin").as_deref(), Some("/admin"));
        assert_eq!(safe_return_path("//evil.example"), None);
        assert_eq!(safe_return_path("https://evil.example"), None);
        assert_eq!(safe_return_path("/login"), None);
        assert_eq!(safe_return_path(""), None);
        assert_eq!(return_path_or_default("nope"), "/admin");
    }

    #[test]
    fn test_admission_by_area() {
        let editor = user(Role::Editor);
        assert!(admission(&editor, "/publications/2").is_allowed());
        assert!(admission(&editor, "/administration").is_allowed());
        assert!(!admission(&editor, "/admin").is_allowed());
        assert!(!admission(&editor, "/admin/reports?status=new").is_allowed());
        assert!(admission(&user(Role::Admin), "/admin/reports").is_allowed());
        assert_eq!(admission(&AuthState::Unknown, "/admin"), GuardOutcome::Pending);
    }

    #[test]
    fn test_login_screen_decisions() {
        assert_eq!(login_screen(&AuthState::Unknown, ""), LoginScreen::Pending);
        assert_eq!(login_screen(&AuthState::Anonymous, "%2Fadmin"), LoginScreen::Form);
        assert_eq!(
            login_screen(&user(Role::Admin), ""),
            LoginScreen::Continue("/admin".to_string())
        );
        assert_eq!(login_screen(&user(Role::Editor), ""), LoginScreen::NoAccess);
        assert_eq!(
            login_screen(&user(Role::Editor), "%2Fjournal%2F4"),
            LoginScreen::Continue("/journal/4".to_string())
        );
    }

    /// Follow the redirects the login page and the guarded pages would issue.
    fn follow_redirects(state: &AuthState, start: &str) -> Vec<String> {
        let mut location = start.to_string();
        let mut hops = Vec::new();
        for _ in 0..6 {
            let next = if location == LOGIN_ROUTE || location.starts_with("/login?") {
                let redirect = location
                    .split_once("?redirect=")
                    .map(|(_, raw)| raw)
                    .unwrap_or_default();
                match login_screen(state, redirect) {
                    LoginScreen::Continue(target) => Some(target),
                    _ => None,
                }
            } else {
                match admission(state, &location) {
                    GuardOutcome::RedirectTo(target) => Some(target),
                    _ => None,
                }
            };
            match next {
                Some(next) => {
                    hops.push(next.clone());
                    location = next;
                }
                None => break,
            }
        }
        hops
    }

    #[test]
    fn test_signed_in_editor_settles_on_login() {
        let editor = user(Role::Editor);
        assert!(follow_redirects(&editor, "/login").is_empty());
        assert_eq!(
            follow_redirects(&editor, "/admin/publications"),
            ["/login?redirect=%2Fadmin%2Fpublications"]
        );
        assert_eq!(follow_redirects(&user(Role::Admin), "/login"), ["/admin"]);
        assert!(follow_redirects(&AuthState::Anonymous, "/login").is_empty());
    }

    #[test]
    fn test_login_redirect_skips_unsafe_targets() {
        assert_eq!(login_redirect("//evil.example"), "/login");
        assert_eq!(login_redirect("/login"), "/login");
    }
}
