//! Full-page navigation outside the router.
//!
//! The auth-loss subscriber uses a hard redirect so every screen state built on
//! the old session is thrown away with the page.

use crate::guard::LOGIN_ROUTE;

/// Replace the current page with the login screen, remembering where we were.
///
/// Does nothing when already on the login screen.
pub fn hard_redirect_to_login() {
    #[cfg(target_arch = "wasm32")]
    {
        let Some(window) = web_sys::window() else {
            return;
        };
        let location = window.location();
        let path = location.pathname().unwrap_or_default();
        if path == LOGIN_ROUTE {
            return;
        }
        let search = location.search().unwrap_or_default();
        let target = crate::guard::login_redirect(&format!("{path}{search}"));
        if let Err(e) = location.replace(&target) {
            tracing::error!("Failed to redirect to login: {:?}", e);
        }
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        tracing::info!("Authentication lost; redirect to {LOGIN_ROUTE}");
    }
}
