//! Turning API failures into something a screen can show.

use api::ApiError;

/// Log `error` and return the message to display, if any.
///
/// Authentication failures return `None`: the gateway has already cleared the
/// session and the app-level subscriber is redirecting to the login page, so a
/// banner would only flash before the page goes away.
pub fn surface_error(context: &str, error: &ApiError) -> Option<String> {
    match error {
        ApiError::Authentication { .. } => {
            tracing::debug!("{context}: authentication lost");
            None
        }
        ApiError::Validation { .. } | ApiError::NotFound { .. } | ApiError::Authorization { .. } => {
            tracing::warn!("{context}: {error}");
            Some(error.user_message())
        }
        ApiError::Server { .. } | ApiError::Network(_) | ApiError::Decode(_) => {
            tracing::error!("{context}: {error}");
            Some(error.user_message())
        }
    }
}
