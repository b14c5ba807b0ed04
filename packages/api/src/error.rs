//! # Error taxonomy for backend calls
//!
//! Every failed request is mapped onto one [`ApiError`] variant by
//! [`ApiError::from_status`]:
//!
//! | Status | Variant |
//! |--------|---------|
//! | 401 | [`Authentication`](ApiError::Authentication) |
//! | 403 | [`Authorization`](ApiError::Authorization) |
//! | 404 | [`NotFound`](ApiError::NotFound) |
//! | 400, 409, 422, any other 4xx | [`Validation`](ApiError::Validation) |
//! | 5xx and anything else | [`Server`](ApiError::Server) |
//!
//! Transport failures become [`Network`](ApiError::Network) and undecodable
//! success bodies become [`Decode`](ApiError::Decode).
//!
//! The backend's own message is taken from the JSON body (`message`, then
//! `error`, then `detail`). When none is present each variant carries a generic
//! message suitable for showing to the user.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("{message}")]
    Validation { message: String },
    #[error("{message}")]
    Authentication { message: String },
    #[error("{message}")]
    Authorization { message: String },
    #[error("{message}")]
    NotFound { message: String },
    #[error("server error ({status}): {message}")]
    Server { status: u16, message: String },
    #[error("network error: {0}")]
    Network(String),
    #[error("unexpected response: {0}")]
    Decode(String),
}

const VALIDATION_FALLBACK: &str = "The submitted data is invalid.";
const AUTHENTICATION_FALLBACK: &str = "Your session has expired. Please sign in again.";
const AUTHORIZATION_FALLBACK: &str = "You do not have permission to perform this action.";
const NOT_FOUND_FALLBACK: &str = "The requested item was not found.";
const SERVER_FALLBACK: &str = "The server encountered an error. Please try again.";
const NETWORK_FALLBACK: &str = "Unable to reach the server. Check your connection and try again.";

impl ApiError {
    /// Classify a non-2xx response.
    pub fn from_status(status: u16, body: &[u8]) -> Self {
        let message = backend_message(body);
        let or = |fallback: &str| message.clone().unwrap_or_else(|| fallback.to_string());
        match status {
            401 => ApiError::Authentication {
                message: or(AUTHENTICATION_FALLBACK),
            },
            403 => ApiError::Authorization {
                message: or(AUTHORIZATION_FALLBACK),
            },
            404 => ApiError::NotFound {
                message: or(NOT_FOUND_FALLBACK),
            },
            400..=499 => ApiError::Validation {
                message: or(VALIDATION_FALLBACK),
            },
            _ => ApiError::Server {
                status,
                message: or(SERVER_FALLBACK),
            },
        }
    }

    /// Server and network failures may succeed if the user tries again.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ApiError::Server { .. } | ApiError::Network(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::NotFound { .. })
    }

    /// Text to show in a banner: the backend's message where there is one.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Validation { message }
            | ApiError::Authentication { message }
            | ApiError::Authorization { message }
            | ApiError::NotFound { message }
            | ApiError::Server { message, .. } => message.clone(),
            ApiError::Network(_) => NETWORK_FALLBACK.to_string(),
            ApiError::Decode(_) => SERVER_FALLBACK.to_string(),
        }
    }
}

fn backend_message(body: &[u8]) -> Option<String> {
    let value: serde_json::Value = serde_json::from_slice(body).ok()?;
    ["message", "error", "detail"].iter().find_map(|field| {
        match value.get(*field)? {
            serde_json::Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
            serde_json::Value::Object(inner) => inner
                .get("message")
                .and_then(|m| m.as_str())
                .map(str::to_string),
            _ => None,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_classes() {
        assert!(matches!(ApiError::from_status(400, b""), ApiError::Validation { .. }));
        assert!(matches!(ApiError::from_status(409, b""), ApiError::Validation { .. }));
        assert!(matches!(ApiError::from_status(422, b""), ApiError::Validation { .. }));
        assert!(matches!(ApiError::from_status(401, b""), ApiError::Authentication { .. }));
        assert!(matches!(ApiError::from_status(403, b""), ApiError::Authorization { .. }));
        assert!(matches!(ApiError::from_status(404, b""), ApiError::NotFound { .. }));
        assert!(matches!(
            ApiError::from_status(503, b""),
            ApiError::Server { status: 503, .. }
        ));
    }

    #[test]
    fn test_backend_message_is_kept_verbatim() {
        let err = ApiError::from_status(422, br#"{"message":"Title is required"}"#);
        assert_eq!(err.user_message(), "Title is required");

        let err = ApiError::from_status(401, br#"{"error":"Invalid credentials"}"#);
        assert_eq!(err.user_message(), "Invalid credentials");

        let err = ApiError::from_status(500, br#"{"error":{"message":"db down"}}"#);
        assert_eq!(err.user_message(), "db down");
    }

    #[test]
    fn test_fallback_messages() {
        let err = ApiError::from_status(500, b"<html>oops</html>");
        assert_eq!(err.user_message(), SERVER_FALLBACK);

        let err = ApiError::from_status(404, br#"{"message":"  "}"#);
        assert_eq!(err.user_message(), NOT_FOUND_FALLBACK);

        assert_eq!(
            ApiError::Network("dns".to_string()).user_message(),
            NETWORK_FALLBACK
        );
    }

    #[test]
    fn test_retryable() {
        assert!(ApiError::Network("reset".to_string()).is_retryable());
        assert!(ApiError::from_status(502, b"").is_retryable());
        assert!(!ApiError::from_status(422, b"").is_retryable());
        assert!(!ApiError::from_status(403, b"").is_retryable());
    }
}
