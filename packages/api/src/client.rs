//! # API gateway client
//!
//! [`ApiClient`] is the single door to the backend. Every request goes through
//! [`ApiClient::send`], which:
//!
//! 1. records the session epoch and attaches the stored bearer token, if any;
//! 2. hands the request to the [`Transport`];
//! 3. classifies non-2xx statuses into an [`ApiError`] and returns it unchanged
//!    to the caller (no retries, nothing swallowed).
//!
//! ## Losing authentication
//!
//! A 401 from any endpoint other than [`LOGIN_PATH`] means the credential is
//! gone. The client clears the session store and broadcasts
//! [`AuthEvent::SessionLost`]; whoever subscribed at the top of the app owns
//! the actual redirect. The clear goes through
//! [`SessionStore::clear_if_current`] with the epoch recorded when the request
//! was sent, so:
//!
//! - several requests failing together clear once and emit one event;
//! - a 401 for a request sent before a logout or a fresh login does nothing.
//!
//! A 403 leaves the session alone and is simply returned to the caller.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use store::{SessionBackend, SessionStore};
use tokio::sync::broadcast;

use crate::error::ApiError;
use crate::form::MultipartForm;
use crate::transport::{HttpRequest, Method, RequestBody, Transport};

/// Endpoint that exchanges credentials for a token. Exempt from auth-loss handling.
pub const LOGIN_PATH: &str = "/auth/login";
/// Endpoint that returns the user behind the current token.
pub const CURRENT_USER_PATH: &str = "/auth/me";

const EVENT_CAPACITY: usize = 16;

/// Signals raised by the gateway for app-level subscribers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AuthEvent {
    /// The backend rejected the stored credential; the session has been cleared.
    SessionLost { path: String },
}

/// A request relative to the API base URL.
#[derive(Clone, Debug, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: RequestBody,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: RequestBody::Empty,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::Post, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::Put, path)
    }

    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(Method::Patch, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::Delete, path)
    }

    pub fn query(mut self, name: &str, value: impl Into<String>) -> Self {
        self.query.push((name.to_string(), value.into()));
        self
    }

    pub fn json(mut self, value: serde_json::Value) -> Self {
        self.body = RequestBody::Json(value);
        self
    }

    pub fn multipart(mut self, form: MultipartForm) -> Self {
        self.body = RequestBody::Multipart(form);
        self
    }
}

/// Response bodies arrive either bare or wrapped in `{ "data": ... }`.
#[derive(Deserialize)]
#[serde(untagged)]
enum Envelope<T> {
    Wrapped { data: T },
    Bare(T),
}

impl<T> Envelope<T> {
    fn into_inner(self) -> T {
        match self {
            Envelope::Wrapped { data } => data,
            Envelope::Bare(value) => value,
        }
    }
}

struct ClientInner<T, B> {
    base_url: String,
    transport: T,
    session: SessionStore<B>,
    events: broadcast::Sender<AuthEvent>,
}

/// Shared handle to the backend. Clones talk to the same session and event channel.
pub struct ApiClient<T, B> {
    inner: Arc<ClientInner<T, B>>,
}

impl<T, B> Clone for ApiClient<T, B> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T, B> PartialEq for ApiClient<T, B> {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl<T: Transport, B: SessionBackend> ApiClient<T, B> {
    pub fn new(base_url: impl Into<String>, transport: T, session: SessionStore<B>) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            inner: Arc::new(ClientInner {
                base_url,
                transport,
                session,
                events,
            }),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    pub fn session(&self) -> &SessionStore<B> {
        &self.inner.session
    }

    pub fn transport(&self) -> &T {
        &self.inner.transport
    }

    /// Receive [`AuthEvent`]s raised after this call.
    pub fn subscribe(&self) -> broadcast::Receiver<AuthEvent> {
        self.inner.events.subscribe()
    }

    /// Absolute URL for a request, query string included.
    pub fn url_for(&self, request: &ApiRequest) -> Result<String, ApiError> {
        let path = if request.path.starts_with('/') {
            request.path.clone()
        } else {
            format!("/{}", request.path)
        };
        let raw = format!("{}{}", self.inner.base_url, path);
        let mut url = reqwest::Url::parse(&raw)
            .map_err(|e| ApiError::Network(format!("invalid URL {raw}: {e}")))?;
        if !request.query.is_empty() {
            url.query_pairs_mut().extend_pairs(request.query.iter());
        }
        Ok(url.to_string())
    }

    /// Send a request and return the raw success body.
    pub async fn send(&self, request: ApiRequest) -> Result<Vec<u8>, ApiError> {
        let url = self.url_for(&request)?;
        let session = &self.inner.session;
        let epoch = session.epoch();
        let bearer = session.token();
        let path = request.path.clone();

        let outgoing = HttpRequest {
            method: request.method,
            path: path.clone(),
            url,
            bearer,
            body: request.body,
        };

        let response = match self.inner.transport.send(outgoing).await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!("{} {path} failed: {e}", request.method.as_str());
                return Err(ApiError::Network(e));
            }
        };

        if response.is_success() {
            return Ok(response.body);
        }

        let error = ApiError::from_status(response.status, &response.body);
        if matches!(error, ApiError::Authentication { .. }) && path != LOGIN_PATH {
            self.authentication_lost(epoch, &path);
        }
        Err(error)
    }

    /// Send a request and decode the JSON success body.
    pub async fn send_json<R: DeserializeOwned>(&self, request: ApiRequest) -> Result<R, ApiError> {
        let path = request.path.clone();
        let body = self.send(request).await?;
        serde_json::from_slice::<Envelope<R>>(&body)
            .map(Envelope::into_inner)
            .map_err(|e| {
                tracing::warn!("Undecodable response from {path}: {e}");
                ApiError::Decode(e.to_string())
            })
    }

    fn authentication_lost(&self, epoch: u64, path: &str) {
        if self.inner.session.clear_if_current(epoch) {
            tracing::warn!("Authentication lost on {path}, session cleared");
            // No subscriber yet is fine: the session is already cleared.
            let _ = self.inner.events.send(AuthEvent::SessionLost {
                path: path.to_string(),
            });
        } else {
            tracing::debug!("Ignoring authentication failure on {path} from a superseded session");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::ScriptedTransport;
    use crate::transport::HttpResponse;
    use serde_json::json;
    use store::{MemoryBackend, Role, SessionKeys, User};

    fn admin() -> User {
        User {
            id: 1,
            username: "admin".to_string(),
            role: Role::Admin,
        }
    }

    fn client() -> (ApiClient<ScriptedTransport, MemoryBackend>, ScriptedTransport) {
        let transport = ScriptedTransport::new();
        let session = SessionStore::new(MemoryBackend::new(), SessionKeys::default());
        let client = ApiClient::new("http://api.test/api/", transport.clone(), session);
        (client, transport)
    }

    #[test]
    fn test_url_building() {
        let (client, _) = client();
        let request = ApiRequest::get("publications").query("category", "annual reports");
        assert_eq!(
            client.url_for(&request).unwrap(),
            "http://api.test/api/publications?category=annual+reports"
        );
        assert_eq!(
            client.url_for(&ApiRequest::get("/auth/me")).unwrap(),
            "http://api.test/api/auth/me"
        );
    }

    #[tokio::test]
    async fn test_bearer_attached_when_signed_in() {
        let (client, transport) = client();
        transport.reply(Method::Get, "/services", HttpResponse::json(200, &json!([])));
        transport.reply(Method::Get, "/services", HttpResponse::json(200, &json!([])));

        client.send(ApiRequest::get("/services")).await.unwrap();
        client.session().save("abc123", &admin()).unwrap();
        client.send(ApiRequest::get("/services")).await.unwrap();

        let sent = transport.requests();
        assert_eq!(sent[0].bearer, None);
        assert_eq!(sent[1].bearer.as_deref(), Some("abc123"));
    }

    #[tokio::test]
    async fn test_unauthorized_clears_session_and_signals() {
        let (client, transport) = client();
        client.session().save("abc123", &admin()).unwrap();
        let mut events = client.subscribe();
        transport.reply(
            Method::Get,
            "/seminars",
            HttpResponse::json(401, &json!({"message": "Token expired"})),
        );

        let err = client.send(ApiRequest::get("/seminars")).await.unwrap_err();
        assert_eq!(
            err,
            ApiError::Authentication {
                message: "Token expired".to_string()
            }
        );
        assert!(client.session().read().is_none());
        assert_eq!(
            events.try_recv().unwrap(),
            AuthEvent::SessionLost {
                path: "/seminars".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_login_endpoint_failure_does_not_signal() {
        let (client, transport) = client();
        let mut events = client.subscribe();
        transport.reply(
            Method::Post,
            LOGIN_PATH,
            HttpResponse::json(401, &json!({"message": "Invalid credentials"})),
        );

        let err = client.send(ApiRequest::post(LOGIN_PATH)).await.unwrap_err();
        assert_eq!(err.user_message(), "Invalid credentials");
        assert!(events.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_forbidden_keeps_session() {
        let (client, transport) = client();
        client.session().save("abc123", &admin()).unwrap();
        let mut events = client.subscribe();
        transport.reply(Method::Delete, "/reports/3", HttpResponse::json(403, &json!({})));

        let err = client.send(ApiRequest::delete("/reports/3")).await.unwrap_err();
        assert!(matches!(err, ApiError::Authorization { .. }));
        assert!(client.session().read().is_some());
        assert!(events.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_concurrent_failures_signal_once() {
        let (client, transport) = client();
        client.session().save("abc123", &admin()).unwrap();
        let mut events = client.subscribe();
        let (release_a, reply_a) = ScriptedTransport::deferred();
        let (release_b, reply_b) = ScriptedTransport::deferred();
        transport.push(Method::Get, "/publications", reply_a);
        transport.push(Method::Get, "/services", reply_b);

        let (a, b, _) = tokio::join!(
            client.send(ApiRequest::get("/publications")),
            client.send(ApiRequest::get("/services")),
            async {
                let _ = release_a.send(HttpResponse::new(401, ""));
                let _ = release_b.send(HttpResponse::new(401, ""));
            }
        );

        assert!(matches!(a, Err(ApiError::Authentication { .. })));
        assert!(matches!(b, Err(ApiError::Authentication { .. })));
        assert!(events.try_recv().is_ok());
        assert!(events.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_stale_unauthorized_does_not_clear_new_session() {
        let (client, transport) = client();
        client.session().save("old", &admin()).unwrap();
        let mut events = client.subscribe();
        let (release, reply) = ScriptedTransport::deferred();
        transport.push(Method::Get, "/newspapers", reply);

        let (result, _) = tokio::join!(client.send(ApiRequest::get("/newspapers")), async {
            client.session().save("new", &admin()).unwrap();
            let _ = release.send(HttpResponse::new(401, ""));
        });

        assert!(result.is_err());
        assert_eq!(client.session().token().as_deref(), Some("new"));
        assert!(events.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_other_errors_surface_unchanged() {
        let (client, transport) = client();
        client.session().save("abc123", &admin()).unwrap();
        transport.reply(Method::Get, "/publications/9", HttpResponse::new(404, ""));
        transport.fail(Method::Get, "/services", "connection refused");
        transport.reply(Method::Post, "/seminars", HttpResponse::new(500, ""));

        assert!(client
            .send(ApiRequest::get("/publications/9"))
            .await
            .unwrap_err()
            .is_not_found());
        assert_eq!(
            client.send(ApiRequest::get("/services")).await.unwrap_err(),
            ApiError::Network("connection refused".to_string())
        );
        assert!(matches!(
            client.send(ApiRequest::post("/seminars")).await.unwrap_err(),
            ApiError::Server { status: 500, .. }
        ));
        assert!(client.session().read().is_some());
        assert_eq!(transport.requests().len(), 3);
    }

    #[tokio::test]
    async fn test_json_envelope_is_optional() {
        let (client, transport) = client();
        transport.reply(Method::Get, "/a", HttpResponse::json(200, &json!({"data": [1, 2]})));
        transport.reply(Method::Get, "/b", HttpResponse::json(200, &json!([3])));
        transport.reply(Method::Get, "/c", HttpResponse::new(200, "not json"));

        let a: Vec<i32> = client.send_json(ApiRequest::get("/a")).await.unwrap();
        let b: Vec<i32> = client.send_json(ApiRequest::get("/b")).await.unwrap();
        let c: Result<Vec<i32>, _> = client.send_json(ApiRequest::get("/c")).await;
        assert_eq!(a, vec![1, 2]);
        assert_eq!(b, vec![3]);
        assert!(matches!(c, Err(ApiError::Decode(_))));
    }
}
