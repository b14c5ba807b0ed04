//! # Managed resources
//!
//! Each content type the admin console manages is a zero-size marker
//! implementing [`Resource`], binding the entity type to its endpoint. The CRUD
//! calls on [`ApiClient`] are generic over that marker:
//!
//! ```ignore
//! let items = client.list::<Publications>(&ListQuery::default()).await?;
//! client.delete::<Publications>(items[0].id).await?;
//! ```
//!
//! | Marker | Path | Entity |
//! |--------|------|--------|
//! | [`Publications`] | `/publications` | [`Publication`] |
//! | [`Services`] | `/services` | [`Service`] |
//! | [`Seminars`] | `/seminars` | [`Seminar`] |
//! | [`Newspapers`] | `/newspapers` | [`Newspaper`] |
//! | [`Reports`] | `/reports` | [`Report`] |
//!
//! Creates and updates are multipart so file fields can ride along with the
//! text fields. Reports are not created from the admin console; the public
//! whistleblower form posts them through [`ApiClient::submit_report`].

use serde::de::DeserializeOwned;
use serde_json::json;
use store::SessionBackend;

use crate::client::{ApiClient, ApiRequest};
use crate::error::ApiError;
use crate::form::MultipartForm;
use crate::models::{Entity, Newspaper, Publication, Report, ReportStatus, Seminar, Service};
use crate::transport::Transport;

pub trait Resource: Copy + PartialEq + Default + 'static {
    type Entity: Entity + DeserializeOwned + Clone + PartialEq + 'static;
    /// Collection path, e.g. `"/publications"`.
    const PATH: &'static str;
    /// Singular display name.
    const LABEL: &'static str;
    /// Plural display name.
    const PLURAL: &'static str;

    fn item_path(id: i64) -> String {
        format!("{}/{id}", Self::PATH)
    }
}

macro_rules! resource {
    ($marker:ident, $entity:ty, $path:literal, $label:literal, $plural:literal) => {
        #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
        pub struct $marker;

        impl Resource for $marker {
            type Entity = $entity;
            const PATH: &'static str = $path;
            const LABEL: &'static str = $label;
            const PLURAL: &'static str = $plural;
        }
    };
}

resource!(Publications, Publication, "/publications", "Publication", "Publications");
resource!(Services, Service, "/services", "Service", "Services");
resource!(Seminars, Seminar, "/seminars", "Seminar", "Seminars");
resource!(Newspapers, Newspaper, "/newspapers", "Journal issue", "Journal");
resource!(Reports, Report, "/reports", "Report", "Reports");

pub const NEWSLETTER_PATH: &str = "/newsletter";

/// Server-side list filters. Unset fields are left off the query string.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ListQuery {
    pub category: Option<String>,
    pub status: Option<String>,
}

impl ListQuery {
    pub fn category(category: impl Into<String>) -> Self {
        Self {
            category: Some(category.into()),
            ..Self::default()
        }
    }

    pub fn status(status: impl Into<String>) -> Self {
        Self {
            status: Some(status.into()),
            ..Self::default()
        }
    }

    fn apply(&self, mut request: ApiRequest) -> ApiRequest {
        let filters = [("category", &self.category), ("status", &self.status)];
        for (name, value) in filters {
            if let Some(value) = value.as_deref().map(str::trim).filter(|v| !v.is_empty()) {
                request = request.query(name, value);
            }
        }
        request
    }
}

impl<T: Transport, B: SessionBackend> ApiClient<T, B> {
    pub async fn list<R: Resource>(&self, query: &ListQuery) -> Result<Vec<R::Entity>, ApiError> {
        self.send_json(query.apply(ApiRequest::get(R::PATH))).await
    }

    pub async fn fetch<R: Resource>(&self, id: i64) -> Result<R::Entity, ApiError> {
        self.send_json(ApiRequest::get(R::item_path(id))).await
    }

    pub async fn create<R: Resource>(&self, form: MultipartForm) -> Result<(), ApiError> {
        self.send(ApiRequest::post(R::PATH).multipart(form)).await?;
        tracing::info!("Created {}", R::LABEL);
        Ok(())
    }

    /// Fields or files left out of `form` keep their stored values.
    pub async fn update<R: Resource>(&self, id: i64, form: MultipartForm) -> Result<(), ApiError> {
        self.send(ApiRequest::put(R::item_path(id)).multipart(form)).await?;
        tracing::info!("Updated {} {id}", R::LABEL);
        Ok(())
    }

    pub async fn delete<R: Resource>(&self, id: i64) -> Result<(), ApiError> {
        self.send(ApiRequest::delete(R::item_path(id))).await?;
        tracing::info!("Deleted {} {id}", R::LABEL);
        Ok(())
    }

    pub async fn set_report_status(&self, id: i64, status: ReportStatus) -> Result<(), ApiError> {
        let path = format!("{}/status", Reports::item_path(id));
        self.send(ApiRequest::patch(path).json(json!({ "status": status })))
            .await?;
        tracing::info!("Report {id} moved to {}", status.as_str());
        Ok(())
    }

    /// Public newsletter sign-up.
    pub async fn subscribe_newsletter(&self, email: &str) -> Result<(), ApiError> {
        self.send(ApiRequest::post(NEWSLETTER_PATH).json(json!({ "email": email.trim() })))
            .await?;
        tracing::info!("Newsletter subscription sent");
        Ok(())
    }

    /// Public whistleblower submission. Works without a session.
    pub async fn submit_report(&self, form: MultipartForm) -> Result<(), ApiError> {
        self.send(ApiRequest::post(Reports::PATH).multipart(form)).await?;
        tracing::info!("Whistleblower report submitted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::FileUpload;
    use crate::testing::ScriptedTransport;
    use crate::transport::{HttpResponse, Method, RequestBody};
    use store::{MemoryBackend, SessionKeys, SessionStore};

    fn client() -> (ApiClient<ScriptedTransport, MemoryBackend>, ScriptedTransport) {
        let transport = ScriptedTransport::new();
        let session = SessionStore::new(MemoryBackend::new(), SessionKeys::default());
        (ApiClient::new("http://api.test", transport.clone(), session), transport)
    }

    #[tokio::test]
    async fn test_list_with_filters() {
        let (client, transport) = client();
        transport.reply(
            Method::Get,
            "/publications",
            HttpResponse::json(
                200,
                &json!({"data": [{"id": 1, "title": "Ethics guide", "category": "guides"}]}),
            ),
        );

        let items = client
            .list::<Publications>(&ListQuery::category("guides"))
            .await
            .unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].title, "Ethics guide");
        assert_eq!(
            transport.requests()[0].url,
            "http://api.test/publications?category=guides"
        );
    }

    #[tokio::test]
    async fn test_blank_filters_are_dropped() {
        let (client, transport) = client();
        transport.reply(Method::Get, "/reports", HttpResponse::json(200, &json!([])));

        let query = ListQuery {
            category: Some("  ".to_string()),
            status: Some("new".to_string()),
        };
        client.list::<Reports>(&query).await.unwrap();
        assert_eq!(transport.requests()[0].url, "http://api.test/reports?status=new");
    }

    #[tokio::test]
    async fn test_update_is_multipart_put() {
        let (client, transport) = client();
        transport.reply(Method::Put, "/seminars/4", HttpResponse::new(204, ""));

        let form = MultipartForm::new()
            .text("title", "Sanctions screening")
            .file("image", FileUpload::new("room.jpg", vec![0xff]));
        client.update::<Seminars>(4, form.clone()).await.unwrap();

        let sent = transport.requests();
        assert_eq!(sent[0].method, Method::Put);
        assert_eq!(sent[0].body, RequestBody::Multipart(form));
    }

    #[tokio::test]
    async fn test_report_status_patch() {
        let (client, transport) = client();
        transport.reply(Method::Patch, "/reports/12/status", HttpResponse::new(200, "{}"));

        client
            .set_report_status(12, ReportStatus::Resolved)
            .await
            .unwrap();
        assert_eq!(
            transport.requests()[0].body,
            RequestBody::Json(json!({"status": "resolved"}))
        );
    }

    #[tokio::test]
    async fn test_newsletter_without_session() {
        let (client, transport) = client();
        transport.reply(Method::Post, NEWSLETTER_PATH, HttpResponse::new(201, ""));

        client.subscribe_newsletter(" reader@example.com ").await.unwrap();
        let sent = transport.requests();
        assert_eq!(sent[0].bearer, None);
        assert_eq!(sent[0].body, RequestBody::Json(json!({"email": "reader@example.com"})));
    }

    #[tokio::test]
    async fn test_fetch_missing_item() {
        let (client, transport) = client();
        transport.reply(Method::Get, "/newspapers/77", HttpResponse::new(404, ""));

        let err = client.fetch::<Newspapers>(77).await.unwrap_err();
        assert!(err.is_not_found());
    }
}
