//! # HTTP transport seam
//!
//! [`ApiClient`](crate::ApiClient) never talks to the network directly. It
//! builds an [`HttpRequest`], hands it to a [`Transport`], and classifies the
//! [`HttpResponse`] it gets back. Swapping the transport is how the gateway is
//! exercised in tests without a server.
//!
//! [`ReqwestTransport`] is the production implementation. It runs on the browser
//! `fetch` API under wasm32 and on hyper natively; the per-request timeout only
//! applies natively because `fetch` has no equivalent knob in `reqwest`.

use std::time::Duration;

use crate::form::{FormPart, MultipartForm};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum RequestBody {
    Empty,
    Json(serde_json::Value),
    Multipart(MultipartForm),
}

/// A fully resolved request, bearer token included.
#[derive(Clone, Debug, PartialEq)]
pub struct HttpRequest {
    pub method: Method,
    /// Endpoint path relative to the API base, e.g. `"/publications/4"`.
    pub path: String,
    pub url: String,
    pub bearer: Option<String>,
    pub body: RequestBody,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn json(status: u16, value: &serde_json::Value) -> Self {
        Self::new(status, value.to_string())
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends one request. An `Err` means no HTTP response was received at all.
pub trait Transport {
    fn send(
        &self,
        request: HttpRequest,
    ) -> impl std::future::Future<Output = Result<HttpResponse, String>>;
}

/// `reqwest`-backed transport.
#[derive(Clone, Debug, Default)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(timeout: Option<Duration>) -> Self {
        let builder = reqwest::Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        let builder = match timeout {
            Some(timeout) => builder.timeout(timeout),
            None => builder,
        };
        #[cfg(target_arch = "wasm32")]
        let _ = timeout;

        let client = match builder.build() {
            Ok(client) => client,
            Err(e) => {
                tracing::warn!("Falling back to default HTTP client: {e}");
                reqwest::Client::new()
            }
        };
        Self { client }
    }
}

impl Transport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, String> {
        let method = match request.method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Patch => reqwest::Method::PATCH,
            Method::Delete => reqwest::Method::DELETE,
        };

        let mut builder = self
            .client
            .request(method, request.url.as_str())
            .header(reqwest::header::ACCEPT, "application/json");
        if let Some(ref token) = request.bearer {
            builder = builder.bearer_auth(token);
        }
        builder = match request.body {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => builder.json(&value),
            RequestBody::Multipart(form) => builder.multipart(to_reqwest_form(form)?),
        };

        let response = builder.send().await.map_err(|e| e.to_string())?;
        let status = response.status().as_u16();
        let body = response.bytes().await.map_err(|e| e.to_string())?;
        Ok(HttpResponse::new(status, body.to_vec()))
    }
}

fn to_reqwest_form(form: MultipartForm) -> Result<reqwest::multipart::Form, String> {
    let mut out = reqwest::multipart::Form::new();
    for part in form.into_parts() {
        out = match part {
            FormPart::Text { name, value } => out.text(name, value),
            FormPart::File { name, file } => {
                let part = reqwest::multipart::Part::bytes(file.bytes)
                    .file_name(file.file_name)
                    .mime_str(&file.content_type)
                    .map_err(|e| format!("Invalid content type {}: {e}", file.content_type))?;
                out.part(name, part)
            }
        };
    }
    Ok(out)
}
