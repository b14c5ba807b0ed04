//! # API crate: gateway to the backend REST API
//!
//! Every screen of the public site and the admin console reaches the backend
//! through [`ApiClient`]. The client attaches the stored bearer token, turns
//! HTTP statuses into [`ApiError`]s, and reacts to a lost credential in one
//! place instead of on every screen.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`client`] | [`ApiClient`], request building, auth-loss handling and the [`AuthEvent`] stream |
//! | [`auth`] | Login and current-user endpoints |
//! | [`resources`] | [`Resource`] markers and generic list/fetch/create/update/delete calls |
//! | [`models`] | Content entities: publications, services, seminars, journal issues, reports |
//! | [`form`] | Multipart bodies for file uploads |
//! | [`transport`] | The [`Transport`] seam and its `reqwest` implementation |
//! | [`error`] | The [`ApiError`] taxonomy |
//! | `testing` | Scripted transport (`testing` feature or tests only) |

pub mod auth;
pub mod client;
pub mod error;
pub mod form;
pub mod models;
pub mod resources;
pub mod transport;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use auth::{Credentials, LoginResponse};
pub use client::{ApiClient, ApiRequest, AuthEvent, CURRENT_USER_PATH, LOGIN_PATH};
pub use error::ApiError;
pub use form::{FileUpload, FormPart, MultipartForm};
pub use models::{Entity, Newspaper, Publication, Report, ReportStatus, Seminar, Service};
pub use resources::{
    ListQuery, Newspapers, Publications, Reports, Resource, Seminars, Services, NEWSLETTER_PATH,
};
pub use transport::{HttpRequest, HttpResponse, Method, ReqwestTransport, Transport};

pub use store::{Role, User};
