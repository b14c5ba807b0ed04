//! Shared API client constructor for all platforms.
//!
//! Returns an [`api::ApiClient`] whose session store sits on the appropriate
//! [`store::SessionBackend`]:
//! - **Web** (WASM + `web` feature): browser `localStorage` via [`store::LocalStorageBackend`]
//! - **Everything else**: in-process [`store::MemoryBackend`] (sessions end with the process)

use std::time::Duration;

use api::{ApiClient, ReqwestTransport};
use store::{PortalConfig, SessionKeys, SessionStore};

use crate::auth::AuthController;

#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub type PlatformBackend = store::LocalStorageBackend;
#[cfg(not(all(target_arch = "wasm32", feature = "web")))]
pub type PlatformBackend = store::MemoryBackend;

pub type AppApi = ApiClient<ReqwestTransport, PlatformBackend>;
pub type AppAuth = AuthController<ReqwestTransport, PlatformBackend>;

/// Build the app-wide client from configuration.
pub fn make_client(config: &PortalConfig) -> AppApi {
    let timeout = match config.api.request_timeout_secs {
        0 => None,
        secs => Some(Duration::from_secs(u64::from(secs))),
    };
    let session = SessionStore::new(PlatformBackend::new(), SessionKeys::from_config(config));
    tracing::debug!("API client targeting {}", config.api.base_url);
    ApiClient::new(
        config.api.base_url.clone(),
        ReqwestTransport::new(timeout),
        session,
    )
}
